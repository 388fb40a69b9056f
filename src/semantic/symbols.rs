//! Symbol table for clite semantic analysis.
//!
//! The symbol table tracks every named entity (types, variables, functions)
//! in a tree of scopes. Scopes live in an arena and refer to their parent by
//! [`ScopeId`], so typed nodes can point at the scope they were analyzed in
//! without borrowing the table.
//!
//! # Scope Rules
//!
//! - The root scope pre-declares the type names `void bool int float string`
//! - Function bodies, blocks, and `if`/`else`/`while` bodies open child scopes
//! - A name may be declared at most once per scope, whatever its kind
//! - An inner declaration may shadow an outer one

use crate::ast::Span;
use crate::semantic::types::EvalType;
use std::collections::HashMap;
use std::fmt;

/// Unique identifier for a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(usize);

impl ScopeId {
    /// The root scope ID (always 0).
    pub const ROOT: ScopeId = ScopeId(0);

    /// Position of this scope in the arena.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unique identifier for a declared function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionId(pub(crate) usize);

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single named entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    /// The symbol's name.
    pub name: String,
    /// What kind of symbol this is.
    pub kind: SymbolKind,
    /// Where the symbol was declared (empty for built-in types).
    pub span: Span,
}

impl Symbol {
    /// Creates a type symbol.
    pub fn type_name(eval_type: EvalType) -> Self {
        Self {
            name: eval_type.name().to_string(),
            kind: SymbolKind::Type(eval_type),
            span: Span::default(),
        }
    }

    /// Creates a variable symbol.
    pub fn variable(name: impl Into<String>, eval_type: EvalType, span: Span) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Variable(eval_type),
            span,
        }
    }

    /// Creates a function symbol.
    pub fn function(name: impl Into<String>, signature: FunctionSignature, span: Span) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Function(signature),
            span,
        }
    }
}

/// The kind of symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    /// A type name.
    Type(EvalType),
    /// A variable or parameter of the given type.
    Variable(EvalType),
    /// A function.
    Function(FunctionSignature),
}

impl SymbolKind {
    /// Human-readable category, used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            SymbolKind::Type(_) => "type",
            SymbolKind::Variable(_) => "variable",
            SymbolKind::Function(_) => "function",
        }
    }
}

/// The part of a function declaration that callers need.
///
/// Registered before the body is analyzed so the body can call itself.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    /// Identity of the declaration, shared with the typed function node.
    pub id: FunctionId,
    /// Declared return type (may be `void`).
    pub return_type: EvalType,
    /// Parameters in declaration order.
    pub params: Vec<ParameterInfo>,
}

/// Information about a function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterInfo {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub eval_type: EvalType,
}

/// A single scope containing symbols.
#[derive(Debug, Clone)]
struct Scope {
    /// Descriptive name, for dumps and logs.
    name: String,
    /// Parent scope (None for the root).
    parent: Option<ScopeId>,
    /// Symbols declared directly in this scope.
    symbols: HashMap<String, Symbol>,
}

/// The complete symbol table: an arena of scopes.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

impl SymbolTable {
    /// Creates a symbol table holding only the root scope and its type names.
    pub fn new() -> Self {
        let mut root = Scope {
            name: "Global Scope".to_string(),
            parent: None,
            symbols: HashMap::new(),
        };
        for eval_type in EvalType::ALL {
            let symbol = Symbol::type_name(eval_type);
            root.symbols.insert(symbol.name.clone(), symbol);
        }

        Self { scopes: vec![root] }
    }

    /// The root scope.
    pub fn root(&self) -> ScopeId {
        ScopeId::ROOT
    }

    /// Creates a new, empty child scope of `parent`.
    pub fn create_scope(&mut self, parent: ScopeId, name: impl Into<String>) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        let name = name.into();
        log::debug!("scope {} `{}` opened under {}", id.0, name, parent.0);

        self.scopes.push(Scope {
            name,
            parent: Some(parent),
            symbols: HashMap::new(),
        });
        id
    }

    /// Declares a symbol in `scope`.
    ///
    /// Returns `Err(existing)` if the name is already declared in that same
    /// scope, whatever the kind of the existing symbol.
    pub fn declare(&mut self, scope: ScopeId, symbol: Symbol) -> Result<(), Symbol> {
        let scope = &mut self.scopes[scope.0];

        if let Some(existing) = scope.symbols.get(&symbol.name) {
            return Err(existing.clone());
        }

        scope.symbols.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    /// Looks up a name in `scope` only.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<&Symbol> {
        self.scopes.get(scope.0)?.symbols.get(name)
    }

    /// Looks up a name in `scope` and then in each ancestor in turn.
    pub fn lookup_recursive(&self, scope: ScopeId, name: &str) -> Option<&Symbol> {
        self.resolve(scope, name).map(|(_, symbol)| symbol)
    }

    /// Like [`lookup_recursive`](Self::lookup_recursive), also returning the
    /// scope the symbol was found in.
    pub fn resolve(&self, scope: ScopeId, name: &str) -> Option<(ScopeId, &Symbol)> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scopes.get(id.0)?;
            if let Some(symbol) = scope.symbols.get(name) {
                return Some((id, symbol));
            }
            current = scope.parent;
        }
        None
    }

    /// The parent of `scope`, or None for the root.
    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes.get(scope.0)?.parent
    }

    /// The descriptive name of `scope`.
    pub fn scope_name(&self, scope: ScopeId) -> &str {
        self.scopes.get(scope.0).map_or("", |s| s.name.as_str())
    }

    /// Iterates over the symbols declared directly in `scope`, sorted by name.
    pub fn symbols_in(&self, scope: ScopeId) -> Vec<&Symbol> {
        let mut symbols: Vec<_> = self
            .scopes
            .get(scope.0)
            .map(|s| s.symbols.values().collect())
            .unwrap_or_default();
        symbols.sort_by(|a, b| a.name.cmp(&b.name));
        symbols
    }

    /// Number of scopes created so far, including the root.
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Every scope, in creation order.
    pub fn scope_ids(&self) -> impl Iterator<Item = ScopeId> {
        (0..self.scopes.len()).map(ScopeId)
    }

    /// Lists each scope with the variables and functions declared in it.
    ///
    /// ```text
    /// #0 Global Scope: f(int) -> float, x: int
    /// #1 function f in #0: n: int
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();
        for id in self.scope_ids() {
            out.push_str(&format!("{id} {}", self.scope_name(id)));
            if let Some(parent) = self.parent(id) {
                out.push_str(&format!(" in {parent}"));
            }
            out.push(':');

            let entries: Vec<String> = self
                .symbols_in(id)
                .into_iter()
                .filter_map(|symbol| match &symbol.kind {
                    SymbolKind::Type(_) => None,
                    SymbolKind::Variable(eval_type) => {
                        Some(format!("{}: {}", symbol.name, eval_type.name()))
                    }
                    SymbolKind::Function(signature) => {
                        let params: Vec<&str> =
                            signature.params.iter().map(|p| p.eval_type.name()).collect();
                        Some(format!(
                            "{}({}) -> {}",
                            symbol.name,
                            params.join(", "),
                            signature.return_type.name()
                        ))
                    }
                })
                .collect();
            if !entries.is_empty() {
                out.push(' ');
                out.push_str(&entries.join(", "));
            }
            out.push('\n');
        }
        out
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
