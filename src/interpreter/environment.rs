//! Runtime variable scopes.
//!
//! Frames live on a stack and are only ever pushed and popped in LIFO order,
//! but each frame's parent is recorded explicitly: a block's parent is the
//! frame it runs in, while a call frame's parent is the frame the function
//! was declared in. The parent chain of a frame therefore mirrors the scope
//! chain the analyzer saw, one frame per scope.
//!
//! Names are never searched for by spelling alone. The analyzer binds each
//! use to the [`ScopeId`] that declares it, and a lookup walks the chain to
//! the frame running that scope.

use crate::interpreter::value::Value;
use crate::semantic::{FunctionId, ScopeId, TypedFunction};
use std::collections::{BTreeMap, HashMap};

/// A single runtime scope.
#[derive(Debug)]
struct Frame<'a> {
    /// The analyzer scope this frame runs.
    scope: ScopeId,
    /// Variables declared in this frame. `None` until first assigned.
    values: HashMap<String, Option<Value>>,
    /// Functions declared in this frame.
    functions: HashMap<FunctionId, &'a TypedFunction>,
    parent: Option<usize>,
}

impl Frame<'_> {
    fn new(scope: ScopeId, parent: Option<usize>) -> Self {
        Self {
            scope,
            values: HashMap::new(),
            functions: HashMap::new(),
            parent,
        }
    }
}

/// Saved position to return to when a frame is left.
#[derive(Debug, Clone, Copy)]
pub struct FrameMark {
    len: usize,
    current: usize,
}

/// Stack of frames plus the index of the frame code is running in.
#[derive(Debug)]
pub struct Environment<'a> {
    frames: Vec<Frame<'a>>,
    current: usize,
}

impl<'a> Environment<'a> {
    /// Creates an environment holding only the global frame for `root`.
    pub fn new(root: ScopeId) -> Self {
        Self {
            frames: vec![Frame::new(root, None)],
            current: 0,
        }
    }

    /// The frame code is currently running in.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Number of live frames.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    // ==== Frames ====

    /// Pushes a frame for `scope` whose parent is `parent` and makes it current.
    pub fn push_frame(&mut self, parent: usize, scope: ScopeId) -> FrameMark {
        let mark = FrameMark {
            len: self.frames.len(),
            current: self.current,
        };
        self.frames.push(Frame::new(scope, Some(parent)));
        self.current = mark.len;
        mark
    }

    /// Pushes a frame for `scope` nested in the current one.
    pub fn push_block(&mut self, scope: ScopeId) -> FrameMark {
        self.push_frame(self.current, scope)
    }

    /// Drops every frame pushed since `mark` and restores the current frame.
    pub fn pop_frame(&mut self, mark: FrameMark) {
        self.frames.truncate(mark.len);
        self.current = mark.current;
    }

    // ==== Variables ====

    /// Binds `name` in the current frame, replacing any earlier binding there.
    pub fn declare(&mut self, name: &str, value: Option<Value>) {
        self.frames[self.current]
            .values
            .insert(name.to_string(), value);
    }

    /// Updates `name` in the frame running `scope`.
    ///
    /// Returns false if that frame is not on the chain or has no such binding.
    pub fn assign(&mut self, scope: ScopeId, name: &str, value: Value) -> bool {
        let Some(index) = self.find(scope) else {
            return false;
        };
        match self.frames[index].values.get_mut(name) {
            Some(slot) => {
                *slot = Some(value);
                true
            }
            None => false,
        }
    }

    /// Looks up `name` in the frame running `scope`.
    ///
    /// The outer `Option` is the binding, the inner one whether it is set.
    pub fn get(&self, scope: ScopeId, name: &str) -> Option<&Option<Value>> {
        let index = self.find(scope)?;
        self.frames[index].values.get(name)
    }

    // ==== Functions ====

    /// Binds a function in the current frame.
    pub fn declare_function(&mut self, function: &'a TypedFunction) {
        self.frames[self.current]
            .functions
            .insert(function.id, function);
    }

    /// Finds function `id` in the frame running `scope`, along with that
    /// frame's index.
    pub fn lookup_function(
        &self,
        scope: ScopeId,
        id: FunctionId,
    ) -> Option<(&'a TypedFunction, usize)> {
        let index = self.find(scope)?;
        let function = self.frames[index].functions.get(&id)?;
        Some((*function, index))
    }

    /// Values bound in the global frame, skipping unset ones.
    pub fn globals(&self) -> BTreeMap<String, Value> {
        self.frames[0]
            .values
            .iter()
            .filter_map(|(name, value)| Some((name.clone(), value.clone()?)))
            .collect()
    }

    /// Nearest frame on the chain that runs `scope`.
    fn find(&self, scope: ScopeId) -> Option<usize> {
        let mut index = Some(self.current);
        while let Some(i) = index {
            let frame = &self.frames[i];
            if frame.scope == scope {
                return Some(i);
            }
            index = frame.parent;
        }
        None
    }
}

impl Default for Environment<'_> {
    fn default() -> Self {
        Self::new(ScopeId::ROOT)
    }
}
