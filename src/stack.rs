//! Stack growth for deep recursion.
//!
//! Parsing, checking and evaluating recurse once per level of expression or
//! statement nesting, and every clite call recurses through the evaluator.
//! Long operator chains, deep parentheses and deep recursion in clite code
//! would otherwise exhaust the native stack. Each recursive entry point wraps
//! its body in [`ensure_sufficient_stack`].
//!
//! - **Red zone**: 100KB. If less than this remains, the stack grows
//! - **Growth size**: 1MB per new segment

/// Minimum stack space to keep available.
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Runs `f`, first growing the stack if less than the red zone is left.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nest(depth: usize) -> usize {
        ensure_sufficient_stack(|| if depth == 0 { 0 } else { nest(depth - 1) + 1 })
    }

    #[test]
    fn test_deep_recursion_grows_stack() {
        assert_eq!(nest(200_000), 200_000);
    }

    #[test]
    fn test_passes_result_through() {
        let result: Result<i32, &str> = ensure_sufficient_stack(|| Ok(7));
        assert_eq!(result, Ok(7));
    }
}
