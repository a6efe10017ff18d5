//! Stack growth guard for DAV.
//!
//! Three places recurse on user input: the block parser (nested bodies),
//! the expression parser (nested parentheses and operators), and the
//! execution engine (user function calls). Each wraps its recursive step in
//! [`ensure_sufficient_stack`] so that a deeply nested script grows the stack
//! instead of aborting the process. The call-depth limit in `dav_eval` is what
//! ends runaway recursion; this guard only makes sure we reach that limit.
//!
//! On `wasm32` the guard is a plain call.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// Run `f` directly; wasm manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::ensure_sufficient_stack;

    fn nested_sum(depth: u32) -> u64 {
        ensure_sufficient_stack(|| {
            if depth == 0 {
                0
            } else {
                u64::from(depth) + nested_sum(depth - 1)
            }
        })
    }

    #[test]
    fn passes_value_through() {
        assert_eq!(ensure_sufficient_stack(|| "done"), "done");
    }

    #[test]
    fn small_depth() {
        assert_eq!(nested_sum(4), 10);
    }

    #[test]
    fn survives_depth_that_would_overflow_main_stack() {
        assert_eq!(nested_sum(200_000), 20_000_100_000);
    }
}
