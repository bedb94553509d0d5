//! Stack growth for recursive IR traversals.
//!
//! Member bodies arrive as trees whose depth is set by the front-end, not
//! by us. Wrapping each recursive step in [`ensure_sufficient_stack`] lets
//! extraction walk arbitrarily deep trees on worker threads with small
//! fixed stacks.
//!
//! On `wasm32` the wrapper calls through directly.

/// Grow when less than this remains (128 KiB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment (1 MiB).
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first switching to a fresh stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
