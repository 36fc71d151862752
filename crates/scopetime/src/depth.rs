//! Per-thread nesting depth tracking

use std::cell::Cell;

thread_local! {
    static DEPTH: Cell<usize> = Cell::new(0);
}

/// Returns the calling thread's current depth, then increments it.
pub(crate) fn enter() -> usize {
    DEPTH.with(|depth| {
        let current = depth.get();
        depth.set(current + 1);
        current
    })
}

/// Decrements the calling thread's depth. Stops at zero.
pub(crate) fn exit() {
    DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
}

/// Number of currently open timers on the calling thread.
pub fn current_depth() -> usize {
    DEPTH.with(Cell::get)
}
