//! Scope-lifetime timers

use std::borrow::Cow;
use std::time::Instant;

use crate::{depth, output};

/// Measures the wall-clock lifetime of the scope that owns it.
///
/// Creating the timer records the calling thread's nesting depth and
/// increments it; dropping the timer computes the elapsed time, emits one
/// report line per enabled format, and decrements the depth again.
/// Reporting happens before the decrement, so the emitted line carries
/// the depth the timer ran at.
///
/// Timers on one thread nest strictly: drop order is the reverse of
/// creation order, so a timer never outlives one created after it.
pub struct ScopeTimer {
    name: Cow<'static, str>,
    category: Cow<'static, str>,
    depth: usize,
    start: Instant,
}

impl ScopeTimer {
    /// Starts timing the enclosing scope.
    ///
    /// Static labels are stored without allocating; owned strings are
    /// accepted for labels built at runtime.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        category: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            // Field order matters: depth is claimed before the clock starts.
            depth: depth::enter(),
            start: Instant::now(),
        }
    }
}

impl Drop for ScopeTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        output::report(&self.name, &self.category, self.depth, elapsed.as_nanos());
        depth::exit();
    }
}
