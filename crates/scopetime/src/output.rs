//! Process-wide report routing
//!
//! Completed timers are emitted through two independently enabled sinks:
//! an indented tree stream and a flat CSV-style table stream. A sink that
//! is unset falls back to stderr.

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;

use crate::format::format_engineering;

/// Indent unit for the tree format.
const INDENT: &str = "    ";

/// A writable report destination.
pub type Sink = Box<dyn Write + Send>;

struct Router {
    tree_sink: Option<Sink>,
    table_sink: Option<Sink>,
    tree_enabled: bool,
    table_enabled: bool,
}

static ROUTER: Lazy<Mutex<Router>> = Lazy::new(|| {
    Mutex::new(Router {
        tree_sink: None,
        table_sink: None,
        tree_enabled: true,
        table_enabled: true,
    })
});

// A poisoned lock still holds valid sink state; reporting carries on
// after a host thread panics.
fn router() -> MutexGuard<'static, Router> {
    ROUTER.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Replaces the tree sink. `None` routes tree lines to stderr.
///
/// Returns the previously installed sink; dropping the returned handle
/// closes it.
pub fn set_tree_sink(sink: Option<Sink>) -> Option<Sink> {
    std::mem::replace(&mut router().tree_sink, sink)
}

/// Replaces the table sink. `None` routes table lines to stderr.
///
/// Returns the previously installed sink; dropping the returned handle
/// closes it.
pub fn set_table_sink(sink: Option<Sink>) -> Option<Sink> {
    std::mem::replace(&mut router().table_sink, sink)
}

/// Turns the indented tree format on or off.
pub fn set_tree_enabled(enabled: bool) {
    router().tree_enabled = enabled;
}

/// Turns the table format on or off.
pub fn set_table_enabled(enabled: bool) {
    router().table_enabled = enabled;
}

/// Whether tree lines are currently emitted.
pub fn tree_enabled() -> bool {
    router().tree_enabled
}

/// Whether table lines are currently emitted.
pub fn table_enabled() -> bool {
    router().table_enabled
}

/// Emits one line per enabled format for a completed timer.
///
/// The router lock is held for the duration of the write, so lines from
/// concurrently reporting threads never interleave. Write failures are
/// swallowed; reporting must never perturb the host program.
pub(crate) fn report(name: &str, category: &str, depth: usize, elapsed_ns: u128) {
    let formatted = format_engineering(elapsed_ns);
    let mut router = router();

    if router.tree_enabled {
        let mut line = String::with_capacity(depth * INDENT.len() + name.len() + 32);
        for _ in 0..depth {
            line.push_str(INDENT);
        }
        line.push_str(name);
        line.push_str(" [");
        line.push_str(category);
        line.push_str("]: ");
        line.push_str(&formatted);
        line.push('\n');
        write_line(&mut router.tree_sink, &line);
    }

    if router.table_enabled {
        let line = format!("{},{},{},{}\n", depth, name, category, formatted);
        write_line(&mut router.table_sink, &line);
    }
}

// One write call per line, relying on the sink for atomicity.
fn write_line(sink: &mut Option<Sink>, line: &str) {
    let _ = match sink {
        Some(sink) => sink.write_all(line.as_bytes()),
        None => io::stderr().write_all(line.as_bytes()),
    };
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

    static TEST_ROUTER_LOCK: Mutex<()> = Mutex::new(());

    /// Serializes tests that touch the process-wide router, and starts
    /// each one from the default configuration.
    pub(crate) fn acquire_router() -> MutexGuard<'static, ()> {
        let guard = TEST_ROUTER_LOCK
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        reset_router();
        guard
    }

    pub(crate) fn reset_router() {
        super::set_tree_sink(None);
        super::set_table_sink(None);
        super::set_tree_enabled(true);
        super::set_table_enabled(true);
    }

    /// Cloneable in-memory sink for asserting emitted lines.
    #[derive(Clone, Default)]
    pub(crate) struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
