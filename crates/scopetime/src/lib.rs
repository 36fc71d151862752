//! ScopeTime - scoped wall-clock instrumentation
//!
//! Measures the lifetime of nested code regions and reports each one the
//! moment it exits, as an indented tree line and/or a flat CSV-style
//! table line. Reports go to stderr by default and can be redirected to
//! any writable sink, including append-mode files derived from a
//! basename.
//!
//! # Feature Flags
//!
//! - `timing` - Enable timing collection (default: enabled)
//!
//! # Usage
//!
//! ```ignore
//! use scopetime::time_scope;
//!
//! fn load_assets() {
//!     time_scope!("assets");
//!     // ... measured until the end of the function ...
//! }
//! ```
//!
//! In production builds (without the `timing` feature), all
//! instrumentation is compiled out: the same API remains, but every call
//! is a no-op and no timing code is emitted.

#[cfg(feature = "timing")]
mod depth;
#[cfg(feature = "timing")]
mod file_sink;
#[cfg(feature = "timing")]
mod format;
#[cfg(feature = "timing")]
mod output;
#[cfg(feature = "timing")]
mod settings;
#[cfg(feature = "timing")]
mod timer;

#[cfg(feature = "timing")]
pub use depth::current_depth;
#[cfg(feature = "timing")]
pub use file_sink::{FileSinks, SinkError};
#[cfg(feature = "timing")]
pub use format::format_engineering;
#[cfg(feature = "timing")]
pub use output::{
    set_table_enabled, set_table_sink, set_tree_enabled, set_tree_sink, table_enabled,
    tree_enabled, Sink,
};
#[cfg(feature = "timing")]
pub use settings::TimingSettings;
#[cfg(feature = "timing")]
pub use timer::ScopeTimer;

// ============================================================================
// Macros
// ============================================================================

/// Instrument the enclosing scope (zero-cost when timing disabled)
///
/// With one argument the enclosing function's name is used as the label;
/// with two the label is explicit. The guard lives until the end of the
/// enclosing scope.
#[macro_export]
macro_rules! time_scope {
    ($category:expr) => {
        let __scope_timer = $crate::ScopeTimer::new($crate::function!(), $category);
    };
    ($name:expr, $category:expr) => {
        let __scope_timer = $crate::ScopeTimer::new($name, $category);
    };
}

/// Name of the enclosing function, as a `&'static str`
#[macro_export]
macro_rules! function {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        // Trim the trailing "::f" left by the helper above.
        $crate::clean_function_name(&name[..name.len() - 3])
    }};
}

/// Strips the closure markers that [`function!`] picks up when expanded
/// inside a closure body.
pub fn clean_function_name(name: &str) -> &str {
    let mut name = name;
    while let Some(stripped) = name.strip_suffix("::{{closure}}") {
        name = stripped;
    }
    name
}

// ============================================================================
// No-op stubs when timing disabled
// ============================================================================

#[cfg(not(feature = "timing"))]
pub struct ScopeTimer;

#[cfg(not(feature = "timing"))]
impl ScopeTimer {
    #[inline]
    pub fn new(
        _name: impl Into<std::borrow::Cow<'static, str>>,
        _category: impl Into<std::borrow::Cow<'static, str>>,
    ) -> Self {
        Self
    }
}

#[cfg(not(feature = "timing"))]
pub struct FileSinks;

#[cfg(not(feature = "timing"))]
impl FileSinks {
    #[inline]
    pub fn install(_basename: impl AsRef<std::path::Path>) -> Self {
        Self
    }

    #[inline]
    pub fn try_install(_basename: impl AsRef<std::path::Path>) -> Result<Self, SinkError> {
        Ok(Self)
    }
}

#[cfg(not(feature = "timing"))]
#[derive(Debug, thiserror::Error)]
pub enum SinkError {}

#[cfg(not(feature = "timing"))]
pub type Sink = Box<dyn std::io::Write + Send>;

#[cfg(not(feature = "timing"))]
pub fn set_tree_sink(_sink: Option<Sink>) -> Option<Sink> {
    None
}

#[cfg(not(feature = "timing"))]
pub fn set_table_sink(_sink: Option<Sink>) -> Option<Sink> {
    None
}

#[cfg(not(feature = "timing"))]
pub fn set_tree_enabled(_enabled: bool) {}

#[cfg(not(feature = "timing"))]
pub fn set_table_enabled(_enabled: bool) {}

#[cfg(not(feature = "timing"))]
pub fn tree_enabled() -> bool {
    false
}

#[cfg(not(feature = "timing"))]
pub fn table_enabled() -> bool {
    false
}

#[cfg(not(feature = "timing"))]
pub fn current_depth() -> usize {
    0
}

#[cfg(not(feature = "timing"))]
pub fn format_engineering(_elapsed_ns: u128) -> String {
    String::new()
}

#[cfg(not(feature = "timing"))]
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TimingSettings {
    pub tree: bool,
    pub table: bool,
    pub file_basename: Option<String>,
}

#[cfg(not(feature = "timing"))]
impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            tree: true,
            table: true,
            file_basename: None,
        }
    }
}

#[cfg(not(feature = "timing"))]
impl TimingSettings {
    #[inline]
    pub fn apply(&self) -> Option<FileSinks> {
        self.file_basename.as_ref().map(|_| FileSinks)
    }
}

#[cfg(test)]
mod tests {
    #[cfg(not(feature = "timing"))]
    #[test]
    fn stubs_compile_without_timing() {
        // Ensure the no-op API matches the real one when timing is disabled
        let _timer = super::ScopeTimer::new("scope", "test");
        let _files = super::FileSinks::install("base");
        super::set_tree_enabled(false);
        super::set_table_enabled(true);
        assert!(!super::tree_enabled());
        assert!(!super::table_enabled());
        assert_eq!(super::current_depth(), 0);
        assert_eq!(super::format_engineering(1500), "");
        let _guard = super::TimingSettings::default().apply();
    }

    #[cfg(feature = "timing")]
    #[test]
    fn function_macro_names_the_enclosing_function() {
        let name = crate::function!();
        assert!(
            name.ends_with("function_macro_names_the_enclosing_function"),
            "{}",
            name
        );
    }

    #[cfg(feature = "timing")]
    #[test]
    fn function_macro_sheds_closure_markers() {
        let name = (|| crate::function!())();
        assert!(
            name.ends_with("function_macro_sheds_closure_markers"),
            "{}",
            name
        );
    }

    #[cfg(feature = "timing")]
    #[test]
    fn time_scope_balances_depth() {
        let _lock = crate::output::test_support::acquire_router();
        crate::set_tree_enabled(false);
        crate::set_table_enabled(false);
        {
            time_scope!("demo");
            assert_eq!(crate::current_depth(), 1);
        }
        assert_eq!(crate::current_depth(), 0);
        crate::output::test_support::reset_router();
    }

    #[cfg(feature = "timing")]
    #[test]
    fn time_scope_with_explicit_label_reports_it() {
        use crate::output::test_support::{acquire_router, reset_router, SharedBuf};

        let _lock = acquire_router();
        let table = SharedBuf::default();
        crate::set_table_sink(Some(Box::new(table.clone())));
        crate::set_tree_enabled(false);
        {
            time_scope!("checkout", "billing");
        }
        assert!(table.contents().starts_with("0,checkout,billing,"));
        reset_router();
    }
}
