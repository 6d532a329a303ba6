//! Logging shim.
//!
//! Forwards to `defmt` when the `defmt` feature is enabled and compiles to
//! nothing otherwise, so host tests stay free of a global logger.

cfg_if::cfg_if! {
    if #[cfg(feature = "defmt")] {
        pub(crate) use defmt::{debug, info, warn};
    } else {
        macro_rules! debug {
            ($($arg:tt)*) => {{}};
        }
        macro_rules! info {
            ($($arg:tt)*) => {{}};
        }
        // A bare `warn` would clash with the built-in lint attribute.
        macro_rules! warn_noop {
            ($($arg:tt)*) => {{}};
        }
        pub(crate) use {debug, info, warn_noop as warn};
    }
}
