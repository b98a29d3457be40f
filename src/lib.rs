//! Read, write, and lay out [SpatioTemporal Asset Catalogs](https://stacspec.org/).
//!
//! STAC is built on three JSON objects: [`Item`], [`Catalog`], and [`Collection`]. They
//! are plain serde structures, and [`Object`] wraps whichever one an href holds. Links
//! between them form a tree, which [`Stac`] loads lazily and [`Layout`] reorganizes
//! before a [`Writer`] puts it back on disk.
//!
//! ```no_run
//! use stac::{Layout, Stac, Writer};
//! let (stac, _) = Stac::read("data/catalog.json").unwrap();
//! stac.write(&Layout::new("out/v1"), &Writer::default()).unwrap();
//! ```

/// Macro for prefixed status logging to stderr (only when stderr is a terminal).
///
/// Usage:
/// ```ignore
/// log_status!("read", "{}", href);
/// log_status!("layout", "Laying out catalog under {}", root);
/// ```
#[macro_export]
macro_rules! log_status {
    ($prefix:expr, $($arg:tt)*) => {
        if ::std::io::IsTerminal::is_terminal(&::std::io::stderr()) {
            eprintln!(concat!("[", $prefix, "] {}"), format_args!($($arg)*));
        }
    };
}

pub mod core;

// Re-export everything from core for ergonomic library use
// Users can write `stac::Stac` instead of `stac::core::Stac`
pub use self::core::*;
