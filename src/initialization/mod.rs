//! Application initialization.
//!
//! Only the logger needs process-wide setup; everything else a run needs is
//! carried in `Config`.

mod logger;

// Re-export public API
pub use logger::init_logger_with;
