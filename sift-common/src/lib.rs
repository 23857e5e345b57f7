//! Common utilities shared across the sift crates.
//!
//! For now this is only the logging setup used by the `sift` binary and by
//! integration tests. It stays dependency-light so every crate in the
//! workspace can pull it in without dragging the HTML stack along.
//!
//! # Overview
//!
//! - [`observability`]: centralised `tracing` initialisation
//! - [`LogFormat`] / [`LogConfig`]: knobs accepted by [`observability::init_logging`]
//!
//! ```rust
//! use sift_common::{LogConfig, LogFormat};
//!
//! let cfg = LogConfig {
//!     format: LogFormat::Json,
//!     ..LogConfig::default()
//! };
//! assert_eq!(cfg.app_name, "sift");
//! assert_eq!(cfg.default_filter, "info");
//! ```

pub mod observability;

pub use observability::{LogConfig, LogFormat};
