//! Logging contract for the Splice patcher.
//!
//! The merge engine reports per-item problems through the [`Logger`] trait
//! instead of returning them, so a run can collect every diagnostic in one
//! pass. This crate defines that trait and the sinks the rest of the
//! workspace uses.
//!
//! # Modules
//!
//! - [`level`] -- Message severity [`Level`]
//! - [`traits`] -- The [`Logger`] trait
//! - [`counts`] -- Per-level [`LogCounts`]
//! - [`tracing_logger`] -- [`TracingLogger`], forwarding to `tracing`
//! - [`memory`] -- In-memory [`MemoryLogger`] for tests
//! - [`config`] -- [`LogConfig`] and subscriber installation
//! - [`error`] -- Error types for logging setup

pub mod config;
pub mod counts;
pub mod error;
pub mod level;
pub mod memory;
pub mod tracing_logger;
pub mod traits;

pub use config::{init_subscriber, LogConfig};
pub use counts::LogCounts;
pub use error::{LogError, Result};
pub use level::Level;
pub use memory::{LogRecord, MemoryLogger};
pub use tracing_logger::TracingLogger;
pub use traits::Logger;
