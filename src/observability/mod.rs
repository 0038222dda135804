//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → stderr (pretty or JSON)
//!     → whatever metrics recorder the host process installs
//! ```

pub mod logging;
pub mod metrics;
