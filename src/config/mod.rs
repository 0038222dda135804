//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment
//!     → env.rs (snapshot + credentials)
//!     → networks.rs (built-in network table)
//!     → loader.rs (optional TOML overrides)
//!     → resolver.rs (merge overrides over defaults)
//!     → validation.rs (semantic checks)
//!     → ResolvedConfig (validated, immutable)
//!     → passed by reference to the migration runner
//! ```
//!
//! # Design Decisions
//! - Config is built once by a pure function; nothing mutates it afterwards
//! - Networks that need a credential exist only when it is supplied
//! - Validation separates syntactic (serde) from semantic checks

pub mod env;
pub mod loader;
pub mod networks;
pub mod resolver;
pub mod schema;
pub mod validation;

pub use env::{Credentials, Environment};
pub use loader::{ConfigError, ConfigResult, Overrides};
pub use resolver::resolve;
pub use schema::{
    AccountSource, DeploymentConfig, Endpoint, NetworkProfile, ResolvedConfig, Secret,
};
