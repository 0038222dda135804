//! Migration subsystem.
//!
//! # Data Flow
//! ```text
//! ResolvedConfig + Credentials
//!     → runner.rs (select network, pre-flight, unlock, deploy)
//!     → record.rs (persist the deployed address)
//! ```

pub mod record;
pub mod runner;

pub use record::DeploymentRecord;
pub use runner::{
    ExecutionMode, Migration, MigrationError, MigrationResult, MigrationState, DEPLOY_GAS_LIMIT,
    MIGRATIONS_CONTRACT, UNLOCK_DURATION,
};
