// Public modules
pub mod build;
pub mod config;
pub mod error;
pub mod git;
pub mod install;
pub mod release;
pub mod version;

// Re-export common types for convenience
pub use config::SuiteConfig;
pub use error::{Error, ErrorCode, Result};
pub use release::{RunOptions, RunReport};
