//! Pinned-version release of the whole suite.
//!
//! - `checks` - pre-flight cleanliness gate
//! - `switch` - checkout of pinned release tags
//! - `restore` - return to development branches
//! - `pipeline` - sequencing of the stages

mod checks;
mod pipeline;
mod restore;
mod switch;
mod types;

pub use checks::{check_all, check_clean};
pub use pipeline::run;
pub use restore::restore_branches;
pub use switch::{switch_all, switch_version};
pub use types::{
    RepoCheck, RestoreOutcome, RunMode, RunOptions, RunReport, SwitchAction, SwitchOutcome,
};
