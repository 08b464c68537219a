//! Git operations: subprocess runner, branch scanning, commit resolution

pub mod branches;
pub mod command;
pub mod sha;

pub use branches::{detect_parent_branch, find_parent_branch, parse_branch_listing};
pub use command::{locate_executable, SystemRunner};
pub use sha::ShaResolver;
