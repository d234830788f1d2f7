//! Public library modules for the CLI crate
pub mod apply;
pub mod error;
pub mod fs_apply;
pub mod paths;
pub mod report;
pub mod run;
