//! Command implementations.

pub mod build_helper;
pub mod clean;
pub mod completions;
pub mod dispatcher;
pub mod doc;
pub mod install;
pub mod man;
pub mod status;
