//! Command implementations

pub mod config;
pub mod install;
pub mod version;
