//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, systemd
//! and package-manager drivers, HTTP and instance-metadata clients, archive
//! extraction, and filesystem access.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod archive;
pub mod command_runner;
pub mod config;
pub mod fs;
pub mod host;
pub mod http;
pub mod metadata;
pub mod packages;
pub mod systemd;
