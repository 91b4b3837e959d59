//! Unit tests for collector-installer
//!
//! These tests use mocked ports and temp directories and run fast without
//! touching the host's systemd, package manager, or network.

mod architecture;
mod config_service;
