//! Test utilities and fixtures for modwrap
//!
//! This crate provides shared test helpers used by the integration tests of
//! the core and CLI crates.

pub mod fixtures;
pub mod mocks;
