#![allow(dead_code)]
//! Shared test utilities for integration tests.
//!
//! # Modules
//!
//! - `fixtures`: Deployed-object ids and configs
//! - `mocks`: Submitters that record plans instead of touching the network

pub mod fixtures;
pub mod mocks;

pub use fixtures::{empty_config, sample_config, ADMIN_CAP, CASE_1, CASE_2, CASE_COUNT, CONFIG, PACKAGE};
pub use mocks::{success_response, RecordingSubmitter, SharedBuffer};
