//! Test Module
//!
//! Test suite for the MailSort core.
//!
//! ## Test Categories
//! - `brain_tests`: normalization, prompts, parsing and heuristic working together
//! - `engine_tests`: retry, fallback, validation and concurrency of the pipeline
//! - `integration_tests`: full workflows over a mocked HTTP model and file input

pub mod integration_tests;
