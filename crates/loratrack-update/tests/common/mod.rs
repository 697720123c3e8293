//! Common test infrastructure for loratrack-update tests
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Modules
//!
//! - `constants`: Tags, repo names, binary contents
//! - `builders`: Fluent builder for release listing JSON
//! - `archives`: In-memory tar.gz / zip / checksum manifest builders
//! - `mock_server`: Wiremock setup helpers for listing and artifact endpoints
//! - `updater_helpers`: Fake installs and updaters pointed at a mock server

// Not every test binary uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod archives;
pub mod builders;
pub mod constants;
pub mod mock_server;
pub mod updater_helpers;

pub use archives::*;
pub use builders::*;
pub use constants::*;
pub use mock_server::*;
pub use updater_helpers::*;
