//! # NeuroScreen-Record
//!
//! Normalizes the loosely-structured documents written by the assessment app
//! into typed views the rest of the engine can rely on:
//!
//! - **Normalizer**: per-test result blobs matched case-insensitively against
//!   the test allow-list, each tagged with its record id and timestamp
//! - **Age**: whole-years age from birth dates stored as timestamps, free
//!   text or calendar dates

pub mod age;
pub mod normalizer;

pub use age::*;
pub use normalizer::*;
