//! # NeuroScreen-Core
//!
//! Core types and utilities for the NeuroScreen digital biomarker engine,
//! which turns mobile inertial-sensor recordings and assessment results into
//! the structured data behind a movement-disorder screening report.

pub mod error;
pub mod types;
pub mod value;

pub use error::{Error, Result};
pub use types::*;
pub use value::*;
