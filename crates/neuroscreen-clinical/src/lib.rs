//! # NeuroScreen-Clinical
//!
//! Maps numeric biomarkers onto ordered severity bands for the clinical
//! report.
//!
//! ## Bands
//!
//! Every metric has a fixed threshold table. Ascending tables (frequencies,
//! questionnaire totals) match the first band whose limit the value is
//! strictly below; descending tables (tap counts) match the first band whose
//! limit the value reaches. A missing value always maps to the table's
//! "no data" band and is never treated as zero.
//!
//! | Metric | Bands |
//! |---|---|
//! | Resting tremor (Hz) | <3.5 normal, <4.5 mild, <6.5 PD range, <20.5 marked |
//! | Postural tremor (Hz) | <3.5 normal, <4.5 mild, <8.0 ET/PD range, <20.5 marked |
//! | Balance (Hz) | <3.0 stable, <5.0 mild, <8.0 marked, <20.5 severe |
//! | Gait arm swing (Hz) | <2.5 normal, <4.0 mild, <6.0 marked, <20.5 severe |
//! | Tap count | ≥60 normal, ≥45 mild, ≥30 moderate, ≥0 marked |
//! | Questionnaire total | <5 low, <10 moderate, <20 high, <31 very high |
//!
//! Values past the last band are reported as anomalous data.

pub mod bands;
pub mod tables;

pub use bands::*;
pub use tables::*;
