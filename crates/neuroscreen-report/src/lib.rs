//! # NeuroScreen-Report
//!
//! Ties the engine together. One [`ReportAssembler`] turns a participant's
//! demographics and one raw assessment record into a [`ScreeningReport`]:
//!
//! ```text
//! raw record ──► RecordNormalizer ──► per-test blobs
//!                                      │
//!          motor tests ─► SeriesExtractor ─► FrequencyEstimator ─┐
//!          tapping / questionnaire / risk / text fields ─────────┤
//! demographics ─► AgeCalculator ─────────────────────────────────┤
//!                                                                ▼
//!                                   InterpretationTables ─► ScreeningReport
//! ```
//!
//! Every failure along the way degrades to an absent value and a "No data"
//! band; assembling a report never fails once the assembler is built.

pub mod assembler;
pub mod report;
pub mod settings;

pub use assembler::*;
pub use report::*;
pub use settings::*;
