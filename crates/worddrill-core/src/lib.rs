//! worddrill-core — Vocabulary sheet ingestion and the practice session engine.
//!
//! This crate turns a raw sheet export into typed records and runs
//! non-repeating, scored quiz sessions over them.

pub mod csv;
pub mod drill;
pub mod error;
pub mod ingest;
pub mod model;
pub mod options;
pub mod report;
pub mod schema;
pub mod session;
pub mod statistics;
pub mod traits;

pub use drill::{Answer, DrillMode, Question};
pub use error::FetchError;
pub use ingest::{ingest, ingest_with_report, load_dataset, Ingestion};
pub use model::{DatasetKind, Record};
pub use session::{PracticeSession, Selection, SessionPhase};
