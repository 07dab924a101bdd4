//! Docintake - Document Intake & Indexing
//!
//! Picks up documents dropped into a deposit directory, stages them, and
//! writes one index record per document.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Deposit   │     │   Staging   │     │   Record    │     │    Index    │
//! │ (selector)  │────▶│ (relocate)  │────▶│ (filename → │────▶│  (writer)   │
//! │             │     │             │     │   fields)   │     │             │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Core Concepts
//!
//! - **Deposit directory**: inbound folder populated by an upstream producer
//! - **Pre-process directory**: staging area for files being indexed
//! - **Index directory**: one `.txt` record file per processed document
//! - **Format code**: label (e.g. `PDF`) configured per file extension
//! - **Keyword separator**: delimiter between the four filename keywords

pub mod config;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod record;
pub mod relocate;
pub mod selector;
pub mod writer;

// Re-exports for convenience
pub use config::{IniDocument, IntakeSettings};
pub use error::{IntakeError, Result};
pub use layout::IntakeLayout;
pub use pipeline::{FailedFile, FileStage, Intake, ProcessedFile, RunSummary};
pub use record::ParsedRecord;
pub use selector::{Candidate, DEFAULT_MIN_AGE};
