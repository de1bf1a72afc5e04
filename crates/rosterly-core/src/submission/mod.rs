//! Resource submission: the multi-call write saga and the edit-draft
//! prefill barrier.

pub mod orchestrator;
pub mod prefill;

pub use orchestrator::{SubmissionOrchestrator, SubmitMode};
pub use prefill::DraftPrefill;
