//! Test helpers shared across Tagwatch crates.

pub mod questions;
pub mod storage;

pub use questions::{FailingQuestionSource, FixedQuestionSource, question_item};
pub use storage::{MemoryBlobStore, MemoryConnector, MissingCredentials};
