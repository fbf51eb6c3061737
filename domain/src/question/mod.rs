//! Generated questions: drafts, their durable ids, and response parsing.

pub mod draft;
pub mod parsing;
pub mod persisted;
