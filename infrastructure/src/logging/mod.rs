//! Logging infrastructure: structured workflow event logging.
//!
//! Provides [`JsonlWorkflowLogger`], a JSONL file writer that implements
//! the [`WorkflowLogger`](assessgen_application::WorkflowLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlWorkflowLogger;
