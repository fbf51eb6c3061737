//! Validation-gated wizard: steps, predicates and the run state machine.

pub mod run;
pub mod step;
pub mod validation;
