//! Assessment plan files
//!
//! A plan is the author's input to one workflow run:
//!
//! ```toml
//! [assessment]
//! title = "Backend screening"
//! description = "Rust and networking fundamentals"
//!
//! [assessment.timing]
//! duration_minutes = 45
//!
//! [context]
//! job_role = "Backend Engineer"
//! skills = ["Rust", "PostgreSQL"]
//!
//! [[mappings]]
//! type = "Technical Skills"
//! value = "Rust"
//! questions = 2
//! ```

mod loader;

pub use loader::{AssessmentPlan, PlanError, PlanLoader};
