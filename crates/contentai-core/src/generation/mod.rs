//! Generation domain module.
//!
//! # Module Structure
//!
//! - `request`: what the user asks for (template, objective, context, documents)
//! - `result`: what the backend produced and the workflow state around it

mod request;
mod result;

pub use request::{Document, GenerationKind, GenerationRequest};
pub use result::{GenerationResult, WorkflowSnapshot, WorkflowState};
