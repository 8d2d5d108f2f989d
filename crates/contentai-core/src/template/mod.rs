//! Template domain module.
//!
//! Templates are fixed presets that shape a generated post. The set is
//! defined at compile time and never changes at runtime.

mod model;

pub use model::{Template, TemplateId, TEMPLATES};
