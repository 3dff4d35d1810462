//! Form generators

pub mod replacement;

pub use replacement::{detect_model, ReplacementRequest, ReplacementTable};
