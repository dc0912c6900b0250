pub mod annotation;
pub mod label;

pub use annotation::{AnnotationCandidate, AnnotationSet, Span};
pub use label::EntityLabel;
