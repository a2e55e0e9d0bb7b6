//! Declarative form validation metadata

pub mod form_rules;
pub mod validation;

pub use form_rules::{validate_form, FieldRule, FieldValue as FormValue};
pub use validation::ValidationRules;
