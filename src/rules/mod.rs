//! Rules module - rule model and YAML loading.

mod loader;
mod rule;

pub use loader::load_rules;
pub use rule::{Condition, Detect, Rule, Severity};
