mod fileclass;
mod ruleset;
mod severity;

pub use fileclass::FileClass;
pub use ruleset::{LineContext, PatternRule, RuleSet};
pub use severity::Severity;
