//! Type-annotation rewriting — replace `any` with `unknown` across a fixed file list.
//!
//! Each file is read once, passed through the built-in `RuleSet` in order, and
//! written back only when the text actually changed.

mod rules;
mod runner;

pub use rules::{RewriteRule, RuleDescription, RuleSet};
pub use runner::{
    run, FailurePolicy, FileOutcome, FileReport, Rewriter, RunMode, RunSummary,
};
