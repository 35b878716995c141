use serde::Serialize;

use anysweep::rewrite::{RuleDescription, RuleSet};

use super::CmdResult;
use crate::output::TextReport;

#[derive(Serialize)]
#[serde(tag = "command", rename = "rules")]
pub struct RulesOutput {
    pub rules: Vec<RuleDescription>,
}

impl TextReport for RulesOutput {
    fn stdout_lines(&self) -> Vec<String> {
        self.rules
            .iter()
            .enumerate()
            .map(|(i, rule)| {
                format!(
                    "{}. {}: {} -> {}",
                    i + 1,
                    rule.name,
                    rule.pattern,
                    rule.replacement
                )
            })
            .collect()
    }
}

pub fn run() -> CmdResult<RulesOutput> {
    let rules = RuleSet::builtin()?;

    Ok((
        RulesOutput {
            rules: rules.iter().map(|r| r.describe()).collect(),
        },
        0,
    ))
}
