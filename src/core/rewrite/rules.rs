//! The built-in rewrite rules, applied to whole-file text in a fixed order.

use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};

/// One pattern/replacement pair applied to the full file text.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub replacement: &'static str,
}

impl RewriteRule {
    fn compile(name: &'static str, pattern: &str, replacement: &'static str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| {
            Error::internal_unexpected(format!("invalid pattern for rule '{}': {}", name, e))
        })?;

        Ok(Self {
            name,
            pattern,
            replacement,
        })
    }

    /// Replace every match of this rule in `text`.
    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement)
            .into_owned()
    }

    pub fn describe(&self) -> RuleDescription {
        RuleDescription {
            name: self.name.to_string(),
            pattern: self.pattern.as_str().to_string(),
            replacement: self.replacement.to_string(),
        }
    }
}

/// Serializable view of a rule for listings.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RuleDescription {
    pub name: String,
    pub pattern: String,
    pub replacement: String,
}

/// Built-in rules as (name, pattern, replacement), in application order.
///
/// `annotation` already rewrites everything `array_annotation` targets; both
/// still run, in this order.
const BUILTIN_RULES: &[(&str, &str, &str)] = &[
    ("annotation", r":\s*any\b", ": unknown"),
    ("array_annotation", r":\s*any\[\]", ": unknown[]"),
    ("array_generic", r"Array<any>", "Array<unknown>"),
    ("record_value", r"Record<string,\s*any>", "Record<string, unknown>"),
];

/// An ordered list of rules. Each rule sees the output of the previous one.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<RewriteRule>,
}

impl RuleSet {
    pub fn builtin() -> Result<Self> {
        let rules = BUILTIN_RULES
            .iter()
            .map(|&(name, pattern, replacement)| RewriteRule::compile(name, pattern, replacement))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    pub fn apply(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |current, rule| rule.apply(&current))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RewriteRule> {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RuleSet {
        RuleSet::builtin().unwrap()
    }

    #[test]
    fn builtin_rules_are_ordered() {
        let names: Vec<&str> = rules().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec!["annotation", "array_annotation", "array_generic", "record_value"]
        );
    }

    #[test]
    fn rewrites_parameter_annotation() {
        assert_eq!(
            rules().apply("function f(x: any) {}"),
            "function f(x: unknown) {}"
        );
    }

    #[test]
    fn rewrites_array_annotation() {
        assert_eq!(rules().apply("let arr: any[];"), "let arr: unknown[];");
    }

    #[test]
    fn rewrites_record_value() {
        assert_eq!(
            rules().apply("const m: Record<string, any> = {};"),
            "const m: Record<string, unknown> = {};"
        );
        assert_eq!(
            rules().apply("type M = Record<string,any>;"),
            "type M = Record<string, unknown>;"
        );
    }

    #[test]
    fn rewrites_array_generic() {
        assert_eq!(
            rules().apply("const xs = new Array<any>();"),
            "const xs = new Array<unknown>();"
        );
        assert_eq!(
            rules().apply("let xs: Array<any> = [];"),
            "let xs: Array<unknown> = [];"
        );
    }

    #[test]
    fn normalizes_whitespace_before_marker() {
        assert_eq!(rules().apply("let a:any;"), "let a: unknown;");
        assert_eq!(rules().apply("let a: any;"), "let a: unknown;");
    }

    #[test]
    fn ignores_identifiers_starting_with_any() {
        let text = "const x: anyOf = y; let z: any_thing; const anything = 1;";
        assert_eq!(rules().apply(text), text);
    }

    #[test]
    fn leaves_text_without_marker_unchanged() {
        let text = "export const add = (a: number, b: number): number => a + b;\n";
        assert_eq!(rules().apply(text), text);
    }

    #[test]
    fn rewrites_every_occurrence() {
        let input = concat!(
            "function g(a: any, b: any[]): Promise<any> {\n",
            "  const c: Record<string, any> = {};\n",
            "}\n",
        );
        let expected = concat!(
            "function g(a: unknown, b: unknown[]): Promise<any> {\n",
            "  const c: Record<string, unknown> = {};\n",
            "}\n",
        );
        assert_eq!(rules().apply(input), expected);
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let set = rules();
        let inputs = [
            "function f(x: any) {}",
            "let arr: any[];",
            "const m: Record<string, any> = {};",
            "let xs: Array<any>;",
            "a:any; b :  any[]; c: Record<string,   any>",
        ];

        for input in inputs {
            let once = set.apply(input);
            assert_eq!(set.apply(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn describe_exposes_pattern() {
        let set = rules();
        let first = set.iter().next().unwrap().describe();
        assert_eq!(first.name, "annotation");
        assert_eq!(first.pattern, r":\s*any\b");
        assert_eq!(first.replacement, ": unknown");
    }
}
