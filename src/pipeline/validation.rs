//! Checks a parsed [`PipelineSpec`] before any stage is built.
//!
//! Each check is a [`ValidationRule`] that writes into a [`Findings`] sink.
//! The sink stamps every entry with the rule that produced it, so a report
//! can be filtered per rule. All rules run; a report lists every problem in
//! the spec, not just the first.

use std::collections::HashMap;

use serde::Serialize;

use super::error_code::ErrorCode;
use super::errors::PipelineSpecError;
use super::spec::{PipelineSpec, SPEC_VERSION};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocks pipeline construction
    Error,
    /// Logged, then ignored
    Warning,
}

/// One problem found in a spec, tagged with the rule that found it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub rule: &'static str,
    pub severity: Severity,
    #[serde(flatten)]
    pub error: PipelineSpecError,
}

/// Write access to a report for the duration of one rule
pub struct Findings<'r> {
    rule: &'static str,
    out: &'r mut Vec<Finding>,
}

impl Findings<'_> {
    pub fn error(&mut self, error: PipelineSpecError) {
        self.push(Severity::Error, error);
    }

    pub fn warn(&mut self, error: PipelineSpecError) {
        self.push(Severity::Warning, error);
    }

    pub fn push(&mut self, severity: Severity, error: PipelineSpecError) {
        self.out.push(Finding {
            rule: self.rule,
            severity,
            error,
        });
    }
}

/// Everything the rules found, in rule order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &PipelineSpecError> {
        self.findings
            .iter()
            .filter(move |f| f.severity == severity)
            .map(|f| &f.error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &PipelineSpecError> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &PipelineSpecError> {
        self.with_severity(Severity::Warning)
    }

    /// Findings of a single rule
    pub fn from_rule<'a>(&'a self, rule: &'a str) -> impl Iterator<Item = &'a Finding> {
        self.findings.iter().filter(move |f| f.rule == rule)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// No errors; warnings allowed
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

/// A single check over a spec
pub trait ValidationRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn check(&self, spec: &PipelineSpec, findings: &mut Findings<'_>);
}

/// A rule backed by a plain function
struct FnRule {
    name: &'static str,
    check: fn(&PipelineSpec, &mut Findings<'_>),
}

impl ValidationRule for FnRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn check(&self, spec: &PipelineSpec, findings: &mut Findings<'_>) {
        (self.check)(spec, findings)
    }
}

/// An ordered set of rules
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// An engine with no rules; every spec passes
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Version, graph limits, alphabet, stopword conflicts, unknown fields
    pub fn with_defaults() -> Self {
        let defaults: [(&'static str, fn(&PipelineSpec, &mut Findings<'_>)); 5] = [
            ("version", check_version),
            ("graph_limits", check_graph_limits),
            ("alphabet", check_alphabet),
            ("stopword_conflict", check_stopword_conflicts),
            ("unknown_fields", check_unknown_fields),
        ];
        defaults
            .into_iter()
            .fold(Self::new(), |engine, (name, check)| {
                engine.with_rule(FnRule { name, check })
            })
    }

    /// Append a rule; it runs after the existing ones.
    pub fn with_rule(mut self, rule: impl ValidationRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn validate(&self, spec: &PipelineSpec) -> ValidationReport {
        let mut findings = Vec::new();
        for rule in &self.rules {
            rule.check(
                spec,
                &mut Findings {
                    rule: rule.name(),
                    out: &mut findings,
                },
            );
        }
        ValidationReport { findings }
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn check_version(spec: &PipelineSpec, findings: &mut Findings<'_>) {
    if spec.v != SPEC_VERSION {
        findings.error(
            PipelineSpecError::new(
                ErrorCode::UnsupportedVersion,
                "/v",
                format!("spec version {} is not supported", spec.v),
            )
            .with_hint(format!("Set \"v\": {SPEC_VERSION}")),
        );
    }
}

fn check_graph_limits(spec: &PipelineSpec, findings: &mut Findings<'_>) {
    let limits = [
        ("window_size", spec.graph.window_size),
        ("max_nodes", spec.graph.max_nodes),
    ];
    for (field, value) in limits {
        if let Some(v) = value.filter(|v| *v < 1) {
            findings.error(
                PipelineSpecError::new(
                    ErrorCode::InvalidValue,
                    format!("/graph/{field}"),
                    format!("{field} must be at least 1, got {v}"),
                )
                .with_hint(format!("Remove {field} to use the default, or set it to a positive value")),
            );
        }
    }
}

fn check_alphabet(spec: &PipelineSpec, findings: &mut Findings<'_>) {
    let Some(chars) = spec.alphabet.chars.as_deref() else {
        return;
    };
    let blanks = chars.chars().filter(|c| c.is_whitespace()).count();
    if blanks == chars.chars().count() {
        findings.error(
            PipelineSpecError::new(
                ErrorCode::InvalidValue,
                "/alphabet/chars",
                "alphabet has no usable characters",
            )
            .with_hint("Remove alphabet.chars to use a-z0-9"),
        );
    } else if blanks > 0 {
        findings.warn(PipelineSpecError::new(
            ErrorCode::InvalidValue,
            "/alphabet/chars",
            "whitespace is always a delimiter and is ignored in the alphabet",
        ));
    }
}

fn check_stopword_conflicts(spec: &PipelineSpec, findings: &mut Findings<'_>) {
    let removed: Vec<String> = spec.stopwords.remove.iter().map(|w| w.to_lowercase()).collect();
    for word in &spec.stopwords.add {
        if removed.contains(&word.to_lowercase()) {
            findings.warn(
                PipelineSpecError::new(
                    ErrorCode::InvalidCombo,
                    "/stopwords",
                    format!("\"{word}\" is both added and removed; removal wins"),
                )
                .with_hint("List the word in only one of add/remove"),
            );
        }
    }
}

/// Unknown keys are errors in strict mode and warnings otherwise. Keys are
/// reported sorted within each section.
fn check_unknown_fields(spec: &PipelineSpec, findings: &mut Findings<'_>) {
    let severity = if spec.strict {
        Severity::Error
    } else {
        Severity::Warning
    };
    let sections: [(&str, &HashMap<String, serde_json::Value>); 4] = [
        ("", &spec.unknown_fields),
        ("/graph", &spec.graph.unknown_fields),
        ("/stopwords", &spec.stopwords.unknown_fields),
        ("/alphabet", &spec.alphabet.unknown_fields),
    ];
    for (section, extra) in sections {
        let mut keys: Vec<&str> = extra.keys().map(String::as_str).collect();
        keys.sort_unstable();
        for key in keys {
            findings.push(
                severity,
                PipelineSpecError::new(
                    ErrorCode::UnknownField,
                    format!("{section}/{key}"),
                    format!("unrecognized field \"{key}\""),
                )
                .with_hint("Check spelling or remove this field"),
            );
        }
    }
}
