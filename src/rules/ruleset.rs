use regex::Regex;

use super::{FileClass, Severity};

/// Evaluation context for a single line of a file.
pub struct LineContext<'a> {
    pub file_name: &'a str,
    pub class: FileClass,
    pub lines: &'a [&'a str],
    pub index: usize,
}

impl LineContext<'_> {
    fn line(&self) -> &str {
        self.lines[self.index]
    }
}

enum Matcher {
    /// Any of the patterns matches the line.
    Line(Vec<Regex>),
    /// As `Line`, but only for files of the given class.
    LineForClass(Vec<Regex>, FileClass),
    /// An infrastructure resource declaration with no tag block within the
    /// following lookahead window.
    UntaggedResource {
        declaration: Regex,
        tag_block: Regex,
        window: usize,
    },
}

/// One fixed textual policy rule.
pub struct PatternRule {
    pub tag: &'static str,
    pub severity: Severity,
    pub description: &'static str,
    pub recommendation: &'static str,
    matcher: Matcher,
}

impl PatternRule {
    #[must_use]
    pub fn matches(&self, ctx: &LineContext<'_>) -> bool {
        match &self.matcher {
            Matcher::Line(patterns) => patterns.iter().any(|p| p.is_match(ctx.line())),
            Matcher::LineForClass(patterns, class) => {
                ctx.class == *class && patterns.iter().any(|p| p.is_match(ctx.line()))
            }
            Matcher::UntaggedResource {
                declaration,
                tag_block,
                window,
            } => {
                if ctx.class != FileClass::Infrastructure || !declaration.is_match(ctx.line()) {
                    return false;
                }
                let end = (ctx.index + window + 1).min(ctx.lines.len());
                !ctx.lines[ctx.index..end].iter().any(|l| tag_block.is_match(l))
            }
        }
    }
}

/// The fixed, ordered rule set applied line by line.
///
/// Evaluation is strictly line-oriented; multi-line constructs (tag blocks
/// spanning the lookahead window, SQL split across lines) are a known
/// limitation of the pattern contract, not a defect.
pub struct RuleSet {
    rules: Vec<PatternRule>,
}

impl RuleSet {
    pub fn iter(&self) -> impl Iterator<Item = &PatternRule> {
        self.rules.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&PatternRule> {
        self.rules.iter().find(|r| r.tag == tag)
    }
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("Invalid regex"))
        .collect()
}

/// Lookahead window for the untagged-resource rule.
const TAG_BLOCK_WINDOW: usize = 20;

impl Default for RuleSet {
    fn default() -> Self {
        let rules = vec![
            PatternRule {
                tag: "hardcoded-credential",
                severity: Severity::Critical,
                description: "Hardcoded credential detected",
                recommendation: "Move the value to a secrets manager or runtime configuration",
                matcher: Matcher::Line(compile(&[
                    r#"(?i)\b(password|passwd|pwd|api[_-]?key|secret|token)\b\s*[:=]\s*["'][^"']+["']"#,
                ])),
            },
            PatternRule {
                tag: "public-storage-acl",
                severity: Severity::Critical,
                description: "Storage bucket exposed with a public ACL",
                recommendation: "Use a private ACL and enable the public access block",
                matcher: Matcher::Line(compile(&[
                    r"\bpublic-read(-write)?\b",
                    r"(?i)\b(block_public_acls|block_public_policy|ignore_public_acls|restrict_public_buckets)\s*=\s*false\b",
                ])),
            },
            PatternRule {
                tag: "open-admin-port",
                severity: Severity::Medium,
                description: "Administrative port open to the world",
                recommendation: "Restrict the ingress CIDR to trusted networks",
                matcher: Matcher::Line(compile(&[
                    r"(?i)0\.0\.0\.0/0.*\b(ssh|22|ingress)\b",
                    r"(?i)\b(ssh|22|ingress)\b.*0\.0\.0\.0/0",
                ])),
            },
            PatternRule {
                tag: "encryption-disabled",
                severity: Severity::High,
                description: "Encryption explicitly disabled",
                recommendation: "Enable encryption at rest for this resource",
                matcher: Matcher::LineForClass(
                    compile(&[r#"(?i)\bencrypt(ed|ion)?("|')?\s*[:=]\s*("|')?(false|disabled|off)\b"#]),
                    FileClass::Infrastructure,
                ),
            },
            PatternRule {
                tag: "untagged-resource",
                severity: Severity::Low,
                description: "Resource declared without tags",
                recommendation: "Add a tags block so the resource can be attributed and costed",
                matcher: Matcher::UntaggedResource {
                    declaration: Regex::new(r#"^\s*resource\s+"[A-Za-z0-9_-]+"\s+""#)
                        .expect("Invalid regex"),
                    tag_block: Regex::new(r"^\s*tags\s*[=:{]").expect("Invalid regex"),
                    window: TAG_BLOCK_WINDOW,
                },
            },
            PatternRule {
                tag: "container-root-user",
                severity: Severity::High,
                description: "Container image runs as the root user",
                recommendation: "Create a dedicated unprivileged user and switch to it",
                matcher: Matcher::LineForClass(
                    compile(&[r"(?i)^\s*USER\s+root\s*$"]),
                    FileClass::Container,
                ),
            },
            PatternRule {
                tag: "dynamic-code-execution",
                severity: Severity::High,
                description: "Dynamic code execution construct",
                recommendation: "Replace eval-style execution with explicit dispatch",
                matcher: Matcher::Line(compile(&[
                    r"\beval\s*\(",
                    r"\bnew\s+Function\s*\(",
                    r"\bexec\s*\(",
                ])),
            },
            PatternRule {
                tag: "sql-string-concat",
                severity: Severity::Critical,
                description: "SQL statement built from string concatenation",
                recommendation: "Use parameterized queries instead of assembling SQL from input",
                matcher: Matcher::Line(compile(&[
                    r#"(?i)["'][^"']*\b(select|insert|update|delete)\b[^"']*["']\s*\+"#,
                    r#"(?i)\+\s*["'][^"']*\b(select|insert|update|delete)\b"#,
                    r"(?i)`[^`]*\b(select|insert|update|delete)\b[^`]*\$\{",
                    r#"(?i)\bf["'][^"']*\b(select|insert|update|delete)\b[^"']*\{"#,
                ])),
            },
        ];
        Self { rules }
    }
}

#[cfg(test)]
#[path = "ruleset_tests.rs"]
mod tests;
