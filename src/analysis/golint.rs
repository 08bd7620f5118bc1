//! Regex-driven style checker for Go source files
//!
//! A line-oriented subset of the classic golint checks. It does not build
//! a syntax tree; the only hard failure is a file without a package clause.

use super::{AnalysisFailure, Analyzer, Finding};
use regex::Regex;

const PACKAGE_COMMENT_CONFIDENCE: f64 = 0.2;
const UNDERSCORE_CONFIDENCE: f64 = 0.9;
const ALL_CAPS_CONFIDENCE: f64 = 0.8;
const ERROR_STRING_CONFIDENCE: f64 = 0.9;
const INCREMENT_CONFIDENCE: f64 = 0.8;

/// Go style checker
#[derive(Debug, Clone)]
pub struct GoLinter {
    package_clause: Regex,
    exported_func: Regex,
    receiver: Regex,
    func_name: Regex,
    all_caps: Regex,
    error_string: Regex,
    increment: Regex,
}

impl GoLinter {
    /// Compile the rule set
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            package_clause: Regex::new(r"^package\s+\w+")?,
            exported_func: Regex::new(
                r"^func\s+(?:\(\s*(?:\w+\s+)?\*?\s*(\w+)(?:\[[^\]]*\])?\s*\)\s*)?([A-Z]\w*)\s*[\[(]",
            )?,
            receiver: Regex::new(r"^func\s+\(\s*(\w+)\s+\*?\s*\w+")?,
            func_name: Regex::new(r"^func\s+(?:\([^)]*\)\s*)?(\w+)\s*[\[(]")?,
            all_caps: Regex::new(
                r"^\s*(?:const\s+|var\s+)?([A-Z][A-Z0-9]*(?:_[A-Z0-9]+)+)\b[^=]*=",
            )?,
            error_string: Regex::new(r#"(?:errors\.New|fmt\.Errorf)\(\s*"((?:[^"\\]|\\.)*)""#)?,
            increment: Regex::new(r"\b([A-Za-z_][\w.]*)\s*([+-])=\s*1\s*(?:$|;|//)")?,
        })
    }

    /// Rule hits for one line after the package clause, in rule order
    fn check_line(&self, file_name: &str, line: &str, documented: bool) -> Vec<(String, f64)> {
        let mut hits = Vec::new();
        let mut push = |text: String, confidence: f64| hits.push((text, confidence));

        if let Some(caps) = self.exported_func.captures(line) {
            if !documented && !file_name.ends_with("_test.go") {
                let name = &caps[2];
                let text = match caps.get(1) {
                    Some(recv) if is_exported(recv.as_str()) => format!(
                        "exported method {}.{} should have comment or be unexported",
                        recv.as_str(),
                        name
                    ),
                    Some(_) => String::new(),
                    None => format!(
                        "exported function {} should have comment or be unexported",
                        name
                    ),
                };
                if !text.is_empty() {
                    push(text, 1.0);
                }
            }
        }

        if let Some(caps) = self.receiver.captures(line) {
            match &caps[1] {
                "this" | "self" => push(
                    "receiver name should be a reflection of its identity; \
                     don't use generic names such as \"this\" or \"self\""
                        .to_string(),
                    1.0,
                ),
                "_" => push(
                    "receiver name should not be an underscore, omit the name if it is unused"
                        .to_string(),
                    1.0,
                ),
                _ => {}
            }
        }

        if let Some(caps) = self.func_name.captures(line) {
            let name = &caps[1];
            if name.trim_matches('_').contains('_') && !is_test_entry(file_name, name) {
                push(
                    format!(
                        "don't use underscores in Go names; func {} should be {}",
                        name,
                        camel_case(name)
                    ),
                    UNDERSCORE_CONFIDENCE,
                );
            }
        }

        if self.all_caps.is_match(line) {
            push(
                "don't use ALL_CAPS in Go names; use CamelCase".to_string(),
                ALL_CAPS_CONFIDENCE,
            );
        }

        for caps in self.error_string.captures_iter(line) {
            if is_bad_error_string(&caps[1]) {
                push(
                    "error strings should not be capitalized or end with punctuation or a newline"
                        .to_string(),
                    ERROR_STRING_CONFIDENCE,
                );
            }
        }

        if let Some(caps) = self.increment.captures(line) {
            let var = &caps[1];
            let (op, suffix) = if &caps[2] == "+" { ("+=", "++") } else { ("-=", "--") };
            push(
                format!("should replace {} {} 1 with {}{}", var, op, var, suffix),
                INCREMENT_CONFIDENCE,
            );
        }

        hits
    }
}

impl Analyzer for GoLinter {
    fn analyze(&self, file_name: &str, data: &[u8]) -> Result<Vec<Finding>, AnalysisFailure> {
        let source = std::str::from_utf8(data)
            .map_err(|_| AnalysisFailure::new(format!("{}: file is not valid UTF-8", file_name)))?;

        let mut findings = Vec::new();
        let mut seen_package = false;
        let mut in_block_comment = false;
        let mut prev_is_comment = false;

        for (idx, raw) in source.lines().enumerate() {
            let line_no = idx as u32 + 1;
            let line = raw.trim_end_matches('\r');
            let trimmed = line.trim();

            if in_block_comment {
                if trimmed.contains("*/") {
                    in_block_comment = false;
                    prev_is_comment = true;
                }
                continue;
            }
            if trimmed.starts_with("/*") {
                in_block_comment = !trimmed[2..].contains("*/");
                prev_is_comment = true;
                continue;
            }
            if trimmed.starts_with("//") {
                prev_is_comment = true;
                continue;
            }
            if trimmed.is_empty() {
                // a blank line detaches a doc comment
                prev_is_comment = false;
                continue;
            }

            if !seen_package {
                if !self.package_clause.is_match(trimmed) {
                    let token = trimmed.split_whitespace().next().unwrap_or("EOF");
                    return Err(AnalysisFailure::new(format!(
                        "{}:{}:1: expected 'package', found '{}'",
                        file_name, line_no, token
                    )));
                }
                seen_package = true;
                if !prev_is_comment && !file_name.ends_with("_test.go") {
                    findings.push(Finding {
                        line: line_no,
                        text: "should have a package comment, unless it's in another file for this package"
                            .to_string(),
                        line_text: line.to_string(),
                        confidence: PACKAGE_COMMENT_CONFIDENCE,
                    });
                }
                prev_is_comment = false;
                continue;
            }

            for (text, confidence) in self.check_line(file_name, line, prev_is_comment) {
                findings.push(Finding {
                    line: line_no,
                    text,
                    line_text: line.to_string(),
                    confidence,
                });
            }
            prev_is_comment = false;
        }

        if !seen_package {
            return Err(AnalysisFailure::new(format!(
                "{}:1:1: expected 'package', found 'EOF'",
                file_name
            )));
        }

        Ok(findings)
    }

    fn name(&self) -> &'static str {
        "golint"
    }
}

fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

fn is_test_entry(file_name: &str, name: &str) -> bool {
    file_name.ends_with("_test.go")
        && ["Test", "Benchmark", "Example", "Fuzz"]
            .iter()
            .any(|prefix| name.starts_with(prefix))
}

fn is_bad_error_string(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    if s.ends_with('.') || s.ends_with(':') || s.ends_with('!') || s.ends_with("\\n") {
        return true;
    }
    let mut chars = s.chars();
    let first = chars.next().is_some_and(|c| c.is_uppercase());
    // "URL not found" is an acronym, not a capitalized sentence
    let second_lower = chars.next().map_or(true, |c| !c.is_uppercase());
    first && second_lower
}

fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for (i, c) in name.chars().enumerate() {
        if c == '_' {
            upper_next = i > 0;
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
