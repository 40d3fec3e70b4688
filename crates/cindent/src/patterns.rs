//! The fixed set of compiled patterns the indenter classifies lines with.
//!
//! The set is compiled once per process and shared read-only by every call.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

/// A quoted string or char literal, shortest match, honoring backslash escapes.
const LITERAL: &str = r#""(?:\\.|[^\\])*?"|'(?:\\.|[^\\])*?'"#;
/// A `case ...:` or bare identifier label (Qt `slots` / `Q_SLOTS` allowed) at line start.
/// The "not followed by a second colon" rule is applied in [`PatternSet::find_label`].
const LABEL: &str = r"^\s*((?:case\b(?:[^:]|::)+|[a-zA-Z_0-9]+)(?:\s+slots|\s+Q_SLOTS)?:)";
const INLINE_COMMENT: &str = r"/\*.*?\*/";
const CLOSE_BRACE_THEN_ELSE_OR_CATCH: &str = r"^\s*\}\s*(?:else|catch)\b";
const IF_LIKE_KEYWORD: &str = r"\b(?:catch|do|for|if|while|foreach)\b";
const CASE_OR_ACCESS_LABEL: &str = r"^\s*(?:case\b(?:[^:]|::)+|(?:public|protected|private|signals|Q_SIGNALS|default)(?:\s+slots|\s+Q_SLOTS)?\s*):.*$";

static PATTERNS: OnceLock<PatternSet> = OnceLock::new();

/// Returns the process-wide pattern set, compiling it on first use.
pub fn patterns() -> &'static PatternSet {
    PATTERNS.get_or_init(|| {
        PatternSet::compile().expect("built-in indentation patterns must compile")
    })
}

#[derive(Debug)]
pub struct PatternSet {
    pub literal: Regex,
    label: Regex,
    pub inline_comment: Regex,
    pub close_brace_then_else_or_catch: Regex,
    pub if_like_keyword: Regex,
    pub case_or_access_label: Regex,
}

impl PatternSet {
    pub fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            literal: Regex::new(LITERAL)?,
            label: Regex::new(LABEL)?,
            inline_comment: Regex::new(INLINE_COMMENT)?,
            close_brace_then_else_or_catch: Regex::new(CLOSE_BRACE_THEN_ELSE_OR_CATCH)?,
            if_like_keyword: Regex::new(IF_LIKE_KEYWORD)?,
            case_or_access_label: Regex::new(CASE_OR_ACCESS_LABEL)?,
        })
    }

    /// Byte range of the label prefix (`foo:`, `case X::Y:`, `public slots:`) at the start of
    /// `line`, excluding scope operators such as `std::`.
    pub fn find_label(&self, line: &str) -> Option<Range<usize>> {
        let label = self.label.captures(line)?.get(1)?;
        if line[label.end()..].starts_with(':') {
            return None;
        }
        Some(label.range())
    }

    /// Whole-line match of a case label or access specifier, as typed on the bottom line.
    pub fn is_case_or_access_label(&self, line: &str) -> bool {
        self.case_or_access_label.is_match(line)
    }

    pub fn starts_with_close_brace_then_else_or_catch(&self, line: &str) -> bool {
        self.close_brace_then_else_or_catch.is_match(line)
    }

    pub fn contains_if_like_keyword(&self, line: &str) -> bool {
        self.if_like_keyword.is_match(line)
    }
}
