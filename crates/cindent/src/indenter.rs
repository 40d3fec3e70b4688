use tracing::{debug, trace};

use crate::column::{first_non_whitespace, indent_of_line};
use crate::config::{ConfigError, IndentConfig};
use crate::cursor::{LineCursor, SliceCursor};
use crate::linizer::Linizer;
use crate::patterns::patterns;

/// Computes indentation columns for C-family source lines.
///
/// Holds only the configuration; every call builds its own scan state, so one indenter can
/// serve any number of buffers and threads.
#[derive(Debug, Clone, Default)]
pub struct Indenter {
    config: IndentConfig,
}

impl Indenter {
    pub fn new(config: IndentConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &IndentConfig {
        &self.config
    }

    /// Recommended column for the line under `bottom`, looking only at the lines above it.
    ///
    /// `typed` is the character whose insertion triggered the request, or `None` when the
    /// request comes from a command such as "reformat selection".
    pub fn indent_for_bottom_line<C: LineCursor>(&self, bottom: C, typed: Option<char>) -> usize {
        let Some(bottom_line) = bottom.line().map(str::to_owned) else {
            return 0;
        };
        let first = first_non_whitespace(&bottom_line);
        let tab_size = self.config.tab_size;
        let indent_size = self.config.indent_size as isize;

        let mut linizer = Linizer::start(bottom, &self.config);

        let indent = if linizer.bottom_line_starts_in_c_comment() {
            let indent = if bottom_line.trim().is_empty() {
                linizer.indent_when_bottom_line_starts_in_c_comment()
            } else {
                indent_of_line(&bottom_line, tab_size) as isize
            };
            debug!(strategy = "comment", indent);
            indent
        } else if accepts(typed, '#') && first == Some('#') {
            debug!(strategy = "preprocessor", indent = 0);
            0
        } else {
            let mut indent = if linizer.is_unfinished_line() {
                let indent = linizer.indent_for_continuation_line();
                debug!(strategy = "continuation", indent);
                indent
            } else {
                let indent = linizer.indent_for_standalone_line();
                debug!(strategy = "standalone", indent);
                indent
            };

            if accepts(typed, '}') && first == Some('}') {
                indent -= indent_size;
                trace!(indent, "closing brace");
            } else if accepts(typed, ':') && patterns().is_case_or_access_label(&bottom_line) {
                let current = indent_of_line(&bottom_line, tab_size) as isize;
                if current <= indent {
                    indent -= indent_size;
                } else {
                    indent = current;
                }
                trace!(indent, current, "case or access label");
            }
            indent
        };

        indent.max(0) as usize
    }

    /// [`Indenter::indent_for_bottom_line`] for `lines[index]`.
    pub fn indent_for_line<S: AsRef<str>>(
        &self,
        lines: &[S],
        index: usize,
        typed: Option<char>,
    ) -> usize {
        self.indent_for_bottom_line(SliceCursor::new(lines, index), typed)
    }

    /// Reindents a whole buffer top-down, each line against the already reindented lines
    /// above it. Blank lines come out empty; only leading whitespace is rewritten.
    pub fn reindent<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(lines.len());
        for line in lines {
            let line = line.as_ref();
            let text = line.trim_start();
            if text.is_empty() {
                out.push(String::new());
                continue;
            }
            out.push(line.to_owned());
            let column = self.indent_for_line(&out, out.len() - 1, None);
            let mut rendered = self.config.indentation(column);
            rendered.push_str(text);
            if let Some(last) = out.last_mut() {
                *last = rendered;
            }
        }
        out
    }
}

/// True for characters whose insertion can change the indentation of the line they are
/// typed on.
pub fn is_electric_character(ch: char) -> bool {
    matches!(ch, '{' | '}' | '#' | ':')
}

/// An unspecified trigger is compatible with every adjustment.
fn accepts(typed: Option<char>, trigger: char) -> bool {
    typed.is_none_or(|ch| ch == trigger)
}
