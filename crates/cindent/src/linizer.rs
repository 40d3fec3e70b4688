//! Backward line reader.
//!
//! The linizer yields cleaned, non-empty lines from the bottom of the program upward and
//! keeps the bookkeeping the classifiers need. All of it lives in [`LinizerState`], which
//! is a plain value: speculative lookahead takes a snapshot and restores it afterwards.

use crate::SMALL_ROOF;
use crate::column::{first_non_whitespace, indent_of_line};
use crate::config::IndentConfig;
use crate::cursor::LineCursor;
use crate::normalize::{clean_line, fill_range};
use crate::patterns::patterns;

#[derive(Debug, Clone)]
pub(crate) struct LinizerState<C> {
    /// The current cleaned line (empty once the scan ran off the top of the program).
    pub(crate) line: String,
    /// Closing minus opening braces seen so far. Scanning backward, a `}` means one more
    /// level we have to climb back out of.
    pub(crate) brace_depth: isize,
    in_c_comment: bool,
    /// The last line read was `} else` / `} catch`; its `}` is counted on the next read.
    pending_right_brace: bool,
    /// The line below the current one starts with `{`.
    pub(crate) left_brace_follows: bool,
    /// Lines stepped over since the bottom line. Reading stops at [`SMALL_ROOF`].
    lines_read: usize,
    cursor: C,
}

pub(crate) struct Linizer<'c, C> {
    pub(crate) config: &'c IndentConfig,
    /// Where the scan started; never moves.
    pub(crate) bottom: C,
    pub(crate) state: LinizerState<C>,
}

impl<'c, C: LineCursor> Linizer<'c, C> {
    /// Parks on the bottom line and reads the first line above it.
    pub(crate) fn start(bottom: C, config: &'c IndentConfig) -> Self {
        let line = bottom.line().unwrap_or_default().to_owned();
        let mut linizer = Self {
            config,
            bottom: bottom.clone(),
            state: LinizerState {
                line,
                brace_depth: 0,
                in_c_comment: false,
                pending_right_brace: false,
                left_brace_follows: false,
                lines_read: 0,
                cursor: bottom,
            },
        };
        linizer.read_line();
        linizer
    }

    /// Moves to the nearest earlier line that is non-empty once cleaned.
    ///
    /// Returns `false`, leaving an empty current line, when the program start is reached or
    /// [`SMALL_ROOF`] lines above the bottom line have been read.
    pub(crate) fn read_line(&mut self) -> bool {
        let indent_size = self.config.indent_size;
        let state = &mut self.state;
        state.left_brace_follows = first_non_whitespace(&state.line) == Some('{');

        loop {
            if state.cursor.at_begin() || state.lines_read >= SMALL_ROOF {
                state.line.clear();
                return false;
            }
            state.cursor.step_back();
            state.lines_read += 1;
            let Some(raw) = state.cursor.line() else {
                state.line.clear();
                return false;
            };
            let mut line = clean_line(raw, indent_size);

            // Scanning backward, `*/` opens a comment and `/*` closes it.
            if state.in_c_comment {
                match line.find("/*") {
                    Some(k) => {
                        line.truncate(k);
                        state.in_c_comment = false;
                    }
                    None => line.clear(),
                }
            }
            if !state.in_c_comment {
                if let Some(k) = line.find("*/") {
                    fill_range(&mut line, 0..k + 2, ' ');
                    state.in_c_comment = true;
                }
            }

            if first_non_whitespace(&line) == Some('#') {
                line.clear();
            }

            let trimmed = line.trim_end().len();
            line.truncate(trimmed);

            state.brace_depth += count(&line, '}') - count(&line, '{');

            // `} else` is read as if the `}` sat on a line of its own: the brace is only
            // counted once we move past this line.
            if state.pending_right_brace {
                state.brace_depth += 1;
            }
            state.pending_right_brace =
                patterns().starts_with_close_brace_then_else_or_catch(&line);
            if state.pending_right_brace {
                state.brace_depth -= 1;
            }

            state.line = line;
            if !state.line.is_empty() {
                return true;
            }
        }
    }

    pub(crate) fn snapshot(&self) -> LinizerState<C> {
        self.state.clone()
    }

    pub(crate) fn restore(&mut self, snapshot: LinizerState<C>) {
        self.state = snapshot;
    }

    pub(crate) fn line(&self) -> &str {
        &self.state.line
    }

    pub(crate) fn indent_of_current(&self) -> isize {
        indent_of_line(&self.state.line, self.config.tab_size) as isize
    }

    pub(crate) fn indent_size(&self) -> isize {
        self.config.indent_size as isize
    }

    pub(crate) fn continuation_indent_size(&self) -> isize {
        self.config.continuation_indent() as isize
    }
}

fn count(line: &str, needle: char) -> isize {
    line.matches(needle).count() as isize
}
