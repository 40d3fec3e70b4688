//! Line classifiers built on the linizer.

use crate::BIG_ROOF;
use crate::SMALL_ROOF;
use crate::cursor::LineCursor;
use crate::linizer::Linizer;
use crate::normalize::clean_line;
use crate::patterns::patterns;

impl<C: LineCursor> Linizer<'_, C> {
    /// True when the nearest comment marker above the bottom line opens a C comment.
    ///
    /// Works on raw lines rather than the linizer: only lines mentioning a marker get
    /// cleaned, which keeps the long scan cheap.
    pub(crate) fn bottom_line_starts_in_c_comment(&self) -> bool {
        let mut cursor = self.bottom.clone();
        for _ in 0..BIG_ROOF {
            if cursor.at_begin() {
                return false;
            }
            cursor.step_back();
            let Some(raw) = cursor.line() else {
                return false;
            };
            if raw.contains("/*") || raw.contains("*/") {
                let cleaned = clean_line(raw, self.config.indent_size);
                if cleaned.contains("/*") {
                    return true;
                }
                if cleaned.contains("*/") {
                    return false;
                }
            }
        }
        false
    }

    /// True when the current line does not end a statement, so the line below continues it.
    pub(crate) fn is_unfinished_line(&mut self) -> bool {
        let Some(last) = self.line().chars().next_back() else {
            return false;
        };
        let saved = self.snapshot();

        let unfinished = if !matches!(last, '{' | '}' | ';') && !self.line().ends_with("...") {
            // Neither `Q_OBJECT` nor `if (x)`: the statement goes on.
            !self.line().contains("Q_OBJECT") && !self.match_braceless_control_statement()
        } else if last == ';' {
            // `for (int i = 1; i < 10;` and
            // `for (int i = 1;
            //       i < 10;`
            last_paren(self.line()) == Some('(')
                || (self.read_line()
                    && self.line().ends_with(';')
                    && last_paren(self.line()) == Some('('))
        } else {
            false
        };

        self.restore(saved);
        unfinished
    }

    /// True when the line above the current one is unfinished.
    pub(crate) fn is_continuation_line(&mut self) -> bool {
        let saved = self.snapshot();
        let continued = self.read_line() && self.is_unfinished_line();
        self.restore(saved);
        continued
    }

    /// Matches `if (x)`, `while (x)`, `for (...)`, `catch (...)`, `foreach (...)` without a
    /// brace (possibly with the condition spread over several lines), or a line ending in
    /// `else`.
    ///
    /// Leaves the linizer on the line holding the keyword; callers snapshot beforehand.
    pub(crate) fn match_braceless_control_statement(&mut self) -> bool {
        if self.line().ends_with("else") {
            return true;
        }
        if !self.line().ends_with(')') {
            return false;
        }

        let mut delim_depth = 0isize;
        for _ in 0..SMALL_ROOF {
            for ch in self.line().chars().rev() {
                match ch {
                    ')' => delim_depth += 1,
                    '(' => {
                        delim_depth -= 1;
                        if delim_depth == 0 && patterns().contains_if_like_keyword(self.line()) {
                            // `if (x)` rather than `foo(x)`
                            return true;
                        }
                        if delim_depth == -1 {
                            // `foo(bar(1 +
                            //         2)`
                            return false;
                        }
                    }
                    // A statement separator where none belongs: a weird continuation line.
                    // `;` is fine inside the parentheses of a `for`.
                    '{' | '}' => return false,
                    ';' if delim_depth == 0 => return false,
                    _ => {}
                }
            }
            if !self.read_line() {
                break;
            }
        }
        false
    }
}

fn last_paren(line: &str) -> Option<char> {
    line.chars().rev().find(|ch| matches!(ch, '(' | ')'))
}
