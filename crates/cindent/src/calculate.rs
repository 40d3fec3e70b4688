//! The three column strategies. Results may be negative; the façade clamps them.

use crate::SMALL_ROOF;
use crate::column::column_for_index;
use crate::cursor::LineCursor;
use crate::linizer::Linizer;

/// Extra columns between `/*` and the text of a comment that has none on its first line.
const COMMENT_OFFSET: isize = 2;

/// Characters that turn a following `=` into a comparison.
const COMPARISON_PREFIXES: &[char] = &['!', '=', '<', '>'];

impl<C: LineCursor> Linizer<'_, C> {
    /// Column for a blank bottom line inside a C comment, from the nearest line above it.
    pub(crate) fn indent_when_bottom_line_starts_in_c_comment(&self) -> isize {
        let tab_size = self.config.tab_size;
        let line = self.line();
        let Some(k) = line.rfind("/*") else {
            // A plain text line of the comment: align with its text.
            return self.indent_of_current();
        };

        // The comment opens on this line: align with its text if any, else a bit past `/*`.
        let past_marker = column_for_index(line, k, tab_size) as isize + COMMENT_OFFSET;
        column_of_text_from(line, k + 2, tab_size).unwrap_or(past_marker)
    }

    /// Column for a line that continues the statement of the line above it.
    ///
    /// Looks right-to-left for a hook: an unclosed `(`/`[`, an unclosed `{` followed by
    /// more text (initializers), or an assignment `=`. The line aligns with the token after
    /// the hook. Without a hook it falls back on the indentation of the statement's lines.
    pub(crate) fn indent_for_continuation_line(&mut self) -> isize {
        let tab_size = self.config.tab_size;
        let left_brace_followed = self.state.left_brace_follows;
        let mut brace_depth = 0isize;
        let mut delim_depth = 0isize;

        for _ in 0..SMALL_ROOF {
            let line = self.line();
            for (j, ch) in line.char_indices().rev() {
                let hook = match ch {
                    ')' | ']' => {
                        delim_depth += 1;
                        false
                    }
                    '}' => {
                        brace_depth += 1;
                        false
                    }
                    '(' | '[' => {
                        delim_depth -= 1;
                        delim_depth == -1
                    }
                    '{' => {
                        brace_depth -= 1;
                        if brace_depth == -1 && j + 1 == line.len() {
                            // An unclosed block opener, not an initializer.
                            return 0;
                        }
                        brace_depth == -1
                    }
                    '=' => {
                        delim_depth == 0
                            && brace_depth == 0
                            && is_assignment(line, j)
                            && !line.ends_with(',')
                            && count(line, '(') == count(line, ')')
                    }
                    _ => false,
                };
                if hook {
                    return column_of_text_from(line, j + 1, tab_size).unwrap_or_else(|| {
                        self.indent_of_current() + self.continuation_indent_size()
                    });
                }
            }

            if brace_depth != 0 {
                break;
            }

            if delim_depth == 0 {
                if left_brace_followed {
                    // `int main()` / `Bar::Bar() : Foo(x)` above a `{`: the brace goes flush.
                    if !self.is_continuation_line() {
                        return self.indent_of_current();
                    }
                } else if self.is_continuation_line() || self.line().ends_with(',') {
                    // `x = a +` / `    b +` / `    c;` and rows of an initializer list.
                    return self.indent_of_current();
                } else {
                    // `stream << 1 +` gets a plain continuation indent; operator precedence
                    // is not analysed.
                    return self.indent_of_current() + self.continuation_indent_size();
                }
            }

            if !self.read_line() {
                break;
            }
        }
        0
    }

    /// Column for a line that starts a new statement.
    pub(crate) fn indent_for_standalone_line(&mut self) -> isize {
        for _ in 0..SMALL_ROOF {
            if !self.state.left_brace_follows {
                let saved = self.snapshot();
                if self.match_braceless_control_statement() {
                    // We are the single statement under `if (x)` (the linizer now sits on
                    // the line with the keyword, even for a multi-line condition).
                    return self.indent_of_current() + self.indent_size();
                }
                self.restore(saved);
            }

            if self.line().ends_with(';') || self.line().contains('{') {
                // The line above ends a statement or opens a block. Walk to the line that
                // statement hangs from: past nested blocks, continuation lines, and any
                // braceless `if`/`while`/`else` it is the body of.
                if self.state.brace_depth > 0 {
                    while self.read_line() && self.state.brace_depth > 0 {}
                }

                while self.is_continuation_line() {
                    self.read_line();
                }
                let mut hook = self.snapshot();

                self.read_line();
                if self.state.brace_depth <= 0 {
                    loop {
                        if !self.match_braceless_control_statement() {
                            break;
                        }
                        hook = self.snapshot();
                        if !self.read_line() {
                            break;
                        }
                    }
                }

                self.restore(hook);
                while self.is_continuation_line() {
                    self.read_line();
                }

                // A line holding just `{` or `}` says nothing about its block's indentation.
                if self.line().trim().chars().count() > 1 {
                    return self.indent_of_current() - self.state.brace_depth * self.indent_size();
                }
            }

            if !self.read_line() {
                return -self.state.brace_depth * self.indent_size();
            }
        }
        0
    }
}

/// Column of the first non-whitespace character at or after byte `from`, if any.
fn column_of_text_from(line: &str, from: usize, tab_size: usize) -> Option<isize> {
    line[from..]
        .char_indices()
        .find(|(_, ch)| !ch.is_whitespace())
        .map(|(offset, _)| from + offset)
        .map(|index| column_for_index(line, index, tab_size) as isize)
}

/// `x = y`, not `x == y`, `x <= y` or `x != y`.
fn is_assignment(line: &str, at: usize) -> bool {
    let before = line[..at].chars().next_back();
    let after = line[at + 1..].chars().next();
    !before.is_some_and(|ch| COMPARISON_PREFIXES.contains(&ch)) && after != Some('=')
}

fn count(line: &str, needle: char) -> usize {
    line.matches(needle).count()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::SMALL_ROOF;
    use crate::config::IndentConfig;
    use crate::cursor::{LineCursor, SliceCursor};
    use crate::linizer::Linizer;

    fn run(
        lines: &[&str],
        f: impl FnOnce(&mut Linizer<'_, SliceCursor<'_, &str>>) -> isize,
    ) -> isize {
        let config = IndentConfig::default();
        let mut linizer = Linizer::start(SliceCursor::at_last_line(lines), &config);
        f(&mut linizer)
    }

    fn continuation(lines: &[&str]) -> isize {
        run(lines, |linizer| linizer.indent_for_continuation_line())
    }

    fn standalone(lines: &[&str]) -> isize {
        run(lines, |linizer| linizer.indent_for_standalone_line())
    }

    fn comment(lines: &[&str]) -> isize {
        run(lines, |linizer| {
            linizer.indent_when_bottom_line_starts_in_c_comment()
        })
    }

    /// Remembers the lowest line index any of its clones stepped back to.
    #[derive(Clone)]
    struct Watched<'a> {
        inner: SliceCursor<'a, String>,
        lowest: Rc<Cell<usize>>,
    }

    impl LineCursor for Watched<'_> {
        fn line(&self) -> Option<&str> {
            self.inner.line()
        }

        fn at_begin(&self) -> bool {
            self.inner.at_begin()
        }

        fn step_back(&mut self) {
            self.inner.step_back();
            self.lowest.set(self.lowest.get().min(self.inner.index()));
        }
    }

    /// Runs `f` from the last line; returns its result and how far above the bottom it read.
    fn watch(
        lines: &[String],
        f: impl FnOnce(&mut Linizer<'_, Watched<'_>>) -> isize,
    ) -> (isize, usize) {
        let config = IndentConfig::default();
        let bottom = lines.len() - 1;
        let lowest = Rc::new(Cell::new(bottom));
        let cursor = Watched {
            inner: SliceCursor::new(lines, bottom),
            lowest: Rc::clone(&lowest),
        };
        let mut linizer = Linizer::start(cursor, &config);
        let indent = f(&mut linizer);
        (indent, bottom - lowest.get())
    }

    /// `head`, `rows` copies of `body`, `tail`, then the empty bottom line.
    fn tall(head: &str, body: &str, tail: &str, rows: usize) -> Vec<String> {
        let mut lines = vec![head.to_owned()];
        lines.extend(std::iter::repeat_n(body.to_owned(), rows));
        lines.extend([tail.to_owned(), String::new()]);
        lines
    }

    #[test]
    fn aligns_after_open_parenthesis() {
        assert_eq!(continuation(&["foo(a,", ""]), 4);
        assert_eq!(continuation(&["void foo(int x = 1,", ""]), 9);
        assert_eq!(continuation(&["for (int i = 0;", ""]), 5);
    }

    #[test]
    fn open_parenthesis_at_line_end_gets_continuation_indent() {
        assert_eq!(continuation(&["    call(", ""]), 12);
    }

    #[test]
    fn aligns_after_assignment() {
        assert_eq!(continuation(&["int x = 1 +", ""]), 8);
        assert_eq!(continuation(&["x = a +", "    b +", ""]), 4);
    }

    #[test]
    fn comparisons_are_not_hooks() {
        assert_eq!(continuation(&["ok = a == b &&", ""]), 5);
        assert_eq!(continuation(&["a <= b &&", ""]), 8);
    }

    #[test]
    fn initializer_brace_is_a_hook() {
        assert_eq!(continuation(&["int a[] = { 1, 2,", ""]), 12);
    }

    #[test]
    fn trailing_brace_inside_open_call_is_not_a_hook() {
        assert_eq!(continuation(&["call(a, (b, {", "    c) +", ""]), 0);
    }

    #[test]
    fn function_header_above_brace_goes_flush() {
        assert_eq!(continuation(&["int main()", "{"]), 0);
        assert_eq!(continuation(&["    Foo::Foo()", "{"]), 4);
    }

    #[test]
    fn standalone_after_block_opener() {
        assert_eq!(standalone(&["if (x) {", ""]), 4);
        assert_eq!(standalone(&["int main()", "{", ""]), 4);
    }

    #[test]
    fn standalone_after_braceless_body() {
        assert_eq!(standalone(&["if (x)", "    y;", ""]), 0);
        assert_eq!(standalone(&["if (a)", "    if (b)", "        x;", ""]), 0);
    }

    #[test]
    fn standalone_under_braceless_header() {
        assert_eq!(standalone(&["if (a &&", "    b)", ""]), 4);
        assert_eq!(standalone(&["if (a) {", "    x;", "} else", ""]), 4);
    }

    #[test]
    fn standalone_after_closed_block() {
        assert_eq!(
            standalone(&["if (a) {", "    x;", "} else {", "    y;", "}", ""]),
            0
        );
    }

    #[test]
    fn long_blocks_and_statements_stay_within_the_small_roof() {
        let block = tall("void f() {", "    a;", "}", 1000);
        let (indent, reach) = watch(&block, |linizer| linizer.indent_for_standalone_line());
        assert_eq!(indent, -4);
        assert!(reach <= SMALL_ROOF, "read {reach} lines above the bottom");

        let statement = tall("x = a +", "    b +", "    c;", 1000);
        let (indent, reach) = watch(&statement, |linizer| linizer.indent_for_standalone_line());
        assert_eq!(indent, 4);
        assert!(reach <= SMALL_ROOF, "read {reach} lines above the bottom");

        let (_, reach) = watch(&statement, |linizer| linizer.indent_for_continuation_line());
        assert!(reach <= SMALL_ROOF, "read {reach} lines above the bottom");
    }

    #[test]
    fn standalone_at_program_start() {
        assert_eq!(standalone(&[""]), 0);
    }

    #[test]
    fn comment_opening_alignment() {
        assert_eq!(comment(&["/*", ""]), 2);
        assert_eq!(comment(&["/* foo", ""]), 3);
        assert_eq!(comment(&["int x; /* start", ""]), 10);
    }
}
