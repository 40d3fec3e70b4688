//! Fuzz target: indenter.
//!
//! Invariants checked:
//! - `indent_for_line` must NEVER panic, whatever the buffer and typed character.
//! - `reindent` is idempotent.

use cindent::Indenter;

const TYPED: [Option<char>; 6] = [None, Some('{'), Some('}'), Some('#'), Some(':'), Some(';')];

#[test]
fn indenter() {
    bolero::check!().for_each(|data: &[u8]| {
        // Long buffers only repeat what the scan caps already bound.
        if data.len() > 16 * 1024 {
            return;
        }
        let src = String::from_utf8_lossy(data);
        let lines: Vec<&str> = src.lines().collect();
        let indenter = Indenter::default();

        for index in 0..lines.len() {
            for typed in TYPED {
                let _ = indenter.indent_for_line(&lines, index, typed);
            }
        }

        let once = indenter.reindent(&lines);
        let twice = indenter.reindent(&once);
        assert_eq!(once, twice, "reindent is not idempotent on this input");
    });
}
