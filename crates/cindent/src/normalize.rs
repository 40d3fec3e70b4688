//! Line cleaning: hides everything that could confuse brace and semicolon counting.
//!
//! Every replacement is character-for-character and tabs are left in place, so columns
//! computed on a cleaned line equal those of the raw line. Only the `//` tail shortens it.

use std::ops::Range;

use regex::Regex;

use crate::patterns::patterns;

const LITERAL_PLACEHOLDER: char = 'X';

/// Cleans one raw line:
///
/// 1. string and char literals become `XXX…`,
/// 2. `/* … */` comments wholly inside the line become blanks,
/// 3. goto/case/access labels are blanked up to `indent_size` characters and the rest of the
///    label turns into `;`, so `foo1: bar1;` still reads as a finished statement,
/// 4. the line is cut at the first `//`.
pub fn clean_line(raw: &str, indent_size: usize) -> String {
    let patterns = patterns();
    let mut line = raw.to_owned();

    mask_matches(&mut line, &patterns.literal, LITERAL_PLACEHOLDER);
    mask_matches(&mut line, &patterns.inline_comment, ' ');

    // Each pass consumes the label's colon, so this terminates.
    while line.contains(':') {
        let Some(label) = patterns.find_label(&line) else {
            break;
        };
        let neutralized: String = line[label.clone()]
            .chars()
            .enumerate()
            .map(|(i, _)| if i < indent_size { ' ' } else { ';' })
            .collect();
        line.replace_range(label, &neutralized);
    }

    if let Some(k) = line.find("//") {
        line.truncate(k);
    }
    line
}

/// Overwrites every non-tab character in `range` with `fill`; returns the end of the
/// rewritten range.
pub(crate) fn fill_range(line: &mut String, range: Range<usize>, fill: char) -> usize {
    let masked: String = line[range.clone()]
        .chars()
        .map(|ch| if ch == '\t' { ch } else { fill })
        .collect();
    let end = range.start + masked.len();
    line.replace_range(range, &masked);
    end
}

fn mask_matches(line: &mut String, pattern: &Regex, fill: char) {
    let mut from = 0;
    while let Some(found) = pattern.find_at(line, from) {
        let range = found.range();
        if range.is_empty() {
            break;
        }
        from = fill_range(line, range, fill);
    }
}
