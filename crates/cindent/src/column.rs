//! Visual column arithmetic under a hardware tab width.
//!
//! Indices are byte offsets into the line; columns count characters, with a tab advancing
//! to the next multiple of `tab_size`.

/// Column at which the character starting at byte `index` is displayed.
///
/// `index` past the end of the line is clamped to the line's length.
pub fn column_for_index(line: &str, index: usize, tab_size: usize) -> usize {
    let tab_size = tab_size.max(1);
    let mut column = 0;
    for (at, ch) in line.char_indices() {
        if at >= index {
            break;
        }
        if ch == '\t' {
            column = (column / tab_size + 1) * tab_size;
        } else {
            column += 1;
        }
    }
    column
}

/// Column of the first non-whitespace character, or the column at the end of a blank line.
pub fn indent_of_line(line: &str, tab_size: usize) -> usize {
    let first = line
        .char_indices()
        .find(|(_, ch)| !ch.is_whitespace())
        .map_or(line.len(), |(at, _)| at);
    column_for_index(line, first, tab_size)
}

pub fn first_non_whitespace(line: &str) -> Option<char> {
    line.chars().find(|ch| !ch.is_whitespace())
}
