/// Read-only backward access to the program the bottom line belongs to.
///
/// The cursor starts on the bottom line. The indenter only ever moves it toward the start of
/// the program and clones it to take snapshots, so any editor document model can supply one.
pub trait LineCursor: Clone {
    /// Raw text of the line under the cursor. `None` only when the program has no lines.
    fn line(&self) -> Option<&str>;

    /// True when there is no line before the one under the cursor.
    fn at_begin(&self) -> bool;

    /// Moves to the previous line. Has no effect at the beginning.
    fn step_back(&mut self);
}

/// A cursor over a slice of lines.
///
/// Lines after `index` are never looked at.
pub struct SliceCursor<'a, S> {
    lines: &'a [S],
    index: usize,
}

impl<'a, S: AsRef<str>> SliceCursor<'a, S> {
    /// Parks the cursor on `lines[index]`; an out-of-range index is clamped to the last line.
    pub fn new(lines: &'a [S], index: usize) -> Self {
        Self {
            lines,
            index: index.min(lines.len().saturating_sub(1)),
        }
    }

    /// Parks the cursor on the last line.
    pub fn at_last_line(lines: &'a [S]) -> Self {
        Self::new(lines, usize::MAX)
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl<S> Clone for SliceCursor<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for SliceCursor<'_, S> {}

impl<S> std::fmt::Debug for SliceCursor<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SliceCursor")
            .field("len", &self.lines.len())
            .field("index", &self.index)
            .finish()
    }
}

impl<S: AsRef<str>> LineCursor for SliceCursor<'_, S> {
    fn line(&self) -> Option<&str> {
        self.lines.get(self.index).map(AsRef::as_ref)
    }

    fn at_begin(&self) -> bool {
        self.index == 0
    }

    fn step_back(&mut self) {
        self.index = self.index.saturating_sub(1);
    }
}
