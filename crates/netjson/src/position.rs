use core::fmt;

/// A line/column pair locating a codepoint in the source text.
///
/// Lines are 1-based. A fresh cursor sits at column 0; consuming the N-th
/// codepoint of a line moves the cursor to column N, so the first codepoint
/// after a newline has column 1. Positions are compared structurally and are
/// used purely for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextPosition {
    /// 1-based line number.
    pub line: usize,
    /// Column of the most recently consumed codepoint on that line.
    pub column: usize,
}

impl TextPosition {
    /// Position of a cursor that has not consumed anything yet.
    #[must_use]
    pub const fn start() -> Self {
        Self { line: 1, column: 0 }
    }

    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for TextPosition {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
