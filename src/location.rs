//! Byte offset to line:column conversion for report positions

use serde::Serialize;

/// 1-based position in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Precomputed line starts for one source text.
///
/// Borrows the source for the duration of an analysis pass; reports keep
/// resolved [`SourceLocation`] values, not offsets.
pub struct LineIndex<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(source: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                source
                    .char_indices()
                    .filter(|(_, ch)| *ch == '\n')
                    .map(|(i, _)| i + 1),
            )
            .collect();

        Self {
            source,
            line_starts,
        }
    }

    /// Resolve a byte offset to its 1-based line and column.
    pub fn location(&self, offset: usize) -> SourceLocation {
        let line = self
            .line_starts
            .partition_point(|start| *start <= offset)
            .saturating_sub(1);
        let column = self.source[self.line_starts[line]..offset].chars().count();

        SourceLocation {
            line: line + 1,
            column: column + 1,
        }
    }
}
