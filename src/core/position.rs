//! Corpus-relative source positions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::corpus::{rel_to, Corpus};
use crate::resolver::{SourcePos, Span};

/// Marker for a missing end line/column.
pub const NO_POS: i32 = -1;

/// A located span, or a point when the end is absent.
///
/// The file is relative to the owning package's corpus. A point has
/// `end_line == end_col == NO_POS`; its JSON form omits the end keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(rename = "filename")]
    pub file: String,
    pub start_line: i32,
    pub start_col: i32,
    #[serde(default = "no_pos", skip_serializing_if = "is_no_pos")]
    pub end_line: i32,
    #[serde(default = "no_pos", skip_serializing_if = "is_no_pos")]
    pub end_col: i32,
}

fn no_pos() -> i32 {
    NO_POS
}

fn is_no_pos(v: &i32) -> bool {
    *v < 0
}

impl Position {
    /// A point position.
    pub fn point(file: impl Into<String>, line: i32, col: i32) -> Self {
        Position {
            file: file.into(),
            start_line: line,
            start_col: col,
            end_line: NO_POS,
            end_col: NO_POS,
        }
    }

    /// A span between two locations of the same file.
    pub fn span(file: impl Into<String>, start: (i32, i32), end: (i32, i32)) -> Self {
        Position {
            file: file.into(),
            start_line: start.0,
            start_col: start.1,
            end_line: end.0,
            end_col: end.1,
        }
    }

    /// Point position of a resolver location, relative to `corpus`.
    pub fn at(corpus: Option<&Corpus>, pos: &SourcePos) -> Self {
        Position::point(rel_to(corpus, &pos.file), pos.line, pos.col)
    }

    /// Position of a resolver span, relative to `corpus`.
    ///
    /// # Panics
    ///
    /// Panics if the start and end of the span are in different files.
    /// That is a broken resolver, not a recoverable input.
    pub fn from_span(corpus: Option<&Corpus>, span: &Span) -> Self {
        let Some(end) = &span.end else {
            return Position::at(corpus, &span.start);
        };
        assert!(
            span.start.file == end.file,
            "invalid position pair: start in {} but end in {}",
            span.start.file.display(),
            end.file.display()
        );
        Position::span(
            rel_to(corpus, &span.start.file),
            (span.start.line, span.start.col),
            (end.line, end.col),
        )
    }

    pub fn is_point(&self) -> bool {
        self.end_line < 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Position::default() {
            return write!(f, "-");
        }
        if self.is_point() {
            write!(f, "{}:{}:{}", self.file, self.start_line, self.start_col)
        } else {
            write!(
                f,
                "{}:{}:{}-{}:{}",
                self.file, self.start_line, self.start_col, self.end_line, self.end_col
            )
        }
    }
}
