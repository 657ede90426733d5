use core::{ascii::EscapeDefault, fmt};

use thiserror::Error;

#[cfg(feature = "std")]
use crate::reader::Chunk;

/// The kind of quoted literal an invalid byte was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LiteralKind {
    /// A `'...'` literal.
    Rune,
    /// A `"..."` literal.
    String,
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralKind::Rune => f.write_str("rune"),
            LiteralKind::String => f.write_str("string"),
        }
    }
}

fn shown(byte: &u8) -> EscapeDefault {
    byte.escape_ascii()
}

/// An unescaped control byte inside a rune or string literal.
///
/// Literals cannot span lines, so this is usually a newline before the
/// closing quote.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unexpected character '{}' inside {literal} literal", shown(.byte))]
pub struct InvalidLiteral {
    /// The offending byte.
    pub byte: u8,
    /// The literal the byte appeared in.
    pub literal: LiteralKind,
    /// Offset of the byte in the accumulated buffer.
    pub offset: usize,
}

impl InvalidLiteral {
    pub(crate) const fn new(byte: u8, literal: LiteralKind) -> Self {
        Self {
            byte,
            literal,
            offset: 0,
        }
    }

    pub(crate) const fn at(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

/// Why an episode ended without a complete unit.
#[cfg(feature = "std")]
#[derive(Error, Debug)]
pub enum ReadErrorKind {
    /// A control byte appeared inside a rune or string literal.
    #[error(transparent)]
    InvalidLiteral(#[from] InvalidLiteral),
    /// The input ended while brackets were still open. The source is the
    /// underlying [`UnexpectedEof`](std::io::ErrorKind::UnexpectedEof)
    /// condition.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput(#[source] std::io::Error),
    /// The input ended with no bracket left open.
    #[error("end of input")]
    EndOfInput,
    /// The underlying reader or prompt writer failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// An episode failure, together with everything read before it.
#[cfg(feature = "std")]
#[derive(Error, Debug)]
#[error("{source}")]
pub struct ReadError {
    /// What went wrong.
    pub source: ReadErrorKind,
    /// The text accumulated up to the failure. For an invalid literal this
    /// includes the offending byte.
    pub partial: Chunk,
}

#[cfg(feature = "std")]
impl ReadError {
    /// Whether the input ran out cleanly, with no bracket left open. Any
    /// text in [`partial`](Self::partial) is a last line without a newline
    /// or a unit still waiting for continuation.
    #[must_use]
    pub fn is_end_of_input(&self) -> bool {
        matches!(self.source, ReadErrorKind::EndOfInput)
    }
}

/// Failure to normalize a [`Source`](crate::source::Source).
#[cfg(feature = "std")]
#[derive(Error, Debug)]
pub enum SourceError {
    /// The source holds no value to read from.
    #[error("unsupported source, cannot read from: {0}")]
    UnsupportedSourceType(&'static str),
    /// Draining a reader failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
