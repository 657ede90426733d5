//! Lexical modes and the per-byte transition table.
//!
//! Every mode is a plain tag. All behavior lives in [`transition`], which maps
//! `(mode, byte, paren_depth)` to a [`Transition`] describing what the byte
//! does to the scan: the next mode, the change in bracket nesting, the effect
//! on the "suppress completion" flag, and which offsets hold tokens.
//!
//! The table works on bytes, not chars. Every byte of a multi-byte UTF-8
//! sequence is above `b' '` and is therefore treated as ordinary token content.

use core::fmt;

use crate::error::{InvalidLiteral, LiteralKind};

/// The lexical context the scanner is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LexMode {
    /// Ordinary code.
    #[default]
    Normal,
    /// After a `+`; a second `+` makes it `++`, which does not continue.
    PlusRun,
    /// After a `-`; a second `-` makes it `--`, which does not continue.
    MinusRun,
    /// Inside a `'...'` literal.
    Rune,
    /// Inside a `"..."` literal.
    String,
    /// After a backslash inside a rune literal.
    RuneEscape,
    /// After a backslash inside a string literal.
    StringEscape,
    /// Inside a backtick literal. No escapes, control bytes allowed.
    RawString,
    /// After a `/`: division, `//` or `/*` is not decided yet.
    Slash,
    /// After a `#`: a `#!` shebang or an ordinary `#`.
    Hash,
    /// Inside a `//` comment, up to the end of the line.
    LineComment,
    /// Inside a `/* ... */` comment.
    Comment,
    /// Inside a block comment, right after a `*`. Only an immediate `/`
    /// closes the comment; a second `*` goes back to [`LexMode::Comment`].
    CommentStar,
    /// After a `~`; the next byte belongs to the tilde operator.
    Tilde,
}

impl LexMode {
    /// Short label used in trace output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            LexMode::Normal => "norm",
            LexMode::PlusRun => "plus",
            LexMode::MinusRun => "minus",
            LexMode::Rune => "rune",
            LexMode::String => "string",
            LexMode::RuneEscape => "runesc",
            LexMode::StringEscape => "stresc",
            LexMode::RawString => "strraw",
            LexMode::Slash => "slash",
            LexMode::Hash => "hash",
            LexMode::LineComment => "lcomm",
            LexMode::Comment => "comment",
            LexMode::CommentStar => "comm*",
            LexMode::Tilde => "tilde",
        }
    }

    /// Modes in which a pending "suppress completion" flag survives.
    ///
    /// Comments and the deferred `/` and `#` decisions leave the flag alone,
    /// so `a + // note` still continues. Literal and operator-run modes drive
    /// continuation on their own and clear it.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(
            self,
            LexMode::Normal
                | LexMode::Slash
                | LexMode::Hash
                | LexMode::LineComment
                | LexMode::Comment
                | LexMode::CommentStar
        )
    }

    /// Whether the mode is inside a comment.
    #[must_use]
    pub const fn is_comment(self) -> bool {
        matches!(
            self,
            LexMode::LineComment | LexMode::Comment | LexMode::CommentStar
        )
    }
}

impl fmt::Display for LexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a byte does to the "suppress completion" flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Suppress {
    /// Leave the flag as it is.
    #[default]
    Keep,
    /// More input is expected after this byte.
    Set,
    /// A real token ended any pending continuation.
    Clear,
}

/// The outcome of feeding one byte to [`transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Mode after this byte.
    pub mode: LexMode,
    /// Change in bracket nesting: `+1`, `-1` or `0`.
    pub paren_delta: i8,
    /// Effect on the suppress flag, applied before the reset rule.
    pub suppress: Suppress,
    /// The byte itself is token content.
    pub token: bool,
    /// The deferred `/` or `#` right before this byte turned out to be a
    /// token.
    pub pending_token: bool,
    /// The deferred `#` and this `!` form a shebang and must be rewritten to
    /// `//` in the buffer.
    pub shebang: bool,
}

impl Transition {
    const fn to(mode: LexMode) -> Self {
        Self {
            mode,
            paren_delta: 0,
            suppress: Suppress::Keep,
            token: false,
            pending_token: false,
            shebang: false,
        }
    }

    const fn with_token(mut self, byte: u8) -> Self {
        self.token = !is_space(byte);
        self
    }
}

/// Bytes up to and including the space are whitespace for the scanner.
#[inline]
#[must_use]
pub const fn is_space(byte: u8) -> bool {
    byte <= b' '
}

/// Feeds one byte to the state machine.
///
/// # Errors
///
/// Returns [`InvalidLiteral`] when a control byte (`< b' '`) appears inside a
/// rune or string literal, escaped or not. The offset in the error is left at
/// zero; the caller knows where the byte sits.
pub fn transition(mode: LexMode, byte: u8, paren_depth: usize) -> Result<Transition, InvalidLiteral> {
    let t = match mode {
        LexMode::Normal => normal(byte, paren_depth),
        LexMode::PlusRun | LexMode::MinusRun => operator_run(mode, byte, paren_depth),
        LexMode::Rune => quoted(byte, b'\'', LiteralKind::Rune, LexMode::Rune, LexMode::RuneEscape)?,
        LexMode::String => quoted(
            byte,
            b'"',
            LiteralKind::String,
            LexMode::String,
            LexMode::StringEscape,
        )?,
        LexMode::RuneEscape => escaped(byte, LiteralKind::Rune, LexMode::Rune)?,
        LexMode::StringEscape => escaped(byte, LiteralKind::String, LexMode::String)?,
        LexMode::RawString => match byte {
            b'`' => Transition::to(LexMode::Normal),
            _ => Transition::to(LexMode::RawString),
        }
        .with_token(byte),
        LexMode::Slash => match byte {
            b'/' => Transition::to(LexMode::LineComment),
            b'*' => Transition::to(LexMode::Comment),
            _ => {
                // The `/` was a division operator.
                let mut t = normal(byte, paren_depth);
                t.pending_token = true;
                if is_space(byte) {
                    t.suppress = Suppress::Set;
                }
                t
            }
        },
        LexMode::Hash => match byte {
            b'!' => Transition {
                shebang: true,
                ..Transition::to(LexMode::LineComment)
            },
            _ => {
                let mut t = normal(byte, paren_depth);
                t.pending_token = true;
                t
            }
        },
        LexMode::LineComment => Transition::to(LexMode::LineComment),
        LexMode::Comment => match byte {
            b'*' => Transition::to(LexMode::CommentStar),
            _ => Transition::to(LexMode::Comment),
        },
        LexMode::CommentStar => match byte {
            b'/' => Transition::to(LexMode::Normal),
            _ => Transition::to(LexMode::Comment),
        },
        // `~'x`, `~,x` and friends: the operand byte has no literal meaning.
        LexMode::Tilde => Transition::to(LexMode::Normal).with_token(byte),
    };
    Ok(t)
}

fn normal(byte: u8, paren_depth: usize) -> Transition {
    let base = Transition::to(LexMode::Normal).with_token(byte);
    match byte {
        b'(' | b'[' | b'{' => Transition {
            paren_delta: 1,
            ..base
        },
        b')' | b']' | b'}' => Transition {
            paren_delta: -1,
            ..base
        },
        b'\'' => Transition {
            mode: LexMode::Rune,
            ..base
        },
        b'"' => Transition {
            mode: LexMode::String,
            ..base
        },
        b'`' => Transition {
            mode: LexMode::RawString,
            ..base
        },
        b'/' => Transition::to(LexMode::Slash),
        b'#' => Transition::to(LexMode::Hash),
        b'~' => Transition {
            mode: LexMode::Tilde,
            ..base
        },
        b'!' | b'%' | b'&' | b'*' | b',' | b'.' | b'<' | b'=' | b'>' | b'^' | b'|' => Transition {
            suppress: if paren_depth == 0 {
                Suppress::Set
            } else {
                Suppress::Clear
            },
            ..base
        },
        b'+' | b'-' => Transition {
            mode: match (byte, paren_depth) {
                (b'+', 0) => LexMode::PlusRun,
                (b'-', 0) => LexMode::MinusRun,
                _ => LexMode::Normal,
            },
            suppress: Suppress::Clear,
            ..base
        },
        _ if is_space(byte) => base,
        _ => Transition {
            suppress: Suppress::Clear,
            ..base
        },
    }
}

fn operator_run(mode: LexMode, byte: u8, paren_depth: usize) -> Transition {
    let run = match (mode, byte) {
        (LexMode::PlusRun, b'+') | (LexMode::MinusRun, b'-') => Some(LexMode::Normal),
        (_, b'+') => Some(LexMode::PlusRun),
        (_, b'-') => Some(LexMode::MinusRun),
        _ => None,
    };
    if let Some(next) = run {
        return Transition::to(next).with_token(byte);
    }
    if is_space(byte) {
        // A single trailing `+` or `-` continues the statement.
        return Transition {
            suppress: Suppress::Set,
            ..Transition::to(LexMode::Normal)
        };
    }
    let mut t = normal(byte, paren_depth);
    if t.suppress == Suppress::Keep {
        t.suppress = Suppress::Set;
    }
    t
}

fn quoted(
    byte: u8,
    close: u8,
    literal: LiteralKind,
    inside: LexMode,
    escape: LexMode,
) -> Result<Transition, InvalidLiteral> {
    let next = match byte {
        b'\\' => escape,
        _ if byte == close => LexMode::Normal,
        _ if byte < b' ' => return Err(InvalidLiteral::new(byte, literal)),
        _ => inside,
    };
    Ok(Transition::to(next).with_token(byte))
}

fn escaped(byte: u8, literal: LiteralKind, inside: LexMode) -> Result<Transition, InvalidLiteral> {
    if byte < b' ' {
        return Err(InvalidLiteral::new(byte, literal));
    }
    Ok(Transition::to(inside).with_token(byte))
}
