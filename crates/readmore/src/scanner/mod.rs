//! Scanner: per-episode lexical state and the continuation rules.
//!
//! What it does
//! - Feeds bytes through the [`mode`] transition table and applies the
//!   resulting effects to an explicit [`ScanState`]: bracket depth, the
//!   "suppress completion" flag, token offsets and the accumulated buffer.
//! - After each line, [`ScanState::verdict`] decides whether the buffer holds
//!   one complete unit.
//!
//! Invariants
//! - `first_token`, once set, never changes.
//! - `first_token <= last_token < buffer.len()` whenever both are set.
//! - The buffer holds every scanned byte in order. The only rewrite is a
//!   shebang `#!` becoming `//`.
//! - Bracket depth never goes below zero: an unmatched closer is ignored for
//!   nesting purposes and left for the downstream parser to report.
//!
//! Example
//! ```rust
//! use readmore::{GoKeywords, Quiet, ReadOptions, ScanState, Verdict};
//!
//! let mut state = ScanState::new();
//! state.scan_line(b"foo(\n", &mut Quiet).unwrap();
//! state.end_line();
//! assert_eq!(state.verdict(ReadOptions::empty(), &GoKeywords), Verdict::Incomplete);
//!
//! state.start_next_line();
//! state.scan_line(b")\n", &mut Quiet).unwrap();
//! state.end_line();
//! assert_eq!(state.verdict(ReadOptions::empty(), &GoKeywords), Verdict::Complete);
//! ```

pub mod mode;

use bstr::{BStr, BString, ByteSlice};

pub use self::mode::{LexMode, Suppress, Transition, transition};
use crate::{
    error::InvalidLiteral,
    keyword::{self, KeywordTable},
    observer::ScanObserver,
    options::ReadOptions,
};

/// The decision taken after a full line has been scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    /// The buffer holds one complete unit.
    Complete,
    /// Brackets, literals, block comments or a trailing operator need more
    /// input.
    Incomplete,
    /// The line would be complete, but it ends in a keyword that expects a
    /// following clause.
    Keyword,
}

impl Verdict {
    /// Whether the episode is done.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(self, Verdict::Complete)
    }
}

/// Lexical state for one read episode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanState {
    mode: LexMode,
    paren_depth: usize,
    /// "Ignore the newline as a terminator."
    suppress_completion: bool,
    first_token: Option<usize>,
    last_token: Option<usize>,
    line_start: usize,
    buffer: BString,
}

impl ScanState {
    /// Creates the state for a fresh episode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lexical mode.
    #[must_use]
    pub fn mode(&self) -> LexMode {
        self.mode
    }

    /// Open brackets, never negative.
    #[must_use]
    pub fn paren_depth(&self) -> usize {
        self.paren_depth
    }

    /// Whether a trailing operator or keyword asked for more input.
    #[must_use]
    pub fn suppress_completion(&self) -> bool {
        self.suppress_completion
    }

    /// Offset of the first token in the buffer; everything before it is
    /// whitespace or comments.
    #[must_use]
    pub fn first_token(&self) -> Option<usize> {
        self.first_token
    }

    /// Offset of the most recent token byte.
    #[must_use]
    pub fn last_token(&self) -> Option<usize> {
        self.last_token
    }

    /// Everything scanned so far.
    #[must_use]
    pub fn buffer(&self) -> &BStr {
        self.buffer.as_bstr()
    }

    /// The line being scanned, or the last one scanned.
    #[must_use]
    pub fn current_line(&self) -> &BStr {
        self.buffer[self.line_start..].as_bstr()
    }

    /// Scans one byte: appends it to the buffer and applies its transition.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidLiteral`] for a control byte inside a rune or string
    /// literal. The byte is already in the buffer when the error is returned;
    /// token offsets are untouched.
    pub fn step(&mut self, byte: u8) -> Result<Transition, InvalidLiteral> {
        let offset = self.buffer.len();
        self.buffer.push(byte);
        let t = transition(self.mode, byte, self.paren_depth).map_err(|e| e.at(offset))?;

        if t.shebang {
            if let Some(hash) = offset.checked_sub(1) {
                self.buffer[hash..=offset].copy_from_slice(b"//");
            }
        }
        self.mode = t.mode;
        self.paren_depth = self.paren_depth.saturating_add_signed(t.paren_delta.into());
        match t.suppress {
            Suppress::Keep => {}
            Suppress::Set => self.suppress_completion = true,
            Suppress::Clear => self.suppress_completion = false,
        }
        self.settle();
        if t.pending_token {
            if let Some(pending) = offset.checked_sub(1) {
                self.found_token(pending);
            }
        }
        if t.token {
            self.found_token(offset);
        }
        Ok(t)
    }

    /// Scans a full physical line, normally ending in `\n`.
    ///
    /// # Errors
    ///
    /// Stops at the first [`InvalidLiteral`]; the bytes after it are not
    /// scanned or buffered.
    pub fn scan_line<O>(&mut self, line: &[u8], observer: &mut O) -> Result<(), InvalidLiteral>
    where
        O: ScanObserver + ?Sized,
    {
        self.line_start = self.buffer.len();
        for &byte in line {
            let before = self.mode;
            let offset = self.buffer.len();
            self.step(byte)?;
            observer.byte_scanned(offset, byte, before, self);
        }
        Ok(())
    }

    /// Closes the physical line: line comments end here.
    pub fn end_line(&mut self) {
        if self.mode == LexMode::LineComment {
            self.mode = LexMode::Normal;
        }
    }

    /// Decides whether the episode is done after the current line.
    ///
    /// Call after [`end_line`](Self::end_line). A [`Verdict::Keyword`] sets
    /// the suppress flag, so the next line has to bring real content before
    /// the episode can complete.
    pub fn verdict<K>(&mut self, options: ReadOptions, keywords: &K) -> Verdict
    where
        K: KeywordTable + ?Sized,
    {
        let resolved = self.paren_depth == 0
            && !self.suppress_completion
            && self.mode == LexMode::Normal
            && (self.first_token.is_some() || !options.collects_all_comments());
        if !resolved {
            return Verdict::Incomplete;
        }
        if self.first_token.is_some()
            && self
                .last_line_tokens()
                .is_some_and(|text| keyword::forces_continuation(text, keywords))
        {
            self.suppress_completion = true;
            return Verdict::Keyword;
        }
        Verdict::Complete
    }

    /// Prepares for another line: a pending `+` or `-` run is line-local.
    pub fn start_next_line(&mut self) {
        if matches!(self.mode, LexMode::PlusRun | LexMode::MinusRun) {
            self.mode = LexMode::Normal;
        }
    }

    /// Consumes the state, returning the buffer and the first token offset.
    #[must_use]
    pub fn into_parts(self) -> (BString, Option<usize>) {
        (self.buffer, self.first_token)
    }

    /// Brackets and literals decide continuation on their own, so a pending
    /// suppress flag is dropped there. Comments and deferred `/` or `#` keep
    /// it.
    fn settle(&mut self) {
        if self.paren_depth > 0 || !self.mode.is_settled() {
            self.suppress_completion = false;
        }
    }

    fn found_token(&mut self, offset: usize) {
        self.last_token = Some(offset);
        if self.first_token.is_none() {
            self.first_token = Some(offset);
        }
    }

    /// Token bytes of the current line, from its first token through the last.
    fn last_line_tokens(&self) -> Option<&[u8]> {
        let last = self.last_token?;
        if last < self.line_start {
            return None;
        }
        let start = self
            .first_token
            .map_or(self.line_start, |first| first.max(self.line_start));
        self.buffer.get(start..=last)
    }

    /// Panics if an internal invariant is broken.
    #[cfg(any(test, feature = "fuzzing"))]
    pub fn assert_invariants(&self) {
        let len = self.buffer.len();
        assert!(self.line_start <= len, "line start {} past buffer end {len}", self.line_start);
        match (self.first_token, self.last_token) {
            (Some(first), Some(last)) => {
                assert!(first <= last, "first token {first} after last token {last}");
                assert!(last < len, "last token {last} past buffer end {len}");
            }
            (None, None) => {}
            other => panic!("token offsets out of sync: {other:?}"),
        }
    }
}
