//! Multiline reader: reads lines until the scanner reports a complete unit.
//!
//! One call to [`MultilineReader::read`] is one episode. It starts from a
//! fresh [`ScanState`], reads and scans physical lines, and ends with either a
//! [`Chunk`] or a [`ReadError`] that carries the partial chunk.

use std::{
    borrow::Cow,
    io::{self, BufRead, Write},
    vec::Vec,
};

use bstr::{BStr, BString, ByteSlice};

use crate::{
    error::{ReadError, ReadErrorKind},
    keyword::{GoKeywords, KeywordTable},
    observer::{Quiet, ScanObserver},
    options::ReadOptions,
    prompt,
    scanner::ScanState,
};

/// U+2029 PARAGRAPH SEPARATOR, as pasted from rich-text sources.
const PARAGRAPH_SEPARATOR: &[u8] = "\u{2029}".as_bytes();

/// The text of one episode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chunk {
    /// Every line read, exactly as received apart from paragraph separators
    /// and a shebang rewrite.
    pub text: BString,
    /// Where real content starts. `None` if the text holds only whitespace and
    /// comments.
    pub first_token: Option<usize>,
}

impl Chunk {
    fn from_state(state: ScanState) -> Self {
        let (text, first_token) = state.into_parts();
        Self { text, first_token }
    }

    /// Leading whitespace and comments.
    #[must_use]
    pub fn comments(&self) -> &BStr {
        let end = self.first_token.unwrap_or(self.text.len());
        self.text[..end].as_bstr()
    }

    /// Text from the first token on, if there is one.
    #[must_use]
    pub fn tokens(&self) -> Option<&BStr> {
        self.first_token.map(|first| self.text[first..].as_bstr())
    }
}

/// Replaces every paragraph separator with a newline.
#[must_use]
pub fn normalize_line(line: &[u8]) -> Cow<'_, [u8]> {
    if line.find(PARAGRAPH_SEPARATOR).is_some() {
        Cow::Owned(line.replace(PARAGRAPH_SEPARATOR, b"\n"))
    } else {
        Cow::Borrowed(line)
    }
}

/// Reads complete units from a line-oriented input.
///
/// # Examples
///
/// ```rust
/// use readmore::{MultilineReader, ReadOptions};
///
/// let mut input = "foo(1,\n  2)\nbar()\n".as_bytes();
/// let mut reader = MultilineReader::new(ReadOptions::empty());
///
/// let first = reader.read(&mut input, &mut std::io::sink(), "> ").unwrap();
/// assert_eq!(first.text, "foo(1,\n  2)\n");
///
/// let second = reader.read(&mut input, &mut std::io::sink(), "> ").unwrap();
/// assert_eq!(second.text, "bar()\n");
/// ```
#[derive(Debug, Clone)]
pub struct MultilineReader<K = GoKeywords, O = Quiet> {
    options: ReadOptions,
    keywords: K,
    observer: O,
}

impl MultilineReader {
    /// Creates a reader with the Go keyword table and no tracing.
    #[must_use]
    pub fn new(options: ReadOptions) -> Self {
        Self {
            options,
            keywords: GoKeywords,
            observer: Quiet,
        }
    }
}

impl Default for MultilineReader {
    fn default() -> Self {
        Self::new(ReadOptions::empty())
    }
}

impl<K, O> MultilineReader<K, O>
where
    K: KeywordTable,
    O: ScanObserver,
{
    /// Replaces the keyword table.
    #[must_use]
    pub fn with_keywords<K2: KeywordTable>(self, keywords: K2) -> MultilineReader<K2, O> {
        MultilineReader {
            options: self.options,
            keywords,
            observer: self.observer,
        }
    }

    /// Replaces the observer.
    #[must_use]
    pub fn with_observer<O2: ScanObserver>(self, observer: O2) -> MultilineReader<K, O2> {
        MultilineReader {
            options: self.options,
            keywords: self.keywords,
            observer,
        }
    }

    /// The options every episode runs with.
    #[must_use]
    pub fn options(&self) -> ReadOptions {
        self.options
    }

    /// The observer, e.g. to inspect what a recording observer collected.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Runs one episode.
    ///
    /// The prompt is written before the first line and continuation dots
    /// before each following line, only with [`ReadOptions::SHOW_PROMPT`].
    ///
    /// # Errors
    ///
    /// - [`ReadErrorKind::InvalidLiteral`]: a control byte inside a rune or
    ///   string literal. The partial text ends with that byte.
    /// - [`ReadErrorKind::UnexpectedEndOfInput`]: the input ended with open
    ///   brackets.
    /// - [`ReadErrorKind::EndOfInput`]: the input ended otherwise. The partial
    ///   text may still hold a last unit without a trailing newline.
    /// - [`ReadErrorKind::Io`]: reading `input` or writing to `out` failed.
    pub fn read<R, W>(&mut self, input: &mut R, out: &mut W, prompt: &str) -> Result<Chunk, ReadError>
    where
        R: BufRead + ?Sized,
        W: Write + ?Sized,
    {
        let show_prompt = self.options.shows_prompt();
        let mut state = ScanState::new();
        if show_prompt {
            if let Err(err) = out.write_all(prompt.as_bytes()).and_then(|()| out.flush()) {
                return Err(fail(err.into(), state));
            }
        }

        let mut line = Vec::new();
        loop {
            line.clear();
            let read = match input.read_until(b'\n', &mut line) {
                Ok(read) => read,
                Err(err) => return Err(fail(err.into(), state)),
            };
            let at_eof = read == 0 || line.last() != Some(&b'\n');

            if let Err(err) = state.scan_line(&normalize_line(&line), &mut self.observer) {
                return Err(fail(err.into(), state));
            }
            state.end_line();

            if at_eof {
                let kind = if state.paren_depth() > 0 {
                    ReadErrorKind::UnexpectedEndOfInput(io::ErrorKind::UnexpectedEof.into())
                } else {
                    ReadErrorKind::EndOfInput
                };
                return Err(fail(kind, state));
            }

            let verdict = state.verdict(self.options, &self.keywords);
            self.observer.line_finished(verdict, &state);
            if verdict.is_complete() {
                return Ok(Chunk::from_state(state));
            }

            state.start_next_line();
            if show_prompt {
                let width = prompt::continuation_width(state.paren_depth());
                if let Err(err) = prompt::write_dots(out, width).and_then(|()| out.flush()) {
                    return Err(fail(err.into(), state));
                }
            }
        }
    }
}

fn fail(source: ReadErrorKind, state: ScanState) -> ReadError {
    ReadError {
        source,
        partial: Chunk::from_state(state),
    }
}

/// Runs one episode with the Go keyword table and no tracing.
///
/// # Errors
///
/// See [`MultilineReader::read`].
pub fn read_multiline<R, W>(
    input: &mut R,
    options: ReadOptions,
    out: &mut W,
    prompt: &str,
) -> Result<Chunk, ReadError>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    MultilineReader::new(options).read(input, out, prompt)
}
