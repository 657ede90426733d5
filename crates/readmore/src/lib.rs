//! Decides, one line at a time, whether an interactive read loop has a
//! complete unit of source text or needs more lines.
//!
//! The decision is purely lexical: bracket nesting, rune, string and raw
//! string literals, line and block comments, `#!` shebang lines, and trailing
//! operators or keywords that leave a statement open. No tokens or syntax
//! trees are produced; an episode yields the raw text and the offset where
//! real (non-comment) content starts.
//!
//! ```rust
//! use readmore::{ReadOptions, read_multiline};
//!
//! let mut input = "x := a +\n    b\nprint(x)\n".as_bytes();
//! let chunk = read_multiline(&mut input, ReadOptions::empty(), &mut std::io::sink(), "").unwrap();
//! assert_eq!(chunk.text, "x := a +\n    b\n");
//! assert_eq!(chunk.first_token, Some(0));
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod error;
pub mod keyword;
pub mod observer;
mod options;
pub mod scanner;

#[cfg(feature = "std")]
pub mod prompt;
#[cfg(feature = "std")]
mod reader;
#[cfg(feature = "std")]
pub mod source;

#[cfg(all(test, feature = "std"))]
mod tests;

pub use error::{InvalidLiteral, LiteralKind};
#[cfg(feature = "std")]
pub use error::{ReadError, ReadErrorKind, SourceError};
pub use keyword::{GoKeywords, KeywordClass, KeywordTable, MacroKeywords, NoKeywords};
pub use observer::{Quiet, ScanObserver, TracingObserver};
pub use options::ReadOptions;
#[cfg(feature = "std")]
pub use reader::{Chunk, MultilineReader, normalize_line, read_multiline};
pub use scanner::{LexMode, ScanState, Verdict};
#[cfg(feature = "std")]
pub use source::{Source, read_bytes, read_string};
