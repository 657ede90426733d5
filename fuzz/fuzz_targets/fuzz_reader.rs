#![no_main]
use std::io;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use readmore::{GoKeywords, MultilineReader, Quiet, ReadErrorKind, ReadOptions, ScanState};

/// Source text built from pieces that steer the scanner into every mode far
/// more often than raw bytes would.
#[derive(Debug, Arbitrary)]
struct Session {
    collect_all_comments: bool,
    pieces: Vec<Piece>,
}

#[derive(Debug, Arbitrary)]
enum Piece {
    Raw(Vec<u8>),
    Word(u8),
    Open(u8),
    Close(u8),
    Quote(u8),
    Operator(u8),
    Comment(bool),
    Shebang,
    Newline,
}

const WORDS: &[&str] = &["x", "if", "else", "return", "func", "go", "i", "foo"];
const OPERATORS: &[&str] = &["+", "-", "++", "--", "=", ":=", ",", ".", "&&", "/", "~", "#"];

impl Session {
    fn text(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for piece in &self.pieces {
            match piece {
                Piece::Raw(bytes) => out.extend_from_slice(bytes),
                Piece::Word(i) => out.extend_from_slice(WORDS[usize::from(*i) % WORDS.len()].as_bytes()),
                Piece::Open(i) => out.push(b"([{"[usize::from(*i) % 3]),
                Piece::Close(i) => out.push(b")]}"[usize::from(*i) % 3]),
                Piece::Quote(i) => out.push(b"'\"`\\"[usize::from(*i) % 4]),
                Piece::Operator(i) => {
                    out.extend_from_slice(OPERATORS[usize::from(*i) % OPERATORS.len()].as_bytes());
                }
                Piece::Comment(true) => out.extend_from_slice(b"/* c */"),
                Piece::Comment(false) => out.extend_from_slice(b"// c"),
                Piece::Shebang => out.extend_from_slice(b"#!"),
                Piece::Newline => out.push(b'\n'),
            }
            out.push(b' ');
        }
        out
    }

    fn options(&self) -> ReadOptions {
        if self.collect_all_comments {
            ReadOptions::COLLECT_ALL_COMMENTS
        } else {
            ReadOptions::empty()
        }
    }
}

/// Every byte of the input ends up in exactly one chunk or partial chunk.
fn episodes_cover_input(text: &[u8], options: ReadOptions) {
    let mut input = text;
    let mut reader = MultilineReader::new(options);
    let mut seen = Vec::with_capacity(text.len());
    loop {
        match reader.read(&mut input, &mut io::sink(), "") {
            Ok(chunk) => {
                assert!(!chunk.text.is_empty());
                seen.extend_from_slice(&chunk.text);
            }
            Err(err) => {
                seen.extend_from_slice(&err.partial.text);
                match err.source {
                    ReadErrorKind::InvalidLiteral(lit) => {
                        assert!(lit.byte < b' ');
                        assert_eq!(err.partial.text.last(), Some(&lit.byte));
                        // The rest of the offending line is consumed without
                        // being scanned.
                        let consumed = text.len() - input.len();
                        seen.clear();
                        seen.extend_from_slice(&text[..consumed]);
                    }
                    ReadErrorKind::EndOfInput | ReadErrorKind::UnexpectedEndOfInput(_) => break,
                    ReadErrorKind::Io(e) => panic!("in-memory read failed: {e}"),
                }
            }
        }
    }
    let rewritten = text.windows(2).any(|w| w == b"#!")
        || text.windows(3).any(|w| w == "\u{2029}".as_bytes());
    if !rewritten {
        assert_eq!(seen, text);
    }
}

fn scanner_invariants(text: &[u8], options: ReadOptions) {
    let mut state = ScanState::new();
    let mut first = None;
    for line in text.split_inclusive(|&b| b == b'\n') {
        state.start_next_line();
        let scanned = state.scan_line(line, &mut Quiet);
        state.assert_invariants();
        if scanned.is_err() {
            return;
        }
        state.end_line();
        let _ = state.verdict(options, &GoKeywords);
        state.assert_invariants();
        if first.is_some() {
            assert_eq!(state.first_token(), first);
        }
        first = state.first_token();
    }
}

fuzz_target!(|session: Session| {
    let text = session.text();
    let options = session.options();
    episodes_cover_input(&text, options);
    scanner_invariants(&text, options);
});
