#![expect(missing_docs)]

use core::fmt::Write;
use std::io;

use bstr::ByteSlice;
use readmore::{MultilineReader, ReadOptions};

/// Runs episodes over `input` until it is exhausted, one line per outcome.
fn render(input: &str, options: ReadOptions) -> String {
    let mut input = input.as_bytes();
    let mut reader = MultilineReader::new(options);
    let mut out = String::new();
    loop {
        match reader.read(&mut input, &mut io::sink(), "") {
            Ok(chunk) => {
                writeln!(
                    out,
                    "ok first={:?} {:?}",
                    chunk.first_token,
                    chunk.text.to_str_lossy()
                )
                .unwrap();
            }
            Err(err) => {
                writeln!(
                    out,
                    "err({err}) first={:?} {:?}",
                    err.partial.first_token,
                    err.partial.text.to_str_lossy()
                )
                .unwrap();
                if err.is_end_of_input() || input.is_empty() {
                    return out;
                }
            }
        }
    }
}

#[test]
fn snapshot_mixed_session() {
    let session = "x := f(\n  1)\n// c\ny +\n z\ns := \"bad\nif\n  ok {\n}\ntail";
    insta::assert_snapshot!(render(session, ReadOptions::empty()), @r#"
    ok first=Some(0) "x := f(\n  1)\n"
    ok first=None "// c\n"
    ok first=Some(0) "y +\n z\n"
    err(unexpected character '\n' inside string literal) first=Some(0) "s := \"bad\n"
    ok first=Some(0) "if\n  ok {\n}\n"
    err(end of input) first=Some(0) "tail"
    "#);
}

#[test]
fn snapshot_collected_comments() {
    let session = "// a\n\n/* b\n*/\nrun()\n// trailing\n";
    insta::assert_snapshot!(render(session, ReadOptions::COLLECT_ALL_COMMENTS), @r#"
    ok first=Some(14) "// a\n\n/* b\n*/\nrun()\n"
    err(end of input) first=None "// trailing\n"
    "#);
}

#[test]
fn snapshot_unbalanced_at_end() {
    let session = "a := [\n  1,\n";
    insta::assert_snapshot!(render(session, ReadOptions::empty()), @r#"err(unexpected end of input) first=Some(0) "a := [\n  1,\n""#);
}
