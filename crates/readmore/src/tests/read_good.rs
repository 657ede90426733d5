use alloc::vec::Vec;
use std::io;

use bstr::ByteSlice;
use rstest::rstest;

use crate::{
    Chunk, KeywordClass, MacroKeywords, MultilineReader, NoKeywords, ReadOptions, read_multiline,
};

fn read_one(input: &str, options: ReadOptions) -> Chunk {
    let mut input = input.as_bytes();
    read_multiline(&mut input, options, &mut io::sink(), "").unwrap()
}

fn read_all(input: &str, options: ReadOptions) -> Vec<Chunk> {
    let mut input = input.as_bytes();
    let mut reader = MultilineReader::new(options);
    let mut chunks = Vec::new();
    loop {
        match reader.read(&mut input, &mut io::sink(), "") {
            Ok(chunk) => chunks.push(chunk),
            Err(err) if err.is_end_of_input() => return chunks,
            Err(err) => panic!("unexpected error: {err}"),
        }
    }
}

#[test]
fn single_line_statement() {
    let mut input = "x := 1\nrest\n".as_bytes();
    let chunk = read_multiline(&mut input, ReadOptions::empty(), &mut io::sink(), "").unwrap();
    assert_eq!(chunk.text, "x := 1\n");
    assert_eq!(chunk.first_token, Some(0));
    // The following line is left for the next episode.
    assert_eq!(input, b"rest\n");
}

#[rstest]
#[case::call_across_lines("foo(\n)\n")]
#[case::nested("a := []int{\n  1,\n  f(2,\n    3),\n}\n")]
#[case::trailing_plus("a +\n b\n")]
#[case::trailing_assign("x :=\n  42\n")]
#[case::trailing_minus("n -\n 1\n")]
#[case::trailing_keyword("if\n x\n")]
#[case::else_branch("} else\n{}\n")]
#[case::raw_string("s := `one\ntwo`\n")]
#[case::block_comment("/* a\n b */ x\n")]
#[case::operator_comment("a + // more\n b\n")]
fn multiline_units(#[case] text: &str) {
    let chunk = read_one(&alloc::format!("{text}after\n"), ReadOptions::empty());
    assert_eq!(chunk.text, text);
}

#[rstest]
#[case("a ++\n")]
#[case("i--\n")]
#[case("return\n")]
#[case("x.y = z // done\n")]
#[case("s := \"(\"\n")]
#[case("r := '{'\n")]
#[case("a / b\n")]
fn one_line_units(#[case] text: &str) {
    let chunk = read_one(&alloc::format!("{text}after\n"), ReadOptions::empty());
    assert_eq!(chunk.text, text);
}

#[test]
fn comment_only_line_is_its_own_unit_by_default() {
    let chunk = read_one("// note\nx := 1\n", ReadOptions::empty());
    assert_eq!(chunk.text, "// note\n");
    assert_eq!(chunk.first_token, None);
    assert!(chunk.tokens().is_none());
}

#[test]
fn collected_comments_join_the_next_unit() {
    let chunk = read_one("// note\n\n/* more */\nx := 1\n", ReadOptions::COLLECT_ALL_COMMENTS);
    assert_eq!(chunk.text, "// note\n\n/* more */\nx := 1\n");
    assert_eq!(chunk.first_token, Some(20));
    assert_eq!(chunk.comments(), "// note\n\n/* more */\n");
    assert_eq!(chunk.tokens().unwrap(), "x := 1\n");
}

#[test]
fn blank_line_is_a_unit_without_tokens() {
    let chunk = read_one("\nx\n", ReadOptions::empty());
    assert_eq!(chunk.text, "\n");
    assert_eq!(chunk.first_token, None);
}

#[test]
fn shebang_line_is_rewritten() {
    let chunk = read_one("#!/usr/bin/env gorun\n", ReadOptions::empty());
    assert_eq!(chunk.text, "///usr/bin/env gorun\n");
    assert_eq!(chunk.first_token, None);
}

#[test]
fn paragraph_separators_become_newlines() {
    let chunk = read_one("f(\u{2029}1)\n", ReadOptions::empty());
    assert_eq!(chunk.text, "f(\n1)\n");
    assert_eq!(chunk.first_token, Some(0));
}

#[test]
fn episodes_follow_each_other() {
    let chunks = read_all("a := f(\n1)\nb := 2\n\nif\nb {\n}\n", ReadOptions::empty());
    let texts: Vec<_> = chunks.iter().map(|c| c.text.to_str_lossy().into_owned()).collect();
    assert_eq!(texts, ["a := f(\n1)\n", "b := 2\n", "\n", "if\nb {\n}\n"]);
}

#[test]
fn custom_keyword_table() {
    let let_continues = |word: &str| match word {
        "let" => KeywordClass::Reserved,
        _ => KeywordClass::Identifier,
    };
    let mut reader = MultilineReader::new(ReadOptions::empty()).with_keywords(let_continues);
    let mut input = "let\nx = 1\nif\n".as_bytes();
    let chunk = reader.read(&mut input, &mut io::sink(), "").unwrap();
    assert_eq!(chunk.text, "let\nx = 1\n");
    let chunk = reader.read(&mut input, &mut io::sink(), "").unwrap();
    assert_eq!(chunk.text, "if\n");
}

#[test]
fn macro_dialect_table_keeps_options() {
    let mut reader =
        MultilineReader::new(ReadOptions::COLLECT_ALL_COMMENTS).with_keywords(MacroKeywords);
    assert_eq!(reader.options(), ReadOptions::COLLECT_ALL_COMMENTS);
    let mut input = "// m\nmacro\nm() {}\nnext\n".as_bytes();
    let chunk = reader.read(&mut input, &mut io::sink(), "").unwrap();
    assert_eq!(chunk.text, "// m\nmacro\nm() {}\n");
    assert_eq!(chunk.first_token, Some(5));
}

#[test]
fn keywords_can_be_disabled() {
    let mut reader = MultilineReader::new(ReadOptions::empty()).with_keywords(NoKeywords);
    let mut input = "for\n{}\n".as_bytes();
    let chunk = reader.read(&mut input, &mut io::sink(), "").unwrap();
    assert_eq!(chunk.text, "for\n");
}

#[test]
fn prompt_and_depth_dots() {
    let mut input = "f(\n[\n]\n)\n".as_bytes();
    let mut out = Vec::new();
    read_multiline(&mut input, ReadOptions::SHOW_PROMPT, &mut out, "repl> ").unwrap();
    assert_eq!(out.as_bstr(), "repl> . . . . . . . . . . ");
}

#[test]
fn prompt_for_each_episode() {
    let mut input = "a\nb\n".as_bytes();
    let mut out = Vec::new();
    let mut reader = MultilineReader::new(ReadOptions::SHOW_PROMPT);
    reader.read(&mut input, &mut out, "> ").unwrap();
    reader.read(&mut input, &mut out, "> ").unwrap();
    assert_eq!(out.as_bstr(), "> > ");
}
