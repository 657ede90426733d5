//! Trailing-keyword continuation.
//!
//! A line such as `if x` or `} else` has no open bracket and no trailing
//! operator, yet the statement obviously goes on. The scanner asks a
//! [`KeywordTable`] about the last word of the line and keeps reading when that
//! word is a reserved keyword that is not statement-terminal.

/// How a grammar classifies a lowercase word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeywordClass {
    /// Not a keyword.
    Identifier,
    /// A keyword that ends a statement: `break`, `continue`, `fallthrough`,
    /// `return`.
    Terminal,
    /// Any other keyword. A line ending in one continues.
    Reserved,
}

impl KeywordClass {
    /// Whether a line ending in a word of this class must continue.
    #[must_use]
    pub const fn forces_continuation(self) -> bool {
        matches!(self, KeywordClass::Reserved)
    }
}

/// Reserved-word lookup for the target grammar.
///
/// Closures implement it, so a one-off table is just
/// `|word: &str| if word == "let" { KeywordClass::Reserved } else { KeywordClass::Identifier }`.
pub trait KeywordTable {
    /// Classifies a word made only of ASCII lowercase letters.
    fn classify(&self, word: &str) -> KeywordClass;
}

impl<F> KeywordTable for F
where
    F: Fn(&str) -> KeywordClass,
{
    fn classify(&self, word: &str) -> KeywordClass {
        self(word)
    }
}

/// The Go keyword set.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoKeywords;

impl KeywordTable for GoKeywords {
    fn classify(&self, word: &str) -> KeywordClass {
        match word {
            "break" | "continue" | "fallthrough" | "return" => KeywordClass::Terminal,
            "case" | "chan" | "const" | "default" | "defer" | "else" | "for" | "func" | "go"
            | "goto" | "if" | "import" | "interface" | "map" | "package" | "range" | "select"
            | "struct" | "switch" | "type" | "var" => KeywordClass::Reserved,
            _ => KeywordClass::Identifier,
        }
    }
}

/// The Go keyword set extended with the macro dialect: `macro`, `lambda`,
/// `function` and `typecase` are reserved too. This is the dialect the `~`
/// quoting operators belong to.
#[derive(Debug, Clone, Copy, Default)]
pub struct MacroKeywords;

impl KeywordTable for MacroKeywords {
    fn classify(&self, word: &str) -> KeywordClass {
        match word {
            "macro" | "lambda" | "function" | "typecase" => KeywordClass::Reserved,
            _ => GoKeywords.classify(word),
        }
    }
}

/// A grammar without keywords: trailing words never force continuation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoKeywords;

impl KeywordTable for NoKeywords {
    fn classify(&self, _word: &str) -> KeywordClass {
        KeywordClass::Identifier
    }
}

/// Returns the run of ASCII lowercase letters that ends `text`, ignoring
/// trailing whitespace.
///
/// Returns `None` when the last non-whitespace byte is not a lowercase letter,
/// so `x.if` yields `if` and `If` yields `f`, but `if(` yields nothing.
#[must_use]
pub fn trailing_word(text: &[u8]) -> Option<&str> {
    let end = text.iter().rposition(|&b| b > b' ')? + 1;
    let text = &text[..end];
    if !text[end - 1].is_ascii_lowercase() {
        return None;
    }
    let start = text
        .iter()
        .rposition(|b| !b.is_ascii_lowercase())
        .map_or(0, |i| i + 1);
    core::str::from_utf8(&text[start..]).ok()
}

/// Whether `text`, the token part of the last line, ends in a keyword that
/// forces another line.
pub fn forces_continuation<K>(text: &[u8], keywords: &K) -> bool
where
    K: KeywordTable + ?Sized,
{
    trailing_word(text).is_some_and(|word| keywords.classify(word).forces_continuation())
}
