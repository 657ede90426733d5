//! Normalizes the different ways a program text can be handed over.

use std::{
    borrow::Cow,
    io::Read,
    string::String,
    vec::Vec,
};

use bstr::{BString, ByteSlice};

use crate::error::SourceError;

/// A program text in one of the accepted representations.
///
/// The `Option` variants model a recognized kind that holds no value; reading
/// from one fails with [`SourceError::UnsupportedSourceType`].
pub enum Source<'a> {
    /// Raw bytes.
    Bytes(Option<&'a [u8]>),
    /// A string.
    Text(&'a str),
    /// An in-memory growable buffer.
    Buffer(Option<&'a BString>),
    /// Any byte stream; it is drained to the end.
    Reader(Option<&'a mut dyn Read>),
}

impl Source<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Source::Bytes(_) => "bytes",
            Source::Text(_) => "text",
            Source::Buffer(_) => "buffer",
            Source::Reader(_) => "reader",
        }
    }
}

impl core::fmt::Debug for Source<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Source::Bytes(b) => f.debug_tuple("Bytes").field(&b.map(ByteSlice::as_bstr)).finish(),
            Source::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Source::Buffer(b) => f.debug_tuple("Buffer").field(b).finish(),
            Source::Reader(r) => f
                .debug_tuple("Reader")
                .field(&r.as_ref().map(|_| ".."))
                .finish(),
        }
    }
}

impl<'a> From<&'a [u8]> for Source<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Source::Bytes(Some(bytes))
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(text: &'a str) -> Self {
        Source::Text(text)
    }
}

impl<'a> From<&'a String> for Source<'a> {
    fn from(text: &'a String) -> Self {
        Source::Text(text)
    }
}

impl<'a> From<&'a BString> for Source<'a> {
    fn from(buffer: &'a BString) -> Self {
        Source::Buffer(Some(buffer))
    }
}

fn absent(kind: &'static str) -> SourceError {
    SourceError::UnsupportedSourceType(kind)
}

/// Returns the source as bytes, borrowing whenever the bytes already exist.
///
/// # Errors
///
/// [`SourceError::UnsupportedSourceType`] for an absent value and
/// [`SourceError::Io`] when draining a reader fails.
pub fn read_bytes(source: Source<'_>) -> Result<Cow<'_, [u8]>, SourceError> {
    let kind = source.kind();
    match source {
        Source::Bytes(bytes) => bytes.map(Cow::Borrowed).ok_or_else(|| absent(kind)),
        Source::Text(text) => Ok(Cow::Borrowed(text.as_bytes())),
        Source::Buffer(buffer) => buffer
            .map(|b| Cow::Borrowed(b.as_slice()))
            .ok_or_else(|| absent(kind)),
        Source::Reader(reader) => {
            let reader = reader.ok_or_else(|| absent(kind))?;
            let mut out = Vec::new();
            reader.read_to_end(&mut out)?;
            Ok(Cow::Owned(out))
        }
    }
}

/// Returns the source as text. Invalid UTF-8 is replaced with U+FFFD.
///
/// # Errors
///
/// Same as [`read_bytes`].
pub fn read_string(source: Source<'_>) -> Result<Cow<'_, str>, SourceError> {
    Ok(match read_bytes(source)? {
        Cow::Borrowed(bytes) => bytes.to_str_lossy(),
        Cow::Owned(bytes) => Cow::Owned(bytes.to_str_lossy().into_owned()),
    })
}

#[cfg(test)]
mod tests {
    use std::{
        io::{self, Cursor},
        string::ToString,
    };

    use super::*;

    #[test]
    fn borrowed_kinds_do_not_copy() {
        let text = "x := 1\n";
        assert!(matches!(read_bytes(text.into()).unwrap(), Cow::Borrowed(b"x := 1\n")));

        let buffer = BString::from("y\n");
        assert!(matches!(read_bytes((&buffer).into()).unwrap(), Cow::Borrowed(b"y\n")));

        let bytes: &[u8] = b"z";
        assert_eq!(read_string(bytes.into()).unwrap(), "z");
    }

    #[test]
    fn readers_are_drained() {
        let mut cursor = Cursor::new(b"line one\nline two\n".to_vec());
        let got = read_string(Source::Reader(Some(&mut cursor))).unwrap();
        assert_eq!(got, "line one\nline two\n");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let bytes: &[u8] = b"a\xffb";
        assert_eq!(read_string(bytes.into()).unwrap(), "a\u{FFFD}b");
    }

    #[test]
    fn absent_values_are_unsupported() {
        for source in [Source::Bytes(None), Source::Buffer(None), Source::Reader(None)] {
            let err = read_bytes(source).unwrap_err();
            assert!(matches!(err, SourceError::UnsupportedSourceType(_)), "{err:?}");
        }
        let err = read_string(Source::Bytes(None)).unwrap_err();
        assert_eq!(err.to_string(), "unsupported source, cannot read from: bytes");
    }

    #[test]
    fn reader_failures_pass_through() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
            }
        }
        let err = read_bytes(Source::Reader(Some(&mut Broken))).unwrap_err();
        match err {
            SourceError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
