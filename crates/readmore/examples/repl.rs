//! A read loop that echoes every complete unit it reads from stdin.
//!
//! Run with
//!
//! ```bash
//! cargo run -p readmore --example repl
//! ```
//!
//! Set `READMORE_TRACE=1` to log every scanned byte and line verdict to
//! stderr.

use std::io::{self, Write};

use readmore::{
    MacroKeywords, MultilineReader, ReadError, ReadErrorKind, ReadOptions, TracingObserver,
};

fn main() -> io::Result<()> {
    if std::env::var_os("READMORE_TRACE").is_some() {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(io::stderr)
            .init();
    }

    let options = ReadOptions::SHOW_PROMPT | ReadOptions::COLLECT_ALL_COMMENTS;
    let mut reader = MultilineReader::new(options)
        .with_keywords(MacroKeywords)
        .with_observer(TracingObserver);
    tracing::debug!(options = ?reader.options(), "reading units from stdin");
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    loop {
        match reader.read(&mut input, &mut stdout, "readmore> ") {
            Ok(chunk) => {
                if let Some(tokens) = chunk.tokens() {
                    writeln!(stdout, "// unit, {} bytes", chunk.text.len())?;
                    stdout.write_all(tokens)?;
                }
            }
            Err(err) if err.is_end_of_input() => {
                writeln!(stdout)?;
                return Ok(());
            }
            Err(ReadError {
                source: ReadErrorKind::Io(e),
                ..
            }) => return Err(e),
            Err(err) => {
                // The offending line is already consumed; the next episode
                // starts on the line after it.
                writeln!(stdout, "\n// error: {err}")?;
                if matches!(err.source, ReadErrorKind::UnexpectedEndOfInput(_)) {
                    return Ok(());
                }
            }
        }
    }
}
