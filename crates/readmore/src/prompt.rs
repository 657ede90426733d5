//! Continuation prompt.

use std::io::{self, Write};

const DOTS: &str = ". . . . . . . . . . . . . . . . ";

/// Width of the continuation prompt at the given bracket depth.
#[must_use]
pub const fn continuation_width(paren_depth: usize) -> usize {
    4 + 2 * paren_depth
}

/// Writes `count` columns of the `". . . "` pattern.
///
/// # Errors
///
/// Returns any error from `out`.
pub fn write_dots<W>(out: &mut W, mut count: usize) -> io::Result<()>
where
    W: Write + ?Sized,
{
    while count >= DOTS.len() {
        out.write_all(DOTS.as_bytes())?;
        count -= DOTS.len();
    }
    out.write_all(&DOTS.as_bytes()[..count])
}

#[cfg(test)]
mod tests {
    use std::{string::String, vec::Vec};

    use super::*;

    fn dots(count: usize) -> String {
        let mut out = Vec::new();
        write_dots(&mut out, count).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn widths_grow_with_depth() {
        assert_eq!(continuation_width(0), 4);
        assert_eq!(continuation_width(3), 10);
    }

    #[test]
    fn short_prompt() {
        assert_eq!(dots(4), ". . ");
        assert_eq!(dots(5), ". . .");
        assert_eq!(dots(0), "");
    }

    #[test]
    fn long_prompt_repeats_pattern() {
        let out = dots(DOTS.len() + 2);
        assert_eq!(out.len(), DOTS.len() + 2);
        assert!(out.starts_with(DOTS));
        assert!(out.ends_with(". "));
    }
}
