use crate::constants::{CLOSE_BRACE, FIELD_SEP, TAG_ARRAY, TAG_INT, TAG_STRING, TERMINATOR};
use crate::decode::scanner::Scanner;
use crate::decode::tree::NodeKind;
use crate::error::Error;
use crate::Result;

/// Structural token in tag position: a value opener or the brace that
/// closes the enclosing array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    Open(NodeKind),
    Close,
}

/// Maps a character in tag position to its token. Anything that is
/// neither a known tag nor the closing brace is fatal.
pub(crate) fn classify_tag(ch: char, offset: usize) -> Result<Token> {
    match ch {
        TAG_ARRAY => Ok(Token::Open(NodeKind::Array)),
        TAG_STRING => Ok(Token::Open(NodeKind::Str)),
        TAG_INT => Ok(Token::Open(NodeKind::Int)),
        CLOSE_BRACE => Ok(Token::Close),
        tag => Err(Error::UnknownTag { tag, offset }),
    }
}

/// Reads the `:digits:` run that follows an array or string tag.
///
/// The run is read leniently: leading digits count, trailing garbage
/// before the closing colon is ignored, an empty run reads as zero. The
/// character in separator position is skipped without being checked, the
/// way the source application read it. Returns `None` when the input
/// ends before the closing colon.
pub(crate) fn read_declared_len(sc: &mut Scanner) -> Option<usize> {
    sc.read_char()?;
    let mut run = String::new();
    loop {
        match sc.read_char() {
            None => return None,
            Some(FIELD_SEP) => break,
            Some(ch) => run.push(ch),
        }
    }
    let digits: String = run.chars().take_while(char::is_ascii_digit).collect();
    Some(digits.parse().unwrap_or(0))
}

/// Accumulates an integer literal up to its `;` terminator, skipping the
/// separator first. The flag reports whether the terminator was actually
/// seen; `false` means the input ended inside the literal.
pub(crate) fn read_int_literal(sc: &mut Scanner) -> (String, bool) {
    let mut literal = String::new();
    if sc.read_char().is_none() {
        return (literal, false);
    }
    loop {
        match sc.read_char() {
            None => return (literal, false),
            Some(TERMINATOR) => return (literal, true),
            Some(ch) => literal.push(ch),
        }
    }
}
