use logos::Logos;

/// Lexemes the [Cursor] recognizes by itself. Everything else is matched byte-by-byte by the
/// grammar functions.
#[derive(Logos, Debug, PartialEq)]
enum Lexeme {
    #[regex(r"[_A-Za-z][_0-9A-Za-z]*")]
    Name,

    #[regex(r"([ \t\n\r,]+|#[^\n\r]*)+")]
    Ignored,

    #[error]
    Error,
}

/// Failures of moving a [Cursor] forward.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum CursorError {
    /// The cursor was already positioned at the end of the source text.
    EndOfInput,
    /// Fewer bytes remained in the source text than were requested.
    UnexpectedEndOfInput,
}

/// A forward-only read position over a source text.
///
/// The cursor only ever moves forward. Whitespace, commas, and comments are skipped by
/// [`Cursor::skip_ignored`], which the advancing methods call after each token so that the
/// cursor rests on the first byte of the next significant token.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    source: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Cursor {
            source,
            position: 0,
        }
    }

    #[inline]
    pub(crate) fn source(&self) -> &'a str {
        self.source
    }

    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Returns the unread part of the source text.
    #[inline]
    pub(crate) fn remainder(&self) -> &'a str {
        self.source.get(self.position..).unwrap_or("")
    }

    /// Returns a slice of the source text between two byte offsets.
    #[inline]
    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }

    /// Returns the byte at the current position, or `None` at the end of the source text.
    #[inline]
    pub(crate) fn current(&self) -> Option<u8> {
        self.source.as_bytes().get(self.position).copied()
    }

    /// Returns the byte after the current position, or `None` if there is none.
    #[inline]
    pub(crate) fn peek_next(&self) -> Option<u8> {
        self.source.as_bytes().get(self.position + 1).copied()
    }

    /// Returns whether the unread source text starts with `prefix` without consuming it.
    #[inline]
    pub(crate) fn has_prefix(&self, prefix: &str) -> bool {
        self.source.as_bytes()[self.position..].starts_with(prefix.as_bytes())
    }

    /// Moves forward by a single byte.
    #[inline]
    pub(crate) fn advance_one(&mut self) -> Result<(), CursorError> {
        if self.is_at_end() {
            Err(CursorError::EndOfInput)
        } else {
            self.position += 1;
            Ok(())
        }
    }

    /// Moves forward by `n` bytes and then skips any ignored tokens.
    ///
    /// When fewer than `n` bytes remain the cursor is moved to the end of the source text.
    #[inline]
    pub(crate) fn advance_and_skip(&mut self, n: usize) -> Result<(), CursorError> {
        if self.position + n > self.source.len() {
            self.position = self.source.len();
            return Err(CursorError::UnexpectedEndOfInput);
        }
        self.position += n;
        self.skip_ignored();
        Ok(())
    }

    /// Consumes exactly `n` bytes and returns them. Nothing is consumed when fewer bytes remain.
    #[inline]
    pub(crate) fn take_fixed(&mut self, n: usize) -> Result<&'a [u8], CursorError> {
        let end = self.position + n;
        match self.source.as_bytes().get(self.position..end) {
            Some(bytes) => {
                self.position = end;
                Ok(bytes)
            }
            None => Err(CursorError::UnexpectedEndOfInput),
        }
    }

    /// Skips whitespace, line terminators, commas, and `#` comments.
    pub(crate) fn skip_ignored(&mut self) {
        let mut lexer = Lexeme::lexer(self.remainder());
        if let Some(Lexeme::Ignored) = lexer.next() {
            self.position += lexer.span().end;
        }
    }

    /// Returns whether the current byte starts a Name.
    #[inline]
    pub(crate) fn is_name(&self) -> bool {
        matches!(self.current(), Some(b'_' | b'A'..=b'Z' | b'a'..=b'z'))
    }

    /// Returns the Name at the current position without consuming it, or an empty string when
    /// the current position doesn't start a Name.
    pub(crate) fn peek_name(&self) -> &'a str {
        let remainder = self.remainder();
        let mut lexer = Lexeme::lexer(remainder);
        match lexer.next() {
            Some(Lexeme::Name) => &remainder[lexer.span()],
            _ => "",
        }
    }

    /// Consumes the Name at the current position and any ignored tokens following it.
    ///
    /// Returns an empty string and consumes nothing when the current position doesn't start a
    /// Name, which is why callers check [`Cursor::is_name`] first.
    pub(crate) fn read_name(&mut self) -> &'a str {
        let name = self.peek_name();
        if !name.is_empty() {
            self.position += name.len();
            self.skip_ignored();
        }
        name
    }
}

#[cfg(test)]
mod tests {
    use super::{Cursor, CursorError};

    #[test]
    fn empty() {
        let mut cursor = Cursor::new("");
        assert!(cursor.is_at_end());
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.peek_next(), None);
        assert_eq!(cursor.advance_one(), Err(CursorError::EndOfInput));

        let mut cursor = Cursor::new(",,       # comment\n");
        cursor.skip_ignored();
        assert!(cursor.is_at_end());
    }

    #[test]
    fn lookahead() {
        let mut cursor = Cursor::new("...on");
        assert_eq!(cursor.current(), Some(b'.'));
        assert_eq!(cursor.peek_next(), Some(b'.'));
        assert!(cursor.has_prefix("..."));
        assert!(!cursor.has_prefix("...."));
        assert_eq!(cursor.position(), 0);
        cursor.advance_and_skip(3).unwrap();
        assert_eq!(cursor.peek_name(), "on");
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn ignored() {
        let mut cursor = Cursor::new(" \t\r\n,# comment\r\n  # another\nname");
        cursor.skip_ignored();
        assert_eq!(cursor.remainder(), "name");

        let mut cursor = Cursor::new("name");
        cursor.skip_ignored();
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn names() {
        let mut cursor = Cursor::new("hello world _under9 9nine");
        assert!(cursor.is_name());
        assert_eq!(cursor.read_name(), "hello");
        assert_eq!(cursor.read_name(), "world");
        assert_eq!(cursor.read_name(), "_under9");
        assert!(!cursor.is_name());
        assert_eq!(cursor.read_name(), "");
        assert_eq!(cursor.current(), Some(b'9'));

        let mut cursor = Cursor::new("field# comment\n{");
        assert_eq!(cursor.read_name(), "field");
        assert_eq!(cursor.current(), Some(b'{'));
    }

    #[test]
    fn advancing() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.advance_and_skip(3), Err(CursorError::UnexpectedEndOfInput));
        assert!(cursor.is_at_end());

        let mut cursor = Cursor::new("{ a");
        cursor.advance_and_skip(1).unwrap();
        assert_eq!(cursor.current(), Some(b'a'));
        cursor.advance_one().unwrap();
        assert_eq!(cursor.advance_one(), Err(CursorError::EndOfInput));
    }

    #[test]
    fn fixed() {
        let mut cursor = Cursor::new("0041\"");
        assert_eq!(cursor.take_fixed(4), Ok(&b"0041"[..]));
        assert_eq!(cursor.current(), Some(b'"'));
        assert_eq!(cursor.take_fixed(2), Err(CursorError::UnexpectedEndOfInput));
        assert_eq!(cursor.position(), 4);
    }
}
