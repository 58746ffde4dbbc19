//! Scanning cursor over an expression
//!
//! A [`Cursor`] walks a source string forward or backward one character at a
//! time. It is the single shared scan position for both the converters and
//! the recursive evaluator, which passes it by `&mut` through every frame.

use crate::error::{NotationError, Result};
use crate::notation::token::{Operator, Token};

/// Scan direction of a [`Cursor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Byte position into a source string, moving in one direction
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    src: &'a str,
    pos: usize,
    direction: Direction,
}

impl<'a> Cursor<'a> {
    /// Cursor at the start (forward) or end (backward) of `src`
    pub fn new(src: &'a str, direction: Direction) -> Self {
        let pos = match direction {
            Direction::Forward => 0,
            Direction::Backward => src.len(),
        };
        Self {
            src,
            pos,
            direction,
        }
    }

    /// Forward cursor starting at byte `offset`, clamped to the end of `src`
    ///
    /// An offset inside a multi-byte character moves back to its first byte.
    pub fn at(src: &'a str, offset: usize) -> Self {
        let mut pos = offset.min(src.len());
        while !src.is_char_boundary(pos) {
            pos -= 1;
        }
        Self {
            src,
            pos,
            direction: Direction::Forward,
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        match self.direction {
            Direction::Forward => self.pos >= self.src.len(),
            Direction::Backward => self.pos == 0,
        }
    }

    /// Next character in scan direction, without consuming it
    #[inline]
    pub fn peek(&self) -> Option<char> {
        match self.direction {
            Direction::Forward => self.src[self.pos..].chars().next(),
            Direction::Backward => self.src[..self.pos].chars().next_back(),
        }
    }

    /// Consume and return the next character
    #[inline]
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        match self.direction {
            Direction::Forward => self.pos += c.len_utf8(),
            Direction::Backward => self.pos -= c.len_utf8(),
        }
        Some(c)
    }

    /// Consume the longest run matching `pred`
    ///
    /// The returned slice is always in source (left to right) order, even
    /// when scanning backward.
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.bump();
        }
        match self.direction {
            Direction::Forward => &self.src[start..self.pos],
            Direction::Backward => &self.src[self.pos..start],
        }
    }

    /// Consume a single character and return it as a slice of the source
    fn eat_one(&mut self) -> &'a str {
        let start = self.pos;
        self.bump();
        match self.direction {
            Direction::Forward => &self.src[start..self.pos],
            Direction::Backward => &self.src[self.pos..start],
        }
    }

    pub fn skip_whitespace(&mut self) {
        self.eat_while(char::is_whitespace);
    }

    /// Read the next token, skipping leading whitespace
    ///
    /// With `grouped` set, a run of alphanumeric characters forms one operand;
    /// otherwise every alphanumeric character is an operand on its own.
    pub fn next_token(&mut self, grouped: bool) -> Result<Option<Token<'a>>> {
        self.skip_whitespace();

        let Some(c) = self.peek() else {
            return Ok(None);
        };

        let token = if c.is_alphanumeric() {
            let text = if grouped {
                self.eat_while(char::is_alphanumeric)
            } else {
                self.eat_one()
            };
            Token::Operand(text)
        } else if let Some(op) = Operator::from_char(c) {
            self.bump();
            Token::Operator(op)
        } else if c == '(' {
            self.bump();
            Token::Open
        } else if c == ')' {
            self.bump();
            Token::Close
        } else {
            return Err(NotationError::InvalidExpression(format!(
                "unexpected character '{}' at byte {}",
                c, self.pos
            )));
        };

        Ok(Some(token))
    }

    /// Lazy token stream over the rest of the source
    pub fn tokens(self, grouped: bool) -> Tokens<'a> {
        Tokens {
            cursor: self,
            grouped,
            failed: false,
        }
    }
}

/// Iterator adapter over [`Cursor::next_token`]; stops after the first error
pub struct Tokens<'a> {
    cursor: Cursor<'a>,
    grouped: bool,
    failed: bool,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.cursor.next_token(self.grouped) {
            Ok(token) => token.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
