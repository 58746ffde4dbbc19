//! Tokens for arithmetic expressions

use std::fmt;

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Sub,
    /// Multiplication (*)
    Mul,
    /// Floor division (/)
    Div,
    /// Exponentiation (^)
    Pow,
}

impl Operator {
    /// All operators, in tier order
    pub const ALL: [Operator; 5] = [
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Pow,
    ];

    #[inline]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            '^' => Some(Operator::Pow),
            _ => None,
        }
    }

    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
            Operator::Pow => '^',
        }
    }

    /// Precedence rank: `+ -` bind loosest, `^` tightest
    #[inline]
    pub fn tier(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 1,
            Operator::Mul | Operator::Div => 2,
            Operator::Pow => 3,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Tier of an arbitrary character; anything that is not an operator ranks 0
#[inline]
pub fn tier(c: char) -> u8 {
    Operator::from_char(c).map_or(0, Operator::tier)
}

#[inline]
pub fn is_operator(c: char) -> bool {
    Operator::from_char(c).is_some()
}

/// A single lexical unit, borrowing operand text from the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Alphanumeric run such as `42` or `abc`
    Operand(&'a str),
    Operator(Operator),
    Open,
    Close,
}

impl<'a> Token<'a> {
    /// Swap `(` and `)`; used when an infix source is read right to left
    #[inline]
    pub fn mirrored(self) -> Self {
        match self {
            Token::Open => Token::Close,
            Token::Close => Token::Open,
            other => other,
        }
    }

    /// Append the token's text to `out`
    pub fn write_to(&self, out: &mut String) {
        match self {
            Token::Operand(text) => out.push_str(text),
            Token::Operator(op) => out.push(op.symbol()),
            Token::Open => out.push('('),
            Token::Close => out.push(')'),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers() {
        assert_eq!(tier('+'), 1);
        assert_eq!(tier('-'), 1);
        assert_eq!(tier('*'), 2);
        assert_eq!(tier('/'), 2);
        assert_eq!(tier('^'), 3);
        assert_eq!(tier('('), 0);
        assert_eq!(tier('a'), 0);
    }

    #[test]
    fn test_symbol_round_trip() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_char(op.symbol()), Some(op));
        }
        assert_eq!(Operator::from_char('%'), None);
    }

    #[test]
    fn test_mirrored() {
        assert_eq!(Token::Open.mirrored(), Token::Close);
        assert_eq!(Token::Close.mirrored(), Token::Open);
        assert_eq!(Token::Operand("x").mirrored(), Token::Operand("x"));
    }
}
