//! Notation classification

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NotationError;
use crate::notation::token::is_operator;

/// The notation an expression is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotationKind {
    /// Operator between operands, e.g. `a+b`
    Infix,
    /// Operator before operands, e.g. `+ab`
    Prefix,
    /// Operator after operands, e.g. `ab+`
    Postfix,
    /// Empty or unclassifiable
    Unknown,
}

impl NotationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotationKind::Infix => "infix",
            NotationKind::Prefix => "prefix",
            NotationKind::Postfix => "postfix",
            NotationKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for NotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotationKind {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "infix" => Ok(NotationKind::Infix),
            "prefix" => Ok(NotationKind::Prefix),
            "postfix" => Ok(NotationKind::Postfix),
            "unknown" => Ok(NotationKind::Unknown),
            other => Err(NotationError::UnidentifiableNotation(format!(
                "unknown notation name '{}'",
                other
            ))),
        }
    }
}

/// Classify an expression by its first and last non-whitespace characters
///
/// A trailing operator wins over a leading one, so `+3*42` is prefix while
/// `-34+` is postfix.
pub fn identify(expression: &str) -> NotationKind {
    let expression = expression.trim();

    let (Some(first), Some(last)) = (expression.chars().next(), expression.chars().next_back())
    else {
        return NotationKind::Unknown;
    };

    if is_operator(last) {
        NotationKind::Postfix
    } else if is_operator(first) {
        NotationKind::Prefix
    } else if first.is_alphanumeric() || first == '(' {
        NotationKind::Infix
    } else {
        NotationKind::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify_examples() {
        assert_eq!(identify("3+4*2"), NotationKind::Infix);
        assert_eq!(identify("+3*42"), NotationKind::Prefix);
        assert_eq!(identify("34*2+"), NotationKind::Postfix);
        assert_eq!(identify("(1+2)*3"), NotationKind::Infix);
        assert_eq!(identify("  + 3 * 4 2  "), NotationKind::Prefix);
    }

    #[test]
    fn test_identify_unknown() {
        assert_eq!(identify(""), NotationKind::Unknown);
        assert_eq!(identify("   \t"), NotationKind::Unknown);
        assert_eq!(identify(")1+2"), NotationKind::Unknown);
        assert_eq!(identify("#"), NotationKind::Unknown);
    }

    #[test]
    fn test_trailing_operator_wins() {
        assert_eq!(identify("-34+"), NotationKind::Postfix);
        assert_eq!(identify("+"), NotationKind::Postfix);
    }

    #[test]
    fn test_malformed_infix_still_classifies() {
        assert_eq!(identify("3+*2"), NotationKind::Infix);
        assert_eq!(identify("(1+2"), NotationKind::Infix);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Infix".parse::<NotationKind>(), Ok(NotationKind::Infix));
        assert_eq!(" postfix ".parse::<NotationKind>(), Ok(NotationKind::Postfix));
        assert!("reverse-polish".parse::<NotationKind>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&NotationKind::Prefix).unwrap();
        assert_eq!(json, "\"prefix\"");
        let kind: NotationKind = serde_json::from_str("\"infix\"").unwrap();
        assert_eq!(kind, NotationKind::Infix);
    }
}
