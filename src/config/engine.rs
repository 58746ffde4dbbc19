//! Engine limits

use serde::{Deserialize, Serialize};

use crate::error::{NotationError, Result};

/// Default bound on evaluator recursion depth
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;
/// Default bound on expression length in bytes
pub const DEFAULT_MAX_EXPRESSION_LEN: usize = 64 * 1024;

/// Limits applied to every conversion and evaluation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum recursion depth of the evaluator
    pub max_nesting_depth: usize,
    /// Maximum accepted expression length, in bytes, after trimming
    pub max_expression_len: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            max_expression_len: DEFAULT_MAX_EXPRESSION_LEN,
        }
    }
}

impl EngineConfig {
    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)
            .map_err(|e| NotationError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_nesting_depth == 0 {
            return Err(NotationError::InvalidConfig(
                "max_nesting_depth must be positive".to_string(),
            ));
        }
        if self.max_expression_len == 0 {
            return Err(NotationError::InvalidConfig(
                "max_expression_len must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Reject expressions longer than `max_expression_len`
    #[inline]
    pub fn check_length(&self, expression: &str) -> Result<()> {
        if expression.len() > self.max_expression_len {
            return Err(NotationError::ExpressionTooLong {
                len: expression.len(),
                limit: self.max_expression_len,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_partial() {
        let config = EngineConfig::from_json(r#"{"max_nesting_depth": 32}"#).unwrap();
        assert_eq!(config.max_nesting_depth, 32);
        assert_eq!(config.max_expression_len, DEFAULT_MAX_EXPRESSION_LEN);
    }

    #[test]
    fn test_from_json_empty_object_is_default() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_from_json_rejects_zero_limit() {
        let err = EngineConfig::from_json(r#"{"max_expression_len": 0}"#).unwrap_err();
        assert!(matches!(err, NotationError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = EngineConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, NotationError::InvalidConfig(_)));
    }

    #[test]
    fn test_check_length() {
        let config = EngineConfig {
            max_expression_len: 5,
            ..Default::default()
        };
        assert!(config.check_length("1+2+3").is_ok());
        assert_eq!(
            config.check_length("1+2+3+4"),
            Err(NotationError::ExpressionTooLong { len: 7, limit: 5 })
        );
    }

    #[test]
    fn test_serialize_round_trips_through_json() {
        let config = EngineConfig {
            max_nesting_depth: 8,
            max_expression_len: 100,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(EngineConfig::from_json(&json).unwrap(), config);
    }
}
