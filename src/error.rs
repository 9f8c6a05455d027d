//! Error types.
//!
//! The tick itself never fails. Errors only come out of match setup and
//! out of external mutations that the simulation refuses.

use thiserror::Error;

/// Invalid match configuration. Fatal: the match refuses to start.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Value is NaN or infinite.
    #[error("{field} must be finite (got {value})")]
    NonFinite {
        /// Config field name
        field: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Value must be strictly positive.
    #[error("{field} must be positive (got {value})")]
    NonPositive {
        /// Config field name
        field: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Value must not be negative.
    #[error("{field} must not be negative (got {value})")]
    Negative {
        /// Config field name
        field: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Value does not fit in Q16.16 or leaves the arena limits.
    #[error("{field} is out of range (got {value})")]
    OutOfRange {
        /// Config field name
        field: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for `MatchConfig`.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Rejected health mutation. The fighter keeps its previous value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HealthError {
    /// Requested health is outside `[0, max]`.
    #[error("health {requested} is outside [0, {max}]")]
    OutOfRange {
        /// Requested health
        requested: i64,
        /// Fighter's health base
        max: u32,
    },
}

/// Failure while assembling a match from the catalog.
#[derive(Debug, Error)]
pub enum SetupError {
    /// No template with this id.
    #[error("unknown character id {0}")]
    UnknownCharacter(u32),

    /// Template stats cannot seed a fighter.
    #[error("character {name:?} is invalid: {reason}")]
    InvalidTemplate {
        /// Template name
        name: String,
        /// What is wrong with it
        reason: &'static str,
    },

    /// Match configuration rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConfigError::NonPositive { field: "gravity", value: -0.7 };
        assert_eq!(err.to_string(), "gravity must be positive (got -0.7)");

        let err = HealthError::OutOfRange { requested: 120, max: 100 };
        assert_eq!(err.to_string(), "health 120 is outside [0, 100]");

        let err = SetupError::UnknownCharacter(999);
        assert_eq!(err.to_string(), "unknown character id 999");
    }

    #[test]
    fn test_config_error_wraps() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SetupError = ConfigError::from(parse).into();
        assert!(matches!(err, SetupError::Config(ConfigError::Parse(_))));
    }
}
