use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{ExprError, Result};

/// How literal arguments reach the final query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralMode {
    /// Quote literals into the text.
    Inline,
    /// Replace literals with placeholders and return them as parameters.
    Bind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterStyle {
    /// `?`, as MySQL prepared statements expect
    QuestionMark,
    /// `$1`, `$2`, ...
    Dollar,
}

/// Rendering configuration
///
/// Builder-style, similar to a connection configuration:
///
/// ```
/// use sqljson::{ParameterStyle, RenderConfig};
///
/// let config = RenderConfig::new()
///     .bind_literals()
///     .parameter_style(ParameterStyle::Dollar)
///     .parameter_offset(1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Inline quoting or parameter binding
    pub literal_mode: LiteralMode,

    /// Placeholder syntax used in bind mode
    pub parameter_style: ParameterStyle,

    /// Number of parameters already bound by the surrounding statement
    pub parameter_offset: usize,
}

impl RenderConfig {
    pub fn new() -> Self {
        Self {
            literal_mode: LiteralMode::Inline,
            parameter_style: ParameterStyle::QuestionMark,
            parameter_offset: 0,
        }
    }

    /// Set literal mode
    pub fn literal_mode(mut self, mode: LiteralMode) -> Self {
        self.literal_mode = mode;
        self
    }

    /// Shorthand for `literal_mode(LiteralMode::Bind)`
    pub fn bind_literals(self) -> Self {
        self.literal_mode(LiteralMode::Bind)
    }

    /// Set placeholder style
    pub fn parameter_style(mut self, style: ParameterStyle) -> Self {
        self.parameter_style = style;
        self
    }

    /// Set numbering offset for `$n` placeholders
    pub fn parameter_offset(mut self, offset: usize) -> Self {
        self.parameter_offset = offset;
        self
    }

    /// Placeholder text for the `n`-th (1-based) parameter of an expression.
    pub fn placeholder(&self, n: usize) -> String {
        match self.parameter_style {
            ParameterStyle::QuestionMark => "?".to_string(),
            ParameterStyle::Dollar => format!("${}", self.parameter_offset + n),
        }
    }

    /// Parse from a settings string
    ///
    /// Format: `"mode=bind;style=dollar;offset=2"`. Keys may appear in any
    /// order; missing keys keep their defaults.
    pub fn parse(settings: &str) -> Result<Self> {
        let mut config = Self::new();

        for pair in settings.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| ExprError::InvalidConfig(format!("expected key=value, got '{}'", pair)))?;
            let value = value.trim();

            match key.trim().to_ascii_lowercase().as_str() {
                "mode" => {
                    config.literal_mode = match value.to_ascii_lowercase().as_str() {
                        "inline" => LiteralMode::Inline,
                        "bind" => LiteralMode::Bind,
                        other => {
                            return Err(ExprError::InvalidConfig(format!("unknown mode '{}'", other)));
                        }
                    }
                }
                "style" => {
                    config.parameter_style = match value.to_ascii_lowercase().as_str() {
                        "question" | "?" => ParameterStyle::QuestionMark,
                        "dollar" | "$" => ParameterStyle::Dollar,
                        other => {
                            return Err(ExprError::InvalidConfig(format!("unknown style '{}'", other)));
                        }
                    }
                }
                "offset" => {
                    config.parameter_offset = value
                        .parse()
                        .map_err(|_| ExprError::InvalidConfig(format!("invalid offset '{}'", value)))?;
                }
                other => return Err(ExprError::InvalidConfig(format!("unknown key '{}'", other))),
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.parameter_style == ParameterStyle::QuestionMark && self.parameter_offset != 0 {
            return Err(ExprError::InvalidConfig(
                "parameter_offset only applies to numbered placeholders".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for RenderConfig {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RenderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.literal_mode {
            LiteralMode::Inline => "inline",
            LiteralMode::Bind => "bind",
        };
        let style = match self.parameter_style {
            ParameterStyle::QuestionMark => "question",
            ParameterStyle::Dollar => "dollar",
        };
        write!(f, "mode={};style={};offset={}", mode, style, self.parameter_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.literal_mode, LiteralMode::Inline);
        assert_eq!(config.parameter_style, ParameterStyle::QuestionMark);
        assert_eq!(config.parameter_offset, 0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = RenderConfig::new()
            .bind_literals()
            .parameter_style(ParameterStyle::Dollar)
            .parameter_offset(4);

        assert_eq!(config.literal_mode, LiteralMode::Bind);
        assert_eq!(config.placeholder(1), "$5");
    }

    #[test]
    fn test_parse() {
        let config = RenderConfig::parse("mode=bind; style=dollar; offset=2").unwrap();
        assert_eq!(config.literal_mode, LiteralMode::Bind);
        assert_eq!(config.parameter_style, ParameterStyle::Dollar);
        assert_eq!(config.parameter_offset, 2);

        assert_eq!(RenderConfig::parse("").unwrap(), RenderConfig::default());
    }

    #[test]
    fn test_parse_round_trips_display() {
        let config = RenderConfig::new().bind_literals().parameter_style(ParameterStyle::Dollar);
        assert_eq!(config.to_string().parse::<RenderConfig>().unwrap(), config);
    }

    #[test]
    fn test_invalid_settings() {
        assert!(RenderConfig::parse("mode").is_err());
        assert!(RenderConfig::parse("mode=fast").is_err());
        assert!(RenderConfig::parse("colour=blue").is_err());
        assert!(RenderConfig::parse("style=dollar;offset=-1").is_err());
        assert!(matches!(
            RenderConfig::parse("offset=3"),
            Err(ExprError::InvalidConfig(_))
        ));
    }
}
