use std::fmt;
use std::str::FromStr;

use regex::Regex;

use super::{ExprError, Result};

lazy_static::lazy_static! {
    static ref TYPE_PATTERN: Regex =
        Regex::new(r"^\s*([A-Za-z]+)\s*(?:\(\s*(\d+)\s*(?:,\s*(\d+)\s*)?\))?\s*$").unwrap();
}

/// Declared scalar type of a `JSON_TABLE` column or a `JSON_VALUE ... RETURNING` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Integer,
    BigInt,
    Signed,
    Unsigned,
    Decimal { precision: u32, scale: u32 },
    Float,
    Double,
    Char(Option<u32>),
    Varchar(u32),
    Text,
    Date,
    DateTime,
    Time,
    Year,
    Boolean,
    Json,
}

impl DataType {
    pub fn decimal(precision: u32, scale: u32) -> Self {
        Self::Decimal { precision, scale }
    }

    pub fn varchar(length: u32) -> Self {
        Self::Varchar(length)
    }

    /// Whether the type is accepted by `JSON_VALUE ... RETURNING`.
    pub fn is_returnable(&self) -> bool {
        matches!(
            self,
            Self::Signed
                | Self::Unsigned
                | Self::Decimal { .. }
                | Self::Float
                | Self::Double
                | Self::Char(_)
                | Self::Date
                | Self::DateTime
                | Self::Time
                | Self::Year
                | Self::Json
        )
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "INT"),
            Self::BigInt => write!(f, "BIGINT"),
            Self::Signed => write!(f, "SIGNED"),
            Self::Unsigned => write!(f, "UNSIGNED"),
            Self::Decimal { precision, scale } => write!(f, "DECIMAL({}, {})", precision, scale),
            Self::Float => write!(f, "FLOAT"),
            Self::Double => write!(f, "DOUBLE"),
            Self::Char(None) => write!(f, "CHAR"),
            Self::Char(Some(len)) => write!(f, "CHAR({})", len),
            Self::Varchar(len) => write!(f, "VARCHAR({})", len),
            Self::Text => write!(f, "TEXT"),
            Self::Date => write!(f, "DATE"),
            Self::DateTime => write!(f, "DATETIME"),
            Self::Time => write!(f, "TIME"),
            Self::Year => write!(f, "YEAR"),
            Self::Boolean => write!(f, "BOOLEAN"),
            Self::Json => write!(f, "JSON"),
        }
    }
}

impl FromStr for DataType {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ExprError::shape("data type", "a MySQL scalar type name", s);

        let caps = TYPE_PATTERN.captures(s).ok_or_else(invalid)?;
        let name = caps[1].to_ascii_uppercase();
        let first = caps.get(2).map(|m| m.as_str().parse::<u32>()).transpose().map_err(|_| invalid())?;
        let second = caps.get(3).map(|m| m.as_str().parse::<u32>()).transpose().map_err(|_| invalid())?;

        let data_type = match (name.as_str(), first, second) {
            ("INT" | "INTEGER", None, None) => Self::Integer,
            ("BIGINT", None, None) => Self::BigInt,
            ("SIGNED", None, None) => Self::Signed,
            ("UNSIGNED", None, None) => Self::Unsigned,
            ("DECIMAL" | "NUMERIC", p, s) => Self::Decimal {
                precision: p.unwrap_or(10),
                scale: s.unwrap_or(0),
            },
            ("FLOAT", None, None) => Self::Float,
            ("DOUBLE", None, None) => Self::Double,
            ("CHAR", len, None) => Self::Char(len),
            ("VARCHAR", Some(len), None) => Self::Varchar(len),
            ("TEXT", None, None) => Self::Text,
            ("DATE", None, None) => Self::Date,
            ("DATETIME", None, None) => Self::DateTime,
            ("TIME", None, None) => Self::Time,
            ("YEAR", None, None) => Self::Year,
            ("BOOL" | "BOOLEAN", None, None) => Self::Boolean,
            ("JSON", None, None) => Self::Json,
            _ => return Err(invalid()),
        };
        Ok(data_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(DataType::Integer.to_string(), "INT");
        assert_eq!(DataType::decimal(10, 2).to_string(), "DECIMAL(10, 2)");
        assert_eq!(DataType::varchar(64).to_string(), "VARCHAR(64)");
        assert_eq!(DataType::Char(None).to_string(), "CHAR");
    }

    #[test]
    fn test_parse() {
        assert_eq!("int".parse::<DataType>().unwrap(), DataType::Integer);
        assert_eq!("VARCHAR(100)".parse::<DataType>().unwrap(), DataType::Varchar(100));
        assert_eq!("decimal(8,3)".parse::<DataType>().unwrap(), DataType::decimal(8, 3));
        assert_eq!(" json ".parse::<DataType>().unwrap(), DataType::Json);
        assert!("VARCHAR".parse::<DataType>().is_err());
        assert!("BLOB".parse::<DataType>().is_err());
        assert!("INT(".parse::<DataType>().is_err());
    }

    #[test]
    fn test_returnable() {
        assert!(DataType::Json.is_returnable());
        assert!(DataType::decimal(5, 2).is_returnable());
        assert!(!DataType::Varchar(10).is_returnable());
        assert!(!DataType::Integer.is_returnable());
    }
}
