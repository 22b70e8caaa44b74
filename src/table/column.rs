use std::fmt;

use crate::core::{DataType, ExprError, Result};
use crate::expression::quote::{quote_doubled, quote_identifier};
use crate::json::{IntoPath, JsonPath};

/// Behavior of a path column when the path is missing or the value does
/// not convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    Null,
    Error,
    /// JSON text used as the column value.
    Default(String),
}

impl Fallback {
    pub fn default_json(value: &serde_json::Value) -> Self {
        Self::Default(value.to_string())
    }
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Error => write!(f, "ERROR"),
            Self::Default(json) => write!(f, "DEFAULT {}", quote_doubled(json)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnKind {
    /// Row counter starting at 1.
    Ordinality,
    /// 1 when the path matches, 0 otherwise.
    Exists { data_type: DataType, path: JsonPath },
    Path {
        data_type: DataType,
        path: JsonPath,
        on_empty: Option<Fallback>,
        on_error: Option<Fallback>,
    },
}

/// One validated `JSON_TABLE` output column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    name: String,
    kind: ColumnKind,
}

impl ColumnSpec {
    pub fn builder(name: impl Into<String>) -> ColumnSpecBuilder {
        ColumnSpecBuilder::new(name)
    }

    /// `name FOR ORDINALITY`
    pub fn ordinality(name: impl Into<String>) -> Result<Self> {
        Self::builder(name).for_ordinality().build()
    }

    /// `name INT EXISTS PATH 'path'`
    pub fn exists(name: impl Into<String>, path: impl IntoPath) -> Result<Self> {
        Self::builder(name).exists().path(path).build()
    }

    /// `name TYPE PATH 'path'`
    pub fn path(name: impl Into<String>, data_type: DataType, path: impl IntoPath) -> Result<Self> {
        Self::builder(name).data_type(data_type).path(path).build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ColumnKind {
        &self.kind
    }

    pub fn data_type(&self) -> Option<&DataType> {
        match &self.kind {
            ColumnKind::Ordinality => None,
            ColumnKind::Exists { data_type, .. } | ColumnKind::Path { data_type, .. } => Some(data_type),
        }
    }
}

impl fmt::Display for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = quote_identifier(&self.name);
        match &self.kind {
            ColumnKind::Ordinality => write!(f, "{} FOR ORDINALITY", name),
            ColumnKind::Exists { data_type, path } => {
                write!(f, "{} {} EXISTS PATH {}", name, data_type, path.quoted())
            }
            ColumnKind::Path {
                data_type,
                path,
                on_empty,
                on_error,
            } => {
                write!(f, "{} {} PATH {}", name, data_type, path.quoted())?;
                if let Some(fallback) = on_empty {
                    write!(f, " {} ON EMPTY", fallback)?;
                }
                if let Some(fallback) = on_error {
                    write!(f, " {} ON ERROR", fallback)?;
                }
                Ok(())
            }
        }
    }
}

/// Fluent builder for [`ColumnSpec`]. Problems are reported by `build`.
#[derive(Debug)]
pub struct ColumnSpecBuilder {
    name: String,
    data_type: Option<DataType>,
    path: Option<Result<JsonPath>>,
    exists: bool,
    ordinality: bool,
    on_empty: Option<Fallback>,
    on_error: Option<Fallback>,
}

impl ColumnSpecBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: None,
            path: None,
            exists: false,
            ordinality: false,
            on_empty: None,
            on_error: None,
        }
    }

    pub fn data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    pub fn path(mut self, path: impl IntoPath) -> Self {
        self.path = Some(path.into_path());
        self
    }

    pub fn exists(mut self) -> Self {
        self.exists = true;
        self
    }

    pub fn for_ordinality(mut self) -> Self {
        self.ordinality = true;
        self
    }

    pub fn on_empty(mut self, fallback: Fallback) -> Self {
        self.on_empty = Some(fallback);
        self
    }

    pub fn on_error(mut self, fallback: Fallback) -> Self {
        self.on_error = Some(fallback);
        self
    }

    pub fn build(self) -> Result<ColumnSpec> {
        if self.name.trim().is_empty() {
            return Err(ExprError::IncompleteProjection("column name is empty".into()));
        }
        if self.exists && self.ordinality {
            return Err(ExprError::shape(
                "JSON_TABLE column",
                "either EXISTS or FOR ORDINALITY",
                format!("both on column '{}'", self.name),
            ));
        }
        if (self.exists || self.ordinality) && (self.on_empty.is_some() || self.on_error.is_some()) {
            return Err(ExprError::shape(
                "JSON_TABLE column",
                "ON EMPTY/ON ERROR only on PATH columns",
                format!("fallback on column '{}'", self.name),
            ));
        }

        if self.ordinality {
            if self.path.is_some() || self.data_type.is_some() {
                log::debug!("ordinality column '{}' ignores its path and type", self.name);
            }
            return Ok(ColumnSpec {
                name: self.name,
                kind: ColumnKind::Ordinality,
            });
        }

        let path = match self.path {
            Some(path) => path?,
            None => {
                return Err(ExprError::IncompleteProjection(format!(
                    "column '{}' needs a path",
                    self.name
                )));
            }
        };

        let kind = if self.exists {
            ColumnKind::Exists {
                data_type: self.data_type.unwrap_or(DataType::Integer),
                path,
            }
        } else {
            let data_type = self.data_type.ok_or_else(|| {
                ExprError::IncompleteProjection(format!("column '{}' needs a type", self.name))
            })?;
            ColumnKind::Path {
                data_type,
                path,
                on_empty: self.on_empty,
                on_error: self.on_error,
            }
        };

        Ok(ColumnSpec { name: self.name, kind })
    }
}

/// Entry of a `COLUMNS(...)` list.
#[derive(Debug, Clone, PartialEq)]
pub enum TableColumn {
    Column(ColumnSpec),
    /// `NESTED PATH 'path' COLUMNS(...)`, flattening an inner array.
    Nested { path: JsonPath, columns: Vec<TableColumn> },
}

impl TableColumn {
    pub fn nested<I>(path: impl IntoPath, columns: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<TableColumn>,
    {
        let column = Self::Nested {
            path: path.into_path()?,
            columns: columns.into_iter().map(Into::into).collect(),
        };
        column.check()?;
        Ok(column)
    }

    /// Every nested list needs at least one column.
    pub(crate) fn check(&self) -> Result<()> {
        match self {
            Self::Column(_) => Ok(()),
            Self::Nested { path, columns } if columns.is_empty() => Err(ExprError::IncompleteProjection(
                format!("NESTED PATH {} has no columns", path.quoted()),
            )),
            Self::Nested { columns, .. } => columns.iter().try_for_each(Self::check),
        }
    }

    /// Output column names in `COLUMNS` order, nested ones included.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Column(spec) => vec![spec.name()],
            Self::Nested { columns, .. } => columns.iter().flat_map(Self::names).collect(),
        }
    }
}

impl From<ColumnSpec> for TableColumn {
    fn from(spec: ColumnSpec) -> Self {
        Self::Column(spec)
    }
}

impl fmt::Display for TableColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(spec) => fmt::Display::fmt(spec, f),
            Self::Nested { path, columns } => {
                write!(f, "NESTED PATH {} COLUMNS({})", path.quoted(), column_list(columns))
            }
        }
    }
}

/// Comma-separated `COLUMNS` body.
pub(crate) fn column_list(columns: &[TableColumn]) -> String {
    columns
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
