use lazy_static::lazy_static;

use super::column::{column_list, ColumnSpec, TableColumn};
use crate::catalog::template::FixedTemplate;
use crate::catalog::{Call, Operation, ResultKind};
use crate::core::{ExprError, Result, Value};
use crate::expression::quote::quote_identifier;
use crate::expression::{Argument, CompositeExpression, Fragment, SqlExpression};
use crate::json::{expression_wrapper, IntoPath, JsonPath};

expression_wrapper!(
    /// A rendered `JSON_TABLE(...)` table factor, usable in a `FROM` clause.
    JsonTable
);

lazy_static! {
    static ref ALIASED: FixedTemplate<2> = FixedTemplate::new("{0} AS {1}");
}

/// Accumulates the parts of a `JSON_TABLE` projection.
///
/// Column specs are validated when they are created; the builder itself
/// only checks for missing pieces in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct TableProjectionBuilder {
    source: Option<Argument>,
    path: Option<Result<JsonPath>>,
    columns: Vec<Result<TableColumn>>,
    alias: Option<String>,
}

impl TableProjectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The JSON document the rows come from.
    pub fn source(mut self, source: impl Into<Argument>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Row path, evaluated against the source; usually ends in `[*]`.
    pub fn path(mut self, path: impl IntoPath) -> Self {
        self.path = Some(path.into_path());
        self
    }

    pub fn column(mut self, column: ColumnSpec) -> Self {
        self.columns.push(Ok(TableColumn::Column(column)));
        self
    }

    pub fn columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TableColumn>,
    {
        self.columns.extend(columns.into_iter().map(|column| Ok(column.into())));
        self
    }

    /// Adds a `NESTED PATH ... COLUMNS(...)` group.
    pub fn nested<I>(mut self, path: impl IntoPath, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TableColumn>,
    {
        let nested = path.into_path().map(|path| TableColumn::Nested {
            path,
            columns: columns.into_iter().map(Into::into).collect(),
        });
        self.columns.push(nested);
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn build(self) -> Result<TableProjection> {
        let source = self
            .source
            .ok_or_else(|| ExprError::IncompleteProjection("no source document".into()))?;
        let path = self
            .path
            .ok_or_else(|| ExprError::IncompleteProjection("no row path".into()))??;
        let columns = self.columns.into_iter().collect::<Result<Vec<_>>>()?;
        if columns.is_empty() {
            return Err(ExprError::IncompleteProjection("no columns".into()));
        }
        for column in &columns {
            column.check()?;
        }
        if self.alias.as_deref().is_some_and(|alias| alias.trim().is_empty()) {
            return Err(ExprError::IncompleteProjection("alias is empty".into()));
        }

        let call = Call::new(Operation::JsonTable)
            .arg(source)
            .arg(&path)
            .arg(Argument::raw(column_list(&columns)))
            .build()?;
        let expression = match &self.alias {
            Some(alias) => ALIASED.apply(
                [Argument::from(call), Argument::raw(quote_identifier(alias))],
                ResultKind::Table,
            ),
            None => call,
        };
        log::trace!("built JSON_TABLE projection with {} column entries", columns.len());

        Ok(TableProjection {
            path,
            columns,
            alias: self.alias,
            expression: JsonTable::wrap(expression),
        })
    }
}

/// A complete, rendered `JSON_TABLE` projection.
#[derive(Debug, Clone, PartialEq)]
pub struct TableProjection {
    path: JsonPath,
    columns: Vec<TableColumn>,
    alias: Option<String>,
    expression: JsonTable,
}

impl TableProjection {
    pub fn builder() -> TableProjectionBuilder {
        TableProjectionBuilder::new()
    }

    pub fn path(&self) -> &JsonPath {
        &self.path
    }

    pub fn columns(&self) -> &[TableColumn] {
        &self.columns
    }

    /// Output column names, nested groups flattened in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().flat_map(TableColumn::names).collect()
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn expression(&self) -> &JsonTable {
        &self.expression
    }

    pub fn into_expression(self) -> JsonTable {
        self.expression
    }

    /// SQL text for logs and error messages, with literals of the source
    /// inlined using plain quote doubling.
    ///
    /// The result is **not** meant for execution; use
    /// [`SqlExpression::to_sql`] or a bind-mode render instead.
    pub fn to_debug_sql(&self) -> String {
        self.expression
            .composite()
            .fragments()
            .iter()
            .map(|fragment| match fragment {
                Fragment::Sql(sql) => sql.clone(),
                Fragment::Literal(value) => format_value_for_debug(value),
            })
            .collect()
    }
}

impl SqlExpression for TableProjection {
    fn composite(&self) -> &CompositeExpression {
        self.expression.composite()
    }
}

impl From<TableProjection> for JsonTable {
    fn from(projection: TableProjection) -> Self {
        projection.expression
    }
}

fn format_value_for_debug(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Text(s) => format!("'{}'", s.replace('\'', "''")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DataType;
    use crate::json::{column, json_literal, JsonOperand};
    use crate::table::Fallback;
    use serde_json::json;

    fn people() -> TableProjectionBuilder {
        TableProjection::builder()
            .source(column("doc"))
            .path("$.people[*]")
            .column(ColumnSpec::ordinality("id").unwrap())
            .column(ColumnSpec::path("name", DataType::varchar(40), "$.name").unwrap())
    }

    #[test]
    fn test_render() {
        let projection = people().build().unwrap();
        assert_eq!(
            projection.to_sql(),
            "JSON_TABLE(`doc`, '$.people[*]' COLUMNS(`id` FOR ORDINALITY, `name` VARCHAR(40) PATH '$.name'))"
        );
        assert_eq!(projection.result_kind(), ResultKind::Table);
        assert_eq!(projection.expression().composite().operation(), Some(Operation::JsonTable));
    }

    #[test]
    fn test_alias() {
        let projection = people().alias("p").build().unwrap();
        assert!(projection.to_sql().ends_with(")) AS `p`"));
        assert_eq!(projection.alias(), Some("p"));
        assert!(people().alias(" ").build().is_err());
    }

    #[test]
    fn test_missing_pieces() {
        let no_source = TableProjection::builder()
            .path("$[*]")
            .column(ColumnSpec::ordinality("n").unwrap())
            .build();
        assert!(matches!(no_source, Err(ExprError::IncompleteProjection(_))));

        let no_path = TableProjection::builder()
            .source(column("doc"))
            .column(ColumnSpec::ordinality("n").unwrap())
            .build();
        assert!(matches!(no_path, Err(ExprError::IncompleteProjection(_))));

        let no_columns = TableProjection::builder().source(column("doc")).path("$[*]").build();
        assert!(matches!(no_columns, Err(ExprError::IncompleteProjection(_))));

        let bad_path = TableProjection::builder()
            .source(column("doc"))
            .path("people")
            .column(ColumnSpec::ordinality("n").unwrap())
            .build();
        assert!(matches!(bad_path, Err(ExprError::InvalidPath(..))));
    }

    #[test]
    fn test_nested_and_fallbacks() {
        let projection = column("orders")
            .table("$[*]")
            .unwrap()
            .column(
                ColumnSpec::builder("status")
                    .data_type(DataType::varchar(10))
                    .path("$.status")
                    .on_empty(Fallback::default_json(&json!("new")))
                    .build()
                    .unwrap(),
            )
            .nested("$.lines[*]", [ColumnSpec::exists("has_sku", "$.sku").unwrap()])
            .build()
            .unwrap();
        assert_eq!(
            projection.to_sql(),
            "JSON_TABLE(`orders`, '$[*]' COLUMNS(`status` VARCHAR(10) PATH '$.status' DEFAULT '\"new\"' ON EMPTY, \
             NESTED PATH '$.lines[*]' COLUMNS(`has_sku` INT EXISTS PATH '$.sku')))"
        );
        assert_eq!(projection.column_names(), vec!["status", "has_sku"]);
    }

    #[test]
    fn test_nested_path_forms() {
        let tag = || [ColumnSpec::path("tag", DataType::Text, "$").unwrap()];
        let built = people()
            .nested(JsonPath::root().member("tags").any_index(), tag())
            .build()
            .unwrap();
        let parsed = people().nested("$.tags[*]", tag()).build().unwrap();
        assert_eq!(built.to_sql(), parsed.to_sql());

        let bad = people().nested("tags", tag()).build();
        assert!(matches!(bad, Err(ExprError::InvalidPath(..))));
    }

    #[test]
    fn test_debug_sql_doubles_quotes() {
        let projection = TableProjection::builder()
            .source(json_literal(&json!({"who": "O'Neil"})))
            .path("$")
            .column(ColumnSpec::path("who", DataType::Text, "$.who").unwrap())
            .build()
            .unwrap();
        assert!(projection.to_sql().starts_with(r#"JSON_TABLE(CAST('{"who":"O\'Neil"}' AS JSON)"#));
        assert!(projection.to_debug_sql().starts_with(r#"JSON_TABLE(CAST('{"who":"O''Neil"}' AS JSON)"#));
    }
}
