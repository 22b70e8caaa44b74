use sqlparser::ast as sql_ast;
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;

use crate::core::{ExprError, Result};
use crate::expression::SqlExpression;
use crate::table::TableProjection;

/// Checks rendered text against the MySQL grammar of `sqlparser`.
///
/// This is a diagnostic: it proves the text is well-formed, not that the
/// server accepts every function in it.
pub struct SqlParserAdapter {
    dialect: MySqlDialect,
}

impl SqlParserAdapter {
    pub fn new() -> Self {
        Self {
            dialect: MySqlDialect {},
        }
    }

    /// Parses `sql` as a single scalar expression.
    pub fn parse_expression(&self, sql: &str) -> Result<sql_ast::Expr> {
        let query = self.parse_single_query(&format!("SELECT {}", sql))?;
        let sql_ast::SetExpr::Select(select) = *query.body else {
            return Err(ExprError::SyntaxError(format!("not an expression: {}", sql)));
        };
        let mut projection = select.projection.into_iter();
        match (projection.next(), projection.next()) {
            (Some(sql_ast::SelectItem::UnnamedExpr(expr)), None) => Ok(expr),
            _ => Err(ExprError::SyntaxError(format!("not a single expression: {}", sql))),
        }
    }

    pub fn check_expression(&self, sql: &str) -> Result<()> {
        self.parse_expression(sql).map(|_| ())
    }

    pub fn check(&self, expr: &dyn SqlExpression) -> Result<()> {
        self.check_expression(expr.to_sql())
    }

    /// Parses the projection as the only table factor of a `SELECT *`.
    pub fn check_table(&self, projection: &TableProjection) -> Result<()> {
        self.parse_single_query(&format!("SELECT * FROM {}", projection.to_sql()))
            .map(|_| ())
    }

    fn parse_single_query(&self, sql: &str) -> Result<sql_ast::Query> {
        let mut statements = Parser::parse_sql(&self.dialect, sql)
            .map_err(|e| ExprError::SyntaxError(e.to_string()))?;
        if statements.len() != 1 {
            return Err(ExprError::SyntaxError(format!(
                "expected one statement, found {}",
                statements.len()
            )));
        }
        match statements.remove(0) {
            sql_ast::Statement::Query(query) => Ok(*query),
            other => Err(ExprError::SyntaxError(format!("not a query: {}", other))),
        }
    }
}

impl Default for SqlParserAdapter {
    fn default() -> Self {
        Self::new()
    }
}
