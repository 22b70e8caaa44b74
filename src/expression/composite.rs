use std::fmt;

use crate::catalog::{Operation, ResultKind};
use crate::config::{LiteralMode, RenderConfig};
use crate::core::Value;
use crate::expression::quote::quote_literal;
use crate::expression::visitor::ExpressionVisitor;

/// Piece of rendered text. Literals stay separate so they can be bound as
/// parameters instead of being quoted inline.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Sql(String),
    Literal(Value),
}

/// Query text together with the parameters it binds.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSql {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Rendered, immutable query fragment produced by the substitution engine.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeExpression {
    operation: Option<Operation>,
    kind: ResultKind,
    text: String,
    fragments: Vec<Fragment>,
    nested: Vec<CompositeExpression>,
}

impl CompositeExpression {
    pub(crate) fn from_parts(
        operation: Option<Operation>,
        kind: ResultKind,
        fragments: Vec<Fragment>,
        nested: Vec<CompositeExpression>,
    ) -> Self {
        let text = fragments
            .iter()
            .map(|fragment| match fragment {
                Fragment::Sql(sql) => sql.clone(),
                Fragment::Literal(value) => quote_literal(value),
            })
            .collect();
        Self {
            operation,
            kind,
            text,
            fragments,
            nested,
        }
    }

    /// Wraps trusted SQL text, such as a column reference, as an expression.
    pub fn raw(sql: impl Into<String>, kind: ResultKind) -> Self {
        Self::from_parts(None, kind, vec![Fragment::Sql(sql.into())], Vec::new())
    }

    /// A single literal, quoted inline or bound depending on the render mode.
    pub fn constant(value: impl Into<Value>, kind: ResultKind) -> Self {
        Self::from_parts(None, kind, vec![Fragment::Literal(value.into())], Vec::new())
    }

    /// The fully substituted text with literals quoted inline.
    pub fn to_sql(&self) -> &str {
        &self.text
    }

    pub fn operation(&self) -> Option<Operation> {
        self.operation
    }

    pub fn kind(&self) -> ResultKind {
        self.kind
    }

    /// Same expression, declared with a different result kind.
    pub fn with_kind(mut self, kind: ResultKind) -> Self {
        self.kind = kind;
        self
    }

    /// Composite arguments this expression closed over, in argument order.
    pub fn nested(&self) -> &[CompositeExpression] {
        &self.nested
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Literal values in text order.
    pub fn literals(&self) -> impl Iterator<Item = &Value> {
        self.fragments.iter().filter_map(|fragment| match fragment {
            Fragment::Literal(value) => Some(value),
            Fragment::Sql(_) => None,
        })
    }

    pub fn render_with(&self, config: &RenderConfig) -> RenderedSql {
        match config.literal_mode {
            LiteralMode::Inline => RenderedSql {
                sql: self.text.clone(),
                params: Vec::new(),
            },
            LiteralMode::Bind => {
                let mut sql = String::with_capacity(self.text.len());
                let mut params = Vec::new();
                for fragment in &self.fragments {
                    match fragment {
                        Fragment::Sql(text) => sql.push_str(text),
                        Fragment::Literal(value) => {
                            params.push(value.clone());
                            sql.push_str(&config.placeholder(params.len()));
                        }
                    }
                }
                RenderedSql { sql, params }
            }
        }
    }

    /// Pre-order walk over this expression and every nested composite.
    pub fn accept(&self, visitor: &mut dyn ExpressionVisitor) {
        visitor.visit(self);
        for nested in &self.nested {
            nested.accept(visitor);
        }
    }
}

impl fmt::Display for CompositeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParameterStyle;

    fn sample() -> CompositeExpression {
        CompositeExpression::from_parts(
            Some(Operation::JsonObject),
            ResultKind::Json,
            vec![
                Fragment::Sql("JSON_OBJECT(".into()),
                Fragment::Literal(Value::Text("role".into())),
                Fragment::Sql(", ".into()),
                Fragment::Literal(Value::Integer(3)),
                Fragment::Sql(")".into()),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn test_inline_text() {
        let expr = sample();
        assert_eq!(expr.to_sql(), "JSON_OBJECT('role', 3)");
        assert_eq!(expr.to_string(), expr.to_sql());
        assert_eq!(expr.literals().count(), 2);
    }

    #[test]
    fn test_bind_question_marks() {
        let rendered = sample().render_with(&RenderConfig::new().bind_literals());
        assert_eq!(rendered.sql, "JSON_OBJECT(?, ?)");
        assert_eq!(rendered.params, vec![Value::Text("role".into()), Value::Integer(3)]);
    }

    #[test]
    fn test_bind_numbered_with_offset() {
        let config = RenderConfig::new()
            .bind_literals()
            .parameter_style(ParameterStyle::Dollar)
            .parameter_offset(2);
        let rendered = sample().render_with(&config);
        assert_eq!(rendered.sql, "JSON_OBJECT($3, $4)");
    }

    #[test]
    fn test_raw_and_constant() {
        assert_eq!(CompositeExpression::raw("t.doc", ResultKind::Json).to_sql(), "t.doc");
        let constant = CompositeExpression::constant("x", ResultKind::Text);
        assert_eq!(constant.to_sql(), "'x'");
        let bound = constant.render_with(&RenderConfig::new().bind_literals());
        assert_eq!(bound.sql, "?");
    }
}
