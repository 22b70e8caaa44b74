use crate::catalog::{Operation, ResultKind};
use crate::config::RenderConfig;
use crate::core::Value;
use crate::expression::composite::{CompositeExpression, RenderedSql};

/// Visits composite expressions in pre-order.
pub trait ExpressionVisitor {
    fn visit(&mut self, expr: &CompositeExpression);
}

impl<F> ExpressionVisitor for F
where
    F: FnMut(&CompositeExpression),
{
    fn visit(&mut self, expr: &CompositeExpression) {
        self(expr)
    }
}

/// Anything that can stand in a query position: a composite expression or
/// one of the typed wrappers around it.
pub trait SqlExpression {
    fn composite(&self) -> &CompositeExpression;

    fn to_sql(&self) -> &str {
        self.composite().to_sql()
    }

    fn result_kind(&self) -> ResultKind {
        self.composite().kind()
    }

    fn accept(&self, visitor: &mut dyn ExpressionVisitor) {
        self.composite().accept(visitor)
    }

    fn render_with(&self, config: &RenderConfig) -> RenderedSql {
        self.composite().render_with(config)
    }
}

impl SqlExpression for CompositeExpression {
    fn composite(&self) -> &CompositeExpression {
        self
    }
}

/// Collects the catalog operations used by an expression tree.
#[derive(Debug, Default)]
pub struct OperationCollector {
    pub operations: Vec<Operation>,
}

impl OperationCollector {
    pub fn collect(expr: &dyn SqlExpression) -> Vec<Operation> {
        let mut collector = Self::default();
        expr.accept(&mut collector);
        collector.operations
    }
}

impl ExpressionVisitor for OperationCollector {
    fn visit(&mut self, expr: &CompositeExpression) {
        if let Some(operation) = expr.operation() {
            self.operations.push(operation);
        }
    }
}

/// Collects the literal values an expression would bind, outermost first.
pub fn bound_values(expr: &dyn SqlExpression) -> Vec<Value> {
    expr.composite().literals().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Call;

    #[test]
    fn test_pre_order_walk() {
        let inner = Call::new(Operation::JsonArray).arg(1i64).arg(2i64).build().unwrap();
        let outer = Call::new(Operation::JsonLength).arg(inner).build().unwrap();

        assert_eq!(
            OperationCollector::collect(&outer),
            vec![Operation::JsonLength, Operation::JsonArray]
        );

        let mut seen = Vec::new();
        outer.accept(&mut |expr: &CompositeExpression| seen.push(expr.to_sql().to_string()));
        assert_eq!(seen, vec!["JSON_LENGTH(JSON_ARRAY(1, 2))", "JSON_ARRAY(1, 2)"]);
    }

    #[test]
    fn test_bound_values() {
        let expr = Call::new(Operation::JsonObject).arg("a").arg(1i64).build().unwrap();
        assert_eq!(bound_values(&expr), vec![Value::Text("a".into()), Value::Integer(1)]);
    }
}
