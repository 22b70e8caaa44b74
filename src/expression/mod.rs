//! Template substitution engine and the host-expression surface.
//!
//! - `argument.rs` - tagged arguments (nested expression, literal, raw text)
//! - `quote.rs` - literal, path and identifier quoting
//! - `render.rs` - substitution of bound arguments into templates
//! - `composite.rs` - the rendered expression value
//! - `visitor.rs` - `SqlExpression` and visitor traits

pub mod argument;
pub mod composite;
pub mod quote;
pub mod render;
pub mod visitor;

pub use argument::{Argument, Constant};
pub use composite::{CompositeExpression, Fragment, RenderedSql};
pub use render::{BoundTemplate, SPLICE_SEPARATOR, render};
pub use visitor::{ExpressionVisitor, OperationCollector, SqlExpression, bound_values};
