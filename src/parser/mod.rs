//! Syntax checks for rendered SQL, backed by `sqlparser`.

mod adapter;

pub use adapter::SqlParserAdapter;
