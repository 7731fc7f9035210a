pub mod composability;
pub mod config;
pub mod dialect;
pub mod error;
pub mod generator;
pub mod sql_ast;

pub use composability::{check_composable_sql, is_composable_sql, KeywordBoundary};
pub use config::SqlgenConfig;
pub use error::{SqlgenError, NON_COMPOSABLE_SQL};
pub use generator::{QuerySqlGenerator, SqlCommand};
pub use sql_ast::{Argument, FunctionCall, FunctionTarget, ResultType, SqlExpr, SqlRenderer};
