//! Turns select trees into command text plus the parameters they reference.

use crate::composability::check_composable_sql;
use crate::config::SqlgenConfig;
use crate::dialect::{dialect_for, Dialect};
use crate::error::Result;
use crate::sql_ast::{SelectQuery, SqlRenderer};

/// Rendered statement ready to hand to a driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlCommand {
    pub command_text: String,
    /// Referenced parameter names, in order of first appearance.
    pub parameter_names: Vec<String>,
}

pub struct QuerySqlGenerator {
    dialect: Box<dyn Dialect + Send + Sync>,
    config: SqlgenConfig,
}

impl Default for QuerySqlGenerator {
    fn default() -> Self {
        Self::new(SqlgenConfig::default())
    }
}

impl QuerySqlGenerator {
    pub fn new(config: SqlgenConfig) -> Self {
        Self {
            dialect: dialect_for(config.rendering.dialect),
            config,
        }
    }

    /// Use a dialect not covered by [`crate::dialect::DialectKind`].
    pub fn with_dialect(dialect: Box<dyn Dialect + Send + Sync>, config: SqlgenConfig) -> Self {
        Self { dialect, config }
    }

    pub fn config(&self) -> &SqlgenConfig {
        &self.config
    }

    pub fn check_composable_sql(&self, sql: &str) -> Result<()> {
        check_composable_sql(sql, self.config.composability.keyword_boundary)
    }

    pub fn generate(&self, query: &SelectQuery) -> Result<SqlCommand> {
        let renderer = SqlRenderer::new(&*self.dialect)
            .with_keyword_boundary(self.config.composability.keyword_boundary);
        let command_text = renderer.render_select(query)?;
        let parameter_names = query
            .parameter_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        tracing::trace!(sql = %command_text, "generated SQL command");
        Ok(SqlCommand {
            command_text,
            parameter_names,
        })
    }
}
