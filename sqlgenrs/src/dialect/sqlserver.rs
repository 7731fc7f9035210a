//! SQL Server dialect: bracketed identifiers.

use super::{AnsiDialect, Dialect};

#[derive(Debug, Default, Clone, Copy)]
pub struct SqlServerDialect;

impl Dialect for SqlServerDialect {
    fn quote_ident(&self, ident: &str) -> String {
        format!("[{}]", ident.replace(']', "]]"))
    }

    fn render_literal(&self, value: &serde_json::Value) -> String {
        match value {
            serde_json::Value::Bool(true) => "CAST(1 AS bit)".to_string(),
            serde_json::Value::Bool(false) => "CAST(0 AS bit)".to_string(),
            serde_json::Value::String(s) => format!("N'{}'", s.replace('\'', "''")),
            other => AnsiDialect.render_literal(other),
        }
    }
}
