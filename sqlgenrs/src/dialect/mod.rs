//! SQL dialect abstractions.
//!
//! Each dialect is implemented in its own file.

use serde::{Deserialize, Serialize};

/// Dialects render identifiers and primitive expression pieces.
/// Expression tree walking lives in the renderer; the dialect
/// only maps logical constructs to SQL fragments.
pub trait Dialect {
    fn quote_ident(&self, ident: &str) -> String;
    /// Reference to a bound parameter by its declared name.
    fn parameter_ref(&self, name: &str) -> String {
        format!("@{name}")
    }
    fn render_literal(&self, value: &serde_json::Value) -> String {
        match value {
            serde_json::Value::Null => "NULL".to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::String(s) => format!("'{}'", s.replace('\'', "''")),
            // Structured values bind as their JSON text.
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                format!("'{}'", value.to_string().replace('\'', "''"))
            }
        }
    }
}

/// Configurable dialect selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    #[default]
    Ansi,
    SqlServer,
}

pub fn dialect_for(kind: DialectKind) -> Box<dyn Dialect + Send + Sync> {
    match kind {
        DialectKind::Ansi => Box::new(AnsiDialect),
        DialectKind::SqlServer => Box::new(SqlServerDialect),
    }
}

mod ansi;
pub use ansi::AnsiDialect;

mod sqlserver;
pub use sqlserver::SqlServerDialect;
