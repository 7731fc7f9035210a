//! ANSI dialect: double-quoted identifiers, `@name` parameters.

use super::Dialect;

#[derive(Debug, Default, Clone, Copy)]
pub struct AnsiDialect;

impl Dialect for AnsiDialect {
    fn quote_ident(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }
}
