//! Lexical check deciding whether a raw SQL fragment may be wrapped as a subquery.
//!
//! Only the leading token matters: whitespace and comments are skipped, and the
//! first real token must be the word `SELECT`. Nothing after it is inspected.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SqlgenError};

const SELECT: &str = "SELECT";

/// What may follow the `SELECT` keyword for it to count as a whole word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordBoundary {
    /// End of input, whitespace, or any character that cannot continue an identifier.
    #[default]
    Lenient,
    /// Whitespace or a comment opener only; a bare `SELECT` at end of input is rejected.
    Strict,
}

/// Terminal outcome of skipping leading trivia.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leading {
    /// Byte offset of the first real token.
    Token(usize),
    /// Input ran out while skipping whitespace or a line comment.
    Exhausted,
    /// A `/*` with no closing `*/`.
    UnterminatedComment,
}

#[derive(Debug, Clone, Copy)]
enum ScanState {
    Trivia,
    LineComment,
    BlockComment,
}

/// Fail with [`SqlgenError::NonComposableSql`] unless `sql` starts with a bare `SELECT`.
pub fn check_composable_sql(sql: &str, boundary: KeywordBoundary) -> Result<()> {
    let leading = skip_leading_trivia(sql);
    let composable = match leading {
        Leading::Token(offset) => starts_with_select(&sql[offset..], boundary),
        Leading::Exhausted | Leading::UnterminatedComment => false,
    };
    if composable {
        Ok(())
    } else {
        tracing::debug!(
            len = sql.len(),
            leading = ?leading,
            ?boundary,
            "rejected non-composable raw SQL"
        );
        Err(SqlgenError::NonComposableSql)
    }
}

/// Convenience predicate over [`check_composable_sql`].
pub fn is_composable_sql(sql: &str, boundary: KeywordBoundary) -> bool {
    check_composable_sql(sql, boundary).is_ok()
}

fn skip_leading_trivia(sql: &str) -> Leading {
    let mut pos = 0;
    let mut state = ScanState::Trivia;
    loop {
        let rest = &sql[pos..];
        state = match state {
            ScanState::Trivia => {
                let trimmed = rest.trim_start();
                pos += rest.len() - trimmed.len();
                if trimmed.starts_with("--") {
                    pos += 2;
                    ScanState::LineComment
                } else if trimmed.starts_with("/*") {
                    pos += 2;
                    ScanState::BlockComment
                } else if trimmed.is_empty() {
                    return Leading::Exhausted;
                } else {
                    return Leading::Token(pos);
                }
            }
            ScanState::LineComment => match rest.find('\n') {
                Some(end) => {
                    pos += end + 1;
                    ScanState::Trivia
                }
                None => return Leading::Exhausted,
            },
            ScanState::BlockComment => match rest.find("*/") {
                Some(end) => {
                    pos += end + 2;
                    ScanState::Trivia
                }
                None => return Leading::UnterminatedComment,
            },
        };
    }
}

fn starts_with_select(token: &str, boundary: KeywordBoundary) -> bool {
    let Some(rest) = token.strip_prefix(SELECT) else {
        return false;
    };
    match boundary {
        KeywordBoundary::Lenient => rest.chars().next().map_or(true, |c| !is_ident_char(c)),
        KeywordBoundary::Strict => {
            rest.chars().next().is_some_and(char::is_whitespace)
                || rest.starts_with("--")
                || rest.starts_with("/*")
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
