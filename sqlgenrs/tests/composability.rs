//! Integration tests for the raw SQL composability check.

use sqlgen::{check_composable_sql, KeywordBoundary, QuerySqlGenerator, SqlgenConfig, SqlgenError};

fn assert_rejected(sql: &str, boundary: KeywordBoundary) {
    let err = check_composable_sql(sql, boundary).expect_err(sql);
    assert!(matches!(err, SqlgenError::NonComposableSql), "{sql:?}");
    assert_eq!(err.to_string(), sqlgen::NON_COMPOSABLE_SQL);
}

#[test]
fn rejects_fragments_not_led_by_select() {
    for sql in [
        "INSERT something",
        "SELECTANDSOMEOTHERSTUFF",
        "SELEC",
        "- bad comment\nSELECT something",
        "",
        "--SELECT",
        "/* unterminated SELECT 1",
        "  \r\n\t",
    ] {
        assert_rejected(sql, KeywordBoundary::Lenient);
    }
}

#[test]
fn accepts_fragments_led_by_select() {
    for sql in [
        "SELECT something",
        "   SELECT something",
        "-- comment\n SELECT something",
        "-- comment1\r\n --\t\rcomment2\r\nSELECT something",
        "SELECT--\n1",
        "  /* comment */ SELECT--\n1",
        "  /* multi\n*line\r\n * comment */ \nSELECT--\n1",
        "SELECT/* comment */1",
        "SELECT",
        "SELECT-\n1",
    ] {
        assert!(
            check_composable_sql(sql, KeywordBoundary::Lenient).is_ok(),
            "{sql:?} should be composable"
        );
    }
}

#[test]
fn strict_boundary_rejects_bare_keyword_and_dash() {
    assert_rejected("SELECT", KeywordBoundary::Strict);
    assert_rejected("SELECT-\n1", KeywordBoundary::Strict);
    assert!(check_composable_sql("SELECT--\n1", KeywordBoundary::Strict).is_ok());
    assert!(check_composable_sql("SELECT/* comment */1", KeywordBoundary::Strict).is_ok());
    assert!(check_composable_sql("   SELECT something", KeywordBoundary::Strict).is_ok());
}

#[test]
fn generator_uses_configured_boundary() {
    let lenient = QuerySqlGenerator::default();
    assert!(lenient.check_composable_sql("SELECT").is_ok());

    let strict = QuerySqlGenerator::new(
        SqlgenConfig::from_toml("[composability]\nkeyword_boundary = \"strict\"\n").unwrap(),
    );
    assert!(strict.check_composable_sql("SELECT").is_err());
}

#[test]
fn verdict_is_stable_across_calls() {
    let sql = "  /* c */ SELECT x FROM t";
    let first = check_composable_sql(sql, KeywordBoundary::Lenient).is_ok();
    let second = check_composable_sql(sql, KeywordBoundary::Lenient).is_ok();
    assert!(first && second);
    assert!(check_composable_sql("SELEC", KeywordBoundary::Lenient).is_err());
    assert!(check_composable_sql("SELEC", KeywordBoundary::Lenient).is_err());
}
