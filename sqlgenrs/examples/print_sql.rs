use std::{env, fs, path::PathBuf};

use sqlgen::sql_ast::{SelectItem, SelectQuery, TableRef, TableSource};
use sqlgen::{QuerySqlGenerator, SqlExpr, SqlgenConfig};
use tracing_subscriber::EnvFilter;

fn usage() {
    eprintln!("Usage: print_sql <raw_sql_file> <column> [config_toml]");
    eprintln!("Example: RUST_LOG=sqlgen=debug cargo run --example print_sql -- query.sql id sqlgen.toml");
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1).collect::<Vec<_>>();
    if args.len() < 2 {
        usage();
        std::process::exit(1);
    }

    let sql_path = PathBuf::from(args.remove(0));
    let column = args.remove(0);
    let config = match args.first() {
        Some(path) => SqlgenConfig::from_file(path)?,
        None => SqlgenConfig::load_default(),
    };

    let raw_sql = fs::read_to_string(sql_path)?;
    let query = SelectQuery {
        select: vec![SelectItem {
            expr: SqlExpr::column(Some("q"), column),
            alias: None,
        }],
        from: Some(TableRef {
            source: TableSource::RawSql(raw_sql.trim_end().to_string()),
            alias: Some("q".to_string()),
        }),
    };

    let command = QuerySqlGenerator::new(config).generate(&query)?;
    println!("{}", command.command_text);
    Ok(())
}
