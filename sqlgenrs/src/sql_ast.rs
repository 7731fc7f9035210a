use serde_json::Value;

use crate::composability::{check_composable_sql, KeywordBoundary};
use crate::dialect::Dialect;
use crate::error::Result;

/// Store-agnostic type tag carried by expressions for downstream type checks.
/// Rendering never looks at it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultType {
    #[default]
    Unknown,
    Bool,
    Int,
    BigInt,
    Decimal,
    Double,
    String,
    Date,
    DateTime,
    Binary,
    Custom(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SqlExpr {
    Column {
        table: Option<String>,
        name: String,
    },
    Literal(Value),
    Parameter {
        name: String,
        result_type: ResultType,
    },
    Function(Box<FunctionCall>),
}

impl SqlExpr {
    pub fn parameter(name: impl Into<String>, result_type: ResultType) -> Self {
        SqlExpr::Parameter {
            name: name.into(),
            result_type,
        }
    }

    pub fn column(table: Option<&str>, name: impl Into<String>) -> Self {
        SqlExpr::Column {
            table: table.map(str::to_string),
            name: name.into(),
        }
    }

    pub fn function(call: FunctionCall) -> Self {
        SqlExpr::Function(Box::new(call))
    }

    /// Declared parameter names in order of first appearance.
    pub fn collect_parameters<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            SqlExpr::Parameter { name, .. } => {
                if !out.contains(&name.as_str()) {
                    out.push(name);
                }
            }
            SqlExpr::Function(call) if call.niladic => {}
            SqlExpr::Function(call) => {
                for arg in &call.arguments {
                    arg.expr.collect_parameters(out);
                }
            }
            SqlExpr::Column { .. } | SqlExpr::Literal(_) => {}
        }
    }
}

/// Where a function lives. The set of shapes is closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionTarget {
    Name {
        name: String,
    },
    Schema {
        schema: String,
        name: String,
    },
    Package {
        package: String,
        name: String,
    },
    SchemaPackage {
        schema: String,
        package: String,
        name: String,
    },
}

impl FunctionTarget {
    /// Build a target from optional qualifiers.
    ///
    /// # Panics
    /// If `name` is empty, or a qualifier is present but empty.
    pub fn new(schema: Option<&str>, package: Option<&str>, name: &str) -> Self {
        assert!(!name.is_empty(), "function target requires a function name");
        assert!(
            schema.map_or(true, |s| !s.is_empty()),
            "schema qualifier of {name} is empty"
        );
        assert!(
            package.map_or(true, |p| !p.is_empty()),
            "package qualifier of {name} is empty"
        );
        let name = name.to_string();
        match (schema, package) {
            (None, None) => FunctionTarget::Name { name },
            (Some(schema), None) => FunctionTarget::Schema {
                schema: schema.to_string(),
                name,
            },
            (None, Some(package)) => FunctionTarget::Package {
                package: package.to_string(),
                name,
            },
            (Some(schema), Some(package)) => FunctionTarget::SchemaPackage {
                schema: schema.to_string(),
                package: package.to_string(),
                name,
            },
        }
    }

    pub fn schema(&self) -> Option<&str> {
        match self {
            FunctionTarget::Schema { schema, .. } | FunctionTarget::SchemaPackage { schema, .. } => {
                Some(schema.as_str())
            }
            FunctionTarget::Name { .. } | FunctionTarget::Package { .. } => None,
        }
    }

    pub fn package(&self) -> Option<&str> {
        match self {
            FunctionTarget::Package { package, .. }
            | FunctionTarget::SchemaPackage { package, .. } => Some(package.as_str()),
            FunctionTarget::Name { .. } | FunctionTarget::Schema { .. } => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FunctionTarget::Name { name }
            | FunctionTarget::Schema { name, .. }
            | FunctionTarget::Package { name, .. }
            | FunctionTarget::SchemaPackage { name, .. } => name.as_str(),
        }
    }

    /// Qualifier segments followed by the function name.
    pub fn segments(&self) -> Vec<&str> {
        self.schema()
            .into_iter()
            .chain(self.package())
            .chain(std::iter::once(self.name()))
            .collect()
    }
}

/// A function argument. Named arguments must be parameters and render by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub expr: SqlExpr,
    pub named: bool,
}

impl Argument {
    pub fn positional(expr: SqlExpr) -> Self {
        Self { expr, named: false }
    }

    pub fn named(expr: SqlExpr) -> Self {
        Self { expr, named: true }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub target: FunctionTarget,
    pub arguments: Vec<Argument>,
    /// Render without a parameter list, even when arguments were supplied.
    pub niladic: bool,
    pub result_type: ResultType,
}

impl FunctionCall {
    pub fn new(target: FunctionTarget, arguments: Vec<Argument>, result_type: ResultType) -> Self {
        Self {
            target,
            arguments,
            niladic: false,
            result_type,
        }
    }

    pub fn niladic(target: FunctionTarget, result_type: ResultType) -> Self {
        Self {
            target,
            arguments: Vec::new(),
            niladic: true,
            result_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    pub expr: SqlExpr,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableSource {
    Table {
        schema: Option<String>,
        name: String,
    },
    /// Caller-supplied SQL spliced in as a subquery; must pass the composability check.
    RawSql(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRef {
    pub source: TableSource,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectQuery {
    pub select: Vec<SelectItem>,
    pub from: Option<TableRef>,
}

impl SelectQuery {
    /// A bare projection of a single expression, e.g. `SELECT "dbo"."f"()`.
    pub fn projection(expr: SqlExpr) -> Self {
        Self {
            select: vec![SelectItem { expr, alias: None }],
            from: None,
        }
    }

    pub fn parameter_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for item in &self.select {
            item.expr.collect_parameters(&mut names);
        }
        names
    }
}

pub struct SqlRenderer<'d> {
    dialect: &'d dyn Dialect,
    keyword_boundary: KeywordBoundary,
}

impl<'d> SqlRenderer<'d> {
    pub fn new(dialect: &'d dyn Dialect) -> Self {
        Self {
            dialect,
            keyword_boundary: KeywordBoundary::default(),
        }
    }

    pub fn with_keyword_boundary(mut self, boundary: KeywordBoundary) -> Self {
        self.keyword_boundary = boundary;
        self
    }

    /// Render a full statement. Fails if a raw SQL source is not composable.
    pub fn render_select(&self, query: &SelectQuery) -> Result<String> {
        let select_items: Vec<String> = query
            .select
            .iter()
            .map(|item| {
                let expr_sql = self.render_expr(&item.expr);
                match &item.alias {
                    Some(alias) => format!("{expr_sql} AS {}", self.dialect.quote_ident(alias)),
                    None => expr_sql,
                }
            })
            .collect();

        let mut sql = format!("SELECT {}", select_items.join(", "));
        if let Some(from) = &query.from {
            sql.push_str(&format!(" FROM {}", self.render_table_ref(from)?));
        }
        Ok(sql)
    }

    fn render_table_ref(&self, table: &TableRef) -> Result<String> {
        let source = match &table.source {
            TableSource::Table { schema, name } => match schema {
                Some(s) => format!(
                    "{}.{}",
                    self.dialect.quote_ident(s),
                    self.dialect.quote_ident(name)
                ),
                None => self.dialect.quote_ident(name),
            },
            TableSource::RawSql(sql) => {
                check_composable_sql(sql, self.keyword_boundary)?;
                format!("(\n{sql}\n)")
            }
        };
        Ok(match &table.alias {
            Some(alias) => format!("{source} AS {}", self.dialect.quote_ident(alias)),
            None => source,
        })
    }

    pub fn render_expr(&self, expr: &SqlExpr) -> String {
        match expr {
            SqlExpr::Column { table, name } => match table {
                Some(t) => format!(
                    "{}.{}",
                    self.dialect.quote_ident(t),
                    self.dialect.quote_ident(name)
                ),
                None => self.dialect.quote_ident(name),
            },
            SqlExpr::Literal(v) => self.dialect.render_literal(v),
            SqlExpr::Parameter { name, .. } => self.dialect.parameter_ref(name),
            SqlExpr::Function(call) => self.render_function_call(call),
        }
    }

    /// `"schema"."package"."name"(args)`, or without the list when niladic.
    ///
    /// # Panics
    /// If a target segment is empty, or an argument is marked named but is not a parameter.
    pub fn render_function_call(&self, call: &FunctionCall) -> String {
        let segments = call.target.segments();
        assert!(
            segments.iter().all(|segment| !segment.is_empty()),
            "function target {:?} has an empty segment",
            call.target
        );
        let target: Vec<String> = segments
            .into_iter()
            .map(|segment| self.dialect.quote_ident(segment))
            .collect();
        let mut sql = target.join(".");
        if call.niladic {
            return sql;
        }

        let args: Vec<String> = call
            .arguments
            .iter()
            .map(|arg| self.render_argument(arg))
            .collect();
        sql.push('(');
        sql.push_str(&args.join(", "));
        sql.push(')');
        sql
    }

    fn render_argument(&self, arg: &Argument) -> String {
        if !arg.named {
            return self.render_expr(&arg.expr);
        }
        match &arg.expr {
            SqlExpr::Parameter { name, .. } => self.dialect.parameter_ref(name),
            other => panic!("named function argument must be a parameter, got {other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::AnsiDialect;

    #[test]
    fn target_shapes_follow_qualifiers() {
        assert!(matches!(
            FunctionTarget::new(None, None, "f"),
            FunctionTarget::Name { .. }
        ));
        assert!(matches!(
            FunctionTarget::new(Some("dbo"), None, "f"),
            FunctionTarget::Schema { .. }
        ));
        assert!(matches!(
            FunctionTarget::new(None, Some("pkg"), "f"),
            FunctionTarget::Package { .. }
        ));
        let full = FunctionTarget::new(Some("dbo"), Some("pkg"), "f");
        assert_eq!(full.segments(), vec!["dbo", "pkg", "f"]);
    }

    #[test]
    #[should_panic(expected = "requires a function name")]
    fn package_without_name_panics() {
        FunctionTarget::new(Some("dbo"), Some("pkg"), "");
    }

    #[test]
    #[should_panic(expected = "must be a parameter")]
    fn named_literal_argument_panics() {
        let call = FunctionCall::new(
            FunctionTarget::new(None, None, "f"),
            vec![Argument::named(SqlExpr::Literal(serde_json::json!(1)))],
            ResultType::Int,
        );
        SqlRenderer::new(&AnsiDialect).render_function_call(&call);
    }

    #[test]
    #[should_panic(expected = "has an empty segment")]
    fn directly_built_target_with_empty_name_panics() {
        let call = FunctionCall::new(
            FunctionTarget::SchemaPackage {
                schema: "dbo".to_string(),
                package: "pkg".to_string(),
                name: String::new(),
            },
            vec![],
            ResultType::Int,
        );
        SqlRenderer::new(&AnsiDialect).render_function_call(&call);
    }

    #[test]
    #[should_panic(expected = "has an empty segment")]
    fn directly_built_target_with_empty_schema_panics() {
        let call = FunctionCall::niladic(
            FunctionTarget::Schema {
                schema: String::new(),
                name: "f".to_string(),
            },
            ResultType::Int,
        );
        SqlRenderer::new(&AnsiDialect).render_function_call(&call);
    }

    #[test]
    fn empty_argument_list_keeps_parentheses() {
        let call = FunctionCall::new(FunctionTarget::new(None, None, "now"), vec![], ResultType::DateTime);
        assert_eq!(SqlRenderer::new(&AnsiDialect).render_function_call(&call), "\"now\"()");
    }

    #[test]
    fn parameters_collected_once_in_order() {
        let call = FunctionCall::new(
            FunctionTarget::new(None, None, "f"),
            vec![
                Argument::positional(SqlExpr::parameter("b", ResultType::Int)),
                Argument::positional(SqlExpr::parameter("a", ResultType::Int)),
                Argument::positional(SqlExpr::parameter("b", ResultType::Int)),
            ],
            ResultType::Int,
        );
        let query = SelectQuery::projection(SqlExpr::function(call));
        assert_eq!(query.parameter_names(), vec!["b", "a"]);
    }
}
