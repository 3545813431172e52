//! Rendering of domain predicates into parameterized SQL.
//!
//! A [`WhereClause`] is built once from a predicate list and then bound into
//! any number of queries. Listing and counting both go through it, so the
//! two can never drift apart.

use hearth_core::filter::{escape_like, Page, Predicate};
use hearth_core::patch::FieldValue;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::Postgres;

/// A query that can still accept bind parameters.
pub type PgQueryAs<'q, O> = QueryAs<'q, Postgres, O, PgArguments>;

#[derive(Debug, Clone, PartialEq)]
enum BindValue {
    Text(String),
    Bool(bool),
}

/// A rendered `WHERE` clause and its bind values, numbered from `$1`.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    sql: String,
    values: Vec<BindValue>,
}

impl WhereClause {
    pub fn from_predicates(predicates: &[Predicate]) -> Self {
        let mut conditions: Vec<String> = Vec::with_capacity(predicates.len());
        let mut values: Vec<BindValue> = Vec::with_capacity(predicates.len());

        for predicate in predicates {
            let param_idx = values.len() + 1;
            match predicate {
                Predicate::Contains { column, needle } => {
                    conditions.push(format!("{column} ILIKE '%' || ${param_idx} || '%'"));
                    values.push(BindValue::Text(escape_like(needle)));
                }
                Predicate::Equals { column, value } => {
                    conditions.push(format!("{column} = ${param_idx}"));
                    values.push(BindValue::Text(value.clone()));
                }
                Predicate::NotEquals { column, value } => {
                    conditions.push(format!("{column} <> ${param_idx}"));
                    values.push(BindValue::Text(value.clone()));
                }
                Predicate::Flag { column, value } => {
                    conditions.push(format!("{column} = ${param_idx}"));
                    values.push(BindValue::Bool(*value));
                }
                Predicate::ArrayContains { column, value } => {
                    conditions.push(format!("${param_idx} = ANY({column})"));
                    values.push(BindValue::Text(value.clone()));
                }
            }
        }

        let sql = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        Self { sql, values }
    }

    /// The clause text, empty when there are no predicates.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Number of parameters the clause consumes.
    pub fn param_count(&self) -> usize {
        self.values.len()
    }

    /// Bind the clause's values, in order, onto a query.
    pub fn bind<'q, O>(&'q self, mut query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        for value in &self.values {
            query = match value {
                BindValue::Text(s) => query.bind(s.as_str()),
                BindValue::Bool(b) => query.bind(*b),
            };
        }
        query
    }
}

/// Rendered `LIMIT` / `OFFSET` tail, numbered after a where clause.
#[derive(Debug, Clone, PartialEq)]
pub struct PageClause {
    sql: String,
    values: Vec<i64>,
}

impl PageClause {
    /// Render `page` with parameters starting after `params_before`.
    ///
    /// An absent limit renders no `LIMIT`, so every match is returned.
    pub fn new(page: Page, params_before: usize) -> Self {
        let mut parts = Vec::new();
        let mut values = Vec::new();
        if let Some(limit) = page.limit {
            values.push(limit);
            parts.push(format!("LIMIT ${}", params_before + values.len()));
        }
        if let Some(offset) = page.offset {
            values.push(offset);
            parts.push(format!("OFFSET ${}", params_before + values.len()));
        }
        Self {
            sql: parts.join(" "),
            values,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn bind<'q, O>(&self, mut query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        for value in &self.values {
            query = query.bind(*value);
        }
        query
    }
}

/// Bind a single patch value onto a query.
pub fn bind_field<'q, O>(query: PgQueryAs<'q, O>, value: &'q FieldValue) -> PgQueryAs<'q, O> {
    match value {
        FieldValue::Text(s) => query.bind(s.as_str()),
        FieldValue::NullableText(s) => query.bind(s.as_deref()),
        FieldValue::TextList(list) => query.bind(list.clone()),
        FieldValue::Bool(b) => query.bind(*b),
        FieldValue::Int(i) => query.bind(*i),
        FieldValue::NullableFloat(f) => query.bind(*f),
        FieldValue::NullableId(id) => query.bind(*id),
        FieldValue::NullableTime(t) => query.bind(*t),
    }
}
