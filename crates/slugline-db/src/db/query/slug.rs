//! Lookup-by-column-value queries backing the uniqueness oracle.

use diesel::pg::Pg;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types::{Bool, Text};
use diesel::{QueryableByName, sql_query};
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::db::identifier::Identifier;

/// Row returned by [`slug_taken`].
#[derive(Debug, QueryableByName)]
pub struct SlugTaken {
    #[diesel(sql_type = Bool)]
    pub taken: bool,
}

/// Narrows a uniqueness check to rows where `column = value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugScope {
    pub column: Identifier,
    pub value: String,
}

/// ## Summary
/// Returns a query reporting whether any row of `table` holds `candidate` in `column`.
///
/// Identifiers are interpolated quoted; `candidate` and the scope value are bound.
#[must_use]
pub fn slug_taken<'a>(
    table: &Identifier,
    column: &Identifier,
    candidate: &'a str,
    scope: Option<&'a SlugScope>,
) -> BoxedSqlQuery<'a, Pg, SqlQuery> {
    let scope_clause = scope
        .map(|scope| format!(" AND {} = $2", scope.column))
        .unwrap_or_default();

    let query = sql_query(format!(
        "SELECT EXISTS(SELECT 1 FROM {table} WHERE {column} = $1{scope_clause}) AS taken"
    ))
    .into_boxed::<Pg>()
    .bind::<Text, _>(candidate);

    match scope {
        Some(scope) => query.bind::<Text, _>(scope.value.as_str()),
        None => query,
    }
}

/// ## Summary
/// Checks whether `candidate` is already stored in `table.column`.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn is_slug_taken(
    conn: &mut AsyncPgConnection,
    table: &Identifier,
    column: &Identifier,
    candidate: &str,
    scope: Option<&SlugScope>,
) -> diesel::QueryResult<bool> {
    slug_taken(table, column, candidate, scope)
        .get_result::<SlugTaken>(conn)
        .await
        .map(|row| row.taken)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(raw: &str) -> Identifier {
        Identifier::parse(raw).expect("valid identifier")
    }

    #[test]
    fn unscoped_query_binds_candidate() {
        let table = ident("category");
        let column = ident("slug");
        let query = slug_taken(&table, &column, "nguyen", None);

        let sql = diesel::debug_query::<Pg, _>(&query).to_string();
        assert!(sql.starts_with(
            "SELECT EXISTS(SELECT 1 FROM \"category\" WHERE \"slug\" = $1) AS taken"
        ));
        assert!(sql.contains("\"nguyen\""));
    }

    #[test]
    fn scoped_query_adds_second_bind() {
        let table = ident("public.category");
        let column = ident("slug");
        let scope = SlugScope {
            column: ident("tenant_id"),
            value: "acme".to_owned(),
        };
        let query = slug_taken(&table, &column, "nguyen", Some(&scope));

        let sql = diesel::debug_query::<Pg, _>(&query).to_string();
        assert!(sql.starts_with(
            "SELECT EXISTS(SELECT 1 FROM \"public\".\"category\" WHERE \"slug\" = $1 AND \"tenant_id\" = $2) AS taken"
        ));
        assert!(sql.contains("\"acme\""));
    }

    #[test]
    fn candidate_is_never_interpolated() {
        let table = ident("category");
        let column = ident("slug");
        let query = slug_taken(&table, &column, "x' OR '1'='1", None);

        let sql = diesel::debug_query::<Pg, _>(&query).to_string();
        let (statement, _binds) = sql.split_once(" -- binds:").expect("binds listed");
        assert!(!statement.contains("OR"));
    }
}
