//! `PostgreSQL`-backed uniqueness oracle.

use slugline_core::error::SlugError;
use slugline_core::oracle::{ProbeFuture, UniquenessOracle};

use crate::db::DbProvider;
use crate::db::identifier::Identifier;
use crate::db::query::slug::{SlugScope, is_slug_taken};
use crate::error::{DbError, DbResult};

/// Answers uniqueness probes by querying one table.
///
/// Every probe checks out a pooled connection and runs a fresh `SELECT EXISTS`;
/// nothing is cached between probes.
#[derive(Debug)]
pub struct PgUniquenessOracle<P> {
    provider: P,
    table: Identifier,
    scope: Option<SlugScope>,
}

impl<P: DbProvider> PgUniquenessOracle<P> {
    /// ## Summary
    /// Creates an oracle over `table`.
    ///
    /// ## Errors
    /// Returns [`DbError::InvalidIdentifier`] if `table` is not a valid identifier.
    pub fn new(provider: P, table: &str) -> DbResult<Self> {
        Ok(Self {
            provider,
            table: Identifier::parse(table)?,
            scope: None,
        })
    }

    /// ## Summary
    /// Restricts uniqueness to rows where `column = value`.
    ///
    /// ## Errors
    /// Returns [`DbError::InvalidIdentifier`] if `column` is not a valid identifier.
    pub fn scoped(mut self, column: &str, value: impl Into<String>) -> DbResult<Self> {
        self.scope = Some(SlugScope {
            column: Identifier::parse(column)?,
            value: value.into(),
        });
        Ok(self)
    }

    #[must_use]
    pub const fn table(&self) -> &Identifier {
        &self.table
    }

    async fn probe(&self, column: &str, candidate: &str) -> DbResult<bool> {
        let column = Identifier::parse(column)?;
        let mut conn = self.provider.get_connection().await?;

        let taken =
            is_slug_taken(&mut conn, &self.table, &column, candidate, self.scope.as_ref()).await?;

        tracing::trace!(table = %self.table, %column, candidate, taken, "Slug lookup");

        Ok(!taken)
    }
}

impl<P: DbProvider> UniquenessOracle for PgUniquenessOracle<P> {
    fn is_unique<'a>(&'a self, column: &'a str, candidate: &'a str) -> ProbeFuture<'a> {
        Box::pin(async move {
            self.probe(column, candidate).await.map_err(|e| match e {
                DbError::InvalidIdentifier(raw) => {
                    SlugError::Configuration(format!("invalid slug column {raw:?}"))
                }
                DbError::SlugError(inner) => inner,
                other => SlugError::oracle(other),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;

    use super::*;
    use crate::db::connection::DbConnection;

    /// Provider whose connections always fail to check out.
    #[derive(Debug)]
    struct Unreachable;

    impl DbProvider for Unreachable {
        fn get_connection<'a>(
            &'a self,
        ) -> Pin<Box<dyn Future<Output = DbResult<DbConnection<'a>>> + Send + 'a>> {
            Box::pin(async {
                Err(DbError::DatabaseError(
                    diesel::result::Error::BrokenTransactionManager,
                ))
            })
        }
    }

    #[test]
    fn invalid_table_rejected() {
        let err = PgUniquenessOracle::new(Unreachable, "category; --").expect_err("must fail");
        assert!(matches!(err, DbError::InvalidIdentifier(_)));
    }

    #[test]
    fn invalid_scope_column_rejected() {
        let err = PgUniquenessOracle::new(Unreachable, "category")
            .expect("valid table")
            .scoped("tenant id", "acme")
            .expect_err("must fail");
        assert!(matches!(err, DbError::InvalidIdentifier(_)));
    }

    #[test_log::test(tokio::test)]
    async fn storage_failure_is_oracle_unavailable() {
        let oracle = PgUniquenessOracle::new(Unreachable, "category").expect("valid table");

        let err = oracle
            .is_unique("slug", "nguyen")
            .await
            .expect_err("probe fails");

        assert!(matches!(err, SlugError::OracleUnavailable(_)));
    }

    #[test_log::test(tokio::test)]
    async fn invalid_column_is_configuration_error() {
        let oracle = PgUniquenessOracle::new(Unreachable, "category").expect("valid table");

        let err = oracle
            .is_unique("slug\"", "nguyen")
            .await
            .expect_err("probe fails");

        assert!(matches!(err, SlugError::Configuration(_)));
    }
}
