//! Write-time slug conflicts.
//!
//! The uniqueness probe and the insert are separate statements, so a concurrent
//! writer can claim a slug in between. A unique index on the slug column turns
//! that race into a write rejection, which is reported as a retryable
//! [`DbError::SlugConflict`] instead of a generic database error.

use std::future::Future;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use slugline_core::hooks::SlugHooks;
use slugline_core::oracle::UniquenessOracle;
use slugline_core::record::SlugRecord;

use crate::error::{DbError, DbResult};

/// ## Summary
/// Maps a failed write on a sluggable table to a [`DbError`].
///
/// Unique violations on a constraint naming `column` (or on an unnamed
/// constraint) become [`DbError::SlugConflict`]. A constraint names `column`
/// when the column's `_`-separated words appear as whole words in it, as in
/// `category_slug_key`.
#[must_use]
pub fn classify_write_error(column: &str, err: DieselError) -> DbError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
            if info
                .constraint_name()
                .is_none_or(|constraint| names_column(constraint, column)) =>
        {
            DbError::SlugConflict {
                column: column.to_owned(),
                message: info.message().to_owned(),
            }
        }
        other => DbError::DatabaseError(other),
    }
}

fn names_column(constraint: &str, column: &str) -> bool {
    let words: Vec<&str> = constraint.split('_').collect();
    let wanted: Vec<&str> = column.split('_').collect();
    words.windows(wanted.len()).any(|window| window == wanted.as_slice())
}

/// ## Summary
/// Runs the create hook for `record`, then `insert`.
///
/// ## Errors
/// Returns [`DbError::SlugError`] if slug resolution fails (nothing is written),
/// [`DbError::SlugConflict`] if the insert lost a race for the slug, or
/// [`DbError::DatabaseError`] for any other write failure.
pub async fn create_with_slug<O, R, F, Fut, T>(
    hooks: &SlugHooks<O>,
    record: &mut R,
    insert: F,
) -> DbResult<T>
where
    O: UniquenessOracle,
    R: SlugRecord + ?Sized,
    F: FnOnce(&R) -> Fut,
    Fut: Future<Output = diesel::QueryResult<T>>,
{
    hooks.before_create(&mut *record).await?;

    let column = &hooks.engine().config().column;
    insert(&*record)
        .await
        .map_err(|e| classify_write_error(column, e))
}
