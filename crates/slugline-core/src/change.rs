//! Change detection: decides whether a record's slug must be (re)generated.

use crate::record::SlugRecord;

/// Returns `true` if any of `source_fields` differs between the current and
/// original snapshots.
#[must_use]
pub fn source_changed<R: SlugRecord + ?Sized>(record: &R, source_fields: &[String]) -> bool {
    source_fields
        .iter()
        .any(|field| record.attribute(field) != record.original_attribute(field))
}

/// ## Summary
/// Decides whether a slug needs to be generated for `record`.
///
/// A record without a slug always needs one. A record with a slug gets a new one
/// only when `overwrite` is set and a source attribute changed since it was last
/// persisted.
#[must_use]
pub fn needs_regeneration<R: SlugRecord + ?Sized>(
    record: &R,
    source_fields: &[String],
    existing_slug: Option<&str>,
    overwrite: bool,
) -> bool {
    match existing_slug {
        None | Some("") => true,
        Some(_) => overwrite && source_changed(record, source_fields),
    }
}
