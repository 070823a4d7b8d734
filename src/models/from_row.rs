use rusqlite::types::{FromSqlError, ValueRef};
use rusqlite::Row;

/// Builds a model from a row selected with the model's own column names.
pub trait FromSqliteRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}

/// Reads a TEXT column into one of the string-tagged enums.
pub(crate) fn parse_text<T>(
    value: ValueRef<'_>,
    kind: &str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<T, FromSqlError> {
    let s = value.as_str()?;
    parse(s).ok_or_else(|| FromSqlError::Other(format!("invalid {}: {:?}", kind, s).into()))
}
