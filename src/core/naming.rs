//! Deterministic output filenames for listing photos
//!
//! A record named `Kevin O'Leary` at `123 Main St., Cary, NC 27513` with id 1
//! and a `.jpg` photo becomes `1-KEVIN-OLEARY-123-Main-St-Cary-NC-27513.jpg`.

use crate::domain::{HearthError, Record, Result};

/// Derive the output filename for a record
///
/// The result depends only on `id`, `owner_name`, `address` and the photo
/// extension: `{id}-{OWNER}-{Address}.{ext}`. Punctuation is dropped, runs of
/// spaces become a single `-`, and the owner is upper-cased. An empty owner
/// yields `{id}--{Address}.{ext}`.
///
/// # Errors
///
/// Returns [`HearthError::InvalidInput`] when `photo_url` has no `.`.
///
/// # Examples
///
/// ```
/// use hearth::core::naming::derive_filename;
/// use hearth::domain::Record;
///
/// let record = Record::new(
///     1,
///     "123 N.W. Main St., Cary, NC 27513",
///     "John Smith",
///     0,
///     "google.com/photo.jpg",
/// );
/// assert_eq!(
///     derive_filename(&record).unwrap(),
///     "1-JOHN-SMITH-123-NW-Main-St-Cary-NC-27513.jpg"
/// );
/// ```
pub fn derive_filename(record: &Record) -> Result<String> {
    let extension = photo_extension(&record.photo_url).ok_or_else(|| {
        HearthError::InvalidInput(format!(
            "record {} photo URL '{}' has no file extension",
            record.id, record.photo_url
        ))
    })?;

    let owner = hyphenate(&strip_punctuation(&record.owner_name)).to_ascii_uppercase();
    let address = hyphenate(&strip_punctuation(&record.address));

    Ok(format!("{}-{owner}-{address}.{extension}", record.id))
}

/// Substring after the final `.`
fn photo_extension(photo_url: &str) -> Option<&str> {
    photo_url.rsplit_once('.').map(|(_, ext)| ext)
}

/// Keep ASCII letters, digits and spaces only
fn strip_punctuation(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect()
}

/// Collapse each run of spaces into one `-`
fn hyphenate(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_run = false;
    for c in value.chars() {
        if c == ' ' {
            if !in_run {
                out.push('-');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}
