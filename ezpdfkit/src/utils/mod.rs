//! Utilities for path collection, object graph copying and size display.

use crate::{Result, error::EzPdfError};
use lopdf::{Document, Object};
use std::path::PathBuf;

/// Expand multiple glob patterns into filesystem paths.
///
/// A pattern without glob metacharacters is passed through unchanged, even
/// when nothing exists at that path, so a later read can report it as
/// missing. Matches of one pattern are sorted; patterns keep their order.
///
/// # Errors
///
/// Returns an error if a pattern is malformed or a matched entry cannot be
/// read.
pub fn expand_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        if !is_glob(pattern) {
            resolved.push(PathBuf::from(pattern));
            continue;
        }

        let entries = glob::glob(pattern).map_err(|err| {
            EzPdfError::invalid_parameter(format!("Invalid pattern {pattern}: {err}"))
        })?;

        let mut matched = Vec::new();
        for entry in entries {
            matched.push(entry.map_err(|err| EzPdfError::other(err.to_string()))?);
        }
        matched.sort();
        resolved.extend(matched);
    }

    Ok(resolved)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Copy every object reachable from `obj` out of `source` into `target`.
///
/// Objects keep their ids, so the caller must keep ids in `target` and
/// `source` disjoint except for objects that are the same. Objects already
/// present in `target` are not visited again.
///
/// Page tree nodes (`Page` and `Pages` dictionaries) are never copied. An
/// annotation's `/P` or a link destination would otherwise drag in the
/// source page tree and every page below it; the caller places the pages
/// it wants itself.
pub fn copy_references(target: &mut Document, source: &Document, obj: &Object) {
    let mut pending = vec![obj.clone()];

    while let Some(object) = pending.pop() {
        match object {
            Object::Reference(id) => {
                if !target.objects.contains_key(&id)
                    && let Ok(referenced) = source.get_object(id)
                    && !is_page_tree_node(referenced)
                {
                    target.objects.insert(id, referenced.clone());
                    pending.push(referenced.clone());
                }
            }
            Object::Dictionary(dict) => {
                pending.extend(dict.iter().map(|(_, value)| value.clone()));
            }
            Object::Array(items) => pending.extend(items),
            Object::Stream(stream) => {
                pending.extend(stream.dict.iter().map(|(_, value)| value.clone()));
            }
            _ => {}
        }
    }
}

fn is_page_tree_node(object: &Object) -> bool {
    let Ok(dict) = object.as_dict() else {
        return false;
    };
    matches!(
        dict.get(b"Type").and_then(Object::as_name),
        Ok(b"Page" | b"Pages")
    )
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
