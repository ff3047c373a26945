//! Dotted-path lookup over selection trees.

use super::node::{Fragments, Selection, SelectionSet};
use crate::error::QueryResult;

/// Separator between segments of a field path.
pub const PATH_SEPARATOR: char = '.';

/// Split a dotted path into its non-empty segments.
pub fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(PATH_SEPARATOR).filter(|segment| !segment.is_empty())
}

/// Find the field at `path` below `root`.
///
/// Each segment is looked up among the immediate children of the current
/// node. Fragment spreads and inline fragments are searched through as if
/// their selections were written in place; the first match in declaration
/// order wins. An empty path returns `root` itself.
pub fn find_named_field<'a>(
    path: &str,
    root: &'a Selection,
    fragments: &'a Fragments,
) -> QueryResult<Option<&'a Selection>> {
    let mut current = root;

    for segment in path_segments(path) {
        let Some(selection_set) = current.selection_set(fragments)? else {
            return Ok(None);
        };

        match find_in_selection_set(segment, selection_set, fragments)? {
            Some(found) => current = found,
            None => return Ok(None),
        }
    }

    Ok(Some(current))
}

/// Check whether a field exists at `path` below `root`.
pub fn is_selected(path: &str, root: &Selection, fragments: &Fragments) -> QueryResult<bool> {
    find_named_field(path, root, fragments).map(|found| found.is_some())
}

fn find_in_selection_set<'a>(
    name: &str,
    selection_set: &'a SelectionSet,
    fragments: &'a Fragments,
) -> QueryResult<Option<&'a Selection>> {
    for selection in selection_set {
        match selection {
            Selection::Field(field) => {
                if field.name == name {
                    return Ok(Some(selection));
                }
            }
            Selection::FragmentSpread(_) | Selection::InlineFragment(_) => {
                if let Some(inner) = selection.selection_set(fragments)? {
                    if let Some(found) = find_in_selection_set(name, inner, fragments)? {
                        return Ok(Some(found));
                    }
                }
            }
        }
    }

    Ok(None)
}
