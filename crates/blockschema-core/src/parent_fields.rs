//! Parent pointer columns of content elements nested in the root table.
//!
//! A collection field may store its children in the root table itself
//! (`foreign_table` equal to the root table). Those child rows point at their
//! parent through `foreign_field`, and the root table needs every such column.

use crate::definition::{FieldDefinition, TableDefinitionCollection};
use indexmap::IndexSet;

/// Column used when a self-referencing collection names no `foreign_field`.
pub const DEFAULT_PARENT_FIELD: &str = "foreign_table_parent_uid";

/// Unique parent field names of self-referencing collections on `root_table`.
///
/// Only packages that declared `root_table` as their target contribute.
/// Names are returned in first-seen order. An unregistered root table yields
/// no names.
pub fn content_element_parent_fields(
    tables: &TableDefinitionCollection,
    root_table: &str,
) -> Vec<String> {
    let Ok(root) = tables.get_table(root_table) else {
        return Vec::new();
    };

    let mut names = IndexSet::new();
    let mut previous = None;
    for element in root.elements() {
        let contributed = element.contributed_columns(previous);
        previous = Some(element);

        if element.table != root_table {
            continue;
        }

        for column in contributed {
            if let Some(name) = root.field(column).and_then(|f| parent_field(f, root_table)) {
                names.insert(name.to_string());
            }
        }
    }

    names.into_iter().collect()
}

fn parent_field<'a>(field: &'a FieldDefinition, root_table: &str) -> Option<&'a str> {
    if !field.is_collection() || field.config.option_str("foreign_table") != Some(root_table) {
        return None;
    }
    Some(
        field
            .config
            .option_str("foreign_field")
            .unwrap_or(DEFAULT_PARENT_FIELD),
    )
}
