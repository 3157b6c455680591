//! Generated table and column names.

/// Replace the vendor separator so a package name can be embedded in identifiers.
pub fn normalize_package_name(name: &str) -> String {
    name.replace('/', "-")
}

/// Split `vendor/package` into its two parts.
///
/// Returns `None` unless there is exactly one separator with text on both sides.
pub fn split_package_name(name: &str) -> Option<(&str, &str)> {
    let (vendor, package) = name.split_once('/')?;
    if vendor.is_empty() || package.is_empty() || package.contains('/') {
        return None;
    }
    Some((vendor, package))
}

/// Name of the table that stores the rows of a collection field.
pub fn collection_table_name(prefix: &str, owner_table: &str, identifier: &str) -> String {
    if prefix.is_empty() {
        format!("{owner_table}_{identifier}")
    } else {
        format!("{prefix}_{owner_table}_{identifier}")
    }
}

/// Name of a package field's column on the shared root table.
pub fn column_name(column_prefix: &str, identifier: &str) -> String {
    format!("{column_prefix}_{identifier}")
}
