//! Element metadata attached to the root table.

use serde::{Deserialize, Serialize};

/// Descriptive record of one package contributing to the root table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDefinition {
    /// Fully qualified package name.
    pub composer_name: String,
    /// Element identifier (the package name).
    pub identifier: String,
    /// Root table columns accumulated up to and including this package.
    pub columns: Vec<String>,
    /// Vendor part of the package name.
    pub vendor: String,
    /// Package part of the package name.
    pub package: String,
    /// Public asset directory.
    pub public_path: String,
    /// Private asset directory.
    pub private_path: String,
    /// Wizard group, empty if none was declared.
    pub wizard_group: String,
    /// Icon identifier.
    pub icon: String,
    /// Icon provider name.
    pub icon_provider: String,
    /// Table the package declared as its target.
    pub table: String,
    /// Type field the package declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_field: Option<String>,
}

impl ElementDefinition {
    /// Columns this element added on top of the previous element's snapshot.
    pub fn contributed_columns<'a>(&'a self, previous: Option<&ElementDefinition>) -> &'a [String] {
        let start = previous
            .map(|p| p.columns.len())
            .unwrap_or(0)
            .min(self.columns.len());
        &self.columns[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(name: &str, columns: &[&str]) -> ElementDefinition {
        ElementDefinition {
            composer_name: name.to_string(),
            identifier: name.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            vendor: "foo".into(),
            package: "bar".into(),
            public_path: String::new(),
            private_path: String::new(),
            wizard_group: String::new(),
            icon: String::new(),
            icon_provider: String::new(),
            table: "tt_content".into(),
            type_field: None,
        }
    }

    #[test]
    fn test_contributed_columns() {
        let first = element("foo/bar", &["a"]);
        let second = element("foo/baz", &["a", "b", "c"]);

        assert_eq!(first.contributed_columns(None), ["a".to_string()]);
        assert_eq!(
            second.contributed_columns(Some(&first)),
            ["b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_serialized_keys_are_camel_case() {
        let value = serde_json::to_value(element("foo/bar", &[])).unwrap();
        assert!(value.get("composerName").is_some());
        assert!(value.get("iconProvider").is_some());
        assert!(value.get("wizardGroup").is_some());
        assert!(value.get("typeField").is_none());
    }
}
