//! Package declarations, the compiler's input.

use super::field::FieldDeclaration;
use serde::{Deserialize, Serialize};

/// One content block package with its declaration block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDeclaration {
    /// Fully qualified `vendor/package` name.
    #[serde(alias = "name")]
    pub composer_name: String,
    /// Icon identifier.
    #[serde(default)]
    pub icon: String,
    /// Icon provider name.
    #[serde(default)]
    pub icon_provider: String,
    /// The declaration block.
    #[serde(default)]
    pub yaml: BlockDeclaration,
}

/// The declaration block of a package.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDeclaration {
    /// Table the package targets. Top-level fields always land on the root table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    /// Column distinguishing record types on the target table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_field: Option<String>,
    /// New content element wizard group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Top-level fields.
    #[serde(default)]
    pub fields: Vec<FieldDeclaration>,
}

impl PackageDeclaration {
    /// Create a package declaration without fields.
    pub fn new(composer_name: impl Into<String>) -> Self {
        Self {
            composer_name: composer_name.into(),
            ..Self::default()
        }
    }

    /// Set the icon and its provider.
    pub fn with_icon(mut self, icon: impl Into<String>, provider: impl Into<String>) -> Self {
        self.icon = icon.into();
        self.icon_provider = provider.into();
        self
    }

    /// Set the target table.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.yaml.table = Some(table.into());
        self
    }

    /// Set the type field.
    pub fn with_type_field(mut self, type_field: impl Into<String>) -> Self {
        self.yaml.type_field = Some(type_field.into());
        self
    }

    /// Set the wizard group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.yaml.group = Some(group.into());
        self
    }

    /// Add a top-level field.
    pub fn with_field(mut self, field: FieldDeclaration) -> Self {
        self.yaml.fields.push(field);
        self
    }

    /// Add multiple top-level fields.
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldDeclaration>) -> Self {
        self.yaml.fields.extend(fields);
        self
    }

    /// Top-level fields.
    pub fn fields(&self) -> &[FieldDeclaration] {
        &self.yaml.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_declaration() {
        let package: PackageDeclaration = serde_json::from_value(json!({
            "composerName": "foo/bar",
            "icon": "EXT:foo/icon.svg",
            "iconProvider": "svg",
            "yaml": {
                "group": "common",
                "typeField": "CType",
                "fields": [{ "identifier": "header", "type": "Text" }],
            },
        }))
        .unwrap();

        assert_eq!(package.composer_name, "foo/bar");
        assert_eq!(package.icon_provider, "svg");
        assert_eq!(package.yaml.group.as_deref(), Some("common"));
        assert_eq!(package.yaml.type_field.as_deref(), Some("CType"));
        assert!(package.yaml.table.is_none());
        assert_eq!(package.fields().len(), 1);
    }

    #[test]
    fn test_name_alias_and_missing_fields() {
        let package: PackageDeclaration = serde_json::from_value(json!({
            "name": "t3ce/example",
            "yaml": { "table": "tt_content" },
        }))
        .unwrap();

        assert_eq!(package.composer_name, "t3ce/example");
        assert!(package.icon.is_empty());
        assert!(package.fields().is_empty());
    }

    #[test]
    fn test_builder() {
        let package = PackageDeclaration::new("foo/bar")
            .with_icon("icon", "bitmap")
            .with_table("tt_content")
            .with_type_field("CType")
            .with_group("special")
            .with_field(FieldDeclaration::new("header", "Text"))
            .with_fields([FieldDeclaration::new("text", "Textarea")]);

        assert_eq!(package.yaml.table.as_deref(), Some("tt_content"));
        assert_eq!(package.fields().len(), 2);
        assert_eq!(package.icon, "icon");
    }
}
