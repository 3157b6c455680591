//! Field declarations and definitions.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field type that turns a field into a child table.
pub const COLLECTION_TYPE: &str = "Collection";

/// A field as authored in a package declaration.
///
/// Keys other than `identifier`, `type` and `properties` are kept verbatim
/// in `options`, in declaration order. An explicit `"properties": null` reads
/// as no properties and is not written back out.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldDeclaration {
    /// Field identifier, unique within the declaring list.
    #[serde(default)]
    pub identifier: String,
    /// Field type name.
    #[serde(rename = "type", default)]
    pub field_type: String,
    /// Type specific properties, including nested fields of a collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<FieldProperties>,
    /// Passthrough configuration.
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

/// The `properties` block of a field declaration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldProperties {
    /// Nested field declarations of a collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldDeclaration>>,
    /// Table holding the collection's rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_table: Option<Value>,
    /// Column of the child row holding the parent row id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_field: Option<Value>,
    /// Column of the child row holding the parent table name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_table_field: Option<Value>,
    /// Values written to and matched on the child row, keyed by column.
    ///
    /// Authors may put any values here; generated linkage only uses strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_match_fields: Option<Value>,
    /// Passthrough properties.
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

/// Generated relation between a collection field and its child table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionLinkage {
    /// Child table name.
    pub foreign_table: String,
    /// Owner column the relation lives in.
    pub foreign_field: String,
    /// Owner table name.
    pub foreign_table_field: String,
    /// `{ owner_table: column }`.
    pub foreign_match_fields: IndexMap<String, String>,
}

impl CollectionLinkage {
    /// Linkage for a collection stored in `child_table`, declared as `column` on `owner_table`.
    pub fn new(
        child_table: impl Into<String>,
        owner_table: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        let owner_table = owner_table.into();
        let column = column.into();
        let mut foreign_match_fields = IndexMap::with_capacity(1);
        foreign_match_fields.insert(owner_table.clone(), column.clone());

        Self {
            foreign_table: child_table.into(),
            foreign_field: column,
            foreign_table_field: owner_table,
            foreign_match_fields,
        }
    }
}

impl FieldDeclaration {
    /// Create a field with the given identifier and type.
    pub fn new(identifier: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            field_type: field_type.into(),
            properties: None,
            options: Map::new(),
        }
    }

    /// Create a collection field with nested fields.
    pub fn collection(
        identifier: impl Into<String>,
        fields: impl IntoIterator<Item = FieldDeclaration>,
    ) -> Self {
        Self::new(identifier, COLLECTION_TYPE).with_properties(FieldProperties {
            fields: Some(fields.into_iter().collect()),
            ..FieldProperties::default()
        })
    }

    /// Set the properties block.
    pub fn with_properties(mut self, properties: FieldProperties) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Add a passthrough option.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Write the generated linkage into the properties block.
    pub fn with_linkage(mut self, linkage: CollectionLinkage) -> Self {
        let properties = self.properties.get_or_insert_with(FieldProperties::default);
        let match_fields = linkage
            .foreign_match_fields
            .into_iter()
            .map(|(column, value)| (column, Value::String(value)))
            .collect::<Map<_, _>>();

        properties.foreign_table = Some(Value::String(linkage.foreign_table));
        properties.foreign_field = Some(Value::String(linkage.foreign_field));
        properties.foreign_table_field = Some(Value::String(linkage.foreign_table_field));
        properties.foreign_match_fields = Some(Value::Object(match_fields));
        self
    }

    /// Check if this is a collection field.
    pub fn is_collection(&self) -> bool {
        self.field_type == COLLECTION_TYPE
    }

    /// Nested field declarations, empty if none were declared.
    pub fn nested_fields(&self) -> &[FieldDeclaration] {
        self.properties
            .as_ref()
            .and_then(|p| p.fields.as_deref())
            .unwrap_or_default()
    }

    /// Whether this field is compiled into its own child table.
    pub fn spawns_table(&self) -> bool {
        self.is_collection() && !self.nested_fields().is_empty()
    }

    /// Get a passthrough option.
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    /// Get a passthrough option as a string.
    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.option(key).and_then(Value::as_str)
    }

    /// The linkage in the properties block.
    ///
    /// `None` unless all four keys are present and hold strings, which is the
    /// case once the field has been processed as a collection.
    pub fn linkage(&self) -> Option<CollectionLinkage> {
        let properties = self.properties.as_ref()?;
        let text = |value: &Option<Value>| -> Option<String> {
            value.as_ref()?.as_str().map(str::to_string)
        };

        let foreign_match_fields = properties
            .foreign_match_fields
            .as_ref()?
            .as_object()?
            .iter()
            .map(|(column, value)| Some((column.clone(), value.as_str()?.to_string())))
            .collect::<Option<IndexMap<_, _>>>()?;

        Some(CollectionLinkage {
            foreign_table: text(&properties.foreign_table)?,
            foreign_field: text(&properties.foreign_field)?,
            foreign_table_field: text(&properties.foreign_table_field)?,
            foreign_match_fields,
        })
    }
}

/// A compiled column of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Column name, unique within the owning table.
    pub identifier: String,
    /// Processed field declaration.
    pub config: FieldDeclaration,
}

impl FieldDefinition {
    /// Create a field definition.
    pub fn new(identifier: impl Into<String>, config: FieldDeclaration) -> Self {
        Self {
            identifier: identifier.into(),
            config,
        }
    }

    /// Check if the column holds a collection.
    pub fn is_collection(&self) -> bool {
        self.config.is_collection()
    }
}
