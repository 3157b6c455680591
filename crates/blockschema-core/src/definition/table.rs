//! Table definitions.

use super::element::ElementDefinition;
use super::field::FieldDefinition;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One table to be materialized, with its ordered columns.
///
/// The name is fixed at construction and is not part of the serialized form;
/// the registry keys tables by name instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDefinition {
    #[serde(skip)]
    table: String,
    #[serde(default)]
    fields: IndexMap<String, FieldDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    elements: Vec<ElementDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    type_field: Option<String>,
    #[serde(default = "default_is_root_table")]
    is_root_table: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_aggregate_root: Option<bool>,
}

fn default_is_root_table() -> bool {
    true
}

impl TableDefinition {
    /// Create a root table definition.
    pub fn new(
        table: impl Into<String>,
        fields: IndexMap<String, FieldDefinition>,
        elements: Vec<ElementDefinition>,
    ) -> Self {
        Self {
            table: table.into(),
            fields,
            elements,
            type_field: None,
            is_root_table: true,
            is_aggregate_root: None,
        }
    }

    /// Create a child table holding the rows of a collection field.
    pub fn collection(table: impl Into<String>, fields: IndexMap<String, FieldDefinition>) -> Self {
        Self {
            table: table.into(),
            fields,
            elements: Vec::new(),
            type_field: None,
            is_root_table: false,
            is_aggregate_root: Some(false),
        }
    }

    /// Create a table definition from its nested serialized form.
    pub fn from_raw(table: impl Into<String>, raw: Value) -> Result<Self> {
        let mut definition: TableDefinition =
            serde_json::from_value(raw).map_err(|e| Error::Deserialization(e.to_string()))?;
        definition.table = table.into();
        Ok(definition)
    }

    /// Set the type field.
    pub fn with_type_field(mut self, type_field: Option<String>) -> Self {
        self.type_field = type_field;
        self
    }

    pub(crate) fn set_table(&mut self, table: String) {
        self.table = table;
    }

    /// Table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Columns in declaration order.
    pub fn fields(&self) -> &IndexMap<String, FieldDefinition> {
        &self.fields
    }

    /// Get a column by name.
    pub fn field(&self, identifier: &str) -> Option<&FieldDefinition> {
        self.fields.get(identifier)
    }

    /// Check if a column exists.
    pub fn has_field(&self, identifier: &str) -> bool {
        self.fields.contains_key(identifier)
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Element metadata, only present on the root table.
    pub fn elements(&self) -> &[ElementDefinition] {
        &self.elements
    }

    /// Get the element contributed by a package.
    pub fn element(&self, identifier: &str) -> Option<&ElementDefinition> {
        self.elements.iter().find(|e| e.identifier == identifier)
    }

    /// Type field of the table.
    pub fn type_field(&self) -> Option<&str> {
        self.type_field.as_deref()
    }

    /// Check if this is a root table.
    pub fn is_root_table(&self) -> bool {
        self.is_root_table
    }

    /// Aggregate root flag, if known.
    pub fn is_aggregate_root(&self) -> Option<bool> {
        self.is_aggregate_root
    }

    /// Serialize to the nested form used by the registry.
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| Error::Serialization(e.to_string()))
    }
}
