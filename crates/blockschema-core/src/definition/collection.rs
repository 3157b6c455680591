//! Registry of compiled table definitions.

use super::package::PackageDeclaration;
use super::table::TableDefinition;
use crate::compiler;
use crate::config::CompilerConfig;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Ordered set of table definitions keyed by table name.
///
/// A name can be registered once; later registrations under the same name are
/// ignored. `Clone` copies every contained definition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableDefinitionCollection {
    definitions: IndexMap<String, TableDefinition>,
}

/// Serialized form: `{ "tables": { <name>: <table> } }`.
#[derive(Deserialize)]
struct SerializedCollection {
    tables: IndexMap<String, TableDefinition>,
}

impl TableDefinitionCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile package declarations into a collection.
    ///
    /// Warnings are logged and dropped; use [`compiler::compile`] to inspect them.
    pub fn create_from_packages(
        packages: &[PackageDeclaration],
        config: &CompilerConfig,
    ) -> Result<Self> {
        compiler::compile(packages, config).map(compiler::Compilation::into_tables)
    }

    /// Register a table unless its name is taken.
    ///
    /// Returns `true` if the table was added.
    pub fn add_table(&mut self, definition: TableDefinition) -> bool {
        if self.has_table(definition.table()) {
            debug!(table = definition.table(), "Table already registered, keeping first definition");
            return false;
        }

        debug!(
            table = definition.table(),
            fields = definition.fields().len(),
            "Registered table"
        );
        self.definitions
            .insert(definition.table().to_string(), definition);
        true
    }

    /// Get a table by name.
    pub fn get_table(&self, table: &str) -> Result<&TableDefinition> {
        self.definitions
            .get(table)
            .ok_or_else(|| Error::TableNotFound(table.to_string()))
    }

    /// Check if a table is registered.
    pub fn has_table(&self, table: &str) -> bool {
        self.definitions.contains_key(table)
    }

    /// Table names in registration order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    /// Iterate over the definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TableDefinition> {
        self.definitions.values()
    }

    /// Number of registered tables.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if no table is registered.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Serialize to `{ "tables": { ... } }`.
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Rebuild a collection from its serialized form.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::Deserialization(e.to_string()))
    }

    /// Rebuild a collection from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Deserialization(e.to_string()))
    }
}

impl Serialize for TableDefinitionCollection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Borrowed<'a> {
            tables: &'a IndexMap<String, TableDefinition>,
        }

        Borrowed {
            tables: &self.definitions,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TableDefinitionCollection {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let SerializedCollection { tables } = SerializedCollection::deserialize(deserializer)?;
        let definitions = tables
            .into_iter()
            .map(|(name, mut definition)| {
                definition.set_table(name.clone());
                (name, definition)
            })
            .collect();

        Ok(Self { definitions })
    }
}

impl<'a> IntoIterator for &'a TableDefinitionCollection {
    type Item = &'a TableDefinition;
    type IntoIter = indexmap::map::Values<'a, String, TableDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.definitions.values()
    }
}
