//! Blockschema Core - compiles content block declarations into table definitions.
//!
//! Independently authored packages declare fields for a shared root table.
//! This crate merges them into one root table definition with collision-free
//! column names, expands collection fields into child tables, and wires the
//! linkage between parents and children.
//!
//! # Usage
//!
//! ```rust
//! use blockschema_core::{compile, CompilerConfig, FieldDeclaration, PackageDeclaration};
//!
//! let packages = vec![PackageDeclaration::new("foo/bar")
//!     .with_field(FieldDeclaration::new("header", "Text"))
//!     .with_field(FieldDeclaration::collection(
//!         "items",
//!         [FieldDeclaration::new("title", "Text")],
//!     ))];
//!
//! let compilation = compile(&packages, &CompilerConfig::default()).unwrap();
//! let root = compilation.tables.get_table("tt_content").unwrap();
//! assert!(root.has_field("cb_foo-bar_header"));
//! assert!(compilation.tables.has_table("cb_foo-bar_tt_content_items"));
//! ```

pub mod compiler;
pub mod config;
pub mod definition;
pub mod error;
pub mod naming;
pub mod parent_fields;

pub use compiler::{compile, Compilation, TableDefinitionCompiler};
pub use config::CompilerConfig;
pub use definition::{
    BlockDeclaration, CollectionLinkage, ElementDefinition, FieldDeclaration, FieldDefinition,
    FieldProperties, PackageDeclaration, TableDefinition, TableDefinitionCollection,
    COLLECTION_TYPE,
};
pub use error::{Error, Result, ValidationError};
pub use parent_fields::{content_element_parent_fields, DEFAULT_PARENT_FIELD};
