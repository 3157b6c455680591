//! Definition model: declarations in, table definitions out.

mod collection;
mod element;
mod field;
mod package;
mod table;

pub use collection::TableDefinitionCollection;
pub use element::ElementDefinition;
pub use field::{
    CollectionLinkage, FieldDeclaration, FieldDefinition, FieldProperties, COLLECTION_TYPE,
};
pub use package::{BlockDeclaration, PackageDeclaration};
pub use table::TableDefinition;
