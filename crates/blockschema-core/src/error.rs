//! Core error types.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while compiling or querying table definitions.
#[derive(Debug, Error)]
pub enum Error {
    /// Lookup of a table that was never registered.
    #[error("the table \"{0}\" does not exist")]
    TableNotFound(String),

    /// Authoring problem in a package declaration.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("deserialization error: {0}")]
    Deserialization(String),
}

/// A problem found in the declarations of a single package.
///
/// `EmptyIdentifier`, `InvalidPackageName` and `DepthExceeded` always abort
/// the compilation. The duplicate variants are collected as warnings unless
/// the compiler runs in strict mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A field declaration without an identifier.
    #[error("package '{package}': field #{position} of table '{table}' has no identifier")]
    EmptyIdentifier {
        /// Package that declared the field.
        package: String,
        /// Table the field was meant for.
        table: String,
        /// Zero-based position in the declaring field list.
        position: usize,
    },

    /// A package name that does not split into vendor and package.
    #[error("package name '{name}' must have the form 'vendor/package'")]
    InvalidPackageName {
        /// The offending name.
        name: String,
    },

    /// The same column was derived twice for one table.
    #[error("package '{package}': column '{column}' is defined more than once on table '{table}'")]
    DuplicateColumn {
        /// Package whose field produced the second definition.
        package: String,
        /// Owning table.
        table: String,
        /// Column name.
        column: String,
    },

    /// A table name was registered twice; the first registration is kept.
    #[error("package '{package}': table '{table}' is already registered")]
    DuplicateTable {
        /// Package whose declarations produced the second table.
        package: String,
        /// Table name.
        table: String,
    },

    /// Collection nesting went deeper than the configured limit.
    #[error("package '{package}': collections nested below table '{table}' exceed the maximum depth of {max_depth}")]
    DepthExceeded {
        /// Package that declared the nesting.
        package: String,
        /// Table at which the limit was hit.
        table: String,
        /// Configured limit.
        max_depth: usize,
    },
}

impl ValidationError {
    /// Whether this finding aborts compilation even outside strict mode.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ValidationError::EmptyIdentifier { .. }
                | ValidationError::InvalidPackageName { .. }
                | ValidationError::DepthExceeded { .. }
        )
    }

    /// The package the finding refers to.
    pub fn package(&self) -> &str {
        match self {
            ValidationError::EmptyIdentifier { package, .. }
            | ValidationError::DuplicateColumn { package, .. }
            | ValidationError::DuplicateTable { package, .. }
            | ValidationError::DepthExceeded { package, .. } => package,
            ValidationError::InvalidPackageName { name } => name,
        }
    }

    /// The table the finding refers to, if any.
    pub fn table(&self) -> Option<&str> {
        match self {
            ValidationError::EmptyIdentifier { table, .. }
            | ValidationError::DuplicateColumn { table, .. }
            | ValidationError::DuplicateTable { table, .. }
            | ValidationError::DepthExceeded { table, .. } => Some(table),
            ValidationError::InvalidPackageName { .. } => None,
        }
    }

    /// The column the finding refers to, if any.
    pub fn column(&self) -> Option<&str> {
        match self {
            ValidationError::DuplicateColumn { column, .. } => Some(column),
            _ => None,
        }
    }
}
