//! Compiler configuration.

use crate::naming;
use serde::Deserialize;

/// Default shared root table.
pub const DEFAULT_ROOT_TABLE: &str = "tt_content";

/// Default prefix for generated collection table names.
pub const DEFAULT_COLLECTION_TABLE_PREFIX: &str = "cb_";

/// Default prefix for generated root table columns.
pub const DEFAULT_COLUMN_PREFIX: &str = "cb_";

/// Default base path under which packages live.
pub const DEFAULT_BASE_PATH: &str = "typo3conf/contentBlocks/";

/// Default public asset sub-path of a package.
pub const DEFAULT_PUBLIC_PATH: &str = "dist";

/// Default private asset sub-path of a package.
pub const DEFAULT_PRIVATE_PATH: &str = "src";

/// Default limit for collection nesting.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Naming policy and limits for one compilation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Table that receives every package's top-level fields.
    pub root_table: String,

    /// Prefix for collection table names, followed by the normalized package name.
    pub collection_table_prefix: String,

    /// Prefix for root table columns, followed by the normalized package name.
    pub column_prefix: String,

    /// Base path of the package directories.
    pub base_path: String,

    /// Public asset directory inside a package.
    pub public_path: String,

    /// Private asset directory inside a package.
    pub private_path: String,

    /// Maximum collection nesting depth below the root table.
    pub max_depth: usize,

    /// Treat duplicate columns and tables as errors instead of warnings.
    pub strict: bool,
}

impl CompilerConfig {
    /// Create a configuration with the default naming policy.
    pub fn new() -> Self {
        Self {
            root_table: DEFAULT_ROOT_TABLE.to_string(),
            collection_table_prefix: DEFAULT_COLLECTION_TABLE_PREFIX.to_string(),
            column_prefix: DEFAULT_COLUMN_PREFIX.to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            public_path: DEFAULT_PUBLIC_PATH.to_string(),
            private_path: DEFAULT_PRIVATE_PATH.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            strict: false,
        }
    }

    /// Set the root table.
    pub fn with_root_table(mut self, table: impl Into<String>) -> Self {
        self.root_table = table.into();
        self
    }

    /// Set the collection table prefix.
    pub fn with_collection_table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.collection_table_prefix = prefix.into();
        self
    }

    /// Set the root column prefix.
    pub fn with_column_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.column_prefix = prefix.into();
        self
    }

    /// Set the package base path.
    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = path.into();
        self
    }

    /// Set the public and private asset sub-paths.
    pub fn with_asset_paths(
        mut self,
        public_path: impl Into<String>,
        private_path: impl Into<String>,
    ) -> Self {
        self.public_path = public_path.into();
        self.private_path = private_path.into();
        self
    }

    /// Set the maximum collection nesting depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Enable or disable strict mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Collection table prefix for a package, e.g. `cb_foo-bar`.
    pub fn collection_table_prefix_for(&self, package_name: &str) -> String {
        format!(
            "{}{}",
            self.collection_table_prefix,
            naming::normalize_package_name(package_name)
        )
    }

    /// Root column prefix for a package, e.g. `cb_foo-bar`.
    pub fn column_prefix_for(&self, package_name: &str) -> String {
        format!(
            "{}{}",
            self.column_prefix,
            naming::normalize_package_name(package_name)
        )
    }

    /// Directory of a package below the base path, with a trailing slash.
    pub fn package_path(&self, package: &str) -> String {
        let base = self.base_path.trim_end_matches('/');
        if base.is_empty() {
            format!("{package}/")
        } else {
            format!("{base}/{package}/")
        }
    }

    /// Public asset directory of a package.
    pub fn public_path_for(&self, package: &str) -> String {
        format!("{}{}/", self.package_path(package), self.public_path)
    }

    /// Private asset directory of a package.
    pub fn private_path_for(&self, package: &str) -> String {
        format!("{}{}/", self.package_path(package), self.private_path)
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self::new()
    }
}
