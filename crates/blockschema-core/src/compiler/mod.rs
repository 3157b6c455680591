//! Aggregation of package declarations into table definitions.
//!
//! Every package's top-level fields are merged into the shared root table
//! under package-prefixed column names. Collection fields spawn child tables
//! as a side effect of processing, so all child tables are registered before
//! the root table is.

pub mod field;

use crate::config::CompilerConfig;
use crate::definition::{
    ElementDefinition, FieldDeclaration, FieldDefinition, PackageDeclaration, TableDefinition,
    TableDefinitionCollection,
};
use crate::error::{Error, Result, ValidationError};
use crate::naming;
use indexmap::IndexMap;
use tracing::{debug, info, instrument, warn};

/// Output of one compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct Compilation {
    /// Compiled tables, children before their owners, root table last.
    pub tables: TableDefinitionCollection,
    /// Non-fatal findings, in the order they were found.
    pub warnings: Vec<ValidationError>,
}

impl Compilation {
    /// Drop the warnings and keep the tables.
    pub fn into_tables(self) -> TableDefinitionCollection {
        self.tables
    }

    /// Check if the compilation produced warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Position of the field list currently being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope<'a> {
    /// Package that declared the fields.
    pub package: &'a str,
    /// Table the fields belong to.
    pub table: &'a str,
    /// Collection nesting depth, 0 for the root table.
    pub depth: usize,
}

impl<'a> Scope<'a> {
    /// Scope of a package's top-level fields.
    pub fn root(package: &'a str, table: &'a str) -> Self {
        Self {
            package,
            table,
            depth: 0,
        }
    }

    /// Scope of the fields of a child table.
    pub fn child<'b>(&self, table: &'b str) -> Scope<'b>
    where
        'a: 'b,
    {
        Scope {
            package: self.package,
            table,
            depth: self.depth + 1,
        }
    }

    fn require_identifier(&self, field: &FieldDeclaration, position: usize) -> Result<()> {
        if field.identifier.trim().is_empty() {
            return Err(ValidationError::EmptyIdentifier {
                package: self.package.to_string(),
                table: self.table.to_string(),
                position,
            }
            .into());
        }
        Ok(())
    }
}

/// Tables and findings accumulated during one compilation.
#[derive(Debug)]
pub struct CompileState {
    tables: TableDefinitionCollection,
    warnings: Vec<ValidationError>,
    max_depth: usize,
    strict: bool,
}

impl CompileState {
    /// Create an empty state for the given configuration.
    pub fn new(config: &CompilerConfig) -> Self {
        Self {
            tables: TableDefinitionCollection::new(),
            warnings: Vec::new(),
            max_depth: config.max_depth,
            strict: config.strict,
        }
    }

    /// Tables registered so far.
    pub fn tables(&self) -> &TableDefinitionCollection {
        &self.tables
    }

    /// Warnings collected so far.
    pub fn warnings(&self) -> &[ValidationError] {
        &self.warnings
    }

    fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Record a finding; fails if it is fatal or strict mode is on.
    fn report(&mut self, finding: ValidationError) -> Result<()> {
        if self.strict || finding.is_fatal() {
            return Err(Error::Validation(finding));
        }

        warn!(
            package = finding.package(),
            table = finding.table(),
            column = finding.column(),
            finding = %finding,
            "Declaration problem"
        );
        self.warnings.push(finding);
        Ok(())
    }

    /// Register a table, reporting a duplicate name.
    fn register(&mut self, package: &str, definition: TableDefinition) -> Result<()> {
        let table = definition.table().to_string();
        if self.tables.add_table(definition) {
            return Ok(());
        }

        self.report(ValidationError::DuplicateTable {
            package: package.to_string(),
            table,
        })
    }

    fn finish(self) -> Compilation {
        Compilation {
            tables: self.tables,
            warnings: self.warnings,
        }
    }
}

/// Compiles package declarations against one configuration.
pub struct TableDefinitionCompiler<'a> {
    config: &'a CompilerConfig,
}

impl<'a> TableDefinitionCompiler<'a> {
    /// Create a compiler.
    pub fn new(config: &'a CompilerConfig) -> Self {
        Self { config }
    }

    /// Compile packages, in order, into a fresh collection.
    #[instrument(skip_all, fields(packages = packages.len(), root_table = %self.config.root_table))]
    pub fn compile(&self, packages: &[PackageDeclaration]) -> Result<Compilation> {
        let root_table = self.config.root_table.as_str();
        let mut state = CompileState::new(self.config);
        let mut columns: IndexMap<String, FieldDefinition> = IndexMap::new();
        let mut elements = Vec::with_capacity(packages.len());
        let mut type_field = None;

        for package in packages {
            let name = package.composer_name.as_str();
            let (vendor, package_name) = naming::split_package_name(name).ok_or_else(|| {
                ValidationError::InvalidPackageName {
                    name: name.to_string(),
                }
            })?;

            let collection_prefix = self.config.collection_table_prefix_for(name);
            let column_prefix = self.config.column_prefix_for(name);
            let scope = Scope::root(name, root_table);

            for (position, declaration) in package.fields().iter().enumerate() {
                scope.require_identifier(declaration, position)?;

                let column = naming::column_name(&column_prefix, &declaration.identifier);
                let config = field::process_field(
                    &mut state,
                    scope,
                    declaration,
                    &column,
                    &collection_prefix,
                )?;

                if columns
                    .insert(column.clone(), FieldDefinition::new(column.clone(), config))
                    .is_some()
                {
                    state.report(ValidationError::DuplicateColumn {
                        package: name.to_string(),
                        table: root_table.to_string(),
                        column,
                    })?;
                }
            }

            if type_field.is_none() {
                type_field = package.yaml.type_field.clone();
            }

            elements.push(ElementDefinition {
                composer_name: name.to_string(),
                identifier: name.to_string(),
                columns: columns.keys().cloned().collect(),
                vendor: vendor.to_string(),
                package: package_name.to_string(),
                public_path: self.config.public_path_for(package_name),
                private_path: self.config.private_path_for(package_name),
                wizard_group: package.yaml.group.clone().unwrap_or_default(),
                icon: package.icon.clone(),
                icon_provider: package.icon_provider.clone(),
                table: package
                    .yaml
                    .table
                    .clone()
                    .unwrap_or_else(|| root_table.to_string()),
                type_field: package.yaml.type_field.clone(),
            });

            debug!(
                package = name,
                fields = package.fields().len(),
                columns = columns.len(),
                "Processed package"
            );
        }

        let last_package = packages
            .last()
            .map(|p| p.composer_name.as_str())
            .unwrap_or_default();
        state.register(
            last_package,
            TableDefinition::new(root_table, columns, elements).with_type_field(type_field),
        )?;

        let compilation = state.finish();
        info!(
            packages = packages.len(),
            tables = compilation.tables.len(),
            warnings = compilation.warnings.len(),
            "Compiled table definitions"
        );

        Ok(compilation)
    }
}

/// Compile packages with the given configuration.
pub fn compile(packages: &[PackageDeclaration], config: &CompilerConfig) -> Result<Compilation> {
    TableDefinitionCompiler::new(config).compile(packages)
}
