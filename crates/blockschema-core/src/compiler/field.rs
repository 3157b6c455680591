//! Collection detection and child table construction.
//!
//! A collection field with nested fields is rewritten to carry its linkage
//! and its nested fields become a table of their own. Nested collections
//! recurse, so child tables are registered before the table that owns them.

use super::{CompileState, Scope};
use crate::definition::{CollectionLinkage, FieldDeclaration, FieldDefinition, TableDefinition};
use crate::error::{Result, ValidationError};
use crate::naming;
use indexmap::IndexMap;
use tracing::trace;

/// Process one field declared as `column` on `scope.table`.
///
/// Fields that do not spawn a table are returned unchanged. For a collection
/// with nested fields, the child table is built and registered, and the
/// returned copy carries the generated linkage in its properties.
pub fn process_field(
    state: &mut CompileState,
    scope: Scope<'_>,
    field: &FieldDeclaration,
    column: &str,
    prefix: &str,
) -> Result<FieldDeclaration> {
    if !field.spawns_table() {
        return Ok(field.clone());
    }

    let child_table = naming::collection_table_name(prefix, scope.table, &field.identifier);
    trace!(
        package = scope.package,
        table = scope.table,
        column,
        child_table = %child_table,
        "Expanding collection field"
    );

    let processed = field
        .clone()
        .with_linkage(CollectionLinkage::new(&child_table, scope.table, column));

    // Nested tables already carry the package prefix through their owner's name.
    build_collection_table(
        state,
        scope.child(&child_table),
        field.nested_fields(),
        "",
    )?;

    Ok(processed)
}

/// Build the table `scope.table` from its field declarations and register it.
///
/// Later fields replace earlier ones sharing an identifier. An empty field
/// list still registers a table.
pub fn build_collection_table(
    state: &mut CompileState,
    scope: Scope<'_>,
    fields: &[FieldDeclaration],
    prefix: &str,
) -> Result<()> {
    if scope.depth > state.max_depth() {
        return Err(ValidationError::DepthExceeded {
            package: scope.package.to_string(),
            table: scope.table.to_string(),
            max_depth: state.max_depth(),
        }
        .into());
    }

    let mut columns = IndexMap::with_capacity(fields.len());
    for (position, field) in fields.iter().enumerate() {
        scope.require_identifier(field, position)?;

        let config = process_field(state, scope, field, &field.identifier, prefix)?;
        let previous = columns.insert(
            field.identifier.clone(),
            FieldDefinition::new(field.identifier.clone(), config),
        );
        if previous.is_some() {
            state.report(ValidationError::DuplicateColumn {
                package: scope.package.to_string(),
                table: scope.table.to_string(),
                column: field.identifier.clone(),
            })?;
        }
    }

    state.register(scope.package, TableDefinition::collection(scope.table, columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompilerConfig;
    use crate::definition::COLLECTION_TYPE;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    fn text(identifier: &str) -> FieldDeclaration {
        FieldDeclaration::new(identifier, "Text")
    }

    fn root_scope() -> Scope<'static> {
        Scope::root("foo/bar", "tt_content")
    }

    #[test]
    fn test_scalar_field_passes_through() {
        let mut state = CompileState::new(&CompilerConfig::default());
        let field = text("header").with_option("max", 50);

        let processed =
            process_field(&mut state, root_scope(), &field, "cb_foo-bar_header", "cb_foo-bar")
                .unwrap();

        assert_eq!(processed, field);
        assert!(state.tables().is_empty());
    }

    #[test]
    fn test_collection_without_fields_passes_through() {
        let mut state = CompileState::new(&CompilerConfig::default());
        let field = FieldDeclaration::new("nested_content", COLLECTION_TYPE)
            .with_option("foreign_table", "tt_content");

        let processed = process_field(
            &mut state,
            root_scope(),
            &field,
            "cb_foo-bar_nested_content",
            "cb_foo-bar",
        )
        .unwrap();

        assert_eq!(processed, field);
        assert!(state.tables().is_empty());

        let empty = FieldDeclaration::collection("items", Vec::new());
        let processed =
            process_field(&mut state, root_scope(), &empty, "cb_foo-bar_items", "cb_foo-bar")
                .unwrap();
        assert_eq!(processed, empty);
        assert!(state.tables().is_empty());
    }

    #[test]
    fn test_collection_generates_linkage_and_table() {
        let mut state = CompileState::new(&CompilerConfig::default());
        let field = FieldDeclaration::collection("items", [text("title"), text("link")]);

        let processed =
            process_field(&mut state, root_scope(), &field, "cb_foo-bar_items", "cb_foo-bar")
                .unwrap();

        let linkage = processed.linkage().unwrap();
        assert_eq!(linkage.foreign_table, "cb_foo-bar_tt_content_items");
        assert_eq!(linkage.foreign_field, "cb_foo-bar_items");
        assert_eq!(linkage.foreign_table_field, "tt_content");
        assert_eq!(
            linkage.foreign_match_fields.into_iter().collect::<Vec<_>>(),
            vec![("tt_content".to_string(), "cb_foo-bar_items".to_string())]
        );

        let child = state.tables().get_table("cb_foo-bar_tt_content_items").unwrap();
        assert_eq!(child.column_names().collect::<Vec<_>>(), vec!["title", "link"]);
        assert!(!child.is_root_table());
    }

    #[test]
    fn test_empty_prefix_omits_separator() {
        let mut state = CompileState::new(&CompilerConfig::default());
        let field = FieldDeclaration::collection("items", [text("title")]);

        let processed = process_field(&mut state, root_scope(), &field, "items", "").unwrap();

        assert_eq!(processed.linkage().unwrap().foreign_table, "tt_content_items");
        assert!(state.tables().has_table("tt_content_items"));
    }

    #[test]
    fn test_nested_collections_register_depth_first() {
        let mut state = CompileState::new(&CompilerConfig::default());
        let field = FieldDeclaration::collection(
            "items",
            [
                text("title"),
                FieldDeclaration::collection("links", [text("url")]),
            ],
        );

        process_field(&mut state, root_scope(), &field, "cb_foo-bar_items", "cb_foo-bar").unwrap();

        assert_eq!(
            state.tables().table_names().collect::<Vec<_>>(),
            vec![
                "cb_foo-bar_tt_content_items_links",
                "cb_foo-bar_tt_content_items",
            ]
        );

        let parent = state.tables().get_table("cb_foo-bar_tt_content_items").unwrap();
        let links = parent.field("links").unwrap().config.linkage().unwrap();
        assert_eq!(links.foreign_table, "cb_foo-bar_tt_content_items_links");
        assert_eq!(links.foreign_field, "links");
        assert_eq!(links.foreign_table_field, "cb_foo-bar_tt_content_items");
    }

    #[test]
    fn test_empty_field_list_registers_empty_table() {
        let mut state = CompileState::new(&CompilerConfig::default());

        build_collection_table(&mut state, root_scope().child("cb_empty"), &[], "").unwrap();

        let table = state.tables().get_table("cb_empty").unwrap();
        assert!(table.fields().is_empty());
    }

    #[test]
    fn test_duplicate_identifier_later_wins() {
        let mut state = CompileState::new(&CompilerConfig::default());
        let fields = [
            text("title"),
            text("link"),
            FieldDeclaration::new("title", "Textarea"),
        ];

        build_collection_table(&mut state, root_scope().child("cb_items"), &fields, "").unwrap();

        let table = state.tables().get_table("cb_items").unwrap();
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["title", "link"]);
        assert_eq!(table.field("title").unwrap().config.field_type, "Textarea");
        assert_eq!(state.warnings().len(), 1);
    }

    #[test]
    fn test_missing_nested_identifier_is_rejected() {
        let mut state = CompileState::new(&CompilerConfig::default());
        let field = FieldDeclaration::collection("items", [text("title"), text("")]);

        let err = process_field(&mut state, root_scope(), &field, "cb_foo-bar_items", "cb_foo-bar")
            .unwrap_err();

        match err {
            Error::Validation(ValidationError::EmptyIdentifier {
                package,
                table,
                position,
            }) => {
                assert_eq!(package, "foo/bar");
                assert_eq!(table, "cb_foo-bar_tt_content_items");
                assert_eq!(position, 1);
            }
            other => panic!("expected EmptyIdentifier, got {other:?}"),
        }
    }

    #[test]
    fn test_depth_limit() {
        let config = CompilerConfig::default().with_max_depth(1);
        let mut state = CompileState::new(&config);
        let field = FieldDeclaration::collection(
            "items",
            [FieldDeclaration::collection("links", [text("url")])],
        );

        let err = process_field(&mut state, root_scope(), &field, "cb_foo-bar_items", "cb_foo-bar")
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Validation(ValidationError::DepthExceeded { max_depth: 1, .. })
        ));
    }
}
