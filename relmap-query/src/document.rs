//! Query info: the field being resolved, its nodes and the fragment table.
//!
//! A GraphQL server hands each resolver the nodes of the field it resolves
//! along with the document's fragments. [`QueryInfo`] is that view. It can
//! be assembled by hand or built from a parsed document:
//!
//! ```rust
//! use relmap_query::QueryInfo;
//!
//! let info = QueryInfo::parse(
//!     "query products { products { id store { owner { name } } } }",
//!     "products",
//! )?;
//!
//! assert!(info.is_selected("store.owner")?);
//! assert!(!info.is_selected("owner")?);
//! # Ok::<(), relmap_query::QueryError>(())
//! ```

use async_graphql_parser::types::{self as ast, ExecutableDocument};
use smol_str::SmolStr;
use tracing::debug;

use crate::error::{QueryError, QueryResult};
use crate::selection::{
    Field, FragmentDefinition, Fragments, InlineFragment, Selection, SelectionSet, find_named_field,
};

/// The resolver-facing view of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryInfo {
    /// Name of the field being resolved.
    pub field_name: SmolStr,
    /// The nodes selecting that field.
    pub field_nodes: Vec<Selection>,
    /// Fragments defined in the document.
    pub fragments: Fragments,
}

impl QueryInfo {
    /// Create query info from its parts.
    pub fn new(
        field_name: impl Into<SmolStr>,
        field_nodes: impl IntoIterator<Item = Selection>,
        fragments: Fragments,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            field_nodes: field_nodes.into_iter().collect(),
            fragments,
        }
    }

    /// Parse a document with a single operation and take `field_name` from
    /// its root selection set.
    pub fn parse(source: &str, field_name: &str) -> QueryResult<Self> {
        Self::parse_operation(source, None, field_name)
    }

    /// Parse a document and take `field_name` from the root selection set of
    /// the named operation (or the only operation when `operation_name` is `None`).
    pub fn parse_operation(
        source: &str,
        operation_name: Option<&str>,
        field_name: &str,
    ) -> QueryResult<Self> {
        debug!(source_len = source.len(), field = field_name, "QueryInfo::parse()");

        let document = async_graphql_parser::parse_query(source)
            .map_err(|e| QueryError::invalid_document(e.to_string()).with_source(e))?;

        Self::from_document(&document, operation_name, field_name)
    }

    /// Build query info from an already parsed document.
    pub fn from_document(
        document: &ExecutableDocument,
        operation_name: Option<&str>,
        field_name: &str,
    ) -> QueryResult<Self> {
        let operation = select_operation(document, operation_name)?;

        let fragments = document
            .fragments
            .iter()
            .map(|(name, fragment)| FragmentDefinition {
                name: SmolStr::new(name.as_str()),
                type_condition: SmolStr::new(fragment.node.type_condition.node.on.node.as_str()),
                selection_set: convert_selection_set(&fragment.node.selection_set.node),
            })
            .collect::<Fragments>();

        let root = convert_selection_set(&operation.selection_set.node);
        let mut field_nodes = Vec::new();
        collect_fields(field_name, &root, &fragments, &mut field_nodes)?;

        Ok(Self {
            field_name: SmolStr::new(field_name),
            field_nodes,
            fragments,
        })
    }

    /// The first node selecting the field being resolved.
    pub fn root_node(&self) -> QueryResult<&Selection> {
        self.field_nodes
            .iter()
            .find(|node| node.name() == Some(self.field_name.as_str()))
            .ok_or_else(|| QueryError::field_not_found(self.field_name.as_str()))
    }

    /// Find the node at a dotted path below the field being resolved.
    pub fn find(&self, path: &str) -> QueryResult<Option<&Selection>> {
        find_named_field(path, self.root_node()?, &self.fragments)
    }

    /// Check if a dotted path is selected below the field being resolved.
    pub fn is_selected(&self, path: &str) -> QueryResult<bool> {
        self.find(path).map(|found| found.is_some())
    }
}

fn select_operation<'a>(
    document: &'a ExecutableDocument,
    operation_name: Option<&str>,
) -> QueryResult<&'a ast::OperationDefinition> {
    let mut operations = document.operations.iter();

    let operation = match operation_name {
        Some(wanted) => operations
            .find(|(name, _)| name.map(|name| name.as_str()) == Some(wanted))
            .ok_or_else(|| QueryError::invalid_document(format!("no operation named \"{}\"", wanted)))?,
        None => {
            let first = operations
                .next()
                .ok_or_else(|| QueryError::invalid_document("document contains no operation"))?;
            if operations.next().is_some() {
                return Err(QueryError::invalid_document(
                    "document contains several operations; an operation name is required",
                ));
            }
            first
        }
    };

    Ok(&operation.1.node)
}

/// Collect the fields named `name` from a root selection set, looking
/// through fragments used at the root.
fn collect_fields(
    name: &str,
    selection_set: &SelectionSet,
    fragments: &Fragments,
    fields: &mut Vec<Selection>,
) -> QueryResult<()> {
    for selection in selection_set {
        match selection {
            Selection::Field(field) => {
                if field.name == name {
                    fields.push(selection.clone());
                }
            }
            Selection::FragmentSpread(_) | Selection::InlineFragment(_) => {
                if let Some(inner) = selection.selection_set(fragments)? {
                    collect_fields(name, inner, fragments, fields)?;
                }
            }
        }
    }
    Ok(())
}

fn convert_selection_set(selection_set: &ast::SelectionSet) -> SelectionSet {
    selection_set
        .items
        .iter()
        .map(|item| convert_selection(&item.node))
        .collect()
}

fn convert_selection(selection: &ast::Selection) -> Selection {
    match selection {
        ast::Selection::Field(field) => {
            let field = &field.node;
            let items = &field.selection_set.node;

            Selection::Field(Field {
                name: SmolStr::new(field.name.node.as_str()),
                alias: field.alias.as_ref().map(|alias| SmolStr::new(alias.node.as_str())),
                selection_set: (!items.items.is_empty()).then(|| convert_selection_set(items)),
            })
        }
        ast::Selection::FragmentSpread(spread) => {
            Selection::spread(spread.node.fragment_name.node.as_str())
        }
        ast::Selection::InlineFragment(inline) => Selection::InlineFragment(InlineFragment {
            type_condition: inline
                .node
                .type_condition
                .as_ref()
                .map(|condition| SmolStr::new(condition.node.on.node.as_str())),
            selection_set: convert_selection_set(&inline.node.selection_set.node),
        }),
    }
}
