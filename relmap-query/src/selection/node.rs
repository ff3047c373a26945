//! Selection node types.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::error::{QueryError, QueryResult};

/// A single entry in a selection set.
///
/// The set of node kinds is fixed by the GraphQL grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A named field, optionally with a nested selection set.
    Field(Field),
    /// A reference to a named fragment (`...OwnerFragment`).
    FragmentSpread(FragmentSpread),
    /// A type-conditional fragment written in place (`... on Image { id }`).
    InlineFragment(InlineFragment),
}

impl Selection {
    /// Create a scalar field with no selection set.
    pub fn leaf(name: impl Into<SmolStr>) -> Self {
        Self::Field(Field::new(name))
    }

    /// Create a field with a nested selection set.
    pub fn field(name: impl Into<SmolStr>, items: impl IntoIterator<Item = Selection>) -> Self {
        Self::Field(Field::new(name).with_selection_set(items))
    }

    /// Create a fragment spread.
    pub fn spread(fragment_name: impl Into<SmolStr>) -> Self {
        Self::FragmentSpread(FragmentSpread {
            fragment_name: fragment_name.into(),
        })
    }

    /// Create an inline fragment.
    pub fn inline(
        type_condition: Option<&str>,
        items: impl IntoIterator<Item = Selection>,
    ) -> Self {
        Self::InlineFragment(InlineFragment {
            type_condition: type_condition.map(SmolStr::new),
            selection_set: items.into_iter().collect(),
        })
    }

    /// The node's name: the field name (never the alias) for fields and the
    /// fragment name for spreads. Inline fragments have no name.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Field(field) => Some(&field.name),
            Self::FragmentSpread(spread) => Some(&spread.fragment_name),
            Self::InlineFragment(_) => None,
        }
    }

    /// The node's effective child selection set.
    ///
    /// Spreads are resolved through `fragments`; an undefined fragment is an
    /// error. Scalar fields return `Ok(None)`.
    pub fn selection_set<'a>(&'a self, fragments: &'a Fragments) -> QueryResult<Option<&'a SelectionSet>> {
        match self {
            Self::Field(field) => Ok(field.selection_set.as_ref()),
            Self::InlineFragment(inline) => Ok(Some(&inline.selection_set)),
            Self::FragmentSpread(spread) => fragments
                .resolve(&spread.fragment_name)
                .map(|fragment| Some(&fragment.selection_set)),
        }
    }

    /// Get the field if this is a field node.
    pub fn as_field(&self) -> Option<&Field> {
        match self {
            Self::Field(field) => Some(field),
            _ => None,
        }
    }
}

impl From<Field> for Selection {
    fn from(field: Field) -> Self {
        Self::Field(field)
    }
}

/// A field selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name as declared on the schema type.
    pub name: SmolStr,
    /// Response alias, if any.
    pub alias: Option<SmolStr>,
    /// Nested selections; `None` for scalar fields.
    pub selection_set: Option<SelectionSet>,
}

impl Field {
    /// Create a field with no alias and no selection set.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            selection_set: None,
        }
    }

    /// Set the alias.
    pub fn with_alias(mut self, alias: impl Into<SmolStr>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Set the nested selection set.
    pub fn with_selection_set(mut self, items: impl IntoIterator<Item = Selection>) -> Self {
        self.selection_set = Some(items.into_iter().collect());
        self
    }

    /// The key this field appears under in the response.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// A named fragment reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentSpread {
    /// Name of the referenced fragment.
    pub fragment_name: SmolStr,
}

/// An inline fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineFragment {
    /// `on Type` condition; `None` for `... @include(if: $x) { }` style fragments.
    pub type_condition: Option<SmolStr>,
    /// Selections applied when the condition holds.
    pub selection_set: SelectionSet,
}

/// An ordered list of selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    /// Selections in declaration order.
    pub items: Vec<Selection>,
}

impl SelectionSet {
    /// Create an empty selection set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate the selections in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Selection> {
        self.items.iter()
    }

    /// Number of selections.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if there are no selections.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Selection> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = Selection>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a Selection;
    type IntoIter = std::slice::Iter<'a, Selection>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A named fragment definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentDefinition {
    /// Fragment name.
    pub name: SmolStr,
    /// The type the fragment applies to.
    pub type_condition: SmolStr,
    /// The fragment's selections.
    pub selection_set: SelectionSet,
}

impl FragmentDefinition {
    /// Create a fragment definition.
    pub fn new(
        name: impl Into<SmolStr>,
        type_condition: impl Into<SmolStr>,
        items: impl IntoIterator<Item = Selection>,
    ) -> Self {
        Self {
            name: name.into(),
            type_condition: type_condition.into(),
            selection_set: items.into_iter().collect(),
        }
    }
}

/// Fragment table: fragment name to definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragments {
    definitions: IndexMap<SmolStr, FragmentDefinition>,
}

impl Fragments {
    /// Create an empty fragment table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fragment definition, replacing any previous one with the same name.
    pub fn insert(&mut self, fragment: FragmentDefinition) {
        self.definitions.insert(fragment.name.clone(), fragment);
    }

    /// Add a fragment definition (builder form).
    pub fn with(mut self, fragment: FragmentDefinition) -> Self {
        self.insert(fragment);
        self
    }

    /// Look up a fragment by name.
    pub fn get(&self, name: &str) -> Option<&FragmentDefinition> {
        self.definitions.get(name)
    }

    /// Look up a fragment that must exist.
    pub fn resolve(&self, name: &str) -> QueryResult<&FragmentDefinition> {
        self.get(name)
            .ok_or_else(|| QueryError::unresolved_fragment(name))
    }

    /// Check if a fragment is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Number of fragments.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterate the fragment definitions.
    pub fn iter(&self) -> impl Iterator<Item = &FragmentDefinition> {
        self.definitions.values()
    }
}

impl FromIterator<FragmentDefinition> for Fragments {
    fn from_iter<T: IntoIterator<Item = FragmentDefinition>>(iter: T) -> Self {
        let mut fragments = Self::new();
        for fragment in iter {
            fragments.insert(fragment);
        }
        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_of_each_kind() {
        let field = Selection::Field(Field::new("owner").with_alias("seller"));
        assert_eq!(field.name(), Some("owner"));
        assert_eq!(field.as_field().map(Field::response_key), Some("seller"));

        assert_eq!(Selection::spread("OwnerFragment").name(), Some("OwnerFragment"));
        assert_eq!(Selection::inline(Some("Image"), []).name(), None);
    }

    #[test]
    fn test_selection_set_of_field_and_inline() {
        let fragments = Fragments::new();

        let scalar = Selection::leaf("id");
        assert!(scalar.selection_set(&fragments).unwrap().is_none());

        let object = Selection::field("owner", [Selection::leaf("id")]);
        assert_eq!(object.selection_set(&fragments).unwrap().map(SelectionSet::len), Some(1));

        let inline = Selection::inline(Some("Video"), [Selection::leaf("duration")]);
        assert_eq!(inline.selection_set(&fragments).unwrap().map(SelectionSet::len), Some(1));
    }

    #[test]
    fn test_selection_set_of_spread() {
        let fragments = Fragments::new().with(FragmentDefinition::new(
            "OwnerFragment",
            "Owner",
            [Selection::leaf("id"), Selection::leaf("name")],
        ));

        let spread = Selection::spread("OwnerFragment");
        let set = spread.selection_set(&fragments).unwrap().unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_selection_set_of_unknown_spread_fails() {
        let err = Selection::spread("Missing")
            .selection_set(&Fragments::new())
            .unwrap_err();

        assert!(err.is_unresolved_fragment());
        assert_eq!(err.context.fragment.as_deref(), Some("Missing"));
    }

    #[test]
    fn test_fragments_from_iter() {
        let fragments: Fragments = vec![
            FragmentDefinition::new("A", "Product", []),
            FragmentDefinition::new("B", "Store", []),
        ]
        .into_iter()
        .collect();

        assert_eq!(fragments.len(), 2);
        assert!(fragments.contains("A"));
        assert!(fragments.resolve("C").is_err());
    }
}
