//! Resolution of GraphQL selections into relation maps.

use smol_str::SmolStr;
use tracing::{debug, trace};

use super::map::RelationMap;
use crate::document::QueryInfo;
use crate::error::{QueryError, QueryResult};
use crate::metadata::{EntityMetadata, PropertyMetadata};
use crate::selection::{Fragments, PATH_SEPARATOR, Selection, path_segments};

/// Builds relation maps for entities from the fields selected in a query.
///
/// The resolver walks the selection tree below a base node. Each named
/// field is classified against the current entity:
/// - a relation is recorded and becomes the entity for its children
/// - an embedded object extends the property path for its children
/// - anything else is transparent; its children are still searched
///
/// ```rust,ignore
/// let resolver = RelationResolver::new(&registry);
/// let relations = resolver.resolve_for_query(&"Product".into(), &info, None)?;
/// repository.find_with(relations.to_paths());
/// ```
#[derive(Debug, Clone)]
pub struct RelationResolver<M> {
    metadata: M,
}

impl<M: EntityMetadata> RelationResolver<M> {
    /// Create a resolver over an entity metadata provider.
    pub fn new(metadata: M) -> Self {
        Self { metadata }
    }

    /// Get the metadata provider.
    pub fn metadata(&self) -> &M {
        &self.metadata
    }

    /// Resolve relations for the field currently being resolved in `info`.
    ///
    /// With `path`, resolution starts at the field found at that dotted path
    /// below the current field instead, and `entity` must be the entity at
    /// that position.
    pub fn resolve_for_query(
        &self,
        entity: &M::Entity,
        info: &QueryInfo,
        path: Option<&str>,
    ) -> QueryResult<RelationMap> {
        let root = info.root_node()?;

        let base = match path {
            Some(path) => info
                .find(path)?
                .ok_or_else(|| QueryError::field_not_found(path).with_entity(format!("{:?}", entity)))?,
            None => root,
        };

        debug!(entity = ?entity, field = %info.field_name, path = ?path, "RelationResolver::resolve_for_query()");

        self.resolve(entity, base, &info.fragments)
    }

    /// Resolve relations for the query and flatten them to dotted paths.
    pub fn resolve_paths_for_query(
        &self,
        entity: &M::Entity,
        info: &QueryInfo,
        path: Option<&str>,
    ) -> QueryResult<Vec<String>> {
        self.resolve_for_query(entity, info, path)
            .map(|relations| relations.to_paths())
    }

    /// Resolve relations for `entity` from the selections below `base`.
    pub fn resolve(
        &self,
        entity: &M::Entity,
        base: &Selection,
        fragments: &Fragments,
    ) -> QueryResult<RelationMap> {
        self.resolve_level(entity, base, fragments, &[], 0)
    }

    /// Resolve from a position already partway down a relation path.
    ///
    /// `base_property_path` is the dotted property path walked so far from
    /// the root entity and `level` is how many of its leading segments
    /// belong to entities already left behind. Recorded relations are
    /// prefixed with `base_property_path`.
    pub fn resolve_from(
        &self,
        entity: &M::Entity,
        base: &Selection,
        fragments: &Fragments,
        base_property_path: &str,
        level: usize,
    ) -> QueryResult<RelationMap> {
        let path: Vec<SmolStr> = path_segments(base_property_path).map(SmolStr::new).collect();
        self.resolve_level(entity, base, fragments, &path, level)
    }

    fn resolve_level(
        &self,
        entity: &M::Entity,
        base: &Selection,
        fragments: &Fragments,
        base_path: &[SmolStr],
        level: usize,
    ) -> QueryResult<RelationMap> {
        let mut relations = RelationMap::new();

        let Some(selection_set) = base.selection_set(fragments)? else {
            return Ok(relations);
        };

        for selection in selection_set {
            let mut property_path = base_path.to_vec();
            let mut target: Option<M::Entity> = None;
            let mut next_level = level;

            // only fields name properties; fragment selections apply to the same entity
            if let Some(name) = selection.as_field().map(|field| field.name.as_str()) {
                let relative_path = relative_property_path(&property_path, level, name);

                match self.metadata.property(entity, &relative_path) {
                    Some(PropertyMetadata::Relation { property, target: related }) => {
                        trace!(entity = ?entity, path = %relative_path, target = ?related, "relation");
                        property_path.push(property);
                        // the related entity's own properties start after this segment
                        next_level = property_path.len();
                        target = Some(related);
                        relations = relations.insert(property_path.iter().cloned());
                    }
                    Some(PropertyMetadata::Embedded { property }) => {
                        trace!(entity = ?entity, path = %relative_path, "embedded");
                        property_path.push(property);
                    }
                    None => {}
                }
            }

            let nested = self.resolve_level(
                target.as_ref().unwrap_or(entity),
                selection,
                fragments,
                &property_path,
                next_level,
            )?;
            relations = relations.merge(nested);
        }

        Ok(relations)
    }

    /// Find the node at a dotted path below the current field of `info`.
    pub fn find_query_node<'a>(&self, path: &str, info: &'a QueryInfo) -> QueryResult<Option<&'a Selection>> {
        info.find(path)
    }

    /// Check if a dotted path is selected below the current field of `info`.
    pub fn is_field_selected(&self, path: &str, info: &QueryInfo) -> QueryResult<bool> {
        info.is_selected(path)
    }
}

/// Property path of `name` relative to the current entity: the segments
/// after `level` followed by `name`.
fn relative_property_path(path: &[SmolStr], level: usize, name: &str) -> String {
    let mut relative = String::new();
    for segment in path.iter().skip(level) {
        relative.push_str(segment);
        relative.push(PATH_SEPARATOR);
    }
    relative.push_str(name);
    relative
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::selection::FragmentDefinition;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    /// Product -> owner: Owner, store: Store; Store -> owner: Owner;
    /// Owner.address (embedded) -> country: Country; Country -> continent.
    struct Catalog {
        properties: HashMap<(&'static str, String), PropertyMetadata<&'static str>>,
    }

    impl Catalog {
        fn new() -> Self {
            let properties = [
                ("Product", "owner", PropertyMetadata::relation("owner", "Owner")),
                ("Product", "store", PropertyMetadata::relation("store", "Store")),
                ("Store", "owner", PropertyMetadata::relation("owner", "Owner")),
                ("Owner", "address", PropertyMetadata::embedded("address")),
                ("Owner", "address.country", PropertyMetadata::relation("country", "Country")),
                ("Country", "continent", PropertyMetadata::relation("continent", "Continent")),
            ];

            Self {
                properties: properties
                    .into_iter()
                    .map(|(entity, path, metadata)| ((entity, path.to_string()), metadata))
                    .collect(),
            }
        }
    }

    impl EntityMetadata for Catalog {
        type Entity = &'static str;

        fn property(&self, entity: &&'static str, path: &str) -> Option<PropertyMetadata<&'static str>> {
            self.properties.get(&(*entity, path.to_string())).cloned()
        }
    }

    fn owner_with_country() -> Selection {
        Selection::field(
            "owner",
            [
                Selection::leaf("id"),
                Selection::field(
                    "address",
                    [
                        Selection::leaf("street"),
                        Selection::field("country", [Selection::leaf("id"), Selection::leaf("name")]),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn test_resolve_single_level() {
        let base = Selection::field(
            "products",
            [
                Selection::leaf("id"),
                Selection::field("owner", [Selection::leaf("name")]),
                Selection::field("store", [Selection::leaf("name")]),
            ],
        );

        let relations = RelationResolver::new(Catalog::new())
            .resolve(&"Product", &base, &Fragments::new())
            .unwrap();

        assert_eq!(relations.to_nested(), json!({ "owner": true, "store": true }));
    }

    #[test]
    fn test_embedded_is_never_a_leaf() {
        let resolver = RelationResolver::new(Catalog::new());

        let relations = resolver
            .resolve(&"Owner", &owner_with_country(), &Fragments::new())
            .unwrap();

        assert_eq!(relations.to_nested(), json!({ "address": { "country": true } }));
        assert_eq!(relations.to_paths(), vec!["address.country"]);
    }

    #[test]
    fn test_relation_below_embedded_relation() {
        let base = Selection::field(
            "products",
            [Selection::field(
                "owner",
                [Selection::field(
                    "address",
                    [Selection::field(
                        "country",
                        [Selection::field("continent", [Selection::leaf("name")])],
                    )],
                )],
            )],
        );

        let relations = RelationResolver::new(Catalog::new())
            .resolve(&"Product", &base, &Fragments::new())
            .unwrap();

        assert_eq!(
            relations.to_paths(),
            vec!["owner", "owner.address.country", "owner.address.country.continent"]
        );
    }

    #[test]
    fn test_unmapped_field_is_transparent() {
        // `details` is not a property of Product, but its children still are
        let base = Selection::field(
            "products",
            [Selection::field("details", [Selection::field("store", [Selection::leaf("id")])])],
        );

        let relations = RelationResolver::new(Catalog::new())
            .resolve(&"Product", &base, &Fragments::new())
            .unwrap();

        assert_eq!(relations.to_nested(), json!({ "store": true }));
    }

    #[test]
    fn test_inline_fragments_without_relations() {
        let base = Selection::field(
            "products",
            [Selection::field(
                "media",
                [
                    Selection::inline(Some("Image"), [Selection::leaf("id")]),
                    Selection::inline(Some("Video"), [Selection::leaf("id")]),
                ],
            )],
        );

        let relations = RelationResolver::new(Catalog::new())
            .resolve(&"Product", &base, &Fragments::new())
            .unwrap();

        assert!(relations.is_empty());
    }

    #[test]
    fn test_inline_fragment_keeps_entity() {
        let base = Selection::field(
            "products",
            [Selection::inline(
                Some("Product"),
                [Selection::field("owner", [Selection::leaf("id")])],
            )],
        );

        let relations = RelationResolver::new(Catalog::new())
            .resolve(&"Product", &base, &Fragments::new())
            .unwrap();

        assert_eq!(relations.to_nested(), json!({ "owner": true }));
    }

    #[test]
    fn test_fragment_spreads_match_inline_selections() {
        let inline = Selection::field(
            "products",
            [
                Selection::field("store", [Selection::field("owner", [Selection::leaf("id")])]),
                owner_with_country(),
            ],
        );

        let fragments = Fragments::new()
            .with(FragmentDefinition::new(
                "ProductFragment",
                "Product",
                [
                    Selection::field("store", [Selection::spread("StoreFragment")]),
                    Selection::field("owner", [Selection::spread("OwnerFragment")]),
                ],
            ))
            .with(FragmentDefinition::new(
                "StoreFragment",
                "Store",
                [Selection::field("owner", [Selection::leaf("id")])],
            ))
            .with(FragmentDefinition::new(
                "OwnerFragment",
                "Owner",
                owner_with_country()
                    .as_field()
                    .and_then(|field| field.selection_set.clone())
                    .unwrap_or_default()
                    .items,
            ));
        let spread = Selection::field("products", [Selection::spread("ProductFragment")]);

        let resolver = RelationResolver::new(Catalog::new());
        let from_inline = resolver.resolve(&"Product", &inline, &Fragments::new()).unwrap();
        let from_spread = resolver.resolve(&"Product", &spread, &fragments).unwrap();

        assert_eq!(from_inline, from_spread);
        assert_eq!(
            from_spread.to_nested(),
            json!({ "store": { "owner": true }, "owner": { "address": { "country": true } } })
        );
    }

    #[test]
    fn test_fragment_named_like_a_relation_is_not_selected() {
        let fragments = Fragments::new().with(FragmentDefinition::new(
            "owner",
            "Product",
            [Selection::leaf("id")],
        ));
        let spread = Selection::field("products", [Selection::spread("owner")]);
        let inline = Selection::field("products", [Selection::leaf("id")]);

        let resolver = RelationResolver::new(Catalog::new());
        let from_spread = resolver.resolve(&"Product", &spread, &fragments).unwrap();
        let from_inline = resolver.resolve(&"Product", &inline, &Fragments::new()).unwrap();

        assert!(from_spread.is_empty());
        assert_eq!(from_spread, from_inline);
    }

    #[test]
    fn test_fragment_named_like_a_relation_keeps_entity() {
        let fragments = Fragments::new().with(FragmentDefinition::new(
            "store",
            "Product",
            [Selection::field("owner", [Selection::leaf("id")])],
        ));
        let base = Selection::field("products", [Selection::spread("store")]);

        let relations = RelationResolver::new(Catalog::new())
            .resolve(&"Product", &base, &fragments)
            .unwrap();

        assert_eq!(relations.to_nested(), json!({ "owner": true }));
    }

    #[test]
    fn test_unknown_fragment_is_an_error() {
        let base = Selection::field(
            "products",
            [Selection::field("store", [Selection::spread("StoreFragment")])],
        );

        let err = RelationResolver::new(Catalog::new())
            .resolve(&"Product", &base, &Fragments::new())
            .unwrap_err();

        assert!(err.is_unresolved_fragment());
    }

    #[test]
    fn test_resolve_from_partial_path() {
        let base = Selection::field("store", [Selection::field("owner", [Selection::leaf("id")])]);

        let relations = RelationResolver::new(Catalog::new())
            .resolve_from(&"Store", &base, &Fragments::new(), "store", 1)
            .unwrap();

        assert_eq!(relations.to_paths(), vec!["store.owner"]);
    }

    #[test]
    fn test_relative_property_path() {
        let path = [SmolStr::new("store"), SmolStr::new("owner"), SmolStr::new("address")];

        assert_eq!(relative_property_path(&path, 2, "country"), "address.country");
        assert_eq!(relative_property_path(&path, 3, "street"), "street");
        assert_eq!(relative_property_path(&[], 0, "owner"), "owner");
    }
}
