//! Nested relation paths for eager loading.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use smol_str::SmolStr;

use crate::selection::{PATH_SEPARATOR, path_segments};

/// A tree of relation paths to load.
///
/// Keys are relation property names. A node without nested entries is a
/// leaf (`true` in the nested view); a node with nested entries also loads
/// those relations. Inserting or merging never replaces nested detail with
/// a plain leaf.
///
/// All operations consume the map and return the result, so partial maps
/// can be combined in any order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationMap {
    entries: IndexMap<SmolStr, RelationNode>,
}

/// A single position in a [`RelationMap`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationNode {
    /// Whether this position was itself inserted as a relation path, as
    /// opposed to only being on the way to one (an embedded object).
    included: bool,
    nested: RelationMap,
}

impl RelationNode {
    /// Check if this node has no nested relations.
    pub fn is_leaf(&self) -> bool {
        self.nested.is_empty()
    }

    /// Check if this position is a relation in its own right.
    ///
    /// Leaves are always included; a branch is included when its path was
    /// inserted directly and not only as a prefix of a deeper path.
    pub fn is_included(&self) -> bool {
        self.included || self.is_leaf()
    }

    /// The nested relations below this node.
    pub fn nested(&self) -> &RelationMap {
        &self.nested
    }

    fn merge(&mut self, other: RelationNode) {
        self.included |= other.included;
        let nested = std::mem::take(&mut self.nested);
        self.nested = nested.merge(other.nested);
    }
}

impl RelationMap {
    /// Create an empty relation map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a relation path given as segments.
    ///
    /// Missing intermediate segments are created. The final segment is
    /// marked as a relation; nested relations already below it are kept.
    /// An empty path leaves the map unchanged.
    pub fn insert<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let segments: Vec<SmolStr> = path
            .into_iter()
            .map(Into::<SmolStr>::into)
            .filter(|segment| !segment.is_empty())
            .collect();

        self.insert_segments(&segments);
        self
    }

    /// Insert a dotted relation path such as `"store.owner"`.
    pub fn insert_path(self, path: &str) -> Self {
        self.insert(path_segments(path))
    }

    /// Insert a single top-level relation.
    pub fn add(self, relation: impl Into<SmolStr>) -> Self {
        self.insert([relation])
    }

    fn insert_segments(&mut self, segments: &[SmolStr]) {
        let Some((first, rest)) = segments.split_first() else {
            return;
        };

        let node = self.entries.entry(first.clone()).or_default();
        if rest.is_empty() {
            node.included = true;
        } else {
            node.nested.insert_segments(rest);
        }
    }

    /// Merge another relation map into this one.
    ///
    /// Keys from both sides are kept. Where both sides have a key, nested
    /// relations always win over a plain leaf and two nested maps are merged
    /// recursively.
    pub fn merge(mut self, other: RelationMap) -> Self {
        for (name, node) in other.entries {
            match self.entries.get_mut(&name) {
                Some(existing) => existing.merge(node),
                None => {
                    self.entries.insert(name, node);
                }
            }
        }
        self
    }

    /// Get the node for a top-level relation.
    pub fn get(&self, relation: &str) -> Option<&RelationNode> {
        self.entries.get(relation)
    }

    /// Check if a dotted path exists in the map.
    pub fn contains(&self, path: &str) -> bool {
        self.find(path).is_some()
    }

    /// Check if a dotted path is a relation in its own right.
    pub fn is_included(&self, path: &str) -> bool {
        self.find(path).is_some_and(RelationNode::is_included)
    }

    fn find(&self, path: &str) -> Option<&RelationNode> {
        let mut segments = path_segments(path);
        let mut node = self.entries.get(segments.next()?)?;
        for segment in segments {
            node = node.nested.entries.get(segment)?;
        }
        Some(node)
    }

    /// Iterate the top-level relations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RelationNode)> {
        self.entries.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Number of top-level relations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no relations.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten to dotted relation paths.
    ///
    /// Every relation position is listed, parents before children, in
    /// insertion order. Positions that only lead to deeper relations, such
    /// as embedded objects, are not listed on their own.
    pub fn to_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_paths("", &mut paths);
        paths
    }

    fn collect_paths(&self, prefix: &str, paths: &mut Vec<String>) {
        for (name, node) in &self.entries {
            let path = if prefix.is_empty() {
                name.to_string()
            } else {
                format!("{}{}{}", prefix, PATH_SEPARATOR, name)
            };

            if node.is_included() {
                paths.push(path.clone());
            }
            node.nested.collect_paths(&path, paths);
        }
    }

    /// Convert to the nested `true` / object form.
    ///
    /// ```rust
    /// use relmap_query::RelationMap;
    /// use serde_json::json;
    ///
    /// let relations = RelationMap::new()
    ///     .insert_path("store")
    ///     .insert_path("store.owner");
    ///
    /// assert_eq!(relations.to_nested(), json!({ "store": { "owner": true } }));
    /// ```
    pub fn to_nested(&self) -> serde_json::Value {
        let entries = self
            .entries
            .iter()
            .map(|(name, node)| {
                let value = if node.is_leaf() {
                    serde_json::Value::Bool(true)
                } else {
                    node.nested.to_nested()
                };
                (name.to_string(), value)
            })
            .collect();

        serde_json::Value::Object(entries)
    }
}

impl Serialize for RelationMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, node) in &self.entries {
            map.serialize_entry(name.as_str(), node)?;
        }
        map.end()
    }
}

impl Serialize for RelationNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_leaf() {
            serializer.serialize_bool(true)
        } else {
            self.nested.serialize(serializer)
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for RelationMap {
    /// Build a map from dotted relation paths.
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::new(), |relations, path| relations.insert_path(path.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_insert_single_level() {
        let relations = RelationMap::new().add("bar").insert(["foo"]);

        assert_eq!(relations.to_nested(), json!({ "bar": true, "foo": true }));
    }

    #[test]
    fn test_insert_multi_level_widens_leaf() {
        let relations = RelationMap::new()
            .add("xyzzy")
            .add("foo")
            .insert(["foo", "bar", "baz"]);

        assert_eq!(
            relations.to_nested(),
            json!({ "xyzzy": true, "foo": { "bar": { "baz": true } } })
        );
    }

    #[test]
    fn test_insert_keeps_nested_detail() {
        let relations = RelationMap::new()
            .insert_path("foo.bar")
            .insert_path("foo");

        assert_eq!(relations.to_nested(), json!({ "foo": { "bar": true } }));
        assert!(relations.is_included("foo"));
    }

    #[test]
    fn test_insert_is_idempotent() {
        let once = RelationMap::new().insert_path("store.owner");
        let twice = once.clone().insert_path("store.owner");

        assert_eq!(once.to_paths(), twice.to_paths());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_insert_empty_path_is_noop() {
        let relations = RelationMap::new().add("owner");
        let unchanged = relations.clone().insert(Vec::<SmolStr>::new()).insert_path("");

        assert_eq!(relations, unchanged);
    }

    #[test]
    fn test_merge_simple_leaves() {
        let merged = RelationMap::new()
            .add("foo")
            .merge(RelationMap::new().add("bar"));

        assert_eq!(merged.to_nested(), json!({ "foo": true, "bar": true }));
    }

    #[test]
    fn test_merge_complex_nested() {
        let a = RelationMap::from_iter(["foo.bar.baz", "foo.xyzzy"]);
        let b = RelationMap::from_iter(["foo.bar", "foo.xyzzy.zyxxy"]);

        let expected = json!({
            "foo": {
                "bar": { "baz": true },
                "xyzzy": { "zyxxy": true }
            }
        });

        assert_eq!(a.clone().merge(b.clone()).to_nested(), expected);
        assert_eq!(b.merge(a).to_nested(), expected);
    }

    #[test]
    fn test_merge_widening_both_orders() {
        let leaf = RelationMap::new().add("foo");
        let branch = RelationMap::new().insert_path("foo.bar");
        let expected = json!({ "foo": { "bar": true } });

        assert_eq!(leaf.clone().merge(branch.clone()).to_nested(), expected);
        assert_eq!(branch.merge(leaf).to_nested(), expected);
    }

    #[test]
    fn test_merge_is_commutative_and_associative() {
        let a = RelationMap::from_iter(["owner", "store.owner"]);
        let b = RelationMap::from_iter(["owner.address.country", "store"]);
        let c = RelationMap::from_iter(["images", "store.owner.address.country"]);

        assert_eq!(a.clone().merge(b.clone()), b.clone().merge(a.clone()));
        assert_eq!(
            a.clone().merge(b.clone()).merge(c.clone()),
            a.merge(b.merge(c))
        );
    }

    #[test]
    fn test_to_paths_lists_relation_positions() {
        let relations = RelationMap::new()
            .insert_path("store")
            .insert_path("store.owner")
            .insert_path("store.owner.address.country");

        assert_eq!(
            relations.to_paths(),
            vec!["store", "store.owner", "store.owner.address.country"]
        );
        assert!(relations.contains("store.owner.address"));
        assert!(!relations.is_included("store.owner.address"));
    }

    #[test]
    fn test_serialize_matches_nested_view() {
        let relations = RelationMap::from_iter(["owner.address.country", "store"]);

        let serialized = serde_json::to_value(&relations).unwrap();
        assert_eq!(serialized, relations.to_nested());
        assert_eq!(
            serialized,
            json!({ "owner": { "address": { "country": true } }, "store": true })
        );
    }

    #[test]
    fn test_get_and_iter() {
        let relations = RelationMap::from_iter(["owner", "store.owner"]);

        assert!(relations.get("owner").is_some_and(RelationNode::is_leaf));
        assert!(relations.get("store").is_some_and(|node| !node.is_leaf()));
        assert_eq!(relations.iter().map(|(name, _)| name).collect::<Vec<_>>(), vec!["owner", "store"]);
        assert_eq!(relations.len(), 2);
    }
}
