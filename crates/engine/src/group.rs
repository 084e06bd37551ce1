//! Grouping engine: recursive partition of records into a labeled tree.
//!
//! The tree is rebuilt from scratch on every recompute: it is a pure
//! function of (records, group fields, expanded paths) and is never
//! mutated in place. A node's `path` ('|'-joined ancestor key chain)
//! identifies its position and stays stable across rebuilds as long as the
//! same keys regroup.

use rustc_hash::{FxHashMap, FxHashSet};
use trellis_core::{Record, Value};

/// Sentinel key for records whose group field is null.
pub const NULL_GROUP_KEY: &str = "__null__";

/// Children of a group node: either the matching record subsequence (at
/// the deepest configured level) or the next level of sub-groups. Never
/// mixed within one node.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupChildren {
    Records(Vec<Record>),
    Groups(Vec<GroupNode>),
}

impl GroupChildren {
    pub fn len(&self) -> usize {
        match self {
            GroupChildren::Records(records) => records.len(),
            GroupChildren::Groups(groups) => groups.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One node of the grouped hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupNode {
    /// Derived string key (see [`group_key`]).
    pub key: String,
    /// Field this level groups by.
    pub field: String,
    /// Original field value of the first record in the partition.
    pub value: Value,
    /// 0-based depth.
    pub level: usize,
    pub children: GroupChildren,
    pub expanded: bool,
    /// '|'-joined chain of ancestor keys, including this node's own.
    pub path: String,
}

/// Grouping configuration: the ordered field list (order = nesting depth)
/// plus the expanded-path set.
#[derive(Debug, Clone, Default)]
pub struct Grouping {
    fields: Vec<String>,
    expanded: FxHashSet<String>,
}

impl Grouping {
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn expanded(&self) -> &FxHashSet<String> {
        &self.expanded
    }

    /// Grouped mode is on while at least one field is configured.
    pub fn is_active(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Replace the whole field list (duplicates dropped, first wins).
    pub fn set_fields(&mut self, fields: Vec<String>) {
        self.fields.clear();
        for field in fields {
            if !self.fields.contains(&field) {
                self.fields.push(field);
            }
        }
    }

    /// Append a field at the innermost nesting level. Duplicate = no-op.
    /// Returns whether the field was added.
    pub fn add_field(&mut self, field: &str) -> bool {
        if self.fields.iter().any(|f| f == field) {
            return false;
        }
        self.fields.push(field.to_string());
        true
    }

    pub fn remove_field(&mut self, field: &str) {
        self.fields.retain(|f| f != field);
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.contains(path)
    }

    /// Flip one path's membership in the expanded set.
    pub fn toggle(&mut self, path: &str) {
        if !self.expanded.remove(path) {
            self.expanded.insert(path.to_string());
        }
    }

    /// Expand every node present in `tree`. Paths of groups that no longer
    /// exist are not retained.
    pub fn expand_all(&mut self, tree: &[GroupNode]) {
        let mut paths = FxHashSet::default();
        collect_paths(tree, &mut paths);
        self.expanded = paths;
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }
}

fn collect_paths(nodes: &[GroupNode], out: &mut FxHashSet<String>) {
    for node in nodes {
        out.insert(node.path.clone());
        if let GroupChildren::Groups(children) = &node.children {
            collect_paths(children, out);
        }
    }
}

/// Derive the partition key for one field value.
pub fn group_key(value: &Value) -> String {
    match value {
        Value::Null => NULL_GROUP_KEY.to_string(),
        other => other.text_key(),
    }
}

/// Recursively partition `records` by `fields[level]`.
///
/// Groups appear in first-seen order of their key among the input records,
/// so an upstream sort carries through to group order. Within a partition,
/// record order is untouched.
pub fn build_hierarchy(
    records: &[Record],
    fields: &[String],
    level: usize,
    parent_path: &str,
    expanded: &FxHashSet<String>,
) -> Vec<GroupNode> {
    if fields.is_empty() || records.is_empty() || level >= fields.len() {
        return Vec::new();
    }

    let field = &fields[level];

    let mut order: Vec<String> = Vec::new();
    let mut buckets: FxHashMap<String, Vec<Record>> = FxHashMap::default();
    for record in records {
        let key = group_key(&record.value_of(field));
        buckets
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key.clone());
                Vec::new()
            })
            .push(record.clone());
    }

    let deepest = level == fields.len() - 1;
    let mut nodes = Vec::with_capacity(order.len());
    for key in order {
        let members = buckets.remove(&key).unwrap_or_default();
        let path = if parent_path.is_empty() {
            key.clone()
        } else {
            format!("{parent_path}|{key}")
        };
        let value = members
            .first()
            .map(|r| r.value_of(field))
            .unwrap_or(Value::Null);
        let children = if deepest {
            GroupChildren::Records(members)
        } else {
            GroupChildren::Groups(build_hierarchy(&members, fields, level + 1, &path, expanded))
        };
        nodes.push(GroupNode {
            key,
            field: field.clone(),
            value,
            level,
            children,
            expanded: expanded.contains(&path),
            path,
        });
    }

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::{customer_records, record};

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn leaf_ids(node: &GroupNode) -> Vec<i64> {
        match &node.children {
            GroupChildren::Records(records) => records.iter().map(|r| r.id).collect(),
            GroupChildren::Groups(groups) => groups.iter().flat_map(leaf_ids).collect(),
        }
    }

    #[test]
    fn test_empty_inputs_terminate() {
        let records = customer_records();
        let none: Vec<Record> = Vec::new();
        let expanded = FxHashSet::default();

        assert!(build_hierarchy(&records, &[], 0, "", &expanded).is_empty());
        assert!(build_hierarchy(&none, &fields(&["country"]), 0, "", &expanded).is_empty());
        assert!(build_hierarchy(&records, &fields(&["country"]), 5, "", &expanded).is_empty());
    }

    #[test]
    fn test_groups_follow_first_seen_order() {
        let records = vec![
            record(1, &[("country", Value::Text("Sweden".into()))]),
            record(2, &[("country", Value::Text("Angola".into()))]),
            record(3, &[("country", Value::Text("Sweden".into()))]),
        ];
        let tree = build_hierarchy(
            &records,
            &fields(&["country"]),
            0,
            "",
            &FxHashSet::default(),
        );

        let keys: Vec<&str> = tree.iter().map(|n| n.key.as_str()).collect();
        // not sorted: Sweden was seen first
        assert_eq!(keys, ["Sweden", "Angola"]);
        assert_eq!(leaf_ids(&tree[0]), [1, 3]);
        assert_eq!(leaf_ids(&tree[1]), [2]);
    }

    #[test]
    fn test_null_values_share_sentinel_group() {
        let records = vec![
            record(1, &[("country", Value::Null)]),
            record(2, &[("country", Value::Text("Chile".into()))]),
            record(3, &[]),
        ];
        let tree = build_hierarchy(
            &records,
            &fields(&["country"]),
            0,
            "",
            &FxHashSet::default(),
        );

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].key, NULL_GROUP_KEY);
        assert_eq!(leaf_ids(&tree[0]), [1, 3]);
    }

    #[test]
    fn test_object_values_group_by_name() {
        let rep = |name: &str| {
            let raw = serde_json::json!({"name": name, "image": "x.png"});
            Value::from_json(&raw)
        };
        let records = vec![
            record(1, &[("representative", rep("Amy Elsner"))]),
            record(2, &[("representative", rep("Ioni Bowcher"))]),
            record(3, &[("representative", rep("Amy Elsner"))]),
        ];
        let tree = build_hierarchy(
            &records,
            &fields(&["representative"]),
            0,
            "",
            &FxHashSet::default(),
        );

        let keys: Vec<&str> = tree.iter().map(|n| n.key.as_str()).collect();
        assert_eq!(keys, ["Amy Elsner", "Ioni Bowcher"]);
    }

    #[test]
    fn test_nested_paths_chain_ancestor_keys() {
        let records = customer_records();
        let tree = build_hierarchy(
            &records,
            &fields(&["country", "status"]),
            0,
            "",
            &FxHashSet::default(),
        );

        let germany = tree.iter().find(|n| n.key == "Germany").unwrap();
        assert_eq!(germany.level, 0);
        assert_eq!(germany.path, "Germany");
        let GroupChildren::Groups(statuses) = &germany.children else {
            panic!("expected sub-groups below the outer level");
        };
        for status in statuses {
            assert_eq!(status.level, 1);
            assert!(status.path.starts_with("Germany|"));
            assert!(matches!(status.children, GroupChildren::Records(_)));
        }
    }

    #[test]
    fn test_exhaustive_partition() {
        let records = customer_records();
        let tree = build_hierarchy(
            &records,
            &fields(&["country", "status"]),
            0,
            "",
            &FxHashSet::default(),
        );

        let mut ids: Vec<i64> = tree.iter().flat_map(|n| leaf_ids(n)).collect();
        ids.sort_unstable();
        let mut expected: Vec<i64> = records.iter().map(|r| r.id).collect();
        expected.sort_unstable();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_expand_all_then_collapse_all() {
        let records = customer_records();
        let group_fields = fields(&["country", "status"]);
        let mut grouping = Grouping::default();
        grouping.set_fields(group_fields.clone());

        let tree = build_hierarchy(&records, &group_fields, 0, "", grouping.expanded());
        grouping.expand_all(&tree);

        let tree = build_hierarchy(&records, &group_fields, 0, "", grouping.expanded());
        fn all_expanded(nodes: &[GroupNode]) -> bool {
            nodes.iter().all(|n| {
                n.expanded
                    && match &n.children {
                        GroupChildren::Groups(children) => all_expanded(children),
                        GroupChildren::Records(_) => true,
                    }
            })
        }
        assert!(all_expanded(&tree));

        grouping.collapse_all();
        let tree = build_hierarchy(&records, &group_fields, 0, "", grouping.expanded());
        fn none_expanded(nodes: &[GroupNode]) -> bool {
            nodes.iter().all(|n| {
                !n.expanded
                    && match &n.children {
                        GroupChildren::Groups(children) => none_expanded(children),
                        GroupChildren::Records(_) => true,
                    }
            })
        }
        assert!(none_expanded(&tree));
    }

    #[test]
    fn test_expand_all_drops_stale_paths() {
        let mut grouping = Grouping::default();
        grouping.toggle("Ghost");
        assert!(grouping.is_expanded("Ghost"));

        let records = vec![record(1, &[("country", Value::Text("Peru".into()))])];
        let tree = build_hierarchy(
            &records,
            &fields(&["country"]),
            0,
            "",
            grouping.expanded(),
        );
        grouping.expand_all(&tree);

        assert!(grouping.is_expanded("Peru"));
        assert!(!grouping.is_expanded("Ghost"));
    }

    #[test]
    fn test_toggle_flips_membership() {
        let mut grouping = Grouping::default();
        grouping.toggle("France");
        assert!(grouping.is_expanded("France"));
        grouping.toggle("France");
        assert!(!grouping.is_expanded("France"));
    }

    #[test]
    fn test_add_field_rejects_duplicates() {
        let mut grouping = Grouping::default();
        assert!(grouping.add_field("country"));
        assert!(!grouping.add_field("country"));
        assert_eq!(grouping.fields(), ["country"]);

        grouping.remove_field("country");
        assert!(!grouping.is_active());
    }
}
