//! Recursive group tree.

use std::collections::BTreeMap;
use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::aggregate::Aggregation;
use super::aggregate::aggregate_rows;
use crate::model::RowEntry;
use crate::model::Value;
use crate::query::Direction;
use crate::query::compare_directed;

/// Separator between ancestor keys in a group path.
const PATH_SEPARATOR: char = '/';

/// One level of the grouping hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupConfig {
    /// Column whose value partitions the rows.
    pub key: String,
    /// Orders this level's groups by their value; `None` keeps first-seen order.
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub aggregations: Vec<Aggregation>,
}

impl GroupConfig {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: None,
            aggregations: Vec::new(),
        }
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn aggregate(mut self, aggregation: Aggregation) -> Self {
        self.aggregations.push(aggregation);
        self
    }
}

/// Either the rows of a deepest-level group or the next level's groups.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupContent {
    Rows(Vec<RowEntry>),
    SubGroups(Vec<GroupNode>),
}

/// A single group in the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupNode {
    /// Level-qualified key, e.g. `"0-A"`.
    pub key: String,
    /// Ancestor keys joined with `/`, e.g. `"0-A/1-North"`. Expansion state is
    /// tracked by this path, so equal leaf values under different parents are
    /// independent.
    pub path: String,
    /// Nesting level, 0 for the outermost.
    pub depth: usize,
    /// The column value shared by every row of the group.
    pub value: Value,
    /// Aggregates keyed by `"<columnKey>_<type>"`.
    pub aggregations: BTreeMap<String, f64>,
    /// Rows in this group including all descendants.
    pub row_count: usize,
    pub content: GroupContent,
}

impl GroupNode {
    /// Looks up an aggregate result.
    pub fn aggregate(&self, result_key: &str) -> Option<f64> {
        self.aggregations.get(result_key).copied()
    }

    /// Direct sub-groups, empty at the deepest level.
    pub fn sub_groups(&self) -> &[GroupNode] {
        match &self.content {
            GroupContent::SubGroups(groups) => groups,
            GroupContent::Rows(_) => &[],
        }
    }

    /// Leaf rows of this group in traversal order.
    pub fn leaf_rows(&self) -> Vec<&RowEntry> {
        let mut out = Vec::with_capacity(self.row_count);
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a RowEntry>) {
        match &self.content {
            GroupContent::Rows(rows) => out.extend(rows.iter()),
            GroupContent::SubGroups(groups) => {
                for group in groups {
                    group.collect_leaves(out);
                }
            }
        }
    }
}

/// Groups `rows` by `config`, outermost level first.
///
/// Partitioning is stable: rows keep their relative input order inside each
/// group, and groups appear in first-seen order unless the level sets a
/// direction. An empty `config` yields no groups.
pub fn build_groups(rows: &[RowEntry], config: &[GroupConfig]) -> Vec<GroupNode> {
    if config.is_empty() {
        return Vec::new();
    }
    build_level(rows.to_vec(), config, 0, "")
}

fn build_level(
    rows: Vec<RowEntry>,
    config: &[GroupConfig],
    depth: usize,
    parent_path: &str,
) -> Vec<GroupNode> {
    let level = &config[depth];

    let mut partitions: Vec<(String, Value, Vec<RowEntry>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for entry in rows {
        let value = entry.row.value(&level.key).clone();
        let label = value.as_text().into_owned();
        match index.get(&label) {
            Some(&i) => partitions[i].2.push(entry),
            None => {
                index.insert(label.clone(), partitions.len());
                partitions.push((label, value, vec![entry]));
            }
        }
    }

    if let Some(direction) = level.direction {
        partitions.sort_by(|a, b| compare_directed(&a.1, &b.1, direction));
    }

    partitions
        .into_iter()
        .map(|(label, value, rows)| {
            let key = format!("{depth}-{label}");
            let path = if parent_path.is_empty() {
                key.clone()
            } else {
                format!("{parent_path}{PATH_SEPARATOR}{key}")
            };
            let aggregations = aggregate_rows(&rows, &level.aggregations);
            let row_count = rows.len();
            let content = if depth + 1 < config.len() {
                GroupContent::SubGroups(build_level(rows, config, depth + 1, &path))
            } else {
                GroupContent::Rows(rows)
            };
            GroupNode {
                key,
                path,
                depth,
                value,
                aggregations,
                row_count,
                content,
            }
        })
        .collect()
}

/// Concatenates the leaf rows of every group in traversal order.
pub fn flatten_leaves(groups: &[GroupNode]) -> Vec<RowEntry> {
    groups
        .iter()
        .flat_map(|g| g.leaf_rows().into_iter().cloned())
        .collect()
}

/// A display line of a grouped grid.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupLine<'a> {
    /// A group header.
    Header {
        group: &'a GroupNode,
        expanded: bool,
    },
    /// A data row nested `depth` levels deep.
    Row { entry: &'a RowEntry, depth: usize },
}

/// Flattens the tree into display lines, skipping the contents of collapsed
/// groups.
pub fn visible_lines<'a>(
    groups: &'a [GroupNode],
    is_collapsed: &dyn Fn(&str) -> bool,
) -> Vec<GroupLine<'a>> {
    let mut lines = Vec::new();
    push_lines(groups, is_collapsed, &mut lines);
    lines
}

fn push_lines<'a>(
    groups: &'a [GroupNode],
    is_collapsed: &dyn Fn(&str) -> bool,
    lines: &mut Vec<GroupLine<'a>>,
) {
    for group in groups {
        let expanded = !is_collapsed(&group.path);
        lines.push(GroupLine::Header { group, expanded });
        if !expanded {
            continue;
        }
        match &group.content {
            GroupContent::Rows(rows) => lines.extend(rows.iter().map(|entry| GroupLine::Row {
                entry,
                depth: group.depth + 1,
            })),
            GroupContent::SubGroups(sub) => push_lines(sub, is_collapsed, lines),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::AggregateType;
    use crate::model::Row;

    fn sample() -> Vec<RowEntry> {
        [
            (1, "A", "x", 10),
            (2, "B", "y", 20),
            (3, "A", "y", 30),
            (4, "A", "x", 5),
            (5, "B", "x", 15),
        ]
        .into_iter()
        .map(|(id, dept, region, amt)| {
            RowEntry::new(
                id,
                Row::new()
                    .set("id", id)
                    .set("dept", dept)
                    .set("region", region)
                    .set("amt", amt),
            )
        })
        .collect()
    }

    fn ids(rows: &[&RowEntry]) -> Vec<String> {
        rows.iter().map(|e| e.id.to_string()).collect()
    }

    #[test]
    fn test_single_level_preserves_order() {
        let rows = sample();
        let groups = build_groups(
            &rows,
            &[GroupConfig::new("dept").aggregate(Aggregation::new("amt", AggregateType::Sum))],
        );
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].value, Value::from("A"));
        assert_eq!(ids(&groups[0].leaf_rows()), ["1", "3", "4"]);
        assert_eq!(groups[0].aggregate("amt_sum"), Some(45.0));
        assert_eq!(ids(&groups[1].leaf_rows()), ["2", "5"]);
        assert_eq!(groups[1].aggregate("amt_sum"), Some(35.0));
    }

    #[test]
    fn test_nested_paths_are_independent() {
        let rows = sample();
        let groups = build_groups(&rows, &[GroupConfig::new("dept"), GroupConfig::new("region")]);
        let a = &groups[0];
        let b = &groups[1];
        assert_eq!(a.sub_groups()[0].path, "0-A/1-x");
        assert_eq!(b.sub_groups()[0].path, "0-B/1-y");
        assert_eq!(b.sub_groups()[1].path, "0-B/1-x");
        assert_eq!(a.sub_groups()[0].key, b.sub_groups()[1].key);
        assert_eq!(a.row_count, 3);
    }

    #[test]
    fn test_level_direction_sorts_groups() {
        let rows = sample();
        let groups = build_groups(&rows, &[GroupConfig::new("dept").direction(Direction::Desc)]);
        let values: Vec<_> = groups.iter().map(|g| g.value.to_string()).collect();
        assert_eq!(values, ["B", "A"]);
    }

    #[test]
    fn test_flatten_round_trip() {
        let rows = sample();
        let groups = build_groups(&rows, &[GroupConfig::new("region"), GroupConfig::new("dept")]);
        let flat = flatten_leaves(&groups);
        assert_eq!(flat.len(), rows.len());
        let mut flat_ids: Vec<_> = flat.iter().map(|e| e.id.clone()).collect();
        flat_ids.sort();
        let mut input_ids: Vec<_> = rows.iter().map(|e| e.id.clone()).collect();
        input_ids.sort();
        assert_eq!(flat_ids, input_ids);
    }

    #[test]
    fn test_visible_lines_respect_collapse() {
        let rows = sample();
        let groups = build_groups(&rows, &[GroupConfig::new("dept")]);
        let all = visible_lines(&groups, &|_| false);
        assert_eq!(all.len(), 7);
        let collapsed = visible_lines(&groups, &|path| path == "0-A");
        assert_eq!(collapsed.len(), 4);
        assert!(matches!(collapsed[0], GroupLine::Header { expanded: false, .. }));
    }

    #[test]
    fn test_empty_config() {
        assert!(build_groups(&sample(), &[]).is_empty());
    }
}
