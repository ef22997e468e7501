//! WBS forest assembly and structural validation.
//!
//! The flat node list is turned into an arena: nodes live in a `Vec`, the
//! parent link and the child lists are indices into it, and a `HashMap` maps
//! stable ids to arena slots. The arena is rebuilt on every load; nothing is
//! maintained incrementally.

use std::collections::{HashMap, HashSet};

use pcx_core::entities::{Validate, WbsNode};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, WeightageWarning};

/// One arena slot.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub node: WbsNode,
    pub parent: Option<usize>,
    /// Sorted by `order`, then `code`, then `id`.
    pub children: Vec<usize>,
    /// Depth from the root (root = 0), computed while walking the forest.
    pub depth: u32,
}

/// Assembled WBS forest.
#[derive(Debug, Clone, Default)]
pub struct WbsTree {
    nodes: Vec<TreeNode>,
    index: HashMap<String, usize>,
    roots: Vec<usize>,
}

/// A successfully built tree and the non-fatal warnings found on the way.
#[derive(Debug, Clone)]
pub struct TreeBuild {
    pub tree: WbsTree,
    pub warnings: Vec<WeightageWarning>,
}

/// A node whose declared `level` disagrees with its actual depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelMismatch {
    pub id: String,
    pub declared: u32,
    pub depth: u32,
}

impl WbsTree {
    /// Assemble and validate a forest from a flat node list.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Structural`] for a duplicate id, an invalid weightage,
    ///   or a `parent_id` that does not resolve to a node in the list.
    /// - [`EngineError::Cycle`] when a parent chain loops back on itself.
    pub fn build(nodes: Vec<WbsNode>, tolerance: f64) -> Result<TreeBuild, EngineError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (slot, node) in nodes.iter().enumerate() {
            if let Err(error) = node.validate() {
                return Err(EngineError::structural(&node.id, error.to_string()));
            }
            if index.insert(node.id.clone(), slot).is_some() {
                return Err(EngineError::structural(&node.id, "duplicate WBS node id"));
            }
        }

        let mut arena: Vec<TreeNode> = nodes
            .into_iter()
            .map(|node| TreeNode {
                node,
                parent: None,
                children: Vec::new(),
                depth: 0,
            })
            .collect();

        let mut roots = Vec::new();
        for slot in 0..arena.len() {
            let Some(parent_id) = arena[slot].node.parent_id.clone() else {
                roots.push(slot);
                continue;
            };
            if parent_id == arena[slot].node.id {
                return Err(EngineError::Cycle {
                    node_id: parent_id,
                });
            }
            let Some(&parent) = index.get(&parent_id) else {
                return Err(EngineError::structural(
                    &arena[slot].node.id,
                    format!("parent '{parent_id}' does not exist"),
                ));
            };
            arena[slot].parent = Some(parent);
            arena[parent].children.push(slot);
        }

        let mut tree = Self {
            nodes: arena,
            index,
            roots,
        };
        tree.sort_siblings();
        tree.assign_depths()?;

        let warnings = tree.weightage_warnings(tolerance);
        for warning in &warnings {
            tracing::warn!(
                parent = warning.parent_id.as_deref().unwrap_or("<root>"),
                sum = warning.sum,
                "wbs: sibling weightages do not sum to 100"
            );
        }
        tracing::debug!(
            nodes = tree.len(),
            roots = tree.roots.len(),
            warnings = warnings.len(),
            "wbs: tree built"
        );

        Ok(TreeBuild { tree, warnings })
    }

    fn sort_siblings(&mut self) {
        let key = |nodes: &[TreeNode], slot: usize| {
            let node = &nodes[slot].node;
            (node.order, node.code.clone(), node.id.clone())
        };
        let mut roots = std::mem::take(&mut self.roots);
        roots.sort_by_cached_key(|&slot| key(&self.nodes, slot));
        self.roots = roots;

        for slot in 0..self.nodes.len() {
            let mut children = std::mem::take(&mut self.nodes[slot].children);
            children.sort_by_cached_key(|&child| key(&self.nodes, child));
            self.nodes[slot].children = children;
        }
    }

    /// Walk down from the roots with a visited set. Anything left unvisited
    /// is on a cycle or hangs below one.
    fn assign_depths(&mut self) -> Result<(), EngineError> {
        let mut visited = vec![false; self.nodes.len()];
        let mut stack: Vec<(usize, u32)> = self.roots.iter().rev().map(|&r| (r, 0)).collect();

        while let Some((slot, depth)) = stack.pop() {
            if visited[slot] {
                return Err(EngineError::Cycle {
                    node_id: self.nodes[slot].node.id.clone(),
                });
            }
            visited[slot] = true;
            self.nodes[slot].depth = depth;
            for &child in self.nodes[slot].children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }

        if let Some(start) = visited.iter().position(|seen| !seen) {
            return Err(EngineError::Cycle {
                node_id: self.cycle_member(start),
            });
        }
        Ok(())
    }

    /// Follow parent links from `start` until a slot repeats; that slot is on
    /// the cycle.
    fn cycle_member(&self, start: usize) -> String {
        let mut seen = HashSet::new();
        let mut slot = start;
        while seen.insert(slot) {
            match self.nodes[slot].parent {
                Some(parent) => slot = parent,
                None => break,
            }
        }
        self.nodes[slot].node.id.clone()
    }

    fn weightage_warnings(&self, tolerance: f64) -> Vec<WeightageWarning> {
        let mut warnings = Vec::new();
        if let Some(warning) = self.check_group(None, &self.roots, tolerance) {
            warnings.push(warning);
        }
        for slot in self.pre_order() {
            let node = &self.nodes[slot];
            if node.children.is_empty() {
                continue;
            }
            if let Some(warning) = self.check_group(Some(slot), &node.children, tolerance) {
                warnings.push(warning);
            }
        }
        warnings
    }

    fn check_group(
        &self,
        parent: Option<usize>,
        group: &[usize],
        tolerance: f64,
    ) -> Option<WeightageWarning> {
        if group.is_empty() {
            return None;
        }
        let sum: f64 = group.iter().map(|&s| self.nodes[s].node.weightage).sum();
        if (sum - 100.0).abs() <= tolerance {
            return None;
        }
        Some(WeightageWarning {
            parent_id: parent.map(|p| self.nodes[p].node.id.clone()),
            child_ids: group
                .iter()
                .map(|&s| self.nodes[s].node.id.clone())
                .collect(),
            sum,
        })
    }

    // -----------------------------------------------------------------------
    // Traversal
    // -----------------------------------------------------------------------

    /// Arena slots in pre-order (parents before children, siblings in order).
    #[must_use]
    pub fn pre_order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();
        while let Some(slot) = stack.pop() {
            order.push(slot);
            stack.extend(self.nodes[slot].children.iter().rev());
        }
        order
    }

    /// Arena slots in post-order (children before parents). Iterative, so
    /// depth is bounded only by memory.
    #[must_use]
    pub fn post_order(&self) -> Vec<usize> {
        let mut order = self.pre_order_mirrored();
        order.reverse();
        order
    }

    /// Parent-first walk that visits siblings last-to-first; reversing it
    /// yields a post-order with siblings first-to-last.
    fn pre_order_mirrored(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<usize> = self.roots.clone();
        while let Some(slot) = stack.pop() {
            order.push(slot);
            stack.extend(self.nodes[slot].children.iter().copied());
        }
        order
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn slot(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    #[must_use]
    pub fn at(&self, slot: usize) -> &TreeNode {
        &self.nodes[slot]
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&WbsNode> {
        self.slot(id).map(|slot| &self.nodes[slot].node)
    }

    /// Root slots in sibling order.
    #[must_use]
    pub fn root_slots(&self) -> &[usize] {
        &self.roots
    }

    #[must_use]
    pub fn roots(&self) -> Vec<&WbsNode> {
        self.roots.iter().map(|&s| &self.nodes[s].node).collect()
    }

    /// Direct children of `id` in sibling order. Unknown ids have none.
    #[must_use]
    pub fn children(&self, id: &str) -> Vec<&WbsNode> {
        self.slot(id).map_or_else(Vec::new, |slot| {
            self.nodes[slot]
                .children
                .iter()
                .map(|&c| &self.nodes[c].node)
                .collect()
        })
    }

    #[must_use]
    pub fn parent(&self, id: &str) -> Option<&WbsNode> {
        let slot = self.slot(id)?;
        self.nodes[slot].parent.map(|p| &self.nodes[p].node)
    }

    #[must_use]
    pub fn depth(&self, id: &str) -> Option<u32> {
        self.slot(id).map(|slot| self.nodes[slot].depth)
    }

    /// Leaf nodes in pre-order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&WbsNode> {
        self.pre_order()
            .into_iter()
            .filter(|&s| self.nodes[s].children.is_empty())
            .map(|s| &self.nodes[s].node)
            .collect()
    }

    /// `id` and every descendant, parent first. This is the set a cascading
    /// delete of `id` removes.
    #[must_use]
    pub fn subtree_ids(&self, id: &str) -> Option<Vec<String>> {
        let start = self.slot(id)?;
        let mut ids = Vec::new();
        let mut stack = vec![start];
        while let Some(slot) = stack.pop() {
            ids.push(self.nodes[slot].node.id.clone());
            stack.extend(self.nodes[slot].children.iter().rev());
        }
        Some(ids)
    }

    /// Product of weightage fractions from `id` up to its root, inclusive.
    #[must_use]
    pub fn path_weight_product(&self, id: &str) -> Option<f64> {
        let mut slot = self.slot(id)?;
        let mut product = 1.0;
        loop {
            product *= self.nodes[slot].node.weightage / 100.0;
            match self.nodes[slot].parent {
                Some(parent) => slot = parent,
                None => return Some(product),
            }
        }
    }

    /// Nodes whose declared `level` differs from their depth in the forest.
    #[must_use]
    pub fn level_mismatches(&self) -> Vec<LevelMismatch> {
        self.pre_order()
            .into_iter()
            .map(|s| &self.nodes[s])
            .filter(|n| n.node.level != n.depth)
            .map(|n| LevelMismatch {
                id: n.node.id.clone(),
                declared: n.node.level,
                depth: n.depth,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node(id: &str, parent: Option<&str>, weightage: f64) -> WbsNode {
        WbsNode {
            id: id.into(),
            code: id.into(),
            name: None,
            parent_id: parent.map(Into::into),
            level: 0,
            weightage,
            order: 0,
        }
    }

    fn ids(nodes: &[&WbsNode]) -> Vec<String> {
        nodes.iter().map(|n| n.id.clone()).collect()
    }

    #[test]
    fn builds_forest_with_sorted_children() {
        let mut b = node("1.2", Some("1"), 50.0);
        b.order = 1;
        let mut a = node("1.1", Some("1"), 50.0);
        a.order = 2;
        let build = WbsTree::build(vec![b, node("1", None, 100.0), a], 0.01).unwrap();

        assert!(build.warnings.is_empty());
        assert_eq!(ids(&build.tree.roots()), vec!["1"]);
        assert_eq!(ids(&build.tree.children("1")), vec!["1.2", "1.1"]);
        assert_eq!(build.tree.depth("1.1"), Some(1));
    }

    #[test]
    fn code_breaks_order_ties() {
        let nodes = vec![
            node("r", None, 100.0),
            node("r.b", Some("r"), 50.0),
            node("r.a", Some("r"), 50.0),
        ];
        let build = WbsTree::build(nodes, 0.01).unwrap();
        assert_eq!(ids(&build.tree.children("r")), vec!["r.a", "r.b"]);
    }

    #[test]
    fn orphan_parent_is_structural_error() {
        let err = WbsTree::build(vec![node("a", Some("missing"), 100.0)], 0.01).unwrap_err();
        assert_eq!(
            err,
            EngineError::Structural {
                node_id: "a".into(),
                reason: "parent 'missing' does not exist".into(),
            }
        );
    }

    #[test]
    fn duplicate_id_is_structural_error() {
        let err =
            WbsTree::build(vec![node("a", None, 50.0), node("a", None, 50.0)], 0.01).unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn cycle_is_detected() {
        let nodes = vec![
            node("root", None, 100.0),
            node("x", Some("z"), 100.0),
            node("y", Some("x"), 100.0),
            node("z", Some("y"), 100.0),
        ];
        let err = WbsTree::build(nodes, 0.01).unwrap_err();
        assert!(matches!(err, EngineError::Cycle { ref node_id } if ["x", "y", "z"].contains(&node_id.as_str())));
    }

    #[test]
    fn self_parent_is_cycle() {
        let err = WbsTree::build(vec![node("a", Some("a"), 100.0)], 0.01).unwrap_err();
        assert_eq!(err, EngineError::Cycle { node_id: "a".into() });
    }

    #[test]
    fn weightage_mismatch_is_a_warning_not_an_error() {
        let nodes = vec![
            node("r", None, 100.0),
            node("a", Some("r"), 40.0),
            node("b", Some("r"), 50.0),
        ];
        let build = WbsTree::build(nodes, 0.01).unwrap();
        assert_eq!(build.warnings.len(), 1);
        assert_eq!(build.warnings[0].parent_id.as_deref(), Some("r"));
        assert!((build.warnings[0].sum - 90.0).abs() < 1e-9);
    }

    #[test]
    fn root_group_is_checked_too() {
        let build = WbsTree::build(vec![node("a", None, 30.0), node("b", None, 30.0)], 0.01).unwrap();
        assert_eq!(build.warnings.len(), 1);
        assert_eq!(build.warnings[0].parent_id, None);
    }

    #[test]
    fn tolerance_absorbs_rounding() {
        let nodes = vec![
            node("r", None, 100.0),
            node("a", Some("r"), 33.333),
            node("b", Some("r"), 33.333),
            node("c", Some("r"), 33.333),
        ];
        assert!(WbsTree::build(nodes, 0.01).unwrap().warnings.is_empty());
    }

    #[test]
    fn negative_weightage_is_rejected() {
        let err = WbsTree::build(vec![node("a", None, -1.0)], 0.01).unwrap_err();
        assert!(matches!(err, EngineError::Structural { .. }));
    }

    #[test]
    fn post_order_visits_children_first() {
        let nodes = vec![
            node("r", None, 100.0),
            node("a", Some("r"), 50.0),
            node("b", Some("r"), 50.0),
            node("a1", Some("a"), 100.0),
        ];
        let tree = WbsTree::build(nodes, 0.01).unwrap().tree;
        let order: Vec<&str> = tree
            .post_order()
            .into_iter()
            .map(|s| tree.at(s).node.id.as_str())
            .collect();
        assert_eq!(order, vec!["a1", "a", "b", "r"]);
    }

    #[test]
    fn subtree_ids_cover_descendants() {
        let nodes = vec![
            node("r", None, 100.0),
            node("a", Some("r"), 50.0),
            node("b", Some("r"), 50.0),
            node("a1", Some("a"), 100.0),
        ];
        let tree = WbsTree::build(nodes, 0.01).unwrap().tree;
        assert_eq!(tree.subtree_ids("a").unwrap(), vec!["a", "a1"]);
        assert!(tree.subtree_ids("nope").is_none());
    }

    #[test]
    fn path_weight_product_multiplies_fractions() {
        let nodes = vec![
            node("r", None, 100.0),
            node("a", Some("r"), 40.0),
            node("a1", Some("a"), 50.0),
        ];
        let tree = WbsTree::build(nodes, 0.01).unwrap().tree;
        let product = tree.path_weight_product("a1").unwrap();
        assert!((product - 0.2).abs() < 1e-12);
    }

    #[test]
    fn level_mismatch_is_reported() {
        let mut child = node("a", Some("r"), 100.0);
        child.level = 3;
        let tree = WbsTree::build(vec![node("r", None, 100.0), child], 0.01)
            .unwrap()
            .tree;
        assert_eq!(
            tree.level_mismatches(),
            vec![LevelMismatch {
                id: "a".into(),
                declared: 3,
                depth: 1
            }]
        );
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let mut nodes = vec![node("n0", None, 100.0)];
        for i in 1..20_000 {
            nodes.push(node(&format!("n{i}"), Some(&format!("n{}", i - 1)), 100.0));
        }
        let tree = WbsTree::build(nodes, 0.01).unwrap().tree;
        assert_eq!(tree.post_order().len(), 20_000);
        assert_eq!(tree.depth("n19999"), Some(19_999));
    }
}
