//! A kd-tree storing the sample points of the GP interpolation to
//! facilitate nearest neighbor searches.
//!
//! Nodes live in an arena indexed by the slot of their point: the `i`th node
//! describes how the `i`th point splits its descendants. Points can be added
//! and removed without rebuilding the tree, at the price of a possibly
//! unbalanced tree after many updates.

use crate::errors::{GpError, Result};
use linfa::Float;
use log::{debug, trace};
use ndarray::{s, Array2, ArrayBase, ArrayView1, ArrayView2, Data, Ix1, Ix2};
#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Position of a point in the [`KdTree`]
///
/// For a node split on dimension `dim`, points of the `left` branch have
/// their `dim` coordinate strictly lower than the node's one, points of the
/// `right` branch have their `dim` coordinate greater or equal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct TreeNode {
    /// Dimension on which the point divides its descendants
    pub dim: usize,
    /// Slot of the left daughter
    pub left: Option<usize>,
    /// Slot of the right daughter
    pub right: Option<usize>,
    /// Slot of the parent, `None` for the root
    pub parent: Option<usize>,
}

/// A kd-tree with online insertion and removal.
///
/// Points are stored in a `(room, dim)` array where only the first `len()` rows
/// are live. Room doubles when a point is added to a full storage.
/// Distances are Euclidean.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serializable",
    derive(Serialize, Deserialize),
    serde(bound(deserialize = "F: Deserialize<'de>"))
)]
pub struct KdTree<F: Float> {
    data: Array2<F>,
    nodes: Vec<TreeNode>,
    root: usize,
}

/// Squared euclidean distance
pub(crate) fn sq_distance<F: Float>(
    p1: &ArrayBase<impl Data<Elem = F>, Ix1>,
    p2: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> F {
    p1.iter().zip(p2.iter()).fold(F::zero(), |acc, (a, b)| {
        let d = *a - *b;
        acc + d * d
    })
}

fn check_point<F: Float>(v: &ArrayBase<impl Data<Elem = F>, Ix1>, dim: usize) -> Result<()> {
    if v.len() != dim {
        return Err(GpError::DimensionMismatch {
            expected: dim,
            actual: v.len(),
        });
    }
    if v.iter().any(|x| !x.is_finite()) {
        return Err(GpError::InvalidValueError(format!(
            "Point coordinates should be finite, got {v}"
        )));
    }
    Ok(())
}

impl<F: Float> KdTree<F> {
    /// Build a kd-tree from `(n, dim)` data points given as rows.
    ///
    /// At each level, the candidates are split on the dimension of largest
    /// variance around their median point.
    pub fn new(data: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<Self> {
        if data.nrows() == 0 || data.ncols() == 0 {
            return Err(GpError::InvalidValueError(format!(
                "Kd-tree needs at least one point of dimension >= 1, got shape {:?}",
                data.shape()
            )));
        }
        if data.iter().any(|x| !x.is_finite()) {
            return Err(GpError::InvalidValueError(
                "Kd-tree points should have finite coordinates".to_string(),
            ));
        }
        let n = data.nrows();
        let mut tree = KdTree {
            data: data.to_owned(),
            nodes: vec![TreeNode::default(); n],
            root: 0,
        };
        let mut candidates: Vec<usize> = (0..n).collect();
        tree.root = tree
            .organize(&mut candidates, None)
            .ok_or_else(|| GpError::InvalidValueError("Empty kd-tree".to_string()))?;
        debug!(
            "Kd-tree built with {} points of dimension {}",
            n,
            tree.dim()
        );
        Ok(tree)
    }

    /// Place the median of `candidates` as daughter of `parent` and
    /// recursively organize the points on each side.
    fn organize(&mut self, candidates: &mut [usize], parent: Option<usize>) -> Option<usize> {
        if candidates.is_empty() {
            return None;
        }
        let dim = self.split_dimension(candidates);
        let data = &self.data;
        candidates.sort_by(|&a, &b| {
            data[[a, dim]]
                .partial_cmp(&data[[b, dim]])
                .unwrap_or(Ordering::Equal)
                .then(a.cmp(&b))
        });
        // left side must be strictly lower than the pivot
        let mut mid = candidates.len() / 2;
        let pivot_value = data[[candidates[mid], dim]];
        while mid > 0 && data[[candidates[mid - 1], dim]] == pivot_value {
            mid -= 1;
        }
        let pivot = candidates[mid];
        self.nodes[pivot] = TreeNode {
            dim,
            left: None,
            right: None,
            parent,
        };

        let (left, rest) = candidates.split_at_mut(mid);
        let left = self.organize(left, Some(pivot));
        let right = self.organize(&mut rest[1..], Some(pivot));
        self.nodes[pivot].left = left;
        self.nodes[pivot].right = right;
        Some(pivot)
    }

    /// Dimension of largest variance among candidates, lowest index on ties
    fn split_dimension(&self, candidates: &[usize]) -> usize {
        let n = F::cast(candidates.len());
        let mut best = (0, F::neg_infinity());
        for k in 0..self.dim() {
            let mean = candidates
                .iter()
                .fold(F::zero(), |acc, &i| acc + self.data[[i, k]])
                / n;
            let var = candidates.iter().fold(F::zero(), |acc, &i| {
                let d = self.data[[i, k]] - mean;
                acc + d * d
            });
            if var > best.1 {
                best = (k, var);
            }
        }
        best.0
    }

    /// Number of points stored in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty (never the case once built)
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Dimension of the points
    pub fn dim(&self) -> usize {
        self.data.ncols()
    }

    /// Number of points the storage can hold before growing
    pub fn room(&self) -> usize {
        self.data.nrows()
    }

    /// Slot of the root point
    pub fn root(&self) -> usize {
        self.root
    }

    /// Live points as a `(len, dim)` view
    pub fn data(&self) -> ArrayView2<F> {
        self.data.slice(s![..self.len(), ..])
    }

    /// Point stored at `slot`
    pub fn point(&self, slot: usize) -> Result<ArrayView1<F>> {
        self.check_slot(slot)?;
        Ok(self.data.row(slot))
    }

    /// Tree information of the point stored at `slot`
    pub fn tree_node(&self, slot: usize) -> Result<TreeNode> {
        self.check_slot(slot)?;
        Ok(self.nodes[slot])
    }

    fn check_slot(&self, slot: usize) -> Result<()> {
        if slot >= self.len() {
            return Err(GpError::IndexOutOfRange {
                index: slot,
                len: self.len(),
            });
        }
        Ok(())
    }

    /// Find the `n_nn` nearest neighbors of `v`.
    ///
    /// Returns slots and distances of the neighbors in ascending order of distance,
    /// ties being broken by slot. Fewer neighbors are returned when the tree holds
    /// less than `n_nn` points.
    pub fn find_neighbors(
        &self,
        v: &ArrayBase<impl Data<Elem = F>, Ix1>,
        n_nn: usize,
    ) -> Result<(Vec<usize>, Vec<F>)> {
        self.neighbors(v, n_nn, None)
    }

    /// Same as [`KdTree::find_neighbors`] but the point at `excluded` slot
    /// is never taken as a neighbor.
    pub fn find_neighbors_excluding(
        &self,
        v: &ArrayBase<impl Data<Elem = F>, Ix1>,
        n_nn: usize,
        excluded: usize,
    ) -> Result<(Vec<usize>, Vec<F>)> {
        self.check_slot(excluded)?;
        self.neighbors(v, n_nn, Some(excluded))
    }

    fn neighbors(
        &self,
        v: &ArrayBase<impl Data<Elem = F>, Ix1>,
        n_nn: usize,
        excluded: Option<usize>,
    ) -> Result<(Vec<usize>, Vec<F>)> {
        if n_nn == 0 {
            return Err(GpError::InvalidNeighborCount(n_nn));
        }
        check_point(v, self.dim())?;
        let available = self.len() - usize::from(excluded.is_some());
        let wanted = n_nn.min(available);
        if wanted == 0 {
            return Ok((vec![], vec![]));
        }
        let found = self.look_for_neighbors(v, wanted, excluded);
        Ok(found.into_iter().map(|(d2, i)| (i, d2.sqrt())).unzip())
    }

    /// Walk the tree from the node where `v` would be inserted, entering
    /// each branch at most once and pruning the branches which cannot hold
    /// a point closer than the current `wanted`th candidate.
    fn look_for_neighbors(
        &self,
        v: &ArrayBase<impl Data<Elem = F>, Ix1>,
        wanted: usize,
        excluded: Option<usize>,
    ) -> Vec<(F, usize)> {
        let mut candidates: Vec<(F, usize)> = Vec::with_capacity(wanted + 1);
        let may_improve = |candidates: &[(F, usize)], bound: F| {
            candidates.len() < wanted
                || candidates
                    .last()
                    .map_or(true, |(worst, _)| bound * bound <= *worst)
        };

        // (node to consider, node we come from, lower bound of distance to the branch)
        let mut stack = vec![(self.find_node(v), None, F::zero())];
        let mut visited = 0;
        while let Some((consider, from, bound)) = stack.pop() {
            if !may_improve(&candidates, bound) {
                continue;
            }
            visited += 1;
            if excluded != Some(consider) {
                let d2 = sq_distance(v, &self.data.row(consider));
                let pos = candidates.partition_point(|&(d, i)| d < d2 || (d == d2 && i < consider));
                if pos < wanted {
                    candidates.insert(pos, (d2, consider));
                    candidates.truncate(wanted);
                }
            }

            let node = self.nodes[consider];
            if let Some(parent) = node.parent {
                if from != Some(parent) {
                    stack.push((parent, Some(consider), F::zero()));
                }
            }
            let diff = v[node.dim] - self.data[[consider, node.dim]];
            let branches = [
                (node.left, diff.max(F::zero())),
                (node.right, (-diff).max(F::zero())),
            ];
            for (child, bound) in branches {
                if let Some(child) = child {
                    if from != Some(child) && may_improve(&candidates, bound) {
                        stack.push((child, Some(consider), bound));
                    }
                }
            }
        }
        trace!("Neighbor search visited {} of {} nodes", visited, self.len());
        candidates
    }

    /// Find the point already in the tree that would be the parent of `v`
    fn find_node(&self, v: &ArrayBase<impl Data<Elem = F>, Ix1>) -> usize {
        self.descend_from(self.root, v)
    }

    fn descend_from(&self, start: usize, v: &ArrayBase<impl Data<Elem = F>, Ix1>) -> usize {
        let mut current = start;
        loop {
            let node = &self.nodes[current];
            let next = if v[node.dim] < self.data[[current, node.dim]] {
                node.left
            } else {
                node.right
            };
            match next {
                Some(child) => current = child,
                None => return current,
            }
        }
    }

    /// Attach `slot` as the daughter of `parent` on the side it belongs to
    fn link(&mut self, slot: usize, parent: usize) {
        let pdim = self.nodes[parent].dim;
        if self.data[[slot, pdim]] < self.data[[parent, pdim]] {
            self.nodes[parent].left = Some(slot);
        } else {
            self.nodes[parent].right = Some(slot);
        }
        let dim = self.dim();
        let node = &mut self.nodes[slot];
        node.parent = Some(parent);
        node.dim = (pdim + 1) % dim;
    }

    /// Add a point to the tree, growing storage if needed.
    /// Returns the slot of the new point.
    pub fn add_point(&mut self, v: &ArrayBase<impl Data<Elem = F>, Ix1>) -> Result<usize> {
        check_point(v, self.dim())?;
        let slot = self.len();
        if slot == self.room() {
            self.grow();
        }
        self.data.row_mut(slot).assign(v);
        self.nodes.push(TreeNode::default());
        let parent = self.find_node(v);
        self.link(slot, parent);
        Ok(slot)
    }

    fn grow(&mut self) {
        let len = self.len();
        let room = (2 * self.room()).max(1);
        trace!("Kd-tree storage grows from {} to {}", self.room(), room);
        let mut data = Array2::zeros((room, self.dim()));
        data.slice_mut(s![..len, ..])
            .assign(&self.data.slice(s![..len, ..]));
        self.data = data;
        self.nodes.reserve(room - len);
    }

    /// Remove the point at `slot` from the tree.
    ///
    /// The descendants of the removed node are reinserted below its parent,
    /// then points of slots greater than `slot` are shifted down by one.
    pub fn remove_point(&mut self, slot: usize) -> Result<()> {
        self.check_slot(slot)?;
        if self.len() == 1 {
            return Err(GpError::InvalidValueError(
                "Cannot remove the last point of the kd-tree".to_string(),
            ));
        }
        let removed = self.nodes[slot];

        // orphans in pre-order so that reinsertion mimics the previous layout
        let mut orphans = Vec::new();
        let mut stack: Vec<usize> = [removed.right, removed.left].into_iter().flatten().collect();
        while let Some(o) = stack.pop() {
            orphans.push(o);
            let node = self.nodes[o];
            stack.extend([node.right, node.left].into_iter().flatten());
        }

        if let Some(parent) = removed.parent {
            let pnode = &mut self.nodes[parent];
            if pnode.left == Some(slot) {
                pnode.left = None;
            } else {
                pnode.right = None;
            }
        }
        for &o in &orphans {
            let node = &mut self.nodes[o];
            node.left = None;
            node.right = None;
            node.parent = None;
        }

        let mut start = removed.parent;
        for &o in &orphans {
            match start {
                Some(s) => {
                    let parent = self.descend_from(s, &self.data.row(o));
                    self.link(o, parent);
                }
                None => {
                    self.root = o;
                    start = Some(o);
                }
            }
        }
        debug!(
            "Removed point {} from kd-tree, {} descendants reassigned",
            slot,
            orphans.len()
        );

        self.compact(slot);
        Ok(())
    }

    /// Drop storage of `slot` shifting the following slots down by one
    fn compact(&mut self, slot: usize) {
        let len = self.len();
        let tail = self.data.slice(s![slot + 1..len, ..]).to_owned();
        self.data.slice_mut(s![slot..len - 1, ..]).assign(&tail);
        self.nodes.remove(slot);

        let shift = |i: usize| if i > slot { i - 1 } else { i };
        for node in self.nodes.iter_mut() {
            node.left = node.left.map(shift);
            node.right = node.right.map(shift);
            node.parent = node.parent.map(shift);
        }
        self.root = shift(self.root);
    }

    /// Check the tree is properly constructed: parent/daughter links are
    /// consistent, every point is reachable once from the root and every
    /// point is on the proper side of all its ancestors.
    pub fn check_tree(&self) -> Result<()> {
        let n = self.len();
        let violation = |msg: String| Err(GpError::StructuralInvariantViolation(msg));
        if self.root >= n {
            return violation(format!("root {} out of {} points", self.root, n));
        }
        if self.nodes[self.root].parent.is_some() {
            return violation(format!("root {} has a parent", self.root));
        }

        for (i, node) in self.nodes.iter().enumerate() {
            if node.dim >= self.dim() {
                return violation(format!("node {} splits on dimension {}", i, node.dim));
            }
            for child in [node.left, node.right].into_iter().flatten() {
                if child >= n || self.nodes[child].parent != Some(i) {
                    return violation(format!("daughter {child} of node {i} disowns it"));
                }
            }
            match node.parent {
                Some(p) if p >= n => return violation(format!("node {i} has parent {p}")),
                Some(p) if self.nodes[p].left != Some(i) && self.nodes[p].right != Some(i) => {
                    return violation(format!("node {i} is not a daughter of its parent {p}"))
                }
                None if i != self.root => {
                    return violation(format!("node {i} is detached from the tree"))
                }
                _ => (),
            }
        }

        let mut seen = vec![false; n];
        let mut stack = vec![self.root];
        let mut count = 0;
        while let Some(i) = stack.pop() {
            if seen[i] {
                return violation(format!("node {i} reached twice"));
            }
            seen[i] = true;
            count += 1;
            stack.extend([self.nodes[i].left, self.nodes[i].right].into_iter().flatten());
        }
        if count != n {
            return violation(format!("{count} nodes reachable out of {n}"));
        }

        for i in 0..n {
            let mut child = i;
            while let Some(p) = self.nodes[child].parent {
                let k = self.nodes[p].dim;
                let (x, xp) = (self.data[[i, k]], self.data[[p, k]]);
                let ok = if self.nodes[p].left == Some(child) {
                    x < xp
                } else {
                    x >= xp
                };
                if !ok {
                    return violation(format!(
                        "node {i} on the wrong side of ancestor {p} on dimension {k}"
                    ));
                }
                child = p;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array, Array1, Axis};
    use ndarray_rand::rand::SeedableRng;
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;
    use rand_xoshiro::Xoshiro256Plus;

    fn brute_force(
        data: &ArrayView2<f64>,
        v: &ArrayBase<impl Data<Elem = f64>, Ix1>,
        k: usize,
        excluded: Option<usize>,
    ) -> Vec<usize> {
        let mut all: Vec<(f64, usize)> = data
            .rows()
            .into_iter()
            .enumerate()
            .filter(|(i, _)| excluded != Some(*i))
            .map(|(i, row)| (sq_distance(v, &row), i))
            .collect();
        all.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap().then(a.1.cmp(&b.1)));
        all.into_iter().take(k).map(|(_, i)| i).collect()
    }

    fn assert_same_as_brute_force(tree: &KdTree<f64>, queries: &Array2<f64>) {
        let n = tree.len();
        for q in queries.rows() {
            for k in 1..=n {
                let (slots, dists) = tree.find_neighbors(&q, k).unwrap();
                assert_eq!(slots, brute_force(&tree.data(), &q, k, None), "k={k}");
                assert_eq!(dists.len(), k);
                assert!(dists.windows(2).all(|w| w[0] <= w[1]));
            }
        }
    }

    fn random_points(n: usize, dim: usize, seed: u64) -> Array2<f64> {
        let mut rng = Xoshiro256Plus::seed_from_u64(seed);
        Array::random_using((n, dim), Uniform::new(-1., 1.), &mut rng)
    }

    #[test]
    fn test_single_point_tree() {
        let tree = KdTree::new(&array![[1., 2.]]).unwrap();
        tree.check_tree().unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root(), 0);
        let (slots, dists) = tree.find_neighbors(&array![4., 6.], 3).unwrap();
        assert_eq!(slots, vec![0]);
        assert_eq!(dists, vec![5.]);
    }

    #[test]
    fn test_empty_tree_is_refused() {
        let data = Array2::<f64>::zeros((0, 2));
        assert!(matches!(
            KdTree::new(&data),
            Err(GpError::InvalidValueError(_))
        ));
    }

    #[test]
    fn test_build_random() {
        for dim in 1..4 {
            let xt = random_points(100, dim, 42 + dim as u64);
            let tree = KdTree::new(&xt).unwrap();
            tree.check_tree().unwrap();
            assert_eq!(tree.data(), xt);
        }
    }

    #[test]
    fn test_neighbors_random() {
        let xt = random_points(40, 3, 0);
        let tree = KdTree::new(&xt).unwrap();
        let queries = random_points(10, 3, 1);
        assert_same_as_brute_force(&tree, &queries);
        // queries on samples themselves
        assert_same_as_brute_force(&tree, &xt.select(Axis(0), &[0, 7, 21]));
    }

    #[test]
    fn test_neighbors_collinear() {
        let t = Array1::linspace(0., 1., 30);
        let mut xt = Array2::zeros((30, 2));
        xt.column_mut(0).assign(&t);
        xt.column_mut(1).assign(&t.mapv(|v| 2. * v - 1.));
        let tree = KdTree::new(&xt).unwrap();
        tree.check_tree().unwrap();
        assert_same_as_brute_force(&tree, &random_points(8, 2, 3));
    }

    #[test]
    fn test_neighbors_duplicates() {
        let xt = random_points(60, 2, 7).mapv(|v| (v * 2.).floor());
        let tree = KdTree::new(&xt).unwrap();
        tree.check_tree().unwrap();
        let mut queries = random_points(8, 2, 11).mapv(|v| (v * 2.).floor());
        queries.row_mut(0).assign(&xt.row(5));
        assert_same_as_brute_force(&tree, &queries);
    }

    #[test]
    fn test_neighbors_excluding() {
        let xt = random_points(25, 2, 5);
        let tree = KdTree::new(&xt).unwrap();
        for i in 0..xt.nrows() {
            for k in [1, 5, 24, 30] {
                let (slots, _) = tree.find_neighbors_excluding(&xt.row(i), k, i).unwrap();
                assert!(!slots.contains(&i));
                assert_eq!(slots.len(), k.min(24));
                assert_eq!(slots, brute_force(&tree.data(), &xt.row(i), k, Some(i)));
            }
        }
    }

    #[test]
    fn test_neighbors_errors() {
        let tree = KdTree::new(&random_points(5, 2, 5)).unwrap();
        assert!(matches!(
            tree.find_neighbors(&array![0., 0.], 0),
            Err(GpError::InvalidNeighborCount(0))
        ));
        assert!(matches!(
            tree.find_neighbors(&array![0., 0., 0.], 2),
            Err(GpError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
        assert!(matches!(
            tree.find_neighbors_excluding(&array![0., 0.], 2, 5),
            Err(GpError::IndexOutOfRange { index: 5, len: 5 })
        ));
    }

    #[test]
    fn test_add_then_remove() {
        let xt = random_points(30, 2, 13);
        let mut tree = KdTree::new(&xt).unwrap();
        let queries = random_points(5, 2, 17);
        let before: Vec<_> = queries
            .rows()
            .into_iter()
            .map(|q| tree.find_neighbors(&q, 6).unwrap())
            .collect();
        let nodes_before: Vec<_> = (0..30).map(|i| tree.tree_node(i).unwrap()).collect();

        let slot = tree.add_point(&array![0.1, -0.2]).unwrap();
        assert_eq!(slot, 30);
        tree.check_tree().unwrap();
        tree.remove_point(slot).unwrap();
        tree.check_tree().unwrap();

        let after: Vec<_> = queries
            .rows()
            .into_iter()
            .map(|q| tree.find_neighbors(&q, 6).unwrap())
            .collect();
        assert_eq!(before, after);
        let nodes_after: Vec<_> = (0..30).map(|i| tree.tree_node(i).unwrap()).collect();
        assert_eq!(nodes_before, nodes_after);
    }

    #[test]
    fn test_room_grows_geometrically() {
        let mut tree = KdTree::new(&random_points(4, 2, 19)).unwrap();
        assert_eq!(tree.room(), 4);
        tree.add_point(&array![0., 0.]).unwrap();
        assert_eq!(tree.room(), 8);
        for i in 0..3 {
            tree.add_point(&array![i as f64, 0.5]).unwrap();
        }
        assert_eq!(tree.room(), 8);
        tree.add_point(&array![0.3, 0.3]).unwrap();
        assert_eq!(tree.room(), 16);
        assert_eq!(tree.len(), 9);
        tree.check_tree().unwrap();
    }

    #[test]
    fn test_many_additions() {
        let xt = random_points(10, 3, 23);
        let mut tree = KdTree::new(&xt).unwrap();
        let added = random_points(50, 3, 29);
        for p in added.rows() {
            tree.add_point(&p).unwrap();
        }
        tree.check_tree().unwrap();
        assert_eq!(tree.len(), 60);
        assert_same_as_brute_force(&tree, &random_points(4, 3, 31));
    }

    #[test]
    fn test_removals() {
        let xt = random_points(50, 2, 37);
        let mut tree = KdTree::new(&xt).unwrap();
        let mut expected = xt.to_owned();
        // root, then arbitrary nodes
        let mut to_remove = vec![tree.root(), 0, 17, 3, 30, 10];
        to_remove.extend([5, 5, 5]);
        for slot in to_remove {
            tree.remove_point(slot).unwrap();
            tree.check_tree().unwrap();
            let kept: Vec<usize> = (0..expected.nrows()).filter(|&i| i != slot).collect();
            expected = expected.select(Axis(0), &kept);
            assert_eq!(tree.data(), expected);
        }
        assert_eq!(tree.len(), 41);
        assert_same_as_brute_force(&tree, &random_points(5, 2, 41));
    }

    #[test]
    fn test_remove_until_one() {
        let mut tree = KdTree::new(&random_points(12, 2, 43)).unwrap();
        while tree.len() > 1 {
            let slot = tree.root() / 2;
            tree.remove_point(slot).unwrap();
            tree.check_tree().unwrap();
        }
        assert!(matches!(
            tree.remove_point(0),
            Err(GpError::InvalidValueError(_))
        ));
        assert!(matches!(
            tree.remove_point(1),
            Err(GpError::IndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_check_tree_detects_corruption() {
        let mut tree = KdTree::new(&random_points(20, 2, 47)).unwrap();
        let root = tree.root();
        let left = tree.nodes[root].left.unwrap();
        tree.nodes[left].parent = None;
        assert!(matches!(
            tree.check_tree(),
            Err(GpError::StructuralInvariantViolation(_))
        ));

        let mut tree = KdTree::new(&random_points(20, 2, 47)).unwrap();
        let root = tree.root();
        let right = tree.nodes[root].right.unwrap();
        let k = tree.nodes[root].dim;
        tree.data[[right, k]] = tree.data[[root, k]] - 1.;
        assert!(matches!(
            tree.check_tree(),
            Err(GpError::StructuralInvariantViolation(_))
        ));
    }
}
