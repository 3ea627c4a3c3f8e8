//! Grouping of adjacent corners into vertex groups
//!
//! Corners are added to a union-find one at a time in scan order. A new
//! corner joins an adjacent corner's group only if that group does not yet
//! contain a corner carrying the new corner's partition label, so every
//! group keeps at most one representative per label at merge time. The
//! check runs against the group as it stands when the new corner arrives,
//! which makes the final grouping depend on the scan order.

use crate::corners::NEIGHBOR_OFFSETS;
use morsemesh_core::{GridIndex, PartitionGrid};
use ndarray::Array2;
use std::collections::BTreeSet;

/// A set of corners that collapse to one output vertex
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexGroup {
    /// Member corners in scan order
    pub corners: Vec<GridIndex>,
    /// Distinct partition labels carried by the members
    pub labels: BTreeSet<u32>,
}

impl VertexGroup {
    pub fn len(&self) -> usize {
        self.corners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corners.is_empty()
    }
}

/// Union-find over an arena of corners, added lazily.
///
/// Each root carries the set of partition labels already represented in
/// its subset, updated on every union instead of rescanning members.
#[derive(Debug, Clone)]
pub struct CornerGroups {
    /// Corner positions, indexed by arena id, in insertion order
    positions: Vec<GridIndex>,
    parent: Vec<usize>,
    rank: Vec<usize>,
    /// Represented labels; only meaningful at roots
    represented: Vec<BTreeSet<u32>>,
    /// Arena id of the corner at each grid position
    lookup: Array2<Option<usize>>,
    group_count: usize,
}

impl CornerGroups {
    /// Create an empty structure for a grid of the given dimensions
    pub fn new((width, height): (usize, usize)) -> Self {
        Self {
            positions: Vec::new(),
            parent: Vec::new(),
            rank: Vec::new(),
            represented: Vec::new(),
            lookup: Array2::from_elem((width, height), None),
            group_count: 0,
        }
    }

    /// Number of corners added so far
    pub fn corner_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of disjoint groups
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Register `position` carrying `label` as a new singleton group
    pub fn insert(&mut self, position: GridIndex, label: u32) -> usize {
        if let Some(existing) = self.lookup[[position.0, position.1]] {
            return existing;
        }

        let id = self.positions.len();
        self.positions.push(position);
        self.parent.push(id);
        self.rank.push(0);
        self.represented.push(BTreeSet::from([label]));
        self.lookup[[position.0, position.1]] = Some(id);
        self.group_count += 1;
        id
    }

    /// Arena id of the corner at a signed grid position, if registered
    pub fn corner_at(&self, x: isize, y: isize) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        self.lookup.get([x as usize, y as usize]).copied().flatten()
    }

    /// Find the root of the group containing `corner`, with path compression
    pub fn find(&mut self, corner: usize) -> usize {
        let mut root = corner;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = corner;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Check whether the group containing `corner` already has a member
    /// carrying `label`
    pub fn represents(&mut self, corner: usize, label: u32) -> bool {
        let root = self.find(corner);
        self.represented[root].contains(&label)
    }

    /// Merge the groups containing `a` and `b`, using union by rank.
    ///
    /// Returns `false` if they were already the same group.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);

        if root_a == root_b {
            return false;
        }

        let (root, child) = match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => (root_b, root_a),
            std::cmp::Ordering::Greater => (root_a, root_b),
            std::cmp::Ordering::Equal => {
                self.rank[root_a] += 1;
                (root_a, root_b)
            }
        };
        self.parent[child] = root;

        let absorbed = std::mem::take(&mut self.represented[child]);
        let target = &mut self.represented[root];
        if absorbed.len() > target.len() {
            let smaller = std::mem::replace(target, absorbed);
            target.extend(smaller);
        } else {
            target.extend(absorbed);
        }

        self.group_count -= 1;
        true
    }

    /// Freeze into vertex groups.
    ///
    /// Groups are numbered in order of their earliest-inserted corner and
    /// list their members in insertion order.
    pub fn into_groups(mut self) -> Vec<VertexGroup> {
        let mut group_of_root: Vec<Option<usize>> = vec![None; self.positions.len()];
        let mut groups: Vec<VertexGroup> = Vec::with_capacity(self.group_count);

        for corner in 0..self.positions.len() {
            let root = self.find(corner);
            let index = match group_of_root[root] {
                Some(index) => index,
                None => {
                    let index = groups.len();
                    groups.push(VertexGroup {
                        corners: Vec::new(),
                        labels: std::mem::take(&mut self.represented[root]),
                    });
                    group_of_root[root] = Some(index);
                    index
                }
            };
            groups[index].corners.push(self.positions[corner]);
        }

        groups
    }
}

/// Group `corners` (in detector scan order) into vertex groups.
pub fn group_corners(grid: &PartitionGrid, corners: &[GridIndex]) -> CornerGroups {
    let mut groups = CornerGroups::new(grid.dim());

    for &position in corners {
        let label = grid.label(position);
        let corner = groups.insert(position, label);

        for &(dx, dy) in &NEIGHBOR_OFFSETS {
            let neighbor = groups.corner_at(position.0 as isize + dx, position.1 as isize + dy);
            if let Some(neighbor) = neighbor {
                if !groups.represents(neighbor, label) {
                    groups.union(corner, neighbor);
                }
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corners::detect_corners;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashMap;

    fn grid_from_labels(partitions: Array2<u32>) -> PartitionGrid {
        let values = Array2::zeros(partitions.dim());
        PartitionGrid::new(values, partitions).unwrap()
    }

    fn groups_for(grid: &PartitionGrid) -> Vec<VertexGroup> {
        let corners = detect_corners(grid);
        group_corners(grid, &corners).into_groups()
    }

    #[test]
    fn test_union_find_basics() {
        let mut groups = CornerGroups::new((4, 4));
        let a = groups.insert((0, 0), 1);
        let b = groups.insert((0, 1), 2);
        let c = groups.insert((3, 3), 1);

        assert_eq!(groups.group_count(), 3);
        assert!(groups.union(a, b));
        assert!(!groups.union(b, a));
        assert_eq!(groups.find(a), groups.find(b));
        assert_ne!(groups.find(a), groups.find(c));
        assert!(groups.represents(b, 1));
        assert!(groups.represents(a, 2));
        assert!(!groups.represents(c, 2));
        assert_eq!(groups.group_count(), 2);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut groups = CornerGroups::new((2, 2));
        let a = groups.insert((1, 1), 0);
        let b = groups.insert((1, 1), 0);

        assert_eq!(a, b);
        assert_eq!(groups.corner_count(), 1);
        assert_eq!(groups.corner_at(1, 1), Some(a));
        assert_eq!(groups.corner_at(-1, 1), None);
        assert_eq!(groups.corner_at(2, 0), None);
    }

    #[test]
    fn test_four_cell_grid_forms_one_group() {
        let grid = grid_from_labels(array![[0, 1], [2, 3]]);
        let groups = groups_for(&grid);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].corners, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_eq!(groups[0].labels, BTreeSet::from([0, 1, 2, 3]));
    }

    #[test]
    fn test_same_label_neighbors_stay_apart() {
        let partitions = Array2::from_shape_fn((4, 4), |(x, _)| u32::from(x >= 2));
        let grid = grid_from_labels(partitions);
        let groups = groups_for(&grid);

        let members: Vec<Vec<GridIndex>> = groups.iter().map(|g| g.corners.clone()).collect();
        assert_eq!(
            members,
            vec![
                vec![(0, 0)],
                vec![(0, 3)],
                vec![(1, 0), (2, 0)],
                vec![(1, 3), (2, 3)],
                vec![(3, 0)],
                vec![(3, 3)],
            ]
        );
        assert_eq!(groups[2].labels, BTreeSet::from([0, 1]));
    }

    #[test]
    fn test_constraint_uses_current_group_state() {
        // (0, 0) and (0, 1) share label 0 and cannot join directly; (1, 0) carries
        // label 1 and joins (0, 0) first, after which (0, 1)'s group still
        // lacks label 1 and absorbs it too.
        let mut groups = CornerGroups::new((2, 2));
        let a = groups.insert((0, 0), 0);
        let b = groups.insert((0, 1), 0);
        assert!(groups.represents(a, 0));

        let c = groups.insert((1, 0), 1);
        assert!(!groups.represents(a, 1));
        groups.union(c, a);
        assert!(!groups.represents(b, 1));
        groups.union(c, b);

        assert_eq!(groups.group_count(), 1);
        assert!(groups.represents(b, 1));
    }

    /// Grouping by scanning the members of each neighbor's group for the
    /// new corner's label. Groups are sorted and listed by first member.
    fn member_scan_groups(grid: &PartitionGrid, corners: &[GridIndex]) -> Vec<Vec<GridIndex>> {
        let mut group_of: HashMap<GridIndex, usize> = HashMap::new();
        let mut members: Vec<Vec<GridIndex>> = Vec::new();

        for &p in corners {
            let label = grid.label(p);
            let mut current = members.len();
            members.push(vec![p]);
            group_of.insert(p, current);

            for &(dx, dy) in &NEIGHBOR_OFFSETS {
                let (qx, qy) = (p.0 as isize + dx, p.1 as isize + dy);
                if qx < 0 || qy < 0 {
                    continue;
                }
                let Some(&target) = group_of.get(&(qx as usize, qy as usize)) else {
                    continue;
                };
                let carriers = members[target].iter().filter(|&&m| grid.label(m) == label).count();
                if target != current && carriers == 0 {
                    let moved = std::mem::take(&mut members[current]);
                    for &m in &moved {
                        group_of.insert(m, target);
                    }
                    members[target].extend(moved);
                    current = target;
                }
            }
        }

        let mut groups: Vec<Vec<GridIndex>> = members
            .into_iter()
            .filter(|g| !g.is_empty())
            .map(|mut g| {
                g.sort_unstable();
                g
            })
            .collect();
        groups.sort();
        groups
    }

    #[test]
    fn test_merge_checks_only_new_corner_label() {
        let grid = grid_from_labels(array![[0, 2, 0], [1, 0, 1], [1, 1, 2]]);
        let groups = groups_for(&grid);

        // (1, 2) carries label 1 and first joins the group of (0, 2). That
        // group then holds label 0, yet (1, 2) still joins (1, 1), whose
        // group lacks label 1 but also holds label 0.
        let members: Vec<Vec<GridIndex>> = groups.iter().map(|g| g.corners.clone()).collect();
        assert_eq!(
            members,
            vec![
                vec![(0, 0), (0, 1), (1, 0)],
                vec![(0, 2), (1, 1), (1, 2), (2, 1), (2, 2)],
                vec![(2, 0)],
            ]
        );
        assert_eq!(groups[0].labels, BTreeSet::from([0, 1, 2]));
        assert_eq!(groups[1].labels, BTreeSet::from([0, 1, 2]));
        assert!(groups[1].len() > groups[1].labels.len());
    }

    #[test]
    fn test_matches_member_scan_on_random_grids() {
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let partitions = Array2::from_shape_fn((12, 10), |_| rng.gen_range(0..4u32));
            let grid = grid_from_labels(partitions);
            let corners = detect_corners(&grid);

            let groups = group_corners(&grid, &corners).into_groups();
            let members: Vec<Vec<GridIndex>> = groups.iter().map(|g| g.corners.clone()).collect();

            assert_eq!(members, member_scan_groups(&grid, &corners), "seed {}", seed);
            assert!(groups.iter().any(|g| g.len() > g.labels.len()), "seed {}", seed);
        }
    }

    #[test]
    fn test_group_count_never_exceeds_corner_count() {
        let partitions =
            Array2::from_shape_fn((19, 13), |(x, y)| ((x / 3) * 5 + (y / 4) + (x + y) % 2) as u32);
        let grid = grid_from_labels(partitions);
        let corners = detect_corners(&grid);
        let groups = group_corners(&grid, &corners);

        assert_eq!(groups.corner_count(), corners.len());
        assert!(groups.group_count() <= corners.len());

        let frozen = groups.into_groups();
        let total: usize = frozen.iter().map(VertexGroup::len).sum();
        assert_eq!(total, corners.len());
    }
}
