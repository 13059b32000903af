use std::collections::HashMap;

use anyhow::{bail, Result};

use crate::libs::distance::DistanceMatrix;
use crate::libs::phylo::tree::Tree;

/// Build a tree from a distance matrix using the UPGMA algorithm.
///
/// UPGMA (Unweighted Pair Group Method with Arithmetic Mean) is a simple
/// agglomerative hierarchical clustering method. The result is ultrametric:
/// every leaf sits at the same cumulative distance from the root, up to
/// floating-point rounding.
///
/// Ties between equally close cluster pairs are broken deterministically:
/// the scan only replaces the incumbent pair on a strictly smaller distance,
/// so the earliest pair in cluster-creation order (input taxa first, merged
/// clusters after) wins.
pub fn upgma(matrix: &DistanceMatrix) -> Result<Tree> {
    let names = matrix.get_names();
    let n = names.len();

    if n < 2 {
        bail!("UPGMA requires at least 2 taxa, got {}", n);
    }

    let mut tree = Tree::new();

    // Active clusters, each represented by the NodeId of its root.
    // Heights and leaf counts are indexed by NodeId; node ids are assigned
    // sequentially, so pushing on node creation keeps them in sync.
    let mut active_nodes: Vec<usize> = Vec::with_capacity(n);
    let mut node_heights: Vec<f64> = Vec::with_capacity(2 * n - 1);
    let mut cluster_sizes: Vec<usize> = Vec::with_capacity(2 * n - 1);

    for name in names {
        let id = tree.add_node();
        tree.get_node_mut(id).unwrap().set_name(name);
        active_nodes.push(id);
        node_heights.push(0.0);
        cluster_sizes.push(1);
    }

    // Distances between live clusters, keyed by (min NodeId, max NodeId).
    // Merged clusters get fresh ids, so stale entries are never read again.
    let mut dists = HashMap::new();
    for i in 0..n {
        for j in (i + 1)..n {
            dists.insert((i, j), matrix.get(i, j));
        }
    }

    while active_nodes.len() > 1 {
        // 1. Find the nearest pair of active clusters.
        // O(K^2) per round, O(N^3) total; fine for tens of taxa.
        let mut min_dist = f64::MAX;
        let mut pair = (0, 0);

        for i in 0..active_nodes.len() {
            for j in (i + 1)..active_nodes.len() {
                let id1 = active_nodes[i];
                let id2 = active_nodes[j];
                let key = (id1.min(id2), id1.max(id2));
                if let Some(&d) = dists.get(&key) {
                    if d < min_dist {
                        min_dist = d;
                        pair = (i, j);
                    }
                }
            }
        }

        // 2. Merge them under a new internal node at height d/2.
        let (idx1, idx2) = pair;
        let id1 = active_nodes[idx1];
        let id2 = active_nodes[idx2];

        let new_node = tree.add_node();

        let height = min_dist / 2.0;
        node_heights.push(height);

        // Branch lengths make both subtrees reach the new height
        let len1 = height - node_heights[id1];
        let len2 = height - node_heights[id2];

        tree.add_child(new_node, id1)?;
        tree.add_child(new_node, id2)?;

        tree.get_node_mut(id1).unwrap().length = Some(len1);
        tree.get_node_mut(id2).unwrap().length = Some(len2);

        let size1 = cluster_sizes[id1];
        let size2 = cluster_sizes[id2];
        let new_size = size1 + size2;
        cluster_sizes.push(new_size);

        // 3. Size-weighted average distance from the merged cluster to
        // every remaining one.
        let mut new_dists = Vec::new();
        for (k_idx, &other_id) in active_nodes.iter().enumerate() {
            if k_idx == idx1 || k_idx == idx2 {
                continue;
            }

            let d1 = *dists
                .get(&(id1.min(other_id), id1.max(other_id)))
                .unwrap_or(&f64::MAX);
            let d2 = *dists
                .get(&(id2.min(other_id), id2.max(other_id)))
                .unwrap_or(&f64::MAX);

            let d_new = (d1 * size1 as f64 + d2 * size2 as f64) / new_size as f64;
            new_dists.push((other_id, d_new));
        }

        // Remove the larger index first to avoid shifting the smaller one
        if idx1 > idx2 {
            active_nodes.remove(idx1);
            active_nodes.remove(idx2);
        } else {
            active_nodes.remove(idx2);
            active_nodes.remove(idx1);
        }

        active_nodes.push(new_node);
        for (other_id, d) in new_dists {
            dists.insert((new_node.min(other_id), new_node.max(other_id)), d);
        }
    }

    // The last surviving cluster is the root
    if let Some(&root) = active_nodes.first() {
        tree.set_root(root);
    }

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix_from(names: &[&str], rows: &[&[f64]]) -> DistanceMatrix {
        let mut matrix = DistanceMatrix::new(names.iter().map(|s| s.to_string()).collect());
        for (i, row) in rows.iter().enumerate() {
            for (j, &d) in row.iter().enumerate() {
                if j > i {
                    matrix.set(i, j, d);
                }
            }
        }
        matrix
    }

    #[test]
    fn test_upgma_simple() {
        // Matrix:
        //   A B C
        // A 0 2 4
        // B 2 0 4
        // C 4 4 0
        let matrix = matrix_from(
            &["A", "B", "C"],
            &[&[0.0, 2.0, 4.0], &[2.0, 0.0, 4.0], &[4.0, 4.0, 0.0]],
        );

        let tree = upgma(&matrix).unwrap();

        let root = tree.get_root().unwrap();
        assert_eq!(tree.get_node(root).unwrap().children.len(), 2);

        // Children should be C and (A,B)
        let children = &tree.get_node(root).unwrap().children;

        let mut leaf_c = None;
        let mut node_ab = None;

        for &child in children {
            let node = tree.get_node(child).unwrap();
            if node.is_leaf() {
                leaf_c = Some(child);
            } else {
                node_ab = Some(child);
            }
        }

        let c_node = tree.get_node(leaf_c.unwrap()).unwrap();
        assert_eq!(c_node.name.as_deref(), Some("C"));
        assert!((c_node.length.unwrap() - 2.0).abs() < 1e-6);

        let ab_node = tree.get_node(node_ab.unwrap()).unwrap();
        assert!((ab_node.length.unwrap() - 1.0).abs() < 1e-6); // 2.0 - 1.0

        let ab_children = &ab_node.children;
        assert_eq!(ab_children.len(), 2);
        for &grandchild in ab_children {
            let node = tree.get_node(grandchild).unwrap();
            assert!((node.length.unwrap() - 1.0).abs() < 1e-6); // 1.0 - 0.0
        }
    }

    #[test]
    fn test_upgma_two_taxa() {
        let matrix = matrix_from(&["A", "B"], &[&[0.0, 0.5], &[0.5, 0.0]]);
        let tree = upgma(&matrix).unwrap();

        // A single root with two leaf children
        assert_eq!(tree.len(), 3);
        let root = tree.get_root().unwrap();
        let root_node = tree.get_node(root).unwrap();
        assert!(!root_node.is_leaf());
        assert_eq!(root_node.children.len(), 2);

        for &child in &root_node.children {
            let node = tree.get_node(child).unwrap();
            assert!(node.is_leaf());
            assert!((node.length.unwrap() - 0.25).abs() < 1e-9);
        }
    }

    #[test]
    fn test_upgma_binary_and_ultrametric() {
        // 4 taxa: one close pair, the rest equidistant
        let matrix = matrix_from(
            &["Seq1", "Seq2", "Seq3", "Seq4"],
            &[
                &[0.0, 0.0526, 0.0526, 0.0526],
                &[0.0526, 0.0, 0.1053, 0.1053],
                &[0.0526, 0.1053, 0.0, 0.1053],
                &[0.0526, 0.1053, 0.1053, 0.0],
            ],
        );
        let tree = upgma(&matrix).unwrap();

        // Binary tree: N leaves, N-1 internal nodes
        let leaves = tree.get_leaves();
        assert_eq!(leaves.len(), 4);
        assert_eq!(tree.len(), 7);

        // All leaves equidistant from the root
        let root = tree.get_root().unwrap();
        let depths: Vec<f64> = leaves
            .iter()
            .map(|leaf| tree.get_distance(&root, leaf).unwrap().0)
            .collect();
        for &d in &depths[1..] {
            assert!((d - depths[0]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_upgma_too_few_taxa() {
        let matrix = DistanceMatrix::new(vec!["only".to_string()]);
        assert!(upgma(&matrix).is_err());

        let empty = DistanceMatrix::new(Vec::new());
        assert!(upgma(&empty).is_err());
    }
}
