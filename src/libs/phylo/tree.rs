use super::error::TreeError;
use super::node::{Node, NodeId};
use super::writer;

/// A rooted tree backed by an arena of nodes.
///
/// Built once by the UPGMA constructor and read-only afterwards; parents own
/// their children by id, so traversal never needs back-references beyond the
/// stored `parent` field.
#[derive(Debug, Default, Clone)]
pub struct Tree {
    /// Arena storage for all nodes
    nodes: Vec<Node>,

    /// Optional root ID (a tree might be empty or in construction)
    root: Option<NodeId>,
}

impl Tree {
    /// Create a new empty tree
    ///
    /// # Example
    /// ```
    /// use pacon::libs::phylo::tree::Tree;
    /// let tree = Tree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new node to the tree. Returns the new node's ID.
    /// The node is initially detached (no parent).
    ///
    /// # Example
    /// ```
    /// use pacon::libs::phylo::tree::Tree;
    /// let mut tree = Tree::new();
    /// let id = tree.add_node();
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn add_node(&mut self) -> NodeId {
        let id = self.nodes.len();
        let node = Node::new(id);
        self.nodes.push(node);
        id
    }

    /// Get a reference to a node by ID. Returns None if ID is invalid.
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Get a mutable reference to a node by ID.
    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Set a node as the root of the tree.
    pub fn set_root(&mut self, id: NodeId) {
        if self.get_node(id).is_some() {
            self.root = Some(id);
        }
    }

    pub fn get_root(&self) -> Option<NodeId> {
        self.root
    }

    /// Add a child to a parent node.
    /// Updates both parent's `children` list and child's `parent` field.
    ///
    /// # Errors
    /// Returns error if parent/child invalid or the child is already attached.
    pub fn add_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<(), TreeError> {
        if parent_id == child_id {
            return Err(TreeError::LogicError(
                "Cannot add node as child of itself".to_string(),
            ));
        }
        if self.get_node(parent_id).is_none() {
            return Err(TreeError::LogicError(format!(
                "Parent node {} not found",
                parent_id
            )));
        }
        if self.get_node(child_id).is_none() {
            return Err(TreeError::LogicError(format!(
                "Child node {} not found",
                child_id
            )));
        }

        if let Some(old_parent) = self.nodes[child_id].parent {
            return Err(TreeError::LogicError(format!(
                "Node {} already has parent {}",
                child_id, old_parent
            )));
        }

        self.nodes[child_id].parent = Some(parent_id);
        self.nodes[parent_id].children.push(child_id);

        Ok(())
    }

    /// Perform a preorder traversal starting from a given node.
    /// Returns a vector of NodeIds in visitation order.
    ///
    /// # Example
    /// ```
    /// use pacon::libs::phylo::tree::Tree;
    /// let mut tree = Tree::new();
    /// let n0 = tree.add_node();
    /// let n1 = tree.add_node();
    /// let n2 = tree.add_node();
    /// tree.add_child(n0, n1);
    /// tree.add_child(n0, n2);
    /// let traversal = tree.preorder(&n0).unwrap();
    /// assert_eq!(traversal, vec![n0, n1, n2]);
    /// ```
    pub fn preorder(&self, start_node: &NodeId) -> Result<Vec<NodeId>, TreeError> {
        if self.get_node(*start_node).is_none() {
            return Err(TreeError::LogicError(format!(
                "Node {} not found",
                start_node
            )));
        }

        let mut result = Vec::new();
        let mut stack = vec![*start_node];

        while let Some(curr) = stack.pop() {
            result.push(curr);
            // Push children in reverse order so they are popped left-to-right
            if let Some(node) = self.get_node(curr) {
                for &child in node.children.iter().rev() {
                    stack.push(child);
                }
            }
        }
        Ok(result)
    }

    /// Get the path from the root to the specified node.
    /// Returns a vector of NodeIds starting from the root and ending at the
    /// target node.
    ///
    /// # Example
    /// ```
    /// use pacon::libs::phylo::tree::Tree;
    /// let mut tree = Tree::new();
    /// let n0 = tree.add_node();
    /// let n1 = tree.add_node();
    /// let n2 = tree.add_node();
    /// tree.add_child(n0, n1);
    /// tree.add_child(n1, n2);
    ///
    /// let path = tree.get_path_from_root(&n2).unwrap();
    /// assert_eq!(path, vec![n0, n1, n2]);
    ///
    /// // Error: Node not in tree
    /// assert!(tree.get_path_from_root(&9999).is_err());
    /// ```
    pub fn get_path_from_root(&self, target_node: &NodeId) -> Result<Vec<NodeId>, TreeError> {
        if self.get_node(*target_node).is_none() {
            return Err(TreeError::LogicError(format!(
                "Node {} not found",
                target_node
            )));
        }

        let mut path = Vec::new();
        let mut curr = *target_node;

        loop {
            path.push(curr);
            match self.get_node(curr).and_then(|node| node.parent) {
                Some(parent) => curr = parent,
                None => break,
            }
        }

        path.reverse();
        Ok(path)
    }

    /// Find the lowest common ancestor of two nodes.
    ///
    /// # Example
    /// ```
    /// use pacon::libs::phylo::tree::Tree;
    /// let mut tree = Tree::new();
    /// //    0
    /// //   / \
    /// //  1   2
    /// // / \
    /// //3   4
    /// let n0 = tree.add_node();
    /// let n1 = tree.add_node();
    /// let n2 = tree.add_node();
    /// let n3 = tree.add_node();
    /// let n4 = tree.add_node();
    /// tree.add_child(n0, n1);
    /// tree.add_child(n0, n2);
    /// tree.add_child(n1, n3);
    /// tree.add_child(n1, n4);
    ///
    /// assert_eq!(tree.get_common_ancestor(&n3, &n4).unwrap(), n1);
    /// assert_eq!(tree.get_common_ancestor(&n3, &n2).unwrap(), n0);
    /// ```
    pub fn get_common_ancestor(&self, a: &NodeId, b: &NodeId) -> Result<NodeId, TreeError> {
        let path_a = self.get_path_from_root(a)?;
        let path_b = self.get_path_from_root(b)?;

        let mut lca = None;

        for (u, v) in path_a.iter().zip(path_b.iter()) {
            if u == v {
                lca = Some(*u);
            } else {
                break;
            }
        }

        lca.ok_or_else(|| {
            TreeError::LogicError("Nodes are not in the same tree (no common ancestor)".to_string())
        })
    }

    /// Calculate the distance between two nodes.
    /// Returns a tuple (weighted_distance, topological_distance).
    /// weighted_distance: sum of edge lengths; missing lengths count as 0.
    /// topological_distance: number of edges.
    ///
    /// # Example
    /// ```
    /// use pacon::libs::phylo::tree::Tree;
    /// let mut tree = Tree::new();
    /// let n0 = tree.add_node();
    /// let n1 = tree.add_node();
    /// let n2 = tree.add_node();
    /// tree.get_node_mut(n1).unwrap().length = Some(1.5);
    /// tree.get_node_mut(n2).unwrap().length = Some(2.5);
    /// tree.add_child(n0, n1);
    /// tree.add_child(n1, n2);
    ///
    /// let (w, t) = tree.get_distance(&n0, &n2).unwrap();
    /// assert_eq!(w, 4.0);
    /// assert_eq!(t, 2);
    /// ```
    pub fn get_distance(&self, a: &NodeId, b: &NodeId) -> Result<(f64, usize), TreeError> {
        let lca = self.get_common_ancestor(a, b)?;

        let dist_to_lca = |start: &NodeId| -> (f64, usize) {
            let mut weighted = 0.0;
            let mut topo = 0;
            let mut curr = *start;

            while curr != lca {
                if let Some(node) = self.get_node(curr) {
                    weighted += node.length.unwrap_or(0.0);
                    topo += 1;
                    match node.parent {
                        Some(parent) => curr = parent,
                        None => break,
                    }
                } else {
                    break;
                }
            }
            (weighted, topo)
        };

        let (w_a, t_a) = dist_to_lca(a);
        let (w_b, t_b) = dist_to_lca(b);

        Ok((w_a + w_b, t_a + t_b))
    }

    /// Get all leaf nodes in depth-first (preorder) order from the root.
    /// For an unrooted (empty) tree, returns an empty vector.
    pub fn get_leaves(&self) -> Vec<NodeId> {
        match self.root {
            Some(root) => self
                .preorder(&root)
                .unwrap_or_default()
                .into_iter()
                .filter(|&id| self.nodes[id].is_leaf())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Find a node by its name.
    pub fn get_node_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|n| n.name.as_deref() == Some(name))
            .map(|n| n.id)
    }

    /// Get number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialize the tree to a Newick string (compact format).
    ///
    /// # Example
    /// ```
    /// use pacon::libs::phylo::tree::Tree;
    /// let mut tree = Tree::new();
    /// let root = tree.add_node();
    /// tree.set_root(root);
    /// tree.get_node_mut(root).unwrap().set_name("A");
    /// assert_eq!(tree.to_newick(), "A;");
    /// ```
    pub fn to_newick(&self) -> String {
        writer::write_newick(self)
    }

    /// Serialize the tree to a Newick string with optional indentation.
    ///
    /// # Arguments
    /// * `indent` - The string to use for indentation (e.g., "  ", "\t").
    ///              If empty, output will be compact (no whitespace).
    ///
    /// # Example
    /// ```
    /// use pacon::libs::phylo::tree::Tree;
    /// let mut tree = Tree::new();
    /// let root = tree.add_node();
    /// let child = tree.add_node();
    /// tree.set_root(root);
    /// tree.add_child(root, child);
    /// tree.get_node_mut(root).unwrap().set_name("Root");
    /// tree.get_node_mut(child).unwrap().set_name("Child");
    ///
    /// let expected = "(\n  Child\n)Root;";
    /// assert_eq!(tree.to_newick_with_format("  "), expected);
    /// ```
    pub fn to_newick_with_format(&self, indent: &str) -> String {
        writer::write_newick_with_format(self, indent)
    }
}
