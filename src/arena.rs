use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

/// Operator symbols of the expression grammar.
const OPERATORS: [&str; 4] = ["+", "-", "*", "/"];

/// Bracket markers; terminal but semantically empty.
const BRACKETS: [&str; 2] = ["(", ")"];

/// Data payload for tree nodes: a grammar symbol or a numeric literal.
///
/// Classification is a pure function over the variant and label; the
/// `Literal` variant is always terminal, never an operator, never empty.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    /// Grammar production name, operator symbol, or bracket marker
    Symbol {
        label: String,
        /// Token discriminant attached by the parser, 0 means none
        token: i32,
    },
    /// Numeric literal leaf
    Literal {
        label: String,
        token: i32,
        value: f64,
    },
}

impl NodeData {
    pub fn symbol(label: impl Into<String>) -> Self {
        Self::Symbol {
            label: label.into(),
            token: 0,
        }
    }

    pub fn symbol_with_token(label: impl Into<String>, token: i32) -> Self {
        Self::Symbol {
            label: label.into(),
            token,
        }
    }

    pub fn literal(label: impl Into<String>, value: f64) -> Self {
        Self::Literal {
            label: label.into(),
            token: 0,
            value,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Symbol { label, .. } | Self::Literal { label, .. } => label,
        }
    }

    pub fn token(&self) -> i32 {
        match self {
            Self::Symbol { token, .. } | Self::Literal { token, .. } => *token,
        }
    }

    pub fn set_label(&mut self, new_label: impl Into<String>) {
        match self {
            Self::Symbol { label, .. } | Self::Literal { label, .. } => *label = new_label.into(),
        }
    }

    pub fn is_operator(&self) -> bool {
        match self {
            Self::Symbol { label, .. } => OPERATORS.contains(&label.as_str()),
            Self::Literal { .. } => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        match self {
            Self::Symbol { label, .. } => {
                self.is_operator() || BRACKETS.contains(&label.as_str())
            }
            Self::Literal { .. } => true,
        }
    }

    pub fn is_non_terminal(&self) -> bool {
        !self.is_terminal()
    }

    pub fn is_semantically_empty(&self) -> bool {
        match self {
            Self::Symbol { label, .. } => BRACKETS.contains(&label.as_str()),
            Self::Literal { .. } => false,
        }
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol { label, token } => {
                write!(f, "{}", label)?;
                if *token != 0 {
                    write!(f, " [{}]", token)?;
                }
                Ok(())
            }
            Self::Literal { value, .. } => write!(f, "{}", value),
        }
    }
}

/// Tree node in the arena-based syntax tree.
#[derive(Debug)]
pub struct TreeNode {
    /// Grammar payload of this node
    pub data: NodeData,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes; order encodes operand order
    pub children: Vec<Index>,
}

/// Arena-based syntax tree.
///
/// Uses generational arena indices as node identity, so "replace this exact
/// node" is an overwrite of one index slot in the parent's child list. Two
/// structurally equal subtrees at different positions remain distinct.
#[derive(Debug)]
pub struct SyntaxTree {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Index of the root node, None for the empty tree
    root: Option<Index>,
}

impl Default for SyntaxTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, data: NodeData, parent: Option<Index>) -> Index {
        let node = TreeNode {
            data,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn set_root(&mut self, root: Option<Index>) {
        self.root = root;
        if let Some(idx) = root {
            if let Some(node) = self.arena.get_mut(idx) {
                node.parent = None;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> TreeIterator {
        TreeIterator::new(self)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Collects the rendered labels of all leaf nodes, left to right.
    ///
    /// After a full reduction these are the operand literals in source order.
    /// Empty trees return an empty vector.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_labels(&self) -> Vec<String> {
        let mut leaves = Vec::new();
        if let Some(root) = self.root {
            self.collect_leaves(root, &mut leaves);
        }
        leaves
    }

    fn collect_leaves(&self, node_idx: Index, leaves: &mut Vec<String>) {
        if let Some(node) = self.get_node(node_idx) {
            if node.children.is_empty() {
                leaves.push(node.data.to_string());
            } else {
                for &child in &node.children {
                    self.collect_leaves(child, leaves);
                }
            }
        }
    }

    /// Finds the leftmost non-terminal node in the subtree at `idx`.
    ///
    /// Pre-order: the node itself is tested before its children, children
    /// strictly left to right. This fixes the reduction order to
    /// left-to-right, outside-in.
    #[instrument(level = "trace", skip(self))]
    pub fn find_leftmost_nonterminal(&self, idx: Index) -> Option<Index> {
        let node = self.get_node(idx)?;

        if node.data.is_non_terminal() {
            return Some(idx);
        }

        for &child in &node.children {
            if let Some(found) = self.find_leftmost_nonterminal(child) {
                return Some(found);
            }
        }

        None
    }

    /// True if the subtree at `idx` contains any non-terminal node.
    #[instrument(level = "trace", skip(self))]
    pub fn has_nonterminal(&self, idx: Index) -> bool {
        let Some(node) = self.get_node(idx) else {
            return false;
        };

        if node.data.is_non_terminal() {
            return true;
        }

        node.children.iter().any(|&child| self.has_nonterminal(child))
    }

    /// Overwrites the child slot holding `target` with `replacement`.
    ///
    /// Searches depth-first over the descendants of `root` (not `root`
    /// itself), left to right. Reports false when `target` is not found;
    /// the tree is left unchanged in that case.
    #[instrument(level = "trace", skip(self))]
    pub fn replace_child(&mut self, root: Index, target: Index, replacement: Index) -> bool {
        let Some(holder) = self.find_holder(root, target) else {
            return false;
        };

        if let Some(parent) = self.arena.get_mut(holder) {
            for slot in parent.children.iter_mut() {
                if *slot == target {
                    *slot = replacement;
                    break;
                }
            }
        }
        if let Some(node) = self.arena.get_mut(replacement) {
            node.parent = Some(holder);
        }
        true
    }

    /// Index of the node whose child list contains `target`.
    fn find_holder(&self, from: Index, target: Index) -> Option<Index> {
        let node = self.get_node(from)?;
        for &child in &node.children {
            if child == target {
                return Some(from);
            }
            if let Some(found) = self.find_holder(child, target) {
                return Some(found);
            }
        }
        None
    }

    /// Frees a single node slot. Children are not touched; the caller moves
    /// them out first.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_node(&mut self, idx: Index) {
        self.arena.remove(idx);
        if self.root == Some(idx) {
            self.root = None;
        }
    }

    /// Frees a node and everything below it.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_subtree(&mut self, idx: Index) {
        if let Some(node) = self.arena.remove(idx) {
            for child in node.children {
                self.remove_subtree(child);
            }
        }
        if self.root == Some(idx) {
            self.root = None;
        }
    }
}

pub struct TreeIterator<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a SyntaxTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
