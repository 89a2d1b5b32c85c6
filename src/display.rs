//! Tree rendering for terminal output

use generational_arena::Index;
use termtree::Tree;

use crate::arena::SyntaxTree;

/// Builds a termtree rendering of the subtree at `idx`.
pub fn to_tree_string(tree: &SyntaxTree, idx: Index) -> Tree<String> {
    let Some(node) = tree.get_node(idx) else {
        return Tree::new(String::new());
    };

    let root = node.data.to_string();
    let leaves: Vec<_> = node
        .children
        .iter()
        .map(|&child| to_tree_string(tree, child))
        .collect();

    Tree::new(root).with_leaves(leaves)
}

/// Renders the whole tree, one node per line with branch glyphs.
pub fn render(tree: &SyntaxTree) -> String {
    match tree.root() {
        Some(root) => to_tree_string(tree, root).to_string(),
        None => "Tree is empty.\n".to_string(),
    }
}
