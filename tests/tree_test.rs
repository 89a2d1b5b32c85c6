//! Tests for the arena-based tree model and its search utilities

use generational_arena::Index;
use optree::arena::{NodeData, SyntaxTree};
use rstest::rstest;

/// Builds `Expr [ number(2), "+", number(3) ]` and returns the tree plus the
/// indices of root and children in insertion order.
fn expression_tree() -> (SyntaxTree, Index, Index, Index, Index) {
    let mut tree = SyntaxTree::new();
    let root = tree.insert_node(NodeData::symbol("Expr"), None);
    let lhs = tree.insert_node(NodeData::literal("number", 2.0), Some(root));
    let op = tree.insert_node(NodeData::symbol("+"), Some(root));
    let rhs = tree.insert_node(NodeData::literal("number", 3.0), Some(root));
    (tree, root, lhs, op, rhs)
}

// ============================================================
// Classification Tests
// ============================================================

#[rstest]
#[case("+")]
#[case("-")]
#[case("*")]
#[case("/")]
fn given_operator_label_when_classifying_then_terminal_and_operator(#[case] label: &str) {
    let data = NodeData::symbol(label);
    assert!(data.is_operator(), "{} should be an operator", label);
    assert!(data.is_terminal(), "{} should be terminal", label);
    assert!(!data.is_non_terminal());
    assert!(!data.is_semantically_empty());
}

#[rstest]
#[case("(")]
#[case(")")]
fn given_bracket_label_when_classifying_then_terminal_and_empty(#[case] label: &str) {
    let data = NodeData::symbol(label);
    assert!(!data.is_operator());
    assert!(data.is_terminal(), "{} should be terminal", label);
    assert!(data.is_semantically_empty(), "{} should be empty", label);
}

#[rstest]
#[case("Expr")]
#[case("Term")]
#[case("Factor")]
fn given_production_name_when_classifying_then_non_terminal(#[case] label: &str) {
    let data = NodeData::symbol(label);
    assert!(data.is_non_terminal());
    assert!(!data.is_operator());
    assert!(!data.is_semantically_empty());
}

#[rstest]
#[case("number")]
#[case("+")]
#[case("(")]
fn given_literal_when_classifying_then_overrides_apply(#[case] label: &str) {
    // Even with an operator or bracket label, a literal stays a plain
    // terminal leaf.
    let data = NodeData::literal(label, 1.5);
    assert!(data.is_terminal());
    assert!(!data.is_operator());
    assert!(!data.is_semantically_empty());
}

#[test]
fn given_node_data_when_displaying_then_token_suffix_only_when_set() {
    assert_eq!(NodeData::symbol("Expr").to_string(), "Expr");
    assert_eq!(NodeData::symbol_with_token("Expr", 3).to_string(), "Expr [3]");
    assert_eq!(NodeData::literal("number", 2.5).to_string(), "2.5");
}

// ============================================================
// Structure Tests
// ============================================================

#[test]
fn given_empty_tree_when_querying_then_everything_is_absent() {
    let tree = SyntaxTree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.root(), None);
    assert_eq!(tree.depth(), 0);
    assert_eq!(tree.node_count(), 0);
    assert!(tree.leaf_labels().is_empty());
    assert_eq!(tree.iter().count(), 0);
}

#[test]
fn given_inserted_nodes_when_iterating_then_preorder_left_to_right() {
    let (tree, _, _, _, _) = expression_tree();

    let labels: Vec<String> = tree.iter().map(|(_, n)| n.data.label().to_string()).collect();
    assert_eq!(labels, vec!["Expr", "number", "+", "number"]);
}

#[test]
fn given_expression_tree_when_measuring_then_depth_and_leaves_match() {
    let (tree, _, _, _, _) = expression_tree();

    assert_eq!(tree.depth(), 2);
    assert_eq!(tree.leaf_labels(), vec!["2", "+", "3"]);
    assert_eq!(tree.node_count(), 4);
}

// ============================================================
// Search Tests
// ============================================================

#[test]
fn given_nonterminal_root_when_finding_leftmost_then_root_itself_wins() {
    // Pre-order: a non-terminal is tested before its children.
    let (tree, root, _, _, _) = expression_tree();

    assert_eq!(tree.find_leftmost_nonterminal(root), Some(root));
}

#[test]
fn given_terminal_root_when_finding_leftmost_then_descends_left_to_right() {
    let mut tree = SyntaxTree::new();
    let root = tree.insert_node(NodeData::symbol("*"), None);
    let _lhs = tree.insert_node(NodeData::literal("number", 1.0), Some(root));
    let inner = tree.insert_node(NodeData::symbol("Expr"), Some(root));
    let _trailing = tree.insert_node(NodeData::symbol("Term"), Some(root));

    assert_eq!(tree.find_leftmost_nonterminal(root), Some(inner));
}

#[test]
fn given_fully_reduced_tree_when_finding_leftmost_then_none() {
    let mut tree = SyntaxTree::new();
    let root = tree.insert_node(NodeData::symbol("+"), None);
    tree.insert_node(NodeData::literal("number", 1.0), Some(root));
    tree.insert_node(NodeData::literal("number", 2.0), Some(root));

    assert_eq!(tree.find_leftmost_nonterminal(root), None);
    assert!(!tree.has_nonterminal(root));
}

#[test]
fn given_deep_nonterminal_when_checking_then_has_nonterminal_sees_it() {
    let mut tree = SyntaxTree::new();
    let root = tree.insert_node(NodeData::symbol("+"), None);
    let mid = tree.insert_node(NodeData::symbol("*"), Some(root));
    tree.insert_node(NodeData::symbol("Factor"), Some(mid));

    assert!(tree.has_nonterminal(root));
}

// ============================================================
// Replacement Tests
// ============================================================

#[test]
fn given_grandchild_target_when_replacing_then_slot_is_overwritten() {
    let mut tree = SyntaxTree::new();
    let root = tree.insert_node(NodeData::symbol("Expr"), None);
    let wrapper = tree.insert_node(NodeData::symbol("Term"), Some(root));
    let target = tree.insert_node(NodeData::symbol("Factor"), Some(wrapper));
    let replacement = tree.insert_node(NodeData::literal("number", 9.0), Some(target));

    assert!(tree.replace_child(root, target, replacement));

    let wrapper_node = tree.get_node(wrapper).unwrap();
    assert_eq!(wrapper_node.children, vec![replacement]);
    assert_eq!(tree.get_node(replacement).unwrap().parent, Some(wrapper));
}

#[test]
fn given_structurally_equal_siblings_when_replacing_then_only_identity_matches() {
    // Two structurally identical subtrees at different positions are
    // distinct objects; only the targeted index slot changes.
    let mut tree = SyntaxTree::new();
    let root = tree.insert_node(NodeData::symbol("Expr"), None);
    let first = tree.insert_node(NodeData::symbol("Term"), Some(root));
    let second = tree.insert_node(NodeData::symbol("Term"), Some(root));
    let replacement = tree.insert_node(NodeData::literal("number", 1.0), None);
    tree.set_root(Some(root));

    assert!(tree.replace_child(root, second, replacement));

    let root_node = tree.get_node(root).unwrap();
    assert_eq!(root_node.children, vec![first, replacement]);
    assert_eq!(tree.get_node(first).unwrap().data.label(), "Term");
}

#[test]
fn given_root_as_target_when_replacing_then_fails() {
    // Only descendants are searched, never the starting node itself.
    let (mut tree, root, lhs, _, _) = expression_tree();

    assert!(!tree.replace_child(root, root, lhs));
}

#[test]
fn given_detached_target_when_replacing_then_fails_and_tree_unchanged() {
    let (mut tree, root, _, _, _) = expression_tree();
    let stray = tree.insert_node(NodeData::symbol("Ghost"), None);
    tree.set_root(Some(root));
    let before: Vec<Index> = tree.get_node(root).unwrap().children.clone();

    assert!(!tree.replace_child(root, stray, root));
    assert_eq!(tree.get_node(root).unwrap().children, before);
}

// ============================================================
// Rendering Tests
// ============================================================

#[test]
fn given_empty_tree_when_rendering_then_placeholder_text() {
    assert_eq!(optree::display::render(&SyntaxTree::new()), "Tree is empty.\n");
}

#[test]
fn given_expression_tree_when_rendering_then_all_nodes_appear() {
    let (tree, _, _, _, _) = expression_tree();
    let rendered = optree::display::render(&tree);

    assert!(rendered.starts_with("Expr"));
    for needle in ["2", "+", "3"] {
        assert!(rendered.contains(needle), "missing {} in:\n{}", needle, rendered);
    }
}

// ============================================================
// Removal Tests
// ============================================================

#[test]
fn given_subtree_when_removing_then_all_nodes_freed() {
    let mut tree = SyntaxTree::new();
    let root = tree.insert_node(NodeData::symbol("Expr"), None);
    let wrapper = tree.insert_node(NodeData::symbol("Term"), Some(root));
    tree.insert_node(NodeData::literal("number", 1.0), Some(wrapper));
    tree.insert_node(NodeData::literal("number", 2.0), Some(wrapper));

    tree.get_node_mut(root).unwrap().children.clear();
    tree.remove_subtree(wrapper);

    assert_eq!(tree.node_count(), 1);
    assert!(tree.get_node(wrapper).is_none());
}

#[test]
fn given_root_when_removing_then_tree_is_empty() {
    let mut tree = SyntaxTree::new();
    let root = tree.insert_node(NodeData::symbol("Expr"), None);

    tree.remove_node(root);

    assert!(tree.is_empty());
    assert_eq!(tree.node_count(), 0);
}
