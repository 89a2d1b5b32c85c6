use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::arena::SyntaxTree;
use crate::errors::{TreeError, TreeResult};

/// Hook invoked with the whole tree after each completed reduction step.
///
/// Tracing and interactive stepping hang off this; the reduction itself
/// never depends on it.
pub type StepHook<'a> = Box<dyn FnMut(&SyntaxTree) + 'a>;

/// Rewrites an inference tree into an operation tree.
///
/// Repeatedly locates the leftmost non-terminal node and applies one step of
/// an ordered rule list (unit collapse, bracket stripping, operator
/// promotion, descend) until no non-terminal remains. A non-terminal that no
/// rule can reduce is reported as [`TreeError::Irreducible`] instead of
/// looping.
pub struct Reducer<'a> {
    hook: Option<StepHook<'a>>,
}

impl Default for Reducer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Reducer<'a> {
    pub fn new() -> Self {
        Self { hook: None }
    }

    pub fn with_step_hook(hook: impl FnMut(&SyntaxTree) + 'a) -> Self {
        Self {
            hook: Some(Box::new(hook)),
        }
    }

    /// Reduces `tree` until it contains only operator and literal nodes.
    ///
    /// The empty tree is returned unchanged. Operand order is preserved;
    /// children are only removed, replaced, or relabeled in place.
    #[instrument(level = "debug", skip_all)]
    pub fn convert(&mut self, mut tree: SyntaxTree) -> TreeResult<SyntaxTree> {
        let Some(mut root) = tree.root() else {
            return Ok(tree);
        };

        while tree.has_nonterminal(root) {
            root = self.transform(&mut tree, root)?;
            tree.set_root(Some(root));
            if let Some(hook) = self.hook.as_mut() {
                hook(&tree);
            }
        }

        debug!(
            depth = tree.depth(),
            nodes = tree.node_count(),
            "reduction complete"
        );
        Ok(tree)
    }

    /// One reduction step: locate the leftmost non-terminal and rewrite at it.
    fn transform(&self, tree: &mut SyntaxTree, root: Index) -> TreeResult<Index> {
        let Some(current) = tree.find_leftmost_nonterminal(root) else {
            return Ok(root);
        };
        self.reduce_at(tree, root, current)
    }

    /// Ordered rule list, first match wins. Expressed as a loop so that a
    /// rule which partially rewrites `current` re-enters from the top with
    /// stack depth bounded by tree depth only.
    #[instrument(level = "trace", skip(self, tree))]
    fn reduce_at(&self, tree: &mut SyntaxTree, root: Index, mut current: Index) -> TreeResult<Index> {
        loop {
            let children: Vec<Index> = tree
                .get_node(current)
                .map(|n| n.children.clone())
                .unwrap_or_default();

            // Unit collapse: a production wrapping a single derived symbol
            // carries no semantic content.
            if children.len() == 1 {
                let child = children[0];

                if current == root {
                    trace!("unit collapse at root");
                    tree.remove_node(current);
                    tree.set_root(Some(child));
                    return Ok(child);
                }

                if tree.replace_child(root, current, child) {
                    trace!("unit collapse");
                    tree.remove_node(current);
                    return Ok(root);
                }
            }

            // Bracket stripping: drop semantically empty terminals, then
            // re-enter so a resulting single-child node collapses above.
            let mut kept = Vec::new();
            let mut stripped = Vec::new();
            for &child in &children {
                let empty = tree
                    .get_node(child)
                    .map_or(false, |n| n.data.is_terminal() && n.data.is_semantically_empty());
                if empty {
                    stripped.push(child);
                } else {
                    kept.push(child);
                }
            }
            if !stripped.is_empty() {
                trace!(count = stripped.len(), "stripping bracket terminals");
                if let Some(node) = tree.get_node_mut(current) {
                    node.children = kept;
                }
                for idx in stripped {
                    tree.remove_subtree(idx);
                }
                continue;
            }

            // Operator promotion: the scan does not stop early, so with
            // several operator children the last one wins. Operands keep
            // their original relative order.
            let mut operator = None;
            let mut operands = Vec::new();
            for &child in &children {
                let is_op = tree
                    .get_node(child)
                    .map_or(false, |n| n.data.is_terminal() && n.data.is_operator());
                if is_op {
                    operator = Some(child);
                } else {
                    operands.push(child);
                }
            }
            if let Some(op) = operator {
                if !operands.is_empty() {
                    let label = tree
                        .get_node(op)
                        .map(|n| n.data.label().to_string())
                        .unwrap_or_default();
                    trace!(%label, "operator promotion");
                    if let Some(node) = tree.get_node_mut(current) {
                        node.data.set_label(label);
                        node.children = operands.clone();
                    }
                    // every operator-classified child leaves the tree, not
                    // just the winning one
                    for &child in &children {
                        if !operands.contains(&child) {
                            tree.remove_node(child);
                        }
                    }
                    return Ok(root);
                }
            }

            // Descend into the leftmost non-terminal child.
            let next = children.iter().copied().find(|&child| {
                tree.get_node(child)
                    .map_or(false, |n| n.data.is_non_terminal())
            });
            if let Some(child) = next {
                current = child;
                continue;
            }

            // No rule applies and `current` is still non-terminal. The
            // source looped forever here; report it instead.
            let label = tree
                .get_node(current)
                .map(|n| n.data.label().to_string())
                .unwrap_or_default();
            return Err(TreeError::Irreducible { label });
        }
    }
}

/// Reduces `tree` with a fresh [`Reducer`] and no step hook.
pub fn convert(tree: SyntaxTree) -> TreeResult<SyntaxTree> {
    Reducer::new().convert(tree)
}
