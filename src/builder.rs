use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::instrument;

use crate::arena::{NodeData, SyntaxTree};
use crate::errors::{TreeError, TreeResult};

/// Node shape of the analyzer's tree document.
///
/// A present `value` selects the literal variant; `token` and `children`
/// default to none.
#[derive(Debug, Deserialize)]
struct RawNode {
    label: String,
    #[serde(default)]
    token: i32,
    value: Option<f64>,
    #[serde(default)]
    children: Vec<RawNode>,
}

/// Builds a [`SyntaxTree`] from the serialized inference tree handed over by
/// the external analyzer.
pub struct TreeBuilder;

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self
    }

    #[instrument(level = "debug", skip(self))]
    pub fn from_file(&self, path: &Path) -> TreeResult<SyntaxTree> {
        if !path.exists() {
            return Err(TreeError::FileNotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(TreeError::FileReadError)?;
        self.parse(path, &text)
    }

    pub fn from_json(&self, text: &str) -> TreeResult<SyntaxTree> {
        self.parse(Path::new("<memory>"), text)
    }

    fn parse(&self, path: &Path, text: &str) -> TreeResult<SyntaxTree> {
        let raw: Option<RawNode> =
            serde_json::from_str(text).map_err(|e| TreeError::InvalidFormat {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Ok(self.build(raw))
    }

    /// Iterative construction with an explicit work stack. Children are
    /// pushed in reverse so each parent's child list keeps document order.
    fn build(&self, raw: Option<RawNode>) -> SyntaxTree {
        let mut tree = SyntaxTree::new();
        let Some(raw_root) = raw else {
            return tree;
        };

        let mut stack = vec![(raw_root, None)];
        while let Some((raw_node, parent_idx)) = stack.pop() {
            let data = match raw_node.value {
                Some(value) => NodeData::Literal {
                    label: raw_node.label,
                    token: raw_node.token,
                    value,
                },
                None => NodeData::Symbol {
                    label: raw_node.label,
                    token: raw_node.token,
                },
            };
            let current_idx = tree.insert_node(data, parent_idx);

            for child in raw_node.children.into_iter().rev() {
                stack.push((child, Some(current_idx)));
            }
        }

        tree
    }
}
