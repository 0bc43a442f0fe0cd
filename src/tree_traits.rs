/*
Rebuild a box-drawing tree from the flat output of `describe`.

The records are pre-order with explicit depths, so a stack of open subtrees
is enough: every record closes all open subtrees at its depth or deeper.
 */
use termtree::Tree;
use tracing::instrument;

use crate::domain::{DescribeRecord, DomainResult, EntityId, OrgTree};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for [DescribeRecord] {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        let mut open: Vec<(usize, Tree<String>)> = Vec::new();

        for record in self {
            close_until(&mut open, record.depth);
            open.push((record.depth, Tree::new(record.to_string())));
        }
        close_until(&mut open, 0);

        match open.pop() {
            Some((_, tree)) => tree,
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

/// Folds every open subtree at `depth` or deeper into its parent.
/// The bottom of the stack is never folded.
fn close_until(open: &mut Vec<(usize, Tree<String>)>, depth: usize) {
    while open.len() > 1 && open.last().map_or(false, |(d, _)| *d >= depth) {
        if let Some((_, finished)) = open.pop() {
            if let Some((_, parent)) = open.last_mut() {
                parent.push(finished);
            }
        }
    }
}

impl OrgTree {
    /// Box-drawing rendering of the subtree rooted at `id`.
    pub fn to_tree_string(&self, id: EntityId) -> DomainResult<Tree<String>> {
        Ok(self.describe(id)?.to_tree_string())
    }
}
