//! Downstream formatters for parse results
//!
//! - [`xml`]: the tagged text form compared by the course's test files
//! - [`NodeCounts`]: per-label node totals, logged by the driver

pub mod xml;

pub use xml::{tokens_to_xml, tree_to_xml};

use crate::parser::ast::{Label, SyntaxNode};
use rustc_hash::FxHashMap;

/// Number of interior nodes per label, plus the leaf total
#[derive(Debug, Clone, Default)]
pub struct NodeCounts {
    pub labels: FxHashMap<Label, usize>,
    pub leaves: usize,
}

impl NodeCounts {
    pub fn of(root: &SyntaxNode) -> Self {
        let mut counts = NodeCounts::default();
        counts.visit(root);
        counts
    }

    fn visit(&mut self, node: &SyntaxNode) {
        match node {
            SyntaxNode::Leaf { .. } => self.leaves += 1,
            SyntaxNode::Node { label, children } => {
                *self.labels.entry(*label).or_insert(0) += 1;
                for child in children {
                    self.visit(child);
                }
            }
        }
    }

    pub fn get(&self, label: Label) -> usize {
        self.labels.get(&label).copied().unwrap_or(0)
    }

    /// Statement nodes of every kind
    pub fn statements(&self) -> usize {
        [
            Label::LetStatement,
            Label::IfStatement,
            Label::WhileStatement,
            Label::DoStatement,
            Label::ReturnStatement,
        ]
        .into_iter()
        .map(|label| self.get(label))
        .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_class;

    #[test]
    fn test_counts() {
        let class = parse_class(
            "class A { field int x; method void f() { let x = 1; if (x) { return; } return; } }",
        )
        .unwrap();
        let counts = NodeCounts::of(&class);
        assert_eq!(counts.get(Label::Class), 1);
        assert_eq!(counts.get(Label::ClassVarDec), 1);
        assert_eq!(counts.get(Label::Statements), 2);
        assert_eq!(counts.get(Label::ReturnStatement), 2);
        assert_eq!(counts.get(Label::WhileStatement), 0);
        assert_eq!(counts.statements(), 4);
        assert_eq!(counts.leaves, class.leaves().len());
    }
}
