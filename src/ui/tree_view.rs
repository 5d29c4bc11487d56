//! Navigable outline of a parse tree
//!
//! The tree is flattened once into pre-order [`TreeRow`]s.  Each row records
//! where its subtree ends, so collapsing a node only has to skip a range of
//! rows.  None of this touches the terminal and is tested directly.

use crate::parser::ast::{Label, SourceLocation, SyntaxNode, TokenKind};
use rustc_hash::FxHashSet;

/// What a row stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    Interior { label: Label, child_count: usize },
    Leaf { kind: TokenKind, text: String },
}

/// One line of the outline
#[derive(Debug, Clone)]
pub struct TreeRow {
    pub depth: usize,
    pub kind: RowKind,
    /// First token covered by the row
    pub location: Option<SourceLocation>,
    /// Width in characters of the source span of a leaf
    pub width: usize,
    /// Index one past the last row of this subtree
    pub end: usize,
}

impl TreeRow {
    pub fn is_expandable(&self) -> bool {
        matches!(self.kind, RowKind::Interior { child_count, .. } if child_count > 0)
    }
}

/// Flattened tree plus selection and collapse state
pub struct TreeView {
    rows: Vec<TreeRow>,
    collapsed: FxHashSet<usize>,
    /// Index into `rows`; always a visible row
    selected: usize,
}

impl TreeView {
    pub fn new(root: &SyntaxNode) -> Self {
        let mut rows = Vec::new();
        flatten(root, 0, &mut rows);
        Self {
            rows,
            collapsed: FxHashSet::default(),
            selected: 0,
        }
    }

    pub fn rows(&self) -> &[TreeRow] {
        &self.rows
    }

    pub fn is_collapsed(&self, index: usize) -> bool {
        self.collapsed.contains(&index)
    }

    /// Row indices currently shown, in order
    pub fn visible(&self) -> Vec<usize> {
        let mut out = Vec::new();
        let mut index = 0;
        while index < self.rows.len() {
            out.push(index);
            index = if self.collapsed.contains(&index) {
                self.rows[index].end
            } else {
                index + 1
            };
        }
        out
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&TreeRow> {
        self.rows.get(self.selected)
    }

    /// Position of the selection among the visible rows
    pub fn selected_position(&self) -> usize {
        self.visible()
            .iter()
            .position(|&i| i == self.selected)
            .unwrap_or(0)
    }

    pub fn select_next(&mut self) {
        let visible = self.visible();
        let pos = self.selected_position();
        if let Some(&next) = visible.get(pos + 1) {
            self.selected = next;
        }
    }

    pub fn select_prev(&mut self) {
        let visible = self.visible();
        let pos = self.selected_position();
        if pos > 0 {
            self.selected = visible[pos - 1];
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        if let Some(&last) = self.visible().last() {
            self.selected = last;
        }
    }

    /// Collapse or expand the selected row; leaves are left alone
    pub fn toggle(&mut self) -> bool {
        let Some(row) = self.rows.get(self.selected) else {
            return false;
        };
        if !row.is_expandable() {
            return false;
        }
        if !self.collapsed.remove(&self.selected) {
            self.collapsed.insert(self.selected);
        }
        true
    }
}

fn flatten(node: &SyntaxNode, depth: usize, rows: &mut Vec<TreeRow>) {
    let index = rows.len();
    match node {
        SyntaxNode::Leaf {
            kind,
            text,
            location,
        } => {
            let quotes = if *kind == TokenKind::StringConstant { 2 } else { 0 };
            rows.push(TreeRow {
                depth,
                kind: RowKind::Leaf {
                    kind: *kind,
                    text: text.clone(),
                },
                location: Some(*location),
                width: text.chars().count() + quotes,
                end: index + 1,
            });
        }
        SyntaxNode::Node { label, children } => {
            rows.push(TreeRow {
                depth,
                kind: RowKind::Interior {
                    label: *label,
                    child_count: children.len(),
                },
                location: node.location(),
                width: 0,
                end: index + 1,
            });
            for child in children {
                flatten(child, depth + 1, rows);
            }
            rows[index].end = rows.len();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_class;

    fn view(source: &str) -> TreeView {
        TreeView::new(&parse_class(source).unwrap())
    }

    #[test]
    fn test_flatten_preorder() {
        let view = view("class Main { }");
        let rows = view.rows();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].end, 5);
        assert_eq!(rows[1].depth, 1);
        assert!(matches!(rows[2].kind, RowKind::Leaf { ref text, .. } if text == "Main"));
    }

    #[test]
    fn test_collapse_hides_subtree() {
        let mut view = view("class A { field int x; }");
        assert_eq!(view.visible().len(), 10);

        view.select_next();
        view.select_next();
        view.select_next();
        view.select_next();
        assert!(matches!(
            view.selected_row().unwrap().kind,
            RowKind::Interior { label: Label::ClassVarDec, .. }
        ));
        assert!(view.toggle());
        assert_eq!(view.visible().len(), 6);

        view.select_next();
        assert!(matches!(
            view.selected_row().unwrap().kind,
            RowKind::Leaf { ref text, .. } if text == "}"
        ));

        view.select_prev();
        assert!(view.toggle());
        assert_eq!(view.visible().len(), 10);
    }

    #[test]
    fn test_leaves_and_empty_nodes_do_not_toggle() {
        let mut view = view("class A { function void f() { return; } }");
        view.select_next();
        assert!(!view.toggle());

        let list = view
            .rows()
            .iter()
            .position(|r| matches!(r.kind, RowKind::Interior { label: Label::ParameterList, .. }))
            .unwrap();
        assert!(!view.rows()[list].is_expandable());
    }

    #[test]
    fn test_select_bounds() {
        let mut view = view("class Main { }");
        view.select_prev();
        assert_eq!(view.selected(), 0);
        view.select_last();
        assert_eq!(view.selected(), 4);
        view.select_next();
        assert_eq!(view.selected(), 4);
        view.select_first();
        assert_eq!(view.selected(), 0);
    }
}
