//! XML rendering of parse trees and token streams
//!
//! Leaves render as `<kind> text </kind>` with one space on each side of the
//! text.  Interior nodes open and close on their own lines with children
//! indented two spaces; a node without children renders as `<tag></tag>`.

use crate::parser::ast::SyntaxNode;
use crate::parser::lexer::Token;
use std::fmt::Write;

const INDENT: &str = "  ";

/// Escape the characters XML reserves
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn write_leaf(out: &mut String, tag: &str, text: &str) {
    // Writing into a String cannot fail
    let _ = writeln!(out, "<{tag}> {} </{tag}>", escape(text));
}

/// Render a parse tree
pub fn tree_to_xml(root: &SyntaxNode) -> String {
    let mut out = String::new();
    write_node(&mut out, root, 0);
    out
}

fn write_node(out: &mut String, node: &SyntaxNode, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }

    match node {
        SyntaxNode::Leaf { kind, text, .. } => write_leaf(out, kind.tag(), text),
        SyntaxNode::Node { label, children } if children.is_empty() => {
            let _ = writeln!(out, "<{tag}></{tag}>", tag = label.tag());
        }
        SyntaxNode::Node { label, children } => {
            let _ = writeln!(out, "<{}>", label.tag());
            for child in children {
                write_node(out, child, depth + 1);
            }
            for _ in 0..depth {
                out.push_str(INDENT);
            }
            let _ = writeln!(out, "</{}>", label.tag());
        }
    }
}

/// Render the flat token stream
pub fn tokens_to_xml(tokens: &[Token]) -> String {
    let mut out = String::from("<tokens>\n");
    for token in tokens {
        write_leaf(&mut out, token.kind.tag(), &token.text);
    }
    out.push_str("</tokens>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_class, Tokenizer};

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a<b>&"c""#), "a&lt;b&gt;&amp;&quot;c&quot;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_empty_class() {
        let class = parse_class("class Main { }").unwrap();
        assert_eq!(
            tree_to_xml(&class),
            "<class>\n  <keyword> class </keyword>\n  <identifier> Main </identifier>\n  <symbol> { </symbol>\n  <symbol> } </symbol>\n</class>\n"
        );
    }

    #[test]
    fn test_empty_lists_render_as_one_tag() {
        let class = parse_class("class A { function void f() { do g(); return; } }").unwrap();
        let xml = tree_to_xml(&class);
        assert!(xml.contains("    <parameterList></parameterList>\n"));
        assert!(xml.contains("<expressionList></expressionList>\n"));
        assert!(!xml.contains("<parameterList>\n"));
    }

    #[test]
    fn test_nested_indentation() {
        let class =
            parse_class("class A { method int f(int x) { return x < 1; } }").unwrap();
        let xml = tree_to_xml(&class);
        let expected = "\
    <subroutineBody>
      <symbol> { </symbol>
      <statements>
        <returnStatement>
          <keyword> return </keyword>
          <expression>
            <term>
              <identifier> x </identifier>
            </term>
            <symbol> &lt; </symbol>
            <term>
              <integerConstant> 1 </integerConstant>
            </term>
          </expression>
          <symbol> ; </symbol>
        </returnStatement>
      </statements>
      <symbol> } </symbol>
    </subroutineBody>
";
        assert!(xml.contains(expected), "got:\n{}", xml);
    }

    #[test]
    fn test_tokens() {
        let tokens = Tokenizer::new(r#"if (x < 0) { let s = "ok"; }"#)
            .tokenize()
            .unwrap();
        let xml = tokens_to_xml(&tokens);
        let lines: Vec<&str> = xml.lines().collect();
        assert_eq!(lines.first(), Some(&"<tokens>"));
        assert_eq!(lines.last(), Some(&"</tokens>"));
        assert_eq!(lines[1], "<keyword> if </keyword>");
        assert_eq!(lines[4], "<symbol> &lt; </symbol>");
        assert_eq!(lines[11], "<stringConstant> ok </stringConstant>");
        assert_eq!(lines.len(), tokens.len() + 2);
    }
}
