//! # Introduction
//!
//! `jack_analyzer` tokenizes and parses classes written in Jack, the small
//! object-oriented teaching language, into a syntax tree that mirrors the
//! grammar one node per construct.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Tokenizer → Parser → SyntaxNode tree → XML / Inspector
//! ```
//!
//! 1. [`parser`] - the tokenizer and the recursive descent compilation engine.
//! 2. [`render`] - XML rendering of trees and token streams.
//! 3. [`sources`] - finding `.jack` files and naming output files.
//! 4. [`ui`] - ratatui-based tree inspector; not part of the stable library API.
//!
//! Each file gets its own tokenizer and parser; nothing is shared between
//! files, and the first error in a file aborts that file only.

pub mod parser;
pub mod render;
pub mod sources;
pub mod ui;
