//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with syntax highlighting and the selected span marked
//! - [`tree`]: Outline of the parse tree, or the parse error for a failed file
//! - [`status`]: Status bar with keybindings and the current file
//!
//! Each pane module exports a primary `render_*` function that draws from
//! borrowed state and keeps no state of its own beyond scroll offsets passed in.

pub mod source;
pub mod status;
pub mod tree;

pub use source::{render_source_pane, Highlight, SourceScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use tree::render_tree_pane;
