//! Terminal inspector built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`app`]** - application state, keyboard event loop, pane focus, file switching
//! - **[`tree_view`]** - flattened, foldable outline of a parse tree (no terminal needed)
//! - **[`panes`]** - stateless render functions for each visible pane (source,
//!   tree, status bar)
//! - **[`theme`]** - centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it from parsed
//! [`app::Document`]s and call [`App::run`] to start the event loop.
//!
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;
pub mod tree_view;

pub use app::{App, Document};
