//! Main TUI application state and logic

use crate::parser::{self, ParseError};
use crate::ui::panes::{self, Highlight, SourceScrollState, StatusRenderData};
use crate::ui::tree_view::{RowKind, TreeView};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tree,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Source,
        }
    }
}

/// One parsed file
pub struct Document {
    pub path: PathBuf,
    pub source: String,
    pub outcome: Result<TreeView, ParseError>,
}

impl Document {
    /// Parse `source` and keep the result, successful or not
    pub fn parse(path: PathBuf, source: String) -> Self {
        let outcome = parser::parse_class(&source).map(|class| TreeView::new(&class));
        Self {
            path,
            source,
            outcome,
        }
    }

    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Span to mark in the source pane
    pub fn highlight(&self) -> Option<Highlight> {
        match &self.outcome {
            Ok(view) => view.selected_row().and_then(|row| {
                row.location.map(|location| Highlight {
                    location,
                    width: row.width,
                    is_error: false,
                })
            }),
            Err(err) => Some(Highlight {
                location: err.location(),
                width: 1,
                is_error: true,
            }),
        }
    }
}

/// The main application state
pub struct App {
    pub documents: Vec<Document>,

    /// Index of the document on screen
    pub current: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: SourceScrollState,
    pub tree_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app over already parsed documents
    pub fn new(documents: Vec<Document>) -> Self {
        let mut app = App {
            documents,
            current: 0,
            focused_pane: FocusedPane::Tree,
            source_scroll: SourceScrollState {
                offset: 0,
                follow: true,
            },
            tree_scroll: 0,
            should_quit: false,
            status_message: String::new(),
        };
        app.describe_selection();
        app
    }

    pub fn document(&self) -> Option<&Document> {
        self.documents.get(self.current)
    }

    fn view_mut(&mut self) -> Option<&mut TreeView> {
        self.documents
            .get_mut(self.current)
            .and_then(|doc| doc.outcome.as_mut().ok())
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        let Some(doc) = self.documents.get(self.current) else {
            return;
        };
        let name = doc.name();

        panes::render_source_pane(
            frame,
            columns[0],
            &name,
            &doc.source,
            doc.highlight(),
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_tree_pane(
            frame,
            columns[1],
            doc.outcome.as_ref(),
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &StatusRenderData {
                file_name: &name,
                file_index: self.current,
                file_count: self.documents.len(),
                message: &self.status_message,
                has_error: doc.outcome.is_err(),
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Char(']') => self.switch_document(1),
            KeyCode::Char('[') => self.switch_document(-1),
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Tree => self.move_selection(TreeView::select_prev),
                FocusedPane::Source => {
                    self.source_scroll.follow = false;
                    self.source_scroll.offset = self.source_scroll.offset.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Tree => self.move_selection(TreeView::select_next),
                FocusedPane::Source => {
                    self.source_scroll.follow = false;
                    self.source_scroll.offset = self.source_scroll.offset.saturating_add(1);
                }
            },
            KeyCode::Home => self.move_selection(TreeView::select_first),
            KeyCode::End => self.move_selection(TreeView::select_last),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(view) = self.view_mut() {
                    if !view.toggle() {
                        self.status_message = "Nothing to fold here".to_string();
                        return;
                    }
                }
                self.describe_selection();
            }
            _ => {}
        }
    }

    fn move_selection(&mut self, step: fn(&mut TreeView)) {
        if let Some(view) = self.view_mut() {
            step(view);
        }
        self.source_scroll.follow = true;
        self.describe_selection();
    }

    fn switch_document(&mut self, delta: isize) {
        let count = self.documents.len();
        if count == 0 {
            return;
        }
        self.current = (self.current as isize + delta).rem_euclid(count as isize) as usize;
        self.source_scroll = SourceScrollState {
            offset: 0,
            follow: true,
        };
        self.tree_scroll = 0;
        self.describe_selection();
    }

    /// Refresh the status message from the current selection
    fn describe_selection(&mut self) {
        let Some(doc) = self.documents.get(self.current) else {
            self.status_message = "No files".to_string();
            return;
        };

        self.status_message = match &doc.outcome {
            Err(err) => err.to_string(),
            Ok(view) => match view.selected_row() {
                None => String::new(),
                Some(row) => {
                    let what = match &row.kind {
                        RowKind::Interior { label, child_count } => {
                            format!("{} ({} children)", label.tag(), child_count)
                        }
                        RowKind::Leaf { kind, text } => format!("{} {:?}", kind.tag(), text),
                    };
                    match row.location {
                        Some(loc) => format!("{} at {}", what, loc),
                        None => what,
                    }
                }
            },
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn app() -> App {
        App::new(vec![
            Document::parse(PathBuf::from("Main.jack"), "class Main { }".to_string()),
            Document::parse(PathBuf::from("Bad.jack"), "class Bad { let }".to_string()),
        ])
    }

    #[test]
    fn test_navigation_updates_status() {
        let mut app = app();
        assert_eq!(app.status_message, "class (4 children) at line 1, column 1");

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.status_message, r#"identifier "Main" at line 1, column 7"#);

        let highlight = app.document().unwrap().highlight().unwrap();
        assert_eq!(highlight.location.column, 7);
        assert_eq!(highlight.width, 4);
    }

    #[test]
    fn test_switch_to_failed_document() {
        let mut app = app();
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.current, 1);
        let doc = app.document().unwrap();
        assert!(doc.outcome.is_err());
        assert!(doc.highlight().unwrap().is_error);
        assert!(app.status_message.contains("found 'let'"));

        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.current, 0);
        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.current, 1);
    }

    #[test]
    fn test_fold_and_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.document()
                .and_then(|d| d.outcome.as_ref().ok())
                .map(|v| v.visible().len()),
            Some(1)
        );

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Source);
        press(&mut app, KeyCode::Down);
        assert!(!app.source_scroll.follow);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
