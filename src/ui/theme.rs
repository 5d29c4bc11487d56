//! Inspector palette, one role per field

use ratatui::style::Color;

pub struct Theme {
    pub text: Color,
    pub muted: Color,
    /// Brackets and braces in the source pane
    pub bracket: Color,
    /// Line number of the line holding the selection
    pub marker: Color,
    pub ok: Color,
    pub error: Color,

    // Token kinds
    pub keyword: Color,
    pub identifier: Color,
    pub constant: Color,
    pub string: Color,

    /// Grammar construct labels in the tree pane
    pub construct: Color,
    /// Background of the selected token span
    pub span_mark: Color,

    pub border_focused: Color,
    pub border_normal: Color,
    pub bar_bg: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    text: Color::Rgb(220, 215, 186),
    muted: Color::Rgb(114, 113, 105),
    bracket: Color::Rgb(126, 156, 216),
    marker: Color::Rgb(255, 160, 102),
    ok: Color::Rgb(152, 187, 108),
    error: Color::Rgb(228, 104, 118),
    keyword: Color::Rgb(149, 127, 184),
    identifier: Color::Rgb(127, 180, 202),
    constant: Color::Rgb(210, 126, 153),
    string: Color::Rgb(152, 187, 108),
    construct: Color::Rgb(230, 195, 132),
    span_mark: Color::Rgb(230, 195, 132),
    border_focused: Color::Rgb(230, 195, 132),
    border_normal: Color::Rgb(84, 84, 109),
    bar_bg: Color::Rgb(42, 42, 55),
};
