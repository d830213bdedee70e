use ratatui::style::Color;

pub struct Theme {
    #[allow(dead_code)] // Background color field for future use
    pub bg: Color,
    pub fg: Color,
    pub comment: Color,   // Grey
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_focused: Color,
    pub border_normal: Color,
    pub status_bg: Color,
    pub bar: Color,         // Cyan: a value at rest
    pub bar_active: Color,  // Red: a value the current event touches
    pub bar_settled: Color, // Green: a value in final sorted place
    pub bar_window: Color,  // Orange: inside the binary-search window
    pub node: Color,        // Unvisited tree node
    pub node_visited: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    bg: Color::Rgb(30, 30, 46),
    fg: Color::Rgb(205, 214, 244),
    comment: Color::Rgb(108, 112, 134),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    status_bg: Color::Rgb(50, 50, 70),
    bar: Color::Rgb(148, 226, 213),         // Teal/cyan default
    bar_active: Color::Rgb(243, 139, 168),  // Red while compared/moved
    bar_settled: Color::Rgb(166, 227, 161), // Green once settled
    bar_window: Color::Rgb(250, 179, 135),  // Orange search window
    node: Color::Rgb(205, 214, 244),
    node_visited: Color::Rgb(166, 227, 161),
};
