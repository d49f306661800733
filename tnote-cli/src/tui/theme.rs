use ratatui::style::{Color, Modifier, Style};

/// Border of the search box, which always holds the cursor.
pub fn query_border() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

pub fn list_border() -> Style {
    Style::default().fg(Color::Gray)
}

pub fn highlight() -> Style {
    Style::default()
        .bg(Color::Yellow)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD)
}

pub fn filename() -> Style {
    Style::default().fg(Color::White)
}

pub fn tags() -> Style {
    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_stands_out_from_rows() {
        assert_ne!(highlight(), filename());
        assert_ne!(query_border(), list_border());
    }
}
