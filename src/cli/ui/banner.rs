use colored::*;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use is_terminal::IsTerminal;
use std::io;

const TITLE: &str = "Expo Migrator";
const SUBTITLE: &str = "Seamless migration for your Expo applications";
const DEFAULT_WIDTH: usize = 80;

/// Left padding that centers `text` in `width` columns
fn center_padding(text: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(text.chars().count()) / 2)
}

/// Welcome banner centered for a terminal `width` columns wide
pub fn render_banner(width: usize) -> String {
    format!(
        "\n\n\n\n{}{}\n\n{}{}\n\n\n",
        center_padding(TITLE, width),
        TITLE.bold(),
        center_padding(SUBTITLE, width),
        SUBTITLE.dimmed()
    )
}

pub fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(columns, _)| columns as usize)
        .unwrap_or(DEFAULT_WIDTH)
}

pub fn display_welcome_banner() {
    let mut stdout = io::stdout();
    if stdout.is_terminal() {
        let _ = execute!(stdout, Clear(ClearType::All), MoveTo(0, 0));
    }
    println!("{}", render_banner(terminal_width()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_is_centered_for_given_width() {
        colored::control::set_override(false);
        let banner = render_banner(40);

        let title_line = banner.lines().find(|l| l.contains(TITLE)).unwrap();
        assert_eq!(title_line, format!("{}{}", " ".repeat(13), TITLE));

        let subtitle_line = banner.lines().find(|l| l.contains(SUBTITLE)).unwrap();
        assert!(subtitle_line.starts_with(SUBTITLE));
    }

    #[test]
    fn test_narrow_terminal_has_no_padding() {
        assert_eq!(center_padding(SUBTITLE, 10), "");
        assert_eq!(center_padding("ab", 6), "  ");
    }
}
