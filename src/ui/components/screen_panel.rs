use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::ui::layout::wrapped_line_count;
use crate::ui::theme::Theme;
use crate::ui::view::{LineKind, MenuOption, ScreenView, ViewLine};

/// Body of the full-screen UI: the screen's content lines followed by its
/// numbered options, inside a titled border.
pub struct ScreenPanel<'a> {
    view: &'a ScreenView,
    theme: &'a Theme,
    scroll: u16,
}

impl<'a> ScreenPanel<'a> {
    pub fn new(view: &'a ScreenView, theme: &'a Theme, scroll: u16) -> Self {
        Self {
            view,
            theme,
            scroll,
        }
    }

    /// Rows the panel content needs at the given inner width.
    pub fn content_height(view: &ScreenView, width: u16) -> usize {
        let width = width as usize;
        let lines: usize = view
            .lines
            .iter()
            .map(|l| wrapped_line_count(&l.text, width))
            .sum();
        let separator = usize::from(!view.lines.is_empty() && !view.options.is_empty());
        lines + separator + view.options.len()
    }
}

pub fn styled_line<'l>(line: &'l ViewLine, theme: &Theme) -> Line<'l> {
    let mut style = Style::default().fg(theme.line_color(line.kind));
    if line.kind == LineKind::Heading {
        style = style.add_modifier(Modifier::BOLD);
    }
    Line::from(Span::styled(line.text.as_str(), style))
}

fn option_line<'l>(option: &'l MenuOption, theme: &Theme) -> Line<'l> {
    let colors = &theme.colors;
    let mut spans = vec![Span::styled(
        format!(" {}. ", option.key),
        Style::default()
            .fg(colors.heading())
            .add_modifier(Modifier::BOLD),
    )];
    match option.done {
        Some(true) => spans.push(Span::styled("[✓] ", Style::default().fg(colors.success()))),
        Some(false) => spans.push(Span::styled("[ ] ", Style::default().fg(colors.text_muted()))),
        None => {}
    }
    spans.push(Span::styled(
        option.label.as_str(),
        Style::default().fg(colors.fg()),
    ));
    Line::from(spans)
}

impl Widget for ScreenPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(Span::styled(
                format!(" {} ", self.view.title),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        let mut lines: Vec<Line> = self
            .view
            .lines
            .iter()
            .map(|l| styled_line(l, self.theme))
            .collect();
        if !lines.is_empty() && !self.view.options.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(self.view.options.iter().map(|o| option_line(o, self.theme)));

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}
