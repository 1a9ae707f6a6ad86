use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Vertical split of the full-screen UI.
pub struct AppLayout {
    pub header: Rect,
    pub progress: Option<Rect>,
    pub body: Rect,
    pub notices: Option<Rect>,
    pub input: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect, show_progress: bool, notice_rows: u16) -> Self {
        // Notices get at most a third of the screen; the body keeps the rest.
        let notice_height = if notice_rows == 0 {
            0
        } else {
            (notice_rows + 2).min(area.height / 3)
        };
        let progress_height = if show_progress && area.height >= 20 { 3 } else { 0 };

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(progress_height),
                Constraint::Min(5),
                Constraint::Length(notice_height),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header: vertical[0],
            progress: (progress_height > 0).then_some(vertical[1]),
            body: vertical[2],
            notices: (notice_height > 0).then_some(vertical[3]),
            input: vertical[4],
            footer: vertical[5],
        }
    }
}

pub fn wrapped_line_count(text: &str, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    let chars = text.chars().count().max(1);
    chars.div_ceil(width)
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = " ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints.iter().filter(|h| !h.is_empty()) {
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width || !has_hint {
            current = candidate;
        } else {
            out.push(current);
            current = format!("{prefix}{hint}");
        }
        has_hint = true;
    }

    if has_hint {
        out.push(current);
    }
    out
}
