//! Line-oriented front-end: prints each screen, reads one answer per line.
//! Used with `--plain` or when stdin/stdout is not a terminal.

use std::io::{self, BufRead, Write};

use crossterm::style::{Color, Stylize};

use crate::app::App;
use crate::navigator::{Notice, Screen};
use crate::ui::text;
use crate::ui::view::{LineKind, ScreenView, ViewLine};

pub fn run<R: BufRead, W: Write>(app: &mut App, mut input: R, out: &mut W, color: bool) -> io::Result<()> {
    let painter = Painter { color };

    loop {
        let view = app.view();
        if app.navigator.screen() == &Screen::Main {
            write_banner(out, &painter)?;
        }
        write_view(out, &view, &painter)?;
        write_notices(out, &app.notices, &painter)?;
        write!(out, "\n{}", painter.paint(&view.prompt, Some(Color::Cyan)))?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // End of input counts as an interrupt.
            writeln!(out)?;
            app.interrupt();
            return write_notices(out, &app.notices, &painter);
        }

        app.submit(line.trim_end_matches(['\n', '\r']));
        if app.should_quit {
            writeln!(out)?;
            return write_notices(out, &app.notices, &painter);
        }
    }
}

/// What the Ctrl+C handler prints before exiting.
pub fn farewell(color: bool) -> String {
    let painter = Painter { color };
    format!(
        "\n\n{}\n{}",
        painter.paint(text::SHUTTING_DOWN, Some(Color::Yellow)),
        painter.paint(text::FAREWELL, Some(Color::Green))
    )
}

struct Painter {
    color: bool,
}

impl Painter {
    fn paint(&self, s: &str, color: Option<Color>) -> String {
        match color {
            Some(c) if self.color => s.with(c).to_string(),
            _ => s.to_string(),
        }
    }

    fn line(&self, line: &ViewLine) -> String {
        let color = match line.kind {
            LineKind::Heading | LineKind::Warning => Some(Color::Yellow),
            LineKind::Text => None,
            LineKind::Code | LineKind::Success => Some(Color::Green),
            LineKind::Accent => Some(Color::Blue),
            LineKind::Muted => Some(Color::DarkGrey),
            LineKind::Error => Some(Color::Red),
        };
        self.paint(&line.text, color)
    }
}

fn write_banner<W: Write>(out: &mut W, painter: &Painter) -> io::Result<()> {
    let rule = "═".repeat(62);
    writeln!(out)?;
    writeln!(out, "{}", painter.paint(&format!("╔{rule}╗"), Some(Color::Cyan)))?;
    writeln!(out, "{}", painter.paint(&format!("║{:^62}║", text::APP_TITLE), Some(Color::Cyan)))?;
    writeln!(out, "{}", painter.paint(&format!("║{:^62}║", text::APP_SUBTITLE), Some(Color::Cyan)))?;
    writeln!(out, "{}", painter.paint(&format!("╚{rule}╝"), Some(Color::Cyan)))
}

fn write_view<W: Write>(out: &mut W, view: &ScreenView, painter: &Painter) -> io::Result<()> {
    if view.title.is_empty() && view.lines.is_empty() && view.options.is_empty() {
        return Ok(());
    }
    let frame = |s: &str| painter.paint(s, Some(Color::Green));

    writeln!(out)?;
    writeln!(out, "{}", frame(&format!("╔══ {} ══╗", view.title)))?;
    for line in &view.lines {
        writeln!(out, "{} {}", frame("║"), painter.line(line))?;
    }
    if !view.lines.is_empty() && !view.options.is_empty() {
        writeln!(out, "{}", frame("║"))?;
    }
    for option in &view.options {
        let marker = match option.done {
            Some(true) => "[✓] ",
            Some(false) => "[ ] ",
            None => "",
        };
        writeln!(
            out,
            "{} {} {marker}{}",
            frame("║"),
            painter.paint(&format!("{}.", option.key), Some(Color::Yellow)),
            option.label
        )?;
    }
    writeln!(out, "{}", frame(&format!("╚{}╝", "═".repeat(view.title.chars().count() + 6))))
}

fn write_notices<W: Write>(out: &mut W, notices: &[Notice], painter: &Painter) -> io::Result<()> {
    for notice in notices {
        for line in text::notice_lines(notice) {
            writeln!(out, "{}", painter.line(&line))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::catalog::ContentCatalog;
    use crate::config::Config;
    use crate::runner::SimulatedRunner;
    use crate::store::schema::UserProgress;

    fn session(script: &str) -> (App, String) {
        let catalog = ContentCatalog::bundled().unwrap();
        let progress = UserProgress::new(catalog.first_module_id());
        let mut app = App::from_parts(
            Config::default(),
            catalog,
            progress,
            None,
            Box::new(SimulatedRunner),
        );
        let mut out = Vec::new();
        run(&mut app, Cursor::new(script.to_string()), &mut out, false).unwrap();
        (app, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_main_menu_is_printed() {
        let (_, out) = session("0\n");
        assert!(out.contains(text::APP_TITLE));
        assert!(out.contains("╔══ ANA MENÜ ══╗"));
        assert!(out.contains("║ 6. Ayarlar"));
        assert!(out.contains("Seçiminiz (0-6): "));
        assert!(out.trim_end().ends_with(text::FAREWELL));
    }

    #[test]
    fn test_bad_input_is_reported_and_reprompted() {
        let (app, out) = session("abc\n9\n0\n");
        assert!(out.contains("Lütfen sayı girin!"));
        assert!(out.contains("Geçersiz seçim! Tekrar deneyin."));
        assert_eq!(out.matches("Seçiminiz (0-6): ").count(), 3);
        assert!(app.should_quit);
    }

    #[test]
    fn test_end_of_input_interrupts() {
        let (app, out) = session("1\n");
        assert!(app.should_quit);
        assert!(out.contains(text::SHUTTING_DOWN));
        assert!(out.trim_end().ends_with(text::FAREWELL));
    }

    #[test]
    fn test_no_escape_codes_without_color() {
        let (_, out) = session("0\n");
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn test_farewell_text() {
        let plain = farewell(false);
        assert!(plain.contains(text::SHUTTING_DOWN));
        assert!(plain.ends_with(text::FAREWELL));
        assert!(farewell(true).contains('\u{1b}'));
    }
}
