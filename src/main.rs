use std::fs::{self, OpenOptions};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use ekomcode::app::App;
use ekomcode::config::Config;
use ekomcode::engine::progress::ProgressSummary;
use ekomcode::event::{AppEvent, EventHandler};
use ekomcode::ui;
use ekomcode::ui::components::progress_bar::ProgressBar;
use ekomcode::ui::components::screen_panel::{ScreenPanel, styled_line};
use ekomcode::ui::layout::{AppLayout, pack_hint_lines};
use ekomcode::ui::line_input::InputResult;
use ekomcode::ui::text;
use ekomcode::ui::theme::Theme;
use ekomcode::ui::view::{ScreenView, ViewLine};

const LOG_FILE: &str = "ekomcode.log";

#[derive(Parser)]
#[command(name = "ekomcode", version, about = "Interactive Python course in the terminal")]
struct Cli {
    #[arg(long, help = "Line-based interface instead of the full-screen one")]
    plain: bool,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Directory for the progress file and log")]
    data_dir: Option<PathBuf>,

    #[arg(long, help = "Course content TOML replacing the bundled catalog")]
    content: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir.to_string_lossy().into_owned());
    }
    if let Some(path) = cli.content {
        config.content_path = Some(path.to_string_lossy().into_owned());
    }

    if let Err(e) = init_logging(&config.data_dir()) {
        eprintln!("log file unavailable: {e}");
    }
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "config unreadable, using defaults");
    }
    config.normalize(&Theme::available_themes());

    let plain = cli.plain || !io::stdin().is_terminal() || !io::stdout().is_terminal();
    tracing::info!(plain, runner = %config.example_runner, "starting");

    let mut app = App::new(config)?;

    if plain {
        run_plain(&mut app)
    } else {
        run_tui(&mut app)
    }
}

fn init_logging(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))?;
    let filter = tracing_subscriber::EnvFilter::try_from_env("EKOMCODE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_plain(app: &mut App) -> Result<()> {
    let color = io::stdout().is_terminal();
    // Progress is saved after every change, so the handler only has to say
    // goodbye.
    let handler = ctrlc::set_handler(move || {
        let mut stdout = io::stdout();
        let _ = writeln!(stdout, "{}", ui::plain::farewell(color));
        let _ = stdout.flush();
        std::process::exit(0);
    });
    if let Err(e) = handler {
        tracing::warn!(error = %e, "could not install Ctrl+C handler");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    ui::plain::run(app, stdin.lock(), &mut stdout, color)?;
    Ok(())
}

fn run_tui(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(250));

    let result = run_app(&mut terminal, app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // The last screen disappears with the alternate screen; repeat its
    // notices (the farewell) on the normal one.
    for notice in &app.notices {
        for line in text::notice_lines(notice) {
            println!("{}", line.text);
        }
    }

    if let Err(err) = result {
        tracing::error!(error = ?err, "terminal loop failed");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        let size = terminal.size()?;
        let scroll_max = body_scroll_max(app, Rect::new(0, 0, size.width, size.height));

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key, scroll_max),
            AppEvent::Paste(text) => app.input.insert_str(&text),
            AppEvent::Tick | AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent, scroll_max: u16) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.interrupt();
        return;
    }

    match key.code {
        KeyCode::Up => app.scroll_up(1),
        KeyCode::Down => app.scroll_down(1, scroll_max),
        KeyCode::PageUp => app.scroll_up(10),
        KeyCode::PageDown => app.scroll_down(10, scroll_max),
        _ => match app.input.handle(key) {
            InputResult::Submit => app.submit_input(),
            InputResult::Cancel => app.input.clear(),
            InputResult::Continue => {}
        },
    }
}

fn notice_lines(app: &App) -> Vec<ViewLine> {
    app.notices.iter().flat_map(text::notice_lines).collect()
}

fn body_scroll_max(app: &App, area: Rect) -> u16 {
    let view = app.view();
    let layout = AppLayout::new(area, view.progress.is_some(), notice_lines(app).len() as u16);
    let inner_width = layout.body.width.saturating_sub(2);
    let inner_height = layout.body.height.saturating_sub(2) as usize;
    let needed = ScreenPanel::content_height(&view, inner_width);
    needed.saturating_sub(inner_height).min(u16::MAX as usize) as u16
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let view = app.view();
    let notices = notice_lines(app);
    let layout = AppLayout::new(area, view.progress.is_some(), notices.len() as u16);

    render_header(frame, app, layout.header);

    if let (Some(rect), Some(ratio)) = (layout.progress, view.progress) {
        frame.render_widget(ProgressBar::new("İlerleme", ratio, &app.theme), rect);
    }

    frame.render_widget(ScreenPanel::new(&view, &app.theme, app.scroll), layout.body);

    if let Some(rect) = layout.notices {
        let lines: Vec<Line> = notices.iter().map(|l| styled_line(l, &app.theme)).collect();
        let panel = Paragraph::new(lines)
            .block(Block::bordered().border_style(Style::default().fg(colors.border())))
            .wrap(Wrap { trim: false });
        frame.render_widget(panel, rect);
    }

    render_input(frame, app, &view, layout.input);

    let hints = ["[Enter] Gönder", "[Esc] Temizle", "[↑↓ PgUp PgDn] Kaydır", "[Ctrl+C] Çıkış"];
    let footer_text = pack_hint_lines(&hints, layout.footer.width as usize)
        .into_iter()
        .next()
        .unwrap_or_default();
    let footer = Paragraph::new(Line::from(Span::styled(
        footer_text,
        Style::default().fg(colors.text_muted()),
    )));
    frame.render_widget(footer, layout.footer);
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let summary = ProgressSummary::new(&app.progress, &app.catalog);
    let info = format!(
        " {} | Puan {} | {}/{} ders",
        text::APP_SUBTITLE,
        summary.score,
        summary.completed,
        summary.total
    );
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " ekomcode ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info,
            Style::default().fg(colors.text_muted()).bg(colors.header_bg()),
        ),
    ]))
    .block(Block::bordered().border_style(Style::default().fg(colors.border())))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_input(frame: &mut ratatui::Frame, app: &App, view: &ScreenView, area: Rect) {
    let colors = &app.theme.colors;
    let (before, cursor, after) = app.input.render_parts();
    let cursor_style = Style::default()
        .fg(colors.bg())
        .bg(colors.accent());

    let line = Line::from(vec![
        Span::styled(before, Style::default().fg(colors.fg())),
        Span::styled(cursor.map_or(" ".to_string(), String::from), cursor_style),
        Span::styled(after, Style::default().fg(colors.fg())),
    ]);
    let block = Block::bordered()
        .title(format!(" {} ", view.prompt.trim_end()))
        .border_style(Style::default().fg(colors.border_focused()));
    frame.render_widget(Paragraph::new(line).block(block), area);
}
