use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::catalog::ContentCatalog;
use crate::config::Config;
use crate::navigator::{Effect, NavContext, Navigator, Notice};
use crate::runner::{self, ExampleRunner};
use crate::store::json_store::JsonStore;
use crate::store::schema::UserProgress;
use crate::ui::line_input::LineInput;
use crate::ui::text;
use crate::ui::theme::Theme;
use crate::ui::view::{self, ScreenView, ViewContext};

/// Session state shared by both front-ends: the navigator, the learner's
/// progress and everything needed to carry out navigator effects.
pub struct App {
    pub navigator: Navigator,
    pub progress: UserProgress,
    pub catalog: ContentCatalog,
    pub store: Option<JsonStore>,
    runner: Box<dyn ExampleRunner>,
    /// Effective config, including one-off command line overrides.
    pub config: Config,
    /// Config file that theme switches are written to.
    config_file: Option<PathBuf>,
    pub theme: Theme,
    /// Messages produced by the last submitted line.
    pub notices: Vec<Notice>,
    pub input: LineInput,
    pub scroll: u16,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let mut notices = Vec::new();

        let (catalog, catalog_warning) = ContentCatalog::load(config.content_path().as_deref())?;
        if let Some(e) = catalog_warning {
            notices.push(Notice::Warning(format!(
                "İçerik dosyası yüklenemedi, yerleşik içerik kullanılıyor: {e}"
            )));
        }

        let store = match JsonStore::with_base_dir(config.data_dir()) {
            Ok(store) => Some(store),
            Err(e) => {
                tracing::warn!(error = %e, "progress will not be saved");
                notices.push(Notice::Warning(format!("İlerleme kaydedilemeyecek: {e}")));
                None
            }
        };

        let mut progress = match &store {
            Some(store) => {
                let loaded = store.load(catalog.first_module_id());
                if let Some(e) = loaded.warning {
                    notices.push(Notice::Warning(format!(
                        "İlerleme dosyası okunamadı, yeni kayıt başlatıldı: {e}"
                    )));
                }
                loaded.progress
            }
            None => UserProgress::new(catalog.first_module_id()),
        };

        let dropped = progress.sanitize(|id| catalog.contains_lesson(id));
        let sanitized = !dropped.is_empty();
        if sanitized {
            tracing::warn!(?dropped, "dropped unknown or duplicate lesson ids");
            notices.push(Notice::Warning(format!(
                "Bilinmeyen dersler kayıttan çıkarıldı: {}",
                dropped.join(", ")
            )));
        }
        if catalog.module(&progress.current_module).is_err() {
            progress.current_module = catalog.first_module_id().to_string();
        }

        let runner = runner::from_config(&config);
        let theme = Theme::load(&config.theme).unwrap_or_default();

        let mut app = Self::from_parts(config, catalog, progress, store, runner);
        app.config_file = Some(Config::config_path());
        app.theme = theme;
        app.notices = notices;
        if sanitized {
            app.save_progress();
        }
        Ok(app)
    }

    /// Assemble an app from already loaded pieces. Config changes made by
    /// such an app stay in memory unless [`App::with_config_file`] is used.
    pub fn from_parts(
        config: Config,
        catalog: ContentCatalog,
        progress: UserProgress,
        store: Option<JsonStore>,
        runner: Box<dyn ExampleRunner>,
    ) -> Self {
        Self {
            navigator: Navigator::new(config.return_to_module_list),
            progress,
            catalog,
            store,
            runner,
            config,
            config_file: None,
            theme: Theme::default(),
            notices: Vec::new(),
            input: LineInput::default(),
            scroll: 0,
            should_quit: false,
        }
    }

    pub fn with_config_file(mut self, path: PathBuf) -> Self {
        self.config_file = Some(path);
        self
    }

    /// Feed one line to the navigator and carry out what it asks for.
    pub fn submit(&mut self, line: &str) {
        let ctx = NavContext {
            catalog: &self.catalog,
            runner: &*self.runner,
        };
        let outcome = self.navigator.handle_input(line, &mut self.progress, &ctx);
        self.notices = outcome.notices;
        self.scroll = 0;

        for effect in outcome.effects {
            match effect {
                Effect::Persist => self.save_progress(),
                Effect::CycleTheme => self.cycle_theme(),
                Effect::Exit => self.should_quit = true,
            }
        }
    }

    /// Submit whatever is in the answer box.
    pub fn submit_input(&mut self) {
        let line = self.input.take();
        self.submit(&line);
    }

    pub fn save_progress(&mut self) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(e) = store.save(&self.progress) {
            tracing::error!(error = %e, "could not save progress");
            self.notices
                .push(Notice::Warning(format!("İlerleme kaydedilemedi: {e}")));
        }
    }

    /// Ctrl+C: save, say goodbye, stop.
    pub fn interrupt(&mut self) {
        tracing::info!("interrupted");
        self.notices.clear();
        self.save_progress();
        self.notices
            .push(Notice::Warning(text::SHUTTING_DOWN.to_string()));
        self.notices.push(Notice::Farewell);
        self.should_quit = true;
    }

    pub fn view(&self) -> ScreenView {
        view::build(
            self.navigator.screen(),
            &ViewContext {
                catalog: &self.catalog,
                progress: &self.progress,
                return_to_module_list: self.config.return_to_module_list,
            },
        )
    }

    pub fn scroll_down(&mut self, rows: u16, max: u16) {
        self.scroll = self.scroll.saturating_add(rows).min(max);
    }

    pub fn scroll_up(&mut self, rows: u16) {
        self.scroll = self.scroll.saturating_sub(rows);
    }

    fn cycle_theme(&mut self) {
        let next = Theme::next_name(&self.theme.name, &Theme::available_themes());
        let Some(theme) = Theme::load(&next) else {
            return;
        };
        self.theme = theme;
        self.config.theme = next.clone();
        if let Some(path) = &self.config_file {
            if let Err(e) = save_theme_choice(path, &next) {
                tracing::warn!(error = %e, "could not save config");
            }
        }
        self.notices
            .push(Notice::Warning(format!("{}: {next}", text::THEME_CHANGED)));
    }
}

/// Change only `theme` in the config file. Command line overrides live in
/// the in-memory config and never reach the file.
fn save_theme_choice(path: &Path, theme: &str) -> Result<()> {
    let mut on_disk = Config::load_from(path)?;
    on_disk.theme = theme.to_string();
    on_disk.save_to(path)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::navigator::Screen;
    use crate::runner::SimulatedRunner;

    fn make_test_app() -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let catalog = ContentCatalog::bundled().unwrap();
        let progress = UserProgress::new(catalog.first_module_id());
        let app = App::from_parts(
            Config::default(),
            catalog,
            progress,
            Some(store),
            Box::new(SimulatedRunner),
        );
        (app, dir)
    }

    fn reload(dir: &TempDir) -> UserProgress {
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        store.load("python_temelleri").progress
    }

    #[test]
    fn test_completion_is_saved_immediately() {
        let (mut app, dir) = make_test_app();
        for line in ["1", "2", "e"] {
            app.submit(line);
        }
        let saved = reload(&dir);
        assert_eq!(saved.completed_lessons, vec!["operatorler"]);
        assert_eq!(saved.score, 10);
    }

    #[test]
    fn test_module_change_is_saved() {
        let (mut app, dir) = make_test_app();
        app.submit("3");
        assert_eq!(reload(&dir).current_module, "ornek_projeler");
    }

    #[test]
    fn test_exit_saves_and_quits() {
        let (mut app, dir) = make_test_app();
        app.submit("0");
        assert!(app.should_quit);
        assert!(app.navigator.is_finished());
        assert!(dir.path().join("user_progress.json").exists());
    }

    #[test]
    fn test_interrupt_saves_and_says_goodbye() {
        let (mut app, dir) = make_test_app();
        app.submit("abc");
        app.interrupt();
        assert!(app.should_quit);
        assert_eq!(app.notices.last(), Some(&Notice::Farewell));
        assert!(!app.notices.iter().any(|n| matches!(n, Notice::Input(_))));
        assert!(dir.path().join("user_progress.json").exists());
    }

    #[test]
    fn test_save_failure_becomes_notice() {
        let (mut app, dir) = make_test_app();
        // A directory where the file should go makes the rename fail.
        std::fs::create_dir(dir.path().join("user_progress.json")).unwrap();
        app.submit("0");
        assert!(
            app.notices
                .iter()
                .any(|n| matches!(n, Notice::Warning(w) if w.starts_with("İlerleme kaydedilemedi")))
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_submit_input_clears_box_and_scroll() {
        let (mut app, _dir) = make_test_app();
        app.input = LineInput::new("6");
        app.scroll = 4;
        app.submit_input();
        assert_eq!(app.navigator.screen(), &Screen::Settings);
        assert_eq!(app.input.value(), "");
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn test_theme_cycle_stays_in_memory() {
        let (mut app, _dir) = make_test_app();
        let before = app.theme.name.clone();
        app.submit("6");
        app.submit("3");
        assert_ne!(app.theme.name, before);
        assert_eq!(app.config.theme, app.theme.name);
    }

    #[test]
    fn test_theme_cycle_keeps_overrides_out_of_config_file() {
        let (app, dir) = make_test_app();
        let config_file = dir.path().join("config").join("config.toml");
        Config {
            example_runner: "subprocess".to_string(),
            ..Config::default()
        }
        .save_to(&config_file)
        .unwrap();

        let mut app = app.with_config_file(config_file.clone());
        app.config.data_dir = Some("/tmp/bir-kerelik".to_string());
        app.config.content_path = Some("/tmp/icerik.toml".to_string());
        app.submit("6");
        app.submit("3");

        let saved = std::fs::read_to_string(&config_file).unwrap();
        assert!(!saved.contains("data_dir"));
        assert!(!saved.contains("content_path"));
        let saved: Config = toml::from_str(&saved).unwrap();
        assert_eq!(saved.theme, app.theme.name);
        assert_eq!(saved.example_runner, "subprocess");
        assert_eq!(app.config.data_dir.as_deref(), Some("/tmp/bir-kerelik"));
    }

    #[test]
    fn test_view_follows_navigator() {
        let (mut app, _dir) = make_test_app();
        assert_eq!(app.view().title, "ANA MENÜ");
        app.submit("5");
        assert_eq!(app.view().title, "ALIŞTIRMALAR");
    }

    #[test]
    fn test_new_drops_unknown_lessons() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("user_progress.json"),
            r#"{"start_date":"2026-01-02 03:04:05","completed_lessons":["degiskenler","silinmis","degiskenler"],"current_module":"yok","score":30}"#,
        )
        .unwrap();
        let config = Config {
            data_dir: Some(dir.path().to_string_lossy().into_owned()),
            ..Config::default()
        };

        let app = App::new(config).unwrap();

        assert_eq!(app.progress.completed_lessons, vec!["degiskenler"]);
        assert_eq!(app.progress.current_module, "python_temelleri");
        assert_eq!(app.progress.score, 30);
        assert!(matches!(app.notices.as_slice(), [Notice::Warning(_)]));
        assert_eq!(reload(&dir).completed_lessons, vec!["degiskenler"]);
    }
}
