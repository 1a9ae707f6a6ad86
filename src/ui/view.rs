//! Front-end independent description of what a screen shows. Both the
//! full-screen UI and the plain line UI render a [`ScreenView`].

use crate::catalog::{ContentCatalog, GALLERY_PLACEHOLDER};
use crate::engine::progress::ProgressSummary;
use crate::navigator::{MainEntry, Screen, main_entries};
use crate::store::schema::UserProgress;
use crate::ui::text;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Heading,
    Text,
    Code,
    Accent,
    Muted,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewLine {
    pub kind: LineKind,
    pub text: String,
}

impl ViewLine {
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn blank() -> Self {
        Self::new(LineKind::Text, "")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuOption {
    pub key: String,
    pub label: String,
    /// Completion marker for lesson lists; `None` for plain menu entries.
    pub done: Option<bool>,
}

impl MenuOption {
    fn new(key: impl ToString, label: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            label: label.into(),
            done: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScreenView {
    pub title: String,
    pub lines: Vec<ViewLine>,
    pub options: Vec<MenuOption>,
    pub prompt: String,
    /// Overall completion ratio, shown as a bar on the main menu.
    pub progress: Option<f64>,
}

impl ScreenView {
    fn titled(title: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
            options: Vec::new(),
            prompt: prompt.into(),
            progress: None,
        }
    }

    fn line(&mut self, kind: LineKind, text: impl Into<String>) {
        self.lines.push(ViewLine::new(kind, text));
    }

    fn code(&mut self, code: &str) {
        self.lines
            .extend(code.lines().map(|l| ViewLine::new(LineKind::Code, l)));
    }
}

pub struct ViewContext<'a> {
    pub catalog: &'a ContentCatalog,
    pub progress: &'a UserProgress,
    pub return_to_module_list: bool,
}

pub fn build(screen: &Screen, ctx: &ViewContext<'_>) -> ScreenView {
    let catalog = ctx.catalog;
    match screen {
        Screen::Main => {
            let summary = ProgressSummary::new(ctx.progress, catalog);
            let entries = main_entries(catalog);
            let mut view = ScreenView::titled(
                text::MAIN_MENU,
                format!("{} (0-{}): ", text::PROMPT_MAIN_CHOICE, entries.len()),
            );
            view.line(LineKind::Heading, text::PROGRESS_STATUS);
            view.lines.extend(text::progress_lines(
                summary.completed,
                summary.total,
                summary.percent(),
                summary.score,
                &summary.start_date,
            ));
            view.progress = Some(summary.ratio());

            for (i, entry) in entries.iter().enumerate() {
                let label = match entry {
                    MainEntry::Module(m) => catalog.modules()[*m].menu_label(),
                    MainEntry::Gallery => text::GALLERY_ENTRY,
                    MainEntry::Exercises => text::EXERCISES_ENTRY,
                    MainEntry::Settings => text::SETTINGS_ENTRY,
                };
                view.options.push(MenuOption::new(i + 1, label));
            }
            view.options.push(MenuOption::new(0, text::QUIT_ENTRY));
            view
        }

        Screen::ModuleList { module_id } => {
            let Ok(module) = catalog.module(module_id) else {
                return ScreenView::titled(module_id.as_str(), text::PROMPT_CONTINUE);
            };
            let mut view = ScreenView::titled(
                module.title.as_str(),
                text::range_prompt(text::PROMPT_LESSON_CHOICE, module.lessons.len()),
            );
            for (i, lesson) in module.lessons.iter().enumerate() {
                view.options.push(MenuOption {
                    key: (i + 1).to_string(),
                    label: lesson.title.clone(),
                    done: Some(ctx.progress.is_completed(&lesson.id)),
                });
            }
            view.options.push(MenuOption::new(0, text::BACK_TO_MAIN));
            view
        }

        Screen::LessonDetail {
            module_id,
            lesson_id,
        } => {
            let done = ctx.progress.is_completed(lesson_id);
            let prompt = if done {
                back_prompt(ctx)
            } else {
                text::PROMPT_RUN
            };
            let Ok(lesson) = catalog.lesson_detail(module_id, lesson_id) else {
                return ScreenView::titled(lesson_id.as_str(), prompt);
            };
            let mut view = ScreenView::titled(lesson.title.as_str(), prompt);
            for line in &lesson.theory {
                view.line(LineKind::Text, line.as_str());
            }
            view.lines.push(ViewLine::blank());
            view.line(LineKind::Heading, text::EXAMPLE_CODE);
            view.code(&lesson.example);
            if done {
                view.lines.push(ViewLine::blank());
                view.line(LineKind::Success, text::ALREADY_DONE);
            }
            view
        }

        Screen::LessonFinished {
            module_id,
            lesson_id,
        } => {
            let title = catalog
                .lesson_detail(module_id, lesson_id)
                .map(|l| l.title)
                .unwrap_or_else(|_| lesson_id.clone());
            ScreenView::titled(title, back_prompt(ctx))
        }

        Screen::Settings => {
            let mut view = ScreenView::titled(text::SETTINGS_MENU, format!("{}: ", text::PROMPT_MAIN_CHOICE));
            view.options = vec![
                MenuOption::new(1, text::STATS_ENTRY),
                MenuOption::new(2, text::RESET_ENTRY),
                MenuOption::new(3, text::THEME_ENTRY),
                MenuOption::new(0, text::BACK_TO_MAIN),
            ];
            view
        }

        Screen::Statistics => {
            let summary = ProgressSummary::new(ctx.progress, catalog);
            let mut view = ScreenView::titled(text::STATISTICS, text::PROMPT_CONTINUE);
            view.line(LineKind::Success, format!("Toplam Ders: {}", summary.total));
            view.line(LineKind::Accent, format!("Tamamlanan: {}", summary.completed));
            view.line(
                LineKind::Warning,
                format!("Tamamlanma Oranı: {:.1}%", summary.percent()),
            );
            view.line(LineKind::Text, format!("Toplam Puan: {}", summary.score));
            view.line(LineKind::Muted, format!("Başlangıç Tarihi: {}", summary.start_date));
            view.lines.push(ViewLine::blank());
            view.line(LineKind::Heading, text::MODULE_PROGRESS);
            for module in &summary.modules {
                view.line(
                    LineKind::Text,
                    format!("  {}: {}/{}", module.title, module.completed, module.total),
                );
            }
            view
        }

        Screen::ResetConfirm => {
            let mut view = ScreenView::titled(text::RESET_TITLE, text::PROMPT_CONFIRM);
            view.line(LineKind::Error, text::RESET_WARNING);
            view
        }

        Screen::Exercises => {
            let exercises = catalog.exercises();
            let mut view = ScreenView::titled(
                text::EXERCISES_MENU,
                text::range_prompt(text::PROMPT_MAIN_CHOICE, exercises.len()),
            );
            for (i, exercise) in exercises.iter().enumerate() {
                view.options.push(MenuOption::new(i + 1, exercise.title.as_str()));
            }
            view.options.push(MenuOption::new(0, text::BACK_TO_MAIN));
            view
        }

        Screen::ExerciseDetail { index } => {
            let Some(exercise) = catalog.exercises().get(*index) else {
                return ScreenView::titled(text::EXERCISES_MENU, text::PROMPT_CONTINUE);
            };
            let mut view = ScreenView::titled(
                format!("{} ALIŞTIRMASI", exercise.title.to_uppercase()),
                text::PROMPT_SHOW_SOLUTION,
            );
            if let Some(task) = &exercise.task {
                view.line(LineKind::Warning, format!("Görev: {task}"));
            }
            if let Some(hint) = &exercise.hint {
                view.line(LineKind::Success, format!("İpucu: {hint}"));
            }
            view
        }

        Screen::ExerciseSolution { index, samples } => {
            let Some(exercise) = catalog.exercises().get(*index) else {
                return ScreenView::titled(text::EXERCISES_MENU, text::PROMPT_CONTINUE);
            };
            let mut view = ScreenView::titled(exercise.title.as_str(), text::PROMPT_CONTINUE);
            view.line(LineKind::Heading, text::SOLUTION);
            if let Some(solution) = &exercise.solution {
                view.code(solution);
            }
            if !samples.is_empty() {
                view.lines.push(ViewLine::blank());
                view.line(LineKind::Heading, text::SAMPLE_OUTPUT);
                for (i, sample) in samples.iter().enumerate() {
                    view.line(LineKind::Accent, format!("{}. {sample}", i + 1));
                }
            }
            view
        }

        Screen::CodeGallery => {
            let gallery = catalog.gallery();
            let mut view = ScreenView::titled(
                text::GALLERY_MENU,
                text::range_prompt(text::PROMPT_MAIN_CHOICE, gallery.len()),
            );
            for (i, entry) in gallery.iter().enumerate() {
                view.options.push(MenuOption::new(i + 1, entry.title.as_str()));
            }
            view.options.push(MenuOption::new(0, text::BACK_TO_MAIN));
            view
        }

        Screen::GalleryEntry { index } => {
            let title = catalog
                .gallery()
                .get(*index)
                .map(|e| e.title.clone())
                .unwrap_or_else(|| text::GALLERY_MENU.to_string());
            let mut view = ScreenView::titled(title, text::PROMPT_CONTINUE);
            view.code(catalog.gallery_code(*index).unwrap_or(GALLERY_PLACEHOLDER));
            view
        }

        Screen::Exit => ScreenView::titled("", ""),
    }
}

fn back_prompt(ctx: &ViewContext<'_>) -> &'static str {
    if ctx.return_to_module_list {
        text::PROMPT_BACK_TO_MODULE
    } else {
        text::PROMPT_BACK_TO_MAIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::progress::mark_complete;

    fn fixture() -> (ContentCatalog, UserProgress) {
        let catalog = ContentCatalog::bundled().unwrap();
        let progress = UserProgress::new(catalog.first_module_id());
        (catalog, progress)
    }

    fn view_of(screen: &Screen, catalog: &ContentCatalog, progress: &UserProgress) -> ScreenView {
        build(
            screen,
            &ViewContext {
                catalog,
                progress,
                return_to_module_list: false,
            },
        )
    }

    #[test]
    fn test_main_menu_lists_modules_then_fixed_entries() {
        let (catalog, progress) = fixture();
        let view = view_of(&Screen::Main, &catalog, &progress);

        let labels: Vec<&str> = view.options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Python Temelleri",
                "Otomasyon Eğitimi",
                "Örnek Projeler",
                "Kod Örneklerini İncele",
                "Alıştırma Yap",
                "Ayarlar",
                "Çıkış",
            ]
        );
        assert_eq!(view.options.last().unwrap().key, "0");
        assert_eq!(view.prompt, "Seçiminiz (0-6): ");
    }

    #[test]
    fn test_module_screen_uses_full_title() {
        let (catalog, progress) = fixture();
        let screen = Screen::ModuleList {
            module_id: "otomasyon_egitim".to_string(),
        };
        assert_eq!(view_of(&screen, &catalog, &progress).title, "Otomasyon Projeleri");
    }

    #[test]
    fn test_main_menu_progress_block() {
        let (catalog, mut progress) = fixture();
        mark_complete(&mut progress, "degiskenler");
        mark_complete(&mut progress, "operatorler");

        let view = view_of(&Screen::Main, &catalog, &progress);
        let texts: Vec<&str> = view.lines.iter().map(|l| l.text.as_str()).collect();

        assert!(texts.contains(&"Tamamlanan Dersler: 2/15"));
        assert!(texts.contains(&"İlerleme: 13.3%"));
        assert!(texts.contains(&"Puan: 20"));
        let ratio = view.progress.unwrap();
        assert!((ratio - 2.0 / 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_module_list_marks_completed_lessons() {
        let (catalog, mut progress) = fixture();
        mark_complete(&mut progress, "operatorler");
        let screen = Screen::ModuleList {
            module_id: "python_temelleri".to_string(),
        };
        let view = view_of(&screen, &catalog, &progress);

        assert_eq!(view.options.len(), 6);
        assert_eq!(view.options[0].done, Some(false));
        assert_eq!(view.options[1].done, Some(true));
        assert_eq!(view.options[5].done, None);
        assert_eq!(view.prompt, "Ders seçin (1-5, 0=geri): ");
    }

    #[test]
    fn test_lesson_detail_prompts_only_when_open() {
        let (catalog, mut progress) = fixture();
        let screen = Screen::LessonDetail {
            module_id: "python_temelleri".to_string(),
            lesson_id: "degiskenler".to_string(),
        };

        let view = view_of(&screen, &catalog, &progress);
        assert_eq!(view.title, "Değişkenler ve Veri Tipleri");
        assert_eq!(view.prompt, text::PROMPT_RUN);
        assert!(view.lines.iter().any(|l| l.kind == LineKind::Code));

        mark_complete(&mut progress, "degiskenler");
        let view = view_of(&screen, &catalog, &progress);
        assert_eq!(view.prompt, text::PROMPT_BACK_TO_MAIN);
        assert!(view.lines.iter().any(|l| l.text == text::ALREADY_DONE));
    }

    #[test]
    fn test_placeholder_lesson_view() {
        let (catalog, progress) = fixture();
        let screen = Screen::LessonDetail {
            module_id: "otomasyon_egitim".to_string(),
            lesson_id: "web_otomasyon".to_string(),
        };
        let view = view_of(&screen, &catalog, &progress);
        assert!(view.lines.iter().any(|l| l.text == "İçerik hazırlanıyor..."));
        assert!(
            view.lines
                .iter()
                .any(|l| l.kind == LineKind::Code && l.text == "# Kod örneği hazırlanıyor...")
        );
    }

    #[test]
    fn test_back_prompt_follows_setting() {
        let (catalog, progress) = fixture();
        let screen = Screen::LessonFinished {
            module_id: "python_temelleri".to_string(),
            lesson_id: "donguler".to_string(),
        };
        let view = build(
            &screen,
            &ViewContext {
                catalog: &catalog,
                progress: &progress,
                return_to_module_list: true,
            },
        );
        assert_eq!(view.prompt, text::PROMPT_BACK_TO_MODULE);
    }

    #[test]
    fn test_statistics_lists_every_module() {
        let (catalog, mut progress) = fixture();
        mark_complete(&mut progress, "dosya_okuma");
        let view = view_of(&Screen::Statistics, &catalog, &progress);
        let texts: Vec<&str> = view.lines.iter().map(|l| l.text.as_str()).collect();

        assert!(texts.contains(&"Toplam Ders: 15"));
        assert!(texts.contains(&"  Otomasyon Projeleri: 1/5"));
        assert!(texts.contains(&"  Örnek Projeler: 0/5"));
    }

    #[test]
    fn test_gallery_placeholder_entry() {
        let (catalog, progress) = fixture();
        let view = view_of(&Screen::GalleryEntry { index: 4 }, &catalog, &progress);
        assert_eq!(view.lines, vec![ViewLine::new(LineKind::Code, GALLERY_PLACEHOLDER)]);
    }

    #[test]
    fn test_solution_shows_samples() {
        let (catalog, progress) = fixture();
        let screen = Screen::ExerciseSolution {
            index: 1,
            samples: vec!["aB3$xYz9!q".to_string()],
        };
        let view = view_of(&screen, &catalog, &progress);
        assert!(view.lines.iter().any(|l| l.text == "1. aB3$xYz9!q"));
    }
}
