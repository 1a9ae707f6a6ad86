//! Menu navigation state machine.
//!
//! The navigator owns only the current [`Screen`]. Everything else (the
//! progress record, the catalog, the example runner) is handed in on each
//! call, and side effects that need the outside world (saving, quitting,
//! switching themes) come back as [`Effect`]s for the caller to carry out.

pub mod input;

pub use input::{NavError, is_affirmative, parse_choice};

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::catalog::{ContentCatalog, ExerciseDemo};
use crate::engine::password;
use crate::engine::progress::{self, LESSON_REWARD};
use crate::runner::{ExampleRunner, ExecutionOutcome};
use crate::store::schema::UserProgress;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Main,
    ModuleList {
        module_id: String,
    },
    /// Shows the lesson; if it is not completed yet the prompt asks whether
    /// to run the example.
    LessonDetail {
        module_id: String,
        lesson_id: String,
    },
    /// Acknowledgement after the run prompt was answered.
    LessonFinished {
        module_id: String,
        lesson_id: String,
    },
    Settings,
    Statistics,
    ResetConfirm,
    Exercises,
    ExerciseDetail {
        index: usize,
    },
    ExerciseSolution {
        index: usize,
        samples: Vec<String>,
    },
    CodeGallery,
    GalleryEntry {
        index: usize,
    },
    Exit,
}

/// One line of the main menu, in display order (numbered from 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MainEntry {
    Module(usize),
    Gallery,
    Exercises,
    Settings,
}

pub fn main_entries(catalog: &ContentCatalog) -> Vec<MainEntry> {
    (0..catalog.modules().len())
        .map(MainEntry::Module)
        .chain([MainEntry::Gallery, MainEntry::Exercises, MainEntry::Settings])
        .collect()
}

/// Number of entries on the settings screen (excluding `0`).
pub const SETTINGS_ENTRIES: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    Persist,
    CycleTheme,
    Exit,
}

/// Short messages shown under the next screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Input(NavError),
    Completed { reward: u32 },
    RunOutput(String),
    RunFault(String),
    Skipped,
    ComingSoon,
    ResetDone,
    ResetCancelled,
    Farewell,
    Warning(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub notices: Vec<Notice>,
    pub effects: Vec<Effect>,
}

impl Outcome {
    pub fn has_effect(&self, effect: Effect) -> bool {
        self.effects.contains(&effect)
    }

    fn notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn effect(&mut self, effect: Effect) {
        if !self.effects.contains(&effect) {
            self.effects.push(effect);
        }
    }
}

pub struct NavContext<'a> {
    pub catalog: &'a ContentCatalog,
    pub runner: &'a dyn ExampleRunner,
}

pub struct Navigator {
    screen: Screen,
    return_to_module_list: bool,
    rng: SmallRng,
}

impl Navigator {
    pub fn new(return_to_module_list: bool) -> Self {
        Self {
            screen: Screen::Main,
            return_to_module_list,
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn is_finished(&self) -> bool {
        self.screen == Screen::Exit
    }

    /// Feed one submitted line to the current screen.
    pub fn handle_input(
        &mut self,
        input: &str,
        progress: &mut UserProgress,
        ctx: &NavContext<'_>,
    ) -> Outcome {
        let mut out = Outcome::default();
        let next = match self.screen.clone() {
            Screen::Main => self.on_main(input, progress, ctx, &mut out),
            Screen::ModuleList { module_id } => self.on_module_list(input, module_id, ctx, &mut out),
            Screen::LessonDetail {
                module_id,
                lesson_id,
            } => self.on_lesson_detail(input, module_id, lesson_id, progress, ctx, &mut out),
            Screen::LessonFinished { module_id, .. } => Some(self.after_lesson(module_id)),
            Screen::Settings => self.on_settings(input, &mut out),
            Screen::Statistics => Some(Screen::Settings),
            Screen::ResetConfirm => {
                if is_affirmative(input) {
                    *progress = progress::reset(ctx.catalog.first_module_id());
                    tracing::info!("progress reset");
                    out.notice(Notice::ResetDone);
                    out.effect(Effect::Persist);
                } else {
                    out.notice(Notice::ResetCancelled);
                }
                Some(Screen::Settings)
            }
            Screen::Exercises => self.on_exercises(input, ctx, &mut out),
            Screen::ExerciseDetail { index } => Some(self.solution_screen(index, ctx)),
            Screen::ExerciseSolution { .. } => Some(Screen::Exercises),
            Screen::CodeGallery => {
                choose(input, ctx.catalog.gallery().len(), &mut out).map(|choice| match choice {
                    0 => Screen::Main,
                    n => Screen::GalleryEntry { index: n - 1 },
                })
            }
            Screen::GalleryEntry { .. } => Some(Screen::CodeGallery),
            Screen::Exit => None,
        };

        if let Some(next) = next {
            tracing::debug!(from = ?self.screen, to = ?next, "screen change");
            self.screen = next;
        }
        out
    }

    fn on_main(
        &mut self,
        input: &str,
        progress: &mut UserProgress,
        ctx: &NavContext<'_>,
        out: &mut Outcome,
    ) -> Option<Screen> {
        let entries = main_entries(ctx.catalog);
        let choice = choose(input, entries.len(), out)?;
        if choice == 0 {
            out.notice(Notice::Farewell);
            out.effect(Effect::Persist);
            out.effect(Effect::Exit);
            return Some(Screen::Exit);
        }

        Some(match entries[choice - 1] {
            MainEntry::Module(i) => {
                let module_id = ctx.catalog.modules()[i].id.clone();
                if progress.current_module != module_id {
                    progress.current_module = module_id.clone();
                    out.effect(Effect::Persist);
                }
                Screen::ModuleList { module_id }
            }
            MainEntry::Gallery => Screen::CodeGallery,
            MainEntry::Exercises => Screen::Exercises,
            MainEntry::Settings => Screen::Settings,
        })
    }

    fn on_module_list(
        &mut self,
        input: &str,
        module_id: String,
        ctx: &NavContext<'_>,
        out: &mut Outcome,
    ) -> Option<Screen> {
        let lessons = match ctx.catalog.lessons_of(&module_id) {
            Ok(lessons) => lessons,
            Err(e) => {
                out.notice(Notice::Warning(e.to_string()));
                return Some(Screen::Main);
            }
        };
        let choice = choose(input, lessons.len(), out)?;
        if choice == 0 {
            return Some(Screen::Main);
        }
        let lesson_id = lessons[choice - 1].0.to_string();
        Some(Screen::LessonDetail {
            module_id,
            lesson_id,
        })
    }

    fn on_lesson_detail(
        &mut self,
        input: &str,
        module_id: String,
        lesson_id: String,
        progress: &mut UserProgress,
        ctx: &NavContext<'_>,
        out: &mut Outcome,
    ) -> Option<Screen> {
        if progress.is_completed(&lesson_id) {
            return Some(self.after_lesson(module_id));
        }
        if !is_affirmative(input) {
            out.notice(Notice::Skipped);
            return Some(Screen::LessonFinished {
                module_id,
                lesson_id,
            });
        }

        let lesson = match ctx.catalog.lesson_detail(&module_id, &lesson_id) {
            Ok(lesson) => lesson,
            Err(e) => {
                out.notice(Notice::Warning(e.to_string()));
                return Some(Screen::Main);
            }
        };

        match ctx.runner.execute(&lesson.example) {
            ExecutionOutcome::Success { output } => {
                if !output.is_empty() {
                    out.notice(Notice::RunOutput(output));
                }
                if progress::mark_complete(progress, &lesson_id) {
                    tracing::info!(lesson = %lesson_id, score = progress.score, "lesson completed");
                    out.notice(Notice::Completed {
                        reward: LESSON_REWARD,
                    });
                    out.effect(Effect::Persist);
                }
            }
            ExecutionOutcome::Fault { message } => {
                tracing::info!(lesson = %lesson_id, %message, "example failed, lesson stays open");
                out.notice(Notice::RunFault(message));
            }
        }

        Some(Screen::LessonFinished {
            module_id,
            lesson_id,
        })
    }

    fn on_settings(&mut self, input: &str, out: &mut Outcome) -> Option<Screen> {
        match choose(input, SETTINGS_ENTRIES, out)? {
            0 => Some(Screen::Main),
            1 => Some(Screen::Statistics),
            2 => Some(Screen::ResetConfirm),
            _ => {
                out.effect(Effect::CycleTheme);
                None
            }
        }
    }

    fn on_exercises(
        &mut self,
        input: &str,
        ctx: &NavContext<'_>,
        out: &mut Outcome,
    ) -> Option<Screen> {
        let exercises = ctx.catalog.exercises();
        let choice = choose(input, exercises.len(), out)?;
        if choice == 0 {
            return Some(Screen::Main);
        }
        if !exercises[choice - 1].is_available() {
            out.notice(Notice::ComingSoon);
            return None;
        }
        Some(Screen::ExerciseDetail { index: choice - 1 })
    }

    fn solution_screen(&mut self, index: usize, ctx: &NavContext<'_>) -> Screen {
        let samples = match ctx.catalog.exercises().get(index).and_then(|e| e.demo.as_ref()) {
            Some(ExerciseDemo::Password { length, count }) => {
                password::samples(&mut self.rng, *length, *count)
            }
            None => Vec::new(),
        };
        Screen::ExerciseSolution { index, samples }
    }

    // The lesson screen returns to the main menu, not the module it was
    // opened from, unless `return_to_module_list` is set.
    fn after_lesson(&self, module_id: String) -> Screen {
        if self.return_to_module_list {
            Screen::ModuleList { module_id }
        } else {
            Screen::Main
        }
    }
}

fn choose(input: &str, max: usize, out: &mut Outcome) -> Option<usize> {
    match parse_choice(input, max) {
        Ok(choice) => Some(choice),
        Err(e) => {
            out.notice(Notice::Input(e));
            None
        }
    }
}
