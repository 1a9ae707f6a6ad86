use serde::{Deserialize, Serialize};

/// Top-level shape of a catalog TOML file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default)]
    pub gallery: Vec<GalleryEntry>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Module {
    pub id: String,
    pub title: String,
    /// Shorter name for the main menu. Falls back to `title`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_label: Option<String>,
    #[serde(default)]
    pub lessons: Vec<LessonEntry>,
}

impl Module {
    pub fn menu_label(&self) -> &str {
        self.menu_label.as_deref().unwrap_or(&self.title)
    }

    pub fn lesson(&self, lesson_id: &str) -> Option<&LessonEntry> {
        self.lessons.iter().find(|l| l.id == lesson_id)
    }
}

/// A lesson as listed in its module. `theory` and `example` may be absent
/// for lessons that are announced but not written yet.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LessonEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub theory: Option<Vec<String>>,
    #[serde(default)]
    pub example: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GalleryEntry {
    pub title: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Exercise {
    pub title: String,
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default)]
    pub solution: Option<String>,
    #[serde(default)]
    pub demo: Option<ExerciseDemo>,
}

impl Exercise {
    pub fn is_available(&self) -> bool {
        self.task.is_some()
    }
}

/// Live sample output shown next to an exercise solution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExerciseDemo {
    Password { length: usize, count: usize },
}
