pub mod schema;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rust_embed::Embed;
use thiserror::Error;

pub use schema::{CatalogFile, Exercise, ExerciseDemo, GalleryEntry, LessonEntry, Module};

#[derive(Embed)]
#[folder = "assets/content/"]
struct ContentAssets;

const BUNDLED_CATALOG: &str = "catalog.toml";

pub const THEORY_PLACEHOLDER: &str = "İçerik hazırlanıyor...";
pub const EXAMPLE_PLACEHOLDER: &str = "# Kod örneği hazırlanıyor...";
pub const GALLERY_PLACEHOLDER: &str = "# Örnek hazırlanıyor...";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown module `{0}`")]
    ModuleNotFound(String),
    #[error("unknown lesson `{lesson}` in module `{module}`")]
    LessonNotFound { module: String, lesson: String },
    #[error("could not read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("catalog is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid catalog: {0}")]
    Invalid(String),
}

/// Fully resolved lesson, with placeholders filled in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub theory: Vec<String>,
    pub example: String,
    /// True when theory or example fell back to a placeholder.
    pub placeholder: bool,
}

/// Read-only course content: modules of lessons, the code gallery and the
/// exercise list. Built once at startup.
#[derive(Clone, Debug)]
pub struct ContentCatalog {
    modules: Vec<Module>,
    gallery: Vec<GalleryEntry>,
    exercises: Vec<Exercise>,
}

impl ContentCatalog {
    /// The catalog compiled into the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        let file = ContentAssets::get(BUNDLED_CATALOG)
            .ok_or_else(|| CatalogError::Invalid(format!("missing bundled {BUNDLED_CATALOG}")))?;
        let content = std::str::from_utf8(file.data.as_ref())
            .map_err(|e| CatalogError::Invalid(format!("bundled catalog is not UTF-8: {e}")))?;
        Self::from_toml_str(content)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;
        let catalog = Self {
            modules: file.modules,
            gallery: file.gallery,
            exercises: file.exercises,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load the user's catalog if one is configured, otherwise the bundled
    /// one. A broken override falls back to the bundled catalog and the
    /// error is handed back as a warning.
    pub fn load(override_path: Option<&Path>) -> Result<(Self, Option<CatalogError>), CatalogError> {
        if let Some(path) = override_path {
            match Self::from_path(path) {
                Ok(catalog) => {
                    tracing::info!(path = %path.display(), "loaded content catalog override");
                    return Ok((catalog, None));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "content override rejected, using bundled catalog");
                    return Ok((Self::bundled()?, Some(e)));
                }
            }
        }
        Ok((Self::bundled()?, None))
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.modules.is_empty() {
            return Err(CatalogError::Invalid("no modules".to_string()));
        }
        let mut module_ids = HashSet::new();
        let mut lesson_ids = HashSet::new();
        for module in &self.modules {
            if !module_ids.insert(module.id.as_str()) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate module id `{}`",
                    module.id
                )));
            }
            if module.lessons.is_empty() {
                return Err(CatalogError::Invalid(format!(
                    "module `{}` has no lessons",
                    module.id
                )));
            }
            for lesson in &module.lessons {
                // Progress stores bare lesson ids, so they must be unique
                // across the whole catalog.
                if !lesson_ids.insert(lesson.id.as_str()) {
                    return Err(CatalogError::Invalid(format!(
                        "duplicate lesson id `{}`",
                        lesson.id
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn first_module_id(&self) -> &str {
        // validate() guarantees at least one module
        self.modules.first().map(|m| m.id.as_str()).unwrap_or_default()
    }

    pub fn module(&self, module_id: &str) -> Result<&Module, CatalogError> {
        self.modules
            .iter()
            .find(|m| m.id == module_id)
            .ok_or_else(|| CatalogError::ModuleNotFound(module_id.to_string()))
    }

    /// Ordered `(lesson_id, title)` pairs of a module.
    pub fn lessons_of(&self, module_id: &str) -> Result<Vec<(&str, &str)>, CatalogError> {
        let module = self.module(module_id)?;
        Ok(module
            .lessons
            .iter()
            .map(|l| (l.id.as_str(), l.title.as_str()))
            .collect())
    }

    pub fn lesson_detail(&self, module_id: &str, lesson_id: &str) -> Result<Lesson, CatalogError> {
        let module = self.module(module_id)?;
        let entry = module
            .lesson(lesson_id)
            .ok_or_else(|| CatalogError::LessonNotFound {
                module: module_id.to_string(),
                lesson: lesson_id.to_string(),
            })?;

        let placeholder = entry.theory.is_none() || entry.example.is_none();
        Ok(Lesson {
            id: entry.id.clone(),
            title: entry.title.clone(),
            theory: entry
                .theory
                .clone()
                .unwrap_or_else(|| vec![THEORY_PLACEHOLDER.to_string()]),
            example: entry
                .example
                .clone()
                .unwrap_or_else(|| EXAMPLE_PLACEHOLDER.to_string()),
            placeholder,
        })
    }

    pub fn total_lessons(&self) -> usize {
        self.modules.iter().map(|m| m.lessons.len()).sum()
    }

    pub fn contains_lesson(&self, lesson_id: &str) -> bool {
        self.modules
            .iter()
            .any(|m| m.lessons.iter().any(|l| l.id == lesson_id))
    }

    pub fn gallery(&self) -> &[GalleryEntry] {
        &self.gallery
    }

    pub fn gallery_code(&self, index: usize) -> Option<&str> {
        self.gallery
            .get(index)
            .map(|entry| entry.code.as_deref().unwrap_or(GALLERY_PLACEHOLDER))
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }
}
