use std::fs;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::ui::view::LineKind;

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub text_muted: String,
    pub code: String,
    pub accent: String,
    pub accent_dim: String,
    pub border: String,
    pub border_focused: String,
    pub header_bg: String,
    pub header_fg: String,
    pub heading: String,
    pub bar_filled: String,
    pub bar_empty: String,
    pub error: String,
    pub warning: String,
    pub success: String,
}

impl Theme {
    /// User themes in `<config_dir>/ekomcode/themes/` shadow bundled ones.
    pub fn load(name: &str) -> Option<Self> {
        Self::load_from(name, &Self::user_dir())
    }

    pub fn load_from(name: &str, user_dir: &Path) -> Option<Self> {
        let filename = format!("{name}.toml");

        let user_theme_path = user_dir.join(&filename);
        if let Ok(content) = fs::read_to_string(&user_theme_path) {
            match toml::from_str::<Theme>(&content) {
                Ok(mut theme) => {
                    // Cycling goes by file name.
                    theme.name = name.to_string();
                    return Some(theme);
                }
                Err(e) => tracing::warn!(
                    path = %user_theme_path.display(),
                    error = %e,
                    "ignoring invalid user theme"
                ),
            }
        }

        let file = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    fn user_dir() -> PathBuf {
        Config::config_dir().join("themes")
    }

    pub fn available_themes() -> Vec<String> {
        Self::available_themes_in(&Self::user_dir())
    }

    /// Bundled theme names plus the `*.toml` files in `user_dir`, sorted.
    pub fn available_themes_in(user_dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect();
        if let Ok(entries) = fs::read_dir(user_dir) {
            names.extend(entries.flatten().filter_map(|entry| {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("toml") {
                    return None;
                }
                path.file_stem()?.to_str().map(str::to_string)
            }));
        }
        names.sort();
        names.dedup();
        names
    }

    /// Name of the theme after `current` in `names`, wrapping around.
    pub fn next_name(current: &str, names: &[String]) -> String {
        let next = names
            .iter()
            .position(|n| n == current)
            .map(|i| (i + 1) % names.len())
            .unwrap_or(0);
        names.get(next).cloned().unwrap_or_else(|| current.to_string())
    }

    pub fn line_color(&self, kind: LineKind) -> Color {
        let colors = &self.colors;
        match kind {
            LineKind::Heading => colors.heading(),
            LineKind::Text => colors.fg(),
            LineKind::Code => colors.code(),
            LineKind::Accent => colors.accent(),
            LineKind::Muted => colors.text_muted(),
            LineKind::Success => colors.success(),
            LineKind::Warning => colors.warning(),
            LineKind::Error => colors.error(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("catppuccin-mocha").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#1e1e2e".to_string(),
            fg: "#cdd6f4".to_string(),
            text_muted: "#6c7086".to_string(),
            code: "#a6e3a1".to_string(),
            accent: "#89b4fa".to_string(),
            accent_dim: "#45475a".to_string(),
            border: "#45475a".to_string(),
            border_focused: "#89b4fa".to_string(),
            header_bg: "#313244".to_string(),
            header_fg: "#cdd6f4".to_string(),
            heading: "#f9e2af".to_string(),
            bar_filled: "#89b4fa".to_string(),
            bar_empty: "#313244".to_string(),
            error: "#f38ba8".to_string(),
            warning: "#f9e2af".to_string(),
            success: "#a6e3a1".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn text_muted(&self) -> Color { Self::parse_color(&self.text_muted) }
    pub fn code(&self) -> Color { Self::parse_color(&self.code) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn accent_dim(&self) -> Color { Self::parse_color(&self.accent_dim) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn border_focused(&self) -> Color { Self::parse_color(&self.border_focused) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn heading(&self) -> Color { Self::parse_color(&self.heading) }
    pub fn bar_filled(&self) -> Color { Self::parse_color(&self.bar_filled) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }
}
