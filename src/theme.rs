use crate::options::RenderOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_THEME_ID: &str = "github";
pub const CUSTOM_THEME_ID: &str = "custom";
pub const TRANSPARENT: &str = "transparent";

/// Number of steps in every color ramp, one per activity level.
pub const RAMP_STEPS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub background: String,
    pub text_color: String,
    /// Index 0 is the empty-day color, index 4 the busiest.
    pub colors: [String; RAMP_STEPS],
}

impl Theme {
    pub fn new(
        id: &str,
        name: &str,
        background: &str,
        text_color: &str,
        colors: [&str; RAMP_STEPS],
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            background: background.to_string(),
            text_color: text_color.to_string(),
            colors: colors.map(|color| color.to_string()),
        }
    }

    pub fn github() -> Self {
        Self::new(
            "github",
            "GitHub Dark",
            TRANSPARENT,
            "#8b949e",
            ["#161b22", "#0e4429", "#006d32", "#26a641", "#39d353"],
        )
    }

    pub fn github_light() -> Self {
        Self::new(
            "github-light",
            "GitHub Light",
            "#ffffff",
            "#57606a",
            ["#ebedf0", "#9be9a8", "#40c463", "#30a14e", "#216e39"],
        )
    }

    pub fn color_for(&self, level: crate::level::Level) -> &str {
        &self.colors[level.index()]
    }
}

fn builtin_themes() -> Vec<Theme> {
    vec![
        Theme::github(),
        Theme::github_light(),
        Theme::new(
            "docker",
            "Docker",
            TRANSPARENT,
            "#0db7ed",
            ["#1a2634", "#1a4971", "#1d6fa5", "#2496ed", "#6db3f2"],
        ),
        // Editor themes
        Theme::new(
            "dracula",
            "Dracula",
            "#282a36",
            "#f8f8f2",
            ["#44475a", "#6272a4", "#bd93f9", "#ff79c6", "#50fa7b"],
        ),
        Theme::new(
            "nord",
            "Nord",
            TRANSPARENT,
            "#d8dee9",
            ["#2e3440", "#3b4252", "#5e81ac", "#81a1c1", "#88c0d0"],
        ),
        Theme::new(
            "monokai",
            "Monokai",
            TRANSPARENT,
            "#f8f8f2",
            ["#272822", "#49483e", "#a6e22e", "#e6db74", "#f92672"],
        ),
        Theme::new(
            "one-dark",
            "One Dark",
            TRANSPARENT,
            "#abb2bf",
            ["#282c34", "#3e4451", "#61afef", "#98c379", "#e5c07b"],
        ),
        Theme::new(
            "tokyo-night",
            "Tokyo Night",
            TRANSPARENT,
            "#a9b1d6",
            ["#1a1b26", "#24283b", "#7aa2f7", "#bb9af7", "#73daca"],
        ),
        Theme::new(
            "catppuccin",
            "Catppuccin",
            TRANSPARENT,
            "#cdd6f4",
            ["#1e1e2e", "#313244", "#89b4fa", "#a6e3a1", "#f5c2e7"],
        ),
        // Color themes
        Theme::new(
            "ocean",
            "Ocean",
            TRANSPARENT,
            "#6b8fa3",
            ["#1a2332", "#1e4976", "#2171b5", "#4292c6", "#6baed6"],
        ),
        Theme::new(
            "sunset",
            "Sunset",
            TRANSPARENT,
            "#b38867",
            ["#2d1f1f", "#6b3030", "#b54040", "#e06050", "#ff8c66"],
        ),
        Theme::new(
            "forest",
            "Forest",
            TRANSPARENT,
            "#7d9c7d",
            ["#1a2e1a", "#2d4a2d", "#3d6b3d", "#4d8c4d", "#5dac5d"],
        ),
        Theme::new(
            "purple",
            "Purple",
            TRANSPARENT,
            "#9d8abf",
            ["#1a1a2e", "#2d2d5a", "#6b3fa0", "#9d4edd", "#c77dff"],
        ),
        Theme::new(
            "rose",
            "Rose",
            TRANSPARENT,
            "#bf8a9d",
            ["#2e1a24", "#5a2d42", "#a03f6b", "#dd4e9d", "#ff7dc7"],
        ),
        // Grayscale
        Theme::new(
            "minimal",
            "Minimal",
            TRANSPARENT,
            "#666666",
            ["#f0f0f0", "#d4d4d4", "#a8a8a8", "#6b6b6b", "#333333"],
        ),
        Theme::new(
            "minimal-dark",
            "Minimal Dark",
            TRANSPARENT,
            "#999999",
            ["#1a1a1a", "#333333", "#4d4d4d", "#808080", "#b3b3b3"],
        ),
    ]
}

/// Immutable theme lookup table. Built once, then shared by reference.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: BTreeMap<String, Theme>,
    default_id: String,
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ThemeRegistry {
    pub fn builtin() -> Self {
        let themes = builtin_themes()
            .into_iter()
            .map(|theme| (theme.id.clone(), theme))
            .collect();
        Self {
            themes,
            default_id: DEFAULT_THEME_ID.to_string(),
        }
    }

    /// Adds or replaces a theme. `custom` is reserved for per-request colors.
    pub fn with_theme(mut self, mut theme: Theme) -> Self {
        let id = theme.id.trim().to_ascii_lowercase();
        if id.is_empty() || id == CUSTOM_THEME_ID {
            return self;
        }
        theme.id = id.clone();
        self.themes.insert(id, theme);
        self
    }

    /// Changes the fallback theme. Unknown ids leave the current default in place.
    pub fn with_default(mut self, id: &str) -> Self {
        let id = id.trim().to_ascii_lowercase();
        if self.themes.contains_key(&id) {
            self.default_id = id;
        }
        self
    }

    pub fn default_theme(&self) -> &Theme {
        // `default_id` only ever names a registered theme.
        &self.themes[&self.default_id]
    }

    pub fn get(&self, id: &str) -> Option<&Theme> {
        self.themes.get(&id.trim().to_ascii_lowercase())
    }

    pub fn resolve(&self, id: &str) -> &Theme {
        self.get(id).unwrap_or_else(|| self.default_theme())
    }

    pub fn resolve_options(&self, options: &RenderOptions) -> Theme {
        if options.theme == CUSTOM_THEME_ID {
            if let Some(colors) = &options.custom_colors {
                return Theme {
                    id: CUSTOM_THEME_ID.to_string(),
                    name: "Custom".to_string(),
                    background: non_empty(options.bg_color.as_deref())
                        .unwrap_or(TRANSPARENT)
                        .to_string(),
                    text_color: non_empty(options.text_color.as_deref())
                        .unwrap_or(&self.default_theme().text_color)
                        .to_string(),
                    colors: colors.clone(),
                };
            }
        }
        self.resolve(&options.theme).clone()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.themes.keys().map(String::as_str).collect()
    }

    pub fn themes(&self) -> impl Iterator<Item = &Theme> {
        self.themes.values()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}
