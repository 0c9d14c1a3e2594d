//! Light and dark theme handling.
//!
//! [`ThemeResolver`] maps a theme flag to the chart [`Palette`], while
//! [`ThemePreferences`] reads and persists the user's choice through a
//! [`PreferenceStore`].

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;
use std::fs;
use std::io;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

/// The key under which the theme preference is persisted.
pub const THEME_KEY: &str = "estudio-theme";

const DARK_FLAG: &str = "dark";
const LIGHT_FLAG: &str = "light";

/// The page theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// The default, light theme.
    #[default]
    Light,

    /// The dark theme.
    Dark,
}

impl Theme {
    /// Interprets a theme flag. Only `"dark"` selects the dark theme.
    pub fn from_flag(flag: &str) -> Theme {
        if flag == DARK_FLAG {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Returns the flag stored for this theme.
    pub fn as_flag(&self) -> &'static str {
        match self {
            Theme::Light => LIGHT_FLAG,
            Theme::Dark => DARK_FLAG,
        }
    }

    /// Returns the opposite theme.
    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_flag())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            LIGHT_FLAG => Ok(Theme::Light),
            DARK_FLAG => Ok(Theme::Dark),
            other => Err(format!("unknown theme `{other}`, expected `light` or `dark`")),
        }
    }
}

/// The colors a chart uses for its text, grid and tooltips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    /// Color of the tick labels.
    pub text: &'static str,
    /// Color of the grid lines and the tooltip border.
    pub grid: &'static str,
    /// Background color of the tooltip.
    pub tooltip_background: &'static str,
    /// Color of the tooltip title and body.
    pub tooltip_text: &'static str,
}

const LIGHT_PALETTE: Palette = Palette {
    text: "#4a5568",
    grid: "rgba(0,0,0,0.06)",
    tooltip_background: "#ffffff",
    tooltip_text: "#233142",
};

const DARK_PALETTE: Palette = Palette {
    text: "#b8bcc4",
    grid: "rgba(255,255,255,0.08)",
    tooltip_background: "#232833",
    tooltip_text: "#e8eaed",
};

/// Derives chart palettes from theme flags.
pub struct ThemeResolver;

impl ThemeResolver {
    /// Returns the palette of the given theme flag; anything other than
    /// `"dark"` resolves to the light palette.
    pub fn resolve(flag: &str) -> Palette {
        Self::palette(Theme::from_flag(flag))
    }

    /// Returns the palette of the given theme.
    pub fn palette(theme: Theme) -> Palette {
        match theme {
            Theme::Light => LIGHT_PALETTE,
            Theme::Dark => DARK_PALETTE,
        }
    }
}

/// A theme as applied to a page, together with the `theme-color` meta
/// value that depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppliedTheme {
    /// The applied theme.
    pub theme: Theme,
    /// The value of the `theme-color` meta tag.
    pub meta_color: &'static str,
}

impl From<Theme> for AppliedTheme {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light => AppliedTheme {
                theme,
                meta_color: "#8C4F9F",
            },
            Theme::Dark => AppliedTheme {
                theme,
                meta_color: "#1a1d24",
            },
        }
    }
}

/// The error type for reading and writing persisted preferences.
#[derive(Debug)]
pub enum StoreError {
    /// A [std::io::Error] encountered while accessing the store file.
    Io(io::Error),

    /// A [serde_json::Error] encountered while decoding or encoding the
    /// store file.
    Json(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let store_error = "preference store error:";

        match self {
            StoreError::Io(error) => write!(f, "{store_error} I/O error: {error}"),
            StoreError::Json(error) => write!(f, "{store_error} invalid JSON: {error}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StoreError::Io(error) => Some(error),
            StoreError::Json(error) => Some(error),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(error: io::Error) -> Self {
        StoreError::Io(error)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        StoreError::Json(error)
    }
}

/// Durable key-value storage for user preferences.
pub trait PreferenceStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// A [PreferenceStore] kept in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> MemoryStore {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// A [PreferenceStore] persisted as a JSON object in a file.
///
/// A missing file reads as an empty store; the file and its parent
/// directory are created on the first write.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by the file at `path`.
    pub fn new(path: &Path) -> FileStore {
        Self {
            path: path.to_path_buf(),
        }
    }

    fn read(&self) -> Result<HashMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(HashMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(error) => Err(error.into()),
        }
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut values = self.read()?;
        Ok(values.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.read()?;
        values.insert(key.to_owned(), value.to_owned());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&values)?;
        fs::write(&self.path, content)?;

        Ok(())
    }
}

/// The user's theme preference, backed by a [PreferenceStore].
pub struct ThemePreferences<S> {
    store: S,
}

impl<S: PreferenceStore> ThemePreferences<S> {
    /// Creates the preferences on top of `store`.
    pub fn new(store: S) -> ThemePreferences<S> {
        Self { store }
    }

    /// Returns the stored theme, falling back to the system preference
    /// when nothing is stored and to the light theme otherwise.
    pub fn current(&self, system: Option<Theme>) -> Result<Theme, StoreError> {
        if let Some(flag) = self.store.get(THEME_KEY)? {
            return Ok(Theme::from_flag(&flag));
        }

        match system {
            Some(Theme::Dark) => Ok(Theme::Dark),
            _ => Ok(Theme::Light),
        }
    }

    /// Persists `theme` and returns it as applied to a page.
    pub fn apply(&mut self, theme: Theme) -> Result<AppliedTheme, StoreError> {
        self.store.set(THEME_KEY, theme.as_flag())?;
        tracing::debug!("applied the {theme} theme");

        Ok(AppliedTheme::from(theme))
    }

    /// Switches between the light and dark themes and persists the result.
    ///
    /// Only a stored `"light"` switches to dark; any other stored value,
    /// unknown ones included, switches to light.
    pub fn toggle(&mut self, system: Option<Theme>) -> Result<AppliedTheme, StoreError> {
        let next = match self.store.get(THEME_KEY)? {
            Some(flag) if flag == LIGHT_FLAG => Theme::Dark,
            Some(_) => Theme::Light,
            None => self.current(system)?.toggled(),
        };

        self.apply(next)
    }

    /// Returns the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }
}
