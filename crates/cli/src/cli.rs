use std::env;
use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use estudio_vis::refresh::DEFAULT_REFRESH_SECONDS;
use estudio_vis::theme::Theme;

use crate::error::CliError;

const CONFIG_DIR_NAME: &str = "estudio";
const STORE_FILE_NAME: &str = "preferences.json";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Specify the system color scheme. It is used when no theme
    /// preference has been stored yet.
    #[arg(long, global = true, value_enum)]
    pub(crate) system_theme: Option<ThemeArg>,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Render the dashboard page from previously fetched data.
    Render(RenderArgs),
    /// Fetch the dashboard series and store them as JSON.
    Fetch(FetchArgs),
    /// Fetch and render the dashboard, then refresh it periodically.
    Watch(WatchArgs),
    /// Show or change the persisted theme preference.
    Theme(ThemeArgs),
}

#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Specify the JSON file with the dashboard data.
    /// If the file does not exist the page is rendered without charts.
    #[arg(short, long)]
    pub(crate) data: PathBuf,

    /// Specify the path where the dashboard will be created.
    /// If the output path is not specified then the current working
    /// directory is used.
    #[arg(short, long, value_parser(parse_path))]
    pub(crate) output_path: Option<PathBuf>,

    /// Specify the file where the theme preference is stored.
    #[arg(short, long)]
    pub(crate) theme_store: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct FetchArgs {
    /// Specify the file where the dashboard data will be stored.
    #[arg(short, long, default_value = "dashboard.json")]
    pub(crate) output: PathBuf,
}

#[derive(Args)]
pub(crate) struct WatchArgs {
    /// Specify the path where the dashboard will be created.
    /// If the output path is not specified then the current working
    /// directory is used.
    #[arg(short, long, value_parser(parse_path))]
    pub(crate) output_path: Option<PathBuf>,

    /// Specify the number of seconds between two refreshes.
    #[arg(short, long, default_value_t = DEFAULT_REFRESH_SECONDS)]
    pub(crate) seconds: u32,

    /// Specify the file where the theme preference is stored.
    #[arg(short, long)]
    pub(crate) theme_store: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct ThemeArgs {
    /// Specify the file where the theme preference is stored.
    #[arg(short, long, global = true)]
    pub(crate) store: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) action: ThemeAction,
}

#[derive(Subcommand)]
pub(crate) enum ThemeAction {
    /// Print the current theme.
    Show,
    /// Switch between the light and dark themes.
    Toggle,
    /// Set the theme.
    Set {
        #[arg(value_enum)]
        theme: ThemeArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(theme: ThemeArg) -> Self {
        match theme {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

fn parse_path(path: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path);

    if !path.exists() {
        return Err(format!("The `{}` path does not exist.", path.display()));
    }

    if !path.is_dir() {
        return Err(format!(
            "The `{}` path must point to a directory.",
            path.display()
        ));
    }

    Ok(path)
}

pub(crate) trait PathExt {
    fn or_current_dir(self) -> Result<PathBuf, CliError>;
    fn or_default_store(self) -> Result<PathBuf, CliError>;
}

impl PathExt for Option<PathBuf> {
    fn or_current_dir(self) -> Result<PathBuf, CliError> {
        if let Some(path) = self {
            Ok(path)
        } else {
            env::current_dir().map_err(|e| CliError::Path(e.to_string()))
        }
    }

    fn or_default_store(self) -> Result<PathBuf, CliError> {
        if let Some(path) = self {
            return Ok(path);
        }

        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(STORE_FILE_NAME))
            .ok_or_else(|| {
                CliError::Path(String::from(
                    "Could not determine the configuration directory, use `--store` to specify the preference file.",
                ))
            })
    }
}
