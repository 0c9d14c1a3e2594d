use estudio_vis::theme::FileStore;
use estudio_vis::theme::Theme;
use estudio_vis::theme::ThemePreferences;

use crate::cli::PathExt;
use crate::cli::ThemeAction;
use crate::cli::ThemeArgs;
use crate::error::CliError;

pub(crate) fn theme(args: ThemeArgs, system_theme: Option<Theme>) -> Result<(), CliError> {
    let store_path = args.store.or_default_store()?;
    let mut preferences = ThemePreferences::new(FileStore::new(&store_path));

    let theme = match args.action {
        ThemeAction::Show => preferences.current(system_theme)?,
        ThemeAction::Toggle => preferences.toggle(system_theme)?.theme,
        ThemeAction::Set { theme } => preferences.apply(theme.into())?.theme,
    };

    println!("{theme}");

    Ok(())
}
