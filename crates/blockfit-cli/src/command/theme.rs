use blockfit_engine::{Preferences, Theme};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ThemeArg {
    /// Theme to switch to (`light` or `dark`); prints the current one when omitted
    theme: Option<Theme>,
}

pub(crate) fn run(arg: &ThemeArg, mut preferences: Preferences) {
    let ThemeArg { theme } = arg;

    if let Some(theme) = theme {
        preferences.save_theme(*theme);
    }
    let theme = preferences.load_theme();
    println!("{theme}: {}", theme.palette().join(" "));
}
