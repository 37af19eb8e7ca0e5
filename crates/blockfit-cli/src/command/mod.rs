use std::path::PathBuf;

use blockfit_engine::{JsonFileStore, Preferences};
use clap::{Parser, Subcommand};
use log::LevelFilter;

use crate::util;

use self::{auto_play::AutoPlayArg, high_score::HighScoreArg, theme::ThemeArg};

pub(crate) mod auto_play;
mod high_score;
mod theme;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Preference file holding the high score and theme
    /// [default: <data dir>/blockfit/preferences.json]
    #[arg(long, global = true)]
    store: Option<PathBuf>,
    /// Write engine logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    /// Minimum level of logged records
    #[arg(long, global = true, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

impl CommandArgs {
    fn preferences(&self) -> anyhow::Result<Preferences> {
        let path = match &self.store {
            Some(path) => path.clone(),
            None => util::default_store_path()?,
        };
        log::debug!("using preference file {}", path.display());
        Ok(Preferences::new(JsonFileStore::new(path)))
    }
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play games without a player, using a fixed placement policy
    AutoPlay(#[clap(flatten)] AutoPlayArg),
    /// Show or reset the stored high score
    HighScore(#[clap(flatten)] HighScoreArg),
    /// Show or change the color theme
    Theme(#[clap(flatten)] ThemeArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    if let Some(log_file) = &args.log_file {
        util::init_log(args.log_level, log_file)?;
    }
    let preferences = args.preferences()?;
    match &args.mode {
        Mode::AutoPlay(arg) => auto_play::run(arg, preferences)?,
        Mode::HighScore(arg) => high_score::run(arg, preferences),
        Mode::Theme(arg) => theme::run(arg, preferences),
    }
    Ok(())
}
