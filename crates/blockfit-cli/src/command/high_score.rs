use blockfit_engine::Preferences;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct HighScoreArg {
    /// Set the stored high score back to zero
    #[arg(long)]
    reset: bool,
}

pub(crate) fn run(arg: &HighScoreArg, mut preferences: Preferences) {
    let HighScoreArg { reset } = arg;

    if *reset {
        preferences.save_high_score(0);
        eprintln!("High score reset");
    }
    println!("{}", preferences.load_high_score());
}
