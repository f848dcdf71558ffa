use std::{path::PathBuf, process::ExitCode};

use caret::Seconds;
use clap::{Parser, Subcommand};

mod app;
mod config;
mod logging;
mod page;
mod store;
mod utils;

use app::App;
use config::{Config, TestMode};
use store::{FileResultStore, personal_bests, summary};

/// A typing-speed test for your terminal
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Directory holding settings.toml and the word lists
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Test mode to start with
    #[arg(short, long)]
    mode: Option<TestMode>,

    /// Seconds of a time-mode test
    #[arg(short, long)]
    time: Option<Seconds>,

    /// Words of a words-mode test
    #[arg(short, long)]
    words: Option<usize>,

    /// Profile to save results under
    #[arg(short, long)]
    user: Option<String>,

    /// Word list to type from
    #[arg(short, long)]
    source: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print personal bests and recent results
    History,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        let settings = &mut config.settings;

        if let Some(mode) = self.mode {
            settings.test.mode = mode;
        }
        if let Some(time) = self.time {
            settings.test.mode = TestMode::Time;
            settings.test.time = time;
        }
        if let Some(words) = self.words {
            settings.test.mode = TestMode::Words;
            settings.test.words = words;
        }
        if let Some(user) = &self.user {
            settings.user = Some(user.clone());
        }
        if let Some(source) = &self.source {
            settings.word_list = Some(source.clone());
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match Config::get(cli.config.clone()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };
    cli.apply(&mut config);

    let _guard = logging::init(&config.log_dir);
    tracing::info!(config_dir = %config.config_dir.display(), "starting");

    let result = match cli.command {
        Some(Command::History) => print_history(&config),
        None => App::new(config).run().map_err(Into::into),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "exiting with error");
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn print_history(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let Some(user) = config.settings.identity() else {
        println!("No user set. Pass `--user <name>` or set `user` in settings.toml");
        return Ok(());
    };

    let results = FileResultStore::new(&config.results_dir).load(&user)?;
    if results.is_empty() {
        println!("No saved results for {user}");
        return Ok(());
    }

    if let Some(summary) = summary(&results) {
        println!("Overview for {user}");
        println!("{summary}");
        println!();
    }

    println!("Personal bests for {user}");
    for best in personal_bests(&results).values() {
        println!("  {best}");
    }

    println!();
    println!("Recent results");
    for result in results.iter().take(config.settings.results.history_limit) {
        println!("  {result}");
    }

    Ok(())
}
