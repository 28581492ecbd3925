mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};
use weekly_review_core::Settings;

fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the process environment is used as is
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut settings = Settings::from_env();
    if let Some(vault) = cli.command.vault() {
        settings = settings.with_vault(vault);
    }

    logging::init(&settings);

    match cli.command {
        Commands::Run {
            mode,
            dry_run,
            no_notify,
            ..
        } => commands::run::run(
            &settings,
            commands::run::RunOptions {
                mode,
                dry_run,
                notify: !no_notify,
            },
        ),
        Commands::Show {
            previous,
            file,
            json,
            ..
        } => commands::show::run(&settings, previous, file.as_deref(), json),
        Commands::Locate { previous, .. } => commands::locate::run(&settings, previous),
        Commands::Version => commands::version::run(),
    }
}
