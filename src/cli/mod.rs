use clap::Parser;
use error_stack::{Result, ResultExt};
use thiserror::Error;

use feedview::{config, telemetry, App};

mod feed;
mod post;
mod user;

/// Command line options for feedview.
#[derive(Debug, Parser)]
#[command(
    about = "Browse a DummyJSON-style post feed from the terminal",
    version,
    author,
    long_about
)]
pub struct Cli {
    #[clap(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(Debug, Parser)]
pub enum Subcommand {
    Feed(self::feed::FeedCommand),
    Post(self::post::PostCommand),
    User(self::user::UserCommand),
}

#[derive(Debug, Error)]
#[error("Failed to run command")]
pub struct CommandError;

impl Cli {
    pub fn run(self) -> Result<(), CommandError> {
        let config = config::Settings::load().change_context(CommandError)?;
        telemetry::init(&config.logging).change_context(CommandError)?;

        let app = App::new(config).change_context(CommandError)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .change_context(CommandError)
            .attach_printable("could not build tokio runtime")?;

        match self.subcommand {
            Subcommand::Feed(args) => runtime.block_on(self::feed::run(&app, args)),
            Subcommand::Post(args) => runtime.block_on(self::post::run(&app, args)),
            Subcommand::User(args) => runtime.block_on(self::user::run(&app, args)),
        }
    }
}
