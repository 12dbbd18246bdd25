use crate::demo::{run_demo, run_score, DemoArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hiring_engine::config::AppConfig;
use hiring_engine::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Campus Hiring Engine",
    about = "Score candidates, run hiring session workflows, and serve the hiring API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score one candidate profile against one set of job criteria
    Score(ScoreArgs),
    /// Seed an in-memory session, run a bulk status update, and print analytics
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args, AppConfig::load()?.scoring),
        Command::Demo(args) => run_demo(args, AppConfig::load()?.scoring),
    }
}
