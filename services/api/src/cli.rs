use crate::demo::{run_demo, run_rank, DemoArgs, RankArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use resume_ranker::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Resume Ranker",
    about = "Rank resumes against a job description from the command line or over HTTP",
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
    /// Rank plain-text resumes against a job description
    Rank(RankArgs),
    /// Rank a built-in sample batch and print the result
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
        Command::Rank(args) => run_rank(args),
        Command::Demo(args) => run_demo(args),
    }
}
