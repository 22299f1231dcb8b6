use crate::offline::{run_quiz, run_scan, QuizFileArgs, ScanFileArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use mindthegaps::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "mindthegaps",
    about = "Diagnose growth gaps and assemble 30-day plans from the command line",
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
    /// Score a quiz answer file and print the diagnosis
    Quiz(QuizFileArgs),
    /// Gate a scan worksheet file and print the plan or stop reasons
    Scan(ScanFileArgs),
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
        Command::Quiz(args) => run_quiz(args),
        Command::Scan(args) => run_scan(args),
    }
}
