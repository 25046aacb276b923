use crate::report::{run_criteria_report, run_screening_report, CriteriaArgs, ScreeningArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use triagem::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Triagem de Benefícios",
    about = "Screen citizen profiles against a social benefit catalog",
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
    /// Screen a profile file against the whole catalog
    Triagem(ScreeningArgs),
    /// Print the grouped eligibility checklist for one benefit
    Criterios(CriteriaArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured benefit catalog file
    #[arg(long)]
    pub(crate) catalogo: Option<std::path::PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Triagem(args) => run_screening_report(args),
        Command::Criterios(args) => run_criteria_report(args),
    }
}
