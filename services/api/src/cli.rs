use crate::reports::{run_finance_overview, run_lead_import, FinanceOverviewArgs, LeadImportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use studio_desk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Studio Desk",
    about = "Run the studio marketplace back office and its maintenance commands",
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
    /// Work with the sales pipeline
    Leads {
        #[command(subcommand)]
        command: LeadsCommand,
    },
    /// Inspect the finance ledger
    Finance {
        #[command(subcommand)]
        command: FinanceCommand,
    },
}

#[derive(Subcommand, Debug)]
enum LeadsCommand {
    /// Import leads from a CSV export into the configured backend
    Import(LeadImportArgs),
}

#[derive(Subcommand, Debug)]
enum FinanceCommand {
    /// Print revenue, costs and the twelve-month series
    Overview(FinanceOverviewArgs),
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
        Command::Leads {
            command: LeadsCommand::Import(args),
        } => run_lead_import(args).await,
        Command::Finance {
            command: FinanceCommand::Overview(args),
        } => run_finance_overview(args).await,
    }
}
