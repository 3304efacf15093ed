use crate::demo::{run_demo, run_resume_report, DemoArgs, ResumeReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hireboard::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Hireboard",
    about = "Run the hireboard applicant-tracking service from the command line",
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
    /// Rank a scored-resume CSV export and preview the admission cut
    Report(ResumeReportArgs),
    /// Run an end-to-end CLI demo covering intake, evaluation, and the board
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
        Command::Report(args) => run_resume_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
