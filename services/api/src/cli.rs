use crate::demo::{run_demo, run_score, DemoArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use pmajay_gia::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "PM-AJAY GIA",
    about = "Run and demonstrate the grant-in-aid program administration service",
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
    /// Score an applicant profile and print the breakdown
    Score(ScoreArgs),
    /// Seed demo data, walk a project through its lifecycle, and print the dashboard
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
        Command::Score(args) => run_score(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["pmajay-gia-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_score_flags() {
        let cli = Cli::try_parse_from([
            "pmajay-gia-api",
            "score",
            "--income",
            "45000",
            "--education",
            "Secondary",
            "--family-size",
            "6",
            "--caste",
            "SC",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.income, 45_000.0);
                assert_eq!(args.family_size, 6);
            }
            other => panic!("expected score command, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_caste() {
        let result = Cli::try_parse_from([
            "pmajay-gia-api",
            "score",
            "--income",
            "1",
            "--education",
            "Primary",
            "--family-size",
            "2",
            "--caste",
            "XYZ",
        ]);
        assert!(result.is_err());
    }
}
