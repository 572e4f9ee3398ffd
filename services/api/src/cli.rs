use crate::demo::{run_cv, run_demo, run_rank, CvArgs, DemoArgs, RankArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use nexascore::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "NexaScore",
    about = "Rank candidates against job postings and serve the recruiting API",
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
    /// Rank a candidate CSV export against a posting file
    Rank(RankArgs),
    /// Score a CV document against postings with the configured external scorer (beta)
    Cv(CvArgs),
    /// Run an in-memory walkthrough: open postings, rank the sample pool, show the feed
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
        Command::Cv(args) => run_cv(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn rank_accepts_top_and_json_flags() {
        let cli = Cli::try_parse_from([
            "nexascore-api",
            "rank",
            "--posting",
            "posting.json",
            "--candidates",
            "pool.csv",
            "--top",
            "3",
            "--json",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Rank(args)) => {
                assert_eq!(args.top, Some(3));
                assert!(args.json);
                assert_eq!(args.candidates.to_string_lossy(), "pool.csv");
            }
            other => panic!("expected rank command, got {other:?}"),
        }
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["nexascore-api"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
