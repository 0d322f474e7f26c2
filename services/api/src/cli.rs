use crate::demo::{run_demo, run_score, DemoArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fatmos::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Fatigue Monitoring Service",
    about = "Score shift fatigue check-ins and check-outs from the command line or over HTTP",
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
    /// Walk through a check-in and check-out for one shift and print the comparison
    Demo(DemoArgs),
    /// Score a single set of vitals, optionally with questionnaire answers
    Score(ScoreArgs),
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
        Command::Demo(args) => run_demo(args),
        Command::Score(args) => run_score(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["fatmos-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_score_with_questionnaire_lists() {
        let cli = Cli::try_parse_from([
            "fatmos-api",
            "score",
            "--sbp",
            "165",
            "--dbp",
            "105",
            "--bpm",
            "110",
            "--temp",
            "38.1",
            "--face",
            "Severe Fatigue",
            "--fas",
            "5,5,4",
            "--psqi",
            "4,4,4,3",
            "--pa",
            "2",
        ])
        .expect("parses");

        let Some(Command::Score(args)) = cli.command else {
            panic!("expected score command");
        };
        assert_eq!(args.fas, vec![5, 5, 4]);
        assert_eq!(args.psqi, vec![4, 4, 4, 3]);
        assert_eq!(args.pa, Some(2));
        assert_eq!(args.face, "Severe Fatigue");
    }

    #[test]
    fn serve_accepts_host_and_port_overrides() {
        let cli = Cli::try_parse_from([
            "fatmos-api",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
        ])
        .expect("parses");

        let Some(Command::Serve(args)) = cli.command else {
            panic!("expected serve command");
        };
        assert_eq!(args.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(args.port, Some(8080));
    }
}
