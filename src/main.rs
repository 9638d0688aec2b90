use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

mod ci;
mod designs;
mod error;
mod output;
mod publish;
mod sendgrid;
mod telemetry;
mod template;

use sendgrid::{SendGridClient, SendGridConfig};

#[derive(Parser)]
#[command(name = "design-publish", about = "Publish an email template to SendGrid designs")]
struct Cli {
    /// SendGrid API key
    #[arg(global = true, long, env = "SENDGRID_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// API base URL (defaults to https://api.sendgrid.com)
    #[arg(global = true, long, env = "SENDGRID_BASE_URL")]
    base_url: Option<String>,
    /// Designs requested per listing page
    #[arg(global = true, long, env = "DESIGN_PAGE_SIZE", default_value_t = 1)]
    page_size: u32,
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Publish(publish::PublishCmd),
    Designs(designs::DesignsCmd),
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);

    // initialize logging/tracing (stderr). Respect RUST_LOG and DESIGN_LOG_FORMAT
    telemetry::config::init_tracing();

    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_failure(&e);
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    let cfg = SendGridConfig::from_env().with_overrides(cli.api_key, cli.base_url);
    let client = SendGridClient::new(cfg)?;
    let page_size = cli.page_size.max(1);

    match cli.command {
        Commands::Publish(args) => publish::run(&client, page_size, args).await?,
        Commands::Designs(args) => designs::run(&client, page_size, args).await?,
    }

    Ok(())
}

// Every error kind ends here the same way: log, flag the job, exit 1.
fn report_failure(e: &anyhow::Error) {
    let log = telemetry::publish();
    log.error("Something went wrong");
    log.error_kv("run failed", [("error", format!("{e:#}"))]);
    if ci::in_actions() {
        let _ = ci::set_failed(&format!("{e:#}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_parse_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "design-publish", "publish",
            "--api-key", "SG.k",
            "--base-url", "http://127.0.0.1:9",
            "--page-size", "5",
            "--workspace", "/ws",
            "--git-ref", "refs/tags/welcome-email@1.2.0",
            "--plan",
        ])
        .unwrap();
        assert_eq!(cli.api_key.as_deref(), Some("SG.k"));
        assert_eq!(cli.base_url.as_deref(), Some("http://127.0.0.1:9"));
        assert_eq!(cli.page_size, 5);
        match cli.command {
            Commands::Publish(args) => {
                assert_eq!(args.git_ref.as_deref(), Some("refs/tags/welcome-email@1.2.0"));
                assert!(args.plan);
            }
            Commands::Designs(_) => panic!("expected publish"),
        }
    }

    #[test]
    fn api_key_and_base_url_read_their_environment_variables() {
        let cmd = <Cli as clap::CommandFactory>::command();
        let env_of = |id: &str| {
            cmd.get_arguments()
                .find(|a| a.get_id() == id)
                .and_then(|a| a.get_env())
                .map(|e| e.to_string_lossy().into_owned())
        };
        assert_eq!(env_of("api_key").as_deref(), Some("SENDGRID_API_KEY"));
        assert_eq!(env_of("base_url").as_deref(), Some("SENDGRID_BASE_URL"));
        assert_eq!(env_of("page_size").as_deref(), Some("DESIGN_PAGE_SIZE"));
    }

    #[test]
    fn designs_ls_accepts_name_filter() {
        let cli = Cli::try_parse_from(["design-publish", "designs", "ls", "--name", "receipt"]).unwrap();
        match cli.command {
            Commands::Designs(designs::DesignsCmd { cmd: designs::DesignsSub::Ls { name } }) => {
                assert_eq!(name.as_deref(), Some("receipt"));
            }
            Commands::Publish(_) => panic!("expected designs"),
        }
    }
}
