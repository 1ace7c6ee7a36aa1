//! chandesk CLI: normalize, compose and manage Telegram channel posts.
//!
//! Settings come from `packages/conf/settings.yaml` and
//! `<config home>/chandesk/settings.yaml`; override the config home with `--conf <dir>`.
//!
//! Logging: set `RUST_LOG=chandesk_client=debug` (or `warn`, `info`) to see request logs on stderr.

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use chandesk_cli::{load_settings, set_config_home_override};

use crate::cli::{Cli, Command};
use crate::commands::{
    Desk, run_draft_command, run_hashtags_command, run_login, run_logout, run_normalize,
    run_posts_command, run_users_command, run_whoami, with_client,
};

const INFO_FILTER: &str = "chandesk_cli=info,chandesk_client=info,chandesk_compose=info";
const DEBUG_FILTER: &str = "chandesk_cli=debug,chandesk_client=debug,chandesk_compose=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(conf_dir) = cli.conf.clone() {
        set_config_home_override(conf_dir);
    }
    let settings = load_settings();

    // RUST_LOG overrides; --verbose => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            DEBUG_FILTER
        } else {
            INFO_FILTER
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let desk = Desk::open(settings);
    let desk = &desk;
    match cli.command {
        Command::Normalize {
            file,
            keep_duplicates,
        } => run_normalize(file, keep_duplicates, &desk.settings).await,
        Command::Login { username, password } => {
            with_client(desk, |client| async move {
                run_login(&client, &username, password).await
            })
            .await
        }
        Command::Logout => {
            with_client(desk, |client| async move { run_logout(&client).await }).await
        }
        Command::Whoami => {
            with_client(desk, |client| async move { run_whoami(&client).await }).await
        }
        Command::Users { command } => {
            with_client(desk, |client| async move {
                run_users_command(&client, command).await
            })
            .await
        }
        Command::Posts { command } => {
            with_client(desk, |client| async move {
                run_posts_command(desk, &client, command).await
            })
            .await
        }
        Command::Draft { command } => run_draft_command(desk, command).await,
        Command::Hashtags { command } => run_hashtags_command(desk, command),
    }
}
