use std::{process::ExitCode, time::Duration};

use anyhow::Context;
use clap::{Parser, Subcommand};
use data_access::RemoteUsernames;
use server::{ServerOpts, serve};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
struct Args {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the username list and the availability check over HTTP.
    Server {
        /// The port number on which the server will listen for incoming connections.
        /// Example: `8080`
        #[arg(long, env = "PORT")]
        port: u16,

        /// The database connection URL used by the server. Created if missing.
        /// Example: `sqlite:///tmp/data/data.db` (or) `sqlite://data.db`
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
    },

    /// Check one candidate against a remote username list.
    ///
    /// Prints `null` when the username is free and `{"usernameExists":true}` when
    /// it is taken. Exits with 1 when taken and 2 when the list cannot be fetched.
    Check {
        /// The username to check. Compared case-insensitively, never trimmed.
        candidate: String,

        /// Endpoint returning every username as a JSON array of strings.
        /// Example: `http://127.0.0.1:8080/auth/usernames`
        #[arg(long, env = "USERNAMES_URL")]
        usernames_url: String,

        /// Give up on the username list after this many milliseconds.
        #[arg(long, default_value_t = 5000)]
        timeout_ms: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Args::parse().cmd {
        Command::Server { port, database_url } => {
            serve(ServerOpts { database_url, port }).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check {
            candidate,
            usernames_url,
            timeout_ms,
        } => {
            let remote =
                RemoteUsernames::with_timeout(&usernames_url, Duration::from_millis(timeout_ms))
                    .with_context(|| format!("username source :: {usernames_url}"))?;

            match validation::validate(&candidate, &remote).await {
                Ok(errors) => {
                    println!(
                        "{}",
                        serde_json::to_string(&errors).context("serialize result")?
                    );
                    Ok(match errors {
                        Some(_) => ExitCode::from(1),
                        None => ExitCode::SUCCESS,
                    })
                }
                Err(err) => {
                    tracing::error!(url = %remote.url(), "{}", err);
                    Ok(ExitCode::from(2))
                }
            }
        }
    }
}
