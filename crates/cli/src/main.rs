// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod commands;
mod render;

#[cfg(test)]
mod tests;

use std::time::Duration;

use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use cinema_api::{GatewayConfig, HttpGateway, Identity, Role};
use cinema_domain::{DEFAULT_TIMEZONE, Locale, SystemClock};
use tracing::{debug, error};
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

use crate::commands::{CliError, Command};

/// Cinema client - bookings, schedules and session administration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the cinema REST API
    #[arg(long, env = "CINEMA_API_URL", default_value = "http://localhost:8080/api/")]
    api_url: String,

    /// Bearer token sent with every request
    #[arg(long, env = "CINEMA_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// IANA timezone used as the local clock
    #[arg(long, env = "CINEMA_TZ", default_value = DEFAULT_TIMEZONE)]
    timezone: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Id of the signed-in user
    #[arg(long, env = "CINEMA_USER_ID", default_value_t = 0)]
    user_id: i64,

    /// Role of the signed-in user (ADMIN or USER)
    #[arg(long, env = "CINEMA_ROLE", default_value = "USER")]
    role: Role,

    /// Language for status and day labels (ru or en)
    #[arg(long, default_value = "ru")]
    locale: Locale,

    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            token: self.token.clone(),
            timeout: Duration::from_secs(self.timeout),
            ..GatewayConfig::new(self.api_url.clone())
        }
    }

    fn identity(&self) -> Identity {
        Identity::new(self.user_id, self.role, self.token.clone())
    }
}

async fn execute(args: Args) -> Result<String, CliError> {
    let clock: SystemClock = SystemClock::from_name(&args.timezone)?;
    let gateway: HttpGateway = HttpGateway::new(&args.gateway_config())?;
    let identity: Identity = args.identity();
    debug!(
        api_url = %gateway.base_url(),
        user_id = identity.user_id,
        role = identity.role.as_str(),
        "Running command"
    );
    commands::run(args.command, gateway, &identity, &clock, args.locale).await
}

#[tokio::main]
async fn main() {
    let args: Args = Args::parse();

    let filter: EnvFilter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::default().add_directive(args.verbosity.log_level_filter().as_trace().into())
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match execute(args).await {
        Ok(output) => print!("{output}"),
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    }
}
