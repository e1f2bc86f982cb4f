//! CLI commands.

mod cancel;
mod context;
mod reserve;
mod slots;
mod status;

use anyhow::Result;
use booth_domain::{BoothType, ReservationDate, Round, Selection};
use clap::{Parser, Subcommand};

use crate::client::ApiClient;
use crate::config::Config;
use crate::output::OutputFormat;

/// booth CLI - Reservation dashboard and slot admin for the booth event.
#[derive(Debug, Parser)]
#[command(name = "booth")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json).
    #[arg(long, global = true, default_value = "table")]
    format: String,

    /// Backend base URL.
    #[arg(long, global = true, env = "BOOTH_API_BASE_URL")]
    api_url: Option<String>,

    /// Event date (2025-11-22 or 2025-11-23).
    #[arg(long, global = true, env = "BOOTH_DATE")]
    date: Option<ReservationDate>,

    /// Booth code (e.g. AIR_ROCKET) or display name.
    #[arg(long, global = true, env = "BOOTH_BOOTH")]
    booth: Option<BoothType>,

    /// Round number (1-6).
    #[arg(long, global = true, env = "BOOTH_ROUND")]
    round: Option<Round>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show remaining seats per booth and round.
    Status(status::StatusCommand),

    /// Show the participant board of one date/booth/round.
    Slots(slots::SlotsCommand),

    /// Reserve a slot for a participant.
    Reserve(reserve::ReserveCommand),

    /// Cancel a reservation.
    Cancel(cancel::CancelCommand),

    /// Show or change saved defaults (API URL, date, booth, round).
    Context(context::ContextCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    pub fn log_json(&self) -> bool {
        self.log_json
    }

    /// Run the CLI command.
    pub async fn run(self) -> Result<()> {
        let format = OutputFormat::parse(&self.format);
        let config = Config::load()?;

        // Build context from flags and config
        let ctx = CommandContext {
            config,
            format,
            api_url: self.api_url,
            date: self.date,
            booth: self.booth,
            round: self.round,
        };

        match self.command {
            Commands::Status(cmd) => cmd.run(ctx).await,
            Commands::Slots(cmd) => cmd.run(ctx).await,
            Commands::Reserve(cmd) => cmd.run(ctx).await,
            Commands::Cancel(cmd) => cmd.run(ctx).await,
            Commands::Context(cmd) => cmd.run(ctx).await,
            Commands::Version => {
                println!("booth {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub config: Config,
    pub format: OutputFormat,
    pub api_url: Option<String>,
    pub date: Option<ReservationDate>,
    pub booth: Option<BoothType>,
    pub round: Option<Round>,
}

impl CommandContext {
    /// Get an API client. A missing base URL surfaces on the first request.
    pub fn client(&self) -> Result<ApiClient> {
        let api_url = self.config.api_url(self.api_url.as_deref());
        Ok(ApiClient::new(api_url, self.config.timeout())?)
    }

    /// Resolve the date, preferring flag over context.
    pub fn resolve_date(&self) -> Option<ReservationDate> {
        self.date.or(self.config.context.date)
    }

    /// Resolve the booth, preferring flag over context.
    pub fn resolve_booth(&self) -> Option<BoothType> {
        self.booth.or(self.config.context.booth)
    }

    /// Resolve the round, preferring flag over context.
    pub fn resolve_round(&self) -> Option<Round> {
        self.round.or(self.config.context.round)
    }

    /// Require a full (date, booth, round) selection.
    pub fn require_selection(&self) -> Result<Selection> {
        let date = self.resolve_date().ok_or_else(|| {
            anyhow::anyhow!("No date specified. Use --date or set a default context.")
        })?;
        let booth = self.resolve_booth().ok_or_else(|| {
            anyhow::anyhow!("No booth specified. Use --booth or set a default context.")
        })?;
        let round = self.resolve_round().ok_or_else(|| {
            anyhow::anyhow!("No round specified. Use --round or set a default context.")
        })?;
        Ok(Selection::new(date, booth, round))
    }
}
