//! Context commands (saved API URL and default selection).

use anyhow::Result;
use booth_domain::{BoothType, ReservationDate, Round};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::config::Config;
use crate::output::{print_single, print_success, OutputFormat};

use super::CommandContext;

/// Manage saved CLI context (API URL and default date/booth/round).
#[derive(Debug, Args)]
pub struct ContextCommand {
    #[command(subcommand)]
    command: ContextSubcommand,
}

#[derive(Debug, Subcommand)]
enum ContextSubcommand {
    /// Show the saved context.
    Show,

    /// Save defaults. Global --date/--booth/--round are stored when given.
    Set(SetArgs),

    /// Clear the saved selection.
    Clear,
}

#[derive(Debug, Args)]
struct SetArgs {
    /// Backend base URL to store.
    #[arg(long = "base-url")]
    base_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Serialize)]
struct ContextView {
    api_url: Option<String>,
    timeout_secs: u64,
    date: Option<ReservationDate>,
    booth: Option<BoothType>,
    round: Option<Round>,
}

impl ContextView {
    fn of(config: &Config) -> Self {
        Self {
            api_url: config.api_url.clone(),
            timeout_secs: config.timeout_secs,
            date: config.context.date,
            booth: config.context.booth,
            round: config.context.round,
        }
    }
}

impl ContextCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            ContextSubcommand::Show => show(ctx),
            ContextSubcommand::Set(args) => set(ctx, args),
            ContextSubcommand::Clear => clear(ctx),
        }
    }
}

fn show(ctx: CommandContext) -> Result<()> {
    let view = ContextView::of(&ctx.config);

    match ctx.format {
        OutputFormat::Json => print_single(&view),
        OutputFormat::Table => {
            println!("api_url: {}", view.api_url.as_deref().unwrap_or("-"));
            println!("timeout_secs: {}", view.timeout_secs);
            println!("date: {}", display_or_dash(view.date));
            println!("booth: {}", display_or_dash(view.booth));
            println!("round: {}", display_or_dash(view.round));
        }
    }

    Ok(())
}

fn display_or_dash<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Folds `set` arguments and the global selection flags into `config`.
fn apply_set(config: &mut Config, ctx_flags: &CommandContext, args: SetArgs) {
    if let Some(url) = args.base_url {
        let url = url.trim().to_string();
        config.api_url = (!url.is_empty()).then_some(url);
    }
    if let Some(secs) = args.timeout_secs {
        config.timeout_secs = secs;
    }
    if let Some(date) = ctx_flags.date {
        config.context.date = Some(date);
    }
    if let Some(booth) = ctx_flags.booth {
        config.context.booth = Some(booth);
    }
    if let Some(round) = ctx_flags.round {
        config.context.round = Some(round);
    }
}

fn set(ctx: CommandContext, args: SetArgs) -> Result<()> {
    let mut config = ctx.config.clone();
    apply_set(&mut config, &ctx, args);
    config.save()?;

    match ctx.format {
        OutputFormat::Json => print_single(&ContextView::of(&config)),
        OutputFormat::Table => print_success("Saved context"),
    }

    Ok(())
}

fn clear(mut ctx: CommandContext) -> Result<()> {
    ctx.config.context.date = None;
    ctx.config.context.booth = None;
    ctx.config.context.round = None;
    ctx.config.save()?;

    match ctx.format {
        OutputFormat::Json => print_single(&serde_json::json!({ "ok": true })),
        OutputFormat::Table => print_success("Cleared saved context"),
    }

    Ok(())
}
