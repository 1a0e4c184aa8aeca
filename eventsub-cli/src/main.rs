//! EventSub CLI - manage Twitch EventSub webhook subscriptions.
//!
//! # Commands
//!
//! - `eventsub subscriptions list` - List subscriptions, optionally filtered
//! - `eventsub subscriptions create <type> --condition <json>` - Create a webhook subscription
//! - `eventsub subscriptions delete <id>` - Delete a subscription
//! - `eventsub token` - Request an app access token
//! - `eventsub sign` - Compute the signature header for a message
//! - `eventsub event-types` - List supported subscription types
//!
//! Settings are read from `--config`, then `--env-file` (or `.env`), then
//! `EVENTSUB_*` environment variables.

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use eventsub_client::ListFilter;
use eventsub_config::EventSubSettings;
use eventsub_core::{EventType, SubscriptionStatus};
use eventsub_log::{Format, LogConfig};
use std::path::{Path, PathBuf};

mod commands;
mod error;

use commands::{event_types, sign, subscriptions, token};
use error::CliResult;

/// EventSub CLI - Twitch EventSub subscription tools
#[derive(Parser)]
#[command(name = "eventsub")]
#[command(version)]
#[command(about = "Manage Twitch EventSub webhook subscriptions")]
#[command(propagate_version = true)]
#[command(after_help = format!(
    "{}\n  {} eventsub event-types\n  {} eventsub subscriptions list --status enabled\n  {} eventsub subscriptions create channel.follow --condition '{{\"broadcaster_user_id\":\"1337\",\"moderator_user_id\":\"1337\"}}'",
    "Examples:".bright_cyan().bold(),
    "$".dimmed(),
    "$".dimmed(),
    "$".dimmed(),
))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (toml, json or .env)
    #[arg(short, long, global = true, env = "EVENTSUB_CONFIG")]
    config: Option<PathBuf>,

    /// Dotenv file to load instead of ./.env
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage subscriptions
    #[command(alias = "subs")]
    Subscriptions {
        #[command(subcommand)]
        command: SubscriptionCommands,
    },

    /// Request an app access token with the client credentials
    Token,

    /// Compute the signature header for a message
    Sign(SignArgs),

    /// List supported subscription types and versions
    #[command(alias = "types")]
    EventTypes {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum SubscriptionCommands {
    /// List subscriptions
    #[command(alias = "ls")]
    List(ListArgs),

    /// Create a webhook subscription
    Create {
        /// Subscription type, e.g. channel.follow
        #[arg(value_parser = parse_event_type)]
        event_type: EventType,

        /// Condition as a JSON object
        #[arg(long)]
        condition: String,
    },

    /// Delete a subscription
    #[command(alias = "rm")]
    Delete {
        /// Subscription id
        id: String,
    },
}

#[derive(Args)]
struct ListArgs {
    #[command(flatten)]
    filter: FilterArgs,

    /// Follow pagination and list every page
    #[arg(long, conflicts_with = "after")]
    all: bool,

    /// Cursor of the page to start from
    #[arg(long)]
    after: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// At most one filter applies to a list request
#[derive(Args)]
#[group(multiple = false)]
struct FilterArgs {
    /// Only subscriptions with this status
    #[arg(long, value_parser = subscriptions::parse_status)]
    status: Option<SubscriptionStatus>,

    /// Only subscriptions of this type
    #[arg(long = "type", value_parser = parse_event_type)]
    event_type: Option<EventType>,

    /// Only subscriptions involving this user
    #[arg(long)]
    user_id: Option<String>,
}

impl FilterArgs {
    fn into_filter(self) -> ListFilter {
        if let Some(status) = self.status {
            ListFilter::Status(status)
        } else if let Some(event_type) = self.event_type {
            ListFilter::Type(event_type)
        } else if let Some(user_id) = self.user_id {
            ListFilter::UserId(user_id)
        } else {
            ListFilter::All
        }
    }
}

#[derive(Args)]
struct SignArgs {
    /// Message id
    #[arg(long)]
    id: String,

    /// Message timestamp
    #[arg(long)]
    timestamp: String,

    /// Raw request body
    #[arg(long)]
    body: String,

    /// Shared webhook secret
    #[arg(long, env = "EVENTSUB_WEBHOOK_SECRET", hide_env_values = true)]
    secret: String,
}

fn parse_event_type(value: &str) -> Result<EventType, String> {
    value.parse().map_err(|e: eventsub_core::SchemaError| e.to_string())
}

fn init_logging(verbose: bool) {
    let mut config = LogConfig::from_env();
    if std::env::var_os("EVENTSUB_LOG_FORMAT").is_none() {
        config = config.with_format(Format::Compact);
    }
    if verbose {
        config = config.verbose();
    }
    eventsub_log::init_with(&config);
}

fn load_settings(config: Option<&Path>, env_file: Option<&Path>) -> CliResult<EventSubSettings> {
    let settings = EventSubSettings::load(config, env_file)?;
    tracing::debug!(?settings, "Loaded settings");
    Ok(settings)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Handle color preferences
    if cli.no_color {
        colored::control::set_override(false);
    }

    init_logging(cli.verbose);

    let settings = || load_settings(cli.config.as_deref(), cli.env_file.as_deref());

    let result: CliResult<()> = match cli.command {
        Commands::Subscriptions { command } => match settings() {
            Err(e) => Err(e),
            Ok(settings) => match command {
                SubscriptionCommands::List(args) => {
                    subscriptions::list(
                        &settings,
                        args.filter.into_filter(),
                        args.all,
                        args.after.as_deref(),
                        args.json,
                    )
                    .await
                }
                SubscriptionCommands::Create {
                    event_type,
                    condition,
                } => subscriptions::create(&settings, event_type, &condition).await,
                SubscriptionCommands::Delete { id } => subscriptions::delete(&settings, &id).await,
            },
        },

        Commands::Token => match settings() {
            Ok(settings) => token::run(&settings).await,
            Err(e) => Err(e),
        },

        Commands::Sign(args) => sign::run(&args.id, &args.timestamp, &args.body, &args.secret),

        Commands::EventTypes { json } => {
            event_types::run(json);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("\n  {} {}\n", "Error:".red().bold(), e);
        std::process::exit(1);
    };
}
