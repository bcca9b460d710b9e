mod console;
mod demo;

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use crossbot_callbacks::CallbackRegistry;
use crossbot_channels::Router;
use crossbot_commands::Dispatcher;
use crossbot_core::config::RegistryConfig;
use crossbot_core::{CrossbotConfig, Platform};
use crossbot_discord::{DiscordRenderer, InteractionResponseData};
use crossbot_guilded::{ChatMessage, GuildedRenderer};
use crossbot_telegram::{TelegramMessage, TelegramRenderer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::console::{repl, ConsoleDelivery};

/// Crossbot console: type commands, see the payload each platform would get.
#[derive(Parser, Debug)]
#[command(name = "crossbot", version, about)]
struct Cli {
    /// Path to crossbot.toml (falls back to CROSSBOT_CONFIG, then ~/.crossbot/crossbot.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Platform to render for (discord, telegram, guilded)
    #[arg(long, global = true, default_value = "discord")]
    platform: Platform,

    /// Sender identity handed to handlers
    #[arg(long, global = true, default_value = "console")]
    user: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Read lines from stdin, dispatch them and print rendered payloads.
    /// `!press <id>` presses a previously rendered button.
    Repl,

    /// Print the command registration payload for the platform
    Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "crossbot=info".into()),
        )
        .init();

    let cli = Cli::parse();

    // explicit flag > CROSSBOT_CONFIG env > ~/.crossbot/crossbot.toml
    let config_path = cli.config.clone().or_else(|| std::env::var("CROSSBOT_CONFIG").ok());
    let config = match CrossbotConfig::load(config_path.as_deref()) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Config load failed ({}), using defaults", e);
            None
        }
    };

    let commands = demo::commands()?;

    match cli.command {
        Commands::Commands => print_registration(&commands, cli.platform),
        Commands::Repl => {
            let registry_config = config
                .as_ref()
                .map(|c| c.registry)
                .unwrap_or_else(RegistryConfig::default);
            let registry = CallbackRegistry::new(&registry_config);
            spawn_purger(Arc::clone(&registry), registry_config.ttl_secs);

            let mut dispatcher = Dispatcher::new(commands);
            if let Some(tg) = config.as_ref().and_then(|c| c.platforms.telegram.as_ref()) {
                dispatcher = dispatcher.with_bot_username(tg.bot_username.as_str());
            }
            let dispatcher = Arc::new(dispatcher);

            info!(
                platform = %cli.platform,
                bot = config.as_ref().map(|c| c.name.as_str()).unwrap_or("crossbot"),
                "console ready"
            );

            match cli.platform {
                Platform::Discord => {
                    let router = Router::new(
                        dispatcher,
                        registry,
                        DiscordRenderer,
                        ConsoleDelivery::<InteractionResponseData>::new(),
                    );
                    repl(&router, cli.platform, &cli.user).await
                }
                Platform::Telegram => {
                    let router = Router::new(
                        dispatcher,
                        registry,
                        TelegramRenderer,
                        ConsoleDelivery::<TelegramMessage>::new(),
                    );
                    repl(&router, cli.platform, &cli.user).await
                }
                Platform::Guilded => {
                    let router = Router::new(
                        dispatcher,
                        registry,
                        GuildedRenderer,
                        ConsoleDelivery::<ChatMessage>::new(),
                    );
                    repl(&router, cli.platform, &cli.user).await
                }
                Platform::Undefined => {
                    anyhow::bail!("choose a platform: discord, telegram or guilded")
                }
            }
        }
    }
}

fn print_registration(commands: &crossbot_commands::CommandSet, platform: Platform) -> anyhow::Result<()> {
    let json = match platform {
        Platform::Discord => {
            serde_json::to_string_pretty(&crossbot_discord::application_commands(commands))?
        }
        Platform::Telegram => {
            serde_json::to_string_pretty(&crossbot_telegram::bot_commands(commands))?
        }
        Platform::Guilded | Platform::Undefined => {
            anyhow::bail!("{} has no command registration", platform)
        }
    };
    println!("{}", json);
    Ok(())
}

/// Sweep expired callbacks in the background so an idle registry shrinks too.
fn spawn_purger(registry: Arc<CallbackRegistry>, ttl_secs: u64) {
    if ttl_secs == 0 {
        return;
    }
    let period = Duration::from_secs(ttl_secs.clamp(1, 60));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            registry.purge_expired();
        }
    });
}
