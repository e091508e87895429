mod apis;
mod config;
mod discordbot;
mod embeds;
mod error;
mod horoscope;
#[cfg(test)]
mod testing;

use anyhow::Context;
use serenity::prelude::{Client, GatewayIntents};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::discordbot::{Handler, HoroscopeApi};
use crate::horoscope::HoroscopeClient;

fn init_logging() {
    // RUST_LOG=info,astrostats=debug
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    let config = Config::load()?;
    let horoscope_client = HoroscopeClient::new(&config.horoscope)?;
    tracing::info!(base_url = %config.horoscope.base_url, "horoscope client ready");

    // Configure the client with your Discord bot token in the environment.
    let token = apis::get_env_variable("DISCORD_TOKEN")?;
    // Slash commands arrive as interactions, no privileged intents are needed
    let intents = GatewayIntents::non_privileged();

    let mut client = Client::builder(&token, intents)
        .event_handler(Handler)
        .type_map_insert::<HoroscopeApi>(horoscope_client)
        .await
        .context("Err creating client")?;

    // Shards will automatically attempt to reconnect, and will perform exponential backoff until it reconnects.
    client.start().await.context("Client error")?;
    Ok(())
}
