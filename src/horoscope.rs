//! Horoscope lookups for the `/horoscope` and `/stars` commands

pub mod daily;
pub mod signs;
pub mod star_rating;

use reqwest::Client;
use serenity::async_trait;

use crate::apis;
use crate::config::HoroscopeConfig;
use crate::embeds::{self, Embed};
use crate::error::HoroscopeError;
use signs::Sign;

/// A reply that was reserved when the command came in and is filled in later.
///
/// The chat platform times out commands that are not answered quickly, so the
/// handler acknowledges first and then either edits the reserved message or sends
/// a private notice once the slow fetch is done.
#[async_trait]
pub trait DeferredResponse: Send + Sync {
    /// Reserve the reply. Calling this again after it succeeded is a no-op.
    async fn acknowledge(&self) -> anyhow::Result<()>;
    async fn edit_original(&self, embed: Embed) -> anyhow::Result<()>;
    /// Reply visible only to the user who ran the command
    async fn send_ephemeral(&self, notice: Embed) -> anyhow::Result<()>;
}

/// Http access to the horoscope site
#[derive(Debug, Clone)]
pub struct HoroscopeClient {
    http: Client,
    base_url: String,
}

impl HoroscopeClient {
    pub fn new(config: &HoroscopeConfig) -> anyhow::Result<Self> {
        Ok(Self {
            http: apis::build_client(config.timeout())?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn star_rating_url(&self, sign: &str) -> String {
        format!("{}/star-ratings/today/{sign}", self.base_url)
    }

    pub fn daily_url(&self, sign: &Sign) -> String {
        format!(
            "{}/us/horoscopes/general/horoscope-general-daily-today.aspx?sign={}",
            self.base_url, sign.api_id
        )
    }

    pub fn thumbnail_url(&self, sign: &Sign) -> String {
        format!("{}/images-US/signs/profile-{}.png", self.base_url, sign.slug)
    }

    async fn get(&self, url: &str) -> Result<String, HoroscopeError> {
        apis::fetch_html(&self.http, url).await
    }
}

/// Acknowledge, tolerating a reply that was already reserved
async fn acknowledge(responder: &dyn DeferredResponse, sign: &str) {
    if let Err(why) = responder.acknowledge().await {
        tracing::warn!(sign, "acknowledging interaction failed: {why:#}");
    }
}

async fn notify(responder: &dyn DeferredResponse, notice: Embed) {
    if let Err(why) = responder.send_ephemeral(notice).await {
        tracing::error!("Failed to send ephemeral notice: {why:#}");
    }
}

/// Run `/horoscope`: daily text plus star ratings in one embed
pub async fn horoscope_command(
    client: &HoroscopeClient,
    responder: &dyn DeferredResponse,
    sign_input: &str,
) {
    let Some(sign) = Sign::lookup(sign_input) else {
        tracing::warn!(sign = sign_input, "Invalid sign provided");
        notify(
            responder,
            embeds::error_notice(
                "Invalid Sign",
                &format!("`{sign_input}` is not a zodiac sign. Pick one of the twelve signs from the list."),
            ),
        )
        .await;
        return;
    };

    acknowledge(responder, sign.slug).await;

    let text = match daily::daily_text(client, sign).await {
        Ok(text) => text,
        Err(why) => {
            tracing::error!(sign = sign.slug, "Failed to fetch horoscope: {why:#}");
            notify(
                responder,
                embeds::error_notice(
                    "Horoscope Not Available",
                    &format!(
                        "Sorry, I couldn't retrieve the horoscope for **{}** at the moment. Please try again later.",
                        sign.display
                    ),
                ),
            )
            .await;
            return;
        }
    };

    let embed = daily::build_horoscope_embed(client, sign, &text);
    let Err(why) =
        star_rating::deliver_star_rating(client, responder, sign.slug, embed.clone()).await
    else {
        return;
    };

    // Ratings are optional here, the daily text still goes out
    star_rating::log_failure(sign.slug, &why);
    if let Err(why) = responder.edit_original(embed).await {
        tracing::error!(sign = sign.slug, "Failed to edit original response: {why:#}");
        notify(
            responder,
            embeds::error_notice(
                "Command Error",
                "An error occurred while executing the /horoscope command. Please try again later.",
            ),
        )
        .await;
    }
}

/// Run `/stars`: only the star ratings, straight through [`star_rating::fetch_star_rating`]
pub async fn star_rating_command(
    client: &HoroscopeClient,
    responder: &dyn DeferredResponse,
    sign_input: &str,
) {
    let Some(sign) = Sign::lookup(sign_input) else {
        tracing::warn!(sign = sign_input, "Invalid sign provided");
        notify(
            responder,
            embeds::error_notice(
                "Invalid Sign",
                &format!("`{sign_input}` is not a zodiac sign. Pick one of the twelve signs from the list."),
            ),
        )
        .await;
        return;
    };

    let embed = daily::build_star_rating_embed(client, sign);
    star_rating::fetch_star_rating(client, responder, sign.slug, embed).await;
}
