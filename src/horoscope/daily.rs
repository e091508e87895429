use chrono::Utc;
use scraper::{Html, Selector};

use super::signs::Sign;
use super::HoroscopeClient;
use crate::embeds::Embed;
use crate::error::HoroscopeError;

pub const TEXT_FIELD_NAME: &str = "Today's Horoscope";

pub async fn daily_text(client: &HoroscopeClient, sign: &Sign) -> Result<String, HoroscopeError> {
    let html = client.get(&client.daily_url(sign)).await?;
    parse_daily_text(&html)
}

/// First paragraph of the `main-horoscope` block
pub fn parse_daily_text(html: &str) -> Result<String, HoroscopeError> {
    let document = Html::parse_document(html);
    let container_selector = Selector::parse("div.main-horoscope")
        .expect("`div.main-horoscope` should be a valid selector");
    let paragraph_selector = Selector::parse("p").expect("`p` should be a valid selector");

    let container = document
        .select(&container_selector)
        .next()
        .ok_or_else(|| HoroscopeError::structural("Failed to find horoscope text on the webpage."))?;

    let text = container
        .select(&paragraph_selector)
        .next()
        .map(|p| p.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(HoroscopeError::structural("Horoscope text on the webpage is empty."));
    }
    Ok(text)
}

pub fn build_horoscope_embed(client: &HoroscopeClient, sign: &Sign, text: &str) -> Embed {
    let mut embed = Embed::new(format!("Horoscope for {}", sign.display), sign.colour);
    embed.thumbnail = Some(client.thumbnail_url(sign));
    embed.add_field(TEXT_FIELD_NAME, text, false);
    embed.add_support_field();
    embed.footer = Some("AstroStats | astrostats.info".to_string());
    embed.timestamp = Some(Utc::now());
    embed
}

/// Base for `/stars`, the ratings field is added once fetched
pub fn build_star_rating_embed(client: &HoroscopeClient, sign: &Sign) -> Embed {
    let mut embed = Embed::new(format!("Star Ratings for {}", sign.display), sign.colour);
    embed.thumbnail = Some(client.thumbnail_url(sign));
    embed.add_support_field();
    embed.footer = Some("AstroStats | astrostats.info".to_string());
    embed.timestamp = Some(Utc::now());
    embed
}
