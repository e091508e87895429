//! Star ratings per life area, scraped from the daily star rating page.

use scraper::{ElementRef, Html, Selector};

use super::{acknowledge, notify, DeferredResponse, HoroscopeClient};
use crate::embeds::{self, Embed, EmbedField, SUPPORT_FIELD_NAME};
use crate::error::HoroscopeError;

pub const FIELD_NAME: &str = "Star Ratings";
pub const FILLED_STAR: &str = "⭐";
pub const EMPTY_STAR: &str = "✩";
/// Discord rejects embed field values longer than this many characters
pub const FIELD_VALUE_LIMIT: usize = 1024;

/// One life area, e.g. "Love", with its rating out of `total`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarRatingCategory {
    pub label: String,
    pub filled: usize,
    pub total: usize,
    pub description: String,
}

impl StarRatingCategory {
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.filled)
    }

    /// Always exactly `total` glyphs
    pub fn stars(&self) -> String {
        FILLED_STAR.repeat(self.filled) + &EMPTY_STAR.repeat(self.remaining())
    }

    pub fn render(&self) -> String {
        format!("{} {} {}", self.label, self.stars(), self.description)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarRatingReport {
    pub categories: Vec<StarRatingCategory>,
}

impl StarRatingReport {
    pub fn render(&self) -> String {
        self.categories
            .iter()
            .map(StarRatingCategory::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Add the ratings to `embed`, keeping the support field last.
    ///
    /// The value is not truncated; past [`FIELD_VALUE_LIMIT`] the edit is rejected by Discord.
    pub fn attach_to(&self, embed: &mut Embed) {
        let value = self.render();
        let length = value.chars().count();
        tracing::debug!(length, categories = self.categories.len(), "rendered star ratings");
        if length > FIELD_VALUE_LIMIT {
            tracing::warn!(
                length,
                limit = FIELD_VALUE_LIMIT,
                "star ratings exceed the embed field limit, the edit will likely be rejected"
            );
        }
        embed.insert_field_before(
            SUPPORT_FIELD_NAME,
            EmbedField {
                name: FIELD_NAME.to_string(),
                value,
                inline: false,
            },
        );
    }

    pub fn exceeds_field_limit(&self) -> bool {
        self.render().chars().count() > FIELD_VALUE_LIMIT
    }
}

fn collapse_whitespace(element: &ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn parse_star_ratings(html: &str) -> Result<StarRatingReport, HoroscopeError> {
    let document = Html::parse_document(html);
    let container_selector =
        Selector::parse("div.module-skin").expect("`div.module-skin` should be a valid selector");
    let block_selector = Selector::parse("h3, p").expect("`h3, p` should be a valid selector");
    let star_selector =
        Selector::parse("i.icon-star-filled").expect("`i.icon-star-filled` should be a valid selector");
    let highlight_selector = Selector::parse("i.icon-star-filled.highlight")
        .expect("`i.icon-star-filled.highlight` should be a valid selector");

    let container = document
        .select(&container_selector)
        .next()
        .ok_or_else(|| HoroscopeError::structural("Failed to find star rating on the webpage."))?;

    // Headings and paragraphs in document order, a heading's description is the next paragraph
    let blocks: Vec<ElementRef<'_>> = container.select(&block_selector).collect();

    let mut categories = Vec::new();
    for (index, heading) in blocks.iter().enumerate() {
        if heading.value().name() != "h3" {
            continue;
        }
        let label = collapse_whitespace(heading);
        let description = blocks[index + 1..]
            .iter()
            .find(|block| block.value().name() == "p")
            .map(collapse_whitespace)
            .ok_or_else(|| {
                HoroscopeError::structural(format!("Missing description for star rating {label:?}"))
            })?;

        categories.push(StarRatingCategory {
            filled: heading.select(&highlight_selector).count(),
            total: heading.select(&star_selector).count(),
            label,
            description,
        });
    }

    if categories.is_empty() {
        return Err(HoroscopeError::structural(
            "No star rating categories found on the webpage.",
        ));
    }

    Ok(StarRatingReport { categories })
}

pub async fn fetch_report(
    client: &HoroscopeClient,
    sign: &str,
) -> Result<StarRatingReport, HoroscopeError> {
    let html = client.get(&client.star_rating_url(sign)).await?;
    parse_star_ratings(&html)
}

/// Fetch the ratings, attach them to `embed` and edit the deferred reply with it.
///
/// Nothing is edited unless the whole report parsed.
pub async fn deliver_star_rating(
    client: &HoroscopeClient,
    responder: &dyn DeferredResponse,
    sign: &str,
    mut embed: Embed,
) -> Result<(), HoroscopeError> {
    let report = fetch_report(client, sign).await?;
    report.attach_to(&mut embed);
    responder
        .edit_original(embed)
        .await
        .map_err(HoroscopeError::Unexpected)?;
    tracing::info!(sign, "star ratings delivered");
    Ok(())
}

pub(super) fn log_failure(sign: &str, why: &HoroscopeError) {
    match why {
        HoroscopeError::Transport(error) => {
            tracing::error!(sign, "Request error while fetching star rating: {error}");
        }
        HoroscopeError::StructuralParse(reason) => {
            tracing::error!(sign, "Failed to parse star rating: {reason}");
        }
        HoroscopeError::Unexpected(error) => {
            tracing::error!(sign, "Unexpected error in fetch_star_rating: {error:#}");
        }
    }
}

/// Fetch today's star ratings for `sign` and post them in place of the deferred reply.
///
/// `sign` goes to the site as is; a sign it doesn't know comes back as a page
/// without ratings. On any failure the deferred reply is left alone and the user
/// gets a private notice instead, so exactly one of the two ever happens.
pub async fn fetch_star_rating(
    client: &HoroscopeClient,
    responder: &dyn DeferredResponse,
    sign: &str,
    embed: Embed,
) {
    acknowledge(responder, sign).await;

    if let Err(why) = deliver_star_rating(client, responder, sign, embed).await {
        log_failure(sign, &why);
        notify(responder, embeds::error_notice(why.notice_title(), why.user_message())).await;
    }
}
