use anyhow::Context;
use serenity::{
    async_trait,
    builder::CreateEmbed,
    http::Http,
    model::{
        application::{
            command::{Command, CommandOptionType},
            interaction::{
                application_command::ApplicationCommandInteraction, Interaction,
                InteractionResponseType,
            },
        },
        gateway::Ready,
        Timestamp,
    },
    prelude::{Context as DiscordContext, EventHandler, TypeMapKey},
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::embeds::Embed;
use crate::horoscope::{self, signs::SIGNS, DeferredResponse, HoroscopeClient};

pub struct HoroscopeApi;
impl TypeMapKey for HoroscopeApi {
    type Value = HoroscopeClient;
}

fn to_create_embed(embed: &Embed) -> CreateEmbed {
    let mut builder = CreateEmbed::default();
    if let Some(title) = &embed.title {
        builder.title(title);
    }
    if let Some(description) = &embed.description {
        builder.description(description);
    }
    if let Some(colour) = embed.colour {
        builder.colour(colour);
    }
    if let Some(thumbnail) = &embed.thumbnail {
        builder.thumbnail(thumbnail);
    }
    for field in &embed.fields {
        builder.field(&field.name, &field.value, field.inline);
    }
    if let Some(footer) = &embed.footer {
        builder.footer(|f| f.text(footer));
    }
    if let Some(timestamp) = embed.timestamp {
        if let Ok(timestamp) = Timestamp::from_unix_timestamp(timestamp.timestamp()) {
            builder.timestamp(timestamp);
        }
    }
    builder
}

/// How a private notice reaches the user, given what has been sent so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NoticeRoute {
    /// Nothing sent yet, the notice is the interaction response itself
    InitialResponse,
    /// The first followup after a defer completes the public "thinking" message and
    /// ignores the ephemeral flag, so the deferred message is deleted first and the
    /// followup goes out as a new private message
    ReplaceDeferred,
}

impl NoticeRoute {
    fn for_state(acknowledged: bool) -> Self {
        if acknowledged {
            Self::ReplaceDeferred
        } else {
            Self::InitialResponse
        }
    }
}

/// A slash command interaction, remembering whether it has been answered yet
pub struct DiscordInteraction {
    http: Arc<Http>,
    command: ApplicationCommandInteraction,
    acknowledged: AtomicBool,
}

impl DiscordInteraction {
    pub fn new(http: Arc<Http>, command: ApplicationCommandInteraction) -> Self {
        Self {
            http,
            command,
            acknowledged: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl DeferredResponse for DiscordInteraction {
    async fn acknowledge(&self) -> anyhow::Result<()> {
        if self.acknowledged.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        let deferred = self
            .command
            .create_interaction_response(&self.http, |response| {
                response.kind(InteractionResponseType::DeferredChannelMessageWithSource)
            })
            .await;
        if let Err(why) = deferred {
            self.acknowledged.store(false, Ordering::SeqCst);
            return Err(why).context("Failed to defer interaction");
        }
        Ok(())
    }

    async fn edit_original(&self, embed: Embed) -> anyhow::Result<()> {
        let embed = to_create_embed(&embed);
        self.command
            .edit_original_interaction_response(&self.http, |response| response.set_embed(embed))
            .await
            .context("Failed to edit original response")?;
        Ok(())
    }

    async fn send_ephemeral(&self, notice: Embed) -> anyhow::Result<()> {
        let embed = to_create_embed(&notice);
        match NoticeRoute::for_state(self.acknowledged.load(Ordering::SeqCst)) {
            NoticeRoute::ReplaceDeferred => {
                if let Err(why) = self
                    .command
                    .delete_original_interaction_response(&self.http)
                    .await
                {
                    tracing::warn!("Failed to delete deferred response: {why}");
                }
                self.command
                    .create_followup_message(&self.http, |followup| {
                        followup.ephemeral(true).add_embed(embed)
                    })
                    .await
                    .context("Failed to send followup message")?;
            }
            NoticeRoute::InitialResponse => {
                self.command
                    .create_interaction_response(&self.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message.ephemeral(true).add_embed(embed)
                            })
                    })
                    .await
                    .context("Failed to send ephemeral response")?;
                self.acknowledged.store(true, Ordering::SeqCst);
            }
        }
        Ok(())
    }
}

async fn register_commands(ctx: &DiscordContext) -> anyhow::Result<()> {
    let commands = Command::set_global_application_commands(&ctx.http, |commands| {
        for (name, description) in [
            ("horoscope", "Check your Daily Horoscope"),
            ("stars", "Check today's Star Ratings"),
        ] {
            commands.create_application_command(|command| {
                command
                    .name(name)
                    .description(description)
                    .create_option(|option| {
                        option
                            .name("sign")
                            .description("Choose your zodiac sign")
                            .kind(CommandOptionType::String)
                            .required(true);
                        for sign in &SIGNS {
                            option.add_string_choice(sign.display, sign.slug);
                        }
                        option
                    })
            });
        }
        commands
    })
    .await
    .context("Failed to register slash commands")?;
    tracing::info!(count = commands.len(), "registered slash commands");
    Ok(())
}

fn string_option(command: &ApplicationCommandInteraction, name: &str) -> String {
    command
        .data
        .options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_ref())
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_string()
}

async fn run_sign_command(ctx: DiscordContext, command: ApplicationCommandInteraction) {
    let client = {
        let data = ctx.data.read().await;
        data.get::<HoroscopeApi>().cloned()
    };
    let Some(client) = client else {
        tracing::error!("Horoscope client missing from the client data");
        return;
    };

    let sign = string_option(&command, "sign");
    let name = command.data.name.clone();
    tracing::info!(user = %command.user.name, command = %name, sign = %sign, "User called a command");
    let interaction = DiscordInteraction::new(ctx.http.clone(), command);
    if name == "stars" {
        horoscope::star_rating_command(&client, &interaction, &sign).await;
    } else {
        horoscope::horoscope_command(&client, &interaction, &sign).await;
    }
}

pub struct Handler;

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: DiscordContext, ready: Ready) {
        tracing::info!("{} is connected!", ready.user.name);
        if let Err(why) = register_commands(&ctx).await {
            tracing::error!("{why:#}");
        }
    }

    async fn interaction_create(&self, ctx: DiscordContext, interaction: Interaction) {
        let Interaction::ApplicationCommand(command) = interaction else {
            return;
        };

        let name = command.data.name.clone();
        match name.as_str() {
            "horoscope" | "stars" => run_sign_command(ctx, command).await,
            other => tracing::warn!(command = other, "Received unknown command"),
        }
    }
}
