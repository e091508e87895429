//! Embeds as plain data, turned into serenity builders only when sent

use chrono::{DateTime, Utc};

pub const SUPPORT_FIELD_NAME: &str = "Support Us ❤️";
pub const SUPPORT_FIELD_VALUE: &str =
    "[If you enjoy using this bot, consider supporting us!](https://astrostats.info)";
pub const ERROR_COLOUR: u32 = 0xE74C3C;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Embed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub colour: Option<u32>,
    pub thumbnail: Option<String>,
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Embed {
    pub fn new(title: impl Into<String>, colour: u32) -> Self {
        Self {
            title: Some(title.into()),
            colour: Some(colour),
            ..Self::default()
        }
    }

    pub fn add_field(&mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
    }

    /// Insert a field ahead of the first field called `anchor`, or at the end if there is none
    pub fn insert_field_before(&mut self, anchor: &str, field: EmbedField) {
        match self.fields.iter().position(|f| f.name == anchor) {
            Some(index) => self.fields.insert(index, field),
            None => self.fields.push(field),
        }
    }

    pub fn field(&self, name: &str) -> Option<&EmbedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn add_support_field(&mut self) {
        self.add_field(SUPPORT_FIELD_NAME, SUPPORT_FIELD_VALUE, false);
    }
}

/// Red notice used for every user facing failure
pub fn error_notice(title: &str, description: &str) -> Embed {
    Embed {
        description: Some(format!(
            "{description}\n\nFor more assistance, visit [AstroStats Support](https://astrostats.info)"
        )),
        footer: Some("Built By Goldiez ❤️ Support: https://astrostats.info".to_string()),
        timestamp: Some(Utc::now()),
        ..Embed::new(title, ERROR_COLOUR)
    }
}
