//! The badge's printed content and colours.
//!
//! The simulation treats this as opaque input; it only carries it through to
//! the renderer. Callers supply a partial record that is merged over
//! [`BadgeConfig::default`] field by field.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Fully resolved badge record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeConfig {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub role: String,
    pub badge_id: String,

    pub event_name: String,
    pub event_dates: String,
    pub event_tagline: String,

    /// CSS colour of the upper section.
    pub badge_color: String,
    /// CSS colour of the lower section.
    pub badge_bottom_color: String,

    pub social_link: Option<String>,

    pub footer_text: Option<String>,
    pub footer_link: Option<String>,
    pub footer_link_text: Option<String>,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        BadgeConfig {
            first_name: "Claudio".into(),
            last_name: "Romano".into(),
            company: "PANTER AG".into(),
            role: "PROMPTEUR".into(),
            badge_id: "#000023".into(),
            event_name: "Swiss {ai} Weeks".into(),
            event_dates: "1 Sep - 5 Oct 2025".into(),
            event_tagline: "AI Made in Switzerland, Shaped by You".into(),
            badge_color: "rgb(255,0,0)".into(),
            badge_bottom_color: "#1a1a2e".into(),
            social_link: Some("https://www.linkedin.com/company/swiss-ai-weeks/".into()),
            footer_text: Some("Made by".into()),
            footer_link: Some("https://www.panter.ch".into()),
            footer_link_text: Some("Panter".into()),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

impl BadgeConfig {
    /// Merge `overrides` over the defaults.
    pub fn with_overrides(overrides: BadgeConfigOverrides) -> Self {
        Self::default().merge(overrides)
    }

    /// Shallow merge: every field set in `overrides` replaces ours.
    pub fn merge(mut self, overrides: BadgeConfigOverrides) -> Self {
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(if let Some(v) = overrides.$field { self.$field = v; })*
            };
        }
        take!(
            first_name,
            last_name,
            company,
            role,
            badge_id,
            event_name,
            event_dates,
            event_tagline,
            badge_color,
            badge_bottom_color,
        );
        macro_rules! take_optional {
            ($($field:ident),* $(,)?) => {
                $(if let Some(v) = overrides.$field { self.$field = Some(v); })*
            };
        }
        take_optional!(social_link, footer_text, footer_link, footer_link_text);
        self
    }

    /// Parse a partial JSON record and merge it over the defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let overrides: BadgeConfigOverrides = serde_json::from_str(text)?;
        Ok(Self::with_overrides(overrides))
    }

    /// Social link to render, if any. Empty strings suppress it.
    pub fn social_link(&self) -> Option<&str> {
        present(&self.social_link)
    }

    /// Footer text, link and label, only when all of them are present.
    pub fn footer(&self) -> Option<Footer<'_>> {
        Some(Footer {
            text: present(&self.footer_text)?,
            link: present(&self.footer_link)?,
            link_text: present(&self.footer_link_text)?,
        })
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Footer line as rendered: "<text> <link_text>" linking to `link`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footer<'a> {
    pub text: &'a str,
    pub link: &'a str,
    pub link_text: &'a str,
}

/// Partial badge record supplied by the embedding page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BadgeConfigOverrides {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub badge_id: Option<String>,
    pub event_name: Option<String>,
    pub event_dates: Option<String>,
    pub event_tagline: Option<String>,
    pub badge_color: Option<String>,
    pub badge_bottom_color: Option<String>,
    pub social_link: Option<String>,
    pub footer_text: Option<String>,
    pub footer_link: Option<String>,
    pub footer_link_text: Option<String>,
}
