use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{clean, require, Draft, Record, RecordId, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketingChannel {
    Instagram,
    Facebook,
    Linkedin,
    Tiktok,
    Newsletter,
    Blog,
}

impl MarketingChannel {
    pub fn label(&self) -> &'static str {
        match self {
            MarketingChannel::Instagram => "Instagram",
            MarketingChannel::Facebook => "Facebook",
            MarketingChannel::Linkedin => "LinkedIn",
            MarketingChannel::Tiktok => "TikTok",
            MarketingChannel::Newsletter => "Newsletter",
            MarketingChannel::Blog => "Blog",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    #[default]
    Draft,
    Scheduled,
    Published,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketingPost {
    pub id: RecordId,
    pub title: String,
    pub channel: MarketingChannel,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub scheduled_for: Option<DateTime<Utc>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub asset_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketingPostDraft {
    pub title: String,
    pub channel: MarketingChannel,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub scheduled_for: Option<DateTime<Utc>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub asset_url: Option<String>,
}

impl Draft for MarketingPostDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        if self.status == PostStatus::Scheduled && self.scheduled_for.is_none() {
            return Err(ValidationError::MissingField("scheduled_for"));
        }
        Ok(())
    }
}

impl Record for MarketingPost {
    const TABLE: &'static str = "marketing_posts";
    type Draft = MarketingPostDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: RecordId, now: DateTime<Utc>, draft: MarketingPostDraft) -> Self {
        Self {
            id,
            title: draft.title.trim().to_string(),
            channel: draft.channel,
            status: draft.status,
            scheduled_for: draft.scheduled_for,
            body: clean(draft.body),
            asset_url: clean(draft.asset_url),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, draft: MarketingPostDraft, now: DateTime<Utc>) {
        self.title = draft.title.trim().to_string();
        self.channel = draft.channel;
        self.status = draft.status;
        self.scheduled_for = draft.scheduled_for;
        self.body = clean(draft.body);
        self.asset_url = clean(draft.asset_url);
        self.updated_at = now;
    }
}
