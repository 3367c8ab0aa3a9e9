// core/src/model/contact.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::order::{non_blank, required};
use crate::error::CoreResult;

const DEFAULT_SUBJECT: &str = "New Message";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
  /// `ct_<millis>_<random>`, the shape the dashboard already displays.
  pub fn generate(now: DateTime<Utc>) -> Self {
    let random = uuid::Uuid::new_v4().simple().to_string();
    ContactId(format!("ct_{}_{}", now.timestamp_millis(), &random[..9]))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ContactId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactDraft {
  pub name: String,
  pub phone: Option<String>,
  pub email: Option<String>,
  pub subject: Option<String>,
  pub message: String,
  pub voice_note_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInquiry {
  pub id: ContactId,
  pub name: String,
  pub phone: Option<String>,
  pub email: Option<String>,
  pub subject: String,
  pub message: String,
  pub voice_note_url: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl ContactInquiry {
  pub fn from_draft(draft: ContactDraft, now: DateTime<Utc>) -> CoreResult<Self> {
    let name = required(draft.name, "name")?;
    let message = required(draft.message, "message")?;
    Ok(ContactInquiry {
      id: ContactId::generate(now),
      name,
      phone: non_blank(draft.phone),
      email: non_blank(draft.email),
      subject: non_blank(draft.subject).unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
      message,
      voice_note_url: non_blank(draft.voice_note_url),
      created_at: now,
    })
  }
}
