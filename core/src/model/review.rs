// core/src/model/review.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::order::{non_blank, required};
use crate::error::{CoreError, CoreResult};

const DEFAULT_LOCATION: &str = "Faisalabad";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewDraft {
  pub name: String,
  pub email: Option<String>,
  pub rating: Option<u8>,
  pub text: String,
  pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
  pub id: u64,
  pub name: String,
  pub email: Option<String>,
  pub rating: u8,
  pub text: String,
  pub location: String,
  pub date: DateTime<Utc>,
}

impl Review {
  pub fn from_draft(id: u64, draft: ReviewDraft, now: DateTime<Utc>) -> CoreResult<Self> {
    let name = required(draft.name, "name")?;
    let text = required(draft.text, "text")?;
    let rating = match draft.rating {
      Some(r @ 1..=5) => r,
      Some(r) => return Err(CoreError::Validation(format!("rating must be between 1 and 5, got {}", r))),
      None => return Err(CoreError::Validation("rating is required".to_string())),
    };
    Ok(Review {
      id,
      name,
      email: non_blank(draft.email),
      rating,
      text,
      location: non_blank(draft.location).unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
      date: now,
    })
  }
}
