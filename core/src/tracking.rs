// core/src/tracking.rs

//! Human-shareable tracking codes (`ROF-XXXXXXXX`) and the sources that mint them.

use serde::Serialize;
use std::fmt;
use uuid::Uuid;

pub const TRACKING_PREFIX: &str = "ROF-";
pub const TRACKING_CODE_LEN: usize = 8;

/// A validated, upper-cased tracking code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TrackingId(String);

impl TrackingId {
  /// Parses a tracking code in any letter case. Returns `None` for anything
  /// that is not `ROF-` followed by eight ASCII alphanumerics.
  pub fn parse(raw: &str) -> Option<Self> {
    let upper = raw.trim().to_ascii_uppercase();
    let code = upper.strip_prefix(TRACKING_PREFIX)?;
    if code.len() != TRACKING_CODE_LEN || !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
      return None;
    }
    Some(TrackingId(upper))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for TrackingId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Produces candidate tracking ids. Uniqueness is checked by the store, not here.
pub trait TrackingIdSource: Send + Sync {
  fn generate(&self) -> TrackingId;
}

/// Default source: the first eight hex digits of a v4 UUID, upper-cased.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidTrackingIds;

impl TrackingIdSource for UuidTrackingIds {
  fn generate(&self) -> TrackingId {
    let simple = Uuid::new_v4().simple().to_string();
    let code = simple[..TRACKING_CODE_LEN].to_ascii_uppercase();
    TrackingId(format!("{}{}", TRACKING_PREFIX, code))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn generated_ids_have_the_public_shape() {
    let source = UuidTrackingIds;
    for _ in 0..100 {
      let id = source.generate();
      let code = id.as_str().strip_prefix("ROF-").unwrap();
      assert_eq!(code.len(), 8);
      assert!(code.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
      assert_eq!(TrackingId::parse(id.as_str()), Some(id));
    }
  }

  #[test]
  fn parse_is_case_insensitive_and_strict() {
    assert_eq!(
      TrackingId::parse("rof-abc12345").map(|t| t.to_string()),
      Some("ROF-ABC12345".to_string())
    );
    assert_eq!(TrackingId::parse(" ROF-ABC12345 "), TrackingId::parse("rof-ABC12345"));
    assert_eq!(TrackingId::parse("ROF-ABC1234"), None);
    assert_eq!(TrackingId::parse("ROF-ABC1234!"), None);
    assert_eq!(TrackingId::parse("XYZ-ABC12345"), None);
    assert_eq!(TrackingId::parse(""), None);
  }
}
