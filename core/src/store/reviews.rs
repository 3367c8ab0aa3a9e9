// core/src/store/reviews.rs

use chrono::Utc;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

use crate::error::CoreResult;
use crate::model::{Review, ReviewDraft};

/// Append-only, publicly listed reviews. Newest first.
#[derive(Debug)]
pub struct ReviewStore {
  reviews: RwLock<Vec<Review>>,
  next_id: AtomicU64,
}

impl Default for ReviewStore {
  fn default() -> Self {
    Self {
      reviews: RwLock::new(Vec::new()),
      next_id: AtomicU64::new(1),
    }
  }
}

impl ReviewStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn create(&self, draft: ReviewDraft) -> CoreResult<Review> {
    let mut review = Review::from_draft(0, draft, Utc::now())?;
    let mut reviews = self.reviews.write();
    // Ids are only handed out to drafts that passed validation.
    review.id = self.next_id.fetch_add(1, Ordering::Relaxed);
    reviews.insert(0, review.clone());
    info!(review_id = review.id, rating = review.rating, total = reviews.len(), "Review added to store.");
    Ok(review)
  }

  pub fn list(&self) -> Vec<Review> {
    self.reviews.read().clone()
  }

  pub fn len(&self) -> usize {
    self.reviews.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.reviews.read().is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::CoreError;

  fn draft(rating: Option<u8>) -> ReviewDraft {
    ReviewDraft {
      name: "Fatima".into(),
      rating,
      text: "Arrived on time".into(),
      ..Default::default()
    }
  }

  #[test]
  fn rating_must_be_within_one_to_five() {
    let store = ReviewStore::new();
    for bad in [None, Some(0), Some(6)] {
      assert!(matches!(store.create(draft(bad)), Err(CoreError::Validation(_))));
    }
    assert!(store.is_empty());
    let review = store.create(draft(Some(5))).unwrap();
    assert_eq!(review.location, "Faisalabad");
  }

  #[test]
  fn name_and_text_are_required() {
    let store = ReviewStore::new();
    let mut d = draft(Some(4));
    d.text = "  ".into();
    assert!(matches!(store.create(d), Err(CoreError::Validation(_))));
  }

  #[test]
  fn rejected_drafts_do_not_consume_ids() {
    let store = ReviewStore::new();
    assert!(store.create(draft(Some(9))).is_err());
    assert!(store.create(draft(None)).is_err());
    assert_eq!(store.create(draft(Some(3))).unwrap().id, 1);
    assert_eq!(store.create(draft(Some(4))).unwrap().id, 2);
  }

  #[test]
  fn list_is_newest_first() {
    let store = ReviewStore::new();
    let first = store.create(draft(Some(4))).unwrap();
    let second = store.create(draft(Some(5))).unwrap();
    let ids: Vec<u64> = store.list().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
  }
}
