// core/src/store/contacts.rs

use chrono::Utc;
use parking_lot::RwLock;
use tracing::info;

use crate::error::CoreResult;
use crate::model::{ContactDraft, ContactInquiry};

/// Append-only contact inquiries. Newest first.
#[derive(Debug, Default)]
pub struct ContactStore {
  contacts: RwLock<Vec<ContactInquiry>>,
}

impl ContactStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn create(&self, draft: ContactDraft) -> CoreResult<ContactInquiry> {
    let inquiry = ContactInquiry::from_draft(draft, Utc::now())?;
    let mut contacts = self.contacts.write();
    contacts.insert(0, inquiry.clone());
    info!(contact_id = %inquiry.id, total = contacts.len(), "Contact added to store.");
    Ok(inquiry)
  }

  pub fn list(&self) -> Vec<ContactInquiry> {
    let mut sorted = self.contacts.read().clone();
    // Stable sort keeps insertion order for identical timestamps.
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
  }

  pub fn len(&self) -> usize {
    self.contacts.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.contacts.read().is_empty()
  }
}
