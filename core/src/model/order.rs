// core/src/model/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::tracking::TrackingId;

/// Internal, opaque order identity. Never shown to customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
  pub fn new() -> Self {
    OrderId(Uuid::new_v4())
  }

  pub fn parse(raw: &str) -> Option<Self> {
    Uuid::parse_str(raw.trim()).ok().map(OrderId)
  }

  pub fn as_uuid(&self) -> &Uuid {
    &self.0
  }
}

impl Default for OrderId {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for OrderId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.0, f)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
  Pending,
  Accepted,
  #[serde(rename = "In Progress")]
  InProgress,
  Delivered,
  Rejected,
}

impl OrderStatus {
  pub const ALL: [OrderStatus; 5] = [
    OrderStatus::Pending,
    OrderStatus::Accepted,
    OrderStatus::InProgress,
    OrderStatus::Delivered,
    OrderStatus::Rejected,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      OrderStatus::Pending => "Pending",
      OrderStatus::Accepted => "Accepted",
      OrderStatus::InProgress => "In Progress",
      OrderStatus::Delivered => "Delivered",
      OrderStatus::Rejected => "Rejected",
    }
  }

  /// Position along the delivery progression. `Rejected` sits outside it.
  pub fn progression_index(&self) -> Option<usize> {
    match self {
      OrderStatus::Pending => Some(0),
      OrderStatus::Accepted => Some(1),
      OrderStatus::InProgress => Some(2),
      OrderStatus::Delivered => Some(3),
      OrderStatus::Rejected => None,
    }
  }

  pub fn is_terminal(&self) -> bool {
    matches!(self, OrderStatus::Delivered | OrderStatus::Rejected)
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for OrderStatus {
  type Err = CoreError;

  /// Status strings are matched exactly, the way the admin dashboard sends them.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    OrderStatus::ALL
      .into_iter()
      .find(|status| status.as_str() == s)
      .ok_or_else(|| CoreError::InvalidStatus(s.to_string()))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParcelType {
  Documents,
  Clothes,
  Electronics,
  Food,
  Gift,
  Medicine,
  Other,
}

impl ParcelType {
  pub const ALL: [ParcelType; 7] = [
    ParcelType::Documents,
    ParcelType::Clothes,
    ParcelType::Electronics,
    ParcelType::Food,
    ParcelType::Gift,
    ParcelType::Medicine,
    ParcelType::Other,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      ParcelType::Documents => "Documents",
      ParcelType::Clothes => "Clothes",
      ParcelType::Electronics => "Electronics",
      ParcelType::Food => "Food",
      ParcelType::Gift => "Gift",
      ParcelType::Medicine => "Medicine",
      ParcelType::Other => "Other",
    }
  }
}

impl fmt::Display for ParcelType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ParcelType {
  type Err = CoreError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let wanted = s.trim();
    ParcelType::ALL
      .into_iter()
      .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
      .ok_or_else(|| CoreError::Validation(format!("Unknown parcel type '{}'", wanted)))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DeliveryType {
  #[default]
  Normal,
  Urgent,
  #[serde(rename = "Same Day")]
  SameDay,
}

impl DeliveryType {
  pub fn as_str(&self) -> &'static str {
    match self {
      DeliveryType::Normal => "Normal",
      DeliveryType::Urgent => "Urgent",
      DeliveryType::SameDay => "Same Day",
    }
  }
}

impl fmt::Display for DeliveryType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for DeliveryType {
  type Err = CoreError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let wanted = s.trim();
    [DeliveryType::Normal, DeliveryType::Urgent, DeliveryType::SameDay]
      .into_iter()
      .find(|d| d.as_str().eq_ignore_ascii_case(wanted))
      .ok_or_else(|| CoreError::Validation(format!("Unknown delivery type '{}'", wanted)))
  }
}

/// Raw order submission as it arrives from the public order form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderDraft {
  pub full_name: String,
  pub phone: String,
  pub email: Option<String>,
  pub pickup_address: String,
  pub drop_address: String,
  pub parcel_type: String,
  pub delivery_type: Option<String>,
  pub message: Option<String>,
  pub voice_note_url: Option<String>,
}

impl OrderDraft {
  /// Checks required fields and converts the free-form draft into typed details.
  pub fn validate(self) -> CoreResult<OrderDetails> {
    let full_name = required(self.full_name, "fullName")?;
    let phone = required(self.phone, "phone")?;
    let pickup_address = required(self.pickup_address, "pickupAddress")?;
    let drop_address = required(self.drop_address, "dropAddress")?;
    let parcel_type = required(self.parcel_type, "parcelType")?.parse::<ParcelType>()?;
    let delivery_type = match non_blank(self.delivery_type) {
      Some(raw) => raw.parse::<DeliveryType>()?,
      None => DeliveryType::default(),
    };

    Ok(OrderDetails {
      full_name,
      phone,
      email: non_blank(self.email),
      pickup_address,
      drop_address,
      parcel_type,
      delivery_type,
      message: non_blank(self.message),
      voice_note_url: non_blank(self.voice_note_url),
    })
  }
}

/// Validated, immutable customer-supplied part of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
  pub full_name: String,
  pub phone: String,
  pub email: Option<String>,
  pub pickup_address: String,
  pub drop_address: String,
  pub parcel_type: ParcelType,
  pub delivery_type: DeliveryType,
  pub message: Option<String>,
  pub voice_note_url: Option<String>,
}

/// One entry of the append-only status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusChange {
  pub status: OrderStatus,
  pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub id: OrderId,
  pub tracking_id: TrackingId,
  #[serde(flatten)]
  pub details: OrderDetails,
  pub status: OrderStatus,
  pub rejection_reason: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub status_history: Vec<StatusChange>,
}

impl Order {
  pub fn new(id: OrderId, tracking_id: TrackingId, details: OrderDetails, created_at: DateTime<Utc>) -> Self {
    Order {
      id,
      tracking_id,
      details,
      status: OrderStatus::Pending,
      rejection_reason: None,
      created_at,
      updated_at: created_at,
      status_history: vec![StatusChange {
        status: OrderStatus::Pending,
        at: created_at,
      }],
    }
  }

  /// Moves the record to `status`, keeping `rejection_reason` in step with it.
  ///
  /// No validation happens here; callers go through the lifecycle.
  pub fn apply_status(&mut self, status: OrderStatus, rejection_reason: Option<String>, at: DateTime<Utc>) {
    self.status = status;
    self.rejection_reason = match status {
      OrderStatus::Rejected => rejection_reason,
      _ => None,
    };
    self.updated_at = at;
    self.status_history.push(StatusChange { status, at });
  }

  /// Timestamp at which the order first reached `status`, if it ever did.
  pub fn reached_at(&self, status: OrderStatus) -> Option<DateTime<Utc>> {
    self
      .status_history
      .iter()
      .find(|change| change.status == status)
      .map(|change| change.at)
  }
}

pub(crate) fn required(value: String, field: &str) -> CoreResult<String> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(CoreError::Validation(format!("{} is required", field)));
  }
  Ok(trimmed.to_string())
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn draft() -> OrderDraft {
    OrderDraft {
      full_name: "Ahmed".to_string(),
      phone: "03001234567".to_string(),
      pickup_address: "A".to_string(),
      drop_address: "B".to_string(),
      parcel_type: "Gift".to_string(),
      ..Default::default()
    }
  }

  #[test]
  fn status_round_trips_through_wire_names() {
    for status in OrderStatus::ALL {
      assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
    }
    assert!(matches!("in progress".parse::<OrderStatus>(), Err(CoreError::InvalidStatus(_))));
    assert!(matches!("Shipped".parse::<OrderStatus>(), Err(CoreError::InvalidStatus(_))));
  }

  #[test]
  fn validate_defaults_delivery_type_and_drops_blank_optionals() {
    let mut d = draft();
    d.email = Some("   ".to_string());
    d.message = Some("Handle with care".to_string());
    let details = d.validate().unwrap();
    assert_eq!(details.delivery_type, DeliveryType::Normal);
    assert_eq!(details.parcel_type, ParcelType::Gift);
    assert_eq!(details.email, None);
    assert_eq!(details.message.as_deref(), Some("Handle with care"));
  }

  #[test]
  fn validate_rejects_missing_required_fields() {
    let mut d = draft();
    d.pickup_address = " ".to_string();
    match d.validate() {
      Err(CoreError::Validation(m)) => assert!(m.contains("pickupAddress")),
      other => panic!("expected validation error, got {:?}", other),
    }

    let mut d = draft();
    d.parcel_type = "Furniture".to_string();
    assert!(matches!(d.validate(), Err(CoreError::Validation(_))));
  }

  #[test]
  fn same_day_delivery_parses() {
    let mut d = draft();
    d.delivery_type = Some("Same Day".to_string());
    assert_eq!(d.validate().unwrap().delivery_type, DeliveryType::SameDay);
  }
}
