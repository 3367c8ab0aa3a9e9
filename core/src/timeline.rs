// core/src/timeline.rs

//! Public tracking view: the four-step delivery progression, or a rejection
//! notice for orders that were turned down.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Order, OrderStatus};

/// Step labels in progression order, each paired with the status that completes it.
pub const TIMELINE_STEPS: [(&str, OrderStatus); 4] = [
  ("Order Placed", OrderStatus::Pending),
  ("Order Accepted", OrderStatus::Accepted),
  ("In Transit", OrderStatus::InProgress),
  ("Delivered", OrderStatus::Delivered),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineStep {
  pub step: &'static str,
  pub time: Option<DateTime<Utc>>,
  pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Timeline {
  Progress { steps: Vec<TimelineStep> },
  #[serde(rename_all = "camelCase")]
  Rejected {
    reason: Option<String>,
    rejected_at: Option<DateTime<Utc>>,
  },
}

impl Timeline {
  pub fn is_rejected(&self) -> bool {
    matches!(self, Timeline::Rejected { .. })
  }

  pub fn steps(&self) -> &[TimelineStep] {
    match self {
      Timeline::Progress { steps } => steps,
      Timeline::Rejected { .. } => &[],
    }
  }
}

/// Projects an order's status history onto the tracking timeline.
///
/// Timestamps come from the recorded history, so the same order always
/// renders the same timeline.
pub fn build_timeline(order: &Order) -> Timeline {
  let Some(current) = order.status.progression_index() else {
    return Timeline::Rejected {
      reason: order.rejection_reason.clone(),
      rejected_at: order.reached_at(OrderStatus::Rejected),
    };
  };

  let steps = TIMELINE_STEPS
    .iter()
    .enumerate()
    .map(|(index, (label, status))| {
      let done = index <= current;
      let time = match (done, index) {
        (false, _) => None,
        (true, 0) => Some(order.created_at),
        (true, _) => order.reached_at(*status),
      };
      TimelineStep { step: *label, time, done }
    })
    .collect();

  Timeline::Progress { steps }
}

/// What the public tracking page receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedOrder {
  #[serde(flatten)]
  pub order: Order,
  pub estimated_time: &'static str,
  pub timeline: Timeline,
}

impl TrackedOrder {
  pub fn from_order(order: Order) -> Self {
    let timeline = build_timeline(&order);
    let estimated_time = match order.status {
      OrderStatus::Delivered => "Delivered",
      _ => "Calculating...",
    };
    Self {
      order,
      estimated_time,
      timeline,
    }
  }
}
