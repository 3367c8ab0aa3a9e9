// apps/courier_app/src/services/mailer.rs

//! Turns order and contact events into emails for the admin mailbox and
//! the customer.

use async_trait::async_trait;
use rof_core::{NotificationEvent, Notifier, Order};
use std::sync::Arc;
use tracing::{debug, instrument};

use super::email_mock::send_mock_email;
use crate::config::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
  pub to: String,
  pub subject: String,
  pub html_body: String,
}

pub struct EmailNotifier {
  config: Arc<AppConfig>,
}

impl EmailNotifier {
  pub fn new(config: Arc<AppConfig>) -> Self {
    Self { config }
  }

  /// The emails an event produces. Empty when nobody has an address.
  pub fn compose(&self, event: &NotificationEvent) -> Vec<OutgoingEmail> {
    let mut out = Vec::new();
    match event {
      NotificationEvent::OrderPlaced(order) => {
        if let Some(admin) = &self.config.admin_email {
          out.push(OutgoingEmail {
            to: admin.clone(),
            subject: format!("New Order Alert: {}", order.tracking_id),
            html_body: self.admin_order_body(order),
          });
        }
        self.push_customer(
          &mut out,
          order,
          format!("Your Order is Received: {}", order.tracking_id),
          format!(
            "<p>Dear <strong>{}</strong>,</p><p>We have received your delivery request. Our team will contact you \
             with rates and rider assignment within <strong>30 minutes</strong>.</p>",
            order.details.full_name
          ),
        );
      }
      NotificationEvent::OrderAccepted(order) => self.push_customer(
        &mut out,
        order,
        format!("Order Accepted: {}", order.tracking_id),
        format!(
          "<p>Dear <strong>{}</strong>,</p><p>Your order has been accepted and a rider will be assigned shortly.</p>",
          order.details.full_name
        ),
      ),
      NotificationEvent::OrderRejected { order, reason } => self.push_customer(
        &mut out,
        order,
        format!("Order Update: Not Accepted: {}", order.tracking_id),
        format!(
          "<p>Dear <strong>{}</strong>,</p><p>Unfortunately we could not accept your order.</p>\
           <p><strong>Reason:</strong> {}</p>",
          order.details.full_name, reason
        ),
      ),
      NotificationEvent::OrderDelivered(order) => self.push_customer(
        &mut out,
        order,
        format!("Parcel Delivered! {}", order.tracking_id),
        format!(
          "<p>Dear <strong>{}</strong>,</p><p>Your parcel has been delivered to {}.</p>",
          order.details.full_name, order.details.drop_address
        ),
      ),
      NotificationEvent::ContactReceived(inquiry) => {
        if let Some(admin) = &self.config.admin_email {
          out.push(OutgoingEmail {
            to: admin.clone(),
            subject: format!("Contact Form: {}", inquiry.subject),
            html_body: format!(
              "<h3>New Contact Message</h3><p><strong>Name:</strong> {}</p><p><strong>Email:</strong> {}</p>\
               <p><strong>Phone:</strong> {}</p><blockquote>{}</blockquote>",
              inquiry.name,
              inquiry.email.as_deref().unwrap_or("N/A"),
              inquiry.phone.as_deref().unwrap_or("N/A"),
              inquiry.message
            ),
          });
        }
      }
    }
    out
  }

  fn push_customer(&self, out: &mut Vec<OutgoingEmail>, order: &Order, subject: String, intro: String) {
    let Some(email) = &order.details.email else {
      return;
    };
    let link = self.config.tracking_link(order.tracking_id.as_str());
    out.push(OutgoingEmail {
      to: email.clone(),
      subject,
      html_body: format!(
        "{}<p><strong>Tracking ID:</strong> {}</p><p><a href=\"{}\">Track Your Order Live</a></p>",
        intro, order.tracking_id, link
      ),
    });
  }

  fn admin_order_body(&self, order: &Order) -> String {
    let d = &order.details;
    format!(
      "<h2>New Delivery Request</h2><p><strong>Tracking ID:</strong> {}</p><p><strong>Customer:</strong> {}</p>\
       <p><strong>Phone:</strong> {}</p><p><strong>Pickup:</strong> {}</p><p><strong>Drop:</strong> {}</p>\
       <p><strong>Parcel:</strong> {} ({})</p><p><strong>Message:</strong> {}</p>\
       <p><a href=\"{}/dashboard\">Open Admin Dashboard</a></p>",
      order.tracking_id,
      d.full_name,
      d.phone,
      d.pickup_address,
      d.drop_address,
      d.parcel_type,
      d.delivery_type,
      d.message.as_deref().unwrap_or("No instructions"),
      self.config.app_base_url.trim_end_matches('/'),
    )
  }
}

#[async_trait]
impl Notifier for EmailNotifier {
  #[instrument(name = "EmailNotifier::notify", skip_all, fields(kind = event.kind(), message_ids = tracing::field::Empty))]
  async fn notify(&self, event: &NotificationEvent) -> anyhow::Result<()> {
    let emails = self.compose(event);
    if emails.is_empty() {
      debug!("No recipients for event.");
      return Ok(());
    }
    let mut message_ids = Vec::with_capacity(emails.len());
    for email in &emails {
      let receipt = send_mock_email(&self.config.mail_sender, email).await?;
      debug!(to = %email.to, message_id = %receipt.message_id, "Email accepted by relay.");
      message_ids.push(receipt.message_id);
    }
    tracing::Span::current().record("message_ids", message_ids.join(",").as_str());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rof_core::{ContactDraft, ContactInquiry, OrderDraft, OrderStore};

  fn notifier(admin_email: Option<&str>) -> EmailNotifier {
    EmailNotifier::new(Arc::new(AppConfig {
      admin_email: admin_email.map(str::to_string),
      app_base_url: "https://rideroffaisalabad.pk".to_string(),
      ..AppConfig::default()
    }))
  }

  fn order(email: Option<&str>) -> Order {
    OrderStore::in_memory()
      .create(OrderDraft {
        full_name: "Ayesha".into(),
        phone: "03001234567".into(),
        email: email.map(str::to_string),
        pickup_address: "Ghulam Muhammad Abad".into(),
        drop_address: "Satiana Road".into(),
        parcel_type: "Electronics".into(),
        ..Default::default()
      })
      .unwrap()
  }

  #[test]
  fn placed_order_alerts_admin_and_confirms_to_customer() {
    let order = order(Some("ayesha@example.com"));
    let emails = notifier(Some("ops@rideroffaisalabad.pk")).compose(&NotificationEvent::OrderPlaced(order.clone()));
    assert_eq!(emails.len(), 2);
    assert_eq!(emails[0].to, "ops@rideroffaisalabad.pk");
    assert!(emails[0].subject.contains(order.tracking_id.as_str()));
    assert_eq!(emails[1].to, "ayesha@example.com");
    let link = format!("https://rideroffaisalabad.pk/track-order?id={}", order.tracking_id);
    assert!(emails[1].html_body.contains(&link));
  }

  #[test]
  fn customer_without_email_gets_nothing() {
    let order = order(None);
    let n = notifier(None);
    for event in [
      NotificationEvent::OrderPlaced(order.clone()),
      NotificationEvent::OrderAccepted(order.clone()),
      NotificationEvent::OrderDelivered(order.clone()),
    ] {
      assert!(n.compose(&event).is_empty());
    }
  }

  #[test]
  fn rejection_email_carries_the_reason() {
    let order = order(Some("ayesha@example.com"));
    let emails = notifier(None).compose(&NotificationEvent::OrderRejected {
      order,
      reason: "Outside coverage".into(),
    });
    assert_eq!(emails.len(), 1);
    assert!(emails[0].html_body.contains("Outside coverage"));
  }

  #[test]
  fn contact_goes_to_admin_only() {
    let inquiry = ContactInquiry::from_draft(
      ContactDraft {
        name: "Bilal".into(),
        message: "Do you deliver to Jhang?".into(),
        ..Default::default()
      },
      chrono::Utc::now(),
    )
    .unwrap();
    let emails = notifier(Some("ops@rideroffaisalabad.pk")).compose(&NotificationEvent::ContactReceived(inquiry));
    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0].subject, "Contact Form: New Message");
    assert!(emails[0].html_body.contains("N/A"));
  }

  #[tokio::test]
  async fn notify_sends_through_the_mock_transport() {
    let order = order(Some("ayesha@example.com"));
    let n = notifier(Some("ops@rideroffaisalabad.pk"));
    n.notify(&NotificationEvent::OrderAccepted(order)).await.unwrap();
  }

  #[tokio::test]
  async fn relay_refusal_surfaces_as_notifier_error() {
    let inquiry = ContactInquiry::from_draft(
      ContactDraft {
        name: "Bilal".into(),
        message: "hi".into(),
        subject: Some("fail_test".into()),
        ..Default::default()
      },
      chrono::Utc::now(),
    )
    .unwrap();
    let admin = notifier(Some("ops@rideroffaisalabad.pk"));
    assert!(admin.notify(&NotificationEvent::ContactReceived(inquiry)).await.is_err());
  }
}
