// apps/courier_app/src/services/email_mock.rs

//! Stand-in for the SMTP relay: logs each message and hands back a receipt.

use crate::errors::{AppError, Result as AppResult};
use crate::services::mailer::OutgoingEmail;
use tracing::{info, warn};

/// What the relay reports for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailReceipt {
  pub message_id: String,
}

pub async fn send_mock_email(from: &str, email: &OutgoingEmail) -> AppResult<MailReceipt> {
  info!(to = %email.to, %from, subject = %email.subject, body_len = email.html_body.len(), "Simulating sending email.");
  tokio::time::sleep(std::time::Duration::from_millis(20)).await; // Simulate network latency

  // A subject containing "fail_test" makes the relay refuse the message.
  if email.subject.to_lowercase().contains("fail_test") {
    warn!(subject = %email.subject, "Simulated email failure.");
    return Err(AppError::Internal("Simulated email send failure".to_string()));
  }

  Ok(MailReceipt {
    message_id: format!("mock_email_{}", uuid::Uuid::new_v4()),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn email(subject: &str) -> OutgoingEmail {
    OutgoingEmail {
      to: "ops@rideroffaisalabad.pk".to_string(),
      subject: subject.to_string(),
      html_body: "<p>hello</p>".to_string(),
    }
  }

  #[tokio::test]
  async fn accepted_message_gets_a_receipt() {
    let receipt = send_mock_email("noreply@rideroffaisalabad.pk", &email("New Order Alert"))
      .await
      .unwrap();
    assert!(receipt.message_id.starts_with("mock_email_"));
  }

  #[tokio::test]
  async fn fail_test_subject_is_refused() {
    let result = send_mock_email("noreply@rideroffaisalabad.pk", &email("FAIL_TEST order")).await;
    assert!(matches!(result, Err(AppError::Internal(_))));
  }
}
