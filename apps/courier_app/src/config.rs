// apps/courier_app/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use rof_core::DispatcherConfig;
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub app_base_url: String,

  // Single admin account
  pub admin_username: String,
  pub admin_password: String,
  pub admin_secret: String,
  pub admin_email: Option<String>,

  // Mock mail transport
  pub mail_sender: String,

  // Order handling
  pub allow_reject_after_accept: bool,
  pub notify_timeout_ms: u64,
  pub notify_queue_capacity: usize,
  pub default_page_size: usize,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 8080,
      app_base_url: "http://127.0.0.1:8080".to_string(),
      admin_username: "admin".to_string(),
      admin_password: "Rider2024!".to_string(),
      admin_secret: "admin-secret-2024".to_string(),
      admin_email: None,
      mail_sender: "noreply@rideroffaisalabad.pk".to_string(),
      allow_reject_after_accept: true,
      notify_timeout_ms: 5_000,
      notify_queue_capacity: 256,
      default_page_size: rof_core::query::DEFAULT_PAGE_SIZE,
    }
  }
}

fn parse_env<T>(var_name: &str, default: T) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match env::var(var_name) {
    Ok(raw) => raw
      .trim()
      .parse::<T>()
      .map_err(|e| AppError::Config(format!("Invalid {} value '{}': {}", var_name, raw, e))),
    Err(_) => Ok(default),
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    let defaults = Self::default();

    let get_env = |var_name: &str| env::var(var_name).ok().filter(|v| !v.trim().is_empty());

    let server_host = get_env("SERVER_HOST").unwrap_or(defaults.server_host);
    let server_port = parse_env("SERVER_PORT", defaults.server_port)?;
    let app_base_url = get_env("APP_BASE_URL").unwrap_or_else(|| format!("http://{}:{}", server_host, server_port));

    let admin_username = get_env("ADMIN_USERNAME").unwrap_or(defaults.admin_username);
    let admin_password = get_env("ADMIN_PASSWORD").unwrap_or(defaults.admin_password);
    let admin_secret = get_env("ADMIN_SECRET").unwrap_or(defaults.admin_secret);
    let admin_email = get_env("ADMIN_EMAIL");
    let mail_sender = get_env("MAIL_SENDER").unwrap_or(defaults.mail_sender);

    let allow_reject_after_accept = parse_env("ALLOW_REJECT_AFTER_ACCEPT", defaults.allow_reject_after_accept)?;
    let notify_timeout_ms = parse_env("NOTIFY_TIMEOUT_MS", defaults.notify_timeout_ms)?;
    let notify_queue_capacity = parse_env("NOTIFY_QUEUE_CAPACITY", defaults.notify_queue_capacity)?;
    let default_page_size = parse_env("DEFAULT_PAGE_SIZE", defaults.default_page_size)?;

    if notify_queue_capacity == 0 {
      return Err(AppError::Config("NOTIFY_QUEUE_CAPACITY must be at least 1".to_string()));
    }
    if default_page_size == 0 {
      return Err(AppError::Config("DEFAULT_PAGE_SIZE must be at least 1".to_string()));
    }

    tracing::info!(%server_host, server_port, allow_reject_after_accept, "Application configuration loaded successfully.");
    // Admin password and secret are never logged.

    Ok(Self {
      server_host,
      server_port,
      app_base_url,
      admin_username,
      admin_password,
      admin_secret,
      admin_email,
      mail_sender,
      allow_reject_after_accept,
      notify_timeout_ms,
      notify_queue_capacity,
      default_page_size,
    })
  }

  pub fn dispatcher_config(&self) -> DispatcherConfig {
    DispatcherConfig {
      queue_capacity: self.notify_queue_capacity,
      send_timeout: Duration::from_millis(self.notify_timeout_ms),
    }
  }

  pub fn tracking_link(&self, tracking_id: &str) -> String {
    format!("{}/track-order?id={}", self.app_base_url.trim_end_matches('/'), tracking_id)
  }
}
