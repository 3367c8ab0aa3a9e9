// apps/courier_app/src/services/auth_service.rs

//! Admin authentication: password hashing and the bearer secret the
//! dashboard sends back on every admin request.

use crate::config::AppConfig;
use crate::errors::AppError;
use argon2::{
  password_hash::{
    rand_core::OsRng, // For generating random salts
    PasswordHash,
    PasswordHasher,
    PasswordVerifier,
    SaltString,
  },
  Argon2,
};
use tracing::{debug, error, info, instrument, warn};

/// Hashes a plain-text password using Argon2 with a fresh random salt.
#[instrument(name = "auth_service::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, AppError> {
  if password.is_empty() {
    error!("Password hashing failed: Password cannot be empty.");
    return Err(AppError::Config("Admin password cannot be empty.".to_string()));
  }

  let salt = SaltString::generate(&mut OsRng);
  match Argon2::default().hash_password(password.as_bytes(), &salt) {
    Ok(password_hash_obj) => {
      debug!("Password hashed successfully.");
      Ok(password_hash_obj.to_string())
    }
    Err(argon_err) => {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      Err(AppError::Internal(format!("Password hashing process failed: {}", argon_err)))
    }
  }
}

/// Verifies a plain-text password against a stored Argon2 hash.
///
/// Returns `Ok(false)` on a mismatch; `Err` only when the stored hash is
/// unusable or the verifier itself fails.
#[instrument(name = "auth_service::verify_password", skip(hashed_password_str, provided_password), err(Display), fields(hash_len = hashed_password_str.len()))]
pub fn verify_password(hashed_password_str: &str, provided_password: &str) -> Result<bool, AppError> {
  if provided_password.is_empty() {
    return Ok(false);
  }

  let parsed_hash = PasswordHash::new(hashed_password_str).map_err(|parse_err| {
    error!(error = %parse_err, "Failed to parse stored password hash string.");
    AppError::Internal(format!("Invalid stored password hash format: {}", parse_err))
  })?;

  match Argon2::default().verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => Ok(false),
    Err(other_argon_err) => {
      error!(error = %other_argon_err, "Argon2 password verification process encountered an error.");
      Err(AppError::Internal(format!(
        "Password verification process failed: {}",
        other_argon_err
      )))
    }
  }
}

/// The single configured admin account. Only the password hash is kept.
pub struct AdminAuth {
  username: String,
  password_hash: String,
  secret: String,
}

impl std::fmt::Debug for AdminAuth {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AdminAuth")
      .field("username", &self.username)
      .finish_non_exhaustive()
  }
}

impl AdminAuth {
  pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
    if config.admin_secret.trim().is_empty() {
      return Err(AppError::Config("ADMIN_SECRET cannot be empty.".to_string()));
    }
    Ok(Self {
      username: config.admin_username.clone(),
      password_hash: hash_password(&config.admin_password)?,
      secret: config.admin_secret.clone(),
    })
  }

  /// Exchanges the admin credentials for the bearer secret.
  #[instrument(name = "auth_service::login", skip(self, password), fields(req_username = %username))]
  pub fn login(&self, username: &str, password: &str) -> Result<&str, AppError> {
    // Always verify, so a wrong username costs the same as a wrong password.
    let password_ok = verify_password(&self.password_hash, password)?;
    if password_ok && username == self.username {
      info!("Admin login successful.");
      Ok(&self.secret)
    } else {
      warn!("Admin login rejected.");
      Err(AppError::Auth("Invalid credentials".to_string()))
    }
  }

  /// Checks an `Authorization` header value of the form `Bearer <secret>`.
  pub fn authorize(&self, header: Option<&str>) -> Result<(), AppError> {
    let token = header
      .and_then(|value| value.strip_prefix("Bearer "))
      .map(str::trim);
    match token {
      Some(token) if token == self.secret => Ok(()),
      _ => Err(AppError::Auth("Unauthorized".to_string())),
    }
  }
}
