//! SMTP notification settings. Held in memory only; no mail is ever sent.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// How long a simulated test send takes.
pub const TEST_SEND_DELAY: Duration = Duration::from_millis(1500);

fn default_smtp_port() -> String { "587".to_owned() }

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
  #[serde(default)]
  pub enabled:      bool,
  #[serde(default)]
  pub sender_email: String,
  #[serde(default)]
  pub password:     String,
  #[serde(default)]
  pub smtp_server:  String,
  #[serde(default = "default_smtp_port")]
  pub smtp_port:    String,
}

impl Default for NotificationSettings {
  fn default() -> Self {
    Self {
      enabled:      false,
      sender_email: String::new(),
      password:     String::new(),
      smtp_server:  String::new(),
      smtp_port:    default_smtp_port(),
    }
  }
}

impl std::fmt::Debug for NotificationSettings {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("NotificationSettings")
      .field("enabled", &self.enabled)
      .field("sender_email", &self.sender_email)
      .field("password", &"[REDACTED]")
      .field("smtp_server", &self.smtp_server)
      .field("smtp_port", &self.smtp_port)
      .finish()
  }
}

impl NotificationSettings {
  /// A copy safe to hand back to clients: the password is blanked.
  pub fn redacted(&self) -> Self {
    Self { password: String::new(), ..self.clone() }
  }

  /// A test send needs every connection field filled in.
  pub fn check_ready_for_test(&self) -> Result<()> {
    let fields = [
      &self.sender_email,
      &self.password,
      &self.smtp_server,
      &self.smtp_port,
    ];
    if fields.iter().any(|f| f.trim().is_empty()) {
      return Err(Error::IncompleteMailSettings);
    }
    Ok(())
  }

  /// Message reported after a (simulated) successful test send.
  pub fn test_sent_message(&self) -> String {
    format!("A test email has been sent to {}.", self.sender_email)
  }
}
