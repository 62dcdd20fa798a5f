use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account classification on the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Provider,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Provider => "provider",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(Self::Customer),
            "provider" => Ok(Self::Provider),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

/// The authenticated user as known to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl User {
    pub const fn new(id: i64) -> Self {
        Self {
            id,
            email: None,
            role: None,
        }
    }

    /// Name shown in the status bar.
    pub fn label(&self) -> String {
        self.email
            .clone()
            .unwrap_or_else(|| format!("user #{}", self.id))
    }
}
