//! The signed-in user.

use serde::{Deserialize, Serialize};

/// The identity an entitlement belongs to.
///
/// The email keys the local cache; the account id keys the remote document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// User email address.
    pub email: String,
    /// Remote account identifier.
    pub account_id: String,
}

impl Principal {
    /// Create a principal.
    pub fn new(email: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            account_id: account_id.into(),
        }
    }
}
