//! Storefront user type.

use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::UserId;
use super::status::UserRole;

/// A storefront user.
///
/// Orders copy the customer's contact details from the checkout form, so a
/// `User` is only referenced by ID after checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    /// Whether this user may open the admin order views.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
