use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which side of the marketplace a user acts on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Customer,
    Vendor,
}

/// Resolved identity of the acting user.
///
/// Resolution (session, token, local cache) happens outside this service;
/// requests carry the already-resolved record.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub user_type: UserType,
    pub company: Option<String>,
}

impl User {
    pub fn is_customer(&self) -> bool {
        self.user_type == UserType::Customer
    }

    pub fn is_vendor(&self) -> bool {
        self.user_type == UserType::Vendor
    }

    /// The name vendors are matched by throughout the RFQ flow: their
    /// company name, falling back to the personal name when unset.
    pub fn vendor_name(&self) -> &str {
        self.company.as_deref().unwrap_or(&self.name)
    }
}
