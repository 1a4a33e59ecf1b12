use serde::{Deserialize, Serialize};

/// The authenticated account, as returned by credential verification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AccountProfile {
    /// Platform user identifier.
    pub id: String,
    /// Handle without the leading `@`.
    pub username: String,
    pub display_name: String,
    pub followers: u64,
    pub following: u64,
    /// Total number of items the account has published.
    pub total_items: u64,
}
