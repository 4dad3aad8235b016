use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub user_id: String,
    pub product_id: String,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemRequest {
    pub user_id: String,
    pub product_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemQuantityRequest {
    pub user_id: String,
    pub product_id: String,
    /// New quantity; zero or less removes the item.
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClearCartRequest {
    pub user_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MergeGuestCartRequest {
    pub guest_id: String,
}

/// Rejects blank identifiers before they reach the store. Ids are opaque keys,
/// so a non-blank value is passed through exactly as sent.
pub fn require_id<'a>(field: &str, value: &'a str) -> AppResult<&'a str> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_id_keeps_value_and_rejects_blank() {
        assert_eq!(require_id("userId", "u1").ok(), Some("u1"));
        assert_eq!(require_id("userId", " u1").ok(), Some(" u1"));
        assert!(matches!(
            require_id("userId", "   "),
            Err(AppError::BadRequest(msg)) if msg == "userId is required"
        ));
    }

    #[test]
    fn add_item_request_uses_camel_case() {
        let req: AddItemRequest = serde_json::from_value(serde_json::json!({
            "userId": "u1",
            "productId": "shoe-42",
            "quantity": 2
        }))
        .expect("deserialize");
        assert_eq!(req.user_id, "u1");
        assert_eq!(req.product_id, "shoe-42");
        assert_eq!(req.quantity, 2);
    }
}
