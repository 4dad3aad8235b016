use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::cart::{
        AddItemRequest, ClearCartRequest, MergeGuestCartRequest, RemoveItemRequest,
        UpdateItemQuantityRequest, require_id,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::Cart,
    response::ApiResponse,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/guest", post(open_guest_cart))
        .route("/add", post(add_item))
        .route("/remove", post(remove_item))
        .route("/update", post(update_item_quantity))
        .route("/clear", post(clear_cart))
        .route("/merge", post(merge_guest_cart))
        .route("/{user_id}", get(get_cart))
}

#[utoipa::path(
    get,
    path = "/api/cart/{user_id}",
    params(
        ("user_id" = String, Path, description = "User or guest id")
    ),
    responses(
        (status = 200, description = "Cart for the user, created empty if missing", body = ApiResponse<Cart>),
        (status = 400, description = "Blank user id"),
    ),
    tag = "Cart"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let user_id = require_id("userId", &user_id)?;
    let cart = state.carts.get_cart(user_id).await?;
    Ok(Json(ApiResponse::success("OK", cart)))
}

#[utoipa::path(
    post,
    path = "/api/cart/guest",
    responses(
        (status = 200, description = "Empty cart under a new guest id", body = ApiResponse<Cart>)
    ),
    tag = "Cart"
)]
pub async fn open_guest_cart(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Cart>>> {
    let cart = state.carts.open_guest_cart().await?;
    Ok(Json(ApiResponse::success("Guest cart created", cart)))
}

#[utoipa::path(
    post,
    path = "/api/cart/add",
    request_body = AddItemRequest,
    responses(
        (status = 200, description = "Item added, quantities accumulate", body = ApiResponse<Cart>),
        (status = 400, description = "Bad request"),
    ),
    tag = "Cart"
)]
pub async fn add_item(
    State(state): State<AppState>,
    Json(payload): Json<AddItemRequest>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let user_id = require_id("userId", &payload.user_id)?;
    let product_id = require_id("productId", &payload.product_id)?;
    let cart = state
        .carts
        .add_item(user_id, product_id, payload.quantity)
        .await?;
    Ok(Json(ApiResponse::success("OK", cart)))
}

#[utoipa::path(
    post,
    path = "/api/cart/remove",
    request_body = RemoveItemRequest,
    responses(
        (status = 200, description = "Item removed; unknown items are ignored", body = ApiResponse<Cart>),
        (status = 400, description = "Bad request"),
    ),
    tag = "Cart"
)]
pub async fn remove_item(
    State(state): State<AppState>,
    Json(payload): Json<RemoveItemRequest>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let user_id = require_id("userId", &payload.user_id)?;
    let product_id = require_id("productId", &payload.product_id)?;
    let cart = state.carts.remove_item(user_id, product_id).await?;
    Ok(Json(ApiResponse::success("Removed from cart", cart)))
}

#[utoipa::path(
    post,
    path = "/api/cart/update",
    request_body = UpdateItemQuantityRequest,
    responses(
        (status = 200, description = "Quantity replaced, or item removed when zero or less", body = ApiResponse<Cart>),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Item not in cart"),
    ),
    tag = "Cart"
)]
pub async fn update_item_quantity(
    State(state): State<AppState>,
    Json(payload): Json<UpdateItemQuantityRequest>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let user_id = require_id("userId", &payload.user_id)?;
    let product_id = require_id("productId", &payload.product_id)?;
    let cart = state
        .carts
        .update_item_quantity(user_id, product_id, payload.quantity)
        .await?;
    Ok(Json(ApiResponse::success("Updated", cart)))
}

#[utoipa::path(
    post,
    path = "/api/cart/clear",
    request_body = ClearCartRequest,
    responses(
        (status = 200, description = "Cart emptied", body = ApiResponse<Cart>),
        (status = 400, description = "Bad request"),
    ),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    Json(payload): Json<ClearCartRequest>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let user_id = require_id("userId", &payload.user_id)?;
    let cart = state.carts.clear_cart(user_id).await?;
    Ok(Json(ApiResponse::success("Cart cleared", cart)))
}

#[utoipa::path(
    post,
    path = "/api/cart/merge",
    request_body = MergeGuestCartRequest,
    responses(
        (status = 200, description = "Guest cart merged into the caller's cart", body = ApiResponse<Cart>),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn merge_guest_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<MergeGuestCartRequest>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let guest_id = require_id("guestId", &payload.guest_id)?;
    let cart = state
        .carts
        .merge_guest_cart(guest_id, &user.user_id)
        .await?;
    Ok(Json(ApiResponse::success("Guest cart merged", cart)))
}
