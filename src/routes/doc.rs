use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::cart::{
        AddItemRequest, ClearCartRequest, MergeGuestCartRequest, RemoveItemRequest,
        UpdateItemQuantityRequest,
    },
    models::{Cart, CartItem},
    response::ApiResponse,
    routes::{cart, health},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        cart::get_cart,
        cart::open_guest_cart,
        cart::add_item,
        cart::remove_item,
        cart::update_item_quantity,
        cart::clear_cart,
        cart::merge_guest_cart
    ),
    components(
        schemas(
            Cart,
            CartItem,
            AddItemRequest,
            RemoveItemRequest,
            UpdateItemQuantityRequest,
            ClearCartRequest,
            MergeGuestCartRequest,
            health::HealthData,
            ApiResponse<Cart>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Cart", description = "Cart endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
