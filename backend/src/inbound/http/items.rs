//! Inventory API handlers.
//!
//! ```text
//! GET    /items       list (cached)
//! POST   /items       create
//! GET    /items/{id}  fetch one (cached)
//! PUT    /items/{id}  full-record update
//! DELETE /items/{id}  remove
//! ```
//!
//! Every route requires a bearer access token.

use actix_web::{delete, get, post, put, web, HttpResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Item, ItemDraft, ItemId, ItemValidationError};
use crate::inbound::http::auth::BearerIdentity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{field_error, missing_field_error};
use crate::inbound::http::ApiResult;

/// Item payload for `POST /items` and `PUT /items/{id}`.
///
/// Updates are full-record: every field is validated on each write. A missing
/// quantity defaults to zero; price is required.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: i64,
    /// Decimal amount, accepted as a string (e.g. `"9.99"`) or number.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "9.99")]
    pub price: Option<Decimal>,
}

impl ItemPayload {
    fn into_draft(self) -> Result<ItemDraft, Error> {
        let price = self.price.ok_or_else(|| missing_field_error("price"))?;
        ItemDraft::try_from_parts(self.name, self.quantity, price)
            .map_err(map_item_validation_error)
    }
}

/// Acknowledgement for `DELETE /items/{id}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    /// Human-readable confirmation.
    pub message: String,
}

fn map_item_validation_error(err: ItemValidationError) -> Error {
    let message = err.to_string();
    match err {
        ItemValidationError::EmptyName => field_error(message, "name", "empty_name"),
        ItemValidationError::NameTooLong { .. } => field_error(message, "name", "too_long"),
        ItemValidationError::NegativeQuantity => field_error(message, "quantity", "negative"),
        ItemValidationError::QuantityTooLarge { .. } => {
            field_error(message, "quantity", "too_large")
        }
        ItemValidationError::NegativePrice => field_error(message, "price", "negative"),
        ItemValidationError::PriceTooPrecise { .. } => {
            field_error(message, "price", "too_precise")
        }
        ItemValidationError::PriceTooLarge { .. } => field_error(message, "price", "too_large"),
        ItemValidationError::InvalidId => Error::invalid_request(message),
    }
}

/// An id that is not a UUID cannot name an item, so it reads as absent
/// rather than malformed.
fn parse_item_id(raw: &str) -> Result<ItemId, Error> {
    ItemId::new(raw).map_err(|_| Error::not_found("Item not found"))
}

/// List every item.
#[utoipa::path(
    get,
    path = "/items",
    responses(
        (status = 200, description = "All items", body = [Item]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["items"],
    operation_id = "listItems",
    security(("BearerAuth" = []))
)]
#[get("/items")]
pub async fn list_items(
    _identity: BearerIdentity,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Item>>> {
    let items = state.inventory.list().await?;
    Ok(web::Json(items))
}

/// Create an item.
#[utoipa::path(
    post,
    path = "/items",
    request_body = ItemPayload,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error)
    ),
    tags = ["items"],
    operation_id = "createItem",
    security(("BearerAuth" = []))
)]
#[post("/items")]
pub async fn create_item(
    _identity: BearerIdentity,
    state: web::Data<HttpState>,
    payload: web::Json<ItemPayload>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_draft()?;
    let item = state.inventory.create(draft).await?;
    Ok(HttpResponse::Created().json(item))
}

/// Fetch a single item.
#[utoipa::path(
    get,
    path = "/items/{id}",
    params(("id" = String, Path, description = "Item identifier")),
    responses(
        (status = 200, description = "The item", body = Item),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "Unknown item", body = Error)
    ),
    tags = ["items"],
    operation_id = "getItem",
    security(("BearerAuth" = []))
)]
#[get("/items/{id}")]
pub async fn get_item(
    _identity: BearerIdentity,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Item>> {
    let id = parse_item_id(&path.into_inner())?;
    let item = state.inventory.get(&id).await?;
    Ok(web::Json(item))
}

/// Replace an item's fields.
#[utoipa::path(
    put,
    path = "/items/{id}",
    params(("id" = String, Path, description = "Item identifier")),
    request_body = ItemPayload,
    responses(
        (status = 200, description = "Updated item", body = Item),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "Unknown item", body = Error)
    ),
    tags = ["items"],
    operation_id = "updateItem",
    security(("BearerAuth" = []))
)]
#[put("/items/{id}")]
pub async fn update_item(
    _identity: BearerIdentity,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ItemPayload>,
) -> ApiResult<web::Json<Item>> {
    let id = parse_item_id(&path.into_inner())?;
    let draft = payload.into_inner().into_draft()?;
    let item = state.inventory.update(&id, draft).await?;
    Ok(web::Json(item))
}

/// Delete an item.
#[utoipa::path(
    delete,
    path = "/items/{id}",
    params(("id" = String, Path, description = "Item identifier")),
    responses(
        (status = 200, description = "Item deleted", body = DeleteResponse),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "Unknown item", body = Error),
        (status = 500, description = "Deletion failure", body = Error)
    ),
    tags = ["items"],
    operation_id = "deleteItem",
    security(("BearerAuth" = []))
)]
#[delete("/items/{id}")]
pub async fn delete_item(
    _identity: BearerIdentity,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteResponse>> {
    let id = parse_item_id(&path.into_inner())?;
    state.inventory.delete(&id).await?;
    Ok(web::Json(DeleteResponse {
        message: "Item deleted".to_owned(),
    }))
}
