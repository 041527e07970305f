//! Inventory item model.
//!
//! Items are the cached resource: their serialized form is what the cache
//! layer stores, so the aggregate carries its serde contract (camelCase,
//! price as a decimal string, RFC 3339 timestamps) alongside the validation
//! rules.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by the item constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    InvalidId,
    EmptyName,
    NameTooLong { max: usize },
    NegativeQuantity,
    QuantityTooLarge { max: u32 },
    NegativePrice,
    PriceTooPrecise { max_scale: u32 },
    PriceTooLarge { max_digits: u32 },
}

impl fmt::Display for ItemValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "item id must be a valid UUID"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::NegativeQuantity => write!(f, "quantity must not be negative"),
            Self::QuantityTooLarge { max } => write!(f, "quantity must be at most {max}"),
            Self::NegativePrice => write!(f, "price must not be negative"),
            Self::PriceTooPrecise { max_scale } => {
                write!(f, "price must have at most {max_scale} decimal places")
            }
            Self::PriceTooLarge { max_digits } => {
                write!(f, "price must have at most {max_digits} digits")
            }
        }
    }
}

impl std::error::Error for ItemValidationError {}

/// Stable item identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(Uuid);

impl ItemId {
    /// Validate and construct an [`ItemId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ItemValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| ItemValidationError::InvalidId)
    }

    /// Wrap an already-parsed UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ItemId> for String {
    fn from(value: ItemId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for ItemId {
    type Error = ItemValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Maximum allowed length for an item name.
pub const ITEM_NAME_MAX: usize = 100;

/// Item display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemName(String);

impl ItemName {
    /// Validate and construct an [`ItemName`].
    pub fn new(name: impl Into<String>) -> Result<Self, ItemValidationError> {
        Self::from_owned(name.into())
    }

    fn from_owned(name: String) -> Result<Self, ItemValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ItemValidationError::EmptyName);
        }
        if trimmed.chars().count() > ITEM_NAME_MAX {
            return Err(ItemValidationError::NameTooLong { max: ITEM_NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ItemName> for String {
    fn from(value: ItemName) -> Self {
        value.0
    }
}

impl TryFrom<String> for ItemName {
    type Error = ItemValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Stock quantity: a non-negative integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// Validate and construct a [`Quantity`] from a possibly-negative count.
    pub fn new(count: i64) -> Result<Self, ItemValidationError> {
        if count < 0 {
            return Err(ItemValidationError::NegativeQuantity);
        }
        u32::try_from(count)
            .map(Self)
            .map_err(|_| ItemValidationError::QuantityTooLarge { max: u32::MAX })
    }

    /// The count as an unsigned integer.
    pub fn count(self) -> u32 {
        self.0
    }
}

impl From<Quantity> for u32 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl TryFrom<i64> for Quantity {
    type Error = ItemValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Maximum number of fractional digits accepted in a price.
pub const PRICE_MAX_SCALE: u32 = 2;
/// Maximum total digits accepted in a price.
pub const PRICE_MAX_DIGITS: u32 = 10;

/// Unit price: a non-negative fixed-point decimal with at most
/// [`PRICE_MAX_SCALE`] fractional digits, serialized as a string
/// (e.g. `"9.99"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Validate and construct a [`Price`].
    pub fn new(amount: Decimal) -> Result<Self, ItemValidationError> {
        if amount.is_sign_negative() {
            return Err(ItemValidationError::NegativePrice);
        }
        let normalized = amount.normalize();
        if normalized.scale() > PRICE_MAX_SCALE {
            return Err(ItemValidationError::PriceTooPrecise {
                max_scale: PRICE_MAX_SCALE,
            });
        }
        // max_digits 10 with 2 fractional digits caps the integral part at 10^8.
        let limit = Decimal::from(100_000_000_u64);
        if normalized >= limit {
            return Err(ItemValidationError::PriceTooLarge {
                max_digits: PRICE_MAX_DIGITS,
            });
        }
        Ok(Self(normalized))
    }

    /// The amount as a decimal.
    pub fn amount(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Price> for Decimal {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = ItemValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated mutable fields of an item, used for both create and update
/// (updates are full-record, not partial).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: ItemName,
    pub quantity: Quantity,
    pub price: Price,
}

impl ItemDraft {
    /// Validate raw payload fields into a draft.
    pub fn try_from_parts(
        name: impl Into<String>,
        quantity: i64,
        price: Decimal,
    ) -> Result<Self, ItemValidationError> {
        Ok(Self {
            name: ItemName::new(name)?,
            quantity: Quantity::new(quantity)?,
            price: Price::new(price)?,
        })
    }
}

/// Stored inventory item.
///
/// ## Serialisation contract
/// camelCase keys; `price` as a decimal string; timestamps in RFC 3339. This
/// exact form is what the cache layer persists, so changing it invalidates
/// cached payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "ItemDto", into = "ItemDto")]
pub struct Item {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: ItemId,
    #[schema(value_type = String, example = "Widget")]
    name: ItemName,
    #[schema(value_type = u32, example = 5)]
    quantity: Quantity,
    #[schema(value_type = String, example = "9.99")]
    price: Price,
    #[schema(value_type = String, format = DateTime)]
    created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    updated_at: DateTime<Utc>,
}

impl Item {
    /// Assemble a stored item from validated components.
    pub fn new(
        id: ItemId,
        draft: ItemDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let ItemDraft {
            name,
            quantity,
            price,
        } = draft;
        Self {
            id,
            name,
            quantity,
            price,
            created_at,
            updated_at,
        }
    }

    /// Rebuild an item from raw stored values, revalidating each field.
    ///
    /// Persistence adapters use this when mapping rows back to the domain so
    /// corrupt stored data surfaces as an error instead of a bad aggregate.
    pub fn try_from_stored(
        id: Uuid,
        name: String,
        quantity: i64,
        price: Decimal,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ItemValidationError> {
        let draft = ItemDraft::try_from_parts(name, quantity, price)?;
        Ok(Self::new(ItemId::from_uuid(id), draft, created_at, updated_at))
    }

    /// Stable item identifier.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &ItemName {
        &self.name
    }

    /// Stock quantity.
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Unit price.
    pub fn price(&self) -> Price {
        self.price
    }

    /// Creation timestamp, set once by the store.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last-mutation timestamp, refreshed by the store on every write.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemDto {
    id: String,
    name: String,
    quantity: i64,
    price: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<Item> for ItemDto {
    fn from(value: Item) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.into(),
            quantity: i64::from(value.quantity.count()),
            price: value.price.amount(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl TryFrom<ItemDto> for Item {
    type Error = ItemValidationError;

    fn try_from(value: ItemDto) -> Result<Self, Self::Error> {
        let ItemDto {
            id,
            name,
            quantity,
            price,
            created_at,
            updated_at,
        } = value;
        let draft = ItemDraft::try_from_parts(name, quantity, price)?;
        Ok(Self::new(ItemId::new(id)?, draft, created_at, updated_at))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn dec(value: &str) -> Decimal {
        value.parse().expect("valid decimal literal")
    }

    fn sample_item() -> Item {
        let draft = ItemDraft::try_from_parts("Widget", 5, dec("9.99")).expect("valid draft");
        let created = "2024-05-01T12:00:00Z".parse().expect("valid timestamp");
        Item::new(ItemId::random(), draft, created, created)
    }

    #[rstest]
    #[case("", ItemValidationError::EmptyName)]
    #[case("   ", ItemValidationError::EmptyName)]
    fn name_rejects_blank(#[case] value: &str, #[case] expected: ItemValidationError) {
        let err = ItemName::new(value).expect_err("blank name must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn name_rejects_overlong_input() {
        let err = ItemName::new("x".repeat(ITEM_NAME_MAX + 1)).expect_err("overlong");
        assert_eq!(err, ItemValidationError::NameTooLong { max: ITEM_NAME_MAX });
    }

    #[rstest]
    #[case(-1)]
    #[case(i64::MIN)]
    fn quantity_rejects_negative(#[case] value: i64) {
        let err = Quantity::new(value).expect_err("negative quantity must fail");
        assert_eq!(err, ItemValidationError::NegativeQuantity);
    }

    #[test]
    fn quantity_rejects_values_beyond_u32() {
        let err = Quantity::new(i64::from(u32::MAX) + 1).expect_err("too large");
        assert_eq!(err, ItemValidationError::QuantityTooLarge { max: u32::MAX });
    }

    #[rstest]
    #[case(0)]
    #[case(5)]
    fn quantity_accepts_non_negative(#[case] value: i64) {
        assert_eq!(Quantity::new(value).expect("valid quantity").count() as i64, value);
    }

    #[test]
    fn price_rejects_negative_amounts() {
        let err = Price::new(dec("-0.01")).expect_err("negative price must fail");
        assert_eq!(err, ItemValidationError::NegativePrice);
    }

    #[test]
    fn price_rejects_excess_scale() {
        let err = Price::new(dec("1.999")).expect_err("three decimal places must fail");
        assert_eq!(
            err,
            ItemValidationError::PriceTooPrecise {
                max_scale: PRICE_MAX_SCALE
            }
        );
    }

    #[test]
    fn price_rejects_amounts_beyond_digit_budget() {
        let err = Price::new(dec("100000000.00")).expect_err("too many digits");
        assert_eq!(
            err,
            ItemValidationError::PriceTooLarge {
                max_digits: PRICE_MAX_DIGITS
            }
        );
    }

    #[rstest]
    #[case("0")]
    #[case("9.99")]
    #[case("99999999.99")]
    fn price_accepts_valid_amounts(#[case] value: &str) {
        let amount: Decimal = value.parse().expect("valid decimal");
        let price = Price::new(amount).expect("valid price");
        assert_eq!(price.amount(), amount.normalize());
    }

    #[test]
    fn item_serializes_with_camel_case_and_string_price() {
        let item = sample_item();
        let json = serde_json::to_value(&item).expect("serializable item");
        assert_eq!(json["name"], "Widget");
        assert_eq!(json["quantity"], 5);
        assert_eq!(json["price"], "9.99");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn item_round_trips_through_json() {
        let item = sample_item();
        let json = serde_json::to_string(&item).expect("serializable item");
        let back: Item = serde_json::from_str(&json).expect("deserializable item");
        assert_eq!(back, item);
    }

    #[test]
    fn deserialization_rejects_negative_quantity() {
        let json = serde_json::json!({
            "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "name": "Widget",
            "quantity": -1,
            "price": "9.99",
            "createdAt": "2024-05-01T12:00:00Z",
            "updatedAt": "2024-05-01T12:00:00Z",
        });
        let result: Result<Item, _> = serde_json::from_value(json);
        assert!(result.is_err(), "negative quantity must not deserialize");
    }
}
