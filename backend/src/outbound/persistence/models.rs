//! Diesel row types and their mapping to domain aggregates.
//!
//! Rows revalidate through the domain constructors on the way out, so a
//! corrupt stored record surfaces as a query error instead of producing an
//! invalid aggregate.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::ports::{ItemPersistenceError, UserPersistenceError};
use crate::domain::user::{
    EmailAddress, NewUser, PasswordHashString, PersonName, Role, User, UserId, Username,
};
use crate::domain::Item;

use super::schema::{items, users};

/// Queryable row for user accounts.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    #[expect(dead_code, reason = "selected for completeness; not part of the aggregate")]
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn into_domain(self) -> Result<User, UserPersistenceError> {
        let invalid =
            |what: &str, detail: String| UserPersistenceError::query(format!(
                "stored user record invalid ({what}): {detail}"
            ));
        let record = NewUser {
            username: Username::new(self.username)
                .map_err(|err| invalid("username", err.to_string()))?,
            email: EmailAddress::new(self.email)
                .map_err(|err| invalid("email", err.to_string()))?,
            role: Role::parse(&self.role).map_err(|err| invalid("role", err.to_string()))?,
            first_name: PersonName::first(self.first_name)
                .map_err(|err| invalid("first_name", err.to_string()))?,
            last_name: PersonName::last(self.last_name)
                .map_err(|err| invalid("last_name", err.to_string()))?,
            password_hash: PasswordHashString::new(self.password_hash),
        };
        Ok(User::new(UserId::from_uuid(self.id), record))
    }
}

/// Insertable row for a new user account.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Queryable row for inventory items.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ItemRow {
    pub id: Uuid,
    pub name: String,
    pub quantity: i64,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ItemRow {
    pub(crate) fn into_domain(self) -> Result<Item, ItemPersistenceError> {
        Item::try_from_stored(
            self.id,
            self.name,
            self.quantity,
            self.price,
            self.created_at,
            self.updated_at,
        )
        .map_err(|err| {
            ItemPersistenceError::query(format!("stored item record invalid: {err}"))
        })
    }
}

/// Insertable row for a new item.
#[derive(Debug, Insertable)]
#[diesel(table_name = items)]
pub(crate) struct NewItemRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub quantity: i64,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset replacing an item's mutable fields and refreshing `updated_at`.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = items)]
pub(crate) struct ItemChangeset<'a> {
    pub name: &'a str,
    pub quantity: i64,
    pub price: Decimal,
    pub updated_at: DateTime<Utc>,
}
