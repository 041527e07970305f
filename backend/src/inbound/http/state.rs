//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on the domain services and the token port, and remain testable with
//! fixture adapters behind them.

use std::sync::Arc;

use crate::domain::ports::TokenIssuer;
use crate::domain::{AuthService, InventoryService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Signup/login/refresh use-cases.
    pub auth: Arc<AuthService>,
    /// Item CRUD with the cache contract.
    pub inventory: Arc<InventoryService>,
    /// Token verification for the bearer extractor.
    pub tokens: Arc<dyn TokenIssuer>,
}

impl HttpState {
    /// Bundle the services and token port for handler injection.
    pub fn new(
        auth: Arc<AuthService>,
        inventory: Arc<InventoryService>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            auth,
            inventory,
            tokens,
        }
    }
}
