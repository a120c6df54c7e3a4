//! Shared application state.
//!
//! ```text
//! AppState (Clone, one per router)
//!   ├── db        ── SQLite pool (products, users)
//!   ├── catalog   ── Arc<InMemoryCatalog>        ◄─┐ loaded at startup
//!   ├── users     ── Arc<InMemoryUserDirectory>  ◄─┘ registration writes through
//!   ├── ledger    ── Arc<CartLedger>             (process lifetime only)
//!   ├── engine    ── CartEngine     (shares the three Arcs above)
//!   └── checkout  ── CheckoutCalculator
//! ```

use std::sync::Arc;

use tracing::info;

use bazaar_core::{
    CartEngine, CartLedger, CheckoutCalculator, InMemoryCatalog, InMemoryUserDirectory,
};
use bazaar_db::{Database, DbError, DbResult};

pub type Engine = CartEngine<InMemoryCatalog, InMemoryUserDirectory>;
pub type Checkout = CheckoutCalculator<InMemoryCatalog, InMemoryUserDirectory>;

#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub catalog: Arc<InMemoryCatalog>,
    pub users: Arc<InMemoryUserDirectory>,
    pub ledger: Arc<CartLedger>,
    pub engine: Engine,
    pub checkout: Checkout,
}

impl AppState {
    /// Builds the state with empty in-memory stores.
    pub fn new(db: Database) -> Self {
        let catalog = Arc::new(InMemoryCatalog::new());
        let users = Arc::new(InMemoryUserDirectory::new());
        let ledger = Arc::new(CartLedger::new());

        let engine = CartEngine::new(catalog.clone(), users.clone(), ledger.clone());
        let checkout = CheckoutCalculator::new(catalog.clone(), users.clone(), ledger.clone());

        AppState {
            db,
            catalog,
            users,
            ledger,
            engine,
            checkout,
        }
    }

    /// Builds the state and fills the catalog and user directory from the
    /// record store.
    ///
    /// A stored product the catalog refuses fails with `DbError::Validation`.
    pub async fn load(db: Database) -> DbResult<Self> {
        let state = AppState::new(db);

        let products = state.db.products().list_all().await?;
        let product_count = products.len();
        for product in products {
            state.catalog.upsert(product)?;
        }

        let users = state.db.users().list_all().await?;
        let user_count = users.len();
        for user in users {
            // The unique indexes make a clash here a corrupted store.
            state
                .users
                .insert(user)
                .map_err(|e| DbError::Internal(e.to_string()))?;
        }

        info!(products = product_count, users = user_count, "Loaded record store");
        Ok(state)
    }
}
