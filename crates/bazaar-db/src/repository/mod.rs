//! # Repository Module
//!
//! Database repository implementations for Bazaar.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  API handler / startup                                                  │
//! │       │                                                                 │
//! │       │  db.products().list_all()                                       │
//! │       ▼                                                                 │
//! │  ProductRepository                UserRepository                        │
//! │  ├── list_all()                   ├── insert(new_user)                  │
//! │  ├── upsert(product)              ├── find_credentials_by_email(email)  │
//! │  └── count()                      └── list_all()                        │
//! │       │                                                                 │
//! │       │  SQL Query → row struct (FromRow) → bazaar-core type            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Row structs stay private to each repository; callers only ever see
//! `bazaar_core` types. The one exception is [`user::UserCredentials`],
//! which carries the password hash and exists only for login.

pub mod product;
pub mod user;
