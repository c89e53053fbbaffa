//! # State Module
//!
//! Long-lived state the shell builds once at startup and hands to commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  main.rs                                                               │
//! │    let config = ConfigState::from_env();                               │
//! │    let db = open_database(&config).await?;                             │
//! │                              │                                          │
//! │          ┌───────────────────┴───────────────┐                         │
//! │          ▼                                   ▼                          │
//! │  ┌──────────────┐                   ┌──────────────────┐               │
//! │  │   DbState    │                   │   ConfigState    │               │
//! │  │              │                   │                  │               │
//! │  │  Database    │                   │  store_name      │               │
//! │  │  (SQLite     │                   │  currency        │               │
//! │  │   pool)      │                   │  low-stock line  │               │
//! │  └──────────────┘                   └──────────────────┘               │
//! │                                                                         │
//! │  Commands take `&DbState` and/or `&ConfigState`, only what they use.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;

pub use config::ConfigState;
pub use db::DbState;

#[cfg(test)]
pub(crate) use db::test_support;
