//! # Repository Module
//!
//! Ledger Store repositories.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Till Session Manager                                                  │
//! │       │                                                                 │
//! │       │  db.sessions().current_open_session()                          │
//! │       │  db.sales().record_sale(&sale, now)                            │
//! │       ▼                                                                 │
//! │  SessionRepository             SaleRepository                          │
//! │  ├── open_session(at)          ├── record_sale(sale, at)               │
//! │  ├── close_session(id, at)     ├── aggregate(kind, period)             │
//! │  ├── current_open_session()    ├── get_by_id(id)                       │
//! │  ├── get_by_id(id)             └── recent(limit)                       │
//! │  ├── last_closed()                                                      │
//! │  └── recent(limit)                                                      │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SaleRepository`](sale::SaleRepository) - Sale inserts and aggregates
//! - [`SessionRepository`](session::SessionRepository) - Till session lifecycle

pub mod sale;
pub mod session;
