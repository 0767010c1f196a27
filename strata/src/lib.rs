//! Generic data-access layer for PostgreSQL-backed entities.
//!
//! This crate implements the repository pattern over SQLx: any persisted type
//! gains create, read-by-id, read-first, and read-all operations against a
//! Postgres table without rewriting query logic per entity. It is deliberately
//! not a storage engine: durability, indexing, and transaction semantics all
//! belong to the database, reached through SQLx's query builder.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Callers    │  (own the connection / transaction)
//! └──────┬───────┘
//!        │
//!        ↓
//! ┌──────────────┐
//! │ Repository   │  (generic operations, query construction)
//! └──────┬───────┘
//!        │
//!        ↓
//! ┌──────────────┐
//! │   Entities   │  (row structs + schema projections)
//! └──────┬───────┘
//!        │
//!        ↓
//! ┌──────────────┐
//! │  PostgreSQL  │
//! └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`repository`]: the [`Repository`] contract and its SQLx implementation
//! - [`entity`]: the [`Entity`] contract persisted types implement
//! - [`filter`]: column predicates for the read operations
//! - [`values`]: field-value mappings for inserts
//! - [`errors`]: database-specific error types
//!
//! # Example Usage
//!
//! ```ignore
//! use strata::{Filter, Repository, SqlxRepository, Values};
//!
//! async fn example(pool: &sqlx::PgPool) -> strata::Result<()> {
//!     let mut conn = pool.acquire().await?;
//!     let mut widgets = SqlxRepository::<Widget>::new(&mut conn);
//!
//!     // Insert a row; the unit of work commits before this returns
//!     let widget = widgets.create_one(&Values::new().set("name", "bolt")).await?;
//!
//!     // Reads return Option / Vec, never a not-found error
//!     let found = widgets.get_by_id(widget.id).await?;
//!     let bolts = widgets.get_all(&[Filter::eq("name", "bolt")]).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Sessions
//!
//! Repositories never open or close connections. The caller owns the session
//! (a pooled connection or an open transaction) and the repository borrows it
//! for the duration of its calls. To group repository calls with other work
//! atomically, pass the connection of a transaction you control:
//!
//! ```ignore
//! let mut tx = pool.begin().await?;
//! let mut repo = SqlxRepository::<Widget>::new(&mut tx);
//! // ... operations ...
//! tx.commit().await?;
//! ```

pub mod entity;
pub mod errors;
pub mod filter;
pub mod repository;
pub mod values;

pub use entity::Entity;
pub use errors::{DbError, Result};
pub use filter::{Filter, Value};
pub use repository::{Repository, SqlxRepository};
pub use values::Values;
