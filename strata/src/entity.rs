//! Entity contract for repository-managed types.

use sqlx::Postgres;
use sqlx::postgres::PgRow;

/// The minimum capability a persisted type must provide to participate in the
/// repository abstraction.
///
/// Implementors are plain row structs decoded via `sqlx::FromRow`. Each entity
/// names its table, exposes its unique identifier, and projects itself into an
/// immutable external representation, the [`Schema`](Entity::Schema), which
/// is the only shape repository operations hand back to callers.
///
/// # Example
///
/// ```ignore
/// #[derive(sqlx::FromRow)]
/// struct Widget {
///     id: Uuid,
///     name: String,
/// }
///
/// impl Entity for Widget {
///     type Id = Uuid;
///     type Schema = WidgetSchema;
///
///     const TABLE: &'static str = "widgets";
///
///     fn id(&self) -> Uuid {
///         self.id
///     }
///
///     fn to_schema(&self) -> WidgetSchema {
///         WidgetSchema { id: self.id, name: self.name.clone() }
///     }
/// }
/// ```
pub trait Entity: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin + 'static {
    /// The identifier type: an integer, string, or UUID primary key.
    type Id: for<'q> sqlx::Encode<'q, Postgres> + sqlx::Type<Postgres> + std::fmt::Debug + Send + Sync + 'static;

    /// Immutable external projection of this entity's fields.
    type Schema: Send;

    /// Table this entity is persisted in.
    const TABLE: &'static str;

    /// Identifier column, `"id"` unless overridden.
    const ID_COLUMN: &'static str = "id";

    /// The entity's unique identifier.
    fn id(&self) -> Self::Id;

    /// Project the entity into its external representation.
    ///
    /// Infallible: a decoded row always has every field populated.
    fn to_schema(&self) -> Self::Schema;
}
