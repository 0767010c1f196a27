//! Repository contract and its PostgreSQL implementation.

use std::marker::PhantomData;

use sqlx::{Connection, PgConnection, Postgres, QueryBuilder};
use tracing::instrument;

use crate::entity::Entity;
use crate::errors::Result;
use crate::filter::Filter;
use crate::values::Values;

/// The generic operations every concrete repository supports.
///
/// The session handle is captured by the implementing type rather than passed
/// per call, which keeps the trait agnostic of the underlying store. Missing
/// rows are reported as `Ok(None)` or an empty collection, never as errors;
/// store failures propagate unchanged as [`DbError`](crate::errors::DbError).
#[async_trait::async_trait]
pub trait Repository {
    /// The entity type this repository is bound to
    type Entity: Entity;

    /// Insert one row from a field-value mapping and return its schema.
    ///
    /// The unit of work commits before this returns; this is the durability
    /// point, the only operation with a side effect, and the only one that
    /// is not idempotent.
    async fn create_one(&mut self, data: &Values) -> Result<<Self::Entity as Entity>::Schema>;

    /// Fetch one row by identifier.
    async fn get_by_id(&mut self, id: <Self::Entity as Entity>::Id) -> Result<Option<<Self::Entity as Entity>::Schema>>;

    /// Fetch the first row satisfying every filter, in store-default order.
    async fn get_first(&mut self, filters: &[Filter]) -> Result<Option<<Self::Entity as Entity>::Schema>>;

    /// Fetch every row satisfying every filter.
    async fn get_all(&mut self, filters: &[Filter]) -> Result<Vec<<Self::Entity as Entity>::Schema>>;
}

/// PostgreSQL repository, implemented once over the generic query builder and
/// bound to one entity type at construction.
///
/// Borrows the caller's connection (a pooled connection or the connection of
/// an open transaction) and never opens or closes sessions of its own.
pub struct SqlxRepository<'c, E> {
    db: &'c mut PgConnection,
    _entity: PhantomData<E>,
}

impl<'c, E: Entity> SqlxRepository<'c, E> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

#[async_trait::async_trait]
impl<'c, E: Entity> Repository for SqlxRepository<'c, E> {
    type Entity = E;

    #[instrument(skip(self, data), fields(table = E::TABLE, columns = data.len()), err)]
    async fn create_one(&mut self, data: &Values) -> Result<E::Schema> {
        let mut query = insert_query::<E>(data);

        let mut tx = self.db.begin().await?;
        let row: E = query.build_query_as().fetch_one(&mut *tx).await?;
        tx.commit().await?;

        Ok(row.to_schema())
    }

    #[instrument(skip(self, id), fields(table = E::TABLE, id = ?id), err)]
    async fn get_by_id(&mut self, id: E::Id) -> Result<Option<E::Schema>> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM ");
        query.push(E::TABLE);
        query.push(" WHERE ");
        query.push(E::ID_COLUMN);
        query.push(" = ");
        query.push_bind(id);

        let row: Option<E> = query.build_query_as().fetch_optional(&mut *self.db).await?;

        Ok(row.map(|entity| entity.to_schema()))
    }

    #[instrument(skip(self, filters), fields(table = E::TABLE, filters = filters.len()), err)]
    async fn get_first(&mut self, filters: &[Filter]) -> Result<Option<E::Schema>> {
        let mut query = select_query::<E>(filters);
        query.push(" LIMIT 1");

        let row: Option<E> = query.build_query_as().fetch_optional(&mut *self.db).await?;

        Ok(row.map(|entity| entity.to_schema()))
    }

    #[instrument(skip(self, filters), fields(table = E::TABLE, filters = filters.len()), err)]
    async fn get_all(&mut self, filters: &[Filter]) -> Result<Vec<E::Schema>> {
        let mut query = select_query::<E>(filters);

        let rows: Vec<E> = query.build_query_as().fetch_all(&mut *self.db).await?;

        Ok(rows.iter().map(Entity::to_schema).collect())
    }
}

/// Base select over the entity's table, with every filter joined by `AND`.
/// No filters leaves the base query unmodified.
fn select_query<E: Entity>(filters: &[Filter]) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new("SELECT * FROM ");
    query.push(E::TABLE);

    for (i, filter) in filters.iter().enumerate() {
        query.push(if i == 0 { " WHERE " } else { " AND " });
        filter.push(&mut query);
    }

    query
}

/// `INSERT ... RETURNING *` from a field-value mapping. An empty mapping
/// inserts a row from column defaults alone.
fn insert_query<E: Entity>(data: &Values) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new("INSERT INTO ");
    query.push(E::TABLE);

    if data.is_empty() {
        query.push(" DEFAULT VALUES");
    } else {
        query.push(" (");
        for (i, (column, _)) in data.iter().enumerate() {
            if i > 0 {
                query.push(", ");
            }
            query.push(*column);
        }
        query.push(") VALUES (");
        for (i, (_, value)) in data.iter().enumerate() {
            if i > 0 {
                query.push(", ");
            }
            value.push(&mut query);
        }
        query.push(")");
    }

    query.push(" RETURNING *");
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Value;

    #[derive(Debug, sqlx::FromRow)]
    struct Gadget {
        id: i64,
        #[allow(dead_code)]
        label: String,
    }

    impl Entity for Gadget {
        type Id = i64;
        type Schema = ();

        const TABLE: &'static str = "gadgets";

        fn id(&self) -> i64 {
            self.id
        }

        fn to_schema(&self) -> Self::Schema {}
    }

    #[test]
    fn test_select_without_filters_is_the_base_query() {
        let query = select_query::<Gadget>(&[]);
        assert_eq!(query.sql(), "SELECT * FROM gadgets");
    }

    #[test]
    fn test_select_joins_filters_with_and() {
        let filters = [Filter::eq("label", "bolt"), Filter::gt("id", 3i64)];
        let query = select_query::<Gadget>(&filters);
        assert_eq!(query.sql(), "SELECT * FROM gadgets WHERE label = $1 AND id > $2");
    }

    #[test]
    fn test_select_single_filter_has_no_and() {
        let filters = [Filter::eq("label", "bolt")];
        let query = select_query::<Gadget>(&filters);
        assert_eq!(query.sql(), "SELECT * FROM gadgets WHERE label = $1");
    }

    #[test]
    fn test_select_null_test_binds_nothing() {
        let filters = [Filter::is_null("label"), Filter::eq("id", 7i64)];
        let query = select_query::<Gadget>(&filters);
        assert_eq!(query.sql(), "SELECT * FROM gadgets WHERE label IS NULL AND id = $1");
    }

    #[test]
    fn test_insert_lists_columns_in_mapping_order() {
        let data = Values::new().set("label", "bolt").set("id", 7i64);
        let query = insert_query::<Gadget>(&data);
        assert_eq!(query.sql(), "INSERT INTO gadgets (label, id) VALUES ($1, $2) RETURNING *");
    }

    #[test]
    fn test_insert_empty_mapping_uses_defaults() {
        let query = insert_query::<Gadget>(&Values::new());
        assert_eq!(query.sql(), "INSERT INTO gadgets DEFAULT VALUES RETURNING *");
    }

    #[test]
    fn test_insert_renders_explicit_null_literally() {
        let data = Values::new().set("label", Value::Null);
        let query = insert_query::<Gadget>(&data);
        assert_eq!(query.sql(), "INSERT INTO gadgets (label) VALUES (NULL) RETURNING *");
    }
}
