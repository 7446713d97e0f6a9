use crate::driver::Connection;
use crate::error::SqlForgeError;
use crate::exec::{execute_built, fetch_one};
use crate::query::{col, table, Cmp, JoinKind};
use crate::value::DbValue;

use super::{join_table_name, Entity, PreCollection};

/// Entity lifecycle and relations over one driver connection.
///
/// The manager owns the connection; [`EntityManager::connection`] hands it
/// out for work beside the mapper (DDL, transactions).
pub struct EntityManager<C: Connection> {
    conn: C,
}

impl<C: Connection> EntityManager<C> {
    #[must_use]
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    pub fn connection(&mut self) -> &mut C {
        &mut self.conn
    }

    #[must_use]
    pub fn into_connection(self) -> C {
        self.conn
    }

    /// Fetch the entity with the given id, if present.
    ///
    /// # Errors
    /// Compilation, execution, or row-mapping errors.
    pub fn get<T: Entity>(&mut self, id: u64) -> Result<Option<T>, SqlForgeError> {
        let built = table(T::table())
            .query()
            .and_where_set("id", Cmp::Eq, id)
            .select_cols(T::columns().iter().copied())
            .build::<C::Dialect>()?;
        let row = fetch_one(&mut self.conn, &built, &[])?;
        row.map(|r| T::from_row(&r)).transpose()
    }

    /// Insert if the entity was never stored (`id == 0`), update otherwise.
    /// After an insert the fresh id is written back.
    ///
    /// # Errors
    /// Compilation or execution errors.
    pub fn save<T: Entity>(&mut self, entity: &mut T) -> Result<(), SqlForgeError> {
        if entity.id() == 0 {
            let id = self.store(entity)?;
            entity.set_id(id);
            Ok(())
        } else {
            self.update(entity)
        }
    }

    /// Insert unconditionally and return the generated id.
    ///
    /// # Errors
    /// Compilation or execution errors.
    pub fn store<T: Entity>(&mut self, entity: &T) -> Result<u64, SqlForgeError> {
        let (columns, values) = data_parts(entity);
        let built = table(T::table()).insert(columns).build::<C::Dialect>()?;
        execute_built(&mut self.conn, &built, &values)?;
        self.conn.last_insert_id()?.get_as()
    }

    /// Overwrite the stored row of an already-saved entity.
    ///
    /// # Errors
    /// `InvalidQuery` when the entity was never stored; otherwise
    /// compilation or execution errors.
    pub fn update<T: Entity>(&mut self, entity: &T) -> Result<(), SqlForgeError> {
        if entity.id() == 0 {
            return Err(SqlForgeError::InvalidQuery(format!(
                "cannot update a {} that was never stored",
                T::table()
            )));
        }
        let (columns, values) = data_parts(entity);
        let built = table(T::table())
            .query()
            .and_where_set("id", Cmp::Eq, entity.id())
            .update(columns)
            .build::<C::Dialect>()?;
        execute_built(&mut self.conn, &built, &values)
    }

    /// Delete the row backing `entity`.
    ///
    /// # Errors
    /// Compilation or execution errors.
    pub fn remove<T: Entity>(&mut self, entity: &T) -> Result<(), SqlForgeError> {
        self.remove_by_id::<T>(entity.id())
    }

    /// Delete by primary key.
    ///
    /// # Errors
    /// Compilation or execution errors.
    pub fn remove_by_id<T: Entity>(&mut self, id: u64) -> Result<(), SqlForgeError> {
        let built = table(T::table())
            .query()
            .and_where_set("id", Cmp::Eq, id)
            .delete()
            .build::<C::Dialect>()?;
        execute_built(&mut self.conn, &built, &[])
    }

    /// Start an entity-typed query over `T`'s table.
    #[must_use]
    pub fn find<T: Entity>(&self) -> PreCollection<T> {
        PreCollection::new()
    }

    /// Follow a to-one relation: the `many` side carries a
    /// `<one-table>_id` column holding the one side's id. A zero id maps
    /// to `None`.
    ///
    /// # Errors
    /// `InvalidQuery` when the foreign-key column is missing; otherwise
    /// compilation, execution, or mapping errors.
    pub fn many_to_one<One: Entity, Many: Entity>(
        &mut self,
        many: &Many,
    ) -> Result<Option<One>, SqlForgeError> {
        let fk = format!("{}_id", One::table());
        let value = many.field(&fk).ok_or_else(|| {
            SqlForgeError::InvalidQuery(format!("{} has no column {fk}", Many::table()))
        })?;
        let id: u64 = value.get_as()?;
        if id == 0 {
            return Ok(None);
        }
        self.get(id)
    }

    /// Alias of [`EntityManager::many_to_one`]; for a one-to-one relation
    /// which side owns the foreign key is the caller's choice.
    ///
    /// # Errors
    /// Same as [`EntityManager::many_to_one`].
    pub fn one_to_one<One: Entity, Other: Entity>(
        &mut self,
        other: &Other,
    ) -> Result<Option<One>, SqlForgeError> {
        self.many_to_one(other)
    }

    /// Follow a to-many relation: every `Many` row whose
    /// `<one-table>_id` equals `one.id`.
    #[must_use]
    pub fn one_to_many<Many: Entity, One: Entity>(&self, one: &One) -> PreCollection<Many> {
        let fk = format!("{}_id", One::table());
        let query = table(Many::table())
            .query()
            .and_where_set(fk, Cmp::Eq, one.id());
        PreCollection::from_query(query, false)
    }

    /// Follow a many-to-many relation through its join table.
    #[must_use]
    pub fn many_to_many<Target: Entity, Source: Entity>(
        &self,
        source: &Source,
    ) -> PreCollection<Target> {
        let join_name = join_table_name(&Source::table(), &Target::table());
        let join_table = table(join_name);
        let target_table = table(Target::table());
        let query = join_table
            .clone()
            .query()
            .join(
                JoinKind::Inner,
                col(&target_table, "id"),
                col(&join_table, format!("{}_id", Target::table())),
            )
            .and_where_set(
                col(&join_table, format!("{}_id", Source::table())),
                Cmp::Eq,
                source.id(),
            );
        PreCollection::from_query(query, true)
    }

    /// Link `a` and `b` in their join table.
    ///
    /// # Errors
    /// Compilation or execution errors (including a duplicate link if the
    /// join table has a uniqueness constraint).
    pub fn many_to_many_assign<A: Entity, B: Entity>(
        &mut self,
        a: &A,
        b: &B,
    ) -> Result<(), SqlForgeError> {
        let built = table(join_table_name(&A::table(), &B::table()))
            .insert([format!("{}_id", A::table()), format!("{}_id", B::table())])
            .build::<C::Dialect>()?;
        execute_built(
            &mut self.conn,
            &built,
            &[DbValue::UInt64(a.id()), DbValue::UInt64(b.id())],
        )
    }

    /// Remove the link between `a` and `b`, if any.
    ///
    /// # Errors
    /// Compilation or execution errors.
    pub fn many_to_many_unassign<A: Entity, B: Entity>(
        &mut self,
        a: &A,
        b: &B,
    ) -> Result<(), SqlForgeError> {
        let built = table(join_table_name(&A::table(), &B::table()))
            .query()
            .and_where_set(format!("{}_id", A::table()), Cmp::Eq, a.id())
            .and_where_set(format!("{}_id", B::table()), Cmp::Eq, b.id())
            .delete()
            .build::<C::Dialect>()?;
        execute_built(&mut self.conn, &built, &[])
    }
}

/// Columns and values of everything but the primary key, in mapping order.
fn data_parts<T: Entity>(entity: &T) -> (Vec<&'static str>, Vec<DbValue>) {
    let mut columns = Vec::new();
    let mut values = Vec::new();
    for (column, value) in T::columns().iter().zip(entity.values()) {
        if *column != "id" {
            columns.push(*column);
            values.push(value);
        }
    }
    (columns, values)
}
