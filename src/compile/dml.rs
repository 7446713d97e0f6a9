use super::{built_from, push_limit, push_order_by, push_quoted, push_where, Dialect};
use crate::error::SqlForgeError;
use crate::query::{BuiltQuery, Delete, Insert, Update};

impl Update {
    /// Compile for dialect `D`. SET placeholders precede the WHERE ones;
    /// `placeholders.set` records how many.
    ///
    /// # Errors
    /// Returns `SqlForgeError::InvalidQuery` for an empty column list or a
    /// query with joins.
    pub fn build<D: Dialect>(&self) -> Result<BuiltQuery, SqlForgeError> {
        if self.columns.is_empty() {
            return Err(SqlForgeError::InvalidQuery(
                "UPDATE needs at least one column to set".to_string(),
            ));
        }
        if !self.query.joins.is_empty() {
            return Err(SqlForgeError::InvalidQuery(
                "UPDATE does not accept joins".to_string(),
            ));
        }

        let mut sql = String::from("UPDATE ");
        push_quoted::<D>(&mut sql, &self.query.table.name);
        sql.push_str(" SET ");
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            push_quoted::<D>(&mut sql, column);
            sql.push_str(" = ?");
        }

        push_where::<D>(&mut sql, &self.query);
        push_order_by::<D>(&mut sql, &self.query);
        push_limit(&mut sql, &self.query);

        Ok(built_from(&self.query, sql, self.columns.len()))
    }
}

impl Insert {
    /// Compile for dialect `D`.
    ///
    /// # Errors
    /// Returns `SqlForgeError::InvalidQuery` for a zero row count or a
    /// multi-row insert without columns.
    pub fn build<D: Dialect>(&self) -> Result<BuiltQuery, SqlForgeError> {
        if self.rows == 0 {
            return Err(SqlForgeError::InvalidQuery(
                "INSERT needs at least one row".to_string(),
            ));
        }
        if self.columns.is_empty() && self.rows > 1 {
            return Err(SqlForgeError::InvalidQuery(
                "multi-row INSERT needs an explicit column list".to_string(),
            ));
        }

        let mut sql = String::from("INSERT INTO ");
        push_quoted::<D>(&mut sql, &self.table.name);

        if self.columns.is_empty() {
            sql.push_str(" DEFAULT VALUES");
            return Ok(BuiltQuery {
                sql,
                placeholders: Default::default(),
                presets: Default::default(),
            });
        }

        sql.push_str(" (");
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            push_quoted::<D>(&mut sql, column);
        }
        sql.push_str(") VALUES ");
        for row in 0..self.rows {
            if row > 0 {
                sql.push_str(", ");
            }
            sql.push('(');
            for i in 0..self.columns.len() {
                if i > 0 {
                    sql.push(',');
                }
                sql.push('?');
            }
            sql.push(')');
        }

        Ok(BuiltQuery {
            sql,
            placeholders: crate::query::Placeholders {
                set: self.columns.len() * self.rows,
                ..Default::default()
            },
            presets: Default::default(),
        })
    }
}

impl Delete {
    /// Compile for dialect `D`.
    ///
    /// # Errors
    /// Returns `SqlForgeError::InvalidQuery` if the query carries joins.
    pub fn build<D: Dialect>(&self) -> Result<BuiltQuery, SqlForgeError> {
        if !self.query.joins.is_empty() {
            return Err(SqlForgeError::InvalidQuery(
                "DELETE does not accept joins".to_string(),
            ));
        }

        let mut sql = String::from("DELETE FROM ");
        push_quoted::<D>(&mut sql, &self.query.table.name);

        push_where::<D>(&mut sql, &self.query);
        push_order_by::<D>(&mut sql, &self.query);
        push_limit(&mut sql, &self.query);

        Ok(built_from(&self.query, sql, 0))
    }
}
