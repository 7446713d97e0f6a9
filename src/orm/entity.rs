use crate::error::SqlForgeError;
use crate::row::Row;
use crate::value::DbValue;

/// A struct mapped to a single table.
///
/// Mapping is positional: column `i` of the table corresponds to entry
/// `i` of [`Entity::columns`] and [`Entity::values`]. The `id` column is
/// the unsigned 64-bit primary key; an id of `0` marks an entity that has
/// never been stored. Implementations normally come from the [`entity!`]
/// macro rather than being written by hand.
///
/// [`entity!`]: crate::entity
pub trait Entity: Sized {
    /// Table name: the type's simple name, lowercased.
    #[must_use]
    fn table() -> String {
        let full = std::any::type_name::<Self>();
        let simple = full.rsplit("::").next().unwrap_or(full);
        simple.to_lowercase()
    }

    /// Column names in field declaration order, lowercased.
    fn columns() -> &'static [&'static str];

    /// Primary key; `0` means unsaved.
    fn id(&self) -> u64;

    fn set_id(&mut self, id: u64);

    /// Field values in [`Entity::columns`] order, including `id`.
    fn values(&self) -> Vec<DbValue>;

    /// Rebuild an entity from a row selected over [`Entity::columns`].
    ///
    /// # Errors
    /// `TypeMismatch` when a cell cannot coerce into its field,
    /// `ExecutionError` when the row is shorter than the column list.
    fn from_row(row: &Row) -> Result<Self, SqlForgeError>;

    /// Value of the field backing `column`, if the entity has it.
    #[must_use]
    fn field(&self, column: &str) -> Option<DbValue> {
        let index = Self::columns().iter().position(|c| *c == column)?;
        self.values().into_iter().nth(index)
    }
}

/// Define a struct and derive its [`Entity`] implementation.
///
/// Fields must be types with `From`/[`crate::FromDbValue`] conversions to
/// and from [`DbValue`], and one field must be `id: u64`:
///
/// ```rust
/// use sql_forge::entity;
/// use sql_forge::orm::Entity;
///
/// entity! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct Mountain {
///         pub id: u64,
///         pub name: String,
///         pub height: i64,
///     }
/// }
///
/// assert_eq!(Mountain::table(), "mountain");
/// assert_eq!(Mountain::columns(), &["id", "name", "height"][..]);
/// ```
#[macro_export]
macro_rules! entity {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($(#[$field_meta:meta])* $field_vis:vis $field:ident : $field_ty:ty),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $($(#[$field_meta])* $field_vis $field : $field_ty),*
        }

        impl $crate::orm::Entity for $name {
            fn columns() -> &'static [&'static str] {
                &[$(stringify!($field)),*]
            }

            fn id(&self) -> u64 {
                self.id
            }

            fn set_id(&mut self, id: u64) {
                self.id = id;
            }

            fn values(&self) -> Vec<$crate::DbValue> {
                vec![$($crate::DbValue::from(self.$field.clone())),*]
            }

            fn from_row(row: &$crate::Row) -> Result<Self, $crate::SqlForgeError> {
                let mut index = 0usize;
                $(
                    let $field: $field_ty = row
                        .get(index)
                        .ok_or_else(|| $crate::SqlForgeError::ExecutionError(format!(
                            "row has {} columns, {} needs at least {}",
                            row.len(),
                            stringify!($name),
                            index + 1,
                        )))?
                        .get_as()?;
                    index += 1;
                )*
                let _ = index;
                Ok(Self { $($field),* })
            }
        }
    };
}
