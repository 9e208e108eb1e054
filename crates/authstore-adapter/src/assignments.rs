//! Builder for single-statement partial updates.
//!
//! Only the columns a patch touches appear in the `SET` list, so an update
//! never overwrites a column with a stale value read earlier.

use rusqlite::types::ToSql;

/// The `SET` list of an `UPDATE` under construction.
pub(crate) struct Assignments {
    columns: Vec<&'static str>,
    values: Vec<Box<dyn ToSql>>,
}

impl Assignments {
    pub(crate) fn new() -> Self {
        Self {
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Adds `column = value` to the `SET` list.
    pub(crate) fn set(&mut self, column: &'static str, value: impl ToSql + 'static) {
        self.columns.push(column);
        self.values.push(Box::new(value));
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Renders `UPDATE {table} SET .. WHERE {key_column} = ? RETURNING
    /// {returning}` and its bound values, with the key bound last.
    pub(crate) fn into_update(
        mut self,
        table: &str,
        key_column: &str,
        key: impl ToSql + 'static,
        returning: &str,
    ) -> (String, Vec<Box<dyn ToSql>>) {
        let set_parts: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{column} = ?{}", i + 1))
            .collect();
        let key_idx = self.values.len() + 1;
        self.values.push(Box::new(key));

        let sql = format!(
            "UPDATE {table} SET {} WHERE {key_column} = ?{key_idx} RETURNING {returning}",
            set_parts.join(", ")
        );
        (sql, self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_placeholders_in_order_with_key_last() {
        let mut assignments = Assignments::new();
        assignments.set("name", Some("Ada".to_string()));
        assignments.set("image", None::<String>);

        let (sql, values) = assignments.into_update("User", "id", "u1".to_string(), "id, name");

        assert_eq!(
            sql,
            "UPDATE User SET name = ?1, image = ?2 WHERE id = ?3 RETURNING id, name"
        );
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn empty_until_a_column_is_set() {
        let mut assignments = Assignments::new();
        assert!(assignments.is_empty());
        assignments.set("expires", 1_i64);
        assert!(!assignments.is_empty());
    }
}
