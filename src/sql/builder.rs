//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from a table descriptor.
//!
//! Parameter numbering is shared by every statement: `$1` is the id, `$2..` are
//! the data columns in descriptor order.

use crate::model::{TableDef, ID_COLUMN};

/// Quote identifier for PostgreSQL (safe: only from descriptors and validated settings).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

fn select_column_list(def: &TableDef) -> String {
    def.column_names().map(quoted).collect::<Vec<_>>().join(", ")
}

/// `col = <rhs($n)>` for every data column, numbered from `$2`.
fn data_assignments(def: &TableDef, rhs: impl Fn(&str, usize) -> String) -> String {
    def.data_columns()
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let q = quoted(c.name);
            let value = rhs(&q, i + 2);
            format!("{} = {}", q, value)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// INSERT every column, id included (ids are client-assigned).
pub fn insert(def: &TableDef, schema: &str) -> String {
    let table = qualified_table(schema, def.table);
    let placeholders: Vec<String> = (1..=def.columns.len()).map(|n| format!("${}", n)).collect();
    let cols = select_column_list(def);
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        table,
        cols,
        placeholders.join(", "),
        cols
    )
}

/// SELECT every row, ORDER BY id.
pub fn select_list(def: &TableDef, schema: &str) -> String {
    format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list(def),
        qualified_table(schema, def.table),
        quoted(ID_COLUMN)
    )
}

/// SELECT by primary key. Caller binds id as sole param.
pub fn select_by_id(def: &TableDef, schema: &str) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1",
        select_column_list(def),
        qualified_table(schema, def.table),
        quoted(ID_COLUMN)
    )
}

/// UPDATE every data column by id. The id itself is only the lookup key.
pub fn replace(def: &TableDef, schema: &str) -> String {
    let sets = data_assignments(def, |_, n| format!("${}", n));
    format!(
        "UPDATE {} SET {} WHERE {} = $1 RETURNING {}",
        qualified_table(schema, def.table),
        sets,
        quoted(ID_COLUMN),
        select_column_list(def)
    )
}

/// UPDATE by id keeping the stored value wherever the bound param is NULL.
/// One statement, so concurrent merges on the same row never interleave.
pub fn merge(def: &TableDef, schema: &str) -> String {
    let sets = data_assignments(def, |col, n| format!("COALESCE(${}, {})", n, col));
    format!(
        "UPDATE {} SET {} WHERE {} = $1 RETURNING {}",
        qualified_table(schema, def.table),
        sets,
        quoted(ID_COLUMN),
        select_column_list(def)
    )
}

/// DELETE by id, returning the removed row.
pub fn delete(def: &TableDef, schema: &str) -> String {
    format!(
        "DELETE FROM {} WHERE {} = $1 RETURNING {}",
        qualified_table(schema, def.table),
        quoted(ID_COLUMN),
        select_column_list(def)
    )
}
