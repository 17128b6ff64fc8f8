//! CQL statement rendering for the column-family sink

use std::borrow::Cow;

use crate::error::{MigrateError, Result};
use crate::model::{Cell, DataType, Table};

/// Reserved words that can never appear as bare identifiers
const RESERVED: &[&str] = &[
    "add", "allow", "alter", "and", "apply", "asc", "authorize", "batch", "begin", "by",
    "columnfamily", "create", "delete", "desc", "describe", "drop", "entries", "execute", "from",
    "full", "grant", "if", "in", "index", "infinity", "insert", "into", "keyspace", "limit",
    "modify", "nan", "norecursive", "not", "null", "of", "on", "or", "order", "primary", "rename",
    "replace", "revoke", "schema", "select", "set", "table", "to", "token", "truncate",
    "unlogged", "update", "use", "using", "view", "where", "with",
];

/// Render an identifier, quoting it unless it is a plain lowercase name.
///
/// Unquoted CQL identifiers are case-folded, so anything with upper-case
/// letters or punctuation is double-quoted to keep the source name intact.
pub fn identifier(name: &str) -> Cow<'_, str> {
    let mut chars = name.chars();
    let plain = matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        && !RESERVED.contains(&name);

    if plain {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("\"{}\"", name.replace('"', "\"\"")))
    }
}

/// Native column type for a cell type
pub fn column_type(data_type: DataType) -> &'static str {
    match data_type {
        DataType::Integer => "bigint",
        DataType::FloatingPoint => "double",
        DataType::String => "text",
    }
}

/// Render a cell as a CQL literal.
///
/// Text is single-quoted with embedded quotes doubled. Numeric cells are
/// emitted unquoted, so their text must be a number of the column's type
/// or `NULL`; SQLite stores anything in any column.
pub fn literal(cell: &Cell) -> Result<Cow<'_, str>> {
    let raw = cell.raw();
    let valid = match cell.data_type() {
        DataType::String => return Ok(Cow::Owned(format!("'{}'", raw.replace('\'', "''")))),
        _ if raw == "NULL" => true,
        DataType::Integer => raw.parse::<i64>().is_ok(),
        DataType::FloatingPoint => raw.parse::<f64>().is_ok_and(f64::is_finite),
    };

    if valid {
        Ok(Cow::Borrowed(raw))
    } else {
        Err(MigrateError::Write(format!(
            "value '{}' is not a valid {} literal",
            raw,
            cell.data_type()
        )))
    }
}

pub fn drop_keyspace(keyspace: &str) -> String {
    format!("DROP KEYSPACE IF EXISTS {}", identifier(keyspace))
}

/// Keyspace with a single-node replication policy
pub fn create_keyspace(keyspace: &str, if_not_exists: bool) -> String {
    format!(
        "CREATE KEYSPACE {}{} WITH REPLICATION = {{'class': 'SimpleStrategy', 'replication_factor': 1}}",
        if if_not_exists { "IF NOT EXISTS " } else { "" },
        identifier(keyspace)
    )
}

fn qualified(keyspace: &str, table: &Table) -> String {
    format!("{}.{}", identifier(keyspace), identifier(table.name()))
}

/// Column declarations derived from each column's first cell
pub fn column_definitions(table: &Table) -> Result<Vec<String>> {
    if table.column_count() == 0 {
        return Err(MigrateError::schema(table.name(), "table has no columns"));
    }

    table
        .columns()
        .map(|column| {
            let data_type = column.data_type().ok_or_else(|| {
                MigrateError::schema(
                    table.name(),
                    format!("column '{}' has no cells to derive a type from", column.name()),
                )
            })?;
            Ok(format!("{} {}", identifier(column.name()), column_type(data_type)))
        })
        .collect()
}

/// `CREATE TABLE` with the given key column positions as the primary key
pub fn create_table(
    keyspace: &str,
    table: &Table,
    key_columns: &[usize],
    if_not_exists: bool,
) -> Result<String> {
    let definitions = column_definitions(table)?;

    let key = key_columns
        .iter()
        .map(|&index| {
            table
                .column_at(index)
                .map(|c| identifier(c.name()).into_owned())
                .ok_or_else(|| {
                    MigrateError::schema(table.name(), format!("key column {index} out of range"))
                })
        })
        .collect::<Result<Vec<_>>>()?;
    if key.is_empty() {
        return Err(MigrateError::schema(table.name(), "no primary key column"));
    }

    Ok(format!(
        "CREATE TABLE {}{} ({}, PRIMARY KEY ({}))",
        if if_not_exists { "IF NOT EXISTS " } else { "" },
        qualified(keyspace, table),
        definitions.join(", "),
        key.join(", ")
    ))
}

/// Shared `INSERT INTO ks.t (cols) VALUES (` prefix for a table
pub fn insert_prefix(keyspace: &str, table: &Table) -> String {
    let columns = table
        .column_names()
        .map(|name| identifier(name).into_owned())
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT INTO {} ({}) VALUES (", qualified(keyspace, table), columns)
}

/// Complete an insert statement from its prefix and one row of cells
pub fn insert_row(prefix: &str, row: &[&Cell]) -> Result<String> {
    let values = row
        .iter()
        .map(|c| literal(c))
        .collect::<Result<Vec<_>>>()?
        .join(", ");
    Ok(format!("{}{})", prefix, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;

    /// Inverse of [`literal`] for text cells
    fn parse_string_literal(s: &str) -> Option<String> {
        let inner = s.strip_prefix('\'')?.strip_suffix('\'')?;
        let mut out = String::new();
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c == '\'' {
                // A lone quote would have terminated the literal
                if chars.next() != Some('\'') {
                    return None;
                }
            }
            out.push(c);
        }
        Some(out)
    }

    fn table(name: &str, columns: &[(&str, &str, Vec<&str>)]) -> Table {
        let mut table = Table::new(name);
        for (index, (column, annotation, values)) in columns.iter().enumerate() {
            table.add_column(Column::new(*column)).unwrap();
            for value in values.iter() {
                table.add_cell(index, Cell::from_sqlite(*value, annotation)).unwrap();
            }
        }
        table
    }

    fn render(raw: &str, annotation: &str) -> Result<String> {
        let cell = Cell::from_sqlite(raw, annotation);
        literal(&cell).map(Cow::into_owned)
    }

    #[test]
    fn test_literals() {
        assert_eq!(render("42", "INTEGER").unwrap(), "42");
        assert_eq!(render("-7", "INTEGER").unwrap(), "-7");
        assert_eq!(render("4.5", "NUMERIC").unwrap(), "4.5");
        assert_eq!(render("3", "NUMERIC(8,2)").unwrap(), "3");
        assert_eq!(render("NULL", "INTEGER").unwrap(), "NULL");
        assert_eq!(render("NULL", "NUMERIC").unwrap(), "NULL");
        assert_eq!(render("O'Brien", "TEXT").unwrap(), "'O''Brien'");
        assert_eq!(render("", "TEXT").unwrap(), "''");
    }

    #[test]
    fn test_numeric_literals_reject_non_numbers() {
        for (raw, annotation) in [
            ("5, 'pwned') --", "INTEGER"),
            ("ten", "INTEGER"),
            ("2.5", "INTEGER"),
            ("", "INTEGER"),
            ("1); DROP KEYSPACE ks", "NUMERIC"),
            ("NaN", "NUMERIC"),
            ("inf", "NUMERIC"),
            ("null", "NUMERIC"),
        ] {
            let err = render(raw, annotation).unwrap_err();
            assert!(matches!(err, MigrateError::Write(_)), "{raw}: {err}");
        }
    }

    #[test]
    fn test_string_literal_round_trip() {
        for value in ["", "plain", "O'Brien", "'", "''", "it's 'quoted'", "a'b'c'", "ünï'cødé"] {
            let rendered = render(value, "TEXT").unwrap();
            assert_eq!(parse_string_literal(&rendered).as_deref(), Some(value), "{rendered}");
        }
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(identifier("users"), "users");
        assert_eq!(identifier("user_2"), "user_2");
        assert_eq!(identifier("T"), "\"T\"");
        assert_eq!(identifier("first name"), "\"first name\"");
        assert_eq!(identifier("2col"), "\"2col\"");
        assert_eq!(identifier("table"), "\"table\"");
        assert_eq!(identifier("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_keyspace_statements() {
        assert_eq!(drop_keyspace("priamus"), "DROP KEYSPACE IF EXISTS priamus");
        assert_eq!(
            create_keyspace("priamus", false),
            "CREATE KEYSPACE priamus WITH REPLICATION = {'class': 'SimpleStrategy', 'replication_factor': 1}"
        );
        assert!(create_keyspace("priamus", true).starts_with("CREATE KEYSPACE IF NOT EXISTS priamus "));
    }

    #[test]
    fn test_create_table() {
        let t = table(
            "items",
            &[
                ("id", "INTEGER", vec!["1"]),
                ("price", "NUMERIC(8,2)", vec!["2.5"]),
                ("label", "TEXT", vec!["x"]),
            ],
        );
        assert_eq!(
            create_table("ks", &t, &[0], false).unwrap(),
            "CREATE TABLE ks.items (id bigint, price double, label text, PRIMARY KEY (id))"
        );
        assert_eq!(
            create_table("ks", &t, &[0, 2], true).unwrap(),
            "CREATE TABLE IF NOT EXISTS ks.items (id bigint, price double, label text, PRIMARY KEY (id, label))"
        );
    }

    #[test]
    fn test_create_table_schema_errors() {
        let no_columns = Table::new("none");
        assert!(matches!(
            create_table("ks", &no_columns, &[0], false),
            Err(MigrateError::Schema { .. })
        ));

        let no_rows = table("empty", &[("id", "INTEGER", vec![])]);
        let err = create_table("ks", &no_rows, &[0], false).unwrap_err();
        assert!(err.to_string().contains("no cells"), "{err}");

        let t = table("t", &[("id", "INTEGER", vec!["1"])]);
        assert!(create_table("ks", &t, &[3], false).is_err());
        assert!(create_table("ks", &t, &[], false).is_err());
    }

    #[test]
    fn test_insert_row() {
        let t = table(
            "T",
            &[("id", "INTEGER", vec!["2"]), ("name", "TEXT", vec!["O'Brien"])],
        );
        let prefix = insert_prefix("ks", &t);
        let row = t.row(0).unwrap();
        assert_eq!(
            insert_row(&prefix, &row).unwrap(),
            "INSERT INTO ks.\"T\" (id, name) VALUES (2, 'O''Brien')"
        );
    }

    #[test]
    fn test_insert_row_rejects_smuggled_values() {
        let t = table(
            "people",
            &[
                ("id", "INTEGER", vec!["5, 'pwned') --"]),
                ("name", "TEXT", vec!["Real Name"]),
            ],
        );
        let prefix = insert_prefix("ks", &t);
        let row = t.row(0).unwrap();
        assert!(matches!(insert_row(&prefix, &row), Err(MigrateError::Write(_))));
    }
}
