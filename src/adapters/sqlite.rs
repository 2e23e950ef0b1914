use crate::domain::model::ProcessedRow;
use crate::domain::ports::TableStore;
use crate::utils::error::{EtlError, Result};
use rusqlite::{params, Connection};
use std::path::PathBuf;

/// 資料表欄位，沿用既有資料庫的欄位名稱
pub const COLUMNS: [&str; 4] = ["Región", "City Name", "Language", "Time"];

/// 以單一交易整個取代資料表內容
pub fn replace_rows(conn: &mut Connection, table: &str, rows: &[ProcessedRow]) -> Result<usize> {
    if table.is_empty() || table.contains('"') {
        return Err(EtlError::ConfigError {
            message: format!("Invalid table name: {:?}", table),
        });
    }

    let columns = COLUMNS
        .iter()
        .map(|c| format!("\"{}\" TEXT", c))
        .collect::<Vec<_>>()
        .join(", ");
    let column_names = COLUMNS
        .iter()
        .map(|c| format!("\"{}\"", c))
        .collect::<Vec<_>>()
        .join(", ");

    let tx = conn.transaction()?;
    tx.execute_batch(&format!(
        "DROP TABLE IF EXISTS \"{table}\"; CREATE TABLE \"{table}\" ({columns});"
    ))?;

    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO \"{table}\" ({column_names}) VALUES (?1, ?2, ?3, ?4)"
        ))?;
        for row in rows {
            stmt.execute(params![
                row.region,
                row.city_name,
                row.language_hash,
                row.processing_time
            ])?;
        }
    }

    tx.commit()?;
    tracing::debug!("Replaced table '{}' with {} rows", table, rows.len());
    Ok(rows.len())
}

/// 以 SQLite 檔案作為輸出；連線只在 `replace_table` 內存在
#[derive(Debug, Clone)]
pub struct SqliteTableStore {
    db_path: PathBuf,
}

impl SqliteTableStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }
}

impl TableStore for SqliteTableStore {
    fn replace_table(&self, table: &str, rows: &[ProcessedRow]) -> Result<usize> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut conn = Connection::open(&self.db_path)?;
        replace_rows(&mut conn, table, rows)
    }

    fn location(&self) -> String {
        self.db_path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::fingerprint;
    use tempfile::TempDir;

    fn row(region: &str, name: &str, language: &str, time: &str) -> ProcessedRow {
        ProcessedRow {
            region: region.to_string(),
            city_name: name.to_string(),
            language_hash: fingerprint(language),
            processing_time: time.to_string(),
        }
    }

    fn read_all(conn: &Connection) -> Vec<(String, String, String, String)> {
        let mut stmt = conn
            .prepare("SELECT \"Región\", \"City Name\", \"Language\", \"Time\" FROM countries ORDER BY rowid")
            .unwrap();
        stmt.query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_replace_rows_writes_in_order() {
        let mut conn = Connection::open_in_memory().unwrap();
        let rows = vec![
            row("Europe", "France", "French", "100.12 ms"),
            row("Asia", "Japan", "Japanese", "100.34 ms"),
            row("Europe", "France", "French", "100.50 ms"),
        ];

        let written = replace_rows(&mut conn, "countries", &rows).unwrap();
        assert_eq!(written, 3);

        let stored = read_all(&conn);
        assert_eq!(stored.len(), 3);
        assert_eq!(stored[0].0, "Europe");
        assert_eq!(stored[0].1, "France");
        assert_eq!(stored[0].2, fingerprint("French"));
        assert_eq!(stored[0].3, "100.12 ms");
        assert_eq!(stored[1].1, "Japan");
        // 重複的國家名稱要保留
        assert_eq!(stored[2].1, "France");
    }

    #[test]
    fn test_replace_rows_replaces_previous_table() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE countries (legacy INTEGER); INSERT INTO countries VALUES (1);")
            .unwrap();

        let rows = vec![row("Africa", "Kenya", "English", "100.00 ms")];
        replace_rows(&mut conn, "countries", &rows).unwrap();
        replace_rows(&mut conn, "countries", &rows).unwrap();

        let stored = read_all(&conn);
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].1, "Kenya");

        let column_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('countries')",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(column_count, 4);
    }

    #[test]
    fn test_replace_rows_with_empty_dataset_creates_empty_table() {
        let mut conn = Connection::open_in_memory().unwrap();
        let written = replace_rows(&mut conn, "countries", &[]).unwrap();
        assert_eq!(written, 0);
        assert!(read_all(&conn).is_empty());
    }

    #[test]
    fn test_rejects_invalid_table_name() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert!(replace_rows(&mut conn, "bad\"name", &[]).is_err());
        assert!(replace_rows(&mut conn, "", &[]).is_err());
    }

    #[test]
    fn test_table_store_creates_database_file() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("countries.db");
        let store = SqliteTableStore::new(&db_path);

        let rows = vec![row("Oceania", "Fiji", "English", "100.01 ms")];
        assert_eq!(store.replace_table("countries", &rows).unwrap(), 1);
        assert!(db_path.exists());
        assert_eq!(store.location(), db_path.display().to_string());

        let conn = Connection::open(&db_path).unwrap();
        assert_eq!(read_all(&conn).len(), 1);
    }
}
