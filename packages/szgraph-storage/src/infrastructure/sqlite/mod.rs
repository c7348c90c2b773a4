//! SQLite adapter over the entity resolution repository
//!
//! Reads the engine's own tables:
//! - `RES_ENT_OKEY` / `OBS_ENT` / `DSRC_RECORD`: entity membership + payloads
//! - `SYS_CODES_USED`: data source codes
//! - `RES_RELATE`: derived relationships
//! - `SYS_CFG`: stored engine configuration
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use std::path::Path;
use tracing::debug;

use crate::domain::models::{DataSourceId, EntityId, RecordRow, RelationshipRow};
use crate::domain::ports::{RecordProbe, RecordSource, RelationshipSource, SchemaSource};
use crate::{Result, StorageError};

const RECORDS_IN_RANGE_SQL: &str = "
    select
       reo.RES_ENT_ID,
       dr.DSRC_ID,
       (select CODE from SYS_CODES_USED where CODE_ID = dr.DSRC_ID and CODE_TYPE = 'DATA_SOURCE') as DATA_SOURCE,
       dr.RECORD_ID,
       reo.MATCH_KEY,
       dr.JSON_DATA
    from RES_ENT_OKEY reo
    join OBS_ENT oe on oe.OBS_ENT_ID = reo.OBS_ENT_ID
    join DSRC_RECORD dr on dr.ENT_SRC_KEY = oe.ENT_SRC_KEY and dr.DSRC_ID = oe.DSRC_ID
    where reo.RES_ENT_ID between ?1 and ?2
    order by reo.RES_ENT_ID, dr.DSRC_ID, dr.RECORD_ID";

const RELATIONSHIPS_SQL: &str = "
    select
      MIN_RES_ENT_ID,
      MAX_RES_ENT_ID,
      MATCH_LEVELS,
      MATCH_KEY
    from RES_RELATE where MATCH_LEVELS != '11'";

/// Tables read by the exporter (subset of the engine schema)
const SCHEMA_SQL: &str = "
    CREATE TABLE IF NOT EXISTS SYS_CODES_USED (
        CODE_TYPE TEXT NOT NULL,
        CODE TEXT NOT NULL,
        CODE_ID INTEGER NOT NULL,
        PRIMARY KEY (CODE_TYPE, CODE)
    );
    CREATE TABLE IF NOT EXISTS SYS_CFG (
        CONFIG_DATA_ID INTEGER PRIMARY KEY,
        CONFIG_DATA TEXT NOT NULL,
        CONFIG_COMMENTS TEXT,
        SYS_CREATE_DT TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );
    CREATE TABLE IF NOT EXISTS RES_ENT (
        RES_ENT_ID INTEGER PRIMARY KEY
    );
    CREATE TABLE IF NOT EXISTS OBS_ENT (
        OBS_ENT_ID INTEGER PRIMARY KEY,
        DSRC_ID INTEGER NOT NULL,
        ENT_SRC_KEY TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS RES_ENT_OKEY (
        RES_ENT_ID INTEGER NOT NULL,
        OBS_ENT_ID INTEGER NOT NULL,
        MATCH_KEY TEXT,
        PRIMARY KEY (RES_ENT_ID, OBS_ENT_ID)
    );
    CREATE TABLE IF NOT EXISTS DSRC_RECORD (
        DSRC_ID INTEGER NOT NULL,
        RECORD_ID TEXT NOT NULL,
        ENT_SRC_KEY TEXT NOT NULL,
        JSON_DATA TEXT NOT NULL,
        PRIMARY KEY (DSRC_ID, RECORD_ID)
    );
    CREATE TABLE IF NOT EXISTS RES_RELATE (
        RES_REL_ID INTEGER PRIMARY KEY,
        MIN_RES_ENT_ID INTEGER NOT NULL,
        MAX_RES_ENT_ID INTEGER NOT NULL,
        MATCH_LEVELS TEXT NOT NULL,
        MATCH_KEY TEXT
    );";

/// SQLite-backed repository reader
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open an existing repository database read-only
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();
        let conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| {
            StorageError::open(format!("Cannot open {}: {}", db_path.display(), e))
                .with_source(e)
        })?;
        debug!("opened repository {}", db_path.display());
        Ok(Self { conn })
    }

    /// Create (or reuse) a database file with the exporter's tables
    pub fn create(db_path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        let repo = Self { conn };
        repo.init_schema()?;
        Ok(repo)
    }

    /// Create an in-memory repository (for testing)
    pub fn in_memory() -> Result<Self> {
        let repo = Self {
            conn: Connection::open_in_memory()?,
        };
        repo.init_schema()?;
        Ok(repo)
    }

    /// Initialize the tables read by the exporter
    pub fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    /// Underlying connection (fixtures load rows through it)
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<RecordRow> {
    Ok(RecordRow {
        entity_id: row.get(0)?,
        data_source_id: row.get(1)?,
        data_source: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        record_id: row.get(3)?,
        match_key: row.get(4)?,
        json_data: row.get(5)?,
    })
}

fn relationship_from_row(row: &Row<'_>) -> rusqlite::Result<RelationshipRow> {
    Ok(RelationshipRow {
        entity_id: row.get(0)?,
        related_entity_id: row.get(1)?,
        match_levels: row.get(2)?,
        match_key: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
    })
}

impl RecordSource for SqliteRepository {
    fn max_entity_id(&self) -> Result<Option<EntityId>> {
        let max = self
            .conn
            .query_row("select max(RES_ENT_ID) from RES_ENT", [], |row| {
                row.get::<_, Option<EntityId>>(0)
            })?;
        Ok(max)
    }

    fn records_in_range(&self, begin: EntityId, end: EntityId) -> Result<Vec<RecordRow>> {
        let mut stmt = self.conn.prepare_cached(RECORDS_IN_RANGE_SQL)?;
        let rows = stmt
            .query_map(params![begin, end], record_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}

impl RecordProbe for SqliteRepository {
    fn record_exists(&self, data_source_id: DataSourceId, record_id: &str) -> Result<bool> {
        let mut stmt = self
            .conn
            .prepare_cached("select 1 from DSRC_RECORD where DSRC_ID = ?1 and RECORD_ID = ?2")?;
        let found = stmt
            .query_row(params![data_source_id, record_id], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }
}

impl RelationshipSource for SqliteRepository {
    fn for_each_relationship(&self, visit: &mut dyn FnMut(RelationshipRow)) -> Result<u64> {
        let mut stmt = self.conn.prepare(RELATIONSHIPS_SQL)?;
        let mut rows = stmt.query([])?;
        let mut count = 0;
        while let Some(row) = rows.next()? {
            visit(relationship_from_row(row)?);
            count += 1;
        }
        Ok(count)
    }
}

impl SchemaSource for SqliteRepository {
    fn engine_config(&self) -> Result<serde_json::Value> {
        let config_data: Option<String> = self
            .conn
            .query_row(
                "select CONFIG_DATA from SYS_CFG order by SYS_CREATE_DT desc limit 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        let config_data = config_data.ok_or_else(StorageError::config_not_found)?;
        Ok(serde_json::from_str(&config_data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn seeded() -> SqliteRepository {
        let repo = SqliteRepository::in_memory().unwrap();
        repo.connection()
            .execute_batch(
                "INSERT INTO SYS_CODES_USED VALUES ('DATA_SOURCE', 'CUSTOMERS', 1001);
                 INSERT INTO RES_ENT VALUES (1), (2);
                 INSERT INTO OBS_ENT VALUES (10, 1001, 'K1'), (11, 1001, 'K2'), (12, 1001, 'K3');
                 INSERT INTO RES_ENT_OKEY VALUES (2, 12, '+NAME'), (1, 10, NULL), (1, 11, '+NAME+DOB');
                 INSERT INTO DSRC_RECORD VALUES
                    (1001, 'A', 'K1', '{\"NAME_FULL\": \"A\"}'),
                    (1001, 'B', 'K2', '{\"NAME_FULL\": \"B\"}'),
                    (1001, 'C', 'K3', '{\"NAME_FULL\": \"C\"}');
                 INSERT INTO RES_RELATE (MIN_RES_ENT_ID, MAX_RES_ENT_ID, MATCH_LEVELS, MATCH_KEY)
                    VALUES (1, 2, '2', '+NAME'), (1, 2, '11', '+REL_POINTER(OWNS)');",
            )
            .unwrap();
        repo
    }

    #[test]
    fn test_max_entity_id_empty() {
        let repo = SqliteRepository::in_memory().unwrap();
        assert_eq!(repo.max_entity_id().unwrap(), None);
    }

    #[test]
    fn test_records_in_range_sorted_by_entity() {
        let repo = seeded();
        assert_eq!(repo.max_entity_id().unwrap(), Some(2));

        let rows = repo.records_in_range(1, 2).unwrap();
        let ids: Vec<_> = rows.iter().map(|r| (r.entity_id, r.record_id.as_str())).collect();
        assert_eq!(ids, vec![(1, "A"), (1, "B"), (2, "C")]);
        assert_eq!(rows[0].data_source, "CUSTOMERS");
        assert_eq!(rows[0].data_source_id, 1001);
        assert_eq!(rows[0].match_key, None);
        assert_eq!(rows[1].match_key.as_deref(), Some("+NAME+DOB"));

        assert_eq!(repo.records_in_range(2, 2).unwrap().len(), 1);
        assert!(repo.records_in_range(3, 10).unwrap().is_empty());
    }

    #[test]
    fn test_record_exists() {
        let repo = seeded();
        assert!(repo.record_exists(1001, "B").unwrap());
        assert!(!repo.record_exists(1001, "Z").unwrap());
        assert!(!repo.record_exists(42, "B").unwrap());
    }

    #[test]
    fn test_relationships_skip_disclosed_only() {
        let repo = seeded();
        let mut seen = Vec::new();
        let count = repo.for_each_relationship(&mut |rel| seen.push(rel)).unwrap();
        assert_eq!(count, 1);
        assert_eq!(seen[0], RelationshipRow::new(1, 2, "2", "+NAME"));
    }

    #[test]
    fn test_engine_config_missing() {
        let repo = SqliteRepository::in_memory().unwrap();
        let err = repo.engine_config().unwrap_err();
        assert_eq!(err.kind, ErrorKind::ConfigNotFound);
    }

    #[test]
    fn test_engine_config_latest() {
        let repo = SqliteRepository::in_memory().unwrap();
        repo.connection()
            .execute_batch(
                "INSERT INTO SYS_CFG VALUES (1, '{\"v\": 1}', NULL, '2020-01-01 00:00:00');
                 INSERT INTO SYS_CFG VALUES (2, '{\"v\": 2}', NULL, '2024-01-01 00:00:00');",
            )
            .unwrap();
        assert_eq!(repo.engine_config().unwrap()["v"], 2);
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = SqliteRepository::open(dir.path().join("missing.db"))
            .err()
            .unwrap();
        assert_eq!(err.kind, ErrorKind::Open);
    }

    #[test]
    fn test_create_then_open_read_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("G2C.db");
        drop(SqliteRepository::create(&path).unwrap());

        let repo = SqliteRepository::open(&path).unwrap();
        assert_eq!(repo.max_entity_id().unwrap(), None);
    }
}
