//! Record and repository builders

use serde_json::{json, Value};
use szgraph_storage::{EntityId, RecordRow};

pub const CUSTOMERS_ID: i64 = 1001;
pub const WATCHLIST_ID: i64 = 1002;

/// Payload of a person record with a PRIMARY full name
pub fn person(name: &str) -> Value {
    json!({
        "RECORD_TYPE": "PERSON",
        "NAME_TYPE": "PRIMARY",
        "NAME_FULL": name
    })
}

pub fn customer(entity_id: EntityId, record_id: &str, payload: Value) -> RecordRow {
    RecordRow::new(entity_id, CUSTOMERS_ID, "CUSTOMERS", record_id, payload.to_string())
}

pub fn watchlist(entity_id: EntityId, record_id: &str, payload: Value) -> RecordRow {
    RecordRow::new(entity_id, WATCHLIST_ID, "WATCHLIST", record_id, payload.to_string())
}

#[cfg(feature = "sqlite")]
pub use sqlite::*;

#[cfg(feature = "sqlite")]
mod sqlite {
    use rusqlite::params;
    use szgraph_storage::{RecordRow, SqliteRepository};

    /// Loads rows into the engine tables one resolved record at a time
    pub struct RepositoryBuilder {
        repo: SqliteRepository,
        next_obs_id: i64,
    }

    impl RepositoryBuilder {
        pub fn create(path: &std::path::Path) -> Self {
            Self {
                repo: SqliteRepository::create(path).unwrap(),
                next_obs_id: 1,
            }
        }

        pub fn data_source(self, code: &str, id: i64) -> Self {
            self.repo
                .connection()
                .execute(
                    "INSERT INTO SYS_CODES_USED (CODE_TYPE, CODE, CODE_ID) VALUES ('DATA_SOURCE', ?1, ?2)",
                    params![code, id],
                )
                .unwrap();
            self
        }

        pub fn record(mut self, row: &RecordRow) -> Self {
            let conn = self.repo.connection();
            let key = format!("{}-{}", row.data_source, row.record_id);
            conn.execute(
                "INSERT OR IGNORE INTO RES_ENT (RES_ENT_ID) VALUES (?1)",
                params![row.entity_id],
            )
            .unwrap();
            conn.execute(
                "INSERT INTO OBS_ENT (OBS_ENT_ID, DSRC_ID, ENT_SRC_KEY) VALUES (?1, ?2, ?3)",
                params![self.next_obs_id, row.data_source_id, key],
            )
            .unwrap();
            conn.execute(
                "INSERT INTO RES_ENT_OKEY (RES_ENT_ID, OBS_ENT_ID, MATCH_KEY) VALUES (?1, ?2, ?3)",
                params![row.entity_id, self.next_obs_id, row.match_key],
            )
            .unwrap();
            conn.execute(
                "INSERT INTO DSRC_RECORD (DSRC_ID, RECORD_ID, ENT_SRC_KEY, JSON_DATA) VALUES (?1, ?2, ?3, ?4)",
                params![row.data_source_id, row.record_id, key, row.json_data],
            )
            .unwrap();
            self.next_obs_id += 1;
            self
        }

        pub fn relationship(self, min_id: i64, max_id: i64, levels: &str, match_key: &str) -> Self {
            self.repo
                .connection()
                .execute(
                    "INSERT INTO RES_RELATE (MIN_RES_ENT_ID, MAX_RES_ENT_ID, MATCH_LEVELS, MATCH_KEY) VALUES (?1, ?2, ?3, ?4)",
                    params![min_id, max_id, levels, match_key],
                )
                .unwrap();
            self
        }

        pub fn config(self, config: &serde_json::Value) -> Self {
            self.repo
                .connection()
                .execute(
                    "INSERT INTO SYS_CFG (CONFIG_DATA, CONFIG_COMMENTS) VALUES (?1, 'test')",
                    params![config.to_string()],
                )
                .unwrap();
            self
        }

        pub fn finish(self) {}
    }
}
