//! Export driver
//!
//! Two passes over the repository:
//! 1. Entities: contiguous id ranges of `chunk_size`, from 1 up to the
//!    highest resolved id. Rows arrive ordered by entity id, so consecutive
//!    rows with the same id are one entity.
//! 2. Relationships: one unchunked cursor.
//!
//! Everything is accumulated in memory and handed back for writing.

use std::time::Instant;

use szgraph_storage::{EntityId, RecordProbe, RecordRow, RecordSource, RelationshipSource};
use tracing::{debug, info};

use crate::config::ExportConfig;
use crate::errors::Result;
use crate::features::attributes::AttributeCatalog;
use crate::features::graph_builder::{EntityGraphBuilder, ExportGraphs, RelationshipGraphBuilder};

/// Minutes since `start`, one decimal
pub fn elapsed_minutes(start: Instant) -> f64 {
    (start.elapsed().as_secs_f64() / 60.0 * 10.0).round() / 10.0
}

/// Inclusive id ranges covering `1..=max_id`; the last range may run past it
pub fn entity_ranges(max_id: EntityId, chunk_size: i64) -> Vec<(EntityId, EntityId)> {
    let mut ranges = Vec::new();
    if chunk_size < 1 {
        return ranges;
    }
    let mut begin = 1;
    let mut end = chunk_size;
    loop {
        ranges.push((begin, end));
        if end >= max_id {
            break;
        }
        begin += chunk_size;
        end += chunk_size;
    }
    ranges
}

pub struct ExportDriver<'a> {
    records: &'a dyn RecordSource,
    probe: &'a dyn RecordProbe,
    relationships: &'a dyn RelationshipSource,
    catalog: &'a AttributeCatalog,
    config: ExportConfig,
}

impl<'a> ExportDriver<'a> {
    /// Driver over a repository that implements every read port
    pub fn new<R>(repository: &'a R, catalog: &'a AttributeCatalog, config: ExportConfig) -> Self
    where
        R: RecordSource + RecordProbe + RelationshipSource,
    {
        Self::from_parts(repository, repository, repository, catalog, config)
    }

    pub fn from_parts(
        records: &'a dyn RecordSource,
        probe: &'a dyn RecordProbe,
        relationships: &'a dyn RelationshipSource,
        catalog: &'a AttributeCatalog,
        config: ExportConfig,
    ) -> Self {
        Self {
            records,
            probe,
            relationships,
            catalog,
            config,
        }
    }

    /// Build both graph documents
    pub fn run(&self) -> Result<ExportGraphs> {
        self.config.validate()?;

        let mut graphs = ExportGraphs::new(self.config.include_source_nodes);
        self.export_entities(&mut graphs)?;
        self.export_relationships(&mut graphs)?;

        debug!(stats = ?graphs.stats, "Export complete");
        Ok(graphs)
    }

    fn export_entities(&self, graphs: &mut ExportGraphs) -> Result<()> {
        let start = Instant::now();
        let builder = EntityGraphBuilder::new(self.catalog, self.probe)
            .with_missing_target_policy(self.config.missing_target_policy);

        info!("getting max entity_id ...");
        let Some(max_id) = self.records.max_entity_id()? else {
            info!("No resolved entities found");
            return Ok(());
        };

        let mut entity_count: u64 = 0;
        for (begin, end) in entity_ranges(max_id, self.config.chunk_size) {
            info!("getting entities from {} to {} ...", begin, end);
            let rows = self.records.records_in_range(begin, end)?;

            for group in rows.chunk_by(|a: &RecordRow, b: &RecordRow| a.entity_id == b.entity_id) {
                entity_count += 1;
                if entity_count % self.config.progress_interval == 0 {
                    info!(
                        "{} entities processed after {} minutes",
                        entity_count,
                        elapsed_minutes(start)
                    );
                }
                builder.build(group[0].entity_id, group, graphs)?;
            }
        }

        info!(
            "{} entities processed after {} minutes, done!",
            entity_count,
            elapsed_minutes(start)
        );
        Ok(())
    }

    fn export_relationships(&self, graphs: &mut ExportGraphs) -> Result<()> {
        let start = Instant::now();
        let builder = RelationshipGraphBuilder::new();
        let interval = self.config.progress_interval;

        let mut relation_count: u64 = 0;
        let visited = self.relationships.for_each_relationship(&mut |relationship| {
            relation_count += 1;
            if relation_count % interval == 0 {
                info!(
                    "{} relationships processed after {} minutes",
                    relation_count,
                    elapsed_minutes(start)
                );
            }
            builder.build(&relationship, graphs);
        })?;

        info!(
            "{} relationships processed after {} minutes, done!",
            visited,
            elapsed_minutes(start)
        );
        Ok(())
    }
}
