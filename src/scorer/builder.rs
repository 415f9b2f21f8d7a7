use crate::config::ModelConfig;
use crate::error::{DevScoreError, DsResult};
use crate::reference::loader::load_reference;
use crate::reference::ReferenceModel;
use crate::scorer::percentile::PercentileTable;
use crate::scorer::ScoringEngine;
use std::path::Path;
use tracing::{debug, warn};
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct EngineBuildParams {
    #[builder(default)]
    pub config: ModelConfig,
    #[builder(default)]
    pub reference: ReferenceModel,
    #[builder(default)]
    pub percentiles: PercentileTable,
    #[builder(default = false)]
    pub debug: bool,
}

impl EngineBuildParams {
    pub fn load_from_disk<P1: AsRef<Path>, P2: AsRef<Path>>(
        reference_path: P1,
        config_path: Option<P2>,
        debug: bool,
    ) -> DsResult<ScoringEngine> {
        let reference = load_reference(reference_path)?;
        let config = match config_path {
            Some(p) => ModelConfig::load_from_file(p)?,
            None => ModelConfig::default(),
        };

        EngineBuildParams::builder()
            .config(config)
            .reference(reference)
            .debug(debug)
            .build()
            .build_engine()
    }

    pub fn build_engine(self) -> DsResult<ScoringEngine> {
        let config = self.config;
        let reference = self.reference;
        let percentiles = self.percentiles;

        config.validate()?;
        reference.validate()?;
        percentiles.validate()?;

        // A table that covers none of the recipe metrics would score everyone at the baseline.
        let used: Vec<_> = config
            .recipes
            .iter()
            .flat_map(|(_, r)| r.iter().map(|m| m.metric))
            .collect();
        let missing: Vec<_> = used.iter().filter(|k| !reference.contains(**k)).collect();
        if missing.len() == used.len() {
            return Err(DevScoreError::Validation(format!(
                "reference table '{}' covers none of the scored metrics",
                reference.version
            )));
        }
        for key in &missing {
            warn!(
                "Reference table '{}' has no row for {}; using the conservative baseline",
                reference.version, key
            );
        }

        if self.debug {
            debug!(
                "Engine initialized. Model {}, reference '{}' ({} metrics), {} percentile knots",
                config.version,
                reference.version,
                reference.len(),
                percentiles.knots().len()
            );
        }

        Ok(ScoringEngine {
            config,
            reference,
            percentiles,
        })
    }
}
