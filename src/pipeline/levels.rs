//! Multi-level campaigns
//!
//! A campaign plays a fixed number of levels. Each level gets a freshly drawn
//! layout, a new session with an empty value table, a full training budget and
//! a greedy path extraction. Only the sliding flag and the hazard request are
//! shared between levels.

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::training::{TrainingConfig, TrainingPipeline, TrainingResult};
use crate::{
    Error, Result,
    app::{GridSession, SessionConfig},
    grid::{Cell, DimensionRange, HazardRequest, LevelLayout},
    ports::Observer,
    q_learning::{Trajectory, ValueDump},
};

/// What every level of a campaign looks like
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelPlan {
    /// Number of levels to play
    pub levels: usize,
    /// Training episodes per level
    pub episodes: usize,
    /// Whether moves may slide an extra cell
    pub sliding: bool,
    /// Range the rows and columns are drawn from
    pub dimensions: DimensionRange,
    /// Hazards to place on every level
    pub hazards: HazardRequest,
}

impl LevelPlan {
    pub fn new(levels: usize, episodes: usize) -> Self {
        Self {
            levels,
            episodes,
            ..Self::default()
        }
    }

    pub fn with_sliding(mut self, sliding: bool) -> Self {
        self.sliding = sliding;
        self
    }

    pub fn with_dimensions(mut self, dimensions: DimensionRange) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_hazards(mut self, hazards: HazardRequest) -> Self {
        self.hazards = hazards;
        self
    }
}

impl Default for LevelPlan {
    /// Four levels of 1000 episodes on 4-6 cell grids, no sliding, no hazards.
    fn default() -> Self {
        Self {
            levels: 4,
            episodes: TrainingConfig::default().episodes,
            sliding: false,
            dimensions: DimensionRange::default(),
            hazards: HazardRequest::none(),
        }
    }
}

/// A requested hazard that could not be placed on a level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedHazard {
    pub cell: Cell,
    pub reason: String,
}

/// Everything produced by one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelReport {
    /// 1-based level number
    pub level: usize,
    pub sliding: bool,
    pub layout: LevelLayout,
    pub skipped_hazards: Vec<SkippedHazard>,
    pub training: TrainingResult,
    pub values: ValueDump,
    pub path: Trajectory,
}

/// Builds the observers attached to one level's training run
pub type ObserverFactory = Box<dyn FnMut(usize) -> Result<Vec<Box<dyn Observer>>>>;

/// Runs a [`LevelPlan`] level by level
pub struct LevelCampaign {
    plan: LevelPlan,
    session_config: SessionConfig,
    observer_factory: Option<ObserverFactory>,
}

impl LevelCampaign {
    pub fn new(plan: LevelPlan, session_config: SessionConfig) -> Self {
        Self {
            plan,
            session_config,
            observer_factory: None,
        }
    }

    /// Attach observers to every level; the factory receives the level number.
    pub fn with_observers(
        mut self,
        factory: impl FnMut(usize) -> Result<Vec<Box<dyn Observer>>> + 'static,
    ) -> Self {
        self.observer_factory = Some(Box::new(factory));
        self
    }

    pub fn plan(&self) -> &LevelPlan {
        &self.plan
    }

    /// Play every level and collect the reports.
    pub fn run(&mut self) -> Result<Vec<LevelReport>> {
        self.run_each(|_| Ok(()))
    }

    /// Play every level, handing each report to `on_level` as soon as it is ready.
    pub fn run_each<F>(&mut self, mut on_level: F) -> Result<Vec<LevelReport>>
    where
        F: FnMut(&LevelReport) -> Result<()>,
    {
        self.session_config.validate()?;
        let mut layout_rng = match self.session_config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let mut reports = Vec::with_capacity(self.plan.levels);
        for level in 1..=self.plan.levels {
            let report = self.run_level(level, &mut layout_rng)?;
            on_level(&report)?;
            reports.push(report);
        }
        Ok(reports)
    }

    fn run_level(&mut self, level: usize, layout_rng: &mut StdRng) -> Result<LevelReport> {
        let (layout, skipped_hazards) = self.build_layout(level, layout_rng)?;
        info!(
            level,
            rows = layout.rows(),
            cols = layout.cols(),
            start = %layout.start(),
            goal = %layout.goal(),
            hazards = layout.hazards().len(),
            "starting level"
        );

        let mut session_config = self.session_config.clone();
        if let Some(seed) = session_config.seed {
            session_config.seed = Some(seed.wrapping_add(level as u64));
        }
        let mut session = GridSession::new(layout.clone(), self.plan.sliding, session_config)?;

        let mut pipeline = TrainingPipeline::new(TrainingConfig::new(self.plan.episodes));
        if let Some(factory) = self.observer_factory.as_mut() {
            for observer in factory(level)? {
                pipeline = pipeline.with_observer(observer);
            }
        }

        let training = pipeline.run(&mut session)?;
        let path = session.extract_path()?;
        info!(
            level,
            success_rate = training.success_rate,
            path_len = path.len(),
            path_end = path.end.label(),
            "level finished"
        );

        Ok(LevelReport {
            level,
            sliding: self.plan.sliding,
            layout,
            skipped_hazards,
            training,
            values: session.dump_values(),
            path,
        })
    }

    /// Draw a layout and place the requested hazards; invalid requests are
    /// skipped rather than failing the level.
    fn build_layout(
        &self,
        level: usize,
        rng: &mut StdRng,
    ) -> Result<(LevelLayout, Vec<SkippedHazard>)> {
        let mut layout = LevelLayout::random(rng, self.plan.dimensions)?;
        let mut skipped = Vec::new();

        for &cell in &self.plan.hazards.fixed {
            match layout.add_hazard(cell) {
                Ok(()) => {}
                Err(Error::InvalidPlacement { reason, .. }) => {
                    warn!(level, %cell, %reason, "skipping hazard");
                    skipped.push(SkippedHazard { cell, reason });
                }
                Err(err) => return Err(err),
            }
        }

        let requested = self.plan.hazards.random;
        let placed = layout.add_random_hazards(requested, rng);
        if placed < requested {
            warn!(level, requested, placed, "not enough free cells for random hazards");
        }

        Ok((layout, skipped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_runs_every_level() {
        let plan = LevelPlan::new(3, 50);
        let mut campaign = LevelCampaign::new(plan, SessionConfig::new().with_seed(8));

        let mut seen = Vec::new();
        let reports = campaign
            .run_each(|report| {
                seen.push(report.level);
                Ok(())
            })
            .unwrap();

        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(reports.len(), 3);
        for report in &reports {
            assert_eq!(report.training.total_episodes, 50);
            assert_eq!(report.values.rows, report.layout.rows());
            assert_eq!(report.values.cols, report.layout.cols());
            assert!(report.training.table_size <= report.layout.rows() * report.layout.cols());
        }
    }

    #[test]
    fn test_out_of_range_hazards_are_skipped() {
        let plan = LevelPlan::new(1, 10)
            .with_dimensions(DimensionRange::new(3, 3).unwrap())
            .with_hazards(HazardRequest::fixed([Cell::new(9, 9)]));
        let mut campaign = LevelCampaign::new(plan, SessionConfig::new().with_seed(2));

        let reports = campaign.run().unwrap();
        assert_eq!(reports[0].skipped_hazards.len(), 1);
        assert_eq!(reports[0].skipped_hazards[0].cell, Cell::new(9, 9));
        assert!(reports[0].layout.hazards().is_empty());
    }

    #[test]
    fn test_seeded_campaigns_match() {
        let plan = LevelPlan::new(2, 30)
            .with_sliding(true)
            .with_hazards(HazardRequest::none().with_random(2));
        let config = SessionConfig::new().with_seed(17);

        let a = LevelCampaign::new(plan.clone(), config.clone()).run().unwrap();
        let b = LevelCampaign::new(plan, config).run().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_observer_factory_sees_each_level() {
        use std::sync::{Arc, Mutex};

        let levels = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&levels);
        let mut campaign = LevelCampaign::new(LevelPlan::new(2, 5), SessionConfig::new().with_seed(4))
            .with_observers(move |level| {
                recorded.lock().unwrap().push(level);
                Ok(Vec::new())
            });

        campaign.run().unwrap();
        assert_eq!(*levels.lock().unwrap(), vec![1, 2]);
    }
}
