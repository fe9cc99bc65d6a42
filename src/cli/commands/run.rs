//! Run command - Play a multi-level campaign on randomly drawn grids

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    app::SessionConfig,
    cli::{
        config::{CommonConfig, TrainingArgs},
        output::{print_kv, print_level_report, print_section},
    },
    export::ValueCsvExporter,
    grid::{Cell, DimensionRange, HazardRequest},
    pipeline::{
        JsonlObserver, LevelCampaign, LevelPlan, LevelReport, Observer, ProgressObserver,
    },
};

#[derive(Parser, Debug)]
#[command(about = "Play a multi-level campaign on random grids")]
pub struct RunArgs {
    /// Number of levels to play
    #[arg(long, short = 'l', default_value_t = 4)]
    pub levels: usize,

    /// Smallest row or column count a level may draw
    #[arg(long, default_value_t = 4)]
    pub min_size: usize,

    /// Largest row or column count a level may draw
    #[arg(long, default_value_t = 6)]
    pub max_size: usize,

    /// Hazard cell to place on every level (repeatable, e.g. --hazard 1,2)
    #[arg(long = "hazard", value_name = "ROW,COL")]
    pub hazards: Vec<Cell>,

    /// Additional hazards placed on random free cells of every level
    #[arg(long, default_value_t = 0)]
    pub random_hazards: usize,

    #[command(flatten)]
    pub training: TrainingArgs,

    #[command(flatten)]
    pub common: CommonConfig,
}

/// Everything written by `--summary`
#[derive(Debug, Serialize)]
pub(crate) struct CampaignSummary<'a> {
    /// Absent for a single hand-placed layout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<&'a LevelPlan>,
    pub config: &'a SessionConfig,
    pub levels: &'a [LevelReport],
}

pub fn execute(args: RunArgs) -> Result<()> {
    let dimensions = DimensionRange::new(args.min_size, args.max_size)?;
    let plan = LevelPlan::new(args.levels, args.training.episodes)
        .with_sliding(args.training.sliding)
        .with_dimensions(dimensions)
        .with_hazards(HazardRequest::fixed(args.hazards.iter().copied()).with_random(args.random_hazards));
    let session_config = args.training.session_config(args.common.seed);

    let mut campaign = LevelCampaign::new(plan.clone(), session_config.clone());
    if args.common.progress || args.training.observations.is_some() {
        if let Some(path) = &args.training.observations {
            // Start from an empty file; each level appends to it.
            File::create(path)
                .with_context(|| format!("Failed to create observations file {}", path.display()))?;
        }
        let observations = args.training.observations.clone();
        let progress = args.common.progress;
        campaign = campaign.with_observers(move |level| {
            let mut observers: Vec<Box<dyn Observer>> = Vec::new();
            if progress {
                observers.push(Box::new(ProgressObserver::with_label(format!(
                    "episodes (level {level})"
                ))));
            }
            if let Some(path) = &observations {
                observers.push(Box::new(JsonlObserver::append(path)?.for_level(level)));
            }
            Ok(observers)
        });
    }

    let reports = campaign.run_each(|report| {
        print_level_report(report);
        Ok(())
    })?;

    print_campaign_totals(&reports);
    write_outputs(
        &args.training,
        &CampaignSummary {
            plan: Some(&plan),
            config: &session_config,
            levels: &reports,
        },
    )
}

fn print_campaign_totals(reports: &[LevelReport]) {
    let solved = reports.iter().filter(|r| r.path.reached_goal()).count();
    print_section("Campaign");
    print_kv("Levels", &reports.len().to_string());
    print_kv("Paths reaching goal", &format!("{solved}/{}", reports.len()));
}

/// Write the optional summary JSON and values CSV
pub(crate) fn write_outputs(training: &TrainingArgs, summary: &CampaignSummary<'_>) -> Result<()> {
    if let Some(path) = &training.summary {
        write_summary(path, summary)?;
        println!("\nSummary written to {}", path.display());
    }
    if let Some(path) = &training.values_csv {
        ValueCsvExporter::export(path, summary.levels)
            .with_context(|| format!("Failed to write values CSV {}", path.display()))?;
        println!("Values written to {}", path.display());
    }
    if let Some(path) = &training.observations {
        println!("Observations written to {}", path.display());
    }
    Ok(())
}

fn write_summary(path: &Path, summary: &CampaignSummary<'_>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create summary file {}", path.display()))?;
    serde_json::to_writer_pretty(file, summary)
        .with_context(|| format!("Failed to write summary JSON {}", path.display()))?;
    Ok(())
}
