//! Solve command - Train on one hand-placed layout

use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;

use super::run::{CampaignSummary, write_outputs};
use crate::{
    app::GridSession,
    cli::{
        config::{CommonConfig, TrainingArgs},
        output::print_level_report,
    },
    grid::{Cell, LevelLayout},
    pipeline::{
        JsonlObserver, LevelReport, ProgressObserver, TrainingConfig, TrainingPipeline,
    },
};

#[derive(Parser, Debug)]
#[command(about = "Train on a single layout with explicit start, goal and hazards")]
pub struct SolveArgs {
    /// Number of grid rows
    #[arg(long)]
    pub rows: usize,

    /// Number of grid columns
    #[arg(long)]
    pub cols: usize,

    /// Start cell as ROW,COL
    #[arg(long, value_name = "ROW,COL")]
    pub start: Cell,

    /// Goal cell as ROW,COL
    #[arg(long, value_name = "ROW,COL")]
    pub goal: Cell,

    /// Hazard cell (repeatable)
    #[arg(long = "hazard", value_name = "ROW,COL")]
    pub hazards: Vec<Cell>,

    #[command(flatten)]
    pub training: TrainingArgs,

    #[command(flatten)]
    pub common: CommonConfig,
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let layout = LevelLayout::new(
        args.rows,
        args.cols,
        args.start,
        args.goal,
        args.hazards.iter().copied(),
    )
    .context("Invalid layout")?;
    let session_config = args.training.session_config(args.common.seed);
    let mut session = GridSession::new(layout.clone(), args.training.sliding, session_config.clone())?;

    let mut pipeline = TrainingPipeline::new(TrainingConfig::new(args.training.episodes));
    if args.common.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.training.observations {
        File::create(path)
            .with_context(|| format!("Failed to create observations file {}", path.display()))?;
        pipeline = pipeline.with_observer(Box::new(JsonlObserver::append(path)?.for_level(1)));
    }

    let training = pipeline.run(&mut session)?;
    let path = session.extract_path()?;
    let report = LevelReport {
        level: 1,
        sliding: args.training.sliding,
        layout,
        skipped_hazards: Vec::new(),
        training,
        values: session.dump_values(),
        path,
    };
    print_level_report(&report);

    let levels = [report];
    write_outputs(
        &args.training,
        &CampaignSummary {
            plan: None,
            config: &session_config,
            levels: &levels,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_layout_is_reported() {
        let args = SolveArgs::parse_from([
            "solve", "--rows", "3", "--cols", "3", "--start", "0,0", "--goal", "0,0",
        ]);
        let err = execute(args).unwrap_err();
        assert!(err.to_string().contains("Invalid layout"));
    }

    #[test]
    fn test_solve_writes_values_csv() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("values.csv");
        let args = SolveArgs::parse_from([
            "solve".to_string(),
            "--rows".to_string(),
            "3".to_string(),
            "--cols".to_string(),
            "3".to_string(),
            "--start".to_string(),
            "0,0".to_string(),
            "--goal".to_string(),
            "2,2".to_string(),
            "--hazard".to_string(),
            "1,1".to_string(),
            "--episodes".to_string(),
            "50".to_string(),
            "--seed".to_string(),
            "11".to_string(),
            "--values-csv".to_string(),
            csv.display().to_string(),
        ]);
        execute(args).unwrap();

        let text = std::fs::read_to_string(&csv).unwrap();
        // header plus one row per cell
        assert_eq!(text.lines().count(), 10);
        assert!(text.contains("1,1,1,"));
    }
}
