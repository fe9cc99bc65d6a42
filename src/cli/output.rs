//! Output formatting for CLI reports

use crate::{
    grid::{Cell, LevelLayout},
    pipeline::LevelReport,
    q_learning::{CellEstimate, Trajectory, ValueDump},
};

const EMPTY: char = '0';
const AGENT: char = '1';
const HAZARD: char = '2';
const GOAL: char = '3';

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Digit grid of a layout with the agent drawn at `agent`.
///
/// `0` empty, `1` agent, `2` hazard, `3` goal. The agent hides whatever is
/// underneath it.
pub fn render_board(layout: &LevelLayout, agent: Cell) -> String {
    let mut lines = Vec::with_capacity(layout.rows());
    for row in 0..layout.rows() {
        let line: Vec<String> = (0..layout.cols())
            .map(|col| {
                let cell = Cell::new(row, col);
                let glyph = if cell == agent {
                    AGENT
                } else if cell == layout.goal() {
                    GOAL
                } else if layout.hazards().contains(&cell) {
                    HAZARD
                } else {
                    EMPTY
                };
                glyph.to_string()
            })
            .collect();
        lines.push(line.join(" "));
    }
    lines.join("\n")
}

fn render_grid(values: &ValueDump, cell_text: impl Fn(CellEstimate) -> String) -> String {
    let mut lines = Vec::with_capacity(values.rows);
    for row in 0..values.rows {
        let line: Vec<String> = (0..values.cols)
            .map(|col| {
                let estimate = values
                    .get(Cell::new(row, col))
                    .unwrap_or(CellEstimate::Unvisited);
                cell_text(estimate)
            })
            .collect();
        lines.push(line.join("\t"));
    }
    lines.join("\n")
}

/// Best action letter per cell, `--` where the table has no entry
pub fn render_action_grid(values: &ValueDump) -> String {
    render_grid(values, |estimate| match estimate.action() {
        Some(action) => action.symbol().to_string(),
        None => "--".to_string(),
    })
}

/// Best value per cell, `----` where the table has no entry
pub fn render_value_grid(values: &ValueDump) -> String {
    render_grid(values, |estimate| match estimate.value() {
        Some(value) => format!("{value:.2}"),
        None => "----".to_string(),
    })
}

/// Both value grids under their headings
pub fn render_values(values: &ValueDump) -> String {
    format!(
        "Best action per cell:\n{}\n\nValue per cell:\n{}",
        render_action_grid(values),
        render_value_grid(values)
    )
}

/// Action letters separated by spaces, or a marker for an empty walk
pub fn render_path(path: &Trajectory) -> String {
    if path.is_empty() {
        "(no moves)".to_string()
    } else {
        path.to_string()
    }
}

/// Print everything one level produced
pub fn print_level_report(report: &LevelReport) {
    let layout = &report.layout;
    print_section(&format!("Level {}", report.level));
    print_kv("Board size", &format!("{} x {}", layout.rows(), layout.cols()));
    print_kv("Start", &layout.start().to_string());
    print_kv("Goal", &layout.goal().to_string());
    let hazards: Vec<String> = layout.hazards().iter().map(Cell::to_string).collect();
    print_kv(
        "Hazards",
        &if hazards.is_empty() {
            "none".to_string()
        } else {
            hazards.join(" ")
        },
    );
    print_kv("Sliding", if report.sliding { "on" } else { "off" });
    for skipped in &report.skipped_hazards {
        print_kv("Skipped hazard", &format!("{} ({})", skipped.cell, skipped.reason));
    }

    print_subsection("Initial board");
    println!("{}", render_board(layout, layout.start()));

    let training = &report.training;
    print_subsection("Training");
    print_kv("Episodes", &format_number(training.total_episodes));
    print_kv("Reached goal", &format_number(training.goals));
    print_kv("Hit hazard", &format_number(training.hazards));
    if training.dead_ends > 0 {
        print_kv("Dead ends", &format_number(training.dead_ends));
    }
    if training.truncated > 0 {
        print_kv("Truncated", &format_number(training.truncated));
    }
    print_kv("Success rate", &format!("{:.1}%", training.success_rate * 100.0));
    print_kv("Mean steps", &format!("{:.2}", training.mean_steps));
    print_kv("Mean return", &format!("{:.2}", training.mean_return));
    print_kv("Cells visited", &training.table_size.to_string());

    print_subsection(&format!("Q-table for level {}", report.level));
    println!("{}", render_values(&report.values));

    print_subsection("Agent path");
    println!("{}", render_path(&report.path));
    print_kv("Ended", report.path.end.label());

    print_subsection("Final board");
    println!("{}", render_board(layout, report.path.final_cell()));
}
