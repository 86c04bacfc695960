// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # crew-schedule
//!
//! Command-line shell over the assignment timeline engine. Every subcommand
//! loads a JSON schedule file into the in-memory store, drives the engine the
//! way the grid UI would, and writes the file back after a committed change.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod render;

#[cfg(test)]
mod tests;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    Result,
    eyre::{WrapErr, eyre},
};
use crew_schedule::{AssignmentStore, ScheduleController, SegmentUpdates, TracingNotifier};
use crew_schedule_domain::{
    Allocation, AssignmentId, GridConfig, ProjectId, ReferenceDirectory, Row, RowKey, Trade,
    WorkerId, parse_local_date, parse_weekday,
};
use crew_schedule_persistence::{InMemoryStore, ScheduleFile};
use std::path::PathBuf;
use time::{Date, OffsetDateTime, Weekday};
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_log::AsTrace;

type Controller = ScheduleController<InMemoryStore, TracingNotifier, ReferenceDirectory>;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err:#}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(name = "crew-schedule", version, about = "Edit crew assignments on a week grid")]
struct Args {
    /// Path to the schedule JSON file
    #[arg(short, long, global = true, default_value = "schedule.json")]
    file: PathBuf,

    /// Date the grid is built around (YYYY-MM-DD); defaults to today
    #[arg(short, long, global = true, value_parser = parse_date_arg)]
    pivot: Option<Date>,

    /// Number of weeks shown; overrides the file
    #[arg(long, global = true)]
    weeks: Option<usize>,

    /// Weekday every week starts on; overrides the file
    #[arg(long, global = true, value_parser = parse_weekday_arg)]
    week_start: Option<Weekday>,

    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        let mut file: ScheduleFile = ScheduleFile::load(&self.file)
            .wrap_err_with(|| format!("Failed to load {}", self.file.display()))?;
        let config: GridConfig = self.grid_config(&file.grid);
        let pivot: Date = self
            .pivot
            .unwrap_or_else(|| OffsetDateTime::now_utc().date());

        let mut controller: Controller = ScheduleController::new(
            file.store()?,
            TracingNotifier,
            file.directory(),
            config,
            pivot,
        )?;

        if self.command.run(&mut controller)? {
            file.replace_assignments(&controller.store().snapshot());
            file.save(&self.file)?;
        } else {
            info!("Nothing changed");
        }
        Ok(())
    }

    fn grid_config(&self, base: &GridConfig) -> GridConfig {
        let mut config: GridConfig = base.clone();
        if let Some(weeks) = self.weeks {
            config.week_count = weeks;
        }
        if let Some(week_start) = self.week_start {
            config.week_start = week_start;
        }
        config
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

/// Which part of the grid a replayed gesture starts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Handle {
    /// The left edge of an assigned cell (move the start)
    Start,
    /// The right edge of an assigned cell (move the end)
    End,
    /// Any cell of a placeholder row (carve a new range)
    Cell,
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Print the week grid
    #[command(visible_alias = "g")]
    Grid,

    /// Change trade and/or allocation of an assignment from a week forward
    #[command(visible_alias = "e")]
    Edit {
        /// The assignment (or segment) to edit
        #[arg(long)]
        id: String,
        /// First week the change applies to
        #[arg(long)]
        week: usize,
        /// New trade
        #[arg(long)]
        trade: Option<String>,
        /// New allocation in percent
        #[arg(long)]
        allocation: Option<u16>,
    },

    /// Replay a drag gesture and confirm the resulting range
    #[command(visible_alias = "d")]
    Drag {
        /// Where the pointer goes down
        #[arg(long, value_enum)]
        handle: Handle,
        /// The assignment under the pointer
        #[arg(long)]
        id: String,
        /// Week the pointer goes down on
        #[arg(long)]
        from: usize,
        /// Week the pointer is released on
        #[arg(long)]
        to: usize,
        /// Day-level correction of the proposed start
        #[arg(long, value_parser = parse_date_arg)]
        start: Option<Date>,
        /// Day-level correction of the proposed end
        #[arg(long, value_parser = parse_date_arg)]
        end: Option<Date>,
    },

    /// Delete an incomplete placeholder
    Delete {
        /// The placeholder
        #[arg(long)]
        id: String,
    },

    /// Add a placeholder row for a worker
    #[command(visible_alias = "a")]
    AddPlaceholder {
        /// The employee
        #[arg(long)]
        worker: String,
    },

    /// Merge contiguous, equal-allocation segments of a row
    #[command(visible_alias = "m")]
    Merge {
        /// The employee
        #[arg(long)]
        worker: String,
        /// The project
        #[arg(long)]
        project: String,
        /// The trade
        #[arg(long)]
        trade: String,
    },
}

impl Command {
    /// Runs the command. Returns true if the store changed.
    fn run(self, controller: &mut Controller) -> Result<bool> {
        match self {
            Self::Grid => {
                for line in
                    render::render_grid(controller.rows(), controller.grid(), controller.lookup())
                {
                    println!("{line}");
                }
                Ok(false)
            }
            Self::Edit {
                id,
                week,
                trade,
                allocation,
            } => {
                let updates: SegmentUpdates = SegmentUpdates {
                    trade: trade.as_deref().map(Trade::new),
                    allocation: allocation.map(Allocation::new),
                };
                Ok(controller.edit_segment(AssignmentId::new(&id), week, updates)?)
            }
            Self::Drag {
                handle,
                id,
                from,
                to,
                start,
                end,
            } => replay_drag(controller, handle, &AssignmentId::new(&id), from, to, start, end),
            Self::Delete { id } => Ok(controller.delete_incomplete(AssignmentId::new(&id))?),
            Self::AddPlaceholder { worker } => {
                Ok(controller.add_placeholder(WorkerId::new(&worker))?)
            }
            Self::Merge {
                worker,
                project,
                trade,
            } => Ok(controller.merge_row(RowKey {
                worker_id: WorkerId::new(&worker),
                project_id: ProjectId::new(&project),
                trade: Trade::new(&trade),
            })?),
        }
    }
}

/// Replays a press, one pointer move and a release, then confirms the proposal.
fn replay_drag(
    controller: &mut Controller,
    handle: Handle,
    id: &AssignmentId,
    from: usize,
    to: usize,
    start: Option<Date>,
    end: Option<Date>,
) -> Result<bool> {
    let key: RowKey = controller
        .rows()
        .iter()
        .find(|row| row.contains(id))
        .map(Row::key)
        .ok_or_else(|| eyre!("Assignment '{id}' is not in the schedule"))?;

    let pressed: bool = match handle {
        Handle::Start => controller.press_start_handle(&key, from)?,
        Handle::End => controller.press_end_handle(&key, from)?,
        Handle::Cell => controller.press_cell(&key, from)?,
    };
    if !pressed {
        warn!(week = from, ?handle, "Nothing to drag there");
        return Ok(false);
    }

    controller.pointer_enter(&key, to);
    let Some(pending) = controller.pointer_up()? else {
        return Ok(false);
    };
    info!(
        old_start = %pending.old_start(),
        old_end = %pending.old_end(),
        new_start = %pending.new_start(),
        new_end = %pending.new_end(),
        "Proposed range"
    );

    if let Some(pending) = controller.pending_mut() {
        if let Some(start) = start {
            pending.set_start(start);
        }
        if let Some(end) = end {
            pending.set_end(end);
        }
    }
    Ok(controller.confirm_pending()?)
}

fn parse_date_arg(value: &str) -> Result<Date, String> {
    parse_local_date(value).map_err(|err| err.to_string())
}

fn parse_weekday_arg(value: &str) -> Result<Weekday, String> {
    parse_weekday(value).map_err(|err| err.to_string())
}
