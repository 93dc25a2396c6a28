//! Command schedule: releases scripted commands at their tick.

use serde::{Deserialize, Serialize};

use airstrike_core::commands::ScriptCommand;

/// A command to issue at a given tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledCommand {
    /// Tick at which the command is queued.
    pub at_tick: u64,
    pub command: ScriptCommand,
    /// Whether this command has already been issued.
    #[serde(skip)]
    pub issued: bool,
}

/// Every scripted command of a scenario, in authoring order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandSchedule {
    pub entries: Vec<ScheduledCommand>,
}

impl CommandSchedule {
    pub fn new(entries: Vec<ScheduledCommand>) -> Self {
        Self { entries }
    }

    /// Commands not yet issued.
    pub fn pending(&self) -> usize {
        self.entries.iter().filter(|e| !e.issued).count()
    }
}

/// Check the schedule and hand out any commands that are due.
pub fn run(schedule: &mut CommandSchedule, current_tick: u64, out: &mut Vec<ScriptCommand>) {
    for entry in &mut schedule.entries {
        if !entry.issued && current_tick >= entry.at_tick {
            out.push(entry.command.clone());
            entry.issued = true;
        }
    }
}
