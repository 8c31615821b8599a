use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Kind of work a process step requires from the baker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// Hands-on work (mixing, shaping, baking)
    Active,
    /// Passive time (rises, proofs)
    Waiting,
    /// Advance work (feeding a starter, autolyse)
    Preparation,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StepKind::Active => "active",
            StepKind::Waiting => "waiting",
            StepKind::Preparation => "preparation",
        };
        f.write_str(label)
    }
}

/// A single process step as defined by a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Step name (Mixing, Bulk Fermentation, ...)
    pub name: String,
    /// Duration in hours, fractional values allowed
    #[serde(rename = "duration")]
    pub duration_hours: f64,
    /// Step kind
    #[serde(rename = "type")]
    pub kind: StepKind,
}

impl Step {
    pub fn new(name: impl Into<String>, duration_hours: f64, kind: StepKind) -> Self {
        Self {
            name: name.into(),
            duration_hours,
            kind,
        }
    }
}

/// A bread recipe: an ordered list of steps, first to last
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Display name
    pub name: String,
    /// Process steps in execution order
    pub steps: Vec<Step>,
    /// Sum of step durations in hours, kept in sync with `steps`
    #[serde(rename = "totalTime")]
    pub total_time: f64,
}

impl Recipe {
    /// Creates a recipe, computing `total_time` from the steps.
    pub fn new(name: impl Into<String>, steps: Vec<Step>) -> Self {
        let total_time = steps.iter().map(|s| s.duration_hours).sum();
        Self {
            name: name.into(),
            steps,
            total_time,
        }
    }

    /// Replaces the step list and recomputes `total_time`.
    pub fn set_steps(&mut self, steps: Vec<Step>) {
        self.total_time = steps.iter().map(|s| s.duration_hours).sum();
        self.steps = steps;
    }

    /// Checks authoring constraints: non-empty recipe name, every step
    /// named, no negative durations.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("recipe name must not be empty".into()));
        }

        for (index, step) in self.steps.iter().enumerate() {
            if step.name.trim().is_empty() {
                return Err(Error::Validation(format!(
                    "step {} has no name",
                    index + 1
                )));
            }
            if !step.duration_hours.is_finite() || step.duration_hours < 0.0 {
                return Err(Error::Validation(format!(
                    "step '{}' has an invalid duration",
                    step.name
                )));
            }
        }

        Ok(())
    }
}

/// A step with its computed start and end wall-clock times
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledStep {
    /// Step name
    pub name: String,
    /// Step kind
    #[serde(rename = "type")]
    pub kind: StepKind,
    /// Duration in hours
    #[serde(rename = "duration")]
    pub duration_hours: f64,
    /// When the step begins
    #[serde(rename = "startTime")]
    pub start_time: NaiveDateTime,
    /// When the step ends; equals the next step's start
    #[serde(rename = "endTime")]
    pub end_time: NaiveDateTime,
}

/// ICS generation options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IcsOptions {
    /// Calendar name (X-WR-CALNAME), omitted when `None`
    pub calendar_name: Option<String>,
    /// Display alarm before each step, in minutes, omitted when `None`
    pub reminder_minutes: Option<u32>,
}
