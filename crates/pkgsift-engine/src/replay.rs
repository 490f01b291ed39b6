//! Scripted replay in virtual time
//!
//! A script is a list of timestamped input events:
//!
//! ```yaml
//! - at: 0ms
//!   type: keystroke
//!   value: ac
//! - at: 120ms
//!   type: keystroke
//!   value: acme
//! - at: 2s
//!   type: escape
//! ```
//!
//! Replaying feeds the events to a filter with a synthetic clock, firing the
//! debounce deadline whenever it falls before the next event, so a script
//! runs instantly but sees the same passes a live page would.

use pkgsift_core::Location;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::controller::{InputEvent, PackageFilter, PassReport};
use crate::error::{EngineError, Result};
use crate::view::CatalogView;

/// One scripted input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Offset from the start of the replay
    #[serde(with = "humantime_serde")]
    pub at: Duration,

    #[serde(flatten)]
    pub event: InputEvent,
}

/// What started a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trigger {
    /// An event that filters immediately
    Event(&'static str),
    /// The debounce timer
    Debounce,
}

/// One pass observed during a replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayPass {
    #[serde(with = "humantime_serde")]
    pub at: Duration,
    pub trigger: Trigger,
    pub query: String,
    pub report: Option<PassReport>,
    /// Set when the pass failed
    pub error: Option<String>,
    /// Names of the packages visible after the pass
    pub visible: Vec<String>,
}

/// Latest step offset a script may use
pub const MAX_STEP_OFFSET: Duration = Duration::from_secs(24 * 60 * 60);

/// Parse a YAML script. Steps must be in time order and within
/// [`MAX_STEP_OFFSET`] of the start.
pub fn parse_script(yaml: &str) -> Result<Vec<ScriptStep>> {
    let steps: Vec<ScriptStep> = serde_yaml::from_str(yaml)?;

    if let Some(step) = steps.iter().find(|step| step.at > MAX_STEP_OFFSET) {
        return Err(EngineError::InvalidScript {
            message: format!(
                "step at {:?} is later than the {:?} limit",
                step.at, MAX_STEP_OFFSET
            ),
        });
    }

    if let Some(pair) = steps.windows(2).find(|pair| pair[1].at < pair[0].at) {
        return Err(EngineError::InvalidScript {
            message: format!(
                "step at {:?} comes after step at {:?}",
                pair[1].at, pair[0].at
            ),
        });
    }

    Ok(steps)
}

/// Replay `steps` against a mounted filter and collect every pass.
///
/// Fails only when a step's offset cannot be placed on the clock; failed
/// passes are recorded, not returned.
pub fn replay<V, L>(filter: &mut PackageFilter<V, L>, steps: &[ScriptStep]) -> Result<Vec<ReplayPass>>
where
    V: CatalogView,
    L: Location,
{
    let origin = Instant::now();
    let mut passes = Vec::new();

    for step in steps {
        let now = origin
            .checked_add(step.at)
            .ok_or_else(|| EngineError::InvalidScript {
                message: format!("step at {:?} does not fit in the clock", step.at),
            })?;

        if let Some(deadline) = filter.pending_deadline() {
            if deadline <= now {
                let outcome = filter.tick(deadline);
                record(filter, &mut passes, deadline - origin, Trigger::Debounce, outcome);
            }
        }

        let trigger = Trigger::Event(step.event.kind());
        let outcome = filter.handle(step.event.clone(), now);
        record(filter, &mut passes, step.at, trigger, outcome);
    }

    if let Some(deadline) = filter.pending_deadline() {
        let outcome = filter.tick(deadline);
        record(filter, &mut passes, deadline - origin, Trigger::Debounce, outcome);
    }

    Ok(passes)
}

fn record<V, L>(
    filter: &PackageFilter<V, L>,
    passes: &mut Vec<ReplayPass>,
    at: Duration,
    trigger: Trigger,
    outcome: Result<Option<PassReport>>,
) where
    V: CatalogView,
    L: Location,
{
    let (report, error) = match outcome {
        Ok(None) => return,
        Ok(Some(report)) => (Some(report), None),
        Err(e) => (None, Some(e.to_string())),
    };

    passes.push(ReplayPass {
        at,
        trigger,
        query: filter.state().query.clone(),
        report,
        error,
        visible: filter
            .visible_records()
            .map(|r| r.name().to_string())
            .collect(),
    });
}
