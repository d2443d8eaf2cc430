use serde::{Deserialize, Serialize};
use std::fmt;

/// How the planner bridge searches for plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanningMode {
    /// A full plan is computed before execution starts.
    #[default]
    Offline,
    /// Partial plans are searched for continuously while executing.
    Online,
}

impl PlanningMode {
    pub const LITERALS: &'static [&'static str] = &["offline", "online"];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanningMode::Offline => "offline",
            PlanningMode::Online => "online",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "offline" => Some(Self::Offline),
            "online" => Some(Self::Online),
            _ => None,
        }
    }
}

impl fmt::Display for PlanningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the scheduler does with a newly computed plan while another one runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReschedulePolicy {
    /// Never interrupt a running step; the new plan waits until it completes.
    #[default]
    NoPreempt,
    /// Replace the running plan at once, dropping uncommitted steps.
    Preempt,
    /// Replace the running plan once it reaches a clean checkpoint.
    CleanPreempt,
}

impl ReschedulePolicy {
    pub const ALL: [ReschedulePolicy; 3] = [
        ReschedulePolicy::NoPreempt,
        ReschedulePolicy::Preempt,
        ReschedulePolicy::CleanPreempt,
    ];

    pub const LITERALS: &'static [&'static str] = &["NO_PREEMPT", "PREEMPT", "CLEAN_PREEMPT"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReschedulePolicy::NoPreempt => "NO_PREEMPT",
            ReschedulePolicy::Preempt => "PREEMPT",
            ReschedulePolicy::CleanPreempt => "CLEAN_PREEMPT",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "NO_PREEMPT" => Some(Self::NoPreempt),
            "PREEMPT" => Some(Self::Preempt),
            "CLEAN_PREEMPT" => Some(Self::CleanPreempt),
            _ => None,
        }
    }

    /// Whether a replacement plan can ever interrupt the running one.
    pub fn preempts(&self) -> bool {
        !matches!(self, ReschedulePolicy::NoPreempt)
    }
}

impl fmt::Display for ReschedulePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
