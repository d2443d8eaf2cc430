use super::enums::{PlanningMode, ReschedulePolicy};
use super::types::ValueType;
use serde::Serialize;
use std::fmt;

/// Every parameter key an agent definition may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKey {
    // Identity
    AgentId,
    AgentGroup,
    PddlFile,

    // Initial knowledge
    InitBset,
    InitDset,
    InitReactiveRulesSet,

    // Planning
    PlanningMode,
    Planner,
    SearchInterval,
    MaxPplanSize,
    MaxNullSearchIntervals,

    // Acceptance gates
    BeliefCk,
    BeliefW,
    DesireCk,
    DesireW,
    DesirePr,

    // Timing and retries
    RtcDeadline,
    CompPlanTries,
    ExecPlanTries,

    // Autosubmission
    AutosubPrec,
    AutosubContext,

    // Rescheduling and commitment
    ReschedulePolicy,
    MinCommitSteps,
    SimToN,

    // Diagnostics
    Debug,
    DebugLogActive,
}

/// Which collaborator a key mostly concerns; used for grouping in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Concern {
    Identity,
    Knowledge,
    Planning,
    Acceptance,
    Timing,
    Autosubmission,
    Rescheduling,
    Commitment,
    Diagnostics,
}

impl fmt::Display for Concern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Concern::Identity => "identity",
            Concern::Knowledge => "initial knowledge",
            Concern::Planning => "planning",
            Concern::Acceptance => "acceptance gates",
            Concern::Timing => "timing & retries",
            Concern::Autosubmission => "autosubmission",
            Concern::Rescheduling => "rescheduling",
            Concern::Commitment => "commitment",
            Concern::Diagnostics => "diagnostics",
        };
        f.write_str(name)
    }
}

impl ParamKey {
    pub const ALL: [ParamKey; 26] = [
        ParamKey::AgentId,
        ParamKey::AgentGroup,
        ParamKey::PddlFile,
        ParamKey::InitBset,
        ParamKey::InitDset,
        ParamKey::InitReactiveRulesSet,
        ParamKey::PlanningMode,
        ParamKey::Planner,
        ParamKey::SearchInterval,
        ParamKey::MaxPplanSize,
        ParamKey::MaxNullSearchIntervals,
        ParamKey::BeliefCk,
        ParamKey::BeliefW,
        ParamKey::DesireCk,
        ParamKey::DesireW,
        ParamKey::DesirePr,
        ParamKey::RtcDeadline,
        ParamKey::CompPlanTries,
        ParamKey::ExecPlanTries,
        ParamKey::AutosubPrec,
        ParamKey::AutosubContext,
        ParamKey::ReschedulePolicy,
        ParamKey::MinCommitSteps,
        ParamKey::SimToN,
        ParamKey::Debug,
        ParamKey::DebugLogActive,
    ];

    /// Wire name handed to the launched processes.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKey::AgentId => "agent_id",
            ParamKey::AgentGroup => "agent_group",
            ParamKey::PddlFile => "pddl_file",
            ParamKey::InitBset => "init_bset",
            ParamKey::InitDset => "init_dset",
            ParamKey::InitReactiveRulesSet => "init_reactive_rules_set",
            ParamKey::PlanningMode => "planning_mode",
            ParamKey::Planner => "planner",
            ParamKey::SearchInterval => "search_interval",
            ParamKey::MaxPplanSize => "max_pplan_size",
            ParamKey::MaxNullSearchIntervals => "max_null_search_intervals",
            ParamKey::BeliefCk => "belief_ck",
            ParamKey::BeliefW => "belief_w",
            ParamKey::DesireCk => "desire_ck",
            ParamKey::DesireW => "desire_w",
            ParamKey::DesirePr => "desire_pr",
            ParamKey::RtcDeadline => "rtc_deadline",
            ParamKey::CompPlanTries => "comp_plan_tries",
            ParamKey::ExecPlanTries => "exec_plan_tries",
            ParamKey::AutosubPrec => "autosub_prec",
            ParamKey::AutosubContext => "autosub_context",
            ParamKey::ReschedulePolicy => "reschedule_policy",
            ParamKey::MinCommitSteps => "min_commit_steps",
            ParamKey::SimToN => "sim_to_n",
            ParamKey::Debug => "debug",
            ParamKey::DebugLogActive => "debug_log_active",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.as_str() == name)
    }

    pub fn concern(&self) -> Concern {
        match self {
            ParamKey::AgentId | ParamKey::AgentGroup | ParamKey::PddlFile => Concern::Identity,
            ParamKey::InitBset | ParamKey::InitDset | ParamKey::InitReactiveRulesSet => {
                Concern::Knowledge
            }
            ParamKey::PlanningMode
            | ParamKey::Planner
            | ParamKey::SearchInterval
            | ParamKey::MaxPplanSize
            | ParamKey::MaxNullSearchIntervals => Concern::Planning,
            ParamKey::BeliefCk
            | ParamKey::BeliefW
            | ParamKey::DesireCk
            | ParamKey::DesireW
            | ParamKey::DesirePr => Concern::Acceptance,
            ParamKey::RtcDeadline | ParamKey::CompPlanTries | ParamKey::ExecPlanTries => {
                Concern::Timing
            }
            ParamKey::AutosubPrec | ParamKey::AutosubContext => Concern::Autosubmission,
            ParamKey::ReschedulePolicy => Concern::Rescheduling,
            ParamKey::MinCommitSteps | ParamKey::SimToN => Concern::Commitment,
            ParamKey::Debug | ParamKey::DebugLogActive => Concern::Diagnostics,
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            ParamKey::AgentId | ParamKey::AgentGroup | ParamKey::Planner => ValueType::String,
            ParamKey::PddlFile
            | ParamKey::InitBset
            | ParamKey::InitDset
            | ParamKey::InitReactiveRulesSet => ValueType::FilePath,
            ParamKey::PlanningMode => ValueType::Enumerated(PlanningMode::LITERALS),
            ParamKey::ReschedulePolicy => ValueType::Enumerated(ReschedulePolicy::LITERALS),
            ParamKey::SearchInterval
            | ParamKey::MaxPplanSize
            | ParamKey::MaxNullSearchIntervals
            | ParamKey::CompPlanTries
            | ParamKey::ExecPlanTries => ValueType::Integer { min: Some(1) },
            ParamKey::MinCommitSteps | ParamKey::SimToN => ValueType::Integer { min: Some(0) },
            ParamKey::BeliefCk | ParamKey::BeliefW | ParamKey::DesireCk | ParamKey::DesireW => {
                ValueType::GroupGate
            }
            ParamKey::DesirePr => ValueType::Float {
                min: Some(0.0),
                max: Some(1.0),
            },
            ParamKey::RtcDeadline => ValueType::Float {
                min: Some(1.0),
                max: None,
            },
            ParamKey::AutosubPrec | ParamKey::AutosubContext | ParamKey::Debug => {
                ValueType::Boolean
            }
            ParamKey::DebugLogActive => ValueType::StringList,
        }
    }

    /// Keys the planner bridge and scheduler ignore when planning offline.
    pub fn inert_offline(&self) -> bool {
        matches!(
            self,
            ParamKey::SearchInterval
                | ParamKey::MaxPplanSize
                | ParamKey::MaxNullSearchIntervals
                | ParamKey::ReschedulePolicy
                | ParamKey::MinCommitSteps
                | ParamKey::SimToN
        )
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
