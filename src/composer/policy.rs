use crate::error::Violation;
use crate::schema::{PlanningMode, ReschedulePolicy};
use serde::{Deserialize, Serialize};

/// Which reschedule policies each planning mode accepts.
///
/// Online planning keeps producing replacement plans; pairing it with
/// `NO_PREEMPT` means none of them could ever be adopted, so the default
/// matrix refuses that combination. A deployment that really wants it can
/// list `NO_PREEMPT` under `[policy] online` in its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyMatrix {
    #[serde(default = "all_policies")]
    pub offline: Vec<ReschedulePolicy>,

    #[serde(default = "preempting_policies")]
    pub online: Vec<ReschedulePolicy>,
}

impl Default for PolicyMatrix {
    fn default() -> Self {
        Self {
            offline: all_policies(),
            online: preempting_policies(),
        }
    }
}

fn all_policies() -> Vec<ReschedulePolicy> {
    ReschedulePolicy::ALL.to_vec()
}

fn preempting_policies() -> Vec<ReschedulePolicy> {
    ReschedulePolicy::ALL
        .into_iter()
        .filter(ReschedulePolicy::preempts)
        .collect()
}

impl PolicyMatrix {
    pub fn allowed(&self, mode: PlanningMode) -> &[ReschedulePolicy] {
        match mode {
            PlanningMode::Offline => &self.offline,
            PlanningMode::Online => &self.online,
        }
    }

    pub fn is_allowed(&self, mode: PlanningMode, policy: ReschedulePolicy) -> bool {
        self.allowed(mode).contains(&policy)
    }

    pub fn check(&self, mode: PlanningMode, policy: ReschedulePolicy) -> Result<(), Violation> {
        if self.is_allowed(mode, policy) {
            return Ok(());
        }
        Err(Violation::InconsistentPolicyCombination {
            planning_mode: mode.as_str().to_string(),
            policy: policy.as_str().to_string(),
            allowed: self
                .allowed(mode)
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
        })
    }
}
