//! Action types for provisioning a deployment plan

use crate::error::Result;
use meshdeploy_core::DeploymentPlan;
use serde::{Deserialize, Serialize};

/// Represents one provisioning call derived from a deployment plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Unique identifier for the action (kind:resource_id)
    pub id: String,

    /// Type of action to perform
    pub action_type: ActionType,

    /// Kind of resource the action targets
    pub resource_kind: ResourceKind,

    /// Resource identifier
    pub resource_id: String,

    /// Description of the action
    pub description: String,

    /// Fully-populated resource spec
    pub details: serde_json::Value,
}

/// Type of action to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Register a new immutable resource (virtual node, task definition revision)
    Register,
    /// Create the resource or update it in place
    Upsert,
    /// Attach a policy to an existing resource
    Attach,
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionType::Register => write!(f, "register"),
            ActionType::Upsert => write!(f, "create-or-update"),
            ActionType::Attach => write!(f, "attach"),
        }
    }
}

/// Kind of provisioned resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    VirtualNode,
    TaskDefinition,
    Service,
    ScalingPolicy,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::VirtualNode => write!(f, "virtual-node"),
            ResourceKind::TaskDefinition => write!(f, "task-definition"),
            ResourceKind::Service => write!(f, "service"),
            ResourceKind::ScalingPolicy => write!(f, "scaling-policy"),
        }
    }
}

impl Action {
    fn new(
        action_type: ActionType,
        resource_kind: ResourceKind,
        resource_id: impl Into<String>,
        description: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        let resource_id = resource_id.into();
        Self {
            id: format!("{}:{}", resource_kind, resource_id),
            action_type,
            resource_kind,
            resource_id,
            description: description.into(),
            details,
        }
    }
}

/// Result of applying a plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyResult {
    /// Successfully applied actions
    pub succeeded: Vec<ActionResult>,

    /// Failed actions
    pub failed: Vec<ActionResult>,

    /// Actions not attempted because an earlier stage failed
    pub skipped: Vec<String>,

    /// Total execution time in milliseconds
    pub duration_ms: u64,
}

impl ApplyResult {
    pub fn new() -> Self {
        Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
            skipped: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty()
    }

    pub fn add_success(&mut self, action_id: String, message: String) {
        self.succeeded.push(ActionResult {
            action_id,
            success: true,
            message,
            error: None,
        });
    }

    pub fn add_failure(&mut self, action_id: String, error: String) {
        self.failed.push(ActionResult {
            action_id,
            success: false,
            message: String::new(),
            error: Some(error),
        });
    }
}

impl Default for ApplyResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a single action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResult {
    /// ID of the action
    pub action_id: String,

    /// Whether the action succeeded
    pub success: bool,

    /// Success message
    pub message: String,

    /// Error message if failed
    pub error: Option<String>,
}

/// Ordered list of provisioning actions for one deployment plan
///
/// The order is fixed: each action references the resource produced by the
/// one before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionPlan {
    pub actions: Vec<Action>,
}

impl ActionPlan {
    pub fn from_deployment(plan: &DeploymentPlan) -> Result<Self> {
        let actions = vec![
            Action::new(
                ActionType::Register,
                ResourceKind::VirtualNode,
                &plan.virtual_node.name,
                format!(
                    "Register virtual node in mesh '{}' with {} backend(s)",
                    plan.virtual_node.mesh.name,
                    plan.virtual_node.backends.len()
                ),
                serde_json::to_value(&plan.virtual_node)?,
            ),
            Action::new(
                ActionType::Register,
                ResourceKind::TaskDefinition,
                &plan.task_definition.family,
                format!(
                    "Register task definition ({} CPU, {} MiB) with containers '{}' and '{}'",
                    plan.task_definition.cpu,
                    plan.task_definition.memory,
                    plan.task_definition.app.name,
                    plan.task_definition.proxy.name
                ),
                serde_json::to_value(&plan.task_definition)?,
            ),
            Action::new(
                ActionType::Upsert,
                ResourceKind::Service,
                plan.service.name.as_str(),
                format!(
                    "Create or update service in cluster '{}'",
                    plan.service.cluster.name
                ),
                serde_json::to_value(&plan.service)?,
            ),
            Action::new(
                ActionType::Attach,
                ResourceKind::ScalingPolicy,
                &plan.scaling.service_name,
                format!(
                    "Attach scaling policy ({}-{} tasks, {}% CPU)",
                    plan.scaling.min_capacity,
                    plan.scaling.max_capacity,
                    plan.scaling.target_cpu_utilization_percent
                ),
                serde_json::to_value(&plan.scaling)?,
            ),
        ];
        Ok(Self { actions })
    }

    /// Get actions by type
    pub fn actions_by_type(&self, action_type: ActionType) -> Vec<&Action> {
        self.actions
            .iter()
            .filter(|a| a.action_type == action_type)
            .collect()
    }

    /// Summary of the plan
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            register: self.actions_by_type(ActionType::Register).len(),
            upsert: self.actions_by_type(ActionType::Upsert).len(),
            attach: self.actions_by_type(ActionType::Attach).len(),
        }
    }
}

/// Summary of planned actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSummary {
    pub register: usize,
    pub upsert: usize,
    pub attach: usize,
}

impl std::fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to register, {} to create or update, {} to attach",
            self.register, self.upsert, self.attach
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_plan;

    #[test]
    fn test_actions_follow_dependency_order() {
        let plan = ActionPlan::from_deployment(&sample_plan()).unwrap();

        let kinds: Vec<ResourceKind> = plan.actions.iter().map(|a| a.resource_kind).collect();
        assert_eq!(
            kinds,
            vec![
                ResourceKind::VirtualNode,
                ResourceKind::TaskDefinition,
                ResourceKind::Service,
                ResourceKind::ScalingPolicy,
            ]
        );
    }

    #[test]
    fn test_action_ids() {
        let plan = ActionPlan::from_deployment(&sample_plan()).unwrap();

        let ids: Vec<&str> = plan.actions.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "virtual-node:vn-orders-ab12",
                "task-definition:orders",
                "service:orders-ab12",
                "scaling-policy:orders-ab12",
            ]
        );
    }

    #[test]
    fn test_details_carry_full_spec() {
        let deployment = sample_plan();
        let plan = ActionPlan::from_deployment(&deployment).unwrap();

        let node = &plan.actions[0].details;
        assert_eq!(node["name"], "vn-orders-ab12");
        assert_eq!(node["listeners"][0]["port"], 8080);
        let task = &plan.actions[1].details;
        assert_eq!(task["app"]["depends_on"][0]["condition"], "HEALTHY");
    }

    #[test]
    fn test_summary() {
        let plan = ActionPlan::from_deployment(&sample_plan()).unwrap();
        let summary = plan.summary();

        assert_eq!(
            summary,
            PlanSummary {
                register: 2,
                upsert: 1,
                attach: 1,
            }
        );
        assert_eq!(
            summary.to_string(),
            "2 to register, 1 to create or update, 1 to attach"
        );
    }
}
