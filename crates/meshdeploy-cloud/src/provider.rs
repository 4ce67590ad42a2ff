//! Provisioning backend trait definition

use crate::action::{ActionPlan, ApplyResult, ResourceKind};
use crate::error::{CloudError, Result};
use async_trait::async_trait;
use meshdeploy_core::{
    DeploymentPlan, ScalingPolicy, ServiceSpec, TaskDefinitionSpec, VirtualNodeSpec,
};
use std::time::Instant;
use tracing::{error, info, warn};

/// Provisioning backend abstraction trait
///
/// The compiler's only contract with a backend is the fully-populated spec
/// objects. Backends own retries and transient failure handling; callers
/// never poll or wait for provisioning to finish.
#[async_trait]
pub trait ProvisioningBackend: Send + Sync {
    /// Returns the backend name (e.g., "dry-run")
    fn name(&self) -> &str;

    /// Register a mesh virtual node
    async fn register_virtual_node(&self, spec: &VirtualNodeSpec) -> Result<String>;

    /// Register a task definition with its two containers and startup dependency
    async fn register_task_definition(&self, spec: &TaskDefinitionSpec) -> Result<String>;

    /// Create or update a service bound to discovery and a network placement
    async fn create_or_update_service(&self, spec: &ServiceSpec) -> Result<String>;

    /// Attach an autoscaling policy to a service
    async fn attach_scaling_policy(&self, policy: &ScalingPolicy) -> Result<String>;
}

/// Options for [`apply`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions {
    /// Provision even if the plan carries validation diagnostics
    pub allow_diagnostics: bool,
}

/// Apply a deployment plan through a backend
///
/// Actions run sequentially in dependency order. The first failure stops the
/// run and the remaining actions are reported as skipped.
pub async fn apply(
    backend: &dyn ProvisioningBackend,
    plan: &DeploymentPlan,
    options: ApplyOptions,
) -> Result<ApplyResult> {
    if !plan.diagnostics.is_empty() && !options.allow_diagnostics {
        return Err(CloudError::InvalidPlan(plan.diagnostics.len()));
    }

    let actions = ActionPlan::from_deployment(plan)?;
    let started = Instant::now();
    let mut result = ApplyResult::new();
    info!(backend = backend.name(), service = %plan.identity, "Applying deployment plan");

    let mut remaining = actions.actions.iter();
    for action in remaining.by_ref() {
        let outcome = match action.resource_kind {
            ResourceKind::VirtualNode => backend.register_virtual_node(&plan.virtual_node).await,
            ResourceKind::TaskDefinition => {
                backend
                    .register_task_definition(&plan.task_definition)
                    .await
            }
            ResourceKind::Service => backend.create_or_update_service(&plan.service).await,
            ResourceKind::ScalingPolicy => backend.attach_scaling_policy(&plan.scaling).await,
        };

        match outcome {
            Ok(message) => {
                info!(action = %action.id, "{}", message);
                result.add_success(action.id.clone(), message);
            }
            Err(e) => {
                error!(action = %action.id, error = %e, "Action failed");
                result.add_failure(action.id.clone(), e.to_string());
                break;
            }
        }
    }

    for action in remaining {
        warn!(action = %action.id, "Skipped after earlier failure");
        result.skipped.push(action.id.clone());
    }

    result.duration_ms = started.elapsed().as_millis() as u64;
    Ok(result)
}
