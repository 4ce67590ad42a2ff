//! In-memory backend that records calls instead of provisioning

use crate::action::ResourceKind;
use crate::error::{CloudError, Result};
use crate::provider::ProvisioningBackend;
use async_trait::async_trait;
use meshdeploy_core::{ScalingPolicy, ServiceSpec, TaskDefinitionSpec, VirtualNodeSpec};
use std::sync::{Mutex, MutexGuard};

/// A call received by the dry-run backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub kind: ResourceKind,
    pub resource_id: String,
}

/// Dry-run backend
///
/// Records every call in order. `fail_on` makes calls for one resource kind
/// return an error, which is how apply ordering is exercised without a cloud.
#[derive(Debug, Default)]
pub struct DryRunBackend {
    calls: Mutex<Vec<RecordedCall>>,
    fail_on: Option<ResourceKind>,
}

impl DryRunBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(kind: ResourceKind) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on: Some(kind),
        }
    }

    /// Calls received so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.recorded().to_vec()
    }

    // A panic elsewhere while holding the lock must not lose the call log
    fn recorded(&self) -> MutexGuard<'_, Vec<RecordedCall>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, kind: ResourceKind, resource_id: &str, verb: &str) -> Result<String> {
        if self.fail_on == Some(kind) {
            return Err(CloudError::ApiError(format!(
                "dry-run failure injected for {} {}",
                kind, resource_id
            )));
        }
        self.recorded().push(RecordedCall {
            kind,
            resource_id: resource_id.to_string(),
        });
        Ok(format!("[dry-run] {} {} {}", verb, kind, resource_id))
    }
}

#[async_trait]
impl ProvisioningBackend for DryRunBackend {
    fn name(&self) -> &str {
        "dry-run"
    }

    async fn register_virtual_node(&self, spec: &VirtualNodeSpec) -> Result<String> {
        self.record(ResourceKind::VirtualNode, &spec.name, "would register")
    }

    async fn register_task_definition(&self, spec: &TaskDefinitionSpec) -> Result<String> {
        self.record(ResourceKind::TaskDefinition, &spec.family, "would register")
    }

    async fn create_or_update_service(&self, spec: &ServiceSpec) -> Result<String> {
        self.record(ResourceKind::Service, spec.name.as_str(), "would create or update")
    }

    async fn attach_scaling_policy(&self, policy: &ScalingPolicy) -> Result<String> {
        self.record(ResourceKind::ScalingPolicy, &policy.service_name, "would attach")
    }
}
