//! オートスケーリングポリシーの付与

use crate::model::{ScalingPolicy, ServiceSpec};
use crate::policy::DeploymentPolicy;
use tracing::debug;

/// 構成済みサービスにスケーリングポリシーを付与する
///
/// 範囲と目標値はデプロイ共通の定数で、マニフェストからは変更できません。
pub fn bind_scaling_policy(service: &ServiceSpec, policy: &DeploymentPolicy) -> ScalingPolicy {
    let bounds = &policy.scaling;
    debug!(
        service = %service.name,
        min = bounds.min_capacity,
        max = bounds.max_capacity,
        target = bounds.target_cpu_utilization_percent,
        "Attaching scaling policy"
    );
    ScalingPolicy {
        service_name: service.name.to_string(),
        min_capacity: bounds.min_capacity,
        max_capacity: bounds.max_capacity,
        target_cpu_utilization_percent: bounds.target_cpu_utilization_percent,
    }
}
