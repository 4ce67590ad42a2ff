//! リソース仕様
//!
//! パイプラインの各ステージが生成し、プロビジョニングバックエンドに渡される値です。

use super::identity::ServiceIdentity;
use super::references::{
    ClusterRef, LogGroupRef, MeshRef, NamespaceRef, SecurityGroupRef, SubnetRef, VirtualServiceRef,
    VpcRef,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// メッシュの仮想ノード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualNodeSpec {
    /// プロキシコンテナに渡す不透明な識別子
    pub id: String,
    pub name: String,
    pub mesh: MeshRef,
    pub listeners: Vec<ListenerSpec>,
    pub service_discovery: ServiceDiscoverySpec,
    pub access_log: AccessLogSpec,
    /// マニフェストの宣言順
    pub backends: Vec<VirtualServiceRef>,
}

impl VirtualNodeSpec {
    /// 解決済みのアプリケーションポート
    ///
    /// リスナーは常に一つだけ生成されるので、これがポートの唯一の出所です。
    pub fn listener_port(&self) -> u16 {
        self.listeners.first().map(|l| l.port).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenerSpec {
    pub protocol: ListenerProtocol,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListenerProtocol {
    Http,
}

/// DNSベースのサービスディスカバリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDiscoverySpec {
    pub hostname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessLogSpec {
    pub path: String,
}

/// タスク定義
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDefinitionSpec {
    pub family: String,
    pub cpu: u32,
    pub memory: u32,
    pub execution_role_arn: String,
    pub task_role_arn: String,
    pub proxy_configuration: ProxyConfiguration,
    pub app: ContainerSpec,
    pub proxy: ContainerSpec,
}

/// プロキシによるトラフィック横取りの設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfiguration {
    pub container_name: String,
    pub app_ports: Vec<u16>,
    pub proxy_ingress_port: u16,
    pub proxy_egress_port: u16,
    pub ignored_uid: u32,
    pub egress_ignored_ips: Vec<String>,
}

/// コンテナ定義
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    pub essential: bool,
    pub user: Option<String>,
    pub command: Option<Vec<String>>,
    pub port_mappings: Vec<PortMapping>,
    pub environment: BTreeMap<String, String>,
    pub health_check: HealthCheckSpec,
    pub logging: LogConfiguration,
    pub stop_timeout_secs: u32,
    pub depends_on: Vec<ContainerDependency>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortMapping {
    pub container_port: u16,
    pub protocol: TransportProtocol,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportProtocol {
    Tcp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckSpec {
    pub command: Vec<String>,
    pub retries: u32,
    pub timeout_secs: u32,
    pub interval_secs: u32,
    pub start_period_secs: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfiguration {
    pub driver: String,
    pub log_group: LogGroupRef,
    pub stream_prefix: String,
}

/// 起動順序の依存関係
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerDependency {
    pub container_name: String,
    pub condition: DependencyCondition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DependencyCondition {
    /// 依存先のヘルスチェックが成功するまで待つ
    Healthy,
}

/// サービス定義
///
/// タスク定義と仮想ノードは名前で参照するだけで、所有しません。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSpec {
    pub name: ServiceIdentity,
    pub cluster: ClusterRef,
    pub task_definition: String,
    pub virtual_node: String,
    pub discovery: DiscoveryBinding,
    pub network: NetworkPlacement,
}

/// サービスディスカバリへの登録
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryBinding {
    pub namespace: NamespaceRef,
    pub name: String,
    pub container_name: String,
    pub container_port: u16,
    pub dns_ttl_secs: u32,
}

/// ネットワーク配置（サブネットは常に2つ）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkPlacement {
    pub vpc: VpcRef,
    pub subnets: [SubnetRef; 2],
    pub security_group: SecurityGroupRef,
}

/// オートスケーリングポリシー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalingPolicy {
    pub service_name: String,
    pub min_capacity: u32,
    pub max_capacity: u32,
    pub target_cpu_utilization_percent: u32,
}
