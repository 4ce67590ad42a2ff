//! 仮想ノードの構築
//!
//! アプリケーションポートとメッシュ設定の整合はここで一度だけ取ります。
//! 後続のビルダーはポートを仮想ノードのリスナーから読みます。

use crate::catalog::{ResourceCatalog, require};
use crate::error::{CompileError, Result};
use crate::model::{
    AccessLogSpec, ListenerProtocol, ListenerSpec, ReferenceKind, ServiceDiscoverySpec,
    ServiceIdentity, VirtualNodeSpec,
};
use crate::policy::DeploymentPolicy;
use tracing::{debug, info, instrument};

/// 仮想ノードの入力
#[derive(Debug, Clone)]
pub struct MeshInputs<'a> {
    pub mesh_name: &'a str,
    pub app_port: u16,
    pub identity: &'a ServiceIdentity,
    pub environment_name: &'a str,
    pub backends: &'a [String],
}

pub struct MeshTopologyBuilder<'a> {
    catalog: &'a dyn ResourceCatalog,
    policy: &'a DeploymentPolicy,
}

impl<'a> MeshTopologyBuilder<'a> {
    pub fn new(catalog: &'a dyn ResourceCatalog, policy: &'a DeploymentPolicy) -> Self {
        Self { catalog, policy }
    }

    /// 仮想ノードを構築する
    ///
    /// バックエンドはマニフェストの宣言順に一つずつ解決します。
    /// 一つでも見つからなければ致命的エラーです（バックエンドは事前に存在している必要があります）。
    #[instrument(skip_all, fields(mesh = inputs.mesh_name, identity = %inputs.identity))]
    pub fn build(&self, inputs: &MeshInputs<'_>) -> Result<VirtualNodeSpec> {
        let mesh = require(
            self.catalog.mesh(inputs.mesh_name),
            ReferenceKind::Mesh,
            inputs.mesh_name,
        )?;

        let name = inputs.identity.virtual_node_name();
        info!(virtual_node = %name, "Creating virtual node");

        let mut backends = Vec::with_capacity(inputs.backends.len());
        for backend in inputs.backends {
            let reference = self.catalog.virtual_service(&mesh, backend).ok_or_else(|| {
                CompileError::UnresolvedBackend {
                    mesh: mesh.name.clone(),
                    backend: backend.clone(),
                }
            })?;
            debug!(backend = %reference.name, "Backend resolved");
            backends.push(reference);
        }

        Ok(VirtualNodeSpec {
            id: format!("{}/virtualNode/{}", mesh.id, name),
            name,
            listeners: vec![ListenerSpec {
                protocol: ListenerProtocol::Http,
                port: inputs.app_port,
            }],
            service_discovery: ServiceDiscoverySpec {
                hostname: inputs.identity.discovery_hostname(inputs.environment_name),
            },
            access_log: AccessLogSpec {
                path: self.policy.access_log_path.clone(),
            },
            mesh,
            backends,
        })
    }
}
