//! サービスの構成
//!
//! 既存のクラスター、VPC、ネームスペース、サブネット、セキュリティグループに
//! サービスを接続します。ネットワーク自体は作成しません。

use crate::catalog::{ResourceCatalog, require};
use crate::error::Result;
use crate::model::{
    DiscoveryBinding, EnvField, EnvironmentContext, NetworkPlacement, ReferenceKind,
    ServiceIdentity, ServiceSpec, TaskDefinitionSpec, VirtualNodeSpec,
};
use crate::policy::DeploymentPolicy;
use tracing::{debug, info, instrument};

pub struct ServiceComposer<'a> {
    catalog: &'a dyn ResourceCatalog,
    policy: &'a DeploymentPolicy,
}

impl<'a> ServiceComposer<'a> {
    pub fn new(catalog: &'a dyn ResourceCatalog, policy: &'a DeploymentPolicy) -> Self {
        Self { catalog, policy }
    }

    /// サービス定義を構成する
    ///
    /// 完成したタスク定義と仮想ノードがなければ呼び出せません。
    #[instrument(skip_all, fields(identity = %identity))]
    pub fn compose(
        &self,
        context: &EnvironmentContext,
        identity: &ServiceIdentity,
        task_definition: &TaskDefinitionSpec,
        virtual_node: &VirtualNodeSpec,
    ) -> Result<ServiceSpec> {
        debug!("Importing external resources");
        let security_group = require(
            self.catalog.security_group(&context.security_group_id),
            ReferenceKind::SecurityGroup,
            &context.security_group_id,
        )?;
        let vpc = require(
            self.catalog.vpc(&context.vpc_id),
            ReferenceKind::Vpc,
            &context.vpc_id,
        )?;
        let cluster = require(
            self.catalog.cluster(&context.cluster_name, &vpc),
            ReferenceKind::Cluster,
            &context.cluster_name,
        )?;
        let namespace = require(
            self.catalog.namespace(
                &context.namespace_id,
                &context.namespace_name,
                &context.namespace_arn,
            ),
            ReferenceKind::Namespace,
            namespace_label(context),
        )?;
        let subnet_one = require(
            self.catalog.subnet(&context.subnet_one),
            ReferenceKind::Subnet,
            &context.subnet_one,
        )?;
        let subnet_two = require(
            self.catalog.subnet(&context.subnet_two),
            ReferenceKind::Subnet,
            &context.subnet_two,
        )?;

        info!(service = %identity, "Creating service");

        Ok(ServiceSpec {
            name: identity.clone(),
            cluster,
            task_definition: task_definition.family.clone(),
            virtual_node: virtual_node.name.clone(),
            discovery: DiscoveryBinding {
                namespace,
                name: identity.to_string(),
                container_name: task_definition.app.name.clone(),
                container_port: virtual_node.listener_port(),
                dns_ttl_secs: self.policy.discovery_ttl_secs,
            },
            network: NetworkPlacement {
                vpc,
                subnets: [subnet_one, subnet_two],
                security_group,
            },
        })
    }
}

/// 解決できなかったネームスペースの表示名
///
/// 空の属性があればその変数名、なければネームスペース ID。
fn namespace_label(context: &EnvironmentContext) -> &str {
    [
        EnvField::NamespaceId,
        EnvField::NamespaceName,
        EnvField::NamespaceArn,
    ]
    .into_iter()
    .find(|field| context.get(*field).trim().is_empty())
    .map_or(context.namespace_id.as_str(), |field| field.variable())
}
