//! 既存リソースのカタログ
//!
//! メッシュ、仮想サービス、VPC、クラスター、ネームスペース、サブネット、
//! セキュリティグループ、ロググループはすべて識別子で参照するだけで、
//! ここで作成されることはありません。

use crate::error::{CompileError, Result};
use crate::model::{
    ClusterRef, EnvironmentContext, LogGroupRef, MeshRef, NamespaceRef, ReferenceKind,
    SecurityGroupRef, SubnetRef, VirtualServiceRef, VpcRef,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 識別子から既存リソースへの参照を解決する
pub trait ResourceCatalog {
    fn mesh(&self, name: &str) -> Option<MeshRef>;

    /// メッシュ内の仮想サービスを名前で検索
    fn virtual_service(&self, mesh: &MeshRef, name: &str) -> Option<VirtualServiceRef>;

    fn vpc(&self, id: &str) -> Option<VpcRef>;

    fn cluster(&self, name: &str, vpc: &VpcRef) -> Option<ClusterRef>;

    fn namespace(&self, id: &str, name: &str, arn: &str) -> Option<NamespaceRef>;

    fn subnet(&self, id: &str) -> Option<SubnetRef>;

    fn security_group(&self, id: &str) -> Option<SecurityGroupRef>;

    fn log_group(&self, name: &str) -> Option<LogGroupRef>;
}

/// 検索結果を必須参照として扱う
pub(crate) fn require<T>(found: Option<T>, kind: ReferenceKind, id: &str) -> Result<T> {
    found.ok_or_else(|| CompileError::UnresolvedReference {
        kind,
        id: id.to_string(),
    })
}

/// ARN の修飾に使うパーティション/リージョン/アカウント
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArnScope {
    pub partition: String,
    pub region: String,
    pub account: String,
}

impl ArnScope {
    pub fn new(region: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            partition: "aws".to_string(),
            region: region.into(),
            account: account.into(),
        }
    }

    fn appmesh(&self, resource: &str) -> String {
        format!(
            "arn:{}:appmesh:{}:{}:{}",
            self.partition, self.region, self.account, resource
        )
    }
}

/// 属性インポートによるカタログ
///
/// 空でない識別子はすべて存在するものとして解決します。
/// 存在確認はプロビジョニング時にバックエンドが行います。
#[derive(Debug, Clone, Default)]
pub struct ImportCatalog {
    arn_scope: Option<ArnScope>,
}

impl ImportCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_arn_scope(mut self, scope: ArnScope) -> Self {
        self.arn_scope = Some(scope);
        self
    }

    /// リージョンとアカウントが両方あれば ARN で修飾する
    pub fn for_context(context: &EnvironmentContext) -> Self {
        match (&context.region, &context.account_id) {
            (Some(region), Some(account)) if !region.is_empty() && !account.is_empty() => {
                Self::new().with_arn_scope(ArnScope::new(region, account))
            }
            _ => Self::new(),
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl ResourceCatalog for ImportCatalog {
    fn mesh(&self, name: &str) -> Option<MeshRef> {
        let name = non_empty(name)?;
        let path = format!("mesh/{}", name);
        let id = match &self.arn_scope {
            Some(scope) => scope.appmesh(&path),
            None => path,
        };
        Some(MeshRef {
            name: name.to_string(),
            id,
        })
    }

    fn virtual_service(&self, mesh: &MeshRef, name: &str) -> Option<VirtualServiceRef> {
        let name = non_empty(name)?;
        Some(VirtualServiceRef {
            name: name.to_string(),
            mesh: mesh.name.clone(),
            id: format!("{}/virtualService/{}", mesh.id, name),
        })
    }

    fn vpc(&self, id: &str) -> Option<VpcRef> {
        non_empty(id).map(|id| VpcRef { id: id.to_string() })
    }

    fn cluster(&self, name: &str, vpc: &VpcRef) -> Option<ClusterRef> {
        non_empty(name).map(|name| ClusterRef {
            name: name.to_string(),
            vpc_id: vpc.id.clone(),
        })
    }

    fn namespace(&self, id: &str, name: &str, arn: &str) -> Option<NamespaceRef> {
        Some(NamespaceRef {
            id: non_empty(id)?.to_string(),
            name: non_empty(name)?.to_string(),
            arn: non_empty(arn)?.to_string(),
        })
    }

    fn subnet(&self, id: &str) -> Option<SubnetRef> {
        non_empty(id).map(|id| SubnetRef { id: id.to_string() })
    }

    fn security_group(&self, id: &str) -> Option<SecurityGroupRef> {
        non_empty(id).map(|id| SecurityGroupRef { id: id.to_string() })
    }

    fn log_group(&self, name: &str) -> Option<LogGroupRef> {
        non_empty(name).map(|name| LogGroupRef {
            name: name.to_string(),
        })
    }
}

/// 登録済みリソースの一覧によるカタログ
///
/// 一覧にある識別子だけを解決します。YAML形式：
/// ```yaml
/// meshes:
///   staging: [billing, catalog]
/// vpcs: [vpc-0a1b2c]
/// clusters:
///   staging-cluster: vpc-0a1b2c
/// namespaces:
///   - id: ns-4f5e6d
///     name: staging.local
///     arn: arn:aws:servicediscovery:eu-west-1:123456789012:namespace/ns-4f5e6d
/// subnets: [subnet-111, subnet-222]
/// security_groups: [sg-333]
/// log_groups: [/staging/services]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticCatalog {
    /// メッシュ名 → 登録済み仮想サービス名
    pub meshes: BTreeMap<String, Vec<String>>,
    pub vpcs: Vec<String>,
    /// クラスター名 → VPC ID
    pub clusters: BTreeMap<String, String>,
    pub namespaces: Vec<NamespaceRef>,
    pub subnets: Vec<String>,
    pub security_groups: Vec<String>,
    pub log_groups: Vec<String>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mesh<I, S>(mut self, mesh: &str, virtual_services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.meshes.insert(
            mesh.to_string(),
            virtual_services.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub fn with_vpc(mut self, id: &str) -> Self {
        self.vpcs.push(id.to_string());
        self
    }

    pub fn with_cluster(mut self, name: &str, vpc_id: &str) -> Self {
        self.clusters.insert(name.to_string(), vpc_id.to_string());
        self
    }

    pub fn with_namespace(mut self, id: &str, name: &str, arn: &str) -> Self {
        self.namespaces.push(NamespaceRef {
            id: id.to_string(),
            name: name.to_string(),
            arn: arn.to_string(),
        });
        self
    }

    pub fn with_subnet(mut self, id: &str) -> Self {
        self.subnets.push(id.to_string());
        self
    }

    pub fn with_security_group(mut self, id: &str) -> Self {
        self.security_groups.push(id.to_string());
        self
    }

    pub fn with_log_group(mut self, name: &str) -> Self {
        self.log_groups.push(name.to_string());
        self
    }
}

impl ResourceCatalog for StaticCatalog {
    fn mesh(&self, name: &str) -> Option<MeshRef> {
        self.meshes.contains_key(name).then(|| MeshRef {
            name: name.to_string(),
            id: format!("mesh/{}", name),
        })
    }

    fn virtual_service(&self, mesh: &MeshRef, name: &str) -> Option<VirtualServiceRef> {
        let services = self.meshes.get(&mesh.name)?;
        services.iter().any(|s| s == name).then(|| VirtualServiceRef {
            name: name.to_string(),
            mesh: mesh.name.clone(),
            id: format!("{}/virtualService/{}", mesh.id, name),
        })
    }

    fn vpc(&self, id: &str) -> Option<VpcRef> {
        self.vpcs
            .iter()
            .any(|v| v == id)
            .then(|| VpcRef { id: id.to_string() })
    }

    fn cluster(&self, name: &str, vpc: &VpcRef) -> Option<ClusterRef> {
        match self.clusters.get(name) {
            Some(vpc_id) if *vpc_id == vpc.id => Some(ClusterRef {
                name: name.to_string(),
                vpc_id: vpc_id.clone(),
            }),
            _ => None,
        }
    }

    fn namespace(&self, id: &str, name: &str, arn: &str) -> Option<NamespaceRef> {
        self.namespaces
            .iter()
            .find(|ns| ns.id == id && ns.name == name && ns.arn == arn)
            .cloned()
    }

    fn subnet(&self, id: &str) -> Option<SubnetRef> {
        self.subnets
            .iter()
            .any(|s| s == id)
            .then(|| SubnetRef { id: id.to_string() })
    }

    fn security_group(&self, id: &str) -> Option<SecurityGroupRef> {
        self.security_groups
            .iter()
            .any(|s| s == id)
            .then(|| SecurityGroupRef { id: id.to_string() })
    }

    fn log_group(&self, name: &str) -> Option<LogGroupRef> {
        self.log_groups.iter().any(|l| l == name).then(|| LogGroupRef {
            name: name.to_string(),
        })
    }
}
