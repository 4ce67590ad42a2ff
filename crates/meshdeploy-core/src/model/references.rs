//! 既存リソースへの参照
//!
//! いずれも識別子で解決される外部リソースで、コンパイラが作成することはありません。

use serde::{Deserialize, Serialize};

/// サービスメッシュ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshRef {
    pub name: String,
    /// 不透明なリソース識別子（ARN またはリソースパス）
    pub id: String,
}

/// メッシュに登録済みの仮想サービス（バックエンド）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualServiceRef {
    pub name: String,
    pub mesh: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpcRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterRef {
    pub name: String,
    pub vpc_id: String,
}

/// プライベートDNSネームスペース
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceRef {
    pub id: String,
    pub name: String,
    pub arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityGroupRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogGroupRef {
    pub name: String,
}

/// 参照の種類（解決失敗時のエラー表示用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceKind {
    Mesh,
    Vpc,
    Cluster,
    Namespace,
    Subnet,
    SecurityGroup,
    LogGroup,
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceKind::Mesh => write!(f, "mesh"),
            ReferenceKind::Vpc => write!(f, "VPC"),
            ReferenceKind::Cluster => write!(f, "cluster"),
            ReferenceKind::Namespace => write!(f, "namespace"),
            ReferenceKind::Subnet => write!(f, "subnet"),
            ReferenceKind::SecurityGroup => write!(f, "security group"),
            ReferenceKind::LogGroup => write!(f, "log group"),
        }
    }
}
