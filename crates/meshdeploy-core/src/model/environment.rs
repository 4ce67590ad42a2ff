//! 環境コンテキスト定義

use super::identity::ServiceIdentity;
use serde::{Deserialize, Serialize};

/// デプロイ先ごとに与えられる環境コンテキスト
///
/// プロセス境界で一度だけ構築され、コンパイラには値として渡されます。
/// コンパイラ自身がプロセスの環境変数を読むことはありません。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentContext {
    pub environment_name: String,
    pub vpc_id: String,
    pub cluster_name: String,
    pub service_name: String,
    pub commit_id: String,
    /// サイドカープロキシ（Envoy）のイメージ
    pub envoy_image: String,
    pub namespace_id: String,
    pub namespace_arn: String,
    pub namespace_name: String,
    pub log_group_name: String,
    pub subnet_one: String,
    pub subnet_two: String,
    pub security_group_id: String,
    pub task_exec_role_arn: String,
    pub task_role_arn: String,
    /// ARN の修飾にのみ使用（検証対象外）
    #[serde(default)]
    pub region: Option<String>,
    /// ARN の修飾にのみ使用（検証対象外）
    #[serde(default)]
    pub account_id: Option<String>,
}

impl EnvironmentContext {
    /// メッシュ名は環境名と同一
    pub fn mesh_name(&self) -> &str {
        &self.environment_name
    }

    /// サービス名とコミットIDから導出されるサービス識別子
    pub fn identity(&self) -> ServiceIdentity {
        ServiceIdentity::new(&self.service_name, &self.commit_id)
    }

    /// 指定フィールドの値を取得
    pub fn get(&self, field: EnvField) -> &str {
        match field {
            EnvField::EnvironmentName => &self.environment_name,
            EnvField::VpcId => &self.vpc_id,
            EnvField::ClusterName => &self.cluster_name,
            EnvField::ServiceName => &self.service_name,
            EnvField::CommitId => &self.commit_id,
            EnvField::EnvoyImage => &self.envoy_image,
            EnvField::NamespaceId => &self.namespace_id,
            EnvField::NamespaceArn => &self.namespace_arn,
            EnvField::NamespaceName => &self.namespace_name,
            EnvField::LogGroupName => &self.log_group_name,
            EnvField::SubnetOne => &self.subnet_one,
            EnvField::SubnetTwo => &self.subnet_two,
            EnvField::SecurityGroupId => &self.security_group_id,
            EnvField::TaskExecRoleArn => &self.task_exec_role_arn,
            EnvField::TaskRoleArn => &self.task_role_arn,
        }
    }

    /// 指定フィールドに値を設定
    pub fn set(&mut self, field: EnvField, value: impl Into<String>) {
        let slot = match field {
            EnvField::EnvironmentName => &mut self.environment_name,
            EnvField::VpcId => &mut self.vpc_id,
            EnvField::ClusterName => &mut self.cluster_name,
            EnvField::ServiceName => &mut self.service_name,
            EnvField::CommitId => &mut self.commit_id,
            EnvField::EnvoyImage => &mut self.envoy_image,
            EnvField::NamespaceId => &mut self.namespace_id,
            EnvField::NamespaceArn => &mut self.namespace_arn,
            EnvField::NamespaceName => &mut self.namespace_name,
            EnvField::LogGroupName => &mut self.log_group_name,
            EnvField::SubnetOne => &mut self.subnet_one,
            EnvField::SubnetTwo => &mut self.subnet_two,
            EnvField::SecurityGroupId => &mut self.security_group_id,
            EnvField::TaskExecRoleArn => &mut self.task_exec_role_arn,
            EnvField::TaskRoleArn => &mut self.task_role_arn,
        };
        *slot = value.into();
    }
}

/// 環境コンテキストの必須フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnvField {
    EnvironmentName,
    VpcId,
    ClusterName,
    ServiceName,
    CommitId,
    EnvoyImage,
    NamespaceId,
    NamespaceArn,
    NamespaceName,
    LogGroupName,
    SubnetOne,
    SubnetTwo,
    SecurityGroupId,
    TaskExecRoleArn,
    TaskRoleArn,
}

impl EnvField {
    /// 検証順に並べた全フィールド
    pub const ALL: [EnvField; 15] = [
        EnvField::EnvironmentName,
        EnvField::VpcId,
        EnvField::ClusterName,
        EnvField::ServiceName,
        EnvField::CommitId,
        EnvField::EnvoyImage,
        EnvField::NamespaceId,
        EnvField::NamespaceArn,
        EnvField::NamespaceName,
        EnvField::LogGroupName,
        EnvField::SubnetOne,
        EnvField::SubnetTwo,
        EnvField::SecurityGroupId,
        EnvField::TaskExecRoleArn,
        EnvField::TaskRoleArn,
    ];

    /// 対応する環境変数名
    pub fn variable(self) -> &'static str {
        match self {
            EnvField::EnvironmentName => "ENVIRONMENT_NAME",
            EnvField::VpcId => "VPC_ID",
            EnvField::ClusterName => "CLUSTER_NAME",
            EnvField::ServiceName => "SERVICE_NAME",
            EnvField::CommitId => "CONFIG_COMMIT_ID",
            EnvField::EnvoyImage => "ENVOY_IMAGE_URI",
            EnvField::NamespaceId => "NAMESPACE_ID",
            EnvField::NamespaceArn => "NAMESPACE_ARN",
            EnvField::NamespaceName => "NAMESPACE_NAME",
            EnvField::LogGroupName => "LOG_GROUP_NAME",
            EnvField::SubnetOne => "VPC_SUBNET_ONE",
            EnvField::SubnetTwo => "VPC_SUBNET_TWO",
            EnvField::SecurityGroupId => "SECURITY_GROUP_ID",
            EnvField::TaskExecRoleArn => "TASK_EXEC_ROLE_ARN",
            EnvField::TaskRoleArn => "TASK_ROLE_ARN",
        }
    }

    /// 値が空のときに報告する固定メッセージ
    pub fn message(self) -> &'static str {
        match self {
            EnvField::EnvironmentName => "Invalid Environment name",
            EnvField::VpcId => "Invalid VPC id",
            EnvField::ClusterName => "Invalid cluster name",
            EnvField::ServiceName => "Invalid service name",
            EnvField::CommitId => "Invalid Commit ID",
            EnvField::EnvoyImage => "Invalid Envoy image URI",
            EnvField::NamespaceId => "Invalid namespace id",
            EnvField::NamespaceArn => "Invalid namespace Arn",
            EnvField::NamespaceName => "Invalid namespace name",
            EnvField::LogGroupName => "Invalid Log Group name",
            EnvField::SubnetOne => "Invalid subnet one",
            EnvField::SubnetTwo => "Invalid subnet two",
            EnvField::SecurityGroupId => "Invalid security group",
            EnvField::TaskExecRoleArn => "Invalid task exec role arn",
            EnvField::TaskRoleArn => "Invalid task role arn",
        }
    }
}

impl std::fmt::Display for EnvField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.variable())
    }
}
