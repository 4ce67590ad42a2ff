//! デプロイ計画のコンパイラ
//!
//! 以下のステージを順に実行します。各ステージの出力が次のステージの入力になるため、
//! 順序を入れ替えることはできません。
//! 1. 環境コンテキストの検証
//! 2. マニフェストの解決
//! 3. 仮想ノードの構築
//! 4. タスク定義の構築
//! 5. サービスの構成
//! 6. スケーリングポリシーの付与

use crate::catalog::{ResourceCatalog, require};
use crate::error::{CompileError, Result};
use crate::mesh::{MeshInputs, MeshTopologyBuilder};
use crate::model::{
    EnvironmentContext, ReferenceKind, ScalingPolicy, ServiceIdentity, ServiceManifest,
    ServiceSpec, TaskDefinitionSpec, VirtualNodeSpec,
};
use crate::policy::DeploymentPolicy;
use crate::resolver::resolve_manifest;
use crate::scaling::bind_scaling_policy;
use crate::service::ServiceComposer;
use crate::task::{TaskDefinitionBuilder, TaskInputs};
use crate::validator::{Diagnostics, validate_environment};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// 検証エラーの扱い
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationMode {
    /// 検証エラーが一つでもあれば解決前に中断する（デフォルト）
    #[default]
    Strict,
    /// 検証エラーは計画の診断情報として残し、構築を続ける
    Advisory,
}

/// 完全に解決されたデプロイ計画
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentPlan {
    pub identity: ServiceIdentity,
    pub virtual_node: VirtualNodeSpec,
    pub task_definition: TaskDefinitionSpec,
    pub service: ServiceSpec,
    pub scaling: ScalingPolicy,
    /// Advisory モードで報告された検証エラー
    #[serde(default)]
    pub diagnostics: Diagnostics,
}

pub struct Compiler<'a> {
    policy: &'a DeploymentPolicy,
    catalog: &'a dyn ResourceCatalog,
    mode: ValidationMode,
}

impl<'a> Compiler<'a> {
    pub fn new(policy: &'a DeploymentPolicy, catalog: &'a dyn ResourceCatalog) -> Self {
        Self {
            policy,
            catalog,
            mode: ValidationMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    /// マニフェストと環境コンテキストからデプロイ計画を生成する
    ///
    /// 同じ入力に対しては常に同じ計画を返します。
    #[instrument(skip_all, fields(mode = ?self.mode))]
    pub fn compile(
        &self,
        manifest: &ServiceManifest,
        context: &EnvironmentContext,
    ) -> Result<DeploymentPlan> {
        // 1. 検証
        let mut diagnostics = Diagnostics::new();
        validate_environment(context, &mut diagnostics);
        if !diagnostics.is_empty() {
            match self.mode {
                ValidationMode::Strict => {
                    return Err(CompileError::Validation(diagnostics.into_errors()));
                }
                ValidationMode::Advisory => {
                    warn!(
                        errors = diagnostics.len(),
                        "Continuing with invalid environment context"
                    );
                }
            }
        }

        // 2. マニフェスト解決
        let manifest = resolve_manifest(manifest)?;
        let identity = context.identity();

        // 3. 仮想ノード
        let virtual_node = MeshTopologyBuilder::new(self.catalog, self.policy).build(&MeshInputs {
            mesh_name: context.mesh_name(),
            app_port: manifest.app_container.port,
            identity: &identity,
            environment_name: &context.environment_name,
            backends: &manifest.backends,
        })?;

        // 4. タスク定義
        let log_group = require(
            self.catalog.log_group(&context.log_group_name),
            ReferenceKind::LogGroup,
            &context.log_group_name,
        )?;
        let task_definition = TaskDefinitionBuilder::new(self.policy).build(&TaskInputs {
            manifest: &manifest,
            identity: &identity,
            execution_role_arn: &context.task_exec_role_arn,
            task_role_arn: &context.task_role_arn,
            envoy_image: &context.envoy_image,
            log_group: &log_group,
            virtual_node: &virtual_node,
        })?;

        // 5. サービス
        let service = ServiceComposer::new(self.catalog, self.policy).compose(
            context,
            &identity,
            &task_definition,
            &virtual_node,
        )?;

        // 6. スケーリング
        let scaling = bind_scaling_policy(&service, self.policy);

        info!(service = %identity, "Deployment plan compiled");

        Ok(DeploymentPlan {
            identity,
            virtual_node,
            task_definition,
            service,
            scaling,
            diagnostics,
        })
    }
}
