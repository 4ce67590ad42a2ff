//! タスク定義の構築
//!
//! アプリケーションコンテナとサイドカープロキシの2コンテナ構成で、
//! アプリケーションはプロキシが healthy になるまで起動しません。

use crate::error::{CompileError, Result};
use crate::model::{
    ContainerDependency, ContainerSpec, DependencyCondition, HealthCheckSpec, LogConfiguration,
    LogGroupRef, PortMapping, ProxyConfiguration, ServiceIdentity, TaskDefinitionSpec,
    TransportProtocol, VirtualNodeSpec,
};
use crate::policy::DeploymentPolicy;
use crate::resolver::ResolvedManifest;
use std::collections::BTreeMap;
use tracing::{info, instrument};

/// プロキシに仮想ノードを伝える環境変数
pub const APPMESH_RESOURCE_ENV: &str = "APPMESH_RESOURCE_ARN";

/// タスク定義の入力
#[derive(Debug, Clone)]
pub struct TaskInputs<'a> {
    pub manifest: &'a ResolvedManifest,
    pub identity: &'a ServiceIdentity,
    pub execution_role_arn: &'a str,
    pub task_role_arn: &'a str,
    pub envoy_image: &'a str,
    pub log_group: &'a LogGroupRef,
    pub virtual_node: &'a VirtualNodeSpec,
}

pub struct TaskDefinitionBuilder<'a> {
    policy: &'a DeploymentPolicy,
}

impl<'a> TaskDefinitionBuilder<'a> {
    pub fn new(policy: &'a DeploymentPolicy) -> Self {
        Self { policy }
    }

    /// タスク定義を構築する
    ///
    /// 実行ロール/タスクロールのどちらかが空の場合は登録できないため致命的エラーです。
    #[instrument(skip_all, fields(family = %inputs.manifest.task.family))]
    pub fn build(&self, inputs: &TaskInputs<'_>) -> Result<TaskDefinitionSpec> {
        if inputs.execution_role_arn.trim().is_empty() {
            return Err(CompileError::MissingIdentity("task execution role ARN"));
        }
        if inputs.task_role_arn.trim().is_empty() {
            return Err(CompileError::MissingIdentity("task role ARN"));
        }

        let task = &inputs.manifest.task;
        info!("Creating task definition");

        let port = inputs.virtual_node.listener_port();
        let proxy = self.proxy_container(inputs);
        let app = self.app_container(inputs, port, &proxy);

        Ok(TaskDefinitionSpec {
            family: task.family.clone(),
            cpu: task.cpu,
            memory: task.memory,
            execution_role_arn: inputs.execution_role_arn.to_string(),
            task_role_arn: inputs.task_role_arn.to_string(),
            proxy_configuration: ProxyConfiguration {
                container_name: self.policy.proxy.container_name.clone(),
                app_ports: vec![port],
                proxy_ingress_port: self.policy.proxy.ingress_port,
                proxy_egress_port: self.policy.proxy.egress_port,
                ignored_uid: self.policy.proxy.ignored_uid,
                egress_ignored_ips: self.policy.proxy.egress_ignored_ips.clone(),
            },
            app,
            proxy,
        })
    }

    fn app_container(
        &self,
        inputs: &TaskInputs<'_>,
        port: u16,
        proxy: &ContainerSpec,
    ) -> ContainerSpec {
        let app = &inputs.manifest.app_container;
        let health_command = format!(
            "curl -f http://localhost:{}{} || exit 1",
            port, app.health_check_path
        );

        ContainerSpec {
            name: self.policy.app_container_name.clone(),
            image: app.image.clone(),
            essential: true,
            user: None,
            command: app.command.clone(),
            port_mappings: vec![PortMapping {
                container_port: port,
                protocol: TransportProtocol::Tcp,
            }],
            environment: BTreeMap::new(),
            health_check: self.health_check(health_command),
            logging: self.logging(inputs.log_group, inputs.identity.app_log_prefix()),
            stop_timeout_secs: self.policy.stop_timeout_secs,
            // 片方向の依存のみ（プロキシ → アプリの逆向きは作らない）
            depends_on: vec![ContainerDependency {
                container_name: proxy.name.clone(),
                condition: DependencyCondition::Healthy,
            }],
        }
    }

    fn proxy_container(&self, inputs: &TaskInputs<'_>) -> ContainerSpec {
        let mut environment = BTreeMap::new();
        environment.insert(
            APPMESH_RESOURCE_ENV.to_string(),
            inputs.virtual_node.id.clone(),
        );
        let health_command = format!(
            "curl -s http://localhost:{}/server_info | grep state | grep -q LIVE",
            self.policy.proxy.admin_port
        );

        ContainerSpec {
            name: self.policy.proxy.container_name.clone(),
            image: inputs.envoy_image.to_string(),
            essential: true,
            user: Some(self.policy.proxy.user.clone()),
            command: None,
            port_mappings: Vec::new(),
            environment,
            health_check: self.health_check(health_command),
            logging: self.logging(inputs.log_group, inputs.identity.envoy_log_prefix()),
            stop_timeout_secs: self.policy.stop_timeout_secs,
            depends_on: Vec::new(),
        }
    }

    fn health_check(&self, shell_command: String) -> HealthCheckSpec {
        let policy = &self.policy.health_check;
        HealthCheckSpec {
            command: vec!["CMD-SHELL".to_string(), shell_command],
            retries: policy.retries,
            timeout_secs: policy.timeout_secs,
            interval_secs: policy.interval_secs,
            start_period_secs: policy.start_period_secs,
        }
    }

    fn logging(&self, log_group: &LogGroupRef, stream_prefix: String) -> LogConfiguration {
        LogConfiguration {
            driver: self.policy.log_driver.clone(),
            log_group: log_group.clone(),
            stream_prefix,
        }
    }
}
