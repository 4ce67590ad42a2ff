//! Shared fixtures for backend tests

use meshdeploy_core::{
    AppContainerManifest, Compiler, DeploymentPlan, DeploymentPolicy, EnvironmentContext,
    ImportCatalog, ServiceManifest, TaskManifest, ValidationMode, VirtualNodeManifest,
};

pub fn sample_context() -> EnvironmentContext {
    EnvironmentContext {
        environment_name: "staging".to_string(),
        vpc_id: "vpc-0a1b2c".to_string(),
        cluster_name: "staging-cluster".to_string(),
        service_name: "orders".to_string(),
        commit_id: "ab12".to_string(),
        envoy_image: "envoy:v1.27".to_string(),
        namespace_id: "ns-4f5e6d".to_string(),
        namespace_arn: "arn:aws:servicediscovery:eu-west-1:123456789012:namespace/ns-4f5e6d"
            .to_string(),
        namespace_name: "staging.local".to_string(),
        log_group_name: "/staging/services".to_string(),
        subnet_one: "subnet-111".to_string(),
        subnet_two: "subnet-222".to_string(),
        security_group_id: "sg-333".to_string(),
        task_exec_role_arn: "arn:aws:iam::123456789012:role/exec".to_string(),
        task_role_arn: "arn:aws:iam::123456789012:role/task".to_string(),
        region: None,
        account_id: None,
    }
}

pub fn sample_manifest() -> ServiceManifest {
    ServiceManifest {
        task: TaskManifest {
            family: Some("orders".to_string()),
            cpu: None,
            memory: None,
        },
        app_container: AppContainerManifest {
            port: Some(8080),
            image: Some("orders:1.4.2".to_string()),
            health_check_path: Some("/health".to_string()),
            command: None,
        },
        virtual_node: Some(VirtualNodeManifest {
            backends: Some(vec!["billing".to_string()]),
        }),
    }
}

pub fn sample_plan() -> DeploymentPlan {
    compile(&sample_context(), ValidationMode::Strict)
}

pub fn compile(context: &EnvironmentContext, mode: ValidationMode) -> DeploymentPlan {
    let policy = DeploymentPolicy::default();
    let catalog = ImportCatalog::new();
    Compiler::new(&policy, &catalog)
        .with_mode(mode)
        .compile(&sample_manifest(), context)
        .unwrap()
}
