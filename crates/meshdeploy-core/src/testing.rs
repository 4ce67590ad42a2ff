//! テスト用の入力

use crate::model::{
    AppContainerManifest, EnvironmentContext, ServiceManifest, TaskManifest, VirtualNodeManifest,
};

pub fn sample_context() -> EnvironmentContext {
    EnvironmentContext {
        environment_name: "staging".to_string(),
        vpc_id: "vpc-0a1b2c".to_string(),
        cluster_name: "staging-cluster".to_string(),
        service_name: "orders".to_string(),
        commit_id: "ab12".to_string(),
        envoy_image: "public.ecr.aws/appmesh/aws-appmesh-envoy:v1.27".to_string(),
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
            cpu: Some(512),
            memory: Some(1024),
        },
        app_container: AppContainerManifest {
            port: Some(8080),
            image: Some("registry.example.com/orders:1.4.2".to_string()),
            health_check_path: Some("/health".to_string()),
            command: Some(vec!["./orders".to_string(), "--serve".to_string()]),
        },
        virtual_node: Some(VirtualNodeManifest {
            backends: Some(vec!["billing".to_string(), "catalog".to_string()]),
        }),
    }
}
