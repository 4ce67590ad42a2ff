#![allow(deprecated, dead_code)] // TODO: cargo_bin → cargo_bin_cmd! へ移行

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const MANIFEST: &str = r#"
Task:
  Family: orders
  Cpu: 512
  Memory: 1024
AppContainer:
  Port: 8080
  Image: orders:1.4.2
  HealthCheckPath: /health
VirtualNode:
  Backends:
    - billing
    - catalog
"#;

pub const ENVIRONMENT: [(&str, &str); 15] = [
    ("ENVIRONMENT_NAME", "staging"),
    ("VPC_ID", "vpc-0a1b2c"),
    ("CLUSTER_NAME", "staging-cluster"),
    ("SERVICE_NAME", "orders"),
    ("CONFIG_COMMIT_ID", "ab12"),
    ("ENVOY_IMAGE_URI", "envoy:v1.27"),
    ("NAMESPACE_ID", "ns-4f5e6d"),
    (
        "NAMESPACE_ARN",
        "arn:aws:servicediscovery:eu-west-1:123456789012:namespace/ns-4f5e6d",
    ),
    ("NAMESPACE_NAME", "staging.local"),
    ("LOG_GROUP_NAME", "/staging/services"),
    ("VPC_SUBNET_ONE", "subnet-111"),
    ("VPC_SUBNET_TWO", "subnet-222"),
    ("SECURITY_GROUP_ID", "sg-333"),
    ("TASK_EXEC_ROLE_ARN", "arn:aws:iam::123456789012:role/exec"),
    ("TASK_ROLE_ARN", "arn:aws:iam::123456789012:role/task"),
];

pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn with_manifest(content: &str) -> Self {
        let project = Self::new();
        project.write_file("manifest.yaml", content);
        project
    }

    pub fn write_file(&self, name: &str, content: &str) {
        let path = self.root.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    /// プロジェクトディレクトリで実行するコマンド（環境変数は全て設定済み）
    pub fn command(&self) -> Command {
        let mut cmd = self.bare_command();
        for (key, value) in ENVIRONMENT {
            cmd.env(key, value);
        }
        cmd
    }

    /// 環境変数を一切設定しないコマンド
    pub fn bare_command(&self) -> Command {
        let mut cmd = Command::cargo_bin("meshdeploy").unwrap();
        cmd.current_dir(self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env_remove("MESHDEPLOY_MANIFEST")
            .env_remove("MESHDEPLOY_POLICY")
            .env_remove("MESHDEPLOY_INVENTORY")
            .env_remove("AWS_REGION")
            .env_remove("AWS_ACCOUNT_ID")
            .env_remove("CDK_DEFAULT_REGION")
            .env_remove("CDK_DEFAULT_ACCOUNT");
        for (key, _) in ENVIRONMENT {
            cmd.env_remove(key);
        }
        cmd
    }
}
