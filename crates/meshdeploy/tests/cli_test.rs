mod common;

use common::{MANIFEST, TestProject};
use predicates::prelude::*;

const INVENTORY: &str = r#"
meshes:
  staging: [billing]
vpcs: [vpc-0a1b2c]
clusters:
  staging-cluster: vpc-0a1b2c
namespaces:
  - id: ns-4f5e6d
    name: staging.local
    arn: arn:aws:servicediscovery:eu-west-1:123456789012:namespace/ns-4f5e6d
subnets: [subnet-111, subnet-222]
security_groups: [sg-333]
log_groups: [/staging/services]
"#;

fn synth_json(project: &TestProject, extra: &[&str]) -> serde_json::Value {
    let output = project
        .command()
        .arg("synth")
        .args(extra)
        .output()
        .unwrap();
    assert!(output.status.success(), "synth failed: {:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

/// CLIヘルプが正しく表示されることを確認
#[test]
fn test_cli_help() {
    let project = TestProject::new();
    project
        .bare_command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("synth"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("plan"));
}

/// バージョン表示が正しく動作することを確認
#[test]
fn test_cli_version() {
    let project = TestProject::new();
    project
        .bare_command()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("meshdeploy"));
}

/// synthコマンドのヘルプが正しく表示されることを確認
#[test]
fn test_synth_help() {
    let project = TestProject::new();
    project
        .bare_command()
        .arg("synth")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("--advisory"))
        .stdout(predicate::str::contains("--inventory"));
}

/// 不正なコマンドでエラーになることを確認
#[test]
fn test_invalid_command() {
    let project = TestProject::new();
    project.bare_command().arg("invalid-command").assert().failure();
}

#[test]
fn test_synth_emits_json_plan() {
    let project = TestProject::with_manifest(MANIFEST);
    let plan = synth_json(&project, &[]);

    assert_eq!(plan["identity"], "orders-ab12");
    assert_eq!(plan["virtual_node"]["name"], "vn-orders-ab12");
    assert_eq!(plan["virtual_node"]["listeners"][0]["port"], 8080);
    assert_eq!(plan["task_definition"]["family"], "orders");
    assert_eq!(plan["service"]["name"], "orders-ab12");
    assert_eq!(plan["scaling"]["max_capacity"], 6);
    assert_eq!(
        plan["task_definition"]["proxy"]["environment"]["APPMESH_RESOURCE_ARN"],
        plan["virtual_node"]["id"]
    );
}

#[test]
fn test_synth_is_deterministic() {
    let project = TestProject::with_manifest(MANIFEST);

    let first = project.command().arg("synth").output().unwrap();
    let second = project.command().arg("synth").output().unwrap();

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_synth_qualifies_ids_with_region_and_account() {
    let project = TestProject::with_manifest(MANIFEST);
    let output = project
        .command()
        .env("AWS_REGION", "eu-west-1")
        .env("AWS_ACCOUNT_ID", "123456789012")
        .arg("synth")
        .output()
        .unwrap();
    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    let id = plan["virtual_node"]["id"].as_str().unwrap();
    assert!(id.starts_with("arn:aws:appmesh:eu-west-1:123456789012:mesh/staging"));
    assert!(id.ends_with("/virtualNode/vn-orders-ab12"));
}

#[test]
fn test_synth_yaml_to_file() {
    let project = TestProject::with_manifest(MANIFEST);

    project
        .command()
        .args(["synth", "--format", "yaml", "--out", "plan.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = std::fs::read_to_string(project.path().join("plan.yaml")).unwrap();
    assert!(written.contains("identity: orders-ab12"));
    assert!(written.contains("vn-orders-ab12"));
}

#[test]
fn test_synth_fails_on_missing_environment() {
    let project = TestProject::with_manifest(MANIFEST);

    project
        .command()
        .env_remove("VPC_ID")
        .env("TASK_ROLE_ARN", "   ")
        .arg("synth")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid VPC id"))
        .stderr(predicate::str::contains("Invalid task role arn"));
}

#[test]
fn test_synth_advisory_carries_diagnostics() {
    let project = TestProject::with_manifest(MANIFEST);
    let output = project
        .command()
        .env_remove("ENVOY_IMAGE_URI")
        .args(["synth", "--advisory"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["diagnostics"][0]["field"], "envoy-image");
    assert_eq!(plan["diagnostics"][0]["message"], "Invalid Envoy image URI");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid Envoy image URI"));
}

#[test]
fn test_synth_missing_family_is_fatal() {
    let project = TestProject::with_manifest(&MANIFEST.replace("  Family: orders\n", ""));

    project
        .command()
        .arg("synth")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task.Family"));
}

#[test]
fn test_synth_without_manifest() {
    let project = TestProject::new();
    project.command().arg("synth").assert().failure();
}

#[test]
fn test_synth_with_explicit_manifest_path() {
    let project = TestProject::new();
    project.write_file("deploy/orders.yaml", MANIFEST);

    let plan = synth_json(&project, &["--manifest", "deploy/orders.yaml"]);
    assert_eq!(plan["task_definition"]["cpu"], 512);
}

#[test]
fn test_synth_inventory_rejects_unknown_backend() {
    let project = TestProject::with_manifest(MANIFEST);
    project.write_file("inventory.yaml", INVENTORY);

    project
        .command()
        .args(["synth", "--inventory", "inventory.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("catalog"));
}

#[test]
fn test_synth_inventory_resolves_registered_backends() {
    let project = TestProject::with_manifest(&MANIFEST.replace("    - catalog\n", ""));
    project.write_file("inventory.yaml", INVENTORY);

    let plan = synth_json(&project, &["--inventory", "inventory.yaml"]);
    assert_eq!(plan["virtual_node"]["backends"].as_array().unwrap().len(), 1);
}

#[test]
fn test_synth_applies_policy_override() {
    let project = TestProject::with_manifest(MANIFEST);
    project.write_file(".meshdeploy/policy.yaml", "scaling:\n  max_capacity: 12\n");

    let plan = synth_json(&project, &[]);
    assert_eq!(plan["scaling"]["min_capacity"], 2);
    assert_eq!(plan["scaling"]["max_capacity"], 12);
}

#[test]
fn test_synth_ignores_missing_policy_from_env() {
    let project = TestProject::with_manifest(MANIFEST);

    let output = project
        .command()
        .env("MESHDEPLOY_POLICY", project.path().join("missing/policy.yaml"))
        .arg("synth")
        .output()
        .unwrap();

    assert!(output.status.success(), "synth failed: {:?}", output);
    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["scaling"]["max_capacity"], 6);
}

#[test]
fn test_synth_explicit_missing_policy_is_error() {
    let project = TestProject::with_manifest(MANIFEST);

    project
        .command()
        .args(["synth", "--policy", "missing/policy.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing/policy.yaml"));
}

#[test]
fn test_validate_success() {
    let project = TestProject::with_manifest(MANIFEST);

    project
        .command()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("設定は正常です"))
        .stdout(predicate::str::contains("orders-ab12"))
        .stdout(predicate::str::contains("billing"));
}

#[test]
fn test_validate_reports_every_missing_variable() {
    let project = TestProject::with_manifest(MANIFEST);

    project
        .bare_command()
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("0/15"))
        .stdout(predicate::str::contains("ENVIRONMENT_NAME"))
        .stdout(predicate::str::contains("TASK_ROLE_ARN"));
}

/// プロジェクトディレクトリ外で実行するとエラーになることを確認
#[test]
fn test_validate_without_manifest() {
    let project = TestProject::new();
    project
        .command()
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("マニフェストを読み込めません"));
}

#[test]
fn test_plan_dry_run_summary() {
    let project = TestProject::with_manifest(MANIFEST);

    project
        .command()
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("virtual-node"))
        .stdout(predicate::str::contains("scaling-policy"))
        .stdout(predicate::str::contains(
            "2 to register, 1 to create or update, 1 to attach",
        ));
}

#[test]
fn test_plan_refuses_diagnostics_unless_allowed() {
    let project = TestProject::with_manifest(MANIFEST);

    project
        .command()
        .env_remove("ENVOY_IMAGE_URI")
        .args(["plan", "--advisory"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to provision"));

    project
        .command()
        .env_remove("ENVOY_IMAGE_URI")
        .args(["plan", "--advisory", "--allow-diagnostics"])
        .assert()
        .success();
}
