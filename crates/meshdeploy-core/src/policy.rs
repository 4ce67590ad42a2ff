//! デプロイポリシー定数
//!
//! プロキシのポート、ヘルスチェックのタイミング、スケーリング範囲など、
//! マニフェストからは変更できない定数を一つの表にまとめたものです。
//! ビルダーはこの表を受け取るので、テストではビルダーに手を入れずに値を差し替えられます。

use serde::{Deserialize, Serialize};

/// デプロイ全体に共通するポリシー定数
///
/// YAMLでは一部のフィールドだけを上書きでき、残りはデフォルト値になります：
/// ```yaml
/// scaling:
///   max_capacity: 10
/// discovery_ttl_secs: 30
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentPolicy {
    pub proxy: ProxyPolicy,
    pub health_check: HealthCheckPolicy,
    pub scaling: ScalingBounds,
    pub app_container_name: String,
    pub stop_timeout_secs: u32,
    pub access_log_path: String,
    pub discovery_ttl_secs: u32,
    pub log_driver: String,
}

impl Default for DeploymentPolicy {
    fn default() -> Self {
        Self {
            proxy: ProxyPolicy::default(),
            health_check: HealthCheckPolicy::default(),
            scaling: ScalingBounds::default(),
            app_container_name: "app".to_string(),
            stop_timeout_secs: 10,
            access_log_path: "/dev/stdout".to_string(),
            discovery_ttl_secs: 20,
            log_driver: "awslogs".to_string(),
        }
    }
}

/// サイドカープロキシの設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyPolicy {
    pub container_name: String,
    /// プロキシプロセスの実行ユーザー（非root）
    pub user: String,
    pub ingress_port: u16,
    pub egress_port: u16,
    /// このUIDのトラフィックはプロキシを経由しない
    pub ignored_uid: u32,
    /// メタデータ/認証情報エンドポイント
    pub egress_ignored_ips: Vec<String>,
    /// ローカル診断エンドポイントのポート
    pub admin_port: u16,
}

impl Default for ProxyPolicy {
    fn default() -> Self {
        Self {
            container_name: "envoy".to_string(),
            user: "1337".to_string(),
            ingress_port: 15000,
            egress_port: 15001,
            ignored_uid: 1337,
            egress_ignored_ips: vec!["169.254.170.2".to_string(), "169.254.169.254".to_string()],
            admin_port: 9901,
        }
    }
}

/// ヘルスチェックのリトライ/タイミング
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthCheckPolicy {
    pub retries: u32,
    pub timeout_secs: u32,
    pub interval_secs: u32,
    pub start_period_secs: u32,
}

impl Default for HealthCheckPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            timeout_secs: 2,
            interval_secs: 5,
            start_period_secs: 10,
        }
    }
}

/// スケーリング範囲と目標CPU使用率
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalingBounds {
    pub min_capacity: u32,
    pub max_capacity: u32,
    pub target_cpu_utilization_percent: u32,
}

impl Default for ScalingBounds {
    fn default() -> Self {
        Self {
            min_capacity: 2,
            max_capacity: 6,
            target_cpu_utilization_percent: 80,
        }
    }
}
