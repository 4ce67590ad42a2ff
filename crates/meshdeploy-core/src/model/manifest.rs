//! サービスマニフェスト定義
//!
//! パース済みの生マニフェストです。省略可能な値はすべて `Option` のまま保持し、
//! デフォルト値の適用は `resolver` で一度だけ行います。

use serde::{Deserialize, Serialize};

/// サービスマニフェスト
///
/// YAML形式：
/// ```yaml
/// Task:
///   Family: orders
///   Cpu: 512
///   Memory: 1024
/// AppContainer:
///   Port: 8080
///   Image: registry.example.com/orders:1.4.2
///   HealthCheckPath: /health
///   Command: ["./orders", "--serve"]
/// VirtualNode:
///   Backends: [billing, catalog]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceManifest {
    #[serde(default)]
    pub task: TaskManifest,
    #[serde(default)]
    pub app_container: AppContainerManifest,
    #[serde(default)]
    pub virtual_node: Option<VirtualNodeManifest>,
}

/// タスク設定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskManifest {
    pub family: Option<String>,
    /// CPUユニット
    pub cpu: Option<u32>,
    /// メモリ（MiB）
    pub memory: Option<u32>,
}

/// アプリケーションコンテナ設定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppContainerManifest {
    pub port: Option<u16>,
    pub image: Option<String>,
    pub health_check_path: Option<String>,
    pub command: Option<Vec<String>>,
}

/// 仮想ノード設定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VirtualNodeManifest {
    pub backends: Option<Vec<String>>,
}
