//! マニフェストの解決
//!
//! 生マニフェストにデフォルト値を適用し、後続のビルダーがそのまま使える
//! 型付きの記述子を生成します。デフォルト値の適用はここ以外では行いません。

use crate::error::{CompileError, Result};
use crate::model::ServiceManifest;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_CPU: u32 = 256;
pub const DEFAULT_MEMORY: u32 = 512;
pub const DEFAULT_PORT: u16 = 80;

/// デフォルト値適用済みのマニフェスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedManifest {
    pub task: ResolvedTask,
    pub app_container: ResolvedAppContainer,
    pub backends: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTask {
    pub family: String,
    pub cpu: u32,
    pub memory: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAppContainer {
    pub port: u16,
    pub image: String,
    pub health_check_path: String,
    pub command: Option<Vec<String>>,
}

/// マニフェストを解決する
///
/// 必須フィールド（`Task.Family`, `AppContainer.Image`, `AppContainer.HealthCheckPath`）
/// が欠けている場合は致命的エラーになります。
pub fn resolve_manifest(manifest: &ServiceManifest) -> Result<ResolvedManifest> {
    let family = required(&manifest.task.family, "Task.Family")?;
    let image = required(&manifest.app_container.image, "AppContainer.Image")?;
    let health_check_path = required(
        &manifest.app_container.health_check_path,
        "AppContainer.HealthCheckPath",
    )?;

    let backends = manifest
        .virtual_node
        .as_ref()
        .and_then(|vn| vn.backends.clone())
        .unwrap_or_default();

    let resolved = ResolvedManifest {
        task: ResolvedTask {
            family,
            cpu: manifest.task.cpu.unwrap_or(DEFAULT_CPU),
            memory: manifest.task.memory.unwrap_or(DEFAULT_MEMORY),
        },
        app_container: ResolvedAppContainer {
            port: manifest.app_container.port.unwrap_or(DEFAULT_PORT),
            image,
            health_check_path,
            command: manifest.app_container.command.clone(),
        },
        backends,
    };
    debug!(
        family = %resolved.task.family,
        cpu = resolved.task.cpu,
        memory = resolved.task.memory,
        port = resolved.app_container.port,
        "Manifest resolved"
    );

    Ok(resolved)
}

fn required(value: &Option<String>, field: &'static str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.clone()),
        _ => Err(CompileError::MissingManifestField(field)),
    }
}
