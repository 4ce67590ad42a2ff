pub mod environment;
pub mod error;

pub use environment::*;
pub use error::*;

use meshdeploy_core::{DeploymentPolicy, ServiceManifest, StaticCatalog};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::debug;

const PROJECT_DIR: &str = ".meshdeploy";
const MANIFEST_CANDIDATES: [&str; 2] = ["manifest.yaml", "manifest.yml"];
const POLICY_FILE: &str = "policy.yaml";

/// サービスマニフェストを探す
///
/// 以下の優先順位で検索:
/// 1. 環境変数 MESHDEPLOY_MANIFEST (直接パス指定)
/// 2. カレントディレクトリ: manifest.yaml, manifest.yml
/// 3. ./.meshdeploy/ ディレクトリ内: 同様の順序
pub fn find_manifest_file() -> Result<PathBuf> {
    // 1. 環境変数で直接指定
    if let Ok(manifest_path) = std::env::var("MESHDEPLOY_MANIFEST") {
        let path = PathBuf::from(manifest_path);
        if path.exists() {
            return Ok(path);
        }
    }

    let current_dir = std::env::current_dir()?;

    // 2. カレントディレクトリで検索
    if let Some(path) = first_existing(&current_dir, &MANIFEST_CANDIDATES) {
        return Ok(path);
    }

    // 3. ./.meshdeploy/ ディレクトリで検索
    let project_dir = current_dir.join(PROJECT_DIR);
    if project_dir.is_dir()
        && let Some(path) = first_existing(&project_dir, &MANIFEST_CANDIDATES)
    {
        return Ok(path);
    }

    Err(ConfigError::ManifestNotFound)
}

/// ポリシー上書きファイルを探す（無ければ None）
///
/// 1. 環境変数 MESHDEPLOY_POLICY
/// 2. ./.meshdeploy/policy.yaml
/// 3. ~/.config/meshdeploy/policy.yaml (グローバル設定)
pub fn find_policy_file() -> Option<PathBuf> {
    if let Ok(policy_path) = std::env::var("MESHDEPLOY_POLICY") {
        let path = PathBuf::from(policy_path);
        if path.exists() {
            return Some(path);
        }
    }

    if let Ok(current_dir) = std::env::current_dir() {
        let path = current_dir.join(PROJECT_DIR).join(POLICY_FILE);
        if path.exists() {
            return Some(path);
        }
    }

    dirs::config_dir()
        .map(|dir| dir.join("meshdeploy").join(POLICY_FILE))
        .filter(|path| path.exists())
}

/// マニフェストを読み込む
pub fn load_manifest(path: &Path) -> Result<ServiceManifest> {
    read_yaml(path)
}

/// ポリシーを読み込む（指定のないフィールドはデフォルト値）
pub fn load_policy(path: &Path) -> Result<DeploymentPolicy> {
    read_yaml(path)
}

/// ポリシーファイルがあれば読み込み、無ければデフォルトを返す
pub fn load_policy_or_default() -> Result<DeploymentPolicy> {
    match find_policy_file() {
        Some(path) => load_policy(&path),
        None => Ok(DeploymentPolicy::default()),
    }
}

/// 登録済みリソースの一覧を読み込む
pub fn load_inventory(path: &Path) -> Result<StaticCatalog> {
    read_yaml(path)
}

fn first_existing(dir: &Path, candidates: &[&str]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    debug!(path = %path.display(), "Reading YAML file");
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}
