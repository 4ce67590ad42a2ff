//! サービス識別子

use serde::{Deserialize, Serialize};

/// デプロイされるサービスの正規名（`<serviceName>-<commitId>`）
///
/// サービス名、仮想ノード名、サービスディスカバリのレコード名の元になります。
/// コミットごとに一意なので、同じサービスの過去のデプロイと衝突しません。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceIdentity(String);

impl ServiceIdentity {
    pub fn new(service_name: &str, commit_id: &str) -> Self {
        Self(format!("{}-{}", service_name, commit_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 仮想ノード名（`vn-<identity>`）
    pub fn virtual_node_name(&self) -> String {
        format!("vn-{}", self.0)
    }

    /// ディスカバリ用ホスト名（`<identity>.<environmentName>.local`）
    pub fn discovery_hostname(&self, environment_name: &str) -> String {
        format!("{}.{}.local", self.0, environment_name)
    }

    /// アプリケーションコンテナのログストリームプレフィックス
    pub fn app_log_prefix(&self) -> String {
        format!("app-{}", self.0)
    }

    /// プロキシコンテナのログストリームプレフィックス
    pub fn envoy_log_prefix(&self) -> String {
        format!("envoy-{}", self.0)
    }
}

impl std::fmt::Display for ServiceIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
