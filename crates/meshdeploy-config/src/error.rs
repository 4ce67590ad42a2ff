use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "マニフェストが見つかりません。以下の場所を確認してください:\n\
        - カレントディレクトリ: manifest.yaml, manifest.yml\n\
        - ./.meshdeploy/ ディレクトリ\n\
        または MESHDEPLOY_MANIFEST 環境変数で直接指定できます"
    )]
    ManifestNotFound,

    #[error("YAMLパースエラー: {path}\n理由: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("IO エラー: {path}\n理由: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO エラー: {0}")]
    CurrentDir(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
