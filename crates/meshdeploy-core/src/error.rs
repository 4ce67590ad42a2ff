use crate::model::ReferenceKind;
use crate::validator::ValidationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("環境コンテキストの検証に失敗しました:\n{}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("マニフェストに必須フィールド '{0}' がありません")]
    MissingManifestField(&'static str),

    #[error("メッシュ '{mesh}' にバックエンド '{backend}' が見つかりません")]
    UnresolvedBackend { mesh: String, backend: String },

    #[error("{kind} '{id}' を解決できません")]
    UnresolvedReference { kind: ReferenceKind, id: String },

    #[error("タスク定義に必要な {0} が指定されていません")]
    MissingIdentity(&'static str),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

pub type Result<T> = std::result::Result<T, CompileError>;
