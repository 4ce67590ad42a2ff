//! 環境コンテキストの検証
//!
//! 必須フィールドをそれぞれ独立に検査し、空のものをすべて一度に報告します。
//! 検証そのものは処理を中断しません。中断するかどうかはコンパイラの
//! `ValidationMode` が決めます。

use crate::model::{EnvField, EnvironmentContext};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// 必須フィールドの欠落
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: EnvField,
    pub message: String,
}

impl ValidationError {
    pub fn missing(field: EnvField) -> Self {
        Self {
            field,
            message: field.message().to_string(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.field)
    }
}

/// 検証エラーの報告先
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics {
    errors: Vec<ValidationError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

/// 全必須フィールドを検証し、欠落を `sink` に追記する
pub fn validate_environment(context: &EnvironmentContext, sink: &mut Diagnostics) {
    for field in EnvField::ALL {
        if context.get(field).trim().is_empty() {
            warn!(variable = field.variable(), "{}", field.message());
            sink.push(ValidationError::missing(field));
        }
    }
}

/// 検証結果を新しい `Diagnostics` として返す
pub fn validate(context: &EnvironmentContext) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    validate_environment(context, &mut diagnostics);
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_context;

    #[test]
    fn test_complete_context_is_valid() {
        let diagnostics = validate(&sample_context());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_each_missing_field_reported_alone() {
        for field in EnvField::ALL {
            let mut context = sample_context();
            context.set(field, "");

            let diagnostics = validate(&context);

            assert_eq!(diagnostics.len(), 1, "field {}", field);
            let error = diagnostics.iter().next().unwrap();
            assert_eq!(error.field, field);
            assert_eq!(error.message, field.message());
        }
    }

    #[test]
    fn test_empty_context_reports_every_field_in_order() {
        let diagnostics = validate(&EnvironmentContext::default());

        let fields: Vec<EnvField> = diagnostics.iter().map(|e| e.field).collect();
        assert_eq!(fields, EnvField::ALL.to_vec());
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let mut context = sample_context();
        context.vpc_id = "   ".to_string();

        let diagnostics = validate(&context);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.iter().next().unwrap().message, "Invalid VPC id");
    }

    #[test]
    fn test_sink_is_appended_not_replaced() {
        let mut sink = Diagnostics::new();
        sink.push(ValidationError::missing(EnvField::CommitId));

        let mut context = sample_context();
        context.cluster_name.clear();
        validate_environment(&context, &mut sink);

        let fields: Vec<EnvField> = sink.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec![EnvField::CommitId, EnvField::ClusterName]);
    }
}
