//! プロセス環境変数からの環境コンテキスト構築
//!
//! 環境変数を読むのはここだけです。未設定の変数は空文字列になり、
//! 欠落の報告はコンパイラの検証ステージが行います。

use meshdeploy_core::{EnvField, EnvironmentContext};
use tracing::debug;

/// ARN 修飾用のリージョン（先に見つかったもの）
const REGION_VARIABLES: [&str; 2] = ["AWS_REGION", "CDK_DEFAULT_REGION"];
/// ARN 修飾用のアカウント（先に見つかったもの）
const ACCOUNT_VARIABLES: [&str; 2] = ["AWS_ACCOUNT_ID", "CDK_DEFAULT_ACCOUNT"];

/// 現在のプロセス環境変数から環境コンテキストを構築する
pub fn environment_from_process() -> EnvironmentContext {
    environment_from_lookup(|key| std::env::var(key).ok())
}

/// 任意の検索関数から環境コンテキストを構築する
pub fn environment_from_lookup<F>(lookup: F) -> EnvironmentContext
where
    F: Fn(&str) -> Option<String>,
{
    let mut context = EnvironmentContext::default();
    for field in EnvField::ALL {
        if let Some(value) = lookup(field.variable()) {
            context.set(field, value);
        } else {
            debug!(variable = field.variable(), "Environment variable not set");
        }
    }

    context.region = first_present(&lookup, &REGION_VARIABLES);
    context.account_id = first_present(&lookup, &ACCOUNT_VARIABLES);
    context
}

fn first_present<F>(lookup: &F, keys: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    keys.iter()
        .filter_map(|key| lookup(*key))
        .find(|value| !value.is_empty())
}
