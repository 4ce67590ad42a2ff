//! MeshDeploy Core
//!
//! サービスマニフェストと環境コンテキストから、サービスメッシュのサイドカー付き
//! コンテナサービスのデプロイ計画を生成します。
//!
//! # Pipeline
//!
//! ```text
//! EnvironmentContext ──▶ validator ──┐
//!                                    ▼
//! ServiceManifest ────▶ resolver ──▶ mesh ──▶ task ──▶ service ──▶ scaling
//!                                    │          ▲         ▲
//!                                    └──────────┴─────────┘
//!                                   ResourceCatalog (lookup only)
//! ```
//!
//! コンパイラは純粋関数で、プロセスの環境変数やファイルを読むことはありません。
//! 入力の取得は `meshdeploy-config`、プロビジョニングは `meshdeploy-cloud` が担当します。

pub mod catalog;
pub mod compiler;
pub mod error;
pub mod mesh;
pub mod model;
pub mod policy;
pub mod resolver;
pub mod scaling;
pub mod service;
pub mod task;
pub mod validator;

#[cfg(test)]
mod testing;

// Re-exports
pub use catalog::{ArnScope, ImportCatalog, ResourceCatalog, StaticCatalog};
pub use compiler::{Compiler, DeploymentPlan, ValidationMode};
pub use error::{CompileError, Result};
pub use model::*;
pub use policy::{DeploymentPolicy, HealthCheckPolicy, ProxyPolicy, ScalingBounds};
pub use resolver::{ResolvedManifest, resolve_manifest};
pub use validator::{Diagnostics, ValidationError, validate, validate_environment};
