//! モデル定義
//!
//! コンパイラの入力（環境コンテキスト、マニフェスト）と、
//! 各ステージが生成するリソース仕様を定義します。

mod environment;
mod identity;
mod manifest;
mod references;
mod spec;

// Re-exports
pub use environment::*;
pub use identity::*;
pub use manifest::*;
pub use references::*;
pub use spec::*;
