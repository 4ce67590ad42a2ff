pub mod plan;
pub mod synth;
pub mod validate;

use crate::InputArgs;
use colored::Colorize;
use meshdeploy_core::{
    CompileError, Compiler, DeploymentPlan, DeploymentPolicy, Diagnostics, EnvironmentContext,
    ImportCatalog, ResourceCatalog, ServiceManifest, ValidationMode,
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// プロセス境界で集めたコンパイル入力
pub struct Inputs {
    pub manifest_path: PathBuf,
    pub manifest: ServiceManifest,
    pub context: EnvironmentContext,
    pub policy: DeploymentPolicy,
    pub catalog: Box<dyn ResourceCatalog>,
    pub mode: ValidationMode,
}

pub fn load_inputs(args: &InputArgs) -> anyhow::Result<Inputs> {
    let (manifest_path, manifest) = load_manifest(args.manifest.as_deref())?;
    let context = meshdeploy_config::environment_from_process();

    let policy = match &args.policy {
        Some(path) => meshdeploy_config::load_policy(path)?,
        None => meshdeploy_config::load_policy_or_default()?,
    };

    let catalog: Box<dyn ResourceCatalog> = match &args.inventory {
        Some(path) => {
            debug!(path = %path.display(), "Using static resource inventory");
            Box::new(meshdeploy_config::load_inventory(path)?)
        }
        None => Box::new(ImportCatalog::for_context(&context)),
    };

    let mode = if args.advisory {
        ValidationMode::Advisory
    } else {
        ValidationMode::Strict
    };

    Ok(Inputs {
        manifest_path,
        manifest,
        context,
        policy,
        catalog,
        mode,
    })
}

pub fn load_manifest(explicit: Option<&Path>) -> anyhow::Result<(PathBuf, ServiceManifest)> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => meshdeploy_config::find_manifest_file()?,
    };
    let manifest = meshdeploy_config::load_manifest(&path)?;
    Ok((path, manifest))
}

impl Inputs {
    pub fn compile(&self) -> Result<DeploymentPlan, CompileError> {
        Compiler::new(&self.policy, self.catalog.as_ref())
            .with_mode(self.mode)
            .compile(&self.manifest, &self.context)
    }
}

/// コンパイルエラーを表示して終了する
pub fn exit_with_compile_error(error: &CompileError) -> ! {
    eprintln!();
    match error {
        CompileError::Validation(errors) => {
            eprintln!("{}", "✗ 環境変数の検証に失敗しました".red().bold());
            for e in errors {
                eprintln!("  {} {}", "-".red(), e);
            }
            eprintln!();
            eprintln!("--advisory を付けると検証エラーを残したまま計画を生成できます");
        }
        other => {
            eprintln!("{}", "✗ コンパイルエラー".red().bold());
            eprintln!("  {}", other);
        }
    }
    std::process::exit(1);
}

/// Advisory モードで残った検証エラーを警告として表示する
pub fn print_diagnostics(diagnostics: &Diagnostics) {
    if diagnostics.is_empty() {
        return;
    }
    eprintln!(
        "{}",
        format!("⚠ 検証エラーが {}件 残っています", diagnostics.len())
            .yellow()
            .bold()
    );
    for e in diagnostics.iter() {
        eprintln!("  {} {}", "-".yellow(), e);
    }
}
