use super::load_manifest;
use colored::Colorize;
use meshdeploy_core::{EnvField, resolve_manifest, validate};
use std::path::Path;

pub fn handle(manifest: Option<&Path>) -> anyhow::Result<()> {
    println!("{}", "設定を検証中...".blue());

    let (path, manifest) = match load_manifest(manifest) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ マニフェストを読み込めません".red().bold());
            eprintln!("  {}", e);
            eprintln!();
            eprintln!("manifest.yaml が存在するディレクトリで実行してください");
            std::process::exit(1);
        }
    };
    println!("マニフェスト: {}", path.display().to_string().cyan());

    let context = meshdeploy_config::environment_from_process();
    let diagnostics = validate(&context);
    let resolved = resolve_manifest(&manifest);

    if diagnostics.is_empty() && resolved.is_ok() {
        println!("{}", "✓ 設定は正常です！".green().bold());
    }

    println!();
    println!(
        "環境変数: {}/{}個",
        EnvField::ALL.len() - diagnostics.len(),
        EnvField::ALL.len()
    );
    for e in diagnostics.iter() {
        println!("    {} {} {}", "✗".red(), e.field.variable().cyan(), e.message);
    }

    match &resolved {
        Ok(resolved) => {
            println!("サマリー:");
            println!("  サービス: {}", context.identity().as_str().cyan());
            println!(
                "  タスク: {} ({} CPU, {} MiB)",
                resolved.task.family.cyan(),
                resolved.task.cpu,
                resolved.task.memory
            );
            println!(
                "  コンテナ: {} (port {}, health {})",
                resolved.app_container.image,
                resolved.app_container.port,
                resolved.app_container.health_check_path
            );
            println!("  バックエンド: {}個", resolved.backends.len());
            for backend in &resolved.backends {
                println!("    - {}", backend.cyan());
            }
        }
        Err(e) => {
            println!("  {} {}", "✗".red(), e);
        }
    }

    if !diagnostics.is_empty() || resolved.is_err() {
        eprintln!();
        eprintln!("{}", "✗ 設定エラー".red().bold());
        std::process::exit(1);
    }

    Ok(())
}
