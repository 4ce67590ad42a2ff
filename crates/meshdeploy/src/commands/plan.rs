use super::{exit_with_compile_error, load_inputs, print_diagnostics};
use crate::InputArgs;
use colored::Colorize;
use meshdeploy_cloud::{ActionPlan, ActionType, ApplyOptions, DryRunBackend, apply};

pub async fn handle(args: &InputArgs, allow_diagnostics: bool) -> anyhow::Result<()> {
    let inputs = load_inputs(args)?;
    println!(
        "マニフェスト: {}",
        inputs.manifest_path.display().to_string().cyan()
    );

    let plan = match inputs.compile() {
        Ok(plan) => plan,
        Err(e) => exit_with_compile_error(&e),
    };
    print_diagnostics(&plan.diagnostics);

    let actions = ActionPlan::from_deployment(&plan)?;
    println!();
    println!("{}", format!("デプロイ計画: {}", plan.identity).bold());
    for (i, action) in actions.actions.iter().enumerate() {
        let marker = match action.action_type {
            ActionType::Register => "+".green(),
            ActionType::Upsert => "~".yellow(),
            ActionType::Attach => "→".blue(),
        };
        println!(
            "  {}. {} {} {}",
            i + 1,
            marker,
            action.resource_kind.to_string().cyan(),
            action.resource_id
        );
        println!("       {}", action.description.dimmed());
    }

    let backend = DryRunBackend::new();
    let result = apply(&backend, &plan, ApplyOptions { allow_diagnostics }).await?;

    println!();
    if result.is_success() {
        println!(
            "{} {} ({}ms)",
            "✓ Plan:".green().bold(),
            actions.summary(),
            result.duration_ms
        );
    } else {
        for failed in &result.failed {
            eprintln!(
                "  {} {} {}",
                "✗".red(),
                failed.action_id,
                failed.error.as_deref().unwrap_or_default()
            );
        }
        anyhow::bail!("dry-run に失敗しました");
    }

    Ok(())
}
