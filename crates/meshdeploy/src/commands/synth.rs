use super::{exit_with_compile_error, load_inputs, print_diagnostics};
use crate::{InputArgs, OutputFormat};
use colored::Colorize;
use std::path::Path;

pub fn handle(args: &InputArgs, format: OutputFormat, out: Option<&Path>) -> anyhow::Result<()> {
    let inputs = load_inputs(args)?;
    let plan = match inputs.compile() {
        Ok(plan) => plan,
        Err(e) => exit_with_compile_error(&e),
    };
    print_diagnostics(&plan.diagnostics);

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&plan)? + "\n",
        OutputFormat::Yaml => serde_yaml::to_string(&plan)?,
    };

    match out {
        Some(path) => {
            std::fs::write(path, rendered)?;
            eprintln!(
                "{} {} ({})",
                "✓ デプロイ計画を書き出しました:".green().bold(),
                path.display().to_string().cyan(),
                plan.identity
            );
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
