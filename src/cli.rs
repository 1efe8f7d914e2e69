//! CLI: models → declarations | payloads → declarations
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::{error, warn};

use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::dialect::Dialect;
use crate::generator::{Generator, Outcome, Report};
use crate::schema::SchemaFile;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate TypeScript / JSDoc declarations for API responses from schema metadata or sample payloads
#[derive(Parser, Debug)]
#[command(name = "api-typer", version)]
pub struct CommandLineInterface {
    /// config file (defaults to ./api-typer.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// generate from model manifests and a schema description
    Models(ModelsOut),
    /// infer from JSON response payloads
    Values(ValuesOut),
}

#[derive(Args, Debug, Clone)]
struct OutputSettings {
    /// output directory (overrides `output_path`)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// output dialect (overrides `dialect`)
    #[arg(long, value_enum)]
    dialect: Option<Dialect>,
}

#[derive(clap::Parser, Debug)]
struct ModelsOut {
    #[command(flatten)]
    output_settings: OutputSettings,

    /// only this model (default: every manifest in the models directory)
    #[arg(long)]
    model: Option<String>,

    /// schema description file (overrides `schema_path`)
    #[arg(long)]
    schema: Option<PathBuf>,

    /// models directory (overrides `models_path`)
    #[arg(long)]
    models: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct ValuesOut {
    #[command(flatten)]
    output_settings: OutputSettings,

    /// One or more payload files. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// route name or resource class to name the type after (default: each file's stem)
    #[arg(long)]
    name: Option<String>,

    /// JQ pre-process filter for each document
    #[arg(long)]
    jq_expr: Option<String>,

    /// ignore the freshness window
    #[arg(long, default_value_t = false)]
    force: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl OutputSettings {
    fn apply(&self, config: &mut Config) {
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(dialect) = self.dialect {
            config.dialect = dialect;
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        let mut config = self.load_config();
        match &self.cmd {
            Command::Models(target) => {
                target.output_settings.apply(&mut config);
                if let Some(schema) = &target.schema {
                    config.schema_path = schema.clone();
                }
                if let Some(models) = &target.models {
                    config.models_path = models.clone();
                }
                eprintln!("{}", "Generating types from models...".bold());

                let schema = match SchemaFile::load(&config.schema_path) {
                    Ok(schema) => schema,
                    Err(e) => {
                        error!(error = %e, "cannot read schema, nothing generated");
                        return Ok(());
                    }
                };
                let generator = Generator::new(&config);
                let report = match &target.model {
                    Some(model) => {
                        let mut report = Report::default();
                        report.push(model.clone(), generator.generate_model(model, &schema));
                        report
                    }
                    None => generator.generate_all_models(&schema),
                };
                summarize(&report);
            }
            Command::Values(target) => {
                target.output_settings.apply(&mut config);
                let inputs = crate::payload::resolve_inputs(&target.input)?;
                let generator = Generator::new(&config);
                let report = generator.generate_values(
                    &inputs,
                    target.name.as_deref(),
                    target.jq_expr.as_deref(),
                    target.force,
                );
                summarize(&report);
            }
        }
        Ok(())
    }

    /// Never fatal: a broken config file falls back to defaults.
    fn load_config(&self) -> Config {
        let path = self.config.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        match Config::load_file(&path) {
            Ok(Some(config)) => config,
            Ok(None) => {
                if self.config.is_some() {
                    warn!(path = %path.display(), "config file not found, using defaults");
                }
                Config::default()
            }
            Err(e) => {
                warn!(error = %e, "using default configuration");
                Config::default()
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn summarize(report: &Report) {
    for unit in &report.units {
        match &unit.result {
            Ok(Outcome::Written(path)) => eprintln!("  {} {}", "generated".green(), path.display()),
            Ok(Outcome::Fresh(path)) => eprintln!("  {} {} (fresh)", "skipped".yellow(), path.display()),
            Ok(Outcome::Disabled) => eprintln!("  {} auto_generate is off", "skipped".yellow()),
            Err(e) if e.is_not_found() => warn!(unit = %unit.unit, "{e}"),
            Err(e) => error!(unit = %unit.unit, "{e}"),
        }
    }
    eprintln!(
        "{} {} written, {} skipped, {} failed",
        "done:".bold(),
        report.written(),
        report.skipped(),
        report.failed(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        CommandLineInterface::command().debug_assert();
    }

    #[test]
    fn parses_values_invocation() {
        let cli = CommandLineInterface::try_parse_from([
            "api-typer", "values", "-i", "a.json", "b/*.json", "--name", "api.users.index", "--dialect", "js",
        ]).unwrap();
        let Command::Values(v) = cli.cmd else { panic!("expected values") };
        assert_eq!(v.input, ["a.json", "b/*.json"]);
        assert_eq!(v.name.as_deref(), Some("api.users.index"));
        assert_eq!(v.output_settings.dialect, Some(Dialect::JsDoc));
    }

    #[test]
    fn parses_models_invocation() {
        let cli = CommandLineInterface::try_parse_from([
            "api-typer", "-v", "models", "--model", "User", "--output", "out",
        ]).unwrap();
        assert!(cli.verbose);
        let Command::Models(m) = cli.cmd else { panic!("expected models") };
        assert_eq!(m.model.as_deref(), Some("User"));
        assert_eq!(m.output_settings.output, Some(PathBuf::from("out")));
    }
}
