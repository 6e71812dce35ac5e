//! Validate command - Validate data sets from JSON exports.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::CliError;
use pv_framework::{DataSet, ManagerConfig, ValidationManager, ValidationSummary};
use pv_model::parse_data_sets;
use pv_tool::config::parse_key_date;
use pv_tool::{
    customer_validation_manager, resource_validation_manager, MigrationConfig, ToolError, KEY_DATE_ENV,
};

const DATA_SET_EXTENSIONS: [&str; 2] = ["json", "jsonl"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Loader {
    Customer,
    Resource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Loader whose rules are applied
    #[arg(short, long, value_enum)]
    loader: Loader,

    /// Migration configuration file (TOML, YAML or JSON)
    #[arg(short, long, env = "PVTOOL_CONFIG")]
    config: Option<PathBuf>,

    /// Migration key date (RFC 3339 or YYYY-MM-DD), overrides the config file
    #[arg(long)]
    key_date: Option<String>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Timeout per validator and data set in seconds (0 disables it)
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Maximum number of validators running at the same time
    #[arg(long, default_value_t = 64)]
    max_concurrency: usize,

    /// Files, directories or glob patterns with exported data sets
    #[arg(required = true)]
    paths: Vec<String>,
}

pub async fn execute(args: ValidateArgs) -> Result<()> {
    let files = collect_files(&args.paths)?;
    info!("Validating {} file(s) with the {:?} loader rules", files.len(), args.loader);

    let manager_config = ManagerConfig::default()
        .with_timeout((args.timeout_secs > 0).then(|| Duration::from_secs(args.timeout_secs)))
        .with_max_concurrency(args.max_concurrency);

    let summary = match args.loader {
        Loader::Customer => {
            let config = migration_config(&args)?;
            info!("Migration key date: {}", config.migration_key_date.to_rfc3339());
            let manager = customer_validation_manager(config)?.with_config(manager_config)?;
            run(&manager, &files).await?
        }
        Loader::Resource => {
            let manager = resource_validation_manager()?.with_config(manager_config)?;
            run(&manager, &files).await?
        }
    };

    println!("{}", render(&summary, args.format)?);

    if !summary.passed() {
        return Err(CliError::ValidationFailed(format!(
            "{} of {} data sets have errors",
            summary.num_fails(),
            summary.num_fails() + summary.num_succeeds()
        ))
        .into());
    }
    Ok(())
}

fn render(summary: &ValidationSummary, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => summary.report(),
        OutputFormat::Json => serde_json::to_string_pretty(summary)?,
    })
}

/// Resolve the migration configuration: `--key-date`, then `--config`, then
/// the environment.
fn migration_config(args: &ValidateArgs) -> Result<MigrationConfig> {
    if let Some(key_date) = &args.key_date {
        return Ok(MigrationConfig::new(parse_key_date(key_date)?));
    }
    if let Some(path) = &args.config {
        return MigrationConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }
    match MigrationConfig::from_env()? {
        Some(config) => Ok(config),
        None => Err(ToolError::MissingConfig(format!(
            "the customer rules need a migration key date (--key-date, --config or {})",
            KEY_DATE_ENV
        ))
        .into()),
    }
}

async fn run<D, C>(manager: &ValidationManager<D, C>, files: &[PathBuf]) -> Result<ValidationSummary>
where
    D: DataSet + DeserializeOwned,
    C: Send + Sync + 'static,
{
    let mut data_sets: Vec<D> = Vec::new();
    for file in files {
        let content = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let parsed: Vec<D> = parse_data_sets(&content)
            .with_context(|| format!("Failed to parse data sets from {}", file.display()))?;
        debug!("{}: {} data set(s)", file.display(), parsed.len());
        data_sets.extend(parsed);
    }

    Ok(manager.validate_many(&data_sets).await?)
}

fn is_data_set_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| DATA_SET_EXTENSIONS.contains(&e))
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Expand the given paths into data set files. Directories are searched
/// recursively; glob patterns are expanded.
pub fn collect_files(paths: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for raw in paths {
        let candidates: Vec<PathBuf> = if is_glob(raw) {
            glob::glob(raw)
                .map_err(|e| CliError::InvalidArgs(format!("invalid glob pattern {}: {}", raw, e)))?
                .filter_map(|entry| match entry {
                    Ok(path) => Some(path),
                    Err(e) => {
                        warn!("Skipping unreadable path: {}", e);
                        None
                    }
                })
                .collect()
        } else {
            vec![PathBuf::from(raw)]
        };

        for candidate in candidates {
            if candidate.is_dir() {
                let mut found: Vec<PathBuf> = WalkDir::new(&candidate)
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_file() && is_data_set_file(e.path()))
                    .map(|e| e.into_path())
                    .collect();
                found.sort();
                files.extend(found);
            } else if candidate.is_file() {
                files.push(candidate);
            } else {
                return Err(CliError::InvalidArgs(format!("Path not found: {}", candidate.display())).into());
            }
        }
    }

    if files.is_empty() {
        return Err(CliError::InvalidArgs(format!("No data set files found in {}", paths.join(", "))).into());
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_collect_files_from_directory_and_glob() {
        let temp = tempdir().unwrap();
        let nested = temp.path().join("2023").join("06");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join("customers.json"), "{}").unwrap();
        std::fs::write(nested.join("resources.jsonl"), "{}").unwrap();
        std::fs::write(nested.join("notes.txt"), "skip me").unwrap();

        let root = temp.path().to_string_lossy().to_string();
        let files = collect_files(&[root.clone()]).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| is_data_set_file(f)));

        let pattern = format!("{}/*.json", root);
        let files = collect_files(&[pattern]).unwrap();
        assert_eq!(files, vec![temp.path().join("customers.json")]);
    }

    #[test]
    fn test_collect_files_errors() {
        let temp = tempdir().unwrap();
        let root = temp.path().to_string_lossy().to_string();

        let err = collect_files(&[root]).unwrap_err();
        assert!(err.to_string().contains("No data set files found"));

        let missing = temp.path().join("missing.json").to_string_lossy().to_string();
        let err = collect_files(&[missing]).unwrap_err();
        assert!(err.to_string().contains("Path not found"));
    }

    #[tokio::test]
    async fn test_run_resource_export() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("resources.json");
        std::fs::write(
            &file,
            r#"[
                {"marktlokation": {"marktlokations_id": "51238696781"},
                 "messlokation": {"messlokations_id": "DE0123401234012340123401234012340"},
                 "vertrag": {"sparte": "GAS"},
                 "zaehler": {"zaehlernummer": "1ESY1160669305"}},
                {"marktlokation": {"marktlokations_id": "4137355924"},
                 "messlokation": {"messlokations_id": "DE0123401234012340123401234012340"},
                 "vertrag": {"sparte": "STROM"},
                 "zaehler": {"zaehlernummer": "1ESY1160669306"}}
            ]"#,
        )
        .unwrap();

        let manager = resource_validation_manager().unwrap();
        let summary = run(&manager, &[file]).await.unwrap();

        assert_eq!(summary.succeeded, vec!["51238696781".to_string()]);
        assert_eq!(summary.failed, vec!["4137355924".to_string()]);
        assert_eq!(summary.errors[0].error_id, "check_marktlokations_id:failed");
    }

    fn args(loader: Loader, paths: Vec<String>) -> ValidateArgs {
        ValidateArgs {
            loader,
            config: None,
            key_date: None,
            format: OutputFormat::Json,
            timeout_secs: 30,
            max_concurrency: 64,
            paths,
        }
    }

    #[tokio::test]
    async fn test_execute_fails_with_validation_exit_code() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("resources.jsonl");
        std::fs::write(
            &file,
            concat!(
                r#"{"marktlokation": {"marktlokations_id": "51238696781"}, "messlokation": {"messlokations_id": "DE0123401234012340123401234012340"}, "vertrag": {"sparte": "GAS"}, "zaehler": {"zaehlernummer": "1ESY1160669305"}}"#,
                "\n",
                r#"{"marktlokation": {"marktlokations_id": "51238696781"}, "messlokation": {"messlokations_id": "DE0123401234012340123401234012340"}, "vertrag": {"sparte": "WASSER"}, "zaehler": {"zaehlernummer": "1ESY1160669306"}}"#,
                "\n",
            ),
        )
        .unwrap();
        let paths = vec![file.to_string_lossy().to_string()];

        let err = execute(args(Loader::Resource, paths.clone())).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::ValidationFailed(_))));
        assert_eq!(crate::categorize_error(&err), crate::ExitCodes::VALIDATION_FAILURE);
        assert!(err.to_string().contains("1 of 2 data sets have errors"));

        let manager = resource_validation_manager().unwrap();
        let files = collect_files(&paths).unwrap();
        let summary = run(&manager, &files).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&render(&summary, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["succeeded"].as_array().unwrap().len(), 1);
        assert_eq!(json["failed"].as_array().unwrap().len(), 1);
        assert_eq!(json["errors"][0]["error_id"], "check_sparte:failed");
        assert_eq!(json["errors"][0]["data_set_index"], 1);
        assert!(render(&summary, OutputFormat::Text).unwrap().contains("❌ FAILED"));
    }

    #[tokio::test]
    async fn test_execute_missing_path_is_invalid_argument() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("validation").join("customers.json");

        let err = execute(args(Loader::Resource, vec![missing.to_string_lossy().to_string()]))
            .await
            .unwrap_err();
        assert_eq!(crate::categorize_error(&err), crate::ExitCodes::INVALID_ARGS);
    }

    #[test]
    fn test_migration_config_from_env_or_missing() {
        let customer = args(Loader::Customer, vec![".".to_string()]);

        std::env::set_var(KEY_DATE_ENV, "2023-06-01T00:00:00+02:00");
        let config = migration_config(&customer).unwrap();
        assert_eq!(config.migration_key_date.to_rfc3339(), "2023-05-31T22:00:00+00:00");

        std::env::remove_var(KEY_DATE_ENV);
        let err = migration_config(&customer).unwrap_err();
        assert!(matches!(err.downcast_ref::<ToolError>(), Some(ToolError::MissingConfig(_))));
        assert_eq!(crate::categorize_error(&err), crate::ExitCodes::CONFIG_ERROR);
    }

    #[test]
    fn test_key_date_takes_precedence() {
        let args = ValidateArgs {
            loader: Loader::Customer,
            config: Some(PathBuf::from("does-not-exist.toml")),
            key_date: Some("2023-06-01".to_string()),
            format: OutputFormat::Text,
            timeout_secs: 30,
            max_concurrency: 64,
            paths: vec![".".to_string()],
        };

        let config = migration_config(&args).unwrap();
        assert_eq!(config.migration_key_date.to_rfc3339(), "2023-06-01T00:00:00+00:00");
    }
}
