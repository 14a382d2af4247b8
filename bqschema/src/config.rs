//! Command-line configuration.
//!
//! Every option can come from the command line, from an environment variable,
//! or from a built-in default, in that order. The first non-empty value wins.

use bqschema_codegen::DEFAULT_PACKAGE;
use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable for the project id.
pub const ENV_PROJECT: &str = "GCLOUD_PROJECT_ID";
/// Environment variable for the dataset id.
pub const ENV_DATASET: &str = "BIGQUERY_DATASET";
/// Environment variable for the output path.
pub const ENV_OUTPUT: &str = "OUTPUT_FILE";
/// Environment variable for the OAuth access token.
pub const ENV_ACCESS_TOKEN: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";
/// Environment variable for the Go package name.
pub const ENV_PACKAGE: &str = "GO_PACKAGE";
/// Environment variable for debug mode.
pub const ENV_DEBUG: &str = "DEBUG";

/// Output path used when none is configured.
pub const DEFAULT_OUTPUT: &str = "bqschema.generated.go";

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No source supplied a value.
    #[error("option '{option}' is not set (use --{option} or set {env})")]
    Unresolved {
        /// Option name.
        option: String,
        /// Environment variable consulted.
        env: String,
    },
}

/// bqschema-gen - generate Go structs from the tables of a BigQuery dataset
#[derive(Parser, Debug, Default)]
#[command(name = "bqschema-gen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Google Cloud project id [env: GCLOUD_PROJECT_ID]
    #[arg(long)]
    pub project: Option<String>,

    /// BigQuery dataset id [env: BIGQUERY_DATASET]
    #[arg(long)]
    pub dataset: Option<String>,

    /// Output file [env: OUTPUT_FILE] [default: bqschema.generated.go]
    #[arg(short, long)]
    pub output: Option<String>,

    /// OAuth access token [env: GOOGLE_OAUTH_ACCESS_TOKEN]; defaults to `gcloud auth print-access-token`
    #[arg(long)]
    pub access_token: Option<String>,

    /// Go package name [env: GO_PACKAGE] [default: bqschema]
    #[arg(long)]
    pub package: Option<String>,

    /// Print the source before and after formatting [env: DEBUG]
    #[arg(long)]
    pub debug: bool,

    /// Skip gofmt and goimports
    #[arg(long)]
    pub no_format: bool,
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Project the dataset belongs to.
    pub project: String,
    /// Dataset whose tables are generated.
    pub dataset: String,
    /// File the Go source is written to.
    pub output: PathBuf,
    /// `None` means the token is taken from the gcloud CLI.
    pub access_token: Option<String>,
    /// Go package of the generated file.
    pub package: String,
    /// Dump the source before and after formatting to stdout.
    pub debug: bool,
    /// Leave the source unformatted.
    pub no_format: bool,
}

impl Config {
    /// Resolves the configuration from parsed arguments and an environment
    /// lookup.
    ///
    /// # Errors
    /// Returns `ConfigError::Unresolved` if the project or dataset is missing.
    pub fn resolve<F>(cli: &Cli, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let project = opt_or_env_or_default("project", opt(&cli.project), ENV_PROJECT, "", &lookup)?;
        let dataset = opt_or_env_or_default("dataset", opt(&cli.dataset), ENV_DATASET, "", &lookup)?;
        let output = opt_or_env_or_default("output", opt(&cli.output), ENV_OUTPUT, DEFAULT_OUTPUT, &lookup)?;
        let package = opt_or_env_or_default("package", opt(&cli.package), ENV_PACKAGE, DEFAULT_PACKAGE, &lookup)?;

        let access_token =
            opt_or_env_or_default("access-token", opt(&cli.access_token), ENV_ACCESS_TOKEN, "", &lookup).ok();

        let debug = cli.debug
            || lookup(ENV_DEBUG)
                .map(|value| is_truthy(&value))
                .unwrap_or(false);

        Ok(Self {
            project,
            dataset,
            output: PathBuf::from(output),
            access_token,
            package,
            debug,
            no_format: cli.no_format,
        })
    }
}

/// Returns the first non-empty value of `opt`, the `env_name` variable and
/// `default`.
///
/// An empty `env_name` skips the environment.
///
/// # Errors
/// Returns `ConfigError::Unresolved` if all three are empty.
pub fn opt_or_env_or_default<F>(
    name: &str,
    opt: &str,
    env_name: &str,
    default: &str,
    lookup: F,
) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if !opt.is_empty() {
        return Ok(opt.to_string());
    }

    if !env_name.is_empty()
        && let Some(value) = lookup(env_name).filter(|value| !value.is_empty())
    {
        return Ok(value);
    }

    if !default.is_empty() {
        return Ok(default.to_string());
    }

    Err(ConfigError::Unresolved {
        option: name.to_string(),
        env: env_name.to_string(),
    })
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn is_truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_option_wins() {
        let value = opt_or_env_or_default("name", "opt", "ENV", "default", env(&[("ENV", "env")]));
        assert_eq!(value, Ok("opt".to_string()));
    }

    #[test]
    fn test_env_when_option_empty() {
        let value = opt_or_env_or_default("name", "", "ENV", "default", env(&[("ENV", "env")]));
        assert_eq!(value, Ok("env".to_string()));
    }

    #[test]
    fn test_default_when_option_and_env_empty() {
        let value = opt_or_env_or_default("name", "", "ENV", "default", env(&[("ENV", "")]));
        assert_eq!(value, Ok("default".to_string()));
    }

    #[test]
    fn test_all_empty_is_error() {
        let err = opt_or_env_or_default("name", "", "ENV", "", env(&[])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Unresolved {
                option: "name".to_string(),
                env: "ENV".to_string(),
            }
        );
        assert!(err.to_string().contains("ENV"));
    }

    #[test]
    fn test_everything_empty_is_error() {
        assert!(opt_or_env_or_default("", "", "", "", env(&[])).is_err());
    }

    #[test]
    fn test_resolve_from_env_with_defaults() {
        let lookup = env(&[(ENV_PROJECT, "my-project"), (ENV_DATASET, "my_dataset")]);

        let config = Config::resolve(&Cli::default(), lookup).expect("resolve");

        assert_eq!(config.project, "my-project");
        assert_eq!(config.dataset, "my_dataset");
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(config.package, "bqschema");
        assert_eq!(config.access_token, None);
        assert!(!config.debug);
        assert!(!config.no_format);
    }

    #[test]
    fn test_resolve_arguments_override_env() {
        let cli = Cli::parse_from([
            "bqschema-gen",
            "--project",
            "cli-project",
            "--dataset",
            "cli_dataset",
            "--output",
            "gen/models.go",
            "--package",
            "models",
            "--access-token",
            "ya29.token",
            "--no-format",
        ]);
        let lookup = env(&[
            (ENV_PROJECT, "env-project"),
            (ENV_PACKAGE, "envpkg"),
            (ENV_ACCESS_TOKEN, "env-token"),
        ]);

        let config = Config::resolve(&cli, lookup).expect("resolve");

        assert_eq!(config.project, "cli-project");
        assert_eq!(config.dataset, "cli_dataset");
        assert_eq!(config.output, PathBuf::from("gen/models.go"));
        assert_eq!(config.package, "models");
        assert_eq!(config.access_token.as_deref(), Some("ya29.token"));
        assert!(config.no_format);
    }

    #[test]
    fn test_resolve_missing_dataset() {
        let err = Config::resolve(&Cli::default(), env(&[(ENV_PROJECT, "p")])).unwrap_err();
        assert!(matches!(err, ConfigError::Unresolved { ref option, .. } if option == "dataset"));
    }

    #[test]
    fn test_resolve_debug_from_env() {
        let base = [(ENV_PROJECT, "p"), (ENV_DATASET, "d")];

        for (value, expected) in [("true", true), ("TRUE", true), ("1", true), ("0", false), ("no", false)] {
            let mut pairs = base.to_vec();
            pairs.push((ENV_DEBUG, value));
            let config = Config::resolve(&Cli::default(), env(&pairs)).expect("resolve");
            assert_eq!(config.debug, expected, "DEBUG={value}");
        }
    }
}
