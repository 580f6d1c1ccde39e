use clap::{Parser, Subcommand};
use std::path::PathBuf;
use todos_core::config::{ConfigOverrides, canonicalize_name};
use todos_core::error::AppError;
use todos_core::model::Filter;

/// A small task list. Run without a command to open the full-screen view.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task; blank text is ignored
    ///
    /// Example: todos add "Buy milk"
    Add { text: String },
    /// Flip a task between active and completed
    ///
    /// Example: todos toggle 1734567890123
    Toggle { id: u64 },
    /// Delete a task
    ///
    /// Example: todos delete 1734567890123
    Delete { id: u64 },
    /// Delete every completed task
    ///
    /// Example: todos clear-completed
    ClearCompleted,
    /// List tasks
    ///
    /// Example: todos list
    /// Example: todos list --filter active
    List {
        /// Which tasks to show: all, active or completed
        #[arg(long, short = 'f', default_value_t = Filter::All)]
        filter: Filter,
    },
}

/// Flag name used to identify config override arguments by the runtime.
pub const CONFIG_OVERRIDE_FLAG: &str = "--config-override";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    Theme,
    StorageDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let trimmed = raw.trim();
    let (key_raw, value_raw) = trimmed
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let value = value_raw.trim().to_string();
    let field =
        canonicalize_name(key_raw).ok_or_else(|| "override key cannot be empty".to_string())?;

    let target = match field.as_str() {
        "theme" => ConfigOverrideTarget::Theme,
        "storage_dir" | "storage" => {
            if value.is_empty() {
                return Err("storage_dir override cannot be empty".to_string());
            }
            ConfigOverrideTarget::StorageDir
        }
        other => return Err(format!("unknown config field '{other}'")),
    };

    Ok(ParsedConfigOverride { target, value })
}

/// Folds every `--config-override` value into one set of overrides; later
/// values win.
pub fn collect_config_overrides(raw: &[String]) -> Result<ConfigOverrides, AppError> {
    let mut overrides = ConfigOverrides::default();
    for entry in raw {
        let parsed = parse_config_override(entry).map_err(|message| {
            AppError::invalid_input(format!("{CONFIG_OVERRIDE_FLAG} {entry}: {message}"))
        })?;
        match parsed.target {
            ConfigOverrideTarget::Theme => overrides.theme = Some(parsed.value),
            ConfigOverrideTarget::StorageDir => {
                overrides.storage_dir = Some(PathBuf::from(parsed.value))
            }
        }
    }
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::{
        Cli, Command, ConfigOverrideTarget, collect_config_overrides, parse_config_override,
    };
    use clap::Parser;
    use std::path::PathBuf;
    use todos_core::model::Filter;

    #[test]
    fn parse_config_override_canonicalizes_field_names() {
        let parsed = parse_config_override(" THEME = Midnight ").unwrap();

        assert_eq!(parsed.target, ConfigOverrideTarget::Theme);
        assert_eq!(parsed.value, "Midnight");
    }

    #[test]
    fn parse_config_override_accepts_storage_dir_spellings() {
        let parsed = parse_config_override("Storage-Dir=/tmp/todos").unwrap();
        assert_eq!(parsed.target, ConfigOverrideTarget::StorageDir);
        assert_eq!(parsed.value, "/tmp/todos");
    }

    #[test]
    fn parse_config_override_rejects_empty_storage_dir() {
        let err = parse_config_override("storage_dir=  ").unwrap_err();
        assert!(err.contains("cannot be empty"));
    }

    #[test]
    fn parse_config_override_rejects_unknown_fields() {
        let err = parse_config_override("unknown.field=value").unwrap_err();
        assert!(err.contains("unknown config field"));
    }

    #[test]
    fn parse_config_override_rejects_missing_equals() {
        let err = parse_config_override("themenoir").unwrap_err();
        assert!(err.contains("KEY=VALUE"));
    }

    #[test]
    fn collect_config_overrides_keeps_last_value() {
        let raw = vec![
            "theme=noir".to_string(),
            "storage_dir=/a".to_string(),
            "theme=solarized".to_string(),
        ];
        let overrides = collect_config_overrides(&raw).unwrap();

        assert_eq!(overrides.theme.as_deref(), Some("solarized"));
        assert_eq!(overrides.storage_dir, Some(PathBuf::from("/a")));
    }

    #[test]
    fn collect_config_overrides_reports_invalid_input() {
        let err = collect_config_overrides(&["color=red".to_string()]).unwrap_err();
        assert_eq!(err.code(), "invalid_input");
    }

    #[test]
    fn list_filter_defaults_to_all_and_parses_names() {
        let cli = Cli::try_parse_from(["todos", "list"]).unwrap();
        match cli.command {
            Some(Command::List { filter }) => assert_eq!(filter, Filter::All),
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["todos", "list", "--filter", "Completed"]).unwrap();
        match cli.command {
            Some(Command::List { filter }) => assert_eq!(filter, Filter::Completed),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn no_arguments_means_no_command() {
        let cli = Cli::try_parse_from(["todos"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn toggle_requires_numeric_id() {
        assert!(Cli::try_parse_from(["todos", "toggle", "abc"]).is_err());
    }
}
