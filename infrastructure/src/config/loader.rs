//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILENAMES: [&str; 2] = ["fanout.toml", ".fanout.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./fanout.toml` or `./.fanout.toml`
    /// 3. XDG config: `$XDG_CONFIG_HOME/fanout/config.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::load_from(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
        )
    }

    /// Merge the given files over the defaults. Missing optional files are skipped.
    pub fn load_from(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project].into_iter().flatten() {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        // An explicit path must exist
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Box::new(figment::Error::from(format!(
                    "config file not found: {}",
                    path.display()
                ))));
            }
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/fanout/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("fanout").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        Self::project_config_in(Path::new("."))
    }

    fn project_config_in(dir: &Path) -> Option<PathBuf> {
        PROJECT_FILENAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./fanout.toml or ./.fanout.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fanout_domain::OutputFormat;
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(config.providers.is_empty());
        assert!(config.output.color);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().ends_with("fanout/config.toml"));
    }

    #[test]
    fn test_project_config_discovery() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ConfigLoader::project_config_in(dir.path()).is_none());

        fs::write(dir.path().join(".fanout.toml"), "").unwrap();
        assert_eq!(
            ConfigLoader::project_config_in(dir.path()),
            Some(dir.path().join(".fanout.toml"))
        );

        fs::write(dir.path().join("fanout.toml"), "").unwrap();
        assert_eq!(
            ConfigLoader::project_config_in(dir.path()),
            Some(dir.path().join("fanout.toml"))
        );
    }

    #[test]
    fn test_layers_merge_in_priority_order() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("fanout.toml");
        let explicit = dir.path().join("explicit.toml");

        fs::write(
            &global,
            r#"
[providers.openai]
model = "global-model"
max_tokens = 100

[output]
format = "answers"
"#,
        )
        .unwrap();
        fs::write(&project, "[providers.openai]\nmodel = \"project-model\"\n").unwrap();
        fs::write(&explicit, "[output]\ncolor = false\n").unwrap();

        let config =
            ConfigLoader::load_from(Some(&global), Some(&project), Some(&explicit)).unwrap();

        let openai = &config.providers["openai"];
        assert_eq!(openai.model.as_deref(), Some("project-model"));
        assert_eq!(openai.max_tokens, Some(100));
        assert!(openai.enabled);
        assert_eq!(config.output.format, Some(OutputFormat::Answers));
        assert!(!config.output.color);
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_missing_optional_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let config = ConfigLoader::load_from(Some(&missing), Some(&missing), None).unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        assert!(ConfigLoader::load_from(None, None, Some(&missing)).is_err());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("fanout.toml");
        fs::write(&bad, "[output\nformat = ").unwrap();

        assert!(ConfigLoader::load_from(None, Some(&bad), None).is_err());
    }
}
