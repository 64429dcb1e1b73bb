use crate::syntax::Syntax;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Syntax assumed when neither the command line nor the config names one.
pub const DEFAULT_SYNTAX: Syntax = Syntax::PythonDsl;

/// Build-file name looked for in tree walks when none is configured.
pub const DEFAULT_BUILD_FILE_NAME: &str = "BUCK";

/// Settings loaded from polybuild.toml
///
/// Every field is optional: the command line overrides the file, and
/// built-in defaults cover whatever neither names.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PolybuildConfig {
    pub default_syntax: Option<Syntax>,
    pub build_file_name: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("polybuild.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<PolybuildConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: PolybuildConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &PolybuildConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// A starter config spelling out the built-in defaults.
pub fn starter_config() -> PolybuildConfig {
    PolybuildConfig {
        default_syntax: Some(DEFAULT_SYNTAX),
        build_file_name: Some(DEFAULT_BUILD_FILE_NAME.to_string()),
    }
}
