use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub(crate) const DEFAULT_CONFIG: &str = r#"# Certigrade Configuration

# Share of each condition axis in the overall grade; must sum to 1.0
[weights]
centering = 0.20
corners = 0.25
edges = 0.25
surface = 0.30

# An axis below flaw_below is reported as a flaw
[flaws]
flaw_below = 8.0
moderate_below = 7.0
severe_below = 6.0

# confidence = base + fraction * spread, per grade tier
[confidence.excellent]
base = 0.75
spread = 0.15

[confidence.very_good]
base = 0.80
spread = 0.15

[confidence.good]
base = 0.85
spread = 0.10

[confidence.worn]
base = 0.90
spread = 0.08

# Graded value = base value * multiplier of the highest step reached
[value]
floor_multiplier = 1.0

[[value.steps]]
min_grade = 10.0
multiplier = 5.0

[[value.steps]]
min_grade = 9.5
multiplier = 3.5

[[value.steps]]
min_grade = 9.0
multiplier = 2.5

[[value.steps]]
min_grade = 8.5
multiplier = 2.0

[[value.steps]]
min_grade = 8.0
multiplier = 1.5

[[value.steps]]
min_grade = 7.0
multiplier = 1.2

[output]
default_format = "terminal"
"#;

pub fn init_config(force: bool) -> Result<()> {
    let path = init_config_in(&std::env::current_dir()?, force)?;
    println!("Created {} configuration file", path.display());
    Ok(())
}

pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_config_from, CertigradeConfig};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn template_matches_built_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = init_config_in(dir.path(), false).unwrap();

        let loaded = load_config_from(&path).unwrap();
        let defaults = CertigradeConfig::default();
        assert_eq!(loaded.flaw_thresholds(), defaults.flaw_thresholds());
        assert_eq!(loaded.confidence_bands(), defaults.confidence_bands());
        assert_eq!(loaded.multiplier_table(), defaults.multiplier_table());
        assert_eq!(loaded.default_format(), defaults.default_format());
        assert!((loaded.weights().sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        init_config_in(dir.path(), false).unwrap();

        assert!(init_config_in(dir.path(), false).is_err());
        assert!(init_config_in(dir.path(), true).is_ok());
    }
}
