//! Locates the configuration file for a run.
//!
//! Resolution order:
//!
//! 1. `--config` / `WC_LINT_CONFIG` (used as given)
//! 2. `wc-lint.toml` or `.wc-lint.toml` in the checked directory or the
//!    nearest ancestor, stopping at the repository root (a directory
//!    containing `.git`)
//! 3. `config.toml` in the global directory (`$WC_LINT_CONFIG_DIR`, else
//!    `~/.wc-lint/`)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line or in the environment.
    Explicit(PathBuf),
    /// Found next to the checked sources.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// The configuration file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Whether the file came from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

const PROJECT_CONFIG_NAMES: &[&str] = &["wc-lint.toml", ".wc-lint.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration for a run over `target` (file or directory).
#[must_use]
pub fn resolve(target: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(target, explicit, global_config_dir())
}

fn resolve_inner(target: &Path, explicit: Option<&Path>, global_dir: Option<PathBuf>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = find_project_config(target) {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    let global = global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file());
    match global {
        Some(candidate) => {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        }
        None => ConfigSource::Default,
    }
}

/// Nearest project config at or above `target`.
fn find_project_config(target: &Path) -> Option<PathBuf> {
    let start = if target.is_file() { target.parent()? } else { target };
    for dir in start.ancestors() {
        let found = PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file());
        if found.is_some() {
            return found;
        }
        if dir.join(".git").exists() {
            break;
        }
    }
    None
}

/// Global config directory: `$WC_LINT_CONFIG_DIR`, else `~/.wc-lint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("WC_LINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".wc-lint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// A temporary repository root, so lookups never escape the fixture.
    fn repo() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join(".git")).unwrap();
        tmp
    }

    #[test]
    fn explicit_wins_and_is_not_checked() {
        let tmp = repo();
        fs::write(tmp.path().join("wc-lint.toml"), "").unwrap();
        let explicit = Path::new("/nonexistent/custom.toml");

        let result = resolve_inner(tmp.path(), Some(explicit), None);
        assert_eq!(result, ConfigSource::Explicit(explicit.to_path_buf()));
    }

    #[test]
    fn plain_name_preferred_over_dot_name() {
        let tmp = repo();
        fs::write(tmp.path().join("wc-lint.toml"), "").unwrap();
        fs::write(tmp.path().join(".wc-lint.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(result, ConfigSource::Project(tmp.path().join("wc-lint.toml")));
    }

    #[test]
    fn dot_name_found() {
        let tmp = repo();
        fs::write(tmp.path().join(".wc-lint.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(result, ConfigSource::Project(tmp.path().join(".wc-lint.toml")));
    }

    #[test]
    fn nearest_ancestor_config_is_used() {
        let tmp = repo();
        let nested = tmp.path().join("packages/ui/src");
        fs::create_dir_all(&nested).unwrap();
        fs::write(tmp.path().join("wc-lint.toml"), "").unwrap();
        fs::write(tmp.path().join("packages/ui/wc-lint.toml"), "").unwrap();

        let result = resolve_inner(&nested, None, None);
        assert_eq!(
            result,
            ConfigSource::Project(tmp.path().join("packages/ui/wc-lint.toml"))
        );
    }

    #[test]
    fn file_target_starts_from_its_directory() {
        let tmp = repo();
        let file = tmp.path().join("my-element.js");
        fs::write(&file, "").unwrap();
        fs::write(tmp.path().join("wc-lint.toml"), "").unwrap();

        let result = resolve_inner(&file, None, None);
        assert_eq!(result, ConfigSource::Project(tmp.path().join("wc-lint.toml")));
    }

    #[test]
    fn search_stops_at_repository_root() {
        let outer = TempDir::new().unwrap();
        fs::write(outer.path().join("wc-lint.toml"), "").unwrap();
        let inner = outer.path().join("checkout");
        fs::create_dir_all(inner.join(".git")).unwrap();

        let result = resolve_inner(&inner, None, None);
        assert_eq!(result, ConfigSource::Default);
    }

    #[test]
    fn global_fallback_only_without_project_config() {
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let empty = repo();
        let result = resolve_inner(empty.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Global(global.path().join("config.toml")));
        assert!(result.is_global());

        let project = repo();
        fs::write(project.path().join("wc-lint.toml"), "").unwrap();
        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert!(matches!(result, ConfigSource::Project(_)));
    }

    #[test]
    fn empty_global_dir_means_defaults() {
        let project = repo();
        let global = TempDir::new().unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Default);
        assert!(result.path().is_none());
    }
}
