//! Copying builtin assets to caller-chosen locations.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::registry::RecipeRegistry;

/// Copy a builtin recipe or config to `destination`.
///
/// The proper suffix (`.py` for recipes, `.yaml` for configs) is appended
/// when the destination does not already carry it. With `no_clobber` an
/// existing destination is an error and stays untouched. Missing parent
/// directories are only created when `make_parents` is set.
pub fn copy_asset(
    registry: &RecipeRegistry,
    file: &str,
    destination: &Path,
    no_clobber: bool,
    make_parents: bool,
) -> Result<PathBuf> {
    let asset = registry.find_asset(file)?;

    let mut destination = destination.to_path_buf();
    let suffix = asset.kind.suffix();
    if destination.extension().and_then(|e| e.to_str()) != Some(suffix) {
        let name = destination
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        destination.set_file_name(format!("{name}.{suffix}"));
    }

    if no_clobber && destination.exists() {
        return Err(Error::DestinationExists(destination));
    }

    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if make_parents {
                debug!(parent = %parent.display(), "creating parent directories");
                std::fs::create_dir_all(parent)?;
            } else {
                return Err(Error::MissingParent(destination));
            }
        }
    }

    info!(file, destination = %destination.display(), "copying builtin asset");
    std::fs::write(&destination, asset.contents)?;
    Ok(destination)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = "llama3_2/1B_full_single_device";

    #[test]
    fn copies_config_and_appends_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let registry = RecipeRegistry::builtin();
        let dest = dir.path().join("custom_config");
        let copied = copy_asset(&registry, CONFIG, &dest, false, false).unwrap();
        assert_eq!(copied, dir.path().join("custom_config.yaml"));
        assert!(copied.exists());
    }

    #[test]
    fn copies_recipe_with_py_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let registry = RecipeRegistry::builtin();
        let dest = dir.path().join("my_recipe");
        let copied =
            copy_asset(&registry, "lora_finetune_single_device", &dest, false, false).unwrap();
        assert_eq!(copied.extension().unwrap(), "py");
    }

    #[test]
    fn unknown_asset_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let registry = RecipeRegistry::builtin();
        let err = copy_asset(&registry, "nope", &dir.path().join("x"), false, false).unwrap_err();
        assert!(matches!(err, Error::UnknownAsset(_)));
    }

    #[test]
    fn no_clobber_refuses_overwrite_and_keeps_contents() {
        let dir = tempfile::tempdir().unwrap();
        let registry = RecipeRegistry::builtin();
        let dest = dir.path().join("existing.yaml");
        std::fs::write(&dest, "sentinel").unwrap();

        let err = copy_asset(&registry, CONFIG, &dest, true, false).unwrap_err();
        assert!(matches!(err, Error::DestinationExists(_)));
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "sentinel");
    }

    #[test]
    fn clobber_overwrites_when_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let registry = RecipeRegistry::builtin();
        let dest = dir.path().join("existing.yaml");
        std::fs::write(&dest, "sentinel").unwrap();

        copy_asset(&registry, CONFIG, &dest, false, false).unwrap();
        assert_ne!(std::fs::read_to_string(&dest).unwrap(), "sentinel");
    }

    #[test]
    fn missing_parent_is_an_error_without_make_parents() {
        let dir = tempfile::tempdir().unwrap();
        let registry = RecipeRegistry::builtin();
        let dest = dir.path().join("deep").join("nested").join("cfg.yaml");

        let err = copy_asset(&registry, CONFIG, &dest, false, false).unwrap_err();
        assert!(matches!(err, Error::MissingParent(_)));
        assert!(!dir.path().join("deep").exists());
    }

    #[test]
    fn make_parents_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let registry = RecipeRegistry::builtin();
        let dest = dir.path().join("deep").join("nested").join("cfg.yaml");

        let copied = copy_asset(&registry, CONFIG, &dest, false, true).unwrap();
        assert!(copied.exists());
    }
}
