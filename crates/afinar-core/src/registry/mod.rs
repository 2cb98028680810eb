//! Builtin recipe and config catalog.

mod builtin;

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// A builtin fine-tuning recipe and its associated configs.
#[derive(Debug, Clone, Copy)]
pub struct Recipe {
    /// Recipe name, unique across the registry
    pub name: &'static str,
    /// Embedded recipe entrypoint script
    pub script: &'static str,
    /// Whether the recipe can be launched across multiple processes
    pub supports_distributed: bool,
    /// Configs shipped for this recipe
    pub configs: &'static [RecipeConfig],
    /// Entrypoint callables exposed by the recipe script
    pub signatures: &'static [CallableSignature],
}

/// A builtin YAML config belonging to one recipe.
#[derive(Debug, Clone, Copy)]
pub struct RecipeConfig {
    /// Config name, `family/variant` shaped (e.g. `llama3_2/1B_full`)
    pub name: &'static str,
    /// Embedded YAML contents
    pub contents: &'static str,
}

/// Rendered parameter signature of a recipe entrypoint callable.
#[derive(Debug, Clone, Copy)]
pub struct CallableSignature {
    pub name: &'static str,
    pub signature: &'static str,
}

/// Wire-facing summary of a recipe.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDescriptor {
    pub name: String,
    pub configs: Vec<String>,
    pub supports_distributed: bool,
}

/// A resolved builtin asset, ready to be written to disk.
#[derive(Debug, Clone, Copy)]
pub struct Asset {
    pub contents: &'static str,
    pub kind: AssetKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Recipe,
    Config,
}

impl AssetKind {
    /// File suffix the asset must carry on disk.
    pub fn suffix(self) -> &'static str {
        match self {
            AssetKind::Recipe => "py",
            AssetKind::Config => "yaml",
        }
    }
}

impl Asset {
    /// Path of the asset relative to the assets root.
    pub fn relative_path(&self, name: &str) -> String {
        match self.kind {
            AssetKind::Recipe => format!("recipes/{name}.py"),
            AssetKind::Config => format!("configs/{name}.yaml"),
        }
    }
}

impl Recipe {
    pub fn descriptor(&self) -> RecipeDescriptor {
        RecipeDescriptor {
            name: self.name.to_string(),
            configs: self.configs.iter().map(|c| c.name.to_string()).collect(),
            supports_distributed: self.supports_distributed,
        }
    }
}

/// Registry over all builtin recipes.
#[derive(Debug, Clone, Copy)]
pub struct RecipeRegistry {
    recipes: &'static [Recipe],
}

impl RecipeRegistry {
    /// Registry of all recipes compiled into the crate.
    pub fn builtin() -> Self {
        Self {
            recipes: builtin::RECIPES,
        }
    }

    pub fn all(&self) -> &'static [Recipe] {
        self.recipes
    }

    pub fn descriptors(&self) -> Vec<RecipeDescriptor> {
        self.recipes.iter().map(Recipe::descriptor).collect()
    }

    /// Look up a recipe by name.
    pub fn get(&self, name: &str) -> Result<&'static Recipe> {
        self.recipes
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| Error::RecipeNotFound(name.to_string()))
    }

    /// Look up a config by name within a recipe.
    pub fn get_config(&self, recipe: &str, config: &str) -> Result<&'static RecipeConfig> {
        self.get(recipe)?
            .configs
            .iter()
            .find(|c| c.name == config)
            .ok_or_else(|| Error::ConfigNotFound(config.to_string()))
    }

    /// Config names available for a recipe.
    pub fn configs_for(&self, recipe: &str) -> Result<Vec<String>> {
        Ok(self
            .get(recipe)?
            .configs
            .iter()
            .map(|c| c.name.to_string())
            .collect())
    }

    /// Distinct model families covered by a recipe's configs, sorted.
    pub fn models_for(&self, recipe: &str) -> Result<Vec<String>> {
        let mut families: Vec<String> = self
            .get(recipe)?
            .configs
            .iter()
            .map(|c| c.name.split('/').next().unwrap_or(c.name).to_string())
            .collect();
        families.sort();
        families.dedup();
        Ok(families)
    }

    /// Entrypoint signatures for a recipe, keyed by callable name.
    pub fn signatures_for(&self, recipe: &str) -> Result<BTreeMap<String, String>> {
        Ok(self
            .get(recipe)?
            .signatures
            .iter()
            .map(|s| (s.name.to_string(), s.signature.to_string()))
            .collect())
    }

    /// Resolve a recipe or config name to its embedded contents.
    pub fn find_asset(&self, name: &str) -> Result<Asset> {
        for recipe in self.recipes {
            if recipe.name == name {
                return Ok(Asset {
                    contents: recipe.script,
                    kind: AssetKind::Recipe,
                });
            }
            for config in recipe.configs {
                if config.name == name {
                    return Ok(Asset {
                        contents: config.contents,
                        kind: AssetKind::Config,
                    });
                }
            }
        }
        Err(Error::UnknownAsset(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipe_names_are_unique() {
        let registry = RecipeRegistry::builtin();
        let mut names: Vec<&str> = registry.all().iter().map(|r| r.name).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn every_config_belongs_to_one_recipe() {
        let registry = RecipeRegistry::builtin();
        let mut seen = std::collections::HashSet::new();
        for recipe in registry.all() {
            for config in recipe.configs {
                assert!(seen.insert(config.name), "duplicate config {}", config.name);
            }
        }
    }

    #[test]
    fn lookup_unknown_recipe_fails() {
        let registry = RecipeRegistry::builtin();
        assert!(matches!(
            registry.get("no_such_recipe"),
            Err(Error::RecipeNotFound(_))
        ));
    }

    #[test]
    fn models_are_sorted_and_deduplicated() {
        let registry = RecipeRegistry::builtin();
        let models = registry.models_for("lora_finetune_distributed").unwrap();
        let mut sorted = models.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(models, sorted);
        assert!(!models.is_empty());
    }

    #[test]
    fn asset_resolution_covers_recipes_and_configs() {
        let registry = RecipeRegistry::builtin();
        let recipe = registry.find_asset("full_finetune_single_device").unwrap();
        assert_eq!(recipe.kind, AssetKind::Recipe);
        let config = registry.find_asset("llama3_2/1B_full_single_device").unwrap();
        assert_eq!(config.kind, AssetKind::Config);
        assert!(registry.find_asset("nope").is_err());
    }

    #[test]
    fn signatures_are_exposed_for_every_recipe() {
        let registry = RecipeRegistry::builtin();
        for recipe in registry.all() {
            let signatures = registry.signatures_for(recipe.name).unwrap();
            assert!(!signatures.is_empty(), "{} has no signatures", recipe.name);
        }
    }

    #[test]
    fn embedded_configs_parse_as_yaml_mappings() {
        let registry = RecipeRegistry::builtin();
        for recipe in registry.all() {
            for config in recipe.configs {
                let value: serde_yaml::Value =
                    serde_yaml::from_str(config.contents).expect(config.name);
                assert!(value.is_mapping(), "{} is not a mapping", config.name);
            }
        }
    }
}
