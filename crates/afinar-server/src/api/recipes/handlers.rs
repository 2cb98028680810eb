use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use afinar_core::RecipeDescriptor;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeDescriptor>,
}

#[derive(Debug, Deserialize)]
pub struct SignaturesQuery {
    pub recipe_name: String,
}

#[derive(Debug, Serialize)]
pub struct SignaturesResponse {
    pub recipe: String,
    pub signatures: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct RecipeQuery {
    pub recipe: String,
}

#[derive(Debug, Serialize)]
pub struct ConfigsResponse {
    pub configs: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SettingsQuery {
    pub recipe: String,
    pub config: String,
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub settings: Vec<String>,
}

pub async fn list_recipes(
    State(state): State<AppState>,
) -> Result<Json<ListRecipesResponse>, ApiError> {
    let recipes = state.registry.descriptors();
    info!(count = recipes.len(), "listing recipes");
    Ok(Json(ListRecipesResponse { recipes }))
}

pub async fn signatures(
    State(state): State<AppState>,
    Query(query): Query<SignaturesQuery>,
) -> Result<Json<SignaturesResponse>, ApiError> {
    let signatures = state.registry.signatures_for(&query.recipe_name)?;
    Ok(Json(SignaturesResponse {
        recipe: query.recipe_name,
        signatures,
    }))
}

pub async fn configs(
    State(state): State<AppState>,
    Query(query): Query<RecipeQuery>,
) -> Result<Json<ConfigsResponse>, ApiError> {
    let configs = state.registry.configs_for(&query.recipe)?;
    Ok(Json(ConfigsResponse { configs }))
}

pub async fn models(
    State(state): State<AppState>,
    Query(query): Query<RecipeQuery>,
) -> Result<Json<ModelsResponse>, ApiError> {
    let models = state.registry.models_for(&query.recipe)?;
    Ok(Json(ModelsResponse { models }))
}

pub async fn settings(
    State(state): State<AppState>,
    Query(query): Query<SettingsQuery>,
) -> Result<Json<SettingsResponse>, ApiError> {
    let config = state.registry.get_config(&query.recipe, &query.config)?;
    let settings = afinar_core::validate::settings_from_str(config.contents)?;
    Ok(Json(SettingsResponse { settings }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::test_state;

    #[tokio::test]
    async fn recipes_listing_is_never_empty() {
        let (state, _dir) = test_state();
        let Json(response) = list_recipes(State(state)).await.unwrap();
        assert!(!response.recipes.is_empty());
        assert!(response
            .recipes
            .iter()
            .any(|r| r.name == "lora_finetune_single_device"));
    }

    #[tokio::test]
    async fn signatures_for_unknown_recipe_is_a_bad_request() {
        let (state, _dir) = test_state();
        let err = signatures(
            State(state),
            Query(SignaturesQuery {
                recipe_name: "unknown".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
        assert!(!err.detail().is_empty());
    }

    #[tokio::test]
    async fn signatures_map_callables() {
        let (state, _dir) = test_state();
        let Json(response) = signatures(
            State(state),
            Query(SignaturesQuery {
                recipe_name: "generate".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.recipe, "generate");
        assert!(response.signatures.contains_key("recipe_main"));
    }

    #[tokio::test]
    async fn configs_and_models_for_recipe() {
        let (state, _dir) = test_state();
        let Json(configs) = configs(
            State(state.clone()),
            Query(RecipeQuery {
                recipe: "lora_finetune_distributed".to_string(),
            }),
        )
        .await
        .unwrap();
        assert!(configs.configs.contains(&"llama3_1/8B_lora".to_string()));

        let Json(models) = models(
            State(state),
            Query(RecipeQuery {
                recipe: "lora_finetune_distributed".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(models.models, vec!["llama3_1", "llama3_2"]);
    }

    #[tokio::test]
    async fn settings_are_top_level_keys() {
        let (state, _dir) = test_state();
        let Json(response) = settings(
            State(state),
            Query(SettingsQuery {
                recipe: "generate".to_string(),
                config: "generation".to_string(),
            }),
        )
        .await
        .unwrap();
        assert!(response.settings.contains(&"tokenizer".to_string()));
        assert!(response.settings.contains(&"prompt".to_string()));
    }

    #[tokio::test]
    async fn settings_for_unknown_config_is_a_bad_request() {
        let (state, _dir) = test_state();
        let err = settings(
            State(state),
            Query(SettingsQuery {
                recipe: "generate".to_string(),
                config: "missing".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }
}
