use crate::error::Result;
use crate::http;
use crate::OutputFormat;
use comfy_table::Table;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
struct RecipesResponse {
    recipes: Vec<RecipeRecord>,
}

#[derive(Debug, Deserialize, Serialize)]
struct RecipeRecord {
    name: String,
    configs: Vec<String>,
    supports_distributed: bool,
}

pub async fn execute(server: &str, format: OutputFormat) -> Result<()> {
    let client = http::client(Some(std::time::Duration::from_secs(30)))?;
    let response = client.get(format!("{}/recipes", server)).send().await?;

    if !response.status().is_success() {
        return Err(http::error_for(response).await);
    }

    let payload: RecipesResponse = response.json().await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&payload.recipes)?);
        }
        OutputFormat::Plain => {
            for recipe in &payload.recipes {
                println!("{}", recipe.name);
            }
        }
        OutputFormat::Table => {
            print_recipes_table(&payload.recipes);
        }
    }

    Ok(())
}

fn print_recipes_table(recipes: &[RecipeRecord]) {
    let mut table = Table::new();
    table.set_header(vec!["Recipe", "Configs", "Distributed"]);

    for recipe in recipes {
        table.add_row(vec![
            recipe.name.clone(),
            recipe.configs.join("\n"),
            if recipe.supports_distributed {
                "yes".to_string()
            } else {
                "no".to_string()
            },
        ]);
    }

    println!("{table}");
}
