use crate::error::Result;
use crate::http;
use crate::OutputFormat;
use comfy_table::Table;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Deserialize, Serialize)]
struct SignaturesResponse {
    recipe: String,
    signatures: BTreeMap<String, String>,
}

pub async fn execute(recipe: &str, server: &str, format: OutputFormat) -> Result<()> {
    let client = http::client(Some(std::time::Duration::from_secs(30)))?;
    let response = client
        .get(format!("{}/signatures", server))
        .query(&[("recipe_name", recipe)])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(http::error_for(response).await);
    }

    let payload: SignaturesResponse = response.json().await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        OutputFormat::Plain => {
            for (name, signature) in &payload.signatures {
                println!("{name}\t{signature}");
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_header(vec!["Callable", "Signature"]);
            for (name, signature) in &payload.signatures {
                table.add_row(vec![name.clone(), signature.clone()]);
            }
            println!("{table}");
        }
    }

    Ok(())
}
