//! Print the generated OpenAPI document as JSON, for docs pipelines.

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let spec = honorarx::api::openapi();
    let json = spec
        .to_pretty_json()
        .context("Failed to serialize OpenAPI document")?;
    println!("{json}");
    Ok(())
}
