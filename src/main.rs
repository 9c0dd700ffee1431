#![warn(clippy::all, clippy::pedantic)]
#[macro_use]
extern crate log;

use std::fs::read_to_string;

use anyhow::{bail, Context, Result};
use env_logger::Env;
use serde_json::Value;
use structopt::StructOpt;

use portfolio_content::alt_text::ClaudeAltText;
use portfolio_content::command_line::{Command, Options};
use portfolio_content::schema::validate_document;
use portfolio_content::upload::backfill::create_missing_photo_docs;
use portfolio_content::upload::import::import_portfolio;
use portfolio_content::upload::upload_images;
use portfolio_content::{
    queries, resolve, AltTextConfig, HttpStore, ImageSource, ImageUrlBuilder, RenderConfig,
    StoreConfig,
};

/// Manages the content of the portfolio site.
/// 1. Resolving responsive image attributes for an asset
/// 2. Uploading images and creating documents for them, with generated alt text on import
/// 3. Running the site's read queries and validating documents against the content model
fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::new().filter_or("PORTFOLIO_CONTENT_LOG", "info")).init();

    let options = Options::from_args();
    let config = StoreConfig::from_env().with_project(options.project_id, options.dataset);

    match options.command {
        Command::Resolve {
            asset_id,
            width,
            aspect_ratio,
            sizes,
        } => {
            let builder = ImageUrlBuilder::from_config(&config);
            let render = RenderConfig {
                base_width: width,
                aspect_ratio,
                sizes,
            };
            let props = resolve(&builder, Some(&ImageSource::from_asset_id(&asset_id)), &render)
                .with_context(|| format!("Failed to resolve {}", asset_id))?;
            println!("{}", serde_json::to_string_pretty(&props)?);
        }
        Command::Upload { image_directory } => {
            let store = HttpStore::new(config.for_writes()?)?;
            info!("Uploading images");
            let m = upload_images(&store, &image_directory).with_context(|| {
                format!(
                    "Failed to upload images from {}",
                    image_directory.to_string_lossy()
                )
            })?;
            m.log_summary("Uploaded");
            info!(
                "View the assets at https://www.sanity.io/manage/personal/project/{}/datasets/{}/assets",
                config.project_id, config.dataset
            );
        }
        Command::Backfill => {
            let store = HttpStore::new(config.for_writes()?)?;
            let m = create_missing_photo_docs(&store).context("Failed to backfill photo documents")?;
            m.log_summary("Created");
        }
        Command::Import {
            image_directory,
            collection_title,
        } => {
            let store = HttpStore::new(config.for_writes()?)?;
            let alt_text = ClaudeAltText::new(AltTextConfig::from_env()?)?;
            let report = import_portfolio(&store, &alt_text, &image_directory, &collection_title)
                .with_context(|| {
                    format!(
                        "Failed to import images from {}",
                        image_directory.to_string_lossy()
                    )
                })?;
            report.metrics.log_summary("Imported");
            if let Some(id) = report.collection_id {
                info!("Collection \"{}\" created ({})", collection_title, id);
            }
        }
        Command::Query { name, slug } => {
            let store = HttpStore::new(config)?;
            let value = queries::by_name(&store, &name, slug.as_deref())
                .with_context(|| format!("Query {} failed", name))?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Command::Validate { document } => {
            let contents = read_to_string(&document)
                .with_context(|| format!("Failed to read {}", document.to_string_lossy()))?;
            let documents = match serde_json::from_str(&contents)? {
                Value::Array(documents) => documents,
                single => vec![single],
            };

            let mut errors = 0;
            for (i, doc) in documents.into_iter().enumerate() {
                let label = doc
                    .get("_id")
                    .and_then(Value::as_str)
                    .map_or_else(|| format!("document {}", i), str::to_owned);
                for issue in validate_document(doc).with_context(|| format!("Failed to validate {}", label))? {
                    if issue.is_error() {
                        errors += 1;
                    }
                    println!("{}: {}", label, issue);
                }
            }
            if errors > 0 {
                bail!("{} error(s) in {}", errors, document.to_string_lossy());
            }
            debug!("{} is valid", document.to_string_lossy());
        }
    }
    Ok(())
}
