use structopt::StructOpt;

use std::path::PathBuf;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "portfolio",
    about = "A tool to manage the images and documents behind my portfolio site"
)]
pub struct Options {
    /// The project to use instead of PUBLIC_SANITY_PROJECT_ID
    #[structopt(long = "project", global = true)]
    pub project_id: Option<String>,

    /// The dataset to use instead of PUBLIC_SANITY_DATASET
    #[structopt(long = "dataset", global = true)]
    pub dataset: Option<String>,

    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Print the src, srcset and sizes attributes for an image asset
    Resolve {
        /// The asset id, e.g. image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg
        asset_id: String,

        /// The width the image is displayed at
        #[structopt(short = "w", long = "width")]
        width: f64,

        /// Width divided by height. The image is cropped to fit when given.
        #[structopt(short = "a", long = "aspect-ratio")]
        aspect_ratio: Option<f64>,

        /// The sizes attribute, 100vw when not given
        #[structopt(short = "s", long = "sizes")]
        sizes: Option<String>,
    },

    /// Upload a folder of images as assets
    Upload {
        /// The folder of images to upload
        #[structopt(parse(from_os_str))]
        image_directory: PathBuf,
    },

    /// Create a photo document for every image asset that lacks one
    Backfill,

    /// Upload a folder of images, write alt text for each and gather them into a collection
    Import {
        /// The folder of images to import
        #[structopt(parse(from_os_str))]
        image_directory: PathBuf,

        /// The title of the collection to create
        #[structopt(short = "c", long = "collection", default_value = "Portfolio")]
        collection_title: String,
    },

    /// Run one of the site's queries and print the result as JSON
    Query {
        /// One of site-settings, home, collection-paths, collection, photo-paths, photo,
        /// archive, writing, essay-paths, essay, poem-paths, poem
        name: String,

        /// The slug for collection, photo, essay and poem
        slug: Option<String>,
    },

    /// Check a JSON document, or an array of them, against the content model
    Validate {
        #[structopt(parse(from_os_str))]
        document: PathBuf,
    },
}
