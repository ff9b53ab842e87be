use std::path::PathBuf;

use structopt::StructOpt;

use crate::page_size::PageSize;

#[derive(Debug, StructOpt)]
#[structopt(about = "Packs a folder of images onto as few PDF pages as it reasonably can")]
pub struct Options {
    /// What to do. Defaults to `pack` with all of its default options.
    #[structopt(subcommand)]
    pub command: Option<Subcommand>,
}

#[derive(Debug, StructOpt)]
pub enum Subcommand {
    /// Pack every image in a folder into a PDF document.
    Pack(PackOptions),

    /// Compute the page layout for a folder of images and print it as JSON
    /// instead of rendering a document.
    Layout(LayoutOptions),
}

/// Options shared by every command that reads and packs a folder of images.
#[derive(Debug, Clone, StructOpt)]
pub struct InputOptions {
    /// The folder containing the images to pack.
    #[structopt(long, short, default_value = "input_images")]
    pub input: PathBuf,

    /// The size of each page. Valid options are 'a4' and 'letter'. Defaults to
    /// the value in pagepack.toml, or 'a4'.
    #[structopt(long, short)]
    pub page_size: Option<PageSize>,

    /// How hard to compress images, from 0 (best quality) to 9 (smallest
    /// output). Values outside of that range are clamped.
    #[structopt(long, short, allow_hyphen_values = true)]
    pub compression: Option<i64>,

    /// The gap to leave around each image, in points.
    #[structopt(long)]
    pub padding: Option<f64>,

    /// A pagepack.toml file, or a folder containing one. If not specified,
    /// pagepack looks for one in the input folder.
    #[structopt(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, StructOpt)]
pub struct PackOptions {
    #[structopt(flatten)]
    pub input: InputOptions,

    /// The path to write the PDF document to.
    #[structopt(long, short, default_value = "output.pdf")]
    pub output: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct LayoutOptions {
    #[structopt(flatten)]
    pub input: InputOptions,

    /// The path to write the layout to. Defaults to stdout.
    #[structopt(long, short)]
    pub output: Option<PathBuf>,
}
