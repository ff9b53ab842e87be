use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use shelfpack::{InputItem, ShelfPacker};

use crate::{
    config::Config,
    discover::discover_images,
    image::{prepare_image, PreparedImage},
    options::InputOptions,
    render::Layout,
    settings::Settings,
};

/// A pack session holds all of the state for turning one folder of images into
/// a packed layout.
#[derive(Debug)]
pub struct PackSession {
    settings: Settings,

    /// Image files discovered in the input folder, in file name order.
    inputs: Vec<PathBuf>,

    /// Images that were successfully preprocessed, in the same order as
    /// `inputs`.
    prepared: Vec<PreparedImage>,
}

impl PackSession {
    pub fn new(options: &InputOptions) -> anyhow::Result<Self> {
        log::trace!("Starting new pack session");

        let config = match &options.config {
            Some(path) => Config::read_from_folder_or_file(path)?,
            None => match Config::read_from_folder(&options.input) {
                Ok(config) => config,
                Err(err) if err.is_not_found() => Config::default(),
                Err(err) => return Err(err.into()),
            },
        };

        let settings = Settings::resolve(options, &config)?;

        log::info!("Generating layout with:");
        log::info!("  Input directory: {}", settings.input_dir.display());
        log::info!("  Page size: {}", settings.page_size);
        log::info!("  Compression level: {}", settings.compression);

        Ok(Self {
            settings,
            inputs: Vec::new(),
            prepared: Vec::new(),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Finds every image in the input folder. Returns how many were found.
    pub fn discover_inputs(&mut self) -> anyhow::Result<usize> {
        self.inputs = discover_images(&self.settings.input_dir, &self.settings.extensions)?;

        if !self.inputs.is_empty() {
            log::info!("Found {} images to process...", self.inputs.len());
        }

        Ok(self.inputs.len())
    }

    /// Decodes, cleans up, and re-encodes every discovered image. Images that
    /// fail are logged and left out of the layout.
    pub fn prepare_images(&mut self) {
        let quality = self.settings.jpeg_quality();
        let dpi = self.settings.dpi;

        let progress = ProgressBar::new(self.inputs.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40} {pos}/{len} {wide_msg}")
                .progress_chars("=> "),
        );

        for path in &self.inputs {
            progress.set_message(path.display().to_string());

            match prepare_image(path, quality, dpi) {
                Ok(image) => self.prepared.push(image),
                Err(err) => log::warn!("Error processing {}: {}", path.display(), err),
            }

            progress.inc(1);
        }

        progress.finish_and_clear();
    }

    /// Packs the prepared images onto pages.
    pub fn pack(self) -> anyhow::Result<Layout> {
        let packer = ShelfPacker::new(self.settings.page_size.dimensions())
            .with_padding(self.settings.padding);

        let items = self
            .prepared
            .into_iter()
            .map(|image| InputItem::new(image.size, image));

        let layout = packer.pack(items)?;

        log::debug!(
            "Packed {} images onto {} pages",
            layout.item_count(),
            layout.page_count()
        );

        Ok(layout)
    }
}
