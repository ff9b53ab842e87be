use std::io::{self, BufWriter};

use fs_err as fs;

use crate::{
    options::LayoutOptions,
    render::{JsonRenderer, Renderer},
    session::PackSession,
};

pub fn layout(options: LayoutOptions) -> anyhow::Result<()> {
    let mut session = PackSession::new(&options.input)?;

    if session.discover_inputs()? == 0 {
        log::warn!("No images found in the input directory!");
    }

    session.prepare_images();
    let layout = session.pack()?;

    match &options.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }

            let file = BufWriter::new(fs::File::create(path)?);
            JsonRenderer::new(file).render(&layout)?;
        }
        None => {
            let stdout = io::stdout();
            JsonRenderer::new(stdout.lock()).render(&layout)?;
        }
    }

    Ok(())
}
