use crate::{
    options::PackOptions,
    render::{PdfRenderer, Renderer},
    session::PackSession,
};

pub fn pack(options: PackOptions) -> anyhow::Result<()> {
    let mut session = PackSession::new(&options.input)?;

    if session.discover_inputs()? == 0 {
        log::warn!("No images found in the input directory!");
        return Ok(());
    }

    session.prepare_images();
    let layout = session.pack()?;

    if layout.page_count() == 0 {
        anyhow::bail!("none of the images in the input directory could be processed");
    }

    let mut renderer = PdfRenderer::new(options.output);
    renderer.render(&layout)?;

    eprintln!("PDF generated successfully: {}", renderer.output().display());
    Ok(())
}
