use std::{io::Write, path::Path};

use serde::Serialize;

use crate::render::{Layout, RenderError, Renderer};

/// Writes a layout as pretty-printed JSON. Coordinates are top-down, exactly
/// as the packer produced them.
pub struct JsonRenderer<W> {
    writer: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, layout: &Layout) -> Result<(), RenderError> {
        let document = LayoutDocument::from_layout(layout);

        serde_json::to_writer_pretty(&mut self.writer, &document)?;
        writeln!(self.writer)?;
        self.writer.flush()?;

        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct LayoutDocument<'a> {
    page_count: usize,
    pages: Vec<LayoutPage<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct LayoutPage<'a> {
    number: usize,
    width: f64,
    height: f64,
    images: Vec<LayoutImage<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct LayoutImage<'a> {
    source: &'a Path,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    scaled: bool,
}

impl<'a> LayoutDocument<'a> {
    fn from_layout(layout: &'a Layout) -> Self {
        let pages = layout
            .pages()
            .iter()
            .enumerate()
            .map(|(index, page)| {
                let (width, height) = page.size();

                let images = page
                    .items()
                    .iter()
                    .map(|item| {
                        let (x, y) = item.position();
                        let (width, height) = item.size();

                        LayoutImage {
                            source: &item.payload().source,
                            x,
                            y,
                            width,
                            height,
                            scaled: item.is_scaled(),
                        }
                    })
                    .collect();

                LayoutPage {
                    number: index + 1,
                    width,
                    height,
                    images,
                }
            })
            .collect();

        LayoutDocument {
            page_count: layout.page_count(),
            pages,
        }
    }
}
