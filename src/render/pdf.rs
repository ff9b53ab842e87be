use std::{
    iter::FromIterator,
    path::{Path, PathBuf},
};

use fs_err as fs;
use lopdf::{
    content::{Content, Operation},
    Dictionary, Document, Object, Stream,
};
use shelfpack::{Page, PlacedItem};

use crate::{
    image::PreparedImage,
    render::{Layout, RenderError, Renderer},
};

const LABEL_FONT: &str = "F1";
const LABEL_FONT_SIZE: f32 = 10.0;
const LABEL_POSITION: (f32, f32) = (30.0, 30.0);

/// Writes a layout as a PDF document with one PDF page per packed page.
#[derive(Debug)]
pub struct PdfRenderer {
    output: PathBuf,
}

impl PdfRenderer {
    pub fn new<P: Into<PathBuf>>(output: P) -> Self {
        Self {
            output: output.into(),
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

impl Renderer for PdfRenderer {
    fn render(&mut self, layout: &Layout) -> Result<(), RenderError> {
        let mut document = build_document(layout)?;
        document.compress();

        let mut contents = Vec::new();
        document.save_to(&mut contents)?;

        if let Some(parent) = self.output.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.output, contents)?;

        log::trace!("Saved PDF to {}", self.output.display());

        Ok(())
    }
}

fn build_document(layout: &Layout) -> Result<Document, RenderError> {
    let mut document = Document::with_version("1.5");
    let pages_id = document.new_object_id();

    let font_id = document.add_object(Dictionary::from_iter(vec![
        ("Type", name("Font")),
        ("Subtype", name("Type1")),
        ("BaseFont", name("Helvetica")),
    ]));

    let mut page_ids = Vec::with_capacity(layout.page_count());

    for (page_index, page) in layout.pages().iter().enumerate() {
        log::info!(
            "Generating page {} with {} images...",
            page_index + 1,
            page.items().len()
        );

        let mut xobjects = Dictionary::new();
        let mut image_names = Vec::with_capacity(page.items().len());

        for (item_index, item) in page.items().iter().enumerate() {
            let image_id = document.add_object(image_xobject(item.payload()));
            let image_name = format!("Im{}", item_index);

            xobjects.set(image_name.as_bytes().to_vec(), Object::Reference(image_id));
            image_names.push(image_name);
        }

        let content = Content {
            operations: page_operations(page, page_index, &image_names),
        };
        let content_id = document.add_object(Stream::new(Dictionary::new(), content.encode()?));

        let mut fonts = Dictionary::new();
        fonts.set(LABEL_FONT, Object::Reference(font_id));

        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));
        resources.set("Font", Object::Dictionary(fonts));

        let (page_width, page_height) = page.size();
        let page_id = document.add_object(Dictionary::from_iter(vec![
            ("Type", name("Page")),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::from(page_width as f32),
                    Object::from(page_height as f32),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
            ("Resources", Object::Dictionary(resources)),
        ]));

        page_ids.push(page_id);
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", name("Pages")),
        ("Count", Object::Integer(page_ids.len() as i64)),
        (
            "Kids",
            Object::Array(page_ids.into_iter().map(Object::Reference).collect()),
        ),
    ]);
    document.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = document.add_object(Dictionary::from_iter(vec![
        ("Type", name("Catalog")),
        ("Pages", Object::Reference(pages_id)),
    ]));
    document.trailer.set("Root", Object::Reference(catalog_id));

    Ok(document)
}

/// Drawing operations for one page. The packer lays pages out top-down while
/// PDF user space grows upwards, so every y coordinate is flipped here.
fn page_operations(
    page: &Page<PreparedImage>,
    page_index: usize,
    image_names: &[String],
) -> Vec<Operation> {
    let (_, page_height) = page.size();
    let mut operations = Vec::new();

    for (item, image_name) in page.items().iter().zip(image_names) {
        let (x, y, width, height) = pdf_rect(item, page_height);

        operations.push(Operation::new("q", vec![]));
        operations.push(Operation::new(
            "cm",
            vec![
                width.into(),
                0.0f32.into(),
                0.0f32.into(),
                height.into(),
                x.into(),
                y.into(),
            ],
        ));
        operations.push(Operation::new("Do", vec![name(image_name)]));
        operations.push(Operation::new("Q", vec![]));
    }

    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new(
        "Tf",
        vec![name(LABEL_FONT), LABEL_FONT_SIZE.into()],
    ));
    operations.push(Operation::new(
        "Td",
        vec![LABEL_POSITION.0.into(), LABEL_POSITION.1.into()],
    ));
    operations.push(Operation::new(
        "Tj",
        vec![Object::string_literal(format!("Page {}", page_index + 1))],
    ));
    operations.push(Operation::new("ET", vec![]));

    operations
}

/// The bottom-left corner and size of a placed image in PDF user space.
fn pdf_rect(item: &PlacedItem<PreparedImage>, page_height: f64) -> (f32, f32, f32, f32) {
    let (x, y) = item.position();
    let (width, height) = item.size();

    (
        x as f32,
        (page_height - y - height) as f32,
        width as f32,
        height as f32,
    )
}

fn image_xobject(image: &PreparedImage) -> Stream {
    let (width, height) = image.pixel_size;

    let dict = Dictionary::from_iter(vec![
        ("Type", name("XObject")),
        ("Subtype", name("Image")),
        ("Width", Object::Integer(width as i64)),
        ("Height", Object::Integer(height as i64)),
        ("ColorSpace", name("DeviceRGB")),
        ("BitsPerComponent", Object::Integer(8)),
        ("Filter", name("DCTDecode")),
    ]);

    // The data is already JPEG compressed, so keep lopdf from deflating it.
    Stream::new(dict, image.jpeg.clone()).with_compression(false)
}

fn name(value: &str) -> Object {
    Object::Name(value.as_bytes().to_vec())
}

#[cfg(test)]
mod test {
    use super::*;

    use image::{codecs::jpeg::JpegEncoder, Rgb, RgbImage};
    use shelfpack::{InputItem, ShelfPacker};

    fn prepared(name: &str, pixel_size: (u32, u32), size: (f64, f64)) -> PreparedImage {
        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, 80)
            .encode_image(&RgbImage::from_pixel(pixel_size.0, pixel_size.1, Rgb([90, 160, 30])))
            .unwrap();

        PreparedImage {
            source: PathBuf::from(name),
            jpeg,
            pixel_size,
            size,
        }
    }

    fn layout(sizes: &[(f64, f64)]) -> Layout {
        let items = sizes.iter().enumerate().map(|(index, &size)| {
            InputItem::new(size, prepared(&format!("{}.png", index), (4, 4), size))
        });

        ShelfPacker::new((200.0, 300.0))
            .with_padding(10.0)
            .pack(items)
            .unwrap()
    }

    #[test]
    fn images_are_drawn_bottom_up() {
        let layout = layout(&[(50.0, 50.0)]);
        let page = &layout.pages()[0];

        assert_eq!(pdf_rect(&page.items()[0], 300.0), (5.0, 245.0, 50.0, 50.0));

        let operations = page_operations(page, 0, &["Im0".to_owned()]);
        let operators: Vec<_> = operations
            .iter()
            .map(|operation| operation.operator.as_str())
            .collect();

        assert_eq!(
            operators,
            vec!["q", "cm", "Do", "Q", "BT", "Tf", "Td", "Tj", "ET"]
        );

        let matrix: Vec<_> = operations[1]
            .operands
            .iter()
            .map(|operand| operand.as_float().unwrap())
            .collect();
        assert_eq!(matrix, vec![50.0, 0.0, 0.0, 50.0, 5.0, 245.0]);
    }

    #[test]
    fn pages_are_labelled() {
        let layout = layout(&[(50.0, 50.0)]);
        let operations = page_operations(&layout.pages()[0], 2, &["Im0".to_owned()]);

        let label = operations
            .iter()
            .find(|operation| operation.operator == "Tj")
            .unwrap();
        assert_eq!(label.operands[0].as_str().unwrap(), &b"Page 3"[..]);
    }

    #[test]
    fn one_pdf_page_per_layout_page() {
        let layout = layout(&[(100.0, 100.0), (100.0, 100.0), (100.0, 100.0)]);
        assert_eq!(layout.page_count(), 2);

        let document = build_document(&layout).unwrap();
        assert_eq!(document.get_pages().len(), 2);
    }

    #[test]
    fn render_writes_a_loadable_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested").join("out.pdf");

        let layout = layout(&[(40.0, 60.0), (120.0, 80.0), (500.0, 90.0)]);
        PdfRenderer::new(&output).render(&layout).unwrap();

        let document = Document::load(&output).unwrap();
        assert_eq!(document.get_pages().len(), layout.page_count());
    }
}
