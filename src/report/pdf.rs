// PDF backend: turns composed layout pages into a document using `lopdf`
// content streams. Helvetica and Helvetica-Bold only; every element is
// absolutely positioned so the output is deterministic.

use anyhow::Result;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use super::layout::{Page, PAGE_HEIGHT, PAGE_WIDTH};

const FONT_REGULAR: &str = "F1";
const FONT_BOLD: &str = "F2";

/// Renders the layout pages into a finished PDF byte stream.
pub fn render(pages: &[Page]) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let font_bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_REGULAR => font_regular,
            FONT_BOLD => font_bold,
        },
    });

    let mut page_ids = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|&id| id.into()).collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    Ok(out)
}

fn page_content(page: &Page) -> Content {
    let mut operations = Vec::new();

    for text in &page.texts {
        let font = if text.bold { FONT_BOLD } else { FONT_REGULAR };
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec![font.into(), text.size.into()]));
        operations.push(Operation::new(
            "Td",
            vec![text.x.into(), (PAGE_HEIGHT - text.y).into()],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(
                text.content.as_bytes().to_vec(),
                StringFormat::Literal,
            )],
        ));
        operations.push(Operation::new("ET", vec![]));
    }

    if !page.rules.is_empty() {
        operations.push(Operation::new("w", vec![0.5.into()]));
        for rule in &page.rules {
            operations.push(Operation::new(
                "m",
                vec![rule.x1.into(), (PAGE_HEIGHT - rule.y1).into()],
            ));
            operations.push(Operation::new(
                "l",
                vec![rule.x2.into(), (PAGE_HEIGHT - rule.y2).into()],
            ));
            operations.push(Operation::new("S", vec![]));
        }
    }

    Content { operations }
}
