//! In-memory PDF fixtures for unit tests.

use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use std::path::{Path, PathBuf};

use crate::transform::MediaBox;

fn page_stream(doc: &mut Document, index: usize) -> ObjectId {
    let content = format!("BT /F1 24 Tf 72 720 Td (Page {index}) Tj ET");
    doc.add_object(Stream::new(dictionary! {}, content.into_bytes()))
}

fn font_resources(doc: &mut Document) -> ObjectId {
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    })
}

fn finish(mut doc: Document, pages_id: ObjectId, pages: Object) -> Document {
    doc.objects.insert(pages_id, pages);
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// A document of `pages` US Letter pages, each drawing the text `Page <n>`.
pub(crate) fn letter_document(pages: usize) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let resources_id = font_resources(&mut doc);

    let mut kids = Vec::new();
    for index in 0..pages {
        let contents_id = page_stream(&mut doc, index);
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => contents_id,
            "Resources" => resources_id,
            "MediaBox" => MediaBox::letter().to_object(),
        });
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages as i64,
    };
    finish(doc, pages_id, Object::Dictionary(pages_dict))
}

/// A document whose pages sit in two intermediate nodes and inherit their
/// media box and resources from the root of the page tree.
pub(crate) fn nested_document(pages: usize, media_box: MediaBox) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let resources_id = font_resources(&mut doc);

    let split = pages / 2;
    let mut branches = Vec::new();
    for range in [0..split, split..pages] {
        let branch_id = doc.new_object_id();
        let mut kids = Vec::new();
        for index in range.clone() {
            let contents_id = page_stream(&mut doc, index);
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => branch_id,
                "Contents" => contents_id,
            });
            kids.push(Object::Reference(page_id));
        }
        doc.objects.insert(
            branch_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Parent" => pages_id,
                "Kids" => kids,
                "Count" => range.len() as i64,
            }),
        );
        branches.push(Object::Reference(branch_id));
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => branches,
        "Count" => pages as i64,
        "MediaBox" => media_box.to_object(),
        "Resources" => resources_id,
    };
    finish(doc, pages_id, Object::Dictionary(pages_dict))
}

/// The `Page <n>` text drawn on a page.
pub(crate) fn page_label(doc: &Document, page_id: ObjectId) -> String {
    let content = doc.get_page_content(page_id).unwrap_or_default();
    let text = String::from_utf8_lossy(&content);
    let start = text.find('(').map(|i| i + 1).unwrap_or(0);
    let end = text.find(')').unwrap_or(text.len());
    text[start..end].to_string()
}

/// Save `doc` to `dir/relative`, creating parent directories.
pub(crate) fn write_document(dir: &Path, relative: &str, doc: &mut Document) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    doc.save(&path).unwrap();
    path
}
