//! Shared fixtures for the integration tests.
//!
//! Documents are generated with `lopdf` so every test owns its inputs. Each
//! page draws the text `Page <n>` so tests can tell which source page ended
//! up where.

use lopdf::{Document, Object, Stream, dictionary};
use pdfreorg::batch::BatchProcessor;
use pdfreorg::io::PdfReader;
use pdfreorg::output::OutputFormatter;
use pdfreorg::transform::{MediaBox, media_boxes};
use std::path::{Path, PathBuf};

/// A document of `pages` US Letter pages.
pub fn numbered_document(pages: usize) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for index in 0..pages {
        let content = format!("BT /F1 24 Tf 72 720 Td (Page {index}) Tj ET");
        let contents_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => contents_id,
            "Resources" => resources_id,
            "MediaBox" => MediaBox::letter().to_object(),
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Write a `pages`-page document to `root/relative`.
pub fn write_pdf(root: &Path, relative: &str, pages: usize) -> PathBuf {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    numbered_document(pages).save(&path).unwrap();
    path
}

/// Write arbitrary bytes to `root/relative`.
pub fn write_bytes(root: &Path, relative: &str, bytes: &[u8]) -> PathBuf {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, bytes).unwrap();
    path
}

/// The `Page <n>` labels of a PDF on disk, in page order.
pub fn page_labels(path: &Path) -> Vec<String> {
    let doc = PdfReader::new().load(path).unwrap().document;
    doc.get_pages()
        .values()
        .map(|id| {
            let content = doc.get_page_content(*id).unwrap();
            let text = String::from_utf8_lossy(&content).into_owned();
            let start = text.find('(').unwrap() + 1;
            let end = text.find(')').unwrap();
            text[start..end].to_string()
        })
        .collect()
}

/// The media boxes of a PDF on disk, in page order.
pub fn page_boxes(path: &Path) -> Vec<MediaBox> {
    let doc = PdfReader::new().load(path).unwrap().document;
    media_boxes(&doc).unwrap()
}

/// All regular files below `root`, relative to it, sorted.
pub fn files_under(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
        .collect();
    files.sort();
    files
}

/// A processor that prints nothing.
pub fn quiet_processor() -> BatchProcessor {
    BatchProcessor::new(OutputFormatter::silent())
}

/// `Page <n>` labels for the given source indices.
pub fn labels_for(indices: &[usize]) -> Vec<String> {
    indices.iter().map(|i| format!("Page {i}")).collect()
}
