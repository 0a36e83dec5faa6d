//! Page selection, reordering and cropping.

use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

use crate::config::Layout;
use crate::error::{ReorgError, Result};
use crate::transform::MediaBox;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

/// Maximum page tree depth followed when resolving inherited attributes.
const MAX_TREE_DEPTH: usize = 64;

/// Build a new document from the pages of `source` selected by
/// `layout.page_order`, each with its media box cropped by `layout.crop`.
///
/// Every index is checked before anything is built; the first index at or
/// past the page count fails the whole call with
/// [`ReorgError::PageIndexOutOfRange`].
///
/// Output page `n` is source page `page_order[n]`. A repeated index produces
/// independent copies of the page, each cropped once from the source box, so
/// repetition never crops cumulatively. The copies share the page's
/// annotation objects, so an annotation's `/P` entry keeps naming the first
/// occurrence. Inherited page attributes are copied onto each output page.
/// Pages that are not selected are dropped.
///
/// # Errors
///
/// Returns an error if:
/// - An index is out of range
/// - A selected page has no usable media box
/// - The catalog or page tree cannot be rewritten
///
/// # Examples
///
/// ```no_run
/// # use pdfreorg::config::{CropMargins, Layout, PageOrder};
/// # use pdfreorg::transform::reorder_and_crop;
/// # use lopdf::Document;
/// # fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
/// let layout = Layout::new(PageOrder::parse("4,0,2")?, CropMargins::new(54.0, 39.0)?);
/// let output = reorder_and_crop(&doc, &layout)?;
/// assert_eq!(output.get_pages().len(), 3);
/// # Ok(())
/// # }
/// ```
#[instrument(
    level = "debug",
    skip_all,
    fields(order = %layout.page_order, crop_top = layout.crop.top, crop_bottom = layout.crop.bottom)
)]
pub fn reorder_and_crop(source: &Document, layout: &Layout) -> Result<Document> {
    let source_pages: Vec<ObjectId> = source.get_pages().into_values().collect();
    let page_count = source_pages.len();

    for &index in layout.page_order.as_slice() {
        if index >= page_count {
            return Err(ReorgError::PageIndexOutOfRange { index, page_count });
        }
    }

    let mut output = source.clone();
    let pages_root = pages_root_id(&output)?;

    let mut emitted: HashSet<ObjectId> = HashSet::new();
    let mut kids = Vec::with_capacity(layout.page_order.len());

    for &index in layout.page_order.as_slice() {
        let source_id = source_pages[index];
        let mut page = flatten_page(source, source_id)?;

        let media_box = page
            .get(b"MediaBox")
            .ok()
            .and_then(|object| MediaBox::from_object(source, object))
            .ok_or_else(|| ReorgError::malformed_page(index, "missing or invalid MediaBox"))?;

        let cropped = media_box.cropped(&layout.crop);
        if cropped.is_degenerate() {
            warn!(
                page = index,
                top = cropped.top,
                bottom = cropped.bottom,
                "Crop leaves no visible height"
            );
        }

        page.set("MediaBox", cropped.to_object());
        page.set("Parent", Object::Reference(pages_root));

        // The first occurrence keeps the source object id; repeats get a copy
        // that still references the same Annots.
        let page_id = if emitted.insert(source_id) {
            output.objects.insert(source_id, Object::Dictionary(page));
            source_id
        } else {
            output.add_object(Object::Dictionary(page))
        };

        debug!(page = index, ?page_id, "Page selected");
        kids.push(Object::Reference(page_id));
    }

    replace_kids(&mut output, pages_root, kids)?;
    let pruned = output.prune_objects();
    debug!(pruned = pruned.len(), "Dropped unreferenced objects");

    Ok(output)
}

/// Media boxes of every page in `doc`, in page order, with inheritance resolved.
///
/// # Errors
///
/// Returns `MalformedPage` for the first page without a usable media box.
pub fn media_boxes(doc: &Document) -> Result<Vec<MediaBox>> {
    doc.get_pages()
        .into_values()
        .enumerate()
        .map(|(index, page_id)| {
            let page = flatten_page(doc, page_id)?;
            page.get(b"MediaBox")
                .ok()
                .and_then(|object| MediaBox::from_object(doc, object))
                .ok_or_else(|| ReorgError::malformed_page(index, "missing or invalid MediaBox"))
        })
        .collect()
}

/// Copy of a page dictionary with inherited attributes made explicit.
fn flatten_page(doc: &Document, page_id: ObjectId) -> Result<Dictionary> {
    let mut page = doc
        .get_dictionary(page_id)
        .map_err(|e| ReorgError::page_tree(format!("Failed to get page {page_id:?}: {e}")))?
        .clone();

    let mut parent = parent_of(&page);
    let mut depth = 0;

    while let Some(parent_id) = parent {
        if depth == MAX_TREE_DEPTH || INHERITABLE_KEYS.iter().all(|key| page.has(key)) {
            break;
        }
        let Ok(node) = doc.get_dictionary(parent_id) else {
            break;
        };

        for key in INHERITABLE_KEYS {
            if !page.has(key)
                && let Ok(value) = node.get(key)
            {
                page.set(key.to_vec(), value.clone());
            }
        }

        parent = parent_of(node);
        depth += 1;
    }

    Ok(page)
}

fn parent_of(node: &Dictionary) -> Option<ObjectId> {
    node.get(b"Parent").and_then(Object::as_reference).ok()
}

fn pages_root_id(doc: &Document) -> Result<ObjectId> {
    let catalog = doc
        .catalog()
        .map_err(|e| ReorgError::page_tree(format!("Failed to get catalog: {e}")))?;

    catalog
        .get(b"Pages")
        .and_then(Object::as_reference)
        .map_err(|e| ReorgError::page_tree(format!("Failed to get pages reference: {e}")))
}

/// Point the root page tree node at exactly `kids`.
fn replace_kids(doc: &mut Document, pages_root: ObjectId, kids: Vec<Object>) -> Result<()> {
    let pages_obj = doc
        .get_object_mut(pages_root)
        .map_err(|e| ReorgError::page_tree(format!("Failed to get pages object: {e}")))?;

    if let Object::Dictionary(dict) = pages_obj {
        dict.set("Count", Object::Integer(kids.len() as i64));
        dict.set("Kids", Object::Array(kids));
        Ok(())
    } else {
        Err(ReorgError::page_tree("Pages object is not a dictionary"))
    }
}
