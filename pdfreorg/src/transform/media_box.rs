//! The visible region of a page.

use lopdf::{Document, Object};
use serde::Serialize;

/// A page's media box, `(left, bottom, right, top)` in points.
///
/// Values are kept in the order they appear in the PDF array; no
/// normalization of swapped corners is performed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MediaBox {
    /// Lower-left x.
    pub left: f32,
    /// Lower-left y.
    pub bottom: f32,
    /// Upper-right x.
    pub right: f32,
    /// Upper-right y.
    pub top: f32,
}

impl MediaBox {
    /// Create a media box from its four coordinates.
    pub fn new(left: f32, bottom: f32, right: f32, top: f32) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// US Letter, portrait.
    pub fn letter() -> Self {
        Self::new(0.0, 0.0, 612.0, 792.0)
    }

    /// This box with `top` lowered by `crop.top` and `bottom` raised by
    /// `crop.bottom`. Left and right are unchanged.
    ///
    /// The result is not clamped: margins larger than the page yield a box
    /// with zero or negative height.
    pub fn cropped(&self, crop: &crate::config::CropMargins) -> Self {
        Self {
            top: self.top - crop.top,
            bottom: self.bottom + crop.bottom,
            ..*self
        }
    }

    /// Horizontal extent.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Vertical extent.
    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// Whether the box encloses no visible area vertically.
    pub fn is_degenerate(&self) -> bool {
        self.height() <= 0.0
    }

    /// Read a media box from a PDF object.
    ///
    /// The array and each of its numbers may be indirect references. Returns
    /// `None` if the object is not an array of four numbers.
    pub fn from_object(doc: &Document, object: &Object) -> Option<Self> {
        let array = resolve(doc, object)?.as_array().ok()?;
        if array.len() != 4 {
            return None;
        }

        let mut coords = [0.0f32; 4];
        for (slot, item) in coords.iter_mut().zip(array) {
            *slot = resolve(doc, item)?.as_float().ok()?;
        }

        let [left, bottom, right, top] = coords;
        Some(Self::new(left, bottom, right, top))
    }

    /// Encode as a PDF array.
    pub fn to_object(&self) -> Object {
        Object::Array(vec![
            Object::Real(self.left),
            Object::Real(self.bottom),
            Object::Real(self.right),
            Object::Real(self.top),
        ])
    }
}

/// Follow a chain of indirect references to the object it names.
fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Object> {
    let mut current = object;
    // Bounded so a reference cycle cannot loop forever.
    for _ in 0..32 {
        match current {
            Object::Reference(id) => current = doc.get_object(*id).ok()?,
            other => return Some(other),
        }
    }
    None
}
