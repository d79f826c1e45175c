//! Scannable-code renderer collaborator.
//!
//! The engine never renders or prints codes itself; it supplies a payload
//! string (an entity's label, or a serialized product record) and a print
//! region to an external renderer. These traits are the whole contract.

use crate::error::Result;

/// Physical label width in millimetres.
pub const LABEL_WIDTH_MM: f64 = 60.0;
/// Physical label height in millimetres.
pub const LABEL_HEIGHT_MM: f64 = 40.0;

/// An opaque rendered code, produced by the collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCode {
    /// The payload that was encoded.
    pub payload: String,
}

/// A printable region: the label area plus its document title.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintRegion {
    /// Document title, e.g. `Etiqueta-Rack-3`.
    pub title: String,
    /// Region width in millimetres.
    pub width_mm: f64,
    /// Region height in millimetres.
    pub height_mm: f64,
}

impl PrintRegion {
    /// A standard label region for the given document title.
    pub fn label(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width_mm: LABEL_WIDTH_MM,
            height_mm: LABEL_HEIGHT_MM,
        }
    }
}

/// The external scannable-code service.
pub trait CodeRenderer {
    /// Renders a displayable code for the payload.
    fn render(&self, payload: &str) -> Result<RenderedCode>;

    /// Sends a rendered region to the print service.
    fn print(&self, code: &RenderedCode, region: &PrintRegion) -> Result<()>;
}
