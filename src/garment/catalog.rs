use serde::{Deserialize, Serialize};

use crate::foundation::error::{TryOnError, TryOnResult};
use crate::garment::color::Rgb8;

/// Style tag carried by a garment descriptor.
///
/// Tags outside the known set are kept verbatim in [`GarmentStyle::Other`] and render as casual.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GarmentStyle {
    Elegant,
    Formal,
    Casual,
    Party,
    Floral,
    Other(String),
}

impl GarmentStyle {
    /// Tag as written in catalogs.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Elegant => "elegant",
            Self::Formal => "formal",
            Self::Casual => "casual",
            Self::Party => "party",
            Self::Floral => "floral",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for GarmentStyle {
    fn from(s: String) -> Self {
        match s.as_str() {
            "elegant" => Self::Elegant,
            "formal" => Self::Formal,
            "casual" => Self::Casual,
            "party" => Self::Party,
            "floral" => Self::Floral,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for GarmentStyle {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

impl From<GarmentStyle> for String {
    fn from(s: GarmentStyle) -> Self {
        s.as_str().to_owned()
    }
}

/// One selectable costume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarmentDescriptor {
    pub id: u32,
    pub name: String,
    /// Base color as `#RRGGBB`.
    pub color: String,
    pub style: GarmentStyle,
    /// Optional overlay tag; `"floral"` suppresses the elegant waist jewels.
    #[serde(default)]
    pub pattern: Option<String>,
}

impl GarmentDescriptor {
    pub fn new(id: u32, name: &str, color: &str, style: impl Into<GarmentStyle>) -> Self {
        Self {
            id,
            name: name.to_owned(),
            color: color.to_owned(),
            style: style.into(),
            pattern: None,
        }
    }

    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.pattern = Some(pattern.to_owned());
        self
    }

    /// Base color; malformed channels read as zero.
    pub fn base_color(&self) -> Rgb8 {
        Rgb8::from_hex_lossy(&self.color)
    }

    pub fn has_floral_pattern(&self) -> bool {
        self.pattern.as_deref() == Some("floral")
    }
}

/// Fixed, ordered list of garments; the first entry is the default selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    garments: Vec<GarmentDescriptor>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The eight built-in garments.
    pub fn builtin() -> Self {
        Self {
            garments: vec![
                GarmentDescriptor::new(1, "Red Dress", "#FF4444", "elegant"),
                GarmentDescriptor::new(2, "Blue Gown", "#4444FF", "formal"),
                GarmentDescriptor::new(3, "Green Dress", "#44FF44", "casual"),
                GarmentDescriptor::new(4, "Purple Gown", "#8844FF", "elegant"),
                GarmentDescriptor::new(5, "Pink Dress", "#FF44AA", "party"),
                GarmentDescriptor::new(6, "Black Dress", "#222222", "formal"),
                GarmentDescriptor::new(7, "Yellow Dress", "#FFDD44", "summer"),
                GarmentDescriptor::new(8, "Floral Dress", "#FF88AA", "floral")
                    .with_pattern("floral"),
            ],
        }
    }

    /// Build a catalog from explicit entries.
    ///
    /// Ids must be unique and the list non-empty. Colors that fail strict parsing are kept (they
    /// render with zeroed channels) but logged.
    pub fn new(garments: Vec<GarmentDescriptor>) -> TryOnResult<Self> {
        if garments.is_empty() {
            return Err(TryOnError::validation("garment catalog must not be empty"));
        }
        for (i, g) in garments.iter().enumerate() {
            if garments[..i].iter().any(|o| o.id == g.id) {
                return Err(TryOnError::validation(format!(
                    "duplicate garment id {} ('{}')",
                    g.id, g.name
                )));
            }
            if let Err(e) = Rgb8::from_hex(&g.color) {
                tracing::warn!(garment = g.id, error = %e, "garment color is not #RRGGBB");
            }
        }
        Ok(Self { garments })
    }

    pub fn garments(&self) -> &[GarmentDescriptor] {
        &self.garments
    }

    pub fn get(&self, id: u32) -> Option<&GarmentDescriptor> {
        self.garments.iter().find(|g| g.id == id)
    }

    /// Garment selected when a session starts.
    pub fn default_garment(&self) -> Option<&GarmentDescriptor> {
        self.garments.first()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/garment/catalog.rs"]
mod tests;
