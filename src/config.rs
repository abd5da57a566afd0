//! Configuration types for Markdown conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Both converters read the same struct;
//! each ignores the fields that only concern the other (the HTML converter has
//! no use for page geometry, the PDF converter has no stylesheet).

use crate::error::MdPrintError;
use serde::{Deserialize, Serialize};

/// Configuration for a Markdown conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use mdprint::{ConversionConfig, PageSize};
///
/// let config = ConversionConfig::builder()
///     .title("Developer Guide")
///     .page_size(PageSize::A4)
///     .margin_pt(54.0)
///     .build()
///     .unwrap();
/// assert_eq!(config.page_size, PageSize::A4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Document title for `<title>` and the PDF info dictionary.
    /// If None, the first heading is used, falling back to `"Document"`.
    pub title: Option<String>,

    /// PDF page size. Default: [`PageSize::Letter`].
    pub page_size: PageSize,

    /// Margin applied to all four page edges, in points. Default: 72 (one inch).
    pub margin_pt: f32,

    /// Extra CSS appended after the built-in print stylesheet (HTML only).
    pub extra_css: Option<String>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            title: None,
            page_size: PageSize::default(),
            margin_pt: 72.0,
            extra_css: None,
        }
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    pub fn page_size(mut self, size: PageSize) -> Self {
        self.config.page_size = size;
        self
    }

    pub fn margin_pt(mut self, margin: f32) -> Self {
        self.config.margin_pt = margin;
        self
    }

    pub fn extra_css(mut self, css: impl Into<String>) -> Self {
        self.config.extra_css = Some(css.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, MdPrintError> {
        let c = &self.config;
        if !c.margin_pt.is_finite() || c.margin_pt < 0.0 {
            return Err(MdPrintError::InvalidConfig(format!(
                "Margin must be a non-negative number of points, got {}",
                c.margin_pt
            )));
        }
        let (width, height) = c.page_size.dimensions();
        if c.margin_pt * 2.0 >= width.min(height) {
            return Err(MdPrintError::InvalidConfig(format!(
                "Margin of {}pt leaves no printable area on a {:?} page",
                c.margin_pt, c.page_size
            )));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Physical page size of the generated PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PageSize {
    /// US Letter, 8.5 × 11 in (default).
    #[default]
    Letter,
    /// ISO A4, 210 × 297 mm.
    A4,
}

impl PageSize {
    /// Width and height in PostScript points.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.28, 841.89),
        }
    }
}
