//! Visual theme: page frame, table rows, fonts, colors and image assets.

use serde::{Deserialize, Serialize};

use folio_core::{LayoutError, LayoutResult, Pt, mm};
use folio_layout::{PageGeometry, TableGeometry};

use crate::canvas::{Color, FontSpec};
use crate::document::{Column, ColumnWidth};
use crate::error::{RenderError, RenderResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSet {
    pub regular: String,
    pub bold: String,
    pub italic: String,
}

impl Default for FontSet {
    fn default() -> Self {
        Self {
            regular: "Helvetica".to_string(),
            bold: "Helvetica-Bold".to_string(),
            italic: "Helvetica-Oblique".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

/// Gold/brown palette of the default theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub gold_dark: Color,
    pub gold: Color,
    pub gold_light: Color,
    pub brown_dark: Color,
    pub brown_medium: Color,
    pub gray: Color,
    pub gray_dark: Color,
    pub table_header_text: Color,
    pub stripe_odd: Color,
    pub stripe_even: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            gold_dark: Color::rgb(0x8B, 0x69, 0x14),
            gold: Color::rgb(0xC5, 0x96, 0x1A),
            gold_light: Color::rgb(0xD4, 0xA8, 0x43),
            brown_dark: Color::rgb(0x3D, 0x1F, 0x00),
            brown_medium: Color::rgb(0x7A, 0x3B, 0x11),
            gray: Color::rgb(0x88, 0x88, 0x88),
            gray_dark: Color::rgb(0x44, 0x44, 0x44),
            table_header_text: Color::WHITE,
            stripe_odd: Color::WHITE,
            stripe_even: Color::rgb(0xFA, 0xF5, 0xEB),
        }
    }
}

/// Optional image assets. Missing entries are simply not drawn; unloadable
/// ones fall back to flat fills chosen by the composer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeAssets {
    pub header_logo: Option<String>,
    pub watermark: Option<String>,
    /// Texture of the separator bars under the header and above the footer.
    pub bar_texture: Option<String>,
    /// Texture behind the table header row.
    pub table_header_texture: Option<String>,
}

/// Everything the composer needs to know about how a page looks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageTheme {
    pub page: PageGeometry,
    /// Left/right margin of the item table and the sections under it.
    pub table_margin: Pt,
    /// Left/right margin of header and footer text.
    pub text_margin: Pt,
    pub header_row_height: Pt,
    pub data_row_height: Pt,
    /// Suffix after amounts in the totals box.
    pub currency_symbol: String,
    pub fonts: FontSet,
    pub palette: Palette,
    pub assets: ThemeAssets,
}

impl Default for PageTheme {
    fn default() -> Self {
        Self {
            page: PageGeometry::a4(),
            table_margin: mm(20.0),
            text_margin: mm(25.0),
            header_row_height: mm(7.0),
            data_row_height: mm(5.5),
            currency_symbol: "DH".to_string(),
            fonts: FontSet::default(),
            palette: Palette::default(),
            assets: ThemeAssets::default(),
        }
    }
}

impl PageTheme {
    /// Parse a theme from JSON. Absent fields keep their default value; the
    /// result is validated before it is returned.
    pub fn from_json(json: &str) -> RenderResult<Self> {
        let theme: PageTheme = serde_json::from_str(json)
            .map_err(|e| RenderError::config(format!("page theme: {e}")))?;
        theme.validate()?;
        Ok(theme)
    }

    pub fn validate(&self) -> LayoutResult<()> {
        if !(self.table_width() > 0.0) {
            return Err(LayoutError::geometry(format!(
                "table margin {}pt leaves no room on a {}pt wide page",
                self.table_margin,
                self.page.page_width()
            )));
        }
        if !(self.header_row_height > 0.0 && self.data_row_height > 0.0) {
            return Err(LayoutError::geometry("table row heights must be positive"));
        }
        Ok(())
    }

    pub fn table_width(&self) -> Pt {
        self.page.page_width() - 2.0 * self.table_margin
    }

    pub fn font(&self, style: FontStyle, size: Pt) -> FontSpec {
        let family = match style {
            FontStyle::Regular => &self.fonts.regular,
            FontStyle::Bold => &self.fonts.bold,
            FontStyle::Italic => &self.fonts.italic,
        };
        FontSpec::new(family.clone(), size)
    }

    /// Resolve `columns` against the table width. Each `Fill` column shares
    /// what the fixed columns leave.
    pub fn table_geometry(&self, columns: &[Column]) -> LayoutResult<TableGeometry> {
        let table_width = self.table_width();
        let fixed: Pt = columns
            .iter()
            .filter_map(|c| match c.width {
                ColumnWidth::Fixed(w) => Some(w),
                ColumnWidth::Fill => None,
            })
            .sum();
        let fill_count = columns
            .iter()
            .filter(|c| c.width == ColumnWidth::Fill)
            .count();

        let fill_width = if fill_count == 0 {
            0.0
        } else {
            (table_width - fixed) / fill_count as Pt
        };
        if fill_count > 0 && fill_width <= 0.0 {
            return Err(LayoutError::geometry(format!(
                "fixed columns take {fixed}pt of a {table_width}pt table"
            )));
        }

        let widths = columns
            .iter()
            .map(|c| match c.width {
                ColumnWidth::Fixed(w) => w,
                ColumnWidth::Fill => fill_width,
            })
            .collect();

        TableGeometry::new(
            widths,
            table_width,
            self.header_row_height,
            self.data_row_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentKind;

    #[test]
    fn default_theme_resolves_every_kind_of_table() {
        let theme = PageTheme::default();
        theme.validate().unwrap();

        for kind in DocumentKind::ALL {
            let table = theme.table_geometry(&kind.columns()).unwrap();
            assert_eq!(table.column_count(), kind.columns().len());
            assert!((table.table_width() - theme.table_width()).abs() < 0.01);
        }
    }

    #[test]
    fn invoice_designation_column_takes_the_remaining_width() {
        let theme = PageTheme::default();
        let table = theme
            .table_geometry(&DocumentKind::Invoice.columns())
            .unwrap();
        let expected = theme.table_width() - mm(68.0);
        assert!((table.column_widths()[1] - expected).abs() < 0.01);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let theme = PageTheme::from_json(
            r##"{"currency_symbol":"MAD","palette":{"gold":"#AA8800"},"assets":{"watermark":"wm.png"}}"##,
        )
        .unwrap();
        assert_eq!(theme.currency_symbol, "MAD");
        assert_eq!(theme.palette.gold, Color::rgb(0xAA, 0x88, 0x00));
        assert_eq!(theme.palette.brown_dark, Palette::default().brown_dark);
        assert_eq!(theme.assets.watermark.as_deref(), Some("wm.png"));
        assert_eq!(theme.page, PageGeometry::a4());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = PageTheme::from_json(r#"{"palette":{"gold":"gold"}}"#).unwrap_err();
        assert!(matches!(err, RenderError::Config(_)));

        let err = PageTheme::from_json(r#"{"table_margin":400.0}"#).unwrap_err();
        assert!(matches!(err, RenderError::Layout(LayoutError::InvalidGeometry(_))));
    }

    #[test]
    fn too_many_fixed_columns_are_rejected() {
        let theme = PageTheme {
            table_margin: mm(90.0),
            ..PageTheme::default()
        };
        let err = theme
            .table_geometry(&DocumentKind::Invoice.columns())
            .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidGeometry(_)));
    }
}
