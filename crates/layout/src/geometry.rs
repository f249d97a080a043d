//! Page and table geometry.
//!
//! Both types are checked at construction so that pagination never discovers a
//! malformed configuration halfway through a document.

use serde::{Deserialize, Serialize};

use folio_core::{EPSILON, LayoutError, LayoutResult, Pt, ValueObject, mm};

/// A4 width in points.
pub const A4_WIDTH: Pt = 595.27;
/// A4 height in points.
pub const A4_HEIGHT: Pt = 841.89;

/// Fixed page frame. The content region is what remains once margins and the
/// repeated header/footer bands are removed.
///
/// Coordinates follow the PDF convention: the origin is the bottom-left corner
/// and y grows upwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPageGeometry", into = "RawPageGeometry")]
pub struct PageGeometry {
    page_width: Pt,
    page_height: Pt,
    top_margin: Pt,
    bottom_margin: Pt,
    header_reserved_height: Pt,
    footer_reserved_height: Pt,
}

impl ValueObject for PageGeometry {}

impl PageGeometry {
    pub fn new(
        page_width: Pt,
        page_height: Pt,
        top_margin: Pt,
        bottom_margin: Pt,
        header_reserved_height: Pt,
        footer_reserved_height: Pt,
    ) -> LayoutResult<Self> {
        ensure_positive("page_width", page_width)?;
        ensure_positive("page_height", page_height)?;
        ensure_non_negative("top_margin", top_margin)?;
        ensure_non_negative("bottom_margin", bottom_margin)?;
        ensure_non_negative("header_reserved_height", header_reserved_height)?;
        ensure_non_negative("footer_reserved_height", footer_reserved_height)?;

        let geometry = Self {
            page_width,
            page_height,
            top_margin,
            bottom_margin,
            header_reserved_height,
            footer_reserved_height,
        };

        if geometry.content_height() <= 0.0 {
            return Err(LayoutError::geometry(format!(
                "content height must be positive (page {page_height}pt leaves {}pt after margins and header/footer bands)",
                geometry.content_height()
            )));
        }

        Ok(geometry)
    }

    /// A4 portrait with a 50 mm letterhead band and a 28 mm legal footer.
    pub fn a4() -> Self {
        Self {
            page_width: A4_WIDTH,
            page_height: A4_HEIGHT,
            top_margin: mm(5.0),
            bottom_margin: 0.0,
            header_reserved_height: mm(50.0),
            footer_reserved_height: mm(28.0),
        }
    }

    pub fn page_width(&self) -> Pt {
        self.page_width
    }

    pub fn page_height(&self) -> Pt {
        self.page_height
    }

    pub fn top_margin(&self) -> Pt {
        self.top_margin
    }

    pub fn bottom_margin(&self) -> Pt {
        self.bottom_margin
    }

    pub fn header_reserved_height(&self) -> Pt {
        self.header_reserved_height
    }

    pub fn footer_reserved_height(&self) -> Pt {
        self.footer_reserved_height
    }

    /// Usable height of a fresh page.
    pub fn content_height(&self) -> Pt {
        self.page_height
            - self.top_margin
            - self.bottom_margin
            - self.header_reserved_height
            - self.footer_reserved_height
    }

    /// y of the first writable line, just below the header band.
    pub fn content_top(&self) -> Pt {
        self.page_height - self.top_margin - self.header_reserved_height
    }

    /// y below which nothing may be written (top of the footer band).
    pub fn content_bottom(&self) -> Pt {
        self.bottom_margin + self.footer_reserved_height
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// Column layout and row heights of the item table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTableGeometry", into = "RawTableGeometry")]
pub struct TableGeometry {
    column_widths: Vec<Pt>,
    table_width: Pt,
    header_row_height: Pt,
    data_row_height: Pt,
}

impl ValueObject for TableGeometry {}

impl TableGeometry {
    pub fn new(
        column_widths: Vec<Pt>,
        table_width: Pt,
        header_row_height: Pt,
        data_row_height: Pt,
    ) -> LayoutResult<Self> {
        ensure_positive("table_width", table_width)?;
        ensure_positive("header_row_height", header_row_height)?;
        ensure_positive("data_row_height", data_row_height)?;

        if column_widths.is_empty() {
            return Err(LayoutError::geometry("table needs at least one column"));
        }
        for (index, width) in column_widths.iter().enumerate() {
            ensure_positive(&format!("column_widths[{index}]"), *width)?;
        }

        let sum: Pt = column_widths.iter().sum();
        if (sum - table_width).abs() > EPSILON {
            return Err(LayoutError::geometry(format!(
                "column widths sum to {sum}pt but table width is {table_width}pt"
            )));
        }

        Ok(Self {
            column_widths,
            table_width,
            header_row_height,
            data_row_height,
        })
    }

    pub fn column_widths(&self) -> &[Pt] {
        &self.column_widths
    }

    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }

    pub fn table_width(&self) -> Pt {
        self.table_width
    }

    pub fn header_row_height(&self) -> Pt {
        self.header_row_height
    }

    pub fn data_row_height(&self) -> Pt {
        self.data_row_height
    }

    /// Left edge of each column, relative to the table's left edge.
    pub fn column_offsets(&self) -> Vec<Pt> {
        self.column_widths
            .iter()
            .scan(0.0, |x, width| {
                let left = *x;
                *x += width;
                Some(left)
            })
            .collect()
    }

    /// Height of a table block holding a header and `rows` data rows.
    pub fn block_height(&self, rows: usize) -> Pt {
        self.header_row_height + self.data_row_height * rows as Pt
    }
}

fn ensure_positive(name: &str, value: Pt) -> LayoutResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(LayoutError::geometry(format!(
            "{name} must be positive (got {value})"
        )));
    }
    Ok(())
}

fn ensure_non_negative(name: &str, value: Pt) -> LayoutResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(LayoutError::geometry(format!(
            "{name} must be non-negative (got {value})"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawPageGeometry {
    page_width: Pt,
    page_height: Pt,
    top_margin: Pt,
    bottom_margin: Pt,
    header_reserved_height: Pt,
    footer_reserved_height: Pt,
}

impl TryFrom<RawPageGeometry> for PageGeometry {
    type Error = LayoutError;

    fn try_from(raw: RawPageGeometry) -> Result<Self, Self::Error> {
        PageGeometry::new(
            raw.page_width,
            raw.page_height,
            raw.top_margin,
            raw.bottom_margin,
            raw.header_reserved_height,
            raw.footer_reserved_height,
        )
    }
}

impl From<PageGeometry> for RawPageGeometry {
    fn from(g: PageGeometry) -> Self {
        Self {
            page_width: g.page_width,
            page_height: g.page_height,
            top_margin: g.top_margin,
            bottom_margin: g.bottom_margin,
            header_reserved_height: g.header_reserved_height,
            footer_reserved_height: g.footer_reserved_height,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawTableGeometry {
    column_widths: Vec<Pt>,
    table_width: Pt,
    header_row_height: Pt,
    data_row_height: Pt,
}

impl TryFrom<RawTableGeometry> for TableGeometry {
    type Error = LayoutError;

    fn try_from(raw: RawTableGeometry) -> Result<Self, Self::Error> {
        TableGeometry::new(
            raw.column_widths,
            raw.table_width,
            raw.header_row_height,
            raw.data_row_height,
        )
    }
}

impl From<TableGeometry> for RawTableGeometry {
    fn from(g: TableGeometry) -> Self {
        Self {
            column_widths: g.column_widths,
            table_width: g.table_width,
            header_row_height: g.header_row_height,
            data_row_height: g.data_row_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_preset_is_valid() {
        let a4 = PageGeometry::a4();
        let checked = PageGeometry::new(
            a4.page_width(),
            a4.page_height(),
            a4.top_margin(),
            a4.bottom_margin(),
            a4.header_reserved_height(),
            a4.footer_reserved_height(),
        )
        .unwrap();
        assert_eq!(checked, a4);
        assert!(a4.content_height() > 600.0 && a4.content_height() < 610.0);
        assert!((a4.content_top() - a4.content_bottom() - a4.content_height()).abs() < 1e-3);
    }

    #[test]
    fn page_without_content_room_is_rejected() {
        let err = PageGeometry::new(100.0, 100.0, 10.0, 10.0, 40.0, 40.0).unwrap_err();
        match err {
            LayoutError::InvalidGeometry(msg) if msg.contains("content height") => {}
            other => panic!("Expected InvalidGeometry, got {other:?}"),
        }
    }

    #[test]
    fn negative_or_nan_page_dimensions_are_rejected() {
        assert!(PageGeometry::new(0.0, 100.0, 0.0, 0.0, 0.0, 0.0).is_err());
        assert!(PageGeometry::new(100.0, f32::NAN, 0.0, 0.0, 0.0, 0.0).is_err());
        assert!(PageGeometry::new(100.0, 100.0, -1.0, 0.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn columns_must_sum_to_table_width() {
        assert!(TableGeometry::new(vec![10.0, 20.0, 30.0], 60.0, 7.0, 5.0).is_ok());
        assert!(TableGeometry::new(vec![10.0, 20.0, 30.0], 60.005, 7.0, 5.0).is_ok());

        let err = TableGeometry::new(vec![10.0, 20.0], 60.0, 7.0, 5.0).unwrap_err();
        match err {
            LayoutError::InvalidGeometry(msg) if msg.contains("sum") => {}
            other => panic!("Expected InvalidGeometry for column sum, got {other:?}"),
        }
    }

    #[test]
    fn non_positive_row_heights_are_rejected() {
        assert!(TableGeometry::new(vec![60.0], 60.0, 0.0, 5.0).is_err());
        assert!(TableGeometry::new(vec![60.0], 60.0, 7.0, -5.0).is_err());
        assert!(TableGeometry::new(vec![60.0, 0.0], 60.0, 7.0, 5.0).is_err());
        assert!(TableGeometry::new(vec![], 60.0, 7.0, 5.0).is_err());
    }

    #[test]
    fn column_offsets_accumulate_widths() {
        let table = TableGeometry::new(vec![10.0, 20.0, 30.0], 60.0, 7.0, 5.0).unwrap();
        assert_eq!(table.column_offsets(), vec![0.0, 10.0, 30.0]);
        assert_eq!(table.block_height(0), 7.0);
        assert_eq!(table.block_height(3), 22.0);
    }

    #[test]
    fn deserialization_goes_through_validation() {
        let ok: TableGeometry = serde_json::from_str(
            r#"{"column_widths":[20.0,40.0],"table_width":60.0,"header_row_height":7.0,"data_row_height":5.0}"#,
        )
        .unwrap();
        assert_eq!(ok.column_count(), 2);

        let bad = serde_json::from_str::<TableGeometry>(
            r#"{"column_widths":[20.0,30.0],"table_width":60.0,"header_row_height":7.0,"data_row_height":5.0}"#,
        );
        assert!(bad.is_err());

        let page = serde_json::to_string(&PageGeometry::a4()).unwrap();
        let back: PageGeometry = serde_json::from_str(&page).unwrap();
        assert_eq!(back, PageGeometry::a4());
    }
}
