//! Table pagination.
//!
//! The table is cut into page-bound blocks. Every block repeats the header
//! row; every block but the last carries the "continued" marker. Blocks are
//! produced one page at a time from the rows not yet placed.

use folio_core::{EPSILON, LayoutError, LayoutResult, Pt, ValueObject, approx_le};

use crate::cursor::PageFlowCursor;
use crate::geometry::{PageGeometry, TableGeometry};

/// Alternating row fill, assigned by global row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowStripe {
    Odd,
    Even,
}

impl RowStripe {
    /// Stripe of the row at zero-based `index` in the full item list.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 { RowStripe::Odd } else { RowStripe::Even }
    }
}

/// One page's worth of table rows plus pagination flags.
#[derive(Debug, Clone, PartialEq)]
pub struct PageBlock<'a, T> {
    /// Contiguous run of the item list placed on this page.
    pub rows: &'a [T],
    /// Index of `rows[0]` in the full item list.
    pub first_row_index: usize,
    /// Page the block is drawn on (1-based).
    pub page_number: u32,
    /// y of the block's top edge (top of its header row).
    pub top: Pt,
    pub is_first_page: bool,
    pub is_last_page: bool,
    /// Draw the "continued on next page" mention under this block.
    pub continued_marker: bool,
}

impl<T: Clone + PartialEq + core::fmt::Debug> ValueObject for PageBlock<'_, T> {}

impl<'a, T> PageBlock<'a, T> {
    /// Row number shown in the N° column for `rows[local_index]`. Numbering is
    /// 1-based and continues across pages.
    pub fn row_number(&self, local_index: usize) -> usize {
        self.first_row_index + local_index + 1
    }

    pub fn stripe(&self, local_index: usize) -> RowStripe {
        RowStripe::for_index(self.first_row_index + local_index)
    }

    /// `(row number, stripe, item)` for every row of the block.
    pub fn numbered_rows(&self) -> impl Iterator<Item = (usize, RowStripe, &'a T)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| (self.row_number(i), self.stripe(i), row))
    }

    /// Drawn height of the block (header plus its rows).
    pub fn height(&self, table: &TableGeometry) -> Pt {
        table.block_height(self.rows.len())
    }
}

/// Assign `items` to page-bound table blocks.
///
/// `trailing_reserved_height` is the room the sections after the table (totals,
/// amount in words, signatures) need on whichever page turns out to be last.
/// It is kept free on every page, since any page may be the last one.
///
/// The cursor is advanced past every emitted block and moved to a new page for
/// each continuation, so on return it sits right below the table on its last
/// page.
///
/// # Errors
///
/// - [`LayoutError::InvalidGeometry`] when the starting page cannot fit the
///   header row after the reservation, or a fresh page cannot fit the header
///   plus one data row after it.
/// - [`LayoutError::ContractViolation`] when the cursor belongs to another page
///   geometry, or the single-row minimum would overrun the starting page.
pub fn paginate<'a, T>(
    items: &'a [T],
    table: &TableGeometry,
    page: &PageGeometry,
    cursor: &mut PageFlowCursor,
    trailing_reserved_height: Pt,
) -> LayoutResult<Vec<PageBlock<'a, T>>> {
    if !trailing_reserved_height.is_finite() || trailing_reserved_height < 0.0 {
        return Err(LayoutError::geometry(format!(
            "trailing reserved height must be non-negative (got {trailing_reserved_height})"
        )));
    }
    if (cursor.full_height() - page.content_height()).abs() > EPSILON {
        return Err(LayoutError::contract(format!(
            "cursor page height {}pt does not match page geometry content height {}pt",
            cursor.full_height(),
            page.content_height()
        )));
    }

    let fresh_page_room = page.content_height() - trailing_reserved_height;
    if !approx_le(table.block_height(1), fresh_page_room) {
        return Err(LayoutError::geometry(format!(
            "a fresh page leaves {fresh_page_room}pt for the table but a header and one row need {}pt",
            table.block_height(1)
        )));
    }

    let available = cursor.remaining_height() - trailing_reserved_height;
    if !approx_le(table.header_row_height(), available) {
        return Err(LayoutError::geometry(format!(
            "only {available}pt left on page {} for a {}pt table header",
            cursor.page_number(),
            table.header_row_height()
        )));
    }

    let mut blocks = Vec::with_capacity(estimate_pages(items.len(), table, fresh_page_room));
    let mut offset = 0;
    // Each pass places one block from the unplaced suffix `items[offset..]`
    // and stops once a block takes everything left. A forced row that empties
    // the list still gets a header-only closing block on the next page.
    loop {
        let placed = place_block(
            items,
            offset,
            table,
            cursor,
            trailing_reserved_height,
            &mut blocks,
        )?;
        match placed {
            Placement::Final => break,
            Placement::Continued(rows) => offset += rows,
        }
    }
    Ok(blocks)
}

/// Outcome of placing one block.
enum Placement {
    /// Every remaining row was placed.
    Final,
    /// That many rows were placed and the cursor moved to a new page.
    Continued(usize),
}

/// Lay out as much of `items[offset..]` as fits at the cursor. When rows are
/// left over, the cursor is moved to the next page.
fn place_block<'a, T>(
    items: &'a [T],
    offset: usize,
    table: &TableGeometry,
    cursor: &mut PageFlowCursor,
    trailing_reserved_height: Pt,
    blocks: &mut Vec<PageBlock<'a, T>>,
) -> LayoutResult<Placement> {
    let rows = &items[offset..];
    let available = cursor.remaining_height() - trailing_reserved_height;
    let is_first_page = blocks.is_empty();

    let required = table.block_height(rows.len());
    if approx_le(required, available) || rows_fitting(available, table) >= rows.len() {
        let top = cursor.y();
        cursor.consume(required)?;
        blocks.push(PageBlock {
            rows,
            first_row_index: offset,
            page_number: cursor.page_number(),
            top,
            is_first_page,
            is_last_page: true,
            continued_marker: false,
        });
        return Ok(Placement::Final);
    }

    let rows_that_fit = rows_fitting(available, table).max(1).min(rows.len());
    let top = cursor.y();
    cursor.consume(table.block_height(rows_that_fit))?;
    blocks.push(PageBlock {
        rows: &rows[..rows_that_fit],
        first_row_index: offset,
        page_number: cursor.page_number(),
        top,
        is_first_page,
        is_last_page: false,
        continued_marker: true,
    });

    let page_break = cursor.new_page();
    tracing::debug!(
        rows_placed = rows_that_fit,
        rows_left = rows.len() - rows_that_fit,
        next_page = page_break.page_number,
        "table continues on next page"
    );
    Ok(Placement::Continued(rows_that_fit))
}

/// Data rows that fit under a header in `available` points.
fn rows_fitting(available: Pt, table: &TableGeometry) -> usize {
    let room = available - table.header_row_height() + EPSILON;
    if room <= 0.0 {
        return 0;
    }
    (room / table.data_row_height()).floor() as usize
}

fn estimate_pages(rows: usize, table: &TableGeometry, fresh_page_room: Pt) -> usize {
    let per_page = rows_fitting(fresh_page_room, table).max(1);
    rows / per_page + 2
}
