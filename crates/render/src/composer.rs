//! Document assembly: page chrome, heading, paginated item table, and the
//! sections that close the document (totals, amount in words, signatures).

use folio_core::{Pt, mm};
use folio_invoicing::{LineItem, TaxPolicy, Totals, compute_totals, format_amount};
use folio_layout::{PageBlock, PageFlowCursor, RowStripe, TableGeometry, paginate};
use folio_words::{CurrencyWording, legal_phrase};

use crate::canvas::{
    Canvas, Color, FontSpec, ImageFallback, ImageSpec, RectSpec, Stroke, TextAlign, TextSpec,
};
use crate::company::CompanyProfile;
use crate::document::{CellContent, Column, DocumentRequest};
use crate::error::{CanvasError, RenderResult};
use crate::theme::{FontStyle, PageTheme};

/// Printed under every table block that continues on the next page.
pub const CONTINUED_MARKER: &str = ">>> Suite page suivante";

pub const DEFAULT_PAYMENT_MODE: &str = "Virement bancaire / Espèces / Chèque";

const ELLIPSIS: &str = "…";

const BAR_HEIGHT: Pt = mm(3.0);
const BAR_STEPS: usize = 60;

const TITLE_FONT_SIZE: Pt = 11.5;
const TITLE_MIN_FONT_SIZE: Pt = 8.0;
const HEADING_LINE: Pt = 16.0;
const HEADING_GAP: Pt = mm(4.0);
const CLIENT_BOX_WIDTH: Pt = mm(75.0);
const CLIENT_BOX_HEIGHT: Pt = mm(28.0);

const TABLE_HEADER_FONT_SIZE: Pt = 9.0;
const TABLE_ROW_FONT_SIZE: Pt = 7.5;
const CELL_PADDING: Pt = 2.0;
/// Baseline offset below a row's vertical middle, as a fraction of font size.
const BASELINE_DROP: f32 = 0.35;

const TOTALS_GAP: Pt = mm(5.0);
const TOTALS_WIDTH: Pt = mm(60.0);
const TOTALS_HEIGHT_TAXED: Pt = mm(25.0);
const TOTALS_HEIGHT_EXEMPT: Pt = mm(15.0);
const TOTALS_AFTER: Pt = mm(3.0);
const WORDS_LINE: Pt = 10.0;
const WORDS_HEIGHT: Pt = 2.0 * WORDS_LINE + mm(3.0);
const PAYMENT_HEIGHT: Pt = mm(8.0);
const CONDITIONS_TITLE: Pt = 12.0;
const CONDITION_LINE: Pt = 10.0;
const SIGNATURE_BOX_WIDTH: Pt = mm(55.0);
const SIGNATURE_BOX_HEIGHT: Pt = mm(18.0);
const SIGNATURE_LABEL: Pt = 11.0;
const SIGNATURE_HEIGHT: Pt = SIGNATURE_LABEL + SIGNATURE_BOX_HEIGHT + mm(1.0);
const NOTE_HEIGHT: Pt = mm(5.0);

/// Outcome of a composition, for callers that archive or index documents.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedDocument {
    pub pages: u32,
    /// Table rows placed on each page, in page order.
    pub rows_per_page: Vec<usize>,
    /// Present for kinds that show prices.
    pub totals: Option<Totals>,
    /// Legal phrase for kinds that state their total in letters.
    pub amount_in_words: Option<String>,
}

/// Sections drawn after the table, in order. Their summed height is kept free
/// under the table on every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Totals,
    AmountInWords,
    Payment,
    Conditions,
    Signatures,
    ClosingNote,
}

impl Section {
    fn for_request(request: &DocumentRequest) -> Vec<Section> {
        let kind = request.kind;
        let mut sections = Vec::with_capacity(6);
        if kind.shows_prices() {
            sections.push(Section::Totals);
        }
        if kind.words_lead().is_some() {
            sections.push(Section::AmountInWords);
        }
        if kind.shows_payment() {
            sections.push(Section::Payment);
        }
        if kind.shows_conditions() && !request.conditions.is_empty() {
            sections.push(Section::Conditions);
        }
        sections.push(Section::Signatures);
        if kind.closing_note().is_some() {
            sections.push(Section::ClosingNote);
        }
        sections
    }

    fn height(self, request: &DocumentRequest) -> Pt {
        match self {
            Section::Totals => TOTALS_GAP + totals_box_height(&request.tax) + TOTALS_AFTER,
            Section::AmountInWords => WORDS_HEIGHT,
            Section::Payment => PAYMENT_HEIGHT,
            Section::Conditions => {
                CONDITIONS_TITLE + CONDITION_LINE * request.conditions.len() as Pt + mm(3.0)
            }
            Section::Signatures => SIGNATURE_HEIGHT,
            Section::ClosingNote => NOTE_HEIGHT,
        }
    }
}

fn totals_box_height(tax: &TaxPolicy) -> Pt {
    if tax.is_applicable() {
        TOTALS_HEIGHT_TAXED
    } else {
        TOTALS_HEIGHT_EXEMPT
    }
}

/// Font and color for a run of text.
pub(crate) struct Pen {
    pub(crate) font: FontSpec,
    pub(crate) color: Color,
}

impl Pen {
    pub(crate) fn write<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        text: impl Into<String>,
        x: Pt,
        y: Pt,
        align: TextAlign,
    ) -> Result<(), CanvasError> {
        canvas.place_text(&TextSpec {
            text: text.into(),
            x,
            y,
            font: self.font.clone(),
            color: self.color,
            align,
        })
    }
}

/// Summary values the closing sections print.
struct Summary<'a> {
    totals: Option<&'a Totals>,
    amount_in_words: Option<&'a str>,
}

/// Lays documents out onto a [`Canvas`] with one theme and one issuing company.
#[derive(Debug, Clone)]
pub struct DocumentComposer {
    theme: PageTheme,
    company: CompanyProfile,
    wording: CurrencyWording,
}

impl DocumentComposer {
    pub fn new(theme: PageTheme, company: CompanyProfile) -> Self {
        Self {
            theme,
            company,
            wording: CurrencyWording::default(),
        }
    }

    pub fn with_wording(mut self, wording: CurrencyWording) -> Self {
        self.wording = wording;
        self
    }

    pub fn theme(&self) -> &PageTheme {
        &self.theme
    }

    pub fn company(&self) -> &CompanyProfile {
        &self.company
    }

    /// Height kept free under the table for the closing sections of `request`.
    pub fn trailing_height(&self, request: &DocumentRequest) -> Pt {
        Section::for_request(request)
            .into_iter()
            .map(|s| s.height(request))
            .sum()
    }

    /// Draw `request` onto `canvas`, starting on the canvas's open page.
    ///
    /// One `start_new_page` is issued per table continuation; every page gets
    /// the header and footer chrome.
    pub fn compose<C: Canvas + ?Sized>(
        &self,
        request: &DocumentRequest,
        canvas: &mut C,
    ) -> RenderResult<ComposedDocument> {
        let kind = request.kind;
        let page = self.theme.page;
        let columns = kind.columns();
        let table = self.theme.table_geometry(&columns)?;

        let totals = kind
            .shows_prices()
            .then(|| compute_totals(&request.items, &request.tax));
        let amount_in_words = match (kind.words_lead(), totals.as_ref()) {
            (Some(_), Some(t)) => Some(legal_phrase(
                t.grand_total,
                &self.wording,
                request.tax.is_applicable(),
            )),
            _ => None,
        };

        let mut cursor = PageFlowCursor::new(&page);
        self.draw_chrome(canvas)?;
        let heading_height = self.draw_heading(canvas, request, cursor.y())?;
        cursor.consume(heading_height)?;

        let trailing = self.trailing_height(request);
        let blocks = paginate(&request.items, &table, &page, &mut cursor, trailing)?;

        for block in &blocks {
            if !block.is_first_page {
                canvas.start_new_page()?;
                self.draw_chrome(canvas)?;
            }
            self.draw_block(canvas, block, &table, &columns)?;
        }

        let summary = Summary {
            totals: totals.as_ref(),
            amount_in_words: amount_in_words.as_deref(),
        };
        // The reservation made by `paginate` holds these, up to float tolerance.
        for section in Section::for_request(request) {
            self.draw_section(canvas, section, request, &summary, cursor.y())?;
            let height = section.height(request).min(cursor.remaining_height());
            cursor.consume(height)?;
        }

        tracing::info!(
            kind = ?kind,
            number = %request.number,
            pages = cursor.page_number(),
            rows = request.items.len(),
            "document composed"
        );

        Ok(ComposedDocument {
            pages: cursor.page_number(),
            rows_per_page: blocks.iter().map(|b| b.rows.len()).collect(),
            totals,
            amount_in_words,
        })
    }

    /// Blank letterhead: the page chrome alone, on the canvas's open page.
    pub fn compose_letterhead<C: Canvas + ?Sized>(&self, canvas: &mut C) -> RenderResult<()> {
        self.draw_chrome(canvas)?;
        tracing::info!(company = %self.company.name, "letterhead composed");
        Ok(())
    }

    pub(crate) fn pen(&self, style: FontStyle, size: Pt, color: Color) -> Pen {
        Pen {
            font: self.theme.font(style, size),
            color,
        }
    }

    /// Header band, footer band and watermark; repeated on every page.
    pub(crate) fn draw_chrome<C: Canvas + ?Sized>(&self, canvas: &mut C) -> Result<(), CanvasError> {
        let page = &self.theme.page;
        let palette = &self.theme.palette;
        let width = page.page_width();

        if let Some(watermark) = &self.theme.assets.watermark {
            let (w, h) = (mm(180.0), mm(130.0));
            canvas.place_image(&ImageSpec {
                asset: watermark.clone(),
                x: (width - w) / 2.0,
                y: (page.page_height() - h) / 2.0 - mm(15.0),
                width: w,
                height: h,
                fallback: ImageFallback::Skip,
            })?;
        }

        // Header band.
        let header_top = page.page_height() - page.top_margin();
        let header_bottom = page.content_top();
        if let Some(logo) = &self.theme.assets.header_logo {
            canvas.place_image(&ImageSpec {
                asset: logo.clone(),
                x: mm(5.0),
                y: header_bottom + mm(5.0),
                width: mm(35.0),
                height: mm(35.0),
                fallback: ImageFallback::Skip,
            })?;
        }

        let text_x = mm(45.0);
        let name_y = header_top - mm(12.0);
        self.pen(FontStyle::Bold, 22.0, palette.brown_dark).write(
            canvas,
            &self.company.name,
            text_x,
            name_y,
            TextAlign::Left,
        )?;

        let legal_form = self.pen(FontStyle::Bold, 10.0, palette.gold_dark);
        legal_form.write(
            canvas,
            &self.company.legal_form,
            text_x,
            name_y - 15.0,
            TextAlign::Left,
        )?;
        let legal_form_width = canvas.measure_text_width(&self.company.legal_form, &legal_form.font);
        self.pen(FontStyle::Regular, 8.0, palette.brown_medium).write(
            canvas,
            format!("•  {}", self.company.activity),
            text_x + legal_form_width + 5.0,
            name_y - 15.0,
            TextAlign::Left,
        )?;

        let contact = self.pen(FontStyle::Regular, 8.5, palette.gray_dark);
        if let Some(phones) = self.company.phones_line() {
            contact.write(canvas, phones, text_x, name_y - 30.0, TextAlign::Left)?;
        }
        contact.write(
            canvas,
            format!("Email : {}", self.company.email),
            text_x,
            name_y - 41.0,
            TextAlign::Left,
        )?;

        let address = self.pen(FontStyle::Regular, 9.0, palette.gray_dark);
        let right_x = width - self.theme.text_margin;
        address.write(canvas, &self.company.address, right_x, name_y - 30.0, TextAlign::Right)?;
        address.write(canvas, &self.company.city, right_x, name_y - 41.0, TextAlign::Right)?;

        self.draw_bar(canvas, header_bottom + mm(1.0))?;

        // Footer band.
        let footer_top = page.content_bottom() - mm(6.0);
        self.draw_bar(canvas, footer_top)?;

        let center = width / 2.0;
        let mut y = footer_top - mm(5.0);
        self.pen(FontStyle::Regular, 7.5, palette.gray_dark).write(
            canvas,
            self.company.address_line(),
            center,
            y,
            TextAlign::Center,
        )?;
        y -= 8.0;
        self.pen(FontStyle::Bold, 7.0, palette.brown_dark).write(
            canvas,
            self.company.legal_identifiers_line(),
            center,
            y,
            TextAlign::Center,
        )?;
        y -= 8.0;
        let mut contact_line = format!("Email : {}", self.company.email);
        if !self.company.phones.is_empty() {
            contact_line.push_str(&format!("  |  Tél : {}", self.company.phones.join(" / ")));
        }
        self.pen(FontStyle::Regular, 7.0, palette.gray_dark).write(
            canvas,
            contact_line,
            center,
            y,
            TextAlign::Center,
        )?;
        if let Some(website) = &self.company.website {
            y -= 8.0;
            self.pen(FontStyle::Bold, 7.0, palette.gold_dark).write(
                canvas,
                website,
                center,
                y,
                TextAlign::Center,
            )?;
        }

        Ok(())
    }

    /// Full-width separator bar, textured when the theme has a texture and
    /// shaded from dark to light gold otherwise.
    fn draw_bar<C: Canvas + ?Sized>(&self, canvas: &mut C, y: Pt) -> Result<(), CanvasError> {
        let width = self.theme.page.page_width();
        let palette = &self.theme.palette;
        if let Some(texture) = &self.theme.assets.bar_texture {
            return canvas.place_image(&ImageSpec {
                asset: texture.clone(),
                x: 0.0,
                y,
                width,
                height: BAR_HEIGHT,
                fallback: ImageFallback::Fill(palette.gold),
            });
        }

        let step = width / BAR_STEPS as Pt;
        for i in 0..BAR_STEPS {
            let shade = palette
                .gold_dark
                .mix(palette.gold_light, i as f32 / BAR_STEPS as f32);
            // Strips overlap slightly so no seam shows between them.
            canvas.place_rect(&RectSpec::filled(step * i as Pt, y, step + 0.5, BAR_HEIGHT, shade))?;
        }
        Ok(())
    }

    /// Title, date, reference fields and client box at the top of page 1.
    /// Returns the height they take.
    fn draw_heading<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        request: &DocumentRequest,
        top: Pt,
    ) -> RenderResult<Pt> {
        let palette = &self.theme.palette;
        let left_x = self.theme.text_margin;
        let heading = request.heading();

        let available = self.theme.page.page_width() - 2.0 * self.theme.text_margin;
        let mut size = TITLE_FONT_SIZE;
        while size > TITLE_MIN_FONT_SIZE
            && canvas.measure_text_width(&heading, &self.theme.font(FontStyle::Bold, size)) > available
        {
            size -= 0.5;
        }

        let title_y = top - TITLE_FONT_SIZE;
        self.pen(FontStyle::Bold, size, palette.brown_dark).write(
            canvas,
            heading,
            left_x,
            title_y,
            TextAlign::Left,
        )?;

        let mut y = title_y - HEADING_LINE;
        self.pen(FontStyle::Bold, 10.0, palette.brown_dark).write(
            canvas,
            format!("Date :  {}", request.formatted_date()),
            left_x,
            y,
            TextAlign::Left,
        )?;

        let field = self.pen(FontStyle::Regular, 9.0, palette.gray_dark);
        for (label, value) in request.reference_fields() {
            y -= HEADING_LINE;
            field.write(canvas, format!("{label} :  {value}"), left_x, y, TextAlign::Left)?;
        }
        let left_height = top - y + 4.0;

        self.draw_client_box(canvas, request, top)?;

        Ok(left_height.max(CLIENT_BOX_HEIGHT) + HEADING_GAP)
    }

    fn draw_client_box<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        request: &DocumentRequest,
        top: Pt,
    ) -> Result<(), CanvasError> {
        let palette = &self.theme.palette;
        let client = &request.client;
        let box_x = self.theme.page.page_width() - self.theme.table_margin - CLIENT_BOX_WIDTH;

        canvas.place_rect(&RectSpec::outlined(
            box_x,
            top - CLIENT_BOX_HEIGHT,
            CLIENT_BOX_WIDTH,
            CLIENT_BOX_HEIGHT,
            Stroke::solid(palette.gold, 0.8),
        ))?;

        let text_x = box_x + mm(3.0);
        self.pen(FontStyle::Bold, 8.5, palette.brown_dark).write(
            canvas,
            "Client :",
            text_x,
            top - mm(5.0),
            TextAlign::Left,
        )?;

        let mut y = top - mm(12.0);
        self.pen(FontStyle::Bold, 8.5, Color::BLACK).write(
            canvas,
            &client.name,
            text_x,
            y,
            TextAlign::Left,
        )?;
        let detail = self.pen(FontStyle::Regular, 8.0, palette.gray_dark);
        y -= 11.0;
        detail.write(canvas, &client.address, text_x, y, TextAlign::Left)?;
        y -= 10.0;
        detail.write(canvas, &client.city, text_x, y, TextAlign::Left)?;

        if let Some(ice) = &client.ice {
            y -= 10.0;
            self.pen(FontStyle::Bold, 7.5, palette.brown_dark).write(
                canvas,
                format!("ICE : {ice}"),
                text_x,
                y,
                TextAlign::Left,
            )?;
        }
        Ok(())
    }

    fn draw_block<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        block: &PageBlock<'_, LineItem>,
        table: &TableGeometry,
        columns: &[Column],
    ) -> Result<(), CanvasError> {
        let palette = &self.theme.palette;
        let x0 = self.theme.table_margin;
        let table_width = table.table_width();
        let header_height = table.header_row_height();
        let row_height = table.data_row_height();
        let offsets = table.column_offsets();
        let widths = table.column_widths();

        // Header row.
        let header_y = block.top - header_height;
        match &self.theme.assets.table_header_texture {
            Some(texture) => canvas.place_image(&ImageSpec {
                asset: texture.clone(),
                x: x0,
                y: header_y,
                width: table_width,
                height: header_height,
                fallback: ImageFallback::Fill(palette.brown_dark),
            })?,
            None => canvas.place_rect(&RectSpec::filled(
                x0,
                header_y,
                table_width,
                header_height,
                palette.brown_dark,
            ))?,
        }
        canvas.place_rect(&RectSpec::outlined(
            x0,
            header_y,
            table_width,
            header_height,
            Stroke::solid(palette.gold_dark, 1.5),
        ))?;

        let header_pen = self.pen(
            FontStyle::Bold,
            TABLE_HEADER_FONT_SIZE,
            palette.table_header_text,
        );
        let header_baseline =
            block.top - header_height / 2.0 - TABLE_HEADER_FONT_SIZE * BASELINE_DROP;
        for ((column, offset), width) in columns.iter().zip(&offsets).zip(widths) {
            header_pen.write(
                canvas,
                column.title,
                x0 + offset + width / 2.0,
                header_baseline,
                TextAlign::Center,
            )?;
        }

        // Data rows.
        let row_pen = self.pen(FontStyle::Regular, TABLE_ROW_FONT_SIZE, palette.brown_dark);
        for (i, (number, stripe, item)) in block.numbered_rows().enumerate() {
            let row_top = header_y - row_height * i as Pt;
            let fill = match stripe {
                RowStripe::Odd => palette.stripe_odd,
                RowStripe::Even => palette.stripe_even,
            };
            canvas.place_rect(&RectSpec {
                x: x0,
                y: row_top - row_height,
                width: table_width,
                height: row_height,
                fill: Some(fill),
                stroke: Some(Stroke::solid(palette.gold, 0.4)),
            })?;

            let baseline = row_top - row_height / 2.0 - TABLE_ROW_FONT_SIZE * BASELINE_DROP;
            for ((column, offset), width) in columns.iter().zip(&offsets).zip(widths) {
                let mut text = column.content.text(number, item);
                if text.is_empty() {
                    continue;
                }
                if column.content == CellContent::Description {
                    text = fit_text(&*canvas, &text, &row_pen.font, width - 2.0 * CELL_PADDING);
                }
                let x = match column.align {
                    TextAlign::Left => x0 + offset + CELL_PADDING,
                    TextAlign::Center => x0 + offset + width / 2.0,
                    TextAlign::Right => x0 + offset + width - CELL_PADDING,
                };
                row_pen.write(canvas, text, x, baseline, column.align)?;
            }
        }

        // Column rules.
        let block_height = block.height(table);
        let block_bottom = block.top - block_height;
        for offset in offsets.iter().skip(1) {
            canvas.place_rect(&RectSpec::filled(
                x0 + offset - 0.2,
                block_bottom,
                0.4,
                block_height,
                palette.gold,
            ))?;
        }

        if block.continued_marker {
            self.pen(FontStyle::Italic, 7.0, palette.gray).write(
                canvas,
                CONTINUED_MARKER,
                x0 + table_width,
                block_bottom - mm(4.0),
                TextAlign::Right,
            )?;
        }

        Ok(())
    }

    fn draw_section<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        section: Section,
        request: &DocumentRequest,
        summary: &Summary<'_>,
        top: Pt,
    ) -> Result<(), CanvasError> {
        let palette = &self.theme.palette;
        let margin = self.theme.table_margin;

        match section {
            Section::Totals => {
                if let Some(totals) = summary.totals {
                    self.draw_totals_box(canvas, totals, &request.tax, top - TOTALS_GAP)?;
                }
            }
            Section::AmountInWords => {
                if let (Some(lead), Some(words)) = (request.kind.words_lead(), summary.amount_in_words) {
                    let pen = self.pen(FontStyle::Bold, 7.5, palette.brown_dark);
                    pen.write(canvas, lead, margin, top - WORDS_LINE, TextAlign::Left)?;
                    pen.write(
                        canvas,
                        format!("*** {words} ***"),
                        margin,
                        top - 2.0 * WORDS_LINE,
                        TextAlign::Left,
                    )?;
                }
            }
            Section::Payment => {
                let x = self.theme.text_margin;
                let y = top - 9.0;
                self.pen(FontStyle::Bold, 9.0, palette.brown_dark).write(
                    canvas,
                    "Mode de paiement :",
                    x,
                    y,
                    TextAlign::Left,
                )?;
                let mode = request.payment_mode.as_deref().unwrap_or(DEFAULT_PAYMENT_MODE);
                self.pen(FontStyle::Regular, 8.5, palette.gray_dark).write(
                    canvas,
                    mode,
                    x + mm(40.0),
                    y,
                    TextAlign::Left,
                )?;
            }
            Section::Conditions => {
                let x = self.theme.text_margin;
                self.pen(FontStyle::Bold, 8.5, palette.brown_dark).write(
                    canvas,
                    "Conditions :",
                    x,
                    top - 9.0,
                    TextAlign::Left,
                )?;
                let line = self.pen(FontStyle::Regular, 8.0, palette.gray_dark);
                for (i, condition) in request.conditions.iter().enumerate() {
                    line.write(
                        canvas,
                        format!("• {condition}"),
                        x,
                        top - 9.0 - CONDITIONS_TITLE - CONDITION_LINE * i as Pt,
                        TextAlign::Left,
                    )?;
                }
            }
            Section::Signatures => {
                let label = self.pen(FontStyle::Bold, 8.0, palette.brown_dark);
                let client_x = self.theme.page.page_width() - margin - SIGNATURE_BOX_WIDTH;
                let box_y = top - SIGNATURE_LABEL - SIGNATURE_BOX_HEIGHT;
                for (x, text) in [
                    (margin, "Cachet et signature du vendeur"),
                    (client_x, "Cachet et signature du client"),
                ] {
                    label.write(canvas, text, x, top - 8.0, TextAlign::Left)?;
                    canvas.place_rect(&RectSpec::outlined(
                        x,
                        box_y,
                        SIGNATURE_BOX_WIDTH,
                        SIGNATURE_BOX_HEIGHT,
                        Stroke::dashed(palette.gold, 0.5),
                    ))?;
                }
            }
            Section::ClosingNote => {
                if let Some(note) = request.kind.closing_note() {
                    self.pen(FontStyle::Italic, 7.0, palette.gray).write(
                        canvas,
                        note,
                        margin,
                        top - 9.0,
                        TextAlign::Left,
                    )?;
                }
            }
        }
        Ok(())
    }

    fn draw_totals_box<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        totals: &Totals,
        tax: &TaxPolicy,
        top: Pt,
    ) -> Result<(), CanvasError> {
        let palette = &self.theme.palette;
        let symbol = &self.theme.currency_symbol;
        let box_height = totals_box_height(tax);
        let box_x = self.theme.page.page_width() - self.theme.table_margin - TOTALS_WIDTH;

        canvas.place_rect(&RectSpec {
            x: box_x,
            y: top - box_height,
            width: TOTALS_WIDTH,
            height: box_height,
            fill: Some(palette.stripe_even),
            stroke: Some(Stroke::solid(palette.gold, 0.5)),
        })?;

        let label_x = box_x + mm(3.0);
        let value_x = box_x + TOTALS_WIDTH - mm(3.0);
        let mut y = top - mm(4.0);

        let line = self.pen(FontStyle::Regular, 8.0, palette.gray_dark);
        line.write(canvas, "Total HT", label_x, y, TextAlign::Left)?;
        line.write(
            canvas,
            format!("{} {symbol}", format_amount(totals.subtotal)),
            value_x,
            y,
            TextAlign::Right,
        )?;

        if tax.is_applicable() {
            y -= 9.0;
            line.write(
                canvas,
                format!("TVA ({})", tax.percent_label()),
                label_x,
                y,
                TextAlign::Left,
            )?;
            line.write(
                canvas,
                format!("{} {symbol}", format_amount(totals.tax_amount)),
                value_x,
                y,
                TextAlign::Right,
            )?;
            y -= 4.0;
            canvas.place_rect(&RectSpec::filled(label_x, y, value_x - label_x, 0.5, palette.gold))?;
            y -= 9.0;
            let grand = self.pen(FontStyle::Bold, 10.0, palette.brown_dark);
            grand.write(canvas, "Total TTC", label_x, y, TextAlign::Left)?;
            grand.write(
                canvas,
                format!("{} {symbol}", format_amount(totals.grand_total)),
                value_x,
                y,
                TextAlign::Right,
            )?;
        } else {
            y -= 4.0;
            canvas.place_rect(&RectSpec::filled(label_x, y, value_x - label_x, 0.5, palette.gold))?;
            y -= 9.0;
            self.pen(FontStyle::Italic, 7.5, palette.gray).write(
                canvas,
                "TVA non applicable",
                label_x,
                y,
                TextAlign::Left,
            )?;
        }
        Ok(())
    }
}

/// `text` shortened with a trailing ellipsis until it fits `max_width`.
pub fn fit_text<C: Canvas + ?Sized>(canvas: &C, text: &str, font: &FontSpec, max_width: Pt) -> String {
    if canvas.measure_text_width(text, font) <= max_width {
        return text.to_string();
    }

    let mut chars: Vec<char> = text.chars().collect();
    while chars.pop().is_some() {
        let kept: String = chars.iter().collect();
        let candidate = format!("{}{ELLIPSIS}", kept.trim_end());
        if canvas.measure_text_width(&candidate, font) <= max_width {
            return candidate;
        }
    }
    ELLIPSIS.to_string()
}
