//! Completion report (procès-verbal de réception / fin de travaux).
//!
//! A one-page form: project fields, the reception statement, the reserves and
//! two signature boxes, drawn inside the usual page chrome.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use folio_core::{LayoutError, Pt, mm};
use folio_layout::PageFlowCursor;

use crate::canvas::{Canvas, Color, RectSpec, Stroke, TextAlign};
use crate::composer::{ComposedDocument, DocumentComposer};
use crate::document::BLANK_FIELD;
use crate::error::{RenderError, RenderResult};
use crate::theme::FontStyle;

pub const REPORT_TITLE: &str = "PV DE RÉCEPTION - FIN DE TRAVAUX";

const DATE_BLANK: &str = "___/___/______";
const NAME_BLANK: &str = "________________________________";
const RESERVE_BLANK: &str =
    "___________________________________________________________________________";
const BLANK_RESERVE_LINES: usize = 3;
const DEFAULT_WORKS: &str = "Menuiserie bois";

const TITLE_SIZE: Pt = 11.5;
const FIELD_LINE: Pt = 16.0;
const FIELD_VALUE_OFFSET: Pt = mm(44.0);
const SECOND_DATE_OFFSET: Pt = mm(80.0);
const SECOND_DATE_VALUE_OFFSET: Pt = mm(118.0);
const BODY_LINE: Pt = 13.0;
const SIGNATURE_GAP: Pt = 10.0;
const SIGNATURE_SUBLABEL: Pt = 10.0;
const SIGNATURE_BOX_GAP: Pt = 5.0;
const SIGNATURE_BOX_WIDTH: Pt = mm(60.0);
const SIGNATURE_BOX_HEIGHT: Pt = mm(22.0);

/// How the works were received.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceptionOutcome {
    /// Blank form: both boxes left to tick by hand.
    #[default]
    Pending,
    WithoutReserves,
    WithReserves,
}

/// Data printed on a completion report. Absent values print as blanks to fill
/// in by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionReport {
    pub number: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Maître d'ouvrage.
    pub owner: String,
    pub site_address: String,
    #[serde(default = "default_works")]
    pub works: String,
    /// Quote or contract the works were carried out under.
    #[serde(default)]
    pub contract_reference: Option<String>,
    #[serde(default)]
    pub started_on: Option<NaiveDate>,
    #[serde(default)]
    pub finished_on: Option<NaiveDate>,
    #[serde(default)]
    pub company_representative: Option<String>,
    #[serde(default)]
    pub owner_representative: Option<String>,
    #[serde(default)]
    pub outcome: ReceptionOutcome,
    #[serde(default)]
    pub reserves: Vec<String>,
    /// Days granted to lift the reserves.
    #[serde(default)]
    pub lifting_delay_days: Option<u32>,
}

fn default_works() -> String {
    DEFAULT_WORKS.to_string()
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| DATE_BLANK.to_string())
}

impl CompletionReport {
    pub fn new(
        number: impl Into<String>,
        owner: impl Into<String>,
        site_address: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            date: None,
            owner: owner.into(),
            site_address: site_address.into(),
            works: default_works(),
            contract_reference: None,
            started_on: None,
            finished_on: None,
            company_representative: None,
            owner_representative: None,
            outcome: ReceptionOutcome::Pending,
            reserves: Vec::new(),
            lifting_delay_days: None,
        }
    }

    pub fn from_json(json: &str) -> RenderResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| RenderError::config(format!("completion report: {e}")))
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_works(mut self, works: impl Into<String>) -> Self {
        self.works = works.into();
        self
    }

    pub fn with_contract_reference(mut self, reference: impl Into<String>) -> Self {
        self.contract_reference = Some(reference.into());
        self
    }

    pub fn with_period(mut self, started_on: NaiveDate, finished_on: NaiveDate) -> Self {
        self.started_on = Some(started_on);
        self.finished_on = Some(finished_on);
        self
    }

    pub fn with_representatives(
        mut self,
        company: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        self.company_representative = Some(company.into());
        self.owner_representative = Some(owner.into());
        self
    }

    pub fn without_reserves(mut self) -> Self {
        self.outcome = ReceptionOutcome::WithoutReserves;
        self.reserves.clear();
        self.lifting_delay_days = None;
        self
    }

    pub fn with_reserves<I, S>(mut self, reserves: I, lifting_delay_days: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outcome = ReceptionOutcome::WithReserves;
        self.reserves = reserves.into_iter().map(Into::into).collect();
        self.lifting_delay_days = Some(lifting_delay_days);
        self
    }

    pub fn heading(&self) -> String {
        if self.number.is_empty() {
            REPORT_TITLE.to_string()
        } else {
            format!("{REPORT_TITLE}  N° : {}", self.number)
        }
    }

    /// `(label, value)` rows of the project block, the work period excepted.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let or_blank = |value: &str| {
            if value.trim().is_empty() {
                BLANK_FIELD.to_string()
            } else {
                value.to_string()
            }
        };
        vec![
            ("Maître d'ouvrage :", or_blank(&self.owner)),
            ("Adresse du chantier :", or_blank(&self.site_address)),
            ("Nature des travaux :", or_blank(&self.works)),
            (
                "Réf. Devis / Marché :",
                or_blank(self.contract_reference.as_deref().unwrap_or_default()),
            ),
        ]
    }

    /// Statement lines between the project block and the signatures.
    pub fn body_lines(&self, company_name: &str) -> Vec<String> {
        let box_for = |outcome: ReceptionOutcome| {
            if self.outcome == outcome { "■" } else { "□" }
        };
        let company_rep = self.company_representative.as_deref().unwrap_or(NAME_BLANK);
        let owner_rep = self.owner_representative.as_deref().unwrap_or(NAME_BLANK);

        let mut lines = vec![
            "En date de ce jour, nous soussignés :".to_string(),
            String::new(),
            format!("• L'entreprise {company_name}, représentée par {company_rep}"),
            format!("• Le maître d'ouvrage, représenté par {owner_rep}"),
            String::new(),
            "Avons procédé à la réception des travaux décrits ci-dessus.".to_string(),
            String::new(),
            "Les travaux ont été exécutés conformément au devis / marché référencé ci-dessus."
                .to_string(),
            String::new(),
            format!(
                "{}  Réception SANS réserves",
                box_for(ReceptionOutcome::WithoutReserves)
            ),
            format!(
                "{}  Réception AVEC réserves (voir liste ci-dessous)",
                box_for(ReceptionOutcome::WithReserves)
            ),
            String::new(),
            "Réserves éventuelles :".to_string(),
        ];

        match self.outcome {
            ReceptionOutcome::WithoutReserves => lines.push("Néant".to_string()),
            ReceptionOutcome::WithReserves if !self.reserves.is_empty() => {
                lines.extend(self.reserves.iter().map(|r| format!("- {r}")));
            }
            _ => lines.extend((0..BLANK_RESERVE_LINES).map(|_| RESERVE_BLANK.to_string())),
        }

        lines.push(String::new());
        let delay = self
            .lifting_delay_days
            .map(|d| d.to_string())
            .unwrap_or_else(|| "_______".to_string());
        lines.push(format!("Délai de levée des réserves : {delay} jours"));
        lines.push(String::new());
        lines.push("Le présent procès-verbal est établi en deux exemplaires originaux.".to_string());
        lines
    }
}

/// Height from the top of the heading to the bottom of the signature boxes.
fn report_height(field_rows: usize, body_lines: usize) -> Pt {
    TITLE_SIZE
        + FIELD_LINE * (2 + field_rows) as Pt
        + 2.0 * FIELD_LINE
        + BODY_LINE * body_lines as Pt
        + SIGNATURE_GAP
        + SIGNATURE_SUBLABEL
        + SIGNATURE_BOX_GAP
        + SIGNATURE_BOX_HEIGHT
}

impl DocumentComposer {
    /// Draw `report` on the canvas's open page.
    ///
    /// # Errors
    ///
    /// [`LayoutError::InvalidGeometry`] when the form, with all its reserves,
    /// does not fit the content region of one page.
    pub fn compose_completion_report<C: Canvas + ?Sized>(
        &self,
        report: &CompletionReport,
        canvas: &mut C,
    ) -> RenderResult<ComposedDocument> {
        let theme = self.theme();
        let palette = &theme.palette;
        let page = theme.page;

        let fields = report.fields();
        let lines = report.body_lines(&self.company().name);
        // One extra row for the start and end dates.
        let height = report_height(fields.len() + 1, lines.len());

        let mut cursor = PageFlowCursor::new(&page);
        if !cursor.fits(height) {
            return Err(LayoutError::geometry(format!(
                "completion report needs {height}pt but the page has {}pt",
                cursor.remaining_height()
            ))
            .into());
        }

        self.draw_chrome(canvas)?;

        let left_x = theme.text_margin;
        let top = cursor.y();
        let title_y = top - TITLE_SIZE;
        self.pen(FontStyle::Bold, TITLE_SIZE, palette.brown_dark).write(
            canvas,
            report.heading(),
            left_x,
            title_y,
            TextAlign::Left,
        )?;
        let date_y = title_y - FIELD_LINE;
        self.pen(FontStyle::Bold, 10.0, palette.brown_dark).write(
            canvas,
            format!("Date :  {}", format_date(report.date)),
            left_x,
            date_y,
            TextAlign::Left,
        )?;

        let label = self.pen(FontStyle::Bold, 9.0, palette.brown_dark);
        let value = self.pen(FontStyle::Regular, 9.0, Color::BLACK);
        let mut y = date_y - 2.0 * FIELD_LINE;
        for (name, text) in &fields {
            label.write(canvas, *name, left_x, y, TextAlign::Left)?;
            value.write(canvas, text.as_str(), left_x + FIELD_VALUE_OFFSET, y, TextAlign::Left)?;
            y -= FIELD_LINE;
        }
        label.write(canvas, "Date début travaux :", left_x, y, TextAlign::Left)?;
        value.write(
            canvas,
            format_date(report.started_on),
            left_x + FIELD_VALUE_OFFSET,
            y,
            TextAlign::Left,
        )?;
        label.write(
            canvas,
            "Date fin travaux :",
            left_x + SECOND_DATE_OFFSET,
            y,
            TextAlign::Left,
        )?;
        value.write(
            canvas,
            format_date(report.finished_on),
            left_x + SECOND_DATE_VALUE_OFFSET,
            y,
            TextAlign::Left,
        )?;

        y -= 2.0 * FIELD_LINE;
        let body = self.pen(FontStyle::Regular, 9.5, Color::BLACK);
        for line in &lines {
            if !line.is_empty() {
                body.write(canvas, line.as_str(), left_x, y, TextAlign::Left)?;
            }
            y -= BODY_LINE;
        }

        let margin = theme.table_margin;
        let right_x = page.page_width() - margin;
        let sig_y = y - SIGNATURE_GAP;
        let heading = self.pen(FontStyle::Bold, 8.0, palette.brown_dark);
        heading.write(canvas, "Pour l'entreprise", margin, sig_y, TextAlign::Left)?;
        heading.write(canvas, "Pour le maître d'ouvrage", right_x, sig_y, TextAlign::Right)?;

        let sub_y = sig_y - SIGNATURE_SUBLABEL;
        let sub = self.pen(FontStyle::Regular, 7.5, palette.gray_dark);
        sub.write(canvas, "Cachet, signature et date", margin, sub_y, TextAlign::Left)?;
        sub.write(canvas, "Cachet, signature et date", right_x, sub_y, TextAlign::Right)?;

        let box_y = sub_y - SIGNATURE_BOX_GAP - SIGNATURE_BOX_HEIGHT;
        for x in [margin, right_x - SIGNATURE_BOX_WIDTH] {
            canvas.place_rect(&RectSpec::outlined(
                x,
                box_y,
                SIGNATURE_BOX_WIDTH,
                SIGNATURE_BOX_HEIGHT,
                Stroke::dashed(palette.gold, 0.5),
            ))?;
        }

        cursor.consume(height)?;
        tracing::info!(
            number = %report.number,
            outcome = ?report.outcome,
            reserves = report.reserves.len(),
            "completion report composed"
        );

        Ok(ComposedDocument {
            pages: cursor.page_number(),
            rows_per_page: Vec::new(),
            totals: None,
            amount_in_words: None,
        })
    }
}
