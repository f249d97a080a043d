//! Document kinds and the request a document is composed from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use folio_core::{Pt, mm};
use folio_invoicing::{ItemList, LineItem, TaxPolicy, format_amount, format_quantity};

use crate::canvas::TextAlign;
use crate::error::{RenderError, RenderResult};

/// Placeholder printed for reference fields left blank.
pub const BLANK_FIELD: &str = "____________________";

/// Commercial document types. The kind decides the title, the table columns
/// and which sections follow the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Facture.
    Invoice,
    /// Devis.
    Quote,
    /// Bon de livraison.
    DeliveryNote,
    /// Attachement (measured work record).
    Attachment,
    /// Situation de travaux (progress billing).
    WorkStatement,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 5] = [
        DocumentKind::Invoice,
        DocumentKind::Quote,
        DocumentKind::DeliveryNote,
        DocumentKind::Attachment,
        DocumentKind::WorkStatement,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "FACTURE",
            DocumentKind::Quote => "DEVIS",
            DocumentKind::DeliveryNote => "BON DE LIVRAISON",
            DocumentKind::Attachment => "ATTACHEMENT",
            DocumentKind::WorkStatement => "SITUATION DE TRAVAUX",
        }
    }

    /// Whether the table carries prices and a totals box follows it.
    pub fn shows_prices(&self) -> bool {
        !matches!(self, DocumentKind::DeliveryNote)
    }

    /// Lead sentence printed above the amount in words, for kinds that state
    /// their total in letters.
    pub fn words_lead(&self) -> Option<&'static str> {
        match self {
            DocumentKind::Invoice => {
                Some("*****Arrêté la présente facture à la somme de : ******")
            }
            DocumentKind::Attachment => {
                Some("*****Arrêté le présent attachement à la somme de : ******")
            }
            DocumentKind::WorkStatement => {
                Some("*****Arrêté la présente situation à la somme de : ******")
            }
            DocumentKind::Quote | DocumentKind::DeliveryNote => None,
        }
    }

    pub fn shows_payment(&self) -> bool {
        matches!(self, DocumentKind::Invoice)
    }

    pub fn shows_conditions(&self) -> bool {
        matches!(self, DocumentKind::Quote)
    }

    /// Small print under the signatures.
    pub fn closing_note(&self) -> Option<&'static str> {
        match self {
            DocumentKind::Invoice => Some("Mention « Acquittée » + date si paiement reçu"),
            DocumentKind::Quote => Some("Mention manuscrite \"Bon pour accord\""),
            _ => None,
        }
    }

    /// Labels of the reference fields printed under the date on page 1.
    pub fn reference_labels(&self) -> &'static [&'static str] {
        match self {
            DocumentKind::Invoice => &["Réf. Bon de commande", "Réf. Bon de livraison"],
            DocumentKind::Quote => &["Validité", "Nature"],
            DocumentKind::DeliveryNote => &["Réf. Facture", "Réf. Devis"],
            DocumentKind::Attachment => &["Nature", "Marché N°"],
            DocumentKind::WorkStatement => &["Nature", "Situation N°", "Marché N°"],
        }
    }

    pub fn columns(&self) -> Vec<Column> {
        if self.shows_prices() {
            vec![
                Column::fixed("N°", mm(8.0), TextAlign::Center, CellContent::RowNumber),
                Column::fill("DÉSIGNATION", TextAlign::Left, CellContent::Description),
                Column::fixed("U", mm(10.0), TextAlign::Center, CellContent::Unit),
                Column::fixed("QTÉ", mm(12.0), TextAlign::Center, CellContent::Quantity),
                Column::fixed("P.U. HT", mm(19.0), TextAlign::Right, CellContent::UnitPrice),
                Column::fixed("TOTAL HT", mm(19.0), TextAlign::Right, CellContent::LineTotal),
            ]
        } else {
            vec![
                Column::fixed("N°", mm(12.0), TextAlign::Center, CellContent::RowNumber),
                Column::fill("DÉSIGNATION", TextAlign::Left, CellContent::Description),
                Column::fixed("QTÉ", mm(15.0), TextAlign::Center, CellContent::Quantity),
                Column::fixed("OBSERVATIONS", mm(53.0), TextAlign::Center, CellContent::Blank),
            ]
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnWidth {
    Fixed(Pt),
    /// Shares the width the fixed columns leave.
    Fill,
}

/// What a column shows for each line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellContent {
    RowNumber,
    Description,
    Unit,
    Quantity,
    UnitPrice,
    LineTotal,
    /// Left empty for handwriting.
    Blank,
}

impl CellContent {
    /// Cell text for `item` shown as row `row_number`.
    pub fn text(&self, row_number: usize, item: &LineItem) -> String {
        match self {
            CellContent::RowNumber => row_number.to_string(),
            CellContent::Description => item.description().to_string(),
            CellContent::Unit => item.unit().to_string(),
            CellContent::Quantity => format_quantity(item.quantity()),
            CellContent::UnitPrice => format_amount(item.unit_price()),
            CellContent::LineTotal => format_amount(item.line_total()),
            CellContent::Blank => String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub title: &'static str,
    pub width: ColumnWidth,
    pub align: TextAlign,
    pub content: CellContent,
}

impl Column {
    pub fn fixed(title: &'static str, width: Pt, align: TextAlign, content: CellContent) -> Self {
        Self {
            title,
            width: ColumnWidth::Fixed(width),
            align,
            content,
        }
    }

    pub fn fill(title: &'static str, align: TextAlign, content: CellContent) -> Self {
        Self {
            title,
            width: ColumnWidth::Fill,
            align,
            content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub ice: Option<String>,
}

impl ClientInfo {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            city: city.into(),
            ice: None,
        }
    }

    pub fn with_ice(mut self, ice: impl Into<String>) -> Self {
        self.ice = Some(ice.into());
        self
    }
}

/// Everything that varies from one document to the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRequest {
    pub kind: DocumentKind,
    pub number: String,
    pub date: NaiveDate,
    pub client: ClientInfo,
    #[serde(default)]
    pub items: ItemList,
    #[serde(default)]
    pub tax: TaxPolicy,
    /// Values of [`DocumentKind::reference_labels`], by position. Missing
    /// values print as a blank line to fill in by hand.
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub payment_mode: Option<String>,
    /// Quote conditions, one per line.
    #[serde(default)]
    pub conditions: Vec<String>,
}

impl DocumentRequest {
    pub fn new(
        kind: DocumentKind,
        number: impl Into<String>,
        date: NaiveDate,
        client: ClientInfo,
    ) -> Self {
        Self {
            kind,
            number: number.into(),
            date,
            client,
            items: ItemList::new(),
            tax: TaxPolicy::default(),
            references: Vec::new(),
            payment_mode: None,
            conditions: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> RenderResult<Self> {
        serde_json::from_str(json).map_err(|e| RenderError::config(format!("document request: {e}")))
    }

    pub fn with_items(mut self, items: ItemList) -> Self {
        self.items = items;
        self
    }

    pub fn with_tax(mut self, tax: TaxPolicy) -> Self {
        self.tax = tax;
        self
    }

    pub fn with_references<I, S>(mut self, references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.references = references.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_payment_mode(mut self, mode: impl Into<String>) -> Self {
        self.payment_mode = Some(mode.into());
        self
    }

    pub fn with_conditions<I, S>(mut self, conditions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conditions = conditions.into_iter().map(Into::into).collect();
        self
    }

    /// "F-2026/0001" -> "FACTURE  N° : F-2026/0001".
    pub fn heading(&self) -> String {
        if self.number.is_empty() {
            self.kind.title().to_string()
        } else {
            format!("{}  N° : {}", self.kind.title(), self.number)
        }
    }

    pub fn formatted_date(&self) -> String {
        self.date.format("%d/%m/%Y").to_string()
    }

    /// `(label, value)` for every reference field of the kind.
    pub fn reference_fields(&self) -> Vec<(&'static str, &str)> {
        self.kind
            .reference_labels()
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let value = self
                    .references
                    .get(i)
                    .map(String::as_str)
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or(BLANK_FIELD);
                (*label, value)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request(kind: DocumentKind) -> DocumentRequest {
        DocumentRequest::new(
            kind,
            "F-2026/0001",
            NaiveDate::from_ymd_opt(2026, 3, 7).unwrap(),
            ClientInfo::new("Riad Zitoun", "12 Derb Sidi Bouloukat", "Marrakech"),
        )
    }

    #[test]
    fn priced_kinds_use_six_columns() {
        for kind in DocumentKind::ALL {
            let titles: Vec<&str> = kind.columns().iter().map(|c| c.title).collect();
            if kind == DocumentKind::DeliveryNote {
                assert_eq!(titles, vec!["N°", "DÉSIGNATION", "QTÉ", "OBSERVATIONS"]);
            } else {
                assert_eq!(titles, vec!["N°", "DÉSIGNATION", "U", "QTÉ", "P.U. HT", "TOTAL HT"]);
            }
        }
    }

    #[test]
    fn only_billing_kinds_state_the_amount_in_words() {
        assert!(DocumentKind::Invoice.words_lead().unwrap().contains("facture"));
        assert!(DocumentKind::Attachment.words_lead().unwrap().contains("attachement"));
        assert!(DocumentKind::WorkStatement.words_lead().unwrap().contains("situation"));
        assert!(DocumentKind::Quote.words_lead().is_none());
        assert!(DocumentKind::DeliveryNote.words_lead().is_none());
    }

    #[test]
    fn cells_format_money_and_quantities() {
        let item = LineItem::new("Parquet chêne", "M²", dec!(35), dec!(450)).unwrap();
        assert_eq!(CellContent::RowNumber.text(11, &item), "11");
        assert_eq!(CellContent::Unit.text(1, &item), "M²");
        assert_eq!(CellContent::Quantity.text(1, &item), "35");
        assert_eq!(CellContent::UnitPrice.text(1, &item), "450.00");
        assert_eq!(CellContent::LineTotal.text(1, &item), "15,750.00");
        assert_eq!(CellContent::Blank.text(1, &item), "");
    }

    #[test]
    fn heading_and_date_follow_french_conventions() {
        let req = request(DocumentKind::Invoice);
        assert_eq!(req.heading(), "FACTURE  N° : F-2026/0001");
        assert_eq!(req.formatted_date(), "07/03/2026");
    }

    #[test]
    fn missing_references_print_blank_lines() {
        let req = request(DocumentKind::WorkStatement).with_references(["Menuiserie bois", ""]);
        assert_eq!(
            req.reference_fields(),
            vec![
                ("Nature", "Menuiserie bois"),
                ("Situation N°", BLANK_FIELD),
                ("Marché N°", BLANK_FIELD),
            ]
        );
    }

    #[test]
    fn requests_parse_from_json() {
        let req = DocumentRequest::from_json(
            r#"{
                "kind": "delivery_note",
                "number": "BL-2026/0004",
                "date": "2026-02-14",
                "client": {"name": "Atelier Kasbah", "address": "Route de Fès", "city": "Marrakech"},
                "items": [{"description": "Porte cèdre", "unit": "U", "quantity": "2", "unit_price": "0"}]
            }"#,
        )
        .unwrap();
        assert_eq!(req.kind, DocumentKind::DeliveryNote);
        assert_eq!(req.items.len(), 1);
        assert_eq!(req.tax, TaxPolicy::default());
        assert!(req.client.ice.is_none());

        let err = DocumentRequest::from_json(r#"{"kind":"receipt"}"#).unwrap_err();
        assert!(matches!(err, RenderError::Config(_)));
    }
}
