use chrono::NaiveDate;
use folio_core::{EPSILON, mm};
use folio_invoicing::{ItemList, LineItem, TaxPolicy};
use folio_render::{
    CONTINUED_MARKER, ClientInfo, CompanyProfile, CompletionReport, DocumentComposer, DocumentKind,
    DocumentRequest, PageTheme, REPORT_TITLE, RecordingCanvas, TextAlign,
};
use rust_decimal_macros::dec;
use serde_json::json;

fn company() -> CompanyProfile {
    let profile = json!({
        "name": "ATELIER ARGANE",
        "legal_form": "S.A.R.L A.U",
        "activity": "Menuiserie Artisanat - Décoration",
        "address": "Zone industrielle Sidi Ghanem, lot 42",
        "city": "MARRAKECH",
        "phones": ["0524 33 12 10", "0661 20 30 40"],
        "email": "contact@atelier-argane.ma",
        "website": "www.atelier-argane.ma",
        "rc": "98765",
        "if_number": "40112233",
        "ice": "001234567000089",
        "pat": "64100000"
    });
    CompanyProfile::from_json(&profile.to_string()).expect("valid company profile")
}

fn composer() -> DocumentComposer {
    folio_observability::init_with(folio_observability::LogFormat::Pretty);
    DocumentComposer::new(PageTheme::default(), company())
}

fn client() -> ClientInfo {
    ClientInfo::new("Riad Zitoun", "12 Derb Sidi Bouloukat", "Marrakech").with_ice("002211334000055")
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 6).expect("valid date")
}

/// Fifteen-row joinery invoice.
fn sample_items() -> ItemList {
    [
        ("Porte en bois massif sur mesure (chêne)", dec!(2), dec!(3500)),
        ("Fenêtre en bois avec vitrage double", dec!(4), dec!(2200)),
        ("Meuble TV en noyer - Design moderne", dec!(1), dec!(4800)),
        ("Étagère murale en cèdre (200x80cm)", dec!(3), dec!(1500)),
        ("Cuisine complète en bois massif", dec!(1), dec!(18000)),
        ("Plan de travail en noyer (300x65cm)", dec!(1), dec!(4500)),
        ("Placards muraux sur mesure", dec!(6), dec!(2800)),
        ("Table à manger en chêne (240x100cm)", dec!(1), dec!(7500)),
        ("Chaises assorties en bois", dec!(8), dec!(850)),
        ("Bibliothèque murale sur mesure", dec!(1), dec!(5200)),
        ("Parquet en bois massif (salon 35m²)", dec!(35), dec!(450)),
        ("Escalier en bois avec rampe sculptée", dec!(1), dec!(12000)),
        ("Dressing chambre principale", dec!(1), dec!(9500)),
        ("Finition et vernissage - Ensemble", dec!(1), dec!(5000)),
        ("Transport et installation complète", dec!(1), dec!(4000)),
    ]
    .into_iter()
    .map(|(desc, qty, price)| LineItem::new(desc, "U", qty, price).expect("valid line item"))
    .collect()
}

fn numbered_items(n: usize) -> ItemList {
    (1..=n)
        .map(|i| {
            LineItem::new(format!("Lame de parquet lot {i}"), "M²", dec!(1.5), dec!(89.90))
                .expect("valid line item")
        })
        .collect()
}

/// Numbers drawn in the N° column of the item table, in drawing order.
fn row_numbers(canvas: &RecordingCanvas) -> Vec<usize> {
    let theme = PageTheme::default();
    let column_center = theme.table_margin + mm(8.0) / 2.0;
    canvas
        .all_texts()
        .filter(|t| t.align == TextAlign::Center && (t.x - column_center).abs() < EPSILON)
        .filter_map(|t| t.text.parse().ok())
        .collect()
}

#[test]
fn sample_invoice_states_its_total_in_words() {
    let request = DocumentRequest::new(DocumentKind::Invoice, "F-2026/0001", date(), client())
        .with_items(sample_items())
        .with_tax(TaxPolicy::standard())
        .with_references(["BC-118", "BL-2026/0031"]);

    let mut canvas = RecordingCanvas::new();
    let doc = composer().compose(&request, &mut canvas).expect("invoice composes");

    let totals = doc.totals.expect("invoice has totals");
    assert_eq!(totals.subtotal, dec!(130150));
    assert_eq!(totals.tax_amount, dec!(26030));
    assert_eq!(totals.grand_total, dec!(156180));
    assert_eq!(
        doc.amount_in_words.as_deref(),
        Some("Cent cinquante-six mille cent quatre-vingts Dirhams ; 00 Cts TTC")
    );

    assert_eq!(doc.pages, 1);
    let page = canvas.page(1).expect("page 1");
    assert!(page.contains_text("Réf. Bon de commande :  BC-118"));
    assert!(page.contains_text("130,150.00 DH"));
    assert!(page.contains_text("26,030.00 DH"));
    assert!(page.contains_text("156,180.00 DH"));
    assert!(page.contains_text("*****Arrêté la présente facture à la somme de : ******"));
    assert_eq!(row_numbers(&canvas), (1..=15).collect::<Vec<_>>());
}

#[test]
fn overflowing_invoice_continues_with_repeated_header() {
    let request = DocumentRequest::new(DocumentKind::Invoice, "F-2026/0002", date(), client())
        .with_items(numbered_items(70));

    let mut canvas = RecordingCanvas::new();
    let doc = composer().compose(&request, &mut canvas).expect("invoice composes");

    assert!(doc.pages > 1);
    assert_eq!(canvas.page_count() as u32, doc.pages);
    assert_eq!(doc.rows_per_page.len() as u32, doc.pages);
    assert_eq!(doc.rows_per_page.iter().sum::<usize>(), 70);
    assert!(doc.rows_per_page.iter().all(|rows| *rows >= 1));

    // Numbering is continuous across pages.
    assert_eq!(row_numbers(&canvas), (1..=70).collect::<Vec<_>>());

    let markers: Vec<bool> = canvas
        .pages()
        .iter()
        .map(|p| p.contains_text(CONTINUED_MARKER))
        .collect();
    let expected: Vec<bool> = (0..doc.pages).map(|i| i + 1 < doc.pages).collect();
    assert_eq!(markers, expected);

    for page in canvas.pages() {
        assert_eq!(page.texts().filter(|t| t.text == "DÉSIGNATION").count(), 1);
        assert!(page.contains_text("RC : 98765  |  IF : 40112233"));
    }

    let last = canvas.pages().last().expect("last page");
    assert!(last.contains_text("Total TTC"));
    assert!(last.contains_text("Cachet et signature du vendeur"));
}

#[test]
fn same_request_renders_identically() {
    let request = DocumentRequest::new(DocumentKind::Attachment, "ATT-2026/0001", date(), client())
        .with_items(numbered_items(45));

    let mut first = RecordingCanvas::new();
    let mut second = RecordingCanvas::new();
    let composer = composer();
    let a = composer.compose(&request, &mut first).expect("composes");
    let b = composer.compose(&request, &mut second).expect("composes");

    assert_eq!(a, b);
    assert_eq!(first.pages(), second.pages());
}

#[test]
fn empty_documents_still_draw_a_header_row() {
    for kind in DocumentKind::ALL {
        let request = DocumentRequest::new(kind, "X-1", date(), client());
        let mut canvas = RecordingCanvas::new();
        let doc = composer().compose(&request, &mut canvas).expect("empty document composes");

        assert_eq!(doc.pages, 1);
        assert_eq!(doc.rows_per_page, vec![0]);
        let page = canvas.page(1).expect("page 1");
        assert!(page.contains_text("DÉSIGNATION"));
        assert!(page.contains_text(kind.title()));
        if let Some(totals) = doc.totals {
            assert_eq!(totals.grand_total, dec!(0));
        }
    }
}

#[test]
fn requests_and_themes_load_from_json() {
    let theme = PageTheme::from_json(
        &json!({
            "currency_symbol": "MAD",
            "assets": { "table_header_texture": "textures/wood-header.png" }
        })
        .to_string(),
    )
    .expect("valid theme");

    let request = DocumentRequest::from_json(
        &json!({
            "kind": "work_statement",
            "number": "ST-2026/0003",
            "date": "2026-02-06",
            "client": { "name": "Riad Zitoun", "address": "Derb Sidi Bouloukat", "city": "Marrakech" },
            "items": [
                { "description": "Chambranles et finitions", "unit": "ML", "quantity": "96", "unit_price": "120" },
                { "description": "Portes intérieures en hêtre", "quantity": "24", "unit_price": "1500" }
            ],
            "tax": { "rate": "0.20", "applicable": true },
            "references": ["Menuiserie bois", "2 / janvier 2026"]
        })
        .to_string(),
    )
    .expect("valid request");

    let mut canvas = RecordingCanvas::new().with_missing_assets(["textures/wood-header.png"]);
    let doc = DocumentComposer::new(theme, company())
        .compose(&request, &mut canvas)
        .expect("work statement composes");

    // 96 x 120 + 24 x 1500 = 47,520 HT, 57,024 TTC.
    let totals = doc.totals.expect("totals");
    assert_eq!(totals.subtotal, dec!(47520));
    assert_eq!(totals.grand_total, dec!(57024));
    assert_eq!(
        doc.amount_in_words.as_deref(),
        Some("Cinquante-sept mille vingt-quatre Dirhams ; 00 Cts TTC")
    );

    let page = canvas.page(1).expect("page 1");
    assert!(page.contains_text("57,024.00 MAD"));
    assert!(page.contains_text("Situation N° :  2 / janvier 2026"));
    assert!(page.contains_text("Marché N° :  ____________________"));
    // The default unit applies when none is given.
    assert_eq!(page.texts().filter(|t| t.text == "U").count(), 2);
}

#[test]
fn completion_report_and_letterhead_share_the_company_chrome() {
    let composer = composer();
    let report = CompletionReport::from_json(
        &json!({
            "number": "PV-2026/0006",
            "date": "2026-04-30",
            "owner": "Riad Zitoun",
            "site_address": "Derb Sidi Bouloukat, Marrakech",
            "contract_reference": "M-2025/118",
            "outcome": "with_reserves",
            "reserves": ["Reprise du vernis porte d'entrée"],
            "lifting_delay_days": 15
        })
        .to_string(),
    )
    .expect("valid report");

    let mut canvas = RecordingCanvas::new();
    let doc = composer
        .compose_completion_report(&report, &mut canvas)
        .expect("report composes");
    assert_eq!(doc.pages, 1);
    assert!(doc.totals.is_none());

    let page = canvas.page(1).expect("page 1");
    assert!(page.contains_text(REPORT_TITLE));
    assert!(page.contains_text("M-2025/118"));
    assert!(page.contains_text("- Reprise du vernis porte d'entrée"));
    assert!(page.contains_text("RC : 98765"));

    let mut letterhead = RecordingCanvas::new();
    composer.compose_letterhead(&mut letterhead).expect("letterhead composes");
    let paper = letterhead.page(1).expect("page 1");
    assert_eq!(letterhead.page_count(), 1);
    assert!(paper.contains_text("ATELIER ARGANE"));
    assert!(paper.contains_text("RC : 98765"));
    assert!(!paper.contains_text(REPORT_TITLE));
}
