//! Amounts in words (French numeral rules).
//!
//! Moroccan invoices must state the grand total in letters ("Arrêté la présente
//! facture à la somme de : ..."). This crate turns integers and decimal amounts
//! into that wording. Everything here is a pure, total function.

pub mod amount;
pub mod numerals;

pub use amount::{CurrencyWording, amount_to_words, legal_phrase};
pub use numerals::integer_to_words;
