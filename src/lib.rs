//! # facture
//!
//! Calculation engine for French invoices: per-line totals, VAT breakdown
//! by rate, document totals with global discount and deposit, and the
//! amount-in-words line required on printed invoices.
//!
//! The engine is pure: [`compute_document_totals`] derives everything from
//! the raw line inputs and the document settings, at full [`rust_decimal`]
//! precision. Around it sit a form session with debounced recalculation
//! and autosave ([`session::FormSession`]), a persistence seam
//! ([`store::DraftStore`]), finalization validation, and invoice
//! numbering.
//!
//! ## Example
//!
//! ```
//! use facture::{compute_document_totals, Currency, LineInput, TaxRegime};
//! use rust_decimal_macros::dec;
//!
//! let lines = vec![LineInput {
//!     designation: "Développement".to_string(),
//!     quantity: dec!(2),
//!     unit_price: dec!(100),
//!     discount_percent: dec!(10),
//!     vat_rate: dec!(20),
//!     ..Default::default()
//! }];
//!
//! let result = compute_document_totals(
//!     &lines,
//!     TaxRegime::Normal,
//!     dec!(0),
//!     dec!(0),
//!     Currency::Eur,
//! );
//!
//! assert_eq!(result.totals.net_total, dec!(180));
//! assert_eq!(result.totals.vat_total, dec!(36));
//! assert_eq!(result.totals.gross_total, dec!(216));
//! ```

pub mod core;
pub mod debounce;
pub mod session;
pub mod store;
pub mod words;

pub use crate::core::*;
pub use crate::session::{FormSession, TickReport};
pub use crate::store::{DraftStore, MemoryStore, load_draft, save_draft};
pub use crate::words::to_words;
