use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::currencies::Currency;

/// One raw invoice line as entered in the form.
///
/// Numeric fields are assumed to be already coerced to non-negative values
/// by the input boundary (see [`crate::core::currencies::parse_amount`]);
/// the calculation engine performs no validation of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineInput {
    /// Short label of the billed good or service.
    pub designation: String,
    /// Optional longer description shown under the designation.
    pub description: Option<String>,
    /// Billed quantity.
    pub quantity: Decimal,
    /// Unit of the quantity (free text: "jour", "heure", "forfait", ...).
    pub unit: String,
    /// Unit price excluding tax.
    pub unit_price: Decimal,
    /// Per-line discount in percent, 0..=100.
    pub discount_percent: Decimal,
    /// Nominal VAT rate in percent as selected on the line.
    ///
    /// Whether this rate actually applies depends on the document-wide
    /// [`TaxRegime`]; any regime other than `Normal` forces the effective
    /// rate to zero.
    pub vat_rate: Decimal,
}

impl Default for LineInput {
    /// Mirrors the form defaults for a freshly added row.
    fn default() -> Self {
        Self {
            designation: String::new(),
            description: None,
            quantity: Decimal::ONE,
            unit: "jour".to_string(),
            unit_price: Decimal::ZERO,
            discount_percent: Decimal::ZERO,
            vat_rate: dec!(20),
        }
    }
}

/// Per-line computed amounts, kept at full precision.
///
/// Rounding is deferred to the display layer so that document sums do not
/// accumulate rounding drift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComputedLine {
    /// Net amount (HT): quantity × unit price × (1 − discount/100).
    pub net: Decimal,
    /// VAT amount at the effective rate.
    pub vat: Decimal,
    /// Gross amount (TTC): net + VAT.
    pub gross: Decimal,
    /// The rate that was actually applied (zero unless the regime is Normal).
    pub effective_rate: Decimal,
}

/// Document-wide tax treatment.
///
/// Only `Normal` lets VAT accrue; every other regime forces the effective
/// rate of all lines to zero and carries a fixed disclosure sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxRegime {
    /// Standard regime — VAT applies at each line's nominal rate.
    #[serde(rename = "normal")]
    Normal,
    /// Micro-business exemption (art. 293B du CGI).
    #[serde(rename = "autoEntrepreneur")]
    AutoEntrepreneur,
    /// Reverse charge — VAT self-assessed by the buyer.
    #[serde(rename = "autoliquidation")]
    Autoliquidation,
    /// VAT exemption.
    #[serde(rename = "exoneration")]
    Exoneration,
    /// Intra-community supply, reverse charged.
    #[serde(rename = "intracommunautaire")]
    Intracommunautaire,
}

impl TaxRegime {
    /// Form value for this regime.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::AutoEntrepreneur => "autoEntrepreneur",
            Self::Autoliquidation => "autoliquidation",
            Self::Exoneration => "exoneration",
            Self::Intracommunautaire => "intracommunautaire",
        }
    }

    /// Parse from a form value.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "normal" => Some(Self::Normal),
            "autoEntrepreneur" => Some(Self::AutoEntrepreneur),
            "autoliquidation" => Some(Self::Autoliquidation),
            "exoneration" => Some(Self::Exoneration),
            "intracommunautaire" => Some(Self::Intracommunautaire),
            _ => None,
        }
    }

    /// Legal disclosure sentence printed on the invoice. Empty for `Normal`.
    pub fn mention(&self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::AutoEntrepreneur => "TVA non applicable - art. 293B du CGI",
            Self::Autoliquidation => "Autoliquidation de la TVA par le preneur",
            Self::Exoneration => "Exonération de TVA",
            Self::Intracommunautaire => "TVA intracommunautaire - Autoliquidation",
        }
    }

    /// Whether VAT actually accrues under this regime.
    pub fn is_vat_applicable(&self) -> bool {
        matches!(self, Self::Normal)
    }
}

impl Default for TaxRegime {
    fn default() -> Self {
        Self::Normal
    }
}

/// Aggregated VAT for one effective rate.
///
/// Rebuilt from scratch on every recalculation; never patched incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBucket {
    /// The effective VAT rate shared by the lines in this bucket.
    pub rate: Decimal,
    /// Accumulated net base across those lines.
    pub base_net: Decimal,
    /// Accumulated (or, after a global discount, recomputed) VAT amount.
    pub vat_amount: Decimal,
}

/// Document-level totals, derived entirely from the line list plus the
/// document settings. No hidden state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTotals {
    /// Net total (HT) after the global discount.
    pub net_total: Decimal,
    /// Total VAT, reconciled with the global discount.
    pub vat_total: Decimal,
    /// Gross total (TTC): net + VAT.
    pub gross_total: Decimal,
    /// Global discount in percent, 0..=100.
    pub global_discount_percent: Decimal,
    /// Global discount as an amount, computed on the pre-discount net.
    pub global_discount_amount: Decimal,
    /// Deposit already received.
    pub deposit: Decimal,
    /// Gross total minus deposit. Not clamped: an excess deposit yields a
    /// negative value, a credit owed to the client.
    pub net_to_pay: Decimal,
    /// Net-to-pay spelled out in French.
    pub amount_in_words: String,
}

/// Full result of one document recalculation, handed to the preview and
/// render layers. All amounts are full precision; the display layer rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Per-line computed amounts, in line order.
    pub lines: Vec<ComputedLine>,
    /// VAT breakdown by effective rate, ascending.
    pub vat_buckets: Vec<TaxBucket>,
    /// Document totals.
    pub totals: DocumentTotals,
}

/// Seller or client identification block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub country: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// SIREN (9 digits), seller only.
    pub siren: Option<String>,
    /// SIRET (14 digits, Luhn-checked at finalization), seller only.
    pub siret: Option<String>,
    /// Intra-community VAT identifier.
    pub vat_id: Option<String>,
}

/// Payment block of the draft.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentInfo {
    pub iban: Option<String>,
    pub bic: Option<String>,
    /// Accepted payment methods, free text ("virement", "chèque", ...).
    pub methods: Vec<String>,
    pub reference: Option<String>,
}

/// The raw invoice draft: everything the form captures, nothing computed.
///
/// This is the unit of persistence (computed totals are always re-derived)
/// and the immutable snapshot the engine consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    /// Document kind label ("Facture", "Devis", "Avoir").
    pub doc_type: String,
    /// Invoice number, e.g. "FA-202406-001".
    pub number: String,
    pub issue_date: NaiveDate,
    pub service_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub currency: Currency,
    pub seller: Party,
    pub client: Party,
    pub lines: Vec<LineInput>,
    pub regime: TaxRegime,
    pub global_discount_percent: Decimal,
    pub deposit: Decimal,
    pub payment: PaymentInfo,
}

impl InvoiceDraft {
    /// Fresh draft with one empty line, mirroring form initialization.
    pub fn new(number: impl Into<String>, issue_date: NaiveDate) -> Self {
        Self {
            doc_type: "Facture".to_string(),
            number: number.into(),
            issue_date,
            service_date: Some(issue_date),
            due_date: None,
            currency: Currency::Eur,
            seller: Party::default(),
            client: Party::default(),
            lines: vec![LineInput::default()],
            regime: TaxRegime::Normal,
            global_discount_percent: Decimal::ZERO,
            deposit: Decimal::ZERO,
            payment: PaymentInfo::default(),
        }
    }
}
