//! The calculation engine: line totals, per-rate aggregation, document
//! totals.
//!
//! Everything here is a pure function of its arguments. Amounts stay at
//! full [`Decimal`] precision through the whole accumulation path; only
//! the display layer rounds to two decimals.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

use super::currencies::Currency;
use super::types::*;
use crate::words::to_words;

const HUNDRED: Decimal = dec!(100);

/// The rate a line is actually taxed at: the nominal rate under the
/// `Normal` regime, zero under every other regime.
pub fn effective_vat_rate(nominal_rate: Decimal, regime: TaxRegime) -> Decimal {
    if regime.is_vat_applicable() {
        nominal_rate
    } else {
        Decimal::ZERO
    }
}

/// Compute one line's net, VAT, and gross amounts.
///
/// Inputs are expected to be non-negative; malformed form values are
/// coerced to zero at the input boundary, not here. There is no error
/// path — this is a total arithmetic transform.
pub fn compute_line(line: &LineInput, regime: TaxRegime) -> ComputedLine {
    let rate = effective_vat_rate(line.vat_rate, regime);
    let net = line.quantity * line.unit_price * (Decimal::ONE - line.discount_percent / HUNDRED);
    let vat = net * rate / HUNDRED;
    ComputedLine {
        net,
        vat,
        gross: net + vat,
        effective_rate: rate,
    }
}

/// Grouping key for a VAT rate: integer basis points.
///
/// Rates that differ only past the second decimal (2.1 vs 2.10000000001)
/// land in the same bucket, so float-noise near precision limits can never
/// split a group.
fn rate_basis_points(rate: Decimal) -> i64 {
    (rate * HUNDRED).trunc().to_i64().unwrap_or(0)
}

/// Group computed lines by effective VAT rate.
///
/// Buckets come back sorted ascending by rate and the result is stable
/// across repeated calls with the same input.
pub fn aggregate_by_rate(lines: &[ComputedLine]) -> Vec<TaxBucket> {
    let mut buckets: BTreeMap<i64, TaxBucket> = BTreeMap::new();
    for line in lines {
        let bucket = buckets
            .entry(rate_basis_points(line.effective_rate))
            .or_insert_with(|| TaxBucket {
                rate: line.effective_rate,
                base_net: Decimal::ZERO,
                vat_amount: Decimal::ZERO,
            });
        bucket.base_net += line.net;
        bucket.vat_amount += line.vat;
    }
    buckets.into_values().collect()
}

/// Rescale every bucket's base for a global discount and recompute its VAT
/// from the rescaled base.
///
/// [`compute_document_totals`] sums its VAT total from these buckets, so
/// this is the single place discount-adjusted VAT is computed. A zero
/// discount leaves the buckets untouched.
pub fn apply_global_discount(buckets: &mut [TaxBucket], global_discount_percent: Decimal) {
    if global_discount_percent.is_zero() {
        return;
    }
    let keep = Decimal::ONE - global_discount_percent / HUNDRED;
    for bucket in buckets {
        bucket.base_net *= keep;
        bucket.vat_amount = bucket.base_net * bucket.rate / HUNDRED;
    }
}

/// Compute the full document result: per-line amounts, VAT breakdown, and
/// totals, with the amount-in-words rendered from the net-to-pay figure.
///
/// The deposit is not clamped: a deposit exceeding the gross total yields
/// a negative net-to-pay, a credit owed to the client. An empty line list
/// produces all-zero totals and the words for zero.
pub fn compute_document_totals(
    lines: &[LineInput],
    regime: TaxRegime,
    global_discount_percent: Decimal,
    deposit: Decimal,
    currency: Currency,
) -> CalculationResult {
    let computed: Vec<ComputedLine> = lines.iter().map(|l| compute_line(l, regime)).collect();

    let net_before_discount: Decimal = computed.iter().map(|c| c.net).sum();
    let global_discount_amount = net_before_discount * global_discount_percent / HUNDRED;
    let net_total = net_before_discount - global_discount_amount;

    let mut vat_buckets = aggregate_by_rate(&computed);
    apply_global_discount(&mut vat_buckets, global_discount_percent);

    // The document VAT is the sum of the (discounted) breakdown table, so
    // the two can never disagree, even when distinct rates collapse into
    // one bucket. Without a discount this is exactly the sum of line VAT.
    let vat_total: Decimal = vat_buckets.iter().map(|b| b.vat_amount).sum();

    let gross_total = net_total + vat_total;
    let net_to_pay = gross_total - deposit;

    CalculationResult {
        lines: computed,
        vat_buckets,
        totals: DocumentTotals {
            net_total,
            vat_total,
            gross_total,
            global_discount_percent,
            global_discount_amount,
            deposit,
            net_to_pay,
            amount_in_words: to_words(net_to_pay, currency),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: Decimal, unit_price: Decimal, discount: Decimal, rate: Decimal) -> LineInput {
        LineInput {
            quantity,
            unit_price,
            discount_percent: discount,
            vat_rate: rate,
            ..Default::default()
        }
    }

    #[test]
    fn line_totals_with_discount() {
        let computed = compute_line(
            &line(dec!(2), dec!(100), dec!(10), dec!(20)),
            TaxRegime::Normal,
        );
        assert_eq!(computed.net, dec!(180));
        assert_eq!(computed.vat, dec!(36));
        assert_eq!(computed.gross, dec!(216));
    }

    #[test]
    fn non_normal_regime_suppresses_vat() {
        let computed = compute_line(
            &line(dec!(2), dec!(100), dec!(10), dec!(20)),
            TaxRegime::Exoneration,
        );
        assert_eq!(computed.vat, Decimal::ZERO);
        assert_eq!(computed.gross, dec!(180));
        assert_eq!(computed.effective_rate, Decimal::ZERO);
        assert!(!TaxRegime::Exoneration.mention().is_empty());
    }

    #[test]
    fn buckets_sorted_ascending_by_rate() {
        let lines = [
            line(dec!(1), dec!(100), dec!(0), dec!(20)),
            line(dec!(1), dec!(100), dec!(0), dec!(5.5)),
            line(dec!(1), dec!(100), dec!(0), dec!(10)),
            line(dec!(1), dec!(50), dec!(0), dec!(5.5)),
        ];
        let computed: Vec<_> = lines
            .iter()
            .map(|l| compute_line(l, TaxRegime::Normal))
            .collect();
        let buckets = aggregate_by_rate(&computed);
        let rates: Vec<Decimal> = buckets.iter().map(|b| b.rate).collect();
        assert_eq!(rates, vec![dec!(5.5), dec!(10), dec!(20)]);
        assert_eq!(buckets[0].base_net, dec!(150));
    }

    #[test]
    fn near_identical_rates_share_a_bucket() {
        let a = compute_line(&line(dec!(1), dec!(100), dec!(0), dec!(2.1)), TaxRegime::Normal);
        let b = compute_line(
            &line(dec!(1), dec!(100), dec!(0), dec!(2.1000000001)),
            TaxRegime::Normal,
        );
        let buckets = aggregate_by_rate(&[a, b]);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].base_net, dec!(200));
    }

    #[test]
    fn zero_discount_passes_buckets_through() {
        let computed = [compute_line(
            &line(dec!(3), dec!(40), dec!(0), dec!(10)),
            TaxRegime::Normal,
        )];
        let mut buckets = aggregate_by_rate(&computed);
        let before = buckets.clone();
        apply_global_discount(&mut buckets, Decimal::ZERO);
        assert_eq!(buckets, before);
    }

    #[test]
    fn global_discount_recomputes_bucket_vat_from_rescaled_base() {
        // rate 20% net 100, rate 10% net 200, global discount 25%
        let computed = [
            compute_line(&line(dec!(1), dec!(100), dec!(0), dec!(20)), TaxRegime::Normal),
            compute_line(&line(dec!(1), dec!(200), dec!(0), dec!(10)), TaxRegime::Normal),
        ];
        let mut buckets = aggregate_by_rate(&computed);
        apply_global_discount(&mut buckets, dec!(25));

        assert_eq!(buckets[0].rate, dec!(10));
        assert_eq!(buckets[0].base_net, dec!(150));
        assert_eq!(buckets[0].vat_amount, dec!(15));
        assert_eq!(buckets[1].rate, dec!(20));
        assert_eq!(buckets[1].base_net, dec!(75));
        assert_eq!(buckets[1].vat_amount, dec!(15));
    }

    #[test]
    fn document_vat_matches_bucket_sum_under_discount() {
        let lines = [
            line(dec!(1), dec!(100), dec!(0), dec!(20)),
            line(dec!(1), dec!(200), dec!(0), dec!(10)),
        ];
        let result =
            compute_document_totals(&lines, TaxRegime::Normal, dec!(25), Decimal::ZERO, Currency::Eur);

        let bucket_vat: Decimal = result.vat_buckets.iter().map(|b| b.vat_amount).sum();
        assert_eq!(result.totals.vat_total, bucket_vat);
        assert_eq!(result.totals.vat_total, dec!(30));
        assert_eq!(result.totals.net_total, dec!(225));
        assert_eq!(result.totals.gross_total, dec!(255));
    }

    #[test]
    fn colliding_rates_stay_reconciled_under_discount() {
        // 2.1 and 2.104 share the basis-point key 210; the document VAT
        // must still equal the breakdown sum after a global discount.
        let lines = [
            line(dec!(1), dec!(100), dec!(0), dec!(2.1)),
            line(dec!(1), dec!(100), dec!(0), dec!(2.104)),
        ];
        let result =
            compute_document_totals(&lines, TaxRegime::Normal, dec!(50), Decimal::ZERO, Currency::Eur);

        assert_eq!(result.vat_buckets.len(), 1);
        let bucket_vat: Decimal = result.vat_buckets.iter().map(|b| b.vat_amount).sum();
        assert_eq!(result.totals.vat_total, bucket_vat);
        // Rescaled base 100 at the bucket's rate.
        assert_eq!(result.totals.vat_total, dec!(2.1));
    }

    #[test]
    fn empty_document_is_all_zeros_with_zero_words() {
        let result = compute_document_totals(
            &[],
            TaxRegime::Normal,
            Decimal::ZERO,
            Decimal::ZERO,
            Currency::Eur,
        );
        assert!(result.lines.is_empty());
        assert!(result.vat_buckets.is_empty());
        assert_eq!(result.totals.net_total, Decimal::ZERO);
        assert_eq!(result.totals.vat_total, Decimal::ZERO);
        assert_eq!(result.totals.gross_total, Decimal::ZERO);
        assert_eq!(result.totals.net_to_pay, Decimal::ZERO);
        assert_eq!(result.totals.amount_in_words, "Zéro");
    }

    #[test]
    fn zero_quantity_line_contributes_zero() {
        let lines = [
            line(dec!(0), dec!(100), dec!(0), dec!(20)),
            line(dec!(1), dec!(50), dec!(0), dec!(20)),
        ];
        let result = compute_document_totals(
            &lines,
            TaxRegime::Normal,
            Decimal::ZERO,
            Decimal::ZERO,
            Currency::Eur,
        );
        assert_eq!(result.lines[0].gross, Decimal::ZERO);
        assert_eq!(result.totals.net_total, dec!(50));
    }

    #[test]
    fn deposit_exceeding_gross_goes_negative() {
        let lines = [line(dec!(1), dec!(100), dec!(0), dec!(0))];
        let result = compute_document_totals(
            &lines,
            TaxRegime::Normal,
            Decimal::ZERO,
            dec!(150),
            Currency::Eur,
        );
        assert_eq!(result.totals.gross_total, dec!(100));
        assert_eq!(result.totals.net_to_pay, dec!(-50));
        assert!(result.totals.amount_in_words.starts_with("Moins "));
    }

    #[test]
    fn recalculation_is_idempotent() {
        let lines = [
            line(dec!(3), dec!(19.99), dec!(5), dec!(20)),
            line(dec!(1.5), dec!(120), dec!(0), dec!(5.5)),
        ];
        let first =
            compute_document_totals(&lines, TaxRegime::Normal, dec!(7), dec!(40), Currency::Eur);
        let second =
            compute_document_totals(&lines, TaxRegime::Normal, dec!(7), dec!(40), Currency::Eur);
        assert_eq!(first, second);
    }

    #[test]
    fn words_follow_net_to_pay_not_gross() {
        let lines = [line(dec!(1), dec!(1000), dec!(0), dec!(0))];
        let result = compute_document_totals(
            &lines,
            TaxRegime::AutoEntrepreneur,
            Decimal::ZERO,
            dec!(400),
            Currency::Eur,
        );
        assert_eq!(result.totals.net_to_pay, dec!(600));
        assert_eq!(result.totals.amount_in_words, "Six cents euros");
    }
}
