//! Quote math for jobs.
//!
//! Totals are computed at full precision and rounded to cents once at the
//! end, so intermediate truncation can never skew the final figure.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::entities::job::{MaterialLineItem, MaterialList};

/// Computed totals for one job quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteBreakdown {
    pub materials_total: Decimal,
    pub labor_total: Decimal,
    pub subtotal: Decimal,
    pub quote_total: Decimal,
}

fn round_cents(value: Decimal) -> Decimal {
    let mut cents = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // Pin the scale so whole amounts still serialize as "170.00".
    cents.rescale(2);
    cents
}

/// Serializer for monetary fields: always renders exactly two decimal
/// places. SQLite stores decimals as REAL, which drops trailing zeros on
/// the way back out of the database.
pub fn serialize_cents<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&round_cents(*value).to_string())
}

/// Line total for one material entry. Negative quantities and unit costs
/// are treated as zero.
pub fn line_total(quantity: i32, unit_cost: Decimal) -> Decimal {
    let quantity = Decimal::from(quantity.max(0));
    let unit_cost = unit_cost.max(Decimal::ZERO);
    round_cents(quantity * unit_cost)
}

/// Normalizes a material line: clamps negatives and recomputes its total.
pub fn normalize_line(mut line: MaterialLineItem) -> MaterialLineItem {
    line.quantity = line.quantity.max(0);
    line.unit_cost = line.unit_cost.max(Decimal::ZERO);
    line.line_total = line_total(line.quantity, line.unit_cost);
    line
}

/// Computes the full quote breakdown:
/// `quote_total = (materials + labor_hours * labor_rate) * (1 + markup / 100)`.
///
/// Inputs are clamped to non-negative before use. Material line totals are
/// assumed already normalized via [`normalize_line`].
pub fn compute(
    materials: &MaterialList,
    labor_hours: Decimal,
    labor_rate: Decimal,
    markup_percent: Decimal,
) -> QuoteBreakdown {
    let labor_hours = labor_hours.max(Decimal::ZERO);
    let labor_rate = labor_rate.max(Decimal::ZERO);
    let markup_percent = markup_percent.max(Decimal::ZERO);

    let materials_total: Decimal = materials.0.iter().map(|l| l.line_total).sum();
    let labor_total = labor_hours * labor_rate;
    let subtotal = materials_total + labor_total;
    let markup_factor = Decimal::ONE + markup_percent / Decimal::ONE_HUNDRED;
    let quote_total = subtotal * markup_factor;

    QuoteBreakdown {
        materials_total: round_cents(materials_total),
        labor_total: round_cents(labor_total),
        subtotal: round_cents(subtotal),
        quote_total: round_cents(quote_total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn line(quantity: i32, unit_cost: Decimal) -> MaterialLineItem {
        normalize_line(MaterialLineItem {
            id: Uuid::new_v4(),
            name: "Test material".into(),
            quantity,
            unit_cost,
            line_total: Decimal::ZERO,
        })
    }

    #[test]
    fn line_total_multiplies_quantity_and_cost() {
        assert_eq!(line_total(3, dec!(10.50)), dec!(31.50));
    }

    #[test]
    fn negative_inputs_clamp_to_zero() {
        assert_eq!(line_total(-2, dec!(10.00)), dec!(0));
        assert_eq!(line_total(2, dec!(-10.00)), dec!(0));
    }

    #[test]
    fn standard_quote_scenario() {
        // 3 x 10.50 materials, 2h at 85/h labor, 20% markup.
        let materials = MaterialList(vec![line(3, dec!(10.50))]);
        let breakdown = compute(&materials, dec!(2), dec!(85), dec!(20));

        assert_eq!(breakdown.materials_total, dec!(31.50));
        assert_eq!(breakdown.labor_total, dec!(170.00));
        assert_eq!(breakdown.subtotal, dec!(201.50));
        assert_eq!(breakdown.quote_total, dec!(241.80));
    }

    #[test]
    fn zero_markup_leaves_subtotal_unchanged() {
        let materials = MaterialList(vec![line(1, dec!(100))]);
        let breakdown = compute(&materials, dec!(0), dec!(85), dec!(0));
        assert_eq!(breakdown.quote_total, breakdown.subtotal);
        assert_eq!(breakdown.quote_total, dec!(100.00));
    }

    #[test]
    fn empty_materials_and_zero_labor_quote_zero() {
        let breakdown = compute(&MaterialList::default(), dec!(0), dec!(85), dec!(20));
        assert_eq!(breakdown.quote_total, dec!(0.00));
    }

    #[test]
    fn midpoints_round_away_from_zero() {
        // 3 x 0.335 = 1.005, which must round up to 1.01, not down.
        let materials = MaterialList(vec![line(3, dec!(0.335))]);
        let breakdown = compute(&materials, dec!(0), dec!(0), dec!(0));
        assert_eq!(breakdown.materials_total, dec!(1.01));
        assert_eq!(breakdown.quote_total, dec!(1.01));
    }

    proptest! {
        #[test]
        fn quote_total_never_below_subtotal(
            qty in 0i32..1000,
            cents in 0i64..100_000,
            hours_tenths in 0i64..500,
            markup in 0i64..=100,
        ) {
            let unit_cost = Decimal::new(cents, 2);
            let hours = Decimal::new(hours_tenths, 1);
            let materials = MaterialList(vec![line(qty, unit_cost)]);
            let breakdown = compute(&materials, hours, dec!(85), Decimal::from(markup));

            prop_assert!(breakdown.quote_total >= breakdown.subtotal);
            prop_assert!(breakdown.materials_total >= Decimal::ZERO);
            prop_assert!(breakdown.labor_total >= Decimal::ZERO);
        }
    }
}
