//! `quote` command — preview one monthly payday without touching the chain.
//!
//! Calls the contract crate's own formula: every explicit allocation entry pays
//! `floor(salary × rate × percentage / 1200)` and the native currency takes
//! whatever percentage is left. Rates are per 100 reference units, so the
//! reference asset itself is quoted with `@100`.
//!
//! ```text
//! $ payroll quote --salary 110000 --native-rate 25 --alloc EUR=50@100 --alloc USD=20@500
//! ┌────────┬───────┬──────┬─────────┐
//! │ Asset  │ Share │ Rate │ Payout  │
//! ╞════════╪═══════╪══════╪═════════╡
//! │ EUR    │ 50%   │ 100  │ 458333  │
//! │ USD    │ 20%   │ 500  │ 916666  │
//! │ native │ 30%   │ 25   │ 68750   │
//! └────────┴───────┴──────┴─────────┘
//! ```

use anyhow::{bail, Context, Result};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Table};

const FULL_ALLOCATION: u32 = 100;

/// One `--alloc LABEL=PERCENT@RATE` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocSpec {
    pub label: String,
    pub percentage: u32,
    pub rate: u128,
}

/// One line of the quote. `amount` is `None` when the rate is unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRow {
    pub label: String,
    pub percentage: u32,
    pub rate: u128,
    pub amount: Option<u128>,
}

/// clap value parser for `LABEL=PERCENT@RATE`.
pub fn parse_alloc(raw: &str) -> Result<AllocSpec, String> {
    let (label, rest) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected LABEL=PERCENT@RATE, got '{raw}'"))?;
    let (percentage, rate) = rest
        .split_once('@')
        .ok_or_else(|| format!("missing @RATE in '{raw}'"))?;

    if label.is_empty() {
        return Err(format!("empty asset label in '{raw}'"));
    }
    let percentage = percentage
        .parse::<u32>()
        .map_err(|e| format!("bad percentage in '{raw}': {e}"))?;
    let rate = rate
        .parse::<u128>()
        .map_err(|e| format!("bad rate in '{raw}': {e}"))?;

    Ok(AllocSpec {
        label: label.to_owned(),
        percentage,
        rate,
    })
}

/// `floor(annual_salary × rate × percentage / 1200)`, `None` on overflow.
pub fn monthly_payout(annual_salary: u128, rate: u128, percentage: u32) -> Option<u128> {
    payroll::payout_amount(annual_salary, rate, percentage).ok()
}

/// Quote rows in payout order: explicit entries first, native remainder last.
pub fn plan(annual_salary: u128, native_rate: u128, allocs: &[AllocSpec]) -> Result<Vec<QuoteRow>> {
    let mut total: u32 = 0;
    for spec in allocs {
        total = total
            .checked_add(spec.percentage)
            .filter(|sum| *sum <= FULL_ALLOCATION)
            .with_context(|| format!("Allocation exceeds {}% at '{}'", FULL_ALLOCATION, spec.label))?;
        if allocs.iter().filter(|other| other.label == spec.label).count() > 1 {
            bail!("Asset '{}' is allocated more than once", spec.label);
        }
    }

    let native = AllocSpec {
        label: "native".to_owned(),
        percentage: FULL_ALLOCATION - total,
        rate: native_rate,
    };

    let mut rows = Vec::with_capacity(allocs.len() + 1);
    for spec in allocs.iter().chain(std::iter::once(&native)) {
        if spec.percentage == 0 {
            continue;
        }
        let amount = if spec.rate == 0 {
            None
        } else {
            Some(
                monthly_payout(annual_salary, spec.rate, spec.percentage)
                    .with_context(|| format!("Payout for '{}' overflows", spec.label))?,
            )
        };
        rows.push(QuoteRow {
            label: spec.label.clone(),
            percentage: spec.percentage,
            rate: spec.rate,
            amount,
        });
    }
    Ok(rows)
}

/// Run the quote command and print the table.
pub fn run(annual_salary: u128, native_rate: u128, allocs: &[AllocSpec]) -> Result<()> {
    let rows = plan(annual_salary, native_rate, allocs)?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["Asset", "Share", "Rate", "Payout"]);

    for row in &rows {
        let payout = match row.amount {
            Some(amount) => amount.to_string(),
            None => "rate unset, skipped".to_owned(),
        };
        table.add_row(vec![
            Cell::new(&row.label),
            Cell::new(format!("{}%", row.percentage)),
            Cell::new(row.rate.to_string()),
            Cell::new(payout),
        ]);
    }

    println!("Monthly payday for a yearly salary of {}", annual_salary);
    println!("{table}");

    if rows.iter().any(|row| row.amount.is_none()) {
        eprintln!("WARN: assets without a published rate are not paid this month.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alloc(label: &str, percentage: u32, rate: u128) -> AllocSpec {
        AllocSpec {
            label: label.to_owned(),
            percentage,
            rate,
        }
    }

    #[test]
    fn parses_alloc_argument() {
        assert_eq!(parse_alloc("EUR=50@100"), Ok(alloc("EUR", 50, 100)));
    }

    #[test]
    fn rejects_malformed_alloc_argument() {
        assert!(parse_alloc("EUR50@100").is_err());
        assert!(parse_alloc("EUR=50").is_err());
        assert!(parse_alloc("=50@100").is_err());
        assert!(parse_alloc("EUR=-1@100").is_err());
        assert!(parse_alloc("EUR=50@x").is_err());
    }

    #[test]
    fn no_allocation_pays_everything_in_native() {
        let rows = plan(110_000, 25, &[]).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "native");
        assert_eq!(rows[0].percentage, 100);
        assert_eq!(rows[0].amount, Some(229_166));
    }

    #[test]
    fn allocated_quote_matches_contract_formula() {
        let allocs = [alloc("EUR", 50, 100), alloc("USD", 20, 500), alloc("GOLD", 15, 700)];
        let rows = plan(110_000, 25, &allocs).unwrap();

        let amounts: Vec<_> = rows.iter().map(|r| (r.label.as_str(), r.amount)).collect();
        assert_eq!(
            amounts,
            vec![
                ("EUR", Some(458_333)),
                ("USD", Some(916_666)),
                ("GOLD", Some(962_500)),
                ("native", Some(34_375)),
            ]
        );
    }

    #[test]
    fn full_explicit_allocation_omits_native() {
        let rows = plan(120_000, 25, &[alloc("EUR", 100, 100)]).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "EUR");
    }

    #[test]
    fn unset_rate_is_reported_not_paid() {
        let rows = plan(120_000, 25, &[alloc("SILVER", 30, 0)]).unwrap();
        assert_eq!(rows[0].amount, None);
        assert_eq!(rows[1].amount, Some(175_000));
    }

    #[test]
    fn over_allocation_is_rejected() {
        assert!(plan(120_000, 25, &[alloc("EUR", 60, 100), alloc("USD", 41, 500)]).is_err());
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        assert!(plan(120_000, 25, &[alloc("EUR", 10, 100), alloc("EUR", 10, 100)]).is_err());
    }

    #[test]
    fn monthly_payout_is_the_contract_formula() {
        assert_eq!(monthly_payout(110_000, 100, 50), Some(458_333));
        assert_eq!(
            monthly_payout(110_000, 500, 20),
            payroll::payout_amount(110_000, 500, 20).ok()
        );
        assert_eq!(monthly_payout(u128::MAX, 2, 1), None);
    }

    #[test]
    fn overflow_is_an_error() {
        assert!(plan(u128::MAX, 25, &[]).is_err());
    }
}
