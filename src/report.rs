//! Monthly loan report assembly.
//!
//! Builds the rows of the loan report from the flat loan detail query:
//! per (year, month) the total loaned, and the identity of the largest
//! loan of that month. The largest loan is recovered by amount equality,
//! so a month where several loans tie at the maximum emits one report row
//! per tied loan. That duplication matches the original dashboard and is
//! kept deliberately; see DESIGN.md.

use std::collections::{BTreeMap, HashSet};

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::models::{LoanDetailRow, ReportRow};

/// English month names, matching what the store's date formatting produced
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Default)]
struct MonthStats {
    total: Decimal,
    largest: Option<Decimal>,
}

/// Build the report rows, ordered by year then month.
///
/// Detail rows fan out per deposit account, so monthly totals and maxima
/// are computed over distinct loan numbers only. The max-identity match
/// then runs over all detail rows: a tied month, or a max loan whose
/// client holds several accounts, emits several rows.
pub fn build_report(loans: &[LoanDetailRow]) -> Vec<ReportRow> {
    let mut months: BTreeMap<(i32, u32), MonthStats> = BTreeMap::new();
    let mut seen: HashSet<i32> = HashSet::new();

    for loan in loans {
        if !seen.insert(loan.loan_number) {
            continue;
        }
        let stats = months
            .entry((loan.date.year(), loan.date.month()))
            .or_default();
        stats.total += loan.amount;
        if stats.largest.is_none_or(|m| loan.amount > m) {
            stats.largest = Some(loan.amount);
        }
    }

    let mut rows = Vec::new();
    for ((year, month), stats) in &months {
        let Some(largest) = stats.largest else {
            continue;
        };
        for loan in loans {
            if loan.date.year() != *year || loan.date.month() != *month {
                continue;
            }
            if loan.amount == largest {
                rows.push(ReportRow {
                    year: *year,
                    month: *month,
                    month_name: MONTH_NAMES[(*month - 1) as usize],
                    total: stats.total,
                    largest,
                    loan_number: loan.loan_number,
                    client: loan.client.clone(),
                    account: loan.account.clone(),
                });
            }
        }
    }

    rows
}

/// Format a monetary amount with thousands separators and two decimals
pub fn format_money(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let text = format!("{rounded:.2}");
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}.{frac_part}")
}
