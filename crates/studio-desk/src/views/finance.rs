use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::model::{Transaction, TransactionKind, TransactionStatus};

const SERIES_MONTHS: u32 = 12;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyFinance {
    /// `YYYY-MM`
    pub month: String,
    pub revenue_cents: i64,
    pub costs_cents: i64,
    pub net_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinanceOverview {
    pub revenue_cents: i64,
    pub commission_cents: i64,
    pub payouts_cents: i64,
    pub refunds_cents: i64,
    pub expenses_cents: i64,
    /// Revenue minus payouts, refunds and expenses.
    pub net_cents: i64,
    /// Booking payments not yet received.
    pub outstanding_cents: i64,
    pub failed_count: usize,
    pub monthly: Vec<MonthlyFinance>,
}

#[derive(Default)]
struct Totals {
    revenue: i64,
    commission: i64,
    payouts: i64,
    refunds: i64,
    expenses: i64,
}

impl Totals {
    fn add(&mut self, transaction: &Transaction) {
        let amount = transaction.amount_cents;
        let total = match transaction.kind {
            TransactionKind::BookingPayment => &mut self.revenue,
            TransactionKind::Commission => &mut self.commission,
            TransactionKind::Payout => &mut self.payouts,
            TransactionKind::Refund => &mut self.refunds,
            TransactionKind::Expense => &mut self.expenses,
        };
        *total = total.saturating_add(amount);
    }

    fn costs(&self) -> i64 {
        self.payouts
            .saturating_add(self.refunds)
            .saturating_add(self.expenses)
    }

    fn net(&self) -> i64 {
        self.revenue.saturating_sub(self.costs())
    }
}

/// Ledger totals over paid transactions plus a twelve-month series ending
/// with the month of `today`.
pub fn finance_overview(transactions: &[Transaction], today: NaiveDate) -> FinanceOverview {
    let mut totals = Totals::default();
    let mut outstanding: i64 = 0;
    let mut failed_count = 0;

    let months = trailing_months(today, SERIES_MONTHS);
    let mut monthly: Vec<Totals> = months.iter().map(|_| Totals::default()).collect();

    for transaction in transactions {
        match transaction.status {
            TransactionStatus::Paid => {
                totals.add(transaction);
                let key = (transaction.occurred_on.year(), transaction.occurred_on.month());
                if let Some(index) = months.iter().position(|month| *month == key) {
                    monthly[index].add(transaction);
                }
            }
            TransactionStatus::Pending => {
                if transaction.kind == TransactionKind::BookingPayment {
                    outstanding = transaction.amount_cents.saturating_add(outstanding);
                }
            }
            TransactionStatus::Failed => failed_count += 1,
        }
    }

    FinanceOverview {
        revenue_cents: totals.revenue,
        commission_cents: totals.commission,
        payouts_cents: totals.payouts,
        refunds_cents: totals.refunds,
        expenses_cents: totals.expenses,
        net_cents: totals.net(),
        outstanding_cents: outstanding,
        failed_count,
        monthly: months
            .iter()
            .zip(monthly.iter())
            .map(|((year, month), totals)| MonthlyFinance {
                month: format!("{year:04}-{month:02}"),
                revenue_cents: totals.revenue,
                costs_cents: totals.costs(),
                net_cents: totals.net(),
            })
            .collect(),
    }
}

/// `(year, month)` pairs, oldest first, ending with the month of `today`.
fn trailing_months(today: NaiveDate, count: u32) -> Vec<(i32, u32)> {
    let mut year = today.year();
    let mut month = today.month();
    let mut months = Vec::with_capacity(count as usize);
    for _ in 0..count {
        months.push((year, month));
        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
    }
    months.reverse();
    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Record, RecordId, TransactionDraft};
    use chrono::Utc;

    fn transaction(
        kind: TransactionKind,
        amount_cents: i64,
        occurred_on: NaiveDate,
        status: TransactionStatus,
    ) -> Transaction {
        Transaction::from_draft(
            RecordId::generate(),
            Utc::now(),
            TransactionDraft {
                kind,
                amount_cents,
                description: None,
                booking_id: None,
                partner_id: None,
                occurred_on,
                status,
            },
        )
    }

    fn paid(kind: TransactionKind, amount_cents: i64, occurred_on: NaiveDate) -> Transaction {
        transaction(kind, amount_cents, occurred_on, TransactionStatus::Paid)
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn totals_only_count_paid_transactions() {
        let today = date(2026, 10, 18);
        let ledger = vec![
            paid(TransactionKind::BookingPayment, 100_000, date(2026, 10, 2)),
            paid(TransactionKind::BookingPayment, 40_000, date(2026, 9, 12)),
            transaction(
                TransactionKind::BookingPayment,
                25_000,
                date(2026, 10, 10),
                TransactionStatus::Pending,
            ),
            paid(TransactionKind::Payout, 60_000, date(2026, 10, 5)),
            paid(TransactionKind::Commission, 15_000, date(2026, 10, 5)),
            paid(TransactionKind::Refund, 5_000, date(2026, 9, 20)),
            transaction(
                TransactionKind::Expense,
                7_500,
                date(2026, 10, 1),
                TransactionStatus::Failed,
            ),
        ];

        let overview = finance_overview(&ledger, today);
        assert_eq!(overview.revenue_cents, 140_000);
        assert_eq!(overview.commission_cents, 15_000);
        assert_eq!(overview.payouts_cents, 60_000);
        assert_eq!(overview.refunds_cents, 5_000);
        assert_eq!(overview.expenses_cents, 0);
        assert_eq!(overview.net_cents, 75_000);
        assert_eq!(overview.outstanding_cents, 25_000);
        assert_eq!(overview.failed_count, 1);

        let october = overview.monthly.last().unwrap();
        assert_eq!(october.month, "2026-10");
        assert_eq!(october.revenue_cents, 100_000);
        assert_eq!(october.net_cents, 40_000);
        let september = &overview.monthly[overview.monthly.len() - 2];
        assert_eq!(september.costs_cents, 5_000);
    }

    #[test]
    fn series_covers_twelve_months_across_year_boundary() {
        let overview = finance_overview(&[], date(2026, 2, 1));
        let months: Vec<_> = overview.monthly.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months.len(), 12);
        assert_eq!(months.first(), Some(&"2025-03"));
        assert_eq!(months.last(), Some(&"2026-02"));
    }

    #[test]
    fn transactions_outside_window_count_in_totals_only() {
        let ledger = vec![paid(
            TransactionKind::BookingPayment,
            10_000,
            date(2024, 1, 1),
        )];
        let overview = finance_overview(&ledger, date(2026, 10, 18));
        assert_eq!(overview.revenue_cents, 10_000);
        assert!(overview.monthly.iter().all(|month| month.revenue_cents == 0));
    }

    #[test]
    fn oversized_amounts_saturate_instead_of_overflowing() {
        let today = date(2026, 10, 18);
        let ledger = vec![
            paid(TransactionKind::BookingPayment, i64::MAX, date(2026, 10, 1)),
            paid(TransactionKind::BookingPayment, i64::MAX, date(2026, 10, 2)),
            paid(TransactionKind::Expense, i64::MAX, date(2026, 10, 3)),
            paid(TransactionKind::Refund, i64::MAX, date(2026, 10, 4)),
        ];

        let overview = finance_overview(&ledger, today);
        assert_eq!(overview.revenue_cents, i64::MAX);
        assert_eq!(overview.net_cents, 0);
        assert_eq!(overview.monthly.last().unwrap().revenue_cents, i64::MAX);
    }
}
