use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;
use tracing::warn;

use crate::backend::{Backend, BackendError};
use crate::model::{
    Booking, BookingStatus, MarketingPost, Partner, PartnerStatus, PostStatus, SalesLead,
    Transaction, TransactionKind, TransactionStatus,
};

const UPCOMING_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardOverview {
    pub bookings_today: usize,
    pub upcoming_bookings: usize,
    pub active_partners: usize,
    pub open_leads: usize,
    pub scheduled_posts: usize,
    pub revenue_this_month_cents: i64,
}

/// Rows for a panel, or an empty list when the table could not be loaded.
pub fn or_empty<T>(result: Result<Vec<T>, BackendError>, panel: &'static str) -> Vec<T> {
    result.unwrap_or_else(|error| {
        warn!(panel, error = %error, "dashboard panel falling back to empty data");
        Vec::new()
    })
}

/// Loads every table the dashboard needs concurrently and summarizes them.
pub async fn dashboard_overview(
    backend: &Backend,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> DashboardOverview {
    let (bookings, partners, leads, posts, transactions) = tokio::join!(
        backend.bookings.list(),
        backend.partners.list(),
        backend.leads.list(),
        backend.marketing_posts.list(),
        backend.transactions.list(),
    );

    summarize(
        &or_empty(bookings, "bookings"),
        &or_empty(partners, "partners"),
        &or_empty(leads, "leads"),
        &or_empty(posts, "marketing"),
        &or_empty(transactions, "finance"),
        today,
        now,
    )
}

fn summarize(
    bookings: &[Booking],
    partners: &[Partner],
    leads: &[SalesLead],
    posts: &[MarketingPost],
    transactions: &[Transaction],
    today: NaiveDate,
    now: DateTime<Utc>,
) -> DashboardOverview {
    let active_bookings = || {
        bookings
            .iter()
            .filter(|booking| booking.status != BookingStatus::Cancelled)
    };
    let horizon = now + Duration::days(UPCOMING_DAYS);

    DashboardOverview {
        bookings_today: active_bookings()
            .filter(|booking| booking.touches(today))
            .count(),
        upcoming_bookings: active_bookings()
            .filter(|booking| booking.starts_at >= now && booking.starts_at < horizon)
            .count(),
        active_partners: partners
            .iter()
            .filter(|partner| partner.status == PartnerStatus::Active)
            .count(),
        open_leads: leads.iter().filter(|lead| lead.status.is_open()).count(),
        scheduled_posts: posts
            .iter()
            .filter(|post| post.status == PostStatus::Scheduled)
            .filter(|post| post.scheduled_for.map_or(false, |slot| slot >= now))
            .count(),
        revenue_this_month_cents: transactions
            .iter()
            .filter(|transaction| {
                transaction.status == TransactionStatus::Paid
                    && transaction.kind == TransactionKind::BookingPayment
                    && transaction.occurred_on.year() == today.year()
                    && transaction.occurred_on.month() == today.month()
            })
            .fold(0_i64, |total, transaction| {
                total.saturating_add(transaction.amount_cents)
            }),
    }
}
