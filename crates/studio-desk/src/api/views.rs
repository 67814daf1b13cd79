use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::API_PREFIX;
use crate::backend::Backend;
use crate::error::AppError;
use crate::model::{Booking, Customer, Document, Partner, Settings};
use crate::views::{
    customer_page, dashboard_overview, day_agenda, finance_overview, format_cents, month_grid,
    or_empty, pipeline_board, schedule_window, CalendarOptions, CustomerQuery, DashboardOverview,
    DocumentFilter, FinanceOverview, LeadFilter, MarketingSchedule, MonthGrid, Page,
    PartnerFilter, PipelineBoard,
};

const DEFAULT_SCHEDULE_DAYS: u32 = 14;

pub(crate) fn view_router(backend: Backend) -> Router {
    let view = |name: &str| format!("{API_PREFIX}/views/{name}");
    Router::new()
        .route(&view("calendar"), get(calendar_handler))
        .route(&view("agenda"), get(agenda_handler))
        .route(&view("pipeline"), get(pipeline_handler))
        .route(&view("finance"), get(finance_handler))
        .route(&view("marketing"), get(marketing_handler))
        .route(&view("customers"), get(customers_handler))
        .route(&view("partners"), get(partners_handler))
        .route(&view("documents"), get(documents_handler))
        .route(&view("dashboard"), get(dashboard_handler))
        .with_state(backend)
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CalendarQuery {
    year: Option<i32>,
    month: Option<u32>,
    #[serde(default)]
    include_cancelled: bool,
}

async fn calendar_handler(
    State(backend): State<Backend>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<MonthGrid>, AppError> {
    let today = today();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(today.month());
    let bookings: Vec<Booking> = or_empty(backend.bookings.list().await, "calendar");

    let options = CalendarOptions {
        include_cancelled: query.include_cancelled,
    };
    month_grid(year, month, &bookings, options)
        .map(Json)
        .ok_or_else(|| AppError::BadRequest(format!("{year}-{month:02} is not a valid month")))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AgendaQuery {
    date: Option<NaiveDate>,
    #[serde(default)]
    include_cancelled: bool,
}

async fn agenda_handler(
    State(backend): State<Backend>,
    Query(query): Query<AgendaQuery>,
) -> Json<Vec<Booking>> {
    let bookings = or_empty(backend.bookings.list().await, "agenda");
    let options = CalendarOptions {
        include_cancelled: query.include_cancelled,
    };
    Json(day_agenda(query.date.unwrap_or_else(today), &bookings, options))
}

async fn pipeline_handler(
    State(backend): State<Backend>,
    Query(filter): Query<LeadFilter>,
) -> Json<PipelineBoard> {
    let leads = or_empty(backend.leads.list().await, "pipeline");
    Json(pipeline_board(&filter.apply(&leads)))
}

/// Finance totals plus display strings in the workspace currency.
#[derive(Debug, Serialize)]
pub(crate) struct FinanceView {
    #[serde(flatten)]
    overview: FinanceOverview,
    currency: String,
    revenue: String,
    net: String,
    outstanding: String,
}

async fn finance_handler(State(backend): State<Backend>) -> Json<FinanceView> {
    let (transactions, settings) =
        tokio::join!(backend.transactions.list(), backend.settings.load());
    let transactions = or_empty(transactions, "finance");
    let currency = match settings {
        Ok(settings) => settings.currency,
        Err(error) => {
            warn!(error = %error, "settings unavailable, using default currency");
            Settings::defaults(Utc::now()).currency
        }
    };

    let overview = finance_overview(&transactions, today());
    Json(FinanceView {
        revenue: format_cents(overview.revenue_cents, &currency),
        net: format_cents(overview.net_cents, &currency),
        outstanding: format_cents(overview.outstanding_cents, &currency),
        currency,
        overview,
    })
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MarketingQuery {
    from: Option<NaiveDate>,
    days: Option<u32>,
}

async fn marketing_handler(
    State(backend): State<Backend>,
    Query(query): Query<MarketingQuery>,
) -> Json<MarketingSchedule> {
    let posts = or_empty(backend.marketing_posts.list().await, "marketing");
    Json(schedule_window(
        &posts,
        query.from.unwrap_or_else(today),
        query.days.unwrap_or(DEFAULT_SCHEDULE_DAYS),
    ))
}

async fn customers_handler(
    State(backend): State<Backend>,
    Query(query): Query<CustomerQuery>,
) -> Json<Page<Customer>> {
    let customers = or_empty(backend.customers.list().await, "customers");
    Json(customer_page(&customers, &query))
}

async fn partners_handler(
    State(backend): State<Backend>,
    Query(filter): Query<PartnerFilter>,
) -> Json<Vec<Partner>> {
    let partners = or_empty(backend.partners.list().await, "partners");
    Json(filter.apply(&partners))
}

async fn documents_handler(
    State(backend): State<Backend>,
    Query(filter): Query<DocumentFilter>,
) -> Json<Vec<Document>> {
    let documents = or_empty(backend.documents.list().await, "documents");
    Json(filter.apply(&documents))
}

async fn dashboard_handler(State(backend): State<Backend>) -> Json<DashboardOverview> {
    let now = Utc::now();
    Json(dashboard_overview(&backend, now.date_naive(), now).await)
}
