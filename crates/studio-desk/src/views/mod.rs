//! Read models behind the workspace screens.
//!
//! Every function here is pure over rows already loaded from the backend,
//! except [`dashboard_overview`], which fans out over several tables.

mod calendar;
mod dashboard;
mod directory;
mod finance;
mod format;
mod marketing;
mod pipeline;

pub use calendar::{day_agenda, month_grid, CalendarDay, CalendarOptions, MonthGrid};
pub use dashboard::{dashboard_overview, or_empty, DashboardOverview};
pub use directory::{
    customer_page, CustomerQuery, DocumentFilter, Page, PartnerFilter, DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE,
};
pub use finance::{finance_overview, FinanceOverview, MonthlyFinance};
pub use format::{format_cents, format_date, format_time_range};
pub use marketing::{schedule_window, MarketingSchedule, ScheduleDay, MAX_WINDOW_DAYS};
pub use pipeline::{pipeline_board, LeadFilter, PipelineBoard, PipelineColumn};
