use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use studio_desk::backend::Backend;
use studio_desk::config::AppConfig;
use studio_desk::error::AppError;
use studio_desk::leads::{ImportPreview, LeadCsvImporter};
use studio_desk::model::Settings;
use studio_desk::telemetry;
use studio_desk::views::{finance_overview, format_cents, format_date, FinanceOverview};
use tracing::warn;

const PREVIEW_ROWS: usize = 10;

#[derive(Args, Debug)]
pub(crate) struct LeadImportArgs {
    /// CSV export (Apollo, CRM or a hand-made sheet)
    pub(crate) file: PathBuf,
    /// Show what would be imported without storing anything
    #[arg(long)]
    pub(crate) dry_run: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct FinanceOverviewArgs {
    /// Reporting date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

fn load_config() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, config.environment)?;
    Ok(config)
}

fn connect(config: &AppConfig) -> Result<Backend, AppError> {
    if !config.backend.is_hosted() {
        warn!("BACKEND_URL is not set; using a temporary in-memory store");
    }
    Ok(Backend::from_config(&config.backend)?)
}

pub(crate) async fn run_lead_import(args: LeadImportArgs) -> Result<(), AppError> {
    let LeadImportArgs { file, dry_run } = args;
    let config = load_config()?;

    let preview = LeadCsvImporter::preview_path(&file)?;
    render_preview(&preview);

    if dry_run {
        println!("\nDry run: nothing was stored.");
        return Ok(());
    }

    let backend = connect(&config)?;
    let outcome = LeadCsvImporter::commit(&backend.leads, preview).await?;
    println!(
        "\nImported {} leads ({} failed, {} rows skipped without a company name).",
        outcome.imported, outcome.failed, outcome.skipped_rows
    );
    Ok(())
}

fn render_preview(preview: &ImportPreview) {
    println!(
        "{}: {} leads ready, {} rows skipped",
        preview.file_name,
        preview.leads.len(),
        preview.skipped_rows
    );
    if !preview.unmapped_headers.is_empty() {
        println!("Ignored columns: {}", preview.unmapped_headers.join(", "));
    }

    println!("\n{:<32} {:<24} {:<32} {:<8}", "Company", "Contact", "Email", "Status");
    for lead in preview.leads.iter().take(PREVIEW_ROWS) {
        println!(
            "{:<32} {:<24} {:<32} {:<8}",
            truncate(&lead.company_name, 32),
            truncate(lead.contact_name.as_deref().unwrap_or("-"), 24),
            truncate(lead.email.as_deref().unwrap_or("-"), 32),
            lead.status.label()
        );
    }
    if preview.leads.len() > PREVIEW_ROWS {
        println!("... and {} more", preview.leads.len() - PREVIEW_ROWS);
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

pub(crate) async fn run_finance_overview(args: FinanceOverviewArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let config = load_config()?;
    let backend = connect(&config)?;

    let transactions = backend.transactions.list().await?;
    let currency = match backend.settings.load().await {
        Ok(settings) => settings.currency,
        Err(error) => {
            warn!(error = %error, "settings unavailable, using default currency");
            Settings::defaults(chrono::Utc::now()).currency
        }
    };

    let overview = finance_overview(&transactions, today);
    render_finance(&overview, &currency, today);
    Ok(())
}

fn render_finance(overview: &FinanceOverview, currency: &str, today: NaiveDate) {
    println!("Finance overview as of {}", format_date(today));
    let rows = [
        ("Revenue", overview.revenue_cents),
        ("Commission", overview.commission_cents),
        ("Payouts", overview.payouts_cents),
        ("Refunds", overview.refunds_cents),
        ("Expenses", overview.expenses_cents),
        ("Net result", overview.net_cents),
        ("Outstanding", overview.outstanding_cents),
    ];
    for (label, cents) in rows {
        println!("- {:<12} {:>16}", label, format_cents(cents, currency));
    }
    if overview.failed_count > 0 {
        println!("- {} failed transactions need attention", overview.failed_count);
    }

    println!("\n{:<8} {:>16} {:>16} {:>16}", "Month", "Revenue", "Costs", "Net");
    for month in &overview.monthly {
        println!(
            "{:<8} {:>16} {:>16} {:>16}",
            month.month,
            format_cents(month.revenue_cents, currency),
            format_cents(month.costs_cents, currency),
            format_cents(month.net_cents, currency)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_marks_cut_values() {
        assert_eq!(truncate("Studio Noord", 32), "Studio Noord");
        assert_eq!(truncate("Klankkast Producties", 10), "Klankkast…");
    }

    #[tokio::test]
    async fn dry_run_installs_logging_before_reading_the_file() {
        let file = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../crates/studio-desk/tests/fixtures/apollo_leads.csv");

        run_lead_import(LeadImportArgs {
            file,
            dry_run: true,
        })
        .await
        .expect("dry run succeeds");

        assert!(tracing::dispatcher::has_been_set());
    }
}
