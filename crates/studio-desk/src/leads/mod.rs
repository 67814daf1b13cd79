//! Spreadsheet import and export for the sales pipeline.
//!
//! An import runs in two steps. [`LeadCsvImporter::preview`] turns the
//! uploaded text into lead drafts the user can review, and
//! [`LeadCsvImporter::commit`] stores them with one bulk insert. Importing
//! the same file twice stores the rows twice; nothing is deduplicated.

mod export;
mod mapping;
mod normalizer;
mod parser;

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::backend::{Collection, CollectionError};
use crate::model::{LeadStatus, SalesLead, SalesLeadDraft};

pub use export::write_leads_csv;
use mapping::{field_for_header, LeadField};
use normalizer::normalize_header;
use parser::CsvSheet;

/// Source recorded on leads that arrive through a spreadsheet.
pub const IMPORT_SOURCE: &str = "csv_import";

#[derive(Debug, thiserror::Error)]
pub enum LeadImportError {
    #[error("'{0}' is not a CSV file")]
    UnsupportedFile(String),
    #[error("failed to read lead spreadsheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("no rows with a company name were found")]
    NoValidRows,
    #[error("bulk insert of {rows} leads failed: {source}")]
    Insert {
        rows: usize,
        #[source]
        source: CollectionError,
    },
}

impl LeadImportError {
    /// Message suitable for showing in the upload dialog.
    pub fn user_message(&self) -> &'static str {
        match self {
            LeadImportError::UnsupportedFile(_) => "Please upload a .csv file.",
            LeadImportError::Io(_) | LeadImportError::Csv(_) | LeadImportError::NoValidRows => {
                "No valid leads found in this file. Make sure it has a company name column."
            }
            LeadImportError::Insert { .. } => "Importing the leads failed. Please try again.",
        }
    }
}

/// Parsed spreadsheet awaiting confirmation.
#[derive(Debug, Clone, Serialize)]
pub struct ImportPreview {
    pub file_name: String,
    pub leads: Vec<SalesLeadDraft>,
    /// Data rows dropped because no company name could be mapped.
    pub skipped_rows: usize,
    pub unmapped_headers: Vec<String>,
}

/// Result of the bulk insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    pub imported: usize,
    pub failed: usize,
    pub skipped_rows: usize,
}

pub struct LeadCsvImporter;

impl LeadCsvImporter {
    pub fn preview(file_name: &str, content: &str) -> Result<ImportPreview, LeadImportError> {
        Self::preview_reader(file_name, content.as_bytes())
    }

    pub fn preview_path<P: AsRef<Path>>(path: P) -> Result<ImportPreview, LeadImportError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        ensure_csv_name(&file_name)?;
        let file = std::fs::File::open(path)?;
        Self::preview_reader(&file_name, file)
    }

    pub fn preview_reader<R: Read>(
        file_name: &str,
        reader: R,
    ) -> Result<ImportPreview, LeadImportError> {
        ensure_csv_name(file_name)?;
        let sheet = parser::read_sheet(reader)?;
        let preview = build_preview(file_name, sheet);

        if preview.leads.is_empty() {
            warn!(file_name, skipped = preview.skipped_rows, "lead import produced no rows");
            return Err(LeadImportError::NoValidRows);
        }

        info!(
            file_name,
            leads = preview.leads.len(),
            skipped = preview.skipped_rows,
            "parsed lead spreadsheet"
        );
        Ok(preview)
    }

    /// Stores every previewed lead with a single bulk insert.
    pub async fn commit(
        leads: &Collection<SalesLead>,
        preview: ImportPreview,
    ) -> Result<ImportOutcome, LeadImportError> {
        let rows = preview.leads.len();
        let skipped_rows = preview.skipped_rows;

        match leads.create_many(preview.leads).await {
            Ok(stored) => {
                info!(file_name = %preview.file_name, imported = stored.len(), "lead import stored");
                Ok(ImportOutcome {
                    imported: stored.len(),
                    failed: rows - stored.len().min(rows),
                    skipped_rows,
                })
            }
            Err(source) => {
                warn!(file_name = %preview.file_name, error = %source, "lead import failed");
                Err(LeadImportError::Insert { rows, source })
            }
        }
    }
}

fn ensure_csv_name(file_name: &str) -> Result<(), LeadImportError> {
    if file_name.trim().to_ascii_lowercase().ends_with(".csv") {
        Ok(())
    } else {
        Err(LeadImportError::UnsupportedFile(file_name.to_string()))
    }
}

fn build_preview(file_name: &str, sheet: CsvSheet) -> ImportPreview {
    let mut columns: Vec<(usize, LeadField)> = Vec::new();
    let mut unmapped_headers = Vec::new();

    for (index, header) in sheet.headers.iter().enumerate() {
        match field_for_header(&normalize_header(header)) {
            Some(field) => columns.push((index, field)),
            None if header.trim().is_empty() => {}
            None => unmapped_headers.push(header.trim().to_string()),
        }
    }

    let mut leads = Vec::with_capacity(sheet.rows.len());
    let mut skipped_rows = 0;

    for row in &sheet.rows {
        match lead_from_row(&columns, row) {
            Some(lead) => leads.push(lead),
            None => skipped_rows += 1,
        }
    }

    ImportPreview {
        file_name: file_name.to_string(),
        leads,
        skipped_rows,
        unmapped_headers,
    }
}

fn lead_from_row(columns: &[(usize, LeadField)], row: &[String]) -> Option<SalesLeadDraft> {
    let mut values: HashMap<LeadField, &str> = HashMap::new();
    for (index, field) in columns {
        let value = row.get(*index).map(|raw| raw.trim()).unwrap_or_default();
        if !value.is_empty() {
            values.entry(*field).or_insert(value);
        }
    }

    let company_name = values.get(&LeadField::CompanyName)?.to_string();
    let text = |field: LeadField| values.get(&field).map(|value| value.to_string());

    // combined first/last name takes precedence over a separate contact column
    let full_name = [LeadField::FirstName, LeadField::LastName]
        .iter()
        .filter_map(|field| values.get(field).copied())
        .collect::<Vec<_>>()
        .join(" ");
    let contact_name = if full_name.is_empty() {
        text(LeadField::ContactName)
    } else {
        Some(full_name)
    };

    let status = values
        .get(&LeadField::Status)
        .and_then(|value| LeadStatus::parse_loose(value))
        .unwrap_or_default();

    Some(SalesLeadDraft {
        company_name,
        contact_name,
        email: text(LeadField::Email),
        phone: text(LeadField::Phone),
        website: text(LeadField::Website),
        city: text(LeadField::City),
        country: text(LeadField::Country),
        industry: text(LeadField::Industry),
        job_title: text(LeadField::JobTitle),
        linkedin_url: text(LeadField::LinkedinUrl),
        status,
        source: text(LeadField::Source).or_else(|| Some(IMPORT_SOURCE.to_string())),
        notes: text(LeadField::Notes),
        estimated_value_cents: None,
    })
}
