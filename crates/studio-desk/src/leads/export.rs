use std::io::Write;

use crate::model::SalesLead;

const EXPORT_HEADERS: [&str; 13] = [
    "Company Name",
    "Contact Name",
    "Email",
    "Phone",
    "Website",
    "City",
    "Country",
    "Industry",
    "Job Title",
    "LinkedIn URL",
    "Status",
    "Source",
    "Notes",
];

/// Writes leads with headers the importer recognizes.
pub fn write_leads_csv<W: Write>(writer: W, leads: &[SalesLead]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(EXPORT_HEADERS)?;

    for lead in leads {
        let optional = |value: &Option<String>| value.clone().unwrap_or_default();
        csv_writer.write_record([
            lead.company_name.clone(),
            optional(&lead.contact_name),
            optional(&lead.email),
            optional(&lead.phone),
            optional(&lead.website),
            optional(&lead.city),
            optional(&lead.country),
            optional(&lead.industry),
            optional(&lead.job_title),
            optional(&lead.linkedin_url),
            lead.status.label().to_string(),
            optional(&lead.source),
            optional(&lead.notes),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
