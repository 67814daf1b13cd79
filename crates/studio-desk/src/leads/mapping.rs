use super::normalizer::normalize_header;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Lead attribute a spreadsheet column can feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum LeadField {
    CompanyName,
    ContactName,
    FirstName,
    LastName,
    Email,
    Phone,
    Website,
    City,
    Country,
    Industry,
    JobTitle,
    LinkedinUrl,
    Status,
    Source,
    Notes,
}

static HEADER_MAP: OnceLock<HashMap<String, LeadField>> = OnceLock::new();

pub(crate) fn field_for_header(normalized_header: &str) -> Option<LeadField> {
    header_map().get(normalized_header).copied()
}

fn header_map() -> &'static HashMap<String, LeadField> {
    HEADER_MAP.get_or_init(|| {
        use LeadField::*;

        const HEADER_TO_FIELD: &[(&str, LeadField)] = &[
            // Company
            ("Company", CompanyName),
            ("Company Name", CompanyName),
            ("CompanyName", CompanyName),
            ("company_name", CompanyName),
            ("Company Name For Emails", CompanyName),
            ("Bedrijf", CompanyName),
            ("Bedrijfsnaam", CompanyName),
            ("Organisatie", CompanyName),
            ("Organisation", CompanyName),
            ("Organization", CompanyName),
            ("Studio", CompanyName),
            ("Studio Name", CompanyName),
            ("Studionaam", CompanyName),
            // Contact person
            ("Contact", ContactName),
            ("Contact Name", ContactName),
            ("contact_name", ContactName),
            ("Contactpersoon", ContactName),
            ("Naam", ContactName),
            ("Name", ContactName),
            ("Full Name", ContactName),
            ("First Name", FirstName),
            ("first_name", FirstName),
            ("Voornaam", FirstName),
            ("Last Name", LastName),
            ("last_name", LastName),
            ("Achternaam", LastName),
            // Reachability
            ("Email", Email),
            ("E-mail", Email),
            ("Email Address", Email),
            ("E-mailadres", Email),
            ("Emailadres", Email),
            ("Mail", Email),
            ("Phone", Phone),
            ("Phone Number", Phone),
            ("Telefoon", Phone),
            ("Telefoonnummer", Phone),
            ("Tel", Phone),
            ("Mobile Phone", Phone),
            ("Mobiel", Phone),
            ("Work Direct Phone", Phone),
            ("Corporate Phone", Phone),
            ("Company Phone", Phone),
            ("Website", Website),
            ("URL", Website),
            ("Site", Website),
            ("Webadres", Website),
            ("Web", Website),
            ("LinkedIn", LinkedinUrl),
            ("LinkedIn URL", LinkedinUrl),
            ("Person Linkedin Url", LinkedinUrl),
            // Location and profile
            ("City", City),
            ("Stad", City),
            ("Plaats", City),
            ("Woonplaats", City),
            ("Company City", City),
            ("Country", Country),
            ("Land", Country),
            ("Company Country", Country),
            ("Industry", Industry),
            ("Branche", Industry),
            ("Sector", Industry),
            ("Title", JobTitle),
            ("Job Title", JobTitle),
            ("Functie", JobTitle),
            // Pipeline bookkeeping
            ("Status", Status),
            ("Stage", Status),
            ("Fase", Status),
            ("Source", Source),
            ("Bron", Source),
            ("Lead Source", Source),
            ("Notes", Notes),
            ("Note", Notes),
            ("Notities", Notes),
            ("Opmerkingen", Notes),
        ];

        let mut map = HashMap::with_capacity(HEADER_TO_FIELD.len());
        for (header, field) in HEADER_TO_FIELD {
            map.insert(normalize_header(header), *field);
        }
        map
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(header: &str) -> Option<LeadField> {
        field_for_header(&normalize_header(header))
    }

    #[test]
    fn recognizes_english_dutch_and_apollo_headers() {
        assert_eq!(lookup("bedrijf"), Some(LeadField::CompanyName));
        assert_eq!(lookup("Company Name"), Some(LeadField::CompanyName));
        assert_eq!(lookup("Company Name For Emails"), Some(LeadField::CompanyName));
        assert_eq!(lookup(" E-mailadres "), Some(LeadField::Email));
        assert_eq!(lookup("Work Direct Phone"), Some(LeadField::Phone));
        assert_eq!(lookup("Voornaam"), Some(LeadField::FirstName));
        assert_eq!(lookup("Person Linkedin Url"), Some(LeadField::LinkedinUrl));
    }

    #[test]
    fn unknown_headers_are_not_mapped() {
        assert_eq!(lookup("Seniority"), None);
        assert_eq!(lookup(""), None);
    }
}
