use serde::{Deserialize, Serialize};

use crate::model::{Customer, Document, DocumentCategory, Partner, PartnerStatus, RecordId};

pub const DEFAULT_PAGE_SIZE: usize = 25;
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub per_page: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

fn contains_term(values: &[Option<&str>], term: &str) -> bool {
    values
        .iter()
        .flatten()
        .any(|value| value.to_lowercase().contains(term))
}

fn search_term(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
}

/// Filters customers by name, email or company and returns one page.
pub fn customer_page(customers: &[Customer], query: &CustomerQuery) -> Page<Customer> {
    let term = search_term(query.search.as_deref());
    let matches: Vec<&Customer> = customers
        .iter()
        .filter(|customer| match &term {
            Some(term) => contains_term(
                &[
                    Some(customer.full_name.as_str()),
                    customer.email.as_deref(),
                    customer.company.as_deref(),
                ],
                term,
            ),
            None => true,
        })
        .collect();

    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let total = matches.len();
    let total_pages = total.div_ceil(per_page).max(1);
    let page = query.page.unwrap_or(1).clamp(1, total_pages);

    let items = matches
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .cloned()
        .collect();

    Page {
        items,
        page,
        per_page,
        total,
        total_pages,
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartnerFilter {
    #[serde(default)]
    pub status: Option<PartnerStatus>,
    #[serde(default)]
    pub search: Option<String>,
}

impl PartnerFilter {
    pub fn apply(&self, partners: &[Partner]) -> Vec<Partner> {
        let term = search_term(self.search.as_deref());
        partners
            .iter()
            .filter(|partner| self.status.map_or(true, |status| partner.status == status))
            .filter(|partner| match &term {
                Some(term) => contains_term(
                    &[
                        Some(partner.company_name.as_str()),
                        partner.contact_name.as_deref(),
                        partner.city.as_deref(),
                    ],
                    term,
                ),
                None => true,
            })
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentFilter {
    #[serde(default)]
    pub category: Option<DocumentCategory>,
    #[serde(default)]
    pub partner_id: Option<RecordId>,
}

impl DocumentFilter {
    pub fn apply(&self, documents: &[Document]) -> Vec<Document> {
        documents
            .iter()
            .filter(|document| self.category.map_or(true, |category| document.category == category))
            .filter(|document| {
                self.partner_id
                    .map_or(true, |partner| document.partner_id == Some(partner))
            })
            .cloned()
            .collect()
    }
}
