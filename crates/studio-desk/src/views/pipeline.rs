use serde::{Deserialize, Serialize};

use crate::model::{LeadStatus, SalesLead};

/// One column of the sales board.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineColumn {
    pub status: LeadStatus,
    pub label: &'static str,
    pub count: usize,
    pub estimated_value_cents: i64,
    pub leads: Vec<SalesLead>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineBoard {
    pub columns: Vec<PipelineColumn>,
    pub open_leads: usize,
    pub open_value_cents: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadFilter {
    #[serde(default)]
    pub status: Option<LeadStatus>,
    #[serde(default)]
    pub search: Option<String>,
}

impl LeadFilter {
    pub fn matches(&self, lead: &SalesLead) -> bool {
        if let Some(status) = self.status {
            if lead.status != status {
                return false;
            }
        }

        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                [
                    Some(lead.company_name.as_str()),
                    lead.contact_name.as_deref(),
                    lead.email.as_deref(),
                    lead.city.as_deref(),
                ]
                .into_iter()
                .flatten()
                .any(|value| value.to_lowercase().contains(&term))
            }
            _ => true,
        }
    }

    pub fn apply(&self, leads: &[SalesLead]) -> Vec<SalesLead> {
        leads.iter().filter(|lead| self.matches(lead)).cloned().collect()
    }
}

/// Groups leads into the five stages, in pipeline order.
pub fn pipeline_board(leads: &[SalesLead]) -> PipelineBoard {
    let columns: Vec<PipelineColumn> = LeadStatus::PIPELINE
        .iter()
        .map(|status| {
            let leads: Vec<SalesLead> = leads
                .iter()
                .filter(|lead| lead.status == *status)
                .cloned()
                .collect();
            PipelineColumn {
                status: *status,
                label: status.label(),
                count: leads.len(),
                estimated_value_cents: leads
                    .iter()
                    .filter_map(|lead| lead.estimated_value_cents)
                    .sum(),
                leads,
            }
        })
        .collect();

    let open: Vec<&PipelineColumn> = columns
        .iter()
        .filter(|column| column.status.is_open())
        .collect();

    PipelineBoard {
        open_leads: open.iter().map(|column| column.count).sum(),
        open_value_cents: open.iter().map(|column| column.estimated_value_cents).sum(),
        columns,
    }
}
