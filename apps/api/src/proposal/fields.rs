//! The grant request as entered by the user, plus the fallbacks used when
//! optional fields are left blank.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Every placeholder name a prompt template may use, in form order.
pub const FIELD_KEYS: &[&str] = &[
    "funder_name",
    "program_name",
    "amount_requested",
    "deadline",
    "project_name",
    "project_dates",
    "org_name",
    "ein",
    "year_founded",
    "service_area",
    "populations",
    "annual_budget",
    "executive_director",
    "mission",
    "need_statement",
    "project_description",
    "goals_objectives",
    "timeline",
    "budget_narrative",
    "evaluation_plan",
    "sustainability",
    "funder_priorities",
    "organizational_capacity",
];

/// Fields that must be non-blank before a prompt is assembled.
pub const REQUIRED_FIELDS: &[&str] = &[
    "funder_name",
    "amount_requested",
    "project_name",
    "org_name",
    "mission",
    "need_statement",
    "project_description",
];

pub const DEFAULT_PROGRAM_NAME: &str = "General Support";
pub const DEFAULT_DEADLINE: &str = "Rolling";
pub const DEFAULT_PROJECT_DATES: &str = "TBD";
pub const DEFAULT_EIN: &str = "Available upon request";
pub const DEFAULT_FUNDER_PRIORITIES: &str = "mission alignment and impact";
pub const DEFAULT_ORGANIZATIONAL_CAPACITY: &str = "Strong track record of impact";

/// Structured grant request. Omitted fields deserialize as empty strings so
/// the same type accepts both JSON bodies and HTML form posts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSet {
    pub funder_name: String,
    pub program_name: String,
    pub amount_requested: String,
    pub deadline: String,
    pub project_name: String,
    pub project_dates: String,
    pub org_name: String,
    pub ein: String,
    pub year_founded: String,
    pub service_area: String,
    pub populations: String,
    pub annual_budget: String,
    pub executive_director: String,
    pub mission: String,
    pub need_statement: String,
    pub project_description: String,
    pub goals_objectives: String,
    pub timeline: String,
    pub budget_narrative: String,
    pub evaluation_plan: String,
    pub sustainability: String,
    pub funder_priorities: String,
    pub organizational_capacity: String,
}

/// Placeholder name -> substituted text. Always holds every key in `FIELD_KEYS`.
pub type TemplateValues = BTreeMap<&'static str, String>;

impl FieldSet {
    /// Names of required fields that are blank, in `REQUIRED_FIELDS` order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|name| self.raw(name).map_or(true, |v| v.trim().is_empty()))
            .collect()
    }

    /// Resolves every field to the text substituted into the prompt.
    pub fn template_values(&self) -> TemplateValues {
        FIELD_KEYS
            .iter()
            .map(|&name| {
                let raw = self.raw(name).unwrap_or_default();
                let value = match fallback_for(name) {
                    Some(fallback) if raw.trim().is_empty() => fallback.to_string(),
                    _ => raw.to_string(),
                };
                (name, value)
            })
            .collect()
    }

    /// Submitted value of a schema field; `None` for unknown names.
    pub fn raw(&self, name: &str) -> Option<&str> {
        let value = match name {
            "funder_name" => &self.funder_name,
            "program_name" => &self.program_name,
            "amount_requested" => &self.amount_requested,
            "deadline" => &self.deadline,
            "project_name" => &self.project_name,
            "project_dates" => &self.project_dates,
            "org_name" => &self.org_name,
            "ein" => &self.ein,
            "year_founded" => &self.year_founded,
            "service_area" => &self.service_area,
            "populations" => &self.populations,
            "annual_budget" => &self.annual_budget,
            "executive_director" => &self.executive_director,
            "mission" => &self.mission,
            "need_statement" => &self.need_statement,
            "project_description" => &self.project_description,
            "goals_objectives" => &self.goals_objectives,
            "timeline" => &self.timeline,
            "budget_narrative" => &self.budget_narrative,
            "evaluation_plan" => &self.evaluation_plan,
            "sustainability" => &self.sustainability,
            "funder_priorities" => &self.funder_priorities,
            "organizational_capacity" => &self.organizational_capacity,
            _ => return None,
        };
        Some(value.as_str())
    }
}

fn fallback_for(name: &str) -> Option<&'static str> {
    match name {
        "program_name" => Some(DEFAULT_PROGRAM_NAME),
        "deadline" => Some(DEFAULT_DEADLINE),
        "project_dates" => Some(DEFAULT_PROJECT_DATES),
        "ein" => Some(DEFAULT_EIN),
        "funder_priorities" => Some(DEFAULT_FUNDER_PRIORITIES),
        "organizational_capacity" => Some(DEFAULT_ORGANIZATIONAL_CAPACITY),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) fn complete_field_set() -> FieldSet {
    FieldSet {
        funder_name: "The Smith Family Foundation".to_string(),
        amount_requested: "$75,000".to_string(),
        project_name: "Youth STEM Afterschool Program".to_string(),
        org_name: "Bright Futures Nonprofit".to_string(),
        mission: "We open doors to science for every kid.".to_string(),
        need_statement: "Only 12% of local students reach STEM proficiency.".to_string(),
        project_description: "Three afternoons a week of hands-on labs.".to_string(),
        ..FieldSet::default()
    }
}
