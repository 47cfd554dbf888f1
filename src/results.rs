//! Result display model and filtering
//!
//! Raw hits become [`ResultItem`]s in response order. `rank` is the 1-based
//! position in that order. When the backend leaves out `docType` or `date`,
//! [`enrich`] fills them from the position so the filters have something to
//! offer; this is placeholder data, not backend semantics.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::api::RawResult;

pub const DEFAULT_DISPLAY_URL: &str = "#";

/// One displayed search hit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    pub title: String,
    pub snippet: String,
    pub display_url: String,
    pub rank: usize,
    pub score: Option<f64>,
    pub doc_type: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,
}

impl ResultItem {
    /// Score rendered with three decimals, or `-` when absent
    pub fn score_label(&self) -> String {
        match self.score {
            Some(score) => format!("{:.3}", score),
            None => "-".to_string(),
        }
    }

    pub fn field(&self, kind: FilterKind) -> String {
        match kind {
            FilterKind::Rank => self.rank.to_string(),
            FilterKind::DocType => self.doc_type.clone(),
            FilterKind::Date => self.date.clone(),
        }
    }
}

// ============================================================================
// Presentation Enrichment
// ============================================================================

/// Document type used when the backend does not send one
pub fn placeholder_doc_type(index: usize) -> &'static str {
    if index % 2 == 0 {
        "report"
    } else {
        "note"
    }
}

/// Date used when the backend does not send one
pub fn placeholder_date(index: usize) -> String {
    let month = (index % 3) as u32 + 1;
    let day = (index % 7) as u32 + 1;
    NaiveDate::from_ymd_opt(2024, month, day)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Turn the raw hit at `index` (0-based response position) into a display item
pub fn enrich(raw: RawResult, index: usize) -> ResultItem {
    let doc_type = raw
        .doc_type
        .unwrap_or_else(|| placeholder_doc_type(index).to_string());
    let date = raw.date.unwrap_or_else(|| placeholder_date(index));
    let display_url = raw
        .url
        .unwrap_or_else(|| DEFAULT_DISPLAY_URL.to_string());

    ResultItem {
        title: raw.title,
        snippet: raw.snippet,
        display_url,
        rank: index + 1,
        score: raw.score,
        doc_type,
        date,
        doc_id: raw.doc_id,
    }
}

pub fn enrich_all(raw: Vec<RawResult>) -> Vec<ResultItem> {
    raw.into_iter()
        .enumerate()
        .map(|(index, hit)| enrich(hit, index))
        .collect()
}

// ============================================================================
// Filters
// ============================================================================

/// Which metadata field a filter applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Rank,
    DocType,
    Date,
}

impl FilterKind {
    pub const ALL: [FilterKind; 3] = [FilterKind::Rank, FilterKind::DocType, FilterKind::Date];

    pub fn label(&self) -> &'static str {
        match self {
            FilterKind::Rank => "Rank",
            FilterKind::DocType => "Type",
            FilterKind::Date => "Date",
        }
    }
}

/// Either "all" or one observed value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterSelector {
    #[default]
    All,
    Value(String),
}

impl FilterSelector {
    pub fn value(value: impl Into<String>) -> Self {
        FilterSelector::Value(value.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, FilterSelector::All)
    }

    pub fn matches(&self, field: &str) -> bool {
        match self {
            FilterSelector::All => true,
            FilterSelector::Value(value) => value == field,
        }
    }
}

impl fmt::Display for FilterSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterSelector::All => write!(f, "All"),
            FilterSelector::Value(value) => write!(f, "{}", value),
        }
    }
}

/// The three independent filter selectors
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultFilters {
    pub rank: FilterSelector,
    pub doc_type: FilterSelector,
    pub date: FilterSelector,
}

impl ResultFilters {
    pub fn get(&self, kind: FilterKind) -> &FilterSelector {
        match kind {
            FilterKind::Rank => &self.rank,
            FilterKind::DocType => &self.doc_type,
            FilterKind::Date => &self.date,
        }
    }

    pub fn set(&mut self, kind: FilterKind, selector: FilterSelector) {
        match kind {
            FilterKind::Rank => self.rank = selector,
            FilterKind::DocType => self.doc_type = selector,
            FilterKind::Date => self.date = selector,
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.rank.is_all() && self.doc_type.is_all() && self.date.is_all()
    }

    pub fn matches(&self, item: &ResultItem) -> bool {
        FilterKind::ALL
            .iter()
            .all(|&kind| self.get(kind).matches(&item.field(kind)))
    }
}

/// Apply rank, then type, then date
pub fn filter_results<'a>(items: &'a [ResultItem], filters: &ResultFilters) -> Vec<&'a ResultItem> {
    let mut view: Vec<&ResultItem> = items.iter().collect();
    for kind in FilterKind::ALL {
        let selector = filters.get(kind);
        if !selector.is_all() {
            view.retain(|item| selector.matches(&item.field(kind)));
        }
    }
    view
}

/// Leading "all" plus the distinct values of `kind`, in order of first appearance
pub fn filter_options(items: &[ResultItem], kind: FilterKind) -> Vec<FilterSelector> {
    let mut options = vec![FilterSelector::All];
    for item in items {
        let candidate = FilterSelector::Value(item.field(kind));
        if !options.contains(&candidate) {
            options.push(candidate);
        }
    }
    options
}
