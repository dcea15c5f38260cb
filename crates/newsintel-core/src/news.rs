use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A single headline moving through the pipeline.
///
/// `story_id`, the entity sets and `impacted_stocks` start empty and are
/// filled in by the clustering, extraction and impact stages in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    /// `story_<n>`, 1-based. Only meaningful within one clustering run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_id: Option<String>,
    #[serde(default)]
    pub companies: BTreeSet<String>,
    #[serde(default)]
    pub sectors: BTreeSet<String>,
    #[serde(default)]
    pub regulators: BTreeSet<String>,
    #[serde(default)]
    pub impacted_stocks: Vec<StockImpact>,
}

impl NewsItem {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            story_id: None,
            companies: BTreeSet::new(),
            sectors: BTreeSet::new(),
            regulators: BTreeSet::new(),
            impacted_stocks: Vec::new(),
        }
    }

    /// Overwrite the entity columns.
    pub fn set_entities(&mut self, entities: EntitySet) {
        self.companies = entities.companies;
        self.sectors = entities.sectors;
        self.regulators = entities.regulators;
    }

    /// Borrowed view of the entity columns.
    #[must_use]
    pub fn entities(&self) -> EntitySetRef<'_> {
        EntitySetRef {
            companies: &self.companies,
            sectors: &self.sectors,
            regulators: &self.regulators,
        }
    }
}

/// Companies, sectors and regulators found in one piece of text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySet {
    pub companies: BTreeSet<String>,
    pub sectors: BTreeSet<String>,
    pub regulators: BTreeSet<String>,
}

impl EntitySet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty() && self.sectors.is_empty() && self.regulators.is_empty()
    }

    #[must_use]
    pub fn view(&self) -> EntitySetRef<'_> {
        EntitySetRef {
            companies: &self.companies,
            sectors: &self.sectors,
            regulators: &self.regulators,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EntitySetRef<'a> {
    pub companies: &'a BTreeSet<String>,
    pub sectors: &'a BTreeSet<String>,
    pub regulators: &'a BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactType {
    Direct,
    Sector,
    Regulatory,
}

impl ImpactType {
    /// Confidence attached to every impact produced by this rule.
    #[must_use]
    pub const fn confidence(self) -> f32 {
        match self {
            ImpactType::Direct => 1.0,
            ImpactType::Sector => 0.7,
            ImpactType::Regulatory => 0.6,
        }
    }
}

impl std::fmt::Display for ImpactType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImpactType::Direct => write!(f, "direct"),
            ImpactType::Sector => write!(f, "sector"),
            ImpactType::Regulatory => write!(f, "regulatory"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockImpact {
    pub symbol: String,
    pub confidence: f32,
    #[serde(rename = "type")]
    pub impact_type: ImpactType,
    /// The company, sector or regulator that triggered this impact.
    pub source: String,
}

impl StockImpact {
    #[must_use]
    pub fn new(symbol: &str, impact_type: ImpactType, source: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            confidence: impact_type.confidence(),
            impact_type,
            source: source.to_string(),
        }
    }
}
