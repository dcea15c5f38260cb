//! Static lookup tables for companies, sectors and regulators.
//!
//! A [`KnowledgeBase`] is loaded once (from YAML, or the built-in tables) and
//! passed by reference to entity extraction, impact mapping and query
//! understanding. Every table is an ordered list so that lookups iterate in a
//! stable, file-defined order.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyEntry {
    pub name: String,
    /// Exchange ticker, e.g. `HDFCBANK`.
    pub symbol: String,
    pub sector: String,
}

/// Lowercase phrase that marks a headline as sector news.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorKeyword {
    pub keyword: String,
    pub sector: String,
}

/// Phrase that names a regulator, mapped to its canonical name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegulatorKeyword {
    pub keyword: String,
    pub regulator: String,
}

/// A sector whose listed companies move on this regulator's actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegulatorSector {
    pub regulator: String,
    pub sector: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub companies: Vec<CompanyEntry>,
    #[serde(default)]
    pub sector_keywords: Vec<SectorKeyword>,
    #[serde(default)]
    pub regulator_keywords: Vec<RegulatorKeyword>,
    #[serde(default)]
    pub regulator_sectors: Vec<RegulatorSector>,
}

impl KnowledgeBase {
    /// The default Indian-banking tables.
    #[must_use]
    pub fn builtin() -> Self {
        let company = |name: &str, symbol: &str, sector: &str| CompanyEntry {
            name: name.to_string(),
            symbol: symbol.to_string(),
            sector: sector.to_string(),
        };
        let sector_kw = |keyword: &str, sector: &str| SectorKeyword {
            keyword: keyword.to_string(),
            sector: sector.to_string(),
        };
        let regulator_kw = |keyword: &str, regulator: &str| RegulatorKeyword {
            keyword: keyword.to_string(),
            regulator: regulator.to_string(),
        };

        Self {
            companies: vec![
                company("HDFC Bank", "HDFCBANK", "Banking"),
                company("ICICI Bank", "ICICIBANK", "Banking"),
            ],
            sector_keywords: vec![
                sector_kw("banking sector", "Banking"),
                sector_kw("banking", "Banking"),
            ],
            regulator_keywords: vec![
                regulator_kw("RBI", "RBI"),
                regulator_kw("Reserve Bank", "RBI"),
                regulator_kw("Central bank", "RBI"),
                regulator_kw("central bank", "RBI"),
            ],
            regulator_sectors: vec![RegulatorSector {
                regulator: "RBI".to_string(),
                sector: "Banking".to_string(),
            }],
        }
    }

    /// Look up a company by its exact table name.
    #[must_use]
    pub fn company(&self, name: &str) -> Option<&CompanyEntry> {
        self.companies.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn symbol_for(&self, company: &str) -> Option<&str> {
        self.company(company).map(|c| c.symbol.as_str())
    }

    #[must_use]
    pub fn sector_for(&self, company: &str) -> Option<&str> {
        self.company(company).map(|c| c.sector.as_str())
    }

    /// Companies in `sector`, in table order.
    pub fn companies_in_sector<'a>(
        &'a self,
        sector: &'a str,
    ) -> impl Iterator<Item = &'a CompanyEntry> + 'a {
        self.companies.iter().filter(move |c| c.sector == sector)
    }

    /// Sectors affected by `regulator`, in table order.
    pub fn sectors_regulated_by<'a>(&'a self, regulator: &'a str) -> impl Iterator<Item = &'a str> {
        self.regulator_sectors
            .iter()
            .filter(move |r| r.regulator == regulator)
            .map(|r| r.sector.as_str())
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Load and validate a knowledge base from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_knowledge_base(path: &Path) -> Result<KnowledgeBase, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::KnowledgeBaseIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_knowledge_base(&content)
}

/// Load the knowledge base at `path`, or the built-in tables when unset.
///
/// # Errors
///
/// Same as [`load_knowledge_base`].
pub fn load_knowledge_base_or_builtin(path: Option<&Path>) -> Result<KnowledgeBase, ConfigError> {
    match path {
        Some(path) => load_knowledge_base(path),
        None => Ok(KnowledgeBase::builtin()),
    }
}

/// Parse and validate a knowledge base from a YAML string.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_knowledge_base(content: &str) -> Result<KnowledgeBase, ConfigError> {
    let kb: KnowledgeBase = serde_yaml::from_str(content)?;
    validate_knowledge_base(&kb)?;
    Ok(kb)
}

fn validate_knowledge_base(kb: &KnowledgeBase) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();
    let mut seen_symbols = HashSet::new();

    for company in &kb.companies {
        if company.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "company name must be non-empty".to_string(),
            ));
        }
        if company.symbol.trim().is_empty() || company.sector.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "company '{}' must have a non-empty symbol and sector",
                company.name
            )));
        }
        if !seen_names.insert(company.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate company name: '{}'",
                company.name
            )));
        }
        if !seen_symbols.insert(company.symbol.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate symbol: '{}' (from company '{}')",
                company.symbol, company.name
            )));
        }
    }

    for kw in &kb.sector_keywords {
        if kw.keyword.trim().is_empty() || kw.sector.trim().is_empty() {
            return Err(ConfigError::Validation(
                "sector keywords must have a non-empty keyword and sector".to_string(),
            ));
        }
    }

    for kw in &kb.regulator_keywords {
        if kw.keyword.trim().is_empty() || kw.regulator.trim().is_empty() {
            return Err(ConfigError::Validation(
                "regulator keywords must have a non-empty keyword and regulator".to_string(),
            ));
        }
    }

    for rule in &kb.regulator_sectors {
        if rule.regulator.trim().is_empty() || rule.sector.trim().is_empty() {
            return Err(ConfigError::Validation(
                "regulator sectors must have a non-empty regulator and sector".to_string(),
            ));
        }
    }

    Ok(())
}
