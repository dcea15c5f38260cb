//! Maps extracted entities to impacted stocks.
//!
//! Three rules, applied in order and never deduplicated against each other:
//! - direct company mention: confidence 1.0, type `direct`
//! - sector-wide news: every company in the sector, 0.7, `sector`
//! - regulator news: every company in each sector the regulator oversees,
//!   0.6, `regulatory`

use newsintel_core::{EntitySetRef, ImpactType, KnowledgeBase, NewsItem, StockImpact};

#[must_use]
pub fn map_stock_impact(entities: EntitySetRef<'_>, kb: &KnowledgeBase) -> Vec<StockImpact> {
    let mut impacts = Vec::new();

    for company in entities.companies {
        if let Some(symbol) = kb.symbol_for(company) {
            impacts.push(StockImpact::new(symbol, ImpactType::Direct, company));
        }
    }

    for sector in entities.sectors {
        for company in kb.companies_in_sector(sector) {
            impacts.push(StockImpact::new(&company.symbol, ImpactType::Sector, sector));
        }
    }

    for regulator in entities.regulators {
        for sector in kb.sectors_regulated_by(regulator) {
            for company in kb.companies_in_sector(sector) {
                impacts.push(StockImpact::new(
                    &company.symbol,
                    ImpactType::Regulatory,
                    regulator,
                ));
            }
        }
    }

    impacts
}

/// Fill `impacted_stocks` for every item from its entity columns.
pub fn add_impacts(items: &mut [NewsItem], kb: &KnowledgeBase) {
    for item in items.iter_mut() {
        item.impacted_stocks = map_stock_impact(item.entities(), kb);
    }
}
