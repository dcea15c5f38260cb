//! Entity extraction for news items.
//!
//! Companies are found by an NER tagger's organization spans (when one is
//! configured) and by a plain substring scan of the knowledge-base company
//! names. Sectors and regulators come from keyword scans only. All matching
//! is case-insensitive.

use newsintel_core::{EntitySet, KnowledgeBase, NewsItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLabel {
    Organization,
    Person,
    Location,
    Other,
}

/// A typed span produced by an NER model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpan {
    pub text: String,
    pub label: EntityLabel,
}

/// Named-entity recognition capability. Opaque to the engine.
pub trait NerTagger {
    fn tag(&self, text: &str) -> Vec<EntitySpan>;
}

pub struct EntityExtractor<'a> {
    kb: &'a KnowledgeBase,
    tagger: Option<&'a dyn NerTagger>,
}

impl<'a> EntityExtractor<'a> {
    /// Extractor backed by the knowledge base alone.
    #[must_use]
    pub fn new(kb: &'a KnowledgeBase) -> Self {
        Self { kb, tagger: None }
    }

    #[must_use]
    pub fn with_tagger(kb: &'a KnowledgeBase, tagger: &'a dyn NerTagger) -> Self {
        Self {
            kb,
            tagger: Some(tagger),
        }
    }

    #[must_use]
    pub fn extract(&self, text: &str) -> EntitySet {
        let mut entities = EntitySet::default();
        let lower_text = text.to_lowercase();

        if let Some(tagger) = self.tagger {
            for span in tagger.tag(text) {
                if span.label != EntityLabel::Organization {
                    continue;
                }
                let span_lower = span.text.to_lowercase();
                for company in &self.kb.companies {
                    if span_lower.contains(&company.name.to_lowercase()) {
                        entities.companies.insert(company.name.clone());
                    }
                }
            }
        }

        for company in &self.kb.companies {
            if lower_text.contains(&company.name.to_lowercase()) {
                entities.companies.insert(company.name.clone());
            }
        }

        for kw in &self.kb.sector_keywords {
            if lower_text.contains(&kw.keyword.to_lowercase()) {
                entities.sectors.insert(kw.sector.clone());
            }
        }

        for kw in &self.kb.regulator_keywords {
            if lower_text.contains(&kw.keyword.to_lowercase()) {
                entities.regulators.insert(kw.regulator.clone());
            }
        }

        entities
    }

    /// Annotate each item's entity columns from its title.
    pub fn annotate(&self, items: &mut [NewsItem]) {
        for item in items.iter_mut() {
            let entities = self.extract(&item.title);
            tracing::debug!(
                id = %item.id,
                companies = entities.companies.len(),
                sectors = entities.sectors.len(),
                regulators = entities.regulators.len(),
                "extracted entities"
            );
            item.set_entities(entities);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tags a fixed list of spans regardless of input.
    struct FixedTagger(Vec<EntitySpan>);

    impl NerTagger for FixedTagger {
        fn tag(&self, _text: &str) -> Vec<EntitySpan> {
            self.0.clone()
        }
    }

    fn span(text: &str, label: EntityLabel) -> EntitySpan {
        EntitySpan {
            text: text.to_string(),
            label,
        }
    }

    #[test]
    fn regulator_keyword_is_found() {
        let kb = KnowledgeBase::builtin();
        let result = EntityExtractor::new(&kb).extract("RBI raises repo rate to control inflation");
        assert!(result.regulators.contains("RBI"));
        assert!(result.companies.is_empty());
    }

    #[test]
    fn company_name_is_found() {
        let kb = KnowledgeBase::builtin();
        let result = EntityExtractor::new(&kb).extract("HDFC Bank announces quarterly earnings");
        assert!(result.companies.contains("HDFC Bank"));
    }

    #[test]
    fn company_does_not_imply_sector_on_item_side() {
        let kb = KnowledgeBase::builtin();
        let result = EntityExtractor::new(&kb).extract("HDFC Bank announces quarterly earnings");
        assert!(result.sectors.is_empty());
    }

    #[test]
    fn aliases_map_to_canonical_regulator() {
        let kb = KnowledgeBase::builtin();
        let extractor = EntityExtractor::new(&kb);
        for text in [
            "Reserve Bank hikes interest rates",
            "Central bank increases policy rate",
            "the central bank is watching",
        ] {
            let result = extractor.extract(text);
            assert_eq!(
                result.regulators.iter().collect::<Vec<_>>(),
                vec!["RBI"],
                "text: {text}"
            );
        }
    }

    #[test]
    fn sector_keywords_match_case_insensitively() {
        let kb = KnowledgeBase::builtin();
        let result =
            EntityExtractor::new(&kb).extract("Banking sector NPAs decline to 5-year low");
        assert_eq!(result.sectors.iter().collect::<Vec<_>>(), vec!["Banking"]);
    }

    #[test]
    fn organization_spans_contribute_companies() {
        let kb = KnowledgeBase::builtin();
        let tagger = FixedTagger(vec![span("ICICI Bank Ltd.", EntityLabel::Organization)]);
        let result = EntityExtractor::with_tagger(&kb, &tagger).extract("lender expands footprint");
        assert!(result.companies.contains("ICICI Bank"));
    }

    #[test]
    fn non_organization_spans_are_ignored() {
        let kb = KnowledgeBase::builtin();
        let tagger = FixedTagger(vec![span("HDFC Bank", EntityLabel::Person)]);
        let result = EntityExtractor::with_tagger(&kb, &tagger).extract("nothing relevant here");
        assert!(result.companies.is_empty());
    }

    #[test]
    fn annotate_fills_item_columns() {
        let kb = KnowledgeBase::builtin();
        let mut items = vec![
            NewsItem::new("N1", "ICICI Bank opens 500 new branches"),
            NewsItem::new("N2", "Markets flat"),
        ];
        EntityExtractor::new(&kb).annotate(&mut items);
        assert!(items[0].companies.contains("ICICI Bank"));
        assert!(items[1].companies.is_empty());
        assert!(items[1].regulators.is_empty());
    }
}
