use repo_brain_protocol::{Evidence, ReasoningContext, RepositoryFacts};

pub const DEFAULT_MAX_CONTEXT_ITEMS: usize = 10;

/// Normalizes, ranks and bounds evidence coming from the retrieval strategies.
///
/// Ranking is a stable sort on relevance, so equally relevant items keep the
/// order the caller supplied them in. No dedup and no per-source balancing.
#[derive(Debug, Clone, Copy)]
pub struct EvidenceBlender {
    max_items: usize,
}

impl Default for EvidenceBlender {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONTEXT_ITEMS)
    }
}

impl EvidenceBlender {
    pub const fn new(max_items: usize) -> Self {
        Self { max_items }
    }

    pub const fn max_items(&self) -> usize {
        self.max_items
    }

    /// Clamp, rank (descending relevance) and truncate to `max_items`
    pub fn blend_evidence(&self, evidences: Vec<Evidence>, max_items: usize) -> Vec<Evidence> {
        let total = evidences.len();
        let mut ranked: Vec<Evidence> = evidences.into_iter().map(normalize).collect();

        ranked.sort_by(|a, b| {
            b.relevance
                .partial_cmp(&a.relevance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(max_items);

        log::debug!("Blended {} pieces of evidence into {}", total, ranked.len());
        ranked
    }

    /// Blend with the configured bound and pair with the query
    pub fn build_context(&self, query: &str, evidences: Vec<Evidence>) -> ReasoningContext {
        ReasoningContext::new(query, self.blend_evidence(evidences, self.max_items))
    }

    pub fn build_context_with_facts(
        &self,
        query: &str,
        evidences: Vec<Evidence>,
        facts: Option<RepositoryFacts>,
    ) -> ReasoningContext {
        let mut context = self.build_context(query, evidences);
        context.repo_facts = facts;
        context
    }
}

fn normalize(mut evidence: Evidence) -> Evidence {
    if !evidence.has_valid_relevance() {
        let clamped = evidence.clamped_relevance();
        log::warn!(
            "Evidence from {} has relevance {} outside [0, 1]; clamped to {}",
            evidence.source,
            evidence.relevance,
            clamped
        );
        evidence.relevance = clamped;
    }
    evidence
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use repo_brain_protocol::EvidenceSource;

    fn evidence(content: &str, relevance: f32) -> Evidence {
        Evidence::new(EvidenceSource::Semantic, content, relevance)
    }

    #[test]
    fn ranks_by_relevance_descending() {
        let blender = EvidenceBlender::default();
        let blended = blender.blend_evidence(
            vec![
                evidence("low", 0.2),
                evidence("high", 0.9),
                evidence("mid", 0.5),
            ],
            10,
        );
        let order: Vec<&str> = blended.iter().map(|e| e.content.as_str()).collect();
        assert_eq!(order, vec!["high", "mid", "low"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let blender = EvidenceBlender::default();
        let blended = blender.blend_evidence(
            vec![
                evidence("first", 0.5),
                evidence("top", 0.8),
                evidence("second", 0.5),
                evidence("third", 0.5),
            ],
            10,
        );
        let order: Vec<&str> = blended.iter().map(|e| e.content.as_str()).collect();
        assert_eq!(order, vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn out_of_range_relevance_is_clamped() {
        let blender = EvidenceBlender::default();
        let blended = blender.blend_evidence(
            vec![
                evidence("nan", f32::NAN),
                evidence("negative", -0.5),
                evidence("huge", 7.0),
                evidence("ok", 0.4),
            ],
            10,
        );
        let pairs: Vec<(&str, f32)> = blended
            .iter()
            .map(|e| (e.content.as_str(), e.relevance))
            .collect();
        assert_eq!(
            pairs,
            vec![("huge", 1.0), ("ok", 0.4), ("nan", 0.0), ("negative", 0.0)]
        );
    }

    #[test]
    fn empty_input_and_zero_bound() {
        let blender = EvidenceBlender::default();
        assert!(blender.blend_evidence(Vec::new(), 10).is_empty());
        assert!(blender
            .blend_evidence(vec![evidence("a", 1.0)], 0)
            .is_empty());
    }

    #[test]
    fn build_context_uses_configured_bound() {
        let blender = EvidenceBlender::new(2);
        let context = blender.build_context(
            "Foo",
            vec![evidence("a", 0.1), evidence("b", 0.2), evidence("c", 0.3)],
        );
        assert_eq!(context.query, "Foo");
        assert_eq!(context.evidence.len(), 2);
        assert_eq!(context.evidence[0].content, "c");
        assert!(context.repo_facts.is_none());

        let with_facts = blender.build_context_with_facts(
            "Foo",
            Vec::new(),
            Some(RepositoryFacts::default()),
        );
        assert!(with_facts.repo_facts.is_some());
        assert!(with_facts.is_empty());
    }

    fn arb_evidence() -> impl Strategy<Value = Vec<Evidence>> {
        prop::collection::vec((0u32..=100, "[a-z]{1,6}"), 0..40).prop_map(|items| {
            items
                .into_iter()
                .map(|(score, content)| evidence(&content, score as f32 / 100.0))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn output_is_sorted_and_bounded(items in arb_evidence(), k in 0usize..50) {
            let blender = EvidenceBlender::default();
            let blended = blender.blend_evidence(items.clone(), k);

            prop_assert_eq!(blended.len(), k.min(items.len()));
            for pair in blended.windows(2) {
                prop_assert!(pair[0].relevance >= pair[1].relevance);
            }
        }

        #[test]
        fn equal_relevance_preserves_relative_order(items in arb_evidence()) {
            let tagged: Vec<Evidence> = items
                .into_iter()
                .enumerate()
                .map(|(i, e)| Evidence::new(e.source, format!("{i}"), e.relevance))
                .collect();
            let blended = EvidenceBlender::default().blend_evidence(tagged, usize::MAX);

            for pair in blended.windows(2) {
                if pair[0].relevance == pair[1].relevance {
                    let a: usize = pair[0].content.parse().unwrap();
                    let b: usize = pair[1].content.parse().unwrap();
                    prop_assert!(a < b);
                }
            }
        }

        #[test]
        fn blending_is_deterministic(items in arb_evidence(), k in 0usize..50) {
            let blender = EvidenceBlender::default();
            prop_assert_eq!(
                blender.blend_evidence(items.clone(), k),
                blender.blend_evidence(items, k)
            );
        }

        #[test]
        fn output_relevance_is_always_in_range(raw in prop::collection::vec(any::<f32>(), 0..20)) {
            let items: Vec<Evidence> = raw.into_iter().map(|r| evidence("x", r)).collect();
            let blended = EvidenceBlender::default().blend_evidence(items, usize::MAX);
            prop_assert!(blended.iter().all(Evidence::has_valid_relevance));
        }
    }
}
