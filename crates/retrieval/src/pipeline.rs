use crate::blender::EvidenceBlender;
use crate::config::RetrievalConfig;
use crate::strategy::{MemoryLookup, SemanticLookup, StructuralLookup};
use repo_brain_protocol::{Evidence, ReasoningContext, RepositoryFacts};
use std::path::PathBuf;
use std::sync::Arc;

/// Query-time orchestration: fan out to every strategy, then blend.
///
/// A failing strategy contributes nothing and is logged; the others still
/// count.
pub struct EvidencePipeline {
    root: PathBuf,
    structural: Arc<dyn StructuralLookup>,
    semantic: Arc<dyn SemanticLookup>,
    memory: Arc<dyn MemoryLookup>,
    blender: EvidenceBlender,
    semantic_top_k: usize,
}

impl EvidencePipeline {
    pub fn new(
        root: impl Into<PathBuf>,
        structural: Arc<dyn StructuralLookup>,
        semantic: Arc<dyn SemanticLookup>,
        memory: Arc<dyn MemoryLookup>,
        config: &RetrievalConfig,
    ) -> Self {
        Self {
            root: root.into(),
            structural,
            semantic,
            memory,
            blender: EvidenceBlender::new(config.max_context_items),
            semantic_top_k: config.semantic_top_k,
        }
    }

    /// Raw evidence in strategy order: structural, semantic, memory
    pub async fn gather(&self, query: &str) -> Vec<Evidence> {
        log::debug!("Gathering evidence for '{query}'");

        let (structural, semantic, memory) = tokio::join!(
            self.structural.find_symbol(query, &self.root),
            self.semantic.search(query, self.semantic_top_k),
            self.memory.memory_evidence(query),
        );

        let mut evidences = Vec::new();
        match structural {
            Ok(found) => evidences.extend(found),
            Err(err) => log::warn!("Structural lookup failed for '{query}': {err}"),
        }
        match semantic {
            Ok(hits) => {
                if hits.len() > self.semantic_top_k {
                    log::warn!(
                        "Semantic lookup returned {} items for k={}; extra items dropped",
                        hits.len(),
                        self.semantic_top_k
                    );
                }
                evidences.extend(hits.into_iter().take(self.semantic_top_k));
            }
            Err(err) => log::warn!("Semantic lookup failed for '{query}': {err}"),
        }
        match memory {
            Ok(items) => evidences.extend(items),
            Err(err) => log::warn!("Memory lookup failed for '{query}': {err}"),
        }

        log::info!("Found {} pieces of evidence", evidences.len());
        evidences
    }

    /// Gather and blend into a bounded context
    pub async fn retrieve(&self, query: &str) -> ReasoningContext {
        let evidences = self.gather(query).await;
        self.blender.build_context(query, evidences)
    }

    pub async fn retrieve_with_facts(
        &self,
        query: &str,
        facts: Option<RepositoryFacts>,
    ) -> ReasoningContext {
        let evidences = self.gather(query).await;
        self.blender.build_context_with_facts(query, evidences, facts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, RetrievalError};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use repo_brain_protocol::EvidenceSource;
    use std::path::Path;

    struct FailingStructural;

    #[async_trait]
    impl StructuralLookup for FailingStructural {
        async fn find_symbol(&self, _name: &str, _root: &Path) -> Result<Option<Evidence>> {
            Err(RetrievalError::Other("parser unavailable".into()))
        }
    }

    struct FixedStructural(Option<Evidence>);

    #[async_trait]
    impl StructuralLookup for FixedStructural {
        async fn find_symbol(&self, _name: &str, _root: &Path) -> Result<Option<Evidence>> {
            Ok(self.0.clone())
        }
    }

    struct FixedSemantic(Vec<Evidence>);

    #[async_trait]
    impl SemanticLookup for FixedSemantic {
        async fn search(&self, _query: &str, _k: usize) -> Result<Vec<Evidence>> {
            Ok(self.0.clone())
        }

        async fn index_code(&self, _file_path: &str, _content: &str) -> Result<()> {
            Ok(())
        }

        async fn clear_index(&self) -> Result<()> {
            Ok(())
        }
    }

    struct FailingSemantic;

    #[async_trait]
    impl SemanticLookup for FailingSemantic {
        async fn search(&self, _query: &str, _k: usize) -> Result<Vec<Evidence>> {
            Err(RetrievalError::Other("index unreadable".into()))
        }

        async fn index_code(&self, _file_path: &str, _content: &str) -> Result<()> {
            Err(RetrievalError::Other("index unreadable".into()))
        }

        async fn clear_index(&self) -> Result<()> {
            Ok(())
        }
    }

    struct FailingMemory;

    #[async_trait]
    impl MemoryLookup for FailingMemory {
        async fn memory_evidence(&self, _query: &str) -> Result<Vec<Evidence>> {
            Err(RetrievalError::Other("facts unreadable".into()))
        }
    }

    struct FixedMemory(Vec<Evidence>);

    #[async_trait]
    impl MemoryLookup for FixedMemory {
        async fn memory_evidence(&self, _query: &str) -> Result<Vec<Evidence>> {
            Ok(self.0.clone())
        }
    }

    fn pipeline(
        structural: Arc<dyn StructuralLookup>,
        semantic: Vec<Evidence>,
        memory: Vec<Evidence>,
    ) -> EvidencePipeline {
        EvidencePipeline::new(
            "/repo",
            structural,
            Arc::new(FixedSemantic(semantic)),
            Arc::new(FixedMemory(memory)),
            &RetrievalConfig::default(),
        )
    }

    #[tokio::test]
    async fn structural_failure_degrades_gracefully() {
        let pipeline = pipeline(
            Arc::new(FailingStructural),
            vec![Evidence::new(EvidenceSource::Semantic, "similar", 0.6)],
            vec![Evidence::new(EvidenceSource::Memory, "Convention: naming - x", 0.7)],
        );

        let context = pipeline.retrieve("Foo").await;
        let sources: Vec<EvidenceSource> = context.evidence.iter().map(|e| e.source).collect();
        assert_eq!(sources, vec![EvidenceSource::Memory, EvidenceSource::Semantic]);
    }

    #[tokio::test]
    async fn semantic_failure_degrades_gracefully() {
        let pipeline = EvidencePipeline::new(
            "/repo",
            Arc::new(FixedStructural(Some(Evidence::new(
                EvidenceSource::Structural,
                "Symbol found: Foo (class) at a.ts:10",
                1.0,
            )))),
            Arc::new(FailingSemantic),
            Arc::new(FixedMemory(vec![Evidence::new(
                EvidenceSource::Memory,
                "Convention: naming - x",
                0.7,
            )])),
            &RetrievalConfig::default(),
        );

        let context = pipeline.retrieve("Foo").await;
        let sources: Vec<EvidenceSource> = context.evidence.iter().map(|e| e.source).collect();
        assert_eq!(sources, vec![EvidenceSource::Structural, EvidenceSource::Memory]);
    }

    #[tokio::test]
    async fn memory_failure_degrades_gracefully() {
        let pipeline = EvidencePipeline::new(
            "/repo",
            Arc::new(FixedStructural(None)),
            Arc::new(FixedSemantic(vec![Evidence::new(
                EvidenceSource::Semantic,
                "similar",
                0.6,
            )])),
            Arc::new(FailingMemory),
            &RetrievalConfig::default(),
        );

        let context = pipeline.retrieve("Foo").await;
        assert_eq!(context.evidence.len(), 1);
        assert_eq!(context.evidence[0].source, EvidenceSource::Semantic);
    }

    #[tokio::test]
    async fn every_strategy_failing_yields_empty_context() {
        let pipeline = EvidencePipeline::new(
            "/repo",
            Arc::new(FailingStructural),
            Arc::new(FailingSemantic),
            Arc::new(FailingMemory),
            &RetrievalConfig::default(),
        );

        let context = pipeline.retrieve("Foo").await;
        assert_eq!(context.query, "Foo");
        assert!(context.is_empty());
    }

    #[tokio::test]
    async fn structural_match_ranks_first() {
        let pipeline = pipeline(
            Arc::new(FixedStructural(Some(Evidence::new(
                EvidenceSource::Structural,
                "Symbol found: Foo (class) at a.ts:10",
                1.0,
            )))),
            vec![Evidence::new(EvidenceSource::Semantic, "class Foo {}", 0.6)],
            Vec::new(),
        );

        let context = pipeline.retrieve("Foo").await;
        assert_eq!(context.query, "Foo");
        assert_eq!(context.evidence.len(), 2);
        assert_eq!(context.evidence[0].source, EvidenceSource::Structural);
        assert_eq!(context.evidence[0].content, "Symbol found: Foo (class) at a.ts:10");
        assert_eq!(context.evidence[1].source, EvidenceSource::Semantic);
    }

    #[tokio::test]
    async fn equal_relevance_keeps_strategy_order() {
        let pipeline = pipeline(
            Arc::new(FixedStructural(Some(Evidence::new(
                EvidenceSource::Structural,
                "s",
                0.7,
            )))),
            vec![Evidence::new(EvidenceSource::Semantic, "v", 0.7)],
            vec![Evidence::new(EvidenceSource::Memory, "m", 0.7)],
        );

        let gathered = pipeline.gather("x").await;
        let blended = pipeline.retrieve("x").await.evidence;
        assert_eq!(gathered, blended);
    }

    #[tokio::test]
    async fn oversized_semantic_results_are_cut_to_top_k() {
        let semantic: Vec<Evidence> = (0..8)
            .map(|i| Evidence::new(EvidenceSource::Semantic, format!("hit {i}"), 0.5))
            .collect();
        let pipeline = pipeline(Arc::new(FixedStructural(None)), semantic, Vec::new());

        assert_eq!(pipeline.gather("q").await.len(), 5);
    }

    #[tokio::test]
    async fn facts_are_attached() {
        let pipeline = pipeline(Arc::new(FixedStructural(None)), Vec::new(), Vec::new());
        let facts = RepositoryFacts {
            language: "typescript".into(),
            ..Default::default()
        };
        let context = pipeline.retrieve_with_facts("q", Some(facts.clone())).await;
        assert!(context.is_empty());
        assert_eq!(context.repo_facts, Some(facts));
    }
}
