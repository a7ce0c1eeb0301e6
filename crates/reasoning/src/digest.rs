use crate::backend::ReasoningBackend;
use crate::error::{ReasoningError, Result};
use async_trait::async_trait;
use repo_brain_protocol::{Evidence, EvidenceSource, ExplanationResponse, ReasoningContext};
use std::fmt::Write;

/// Local backend that summarizes evidence grouped by source.
///
/// Confidence is the mean relevance of the cited evidence, `0.0` when there
/// is none.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvidenceDigest;

impl EvidenceDigest {
    pub const fn new() -> Self {
        Self
    }

    fn render(context: &ReasoningContext) -> String {
        let mut out = String::new();

        if context.is_empty() {
            let _ = write!(
                out,
                "No evidence found for \"{}\". Re-index the repository or try another name.",
                context.query
            );
            return out;
        }

        let _ = write!(
            out,
            "\"{}\": {} piece(s) of evidence.",
            context.query,
            context.evidence.len()
        );

        if let Some(facts) = &context.repo_facts {
            if !facts.language.is_empty() {
                let _ = write!(out, "\nRepository language: {}", facts.language);
                if let Some(count) = facts.symbol_count {
                    let _ = write!(out, " ({count} symbols indexed)");
                }
            }
        }

        for (source, heading) in [
            (EvidenceSource::Structural, "Definition"),
            (EvidenceSource::Semantic, "Related code"),
            (EvidenceSource::Memory, "Project conventions"),
        ] {
            let items: Vec<&Evidence> = context
                .evidence
                .iter()
                .filter(|e| e.source == source)
                .collect();
            if items.is_empty() {
                continue;
            }
            let _ = write!(out, "\n\n{heading}:");
            for item in items {
                let _ = write!(out, "\n  - {}", item.content);
            }
        }

        out
    }

    fn confidence(evidence: &[Evidence]) -> f32 {
        if evidence.is_empty() {
            return 0.0;
        }
        let total: f32 = evidence.iter().map(Evidence::clamped_relevance).sum();
        #[allow(clippy::cast_precision_loss)]
        let mean = total / evidence.len() as f32;
        mean.clamp(0.0, 1.0)
    }
}

#[async_trait]
impl ReasoningBackend for EvidenceDigest {
    async fn explain(&self, context: &ReasoningContext) -> Result<ExplanationResponse> {
        log::debug!("Generating explanation for: {}", context.query);
        Ok(ExplanationResponse {
            explanation: Self::render(context),
            sources: context.evidence.clone(),
            confidence: Some(Self::confidence(&context.evidence)),
        })
    }

    async fn ask(&self, question: &str, context: &ReasoningContext) -> Result<String> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ReasoningError::EmptyQuestion);
        }
        log::debug!("Asking: {question}");

        let Some(best) = context.evidence.first() else {
            return Ok(format!("No indexed evidence answers: {question}"));
        };
        let mut answer = format!("Most relevant to \"{question}\": {}", best.content);
        let others = context.evidence.len() - 1;
        if others > 0 {
            let _ = write!(answer, " (plus {others} more)");
        }
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use repo_brain_protocol::RepositoryFacts;

    fn context() -> ReasoningContext {
        ReasoningContext::new(
            "Foo",
            vec![
                Evidence::new(
                    EvidenceSource::Structural,
                    "Symbol found: Foo (class) at a.ts:10",
                    1.0,
                ),
                Evidence::new(EvidenceSource::Semantic, "Similar code in a.ts:1-16", 0.6),
                Evidence::new(EvidenceSource::Memory, "Convention: naming - Foo style", 0.7),
            ],
        )
    }

    #[tokio::test]
    async fn explain_cites_every_item_grouped_by_source() {
        let response = EvidenceDigest::new().explain(&context()).await.unwrap();

        assert_eq!(response.sources, context().evidence);
        let text = &response.explanation;
        let definition = text.find("Definition:").unwrap();
        let related = text.find("Related code:").unwrap();
        let conventions = text.find("Project conventions:").unwrap();
        assert!(definition < related && related < conventions);
        assert!(text.contains("Symbol found: Foo (class) at a.ts:10"));

        let confidence = response.confidence.unwrap();
        assert!((confidence - 0.766_666_7).abs() < 1e-4);
    }

    #[tokio::test]
    async fn empty_context_has_zero_confidence() {
        let response = EvidenceDigest::new()
            .explain(&ReasoningContext::new("Nothing", Vec::new()))
            .await
            .unwrap();
        assert!(response.sources.is_empty());
        assert_eq!(response.confidence, Some(0.0));
        assert!(response.explanation.starts_with("No evidence found for \"Nothing\""));
    }

    #[tokio::test]
    async fn facts_are_mentioned() {
        let mut ctx = context();
        ctx.repo_facts = Some(RepositoryFacts {
            language: "typescript".into(),
            symbol_count: Some(42),
            ..Default::default()
        });
        let response = EvidenceDigest::new().explain(&ctx).await.unwrap();
        assert!(response
            .explanation
            .contains("Repository language: typescript (42 symbols indexed)"));
    }

    #[tokio::test]
    async fn ask_uses_top_evidence() {
        let digest = EvidenceDigest::new();
        let answer = digest.ask("where is Foo?", &context()).await.unwrap();
        assert_eq!(
            answer,
            "Most relevant to \"where is Foo?\": Symbol found: Foo (class) at a.ts:10 (plus 2 more)"
        );

        assert!(matches!(
            digest.ask("  ", &context()).await,
            Err(ReasoningError::EmptyQuestion)
        ));
    }
}
