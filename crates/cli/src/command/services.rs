use super::domain::{ConventionOutput, ExplainOutput, IndexOutput, Outcome, StatusOutput};
use anyhow::{Context as AnyhowContext, Result};
use repo_brain_indexer::ProjectIndexer;
use repo_brain_memory::MemoryStore;
use repo_brain_protocol::paths::{symbols_path, vectors_path};
use repo_brain_protocol::{index_dir_for_root, Convention};
use repo_brain_reasoning::{EvidenceDigest, ReasoningBackend};
use repo_brain_retrieval::{
    EvidencePipeline, RetrievalConfig, SymbolTableLookup, VectorIndexLookup,
};
use repo_brain_symbols::SymbolTable;
use repo_brain_vector_store::{VectorIndexConfig, VectorStore};
use std::path::Path;
use std::sync::Arc;

pub async fn index(path: &Path) -> Result<IndexOutput> {
    let indexer = ProjectIndexer::new(path).await?;
    let stats = indexer.index().await.context("Indexing failed")?;
    Ok(IndexOutput {
        root: indexer.root().to_path_buf(),
        stats,
    })
}

/// Facts-backed memory for `root`, or `None` when it was never indexed
async fn open_memory(root: &Path, relevance: f32) -> Option<MemoryStore> {
    let mut memory = MemoryStore::new(index_dir_for_root(root)).with_relevance(relevance);
    memory.load().await;
    memory.get_facts().is_some().then_some(memory)
}

pub async fn explain(
    root: &Path,
    query: &str,
    limit: Option<usize>,
) -> Result<Outcome<ExplainOutput>> {
    let index_dir = index_dir_for_root(root);
    let mut config = RetrievalConfig::load_or_default(&index_dir).await;
    if let Some(limit) = limit {
        config = config.with_max_context_items(limit);
    }

    let Some(memory) = open_memory(root, config.memory_relevance).await else {
        return Ok(Outcome::NoIndex);
    };
    log::info!("Explaining: {query}");

    let facts = memory.get_facts().cloned();
    let table = SymbolTable::load_or_empty(&symbols_path(&index_dir)).await;
    let vectors =
        VectorStore::load_or_empty(&vectors_path(&index_dir), VectorIndexConfig::default()).await;

    let pipeline = EvidencePipeline::new(
        root,
        Arc::new(SymbolTableLookup::new(table, config.structural_relevance)),
        Arc::new(VectorIndexLookup::new(vectors)),
        Arc::new(memory),
        &config,
    );

    log::info!("Gathering evidence...");
    let context = pipeline.retrieve_with_facts(query, facts).await;

    log::info!("Generating explanation...");
    let response = EvidenceDigest::new().explain(&context).await?;

    Ok(Outcome::Done(ExplainOutput {
        query: context.query,
        explanation: response.explanation,
        confidence: response.confidence,
        sources: response.sources,
    }))
}

pub async fn add_convention(
    root: &Path,
    convention: Convention,
) -> Result<Outcome<ConventionOutput>> {
    let Some(mut memory) = open_memory(root, repo_brain_memory::DEFAULT_MEMORY_RELEVANCE).await
    else {
        return Ok(Outcome::NoIndex);
    };

    memory
        .add_convention(convention.clone())
        .await
        .context("Failed to save convention")?;
    let total = memory
        .get_facts()
        .map_or(0, |facts| facts.conventions.len());

    Ok(Outcome::Done(ConventionOutput { convention, total }))
}

pub async fn status(root: &Path) -> Result<Outcome<StatusOutput>> {
    let Some(memory) = open_memory(root, repo_brain_memory::DEFAULT_MEMORY_RELEVANCE).await else {
        return Ok(Outcome::NoIndex);
    };
    let index_dir = index_dir_for_root(root);
    let table = SymbolTable::load_or_empty(&symbols_path(&index_dir)).await;
    let vectors =
        VectorStore::load_or_empty(&vectors_path(&index_dir), VectorIndexConfig::default()).await;

    let facts = memory.get_facts().cloned().unwrap_or_default();
    Ok(Outcome::Done(StatusOutput {
        index_dir,
        facts,
        indexed_files: table.file_count(),
        semantic_windows: vectors.len(),
    }))
}
