//! End-to-end pipeline tests against in-memory capability providers

mod common;

use common::{MemoryIndex, StubEmbedder, StubGenerator, StubReranker, WrongSizeEmbedder};
use docshelf::commands::{
    cmd_delete_document, cmd_ingest, cmd_list_documents, cmd_query, IngestInput,
};
use docshelf::config::Config;
use docshelf::error::Error;
use docshelf::extract::Format;

const DIM: usize = 8;

fn test_config() -> Config {
    let mut config = Config::default();
    config.embedding.dimension = DIM;
    config
}

fn quarterly_report_input() -> IngestInput {
    // Sized so that the combined text ("Description: ..." prefix plus body)
    // is about 3000 characters
    let body = "Revenue grew twelve percent this quarter on strong demand. ".repeat(50);
    IngestInput {
        filename: "report.txt".to_string(),
        format: Format::Txt,
        description: "Quarterly report".to_string(),
        bytes: body.into_bytes(),
    }
}

#[tokio::test]
async fn ingest_then_query_end_to_end() {
    let config = test_config();
    let index = MemoryIndex::new(DIM);
    let embedder = StubEmbedder { dimension: DIM };
    let reranker = StubReranker::new();
    let generator = StubGenerator::new();

    let report = cmd_ingest(&config, &index, &embedder, vec![quarterly_report_input()])
        .await
        .unwrap();

    assert!(report.failed.is_empty());
    assert_eq!(report.success.len(), 1);
    let chunks = report.success[0].chunks_inserted;
    assert!(
        (3..=4).contains(&chunks),
        "expected 3-4 chunks, got {}",
        chunks
    );
    assert_eq!(index.len(), chunks);

    let answer = cmd_query(
        &config,
        &index,
        &embedder,
        &reranker,
        &generator,
        "What was revenue?",
        None,
    )
    .await
    .unwrap();

    assert!(!answer.answer.is_empty());
    assert!(!answer.sources.is_empty());
    assert!(answer.sources.iter().any(|s| s.filename == "report.txt"));
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn filter_on_unknown_filename_short_circuits() {
    let config = test_config();
    let index = MemoryIndex::new(DIM);
    let embedder = StubEmbedder { dimension: DIM };
    let reranker = StubReranker::new();
    let generator = StubGenerator::new();

    cmd_ingest(&config, &index, &embedder, vec![quarterly_report_input()])
        .await
        .unwrap();

    let err = cmd_query(
        &config,
        &index,
        &embedder,
        &reranker,
        &generator,
        "What was revenue?",
        Some(vec!["never-uploaded.pdf".to_string()]),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::NoResults));
    assert_eq!(reranker.calls(), 0, "reranker must not run on empty candidates");
    assert_eq!(generator.calls(), 0, "generator must not run on empty candidates");
}

#[tokio::test]
async fn ingest_then_delete_round_trip() {
    let config = test_config();
    let index = MemoryIndex::new(DIM);
    let embedder = StubEmbedder { dimension: DIM };
    let reranker = StubReranker::new();
    let generator = StubGenerator::new();

    cmd_ingest(&config, &index, &embedder, vec![quarterly_report_input()])
        .await
        .unwrap();

    let documents = cmd_list_documents(&index).await.unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].filename, "report.txt");
    assert_eq!(documents[0].description, "Quarterly report");

    cmd_delete_document(&index, "report.txt").await.unwrap();

    let documents = cmd_list_documents(&index).await.unwrap();
    assert!(documents.is_empty());

    let err = cmd_query(
        &config,
        &index,
        &embedder,
        &reranker,
        &generator,
        "What was revenue?",
        Some(vec!["report.txt".to_string()]),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, Error::NoResults));

    // Deleting again is a no-op, not an error
    cmd_delete_document(&index, "report.txt").await.unwrap();
}

#[tokio::test]
async fn filtered_search_stays_within_filter_set() {
    let config = test_config();
    let index = MemoryIndex::new(DIM);
    let embedder = StubEmbedder { dimension: DIM };
    let reranker = StubReranker::new();
    let generator = StubGenerator::new();

    let inputs = vec![
        IngestInput {
            filename: "alpha.txt".to_string(),
            format: Format::Txt,
            description: "First corpus".to_string(),
            bytes: "The alpha document talks about apples and orchards. "
                .repeat(40)
                .into_bytes(),
        },
        IngestInput {
            filename: "beta.txt".to_string(),
            format: Format::Txt,
            description: "Second corpus".to_string(),
            bytes: "The beta document covers bridges and rivers in detail. "
                .repeat(40)
                .into_bytes(),
        },
    ];

    let report = cmd_ingest(&config, &index, &embedder, inputs).await.unwrap();
    assert_eq!(report.success.len(), 2);

    let answer = cmd_query(
        &config,
        &index,
        &embedder,
        &reranker,
        &generator,
        "Tell me about bridges",
        Some(vec!["alpha.txt".to_string()]),
    )
    .await
    .unwrap();

    assert!(answer.sources.iter().all(|s| s.filename == "alpha.txt"));
}

#[tokio::test]
async fn query_is_deterministic_across_runs() {
    let config = test_config();
    let index = MemoryIndex::new(DIM);
    let embedder = StubEmbedder { dimension: DIM };
    let reranker = StubReranker::new();
    let generator = StubGenerator::new();

    cmd_ingest(&config, &index, &embedder, vec![quarterly_report_input()])
        .await
        .unwrap();

    let first = cmd_query(
        &config, &index, &embedder, &reranker, &generator, "What was revenue?", None,
    )
    .await
    .unwrap();
    let second = cmd_query(
        &config, &index, &embedder, &reranker, &generator, "What was revenue?", None,
    )
    .await
    .unwrap();

    let a: Vec<&str> = first.sources.iter().map(|s| s.filename.as_str()).collect();
    let b: Vec<&str> = second.sources.iter().map(|s| s.filename.as_str()).collect();
    assert_eq!(a, b);
    assert_eq!(first.answer, second.answer);
}

#[tokio::test]
async fn wrong_dimension_provider_writes_nothing() {
    let config = test_config();
    let index = MemoryIndex::new(DIM);
    let embedder = WrongSizeEmbedder {
        declared: DIM,
        actual: DIM - 3,
    };

    let report = cmd_ingest(&config, &index, &embedder, vec![quarterly_report_input()])
        .await
        .unwrap();

    assert!(report.success.is_empty());
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].error.contains("dimension mismatch"));
    assert_eq!(index.len(), 0, "no chunk may be written on dimension mismatch");
}

#[tokio::test]
async fn batch_failures_are_scoped_per_file() {
    let config = test_config();
    let index = MemoryIndex::new(DIM);
    let embedder = StubEmbedder { dimension: DIM };

    let inputs = vec![
        IngestInput {
            filename: "good.csv".to_string(),
            format: Format::Csv,
            description: "Sales table".to_string(),
            bytes: b"region,amount\nnorth,120\nsouth,45\n".to_vec(),
        },
        IngestInput {
            filename: "bad.json".to_string(),
            format: Format::Json,
            description: "Broken export".to_string(),
            bytes: b"{not valid json".to_vec(),
        },
    ];

    let report = cmd_ingest(&config, &index, &embedder, inputs).await.unwrap();

    assert_eq!(report.success.len(), 1);
    assert_eq!(report.success[0].filename, "good.csv");
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].filename, "bad.json");
    assert!(index.len() > 0);
}

#[tokio::test]
async fn empty_file_is_an_ingestion_failure() {
    let config = test_config();
    let index = MemoryIndex::new(DIM);
    let embedder = StubEmbedder { dimension: DIM };

    let inputs = vec![IngestInput {
        filename: "blank.txt".to_string(),
        format: Format::Txt,
        description: "Nothing here".to_string(),
        bytes: b"   \n\t  ".to_vec(),
    }];

    let report = cmd_ingest(&config, &index, &embedder, inputs).await.unwrap();

    assert!(report.success.is_empty());
    assert_eq!(report.failed.len(), 1);
    assert_eq!(index.len(), 0);
}

#[tokio::test]
async fn empty_query_is_rejected() {
    let config = test_config();
    let index = MemoryIndex::new(DIM);
    let embedder = StubEmbedder { dimension: DIM };
    let reranker = StubReranker::new();
    let generator = StubGenerator::new();

    let err = cmd_query(
        &config, &index, &embedder, &reranker, &generator, "   ", None,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::EmptyContent(_)));
    assert_eq!(generator.calls(), 0);
}
