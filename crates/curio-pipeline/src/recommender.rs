//! The pipeline controller.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, error, warn};

use curio_core::{Error, Result};
use curio_embed::Embedder;
use curio_index::{RetrievedMatch, SimilarityIndex};
use curio_synth::DescriptionSynthesizer;

use crate::types::{Product, Query};

/// Orchestrates one recommendation request end to end.
///
/// Collaborators are injected once at startup and shared across requests;
/// nothing here holds per-request state.
pub struct Recommender {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn SimilarityIndex>,
    synthesizer: Arc<DescriptionSynthesizer>,
    /// Max in-flight synthesis calls per request.
    synth_concurrency: usize,
}

impl Recommender {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn SimilarityIndex>,
        synthesizer: Arc<DescriptionSynthesizer>,
        synth_concurrency: usize,
    ) -> Self {
        Self {
            embedder,
            index,
            synthesizer,
            synth_concurrency: synth_concurrency.max(1),
        }
    }

    /// Run the pipeline: validate, embed, retrieve, synthesize, assemble.
    ///
    /// The returned list preserves the index's rank order regardless of
    /// synthesis completion order.
    pub async fn recommend(&self, query: &Query) -> Result<Vec<Product>> {
        if query.query.trim().is_empty() {
            return Err(Error::InvalidRequest("query text must not be empty".into()));
        }
        if query.top_k < 1 {
            return Err(Error::InvalidRequest("top_k must be >= 1".into()));
        }

        let vector = self.embedder.embed(&query.query).await?;

        let matches = match self.index.query(&vector, query.top_k, true).await {
            Ok(matches) => matches,
            Err(e @ Error::DimensionMismatch { .. }) => {
                // Deployment fault: embedder and index disagree on the
                // vector space. Loud log, fatal to the request.
                error!("{}", e);
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        debug!(
            "Retrieved {} matches for top_k={}",
            matches.len(),
            query.top_k
        );

        // Fan out synthesis, bounded; `buffered` yields in input order so
        // rank order survives arbitrary completion timing.
        let products = stream::iter(matches)
            .map(|m| self.enrich(m))
            .buffered(self.synth_concurrency)
            .collect::<Vec<Product>>()
            .await;

        Ok(products)
    }

    /// Build one `Product`, degrading the generated text to the original
    /// description when synthesis fails. Infallible: one bad item must not
    /// take the rest of the list down.
    async fn enrich(&self, m: RetrievedMatch) -> Product {
        let name = m.metadata.name();
        let description = m.metadata.description();
        let image_url = m.metadata.image_url();

        let generated_description = match self.synthesizer.synthesize(&name, &description).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Synthesis failed for item {}: {}", m.id, e);
                description.clone()
            }
        };

        Product {
            id: m.id,
            name,
            image_url,
            description,
            generated_description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use curio_core::Error;
    use curio_index::MatchMetadata;
    use curio_synth::TextGenerator;
    use ndarray::Array1;
    use std::time::Duration;

    struct StubEmbedder {
        dim: usize,
    }

    #[async_trait]
    impl Embedder for StubEmbedder {
        async fn embed(&self, text: &str) -> curio_core::Result<Array1<f32>> {
            if text.trim().is_empty() {
                return Err(Error::InvalidRequest("query text is empty".into()));
            }
            // Tag the vector with the text length so a stub index can tell
            // queries apart.
            let mut v = Array1::zeros(self.dim);
            v[0] = text.len() as f32;
            Ok(v)
        }

        fn dimension(&self) -> usize {
            self.dim
        }
    }

    /// Returns canned matches whose ids embed the query tag, so mixed-up
    /// responses are detectable.
    struct StubIndex {
        items: Vec<(String, MatchMetadata)>,
        tag_ids: bool,
    }

    #[async_trait]
    impl SimilarityIndex for StubIndex {
        async fn query(
            &self,
            vector: &Array1<f32>,
            top_k: usize,
            _include_metadata: bool,
        ) -> curio_core::Result<Vec<RetrievedMatch>> {
            let tag = vector[0] as usize;
            Ok(self
                .items
                .iter()
                .take(top_k)
                .enumerate()
                .map(|(rank, (id, meta))| RetrievedMatch {
                    id: if self.tag_ids {
                        format!("{}-q{}", id, tag)
                    } else {
                        id.clone()
                    },
                    score: 1.0 - rank as f32 * 0.01,
                    metadata: meta.clone(),
                })
                .collect())
        }
    }

    struct FailingIndex;

    #[async_trait]
    impl SimilarityIndex for FailingIndex {
        async fn query(
            &self,
            _vector: &Array1<f32>,
            _top_k: usize,
            _include_metadata: bool,
        ) -> curio_core::Result<Vec<RetrievedMatch>> {
            Err(Error::ServiceUnavailable("index is down".into()))
        }
    }

    /// Prefixes the prompt; optionally fails when the prompt names a given
    /// item, and can sleep in reverse rank order to scramble completion
    /// timing.
    struct StubGenerator {
        fail_for: Option<String>,
        scramble: bool,
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, prompt: &str) -> curio_core::Result<String> {
            if let Some(needle) = &self.fail_for {
                if prompt.contains(needle.as_str()) {
                    return Err(Error::Synthesis("model refused".into()));
                }
            }
            if self.scramble {
                // Later items finish first.
                let delay = if prompt.contains("Alpha") { 30 } else { 1 };
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
            Ok(format!("generated: {}", prompt))
        }
    }

    fn meta(title: Option<&str>, desc: Option<&str>, images: Option<&str>) -> MatchMetadata {
        MatchMetadata {
            title: title.map(String::from),
            description: desc.map(String::from),
            images: images.map(String::from),
            ..Default::default()
        }
    }

    fn recommender(
        index: Arc<dyn SimilarityIndex>,
        generator: StubGenerator,
        concurrency: usize,
    ) -> Recommender {
        Recommender::new(
            Arc::new(StubEmbedder { dim: 8 }),
            index,
            Arc::new(DescriptionSynthesizer::new(Arc::new(generator))),
            concurrency,
        )
    }

    fn catalog(n: usize) -> Vec<(String, MatchMetadata)> {
        (0..n)
            .map(|i| {
                (
                    format!("item-{}", i),
                    meta(Some(&format!("Title {}", i)), Some(&format!("Desc {}", i)), None),
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_returns_exactly_k_in_rank_order() {
        let index = Arc::new(StubIndex { items: catalog(6), tag_ids: false });
        let r = recommender(index, StubGenerator { fail_for: None, scramble: false }, 4);

        let products = r
            .recommend(&Query { query: "sofa".into(), top_k: 4 })
            .await
            .unwrap();

        assert_eq!(products.len(), 4);
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["item-0", "item-1", "item-2", "item-3"]);
    }

    #[tokio::test]
    async fn test_short_index_returns_all_without_error() {
        let index = Arc::new(StubIndex { items: catalog(2), tag_ids: false });
        let r = recommender(index, StubGenerator { fail_for: None, scramble: false }, 4);

        let products = r
            .recommend(&Query { query: "sofa".into(), top_k: 10 })
            .await
            .unwrap();

        assert_eq!(products.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_metadata_gets_placeholders() {
        let items = vec![
            ("a1".to_string(), meta(Some("Lounge Chair"), Some("A simple chair."), Some("url1"))),
            ("a2".to_string(), meta(None, None, None)),
        ];
        let index = Arc::new(StubIndex { items, tag_ids: false });
        let r = recommender(index, StubGenerator { fail_for: None, scramble: false }, 2);

        let products = r
            .recommend(&Query { query: "cozy reading chair".into(), top_k: 2 })
            .await
            .unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, "a1");
        assert_eq!(products[0].name, "Lounge Chair");
        assert_eq!(products[1].id, "a2");
        assert_eq!(products[1].name, "N/A");
        assert_eq!(products[1].description, "");
        assert_eq!(products[1].image_url, "");
    }

    #[tokio::test]
    async fn test_per_item_synthesis_failure_falls_back() {
        let items = vec![
            ("a1".to_string(), meta(Some("Broken Lamp"), Some("Original lamp text."), None)),
            ("a2".to_string(), meta(Some("Fine Table"), Some("Original table text."), None)),
        ];
        let index = Arc::new(StubIndex { items, tag_ids: false });
        let r = recommender(
            index,
            StubGenerator { fail_for: Some("Broken Lamp".into()), scramble: false },
            2,
        );

        let products = r
            .recommend(&Query { query: "furniture".into(), top_k: 2 })
            .await
            .unwrap();

        // Failed item degrades to its original description...
        assert_eq!(products[0].generated_description, "Original lamp text.");
        // ...while the other item still gets synthesized text.
        assert!(products[1].generated_description.starts_with("generated:"));
    }

    #[tokio::test]
    async fn test_index_outage_aborts_whole_request() {
        let r = recommender(
            Arc::new(FailingIndex),
            StubGenerator { fail_for: None, scramble: false },
            2,
        );

        let err = r
            .recommend(&Query { query: "sofa".into(), top_k: 3 })
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ServiceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_invalid_queries_rejected_before_external_calls() {
        let r = recommender(
            Arc::new(FailingIndex),
            StubGenerator { fail_for: None, scramble: false },
            2,
        );

        // Empty text and zero top_k both fail as InvalidRequest even though
        // the index behind it would error.
        let err = r
            .recommend(&Query { query: "  ".into(), top_k: 3 })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));

        let err = r
            .recommend(&Query { query: "sofa".into(), top_k: 0 })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_completion_order_does_not_reorder_output() {
        let items = vec![
            ("first".to_string(), meta(Some("Alpha Chair"), Some("slow item"), None)),
            ("second".to_string(), meta(Some("Beta Chair"), Some("fast item"), None)),
            ("third".to_string(), meta(Some("Gamma Chair"), Some("fast item"), None)),
        ];
        let index = Arc::new(StubIndex { items, tag_ids: false });
        // Alpha (rank 0) finishes last; output must still lead with it.
        let r = recommender(index, StubGenerator { fail_for: None, scramble: true }, 3);

        let products = r
            .recommend(&Query { query: "chair".into(), top_k: 3 })
            .await
            .unwrap();

        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_concurrent_requests_do_not_mix_results() {
        let index = Arc::new(StubIndex { items: catalog(3), tag_ids: true });
        let r = Arc::new(recommender(
            index,
            StubGenerator { fail_for: None, scramble: true },
            2,
        ));

        // Different text lengths produce different vector tags, and the stub
        // index bakes the tag into every returned id.
        let q1 = Query { query: "sofa".into(), top_k: 3 };
        let q2 = Query { query: "reading lamp".into(), top_k: 3 };

        let (r1, r2) = tokio::join!(r.recommend(&q1), r.recommend(&q2));
        let (p1, p2) = (r1.unwrap(), r2.unwrap());

        assert!(p1.iter().all(|p| p.id.ends_with("-q4")));
        assert!(p2.iter().all(|p| p.id.ends_with("-q12")));
    }
}
