//! Link creation, listing, deletion, and QR artifact maintenance.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::qr::QrBuilder;
use crate::utils::code_generator::{generate_code, validate_custom_code};
use crate::utils::url_normalizer::normalize_target;
use serde_json::json;
use tracing::warn;

/// Outcome of a QR backfill pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackfillSummary {
    /// Links inspected.
    pub total: usize,
    /// Artifacts (re)built and attached.
    pub rebuilt: usize,
    /// Links skipped because they already carried an artifact.
    pub skipped: usize,
    /// Links whose build or attach failed; the pass continued past them.
    pub failed: usize,
}

/// Service for creating and maintaining shortened links.
///
/// Creation runs in two explicit stages: the record is persisted first,
/// then an artifact build-and-attach is attempted. The second stage is
/// allowed to fail - a link without an artifact is still fully resolvable
/// and can be repaired by [`Self::backfill_qr_artifacts`].
pub struct LinkService<R: LinkRepository, Q: QrBuilder> {
    links: Arc<R>,
    qr: Arc<Q>,
}

impl<R: LinkRepository, Q: QrBuilder> LinkService<R, Q> {
    /// Creates a new link service.
    pub fn new(links: Arc<R>, qr: Arc<Q>) -> Self {
        Self { links, qr }
    }

    /// Creates a short link for `target`.
    ///
    /// The target is normalized to carry an explicit scheme (`http://` is
    /// prepended when missing). With a custom code the insert goes straight
    /// to the store and a duplicate surfaces as [`AppError::Conflict`];
    /// without one, generated codes are retried on conflict.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an invalid target or custom code.
    /// Returns [`AppError::Conflict`] when the custom code is already taken.
    pub async fn create_link(
        &self,
        target: String,
        custom_code: Option<String>,
    ) -> Result<Link, AppError> {
        let target_url = normalize_target(&target).map_err(|e| {
            AppError::bad_request("Invalid target URL", json!({ "reason": e.to_string() }))
        })?;

        let link = match custom_code {
            Some(code) => {
                validate_custom_code(&code)?;
                self.links.create(NewLink { code, target_url }).await?
            }
            None => self.create_with_generated_code(target_url).await?,
        };

        Ok(self.try_attach_artifact(link).await)
    }

    /// Lists all links, most recently created first.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.links.list_all().await
    }

    /// Deletes a link by id. Returns `false` when the id is unknown.
    pub async fn delete_link(&self, id: i64) -> Result<bool, AppError> {
        self.links.delete_by_id(id).await
    }

    /// Counts stored links.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        self.links.count().await
    }

    /// Rebuilds QR artifacts across the whole table.
    ///
    /// With `only_missing` set, links that already carry an artifact are
    /// left alone; otherwise every artifact is regenerated (used when the
    /// visual profile changes). Individual build or attach failures are
    /// logged and counted without aborting the pass.
    pub async fn backfill_qr_artifacts(
        &self,
        only_missing: bool,
    ) -> Result<BackfillSummary, AppError> {
        let links = self.links.list_all().await?;

        let mut summary = BackfillSummary {
            total: links.len(),
            rebuilt: 0,
            skipped: 0,
            failed: 0,
        };

        for link in links {
            if only_missing && link.has_artifact() {
                summary.skipped += 1;
                continue;
            }

            match self.qr.build(&link.target_url) {
                Ok(artifact) => match self.links.attach_qr_artifact(link.id, &artifact).await {
                    Ok(Some(_)) => summary.rebuilt += 1,
                    Ok(None) => {
                        warn!(id = link.id, code = %link.code, "Link removed during backfill");
                        summary.failed += 1;
                    }
                    Err(e) => {
                        warn!(error = %e, id = link.id, "Failed to attach QR artifact");
                        summary.failed += 1;
                    }
                },
                Err(e) => {
                    warn!(error = %e, code = %link.code, "QR generation failed");
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Inserts with generated codes, retrying on conflict.
    ///
    /// The store's unique constraint is the collision detector; a conflict
    /// just means another record got the code first.
    async fn create_with_generated_code(&self, target_url: String) -> Result<Link, AppError> {
        const MAX_ATTEMPTS: usize = 10;

        for _ in 0..MAX_ATTEMPTS {
            let new_link = NewLink {
                code: generate_code(),
                target_url: target_url.clone(),
            };

            match self.links.create(new_link).await {
                Err(AppError::Conflict { .. }) => continue,
                other => return other,
            }
        }

        Err(AppError::internal(
            "Failed to allocate a unique short code",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Second creation stage: build and attach the QR artifact.
    ///
    /// Never fails the creation - on any error the freshly persisted link
    /// is returned as-is, with `qr_artifact` still empty.
    async fn try_attach_artifact(&self, link: Link) -> Link {
        let artifact = match self.qr.build(&link.target_url) {
            Ok(artifact) => artifact,
            Err(e) => {
                warn!(error = %e, code = %link.code, "QR generation failed; link persists without artifact");
                return link;
            }
        };

        match self.links.attach_qr_artifact(link.id, &artifact).await {
            Ok(Some(updated)) => updated,
            Ok(None) => {
                warn!(id = link.id, "Link deleted before QR artifact could be attached");
                link
            }
            Err(e) => {
                warn!(error = %e, id = link.id, "Failed to attach QR artifact");
                link
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::infrastructure::qr::{MockQrBuilder, QrBuildError};
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn test_link(id: i64, code: &str, url: &str) -> Link {
        let now = Utc::now();
        Link {
            id,
            code: code.to_string(),
            target_url: url.to_string(),
            click_count: 0,
            last_clicked_at: None,
            qr_artifact: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn with_artifact(mut link: Link, artifact: &str) -> Link {
        link.qr_artifact = Some(artifact.to_string());
        link
    }

    fn encode_failure() -> QrBuildError {
        QrBuildError::Encoding(qrcode::types::QrError::DataTooLong)
    }

    #[tokio::test]
    async fn test_create_link_with_generated_code() {
        let mut links = MockLinkRepository::new();
        let mut qr = MockQrBuilder::new();

        links
            .expect_create()
            .withf(|new_link| new_link.code.len() == 12)
            .times(1)
            .returning(|new_link| Ok(test_link(1, &new_link.code, &new_link.target_url)));

        qr.expect_build()
            .times(1)
            .returning(|_| Ok("data:image/svg+xml;base64,QQ".to_string()));

        links
            .expect_attach_qr_artifact()
            .times(1)
            .returning(|id, artifact| {
                Ok(Some(with_artifact(
                    test_link(id, "generated", "https://example.com"),
                    artifact,
                )))
            });

        let service = LinkService::new(Arc::new(links), Arc::new(qr));

        let link = service
            .create_link("https://example.com".to_string(), None)
            .await
            .unwrap();

        assert!(link.has_artifact());
    }

    #[tokio::test]
    async fn test_create_link_normalizes_target() {
        let mut links = MockLinkRepository::new();
        let mut qr = MockQrBuilder::new();

        links
            .expect_create()
            .withf(|new_link| new_link.target_url == "http://example.com")
            .times(1)
            .returning(|new_link| Ok(test_link(1, &new_link.code, &new_link.target_url)));

        qr.expect_build()
            .returning(|_| Ok("data:image/svg+xml;base64,QQ".to_string()));
        links
            .expect_attach_qr_artifact()
            .returning(|id, artifact| {
                Ok(Some(with_artifact(
                    test_link(id, "x", "http://example.com"),
                    artifact,
                )))
            });

        let service = LinkService::new(Arc::new(links), Arc::new(qr));

        let result = service.create_link("example.com".to_string(), None).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_link_rejects_invalid_target() {
        let links = MockLinkRepository::new();
        let qr = MockQrBuilder::new();

        let service = LinkService::new(Arc::new(links), Arc::new(qr));

        let result = service.create_link("   ".to_string(), None).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_link_custom_code_conflict_propagates() {
        let mut links = MockLinkRepository::new();
        let qr = MockQrBuilder::new();

        links.expect_create().times(1).returning(|new_link| {
            Err(AppError::conflict(
                "Short code already in use",
                json!({ "code": new_link.code }),
            ))
        });

        let service = LinkService::new(Arc::new(links), Arc::new(qr));

        let result = service
            .create_link(
                "https://example.com".to_string(),
                Some("taken".to_string()),
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_create_link_rejects_empty_custom_code() {
        let links = MockLinkRepository::new();
        let qr = MockQrBuilder::new();

        let service = LinkService::new(Arc::new(links), Arc::new(qr));

        let result = service
            .create_link("https://example.com".to_string(), Some(String::new()))
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_generated_code_retries_on_conflict() {
        let mut links = MockLinkRepository::new();
        let mut qr = MockQrBuilder::new();

        let attempts = AtomicUsize::new(0);
        links.expect_create().times(2).returning(move |new_link| {
            if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(AppError::conflict("Short code already in use", json!({})))
            } else {
                Ok(test_link(7, &new_link.code, &new_link.target_url))
            }
        });

        qr.expect_build()
            .returning(|_| Ok("data:image/svg+xml;base64,QQ".to_string()));
        links
            .expect_attach_qr_artifact()
            .returning(|id, artifact| {
                Ok(Some(with_artifact(
                    test_link(id, "second", "https://example.com"),
                    artifact,
                )))
            });

        let service = LinkService::new(Arc::new(links), Arc::new(qr));

        let result = service
            .create_link("https://example.com".to_string(), None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_qr_failure_does_not_fail_creation() {
        let mut links = MockLinkRepository::new();
        let mut qr = MockQrBuilder::new();

        links
            .expect_create()
            .times(1)
            .returning(|new_link| Ok(test_link(3, &new_link.code, &new_link.target_url)));

        qr.expect_build().times(1).returning(|_| Err(encode_failure()));

        // attach must never be called when the build failed
        links.expect_attach_qr_artifact().times(0);

        let service = LinkService::new(Arc::new(links), Arc::new(qr));

        let link = service
            .create_link("https://example.com".to_string(), None)
            .await
            .unwrap();

        assert!(link.qr_artifact.is_none());
    }

    #[tokio::test]
    async fn test_attach_miss_keeps_created_link() {
        let mut links = MockLinkRepository::new();
        let mut qr = MockQrBuilder::new();

        links
            .expect_create()
            .returning(|new_link| Ok(test_link(4, &new_link.code, &new_link.target_url)));
        qr.expect_build()
            .returning(|_| Ok("data:image/svg+xml;base64,QQ".to_string()));
        links
            .expect_attach_qr_artifact()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = LinkService::new(Arc::new(links), Arc::new(qr));

        let link = service
            .create_link("https://example.com".to_string(), None)
            .await
            .unwrap();

        assert_eq!(link.id, 4);
        assert!(link.qr_artifact.is_none());
    }

    #[tokio::test]
    async fn test_backfill_only_missing_skips_attached() {
        let mut links = MockLinkRepository::new();
        let mut qr = MockQrBuilder::new();

        links.expect_list_all().times(1).returning(|| {
            Ok(vec![
                test_link(1, "bare", "https://a.example"),
                with_artifact(test_link(2, "done", "https://b.example"), "old"),
            ])
        });

        qr.expect_build()
            .times(1)
            .returning(|_| Ok("data:image/svg+xml;base64,QQ".to_string()));

        links
            .expect_attach_qr_artifact()
            .times(1)
            .returning(|id, artifact| {
                Ok(Some(with_artifact(
                    test_link(id, "bare", "https://a.example"),
                    artifact,
                )))
            });

        let service = LinkService::new(Arc::new(links), Arc::new(qr));

        let summary = service.backfill_qr_artifacts(true).await.unwrap();

        assert_eq!(summary.total, 2);
        assert_eq!(summary.rebuilt, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 0);
    }

    #[tokio::test]
    async fn test_backfill_continues_past_failures() {
        let mut links = MockLinkRepository::new();
        let mut qr = MockQrBuilder::new();

        links.expect_list_all().times(1).returning(|| {
            Ok(vec![
                test_link(1, "bad", "https://too-long.example"),
                test_link(2, "good", "https://b.example"),
            ])
        });

        qr.expect_build().times(2).returning(|url| {
            if url.contains("too-long") {
                Err(encode_failure())
            } else {
                Ok("data:image/svg+xml;base64,QQ".to_string())
            }
        });

        links
            .expect_attach_qr_artifact()
            .times(1)
            .returning(|id, artifact| {
                Ok(Some(with_artifact(
                    test_link(id, "good", "https://b.example"),
                    artifact,
                )))
            });

        let service = LinkService::new(Arc::new(links), Arc::new(qr));

        let summary = service.backfill_qr_artifacts(false).await.unwrap();

        assert_eq!(summary.rebuilt, 1);
        assert_eq!(summary.failed, 1);
    }

    #[tokio::test]
    async fn test_delete_link_passthrough() {
        let mut links = MockLinkRepository::new();
        let qr = MockQrBuilder::new();

        links
            .expect_delete_by_id()
            .withf(|&id| id == 42)
            .times(1)
            .returning(|_| Ok(true));

        let service = LinkService::new(Arc::new(links), Arc::new(qr));

        assert!(service.delete_link(42).await.unwrap());
    }
}
