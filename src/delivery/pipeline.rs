use std::{path::PathBuf, sync::Arc};

use super::{
    capabilities::{ClipboardWriter, DownloadProxy, ImageStore, ShareTarget},
    disk_store::DiskImageStore,
    enums::{attempt_outcome::AttemptOutcome, share_outcome::ShareOutcome},
    errors::DeliveryError,
    headless_share::HeadlessShareTarget,
    models::delivery_attempt::DeliveryAttempt,
    proxy_client::HttpDownloadProxy,
    strategies::{
        clipboard_copy::ClipboardCopyStrategy, file_share::FileShareStrategy,
        link_share::LinkShareStrategy, ShareStrategy,
    },
    system_clipboard::SystemClipboard,
};
use crate::images::{errors::GenerationError, models::generated_image::GeneratedImage};

pub struct DeliveryPipeline {
    strategies: Vec<Box<dyn ShareStrategy>>,
    proxy: Arc<dyn DownloadProxy>,
    store: Arc<dyn ImageStore>,
}

impl DeliveryPipeline {
    pub fn new(
        proxy: Arc<dyn DownloadProxy>,
        target: Arc<dyn ShareTarget>,
        clipboard: Arc<dyn ClipboardWriter>,
        store: Arc<dyn ImageStore>,
    ) -> Self {
        let strategies: Vec<Box<dyn ShareStrategy>> = vec![
            Box::new(FileShareStrategy::new(proxy.clone(), target.clone())),
            Box::new(LinkShareStrategy::new(target)),
            Box::new(ClipboardCopyStrategy::new(clipboard)),
        ];

        Self::with_strategies(strategies, proxy, store)
    }

    pub fn with_strategies(
        strategies: Vec<Box<dyn ShareStrategy>>,
        proxy: Arc<dyn DownloadProxy>,
        store: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            strategies,
            proxy,
            store,
        }
    }

    pub fn for_desktop(
        http: reqwest::Client,
        proxy_endpoint: impl Into<String>,
        download_dir: impl Into<PathBuf>,
    ) -> Self {
        Self::new(
            Arc::new(HttpDownloadProxy::new(http, proxy_endpoint)),
            Arc::new(HeadlessShareTarget),
            Arc::new(SystemClipboard),
            Arc::new(DiskImageStore::new(download_dir)),
        )
    }

    pub async fn share(
        &self,
        image: &GeneratedImage,
        index: usize,
    ) -> Result<ShareOutcome, DeliveryError> {
        for strategy in &self.strategies {
            let attempt = DeliveryAttempt {
                strategy: strategy.kind(),
                outcome: strategy.attempt(image, index).await,
            };
            attempt.log(index);

            match attempt.outcome {
                AttemptOutcome::Success => return Ok(attempt.strategy.success_outcome()),
                AttemptOutcome::Cancelled => return Ok(ShareOutcome::Cancelled),
                AttemptOutcome::UnsupportedOrFailed(_) => continue,
            }
        }

        tracing::error!(index, url = %image.url, "every share strategy failed");
        Err(DeliveryError::DeliveryFailure)
    }

    pub async fn download(
        &self,
        image: &GeneratedImage,
        index: usize,
    ) -> Result<PathBuf, GenerationError> {
        let file_name = image.file_name(index);

        let data = self
            .proxy
            .fetch(&image.url, &file_name)
            .await
            .map_err(|e| GenerationError::DownloadFailed {
                detail: e.to_string(),
            })?;

        let path = self
            .store
            .save(&file_name, data)
            .await
            .map_err(|e| GenerationError::DownloadFailed {
                detail: e.to_string(),
            })?;

        tracing::debug!(index, path = %path.display(), "image downloaded");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::{
        errors::{FetchError, ShareError},
        fakes::{sample_image, FakeEnvironment},
    };

    fn pipeline(env: &Arc<FakeEnvironment>) -> DeliveryPipeline {
        DeliveryPipeline::new(env.clone(), env.clone(), env.clone(), env.clone())
    }

    #[tokio::test]
    async fn file_share_success_stops_the_chain() {
        let env = Arc::new(FakeEnvironment::new());

        let outcome = pipeline(&env).share(&sample_image(), 0).await;

        assert_eq!(outcome, Ok(ShareOutcome::Shared));
        assert_eq!(
            env.calls(),
            vec![
                "fetch https://cdn.example.com/out-0.webp generated-image-1.webp",
                "share_files generated-image-1.webp image/webp",
            ]
        );
    }

    #[tokio::test]
    async fn no_share_support_ends_on_clipboard() {
        let env = Arc::new(FakeEnvironment {
            files_supported: false,
            links_supported: false,
            ..FakeEnvironment::new()
        });

        let outcome = pipeline(&env).share(&sample_image(), 0).await;

        assert_eq!(outcome, Ok(ShareOutcome::LinkCopied));
        assert_eq!(
            outcome.unwrap().message(),
            Some("Link copied to clipboard.")
        );
        assert_eq!(
            env.calls(),
            vec!["write_text https://cdn.example.com/out-0.webp"]
        );
    }

    #[tokio::test]
    async fn strategies_run_in_order_until_one_succeeds() {
        let env = Arc::new(FakeEnvironment {
            fetch_result: Err(FetchError::Network("offline".to_string())),
            link_share_result: Err(ShareError::Failed("no targets".to_string())),
            ..FakeEnvironment::new()
        });

        let outcome = pipeline(&env).share(&sample_image(), 2).await;

        assert_eq!(outcome, Ok(ShareOutcome::LinkCopied));
        assert_eq!(
            env.calls(),
            vec![
                "fetch https://cdn.example.com/out-0.webp generated-image-3.webp",
                "share_link https://cdn.example.com/out-0.webp",
                "write_text https://cdn.example.com/out-0.webp",
            ]
        );
    }

    #[tokio::test]
    async fn cancelled_file_share_moves_on_to_link_share() {
        let env = Arc::new(FakeEnvironment {
            file_share_result: Err(ShareError::Cancelled),
            ..FakeEnvironment::new()
        });

        let outcome = pipeline(&env).share(&sample_image(), 0).await;

        assert_eq!(outcome, Ok(ShareOutcome::Shared));
        assert_eq!(env.calls().len(), 3);
    }

    #[tokio::test]
    async fn cancelled_link_share_skips_clipboard() {
        let env = Arc::new(FakeEnvironment {
            files_supported: false,
            link_share_result: Err(ShareError::Cancelled),
            ..FakeEnvironment::new()
        });

        let outcome = pipeline(&env).share(&sample_image(), 0).await;

        assert_eq!(outcome, Ok(ShareOutcome::Cancelled));
        assert_eq!(ShareOutcome::Cancelled.message(), None);
        assert!(!env.calls().iter().any(|call| call.starts_with("write_text")));
    }

    #[tokio::test]
    async fn exhausting_every_strategy_is_a_delivery_failure() {
        let env = Arc::new(FakeEnvironment {
            files_supported: false,
            links_supported: false,
            clipboard_result: Err("clipboard unavailable".to_string()),
            ..FakeEnvironment::new()
        });
        let pipeline = pipeline(&env);

        let first = pipeline.share(&sample_image(), 0).await;
        let second = pipeline.share(&sample_image(), 0).await;

        assert_eq!(first, Err(DeliveryError::DeliveryFailure));
        assert_eq!(first, second);
        assert_eq!(
            DeliveryError::DeliveryFailure.to_string(),
            "Sharing failed, try downloading instead."
        );
    }

    #[tokio::test]
    async fn download_saves_under_generated_name() {
        let env = Arc::new(FakeEnvironment::new());

        let path = pipeline(&env).download(&sample_image(), 0).await.unwrap();

        assert_eq!(path, PathBuf::from("generated-image-1.webp"));
        assert_eq!(
            env.calls(),
            vec![
                "fetch https://cdn.example.com/out-0.webp generated-image-1.webp",
                "save generated-image-1.webp 11",
            ]
        );
    }

    #[tokio::test]
    async fn download_fetch_failure_is_reported() {
        let env = Arc::new(FakeEnvironment {
            fetch_result: Err(FetchError::Status(502)),
            ..FakeEnvironment::new()
        });

        let result = pipeline(&env).download(&sample_image(), 0).await;

        assert_eq!(
            result,
            Err(GenerationError::DownloadFailed {
                detail: "download proxy responded 502".to_string()
            })
        );
        assert_eq!(env.calls().len(), 1);
    }

    #[tokio::test]
    async fn download_store_failure_is_reported() {
        let env = Arc::new(FakeEnvironment {
            store_fails: true,
            ..FakeEnvironment::new()
        });

        let result = pipeline(&env).download(&sample_image(), 0).await;

        assert!(matches!(result, Err(GenerationError::DownloadFailed { .. })));
    }
}
