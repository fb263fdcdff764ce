//! Tests for the aggregated search fan-out.

mod test_utils;

use atelier::{AtelierErrorKind, ProviderFilter, ProviderKind, Section};
use tempfile::TempDir;
use test_utils::{MockProvider, seed_asset, service_with};

#[tokio::test]
async fn test_local_only_search_matches_substring() {
    let temp = TempDir::new().unwrap();
    let service = service_with(&temp, vec![]);

    seed_asset(&service, Section::Blog, "azure-security.jpg", None).await;
    seed_asset(&service, Section::Blog, "team.jpg", None).await;

    let results = service
        .search_images("azure", 1, 10, ProviderFilter::All)
        .await
        .unwrap();

    assert_eq!(results.images.len(), 1);
    assert_eq!(results.images[0].id, "azure-security.jpg");
    assert_eq!(results.images[0].source_label, "local");
    assert!(results.error.is_none());
}

#[tokio::test]
async fn test_partial_provider_failure_is_isolated() {
    let temp = TempDir::new().unwrap();
    let service = service_with(
        &temp,
        vec![
            MockProvider::succeeding(ProviderKind::Unsplash, vec!["u1", "u2"]),
            MockProvider::failing(ProviderKind::Pexels, "rate limited"),
        ],
    );
    seed_asset(&service, Section::Blog, "blog-harbor-1.jpg", None).await;

    let results = service
        .search_images("harbor", 1, 10, ProviderFilter::All)
        .await
        .unwrap();

    // Local results plus the surviving provider; the failed provider
    // contributes zero images and does not abort the aggregate.
    assert!(results.error.is_none());
    assert_eq!(results.images.len(), 3);
    assert!(results.images.iter().any(|i| i.source_label == "local"));
    assert_eq!(
        results
            .images
            .iter()
            .filter(|i| i.source_label == "unsplash")
            .count(),
        2
    );
    assert!(!results.images.iter().any(|i| i.source_label == "pexels"));
}

#[tokio::test]
async fn test_total_provider_outage_still_returns_local() {
    let temp = TempDir::new().unwrap();
    let service = service_with(
        &temp,
        vec![
            MockProvider::failing(ProviderKind::Unsplash, "down"),
            MockProvider::failing(ProviderKind::Pexels, "down"),
            MockProvider::failing(ProviderKind::Pixabay, "down"),
        ],
    );
    seed_asset(&service, Section::Services, "service-harbor-1.jpg", None).await;

    let results = service
        .search_images("harbor", 1, 10, ProviderFilter::All)
        .await
        .unwrap();

    assert_eq!(results.images.len(), 1);
    assert_eq!(results.images[0].source_label, "local");
}

#[tokio::test]
async fn test_local_results_come_first() {
    let temp = TempDir::new().unwrap();
    let service = service_with(
        &temp,
        vec![MockProvider::succeeding(ProviderKind::Unsplash, vec!["u1"])],
    );
    seed_asset(&service, Section::Blog, "blog-harbor-1.jpg", None).await;

    let results = service
        .search_images("harbor", 1, 10, ProviderFilter::All)
        .await
        .unwrap();

    assert_eq!(results.images[0].source_label, "local");
    assert_eq!(results.images[1].source_label, "unsplash");
}

#[tokio::test]
async fn test_single_provider_result_is_unwrapped() {
    let temp = TempDir::new().unwrap();
    let service = service_with(
        &temp,
        vec![MockProvider::failing(ProviderKind::Pexels, "boom")],
    );

    let results = service
        .search_images(
            "harbor",
            1,
            10,
            ProviderFilter::Provider(ProviderKind::Pexels),
        )
        .await
        .unwrap();

    // The adapter's soft-failure shape passes through unmodified.
    assert!(results.images.is_empty());
    assert_eq!(results.error.as_deref(), Some("boom"));
}

#[tokio::test]
async fn test_unconfigured_provider_is_a_soft_failure() {
    let temp = TempDir::new().unwrap();
    let service = service_with(&temp, vec![]);

    let results = service
        .search_images(
            "harbor",
            1,
            10,
            ProviderFilter::Provider(ProviderKind::Pixabay),
        )
        .await
        .unwrap();

    assert!(results.images.is_empty());
    assert!(results.error.unwrap().contains("not configured"));
}

#[tokio::test]
async fn test_local_filter_ignores_providers() {
    let temp = TempDir::new().unwrap();
    let service = service_with(
        &temp,
        vec![MockProvider::succeeding(ProviderKind::Unsplash, vec!["u1"])],
    );
    seed_asset(&service, Section::Blog, "blog-harbor-1.jpg", None).await;

    let results = service
        .search_images("harbor", 1, 10, ProviderFilter::Local)
        .await
        .unwrap();

    assert_eq!(results.images.len(), 1);
    assert_eq!(results.images[0].source_label, "local");
}

#[tokio::test]
async fn test_unknown_filter_yields_empty_results() {
    let temp = TempDir::new().unwrap();
    let service = service_with(
        &temp,
        vec![MockProvider::succeeding(ProviderKind::Unsplash, vec!["u1"])],
    );

    let results = service
        .search_images(
            "harbor",
            1,
            10,
            ProviderFilter::Unknown("imgur".to_string()),
        )
        .await
        .unwrap();

    assert!(results.images.is_empty());
    assert!(results.error.is_none());
}

#[tokio::test]
async fn test_empty_query_is_rejected_before_io() {
    let temp = TempDir::new().unwrap();
    let service = service_with(&temp, vec![]);

    for query in ["", "   ", "\t\n"] {
        let err = service
            .search_images(query, 1, 10, ProviderFilter::All)
            .await
            .unwrap_err();
        assert!(matches!(err.kind(), AtelierErrorKind::Search(_)));
    }
}
