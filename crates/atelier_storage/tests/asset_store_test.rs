//! Tests for the section-partitioned asset store.

use atelier_core::Section;
use atelier_storage::{AssetStore, Metadata, read_sidecar, sidecar_path, write_sidecar};
use serde_json::json;
use tempfile::TempDir;

fn store() -> (TempDir, AssetStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = AssetStore::new(temp_dir.path());
    (temp_dir, store)
}

async fn seed(store: &AssetStore, section: Section, filename: &str, metadata: Option<Metadata>) {
    store
        .save_bytes(section, filename, b"not really an image")
        .await
        .unwrap();
    if let Some(metadata) = metadata {
        store
            .write_metadata(section, filename, &metadata)
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn test_save_bytes_and_exists() {
    let (_guard, store) = store();

    let path = store
        .save_bytes(Section::Blog, "blog-a-1.jpg", b"bytes")
        .await
        .unwrap();

    assert!(store.exists(&path).await);
    assert_eq!(path, store.asset_path(Section::Blog, "blog-a-1.jpg"));
    assert_eq!(tokio::fs::read(&path).await.unwrap(), b"bytes");
}

#[tokio::test]
async fn test_dir_url_round_trip() {
    let (_guard, store) = store();

    for section in [
        Section::Blog,
        Section::Services,
        Section::Showcase,
        Section::Imported,
    ] {
        let url = store.image_url(section, "f.png");
        // The URL path resolves deterministically back to the asset path
        // under the serving operation.
        let filename = url.rsplit('/').next().unwrap();
        let section_part = url.split('/').nth(2).unwrap();
        assert_eq!(section_part, section.as_str());
        assert_eq!(
            store.asset_path(section, filename),
            store.images_dir(section).join("f.png")
        );
    }
}

#[tokio::test]
async fn test_list_images_excludes_sidecars_and_non_images() {
    let (_guard, store) = store();

    let mut metadata = Metadata::new();
    metadata.insert("originalName".into(), json!("Harbor.jpg"));
    metadata.insert("alt".into(), json!("a harbor at dusk"));
    seed(&store, Section::Blog, "blog-harbor-1.jpg", Some(metadata)).await;
    seed(&store, Section::Blog, "notes.txt", None).await;

    let images = store.list_images(Section::Blog).await;
    assert_eq!(images.len(), 1);

    let image = &images[0];
    assert_eq!(image.id, "blog-harbor-1.jpg");
    assert_eq!(image.name, "Harbor.jpg");
    assert_eq!(image.alt.as_deref(), Some("a harbor at dusk"));
    assert_eq!(image.section, Some(Section::Blog));
    assert_eq!(image.source_label, "local");
    assert_eq!(image.url, "/images/blog/blog-harbor-1.jpg");
}

#[tokio::test]
async fn test_list_images_missing_directory_is_empty() {
    let (_guard, store) = store();
    assert!(store.list_images(Section::Showcase).await.is_empty());
}

#[tokio::test]
async fn test_corrupt_sidecar_degrades_to_defaults() {
    let (_guard, store) = store();

    seed(&store, Section::Blog, "blog-ok-1.jpg", None).await;
    seed(&store, Section::Blog, "blog-bad-2.jpg", None).await;
    let bad_sidecar = sidecar_path(&store.asset_path(Section::Blog, "blog-bad-2.jpg"));
    tokio::fs::write(&bad_sidecar, b"{ not json").await.unwrap();

    // The file with the unparsable sidecar still lists, with default
    // metadata for that entry only.
    let images = store.list_images(Section::Blog).await;
    assert_eq!(images.len(), 2);
    let bad = images.iter().find(|i| i.id == "blog-bad-2.jpg").unwrap();
    assert_eq!(bad.name, "blog-bad-2.jpg");
    assert!(bad.alt.is_none());
}

#[tokio::test]
async fn test_search_is_case_insensitive_over_filename_alt_and_section() {
    let (_guard, store) = store();

    let mut metadata = Metadata::new();
    metadata.insert("alt".into(), json!("Azure security diagram"));
    seed(&store, Section::Blog, "blog-cloud-1.jpg", Some(metadata)).await;
    seed(&store, Section::Blog, "blog-team-2.jpg", None).await;

    // Filename match
    assert_eq!(store.search_images(Section::Blog, "TEAM").await.len(), 1);
    // Alt text match
    assert_eq!(store.search_images(Section::Blog, "azure").await.len(), 1);
    // Section name match
    assert_eq!(store.search_images(Section::Blog, "blog").await.len(), 2);
    // No match
    assert!(store.search_images(Section::Blog, "nothing").await.is_empty());
}

#[tokio::test]
async fn test_search_all_sections_labels_hits() {
    let (_guard, store) = store();

    seed(&store, Section::Blog, "blog-azure-1.jpg", None).await;
    seed(&store, Section::Services, "service-azure-2.jpg", None).await;

    let hits = store.search_all_sections("azure").await;
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().any(|h| h.section == Some(Section::Blog)));
    assert!(hits.iter().any(|h| h.section == Some(Section::Services)));
    assert!(hits.iter().all(|h| h.source_label == "local"));
}

#[tokio::test]
async fn test_delete_removes_binary_and_sidecar() {
    let (_guard, store) = store();

    let mut metadata = Metadata::new();
    metadata.insert("alt".into(), json!("x"));
    seed(&store, Section::Blog, "blog-x-1.jpg", Some(metadata)).await;

    let outcome = store.delete_image(Section::Blog, "blog-x-1.jpg").await;
    assert!(outcome.success);

    let path = store.asset_path(Section::Blog, "blog-x-1.jpg");
    assert!(!store.exists(&path).await);
    assert!(!store.exists(&sidecar_path(&path)).await);
}

#[tokio::test]
async fn test_delete_missing_asset_is_a_failure_outcome() {
    let (_guard, store) = store();

    let outcome = store.delete_image(Section::Blog, "blog-ghost-9.jpg").await;
    assert!(!outcome.success);
    assert!(outcome.error.is_some());
    assert!(store.list_images(Section::Blog).await.is_empty());
}

#[tokio::test]
async fn test_delete_cleans_orphan_sidecar() {
    let (_guard, store) = store();

    // Sidecar with no binary: the delete still removes it.
    let mut metadata = Metadata::new();
    metadata.insert("alt".into(), json!("orphan"));
    store
        .write_metadata(Section::Blog, "blog-orphan-1.jpg", &metadata)
        .await
        .unwrap();

    let outcome = store.delete_image(Section::Blog, "blog-orphan-1.jpg").await;
    assert!(!outcome.success);

    let sidecar = sidecar_path(&store.asset_path(Section::Blog, "blog-orphan-1.jpg"));
    assert!(!store.exists(&sidecar).await);
}

#[tokio::test]
async fn test_adopt_staged_moves_file() {
    let (_guard, store) = store();

    let staging = TempDir::new().unwrap();
    let staged = staging.path().join("upload-123.tmp");
    tokio::fs::write(&staged, b"staged bytes").await.unwrap();

    let path = store
        .adopt_staged(Section::Services, "service-a-1.jpg", &staged)
        .await
        .unwrap();

    assert!(store.exists(&path).await);
    assert!(!store.exists(&staged).await);
    assert_eq!(tokio::fs::read(&path).await.unwrap(), b"staged bytes");
}

#[tokio::test]
async fn test_adopt_staged_missing_source_fails() {
    let (_guard, store) = store();

    let result = store
        .adopt_staged(
            Section::Blog,
            "blog-a-1.jpg",
            std::path::Path::new("/nonexistent/staged.tmp"),
        )
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_sidecar_round_trip_and_degraded_read() {
    let (_guard, store) = store();

    let path = store.asset_path(Section::Blog, "blog-a-1.jpg");
    let sidecar = sidecar_path(&path);

    // Missing sidecar reads as empty metadata, never an error.
    assert!(read_sidecar(&sidecar).await.is_empty());

    store.save_bytes(Section::Blog, "blog-a-1.jpg", b"x").await.unwrap();
    let mut metadata = Metadata::new();
    metadata.insert("alt".into(), json!("written"));
    write_sidecar(&sidecar, &metadata).await.unwrap();

    let read_back = read_sidecar(&sidecar).await;
    assert_eq!(read_back.get("alt"), Some(&json!("written")));
}

#[tokio::test]
async fn test_stream_image() {
    let (_guard, store) = store();

    seed(&store, Section::Showcase, "showcase-a-1.png", None).await;
    let path = store.asset_path(Section::Showcase, "showcase-a-1.png");

    let mut sink = Vec::new();
    let bytes = store.stream_image(&path, &mut sink).await.unwrap();
    assert_eq!(bytes as usize, sink.len());
    assert_eq!(sink, b"not really an image");
}

#[tokio::test]
async fn test_stream_missing_image_without_fallback_is_not_found() {
    let (_guard, store) = store();

    let path = store.asset_path(Section::Blog, "blog-missing-1.jpg");
    let mut sink = Vec::new();
    let result = store.stream_image(&path, &mut sink).await;

    assert!(result.is_err());
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_stream_missing_image_uses_fallback() {
    let temp_dir = TempDir::new().unwrap();
    let fallback = temp_dir.path().join("default.jpg");
    tokio::fs::write(&fallback, b"fallback bytes").await.unwrap();

    let store = AssetStore::new(temp_dir.path().join("images")).with_fallback_image(&fallback);

    let path = store.asset_path(Section::Blog, "blog-missing-1.jpg");
    let mut sink = Vec::new();
    store.stream_image(&path, &mut sink).await.unwrap();
    assert_eq!(sink, b"fallback bytes");
}
