//! Tests for core data types.

use atelier_core::{
    ImageDescriptor, ProviderConfig, ProviderFilter, ProviderKind, SearchResults, Section,
    mask_api_key,
};

#[test]
fn test_section_parsing() {
    assert_eq!("blog".parse::<Section>().unwrap(), Section::Blog);
    assert_eq!("Showcase".parse::<Section>().unwrap(), Section::Showcase);
    // Both the singular and plural forms appear in caller metadata.
    assert_eq!("service".parse::<Section>().unwrap(), Section::Services);
    assert_eq!("services".parse::<Section>().unwrap(), Section::Services);
    assert_eq!("imported".parse::<Section>().unwrap(), Section::Imported);
    assert!("gallery".parse::<Section>().is_err());
}

#[test]
fn test_section_parse_or_default() {
    assert_eq!(Section::parse_or_default(Some("showcase")), Section::Showcase);
    assert_eq!(Section::parse_or_default(Some("nonsense")), Section::Blog);
    assert_eq!(Section::parse_or_default(None), Section::Blog);
}

#[test]
fn test_section_filename_prefix() {
    assert_eq!(Section::Blog.filename_prefix(), "blog");
    assert_eq!(Section::Services.filename_prefix(), "service");
    assert_eq!(Section::Showcase.filename_prefix(), "showcase");
}

#[test]
fn test_section_url() {
    assert_eq!(
        Section::Blog.url_for("blog-a-1.jpg"),
        "/images/blog/blog-a-1.jpg"
    );
    assert_eq!(Section::Services.url_for("x.png"), "/images/services/x.png");
}

#[test]
fn test_provider_filter_parsing() {
    assert_eq!("all".parse::<ProviderFilter>().unwrap(), ProviderFilter::All);
    assert_eq!(
        "LOCAL".parse::<ProviderFilter>().unwrap(),
        ProviderFilter::Local
    );
    assert_eq!(
        "pixabay".parse::<ProviderFilter>().unwrap(),
        ProviderFilter::Provider(ProviderKind::Pixabay)
    );
    assert_eq!(
        "imgur".parse::<ProviderFilter>().unwrap(),
        ProviderFilter::Unknown("imgur".to_string())
    );
}

#[test]
fn test_mask_api_key() {
    assert_eq!(mask_api_key("abcd1234efgh5678"), "abcd********5678");
    assert_eq!(mask_api_key("12345678"), "****");
    assert_eq!(mask_api_key(""), "****");
}

#[test]
fn test_provider_config_keys() {
    let config = ProviderConfig::default()
        .with_key(ProviderKind::Unsplash, "unsplash-access-key-1")
        .with_key(ProviderKind::Pexels, "pexels-key-2222");

    assert!(config.is_configured(ProviderKind::Unsplash));
    assert!(config.is_configured(ProviderKind::Pexels));
    assert!(!config.is_configured(ProviderKind::Pixabay));

    assert_eq!(config.key_for(ProviderKind::Pexels), Some("pexels-key-2222"));
    assert_eq!(config.masked_key(ProviderKind::Pixabay), None);

    let masked = config.masked_key(ProviderKind::Unsplash).unwrap();
    assert!(masked.starts_with("unsp"));
    assert!(masked.ends_with("ey-1"));
    assert!(masked.contains('*'));
}

#[test]
fn test_search_results_constructors() {
    let empty = SearchResults::empty();
    assert!(empty.images.is_empty());
    assert!(empty.error.is_none());

    let failed = SearchResults::failure("rate limited");
    assert!(failed.images.is_empty());
    assert_eq!(failed.error.as_deref(), Some("rate limited"));

    let hits = SearchResults::from_images(vec![
        ImageDescriptor::new("a", "A", "https://x/a.jpg", "local"),
        ImageDescriptor::new("b", "B", "https://x/b.jpg", "local"),
    ]);
    assert_eq!(hits.total, 2);
    assert_eq!(hits.total_pages, 1);
}

#[test]
fn test_descriptor_serialization_shape() {
    let mut descriptor = ImageDescriptor::new("id-1", "Harbor", "https://x/1.jpg", "unsplash");
    descriptor.author_name = Some("Ada".to_string());

    let value = serde_json::to_value(&descriptor).unwrap();
    let object = value.as_object().unwrap();

    // Wire format is camelCase, and absent fields are omitted rather than
    // serialized as null.
    assert_eq!(object["thumbnailUrl"], "https://x/1.jpg");
    assert_eq!(object["sourceLabel"], "unsplash");
    assert_eq!(object["authorName"], "Ada");
    assert!(!object.contains_key("authorUrl"));
    assert!(!object.contains_key("width"));
}
