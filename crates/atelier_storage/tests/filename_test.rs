//! Tests for filename generation helpers.

use atelier_storage::{
    content_type_for, file_extension, file_stem, monotonic_timestamp_ms, sanitize_name,
};
use std::path::Path;

#[test]
fn test_monotonic_timestamps_never_repeat() {
    let mut last = 0;
    for _ in 0..1000 {
        let ts = monotonic_timestamp_ms();
        assert!(ts > last, "timestamps must be strictly increasing");
        last = ts;
    }
}

#[test]
fn test_monotonic_timestamps_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| (0..250).map(|_| monotonic_timestamp_ms()).collect::<Vec<_>>()))
        .collect();

    let mut all: Vec<i64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    let count = all.len();
    all.sort_unstable();
    all.dedup();
    assert_eq!(all.len(), count, "no two calls may observe the same value");
}

#[test]
fn test_sanitize_name() {
    assert_eq!(sanitize_name("Harbor at Dusk"), "Harbor_at_Dusk");
    assert_eq!(sanitize_name("a/b\\c:d"), "a_b_c_d");
    assert_eq!(sanitize_name("ok-name_1"), "ok-name_1");

    let long = "x".repeat(80);
    assert_eq!(sanitize_name(&long).len(), 50);
}

#[test]
fn test_file_extension_and_stem() {
    assert_eq!(file_extension("Photo.JPG"), ".jpg");
    assert_eq!(file_extension("archive.tar.gz"), ".gz");
    assert_eq!(file_extension("no-extension"), "");
    assert_eq!(file_stem("Photo.JPG"), "Photo");
    assert_eq!(file_stem("no-extension"), "no-extension");
}

#[test]
fn test_content_type_mapping() {
    assert_eq!(content_type_for(Path::new("a.png")), "image/png");
    assert_eq!(content_type_for(Path::new("a.GIF")), "image/gif");
    assert_eq!(content_type_for(Path::new("a.webp")), "image/webp");
    assert_eq!(content_type_for(Path::new("a.svg")), "image/svg+xml");
    assert_eq!(content_type_for(Path::new("a.jpg")), "image/jpeg");
    assert_eq!(content_type_for(Path::new("a.bin")), "image/jpeg");
}
