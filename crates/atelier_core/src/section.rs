//! Section partitions of the local asset store.

use serde::{Deserialize, Serialize};

/// A fixed partition of the local asset store.
///
/// Each section maps 1:1 to a physical directory under the store root and to
/// a URL prefix. Sections are static; they have no independent lifecycle.
///
/// # Examples
///
/// ```
/// use atelier_core::Section;
///
/// let section: Section = "services".parse().unwrap();
/// assert_eq!(section, Section::Services);
/// assert_eq!(section.as_str(), "services");
/// assert_eq!(section.url_for("a.jpg"), "/images/services/a.jpg");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Blog post illustrations
    #[display("blog")]
    Blog,
    /// Service page imagery
    #[display("services")]
    Services,
    /// Showcase gallery entries
    #[display("showcase")]
    Showcase,
    /// Default bucket for assets imported without a named section
    #[display("imported")]
    Imported,
}

impl Section {
    /// String form used in directory names, URLs, and sidecar metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Blog => "blog",
            Section::Services => "services",
            Section::Showcase => "showcase",
            Section::Imported => "imported",
        }
    }

    /// Directory name under the store root.
    pub fn dir_name(&self) -> &'static str {
        self.as_str()
    }

    /// Filename prefix for generated asset names.
    ///
    /// Services assets historically use the singular form.
    pub fn filename_prefix(&self) -> &'static str {
        match self {
            Section::Services => "service",
            other => other.as_str(),
        }
    }

    /// Public URL for a filename in this section.
    ///
    /// Round-trips with the store's directory mapping: the path component
    /// resolves back to `{images_dir(section)}/{filename}` under the serving
    /// operation.
    pub fn url_for(&self, filename: &str) -> String {
        format!("/images/{}/{}", self.as_str(), filename)
    }

    /// Sections scanned when locating an asset by id, in fixed order.
    ///
    /// The imported bucket is ingestion-only and is not scanned.
    pub fn lookup_order() -> [Section; 3] {
        [Section::Blog, Section::Services, Section::Showcase]
    }

    /// Parse a section from loosely-specified caller input, defaulting to
    /// `Blog` when the value is absent or unrecognized.
    ///
    /// Upload callers send free-form section strings; the historical contract
    /// is that anything unknown lands in the blog bucket.
    pub fn parse_or_default(value: Option<&str>) -> Section {
        value
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(Section::Blog)
    }
}

impl std::str::FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blog" => Ok(Section::Blog),
            // Both forms appear in caller metadata.
            "service" | "services" => Ok(Section::Services),
            "showcase" => Ok(Section::Showcase),
            "imported" => Ok(Section::Imported),
            _ => Err(format!("Unknown section: {}", s)),
        }
    }
}
