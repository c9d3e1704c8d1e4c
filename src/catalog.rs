//! The Chrome Web Store asset catalog.
//!
//! A static table mapping asset categories (screenshots, promo tiles) to
//! their fixed target pixel dimensions. The store rejects uploads at any
//! other size, so the catalog is the single source of truth for what the
//! resize pipeline is allowed to produce.
//!
//! The table is immutable and defined once at startup; everything here is
//! read-only lookup.

use serde::Serialize;
use std::sync::LazyLock;

/// One concrete target width x height within a category.
///
/// `value` is the unique key used for size selection and output filenames
/// (e.g. `1280x800`); `label` is what a UI would display. They happen to
/// coincide for every current entry, but the catalog keeps them separate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeSpec {
    pub label: String,
    pub value: String,
    pub width: u32,
    pub height: u32,
}

/// A named class of target image sizes.
#[derive(Debug, Clone, Serialize)]
pub struct AssetCategory {
    /// Unique key, used for selection and output filenames.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Target sizes, in display order. First entry is the default selection.
    pub sizes: Vec<SizeSpec>,
    /// Aspect ratio of the category's sizes. Documentation only — the
    /// pipeline stretches to exact dimensions and never consults this.
    pub aspect: f64,
}

fn category(key: &str, label: &str, dims: &[(u32, u32)]) -> AssetCategory {
    let sizes = dims
        .iter()
        .map(|&(width, height)| {
            let value = format!("{width}x{height}");
            SizeSpec {
                label: value.clone(),
                value,
                width,
                height,
            }
        })
        .collect::<Vec<_>>();
    let (w, h) = dims[0];
    AssetCategory {
        key: key.to_string(),
        label: label.to_string(),
        sizes,
        aspect: f64::from(w) / f64::from(h),
    }
}

static CATALOG: LazyLock<Vec<AssetCategory>> = LazyLock::new(|| {
    vec![
        category("screenshots", "Screenshots", &[(1280, 800), (640, 400)]),
        category("small-promo", "Small Promo Tile", &[(440, 280)]),
        category("marquee-promo", "Marquee Promo Tile", &[(1400, 560)]),
    ]
});

/// All asset categories, in display order.
pub fn categories() -> &'static [AssetCategory] {
    &CATALOG
}

/// Look up a category by key.
pub fn find_category(key: &str) -> Option<&'static AssetCategory> {
    CATALOG.iter().find(|c| c.key == key)
}

/// The ordered sizes of a category, if the key exists.
pub fn sizes_for(key: &str) -> Option<&'static [SizeSpec]> {
    find_category(key).map(|c| c.sizes.as_slice())
}

/// Look up one size within a category by its value key.
pub fn find_size(category_key: &str, value: &str) -> Option<&'static SizeSpec> {
    find_category(category_key)?.sizes.iter().find(|s| s.value == value)
}
