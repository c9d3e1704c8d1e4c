//! Output filename convention.
//!
//! Every exported file is named `<category>-<sizeValue>-<N>.png` where `N`
//! is the image's 1-based position in the gallery. The convention lives in
//! one place so the exporter and anything parsing its output agree.
//!
//! Examples:
//! - `screenshots-1280x800-1.png`
//! - `marquee-promo-1400x560-3.png`

/// Build the export filename for the image at `index` (0-based).
pub fn output_filename(category_key: &str, size_value: &str, index: usize) -> String {
    format!("{}-{}-{}.png", category_key, size_value, index + 1)
}
