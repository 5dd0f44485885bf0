//! Asset reference resolution.

/// Display URL for an asset reference: `{endpoint}/assets/{image_ref}`.
///
/// The result is treated as an opaque display string by the gallery.
#[must_use]
pub fn asset_url(endpoint: &str, image_ref: &str) -> String {
    format!(
        "{}/assets/{}",
        endpoint.trim_end_matches('/'),
        urlencoding::encode(image_ref.trim())
    )
}
