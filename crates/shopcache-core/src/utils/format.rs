use chrono::Utc;

/// Build a record identifier as `<prefix>-<unix millis>`.
///
/// This mirrors how the storefront has always minted ids: the caller picks a
/// short prefix per record kind ("p", "ord", "q", ...) and the millisecond
/// clock provides uniqueness. Two creations inside the same millisecond
/// collide; nothing guards against that.
pub fn timestamp_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Utc::now().timestamp_millis())
}

/// Turn a display name into a URL slug: lowercase ASCII alphanumerics with
/// single dashes, everything else dropped.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true; // suppress a leading dash
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Round a money amount to whole cents.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
