use crate::errors::AppError;

/// Stable storage key for a company: "Acme Corp, Inc." → "acme-corp-inc".
pub fn company_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Accepts a slug from a URL path only if it is already in canonical form.
pub fn require_slug(raw: &str) -> Result<String, AppError> {
    let slug = company_slug(raw);
    if slug.is_empty() {
        return Err(AppError::Validation(format!(
            "'{raw}' does not contain a usable company name"
        )));
    }
    if slug != raw {
        return Err(AppError::Validation(format!(
            "Company key '{raw}' is not canonical; use '{slug}'"
        )));
    }
    Ok(slug)
}
