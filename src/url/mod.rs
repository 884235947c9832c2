//! URL handling module for View-Tally
//!
//! Builds the seed listing URL for a user and resolves pager hrefs, which may
//! be relative, against the page they were found on.

use url::Url;

/// Builds the listing URL `<base>/<user>/`
///
/// A base without a trailing slash is treated as a directory, so
/// `https://host/blogs` and `https://host/blogs/` give the same result.
///
/// # Examples
///
/// ```
/// use view_tally::url::seed_url;
///
/// let url = seed_url("https://www.cnblogs.com/", "apocelipes").unwrap();
/// assert_eq!(url.as_str(), "https://www.cnblogs.com/apocelipes/");
/// ```
pub fn seed_url(base: &str, user: &str) -> Result<Url, url::ParseError> {
    let mut base = Url::parse(base)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(&format!("{}/", user))
}

/// Resolves a possibly-relative `href` against the URL of the current page
pub fn resolve_href(current: &str, href: &str) -> Result<String, url::ParseError> {
    let base = Url::parse(current)?;
    Ok(base.join(href.trim())?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_url() {
        let url = seed_url("https://www.cnblogs.com/", "apocelipes").unwrap();
        assert_eq!(url.as_str(), "https://www.cnblogs.com/apocelipes/");
    }

    #[test]
    fn test_seed_url_without_trailing_slash() {
        let url = seed_url("http://127.0.0.1:8080", "someone").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/someone/");

        let url = seed_url("https://example.com/blogs", "someone").unwrap();
        assert_eq!(url.as_str(), "https://example.com/blogs/someone/");
    }

    #[test]
    fn test_seed_url_invalid_base() {
        assert!(seed_url("not a url", "someone").is_err());
    }

    #[test]
    fn test_resolve_relative_href() {
        let resolved = resolve_href("https://example.com/u/", "/u/?page=2").unwrap();
        assert_eq!(resolved, "https://example.com/u/?page=2");

        let resolved = resolve_href("https://example.com/u/?page=2", "?page=3").unwrap();
        assert_eq!(resolved, "https://example.com/u/?page=3");
    }

    #[test]
    fn test_resolve_absolute_href() {
        let resolved =
            resolve_href("https://example.com/u/", "https://other.example.com/u/?page=2").unwrap();
        assert_eq!(resolved, "https://other.example.com/u/?page=2");
    }
}
