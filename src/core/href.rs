//! Locations of STAC objects.
//!
//! An [`Href`] is either a URL (`https://…`, `s3://…`) or a filesystem path.
//! Joining and relativizing work on both, with URLs resolved through the `url` crate
//! and paths normalized segment by segment.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use url::Url;

static URL_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://").unwrap());

/// The location of a STAC object, as a URL or a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Href(String);

impl Href {
    pub fn new(href: impl ToString) -> Href {
        Href(href.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns this href with `.` and `..` segments collapsed, so that different
    /// spellings of the same path compare equal. URLs are returned unchanged.
    pub fn normalized(&self) -> Href {
        if self.is_url() {
            self.clone()
        } else {
            Href(normalize(&self.0))
        }
    }

    pub fn is_url(&self) -> bool {
        is_url(&self.0)
    }

    pub fn is_absolute(&self) -> bool {
        self.is_url() || self.0.starts_with('/')
    }

    /// Resolves `other` against this href.
    ///
    /// A directory href must end in a slash, otherwise its last segment is treated as a
    /// file name and dropped, the same way a browser resolves links.
    pub fn join(&self, other: &str) -> Result<Href> {
        if is_url(other) {
            return Ok(Href::new(other));
        }

        if self.is_url() {
            let base =
                Url::parse(&self.0).map_err(|e| Error::href_invalid(&self.0, e.to_string()))?;
            let joined = base
                .join(other)
                .map_err(|e| Error::href_invalid(other, e.to_string()))?;
            return Ok(Href(joined.into()));
        }

        if other.starts_with('/') {
            return Ok(Href(normalize(other)));
        }

        let mut joined = self.directory().to_string();
        if !joined.is_empty() && !joined.ends_with('/') {
            joined.push('/');
        }
        joined.push_str(other);
        Ok(Href(normalize(&joined)))
    }

    /// Returns the directory portion of this href, without a trailing slash.
    pub fn directory(&self) -> &str {
        let s = self.0.as_str();
        if s.ends_with('/') {
            let trimmed = s.trim_end_matches('/');
            return if trimmed.is_empty() { "/" } else { trimmed };
        }
        match s.rfind('/') {
            Some(0) => "/",
            Some(i) => &s[..i],
            None => "",
        }
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or("")
    }

    pub fn ensure_ends_in_slash(&mut self) {
        if !self.0.ends_with('/') {
            self.0.push('/');
        }
    }

    /// Returns the href of `to` relative to this href's directory.
    ///
    /// Hrefs that can't be related (a path and a URL, or URLs on different origins)
    /// come back unchanged.
    pub fn make_relative(&self, to: &Href) -> Href {
        match (self.is_url(), to.is_url()) {
            (false, false) => {
                if self.0.starts_with('/') != to.0.starts_with('/') {
                    return to.clone();
                }
                relative_path(&normalize(self.directory()), &normalize(&to.0))
                    .map(Href)
                    .unwrap_or_else(|| to.clone())
            }
            (true, true) => {
                let (Ok(from), Ok(target)) = (Url::parse(&self.0), Url::parse(&to.0)) else {
                    return to.clone();
                };
                if from.origin() != target.origin() {
                    return to.clone();
                }
                let from = Href(from.path().to_string());
                relative_path(from.directory(), target.path())
                    .map(Href)
                    .unwrap_or_else(|| to.clone())
            }
            _ => to.clone(),
        }
    }

    /// Moves this href from the directory of `from` into the directory of `to`.
    pub fn rebase(&mut self, from: &Href, to: &Href) -> Result<()> {
        let from_directory = from.directory();
        let href = normalize(&self.0);
        let rest = if from_directory.is_empty() {
            href.as_str()
        } else {
            let prefix = if from_directory.ends_with('/') {
                from_directory.to_string()
            } else {
                format!("{}/", from_directory)
            };
            href.strip_prefix(&prefix)
                .ok_or_else(|| Error::href_not_under_root(&self.0, from_directory))?
        };
        if rest.starts_with("../") {
            return Err(Error::href_not_under_root(&self.0, from_directory));
        }
        *self = to.join(rest)?;
        Ok(())
    }
}

fn is_url(s: &str) -> bool {
    URL_SCHEME.is_match(s)
}

/// Collapses `.` and `..` segments and duplicate slashes.
fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let trailing = path.len() > 1 && path.ends_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            s => segments.push(s),
        }
    }

    let mut out = segments.join("/");
    if absolute {
        out.insert(0, '/');
    }
    if trailing && !segments.is_empty() {
        out.push('/');
    }
    out
}

/// `None` when `from_directory` climbs above its starting point, since the way back down
/// can't be named.
fn relative_path(from_directory: &str, to: &str) -> Option<String> {
    let from: Vec<&str> = from_directory.split('/').filter(|s| !s.is_empty()).collect();
    let to: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();
    let max_common = to.len().saturating_sub(1);
    let common = from
        .iter()
        .zip(to.iter())
        .take(max_common)
        .take_while(|(a, b)| a == b)
        .count();

    if from[common..].contains(&"..") {
        return None;
    }

    let ups = from.len() - common;
    let rest = to[common..].join("/");
    if ups > 0 {
        Some(format!("{}{}", "../".repeat(ups), rest))
    } else if rest.starts_with("../") {
        Some(rest)
    } else {
        Some(format!("./{}", rest))
    }
}

impl std::fmt::Display for Href {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Href {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Href {
    fn from(s: &str) -> Href {
        Href::new(s)
    }
}

impl From<String> for Href {
    fn from(s: String) -> Href {
        Href(s)
    }
}

impl From<&String> for Href {
    fn from(s: &String) -> Href {
        Href(s.clone())
    }
}

impl From<&Path> for Href {
    fn from(path: &Path) -> Href {
        Href(path.to_string_lossy().into_owned())
    }
}

impl From<PathBuf> for Href {
    fn from(path: PathBuf) -> Href {
        Href::from(path.as_path())
    }
}

impl From<Href> for String {
    fn from(href: Href) -> String {
        href.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_urls() {
        assert!(Href::new("https://example.com/catalog.json").is_url());
        assert!(Href::new("s3://bucket/catalog.json").is_url());
        assert!(!Href::new("data/catalog.json").is_url());
        assert!(!Href::new("/tmp/catalog.json").is_url());
    }

    #[test]
    fn join_relative_path() {
        let href = Href::new("data/catalog.json");
        assert_eq!(
            href.join("./extensions-collection/collection.json").unwrap().as_str(),
            "data/extensions-collection/collection.json"
        );
        assert_eq!(href.join("./catalog.json").unwrap(), href);
    }

    #[test]
    fn join_parent_path() {
        let href = Href::new("data/extensions-collection/collection.json");
        assert_eq!(
            href.join("../catalog.json").unwrap().as_str(),
            "data/catalog.json"
        );
    }

    #[test]
    fn join_directory_with_trailing_slash() {
        let href = Href::new("a/new/root/");
        assert_eq!(
            href.join("catalog.json").unwrap().as_str(),
            "a/new/root/catalog.json"
        );
    }

    #[test]
    fn join_bare_file_name() {
        let href = Href::new("catalog.json");
        assert_eq!(href.join("./item.json").unwrap().as_str(), "item.json");
        assert_eq!(href.join("../item.json").unwrap().as_str(), "../item.json");
    }

    #[test]
    fn join_absolute_path() {
        let href = Href::new("/stac/catalog.json");
        assert_eq!(
            href.join("./sub/catalog.json").unwrap().as_str(),
            "/stac/sub/catalog.json"
        );
        assert_eq!(
            href.join("/elsewhere/item.json").unwrap().as_str(),
            "/elsewhere/item.json"
        );
    }

    #[test]
    fn join_url() {
        let href = Href::new("https://example.com/stac/catalog.json");
        assert_eq!(
            href.join("./child/catalog.json").unwrap().as_str(),
            "https://example.com/stac/child/catalog.json"
        );
        assert_eq!(
            href.join("../other.json").unwrap().as_str(),
            "https://example.com/other.json"
        );
        assert_eq!(
            Href::new("data/catalog.json")
                .join("https://example.com/item.json")
                .unwrap()
                .as_str(),
            "https://example.com/item.json"
        );
    }

    #[test]
    fn directory_and_file_name() {
        let href = Href::new("stac/root/catalog.json");
        assert_eq!(href.directory(), "stac/root");
        assert_eq!(href.file_name(), "catalog.json");
        assert_eq!(Href::new("catalog.json").directory(), "");
        assert_eq!(Href::new("/catalog.json").directory(), "/");
        assert_eq!(Href::new("stac/root/").directory(), "stac/root");
    }

    #[test]
    fn ensure_ends_in_slash_is_idempotent() {
        let mut href = Href::new("stac/root");
        href.ensure_ends_in_slash();
        href.ensure_ends_in_slash();
        assert_eq!(href.as_str(), "stac/root/");
    }

    #[test]
    fn make_relative_down_and_up() {
        let root = Href::new("stac/root/catalog.json");
        let item = Href::new("stac/root/child-collection/an-item/an-item.json");
        assert_eq!(
            root.make_relative(&item).as_str(),
            "./child-collection/an-item/an-item.json"
        );
        assert_eq!(item.make_relative(&root).as_str(), "../../catalog.json");
        assert_eq!(root.make_relative(&root).as_str(), "./catalog.json");
    }

    #[test]
    fn make_relative_sideways() {
        let a = Href::new("stac/a/catalog.json");
        let b = Href::new("stac/b/catalog.json");
        assert_eq!(a.make_relative(&b).as_str(), "../b/catalog.json");
    }

    #[test]
    fn make_relative_urls() {
        let a = Href::new("https://example.com/stac/catalog.json");
        let b = Href::new("https://example.com/stac/child/collection.json");
        assert_eq!(a.make_relative(&b).as_str(), "./child/collection.json");

        let other = Href::new("https://other.com/stac/item.json");
        assert_eq!(a.make_relative(&other), other);

        let path = Href::new("stac/catalog.json");
        assert_eq!(path.make_relative(&b), b);
    }

    #[test]
    fn rebase_moves_between_roots() {
        let mut href = Href::new("old/path/many/sub/dirs/weird-item-name.json");
        href.rebase(
            &Href::new("old/path/catalog.json"),
            &Href::new("the/new/root/"),
        )
        .unwrap();
        assert_eq!(
            href.as_str(),
            "the/new/root/many/sub/dirs/weird-item-name.json"
        );
    }

    #[test]
    fn rebase_outside_root_fails() {
        let mut href = Href::new("elsewhere/item.json");
        let err = href
            .rebase(
                &Href::new("old/path/catalog.json"),
                &Href::new("the/new/root/"),
            )
            .unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::HrefNotUnderRoot);
        assert_eq!(href.as_str(), "elsewhere/item.json");
    }

    #[test]
    fn normalize_collapses_segments() {
        assert_eq!(normalize("a/./b/../c.json"), "a/c.json");
        assert_eq!(normalize("../a/b.json"), "../a/b.json");
        assert_eq!(normalize("/a/../../b.json"), "/b.json");
        assert_eq!(normalize("a//b/"), "a/b/");
    }

    #[test]
    fn normalized_spellings_are_equal() {
        let canonical = Href::new("data/catalog.json");
        assert_eq!(Href::new("./data/catalog.json").normalized(), canonical);
        assert_eq!(Href::new("a/../data/catalog.json").normalized(), canonical);
        assert_eq!(Href::new("data//./catalog.json").normalized(), canonical);
        let url = Href::new("https://example.com/a/../catalog.json");
        assert_eq!(url.normalized(), url);
    }

    #[test]
    fn make_relative_from_above_the_start() {
        let from = Href::new("../x/catalog.json");
        let to = Href::new("y.json");
        assert_eq!(from.make_relative(&to), to);

        let from = Href::new("catalog.json");
        assert_eq!(
            from.make_relative(&Href::new("../up.json")).as_str(),
            "../up.json"
        );

        let from = Href::new("./a/catalog.json");
        assert_eq!(
            from.make_relative(&Href::new("a/b/item.json")).as_str(),
            "./b/item.json"
        );
    }
}
