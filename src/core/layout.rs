//! Assigning hrefs and structural links to a [`Stac`] tree.
//!
//! Links in a STAC catalog can be organized arbitrarily. Laying a tree out
//!
//! 1. sets the `next_href` of every object, via a [`NextHref`] strategy, and
//! 2. replaces every `root`, `parent`, `child`, `item`, and `self` link with relative
//!    links between those new hrefs.

use crate::error::{Error, Result};
use crate::href::Href;
use crate::link::Link;
use crate::object::{HrefObject, Object};
use crate::read::Read;
use crate::stac::{Handle, Stac};
use std::marker::PhantomData;

/// Lays out a [`Stac`] below a root directory.
#[derive(Debug)]
pub struct Layout<N: NextHref> {
    root: Href,
    phantom: PhantomData<N>,
}

/// Decides where an object of a [`Stac`] will be written.
///
/// Objects are laid out from the root down, so the parent's `next_href` is always set
/// when a child's is requested.
pub trait NextHref {
    fn next_href<R: Read>(root: &Href, stac: &mut Stac<R>, handle: Handle) -> Result<Href>;
}

/// The [catalog layout best practices](https://github.com/radiantearth/stac-spec/blob/master/best-practices.md#catalog-layout).
///
/// - `<root>/catalog.json` (or `collection.json`) for the root
/// - `<parent dir>/<id>/catalog.json` (or `collection.json`) for catalogs and collections
/// - `<parent dir>/<id>/<id>.json` for items
#[derive(Debug)]
pub struct BestPractices;

/// Moves every object from the old root directory to the new one, keeping its
/// relative location.
#[derive(Debug)]
pub struct Rebase;

impl Layout<BestPractices> {
    /// Creates a best-practices layout. `root` is a directory.
    pub fn new(root: impl Into<Href>) -> Layout<BestPractices> {
        let mut root = root.into();
        root.ensure_ends_in_slash();
        Layout {
            root,
            phantom: PhantomData,
        }
    }
}

impl<N: NextHref> Layout<N> {
    pub fn with_next_href<T: NextHref>(self, _: T) -> Layout<T> {
        Layout {
            root: self.root,
            phantom: PhantomData,
        }
    }

    pub fn root(&self) -> &Href {
        &self.root
    }

    /// Lays out the whole tree in place, reading every object into memory.
    ///
    /// Use [`Layout::render`] to stream the laid-out objects instead.
    pub fn layout<R: Read>(&self, stac: &mut Stac<R>) -> Result<()> {
        log_status!("layout", "Laying out catalog under {}", self.root);
        let mut root_title = None;
        let root = stac.root();
        for result in stac.walk(root, |stac, handle| {
            self.layout_one(stac, handle, &mut root_title)
        }) {
            result?;
        }
        Ok(())
    }

    /// Lays out a tree while consuming it, yielding each object with its new href.
    pub fn render<'a, R>(&'a self, stac: Stac<R>) -> impl Iterator<Item = Result<HrefObject>> + 'a
    where
        R: Read + 'a,
    {
        log_status!("layout", "Rendering catalog under {}", self.root);
        let mut root_title = None;
        let root = stac.root();
        stac.into_walk(root, move |stac, handle| {
            self.layout_one(stac, handle, &mut root_title)?;
            let href = stac.next_href(handle).cloned().ok_or_else(Error::href_missing)?;
            let object = stac
                .take(handle)
                .ok_or_else(|| Error::tree_unresolvable_node(handle.index()))?;
            Ok(HrefObject { object, href })
        })
    }

    /// Lays out one node and links its children.
    ///
    /// Children get their `root` and `parent` links here, while their parent is still
    /// in the tree, so a consuming walk never has to look back up.
    fn layout_one<R: Read>(
        &self,
        stac: &mut Stac<R>,
        handle: Handle,
        root_title: &mut Option<Option<String>>,
    ) -> Result<()> {
        if handle == stac.root() {
            stac.remove_structural_links(handle)?;
            self.set_next_href(stac, handle)?;
            let title = stac.get(handle)?.title().map(String::from);
            let _ = root_title.insert(title.clone());
            let link = create_link(stac, handle, handle, title, Link::root)?;
            stac.add_link(handle, link)?;
        }

        let root_title = root_title.clone().flatten();
        let title = stac.get(handle)?.title().map(String::from);
        for child in stac.children(handle) {
            stac.remove_structural_links(child)?;
            self.set_next_href(stac, child)?;

            let child_title = stac.get(child)?.title().map(String::from);
            let rel: fn(Href) -> Link = if stac.is_item(child) {
                Link::item
            } else {
                Link::child
            };
            let link = create_link(stac, handle, child, child_title, rel)?;
            stac.add_link(handle, link)?;

            let root = stac.root();
            let link = create_link(stac, child, root, root_title.clone(), Link::root)?;
            stac.add_link(child, link)?;
            let link = create_link(stac, child, handle, title.clone(), Link::parent)?;
            stac.add_link(child, link)?;
        }
        Ok(())
    }

    fn set_next_href<R: Read>(&self, stac: &mut Stac<R>, handle: Handle) -> Result<()> {
        let href = N::next_href(&self.root, stac, handle)?;
        stac.set_next_href(handle, href);
        Ok(())
    }
}

fn create_link<R: Read>(
    stac: &Stac<R>,
    from: Handle,
    to: Handle,
    title: Option<String>,
    link: fn(Href) -> Link,
) -> Result<Link> {
    let from_href = stac.next_href(from).ok_or_else(Error::href_missing)?;
    let to_href = stac.next_href(to).ok_or_else(Error::href_missing)?;
    let mut link = link(from_href.make_relative(to_href));
    link.title = title;
    Ok(link)
}

impl NextHref for BestPractices {
    fn next_href<R: Read>(root: &Href, stac: &mut Stac<R>, handle: Handle) -> Result<Href> {
        let mut href = match stac.parent(handle) {
            Some(parent) => {
                let parent_href = stac.next_href(parent).ok_or_else(Error::href_missing)?;
                let mut directory = parent_href.directory().to_string();
                if !directory.is_empty() && !directory.ends_with('/') {
                    directory.push('/');
                }
                directory.push_str(stac.get(handle)?.id());
                directory.push('/');
                directory
            }
            None => root.as_str().to_string(),
        };
        match stac.get(handle)? {
            Object::Item(item) => href.push_str(&item.id),
            Object::Catalog(_) => href.push_str("catalog"),
            Object::Collection(_) => href.push_str("collection"),
        }
        href.push_str(".json");
        Ok(Href::new(href))
    }
}

impl NextHref for Rebase {
    fn next_href<R: Read>(root: &Href, stac: &mut Stac<R>, handle: Handle) -> Result<Href> {
        let old_root = stac.href(stac.root()).ok_or_else(Error::href_missing)?;
        if handle == stac.root() {
            return root.join(old_root.file_name());
        }
        let mut href = stac.href(handle).cloned().ok_or_else(Error::href_missing)?;
        href.rebase(old_root, root)?;
        Ok(href)
    }
}
