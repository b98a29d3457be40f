//! Arena-based tree for working with STAC catalogs.
//!
//! Tree structures need more verbose ergonomics in Rust than in garbage-collected
//! languages. [`Stac`] keeps every object in an arena and hands out [`Handle`]s that
//! point into it, so a catalog can be edited without shared mutable references.
//!
//! A `Stac` is a lazy cache. Objects discovered through links are only read when they
//! are needed (e.g. by [`Stac::get`]), and each href is read at most once. Paths are
//! normalized on the way in, so `./data/catalog.json` and `data/catalog.json` are the
//! same node.
//!
//! Links shape the tree when objects enter it:
//!
//! - `child` and `item` links attach the linked object below this one.
//! - A `parent` link attaches this object below the linked one, unless it already has a parent.
//! - A `root` link is only used when a `Stac` is created, to find the root of the tree.
//! - `self` links are ignored.

pub mod walk;

pub use walk::{BorrowedWalk, OwnedWalk, Walk};

use crate::error::{Error, Result};
use crate::href::Href;
use crate::layout::{Layout, NextHref};
use crate::link::Link;
use crate::object::{Object, ObjectHrefTuple};
use crate::read::{Read, Reader};
use crate::write::Write;
use std::collections::HashMap;

const ROOT_HANDLE: Handle = Handle(0);

/// An arena-based tree of STAC objects.
///
/// Handles are tied to the `Stac` that produced them; using one on another tree
/// points at an unrelated object, or panics when out of bounds.
#[derive(Debug)]
pub struct Stac<R: Read> {
    reader: R,
    nodes: Vec<Node>,
    free_nodes: Vec<Handle>,
    hrefs: HashMap<Href, Handle>,
}

/// A pointer to an [`Object`] in a [`Stac`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(usize);

#[derive(Debug, Default)]
struct Node {
    object: Option<Object>,
    children: Vec<Handle>,
    parent: Option<Handle>,
    href: Option<Href>,
    next_href: Option<Href>,
    is_from_item_link: bool,
}

impl Handle {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl Stac<Reader> {
    /// Creates a new tree rooted at `object`, using the default [`Reader`].
    pub fn new(object: impl Into<ObjectHrefTuple>) -> Result<(Stac<Reader>, Handle)> {
        Stac::new_with_reader(object, Reader::default())
    }

    /// Reads an href and builds the tree that contains it.
    ///
    /// If the object links to a different root, the root is read and becomes the root
    /// of the tree; the returned handle still points to the object at `href`.
    pub fn read(href: impl Into<Href>) -> Result<(Stac<Reader>, Handle)> {
        let reader = Reader::default();
        let href_object = reader.read(href)?;
        Stac::new_with_reader(href_object, reader)
    }
}

impl<R: Read> Stac<R> {
    pub fn new_with_reader(
        object: impl Into<ObjectHrefTuple>,
        reader: R,
    ) -> Result<(Stac<R>, Handle)> {
        let (object, href) = object.into();
        let href = href.map(|href| href.normalized());
        let root_href = match (object.root_link(), href.as_ref()) {
            (Some(link), Some(href)) => Some(href.join(&link.href)?),
            (Some(link), None) if Href::new(&link.href).is_absolute() => {
                Some(Href::new(&link.href).normalized())
            }
            _ => None,
        };

        if let Some(root_href) = root_href {
            if href.as_ref() != Some(&root_href) {
                let root = reader.read(root_href)?;
                let (mut stac, _) = Stac::rooted(root, reader)?;
                let handle = stac.add((object, href))?;
                return Ok((stac, handle));
            }
        }

        Stac::rooted((object, href), reader)
    }

    fn rooted(object: impl Into<ObjectHrefTuple>, reader: R) -> Result<(Stac<R>, Handle)> {
        let mut stac = Stac {
            reader,
            nodes: vec![Node::default()],
            free_nodes: Vec::new(),
            hrefs: HashMap::new(),
        };
        stac.set_object(ROOT_HANDLE, object)?;
        Ok((stac, ROOT_HANDLE))
    }

    pub fn root(&self) -> Handle {
        ROOT_HANDLE
    }

    /// Returns the object behind a handle, reading it first if needed.
    pub fn get(&mut self, handle: Handle) -> Result<&Object> {
        self.ensure_resolved(handle)?;
        self.node(handle)
            .object
            .as_ref()
            .ok_or_else(|| Error::tree_unresolvable_node(handle.0))
    }

    pub fn parent(&self, handle: Handle) -> Option<Handle> {
        self.node(handle).parent
    }

    /// Returns this object's children, in the order they were linked.
    pub fn children(&self, handle: Handle) -> Vec<Handle> {
        self.node(handle).children.clone()
    }

    /// Adds an object to the tree.
    ///
    /// An object whose href was already linked from the tree takes over that node, so
    /// it ends up attached where the link put it. Its own structural links are then
    /// followed to attach its children (and its parent, if it has none yet).
    pub fn add(&mut self, object: impl Into<ObjectHrefTuple>) -> Result<Handle> {
        let (object, href) = object.into();
        let href = href.map(|href| href.normalized());
        let handle = href
            .as_ref()
            .and_then(|href| self.hrefs.get(href).copied())
            .unwrap_or_else(|| self.add_node());
        self.set_object(handle, (object, href))?;
        Ok(handle)
    }

    /// Adds an object below `parent`, ignoring any `parent` link it carries.
    pub fn add_child(
        &mut self,
        parent: Handle,
        object: impl Into<ObjectHrefTuple>,
    ) -> Result<Handle> {
        let child = self.add(object)?;
        self.connect(parent, child)?;
        Ok(child)
    }

    /// Attaches `child` below `parent`, detaching it from its current parent.
    ///
    /// The root can't become a child, and a node can't be attached below itself or
    /// one of its descendants.
    pub fn connect(&mut self, parent: Handle, child: Handle) -> Result<()> {
        if self.node(child).parent == Some(parent) {
            return Ok(());
        }
        if self.would_cycle(parent, child) {
            return Err(Error::tree_cycle(parent.0, child.0));
        }
        if let Some(old) = self.node_mut(child).parent.take() {
            self.node_mut(old).children.retain(|&c| c != child);
        }
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
        Ok(())
    }

    /// Removes an object from the tree, returning whatever object and href it had.
    ///
    /// Its children are left unattached.
    pub fn remove(&mut self, handle: Handle) -> Result<(Option<Object>, Option<Href>)> {
        if handle == self.root() {
            return Err(Error::tree_cannot_remove_root());
        }
        for child in std::mem::take(&mut self.node_mut(handle).children) {
            self.node_mut(child).parent = None;
        }
        if let Some(parent) = self.node_mut(handle).parent.take() {
            self.node_mut(parent).children.retain(|&c| c != handle);
        }
        let node = std::mem::take(self.node_mut(handle));
        if let Some(href) = node.href.as_ref() {
            if self.hrefs.get(href) == Some(&handle) {
                let _ = self.hrefs.remove(href);
            }
        }
        self.free_nodes.push(handle);
        Ok((node.object, node.href))
    }

    pub fn href(&self, handle: Handle) -> Option<&Href> {
        self.node(handle).href.as_ref()
    }

    /// Sets the href a node is read from. Paths are stored normalized.
    pub fn set_href(&mut self, handle: Handle, href: impl Into<Href>) {
        let href = href.into().normalized();
        if let Some(old) = self.node_mut(handle).href.replace(href.clone()) {
            if old != href && self.hrefs.get(&old) == Some(&handle) {
                let _ = self.hrefs.remove(&old);
            }
        }
        let _ = self.hrefs.insert(href, handle);
    }

    /// The href an object will be written to, once a [`Layout`] has set it.
    pub fn next_href(&self, handle: Handle) -> Option<&Href> {
        self.node(handle).next_href.as_ref()
    }

    pub fn set_next_href(&mut self, handle: Handle, href: impl Into<Href>) {
        self.node_mut(handle).next_href = Some(href.into());
    }

    /// Returns true if the node holds an item, or was linked to as one.
    pub fn is_item(&self, handle: Handle) -> bool {
        match self.node(handle).object.as_ref() {
            Some(object) => object.is_item(),
            None => self.node(handle).is_from_item_link,
        }
    }

    /// Depth-first search below (and including) `handle`.
    pub fn find(
        &mut self,
        handle: Handle,
        mut filter: impl FnMut(&Object) -> bool,
    ) -> Result<Option<Handle>> {
        for result in self.walk(handle, |stac, handle| {
            let object = stac.get(handle)?;
            Ok((filter(object), handle))
        }) {
            let (keep, handle) = result?;
            if keep {
                return Ok(Some(handle));
            }
        }
        Ok(None)
    }

    pub fn add_link(&mut self, handle: Handle, link: Link) -> Result<()> {
        self.ensure_resolved(handle)?;
        if let Some(object) = self.node_mut(handle).object.as_mut() {
            object.add_link(link);
        }
        Ok(())
    }

    pub fn remove_structural_links(&mut self, handle: Handle) -> Result<()> {
        self.ensure_resolved(handle)?;
        if let Some(object) = self.node_mut(handle).object.as_mut() {
            object.links_mut().retain(|link| !link.is_structural());
        }
        Ok(())
    }

    /// Takes the object out of the tree, leaving its node in place.
    pub fn take(&mut self, handle: Handle) -> Option<Object> {
        self.node_mut(handle).object.take()
    }

    pub fn take_href(&mut self, handle: Handle) -> Option<Href> {
        let href = self.node_mut(handle).href.take()?;
        if self.hrefs.get(&href) == Some(&handle) {
            let _ = self.hrefs.remove(&href);
        }
        Some(href)
    }

    /// Walks the tree below `handle`, calling `visit` on every node.
    ///
    /// See the [walk] module for the traversal order.
    pub fn walk<F, T>(&mut self, handle: Handle, visit: F) -> BorrowedWalk<'_, R, F>
    where
        F: FnMut(&mut Stac<R>, Handle) -> Result<T>,
    {
        BorrowedWalk::new(self, handle, visit)
    }

    /// Like [`Stac::walk`], but consumes the tree.
    pub fn into_walk<F, T>(self, handle: Handle, visit: F) -> OwnedWalk<R, F>
    where
        F: FnMut(&mut Stac<R>, Handle) -> Result<T>,
    {
        OwnedWalk::new(self, handle, visit)
    }

    /// Lays out and writes every object, consuming the tree.
    pub fn write<N: NextHref>(self, layout: &Layout<N>, writer: &impl Write) -> Result<()> {
        for result in layout.render(self) {
            writer.write(result?)?;
        }
        Ok(())
    }

    /// Number of nodes in the arena, resolved or not.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn ensure_resolved(&mut self, handle: Handle) -> Result<()> {
        if self.node(handle).object.is_some() {
            return Ok(());
        }
        let href = self
            .node(handle)
            .href
            .clone()
            .ok_or_else(|| Error::tree_unresolvable_node(handle.0))?;
        let href_object = self.reader.read(href)?;
        self.set_object(handle, href_object)
    }

    fn set_object(&mut self, handle: Handle, object: impl Into<ObjectHrefTuple>) -> Result<()> {
        let (object, href) = object.into();
        if let Some(href) = href.as_ref() {
            self.set_href(handle, href.clone());
        }

        for link in object.links() {
            if !(link.is_child() || link.is_item() || link.is_parent()) {
                continue;
            }
            let other_href = match href.as_ref() {
                Some(href) => href.join(&link.href)?,
                None => Href::new(&link.href),
            };
            let other = match self.hrefs.get(&other_href) {
                Some(&other) => other,
                None => {
                    let other = self.add_node();
                    self.set_href(other, other_href);
                    other
                }
            };
            if other == handle {
                continue;
            }
            if link.is_parent() {
                if self.node(handle).parent.is_none() && !self.would_cycle(other, handle) {
                    self.connect(other, handle)?;
                }
            } else if !self.would_cycle(handle, other) {
                if link.is_item() {
                    self.node_mut(other).is_from_item_link = true;
                }
                self.connect(handle, other)?;
            }
        }

        self.node_mut(handle).object = Some(object);
        Ok(())
    }

    /// True if `child` is the root, `parent` itself, or one of `parent`'s ancestors.
    fn would_cycle(&self, parent: Handle, child: Handle) -> bool {
        if child == ROOT_HANDLE {
            return true;
        }
        let mut current = Some(parent);
        while let Some(handle) = current {
            if handle == child {
                return true;
            }
            current = self.node(handle).parent;
        }
        false
    }

    fn add_node(&mut self) -> Handle {
        if let Some(handle) = self.free_nodes.pop() {
            handle
        } else {
            let handle = Handle(self.nodes.len());
            self.nodes.push(Node::default());
            handle
        }
    }

    fn node(&self, handle: Handle) -> &Node {
        &self.nodes[handle.0]
    }

    fn node_mut(&mut self, handle: Handle) -> &mut Node {
        &mut self.nodes[handle.0]
    }
}
