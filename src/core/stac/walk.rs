//! Depth-first walks over a [`Stac`] tree.
//!
//! A walk visits a node and then its children, in the order they were linked. Every node
//! is resolved before its visit so that its children are known; the visit function
//! receives the tree and the node's [`Handle`] and may mutate both.
//!
//! [`BorrowedWalk`] borrows the tree mutably. [`OwnedWalk`] consumes it, which lets a
//! visitor [take](Stac::take) objects out without copying them.

use super::{Handle, Stac};
use crate::error::Result;
use crate::read::Read;

/// Shared traversal state for both walk flavors.
#[derive(Debug)]
pub struct Walk<F> {
    stack: Vec<Handle>,
    visit: F,
}

/// A walk over a mutably borrowed [`Stac`].
#[derive(Debug)]
pub struct BorrowedWalk<'a, R: Read, F> {
    stac: &'a mut Stac<R>,
    walk: Walk<F>,
}

/// A walk that owns its [`Stac`].
#[derive(Debug)]
pub struct OwnedWalk<R: Read, F> {
    stac: Stac<R>,
    walk: Walk<F>,
}

impl<F> Walk<F> {
    fn new(handle: Handle, visit: F) -> Walk<F> {
        Walk {
            stack: vec![handle],
            visit,
        }
    }

    fn next<R, T>(&mut self, stac: &mut Stac<R>) -> Option<Result<T>>
    where
        R: Read,
        F: FnMut(&mut Stac<R>, Handle) -> Result<T>,
    {
        let handle = self.stack.pop()?;
        if let Err(err) = stac.ensure_resolved(handle) {
            return Some(Err(err));
        }
        let children = stac.children(handle);
        let result = (self.visit)(stac, handle);
        self.stack.extend(children.into_iter().rev());
        Some(result)
    }
}

impl<'a, R: Read, F> BorrowedWalk<'a, R, F> {
    pub(crate) fn new(stac: &'a mut Stac<R>, handle: Handle, visit: F) -> Self {
        BorrowedWalk {
            stac,
            walk: Walk::new(handle, visit),
        }
    }
}

impl<R: Read, F> OwnedWalk<R, F> {
    pub(crate) fn new(stac: Stac<R>, handle: Handle, visit: F) -> Self {
        OwnedWalk {
            stac,
            walk: Walk::new(handle, visit),
        }
    }
}

impl<R, F, T> Iterator for BorrowedWalk<'_, R, F>
where
    R: Read,
    F: FnMut(&mut Stac<R>, Handle) -> Result<T>,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        self.walk.next(self.stac)
    }
}

impl<R, F, T> Iterator for OwnedWalk<R, F>
where
    R: Read,
    F: FnMut(&mut Stac<R>, Handle) -> Result<T>,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        self.walk.next(&mut self.stac)
    }
}
