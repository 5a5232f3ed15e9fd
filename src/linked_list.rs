use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use log::{debug, trace};

use crate::error::{ListError, Result};

type Link<T> = Option<NonNull<Node<T>>>;

struct Node<T> {
    data: T,
    next: Link<T>,
}

impl<T> Node<T> {
    fn alloc(data: T, next: Link<T>) -> NonNull<Node<T>> {
        NonNull::from(Box::leak(Box::new(Node { data, next })))
    }
}

/// A singly linked list with O(1) insertion at both ends.
///
/// Nodes are allocated with [`Box`] and owned through raw handles, so the
/// tail link can be kept next to the head without aliasing a `Box`. Every
/// node reachable from `head` is released exactly once, by a pop, by
/// [`List::clear`] or when the list is dropped.
pub struct List<T> {
    head: Link<T>,
    tail: Link<T>,
    size: usize,
    _owns: PhantomData<Box<Node<T>>>,
}

// The list owns its values the same way a `Vec<T>` does.
unsafe impl<T: Send> Send for List<T> {}
unsafe impl<T: Sync> Sync for List<T> {}

impl<T> List<T> {
    pub fn new() -> Self {
        List {
            head: None,
            tail: None,
            size: 0,
            _owns: PhantomData,
        }
    }

    pub fn with_value(data: T) -> Self {
        let mut list = List::new();
        list.push_tail(data);
        list
    }

    pub fn push_head(&mut self, data: T) {
        let node = Node::alloc(data, self.head);
        if self.tail.is_none() {
            self.tail = Some(node);
        }
        self.head = Some(node);
        self.size += 1;
    }

    pub fn push_tail(&mut self, data: T) {
        let node = Node::alloc(data, None);
        match self.tail {
            // SAFETY: `tail` is a live node owned by this list and no
            // reference into it outlives `&mut self`.
            Some(tail) => unsafe { (*tail.as_ptr()).next = Some(node) },
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.size += 1;
    }

    pub fn pop_head(&mut self) -> Option<T> {
        let head = self.head?;
        // SAFETY: `head` came from `Node::alloc` and is unlinked below, so
        // this is the only handle left to it.
        let node = unsafe { Box::from_raw(head.as_ptr()) };
        let Node { data, next } = *node;
        self.head = next;
        if self.head.is_none() {
            self.tail = None;
        }
        self.size -= 1;
        Some(data)
    }

    /// Removes the last value.
    ///
    /// There are no backward links, so finding the new tail walks the whole
    /// list from the head: O(n), unlike [`List::pop_head`].
    pub fn pop_tail(&mut self) -> Option<T> {
        let (head, tail) = match (self.head, self.tail) {
            (Some(head), Some(tail)) => (head, tail),
            (head, tail) => {
                debug_assert!(head.is_none() && tail.is_none(), "head and tail out of sync");
                return None;
            }
        };

        if head == tail {
            self.head = None;
            self.tail = None;
        } else {
            let mut cur = head;
            let mut hops = 0usize;
            // SAFETY: every node reachable from `head` is live, and the walk
            // stops at the predecessor of `tail` before running off the end.
            unsafe {
                while let Some(next) = (*cur.as_ptr()).next {
                    if next == tail {
                        break;
                    }
                    cur = next;
                    hops += 1;
                }
                (*cur.as_ptr()).next = None;
            }
            trace!("pop_tail walked {} nodes to find the new tail", hops + 1);
            self.tail = Some(cur);
        }
        self.size -= 1;

        // SAFETY: the old tail is no longer reachable from the list.
        let node = unsafe { Box::from_raw(tail.as_ptr()) };
        Some(node.data)
    }

    pub fn try_pop_head(&mut self) -> Result<T> {
        self.pop_head().ok_or(ListError::empty("pop_head"))
    }

    pub fn try_pop_tail(&mut self) -> Result<T> {
        self.pop_tail().ok_or(ListError::empty("pop_tail"))
    }

    pub fn peek_head(&self) -> Option<&T> {
        // SAFETY: the node lives as long as the shared borrow of the list.
        self.head.map(|node| unsafe { &(*node.as_ptr()).data })
    }

    pub fn peek_tail(&self) -> Option<&T> {
        self.tail.map(|node| unsafe { &(*node.as_ptr()).data })
    }

    pub fn peek_head_mut(&mut self) -> Option<&mut T> {
        // SAFETY: `&mut self` guarantees no other reference into the node.
        self.head.map(|node| unsafe { &mut (*node.as_ptr()).data })
    }

    pub fn peek_tail_mut(&mut self) -> Option<&mut T> {
        self.tail.map(|node| unsafe { &mut (*node.as_ptr()).data })
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn len(&self) -> usize {
        self.size
    }

    /// Releases every node, front to back.
    ///
    /// Each node is unlinked before its value is dropped, so a panicking
    /// destructor leaves a valid list holding the remaining values.
    pub fn clear(&mut self) {
        let released = self.size;
        if released == 0 {
            return;
        }
        trace!("clearing {} nodes", released);
        while self.pop_head().is_some() {}
        debug!("list cleared, released {} nodes", released);
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        assert_eq!(self.head.is_none(), self.tail.is_none());
        assert_eq!(self.head.is_none(), self.size == 0);

        let mut walked = 0;
        let mut last = None;
        let mut cur = self.head;
        while let Some(node) = cur {
            walked += 1;
            last = Some(node);
            cur = unsafe { (*node.as_ptr()).next };
        }
        assert_eq!(walked, self.size, "walked length differs from size");
        assert_eq!(last, self.tail, "last reachable node is not the tail");
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        // Keeps releasing the remaining nodes if a value's destructor panics.
        struct DropGuard<'a, T>(&'a mut List<T>);

        impl<'a, T> Drop for DropGuard<'a, T> {
            fn drop(&mut self) {
                while self.0.pop_head().is_some() {}
            }
        }

        let released = self.size;
        while let Some(data) = self.pop_head() {
            let guard = DropGuard(&mut *self);
            drop(data);
            mem::forget(guard);
        }
        if released > 0 {
            debug!("list dropped, released {} nodes", released);
        }
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        List::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries = f.debug_list();
        let mut cur = self.head;
        while let Some(node) = cur {
            // SAFETY: nodes stay alive for the duration of `&self`.
            let node = unsafe { &*node.as_ptr() };
            entries.entry(&node.data);
            cur = node.next;
        }
        entries.finish()
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for data in iter {
            self.push_tail(data);
        }
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}
