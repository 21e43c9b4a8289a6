//! Singly-linked slot list backing arrays and objects.
//!
//! Slots are allocated in the arena and linked through `Cell`s, so a list can be
//! appended to or unlinked from through a shared reference while other handles
//! (or a running iterator) still point into it. Unlinked slots stay allocated
//! until the arena is torn down.

use std::cell::Cell;

use crate::data::TaggedValue;

pub(crate) struct Node<'a, K> {
    pub(crate) key: K,
    pub(crate) value: TaggedValue<'a>,
    next: Cell<Option<&'a Node<'a, K>>>,
}

impl<'a, K: 'a> Node<'a, K> {
    pub(crate) fn new(key: K) -> Self {
        Self {
            key,
            value: TaggedValue::undefined(),
            next: Cell::new(None),
        }
    }
}

pub(crate) struct NodeList<'a, K> {
    head: Cell<Option<&'a Node<'a, K>>>,
    tail: Cell<Option<&'a Node<'a, K>>>,
    len: Cell<usize>,
}

impl<'a, K: 'a> NodeList<'a, K> {
    pub(crate) fn new() -> Self {
        Self {
            head: Cell::new(None),
            tail: Cell::new(None),
            len: Cell::new(0),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len.get()
    }

    pub(crate) fn push_back(&self, node: &'a Node<'a, K>) {
        node.next.set(None);
        match self.tail.get() {
            Some(tail) => tail.next.set(Some(node)),
            None => self.head.set(Some(node)),
        }
        self.tail.set(Some(node));
        self.len.set(self.len.get() + 1);
    }

    pub(crate) fn iter(&self) -> NodeIter<'a, K> {
        NodeIter {
            next: self.head.get(),
        }
    }

    /// Unlink the first node matching `pred`. Returns whether one was found.
    pub(crate) fn remove_first(&self, mut pred: impl FnMut(usize, &Node<'a, K>) -> bool) -> bool {
        let mut prev: Option<&'a Node<'a, K>> = None;
        let mut current = self.head.get();
        let mut index = 0;
        while let Some(node) = current {
            if pred(index, node) {
                let next = node.next.get();
                match prev {
                    Some(p) => p.next.set(next),
                    None => self.head.set(next),
                }
                if next.is_none() {
                    self.tail.set(prev);
                }
                self.len.set(self.len.get() - 1);
                return true;
            }
            prev = Some(node);
            current = node.next.get();
            index += 1;
        }
        false
    }
}

pub(crate) struct NodeIter<'a, K> {
    next: Option<&'a Node<'a, K>>,
}

impl<'a, K: 'a> Iterator for NodeIter<'a, K> {
    type Item = &'a Node<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.get();
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arena;

    fn keys<'a, 'k>(list: &NodeList<'a, &'k str>) -> Vec<&'k str> {
        list.iter().map(|n| n.key).collect()
    }

    #[test]
    fn push_and_remove_keep_links_consistent() {
        let arena = Arena::new();
        let list = NodeList::new();
        for key in ["a", "b", "c"] {
            list.push_back(arena.alloc(Node::new(key)));
        }
        assert_eq!(keys(&list), ["a", "b", "c"]);

        assert!(list.remove_first(|_, n| n.key == "c"));
        list.push_back(arena.alloc(Node::new("d")));
        assert_eq!(keys(&list), ["a", "b", "d"]);

        assert!(list.remove_first(|i, _| i == 0));
        assert_eq!(keys(&list), ["b", "d"]);
        assert!(!list.remove_first(|_, n| n.key == "zzz"));
        assert_eq!(list.len(), 2);
    }
}
