use std::fmt::Debug;

use super::{
    node::{NodeId, NIL},
    rbtree::RBTree,
    rbtree_traits::RBTreeParams,
};

/// Resumable cursor over a tree. The cursor borrows the tree, so the tree
/// cannot change while one is outstanding.
pub trait TreeIterator<'a, T: RBTreeParams + 'a>: Clone + Debug {
    /// Whether the cursor stands on an item rather than past either end.
    fn valid(&self) -> bool;
    /// Steps to the neighbouring item. No-op once the cursor is invalid.
    fn next(&mut self) -> &mut Self;
    /// Item under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is not [`valid`](Self::valid).
    fn value(&self) -> &'a T::ItemType;
    /// Item under the cursor, or `None` past the end.
    fn get(&self) -> Option<&'a T::ItemType>;
    fn equals(&self, other: &Self) -> bool;
}

pub struct RBTreeIterator<'a, T: RBTreeParams> {
    tree: &'a RBTree<T>,
    curr: NodeId,
}

impl<'a, T: RBTreeParams> RBTreeIterator<'a, T> {
    pub(crate) fn new(tree: &'a RBTree<T>, curr: NodeId) -> Self {
        Self { tree, curr }
    }
}

impl<'a, T: RBTreeParams> Clone for RBTreeIterator<'a, T> {
    fn clone(&self) -> Self {
        Self::new(self.tree, self.curr)
    }
}

impl<'a, T: RBTreeParams> Debug for RBTreeIterator<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RBTreeIterator")
            .field("curr", &self.get())
            .finish()
    }
}

impl<'a, T: RBTreeParams + 'a> TreeIterator<'a, T> for RBTreeIterator<'a, T> {
    #[inline]
    fn valid(&self) -> bool {
        self.curr != NIL
    }

    fn next(&mut self) -> &mut Self {
        if self.valid() {
            self.curr = self.tree.successor(self.curr);
        }
        self
    }

    fn value(&self) -> &'a T::ItemType {
        assert!(self.valid(), "value() called on an exhausted cursor");
        self.tree.item(self.curr)
    }

    fn get(&self) -> Option<&'a T::ItemType> {
        self.valid().then(|| self.tree.item(self.curr))
    }

    fn equals(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.curr == other.curr
    }
}

pub struct RBTreeReverseIterator<'a, T: RBTreeParams> {
    tree: &'a RBTree<T>,
    curr: NodeId,
}

impl<'a, T: RBTreeParams> RBTreeReverseIterator<'a, T> {
    pub(crate) fn new(tree: &'a RBTree<T>, curr: NodeId) -> Self {
        Self { tree, curr }
    }
}

impl<'a, T: RBTreeParams> Clone for RBTreeReverseIterator<'a, T> {
    fn clone(&self) -> Self {
        Self::new(self.tree, self.curr)
    }
}

impl<'a, T: RBTreeParams> Debug for RBTreeReverseIterator<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RBTreeReverseIterator")
            .field("curr", &self.get())
            .finish()
    }
}

impl<'a, T: RBTreeParams + 'a> TreeIterator<'a, T> for RBTreeReverseIterator<'a, T> {
    #[inline]
    fn valid(&self) -> bool {
        self.curr != NIL
    }

    fn next(&mut self) -> &mut Self {
        if self.valid() {
            self.curr = self.tree.predecessor(self.curr);
        }
        self
    }

    fn value(&self) -> &'a T::ItemType {
        assert!(self.valid(), "value() called on an exhausted cursor");
        self.tree.item(self.curr)
    }

    fn get(&self) -> Option<&'a T::ItemType> {
        self.valid().then(|| self.tree.item(self.curr))
    }

    fn equals(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.curr == other.curr
    }
}

/// Double-ended iterator over the items of a tree in ascending order.
pub struct Iter<'a, T: RBTreeParams> {
    front: RBTreeIterator<'a, T>,
    back: RBTreeReverseIterator<'a, T>,
    remaining: usize,
}

impl<'a, T: RBTreeParams> Iter<'a, T> {
    pub(crate) fn new(tree: &'a RBTree<T>) -> Self {
        Self {
            front: tree.begin(),
            back: tree.rbegin(),
            remaining: tree.size(),
        }
    }
}

impl<'a, T: RBTreeParams> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T: RBTreeParams + 'a> Iterator for Iter<'a, T> {
    type Item = &'a T::ItemType;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let item = self.front.get();
        TreeIterator::next(&mut self.front);
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: RBTreeParams + 'a> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let item = self.back.get();
        TreeIterator::next(&mut self.back);
        item
    }
}

impl<'a, T: RBTreeParams + 'a> ExactSizeIterator for Iter<'a, T> {}

/// Morris in-order walk over a mutably borrowed tree.
///
/// Each `step` yields the next node to visit. Right links of subtree maxima
/// are pointed back at their in-order successor on the way down and reset on
/// the way back. Dropping the walk runs it to completion, so no thread is left
/// behind if the caller stops early or unwinds.
pub(crate) struct ThreadedWalk<'a, T: RBTreeParams> {
    tree: &'a mut RBTree<T>,
    cur: NodeId,
}

impl<'a, T: RBTreeParams> ThreadedWalk<'a, T> {
    pub(crate) fn new(tree: &'a mut RBTree<T>, start: NodeId) -> Self {
        Self { tree, cur: start }
    }

    pub(crate) fn tree(&self) -> &RBTree<T> {
        self.tree
    }

    pub(crate) fn step(&mut self) -> Option<NodeId> {
        while self.cur != NIL {
            let cur = self.cur;
            let left = self.tree.left(cur);
            if left != NIL {
                let mut most_right = left;
                while self.tree.right(most_right) != NIL && self.tree.right(most_right) != cur {
                    most_right = self.tree.right(most_right);
                }
                if self.tree.right(most_right) == NIL {
                    // thread back to cur and go down the left subtree first
                    self.tree.set_right(most_right, cur);
                    self.cur = left;
                    continue;
                }
                // second arrival through the thread
                self.tree.set_right(most_right, NIL);
            }
            self.cur = self.tree.right(cur);
            return Some(cur);
        }
        None
    }
}

impl<'a, T: RBTreeParams> Drop for ThreadedWalk<'a, T> {
    fn drop(&mut self) {
        while self.step().is_some() {}
    }
}
