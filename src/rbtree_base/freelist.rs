use std::ops::{Index, IndexMut};

use super::node::{Node, NodeId, NIL};

/// Node arena with a bounded pool of recycled slots.
///
/// Slot 0 always holds the sentinel. Released slots go back to the pool while
/// it has room; past that, a slot at the tail of the arena is deallocated and
/// any other slot is retired until an acquire needs it again. The arena is
/// therefore never longer than the peak number of live nodes plus one.
#[derive(Debug)]
pub struct FreeList<T> {
    slots: Vec<Node<T>>,
    pool: Vec<NodeId>,
    retired: Vec<NodeId>,
    capacity: usize,
    reclaimed: usize,
}

impl<T> FreeList<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Node::sentinel()],
            pool: Vec::with_capacity(capacity),
            retired: Vec::new(),
            capacity,
            reclaimed: 0,
        }
    }

    /// Hands out a red leaf holding `item`, preferring recycled storage.
    pub fn acquire(&mut self, item: T) -> NodeId {
        match self.pool.pop().or_else(|| self.retired.pop()) {
            Some(id) => {
                self.slots[id] = Node::new_leaf(item);
                id
            }
            None => {
                self.slots.push(Node::new_leaf(item));
                self.slots.len() - 1
            }
        }
    }

    /// Takes the item out of a detached node and recycles its slot.
    pub fn release(&mut self, id: NodeId) -> Option<T> {
        debug_assert!(id != NIL, "the sentinel is never released");
        let item = self.slots[id].reset();

        if self.pool.len() < self.capacity {
            self.pool.push(id);
        } else if id == self.slots.len() - 1 {
            log::debug!("FreeList::release deallocating tail slot {}", id);
            self.slots.pop();
            self.reclaimed += 1;
        } else {
            log::debug!("FreeList::release pool full, retiring slot {}", id);
            self.retired.push(id);
        }

        item
    }

    /// Drops every node except the sentinel.
    pub fn clear(&mut self) {
        self.slots.truncate(1);
        self.slots[NIL] = Node::sentinel();
        self.pool.clear();
        self.retired.clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Arena slots other than the sentinel, live or idle.
    pub fn slots(&self) -> usize {
        self.slots.len() - 1
    }

    pub fn pooled(&self) -> usize {
        self.pool.len()
    }

    pub fn retired(&self) -> usize {
        self.retired.len()
    }

    pub fn reclaimed(&self) -> usize {
        self.reclaimed
    }
}

impl<T> Index<NodeId> for FreeList<T> {
    type Output = Node<T>;

    #[inline]
    fn index(&self, id: NodeId) -> &Node<T> {
        &self.slots[id]
    }
}

impl<T> IndexMut<NodeId> for FreeList<T> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.slots[id]
    }
}
