use std::ops::Not;

/// Index of a node inside the tree's arena.
pub type NodeId = usize;

/// Slot 0 of every arena: the shared black sentinel standing in for every
/// absent child and for the parent of the root.
pub const NIL: NodeId = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Not for Direction {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

#[derive(Debug)]
pub struct Node<T> {
    pub color: Color,
    pub item: Option<T>,
    pub left: NodeId,
    pub right: NodeId,
    pub parent: NodeId,
}

impl<T> Node<T> {
    pub fn sentinel() -> Self {
        Self {
            color: Color::Black,
            item: None,
            left: NIL,
            right: NIL,
            parent: NIL,
        }
    }

    /// A fresh red leaf hanging off the sentinel.
    pub fn new_leaf(item: T) -> Self {
        Self {
            color: Color::Red,
            item: Some(item),
            left: NIL,
            right: NIL,
            parent: NIL,
        }
    }

    #[inline]
    pub fn child(&self, dir: Direction) -> NodeId {
        match dir {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    #[inline]
    pub fn set_child(&mut self, dir: Direction, child: NodeId) {
        match dir {
            Direction::Left => self.left = child,
            Direction::Right => self.right = child,
        }
    }

    /// Stored item of a live node. Only the sentinel and released slots are
    /// empty, and the tree never reads their item.
    #[inline]
    pub fn item(&self) -> &T {
        match &self.item {
            Some(item) => item,
            None => unreachable!("item read from the sentinel or a released node"),
        }
    }

    /// Clears links and hands back the item, leaving an empty black slot.
    pub fn reset(&mut self) -> Option<T> {
        self.color = Color::Black;
        self.left = NIL;
        self.right = NIL;
        self.parent = NIL;
        self.item.take()
    }
}
