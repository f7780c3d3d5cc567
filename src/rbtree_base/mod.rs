mod freelist;
pub mod iter;
mod node;
pub mod rbtree;
pub mod rbtree_traits;
pub mod tree_stats;
pub mod verify;

use self::{
    rbtree::RBTree,
    rbtree_traits::{DefaultRBTreeTraits, ItemComparator, _RBTree},
};
use std::{fmt::Debug, marker::PhantomData};

#[derive(Debug)]
pub struct DefaultItemComparator<T> {
    _t: PhantomData<T>,
}

impl<T> Clone for DefaultItemComparator<T> {
    fn clone(&self) -> Self {
        Self { _t: PhantomData }
    }
}

impl<T> ItemComparator<T> for DefaultItemComparator<T>
where
    T: Ord + Debug,
{
    fn new() -> Self {
        Self { _t: PhantomData }
    }
    fn less(&self, lhs: &T, rhs: &T) -> bool {
        lhs < rhs
    }
}

pub type DefaultRBTreeConfig<T> = _RBTree<T, DefaultItemComparator<T>, DefaultRBTreeTraits>;
pub type DefaultRBTree<T> = RBTree<DefaultRBTreeConfig<T>>;
