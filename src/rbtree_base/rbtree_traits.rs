use std::fmt::Debug;
use std::marker::PhantomData;

// Traits bound
pub trait ItemComparator<T>: Clone + Debug {
    fn new() -> Self;
    fn less(&self, lhs: &T, rhs: &T) -> bool;
}

/// Ordering capability carried by the item itself. Must be a strict weak
/// ordering that stays stable while the item is stored in a tree.
pub trait Item {
    fn less(&self, than: &Self) -> bool;
}

#[derive(Debug)]
pub struct ItemLessComparator<T> {
    _t: PhantomData<T>,
}

impl<T> Clone for ItemLessComparator<T> {
    fn clone(&self) -> Self {
        Self { _t: PhantomData }
    }
}

impl<T: Item + Debug> ItemComparator<T> for ItemLessComparator<T> {
    fn new() -> Self {
        Self { _t: PhantomData }
    }

    fn less(&self, lhs: &T, rhs: &T) -> bool {
        lhs.less(rhs)
    }
}

pub trait RBTreeTraits: Clone + Debug {
    const FREELIST_SIZE: usize;
    const SELF_VERIFY: bool;
}

#[derive(Clone, Debug)]
pub struct DefaultRBTreeTraits;

impl RBTreeTraits for DefaultRBTreeTraits {
    const FREELIST_SIZE: usize = 32;
    const SELF_VERIFY: bool = false;
}

/// Same pool size as the default, but every mutation is followed by a full
/// invariant check in debug builds.
#[derive(Clone, Debug)]
pub struct VerifiedRBTreeTraits;

impl RBTreeTraits for VerifiedRBTreeTraits {
    const FREELIST_SIZE: usize = 32;
    const SELF_VERIFY: bool = true;
}

pub trait RBTreeParams {
    type ItemType: Debug;
    type ItemCompareType: ItemComparator<Self::ItemType>;
    type Traits: RBTreeTraits;
    const FREELIST_SIZE: usize;
    const SELF_VERIFY: bool;
}

#[derive(Debug)]
pub struct _RBTree<TItem: Debug, TCompare, Traits: RBTreeTraits> {
    _phantom_item: PhantomData<TItem>,
    _phantom_compare: PhantomData<TCompare>,
    _phantom_traits: PhantomData<Traits>,
}

impl<TItem, TCompare, TTraits> RBTreeParams for _RBTree<TItem, TCompare, TTraits>
where
    TItem: Debug,
    TCompare: ItemComparator<TItem>,
    TTraits: RBTreeTraits,
{
    type ItemType = TItem;
    type ItemCompareType = TCompare;
    type Traits = TTraits;
    const FREELIST_SIZE: usize = TTraits::FREELIST_SIZE;
    const SELF_VERIFY: bool = TTraits::SELF_VERIFY;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Deadline(u32);

    impl Item for Deadline {
        fn less(&self, than: &Self) -> bool {
            self.0 < than.0
        }
    }

    #[test]
    fn test_rbtree_traits() {
        assert_eq!(DefaultRBTreeTraits::FREELIST_SIZE, 32);
        assert!(!DefaultRBTreeTraits::SELF_VERIFY);
        assert!(VerifiedRBTreeTraits::SELF_VERIFY);
        type Config = _RBTree<Deadline, ItemLessComparator<Deadline>, VerifiedRBTreeTraits>;
        assert_eq!(Config::FREELIST_SIZE, 32);
        assert!(Config::SELF_VERIFY);
    }

    #[test]
    fn item_less_comparator_uses_item_ordering() {
        let comp = ItemLessComparator::<Deadline>::new();
        assert!(comp.less(&Deadline(1), &Deadline(2)));
        assert!(!comp.less(&Deadline(2), &Deadline(1)));
        assert!(!comp.less(&Deadline(2), &Deadline(2)));
    }
}
