use std::{cmp::Ordering, fmt::Debug};

use crate::rbtree_base::{
    rbtree::RBTree,
    rbtree_traits::{DefaultRBTreeTraits, ItemComparator, RBTreeTraits, _RBTree},
    DefaultItemComparator,
};

/// Key/value pair stored in a map's tree, ordered by key alone.
#[derive(Clone, Debug)]
pub struct MapEntry<K, V>(pub K, pub V);

impl<K, V> MapEntry<K, V> {
    pub fn key(&self) -> &K {
        &self.0
    }

    pub fn value(&self) -> &V {
        &self.1
    }
}

/// Lifts a key comparator to map entries.
#[derive(Clone, Debug)]
pub struct EntryComparator<C>(C);

impl<K, V, C: ItemComparator<K>> ItemComparator<MapEntry<K, V>> for EntryComparator<C> {
    fn new() -> Self {
        Self(C::new())
    }

    fn less(&self, lhs: &MapEntry<K, V>, rhs: &MapEntry<K, V>) -> bool {
        self.0.less(&lhs.0, &rhs.0)
    }
}

pub type RBTreeMapConfig<K, V, C, Traits> = _RBTree<MapEntry<K, V>, EntryComparator<C>, Traits>;

pub struct RBTreeMap<K, V, C = DefaultItemComparator<K>, Traits = DefaultRBTreeTraits>
where
    K: Debug,
    V: Debug,
    C: ItemComparator<K>,
    Traits: RBTreeTraits,
{
    _tree: RBTree<RBTreeMapConfig<K, V, C, Traits>>,
}

impl<K, V, C, Traits> RBTreeMap<K, V, C, Traits>
where
    K: Debug,
    V: Debug,
    C: ItemComparator<K>,
    Traits: RBTreeTraits,
{
    fn key_order(&self, stored: &K, key: &K) -> Ordering {
        order_with(&self._tree.item_comp().0, stored, key)
    }

    pub fn is_empty(&self) -> bool {
        self._tree.empty()
    }

    pub fn len(&self) -> usize {
        self._tree.size()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Stores `value` under `key`, returning the value it replaced.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self._tree
            .insert(MapEntry(key, value))
            .map(|MapEntry(_, old)| old)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self._tree
            .search_by(|entry| self.key_order(&entry.0, key))
            .map(MapEntry::value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let comp = self._tree.item_comp().0.clone();
        self._tree
            .search_by_mut(|entry| order_with(&comp, &entry.0, key))
            .map(|entry| &mut entry.1)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let comp = self._tree.item_comp().0.clone();
        self._tree
            .delete_by(|entry| order_with(&comp, &entry.0, key))
            .map(|MapEntry(_, value)| value)
    }

    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self._tree.first().map(|entry| (&entry.0, &entry.1))
    }

    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self._tree.last().map(|entry| (&entry.0, &entry.1))
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &V)> + ExactSizeIterator {
        self._tree.iter().map(|entry| (&entry.0, &entry.1))
    }

    pub fn clear(&mut self) {
        self._tree.clear();
    }

    pub fn new() -> Self {
        Self {
            _tree: RBTree::new(),
        }
    }
}

impl<K, V, C, Traits> Default for RBTreeMap<K, V, C, Traits>
where
    K: Debug,
    V: Debug,
    C: ItemComparator<K>,
    Traits: RBTreeTraits,
{
    fn default() -> Self {
        Self::new()
    }
}

fn order_with<K, C: ItemComparator<K>>(comp: &C, stored: &K, key: &K) -> Ordering {
    if comp.less(key, stored) {
        Ordering::Greater
    } else if comp.less(stored, key) {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}

pub type DefaultRBTreeMap<K, V> = RBTreeMap<K, V>;
