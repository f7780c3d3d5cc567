use std::{borrow::Borrow, collections::HashSet};

use fast_rbtree::rbtree_map::DefaultRBTreeMap;
use rand::{seq::SliceRandom, thread_rng, Rng};

#[test]
fn rbtree_map_works() {
    let mut tree = Box::new(DefaultRBTreeMap::<i32, i32>::new());

    for i in 0..1000 {
        assert_eq!(tree.put(i, i + 1), None);
    }
    assert_eq!(tree.len(), 1000);

    for i in 0..1000 {
        assert_eq!(tree.get(&i), Some(&(i + 1)));
    }

    assert_eq!(tree.get(&12), Some(&13));
    assert_eq!(tree.remove(&12), Some(13));
    assert!(tree.get(&12).is_none());
    assert!(!tree.contains_key(&12));
    tree.put(12, 24);
    assert_eq!(tree.get(&12), Some(&24));
    assert_eq!(tree.put(12, 25), Some(24));
    assert_eq!(tree.len(), 1000);

    for i in 0..1000 {
        if i == 12 {
            assert_eq!(tree.get(&i), Some(&25));
        } else {
            assert_eq!(tree.get(&i), Some(&(i + 1)));
        }
    }
}

#[test]
fn works_on_pointer_types() {
    let mut tree = Box::new(DefaultRBTreeMap::<String, String>::new());
    assert_eq!(tree.get(&"test".into()), None);
    tree.put("test".into(), "test2".into());
    assert_eq!(tree.get(&"test".into()), Some(&("test2".to_string())));
    for i in 0..100 {
        tree.put(i.to_string(), (i + 1).to_string());
    }
    for i in 0..100 {
        assert_eq!(
            tree.get(i.to_string().borrow()),
            Some((i + 1).to_string().borrow()),
        );
    }
}

#[test]
fn get_mut_and_ordered_iteration() {
    let mut tree = DefaultRBTreeMap::<u32, Vec<u32>>::new();
    assert!(tree.is_empty());
    for key in [5, 3, 8, 1] {
        tree.put(key, Vec::new());
    }
    if let Some(list) = tree.get_mut(&3) {
        list.push(30);
        list.push(31);
    }
    assert!(tree.get_mut(&4).is_none());
    assert_eq!(tree.get(&3), Some(&vec![30, 31]));

    let keys: Vec<u32> = tree.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec![1, 3, 5, 8]);
    let last_first: Vec<u32> = tree.iter().rev().map(|(k, _)| *k).collect();
    assert_eq!(last_first, vec![8, 5, 3, 1]);

    assert_eq!(tree.first_key_value().map(|(k, _)| *k), Some(1));
    assert_eq!(tree.last_key_value().map(|(k, _)| *k), Some(8));

    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.first_key_value(), None);
}

#[test]
fn random_op_test() {
    let mut tree = Box::new(DefaultRBTreeMap::<i32, i32>::new());

    let n = 20000;

    let mut rng = thread_rng();

    let mut keys = HashSet::new();
    while keys.len() < n {
        keys.insert(rng.gen::<u16>() as i32);
    }
    let mut keys: Vec<_> = keys.into_iter().collect();

    for &key in keys.iter() {
        tree.put(key, key + 1);
    }

    for &key in keys.iter() {
        assert_eq!(tree.get(&key), Some(&(key + 1)));
    }

    keys.shuffle(&mut rng);
    let removed_keys = keys.split_off(n / 2);
    for &key in removed_keys.iter() {
        assert_eq!(tree.remove(&key), Some(key + 1));
    }

    for &key in removed_keys.iter() {
        assert!(tree.get(&key).is_none());
    }

    for &key in keys.iter() {
        assert_eq!(tree.get(&key), Some(&(key + 1)));
    }
    assert_eq!(tree.len(), n / 2);
}
