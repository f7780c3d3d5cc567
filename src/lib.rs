pub mod rbtree_base;
pub mod rbtree_map;
