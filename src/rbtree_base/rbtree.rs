use std::cmp::Ordering;

use super::{
    freelist::FreeList,
    iter::{Iter, RBTreeIterator, RBTreeReverseIterator, ThreadedWalk},
    node::{Color, Direction, NodeId, NIL},
    rbtree_traits::{ItemComparator, RBTreeParams},
    tree_stats::TreeStats,
    verify::InvariantViolations,
};

pub struct RBTree<T: RBTreeParams> {
    root_: NodeId,
    freelist_: FreeList<T::ItemType>,
    length_: usize,
    item_less: T::ItemCompareType,
}

/// Convenient Item Comparison Functions Generated From item_less
impl<T: RBTreeParams> RBTree<T> {
    pub fn item_comp(&self) -> &T::ItemCompareType {
        &self.item_less
    }

    fn item_less(&self, a: &T::ItemType, b: &T::ItemType) -> bool {
        self.item_less.less(a, b)
    }

    /// Position of `node` relative to `probe`, in the shape `search_by` expects.
    fn item_order(&self, node: &T::ItemType, probe: &T::ItemType) -> Ordering {
        if self.item_less(probe, node) {
            Ordering::Greater
        } else if self.item_less(node, probe) {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }
}

/// Node link accessors
impl<T: RBTreeParams> RBTree<T> {
    #[inline]
    pub(crate) fn root(&self) -> NodeId {
        self.root_
    }

    #[inline]
    pub(crate) fn left(&self, n: NodeId) -> NodeId {
        self.freelist_[n].left
    }

    #[inline]
    pub(crate) fn right(&self, n: NodeId) -> NodeId {
        self.freelist_[n].right
    }

    #[inline]
    pub(crate) fn parent(&self, n: NodeId) -> NodeId {
        self.freelist_[n].parent
    }

    #[inline]
    fn child(&self, n: NodeId, dir: Direction) -> NodeId {
        self.freelist_[n].child(dir)
    }

    #[inline]
    fn color(&self, n: NodeId) -> Color {
        self.freelist_[n].color
    }

    #[inline]
    pub(crate) fn item(&self, n: NodeId) -> &T::ItemType {
        self.freelist_[n].item()
    }

    #[inline]
    pub(crate) fn set_right(&mut self, n: NodeId, right: NodeId) {
        self.freelist_[n].right = right;
    }

    #[inline]
    fn set_child(&mut self, n: NodeId, dir: Direction, child: NodeId) {
        self.freelist_[n].set_child(dir, child);
    }

    #[inline]
    fn set_parent(&mut self, n: NodeId, parent: NodeId) {
        self.freelist_[n].parent = parent;
    }

    #[inline]
    fn set_color(&mut self, n: NodeId, color: Color) {
        debug_assert!(
            n != NIL || color == Color::Black,
            "the sentinel must stay black"
        );
        self.freelist_[n].color = color;
    }

    /// Which side of its parent `n` hangs on.
    #[inline]
    fn side_of(&self, n: NodeId) -> Direction {
        if n == self.left(self.parent(n)) {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    pub(crate) fn minimum(&self, mut x: NodeId) -> NodeId {
        while self.left(x) != NIL {
            x = self.left(x);
        }
        x
    }

    pub(crate) fn maximum(&self, mut x: NodeId) -> NodeId {
        while self.right(x) != NIL {
            x = self.right(x);
        }
        x
    }

    /// In-order successor by parent chasing. NIL past the maximum.
    pub(crate) fn successor(&self, x: NodeId) -> NodeId {
        self.neighbour(x, Direction::Right)
    }

    /// In-order predecessor by parent chasing. NIL before the minimum.
    pub(crate) fn predecessor(&self, x: NodeId) -> NodeId {
        self.neighbour(x, Direction::Left)
    }

    fn neighbour(&self, mut x: NodeId, dir: Direction) -> NodeId {
        debug_assert!(x != NIL);
        let sub = self.child(x, dir);
        if sub != NIL {
            return match dir {
                Direction::Right => self.minimum(sub),
                Direction::Left => self.maximum(sub),
            };
        }
        let mut y = self.parent(x);
        while y != NIL && x == self.child(y, dir) {
            x = y;
            y = self.parent(y);
        }
        y
    }
}

/// Access Functions to the item count
impl<T: RBTreeParams> RBTree<T> {
    pub fn size(&self) -> usize {
        self.length_
    }

    pub fn empty(&self) -> bool {
        self.size() == 0
    }

    pub fn get_stats(&self) -> TreeStats {
        TreeStats {
            size: self.length_,
            slots: self.freelist_.slots(),
            pooled: self.freelist_.pooled(),
            retired: self.freelist_.retired(),
            reclaimed: self.freelist_.reclaimed(),
        }
    }

    pub fn freelist_capacity(&self) -> usize {
        self.freelist_.capacity()
    }
}

/// Rotations
impl<T: RBTreeParams> RBTree<T> {
    /// Puts `new` where `old` hung under `parent`, or at the root when
    /// `parent` is the sentinel. Does not touch `new`'s parent link.
    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        if parent == NIL {
            self.root_ = new;
        } else if self.left(parent) == old {
            self.set_child(parent, Direction::Left, new);
        } else {
            self.set_child(parent, Direction::Right, new);
        }
    }

    /// Lowers `x` towards `dir`, lifting its child on the other side into
    /// its place:
    ///
    /// ```text
    ///     x                y
    ///    / \              / \
    ///   a   y    -->     x   c      (dir = Left)
    ///      / \          / \
    ///     b   c        a   b
    /// ```
    fn rotate(&mut self, x: NodeId, dir: Direction) {
        let y = self.child(x, !dir);
        debug_assert!(y != NIL, "rotation pivot must have a real child");

        log::debug!("RBTree::rotate {:?} at {} (lifting {})", dir, x, y);

        // y's inner subtree moves across to x
        let inner = self.child(y, dir);
        self.set_child(x, !dir, inner);
        if inner != NIL {
            self.set_parent(inner, x);
        }

        let parent = self.parent(x);
        self.replace_child(parent, x, y);
        self.set_parent(y, parent);

        self.set_child(y, dir, x);
        self.set_parent(x, y);
    }

    #[allow(dead_code)]
    pub(crate) fn left_rotate(&mut self, x: NodeId) {
        self.rotate(x, Direction::Left);
    }

    #[allow(dead_code)]
    pub(crate) fn right_rotate(&mut self, y: NodeId) {
        self.rotate(y, Direction::Right);
    }
}

/// Search
impl<T: RBTreeParams> RBTree<T> {
    /// Descends from the root, steered by `cmp` which reports how a stored
    /// item orders against the target. Returns the matching node or NIL.
    fn find_node_by<F>(&self, mut cmp: F) -> NodeId
    where
        F: FnMut(&T::ItemType) -> Ordering,
    {
        let mut x = self.root_;
        while x != NIL {
            match cmp(self.item(x)) {
                Ordering::Greater => x = self.left(x),
                Ordering::Less => x = self.right(x),
                Ordering::Equal => break,
            }
        }
        x
    }

    fn find_node(&self, item: &T::ItemType) -> NodeId {
        self.find_node_by(|node| self.item_order(node, item))
    }

    /// Returns the stored item comparing equal to `item`.
    pub fn search(&self, item: &T::ItemType) -> Option<&T::ItemType> {
        match self.find_node(item) {
            NIL => None,
            n => Some(self.item(n)),
        }
    }

    /// Like [`search`](Self::search), but probes with a closure reporting how
    /// each stored item orders against the wanted one.
    pub fn search_by<F>(&self, cmp: F) -> Option<&T::ItemType>
    where
        F: FnMut(&T::ItemType) -> Ordering,
    {
        match self.find_node_by(cmp) {
            NIL => None,
            n => Some(self.item(n)),
        }
    }

    /// Mutable access for callers that only touch parts of the item the
    /// ordering ignores.
    pub(crate) fn search_by_mut<F>(&mut self, cmp: F) -> Option<&mut T::ItemType>
    where
        F: FnMut(&T::ItemType) -> Ordering,
    {
        match self.find_node_by(cmp) {
            NIL => None,
            n => self.freelist_[n].item.as_mut(),
        }
    }

    pub fn exists(&self, item: &T::ItemType) -> bool {
        self.find_node(item) != NIL
    }

    /// Smallest item, if any.
    pub fn first(&self) -> Option<&T::ItemType> {
        match self.minimum(self.root_) {
            NIL => None,
            n => Some(self.item(n)),
        }
    }

    /// Largest item, if any.
    pub fn last(&self) -> Option<&T::ItemType> {
        match self.maximum(self.root_) {
            NIL => None,
            n => Some(self.item(n)),
        }
    }
}

/// Insertion
impl<T: RBTreeParams> RBTree<T> {
    /// Inserts `item`. If an equal item is already stored it is overwritten
    /// and handed back, leaving the size unchanged.
    pub fn insert(&mut self, item: T::ItemType) -> Option<T::ItemType> {
        let mut insert_dir = Direction::Left;
        let mut y = NIL;
        let mut x = self.root_;
        while x != NIL {
            y = x;
            if self.item_less(&item, self.item(x)) {
                x = self.left(x);
                insert_dir = Direction::Left;
            } else if self.item_less(self.item(x), &item) {
                x = self.right(x);
                insert_dir = Direction::Right;
            } else {
                return self.freelist_[x].item.replace(item);
            }
        }

        let z = self.freelist_.acquire(item);
        self.set_parent(z, y);
        if y == NIL {
            self.root_ = z;
        } else {
            self.set_child(y, insert_dir, z);
        }
        self.insert_fixup(z);
        self.length_ += 1;

        self.self_verify();
        None
    }

    fn insert_fixup(&mut self, mut z: NodeId) {
        while self.color(self.parent(z)) == Color::Red {
            // a red parent is never the root, so the grandparent is real
            let p = self.parent(z);
            let g = self.parent(p);
            let side = self.side_of(p);
            let uncle = self.child(g, !side);

            if self.color(uncle) == Color::Red {
                // case 1: push the red up two levels
                self.set_color(p, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(g, Color::Red);
                z = g;
            } else {
                if z == self.child(p, !side) {
                    // case 2: inner grandchild, turn it into an outer one
                    z = p;
                    self.rotate(z, side);
                }
                // case 3
                let p = self.parent(z);
                let g = self.parent(p);
                self.set_color(p, Color::Black);
                self.set_color(g, Color::Red);
                self.rotate(g, !side);
            }
        }
        let root = self.root_;
        self.set_color(root, Color::Black);
    }
}

/// Deletion
impl<T: RBTreeParams> RBTree<T> {
    /// Removes and returns the stored item equal to `item`.
    pub fn delete(&mut self, item: &T::ItemType) -> Option<T::ItemType> {
        let z = self.find_node(item);
        self.delete_found(z)
    }

    /// Removes the item found by probing with `cmp`, see
    /// [`search_by`](Self::search_by).
    pub fn delete_by<F>(&mut self, cmp: F) -> Option<T::ItemType>
    where
        F: FnMut(&T::ItemType) -> Ordering,
    {
        let z = self.find_node_by(cmp);
        self.delete_found(z)
    }

    fn delete_found(&mut self, z: NodeId) -> Option<T::ItemType> {
        if z == NIL {
            log::debug!("RBTree::delete item not found in tree of size {}", self.size());
            return None;
        }

        self.delete_node(z);
        let removed = self.freelist_.release(z);

        self.self_verify();
        removed
    }

    /// Replaces the subtree rooted at `u` with the one rooted at `v`. `v` may
    /// be the sentinel, whose parent link then records where it stands.
    fn transplant(&mut self, u: NodeId, v: NodeId) {
        let parent = self.parent(u);
        self.replace_child(parent, u, v);
        self.set_parent(v, parent);
    }

    fn delete_node(&mut self, z: NodeId) {
        let mut removed_color = self.color(z);
        let x;

        if self.left(z) == NIL {
            x = self.right(z);
            self.transplant(z, x);
        } else if self.right(z) == NIL {
            x = self.left(z);
            self.transplant(z, x);
        } else {
            let y = self.minimum(self.right(z));
            removed_color = self.color(y);
            x = self.right(y);

            if self.parent(y) == z {
                // x may be the sentinel, the fix-up still needs its parent
                self.set_parent(x, y);
            } else {
                self.transplant(y, x);
                let right = self.right(z);
                self.set_child(y, Direction::Right, right);
                self.set_parent(right, y);
            }

            self.transplant(z, y);
            let left = self.left(z);
            self.set_child(y, Direction::Left, left);
            self.set_parent(left, y);
            self.set_color(y, self.color(z));
        }

        if removed_color == Color::Black {
            self.delete_fixup(x);
        }
        self.length_ -= 1;
    }

    fn delete_fixup(&mut self, mut x: NodeId) {
        while x != self.root_ && self.color(x) == Color::Black {
            let side = self.side_of(x);
            let far = !side;
            let mut w = self.child(self.parent(x), far);

            if self.color(w) == Color::Red {
                // case 1: make the sibling black
                let p = self.parent(x);
                self.set_color(w, Color::Black);
                self.set_color(p, Color::Red);
                self.rotate(p, side);
                w = self.child(self.parent(x), far);
            }

            if self.color(self.child(w, side)) == Color::Black
                && self.color(self.child(w, far)) == Color::Black
            {
                // case 2
                self.set_color(w, Color::Red);
                x = self.parent(x);
            } else {
                if self.color(self.child(w, far)) == Color::Black {
                    // case 3: near child red, far child black
                    let near = self.child(w, side);
                    self.set_color(near, Color::Black);
                    self.set_color(w, Color::Red);
                    self.rotate(w, far);
                    w = self.child(self.parent(x), far);
                }
                // case 4
                let p = self.parent(x);
                let far_child = self.child(w, far);
                self.set_color(w, self.color(p));
                self.set_color(p, Color::Black);
                self.set_color(far_child, Color::Black);
                self.rotate(p, side);
                x = self.root_;
            }
        }
        self.set_color(x, Color::Black);
    }

    /// Removes every item, keeping the configured pool capacity.
    pub fn clear(&mut self) {
        log::debug!("RBTree::clear dropping {} items", self.length_);
        self.freelist_.clear();
        self.root_ = NIL;
        self.length_ = 0;
    }
}

/// Traversal
impl<T: RBTreeParams> RBTree<T> {
    /// Visits every item in ascending order without auxiliary storage by
    /// temporarily threading right links back to in-order successors. All
    /// threads are removed before returning, also when `visit` panics.
    pub fn ascend<F>(&mut self, mut visit: F)
    where
        F: FnMut(&T::ItemType),
    {
        let root = self.root_;
        let mut walk = ThreadedWalk::new(self, root);
        while let Some(n) = walk.step() {
            visit(walk.tree().item(n));
        }
    }

    /// Ascending scan with an explicit stack; leaves the tree untouched.
    pub fn ascend_stacked<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(&'a T::ItemType),
    {
        let mut stack = Vec::new();
        let mut cur = self.root_;
        while cur != NIL || !stack.is_empty() {
            while cur != NIL {
                stack.push(cur);
                cur = self.left(cur);
            }
            if let Some(n) = stack.pop() {
                visit(self.item(n));
                cur = self.right(n);
            }
        }
    }

    /// Cursor positioned at the smallest item.
    pub fn begin(&self) -> RBTreeIterator<T> {
        RBTreeIterator::new(self, self.minimum(self.root_))
    }

    /// Cursor positioned at the largest item, walking downwards.
    pub fn rbegin(&self) -> RBTreeReverseIterator<T> {
        RBTreeReverseIterator::new(self, self.maximum(self.root_))
    }

    pub fn iter(&self) -> Iter<T> {
        Iter::new(self)
    }
}

/// Verification
impl<T: RBTreeParams> RBTree<T> {
    fn self_verify(&self) {
        if T::SELF_VERIFY {
            let violations = self.verify();
            debug_assert!(
                violations.is_ok(),
                "red-black invariants broken: {:#09b}",
                violations.bits()
            );
        }
    }

    /// Checks every red-black and ordering invariant, reporting each kind of
    /// breakage found.
    pub fn verify(&self) -> InvariantViolations {
        let mut flags = InvariantViolations::Ok;

        if self.color(NIL) != Color::Black {
            flags = flags | InvariantViolations::RedSentinel;
        }
        if self.root_ != NIL {
            if self.color(self.root_) != Color::Black {
                flags = flags | InvariantViolations::RedRoot;
            }
            if self.parent(self.root_) != NIL {
                flags = flags | InvariantViolations::BrokenParentLink;
            }
        }

        let mut count = 0;
        self.verify_node(self.root_, &mut flags, &mut count);
        if count != self.length_ {
            flags = flags | InvariantViolations::SizeMismatch;
        }

        let mut prev: Option<&T::ItemType> = None;
        self.ascend_stacked(|item| {
            if let Some(prev) = prev {
                if !self.item_less(prev, item) {
                    flags = flags | InvariantViolations::OutOfOrder;
                }
            }
            prev = Some(item);
        });

        flags
    }

    /// Returns the black-height of the subtree at `n`.
    fn verify_node(&self, n: NodeId, flags: &mut InvariantViolations, count: &mut usize) -> usize {
        if n == NIL {
            return 1;
        }
        *count += 1;

        let left = self.left(n);
        let right = self.right(n);
        for child in [left, right] {
            if child == NIL {
                continue;
            }
            if self.parent(child) != n {
                *flags = *flags | InvariantViolations::BrokenParentLink;
            }
            if self.color(n) == Color::Red && self.color(child) == Color::Red {
                *flags = *flags | InvariantViolations::RedRedEdge;
            }
        }

        let lh = self.verify_node(left, flags, count);
        let rh = self.verify_node(right, flags, count);
        if lh != rh {
            *flags = *flags | InvariantViolations::BlackHeightMismatch;
        }

        lh + usize::from(self.color(n) == Color::Black)
    }
}

/// Debug
impl<T: RBTreeParams> RBTree<T> {
    fn print_node(&self, f: &mut std::fmt::Formatter<'_>, n: NodeId, depth: usize) -> std::fmt::Result {
        if n == NIL {
            return Ok(());
        }
        self.print_node(f, self.right(n), depth + 1)?;
        for _ in 0..depth {
            write!(f, "    ")?;
        }
        let color = match self.color(n) {
            Color::Red => 'R',
            Color::Black => 'B',
        };
        writeln!(f, "{:?} ({})", self.item(n), color)?;
        self.print_node(f, self.left(n), depth + 1)
    }
}

/// Display
impl<T: RBTreeParams> std::fmt::Debug for RBTree<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.print_node(f, self.root_, 0)
    }
}

impl<'a, T: RBTreeParams> IntoIterator for &'a RBTree<T> {
    type Item = &'a T::ItemType;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T: RBTreeParams> Default for RBTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RBTreeParams> RBTree<T> {
    pub fn new() -> Self {
        Self::with_freelist_capacity(T::FREELIST_SIZE)
    }

    /// Empty tree whose node pool keeps at most `capacity` recycled slots.
    pub fn with_freelist_capacity(capacity: usize) -> Self {
        Self {
            root_: NIL,
            freelist_: FreeList::new(capacity),
            length_: 0,
            item_less: T::ItemCompareType::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::rbtree_base::{DefaultRBTree, DefaultRBTreeConfig};

    use super::*;

    fn inorder(tree: &RBTree<DefaultRBTreeConfig<i32>>) -> Vec<i32> {
        let mut out = Vec::new();
        tree.ascend_stacked(|item| out.push(*item));
        out
    }

    #[test]
    fn rotations_preserve_order_and_links() {
        let mut tree = DefaultRBTree::<i32>::new();
        for i in [4, 2, 6, 1, 3, 5, 7] {
            tree.insert(i);
        }
        let before = inorder(&tree);
        let root = tree.root();
        let right = tree.right(root);

        tree.left_rotate(root);
        assert_eq!(tree.root(), right);
        assert_eq!(tree.parent(right), NIL);
        assert_eq!(tree.left(right), root);
        assert_eq!(tree.parent(root), right);
        assert_eq!(inorder(&tree), before);
        assert!(!tree.verify().has(InvariantViolations::BrokenParentLink));
        assert!(!tree.verify().has(InvariantViolations::OutOfOrder));

        tree.right_rotate(right);
        assert_eq!(tree.root(), root);
        assert_eq!(inorder(&tree), before);
        assert!(tree.verify().is_ok());
    }

    #[test]
    fn rotation_reattaches_under_parent() {
        let mut tree = DefaultRBTree::<i32>::new();
        for i in [4, 2, 6, 1, 3, 5, 7] {
            tree.insert(i);
        }
        let root = tree.root();
        let left = tree.left(root);
        let lifted = tree.right(left);

        tree.left_rotate(left);
        assert_eq!(tree.left(root), lifted);
        assert_eq!(tree.parent(lifted), root);
        assert_eq!(inorder(&tree), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn ascending_inserts_stay_balanced() {
        let mut tree = DefaultRBTree::<i32>::new();
        for i in 0..1024 {
            tree.insert(i);
            assert!(tree.verify().is_ok());
        }

        fn height(tree: &RBTree<DefaultRBTreeConfig<i32>>, n: NodeId) -> usize {
            if n == NIL {
                0
            } else {
                1 + height(tree, tree.left(n)).max(height(tree, tree.right(n)))
            }
        }
        // 2 * log2(n + 1)
        assert!(height(&tree, tree.root()) <= 20);
    }

    #[test]
    fn verify_flags_broken_tree() {
        let mut tree = DefaultRBTree::<i32>::new();
        for i in 0..3 {
            tree.insert(i);
        }
        assert!(tree.verify().is_ok());

        let root = tree.root();
        tree.freelist_[root].color = Color::Red;
        let flags = tree.verify();
        assert!(flags.has(InvariantViolations::RedRoot));
        assert!(flags.has(InvariantViolations::RedRedEdge));
        assert!(!flags.has(InvariantViolations::OutOfOrder));
    }

    #[test]
    fn successor_and_predecessor_walk() {
        let mut tree = DefaultRBTree::<i32>::new();
        for i in [5, 1, 9, 3, 7] {
            tree.insert(i);
        }
        let mut n = tree.minimum(tree.root());
        let mut up = Vec::new();
        while n != NIL {
            up.push(*tree.item(n));
            n = tree.successor(n);
        }
        assert_eq!(up, vec![1, 3, 5, 7, 9]);

        let mut n = tree.maximum(tree.root());
        let mut down = Vec::new();
        while n != NIL {
            down.push(*tree.item(n));
            n = tree.predecessor(n);
        }
        assert_eq!(down, vec![9, 7, 5, 3, 1]);
    }

    #[test]
    fn debug_prints_every_item() {
        let mut tree = DefaultRBTree::<i32>::new();
        for i in 0..3 {
            tree.insert(i);
        }
        let printed = format!("{:?}", tree);
        assert_eq!(printed, "    2 (R)\n1 (B)\n    0 (R)\n");
    }
}
