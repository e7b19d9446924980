//! LRU Tracker Module
//!
//! Implements Least Recently Used ordering for cache eviction.
//!
//! Nodes live in a slab (`Vec` of slots plus a free list) and are linked by
//! index, so a handle gives O(1) touch and removal without scanning.

// == Node Handle ==
/// Stable handle to an item inside an [`LruTracker`].
///
/// Valid until the item is removed or evicted; a stale handle is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u64,
}

#[derive(Debug)]
struct Node<T> {
    item: T,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug)]
struct Slot<T> {
    generation: u64,
    node: Option<Node<T>>,
}

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Items are linked where:
/// - Head = Least recently used
/// - Tail = Most recently used
#[derive(Debug)]
pub struct LruTracker<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> Default for LruTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LruTracker<T> {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Creates an empty tracker with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    // == Push Back ==
    /// Inserts an item at the most recently used end.
    pub fn push_back(&mut self, item: T) -> NodeId {
        let node = Node {
            item,
            prev: None,
            next: None,
        };
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index].node = Some(node);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                self.slots.len() - 1
            }
        };
        self.link_back(index);
        self.len += 1;
        NodeId {
            index,
            generation: self.slots[index].generation,
        }
    }

    // == Touch ==
    /// Marks an item as recently used (moves it to the tail).
    ///
    /// Returns false if the handle is stale.
    pub fn touch(&mut self, id: NodeId) -> bool {
        if !self.is_live(id) {
            return false;
        }
        if self.tail != Some(id.index) {
            self.unlink(id.index);
            self.link_back(id.index);
        }
        true
    }

    // == Remove ==
    /// Removes an item from the tracker by handle.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        if !self.is_live(id) {
            return None;
        }
        Some(self.take(id.index))
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used item.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<T> {
        let index = self.head?;
        Some(self.take(index))
    }

    // == Peek Oldest ==
    /// Returns the least recently used item without removing it.
    pub fn peek_oldest(&self) -> Option<&T> {
        self.head.map(|index| &self.node(index).item)
    }

    /// Borrows the item behind a handle.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        if !self.is_live(id) {
            return None;
        }
        Some(&self.node(id.index).item)
    }

    /// Mutably borrows the item behind a handle without changing its position.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        if !self.is_live(id) {
            return None;
        }
        Some(&mut self.node_mut(id.index).item)
    }

    /// Iterates items from least to most recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            tracker: self,
            cursor: self.head,
        }
    }

    // == Length ==
    /// Returns the number of tracked items.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every item and invalidates all outstanding handles.
    pub fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation += 1;
            }
            self.free.push(index);
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    fn is_live(&self, id: NodeId) -> bool {
        self.slots
            .get(id.index)
            .is_some_and(|slot| slot.generation == id.generation && slot.node.is_some())
    }

    fn take(&mut self, index: usize) -> T {
        self.unlink(index);
        let slot = &mut self.slots[index];
        let node = slot.node.take().expect("linked slot must hold a node");
        slot.generation += 1;
        self.free.push(index);
        self.len -= 1;
        node.item
    }

    fn node(&self, index: usize) -> &Node<T> {
        self.slots[index]
            .node
            .as_ref()
            .expect("linked slot must hold a node")
    }

    fn node_mut(&mut self, index: usize) -> &mut Node<T> {
        self.slots[index]
            .node
            .as_mut()
            .expect("linked slot must hold a node")
    }

    fn link_back(&mut self, index: usize) {
        let old_tail = self.tail;
        {
            let node = self.node_mut(index);
            node.prev = old_tail;
            node.next = None;
        }
        match old_tail {
            Some(tail) => self.node_mut(tail).next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
    }

    fn unlink(&mut self, index: usize) {
        let (prev, next) = {
            let node = self.node_mut(index);
            (node.prev.take(), node.next.take())
        };
        match prev {
            Some(prev) => self.node_mut(prev).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.node_mut(next).prev = prev,
            None => self.tail = prev,
        }
    }
}

// == Iterator ==
/// Iterator over tracked items, oldest first.
pub struct Iter<'a, T> {
    tracker: &'a LruTracker<T>,
    cursor: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let tracker = self.tracker;
        let node = tracker.node(self.cursor?);
        self.cursor = node.next;
        Some(&node.item)
    }
}
