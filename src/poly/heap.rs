//! A binary max-heap over monomial keys in which every slot holds a chain of
//! producers that share the slot's key.
//!
//! Equal keys are merged on insertion whenever the key is found on the sift-up
//! path, at the root, or at the slot where the previous merge happened. Equal
//! keys can still end up in different slots, so consumers keep popping while
//! [ChainedHeap::peek_key] returns the key they are processing.

use smallvec::{smallvec, SmallVec};

use crate::domains::integer::Integer;

pub type Chain<P> = SmallVec<[P; 4]>;

#[derive(Debug, Clone)]
struct HeapSlot<P> {
    key: Integer,
    chain: Chain<P>,
}

#[derive(Debug, Clone)]
pub struct ChainedHeap<P> {
    slots: Vec<HeapSlot<P>>,
    next_loc: Option<usize>,
}

impl<P> Default for ChainedHeap<P> {
    fn default() -> Self {
        ChainedHeap {
            slots: Vec::new(),
            next_loc: None,
        }
    }
}

impl<P> ChainedHeap<P> {
    pub fn with_capacity(cap: usize) -> ChainedHeap<P> {
        ChainedHeap {
            slots: Vec::with_capacity(cap),
            next_loc: None,
        }
    }

    /// The number of slots. Producers in chains are not counted.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn peek_key(&self) -> Option<&Integer> {
        self.slots.first().map(|s| &s.key)
    }

    pub fn insert(&mut self, key: Integer, producer: P) {
        if let Some(loc) = self.next_loc {
            if let Some(s) = self.slots.get_mut(loc) {
                if s.key == key {
                    s.chain.push(producer);
                    return;
                }
            }
        }

        if let Some(root) = self.slots.first_mut() {
            if root.key == key {
                root.chain.push(producer);
                return;
            }
        }

        // find the destination before moving anything, so that an equal key
        // on the path can absorb the producer
        let mut i = self.slots.len();
        while i > 0 {
            let parent = (i - 1) / 2;
            match key.cmp(&self.slots[parent].key) {
                std::cmp::Ordering::Equal => {
                    self.slots[parent].chain.push(producer);
                    self.next_loc = Some(parent);
                    return;
                }
                std::cmp::Ordering::Greater => i = parent,
                std::cmp::Ordering::Less => break,
            }
        }

        let mut n = self.slots.len();
        self.slots.push(HeapSlot {
            key,
            chain: smallvec![producer],
        });
        while n > i {
            let parent = (n - 1) / 2;
            self.slots.swap(n, parent);
            n = parent;
        }
    }

    /// Remove the slot with the largest key and return its key and chain.
    pub fn pop_root(&mut self) -> Option<(Integer, Chain<P>)> {
        let last = self.slots.pop()?;
        if self.slots.is_empty() {
            return Some((last.key, last.chain));
        }

        let root = std::mem::replace(&mut self.slots[0], last);
        self.sift_down(0);
        Some((root.key, root.chain))
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.slots.len();
        loop {
            let left = 2 * i + 1;
            if left >= len {
                break;
            }

            let right = left + 1;
            let child = if right < len && self.slots[right].key > self.slots[left].key {
                right
            } else {
                left
            };

            if self.slots[child].key > self.slots[i].key {
                self.slots.swap(i, child);
                i = child;
            } else {
                break;
            }
        }
    }
}
