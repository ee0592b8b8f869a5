use bitvec::prelude::*;
use core::mem;
use fxhash::FxHashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::ops::Index;

#[derive(Clone, Default)]
pub struct BitSet {
    cardinality: usize,
    bit_vec: BitVec,
}

impl Debug for BitSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let values: Vec<_> = self.iter().map(|i| i.to_string()).collect();
        write!(
            f,
            "BitSet {{ cardinality: {}, bit_vec: [{}]}}",
            self.cardinality,
            values.join(", "),
        )
    }
}

impl PartialEq for BitSet {
    fn eq(&self, other: &Self) -> bool {
        self.cardinality == other.cardinality && self.bit_vec == other.bit_vec
    }
}
impl Eq for BitSet {}

const fn block_size() -> usize {
    mem::size_of::<usize>() * 8
}

impl BitSet {
    #[inline]
    pub fn new(size: usize) -> Self {
        Self {
            cardinality: 0,
            bit_vec: bitvec![0; size],
        }
    }

    #[inline]
    pub fn new_all_set(size: usize) -> Self {
        Self {
            cardinality: size,
            bit_vec: bitvec![1; size],
        }
    }

    #[inline]
    pub fn empty(&self) -> bool {
        self.cardinality == 0
    }

    #[inline]
    pub fn full(&self) -> bool {
        self.cardinality == self.bit_vec.len()
    }

    #[inline]
    pub fn set_bit(&mut self, idx: usize) -> bool {
        if !*self.bit_vec.get(idx).unwrap() {
            self.bit_vec.set(idx, true);
            self.cardinality += 1;
            false
        } else {
            true
        }
    }

    #[inline]
    pub fn unset_bit(&mut self, idx: usize) -> bool {
        if *self.bit_vec.get(idx).unwrap() {
            self.bit_vec.set(idx, false);
            self.cardinality -= 1;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn cardinality(&self) -> usize {
        self.cardinality
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bit_vec.len()
    }

    #[inline]
    pub fn at(&self, idx: usize) -> bool {
        self.bit_vec[idx]
    }

    #[inline]
    pub fn iter(&self) -> BitSetIterator {
        BitSetIterator {
            iter: self.bit_vec.as_slice().iter(),
            block: 0,
            idx: 0,
            size: self.bit_vec.len(),
        }
    }
}

pub struct BitSetIterator<'a> {
    iter: ::std::slice::Iter<'a, usize>,
    block: usize,
    idx: usize,
    size: usize,
}

impl<'a> Iterator for BitSetIterator<'a> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.size {
            return None;
        }
        while self.block == 0 {
            self.block = if let Some(&i) = self.iter.next() {
                if i == 0 {
                    self.idx += block_size();
                    continue;
                } else {
                    self.idx = ((self.idx + block_size() - 1) / block_size()) * block_size();
                    i
                }
            } else {
                return None;
            }
        }
        let offset = self.block.trailing_zeros() as usize;
        self.block >>= offset;
        self.block >>= 1;
        self.idx += offset + 1;
        Some(self.idx - 1)
    }
}

impl Index<usize> for BitSet {
    type Output = bool;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        self.bit_vec.index(index)
    }
}

/// Indexed binary min-heap with updatable priorities. The priority is an
/// arbitrary `Ord` value, so composite keys such as `(cardinality, vertex)`
/// order the heap lexicographically.
pub struct BinaryQueue<P: Ord + Copy> {
    heap: Vec<usize>,
    values: FxHashMap<usize, P>,
    indices: FxHashMap<usize, usize>,
}

enum ChildType {
    First,
    Second,
}

impl<P: Ord + Copy> BinaryQueue<P> {
    pub fn new() -> Self {
        Self {
            heap: Vec::default(),
            values: FxHashMap::default(),
            indices: FxHashMap::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn insert(&mut self, element: usize, priority: P) {
        match self.values.entry(element) {
            Entry::Occupied(_) => self.update(element, priority),
            Entry::Vacant(entry) => {
                entry.insert(priority);
                self.indices.insert(element, self.heap.len());
                self.heap.push(element);
                if self.heap.len() > 1 {
                    self.up(self.heap.len() - 1);
                }
            }
        }
    }

    fn update(&mut self, k: usize, v: P) {
        *self.values.get_mut(&k).unwrap() = v;
        self.up(*self.indices.get(&k).unwrap());
        self.down(*self.indices.get(&k).unwrap());
    }

    pub fn pop_min(&mut self) -> Option<(usize, P)> {
        if !self.heap.is_empty() {
            let k = self.heap[0];
            let v = *self.values.get(&k).unwrap();
            self.heap[0] = *self.heap.last().unwrap();
            *self.indices.get_mut(&self.heap[0]).unwrap() = 0;
            self.heap.pop();
            self.values.remove(&k);
            self.indices.remove(&k);
            if self.heap.len() > 1 {
                self.down(0);
            }
            return Some((k, v));
        }
        None
    }

    fn up(&mut self, mut idx: usize) {
        let x = self.heap[idx];
        let mut parent = self.parent(idx);

        loop {
            if parent.is_some()
                && idx > 0
                && self.values.get(&x) < self.values.get(&self.heap[parent.unwrap()])
            {
                let p = parent.unwrap();
                self.heap[idx] = self.heap[p];
                self.indices.insert(self.heap[p], idx);
                idx = p;
                parent = self.parent(idx);
            } else {
                break;
            }
        }
        self.heap[idx] = x;
        self.indices.insert(x, idx);
    }

    fn down(&mut self, idx: usize) {
        let mut current = idx;
        let value = self.heap[current];

        while let Some(mut first) = self.child(current, ChildType::First) {
            if let Some(second) = self.child(current, ChildType::Second) {
                let v1 = self.values.get(&self.heap[second]).unwrap();
                let v2 = self.values.get(&self.heap[first]).unwrap();
                if v1 < v2 {
                    first = second;
                }
            }
            if self.values.get(&self.heap[first]) < self.values.get(&value) {
                self.heap[current] = self.heap[first];
                *self.indices.get_mut(&self.heap[current]).unwrap() = current;
                current = first
            } else {
                break;
            }
        }
        self.heap[current] = value;
        *self.indices.get_mut(&value).unwrap() = current
    }

    fn parent(&self, idx: usize) -> Option<usize> {
        if idx == 0 {
            None
        } else {
            Some((idx - 1) / 2)
        }
    }

    fn child(&self, idx: usize, child_type: ChildType) -> Option<usize> {
        let off = match child_type {
            ChildType::First => 1,
            ChildType::Second => 2,
        };
        let idx = idx * 2 + off;
        if idx >= self.heap.len() {
            None
        } else {
            Some(idx)
        }
    }
}
