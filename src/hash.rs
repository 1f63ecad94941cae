//! A set implemented with a separately chained hash table.
//!
//! Elements are spread over an array of buckets by a caller supplied hash
//! function; each bucket is a singly linked chain. When the table gets more
//! than [`MAX_LOAD_FACTOR`] full it grows to `capacity * 2 + 1` buckets and
//! every element is redistributed.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;

use siphasher::sip::SipHasher13;
use tracing::debug;

use crate::set::Set;

mod chain;
use chain::Chain;

/// Number of buckets of a newly created table.
pub const DEFAULT_CAPACITY: usize = 10;

/// Ratio of elements to buckets above which the next insertion grows the table.
pub const MAX_LOAD_FACTOR: f64 = 0.8;

/// Hashes any `Hash` value with SipHash-1-3 under a fixed key.
///
/// This is the hash function of [`ChainedHashSet::default`]. The result only
/// depends on the value, so bucket placement is reproducible between runs.
pub fn sip_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = SipHasher13::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// A set implemented with a separately chained hash table.
///
/// ```
/// use setwise::ChainedHashSet;
///
/// let mut set = ChainedHashSet::new(|word: &String| word.len() as u64);
/// set.insert(String::from("cat"));
/// set.insert(String::from("bird"));
/// assert!(set.contains(&String::from("cat")));
/// assert!(set.is_element_at_index(&String::from("bird"), 4));
/// assert_eq!(set.elements_at_index(3), 1);
/// ```
pub struct ChainedHashSet<T, H = fn(&T) -> u64> {
    buckets: Box<[Chain<T>]>,
    len: usize,
    hash_fn: H,
}

impl<T, H> ChainedHashSet<T, H>
where
    T: Eq,
    H: Fn(&T) -> u64,
{
    /// Creates an empty set with [`DEFAULT_CAPACITY`] buckets that places
    /// elements with the given hash function.
    pub fn new(hash_fn: H) -> Self {
        Self::with_buckets(DEFAULT_CAPACITY, hash_fn)
    }

    /// Creates an empty set with the given number of buckets.
    pub fn with_capacity(capacity: NonZeroUsize, hash_fn: H) -> Self {
        Self::with_buckets(capacity.get(), hash_fn)
    }

    fn with_buckets(capacity: usize, hash_fn: H) -> Self {
        debug_assert!(capacity > 0);
        Self {
            buckets: Self::alloc_buckets(capacity),
            len: 0,
            hash_fn,
        }
    }

    /// Returns true if the set contains a value.
    pub fn contains(&self, value: &T) -> bool {
        self.buckets[self.bucket_index(value)].contains(value)
    }

    /// Inserts a value into the set.
    /// Returns false if an equal value was already present, leaving the set untouched.
    pub fn insert(&mut self, value: T) -> bool {
        if self.contains(&value) {
            return false;
        }
        if self.len as f64 > MAX_LOAD_FACTOR * self.capacity() as f64 {
            self.grow();
        }
        let index = self.bucket_index(&value);
        self.buckets[index].push_back(value);
        self.len += 1;
        true
    }

    /// Returns true if the value is stored in the bucket at `index`.
    /// An index past the last bucket holds nothing.
    pub fn is_element_at_index(&self, value: &T, index: usize) -> bool {
        self.buckets
            .get(index)
            .is_some_and(|chain| chain.contains(value))
    }

    fn bucket_index(&self, value: &T) -> usize {
        ((self.hash_fn)(value) % self.buckets.len() as u64) as usize
    }

    // Relinks every node into a table of `capacity * 2 + 1` buckets.
    fn grow(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity * 2 + 1;
        let old_buckets = std::mem::replace(&mut self.buckets, Self::alloc_buckets(new_capacity));
        for mut chain in old_buckets.into_vec() {
            while let Some(node) = chain.pop_front_node() {
                let index = self.bucket_index(&node.value);
                self.buckets[index].push_front_node(node);
            }
        }
        debug!(
            old_capacity,
            new_capacity,
            len = self.len,
            "grew hash table"
        );
    }
}

impl<T, H> ChainedHashSet<T, H> {
    /// Returns true if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the current number of buckets. Never zero.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns how many elements are stored in the bucket at `index`,
    /// or 0 if there is no such bucket.
    pub fn elements_at_index(&self, index: usize) -> usize {
        self.buckets.get(index).map_or(0, Chain::len)
    }

    /// Gets an iterator over the values of the set in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.buckets.iter().flat_map(Chain::iter)
    }

    /// Removes all values, keeping the current capacity.
    pub fn clear(&mut self) {
        let capacity = self.capacity();
        self.buckets = Self::alloc_buckets(capacity);
        self.len = 0;
    }

    /// Moves all values out into a new set, leaving this one empty with
    /// [`DEFAULT_CAPACITY`] buckets and the same hash function.
    pub fn take(&mut self) -> Self
    where
        H: Clone,
    {
        let empty = Self {
            buckets: Self::alloc_buckets(DEFAULT_CAPACITY),
            len: 0,
            hash_fn: self.hash_fn.clone(),
        };
        std::mem::replace(self, empty)
    }

    fn alloc_buckets(capacity: usize) -> Box<[Chain<T>]> {
        (0..capacity).map(|_| Chain::new()).collect()
    }
}

impl<T, H> Set<T> for ChainedHashSet<T, H>
where
    T: Eq,
    H: Fn(&T) -> u64,
{
    fn is_implemented(&self) -> bool {
        true
    }

    fn add(&mut self, element: T) {
        self.insert(element);
    }

    fn contains(&self, element: &T) -> bool {
        ChainedHashSet::contains(self, element)
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<T: Hash + Eq> Default for ChainedHashSet<T> {
    /// Creates an empty set hashed with [`sip_hash`].
    fn default() -> Self {
        Self::new(sip_hash::<T>)
    }
}

impl<T: Clone, H: Clone> Clone for ChainedHashSet<T, H> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            len: self.len,
            hash_fn: self.hash_fn.clone(),
        }
    }
}

impl<T, H> Extend<T> for ChainedHashSet<T, H>
where
    T: Eq,
    H: Fn(&T) -> u64,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(move |value| {
            self.insert(value);
        });
    }
}

impl<T: Hash + Eq> FromIterator<T> for ChainedHashSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<T: fmt::Debug, H> fmt::Debug for ChainedHashSet<T, H> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_set().entries(self.iter()).finish()
    }
}
