//! Two interchangeable in-memory sets behind one [`Set`] contract.
//!
//! - [`AvlTreeSet`] keeps its elements in a binary search tree that is
//!   rebalanced with AVL rotations after every insertion, and offers ordered
//!   depth-first traversals.
//! - [`ChainedHashSet`] keeps its elements in an array of linked chains
//!   indexed by a caller supplied hash function, and grows when it gets too
//!   full.
//!
//! Neither structure supports removal of single elements.
//!
//! ```
//! use setwise::{AvlTreeSet, ChainedHashSet, Set};
//!
//! let mut sets: Vec<Box<dyn Set<u32>>> = vec![
//!     Box::new(AvlTreeSet::<u32>::new()),
//!     Box::new(ChainedHashSet::new(|value: &u32| u64::from(*value))),
//! ];
//! for set in &mut sets {
//!     for value in [3, 1, 4, 1, 5] {
//!         set.add(value);
//!     }
//!     assert_eq!(set.size(), 4);
//!     assert!(set.contains(&4));
//!     assert!(!set.contains(&2));
//! }
//! ```

mod hash;
mod set;
mod tree;

pub use hash::{sip_hash, ChainedHashSet, DEFAULT_CAPACITY, MAX_LOAD_FACTOR};
pub use set::Set;
pub use tree::{AvlTreeSet, Order, Traverse};
