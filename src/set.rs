//! The contract shared by every set in this crate.

/// A collection of distinct elements supporting insertion and membership tests.
///
/// The trait is object safe, so a consumer that only needs lookups can hold a
/// `&dyn Set<T>` without knowing which structure backs it.
///
/// ```
/// use setwise::{AvlTreeSet, ChainedHashSet, Set};
///
/// fn known(words: &dyn Set<String>, word: &str) -> bool {
///     words.contains(&word.to_string())
/// }
///
/// let mut tree = AvlTreeSet::new();
/// let mut table = ChainedHashSet::<String>::default();
/// for word in ["cat", "dog"] {
///     Set::add(&mut tree, word.to_string());
///     Set::add(&mut table, word.to_string());
/// }
/// assert!(known(&tree, "cat"));
/// assert!(!known(&table, "fish"));
/// ```
pub trait Set<T> {
    /// Returns whether this set is a working implementation of the contract.
    fn is_implemented(&self) -> bool;

    /// Adds an element. Adding an element that is already present has no effect.
    fn add(&mut self, element: T);

    /// Returns true if the element is in the set.
    fn contains(&self, element: &T) -> bool;

    /// Returns the number of distinct elements in the set.
    fn size(&self) -> usize;
}
