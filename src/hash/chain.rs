//! Owned singly linked list used as a hash bucket.

type Link<T> = Option<Box<ChainNode<T>>>;

pub(super) struct ChainNode<T> {
    pub(super) value: T,
    next: Link<T>,
}

pub(super) struct Chain<T> {
    head: Link<T>,
}

pub(super) struct Iter<'a, T> {
    next: Option<&'a ChainNode<T>>,
}

impl<T> Chain<T> {
    pub(super) fn new() -> Self {
        Self { head: None }
    }

    pub(super) fn len(&self) -> usize {
        self.iter().count()
    }

    pub(super) fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Appends a value after the last node.
    pub(super) fn push_back(&mut self, value: T) {
        let mut link = &mut self.head;
        while let Some(node) = link {
            link = &mut node.next;
        }
        *link = Some(Box::new(ChainNode { value, next: None }));
    }

    /// Links an existing node in as the new head.
    pub(super) fn push_front_node(&mut self, mut node: Box<ChainNode<T>>) {
        node.next = self.head.take();
        self.head = Some(node);
    }

    /// Unlinks the head node, handing over its allocation.
    pub(super) fn pop_front_node(&mut self) -> Option<Box<ChainNode<T>>> {
        self.head.take().map(|mut node| {
            self.head = node.next.take();
            node
        })
    }
}

impl<T: PartialEq> Chain<T> {
    pub(super) fn contains(&self, value: &T) -> bool {
        self.iter().any(|candidate| candidate == value)
    }
}

impl<T: Clone> Clone for Chain<T> {
    fn clone(&self) -> Self {
        let mut chain = Chain::new();
        let mut tail = &mut chain.head;
        for value in self.iter() {
            let node = tail.insert(Box::new(ChainNode {
                value: value.clone(),
                next: None,
            }));
            tail = &mut node.next;
        }
        chain
    }
}

// The default drop would recurse once per node.
impl<T> Drop for Chain<T> {
    fn drop(&mut self) {
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.value
        })
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { next: self.next }
    }
}
