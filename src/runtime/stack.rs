/// LIFO stack used for operand stacks, saved caller stacks and call frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Removes the top `count` items and returns them bottom to top, or
    /// `None` (leaving the stack untouched) when fewer are present.
    pub fn pop_n(&mut self, count: usize) -> Option<Vec<T>> {
        if count > self.items.len() {
            return None;
        }
        let start = self.items.len() - count;
        Some(self.items.split_off(start))
    }

    /// Items from the top down.
    pub fn iter_top_down(&self) -> impl Iterator<Item = &T> {
        self.items.iter().rev()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}
