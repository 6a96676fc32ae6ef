use std::cell::{Ref, RefCell};

use crate::runtime::{teardown::Teardown, value::Value};

/// Growable array shared by reference between every value that holds it.
///
/// Index arguments are numbers truncated toward zero. Out-of-range reads
/// yield `None` and out-of-range writes are ignored.
#[derive(Debug, Default)]
pub struct KulaArray {
    items: RefCell<Vec<Value>>,
}

fn slot(index: f64) -> Option<usize> {
    let index = index.trunc();
    if index.is_nan() || index < 0.0 || index >= usize::MAX as f64 {
        return None;
    }
    Some(index as usize)
}

impl KulaArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(items: Vec<Value>) -> Self {
        Self {
            items: RefCell::new(items),
        }
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn get(&self, index: f64) -> Option<Value> {
        let index = slot(index)?;
        self.items.borrow().get(index).cloned()
    }

    /// Overwrites an existing element. Returns whether the index was in range.
    pub fn set(&self, index: f64, value: Value) -> bool {
        let Some(index) = slot(index) else {
            return false;
        };
        match self.items.borrow_mut().get_mut(index) {
            Some(item) => {
                *item = value;
                true
            }
            None => false,
        }
    }

    /// Inserts before `index`, shifting the tail right; `index == len` appends.
    pub fn insert(&self, index: f64, value: Value) -> bool {
        let mut items = self.items.borrow_mut();
        match slot(index) {
            Some(index) if index <= items.len() => {
                items.insert(index, value);
                true
            }
            _ => false,
        }
    }

    /// Removes the element at `index`, shifting the tail left.
    pub fn remove(&self, index: f64) -> Option<Value> {
        let mut items = self.items.borrow_mut();
        match slot(index) {
            Some(index) if index < items.len() => Some(items.remove(index)),
            _ => None,
        }
    }

    pub fn push(&self, value: Value) {
        self.items.borrow_mut().push(value);
    }

    pub fn items(&self) -> Ref<'_, Vec<Value>> {
        self.items.borrow()
    }

    pub(crate) fn take_items(&self) -> Vec<Value> {
        std::mem::take(&mut *self.items.borrow_mut())
    }
}

impl Drop for KulaArray {
    fn drop(&mut self) {
        let items = std::mem::take(self.items.get_mut());
        if !items.is_empty() {
            Teardown::values(items).run();
        }
    }
}
