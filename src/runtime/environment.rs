use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use crate::runtime::{teardown::Teardown, value::Value};

/// One lexical scope: the bindings it owns plus a link to its enclosing scope.
///
/// Scopes are shared through `Rc`, so a closure keeps its defining scope alive
/// and sees later writes to it.
#[derive(Default)]
pub struct Environment {
    values: RefCell<HashMap<Rc<str>, Value>>,
    enclosing: Option<Rc<Environment>>,
}

impl Environment {
    /// The outermost scope.
    pub fn global() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn enclosed(enclosing: &Rc<Environment>) -> Rc<Self> {
        Rc::new(Self {
            values: RefCell::new(HashMap::new()),
            enclosing: Some(Rc::clone(enclosing)),
        })
    }

    pub fn enclosing(&self) -> Option<&Rc<Environment>> {
        self.enclosing.as_ref()
    }

    /// Binds `name` in this scope, replacing any existing binding here.
    pub fn define(&self, name: impl Into<Rc<str>>, value: Value) {
        self.values.borrow_mut().insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        let mut scope = self;
        loop {
            if let Some(value) = scope.values.borrow().get(name) {
                return Some(value.clone());
            }
            scope = scope.enclosing.as_deref()?;
        }
    }

    /// Rebinds `name` in the nearest scope that already binds it. Returns
    /// `false` when no scope in the chain does.
    pub fn assign(&self, name: &str, value: Value) -> bool {
        let mut scope = self;
        loop {
            if let Some(slot) = scope.values.borrow_mut().get_mut(name) {
                *slot = value;
                return true;
            }
            match scope.enclosing.as_deref() {
                Some(enclosing) => scope = enclosing,
                None => return false,
            }
        }
    }

    /// Number of scopes from this one out to the global scope, inclusive.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut scope = self;
        while let Some(enclosing) = scope.enclosing.as_deref() {
            depth += 1;
            scope = enclosing;
        }
        depth
    }

    pub(crate) fn detach(&mut self) -> (Vec<Value>, Option<Rc<Environment>>) {
        let bindings = std::mem::take(self.values.get_mut()).into_values().collect();
        (bindings, self.enclosing.take())
    }
}

impl Drop for Environment {
    fn drop(&mut self) {
        let (bindings, enclosing) = self.detach();
        if !bindings.is_empty() || enclosing.is_some() {
            Teardown::values(bindings).scope(enclosing).run();
        }
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self.values.borrow();
        let mut names: Vec<&str> = values.keys().map(|name| name.as_ref()).collect();
        names.sort_unstable();
        f.debug_struct("Environment")
            .field("names", &names)
            .field("depth", &self.depth())
            .finish()
    }
}
