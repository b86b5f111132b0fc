use model::Value;
use std::{collections::HashMap, fmt, sync::Arc};

pub type Getter<R> = Arc<dyn Fn(&R) -> Value + Send + Sync>;

/// Field accessors for records of type `R`, keyed by the field names used in
/// queries.
pub struct Getters<R> {
    getters: HashMap<String, Getter<R>>,
}

impl<R> Getters<R> {
    pub fn new() -> Self {
        Self {
            getters: HashMap::new(),
        }
    }

    pub fn with<F>(mut self, name: impl Into<String>, getter: F) -> Self
    where
        F: Fn(&R) -> Value + Send + Sync + 'static,
    {
        self.insert(name, getter);
        self
    }

    pub fn insert<F>(&mut self, name: impl Into<String>, getter: F)
    where
        F: Fn(&R) -> Value + Send + Sync + 'static,
    {
        self.getters.insert(name.into(), Arc::new(getter));
    }

    pub fn get(&self, name: &str) -> Option<&Getter<R>> {
        self.getters.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.getters.keys().map(String::as_str)
    }
}

impl<R> Default for Getters<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for Getters<R> {
    fn clone(&self) -> Self {
        Self {
            getters: self.getters.clone(),
        }
    }
}

impl<R> fmt::Debug for Getters<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("Getters").field("names", &names).finish()
    }
}
