use std::collections::BTreeMap;

/// Flat key to integer storage for meta progression. Missing keys read as zero.
pub trait ProgressionStore {
    fn get(&self, key: &str) -> i64;
    fn set(&mut self, key: &str, value: i64);
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: BTreeMap<String, i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.values.iter().map(|(key, &value)| (key.as_str(), value))
    }
}

impl ProgressionStore for MemoryStore {
    fn get(&self, key: &str) -> i64 {
        self.values.get(key).copied().unwrap_or(0)
    }

    fn set(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
    }
}

impl FromIterator<(String, i64)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}
