use std::collections::BTreeMap;

use sc_core::variable::Variable;

/// The flat id → number map shared by global and scene variables.
///
/// Scope only matters on scene load; at runtime every rule sees one
/// namespace. Unknown ids read as 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableTable {
    values: BTreeMap<String, f64>,
}

impl VariableTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table holding each declaration's initial value.
    pub fn from_declarations<'a>(vars: impl IntoIterator<Item = &'a Variable>) -> Self {
        let mut table = Self::new();
        table.initialize(vars);
        table
    }

    /// Reset each declared variable to its initial value.
    pub fn initialize<'a>(&mut self, vars: impl IntoIterator<Item = &'a Variable>) {
        for var in vars {
            self.values.insert(var.id.clone(), var.initial_value);
        }
    }

    /// The value of a variable, or 0 when unknown.
    pub fn get(&self, id: &str) -> f64 {
        self.values.get(id).copied().unwrap_or(0.0)
    }

    /// Assign a variable, creating it if needed.
    pub fn set(&mut self, id: &str, value: f64) {
        self.values.insert(id.to_string(), value);
    }

    /// Add to a variable (unknown ids start at 0).
    pub fn add(&mut self, id: &str, amount: f64) {
        let current = self.get(id);
        self.set(id, current + amount);
    }

    /// Whether the variable has been assigned.
    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    /// All assigned variables, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// A copy of the map for presentation.
    pub fn snapshot(&self) -> BTreeMap<String, f64> {
        self.values.clone()
    }

    /// Number of assigned variables.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no variable has been assigned.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
