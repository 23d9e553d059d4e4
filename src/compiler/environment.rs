use std::collections::HashMap;

use log::debug;

use super::assembly::ValueType;

/// A variable's storage slot.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvVariable {
    pub name: String,
    pub value_type: ValueType,
    pub index: usize,
}

/// Flat name → slot table for one compilation unit.
///
/// Slots are handed out in strictly increasing order and never reused; defining a
/// name again points the name at a fresh slot.
#[derive(Debug, Default)]
pub struct Environment {
    variable_count: usize,
    variables: HashMap<String, EnvVariable>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    /// Assigns the next slot to `name` and returns its index.
    pub fn define(&mut self, name: &str, value_type: ValueType) -> usize {
        let index = self.variable_count;
        self.variable_count += 1;

        debug!("Defined {} as slot {} ({})", name, index, value_type);

        self.variables.insert(
            name.to_string(),
            EnvVariable {
                name: name.to_string(),
                value_type,
                index,
            },
        );
        index
    }

    /// Replaces the record for `name` with one of a new type at the same slot.
    ///
    /// Returns the slot, or `None` if `name` is not defined.
    pub fn retype(&mut self, name: &str, value_type: ValueType) -> Option<usize> {
        let index = self.variables.get(name)?.index;

        debug!("Retyped {} in slot {} as {}", name, index, value_type);

        self.variables.insert(
            name.to_string(),
            EnvVariable {
                name: name.to_string(),
                value_type,
                index,
            },
        );
        Some(index)
    }

    /// Current record for `name`. Undeclared names are not an error here.
    pub fn get(&self, name: &str) -> Option<EnvVariable> {
        self.variables.get(name).cloned()
    }

    /// Variables currently reachable by name, in ascending slot order.
    pub fn variables(&self) -> Vec<&EnvVariable> {
        let mut variables: Vec<&EnvVariable> = self.variables.values().collect();
        variables.sort_by_key(|variable| variable.index);
        variables
    }

    /// Number of slots handed out, including ones shadowed by a later definition.
    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
