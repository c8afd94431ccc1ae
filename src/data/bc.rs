//! Boundary condition registry: integer cell codes to human-readable names.

use std::collections::BTreeMap;

/// Named boundary conditions keyed by cell code.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BoundaryConditions {
    names: BTreeMap<i32, String>,
}

impl BoundaryConditions {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` for `code`, returning the previous name if any.
    pub fn insert(&mut self, code: i32, name: impl Into<String>) -> Option<String> {
        self.names.insert(code, name.into())
    }

    /// Registered name for `code`.
    pub fn get(&self, code: i32) -> Option<&str> {
        self.names.get(&code).map(String::as_str)
    }

    /// Name for `code`, falling back to `"BC <code>"` for unregistered codes.
    pub fn name(&self, code: i32) -> String {
        self.get(code)
            .map_or_else(|| format!("BC {code}"), str::to_string)
    }
}

impl<S: Into<String>> FromIterator<(i32, S)> for BoundaryConditions {
    fn from_iter<T: IntoIterator<Item = (i32, S)>>(iter: T) -> Self {
        let mut bcs = Self::new();
        for (code, name) in iter {
            bcs.insert(code, name);
        }
        bcs
    }
}
