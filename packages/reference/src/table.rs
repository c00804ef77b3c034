//! Typed reference tree and its loader.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::{Map, Value};

use crate::ReferenceError;

const STATE_CODE_KEY: &str = "le_state";
const CITIES_KEY: &str = "cities";

/// A city and its encoded label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityEntry {
    /// City name.
    pub name: String,
    /// Encoded city label, unique within its state.
    pub code: u32,
}

/// A state with its encoded label and cities in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateEntry {
    /// State name exactly as written in the source.
    pub name: String,
    /// Encoded state label. `None` when the source omits `le_state`.
    pub code: Option<u32>,
    /// Cities in document order.
    pub cities: Vec<CityEntry>,
}

impl StateEntry {
    /// Returns the first city in document order (the state's
    /// representative city).
    #[must_use]
    pub fn first_city(&self) -> Option<&CityEntry> {
        self.cities.first()
    }

    /// Finds a city by exact name.
    #[must_use]
    pub fn city(&self, name: &str) -> Option<&CityEntry> {
        self.cities.iter().find(|c| c.name == name)
    }
}

/// A named grouping of states or further groupings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateGroup {
    /// Group name.
    pub name: String,
    /// Children in document order.
    pub children: Vec<ReferenceNode>,
}

/// A node of the reference tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceNode {
    /// A leaf state entry.
    State(StateEntry),
    /// A grouping node.
    Group(StateGroup),
}

impl ReferenceNode {
    /// Returns the node's key in the source document.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::State(state) => &state.name,
            Self::Group(group) => &group.name,
        }
    }
}

/// The full reference tree, loaded once and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceTable {
    roots: Vec<ReferenceNode>,
}

impl ReferenceTable {
    /// Builds a table from already-typed root nodes.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::DuplicateCode`] if state codes or the city
    /// codes of any single state repeat.
    pub fn new(roots: Vec<ReferenceNode>) -> Result<Self, ReferenceError> {
        let table = Self { roots };
        table.check_unique_codes()?;
        Ok(table)
    }

    /// Reads and parses the reference file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError`] if the file cannot be read, is not valid
    /// JSON, or violates the schema.
    pub fn load(path: &Path) -> Result<Self, ReferenceError> {
        log::info!("Loading reference data from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let table = Self::from_json_str(&content)?;
        log::info!("Loaded {} states", table.states().count());
        Ok(table)
    }

    /// Parses a reference document.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError`] if the text is not valid JSON or violates
    /// the schema.
    pub fn from_json_str(s: &str) -> Result<Self, ReferenceError> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_json(&value)
    }

    /// Converts a parsed JSON document into a typed table.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError`] if the document violates the schema.
    pub fn from_json(value: &Value) -> Result<Self, ReferenceError> {
        let root = value.as_object().ok_or_else(|| ReferenceError::Schema {
            path: "$".to_string(),
            message: "document root must be an object".to_string(),
        })?;
        Self::new(parse_children(root, "")?)
    }

    /// Top-level nodes in document order.
    #[must_use]
    pub fn roots(&self) -> &[ReferenceNode] {
        &self.roots
    }

    /// Walks every node depth-first in pre-order, following document order.
    #[must_use]
    pub fn nodes(&self) -> PreOrder<'_> {
        PreOrder {
            stack: self.roots.iter().rev().collect(),
        }
    }

    /// Every state entry in pre-order.
    pub fn states(&self) -> impl Iterator<Item = &StateEntry> {
        self.nodes().filter_map(|node| match node {
            ReferenceNode::State(state) => Some(state),
            ReferenceNode::Group(_) => None,
        })
    }

    /// Returns `true` if the table holds no states.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states().next().is_none()
    }

    fn check_unique_codes(&self) -> Result<(), ReferenceError> {
        let mut state_codes: BTreeMap<u32, &str> = BTreeMap::new();

        for state in self.states() {
            if let Some(code) = state.code
                && let Some(first) = state_codes.insert(code, &state.name)
            {
                return Err(ReferenceError::DuplicateCode {
                    scope: "states".to_string(),
                    code,
                    first: first.to_string(),
                    second: state.name.clone(),
                });
            }

            let mut city_codes: BTreeMap<u32, &str> = BTreeMap::new();
            for city in &state.cities {
                if let Some(first) = city_codes.insert(city.code, &city.name) {
                    return Err(ReferenceError::DuplicateCode {
                        scope: state.name.clone(),
                        code: city.code,
                        first: first.to_string(),
                        second: city.name.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Pre-order depth-first iterator over a [`ReferenceTable`].
pub struct PreOrder<'a> {
    stack: Vec<&'a ReferenceNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a ReferenceNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let ReferenceNode::Group(group) = node {
            self.stack.extend(group.children.iter().rev());
        }
        Some(node)
    }
}

fn parse_children(map: &Map<String, Value>, parent: &str) -> Result<Vec<ReferenceNode>, ReferenceError> {
    map.iter()
        .map(|(name, value)| parse_node(name, value, &join_path(parent, name)))
        .collect()
}

fn parse_node(name: &str, value: &Value, path: &str) -> Result<ReferenceNode, ReferenceError> {
    let object = value.as_object().ok_or_else(|| ReferenceError::Schema {
        path: path.to_string(),
        message: "expected an object".to_string(),
    })?;

    if !object.contains_key(CITIES_KEY) && !object.contains_key(STATE_CODE_KEY) {
        return Ok(ReferenceNode::Group(StateGroup {
            name: name.to_string(),
            children: parse_children(object, path)?,
        }));
    }

    let code = object
        .get(STATE_CODE_KEY)
        .filter(|v| !v.is_null())
        .map(|v| parse_code(v, &join_path(path, STATE_CODE_KEY)))
        .transpose()?;

    let cities = match object.get(CITIES_KEY) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Object(cities)) => {
            let cities_path = join_path(path, CITIES_KEY);
            cities
                .iter()
                .map(|(city, code)| {
                    Ok(CityEntry {
                        name: city.clone(),
                        code: parse_code(code, &join_path(&cities_path, city))?,
                    })
                })
                .collect::<Result<Vec<_>, ReferenceError>>()?
        }
        Some(_) => {
            return Err(ReferenceError::Schema {
                path: join_path(path, CITIES_KEY),
                message: "expected an object of city labels".to_string(),
            });
        }
    };

    Ok(ReferenceNode::State(StateEntry {
        name: name.to_string(),
        code,
        cities,
    }))
}

fn parse_code(value: &Value, path: &str) -> Result<u32, ReferenceError> {
    value
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| ReferenceError::Schema {
            path: path.to_string(),
            message: format!("expected a non-negative integer label, got {value}"),
        })
}

fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}
