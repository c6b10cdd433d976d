//! Parameter Enumeration
//!
//! Named parameter value lists and their cross product. Binding happens in
//! the suite layer: the measurement core only ever sees zero-argument
//! closures with one combination already applied.

use fxhash::FxHashSet;
use pacebench_core::BenchError;
use std::fmt;

/// One parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Signed integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Text
    Text(String),
    /// Boolean flag
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Text(v) => write!(f, "{}", v),
            ParamValue::Bool(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(v.into())
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        ParamValue::Int(v.into())
    }
}

impl From<usize> for ParamValue {
    fn from(v: usize) -> Self {
        ParamValue::Int(v as i64)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

/// One bound parameter combination, in axis registration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParamSet {
    entries: Vec<(String, ParamValue)>,
}

impl ParamSet {
    /// Whether the combination binds no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of bound parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up a bound value by name.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Integer value of a parameter, if bound as an integer.
    pub fn int(&self, name: &str) -> Option<i64> {
        match self.get(name) {
            Some(ParamValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Float value of a parameter, if bound as a float.
    pub fn float(&self, name: &str) -> Option<f64> {
        match self.get(name) {
            Some(ParamValue::Float(v)) => Some(*v),
            _ => None,
        }
    }

    /// Text value of a parameter, if bound as text.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(ParamValue::Text(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Boolean value of a parameter, if bound as a flag.
    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.get(name) {
            Some(ParamValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// Iterate bound parameters in axis registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Display label like `size=1000, mode=packed`.
    pub fn label(&self) -> String {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|(n, v)| format!("{}={}", n, v))
            .collect();
        parts.join(", ")
    }

    fn with(&self, name: &str, value: ParamValue) -> Self {
        let mut entries = self.entries.clone();
        entries.push((name.to_string(), value));
        Self { entries }
    }
}

/// Named parameter value lists whose cross product drives the run.
#[derive(Debug, Clone, Default)]
pub struct ParamGrid {
    axes: Vec<(String, Vec<ParamValue>)>,
}

impl ParamGrid {
    /// Add a parameter axis. Axes enumerate in registration order; the last
    /// added axis varies fastest.
    pub fn add(&mut self, name: impl Into<String>, values: Vec<ParamValue>) {
        self.axes.push((name.into(), values));
    }

    /// Whether any axis has been added.
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Enumerate the cross product. A grid with no axes yields exactly one
    /// empty combination. An axis with no values, or a duplicated axis name,
    /// is a configuration error.
    pub fn combinations(&self) -> Result<Vec<ParamSet>, BenchError> {
        let mut seen = FxHashSet::default();
        for (name, values) in &self.axes {
            if !seen.insert(name.as_str()) {
                return Err(BenchError::Configuration(format!(
                    "duplicate parameter axis '{}'",
                    name
                )));
            }
            if values.is_empty() {
                return Err(BenchError::Configuration(format!(
                    "parameter axis '{}' has no values",
                    name
                )));
            }
        }

        let mut combos = vec![ParamSet::default()];
        for (name, values) in &self.axes {
            let mut next = Vec::with_capacity(combos.len() * values.len());
            for combo in &combos {
                for value in values {
                    next.push(combo.with(name, value.clone()));
                }
            }
            combos = next;
        }
        Ok(combos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grid_yields_one_empty_combination() {
        let grid = ParamGrid::default();
        let combos = grid.combinations().expect("valid grid");
        assert_eq!(combos.len(), 1);
        assert!(combos[0].is_empty());
    }

    #[test]
    fn cross_product_in_registration_order() {
        let mut grid = ParamGrid::default();
        grid.add("size", vec![10.into(), 20.into()]);
        grid.add("mode", vec!["a".into(), "b".into(), "c".into()]);

        let combos = grid.combinations().expect("valid grid");

        assert_eq!(combos.len(), 6);
        // First axis varies slowest
        assert_eq!(combos[0].label(), "size=10, mode=a");
        assert_eq!(combos[1].label(), "size=10, mode=b");
        assert_eq!(combos[3].label(), "size=20, mode=a");
        assert_eq!(combos[5].label(), "size=20, mode=c");
    }

    #[test]
    fn typed_getters_match_bound_values() {
        let mut grid = ParamGrid::default();
        grid.add("size", vec![1000.into()]);
        grid.add("label", vec!["packed".into()]);
        grid.add("checked", vec![true.into()]);

        let combos = grid.combinations().expect("valid grid");
        let combo = &combos[0];

        assert_eq!(combo.int("size"), Some(1000));
        assert_eq!(combo.text("label"), Some("packed"));
        assert_eq!(combo.flag("checked"), Some(true));
        assert_eq!(combo.int("label"), None);
        assert!(combo.get("missing").is_none());
    }

    #[test]
    fn empty_axis_is_rejected() {
        let mut grid = ParamGrid::default();
        grid.add("size", Vec::new());
        assert!(matches!(
            grid.combinations(),
            Err(BenchError::Configuration(_))
        ));
    }

    #[test]
    fn duplicate_axis_is_rejected() {
        let mut grid = ParamGrid::default();
        grid.add("size", vec![1.into()]);
        grid.add("size", vec![2.into()]);
        assert!(matches!(
            grid.combinations(),
            Err(BenchError::Configuration(_))
        ));
    }
}
