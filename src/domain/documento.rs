use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A schemaless record as it comes out of the document collections.
///
/// Field names are strings; values are strings, numbers, booleans,
/// timestamps serialized as strings, or null. Accessors never panic:
/// a missing or mistyped field simply reads as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Documento(Map<String, Value>);

impl Documento {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn campos(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_campos(self) -> Map<String, Value> {
        self.0
    }

    /// True when the field exists at all, even with a null value.
    /// This is the row-level equivalent of "the column is present".
    pub fn contiene(&self, campo: &str) -> bool {
        self.0.contains_key(campo)
    }

    pub fn valor(&self, campo: &str) -> Option<&Value> {
        self.0.get(campo)
    }

    pub fn fijar(&mut self, campo: &str, valor: Value) {
        self.0.insert(campo.to_string(), valor);
    }

    pub fn quitar(&mut self, campo: &str) -> Option<Value> {
        self.0.remove(campo)
    }

    /// The field as a string, only when it actually holds one.
    pub fn texto(&self, campo: &str) -> Option<&str> {
        match self.0.get(campo) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Numeric read with coercion: numbers pass through, numeric strings
    /// are parsed, booleans count as 1/0. Anything else is `None`.
    pub fn numero(&self, campo: &str) -> Option<f64> {
        match self.0.get(campo)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Display form of a field. Scalars are stringified; a missing or
    /// null field renders as `defecto`.
    pub fn mostrar(&self, campo: &str, defecto: &str) -> String {
        match self.0.get(campo) {
            None | Some(Value::Null) => defecto.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(otro) => otro.to_string(),
        }
    }
}

impl From<Map<String, Value>> for Documento {
    fn from(campos: Map<String, Value>) -> Self {
        Self(campos)
    }
}
