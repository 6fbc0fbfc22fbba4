use std::fmt;

/// Upper-case hex, no separators. Used for raw payload fields in logs.
pub fn format_data_bytes(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02X}", b)).collect()
}

/// A single decoded field value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Float(f64),
    Int(i64),
    Bool(bool),
    Raw(Vec<u8>),
}

impl Value {
    /// Numeric view of the value. Booleans map to 0/1, raw payloads have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            Value::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            Value::Raw(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            Value::Float(v) => Some(*v != 0.0),
            Value::Int(v) => Some(*v != 0),
            Value::Raw(_) => None,
        }
    }

    pub fn as_raw(&self) -> Option<&[u8]> {
        match self {
            Value::Raw(data) => Some(data),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Float(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", if *v { 1 } else { 0 }),
            Value::Raw(data) => write!(f, "{}", format_data_bytes(data)),
        }
    }
}

/// Ordered set of named fields produced by decoding one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub id: u32,
    pub fields: Vec<(String, Value)>,
}

impl Sample {
    pub fn new(id: u32) -> Self {
        Self { id, fields: Vec::new() }
    }

    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.fields.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:03X}:", self.id)?;
        for (name, value) in &self.fields {
            write!(f, " {}={}", name, value)?;
        }
        Ok(())
    }
}
