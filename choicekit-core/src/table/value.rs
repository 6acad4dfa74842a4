/// a single cell of a survey table.
///
/// survey datasets are almost entirely coded integers, so cells are parsed
/// eagerly into the narrowest numeric type that holds them, falling back to text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// parses a raw field. leading and trailing whitespace is ignored.
    pub fn parse(s: &str) -> Value {
        let trimmed = s.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            Value::Integer(i)
        } else if let Ok(f) = trimmed.parse::<f64>() {
            Value::Float(f)
        } else {
            Value::Text(trimmed.to_string())
        }
    }

    /// numeric view of this value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Text(_) => None,
        }
    }

    /// integer view of this value. floats like `2.0` are accepted, `2.5` is not.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 => {
                let i = *f as i64;
                if i as f64 == *f {
                    Some(i)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}
