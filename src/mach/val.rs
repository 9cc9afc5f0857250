use super::CellType;

/// ## Cell values

#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    Integer(i64),
    Float(f64),
    String(String),
}

impl Val {
    pub fn cell_type(&self) -> CellType {
        match self {
            Val::Integer(_) => CellType::Integer,
            Val::Float(_) => CellType::Float,
            Val::String(_) => CellType::String,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Val::String(_))
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Val::Integer(n) => write!(f, "{}", n),
            // Debug keeps the fraction: 6.0 rather than 6
            Val::Float(n) => write!(f, "{:?}", n),
            Val::String(s) => write!(f, "{}", s),
        }
    }
}
