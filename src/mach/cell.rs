use super::Val;
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// Type tag given to CREATE_CELL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    Integer,
    String,
    Float,
}

impl CellType {
    pub fn from_tag(tag: &str) -> Option<CellType> {
        match tag {
            "0" => Some(CellType::Integer),
            "1" => Some(CellType::String),
            "2" => Some(CellType::Float),
            _ => None,
        }
    }

    pub fn default_val(self) -> Val {
        match self {
            CellType::Integer => Val::Integer(0),
            CellType::String => Val::String(String::new()),
            CellType::Float => Val::Float(0.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CellType::Integer => "int",
            CellType::String => "string",
            CellType::Float => "float",
        }
    }
}

impl std::fmt::Display for CellType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    Write,
    Accumulate,
}

/// ## Typed storage location
///
/// The type is chosen at creation and never changes.
/// Incoming values are coerced into it or rejected.

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    val: Val,
}

impl Cell {
    pub fn new(cell_type: CellType) -> Cell {
        Cell {
            val: cell_type.default_val(),
        }
    }

    pub fn cell_type(&self) -> CellType {
        self.val.cell_type()
    }

    pub fn val(&self) -> &Val {
        &self.val
    }

    pub fn text_mut(&mut self) -> Option<&mut String> {
        match &mut self.val {
            Val::String(s) => Some(s),
            _ => None,
        }
    }

    /// Assign text, converted according to this cell's type.
    pub fn assign(&mut self, text: &str, mode: Update) -> Result<()> {
        match &mut self.val {
            Val::Integer(n) => {
                let v = parse_integer(text)?;
                *n = match mode {
                    Update::Write => v,
                    Update::Accumulate => n.checked_add(v).ok_or_else(|| error!(Overflow))?,
                };
            }
            Val::Float(n) => {
                let v = parse_float(text).ok_or_else(|| error!(InvalidValueForType; "float"))?;
                match mode {
                    Update::Write => *n = v,
                    Update::Accumulate => *n += v,
                }
            }
            Val::String(s) => match mode {
                Update::Write => *s = text.to_string(),
                Update::Accumulate => s.push_str(text),
            },
        }
        Ok(())
    }

    /// Overwrite with a computed value. Values of another type
    /// go through their text form.
    pub fn store(&mut self, val: Val) -> Result<()> {
        if val.cell_type() == self.cell_type() {
            self.val = val;
            Ok(())
        } else {
            self.assign(&val.to_string(), Update::Write)
        }
    }
}

fn parse_float(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

fn parse_integer(text: &str) -> Result<i64> {
    if let Ok(n) = text.trim().parse::<i64>() {
        return Ok(n);
    }
    match parse_float(text) {
        Some(f) if f.is_finite() => {
            let f = f.trunc();
            if f < i64::MIN as f64 || f >= i64::MAX as f64 {
                Err(error!(Overflow))
            } else {
                Ok(f as i64)
            }
        }
        _ => Err(error!(InvalidValueForType; "int")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    #[test]
    fn test_defaults() {
        assert_eq!(Cell::new(CellType::Integer).val(), &Val::Integer(0));
        assert_eq!(Cell::new(CellType::Float).val(), &Val::Float(0.0));
        assert_eq!(Cell::new(CellType::String).val(), &Val::String("".into()));
    }

    #[test]
    fn test_integer_assign() {
        let mut c = Cell::new(CellType::Integer);
        c.assign("42", Update::Write).unwrap();
        assert_eq!(c.val(), &Val::Integer(42));
        c.assign("-2", Update::Accumulate).unwrap();
        assert_eq!(c.val(), &Val::Integer(40));
        c.assign("3.9", Update::Write).unwrap();
        assert_eq!(c.val(), &Val::Integer(3));
        let e = c.assign("abc", Update::Write).unwrap_err();
        assert!(e.is(ErrorCode::InvalidValueForType));
        assert_eq!(c.val(), &Val::Integer(3));
    }

    #[test]
    fn test_integer_overflow() {
        let mut c = Cell::new(CellType::Integer);
        c.assign(&i64::MAX.to_string(), Update::Write).unwrap();
        let e = c.assign("1", Update::Accumulate).unwrap_err();
        assert!(e.is(ErrorCode::Overflow));
    }

    #[test]
    fn test_float_assign() {
        let mut c = Cell::new(CellType::Float);
        c.assign("1.5", Update::Write).unwrap();
        c.assign("1", Update::Accumulate).unwrap();
        assert_eq!(c.val(), &Val::Float(2.5));
        assert!(c.assign("x", Update::Write).is_err());
    }

    #[test]
    fn test_string_assign() {
        let mut c = Cell::new(CellType::String);
        c.assign("hi", Update::Write).unwrap();
        c.assign(" there", Update::Accumulate).unwrap();
        assert_eq!(c.val(), &Val::String("hi there".into()));
    }

    #[test]
    fn test_store_coerces_by_destination() {
        let mut c = Cell::new(CellType::String);
        c.store(Val::Integer(12)).unwrap();
        assert_eq!(c.val(), &Val::String("12".into()));
        let mut c = Cell::new(CellType::Float);
        c.store(Val::Integer(12)).unwrap();
        assert_eq!(c.val(), &Val::Float(12.0));
        let mut c = Cell::new(CellType::Integer);
        assert!(c.store(Val::String("twelve".into())).is_err());
    }
}
