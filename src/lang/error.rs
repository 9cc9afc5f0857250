use super::LineNumber;

pub struct Error {
    code: u16,
    line_number: Option<LineNumber>,
    command: Option<String>,
    param: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident; $param:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).param($param)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident, $line:expr; $param:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .param($param)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code: code as u16,
            line_number: None,
            command: None,
            param: String::new(),
        }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == code as u16
    }

    pub fn line_number(&self) -> Option<LineNumber> {
        self.line_number
    }

    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    /// Attach the source line, keeping the one closest to the failure.
    pub fn in_line_number(self, line: LineNumber) -> Error {
        if self.line_number.is_some() {
            return self;
        }
        Error {
            line_number: Some(line),
            ..self
        }
    }

    pub fn in_command(self, command: &str) -> Error {
        if self.command.is_some() {
            return self;
        }
        Error {
            command: Some(command.to_string()),
            ..self
        }
    }

    pub fn param<T: std::fmt::Display>(self, param: T) -> Error {
        debug_assert!(self.param.is_empty());
        Error {
            param: param.to_string(),
            ..self
        }
    }

    /// Message text without location, used by the diagnostics reporter.
    pub fn message(&self) -> String {
        let p = &self.param;
        match self.code {
            1 => format!(
                "No such data type `{}`; use 0 - int, 1 - string, 2 - float",
                p
            ),
            2 => format!(
                "Invalid cell name `{}`; a name is a negative number from -1",
                p
            ),
            3 => format!("Undefined command `{}`", p),
            4 => "The first cell must be `string` and the second `int`".to_string(),
            5 => "Cell type must be `string`".to_string(),
            6 => "A `string` cell can't be used in this command".to_string(),
            7 => "Cells have different data types".to_string(),
            8 => format!("Can't find cell `{}`", p),
            9 => format!("Invalid value for type `{}`", p),
            10 => format!("Can't find block `{}`", p),
            11 => "Can't find the entry point".to_string(),
            12 => "Invalid syntax".to_string(),
            13 if p.is_empty() => "Overflow".to_string(),
            13 => format!("Overflow of {}", p),
            14 => "Division by zero".to_string(),
            15 => "Cell type must be `int`".to_string(),
            _ => format!("Program error {}", self.code),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidCellType = 1,
    InvalidCellName = 2,
    UndefinedCommand = 3,
    RequiresStringAndInteger = 4,
    TypeIsNotString = 5,
    StringNotAllowed = 6,
    TypeMismatch = 7,
    CellNotFound = 8,
    InvalidValueForType = 9,
    BlockNotFound = 10,
    EntryBlockNotFound = 11,
    InvalidSyntax = 12,
    Overflow = 13,
    DivisionByZero = 14,
    IntegerRequired = 15,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if let Some(line_number) = self.line_number {
            write!(f, "[{}] ", line_number)?;
        }
        write!(f, "CFTE{} : {}", self.code, self.message())
    }
}
