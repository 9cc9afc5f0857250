/// ## Virtual machine instruction set
///
/// Every source line starts with a two digit opcode followed by
/// cell names or literals. For example: `04 -1 5` assigns 5 to cell -1.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    // *** Program and console
    Exit,
    Print,
    Input,
    ClearConsole,
    Sleep,

    // *** Assignment
    AssignValue,
    AddConstant,
    Swap,
    CopyCell,
    StringToInt,
    IntToString,
    CreateCell,

    // *** Arithmetic
    Sum,
    Subtract,
    Multiply,
    Divide,
    Increment,
    Decrement,
    Modulo,
    Invert,
    Max,
    Min,
    Gcd,
    Lcm,

    // *** Bitwise, integers only
    And,
    Or,
    Xor,
    Not,

    // *** Skip the next line unless true
    Equal,
    NotEqual,
    Greater,
    Less,
    GreaterEqual,
    LessEqual,

    // *** Strings
    Uppercase,
    Lowercase,
    Length,
    DeleteChar,
    RandomChar,

    // *** Block control
    CallBlock,
    StartLoop,
    Return,
}

/// Opcodes in numeric order; "01" is the first entry.
const OPCODES: [Opcode; 42] = {
    use Opcode::*;
    [
        Exit,
        Print,
        Input,
        AssignValue,
        Sum,
        Subtract,
        Multiply,
        Divide,
        Increment,
        Decrement,
        Modulo,
        ClearConsole,
        Equal,
        NotEqual,
        Greater,
        Less,
        GreaterEqual,
        LessEqual,
        Uppercase,
        Lowercase,
        Length,
        Invert,
        CallBlock,
        AddConstant,
        Swap,
        CopyCell,
        DeleteChar,
        StringToInt,
        IntToString,
        And,
        Or,
        Xor,
        Not,
        Sleep,
        StartLoop,
        RandomChar,
        Max,
        Min,
        Gcd,
        Lcm,
        CreateCell,
        Return,
    ]
};

impl Opcode {
    /// Parse a two digit code such as `"07"`.
    pub fn from_code(s: &str) -> Option<Opcode> {
        if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let n: usize = s.parse().ok()?;
        OPCODES.get(n.checked_sub(1)?).copied()
    }

    pub fn code(self) -> usize {
        OPCODES.iter().position(|op| *op == self).unwrap_or_default() + 1
    }

    /// Number of operands following the opcode.
    pub fn arity(self) -> usize {
        use Opcode::*;
        match self {
            Exit | ClearConsole | Return => 0,
            Print | Input | Sleep | Increment | Decrement | Invert | Not | Uppercase
            | Lowercase | CallBlock | StartLoop => 1,
            _ => 2,
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Opcode::*;
        let name = match self {
            Exit => "EXIT",
            Print => "PRINT",
            Input => "INPUT",
            ClearConsole => "CLEAR_CONSOLE",
            Sleep => "SLEEP",
            AssignValue => "ASSIGN_VALUE",
            AddConstant => "ADD_CONSTANT",
            Swap => "SWAP_CELLS",
            CopyCell => "COPY_CELL",
            StringToInt => "STRING_TO_INT",
            IntToString => "INT_TO_STRING",
            CreateCell => "CREATE_CELL",
            Sum => "SUM_CELLS",
            Subtract => "SUBTRACT_CELLS",
            Multiply => "MULTIPLY_CELLS",
            Divide => "DIVIDE_CELLS",
            Increment => "INCREMENT_CELL",
            Decrement => "DECREMENT_CELL",
            Modulo => "MODULO_CELLS",
            Invert => "INVERT_CELL",
            Max => "MAX_CELLS",
            Min => "MIN_CELLS",
            Gcd => "GCD_CELLS",
            Lcm => "LCM_CELLS",
            And => "BITWISE_AND",
            Or => "BITWISE_OR",
            Xor => "BITWISE_XOR",
            Not => "BITWISE_NOT",
            Equal => "EQUAL_CELLS",
            NotEqual => "NOT_EQUAL_CELLS",
            Greater => "GREATER_THAN_CELLS",
            Less => "LESS_THAN_CELLS",
            GreaterEqual => "GREATER_EQUAL_CELLS",
            LessEqual => "LESS_EQUAL_CELLS",
            Uppercase => "UPPERCASE_CELL",
            Lowercase => "LOWERCASE_CELL",
            Length => "LENGTH_CELL",
            DeleteChar => "DELETE_CHAR",
            RandomChar => "RANDOM_CHAR",
            CallBlock => "CALL_BLOCK",
            StartLoop => "START_LOOP",
            Return => "RETURN",
        };
        write!(f, "{:02} {}", self.code(), name)
    }
}
