use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    OpLoadConst = 0x01,
    OpLoad = 0x02,
    OpDeclare = 0x03,
    OpAssign = 0x04,
    OpPop = 0x05,
    OpDup = 0x06,
    OpJump = 0x07,
    OpJumpTruthy = 0x08,
    OpJumpFalsy = 0x09,
    OpCall = 0x0A,
    OpCallWith = 0x0B,
    OpFunction = 0x0C,
    OpReturn = 0x0D,
    OpReturnValue = 0x0E,
    OpEnvStart = 0x0F,
    OpEnvEnd = 0x10,
    OpGet = 0x11,
    OpSet = 0x12,
    OpGetWith = 0x13,

    OpAdd = 0x41,
    OpSub = 0x42,
    OpMul = 0x43,
    OpDiv = 0x44,
    OpMod = 0x45,
    OpNeg = 0x46,
    /// Older encoders emit this byte for the same logical negation as `OpNeg`.
    OpNot = 0x47,
    OpEqual = 0x48,
    OpNotEqual = 0x49,
    OpLessThan = 0x4A,
    OpLessThanOrEqual = 0x4B,
    OpGreaterThan = 0x4C,
    OpGreaterThanOrEqual = 0x4D,
    OpPrint = 0x4E,
}

/// Every opcode in byte order.
pub const ALL_OPCODES: [OpCode; 33] = [
    OpCode::OpLoadConst,
    OpCode::OpLoad,
    OpCode::OpDeclare,
    OpCode::OpAssign,
    OpCode::OpPop,
    OpCode::OpDup,
    OpCode::OpJump,
    OpCode::OpJumpTruthy,
    OpCode::OpJumpFalsy,
    OpCode::OpCall,
    OpCode::OpCallWith,
    OpCode::OpFunction,
    OpCode::OpReturn,
    OpCode::OpReturnValue,
    OpCode::OpEnvStart,
    OpCode::OpEnvEnd,
    OpCode::OpGet,
    OpCode::OpSet,
    OpCode::OpGetWith,
    OpCode::OpAdd,
    OpCode::OpSub,
    OpCode::OpMul,
    OpCode::OpDiv,
    OpCode::OpMod,
    OpCode::OpNeg,
    OpCode::OpNot,
    OpCode::OpEqual,
    OpCode::OpNotEqual,
    OpCode::OpLessThan,
    OpCode::OpLessThanOrEqual,
    OpCode::OpGreaterThan,
    OpCode::OpGreaterThanOrEqual,
    OpCode::OpPrint,
];

impl TryFrom<u8> for OpCode {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        let op = match byte {
            0x01 => OpCode::OpLoadConst,
            0x02 => OpCode::OpLoad,
            0x03 => OpCode::OpDeclare,
            0x04 => OpCode::OpAssign,
            0x05 => OpCode::OpPop,
            0x06 => OpCode::OpDup,
            0x07 => OpCode::OpJump,
            0x08 => OpCode::OpJumpTruthy,
            0x09 => OpCode::OpJumpFalsy,
            0x0A => OpCode::OpCall,
            0x0B => OpCode::OpCallWith,
            0x0C => OpCode::OpFunction,
            0x0D => OpCode::OpReturn,
            0x0E => OpCode::OpReturnValue,
            0x0F => OpCode::OpEnvStart,
            0x10 => OpCode::OpEnvEnd,
            0x11 => OpCode::OpGet,
            0x12 => OpCode::OpSet,
            0x13 => OpCode::OpGetWith,
            0x41 => OpCode::OpAdd,
            0x42 => OpCode::OpSub,
            0x43 => OpCode::OpMul,
            0x44 => OpCode::OpDiv,
            0x45 => OpCode::OpMod,
            0x46 => OpCode::OpNeg,
            0x47 => OpCode::OpNot,
            0x48 => OpCode::OpEqual,
            0x49 => OpCode::OpNotEqual,
            0x4A => OpCode::OpLessThan,
            0x4B => OpCode::OpLessThanOrEqual,
            0x4C => OpCode::OpGreaterThan,
            0x4D => OpCode::OpGreaterThanOrEqual,
            0x4E => OpCode::OpPrint,
            other => return Err(other),
        };
        Ok(op)
    }
}

impl OpCode {
    /// Assembler mnemonic, as printed by `kula show` and the VM trace.
    pub fn mnemonic(self) -> &'static str {
        match self {
            OpCode::OpLoadConst => "LOADC",
            OpCode::OpLoad => "LOAD",
            OpCode::OpDeclare => "DECL",
            OpCode::OpAssign => "ASGN",
            OpCode::OpPop => "POP",
            OpCode::OpDup => "DUP",
            OpCode::OpJump => "JMP",
            OpCode::OpJumpTruthy => "JMPT",
            OpCode::OpJumpFalsy => "JMPF",
            OpCode::OpCall => "CALL",
            OpCode::OpCallWith => "CALWT",
            OpCode::OpFunction => "FUNC",
            OpCode::OpReturn => "RET",
            OpCode::OpReturnValue => "RETV",
            OpCode::OpEnvStart => "ENVST",
            OpCode::OpEnvEnd => "ENVED",
            OpCode::OpGet => "GET",
            OpCode::OpSet => "SET",
            OpCode::OpGetWith => "GETWT",
            OpCode::OpAdd => "ADD",
            OpCode::OpSub => "SUB",
            OpCode::OpMul => "MUL",
            OpCode::OpDiv => "DIV",
            OpCode::OpMod => "MOD",
            OpCode::OpNeg => "NEG",
            OpCode::OpNot => "NOT",
            OpCode::OpEqual => "EQ",
            OpCode::OpNotEqual => "NEQ",
            OpCode::OpLessThan => "LT",
            OpCode::OpLessThanOrEqual => "LE",
            OpCode::OpGreaterThan => "GT",
            OpCode::OpGreaterThanOrEqual => "GE",
            OpCode::OpPrint => "PRINT",
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Width in bytes of the single operand that follows `op` in the byte stream.
pub fn operand_width(op: OpCode) -> usize {
    match op {
        OpCode::OpLoadConst
        | OpCode::OpLoad
        | OpCode::OpDeclare
        | OpCode::OpAssign
        | OpCode::OpJump
        | OpCode::OpJumpTruthy
        | OpCode::OpJumpFalsy => 2,
        OpCode::OpFunction | OpCode::OpPrint | OpCode::OpCall | OpCode::OpCallWith => 1,
        _ => 0,
    }
}
