//! Assembly info: the typed stack-machine IR handed to the downstream emitter.
//!
//! Every compiled expression or statement yields an [`AssemblyInfo`]: the static
//! type of the value it leaves on the stack and the instructions that produce it.
//! Instructions render as one line of assembly text each.

use std::fmt::Display;

/// Static type tag of a compiled value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// The numeric kind; arithmetic only accepts this
    Decimal,
    Boolean,
    Str,
    Nil,
    Function,
    /// A value whose type is only known at runtime
    Object,
    /// Statements leave nothing on the stack
    Void,
}

impl ValueType {
    /// Mnemonic suffix used by typed instructions.
    pub fn suffix(&self) -> &'static str {
        match self {
            ValueType::Decimal => "d",
            ValueType::Boolean => "b",
            ValueType::Str => "s",
            _ => "a",
        }
    }

    /// The common type of two values that may reach the same point.
    pub fn merge(self, other: ValueType) -> ValueType {
        if self == other {
            self
        } else {
            ValueType::Object
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueType::Decimal => "decimal",
            ValueType::Boolean => "boolean",
            ValueType::Str => "string",
            ValueType::Nil => "nil",
            ValueType::Function => "function",
            ValueType::Object => "object",
            ValueType::Void => "void",
        };
        write!(f, "{}", name)
    }
}

pub type Label = usize;

/// One row of the local-variable table.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalVariable {
    pub index: usize,
    pub name: String,
    pub value_type: ValueType,
}

impl Display for LocalVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, ".local {} {} {}", self.index, self.name, self.value_type)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    PushDecimal(f64),
    PushString(String),
    PushBoolean(bool),
    PushNil,
    Load { index: usize, value_type: ValueType },
    Store { index: usize, value_type: ValueType },
    FunctionRef { name: String, arity: usize },
    Dup,
    Pop,
    Negate,
    /// Pushes `true` if the operand is falsy
    Not,
    Add,
    Subtract,
    Multiply,
    Divide,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Equal,
    NotEqual,
    Label(Label),
    Jump(Label),
    /// Pops the condition; jumps when it is `nil` or `false`
    JumpIfFalse(Label),
    /// Pops the condition; jumps when it is neither `nil` nor `false`
    JumpIfTrue(Label),
    Print(ValueType),
    /// Pops `arity` arguments and the callee beneath them
    Call { arity: usize },
    Local(LocalVariable),
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instruction::PushDecimal(value) => write!(f, "push.d {}", value),
            Instruction::PushString(value) => write!(f, "push.s {:?}", value),
            Instruction::PushBoolean(value) => write!(f, "push.b {}", value),
            Instruction::PushNil => write!(f, "push.nil"),
            Instruction::Load { index, value_type } => {
                write!(f, "load.{} {}", value_type.suffix(), index)
            }
            Instruction::Store { index, value_type } => {
                write!(f, "store.{} {}", value_type.suffix(), index)
            }
            Instruction::FunctionRef { name, arity } => write!(f, "fn.ref {}/{}", name, arity),
            Instruction::Dup => write!(f, "dup"),
            Instruction::Pop => write!(f, "pop"),
            Instruction::Negate => write!(f, "neg.d"),
            Instruction::Not => write!(f, "not"),
            Instruction::Add => write!(f, "add.d"),
            Instruction::Subtract => write!(f, "sub.d"),
            Instruction::Multiply => write!(f, "mul.d"),
            Instruction::Divide => write!(f, "div.d"),
            Instruction::Greater => write!(f, "cmp.gt.d"),
            Instruction::GreaterEqual => write!(f, "cmp.ge.d"),
            Instruction::Less => write!(f, "cmp.lt.d"),
            Instruction::LessEqual => write!(f, "cmp.le.d"),
            Instruction::Equal => write!(f, "eq"),
            Instruction::NotEqual => write!(f, "ne"),
            Instruction::Label(label) => write!(f, "L{}:", label),
            Instruction::Jump(label) => write!(f, "jmp L{}", label),
            Instruction::JumpIfFalse(label) => write!(f, "jz L{}", label),
            Instruction::JumpIfTrue(label) => write!(f, "jnz L{}", label),
            Instruction::Print(value_type) => write!(f, "print.{}", value_type.suffix()),
            Instruction::Call { arity } => write!(f, "call {}", arity),
            Instruction::Local(local) => write!(f, "{}", local),
        }
    }
}

/// A compiled fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyInfo {
    pub value_type: ValueType,
    pub code: Vec<Instruction>,
}

impl AssemblyInfo {
    pub fn new(value_type: ValueType) -> Self {
        AssemblyInfo {
            value_type,
            code: vec![],
        }
    }

    pub fn with(value_type: ValueType, code: Vec<Instruction>) -> Self {
        AssemblyInfo { value_type, code }
    }

    pub fn push(&mut self, instruction: Instruction) {
        self.code.push(instruction);
    }

    /// Appends another fragment's instructions; its type is dropped.
    pub fn append(&mut self, other: AssemblyInfo) {
        self.code.extend(other.code);
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

impl Display for AssemblyInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for instruction in self.code.iter() {
            match instruction {
                Instruction::Label(_) | Instruction::Local(_) => writeln!(f, "{}", instruction)?,
                _ => writeln!(f, "    {}", instruction)?,
            }
        }
        Ok(())
    }
}
