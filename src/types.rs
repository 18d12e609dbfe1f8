use std::fmt;
use std::time::Duration;

use crate::duration::format_duration;

/// The closed set of field kinds a configuration field can have.
///
/// Every bindable kind has a matching [`Value`] variant. `Map` and
/// `Unsupported` are never bound: they are logged and skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    /// Pointer-sized signed integer.
    Int,
    I8,
    I16,
    I32,
    I64,
    /// Pointer-sized unsigned integer.
    Uint,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Str,
    Duration,
    StringList,
    Map,
    Unsupported,
}

impl Kind {
    /// Bit width for numeric kinds, `None` for everything else.
    pub fn bits(self) -> Option<u32> {
        match self {
            Kind::I8 | Kind::U8 => Some(8),
            Kind::I16 | Kind::U16 => Some(16),
            Kind::I32 | Kind::U32 | Kind::F32 => Some(32),
            Kind::I64 | Kind::U64 | Kind::F64 | Kind::Duration => Some(64),
            Kind::Int => Some(isize::BITS),
            Kind::Uint => Some(usize::BITS),
            _ => None,
        }
    }

    /// Whether fields of this kind can be registered as flags.
    pub fn is_bindable(self) -> bool {
        !matches!(self, Kind::Map | Kind::Unsupported)
    }

    /// The zero value of the kind.
    pub fn zero(self) -> Option<Value> {
        let value = match self {
            Kind::Bool => Value::Bool(false),
            Kind::Int => Value::Int(0),
            Kind::I8 => Value::I8(0),
            Kind::I16 => Value::I16(0),
            Kind::I32 => Value::I32(0),
            Kind::I64 => Value::I64(0),
            Kind::Uint => Value::Uint(0),
            Kind::U8 => Value::U8(0),
            Kind::U16 => Value::U16(0),
            Kind::U32 => Value::U32(0),
            Kind::U64 => Value::U64(0),
            Kind::F32 => Value::F32(0.0),
            Kind::F64 => Value::F64(0.0),
            Kind::Str => Value::Str(String::new()),
            Kind::Duration => Value::Duration(Duration::ZERO),
            Kind::StringList => Value::StringList(Vec::new()),
            Kind::Map | Kind::Unsupported => return None,
        };
        Some(value)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::I8 => "int8",
            Kind::I16 => "int16",
            Kind::I32 => "int32",
            Kind::I64 => "int64",
            Kind::Uint => "uint",
            Kind::U8 => "uint8",
            Kind::U16 => "uint16",
            Kind::U32 => "uint32",
            Kind::U64 => "uint64",
            Kind::F32 => "float32",
            Kind::F64 => "float64",
            Kind::Str => "string",
            Kind::Duration => "duration",
            Kind::StringList => "string list",
            Kind::Map => "map",
            Kind::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

/// A typed value for one field: a coerced default, an environment value, or a
/// parsed flag.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(isize),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Uint(usize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Str(String),
    Duration(Duration),
    StringList(Vec<String>),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::I8(_) => Kind::I8,
            Value::I16(_) => Kind::I16,
            Value::I32(_) => Kind::I32,
            Value::I64(_) => Kind::I64,
            Value::Uint(_) => Kind::Uint,
            Value::U8(_) => Kind::U8,
            Value::U16(_) => Kind::U16,
            Value::U32(_) => Kind::U32,
            Value::U64(_) => Kind::U64,
            Value::F32(_) => Kind::F32,
            Value::F64(_) => Kind::F64,
            Value::Str(_) => Kind::Str,
            Value::Duration(_) => Kind::Duration,
            Value::StringList(_) => Kind::StringList,
        }
    }

    /// Floating point values widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F32(v) => Some(f64::from(*v)),
            Value::F64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.kind().zero().as_ref() == Some(self)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::I8(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::Uint(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "{v}"),
            Value::U16(v) => write!(f, "{v}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::Str(v) => f.write_str(v),
            Value::Duration(v) => f.write_str(&format_duration(*v)),
            Value::StringList(v) => f.write_str(&v.join(",")),
        }
    }
}
