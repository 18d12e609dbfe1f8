//! Field descriptors: the per-type table that replaces runtime reflection.
//!
//! A configuration type implements [`FlagConfig`] by listing its fields in
//! declaration order. Each [`Field`] carries the metadata that drives naming,
//! defaults and help text, plus a [`Slot`] pointing at the field's storage.
//!
//! ```ignore
//! impl FlagConfig for Specification {
//!     fn fields(&mut self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::new("Debug", &mut self.debug).usage("enable debug mode"),
//!             Field::new("Port", &mut self.port).short("p").default("8080"),
//!             Field::new("RateOfTravel", &mut self.rate_of_travel).default("3.14"),
//!         ]
//!     }
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use crate::error::FlagfigError;
use crate::name::hyphenate;
use crate::types::{Kind, Value};

/// A configuration structure whose fields can be bound to environment
/// variables and command-line flags.
pub trait FlagConfig {
    /// All fields, in declaration order.
    fn fields(&mut self) -> Vec<Field<'_>>;
}

/// Mutable access to the storage of one field, tagged by kind.
#[derive(Debug)]
pub enum Slot<'a> {
    Bool(&'a mut bool),
    Int(&'a mut isize),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Uint(&'a mut usize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Str(&'a mut String),
    Duration(&'a mut Duration),
    StringList(&'a mut Vec<String>),
    /// Map-typed fields are declared but never bound.
    Map { type_name: &'static str },
    /// Any other type. Logged and skipped.
    Unsupported { type_name: &'static str },
}

impl Slot<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            Slot::Bool(_) => Kind::Bool,
            Slot::Int(_) => Kind::Int,
            Slot::I8(_) => Kind::I8,
            Slot::I16(_) => Kind::I16,
            Slot::I32(_) => Kind::I32,
            Slot::I64(_) => Kind::I64,
            Slot::Uint(_) => Kind::Uint,
            Slot::U8(_) => Kind::U8,
            Slot::U16(_) => Kind::U16,
            Slot::U32(_) => Kind::U32,
            Slot::U64(_) => Kind::U64,
            Slot::F32(_) => Kind::F32,
            Slot::F64(_) => Kind::F64,
            Slot::Str(_) => Kind::Str,
            Slot::Duration(_) => Kind::Duration,
            Slot::StringList(_) => Kind::StringList,
            Slot::Map { .. } => Kind::Map,
            Slot::Unsupported { .. } => Kind::Unsupported,
        }
    }

    /// Name of the Rust type behind the slot, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Slot::Map { type_name } | Slot::Unsupported { type_name } => *type_name,
            Slot::Duration(_) => "Duration",
            Slot::StringList(_) => "Vec<String>",
            Slot::Str(_) => "String",
            Slot::Bool(_) => "bool",
            Slot::Int(_) => "isize",
            Slot::I8(_) => "i8",
            Slot::I16(_) => "i16",
            Slot::I32(_) => "i32",
            Slot::I64(_) => "i64",
            Slot::Uint(_) => "usize",
            Slot::U8(_) => "u8",
            Slot::U16(_) => "u16",
            Slot::U32(_) => "u32",
            Slot::U64(_) => "u64",
            Slot::F32(_) => "f32",
            Slot::F64(_) => "f64",
        }
    }

    /// Snapshot of the stored value. `None` for kinds that are never bound.
    pub fn current(&self) -> Option<Value> {
        let value = match self {
            Slot::Bool(v) => Value::Bool(**v),
            Slot::Int(v) => Value::Int(**v),
            Slot::I8(v) => Value::I8(**v),
            Slot::I16(v) => Value::I16(**v),
            Slot::I32(v) => Value::I32(**v),
            Slot::I64(v) => Value::I64(**v),
            Slot::Uint(v) => Value::Uint(**v),
            Slot::U8(v) => Value::U8(**v),
            Slot::U16(v) => Value::U16(**v),
            Slot::U32(v) => Value::U32(**v),
            Slot::U64(v) => Value::U64(**v),
            Slot::F32(v) => Value::F32(**v),
            Slot::F64(v) => Value::F64(**v),
            Slot::Str(v) => Value::Str((**v).clone()),
            Slot::Duration(v) => Value::Duration(**v),
            Slot::StringList(v) => Value::StringList((**v).clone()),
            Slot::Map { .. } | Slot::Unsupported { .. } => return None,
        };
        Some(value)
    }

    /// Whether the stored value equals the zero value of its kind.
    pub fn is_zero(&self) -> bool {
        match self {
            Slot::Bool(v) => !**v,
            Slot::Int(v) => **v == 0,
            Slot::I8(v) => **v == 0,
            Slot::I16(v) => **v == 0,
            Slot::I32(v) => **v == 0,
            Slot::I64(v) => **v == 0,
            Slot::Uint(v) => **v == 0,
            Slot::U8(v) => **v == 0,
            Slot::U16(v) => **v == 0,
            Slot::U32(v) => **v == 0,
            Slot::U64(v) => **v == 0,
            Slot::F32(v) => **v == 0.0,
            Slot::F64(v) => **v == 0.0,
            Slot::Str(v) => v.is_empty(),
            Slot::Duration(v) => v.is_zero(),
            Slot::StringList(v) => v.is_empty(),
            Slot::Map { .. } | Slot::Unsupported { .. } => true,
        }
    }

    /// Overwrite the stored value.
    pub fn assign(&mut self, value: Value) -> Result<(), FlagfigError> {
        match (self, value) {
            (Slot::Bool(slot), Value::Bool(v)) => **slot = v,
            (Slot::Int(slot), Value::Int(v)) => **slot = v,
            (Slot::I8(slot), Value::I8(v)) => **slot = v,
            (Slot::I16(slot), Value::I16(v)) => **slot = v,
            (Slot::I32(slot), Value::I32(v)) => **slot = v,
            (Slot::I64(slot), Value::I64(v)) => **slot = v,
            (Slot::Uint(slot), Value::Uint(v)) => **slot = v,
            (Slot::U8(slot), Value::U8(v)) => **slot = v,
            (Slot::U16(slot), Value::U16(v)) => **slot = v,
            (Slot::U32(slot), Value::U32(v)) => **slot = v,
            (Slot::U64(slot), Value::U64(v)) => **slot = v,
            (Slot::F32(slot), Value::F32(v)) => **slot = v,
            (Slot::F64(slot), Value::F64(v)) => **slot = v,
            (Slot::Str(slot), Value::Str(v)) => **slot = v,
            (Slot::Duration(slot), Value::Duration(v)) => **slot = v,
            (Slot::StringList(slot), Value::StringList(v)) => **slot = v,
            (slot, value) => {
                return Err(FlagfigError::KindMismatch {
                    expected: slot.kind(),
                    found: value.kind(),
                });
            }
        }
        Ok(())
    }

    /// Append to a string list. Any other kind is assigned as usual.
    pub fn extend(&mut self, value: Value) -> Result<(), FlagfigError> {
        match (self, value) {
            (Slot::StringList(slot), Value::StringList(v)) => {
                slot.extend(v);
                Ok(())
            }
            (slot, value) => slot.assign(value),
        }
    }
}

/// Types that can sit behind a [`Slot`].
pub trait Bindable {
    fn slot(&mut self) -> Slot<'_>;
}

macro_rules! bindable {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Bindable for $ty {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::$variant(self)
                }
            }
        )*
    };
}

bindable! {
    bool => Bool,
    isize => Int,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    usize => Uint,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => Str,
    Duration => Duration,
    Vec<String> => StringList,
}

impl<K, V, S> Bindable for HashMap<K, V, S> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Map {
            type_name: std::any::type_name::<Self>(),
        }
    }
}

impl<K, V> Bindable for BTreeMap<K, V> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Map {
            type_name: std::any::type_name::<Self>(),
        }
    }
}

/// Descriptor for one configuration field.
#[derive(Debug)]
pub struct Field<'a> {
    ident: &'static str,
    name: Option<&'static str>,
    short: Option<&'static str>,
    usage: &'static str,
    default: Option<&'static str>,
    env: Option<&'static str>,
    slot: Slot<'a>,
}

impl<'a> Field<'a> {
    /// Describe a field by its identifier and storage.
    pub fn new<T: Bindable + ?Sized>(ident: &'static str, target: &'a mut T) -> Self {
        Self::with_slot(ident, target.slot())
    }

    /// Describe a field whose type cannot be bound.
    pub fn unsupported(ident: &'static str, type_name: &'static str) -> Self {
        Self::with_slot(ident, Slot::Unsupported { type_name })
    }

    pub fn with_slot(ident: &'static str, slot: Slot<'a>) -> Self {
        Self {
            ident,
            name: None,
            short: None,
            usage: "",
            default: None,
            env: None,
            slot,
        }
    }

    /// Explicit external name, replacing the hyphenated identifier.
    pub fn name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Additional flag alias, e.g. `"p"` or `"i8"`.
    pub fn short(mut self, short: &'static str) -> Self {
        self.short = Some(short);
        self
    }

    pub fn usage(mut self, usage: &'static str) -> Self {
        self.usage = usage;
        self
    }

    /// Textual default, coerced to the field's kind at bind time.
    pub fn default(mut self, text: &'static str) -> Self {
        self.default = Some(text);
        self
    }

    /// Environment variable name used instead of the identifier.
    pub fn env(mut self, key: &'static str) -> Self {
        self.env = Some(key);
        self
    }

    pub fn ident(&self) -> &'static str {
        self.ident
    }

    pub fn short_name(&self) -> Option<&'static str> {
        self.short.filter(|s| !s.is_empty())
    }

    pub fn usage_text(&self) -> &'static str {
        self.usage
    }

    pub fn default_text(&self) -> Option<&'static str> {
        self.default.filter(|s| !s.is_empty())
    }

    pub fn env_override(&self) -> Option<&'static str> {
        self.env.filter(|s| !s.is_empty())
    }

    pub fn kind(&self) -> Kind {
        self.slot.kind()
    }

    pub fn slot(&self) -> &Slot<'a> {
        &self.slot
    }

    pub fn slot_mut(&mut self) -> &mut Slot<'a> {
        &mut self.slot
    }

    pub fn into_slot(self) -> Slot<'a> {
        self.slot
    }

    /// The explicit name if set, the hyphenated identifier otherwise.
    pub fn external_name(&self) -> Result<String, FlagfigError> {
        if let Some(name) = self.name.filter(|n| !n.is_empty()) {
            return Ok(name.to_string());
        }
        let derived = hyphenate(self.ident);
        if derived.is_empty() {
            return Err(FlagfigError::MissingName {
                ident: self.ident.to_string(),
            });
        }
        Ok(derived)
    }

    /// External name followed by the short alias, if any.
    pub fn flag_names(&self) -> Result<Vec<String>, FlagfigError> {
        let mut names = vec![self.external_name()?];
        if let Some(short) = self.short_name() {
            names.push(short.to_string());
        }
        Ok(names)
    }
}
