//! Type references.
//!
//! A [`Type`] records both the structural form (identifier, components, tag)
//! and the canonical printed `kind` string used later for name mangling and
//! compatibility checks. `original` keeps a copy of the type as written, so
//! generic substitution can still recover the source form.

use crate::{Expr, Fn};
use quill_lex::Token;

/// Structural identifier of a type reference.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum TypeId {
    #[default]
    Void,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    Int,
    Uint,
    Uintptr,
    F32,
    F64,
    Bool,
    Str,
    Any,
    /// Named (user-defined) type.
    Id,
    Slice,
    Array,
    Map,
    Fn,
    Struct,
    Enum,
    Unsafe,
}

impl TypeId {
    /// Map a built-in type keyword onto its identifier.
    pub fn from_keyword(text: &str) -> TypeId {
        match text {
            "i8" => TypeId::I8,
            "i16" => TypeId::I16,
            "i32" => TypeId::I32,
            "i64" => TypeId::I64,
            "u8" => TypeId::U8,
            "u16" => TypeId::U16,
            "u32" => TypeId::U32,
            "u64" => TypeId::U64,
            "int" => TypeId::Int,
            "uint" => TypeId::Uint,
            "uintptr" => TypeId::Uintptr,
            "f32" => TypeId::F32,
            "f64" => TypeId::F64,
            "bool" => TypeId::Bool,
            "str" => TypeId::Str,
            "any" => TypeId::Any,
            _ => TypeId::Id,
        }
    }

    /// Printed form of primitive identifiers; `None` for composite ones.
    pub fn primitive_kind(self) -> Option<&'static str> {
        match self {
            TypeId::Void => Some("void"),
            TypeId::I8 => Some("i8"),
            TypeId::I16 => Some("i16"),
            TypeId::I32 => Some("i32"),
            TypeId::I64 => Some("i64"),
            TypeId::U8 => Some("u8"),
            TypeId::U16 => Some("u16"),
            TypeId::U32 => Some("u32"),
            TypeId::U64 => Some("u64"),
            TypeId::Int => Some("int"),
            TypeId::Uint => Some("uint"),
            TypeId::Uintptr => Some("uintptr"),
            TypeId::F32 => Some("f32"),
            TypeId::F64 => Some("f64"),
            TypeId::Bool => Some("bool"),
            TypeId::Str => Some("str"),
            TypeId::Any => Some("any"),
            TypeId::Unsafe => Some("unsafe"),
            _ => None,
        }
    }
}

/// Printed prefix of slice kinds.
pub const PREFIX_SLICE: &str = "[]";

/// Printed prefix of array kinds.
pub const PREFIX_ARRAY: &str = "[...]";

/// Payload that distinguishes structurally equal heads.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TypeTag {
    #[default]
    None,
    /// Generic arguments of a named type.
    Generics(Vec<Type>),
    /// Prototype of a function type.
    Fn(Box<Fn>),
    /// Key and value of a map type.
    Map(Box<Type>, Box<Type>),
    /// Component types of a multi-value return.
    Multi(Vec<Type>),
}

/// Size clause of an array type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypeSize {
    pub expr: Expr,
    /// `[...]T`: element count is derived from the initializer.
    pub auto_sized: bool,
}

/// A type reference.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Type {
    pub id: TypeId,
    pub token: Token,
    /// Canonical printed form, e.g. `"[]i32"` or `"&Person"`.
    pub kind: String,
    /// Element type of slices and arrays.
    pub component: Option<Box<Type>>,
    pub tag: TypeTag,
    pub size: TypeSize,
    pub cpp_linked: bool,
    /// Marks a multi-value return bundle (tag holds the components).
    pub multi_typed: bool,
    /// Copy of the type as first produced, before any substitution.
    pub original: Option<Box<Type>>,
}

impl Type {
    /// The default `void` type.
    pub fn void() -> Type {
        Type {
            id: TypeId::Void,
            kind: "void".to_string(),
            ..Type::default()
        }
    }

    /// A primitive with its canonical kind string.
    pub fn primitive(id: TypeId, token: Token) -> Type {
        Type {
            id,
            kind: id.primitive_kind().unwrap_or_default().to_string(),
            token,
            ..Type::default()
        }
    }

    /// Printed form of a map type: `[K:V]`.
    pub fn map_kind(&self) -> String {
        match &self.tag {
            TypeTag::Map(key, value) => format!("[{}:{}]", key.kind, value.kind),
            _ => String::new(),
        }
    }

    /// Store the current state as the written form.
    pub fn snapshot_original(&mut self) {
        let mut copy = self.clone();
        copy.original = None;
        self.original = Some(Box::new(copy));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_mapping() {
        assert_eq!(TypeId::from_keyword("u32"), TypeId::U32);
        assert_eq!(TypeId::from_keyword("str"), TypeId::Str);
        assert_eq!(TypeId::from_keyword("Person"), TypeId::Id);
    }

    #[test]
    fn void_kind() {
        let ty = Type::void();
        assert_eq!(ty.id, TypeId::Void);
        assert_eq!(ty.kind, "void");
    }

    #[test]
    fn map_kind_prints_key_and_value() {
        let key = Type {
            kind: "int".into(),
            ..Type::default()
        };
        let value = Type {
            kind: "str".into(),
            ..Type::default()
        };
        let map = Type {
            id: TypeId::Map,
            tag: TypeTag::Map(Box::new(key), Box::new(value)),
            ..Type::default()
        };
        assert_eq!(map.map_kind(), "[int:str]");
    }

    #[test]
    fn snapshot_keeps_written_form() {
        let mut ty = Type {
            kind: "MyBox[int]".into(),
            id: TypeId::Id,
            ..Type::default()
        };
        ty.snapshot_original();
        ty.kind = "MyBox[f64]".into();
        assert_eq!(ty.original.as_ref().unwrap().kind, "MyBox[int]");
    }
}
