//! Declaration nodes.

use crate::{Block, Expr, Type};
use quill_lex::Token;

/// A top-level tree entry: the identifying token plus the declaration payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    pub token: Token,
    pub node: Node,
}

/// Declaration payloads.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Use(UseDecl),
    Fn(Box<Fn>),
    Var(Box<Var>),
    TypeAlias(TypeAlias),
    Enum(Enum),
    Struct(Struct),
    Trait(Trait),
    Impl(Impl),
    /// Free generics parameter list (`type[T, U]`).
    Generics(Vec<GenericType>),
    LinkFn(LinkFn),
    LinkVar(LinkVar),
    LinkStruct(LinkStruct),
    LinkAlias(LinkAlias),
    Comment(Comment),
}

/// A use declaration.
///
/// For `use cpp "header.h"` only `path` (the unquoted literal) and `cpp` are
/// meaningful. Otherwise `path` is the resolved filesystem path under the
/// standard library root and `link_string` the written `std::...` form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UseDecl {
    pub token: Token,
    pub path: String,
    pub link_string: String,
    pub cpp: bool,
    /// Glob import (`::*`).
    pub full_use: bool,
    /// Imported names; identifiers or the `self` keyword.
    pub selectors: Vec<Token>,
}

/// A function or method.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fn {
    pub token: Token,
    pub id: String,
    pub is_unsafe: bool,
    pub is_public: bool,
    pub generics: Vec<GenericType>,
    pub params: Vec<Param>,
    pub ret: RetType,
    /// The extracted `self` parameter of methods.
    pub receiver: Option<Box<Var>>,
    pub block: Option<Block>,
}

impl Fn {
    /// Canonical kind string of this prototype used as a function type,
    /// e.g. `fn(int,str):bool`.
    pub fn type_kind(&self) -> String {
        let mut kind = String::new();
        if self.is_unsafe {
            kind.push_str("unsafe ");
        }
        kind.push_str("fn(");
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                kind.push(',');
            }
            if param.variadic {
                kind.push_str("...");
            }
            kind.push_str(&param.ty.kind);
        }
        kind.push(')');
        if self.ret.ty.kind != "void" {
            kind.push(':');
            kind.push_str(&self.ret.ty.kind);
        }
        kind
    }
}

/// A function parameter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Param {
    pub token: Token,
    pub id: String,
    pub is_mut: bool,
    pub variadic: bool,
    pub ty: Type,
}

/// Return clause of a function.
///
/// For multi-value returns `ty.multi_typed` is set, `ty.tag` holds the
/// component types and `identifiers` the matching names (the ignore id for
/// anonymous slots), enabling destructuring at the call site.
#[derive(Clone, Debug, PartialEq)]
pub struct RetType {
    pub ty: Type,
    pub identifiers: Vec<Token>,
}

impl Default for RetType {
    fn default() -> Self {
        RetType {
            ty: Type::void(),
            identifiers: Vec::new(),
        }
    }
}

/// A declared generic type parameter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenericType {
    pub token: Token,
    pub id: String,
}

/// A variable: global, local, field, receiver, or binding.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Var {
    pub token: Token,
    pub id: String,
    pub ty: Type,
    pub expr: Expr,
    /// The assignment token when initialized (`=`, `:=`).
    pub setter: Option<Token>,
    pub is_public: bool,
    pub is_mut: bool,
    pub is_const: bool,
    pub is_field: bool,
    /// Declares a fresh binding (destructuring, `:=`, loop variables).
    pub is_new: bool,
    pub cpp_linked: bool,
}

/// A type alias declaration (`type T: U`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypeAlias {
    pub token: Token,
    pub id: String,
    pub ty: Type,
    pub is_public: bool,
}

/// An enum declaration. The base type defaults to `u32`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Enum {
    pub token: Token,
    pub id: String,
    pub ty: Type,
    pub items: Vec<EnumItem>,
    pub is_public: bool,
}

/// One enum item with an optional explicit value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnumItem {
    pub token: Token,
    pub id: String,
    pub expr: Option<Expr>,
}

/// A struct declaration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Struct {
    pub token: Token,
    pub id: String,
    pub fields: Vec<Var>,
    pub is_public: bool,
    pub cpp_linked: bool,
}

/// A trait declaration. Every function is public and prototype-only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trait {
    pub token: Token,
    pub id: String,
    pub funcs: Vec<Fn>,
    pub is_public: bool,
}

/// An impl block.
///
/// `base` is the implementor identifier. `target` is the implemented trait;
/// a `void` target marks an inherent impl (a method bundle on `base`).
#[derive(Clone, Debug, PartialEq)]
pub struct Impl {
    pub base: Token,
    pub target: Type,
    /// Body entries in source order: methods, type items, comments.
    pub tree: Vec<Object>,
}

impl Impl {
    /// Reports whether this is an inherent impl (no trait).
    pub fn is_inherent(&self) -> bool {
        self.target.id == crate::TypeId::Void
    }
}

/// A foreign-linked function prototype.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkFn {
    pub token: Token,
    pub link: Fn,
}

/// A foreign-linked variable.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkVar {
    pub token: Token,
    pub link: Var,
}

/// A foreign-linked struct.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkStruct {
    pub token: Token,
    pub link: Struct,
}

/// A foreign-linked type alias.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkAlias {
    pub token: Token,
    pub link: TypeAlias,
}

/// A source comment carried through the tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Comment {
    pub content: String,
}
