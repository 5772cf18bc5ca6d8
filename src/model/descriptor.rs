//! Static type metadata.
//!
//! Each inspectable type publishes one hand-maintained [`TypeDescriptor`]
//! through [`Describe`]. The tables must be kept in step with the type's
//! definition; the unit tests next to each implementation check this.

use std::fmt;

use crate::error::Result;

/// A type name with its generic arguments, e.g. `Vec<BTreeMap<String, Value>>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedType {
    pub name: &'static str,
    pub generics: &'static [ResolvedType],
}

impl ResolvedType {
    pub const fn simple(name: &'static str) -> Self {
        Self { name, generics: &[] }
    }

    pub fn generic(&self, index: usize) -> Option<&ResolvedType> {
        self.generics.get(index)
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)?;
        if let Some((first, rest)) = self.generics.split_first() {
            write!(f, "<{}", first)?;
            for generic in rest {
                write!(f, ", {}", generic)?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub name: &'static str,
    pub readable: bool,
    pub writable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Crate,
    Private,
}

impl Visibility {
    fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "pub ",
            Visibility::Crate => "pub(crate) ",
            Visibility::Private => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub owner: &'static str,
    pub name: &'static str,
    pub visibility: Visibility,
    pub ty: ResolvedType,
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}::{}: {}",
            self.visibility.keyword(),
            self.owner,
            self.name,
            self.ty
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: &'static str,
    pub signature: &'static str,
}

/// Zero-argument constructor.
pub type Constructor<T> = fn() -> Result<T>;

/// Metadata table for one type.
pub struct TypeDescriptor<T> {
    pub name: &'static str,
    pub properties: &'static [PropertyDescriptor],
    pub fields: &'static [FieldDescriptor],
    pub methods: &'static [MethodDescriptor],
    pub constructor: Option<(&'static str, Constructor<T>)>,
}

impl<T> TypeDescriptor<T> {
    pub fn find_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn find_method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Signature of the zero-argument constructor, if the type has one.
    pub fn constructor_signature(&self) -> Option<&'static str> {
        self.constructor.map(|(signature, _)| signature)
    }

    /// Runs the zero-argument constructor. `None` when the type has none.
    pub fn instantiate(&self) -> Option<Result<T>> {
        self.constructor.map(|(_, construct)| construct())
    }
}

impl<T> fmt::Debug for TypeDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("properties", &self.properties.len())
            .field("fields", &self.fields.len())
            .field("methods", &self.methods.len())
            .field("constructor", &self.constructor_signature())
            .finish()
    }
}

/// Types that publish a static descriptor.
pub trait Describe: Sized + 'static {
    fn descriptor() -> &'static TypeDescriptor<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: ResolvedType = ResolvedType {
        name: "HashMap",
        generics: &[ResolvedType::simple("String"), ResolvedType::simple("u32")],
    };

    #[test]
    fn test_resolved_type_display() {
        assert_eq!(ResolvedType::simple("u8").to_string(), "u8");
        assert_eq!(MAP.to_string(), "HashMap<String, u32>");

        let nested = ResolvedType {
            name: "Vec",
            generics: &[MAP],
        };
        assert_eq!(nested.to_string(), "Vec<HashMap<String, u32>>");
        assert_eq!(nested.generic(0), Some(&MAP));
        assert!(nested.generic(1).is_none());
    }

    #[test]
    fn test_field_display() {
        let field = FieldDescriptor {
            owner: "Thing",
            name: "count",
            visibility: Visibility::Public,
            ty: ResolvedType::simple("usize"),
        };
        assert_eq!(field.to_string(), "pub Thing::count: usize");
    }
}
