use std::fmt;

/// Java primitive types, including `void`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Void,
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

impl PrimitiveKind {
    /// Look up a primitive by its keyword spelling
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "void" => Some(PrimitiveKind::Void),
            "boolean" => Some(PrimitiveKind::Boolean),
            "byte" => Some(PrimitiveKind::Byte),
            "short" => Some(PrimitiveKind::Short),
            "int" => Some(PrimitiveKind::Int),
            "long" => Some(PrimitiveKind::Long),
            "char" => Some(PrimitiveKind::Char),
            "float" => Some(PrimitiveKind::Float),
            "double" => Some(PrimitiveKind::Double),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            PrimitiveKind::Void => "void",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }
}

/// A fully-qualified class reference, e.g. `java.util.List`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName(String);

impl ClassName {
    /// Take `name` as a fully-qualified class name without checking it exists
    pub fn best_guess(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Join a package and a simple name
    pub fn get(package: &str, simple_name: &str) -> Self {
        if package.is_empty() {
            Self(simple_name.to_string())
        } else {
            Self(format!("{}.{}", package, simple_name))
        }
    }

    pub fn canonical_name(&self) -> &str {
        &self.0
    }

    pub fn simple_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    pub fn package_name(&self) -> &str {
        self.0.rsplit_once('.').map(|(package, _)| package).unwrap_or("")
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resolved type reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeName {
    Primitive(PrimitiveKind),
    ClassRef(ClassName),
    ArrayOf(Box<TypeName>),
    Parameterized(ClassName, Vec<TypeName>),
}

impl TypeName {
    pub fn class(name: impl Into<String>) -> Self {
        TypeName::ClassRef(ClassName::best_guess(name))
    }

    pub fn array_of(component: TypeName) -> Self {
        TypeName::ArrayOf(Box::new(component))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeName::Primitive(_))
    }

    /// The raw class behind this type, if it has one
    pub fn raw_class(&self) -> Option<&ClassName> {
        match self {
            TypeName::ClassRef(class) | TypeName::Parameterized(class, _) => Some(class),
            TypeName::Primitive(_) | TypeName::ArrayOf(_) => None,
        }
    }
}

/// Renders Java source spelling, e.g. `java.util.Map<java.lang.String, int[]>`
impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeName::Primitive(kind) => f.write_str(kind.keyword()),
            TypeName::ClassRef(class) => write!(f, "{}", class),
            TypeName::ArrayOf(component) => write!(f, "{}[]", component),
            TypeName::Parameterized(raw, arguments) => {
                write!(f, "{}<", raw)?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", argument)?;
                }
                f.write_str(">")
            }
        }
    }
}
