//! Descriptor and signature parsing.
//!
//! Field and method descriptors, generic class/method signatures, formal
//! type parameters, and throws clauses all share one terse textual encoding.
//! This module parses them by recursive descent over the string and can emit
//! the exact encoding back out through `Display`, so a parsed value
//! round-trips to the text it came from.
//!
//! # Example
//! ```
//! use classfile_reader::Signature;
//! let main = Signature::parse("([Ljava/lang/String;)V").expect("valid descriptor");
//! assert_eq!(main.to_string(), "([Ljava/lang/String;)V");
//! ```

use crate::error::ErrorKind;
use crate::structures::class_path::ClassPath;
use nom::bytes::complete::{take_while, take_while1};
use nom::character::complete::char;
use nom::combinator::opt;
use nom::IResult;
use std::fmt::{Display, Formatter, Write};

/// Nesting cap for generics, arrays and inner-class chains. Signatures from
/// untrusted inputs can otherwise drive the descent arbitrarily deep.
const MAX_NESTING: usize = 64;

/// A parsed descriptor or signature part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signature {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
    /// A (possibly parameterised) class type, `Ljava/util/List<TT;>;`.
    Object {
        path: ClassPath,
        type_args: Vec<TypeArgument>,
    },
    /// A dotted inner-class chain, `Ljava/util/Map<TK;TV;>.Entry<TK;TV;>;`.
    /// The first chain link is the outermost class; only it may carry a
    /// package.
    InnerObject {
        package: Vec<String>,
        chain: Vec<SimpleClassType>,
    },
    /// An array type. `size` is populated only by the non-standard
    /// `[<digits>` dialect found in some annotation serialisations.
    Array {
        element: Box<Signature>,
        size: Option<i32>,
    },
    /// A method type, `(args)ret`. A `None` return is `void`.
    Method {
        args: Vec<Signature>,
        ret: Option<Box<Signature>>,
    },
    /// A reference to a formal type parameter, `TT;`.
    TypeVariable(String),
}

/// One link of an inner-class chain: a simple name plus its type arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleClassType {
    pub name: String,
    pub type_args: Vec<TypeArgument>,
}

/// Wildcard marker on a type argument.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Wildcard {
    /// No wildcard, the argument is the type itself.
    None,
    /// `+X`, `? extends X`.
    Extends,
    /// `-X`, `? super X`.
    Super,
}

/// A single type argument inside a `<...>` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeArgument {
    /// `*`, an unbounded `?`.
    Any,
    Typed(Wildcard, Signature),
}

/// A declared type parameter, `<T:Bound:IfaceBound...>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormalTypeParameter {
    pub name: String,
    pub class_bound: Option<Signature>,
    pub interface_bounds: Vec<Signature>,
}

/// A complete generic method signature: formal type parameters, the method
/// type itself, and declared thrown types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub type_params: Vec<FormalTypeParameter>,
    /// Always the [`Signature::Method`] variant.
    pub signature: Signature,
    pub throws: Vec<Signature>,
}

/// A complete generic class signature: formal type parameters, the super
/// class, and implemented interfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSignature {
    pub type_params: Vec<FormalTypeParameter>,
    pub super_class: Signature,
    pub interfaces: Vec<Signature>,
}

impl Signature {
    /// Parses a single descriptor or signature part, requiring the entire
    /// string to be consumed.
    pub fn parse(descriptor: &str) -> Result<Self, ErrorKind> {
        finish(descriptor, parse_type(descriptor, 0))
    }

    /// Like [`parse`](Self::parse), but the result must be a method type.
    pub fn parse_method(descriptor: &str) -> Result<Self, ErrorKind> {
        let parsed = Self::parse(descriptor)?;
        if matches!(parsed, Signature::Method { .. }) {
            Ok(parsed)
        } else {
            Err(ErrorKind::InvalidSignature(descriptor.to_string()))
        }
    }

    /// The implicit `java/lang/Object` super type.
    pub fn java_lang_object() -> Self {
        Self::class_reference(ClassPath::java_lang_object())
    }

    /// Wraps a class path as a plain, unparameterised object type.
    pub fn class_reference(path: ClassPath) -> Self {
        Signature::Object {
            path,
            type_args: Vec::new(),
        }
    }
}

impl MethodSignature {
    /// Parses a complete method signature, formal type parameters and
    /// throws clause included.
    pub fn parse(signature: &str) -> Result<Self, ErrorKind> {
        finish(signature, parse_method_signature(signature))
    }
}

impl ClassSignature {
    /// Parses a complete class signature: formal type parameters, the super
    /// class, then interfaces until the string ends.
    pub fn parse(signature: &str) -> Result<Self, ErrorKind> {
        finish(signature, parse_class_signature(signature))
    }
}

// ---- parsers -------------------------------------------------------------

#[derive(Debug)]
struct SignatureError<'a> {
    #[allow(dead_code)]
    input: &'a str,
    reason: Option<Reason>,
}

#[derive(Debug)]
enum Reason {
    InnerPackage,
    TooDeep,
}

impl<'a> SignatureError<'a> {
    fn plain(input: &'a str) -> Self {
        Self {
            input,
            reason: None,
        }
    }
}

impl<'a> nom::error::ParseError<&'a str> for SignatureError<'a> {
    fn from_error_kind(input: &'a str, _kind: nom::error::ErrorKind) -> Self {
        Self::plain(input)
    }

    fn append(_input: &'a str, _kind: nom::error::ErrorKind, other: Self) -> Self {
        other
    }
}

type SigResult<'a, T> = IResult<&'a str, T, SignatureError<'a>>;

fn inner_with_package<T>(input: &str) -> SigResult<'_, T> {
    Err(nom::Err::Failure(SignatureError {
        input,
        reason: Some(Reason::InnerPackage),
    }))
}

fn too_deep<T>(input: &str) -> SigResult<'_, T> {
    Err(nom::Err::Failure(SignatureError {
        input,
        reason: Some(Reason::TooDeep),
    }))
}

fn finish<T>(source: &str, result: SigResult<'_, T>) -> Result<T, ErrorKind> {
    match result {
        Ok(("", value)) => Ok(value),
        Ok((_rest, _)) => Err(ErrorKind::InvalidSignature(source.to_string())),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(match e.reason {
            Some(Reason::InnerPackage) => ErrorKind::InnerClassWithPackage(source.to_string()),
            Some(Reason::TooDeep) => ErrorKind::SignatureTooDeep(source.to_string()),
            None => ErrorKind::InvalidSignature(source.to_string()),
        }),
        Err(nom::Err::Incomplete(_)) => Err(ErrorKind::InvalidSignature(source.to_string())),
    }
}

/// An identifier runs until one of the characters the grammar reserves.
fn identifier(input: &str) -> SigResult<'_, &str> {
    take_while1(|c: char| !".;[/<>:".contains(c))(input)
}

/// Parses one descriptor/signature part.
fn parse_type(input: &str, depth: usize) -> SigResult<'_, Signature> {
    if depth > MAX_NESTING {
        return too_deep(input);
    }
    match input.chars().next() {
        Some('B') => Ok((&input[1..], Signature::Byte)),
        Some('C') => Ok((&input[1..], Signature::Char)),
        Some('D') => Ok((&input[1..], Signature::Double)),
        Some('F') => Ok((&input[1..], Signature::Float)),
        Some('I') => Ok((&input[1..], Signature::Int)),
        Some('J') => Ok((&input[1..], Signature::Long)),
        Some('S') => Ok((&input[1..], Signature::Short)),
        Some('Z') => Ok((&input[1..], Signature::Boolean)),
        Some('L') => parse_object_type(input, depth),
        Some('[') => parse_array_type(input, depth),
        Some('T') => parse_type_variable(input),
        Some('(') => parse_method_type(input, depth),
        _ => Err(nom::Err::Error(SignatureError::plain(input))),
    }
}

fn parse_object_type(input: &str, depth: usize) -> SigResult<'_, Signature> {
    let (rest, _) = char('L')(input)?;
    let mut package = Vec::new();
    let (mut rest, mut name) = identifier(rest)?;
    while let Some(after) = rest.strip_prefix('/') {
        package.push(name.to_string());
        let (r, segment) = identifier(after)?;
        rest = r;
        name = segment;
    }
    let (mut rest, type_args) = type_arguments(rest, depth)?;

    let mut chain = Vec::new();
    while let Some(after) = rest.strip_prefix('.') {
        let (r, inner_name) = identifier(after)?;
        if r.starts_with('/') {
            return inner_with_package(r);
        }
        let (r, inner_args) = type_arguments(r, depth)?;
        chain.push(SimpleClassType {
            name: inner_name.to_string(),
            type_args: inner_args,
        });
        rest = r;
    }
    let (rest, _) = char(';')(rest)?;

    if chain.is_empty() {
        Ok((
            rest,
            Signature::Object {
                path: ClassPath::new(package, name),
                type_args,
            },
        ))
    } else {
        chain.insert(
            0,
            SimpleClassType {
                name: name.to_string(),
                type_args,
            },
        );
        Ok((rest, Signature::InnerObject { package, chain }))
    }
}

/// Parses an optional `<...>` block; absent means no arguments.
fn type_arguments(input: &str, depth: usize) -> SigResult<'_, Vec<TypeArgument>> {
    let Some(mut rest) = input.strip_prefix('<') else {
        return Ok((input, Vec::new()));
    };
    let mut args = Vec::new();
    loop {
        if let Some(after) = rest.strip_prefix('>') {
            if args.is_empty() {
                return Err(nom::Err::Error(SignatureError::plain(rest)));
            }
            return Ok((after, args));
        }
        let (r, arg) = parse_type_argument(rest, depth + 1)?;
        args.push(arg);
        rest = r;
    }
}

fn parse_type_argument(input: &str, depth: usize) -> SigResult<'_, TypeArgument> {
    if let Some(rest) = input.strip_prefix('*') {
        return Ok((rest, TypeArgument::Any));
    }
    if let Some(rest) = input.strip_prefix('+') {
        let (rest, sig) = parse_type(rest, depth)?;
        return Ok((rest, TypeArgument::Typed(Wildcard::Extends, sig)));
    }
    if let Some(rest) = input.strip_prefix('-') {
        let (rest, sig) = parse_type(rest, depth)?;
        return Ok((rest, TypeArgument::Typed(Wildcard::Super, sig)));
    }
    let (rest, sig) = parse_type(input, depth)?;
    Ok((rest, TypeArgument::Typed(Wildcard::None, sig)))
}

fn parse_array_type(input: &str, depth: usize) -> SigResult<'_, Signature> {
    let (rest, _) = char('[')(input)?;
    let (rest, digits) = take_while(|c: char| c.is_ascii_digit())(rest)?;
    let size = if digits.is_empty() {
        None
    } else {
        match digits.parse::<i32>() {
            Ok(size) => Some(size),
            Err(_) => return Err(nom::Err::Failure(SignatureError::plain(rest))),
        }
    };
    let (rest, element) = parse_type(rest, depth + 1)?;
    Ok((
        rest,
        Signature::Array {
            element: Box::new(element),
            size,
        },
    ))
}

fn parse_type_variable(input: &str) -> SigResult<'_, Signature> {
    let (rest, _) = char('T')(input)?;
    let (rest, name) = identifier(rest)?;
    let (rest, _) = char(';')(rest)?;
    Ok((rest, Signature::TypeVariable(name.to_string())))
}

fn parse_method_type(input: &str, depth: usize) -> SigResult<'_, Signature> {
    let (mut rest, _) = char('(')(input)?;
    let mut args = Vec::new();
    let rest = loop {
        if let Some(after) = rest.strip_prefix(')') {
            break after;
        }
        let (r, arg) = parse_type(rest, depth + 1)?;
        args.push(arg);
        rest = r;
    };
    let (rest, ret) = parse_return_type(rest, depth)?;
    Ok((rest, Signature::Method { args, ret }))
}

fn parse_return_type(input: &str, depth: usize) -> SigResult<'_, Option<Box<Signature>>> {
    if let Some(rest) = input.strip_prefix('V') {
        return Ok((rest, None));
    }
    let (rest, sig) = parse_type(input, depth + 1)?;
    Ok((rest, Some(Box::new(sig))))
}

/// Parses an optional `<P:Bound...>` formal type parameter block.
fn formal_type_parameters(input: &str) -> SigResult<'_, Vec<FormalTypeParameter>> {
    let Some(mut rest) = input.strip_prefix('<') else {
        return Ok((input, Vec::new()));
    };
    let mut params = Vec::new();
    loop {
        if let Some(after) = rest.strip_prefix('>') {
            if params.is_empty() {
                return Err(nom::Err::Error(SignatureError::plain(rest)));
            }
            return Ok((after, params));
        }
        let (r, name) = identifier(rest)?;
        let (r, _) = char(':')(r)?;
        // a leading `::` omits the class bound and goes straight to
        // interface bounds
        let (r, class_bound) = opt(|i| parse_type(i, 1))(r)?;
        let mut interface_bounds = Vec::new();
        let mut r = r;
        while let Some(after) = r.strip_prefix(':') {
            let (r2, bound) = parse_type(after, 1)?;
            interface_bounds.push(bound);
            r = r2;
        }
        params.push(FormalTypeParameter {
            name: name.to_string(),
            class_bound,
            interface_bounds,
        });
        rest = r;
    }
}

/// Parses a `^Type^Type...` throws tail.
fn throws_clause(input: &str) -> SigResult<'_, Vec<Signature>> {
    let mut rest = input;
    let mut throws = Vec::new();
    while let Some(after) = rest.strip_prefix('^') {
        let (r, thrown) = parse_type(after, 1)?;
        throws.push(thrown);
        rest = r;
    }
    Ok((rest, throws))
}

fn parse_method_signature(input: &str) -> SigResult<'_, MethodSignature> {
    let (rest, type_params) = formal_type_parameters(input)?;
    let (rest, signature) = parse_method_type(rest, 0)?;
    let (rest, throws) = throws_clause(rest)?;
    Ok((
        rest,
        MethodSignature {
            type_params,
            signature,
            throws,
        },
    ))
}

fn parse_class_signature(input: &str) -> SigResult<'_, ClassSignature> {
    let (rest, type_params) = formal_type_parameters(input)?;
    let (mut rest, super_class) = parse_type(rest, 0)?;
    let mut interfaces = Vec::new();
    while !rest.is_empty() {
        let (r, interface) = parse_type(rest, 0)?;
        interfaces.push(interface);
        rest = r;
    }
    Ok((
        rest,
        ClassSignature {
            type_params,
            super_class,
            interfaces,
        },
    ))
}

// ---- serialisation -------------------------------------------------------

fn write_type_args(f: &mut Formatter<'_>, args: &[TypeArgument]) -> std::fmt::Result {
    if args.is_empty() {
        return Ok(());
    }
    f.write_char('<')?;
    for arg in args {
        arg.fmt(f)?;
    }
    f.write_char('>')
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Signature::Byte => f.write_char('B'),
            Signature::Char => f.write_char('C'),
            Signature::Double => f.write_char('D'),
            Signature::Float => f.write_char('F'),
            Signature::Int => f.write_char('I'),
            Signature::Long => f.write_char('J'),
            Signature::Short => f.write_char('S'),
            Signature::Boolean => f.write_char('Z'),
            Signature::Object { path, type_args } => {
                write!(f, "L{}", path)?;
                write_type_args(f, type_args)?;
                f.write_char(';')
            }
            Signature::InnerObject { package, chain } => {
                f.write_char('L')?;
                for segment in package {
                    write!(f, "{}/", segment)?;
                }
                for (position, link) in chain.iter().enumerate() {
                    if position > 0 {
                        f.write_char('.')?;
                    }
                    link.fmt(f)?;
                }
                f.write_char(';')
            }
            Signature::Array { element, size } => {
                f.write_char('[')?;
                if let Some(size) = size {
                    write!(f, "{}", size)?;
                }
                element.fmt(f)
            }
            Signature::Method { args, ret } => {
                f.write_char('(')?;
                for arg in args {
                    arg.fmt(f)?;
                }
                f.write_char(')')?;
                match ret {
                    Some(ret) => ret.fmt(f),
                    None => f.write_char('V'),
                }
            }
            Signature::TypeVariable(name) => write!(f, "T{};", name),
        }
    }
}

impl Display for SimpleClassType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)?;
        write_type_args(f, &self.type_args)
    }
}

impl Display for TypeArgument {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeArgument::Any => f.write_char('*'),
            TypeArgument::Typed(Wildcard::None, sig) => sig.fmt(f),
            TypeArgument::Typed(Wildcard::Extends, sig) => {
                f.write_char('+')?;
                sig.fmt(f)
            }
            TypeArgument::Typed(Wildcard::Super, sig) => {
                f.write_char('-')?;
                sig.fmt(f)
            }
        }
    }
}

impl Display for FormalTypeParameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)?;
        f.write_char(':')?;
        if let Some(bound) = &self.class_bound {
            bound.fmt(f)?;
        }
        for bound in &self.interface_bounds {
            f.write_char(':')?;
            bound.fmt(f)?;
        }
        Ok(())
    }
}

fn write_formal_params(f: &mut Formatter<'_>, params: &[FormalTypeParameter]) -> std::fmt::Result {
    if params.is_empty() {
        return Ok(());
    }
    f.write_char('<')?;
    for param in params {
        param.fmt(f)?;
    }
    f.write_char('>')
}

impl Display for MethodSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_formal_params(f, &self.type_params)?;
        self.signature.fmt(f)?;
        for thrown in &self.throws {
            f.write_char('^')?;
            thrown.fmt(f)?;
        }
        Ok(())
    }
}

impl Display for ClassSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_formal_params(f, &self.type_params)?;
        self.super_class.fmt(f)?;
        for interface in &self.interfaces {
            interface.fmt(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(path: &str) -> Signature {
        Signature::class_reference(ClassPath::from_internal_name(path))
    }

    fn type_var(name: &str) -> TypeArgument {
        TypeArgument::Typed(Wildcard::None, Signature::TypeVariable(name.to_string()))
    }

    #[test]
    fn parse_primitives() {
        assert_eq!(Signature::parse("I").unwrap(), Signature::Int);
        assert_eq!(Signature::parse("Z").unwrap(), Signature::Boolean);
        assert_eq!(Signature::parse("J").unwrap(), Signature::Long);
    }

    #[test]
    fn parse_method_descriptor() {
        let parsed = Signature::parse("(Ljava/lang/String;[I)V").unwrap();
        assert_eq!(
            parsed,
            Signature::Method {
                args: vec![
                    object("java/lang/String"),
                    Signature::Array {
                        element: Box::new(Signature::Int),
                        size: None,
                    },
                ],
                ret: None,
            }
        );
    }

    #[test]
    fn parse_generic_inner_chain() {
        let parsed = Signature::parse("Ljava/util/Map<TK;TV;>.Entry<TK;TV;>;").unwrap();
        assert_eq!(
            parsed,
            Signature::InnerObject {
                package: vec!["java".to_string(), "util".to_string()],
                chain: vec![
                    SimpleClassType {
                        name: "Map".to_string(),
                        type_args: vec![type_var("K"), type_var("V")],
                    },
                    SimpleClassType {
                        name: "Entry".to_string(),
                        type_args: vec![type_var("K"), type_var("V")],
                    },
                ],
            }
        );
    }

    #[test]
    fn parse_wildcards() {
        let parsed = Signature::parse("Ljava/util/function/Consumer<-TE;>;").unwrap();
        let Signature::Object { type_args, .. } = parsed else {
            panic!("expected an object type");
        };
        assert_eq!(
            type_args,
            vec![TypeArgument::Typed(
                Wildcard::Super,
                Signature::TypeVariable("E".to_string()),
            )]
        );
        let parsed = Signature::parse("Ljava/lang/Class<*>;").unwrap();
        let Signature::Object { type_args, .. } = parsed else {
            panic!("expected an object type");
        };
        assert_eq!(type_args, vec![TypeArgument::Any]);
    }

    #[test]
    fn parse_sized_array() {
        let parsed = Signature::parse("[3I").unwrap();
        assert_eq!(
            parsed,
            Signature::Array {
                element: Box::new(Signature::Int),
                size: Some(3),
            }
        );
        assert_eq!(parsed.to_string(), "[3I");
    }

    #[test]
    fn parse_complete_method_signature() {
        let parsed =
            MethodSignature::parse("<T:Ljava/lang/Object;>(TT;)V^Ljava/io/IOException;^TX;")
                .unwrap();
        assert_eq!(parsed.type_params.len(), 1);
        assert_eq!(parsed.type_params[0].name, "T");
        assert_eq!(
            parsed.type_params[0].class_bound,
            Some(object("java/lang/Object"))
        );
        assert!(parsed.type_params[0].interface_bounds.is_empty());
        assert_eq!(
            parsed.signature,
            Signature::Method {
                args: vec![Signature::TypeVariable("T".to_string())],
                ret: None,
            }
        );
        assert_eq!(
            parsed.throws,
            vec![
                object("java/io/IOException"),
                Signature::TypeVariable("X".to_string()),
            ]
        );
    }

    #[test]
    fn omitted_class_bound() {
        let parsed = ClassSignature::parse(
            "<T::Ljava/io/Serializable;:Ljava/lang/Comparable<TT;>;>Ljava/lang/Object;",
        )
        .unwrap();
        assert_eq!(parsed.type_params.len(), 1);
        let param = &parsed.type_params[0];
        assert_eq!(param.name, "T");
        assert_eq!(param.class_bound, None);
        assert_eq!(param.interface_bounds.len(), 2);
        assert_eq!(parsed.super_class, object("java/lang/Object"));
        assert!(parsed.interfaces.is_empty());
    }

    #[test]
    fn class_signature_with_interfaces() {
        let parsed = ClassSignature::parse(
            "Ljava/lang/Object;Ljava/util/Map<Ljava/lang/String;Ljava/util/List<Ljava/lang/String;>;>;",
        )
        .unwrap();
        assert_eq!(parsed.super_class, object("java/lang/Object"));
        assert_eq!(parsed.interfaces.len(), 1);
    }

    #[test]
    fn round_trips_exactly() {
        for text in [
            "I",
            "[[Z",
            "Ljava/lang/Object;",
            "(Ljava/lang/String;[I)V",
            "([BII)Ljava/lang/String;",
            "Ljava/util/Map<TK;TV;>.Entry<TK;TV;>;",
            "Ljava/util/function/Consumer<-TE;>;",
            "Ljava/lang/Class<+Ljava/lang/Number;>;",
            "TT;",
        ] {
            let parsed = Signature::parse(text).unwrap();
            assert_eq!(parsed.to_string(), text);
            assert_eq!(Signature::parse(&parsed.to_string()).unwrap(), parsed);
        }
        for text in [
            "<T:Ljava/lang/Object;>(TT;)V",
            "(Ljava/util/function/Consumer<-TE;>;)V^Ljava/io/IOException;",
            "<D:Ljava/lang/Object;N::Ljava/lang/Comparable<TN;>;>(TD;TN;)TD;",
        ] {
            let parsed = MethodSignature::parse(text).unwrap();
            assert_eq!(parsed.to_string(), text);
        }
        for text in [
            "<T::Ljava/io/Serializable;:Ljava/lang/Comparable<TT;>;>Ljava/lang/Object;",
            "Ljava/lang/Enum<Lcom/google/common/base/CaseFormat;>;",
        ] {
            let parsed = ClassSignature::parse(text).unwrap();
            assert_eq!(parsed.to_string(), text);
        }
    }

    #[test]
    fn rejects_trailing_and_truncated_input() {
        assert!(matches!(
            Signature::parse("II"),
            Err(ErrorKind::InvalidSignature(_))
        ));
        assert!(matches!(
            Signature::parse("Ljava/lang/Object"),
            Err(ErrorKind::InvalidSignature(_))
        ));
        assert!(matches!(
            Signature::parse(""),
            Err(ErrorKind::InvalidSignature(_))
        ));
    }

    #[test]
    fn rejects_package_on_inner_class() {
        assert!(matches!(
            Signature::parse("Ljava/util/Map.inner/Bad;"),
            Err(ErrorKind::InnerClassWithPackage(_))
        ));
    }

    #[test]
    fn caps_nesting_depth() {
        let pathological = format!("{}I", "[".repeat(200));
        assert!(matches!(
            Signature::parse(&pathological),
            Err(ErrorKind::SignatureTooDeep(_))
        ));
    }

    #[test]
    fn method_descriptor_must_be_a_method() {
        assert!(matches!(
            Signature::parse_method("I"),
            Err(ErrorKind::InvalidSignature(_))
        ));
        assert!(Signature::parse_method("()V").is_ok());
    }
}
