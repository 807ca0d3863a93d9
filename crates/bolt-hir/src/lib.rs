//! The syntax tree the checker consumes.
//!
//! Produced by the parser, which lives outside this workspace. Every node lives in an arena and is
//! referred to by index, so later passes attach their results through side tables keyed by those
//! indices instead of writing into the tree.

use la_arena::Arena;
use std::fmt;
use str_util::{Name, SmolStr};

pub use la_arena;

/// All the arenas for one compilation unit.
#[derive(Debug, Default)]
pub struct Arenas {
  /// Declarations and statements.
  pub dec: DecArena,
  /// Expressions.
  pub exp: ExpArena,
  /// Patterns.
  pub pat: PatArena,
  /// Type expressions.
  pub ty: TyArena,
}

macro_rules! mk_idx {
  ( $( $name:ident ),* $(,)? ) => {
    #[doc = "An index into an arena."]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Idx {
      $(
        #[doc = concat!("A [`", stringify!($name), "`].")]
        $name(la_arena::Idx<$name>),
      )*
    }

    $(
      impl From<la_arena::Idx<$name>> for Idx {
        fn from(val: la_arena::Idx<$name>) -> Self {
          Self::$name(val)
        }
      }
    )*
  };
}

mk_idx![Dec, Exp, Pat, Ty];

/// The root of a compilation unit: the top-level declarations of one source file.
pub type Root = [DecIdx];

// declarations //

/// An index to a declaration.
pub type DecIdx = la_arena::Idx<Dec>;
/// An arena of declarations.
pub type DecArena = Arena<Dec>;

/// A declaration or statement.
#[derive(Debug)]
pub enum Dec {
  /// `let pat params : ty = body`
  Let(LetDec),
  /// `struct Name a b { field: ty, .. }`
  Struct(StructDec),
  /// `enum Name a b { Variant ty.., Variant { field: ty }, .. }`
  Enum(EnumDec),
  /// `type Name a b = ty`
  Type(TypeDec),
  /// `mod Name { decs }`
  Module(ModuleDec),
  /// `class Name tys { decs }`
  Class(ClassDec),
  /// `instance Name tys { decs }`
  Instance(InstanceDec),
  /// An expression statement.
  Exp(ExpIdx),
  /// `return` or `return exp`.
  Return(Option<ExpIdx>),
  /// `if test { .. } elif test { .. } else { .. }`
  If(Vec<IfCase>),
}

impl Dec {
  /// Returns the let declaration, if this is one.
  #[must_use]
  pub fn as_let(&self) -> Option<&LetDec> {
    match self {
      Dec::Let(let_dec) => Some(let_dec),
      _ => None,
    }
  }
}

/// A let declaration.
#[derive(Debug)]
pub struct LetDec {
  /// What this binds.
  pub pat: PatIdx,
  /// The parameters, if this defines a function.
  pub params: Vec<PatIdx>,
  /// The type assertion.
  pub ty: Option<TyIdx>,
  /// The definition.
  pub body: Option<Body>,
}

impl LetDec {
  /// Returns the name this binds, if the pattern is a plain name.
  #[must_use]
  pub fn name<'a>(&self, arenas: &'a Arenas) -> Option<&'a Name> {
    match &arenas.pat[self.pat] {
      Pat::Name(name) => Some(name),
      _ => None,
    }
  }

  /// Returns whether this declares a function, as opposed to a variable.
  #[must_use]
  pub fn is_fn_like(&self, arenas: &Arenas) -> bool {
    self.name(arenas).is_some()
      && (!self.params.is_empty() || matches!(self.body, Some(Body::Block(_))))
  }
}

/// The body of a let.
#[derive(Debug)]
pub enum Body {
  /// `= exp`
  Exp(ExpIdx),
  /// An indented block of statements.
  Block(Vec<DecIdx>),
}

/// A struct declaration.
#[derive(Debug)]
pub struct StructDec {
  /// The name.
  pub name: Name,
  /// The type parameters.
  pub ty_vars: Vec<Name>,
  /// The fields.
  pub fields: Vec<(Name, TyIdx)>,
}

/// An enum declaration.
#[derive(Debug)]
pub struct EnumDec {
  /// The name.
  pub name: Name,
  /// The type parameters.
  pub ty_vars: Vec<Name>,
  /// The variants.
  pub variants: Vec<Variant>,
}

/// An enum variant.
#[derive(Debug)]
pub enum Variant {
  /// `Name ty ty ..`
  Tuple(Name, Vec<TyIdx>),
  /// `Name { field: ty, .. }`
  Record(Name, Vec<(Name, TyIdx)>),
}

impl Variant {
  /// Returns the name of the variant.
  #[must_use]
  pub fn name(&self) -> &Name {
    match self {
      Variant::Tuple(name, _) | Variant::Record(name, _) => name,
    }
  }
}

/// A type alias declaration.
#[derive(Debug)]
pub struct TypeDec {
  /// The name.
  pub name: Name,
  /// The type parameters.
  pub ty_vars: Vec<Name>,
  /// The aliased type.
  pub ty: TyIdx,
}

/// A module declaration.
#[derive(Debug)]
pub struct ModuleDec {
  /// The name.
  pub name: Name,
  /// The contents.
  pub decs: Vec<DecIdx>,
}

/// A class declaration.
#[derive(Debug)]
pub struct ClassDec {
  /// The name.
  pub name: Name,
  /// The types the class is over.
  pub tys: Vec<TyIdx>,
  /// Superclass constraints.
  pub constraints: Vec<ClassConstraint>,
  /// The method declarations.
  pub decs: Vec<DecIdx>,
}

/// An instance declaration.
#[derive(Debug)]
pub struct InstanceDec {
  /// The name of the class being instantiated.
  pub name: Name,
  /// The types the instance is for.
  pub tys: Vec<TyIdx>,
  /// Context constraints.
  pub constraints: Vec<ClassConstraint>,
  /// The method definitions.
  pub decs: Vec<DecIdx>,
}

/// A constraint like `Eq a`.
#[derive(Debug)]
pub struct ClassConstraint {
  /// The class name.
  pub name: Name,
  /// The type arguments.
  pub tys: Vec<TyIdx>,
}

/// One case of an if statement.
#[derive(Debug)]
pub struct IfCase {
  /// The test. `None` for the trailing `else`.
  pub test: Option<ExpIdx>,
  /// The statements.
  pub decs: Vec<DecIdx>,
}

// expressions //

/// An index to an expression.
pub type ExpIdx = la_arena::Idx<Exp>;
/// An arena of expressions.
pub type ExpArena = Arena<Exp>;

/// An expression.
#[derive(Debug)]
pub enum Exp {
  /// A literal.
  Lit(Lit),
  /// A possibly qualified name.
  Path(Path),
  /// `exp.lab.lab`
  Member(ExpIdx, Vec<Lab>),
  /// `exp arg arg`
  Call(ExpIdx, Vec<ExpIdx>),
  /// `Name { lab = exp, .. }` or `{ lab = exp, .. }`.
  Record(Option<Path>, Vec<RecordExpRow>),
  /// `(exp, exp, ..)`
  Tuple(Vec<ExpIdx>),
  /// `match exp { pat -> exp, .. }`. Without the scrutinee, this is a function.
  Match(Option<ExpIdx>, Vec<Arm>),
  /// `exp op exp`
  Infix(ExpIdx, Name, ExpIdx),
}

/// A row in a record expression.
#[derive(Debug)]
pub enum RecordExpRow {
  /// `lab = exp`
  Field(Lab, ExpIdx),
  /// `name`, short for `name = name`.
  Punned(Name),
}

/// A match arm.
#[derive(Debug)]
pub struct Arm {
  /// The pattern.
  pub pat: PatIdx,
  /// The result.
  pub exp: ExpIdx,
}

// patterns //

/// An index to a pattern.
pub type PatIdx = la_arena::Idx<Pat>;
/// An arena of patterns.
pub type PatArena = Arena<Pat>;

/// A pattern.
#[derive(Debug)]
pub enum Pat {
  /// Binds a name.
  Name(Name),
  /// A literal.
  Lit(Lit),
  /// `Con pat pat ..`
  Con(Path, Vec<PatIdx>),
  /// `{ lab = pat, name, .. }`
  Record(Vec<RecordPatRow>),
  /// `pat | pat`
  Or(PatIdx, PatIdx),
}

/// A row in a record pattern.
#[derive(Debug)]
pub enum RecordPatRow {
  /// `lab = pat`
  Field(Lab, PatIdx),
  /// `name`, short for `name = name`.
  Punned(Name),
  /// `..` or `.. = pat`, matching the rest of the fields.
  Rest(Option<PatIdx>),
}

// types //

/// An index to a type expression.
pub type TyIdx = la_arena::Idx<Ty>;
/// An arena of type expressions.
pub type TyArena = Arena<Ty>;

/// A type expression.
#[derive(Debug)]
pub enum Ty {
  /// A possibly qualified type name.
  Path(Path),
  /// A type variable, like `a`.
  Var(Name),
  /// `ty arg arg ..`
  App(TyIdx, Vec<TyIdx>),
  /// `ty -> ty -> ty`, with all but the last as parameters.
  Arrow(Vec<TyIdx>, TyIdx),
  /// `(ty, ty, ..)`
  Tuple(Vec<TyIdx>),
  /// `forall a b. ty`
  Forall(Vec<Name>, TyIdx),
  /// `Eq a => ty`
  WithConstraints(Vec<ClassConstraint>, TyIdx),
}

// leaves //

/// A record label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lab {
  /// A named field.
  Name(Name),
  /// A positional field.
  Num(usize),
}

impl fmt::Display for Lab {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Name(name) => name.fmt(f),
      Self::Num(n) => n.fmt(f),
    }
  }
}

/// A literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lit {
  /// An integer.
  Int(i64),
  /// A string.
  String(SmolStr),
}

/// A possibly qualified name, like `A.B.x`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
  prefix: Vec<Name>,
  last: Name,
}

impl Path {
  /// Returns a new Path.
  pub fn new<I>(prefix: I, last: Name) -> Self
  where
    I: IntoIterator<Item = Name>,
  {
    Self { prefix: prefix.into_iter().collect(), last }
  }

  /// Returns a new Path with the last name in the vec as the last component. Returns None if the
  /// vec is empty.
  #[must_use]
  pub fn try_new(mut names: Vec<Name>) -> Option<Self> {
    let last = names.pop()?;
    Some(Self::new(names, last))
  }

  /// Returns a Path with no module prefix.
  #[must_use]
  pub fn one(name: Name) -> Self {
    Self::new(Vec::new(), name)
  }

  /// Returns the last name.
  ///
  /// For `A.B.x` this would return `x`.
  #[must_use]
  pub fn last(&self) -> &Name {
    &self.last
  }

  /// Returns the module prefix.
  ///
  /// For `A.B.x` this would return `[A, B]`.
  #[must_use]
  pub fn prefix(&self) -> &[Name] {
    &self.prefix
  }
}

impl fmt::Display for Path {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for name in &self.prefix {
      name.fmt(f)?;
      f.write_str(".")?;
    }
    self.last.fmt(f)
  }
}
