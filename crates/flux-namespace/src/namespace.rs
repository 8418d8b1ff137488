//! Namespace nodes
//!
//! Provides [`Namespace`], the by-value builder feature modules use to
//! declare their actions. Declaring never fails; every check happens in
//! [`Namespace::compile`].

use crate::compile::{self, CompiledNamespace, ConstantTable, CreatorGroup};
use crate::config::{ConfigError, NamingConvention};
use crate::path::PathError;

/// Synchronous or asynchronous action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// One constant
    Sync,
    /// Three constants: pending, success, failure
    Async,
}

/// Action declared in a namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionDecl {
    local_name: String,
    kind: ActionKind,
}

impl ActionDecl {
    /// Declare a synchronous action
    #[inline]
    #[must_use]
    pub fn sync(local_name: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            kind: ActionKind::Sync,
        }
    }

    /// Declare an asynchronous action
    #[inline]
    #[must_use]
    pub fn asynchronous(local_name: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            kind: ActionKind::Async,
        }
    }

    /// Name as declared
    #[inline]
    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Sync or async
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        self.kind
    }
}

/// Something [`Namespace::add`] accepts: an action or a child namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    /// Declared action
    Action(ActionDecl),
    /// Nested namespace
    Namespace(Namespace),
}

impl Member {
    /// Name of the member within its parent
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Action(decl) => decl.local_name(),
            Self::Namespace(ns) => ns.name(),
        }
    }
}

impl From<&str> for Member {
    fn from(local_name: &str) -> Self {
        Self::Action(ActionDecl::sync(local_name))
    }
}

impl From<String> for Member {
    fn from(local_name: String) -> Self {
        Self::Action(ActionDecl::sync(local_name))
    }
}

impl From<ActionDecl> for Member {
    fn from(decl: ActionDecl) -> Self {
        Self::Action(decl)
    }
}

impl From<Namespace> for Member {
    fn from(ns: Namespace) -> Self {
        Self::Namespace(ns)
    }
}

/// Named container of actions and child namespaces
///
/// # Example
/// ```
/// use flux_namespace::Namespace;
///
/// let login = Namespace::new("Login")
///     .add_async("submit")
///     .add_async("createAccount")
///     .add("setState");
///
/// let compiled = login.compile().unwrap();
/// assert_eq!(compiled.constants().len(), 7);
/// assert!(compiled.constants().contains("LOGIN_SUBMIT_PENDING"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    name: String,
    members: Vec<Member>,
}

impl Namespace {
    /// Create empty namespace
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Declare a synchronous action, or attach a child namespace
    #[inline]
    #[must_use]
    pub fn add(mut self, member: impl Into<Member>) -> Self {
        self.members.push(member.into());
        self
    }

    /// Declare an asynchronous action
    #[inline]
    #[must_use]
    pub fn add_async(mut self, local_name: impl Into<String>) -> Self {
        self.members
            .push(Member::Action(ActionDecl::asynchronous(local_name)));
        self
    }

    /// Namespace name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Actions and children in declaration order
    #[inline]
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Own declared actions
    pub fn entries(&self) -> impl Iterator<Item = &ActionDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Action(decl) => Some(decl),
            Member::Namespace(_) => None,
        })
    }

    /// Direct child namespaces
    pub fn children(&self) -> impl Iterator<Item = &Namespace> {
        self.members.iter().filter_map(|m| match m {
            Member::Namespace(ns) => Some(ns),
            Member::Action(_) => None,
        })
    }

    /// Number of declared actions, including children's
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().count() + self.children().map(Namespace::len).sum::<usize>()
    }

    /// True when no actions are declared anywhere below this node
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Compile with the default [`NamingConvention`]
    ///
    /// # Errors
    /// See [`Namespace::compile_with`]
    pub fn compile(&self) -> Result<CompiledNamespace, NamespaceError> {
        self.compile_with(&NamingConvention::default())
    }

    /// Compile into a constant table and a creator tree
    ///
    /// # Errors
    /// - [`NamespaceError::DuplicateAction`] if two siblings share a name
    /// - [`NamespaceError::ConstantClash`] if two paths compile to one constant
    /// - [`NamespaceError::InvalidName`] if a name cannot become a constant
    /// - [`NamespaceError::Config`] if `convention` is invalid
    pub fn compile_with(
        &self,
        convention: &NamingConvention,
    ) -> Result<CompiledNamespace, NamespaceError> {
        compile::compile(self, convention)
    }

    /// Compiled creator tree
    ///
    /// # Errors
    /// See [`Namespace::compile_with`]
    pub fn action_creators(&self) -> Result<CreatorGroup, NamespaceError> {
        self.compile().map(CompiledNamespace::into_creators)
    }

    /// Compiled constant table
    ///
    /// # Errors
    /// See [`Namespace::compile_with`]
    pub fn constants(&self) -> Result<ConstantTable, NamespaceError> {
        self.compile().map(CompiledNamespace::into_constants)
    }
}

/// Namespace compilation errors
#[derive(Debug, thiserror::Error)]
pub enum NamespaceError {
    /// Two siblings normalize to the same name
    #[error(
        "duplicate action '{name}' in namespace '{namespace}' (already declared as '{existing}')"
    )]
    DuplicateAction {
        /// Dotted path of the namespace holding both
        namespace: String,
        /// Name declared second
        name: String,
        /// Name declared first
        existing: String,
    },

    /// Two distinct paths compile to the same constant
    #[error("constant {constant} produced by both '{first}' and '{second}'")]
    ConstantClash {
        /// The constant
        constant: String,
        /// Declaration compiled first
        first: String,
        /// Declaration compiled second
        second: String,
    },

    /// Name cannot become a constant
    #[error("invalid name: {0}")]
    InvalidName(#[from] PathError),

    /// Naming convention is unusable
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_preserves_declaration_order() {
        let ns = Namespace::new("Etsy")
            .add("reset")
            .add(Namespace::new("Shops").add("sync"))
            .add_async("fetch");

        let names: Vec<_> = ns.members().iter().map(Member::name).collect();
        assert_eq!(names, ["reset", "Shops", "fetch"]);
    }

    #[test]
    fn entries_and_children_split_members() {
        let ns = Namespace::new("Etsy")
            .add("reset")
            .add(Namespace::new("Shops").add("sync"))
            .add_async("fetch");

        let entries: Vec<_> = ns.entries().map(|d| (d.local_name(), d.kind())).collect();
        assert_eq!(entries, [("reset", ActionKind::Sync), ("fetch", ActionKind::Async)]);
        assert_eq!(ns.children().count(), 1);
    }

    #[test]
    fn len_counts_nested_actions() {
        let ns = Namespace::new("Etsy")
            .add("reset")
            .add(Namespace::new("Shops").add("sync").add_async("load"));
        assert_eq!(ns.len(), 3);
        assert!(Namespace::new("Empty").is_empty());
    }

    #[test]
    fn duplicate_is_recorded_not_rejected_until_compile() {
        let ns = Namespace::new("Login").add("submit").add("submit");
        assert_eq!(ns.len(), 2);
        assert!(matches!(
            ns.compile(),
            Err(NamespaceError::DuplicateAction { .. })
        ));
    }

    #[test]
    fn member_from_conversions() {
        assert_eq!(Member::from("a"), Member::Action(ActionDecl::sync("a")));
        assert_eq!(
            Member::from(String::from("b")),
            Member::Action(ActionDecl::sync("b"))
        );
        assert_eq!(
            Member::from(ActionDecl::asynchronous("c")).name(),
            "c"
        );
    }
}
