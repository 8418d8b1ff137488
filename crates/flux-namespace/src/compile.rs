//! Compilation of namespaces into constants and creators
//!
//! [`compile`] walks a [`Namespace`] depth-first in declaration order and
//! produces a [`CompiledNamespace`]: a flat [`ConstantTable`] plus a
//! [`CreatorGroup`] tree with the same shape as the declaration.

use crate::action::{ActionCreator, ActionType, AsyncCreators, AsyncPhase};
use crate::config::NamingConvention;
use crate::fingerprint::Fingerprint;
use crate::namespace::{ActionKind, Member, Namespace, NamespaceError};
use crate::path::{normalize_segment, ActionPath};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

/// Where a compiled constant came from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstantInfo {
    /// Declared path, root namespace first
    pub path: ActionPath,
    /// Async phase, `None` for sync actions
    pub phase: Option<AsyncPhase>,
}

impl Display for ConstantInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.phase {
            Some(phase) => write!(f, "{} ({phase})", self.path),
            None => write!(f, "{}", self.path),
        }
    }
}

/// Flat mapping from compiled constant to its declaration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstantTable {
    entries: IndexMap<ActionType, ConstantInfo>,
}

impl ConstantTable {
    /// Number of constants
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no constants were compiled
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if a constant was compiled
    #[inline]
    #[must_use]
    pub fn contains(&self, constant: &str) -> bool {
        self.entries.contains_key(constant)
    }

    /// Declaration behind a constant
    #[inline]
    #[must_use]
    pub fn get(&self, constant: &str) -> Option<&ConstantInfo> {
        self.entries.get(constant)
    }

    /// Constants compiled from a dotted declaration path
    ///
    /// One constant for a sync action, three for an async one.
    #[must_use]
    pub fn for_path(&self, path: &str) -> Vec<&ActionType> {
        self.entries
            .iter()
            .filter(|(_, info)| info.path.to_string() == path)
            .map(|(constant, _)| constant)
            .collect()
    }

    /// Constants in compilation order
    pub fn action_types(&self) -> impl Iterator<Item = &ActionType> {
        self.entries.keys()
    }

    /// Constant/declaration pairs in compilation order
    pub fn iter(&self) -> impl Iterator<Item = (&ActionType, &ConstantInfo)> {
        self.entries.iter()
    }

    fn insert(&mut self, constant: ActionType, info: ConstantInfo) -> Result<(), NamespaceError> {
        if let Some(existing) = self.entries.get(&constant) {
            return Err(NamespaceError::ConstantClash {
                constant: constant.to_string(),
                first: existing.to_string(),
                second: info.to_string(),
            });
        }
        self.entries.insert(constant, info);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ConstantTable {
    type Item = (&'a ActionType, &'a ConstantInfo);
    type IntoIter = indexmap::map::Iter<'a, ActionType, ConstantInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Node of the creator tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreatorNode {
    /// Synchronous action creator
    Sync(ActionCreator),
    /// Pending/success/failure creators
    Async(AsyncCreators),
    /// Nested namespace
    Group(CreatorGroup),
}

impl CreatorNode {
    /// Sync creator, if this is one
    #[inline]
    #[must_use]
    pub fn as_sync(&self) -> Option<&ActionCreator> {
        match self {
            Self::Sync(creator) => Some(creator),
            _ => None,
        }
    }

    /// Async creators, if this is one
    #[inline]
    #[must_use]
    pub fn as_async(&self) -> Option<&AsyncCreators> {
        match self {
            Self::Async(creators) => Some(creators),
            _ => None,
        }
    }

    /// Nested group, if this is one
    #[inline]
    #[must_use]
    pub fn as_group(&self) -> Option<&CreatorGroup> {
        match self {
            Self::Group(group) => Some(group),
            _ => None,
        }
    }
}

/// Creator tree for one namespace
///
/// Members are keyed by their declared local name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatorGroup {
    name: String,
    path: ActionPath,
    members: IndexMap<String, CreatorNode>,
}

impl CreatorGroup {
    fn new(name: &str, path: ActionPath) -> Self {
        Self {
            name: name.to_string(),
            path,
            members: IndexMap::new(),
        }
    }

    /// Namespace name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of this namespace from the root
    #[inline]
    #[must_use]
    pub fn path(&self) -> &ActionPath {
        &self.path
    }

    /// Member by local name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CreatorNode> {
        self.members.get(name)
    }

    /// Sync creator by local name
    #[must_use]
    pub fn sync(&self, name: &str) -> Option<&ActionCreator> {
        self.get(name).and_then(CreatorNode::as_sync)
    }

    /// Async creators by local name
    #[must_use]
    pub fn async_action(&self, name: &str) -> Option<&AsyncCreators> {
        self.get(name).and_then(CreatorNode::as_async)
    }

    /// Child group by name
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&CreatorGroup> {
        self.get(name).and_then(CreatorNode::as_group)
    }

    /// Member by dotted path relative to this group, e.g. `Shops.sync`
    #[must_use]
    pub fn resolve(&self, dotted: &str) -> Option<&CreatorNode> {
        let mut segments = dotted.split('.');
        let mut node = self.get(segments.next()?)?;
        for segment in segments {
            node = node.as_group()?.get(segment)?;
        }
        Some(node)
    }

    /// Number of direct members
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when the group has no members
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Direct members in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CreatorNode)> {
        self.members.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Every constant reachable from this group, depth-first
    #[must_use]
    pub fn action_types(&self) -> Vec<&ActionType> {
        let mut out = Vec::new();
        self.collect_types(&mut out);
        out
    }

    fn collect_types<'a>(&'a self, out: &mut Vec<&'a ActionType>) {
        for node in self.members.values() {
            match node {
                CreatorNode::Sync(creator) => out.push(creator.action_type()),
                CreatorNode::Async(creators) => out.extend(creators.action_types()),
                CreatorNode::Group(group) => group.collect_types(out),
            }
        }
    }
}

/// Result of compiling a top-level namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledNamespace {
    name: String,
    constants: ConstantTable,
    creators: CreatorGroup,
    fingerprint: Fingerprint,
}

impl CompiledNamespace {
    /// Top-level namespace name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Flat constant table
    #[inline]
    #[must_use]
    pub fn constants(&self) -> &ConstantTable {
        &self.constants
    }

    /// Creator tree
    #[inline]
    #[must_use]
    pub fn creators(&self) -> &CreatorGroup {
        &self.creators
    }

    /// Fingerprint of the constant table
    #[inline]
    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    /// Take the creator tree
    #[inline]
    #[must_use]
    pub fn into_creators(self) -> CreatorGroup {
        self.creators
    }

    /// Take the constant table
    #[inline]
    #[must_use]
    pub fn into_constants(self) -> ConstantTable {
        self.constants
    }
}

/// Compile a namespace under `convention`
pub(crate) fn compile(
    namespace: &Namespace,
    convention: &NamingConvention,
) -> Result<CompiledNamespace, NamespaceError> {
    convention.validate()?;

    let mut compiler = Compiler {
        convention,
        table: ConstantTable::default(),
    };
    let creators = compiler.walk(namespace, &ActionPath::root())?;
    let fingerprint = Fingerprint::of(&compiler.table);

    tracing::debug!(
        "Compiled namespace {} into {} constants ({})",
        namespace.name(),
        compiler.table.len(),
        fingerprint.short()
    );

    Ok(CompiledNamespace {
        name: namespace.name().to_string(),
        constants: compiler.table,
        creators,
        fingerprint,
    })
}

struct Compiler<'a> {
    convention: &'a NamingConvention,
    table: ConstantTable,
}

impl Compiler<'_> {
    fn walk(
        &mut self,
        namespace: &Namespace,
        parent: &ActionPath,
    ) -> Result<CreatorGroup, NamespaceError> {
        normalize_segment(namespace.name())?;
        let path = parent.child(namespace.name());
        check_siblings(namespace, &path)?;

        let mut group = CreatorGroup::new(namespace.name(), path.clone());
        for member in namespace.members() {
            let node = match member {
                Member::Action(decl) => {
                    let action_path = path.child(decl.local_name());
                    let base = self.convention.constant_for(&action_path)?;
                    match decl.kind() {
                        ActionKind::Sync => {
                            self.table.insert(
                                base.clone(),
                                ConstantInfo {
                                    path: action_path,
                                    phase: None,
                                },
                            )?;
                            CreatorNode::Sync(ActionCreator::new(base))
                        }
                        ActionKind::Async => {
                            let [pending, success, failure] = AsyncPhase::ALL.map(|phase| {
                                self.convention.phase_constant(&base, phase)
                            });
                            for (constant, phase) in
                                [&pending, &success, &failure].into_iter().zip(AsyncPhase::ALL)
                            {
                                self.table.insert(
                                    constant.clone(),
                                    ConstantInfo {
                                        path: action_path.clone(),
                                        phase: Some(phase),
                                    },
                                )?;
                            }
                            CreatorNode::Async(AsyncCreators::new(
                                ActionCreator::new(pending),
                                ActionCreator::new(success),
                                ActionCreator::new(failure),
                            ))
                        }
                    }
                }
                Member::Namespace(child) => CreatorNode::Group(self.walk(child, &path)?),
            };
            group.members.insert(member.name().to_string(), node);
        }

        Ok(group)
    }
}

/// Reject siblings whose names normalize to the same word group
fn check_siblings(namespace: &Namespace, path: &ActionPath) -> Result<(), NamespaceError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for member in namespace.members() {
        let normalized = normalize_segment(member.name())?;
        if let Some(existing) = seen.insert(normalized, member.name()) {
            return Err(NamespaceError::DuplicateAction {
                namespace: path.to_string(),
                name: member.name().to_string(),
                existing: existing.to_string(),
            });
        }
    }
    Ok(())
}
