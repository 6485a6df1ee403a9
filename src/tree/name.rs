use std::{
    fmt::{Display, Formatter, Result},
    hash::{Hash, Hasher},
};

/// The name of an element or attribute, made of a namespace URI and a
/// local name.
///
/// The prefix is only a hint used when writing the name back out, two names
/// with different prefixes bound to the same namespace are equal.
///
/// # Examples
///
/// ```
/// use xmlfill::QualifiedName;
///
/// let a = QualifiedName::new("urn:example", "p").with_prefix("text");
/// let b = QualifiedName::new("urn:example", "p").with_prefix("t");
///
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "text:p");
/// ```
#[derive(Debug, Clone, Eq)]
pub struct QualifiedName {
    namespace: String,
    local: String,
    prefix: Option<String>,
}

impl QualifiedName {
    /// Create a new [`QualifiedName`] without a prefix.
    pub fn new<N, L>(namespace: N, local: L) -> Self
    where
        N: Into<String>,
        L: Into<String>,
    {
        Self {
            namespace: namespace.into(),
            local: local.into(),
            prefix: None,
        }
    }

    /// Create a new [`QualifiedName`] that belongs to no namespace.
    pub fn local<L>(local: L) -> Self
    where
        L: Into<String>,
    {
        Self::new("", local)
    }

    /// Set the prefix used when the name is written out.
    pub fn with_prefix<P>(mut self, prefix: P) -> Self
    where
        P: Into<String>,
    {
        self.prefix = Some(prefix.into());

        self
    }

    /// Return the namespace URI, empty when the name has no namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Return the local part of the name.
    pub fn local_name(&self) -> &str {
        &self.local
    }

    /// Return the prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }
}

impl PartialEq for QualifiedName {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace && self.local == other.local
    }
}

impl Hash for QualifiedName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.namespace.hash(state);
        self.local.hash(state);
    }
}

impl Display for QualifiedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{prefix}:{}", self.local),
            None if self.namespace.is_empty() => write!(f, "{}", self.local),
            None => write!(f, "{{{}}}{}", self.namespace, self.local),
        }
    }
}
