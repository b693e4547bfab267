//! Word-order constructions and the sheets that collect them

use serde::{Deserialize, Serialize};

/// Word-order construction of the 上来 pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Construction {
    /// Object before the complement: VN上来
    Pre,
    /// Object between the complement parts: V上N来
    Middle,
    /// Object after the complement: V上来N
    Post,
    /// Noun as subject: NV上来
    Subject,
}

impl Construction {
    /// All constructions in report order
    pub const ALL: [Construction; 4] = [
        Construction::Pre,
        Construction::Middle,
        Construction::Post,
        Construction::Subject,
    ];

    /// Label used as the score group; sheet names contain it
    pub fn label(&self) -> &'static str {
        match self {
            Construction::Pre => "VN上来",
            Construction::Middle => "V上N来",
            Construction::Post => "V上来N",
            Construction::Subject => "NV上来",
        }
    }

    /// Whether a record's domain belongs to this construction's group
    pub fn contains_domain(&self, domain: &str) -> bool {
        domain.contains(self.label())
    }
}

impl std::fmt::Display for Construction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One sheet of the source workbook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSpec {
    pub name: String,
    pub construction: Construction,
    /// Whether rows also yield a meaning-equivalence question
    pub with_meaning: bool,
}

impl SheetSpec {
    pub fn new(name: impl Into<String>, construction: Construction, with_meaning: bool) -> Self {
        Self {
            name: name.into(),
            construction,
            with_meaning,
        }
    }
}
