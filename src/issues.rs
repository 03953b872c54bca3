//! Issue types for migration runs.
//!
//! Every non-fatal condition met while classifying or migrating resources is
//! recorded as an issue. Issues are accumulated for the whole run and only
//! surfaced at the end, through the terminal summary, the log file and the
//! report files.

use enum_dispatch::enum_dispatch;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    ResourceNotFound,
    UnresolvedReferencePath,
    DestinationConflict,
    EncodingMismatch,
    DuplicateResourceUsage,
    FragmentedLocale,
    InventoryCollision,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::ResourceNotFound => write!(f, "resource-not-found"),
            Rule::UnresolvedReferencePath => write!(f, "unresolved-path"),
            Rule::DestinationConflict => write!(f, "destination-conflict"),
            Rule::EncodingMismatch => write!(f, "encoding-mismatch"),
            Rule::DuplicateResourceUsage => write!(f, "shared-resource"),
            Rule::FragmentedLocale => write!(f, "fragmented-locale"),
            Rule::InventoryCollision => write!(f, "inventory-collision"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// An expected image or locale file is absent from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNotFoundIssue {
    /// Canonical identifier, or the path of a missing locale file.
    pub identifier: String,
    /// Which step was looking for it (e.g., "copy", "delete").
    pub step: &'static str,
}

impl ResourceNotFoundIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::ResourceNotFound
    }
}

/// A reference contains none of the configured storage markers, so its
/// location under the output directory cannot be derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReferencePathIssue {
    pub identifier: String,
}

impl UnresolvedReferencePathIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::UnresolvedReferencePath
    }
}

/// Two images map to the same path in the target directory. The first
/// claim wins and the other image is left where it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationConflictIssue {
    pub identifier: String,
    pub destination: String,
    /// Identifier that already holds the destination.
    pub claimed_by: String,
}

impl DestinationConflictIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::DestinationConflict
    }
}

/// A source file decodes under neither the primary nor the fallback encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingMismatchIssue {
    pub file_path: String,
}

impl EncodingMismatchIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::EncodingMismatch
    }
}

/// A resource referenced by both target and non-target code.
///
/// Not an error: the resource is left where it is and listed for manual review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateResourceUsageIssue {
    pub identifier: String,
}

impl DuplicateResourceUsageIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::DuplicateResourceUsage
    }
}

/// A key to be moved that lacks a translation in one or more locales.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentedLocaleIssue {
    pub key: String,
    /// Locale tags with a missing or empty value.
    pub missing_in: Vec<String>,
}

impl FragmentedLocaleIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::FragmentedLocale
    }
}

/// Two target modules store a resource under the same identifier.
/// The later module wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryCollisionIssue {
    pub identifier: String,
    pub kept: String,
    pub replaced: String,
}

impl InventoryCollisionIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::InventoryCollision
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A non-fatal condition found during a run.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    ResourceNotFound(ResourceNotFoundIssue),
    UnresolvedReferencePath(UnresolvedReferencePathIssue),
    DestinationConflict(DestinationConflictIssue),
    EncodingMismatch(EncodingMismatchIssue),
    DuplicateResourceUsage(DuplicateResourceUsageIssue),
    FragmentedLocale(FragmentedLocaleIssue),
    InventoryCollision(InventoryCollisionIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }

    /// Identifier for the not-found report, if this issue belongs there.
    pub fn not_found_identifier(&self) -> Option<&str> {
        match self {
            Issue::ResourceNotFound(i) => Some(&i.identifier),
            Issue::UnresolvedReferencePath(i) => Some(&i.identifier),
            Issue::DestinationConflict(i) => Some(&i.identifier),
            _ => None,
        }
    }
}

/// Sort issues by rule, then message, for deterministic output.
pub fn sort_issues(issues: &mut [Issue]) {
    issues.sort_by(|a, b| {
        a.rule()
            .cmp(&b.rule())
            .then_with(|| a.message().cmp(&b.message()))
    });
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Trait for types that can be reported to CLI and log.
///
/// Uses `enum_dispatch` for dispatch on the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// Primary message to display (identifier, key, file path).
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for ResourceNotFoundIssue {
    fn message(&self) -> String {
        self.identifier.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("not found during {}", self.step))
    }
}

impl Report for UnresolvedReferencePathIssue {
    fn message(&self) -> String {
        self.identifier.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("no storage marker matches this path".to_string())
    }
}

impl Report for DestinationConflictIssue {
    fn message(&self) -> String {
        self.identifier.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "{} is already taken by {}",
            self.destination, self.claimed_by
        ))
    }
}

impl Report for EncodingMismatchIssue {
    fn message(&self) -> String {
        self.file_path.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("not valid UTF-8 or GBK, file left unchanged".to_string())
    }
}

impl Report for DuplicateResourceUsageIssue {
    fn message(&self) -> String {
        self.identifier.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("also referenced outside the target modules".to_string())
    }
}

impl Report for FragmentedLocaleIssue {
    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        if self.missing_in.is_empty() {
            None
        } else {
            Some(format!("missing in: {}", self.missing_in.join(", ")))
        }
    }
}

impl Report for InventoryCollisionIssue {
    fn message(&self) -> String {
        self.identifier.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("kept {}, replaced {}", self.kept, self.replaced))
    }
}
