//! Resolver configuration.

use crate::problem::Severity;

/// How a symbol imported twice from the same module is reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicateImportMode {
    /// Report as an error.
    #[default]
    Error,
    /// Report as a warning.
    Warn,
}

impl DuplicateImportMode {
    /// Severity used for `DuplicateImport` problems.
    #[must_use]
    pub fn severity(self) -> Severity {
        match self {
            Self::Error => Severity::Error,
            Self::Warn => Severity::Warning,
        }
    }
}

/// Which claimant of a contested OID becomes canonical.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CanonicalSelection {
    /// The assignment registered first (file order, module name, declaration order).
    #[default]
    FirstRegistered,
    /// The assignment registered last.
    LastRegistered,
}

/// Knobs for a pipeline run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverConfig {
    /// The run is reported as failed when the worst problem reaches this severity.
    pub failure_threshold: Severity,
    /// Severity policy for duplicate imports.
    pub duplicate_imports: DuplicateImportMode,
    /// Canonical selection for OID conflicts.
    pub canonical: CanonicalSelection,
    /// Generate well-known base modules that are imported but missing.
    pub synthesize_base_modules: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            failure_threshold: Severity::Fatal,
            duplicate_imports: DuplicateImportMode::Error,
            canonical: CanonicalSelection::FirstRegistered,
            synthesize_base_modules: true,
        }
    }
}

impl ResolverConfig {
    /// Set the failure threshold.
    #[must_use]
    pub fn with_failure_threshold(mut self, severity: Severity) -> Self {
        self.failure_threshold = severity;
        self
    }

    /// Set the duplicate import policy.
    #[must_use]
    pub fn with_duplicate_imports(mut self, mode: DuplicateImportMode) -> Self {
        self.duplicate_imports = mode;
        self
    }

    /// Set the canonical selection policy.
    #[must_use]
    pub fn with_canonical(mut self, canonical: CanonicalSelection) -> Self {
        self.canonical = canonical;
        self
    }

    /// Enable or disable base module synthesis.
    #[must_use]
    pub fn with_base_modules(mut self, enabled: bool) -> Self {
        self.synthesize_base_modules = enabled;
        self
    }

    /// Check whether a run with this worst severity counts as failed.
    #[must_use]
    pub fn fails_at(&self, worst: Option<Severity>) -> bool {
        worst.is_some_and(|w| w >= self.failure_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.failure_threshold, Severity::Fatal);
        assert_eq!(config.duplicate_imports.severity(), Severity::Error);
        assert!(config.synthesize_base_modules);
    }

    #[test]
    fn threshold() {
        let config = ResolverConfig::default().with_failure_threshold(Severity::Error);
        assert!(!config.fails_at(None));
        assert!(!config.fails_at(Some(Severity::Warning)));
        assert!(config.fails_at(Some(Severity::Error)));
        assert!(config.fails_at(Some(Severity::Fatal)));
    }
}
