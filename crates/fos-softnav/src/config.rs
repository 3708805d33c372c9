//! Soft-navigation configuration

/// Default persistence marker attribute
pub const PRESERVE_ATTR: &str = "flamethrower-preserve";

/// Default reload marker attribute for `<head>` scripts
pub const RELOAD_ATTR: &str = "data-reload";

/// Default `rel` value of metadata nodes excluded from merging
pub const PREFETCH_REL: &str = "prefetch";

/// What happens to a persistent element that has no counterpart in the
/// next document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrphanPolicy {
    /// Leave it out of the new content, detached but intact
    #[default]
    Detach,
    /// Re-attach it at the end of the new content root
    Append,
}

/// Soft-navigation configuration options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftNavConfig {
    /// Attribute marking a content element as persistent
    pub preserve_attr: String,

    /// Attribute opting a `<head>` script into re-execution
    pub reload_attr: String,

    /// Exact `rel` value of metadata nodes that never take part in merging
    pub prefetch_rel: String,

    /// Handling of unmatched persistent elements
    pub orphan_policy: OrphanPolicy,

    /// Run the script reanimator at all
    pub enable_scripts: bool,
}

impl Default for SoftNavConfig {
    fn default() -> Self {
        Self {
            preserve_attr: PRESERVE_ATTR.to_string(),
            reload_attr: RELOAD_ATTR.to_string(),
            prefetch_rel: PREFETCH_REL.to_string(),
            orphan_policy: OrphanPolicy::default(),
            enable_scripts: true,
        }
    }
}

impl SoftNavConfig {
    pub fn with_preserve_attr(mut self, name: impl Into<String>) -> Self {
        self.preserve_attr = name.into();
        self
    }

    pub fn with_reload_attr(mut self, name: impl Into<String>) -> Self {
        self.reload_attr = name.into();
        self
    }

    pub fn with_prefetch_rel(mut self, rel: impl Into<String>) -> Self {
        self.prefetch_rel = rel.into();
        self
    }

    pub fn with_orphan_policy(mut self, policy: OrphanPolicy) -> Self {
        self.orphan_policy = policy;
        self
    }

    pub fn with_scripts(mut self, enabled: bool) -> Self {
        self.enable_scripts = enabled;
        self
    }
}
