//! Clone configuration

/// Which built-ins get duplicated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum CloneMode {
    /// Duplicate plain objects and arrays; share every special built-in
    #[default]
    Clone,
    /// Additionally duplicate Map, Set, buffers, typed arrays, Date and RegExp
    Copy,
}

impl CloneMode {
    /// Whether special built-ins are duplicated
    pub fn is_copy(&self) -> bool {
        matches!(self, Self::Copy)
    }

    /// Name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clone => "clone",
            Self::Copy => "copy",
        }
    }
}

impl From<bool> for CloneMode {
    /// Maps the boolean `copy` flag of the public entry point
    fn from(deep_copy: bool) -> Self {
        if deep_copy { Self::Copy } else { Self::Clone }
    }
}

/// Per-call options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloneOptions {
    /// Clone or copy mode (default: clone)
    pub mode: CloneMode,
}

impl CloneOptions {
    /// Options for clone mode
    pub fn clone_mode() -> Self {
        Self {
            mode: CloneMode::Clone,
        }
    }

    /// Options for copy mode
    pub fn copy_mode() -> Self {
        Self {
            mode: CloneMode::Copy,
        }
    }

    /// Replace the mode
    pub fn with_mode(mut self, mode: CloneMode) -> Self {
        self.mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_clone_mode() {
        assert_eq!(CloneOptions::default().mode, CloneMode::Clone);
        assert_eq!(CloneMode::from(true), CloneMode::Copy);
        assert!(!CloneMode::from(false).is_copy());
        assert_eq!(
            CloneOptions::clone_mode().with_mode(CloneMode::Copy),
            CloneOptions::copy_mode()
        );
    }
}
