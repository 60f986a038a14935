//! Check presets for common configurations.

use std::str::FromStr;

use crate::{CatchAllGlob, EmptyBody, InertRule, MissingDescription, SharedGlob};
use rule_dispatch_core::{CheckBox, Severity};

/// Preset configurations for rule-dispatch checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Preset {
    /// Checks for rules that are likely broken.
    #[default]
    Recommended,
    /// Every check, with broken rules reported as errors.
    Strict,
    /// Every check at its default severity.
    All,
}

impl Preset {
    /// Returns the checks for this preset.
    #[must_use]
    pub fn checks(self) -> Vec<CheckBox> {
        match self {
            Self::Recommended => recommended_checks(),
            Self::Strict => strict_checks(),
            Self::All => all_checks(),
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recommended" => Ok(Self::Recommended),
            "strict" => Ok(Self::Strict),
            "all" => Ok(Self::All),
            other => Err(format!(
                "unknown preset '{other}', expected one of: recommended, strict, all"
            )),
        }
    }
}

/// Returns the recommended set of checks.
///
/// Includes:
/// - `inert-rule` (RD001) - Rules that are never selected
/// - `empty-body` (RD002) - Rules with nothing to say
/// - `catch-all-glob` (RD003) - Globs that should be `alwaysApply`
#[must_use]
pub fn recommended_checks() -> Vec<CheckBox> {
    vec![
        Box::new(InertRule::new()),
        Box::new(EmptyBody::new()),
        Box::new(CatchAllGlob::new()),
    ]
}

/// Returns the strict set of checks.
///
/// Includes all checks, with `inert-rule` and `empty-body` raised to errors.
#[must_use]
pub fn strict_checks() -> Vec<CheckBox> {
    vec![
        Box::new(InertRule::new().severity(Severity::Error)),
        Box::new(EmptyBody::new().severity(Severity::Error)),
        Box::new(CatchAllGlob::new()),
        Box::new(SharedGlob::new()),
        Box::new(MissingDescription::new()),
    ]
}

/// Returns all available checks.
#[must_use]
pub fn all_checks() -> Vec<CheckBox> {
    vec![
        Box::new(InertRule::new()),
        Box::new(EmptyBody::new()),
        Box::new(CatchAllGlob::new()),
        Box::new(SharedGlob::new()),
        Box::new(MissingDescription::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(checks: &[CheckBox]) -> Vec<&'static str> {
        checks.iter().map(|c| c.code()).collect()
    }

    #[test]
    fn test_preset_checks() {
        assert_eq!(
            codes(&Preset::Recommended.checks()),
            vec!["RD001", "RD002", "RD003"]
        );
        assert_eq!(codes(&Preset::All.checks()).len(), 5);
        assert_eq!(codes(&Preset::Strict.checks()).len(), 5);
    }

    #[test]
    fn strict_raises_severity() {
        let strict = Preset::Strict.checks();
        assert_eq!(strict[0].default_severity(), Severity::Error);
        assert_eq!(strict[1].default_severity(), Severity::Error);
        assert_eq!(Preset::All.checks()[0].default_severity(), Severity::Warning);
    }

    #[test]
    fn parse_preset_names() {
        assert_eq!("strict".parse::<Preset>(), Ok(Preset::Strict));
        assert_eq!(" All ".parse::<Preset>(), Ok(Preset::All));
        assert!("minimal".parse::<Preset>().is_err());
    }
}
