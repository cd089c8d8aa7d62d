//! Per-space theme palette.
//!
//! The set of theme roles is closed and enumerated at compile time via
//! [`ThemeRole`], so a typo in a space config simply fails to deserialize
//! instead of silently producing an unknown CSS variable. Every role is
//! optional; absent roles fall back to the global default stylesheet.

use serde::{Deserialize, Serialize};

/// A named style slot that a space's palette may override.
///
/// Each role maps to exactly one CSS custom property. The mapping is a fixed
/// table; adding a role means adding a variant here and a field on [`Theme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeRole {
    Primary,
    PrimaryForeground,
    Secondary,
    SecondaryForeground,
    Background,
    Foreground,
    Card,
    CardForeground,
    Popover,
    PopoverForeground,
    Muted,
    MutedForeground,
    Accent,
    AccentForeground,
    Destructive,
    DestructiveForeground,
    Border,
    Input,
    Ring,
}

impl ThemeRole {
    /// All roles, in emission order.
    pub const ALL: [Self; 19] = [
        Self::Primary,
        Self::PrimaryForeground,
        Self::Secondary,
        Self::SecondaryForeground,
        Self::Background,
        Self::Foreground,
        Self::Card,
        Self::CardForeground,
        Self::Popover,
        Self::PopoverForeground,
        Self::Muted,
        Self::MutedForeground,
        Self::Accent,
        Self::AccentForeground,
        Self::Destructive,
        Self::DestructiveForeground,
        Self::Border,
        Self::Input,
        Self::Ring,
    ];

    /// The CSS custom property this role is emitted as.
    #[must_use]
    pub const fn css_var(self) -> &'static str {
        match self {
            Self::Primary => "--primary",
            Self::PrimaryForeground => "--primary-foreground",
            Self::Secondary => "--secondary",
            Self::SecondaryForeground => "--secondary-foreground",
            Self::Background => "--background",
            Self::Foreground => "--foreground",
            Self::Card => "--card",
            Self::CardForeground => "--card-foreground",
            Self::Popover => "--popover",
            Self::PopoverForeground => "--popover-foreground",
            Self::Muted => "--muted",
            Self::MutedForeground => "--muted-foreground",
            Self::Accent => "--accent",
            Self::AccentForeground => "--accent-foreground",
            Self::Destructive => "--destructive",
            Self::DestructiveForeground => "--destructive-foreground",
            Self::Border => "--border",
            Self::Input => "--input",
            Self::Ring => "--ring",
        }
    }
}

/// Palette overrides for one space.
///
/// Field names match the space config file keys. Values are raw CSS color
/// channel strings (e.g. `"195 80% 45%"` for HSL channels); the storefront
/// does not interpret them beyond emission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Theme {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_foreground: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_foreground: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_foreground: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popover_foreground: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted_foreground: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_foreground: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destructive: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destructive_foreground: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ring: Option<String>,
}

impl Theme {
    /// Get the configured value for a role, if present and non-empty.
    ///
    /// Empty strings are treated as absent so a blank config line cannot
    /// emit an invalid `--var: ;` assignment.
    #[must_use]
    pub fn get(&self, role: ThemeRole) -> Option<&str> {
        let value = match role {
            ThemeRole::Primary => &self.primary,
            ThemeRole::PrimaryForeground => &self.primary_foreground,
            ThemeRole::Secondary => &self.secondary,
            ThemeRole::SecondaryForeground => &self.secondary_foreground,
            ThemeRole::Background => &self.background,
            ThemeRole::Foreground => &self.foreground,
            ThemeRole::Card => &self.card,
            ThemeRole::CardForeground => &self.card_foreground,
            ThemeRole::Popover => &self.popover,
            ThemeRole::PopoverForeground => &self.popover_foreground,
            ThemeRole::Muted => &self.muted,
            ThemeRole::MutedForeground => &self.muted_foreground,
            ThemeRole::Accent => &self.accent,
            ThemeRole::AccentForeground => &self.accent_foreground,
            ThemeRole::Destructive => &self.destructive,
            ThemeRole::DestructiveForeground => &self.destructive_foreground,
            ThemeRole::Border => &self.border,
            ThemeRole::Input => &self.input,
            ThemeRole::Ring => &self.ring,
        };

        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Whether no role is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        ThemeRole::ALL.iter().all(|role| self.get(*role).is_none())
    }

    /// Serialize the present roles as CSS custom property assignments.
    ///
    /// Emits one `--role: value;` per configured role, in [`ThemeRole::ALL`]
    /// order, each at most once. An empty theme yields an empty string; this
    /// never fails.
    #[must_use]
    pub fn to_css_vars(&self) -> String {
        let mut css = String::new();
        for role in ThemeRole::ALL {
            if let Some(value) = self.get(role) {
                if !css.is_empty() {
                    css.push(' ');
                }
                css.push_str(role.css_var());
                css.push_str(": ");
                css.push_str(value);
                css.push(';');
            }
        }
        css
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_theme_emits_nothing() {
        let theme = Theme::default();
        assert!(theme.is_empty());
        assert_eq!(theme.to_css_vars(), "");
    }

    #[test]
    fn test_two_roles_emit_exactly_two_assignments() {
        let theme = Theme {
            primary: Some("195 80% 45%".to_string()),
            background: Some("0 0% 100%".to_string()),
            ..Theme::default()
        };

        let css = theme.to_css_vars();
        assert_eq!(css.matches(';').count(), 2);
        assert!(css.contains("--primary: 195 80% 45%;"));
        assert!(css.contains("--background: 0 0% 100%;"));
    }

    #[test]
    fn test_blank_value_is_treated_as_absent() {
        let theme = Theme {
            primary: Some("   ".to_string()),
            ..Theme::default()
        };
        assert!(theme.get(ThemeRole::Primary).is_none());
        assert_eq!(theme.to_css_vars(), "");
    }

    #[test]
    fn test_each_role_maps_to_distinct_variable() {
        let mut seen = std::collections::HashSet::new();
        for role in ThemeRole::ALL {
            assert!(role.css_var().starts_with("--"));
            assert!(seen.insert(role.css_var()));
        }
        assert_eq!(seen.len(), ThemeRole::ALL.len());
    }

    #[test]
    fn test_unknown_config_key_is_rejected() {
        let err: Result<Theme, _> = serde_json::from_str(r#"{"primry": "1 2% 3%"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_deserializes_partial_palette() {
        let theme: Theme =
            serde_json::from_str(r#"{"primary": "10 20% 30%", "ring": "10 20% 30%"}"#).unwrap();
        assert_eq!(theme.get(ThemeRole::Primary), Some("10 20% 30%"));
        assert_eq!(theme.get(ThemeRole::Ring), Some("10 20% 30%"));
        assert!(theme.get(ThemeRole::Background).is_none());
    }
}
