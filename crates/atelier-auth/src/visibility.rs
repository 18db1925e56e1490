//! Visibility filter.
//!
//! Turns an effective capability decision plus a value into what should be
//! presented: the value, a redaction marker, or nothing at all.
//!
//! ```text
//! allowed ──┬── true  ──► Shown(value)
//!           └── false ──┬── Placeholder ──► Redacted   ("HIDDEN")
//!                       └── Omit        ──► Omitted    (region not rendered)
//! ```
//!
//! The filter relies on the evaluator failing closed: anything it cannot
//! decide arrives here as `false`.

use serde::{Serialize, Serializer};

/// Default marker rendered in place of redacted data.
pub const REDACTION_MARKER: &str = "HIDDEN";

/// How a denied region is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RedactionStyle {
    /// Render a marker where the data would be.
    #[default]
    Placeholder,
    /// Do not render the region.
    Omit,
}

/// A value after the visibility filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility<T> {
    Shown(T),
    Redacted,
    Omitted,
}

impl<T> Visibility<T> {
    /// Applies the filter.
    ///
    /// ```
    /// use atelier_auth::{RedactionStyle, Visibility};
    ///
    /// assert_eq!(Visibility::reveal(true, 42, RedactionStyle::Placeholder), Visibility::Shown(42));
    /// assert_eq!(Visibility::reveal(false, 42, RedactionStyle::Placeholder), Visibility::<i32>::Redacted);
    /// assert_eq!(Visibility::reveal(false, 42, RedactionStyle::Omit), Visibility::<i32>::Omitted);
    /// ```
    #[must_use]
    pub fn reveal(allowed: bool, value: T, style: RedactionStyle) -> Self {
        Self::reveal_with(allowed, || value, style)
    }

    /// Like [`reveal`](Self::reveal), computing the value only when it will be shown.
    #[must_use]
    pub fn reveal_with(allowed: bool, value: impl FnOnce() -> T, style: RedactionStyle) -> Self {
        if allowed {
            Self::Shown(value())
        } else {
            match style {
                RedactionStyle::Placeholder => Self::Redacted,
                RedactionStyle::Omit => Self::Omitted,
            }
        }
    }

    #[must_use]
    pub fn is_shown(&self) -> bool {
        matches!(self, Self::Shown(_))
    }

    #[must_use]
    pub fn shown(&self) -> Option<&T> {
        match self {
            Self::Shown(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_shown(self) -> Option<T> {
        match self {
            Self::Shown(v) => Some(v),
            _ => None,
        }
    }

    /// Maps the shown value, keeping redaction state.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Visibility<U> {
        match self {
            Self::Shown(v) => Visibility::Shown(f(v)),
            Self::Redacted => Visibility::Redacted,
            Self::Omitted => Visibility::Omitted,
        }
    }

    /// Renders with a custom marker for redacted values.
    ///
    /// Omitted values render as an empty string.
    #[must_use]
    pub fn render(&self, marker: &str) -> String
    where
        T: std::fmt::Display,
    {
        match self {
            Self::Shown(v) => v.to_string(),
            Self::Redacted => marker.to_string(),
            Self::Omitted => String::new(),
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Visibility<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shown(v) => write!(f, "{v}"),
            Self::Redacted => f.write_str(REDACTION_MARKER),
            Self::Omitted => Ok(()),
        }
    }
}

/// `Shown` serializes as the value, `Redacted` as `"HIDDEN"`, `Omitted` as `null`.
impl<T: Serialize> Serialize for Visibility<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Shown(v) => v.serialize(serializer),
            Self::Redacted => serializer.serialize_str(REDACTION_MARKER),
            Self::Omitted => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_with_skips_work_when_denied() {
        let mut called = false;
        let v: Visibility<u64> = Visibility::reveal_with(
            false,
            || {
                called = true;
                1
            },
            RedactionStyle::Placeholder,
        );
        assert_eq!(v, Visibility::Redacted);
        assert!(!called);
    }

    #[test]
    fn display_and_render() {
        assert_eq!(Visibility::Shown(1_200_000u64).to_string(), "1200000");
        assert_eq!(Visibility::<u64>::Redacted.to_string(), "HIDDEN");
        assert_eq!(Visibility::<u64>::Omitted.to_string(), "");
        assert_eq!(Visibility::<u64>::Redacted.render("🔒"), "🔒");
    }

    #[test]
    fn serialize_forms() {
        let shown = serde_json::to_value(Visibility::Shown(5u64)).expect("serialize");
        let redacted = serde_json::to_value(Visibility::<u64>::Redacted).expect("serialize");
        let omitted = serde_json::to_value(Visibility::<u64>::Omitted).expect("serialize");
        assert_eq!(shown, serde_json::json!(5));
        assert_eq!(redacted, serde_json::json!("HIDDEN"));
        assert_eq!(omitted, serde_json::Value::Null);
    }

    #[test]
    fn map_keeps_state() {
        assert_eq!(Visibility::Shown(2).map(|v| v * 2), Visibility::Shown(4));
        assert_eq!(Visibility::<i32>::Redacted.map(|v| v * 2), Visibility::Redacted);
        assert_eq!(Visibility::<i32>::Omitted.map(|v| v * 2), Visibility::Omitted);
    }

    #[test]
    fn accessors() {
        let v = Visibility::Shown("x");
        assert!(v.is_shown());
        assert_eq!(v.shown(), Some(&"x"));
        assert_eq!(Visibility::<&str>::Redacted.into_shown(), None);
    }
}
