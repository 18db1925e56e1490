//! Configuration resolver trait for layered overrides.
//!
//! ```text
//! ConfigLoader.load()  →  AtelierConfig (base)
//!                              │
//!                              ▼
//!                     ConfigResolver.apply()
//!                              │
//!                              ▼
//!                     AtelierConfig (final)
//! ```

use super::AtelierConfig;

/// Applies overrides (typically CLI flags) on top of a loaded config.
///
/// Only values the caller actually specified should be applied.
pub trait ConfigResolver {
    fn apply(&self, config: &mut AtelierConfig);
}

/// Resolver that changes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpResolver;

impl ConfigResolver for NoOpResolver {
    fn apply(&self, _config: &mut AtelierConfig) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_resolver_does_nothing() {
        let mut config = AtelierConfig::default();
        let original = config.clone();

        NoOpResolver.apply(&mut config);

        assert_eq!(config, original);
    }

    #[test]
    fn custom_resolver() {
        struct AdminFlag(bool);

        impl ConfigResolver for AdminFlag {
            fn apply(&self, config: &mut AtelierConfig) {
                if self.0 {
                    config.viewer.admin = Some(true);
                }
            }
        }

        let mut config = AtelierConfig::default();
        AdminFlag(false).apply(&mut config);
        assert!(!config.viewer.is_admin());

        AdminFlag(true).apply(&mut config);
        assert!(config.viewer.is_admin());
    }
}
