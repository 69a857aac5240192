//! Intersection-observer plumbing shared by reveal and lazy loading.

use crate::config::RevealConfig;

/// Options for one intersection observer. `None` fields keep the platform
/// defaults (threshold 0, no root margin).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObserverOptions {
    pub threshold: Option<f64>,
    pub root_margin: Option<String>,
}

impl From<&RevealConfig> for ObserverOptions {
    fn from(config: &RevealConfig) -> Self {
        Self {
            threshold: Some(config.threshold),
            root_margin: Some(config.root_margin.clone()),
        }
    }
}

/// One observer report: which observed element, and whether it intersects.
///
/// Elements are identified by their position in the list handed to the
/// component at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intersection {
    pub index: usize,
    pub is_intersecting: bool,
}

impl Intersection {
    pub fn entering(index: usize) -> Self {
        Self {
            index,
            is_intersecting: true,
        }
    }

    pub fn leaving(index: usize) -> Self {
        Self {
            index,
            is_intersecting: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_options_come_from_config() {
        let options = ObserverOptions::from(&RevealConfig::default());
        assert_eq!(options.threshold, Some(0.1));
        assert_eq!(options.root_margin.as_deref(), Some("0px 0px -100px 0px"));
    }

    #[test]
    fn default_options_leave_platform_defaults() {
        let options = ObserverOptions::default();
        assert!(options.threshold.is_none());
        assert!(options.root_margin.is_none());
    }
}
