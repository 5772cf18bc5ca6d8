//! Explicit wrapper composition standing in for runtime proxies.
//!
//! # Design Decisions
//! - A wrapper implements the same [`Component`] capability as the value it wraps
//! - Each wrapper tags itself with the mechanism it uses ([`ProxyKind`])
//! - Advice is plain code in the wrapper's `begin()`, applied at the call site

pub mod advised;

pub use advised::{Advised, DynAdvised};

use std::fmt;

use crate::model::DemoRecord;
use crate::observability::LogSink;

/// How a wrapper dispatches to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyKind {
    /// Generic wrapper over a concrete target type.
    Static,
    /// Wrapper over a boxed trait object.
    Dynamic,
}

impl fmt::Display for ProxyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyKind::Static => f.write_str("static"),
            ProxyKind::Dynamic => f.write_str("dynamic"),
        }
    }
}

/// Capability shared by the demo record and every wrapper around it.
pub trait Component: Send + Sync {
    /// The record this component ultimately exposes.
    fn record(&self) -> &DemoRecord;

    /// Post-construction hook.
    fn begin(&self, sink: &dyn LogSink);

    /// Name of the innermost, unwrapped type.
    fn target_type(&self) -> &'static str;

    /// The outermost wrapping mechanism, `None` for an unwrapped value.
    fn proxy_kind(&self) -> Option<ProxyKind> {
        None
    }
}

/// What [`inspect`] found out about a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxyInfo {
    pub target_type: &'static str,
    pub kind: Option<ProxyKind>,
}

impl ProxyInfo {
    pub fn is_proxy(&self) -> bool {
        self.kind.is_some()
    }

    pub fn is_static_proxy(&self) -> bool {
        self.kind == Some(ProxyKind::Static)
    }

    pub fn is_dynamic_proxy(&self) -> bool {
        self.kind == Some(ProxyKind::Dynamic)
    }
}

pub fn inspect(component: &dyn Component) -> ProxyInfo {
    ProxyInfo {
        target_type: component.target_type(),
        kind: component.proxy_kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_record_is_not_a_proxy() {
        let info = inspect(&DemoRecord::new());
        assert_eq!(info.target_type, "DemoRecord");
        assert!(!info.is_proxy());
        assert!(!info.is_static_proxy());
        assert!(!info.is_dynamic_proxy());
    }

    #[test]
    fn test_wrappers_report_their_mechanism() {
        let fixed = inspect(&Advised::new(DemoRecord::new()));
        assert!(fixed.is_proxy());
        assert!(fixed.is_static_proxy());
        assert_eq!(fixed.target_type, "DemoRecord");

        let boxed = inspect(&DynAdvised::new(Box::new(DemoRecord::new())));
        assert!(boxed.is_dynamic_proxy());
        assert!(!boxed.is_static_proxy());
        assert_eq!(boxed.target_type, "DemoRecord");
    }

    #[test]
    fn test_outermost_wrapper_wins() {
        let layered = DynAdvised::new(Box::new(Advised::new(DemoRecord::new())));
        assert_eq!(inspect(&layered).kind, Some(ProxyKind::Dynamic));
        assert_eq!(ProxyKind::Dynamic.to_string(), "dynamic");
    }
}
