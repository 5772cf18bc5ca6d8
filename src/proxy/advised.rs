//! Before-advice wrappers around `begin()`.

use crate::model::DemoRecord;
use crate::observability::LogSink;
use crate::proxy::{Component, ProxyKind};

const STEP: &str = "advice";

fn before(sink: &dyn LogSink, target: &str) {
    sink.info(STEP, "before()");
    sink.info(STEP, &format!("Signature : {}::begin()", target));
}

/// Generic wrapper; dispatch to the target is resolved at compile time.
#[derive(Debug, Clone)]
pub struct Advised<T> {
    target: T,
}

impl<T: Component> Advised<T> {
    pub fn new(target: T) -> Self {
        Self { target }
    }
}

impl<T: Component> Component for Advised<T> {
    fn record(&self) -> &DemoRecord {
        self.target.record()
    }

    fn begin(&self, sink: &dyn LogSink) {
        before(sink, self.target.target_type());
        self.target.begin(sink);
    }

    fn target_type(&self) -> &'static str {
        self.target.target_type()
    }

    fn proxy_kind(&self) -> Option<ProxyKind> {
        Some(ProxyKind::Static)
    }
}

/// Wrapper over a boxed trait object.
pub struct DynAdvised {
    target: Box<dyn Component>,
}

impl DynAdvised {
    pub fn new(target: Box<dyn Component>) -> Self {
        Self { target }
    }
}

impl Component for DynAdvised {
    fn record(&self) -> &DemoRecord {
        self.target.record()
    }

    fn begin(&self, sink: &dyn LogSink) {
        before(sink, self.target.target_type());
        self.target.begin(sink);
    }

    fn target_type(&self) -> &'static str {
        self.target.target_type()
    }

    fn proxy_kind(&self) -> Option<ProxyKind> {
        Some(ProxyKind::Dynamic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::MemorySink;

    #[test]
    fn test_advice_runs_before_target() {
        let sink = MemorySink::new();
        Advised::new(DemoRecord::new()).begin(&sink);

        let messages: Vec<_> = sink.records().into_iter().map(|r| r.message).collect();
        assert_eq!(
            messages,
            vec!["before()", "Signature : DemoRecord::begin()", "Begin : "]
        );
    }

    #[test]
    fn test_dynamic_advice_delegates_record() {
        let mut record = DemoRecord::new();
        record.set_list(None);
        let wrapped = DynAdvised::new(Box::new(record));
        assert!(wrapped.record().list().is_none());

        let sink = MemorySink::new();
        wrapped.begin(&sink);
        assert_eq!(sink.messages(STEP).len(), 2);
        assert_eq!(sink.messages("lifecycle"), vec!["Begin : "]);
    }
}
