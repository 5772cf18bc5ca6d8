//! Ordered execution of the diagnostics steps.

use std::sync::Arc;
use std::time::Instant;

use tracing::Instrument;
use uuid::Uuid;

use crate::config::SequenceConfig;
use crate::diagnostics::report::RunReport;
use crate::diagnostics::steps;
use crate::env::Environment;
use crate::error::Result;
use crate::http::LoopbackClient;
use crate::model::{DemoRecord, Describe};
use crate::observability::{metrics, LogSink};
use crate::proxy::Component;

/// Per-run inputs taken from `[diagnostics]` config.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub template: String,
    pub content_path: String,
    pub loopback_url: String,
    pub strict_loopback: bool,
    pub inspect_field: String,
}

impl RunSettings {
    /// `default_loopback` is used when the config names no loopback URL.
    pub fn from_config(config: &SequenceConfig, default_loopback: impl Into<String>) -> Self {
        Self {
            template: config.template.clone(),
            content_path: config.content_path.clone(),
            loopback_url: config
                .loopback_url
                .clone()
                .unwrap_or_else(|| default_loopback.into()),
            strict_loopback: config.strict_loopback,
            inspect_field: config.inspect_field.clone(),
        }
    }
}

/// Runs the fixed step sequence once against a component.
///
/// The invariant and file-read steps are fatal; the loopback step is fatal in
/// strict mode; every other step logs its failure and the run continues.
pub struct DiagnosticsRunner {
    component: Arc<dyn Component>,
    environment: Arc<Environment>,
    client: LoopbackClient,
    settings: RunSettings,
    sink: Arc<dyn LogSink>,
}

impl DiagnosticsRunner {
    pub fn new(
        component: Arc<dyn Component>,
        environment: Arc<Environment>,
        client: LoopbackClient,
        settings: RunSettings,
        sink: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            component,
            environment,
            client,
            settings,
            sink,
        }
    }

    pub async fn run(&self) -> Result<RunReport> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("diagnostics", run_id = %run_id);
        let start_time = Instant::now();

        let result = self.run_steps(run_id).instrument(span).await;
        metrics::record_run(start_time);

        match &result {
            Ok(report) => tracing::info!(
                run_id = %run_id,
                steps = report.steps.len(),
                failed = report.failures().count(),
                "Diagnostics sequence finished"
            ),
            Err(e) => tracing::error!(run_id = %run_id, error = %e, "Diagnostics sequence aborted"),
        }
        result
    }

    async fn run_steps(&self, run_id: Uuid) -> Result<RunReport> {
        let sink = self.sink.as_ref();
        let record = self.component.record();
        let descriptor = DemoRecord::descriptor();
        let mut report = RunReport::new(run_id);

        self.fatal(&mut report, steps::INVARIANT, steps::check_invariant(sink, record))?;

        let outcome = steps::introspect(sink, descriptor);
        self.best_effort(&mut report, steps::INTROSPECT, outcome);

        let outcome = steps::resolve_template(sink, &self.environment, &self.settings.template);
        self.best_effort(&mut report, steps::PLACEHOLDERS, outcome);

        let outcome = steps::construct(sink, descriptor);
        self.best_effort(&mut report, steps::CONSTRUCT, outcome);

        let outcome = steps::read_content(sink, &self.environment, &self.settings.content_path);
        self.fatal(&mut report, steps::FILE_READ, outcome)?;

        let outcome = steps::loopback(sink, &self.client, &self.settings.loopback_url).await;
        if self.settings.strict_loopback {
            if let Err(e) = &outcome {
                sink.error(steps::LOOPBACK, &e.to_string());
            }
            self.fatal(&mut report, steps::LOOPBACK, outcome)?;
        } else {
            self.best_effort(&mut report, steps::LOOPBACK, outcome);
        }

        let outcome = steps::inspect_proxy(sink, self.component.as_ref());
        self.best_effort(&mut report, steps::PROXY, outcome);

        let outcome = steps::enumerate_members(sink, descriptor, &self.settings.inspect_field);
        self.best_effort(&mut report, steps::MEMBERS, outcome);

        Ok(report)
    }

    /// Records the outcome; a failure is logged and the run continues.
    fn best_effort<T>(&self, report: &mut RunReport, step: &'static str, outcome: Result<T>) {
        match outcome {
            Ok(_) => {
                metrics::record_step(step, true);
                report.pass(step);
            }
            Err(e) => {
                metrics::record_step(step, false);
                self.sink.error(step, &e.to_string());
                report.fail(step, e.to_string());
            }
        }
    }

    /// Records the outcome; a failure ends the run. Fatal steps log their own errors.
    fn fatal<T>(
        &self,
        report: &mut RunReport,
        step: &'static str,
        outcome: Result<T>,
    ) -> Result<()> {
        match outcome {
            Ok(_) => {
                metrics::record_step(step, true);
                report.pass(step);
                Ok(())
            }
            Err(e) => {
                metrics::record_step(step, false);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_loopback() {
        let settings =
            RunSettings::from_config(&SequenceConfig::default(), "http://localhost:8080/hi");
        assert_eq!(settings.loopback_url, "http://localhost:8080/hi");
        assert_eq!(settings.content_path, "temp/content.txt");

        let config = SequenceConfig {
            loopback_url: Some("http://127.0.0.1:9/hi".into()),
            ..SequenceConfig::default()
        };
        let settings = RunSettings::from_config(&config, "unused");
        assert_eq!(settings.loopback_url, "http://127.0.0.1:9/hi");
    }
}
