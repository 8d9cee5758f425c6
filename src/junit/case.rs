//! Per-run status dispatch and diagnostic triage.
//!
//! Each [`Run`] becomes exactly one [`TestCase`]. The run's status picks at
//! most one [`Outcome`]; diagnostics that the outcome did not consume end up
//! in `system-err`, unless the outcome is an error (which consumes all of
//! them).

use std::collections::BTreeSet;
use std::io::{self, Write};

use super::xml::XmlWriter;
use super::FAILED_TEST_SUMMARY;
use crate::render::{RenderDiagnostic, Sources};
use crate::suite::{Diagnostic, Run, Status};

const FAILURE_MESSAGE: &str = "Test run failed";
const ERROR_MESSAGE: &str = "Encountered an error";

/// An optional `message` attribute plus a literal text body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WithMessage {
    pub message: &'static str,
    pub body: String,
}

impl WithMessage {
    fn new(message: &'static str, body: String) -> Self {
        Self { message, body }
    }

    fn write<W: Write>(&self, xml: &mut XmlWriter<W>, name: &str) -> io::Result<()> {
        if self.message.is_empty() {
            xml.text_element(name, &[], &self.body)
        } else {
            xml.text_element(name, &[("message", self.message)], &self.body)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Skipped(WithMessage),
    Failure(WithMessage),
    Error(WithMessage),
}

impl Outcome {
    fn element_name(&self) -> &'static str {
        match self {
            Outcome::Skipped(_) => "skipped",
            Outcome::Failure(_) => "failure",
            Outcome::Error(_) => "error",
        }
    }

    fn content(&self) -> &WithMessage {
        match self {
            Outcome::Skipped(m) | Outcome::Failure(m) | Outcome::Error(m) => m,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestCase<'a> {
    pub name: &'a str,
    /// The scenario file name, so consumers built for class-shaped
    /// languages show the run as a method of its file.
    pub classname: &'a str,
    /// Seconds. Zero means "not known" and is never emitted.
    pub time: Option<f64>,
    pub outcome: Option<Outcome>,
    pub system_err: Option<WithMessage>,
}

impl<'a> TestCase<'a> {
    pub fn from_run<R: RenderDiagnostic>(
        classname: &'a str,
        run: &'a Run,
        renderer: &R,
        sources: &Sources,
    ) -> Self {
        let mut triage = Triage::new(&run.diagnostics, renderer, sources);

        let outcome = match run.status {
            Status::Skip => Some(Outcome::Skipped(WithMessage::default())),
            Status::Fail => {
                let body = triage.take(|diag| diag.summary == FAILED_TEST_SUMMARY);
                Some(Outcome::Failure(WithMessage::new(FAILURE_MESSAGE, body)))
            }
            Status::Error => {
                let body = triage.take(|_| true);
                Some(Outcome::Error(WithMessage::new(ERROR_MESSAGE, body)))
            }
            Status::Pass | Status::Pending => None,
        };

        let system_err = if triage.has_remaining() && !matches!(outcome, Some(Outcome::Error(_))) {
            Some(WithMessage::new("", triage.take(|_| true)))
        } else {
            None
        };

        Self {
            name: &run.name,
            classname,
            time: run
                .execution_meta
                .map(|meta| meta.duration.as_secs_f64())
                .filter(|secs| *secs != 0.0),
            outcome,
            system_err,
        }
    }

    pub fn write<W: Write>(&self, xml: &mut XmlWriter<W>) -> io::Result<()> {
        let time = self.time.map(format_seconds);
        let mut attrs = vec![("name", self.name), ("classname", self.classname)];
        if let Some(time) = time.as_deref() {
            attrs.push(("time", time));
        }

        xml.start("testcase", &attrs)?;
        if let Some(outcome) = &self.outcome {
            outcome.content().write(xml, outcome.element_name())?;
        }
        if let Some(stderr) = &self.system_err {
            stderr.write(xml, "system-err")?;
        }
        xml.end("testcase")
    }
}

/// Tracks which of a run's diagnostics have already been placed in the
/// report.
struct Triage<'d, 'r, R> {
    diagnostics: &'d [Diagnostic],
    consumed: BTreeSet<usize>,
    renderer: &'r R,
    sources: &'r Sources,
}

impl<'d, 'r, R: RenderDiagnostic> Triage<'d, 'r, R> {
    fn new(diagnostics: &'d [Diagnostic], renderer: &'r R, sources: &'r Sources) -> Self {
        Self {
            diagnostics,
            consumed: BTreeSet::new(),
            renderer,
            sources,
        }
    }

    /// Renders and consumes every unconsumed diagnostic matching `select`,
    /// in their original order.
    fn take(&mut self, select: impl Fn(&Diagnostic) -> bool) -> String {
        let mut body = String::new();
        for (idx, diag) in self.diagnostics.iter().enumerate() {
            if self.consumed.contains(&idx) || !select(diag) {
                continue;
            }
            body.push_str(&self.renderer.render(diag, self.sources));
            self.consumed.insert(idx);
        }
        body
    }

    fn has_remaining(&self) -> bool {
        self.consumed.len() < self.diagnostics.len()
    }
}

/// Formats seconds as the shortest decimal that round-trips, switching to
/// exponent form for very small or very large values (`5e-05`,
/// `1.234567e+06`).
pub fn format_seconds(secs: f64) -> String {
    let sci = format!("{secs:e}");
    if let Some((mantissa, exp)) = sci.split_once('e') {
        if let Ok(exp) = exp.parse::<i32>() {
            if exp < -4 || exp >= 6 {
                let sign = if exp < 0 { '-' } else { '+' };
                return format!("{mantissa}e{sign}{:02}", exp.abs());
            }
        }
    }
    format!("{secs}")
}
