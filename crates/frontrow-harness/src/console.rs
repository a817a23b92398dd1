use std::error::Error;
use std::fmt::Display;
use std::io::Write;

use tracing::warn;

use crate::client::{ApiResponse, ResponseBody};
use crate::errors::HarnessError;

const SEPARATOR_WIDTH: usize = 50;

/// Human-readable report of a harness run.
pub struct Console<W> {
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn line(&mut self, text: impl Display) {
        // a broken stdout must not stop the run
        if let Err(err) = writeln!(self.out, "{text}") {
            warn!(error = %err, "Failed to write console output");
        }
    }

    pub fn blank(&mut self) {
        self.line("");
    }

    pub fn heading(&mut self, method: &str, path: &str) {
        self.line(format_args!(">>> Testing {method} {path}"));
    }

    pub fn separator(&mut self) {
        self.line("-".repeat(SEPARATOR_WIDTH));
    }

    pub fn response(&mut self, label: &str, response: &ApiResponse) {
        self.line(label);
        self.line(format_args!("Status Code: {}", response.status.as_u16()));

        match &response.body {
            ResponseBody::Json(value) => {
                self.line("Response JSON:");
                match serde_json::to_string_pretty(value) {
                    Ok(pretty) => self.line(pretty),
                    Err(_) => self.line(value),
                }
            }
            ResponseBody::Text(text) => {
                self.line("Response Body (not valid JSON):");
                self.line(text);
            }
        }

        self.separator();
    }

    pub fn success(&mut self, message: impl Display) {
        self.line(format_args!("SUCCESS: {message}"));
    }

    pub fn failure(&mut self, message: impl Display) {
        self.line(format_args!("FAILURE: {message}"));
    }

    pub fn warning(&mut self, message: impl Display) {
        self.line(format_args!("WARNING: {message}"));
    }

    /// Prints the diagnostic for a failed step.
    pub fn error(&mut self, err: &HarnessError, failure_message: &str) {
        if err.is_transport() {
            let chain = error_chain(err);
            self.line(format_args!("An error occurred while calling the API: {chain}"));
        } else {
            self.failure(format_args!("{failure_message} ({err})"));
        }
    }
}

fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
