//! Shared state behind every command action.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use cmdtree_core::FlagTable;
use tracing::{debug, warn};

use crate::catalog::OperationSpec;
use crate::error::CliError;
use crate::render::Renderer;
use crate::request::Request;
use crate::service::CloudService;

/// Service, renderer and request headers shared by the command actions.
///
/// Actions cannot return errors to the dispatcher, so failures are rendered
/// here and remembered for the process exit status.
pub struct App {
    service: Box<dyn CloudService>,
    renderer: RefCell<Box<dyn Renderer>>,
    headers: BTreeMap<String, String>,
    failed: Cell<bool>,
}

impl App {
    pub fn new(
        service: Box<dyn CloudService>,
        renderer: Box<dyn Renderer>,
        headers: BTreeMap<String, String>,
    ) -> Self {
        Self {
            service,
            renderer: RefCell::new(renderer),
            headers,
            failed: Cell::new(false),
        }
    }

    /// Runs one catalog operation with the flags it was invoked with.
    pub fn call(&self, service: &str, resource: &str, operation: &OperationSpec, flags: FlagTable) {
        let context = format!("{service} {resource} {}", operation.verb);
        let result = Request::from_flags(service, resource, operation, flags, self.headers.clone())
            .and_then(|request| {
                debug!(command = %context, request = ?request, "Executing request");
                self.service.execute(&request)
            });

        match result {
            Ok(response) => self.renderer.borrow_mut().response(&response),
            Err(err) => self.report(&context, &err),
        }
    }

    pub fn info(&self, text: &str) {
        self.renderer.borrow_mut().info(text);
    }

    /// Renders a failure and marks the run as failed.
    pub fn report(&self, context: &str, err: &CliError) {
        warn!(command = %context, error = %err, "Command failed");
        self.failed.set(true);
        self.renderer.borrow_mut().error(context, err);
    }

    pub fn failed(&self) -> bool {
        self.failed.get()
    }
}

/// Adds the side-channel header to the configured headers when both its key
/// and value are non-empty.
pub fn request_headers(
    configured: &BTreeMap<String, String>,
    key: &str,
    value: &str,
) -> BTreeMap<String, String> {
    let mut headers = configured.clone();
    if !key.is_empty() && !value.is_empty() {
        headers.insert(key.to_string(), value.to_string());
    }
    headers
}
