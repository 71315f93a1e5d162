//! Cloud service boundary.
//!
//! Real API clients live outside this tool; commands only see the
//! [`CloudService`] trait. [`DryRunService`] answers every request with a
//! description of the HTTP call it stands for.

use crate::error::{CliError, Result};
use crate::request::Request;

/// Result of a service call, shaped for the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Table {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Record(Vec<(String, String)>),
    Info(String),
}

pub trait CloudService {
    fn execute(&self, request: &Request) -> Result<Response>;
}

/// Service that performs no network I/O.
#[derive(Debug, Clone)]
pub struct DryRunService {
    api_key: String,
}

impl DryRunService {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
        }
    }

    fn masked_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        let visible: String = chars[chars.len().saturating_sub(4)..].iter().collect();
        format!("****{visible}")
    }
}

fn method_for(operation: &str) -> Result<&'static str> {
    match operation {
        "list" | "describe" | "result" | "outputs" | "signed-urls" => Ok("GET"),
        "create" | "cancel" => Ok("POST"),
        "update" => Ok("PUT"),
        "delete" => Ok("DELETE"),
        other => Err(CliError::ServiceError(format!(
            "unsupported operation: {other}"
        ))),
    }
}

fn path_for(request: &Request) -> String {
    let mut path = format!("/{}/{}", request.service, request.resource);
    if let Some(id) = &request.resource_id {
        path.push('/');
        path.push_str(id);
    }
    if matches!(
        request.operation.as_str(),
        "cancel" | "result" | "outputs" | "signed-urls"
    ) {
        path.push('/');
        path.push_str(&request.operation);
    }
    path
}

fn join_pairs<'a>(pairs: impl Iterator<Item = (&'a String, &'a String)>) -> String {
    pairs
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

impl CloudService for DryRunService {
    fn execute(&self, request: &Request) -> Result<Response> {
        if self.api_key.trim().is_empty() {
            return Err(CliError::MissingCredentials);
        }

        let method = method_for(&request.operation)?;
        let path = path_for(request);

        let mut query = join_pairs(request.params.iter());
        if let Some(paging) = request.paging {
            let mut page = format!("page={}", paging.page);
            if let Some(per_page) = paging.per_page {
                page.push_str(&format!("&per_page={per_page}"));
            }
            if !query.is_empty() {
                query.push('&');
            }
            query.push_str(&page);
        }

        match request.operation.as_str() {
            "list" => Ok(Response::Table {
                columns: vec!["METHOD".into(), "PATH".into(), "QUERY".into()],
                rows: vec![vec![method.to_string(), path, query]],
            }),
            "delete" | "cancel" => Ok(Response::Info(format!("{method} {path} (dry run)"))),
            _ => {
                let mut fields = vec![
                    ("method".to_string(), method.to_string()),
                    ("path".to_string(), path),
                    ("api_key".to_string(), self.masked_key()),
                ];
                fields.extend(
                    request
                        .params
                        .iter()
                        .map(|(key, value)| (key.clone(), value.clone())),
                );
                if !request.headers.is_empty() {
                    fields.push(("headers".to_string(), join_pairs(request.headers.iter())));
                }
                Ok(Response::Record(fields))
            }
        }
    }
}
