//! Mapping from resolved flag tables to service requests.

use std::collections::BTreeMap;

use cmdtree_core::FlagTable;

use crate::catalog::OperationSpec;
use crate::error::{CliError, Result};

pub const PAGE_FLAG: &str = "page";
pub const PER_PAGE_FLAG: &str = "per_page";

/// Requested page of a list operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub page: u32,
    pub per_page: Option<u32>,
}

/// One call against a cloud service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub service: String,
    pub resource: String,
    pub operation: String,
    pub resource_id: Option<String>,
    pub params: BTreeMap<String, String>,
    pub paging: Option<Paging>,
    pub headers: BTreeMap<String, String>,
}

impl Request {
    /// Builds a request from the flags an operation was invoked with.
    ///
    /// The positional flag becomes the resource id, paging flags are parsed
    /// into [`Paging`], and every other non-empty flag becomes a parameter.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPaging`](CliError::InvalidPaging) when `page` or
    /// `per_page` is not a positive integer.
    pub fn from_flags(
        service: &str,
        resource: &str,
        operation: &OperationSpec,
        mut flags: FlagTable,
        headers: BTreeMap<String, String>,
    ) -> Result<Self> {
        let paging = take_paging(&mut flags)?;
        let resource_id = operation
            .positional
            .and_then(|name| flags.remove(name))
            .map(|entry| entry.value)
            .filter(|value| !value.is_empty());

        Ok(Self {
            service: service.to_string(),
            resource: resource.to_string(),
            operation: operation.verb.to_string(),
            resource_id,
            params: flags.set_values(),
            paging,
            headers,
        })
    }
}

/// Removes `page` / `per_page` from the table and parses them.
///
/// `per_page` without `page` starts at page 1.
pub fn take_paging(flags: &mut FlagTable) -> Result<Option<Paging>> {
    let page = take_number(flags, PAGE_FLAG)?;
    let per_page = take_number(flags, PER_PAGE_FLAG)?;

    Ok(match (page, per_page) {
        (None, None) => None,
        (Some(page), per_page) => Some(Paging { page, per_page }),
        (None, Some(per_page)) => Some(Paging {
            page: 1,
            per_page: Some(per_page),
        }),
    })
}

fn take_number(flags: &mut FlagTable, name: &str) -> Result<Option<u32>> {
    let Some(entry) = flags.remove(name) else {
        return Ok(None);
    };
    if entry.value.is_empty() {
        return Ok(None);
    }

    match entry.value.parse::<u32>() {
        Ok(number) if number > 0 => Ok(Some(number)),
        _ => Err(CliError::InvalidPaging {
            flag: name.to_string(),
            value: entry.value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use cmdtree_core::FlagSpec;

    use super::*;
    use crate::catalog::SERVICES;

    fn paged_table(page: &str, per_page: &str) -> FlagTable {
        let mut table = FlagTable::from_specs(&[
            FlagSpec::required("factory_id"),
            FlagSpec::optional(PAGE_FLAG),
            FlagSpec::optional(PER_PAGE_FLAG),
        ]);
        table.set("factory_id", "f1");
        table.set(PAGE_FLAG, page);
        table.set(PER_PAGE_FLAG, per_page);
        table
    }

    fn find(service: &str, resource: &str, verb: &str) -> &'static OperationSpec {
        SERVICES
            .iter()
            .find(|s| s.name == service)
            .and_then(|s| s.resources.iter().find(|r| r.name == resource))
            .and_then(|r| r.operations.iter().find(|o| o.verb == verb))
            .unwrap()
    }

    #[test]
    fn test_paging_absent() {
        let mut table = paged_table("", "");
        assert_eq!(take_paging(&mut table).unwrap(), None);
        assert!(!table.contains(PAGE_FLAG));
    }

    #[test]
    fn test_per_page_defaults_page_to_one() {
        let mut table = paged_table("", "25");
        assert_eq!(
            take_paging(&mut table).unwrap(),
            Some(Paging {
                page: 1,
                per_page: Some(25)
            })
        );
    }

    #[test]
    fn test_page_only() {
        let mut table = paged_table("3", "");
        assert_eq!(
            take_paging(&mut table).unwrap(),
            Some(Paging {
                page: 3,
                per_page: None
            })
        );
    }

    #[test]
    fn test_invalid_page_is_rejected() {
        for bad in ["abc", "0", "-1"] {
            let mut table = paged_table(bad, "");
            let err = take_paging(&mut table).unwrap_err();
            assert!(matches!(err, CliError::InvalidPaging { ref flag, .. } if flag == PAGE_FLAG));
        }
    }

    #[test]
    fn test_from_flags_splits_id_and_params() {
        let operation = find("flip", "videos", "describe");
        let mut table = FlagTable::from_specs(&[
            FlagSpec::required("factory_id"),
            FlagSpec::required("video_id"),
        ]);
        table.set("factory_id", "f1");
        table.set("video_id", "v1");

        let request =
            Request::from_flags("flip", "videos", operation, table, BTreeMap::new()).unwrap();
        assert_eq!(request.resource_id.as_deref(), Some("v1"));
        assert_eq!(request.params.len(), 1);
        assert_eq!(request.params["factory_id"], "f1");
        assert_eq!(request.paging, None);
    }
}
