//! Paged Resource Iterator
//!
//! Walks the list/describe protocol: one list call up front, then one describe
//! call per key as the caller pulls records.

use super::registry::ResourceDef;
use super::session::{ApiResponse, ArraySession};
use super::{Record, ResourceType};
use crate::error::{InventoryError, Result};
use serde_json::Value;
use std::collections::VecDeque;

/// Lazy, one-shot sequence of detail records for one resource type.
///
/// Only the list call is checked when the iterator is built. Each describe call
/// is checked as it happens and a failure comes out as an `Err` item.
pub struct PagedResources<D> {
    resource: ResourceType,
    keys: VecDeque<String>,
    describe: D,
}

impl<D> PagedResources<D>
where
    D: FnMut(&str) -> Result<ApiResponse>,
{
    /// Run the list call and queue the keys it returned
    pub fn new<L>(resource: ResourceType, list: L, describe: D) -> Result<Self>
    where
        L: FnOnce() -> Result<ApiResponse>,
    {
        let response = list()?;

        if !response.is_success() {
            tracing::error!(
                "Error while listing {}: status {}",
                resource,
                response.status
            );
            return Err(InventoryError::collection(
                resource,
                format!("list request returned status {}", response.status),
            ));
        }

        let keys = extract_keys(response.body.as_ref(), resource.def());
        tracing::debug!("{} {} to describe", keys.len(), resource);

        Ok(Self {
            resource,
            keys,
            describe,
        })
    }

    /// Keys not yet described
    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

/// Build the iterator for one resource type on a live session
pub fn paged_resources<'a, S>(
    session: &'a S,
    resource: ResourceType,
) -> Result<PagedResources<impl FnMut(&str) -> Result<ApiResponse> + 'a>>
where
    S: ArraySession + ?Sized,
{
    PagedResources::new(
        resource,
        || session.list(resource, resource.def().list_filters),
        move |key: &str| session.describe(resource, key),
    )
}

impl<D> Iterator for PagedResources<D>
where
    D: FnMut(&str) -> Result<ApiResponse>,
{
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.pop_front()?;
        let response = (self.describe)(&key);
        Some(response.and_then(|response| into_record(self.resource, &key, response)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.keys.len(), Some(self.keys.len()))
    }
}

/// Check one describe answer and unwrap the record it carries
pub(crate) fn into_record(
    resource: ResourceType,
    key: &str,
    response: ApiResponse,
) -> Result<Record> {
    if !response.is_success() {
        tracing::error!(
            "Error while describing {} {}: status {}",
            resource,
            key,
            response.status
        );
        return Err(InventoryError::collection(
            resource,
            format!("describe {} returned status {}", key, response.status),
        ));
    }

    match response.body {
        Some(Value::Object(record)) => Ok(record),
        Some(_) => Err(InventoryError::collection(
            resource,
            format!("describe {} returned a non-object body", key),
        )),
        None => Err(InventoryError::collection(
            resource,
            format!("describe {} returned an empty body", key),
        )),
    }
}

/// Pull the identifying keys out of a listing body.
///
/// An absent body, or a body without the expected path, means nothing to list.
pub(crate) fn extract_keys(body: Option<&Value>, def: &ResourceDef) -> VecDeque<String> {
    let Some(mut current) = body else {
        return VecDeque::new();
    };

    for part in def.response_path.split('.') {
        current = match current.get(part) {
            Some(v) => v,
            None => return VecDeque::new(),
        };
    }

    let Some(items) = current.as_array() else {
        return VecDeque::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let key = match def.item_key {
                Some(field) => item.get(field),
                None => Some(item),
            };
            let text = key.and_then(key_text);
            if text.is_none() {
                tracing::warn!("Skipping malformed {} entry: {}", def.display_name, item);
            }
            text
        })
        .collect()
}

fn key_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
