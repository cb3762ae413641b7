//! Subcommand handlers, one module per resource, sharing the generic
//! list/mutation plumbing below.

pub mod categories;
pub mod inventories;
pub mod products;
pub mod units;

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use scorta::domain::query::ListQuery;
use scorta::domain::resources::ListResource;
use scorta::{QueryUpdate, ResourceHandle};

use crate::args::ListArgs;
use crate::context::CliError;
use crate::print::print_json;

pub(crate) fn list_query(args: &ListArgs) -> Result<ListQuery, CliError> {
    let mut filters = BTreeMap::new();
    for pair in &args.filters {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| CliError::InvalidInput(format!("filter `{pair}` is not KEY=VALUE")))?;
        filters.insert(key.to_string(), value.to_string());
    }

    let mut query = ListQuery::new(args.page, args.size);
    let update = QueryUpdate {
        keyword: args.keyword.clone(),
        filters: Some(filters),
        ..Default::default()
    };
    // Keyword/filter merging resets the page; restore the explicit one.
    query = query.merge(&update);
    query.page = args.page.max(1);
    Ok(query)
}

pub(crate) async fn list<T>(handle: &ResourceHandle<T>, args: &ListArgs) -> Result<(), CliError>
where
    T: ListResource + Serialize,
{
    let page = handle.query(list_query(args)?).await?;
    print_json(&page)?;
    Ok(())
}

pub(crate) async fn create<T>(
    handle: &ResourceHandle<T>,
    payload: &T::Payload,
) -> Result<(), CliError>
where
    T: ListResource + Serialize,
{
    let record = handle.create(payload).await?;
    print_json(&record)?;
    Ok(())
}

pub(crate) async fn update<T>(
    handle: &ResourceHandle<T>,
    id: Uuid,
    payload: &T::Payload,
) -> Result<(), CliError>
where
    T: ListResource + Serialize,
{
    let record = handle.update(id, payload).await?;
    print_json(&record)?;
    Ok(())
}

pub(crate) async fn delete<T>(handle: &ResourceHandle<T>, id: Uuid) -> Result<(), CliError>
where
    T: ListResource,
{
    handle.on_delete(id).await?;
    print_json(&json!({ "deleted": id }))?;
    Ok(())
}
