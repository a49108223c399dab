//! Copying a child policy under another environment group

use groupsync_core::{DuplicateError, Policy, PolicyApi, PolicyId, LISTS_KEY};
use tracing::{info, instrument};

/// Build the creation payload for a copy of `source` under `target_parent`.
///
/// Server-managed `lists` are dropped, the four anti-malware scan ids are
/// taken from the target parent, and the copy is renamed and reparented.
/// Everything else is carried over from `source` unchanged.
pub fn build_duplicate(
    source: &Policy,
    target_parent: &Policy,
    new_name: &str,
    target_parent_id: PolicyId,
) -> Result<Policy, DuplicateError> {
    let parent_scan = target_parent
        .anti_malware
        .as_ref()
        .ok_or(DuplicateError::MissingAntiMalware {
            policy_id: target_parent.id.unwrap_or(target_parent_id),
        })?;

    let mut copy = source.clone();
    copy.strip_key(LISTS_KEY);

    let scan = copy
        .anti_malware
        .as_mut()
        .ok_or(DuplicateError::MissingAntiMalware {
            policy_id: source.id.unwrap_or(target_parent_id),
        })?;
    scan.adopt_scan_ids(parent_scan);

    copy.name = new_name.to_string();
    copy.set_parent(target_parent_id);
    Ok(copy)
}

/// Fetch `source_id` and `target_parent_id`, then create the adjusted copy.
///
/// Nothing is submitted unless both fetches succeed; the payload is only
/// posted once it is complete. Returns the submitted payload.
#[instrument(skip(api), fields(source_id = %source_id, target_parent_id = %target_parent_id))]
pub async fn duplicate_policy<A>(
    api: &A,
    source_id: PolicyId,
    new_name: &str,
    target_parent_id: PolicyId,
) -> Result<Policy, DuplicateError>
where
    A: PolicyApi + ?Sized,
{
    let source = api.fetch_policy(source_id).await?;
    let target_parent = api.fetch_policy(target_parent_id).await?;

    let copy = build_duplicate(&source, &target_parent, new_name, target_parent_id)?;
    api.create_policy(&copy).await?;

    info!("Duplicated policy {} as '{}'", source_id, new_name);
    Ok(copy)
}
