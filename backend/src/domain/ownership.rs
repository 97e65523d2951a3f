//! Ownership-checked mutation protocol.
//!
//! Every mutable resource is owned by exactly one user. Updates and deletes
//! run the same two-step check — existence first, then ownership — and
//! partial updates merge fields under the sentinel-skip rule. The two
//! failure modes stay distinct here so services can log the real cause;
//! adapters collapse both into a single not-found signal so callers cannot
//! probe for other users' resources.

use super::error::Error;
use super::user::UserId;

/// Placeholder text treated as "leave this field alone" in patches.
///
/// Inherited from the source contract, whose example request bodies use
/// `"string"` and `0` as placeholders. A caller who genuinely wants to set a
/// text field to `"string"` or a number to zero cannot do so through a
/// partial update. Known wart, preserved for compatibility.
pub const TEXT_SENTINEL: &str = "string";

/// Internal outcome of the existence/ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OwnershipError {
    /// No entity with the requested id exists.
    #[error("resource does not exist")]
    Missing,
    /// The entity exists but belongs to a different user.
    #[error("resource belongs to another user")]
    ForeignOwner,
}

impl OwnershipError {
    /// Collapse into the externally visible not-found signal.
    ///
    /// Absent and foreign-owned resources must be indistinguishable to the
    /// caller; the real cause is only logged.
    pub fn into_not_found(self, resource: &str) -> Error {
        match self {
            Self::Missing => tracing::debug!(resource, "mutation target does not exist"),
            Self::ForeignOwner => {
                tracing::debug!(resource, "mutation target owned by another user");
            }
        }
        Error::not_found(format!("{resource} not found"))
    }
}

/// A resource owned by exactly one user for its whole life.
pub trait OwnedResource {
    /// Identifier of the owning user.
    fn owner_id(&self) -> UserId;
}

/// A partial update applied under the sentinel-skip rule.
pub trait SentinelPatch<T> {
    /// Merge the non-sentinel fields of the patch into `target`.
    fn merge_into(&self, target: &mut T);
}

/// Resolve a lookup result into an entity the caller may mutate.
///
/// Existence is checked before ownership, and the two failures carry
/// different variants so the true cause can be logged internally.
pub fn claim_owned<T: OwnedResource>(
    entity: Option<T>,
    caller: UserId,
) -> Result<T, OwnershipError> {
    let entity = entity.ok_or(OwnershipError::Missing)?;
    if entity.owner_id() != caller {
        return Err(OwnershipError::ForeignOwner);
    }
    Ok(entity)
}

/// Run the ownership check and apply a sentinel-skip merge.
///
/// Returns the merged entity; persisting it is the caller's job.
pub fn merge_owned<T, P>(entity: Option<T>, caller: UserId, patch: &P) -> Result<T, OwnershipError>
where
    T: OwnedResource,
    P: SentinelPatch<T>,
{
    let mut entity = claim_owned(entity, caller)?;
    patch.merge_into(&mut entity);
    Ok(entity)
}

/// Apply a text field unless it equals the sentinel (case-insensitive).
pub fn patch_text(target: &mut String, value: &str) {
    if !value.eq_ignore_ascii_case(TEXT_SENTINEL) {
        value.clone_into(target);
    }
}

/// Apply an integer field unless it is zero.
pub fn patch_i64(target: &mut i64, value: i64) {
    if value != 0 {
        *target = value;
    }
}

/// Apply an integer field unless it is zero.
pub fn patch_i32(target: &mut i32, value: i32) {
    if value != 0 {
        *target = value;
    }
}

/// Apply a float field unless it is zero.
pub fn patch_f64(target: &mut f64, value: f64) {
    if value != 0.0 {
        *target = value;
    }
}
