/// Outcome of an ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Denied,
}

/// Decides whether `caller_id` may mutate a resource owned by `resource_owner_id`.
///
/// Only the owner may mutate. The caller is expected to have been
/// authenticated already; turning `Denied` into an error is up to the caller.
pub fn authorize_mutation(caller_id: i64, resource_owner_id: i64) -> Access {
    if caller_id == resource_owner_id {
        Access::Allowed
    } else {
        Access::Denied
    }
}
