//! Branch layout hints for the code generator.

/// Marks the calling path as rarely taken.
///
/// Called at the top of a slow path so that the fast path ends up as
/// the fall-through case. Stands in for [`std::hint::cold_path`] until
/// that is stabilized.
#[cold]
#[inline(always)]
pub fn cold_path() {}
