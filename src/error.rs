//! Error types for the `bounded-hash-table` crate

/// Errors raised by the checked entry points of
/// [`BoundedHashTable`](crate::BoundedHashTable).
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The key argument was unset.
    ///
    /// `op` names the operation that rejected it. The table is left
    /// untouched.
    #[error("argument to {op}() is null")]
    InvalidArgument {
        /// Operation that received the unset key.
        op: &'static str,
    },
}

/// Reasons an insertion of a new key can be refused.
///
/// Neither case mutates the table; the rejected value is dropped.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum InsertError {
    /// The table already holds half of its physical slots.
    #[error("admission cap reached, table holds half of its slots")]
    CapacityReached,

    /// Every slot in the key's bucket is held by another key.
    ///
    /// Global capacity may remain; only this bucket is exhausted.
    #[error("bucket saturated, no free slot in the key's row")]
    BucketFull,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        let e = Error::InvalidArgument { op: "get" };
        assert_eq!(e.to_string(), "argument to get() is null");
        assert_eq!(
            InsertError::CapacityReached.to_string(),
            "admission cap reached, table holds half of its slots"
        );
        assert_eq!(
            InsertError::BucketFull.to_string(),
            "bucket saturated, no free slot in the key's row"
        );
    }
}
