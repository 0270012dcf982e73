//! The record trait consumed by the evaluator.

use crate::timestamp::Timestamp;

/// Something with a name and a timestamp that a query can filter.
///
/// The evaluator reads nothing else from a record. Implement this for the
/// storage layer's entry type, or use the tuple impls for quick cases.
///
/// ```
/// use qaul_query::{Record, Timestamp};
///
/// struct Message {
///     subject: String,
///     sent_at: u64,
/// }
///
/// impl Record for Message {
///     fn name(&self) -> &str {
///         &self.subject
///     }
///
///     fn timestamp(&self) -> Timestamp {
///         Timestamp::from_secs(self.sent_at)
///     }
/// }
///
/// let msg = Message { subject: "hello".into(), sent_at: 10 };
/// assert_eq!(msg.name(), "hello");
/// assert_eq!(("img_001", 10u64).timestamp(), Timestamp(10));
/// ```
pub trait Record {
    /// The record's name.
    fn name(&self) -> &str;

    /// The record's timestamp.
    fn timestamp(&self) -> Timestamp;
}

impl<R: Record + ?Sized> Record for &R {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn timestamp(&self) -> Timestamp {
        (**self).timestamp()
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn timestamp(&self) -> Timestamp {
        (**self).timestamp()
    }
}

impl<S: AsRef<str>> Record for (S, u64) {
    fn name(&self) -> &str {
        self.0.as_ref()
    }

    fn timestamp(&self) -> Timestamp {
        Timestamp(self.1)
    }
}

impl<S: AsRef<str>> Record for (S, Timestamp) {
    fn name(&self) -> &str {
        self.0.as_ref()
    }

    fn timestamp(&self) -> Timestamp {
        self.1
    }
}
