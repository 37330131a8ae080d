//! Index-based entity identifiers.
//!
//! Every entity lives in a [`Registry`](super::Registry) arena and is
//! addressed by a dense, zero-based index wrapped in a newtype. Entities
//! refer to each other only through these ids, never through references.

/// Defines a `usize` newtype id with `Display` and index accessors.
macro_rules! define_index_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Copy,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub struct $name(pub usize);

        impl $name {
            /// Arena index of this entity.
            #[inline]
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::write!(f, "{}", self.0)
            }
        }

        impl ::std::convert::From<usize> for $name {
            fn from(v: usize) -> Self {
                $name(v)
            }
        }
    };
}

define_index_id!(
    /// Identifier of a [`Teacher`](super::Teacher).
    TeacherId
);
define_index_id!(
    /// Identifier of a [`Subject`](super::Subject).
    SubjectId
);
define_index_id!(
    /// Identifier of a [`SchoolClass`](super::SchoolClass).
    ClassId
);
define_index_id!(
    /// Identifier of a [`Lesson`](super::Lesson). Also the gene type of a chromosome.
    LessonId
);
