//! Strongly typed identifier wrappers and the id allocator.
//!
//! Ids are signed: persisted records carry non-negative ids, while records
//! that exist only in an editing session carry negative placeholder ids
//! until the surrounding store assigns real ones.  All ids are
//! `Copy + Ord + Hash` so they can be used as map keys without ceremony.

use std::fmt;

/// Generate a typed ID wrapper around a signed integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub $inner);

        impl $name {
            /// `true` for temporary ids that have not been persisted yet.
            #[inline(always)]
            pub fn is_placeholder(self) -> bool {
                self.0 < 0
            }

            #[inline(always)]
            pub fn raw(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(raw: $inner) -> $name {
                $name(raw)
            }
        }
    };
}

typed_id! {
    /// Identifier of a graph vertex (and of the route node backing it).
    pub struct VertexId(i64);
}

typed_id! {
    /// Identifier of a directed graph edge (and of the route edge backing it).
    pub struct EdgeId(i64);
}

typed_id! {
    /// Identifier of a site location (pit, dump, workshop, ...).
    pub struct LocationId(i64);
}

typed_id! {
    /// Identifier of a vehicle class used by restriction groups.
    pub struct AssetTypeId(i64);
}

// ── IdAllocator ───────────────────────────────────────────────────────────────

/// Monotonic id source shared by the vertices and edges of one graph.
///
/// Every id inserted from an external description is passed through
/// [`observe`](Self::observe), which keeps `next` one past the largest id
/// seen.  Fresh ids therefore never collide with carried-over ones and the
/// counter is maintained in O(1) per insertion instead of rescanning.
///
/// Placeholder ids count down from `-1` and are independent of `next`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdAllocator {
    next:        i64,
    placeholder: i64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// An allocator whose first fresh id is `first` (clamped to `>= 0`).
    pub fn starting_at(first: i64) -> Self {
        Self { next: first.max(0), placeholder: -1 }
    }

    /// Record an id carried over from elsewhere.  Negative ids are ignored.
    #[inline]
    pub fn observe(&mut self, raw: i64) {
        if raw >= self.next {
            self.next = raw.saturating_add(1);
        }
    }

    /// Mint the next fresh, non-negative id.
    #[inline]
    pub fn next_raw(&mut self) -> i64 {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }

    /// Mint the next placeholder id (`-1`, `-2`, ...).
    #[inline]
    pub fn next_placeholder(&mut self) -> i64 {
        let id = self.placeholder;
        self.placeholder -= 1;
        id
    }

    /// The id the next call to [`next_raw`](Self::next_raw) will return.
    #[inline]
    pub fn peek(&self) -> i64 {
        self.next
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
