use std::alloc::Layout;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant, TryInto};

/// The allocator was unable to satisfy a request for `size` bytes aligned to `align`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfMemory {
    /// The size of the failed request in bytes.
    pub size: usize,
    /// The alignment of the failed request.
    pub align: usize,
}

impl OutOfMemory {
    /// Describes a failed request for `layout`.
    pub const fn for_layout(layout: Layout) -> OutOfMemory {
        OutOfMemory {
            size: layout.size(),
            align: layout.align(),
        }
    }
}

impl Display for OutOfMemory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Out of memory while allocating {} bytes with alignment {}!",
            self.size, self.align
        )
    }
}

impl Error for OutOfMemory {}

/// The requested number of slots can't be described by a valid [`Layout`], because the total size
/// would exceed [`isize::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityOverflow;

impl Display for CapacityOverflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Capacity overflow!")
    }
}

impl Error for CapacityOverflow {}

/// Any failure produced by an [`Allocator`](super::Allocator) or while computing the layout of a
/// request for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From, TryInto, IsVariant)]
pub enum AllocError {
    /// The backend couldn't provide the memory.
    OutOfMemory(OutOfMemory),
    /// The request was too large to describe.
    CapacityOverflow(CapacityOverflow),
}
