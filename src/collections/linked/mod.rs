//! Linked collection types. Primarily revolves around [`LinkedList`], a doubly linked list which
//! allocates its nodes through an [`Allocator`](crate::alloc::Allocator).

pub mod list;

#[doc(inline)]
pub use list::LinkedList;
