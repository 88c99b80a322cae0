//! In-memory tag tree.
//!
//! A decoded stream becomes one [`Tag`]; containers are [`Compound`] (named
//! entries) and [`List`] (homogeneous elements). Trees are built once by the
//! decoder and only read afterwards.

pub mod compound;
pub mod list;
pub mod tag;

pub use compound::{Compound, Lookup};
pub use list::List;
pub use tag::{Tag, TagType};
