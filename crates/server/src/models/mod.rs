//! Document and wire types for the two collections.
//!
//! Each entity has two shapes: a `*Document` that mirrors the stored BSON
//! (ObjectId ids, BSON datetimes) and a `*Response` that carries the wire
//! representation (hex-string ids, RFC 3339 timestamps). Handlers never
//! return documents directly.

pub mod moderator;
pub mod product;

pub use moderator::{ModeratorDocument, ModeratorResponse, ModeratorUpdate, NewModerator};
pub use product::{NewProduct, ProductDocument, ProductResponse, ProductUpdate};
