//! Arena-backed document model
//!
//! Provides the node capability set (`NodeApi`) that element builders drive,
//! an arena implementation of it, and markup serialization.
//!
//! ## Core Design
//!
//! ```text
//! NodeApi (trait) ← DomArena (Vec<DomNode>, NodeId = u32)
//!                        ↓
//!                  DomSerializer → markup
//! ```

pub mod api;
pub mod arena;
pub mod error;
pub mod serializer;
pub mod types;
pub mod utils;

pub use api::NodeApi;
pub use arena::DomArena;
pub use error::{DomError, Result};
pub use serializer::{DomSerializer, SerializerConfig};
pub use types::*;
