//! Script request domain: form state, the outgoing payload, and the returned script.
//!
//! Nothing in here touches the terminal, the network, or the disk.

pub mod form;
pub mod payload;
pub mod result;

pub use form::{Duration, FormField, FormState, Genre, ScriptMode};
pub use payload::{RequestPayload, ValidationError, build_payload};
pub use result::{ResultField, ResultPayload};
