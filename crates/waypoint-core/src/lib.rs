//! Protocol generation engine for structures in transition.
//!
//! Takes a normalized [`input::ProtocolInput`] and produces a
//! [`protocol::GeneratedProtocol`]: per-participant guidance, stakeholder
//! templates, a milestone timeline, success metrics, contingency plans, and
//! one assembled markdown document. Generation is a pure, synchronous pass.

pub mod input;
pub mod pacing;
pub mod protocol;
pub mod taxonomy;

pub use input::{ProtocolInput, ProtocolNode, Timeline};
pub use protocol::{GeneratedProtocol, generate_protocol, generate_protocol_with};
pub use taxonomy::Taxonomy;
