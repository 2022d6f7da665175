//! These models represent the objects passed around by the agent
//!
//! There are several related formats we need to interact with:
//! - form submissions, sent from the page to the server
//! - openai messages/tools, sent from the agent to the LLM
//! - tool requests, sent from the agent to the systems providing capabilities
//!
//! These overlap to varying degrees. We always immediately convert external
//! data models into the internal structs using to/from helpers, so the
//! internal models are not an exact match to any wire format.
pub mod content;
pub mod message;
pub mod role;
pub mod tool;
