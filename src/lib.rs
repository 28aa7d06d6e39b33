//! edugen — educational content generation over a generative-AI provider.
//!
//! ARCHITECTURE
//! ============
//! Leaf modules first: `attachment` (file → base64 inline payload), `prompt`
//! (settings + source text → instruction string), `llm` (provider adapter).
//! `services` builds the generation client, the per-tool controllers and
//! the browser sessions on top of them; `routes` exposes sessions over HTTP.

pub mod attachment;
pub mod config;
pub mod error;
pub mod labels;
pub mod llm;
pub mod prompt;
pub mod routes;
pub mod services;
pub mod state;
pub mod tool;
