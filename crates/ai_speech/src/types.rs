//! Wire types for the synthesis endpoint

use serde::Serialize;

/// JSON body of one synthesis request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesisRequest<'a> {
    pub text: &'a str,
    pub speaker: &'a str,
    pub speed: f32,
}
