mod client;
mod types;
pub mod theatres;

pub use client::{GenerativeModel, DEFAULT_AI_ENDPOINT};
pub use theatres::{find_theatres, parse_theatre_response, Theatre, TheatreMovie, TheatreQuery, TheatreResults};
pub use types::{
    GenerateContentRequest, GenerateContentResponse, GroundingChunk, GroundingMetadata, SearchEntryPoint, WebSource,
};
