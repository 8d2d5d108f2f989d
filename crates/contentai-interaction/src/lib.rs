//! HTTP interaction with the ContentAI backend.
//!
//! - `transport`: request model, the `Transport` seam and its reqwest implementation
//! - `api`: one typed method per backend endpoint
//! - `image_probe`: checks that a generated image URL actually serves an image

pub mod api;
pub mod image_probe;
pub mod transport;

pub use api::{ContentApi, ImageGeneration, TextGeneration};
pub use image_probe::{HttpImageProbe, ImageProbe};
pub use transport::{ApiRequest, AuthMode, FormPart, HttpTransport, MultipartForm, RequestBody, Transport};
