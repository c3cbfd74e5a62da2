// JSON error body for HTTP routes that refuse a request (e.g. arena closed on upgrade).

#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
