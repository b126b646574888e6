pub mod fallback;
pub mod trace_headers;
pub mod trace_response_body;
