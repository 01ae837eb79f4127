//! Public origin of the current request, used to build absolute file URLs.

use axum::http::{header, HeaderMap, Uri};

const FORWARDED_PROTO: &str = "x-forwarded-proto";
const FORWARDED_HOST: &str = "x-forwarded-host";

/// First value of a possibly comma separated header.
fn first_header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// `scheme://host` as seen by the client.
///
/// Scheme comes from `X-Forwarded-Proto`, else `http`. Host comes from
/// `X-Forwarded-Host`, then `Host`, then the request URI authority.
pub fn request_origin(headers: &HeaderMap, uri: &Uri) -> String {
    let scheme = first_header_value(headers, FORWARDED_PROTO).unwrap_or("http");

    let host = first_header_value(headers, FORWARDED_HOST)
        .or_else(|| first_header_value(headers, header::HOST.as_str()))
        .map(str::to_string)
        .or_else(|| uri.authority().map(|a| a.to_string()))
        .unwrap_or_else(|| "localhost".to_string());

    format!("{}://{}", scheme, host)
}

/// Absolute URL of a stored file under `mount_path`.
pub fn file_url(origin: &str, mount_path: &str, filename: &str) -> String {
    format!(
        "{}/{}/{}",
        origin.trim_end_matches('/'),
        mount_path.trim_matches('/'),
        filename
    )
}
