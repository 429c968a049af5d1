//! Header transformation in both directions.
//!
//! Requests lose `Host` (the client sets it from the target URL) and the
//! hop-by-hop headers. Responses lose the hop-by-hop headers and the
//! upstream's `Content-Disposition`, which is replaced with an attachment
//! disposition naming the downloaded file.

use axum::http::{header, HeaderMap, HeaderName, HeaderValue};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Headers that describe a single connection and must not be forwarded.
const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    HeaderName::from_static("keep-alive"),
];

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(name) || name.as_str() == "proxy-connection"
}

/// Copy inbound request headers for the outbound request.
pub fn forward_request_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut outbound = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound {
        if name == header::HOST || is_hop_by_hop(name) {
            continue;
        }
        outbound.append(name.clone(), value.clone());
    }
    outbound
}

/// Copy upstream response headers for the client, forcing a download.
pub fn forward_response_headers(upstream: &HeaderMap, file_name: &str) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(upstream.len() + 1);
    for (name, value) in upstream {
        if name == header::CONTENT_DISPOSITION || is_hop_by_hop(name) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    headers.insert(header::CONTENT_DISPOSITION, attachment(file_name));
    headers
}

/// RFC 5987 `attr-char`: everything else is percent-encoded in `filename*`.
const ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// `attachment; filename="<name>"`, plus `filename*=UTF-8''<name>` when the
/// name is not plain ASCII.
pub fn attachment(file_name: &str) -> HeaderValue {
    let fallback: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c == ' ' || c.is_ascii_graphic() => c,
            _ => '_',
        })
        .collect();

    let value = if file_name.is_ascii() {
        format!("attachment; filename=\"{fallback}\"")
    } else {
        let encoded = utf8_percent_encode(file_name, ATTR_CHAR);
        format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
    };

    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_headers_drop_host_and_hop_by_hop() {
        let mut inbound = HeaderMap::new();
        inbound.insert(header::HOST, HeaderValue::from_static("proxy.local:4080"));
        inbound.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        inbound.insert("keep-alive", HeaderValue::from_static("timeout=5"));
        inbound.insert(header::USER_AGENT, HeaderValue::from_static("curl/8.0"));
        inbound.append(header::ACCEPT, HeaderValue::from_static("text/plain"));
        inbound.append(header::ACCEPT, HeaderValue::from_static("*/*"));

        let outbound = forward_request_headers(&inbound);

        assert!(outbound.get(header::HOST).is_none());
        assert!(outbound.get(header::CONNECTION).is_none());
        assert!(outbound.get("keep-alive").is_none());
        assert_eq!(outbound[header::USER_AGENT], "curl/8.0");
        assert_eq!(outbound.get_all(header::ACCEPT).iter().count(), 2);
    }

    #[test]
    fn test_response_disposition_is_replaced() {
        let mut upstream = HeaderMap::new();
        upstream.insert(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_static("inline; filename=\"evil.html\""),
        );
        upstream.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        upstream.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));

        let headers = forward_response_headers(&upstream, "file.txt");

        assert_eq!(headers.get_all(header::CONTENT_DISPOSITION).iter().count(), 1);
        assert_eq!(headers[header::CONTENT_DISPOSITION], "attachment; filename=\"file.txt\"");
        assert_eq!(headers[header::CONTENT_TYPE], "text/plain");
        assert!(headers.get(header::TRANSFER_ENCODING).is_none());
    }

    #[test]
    fn test_attachment_value() {
        assert_eq!(attachment("a.bin"), "attachment; filename=\"a.bin\"");
        assert_eq!(attachment("My Report.pdf"), "attachment; filename=\"My Report.pdf\"");
        assert_eq!(attachment("bad\nname"), "attachment; filename=\"bad_name\"");
    }

    #[test]
    fn test_attachment_non_ascii_name() {
        assert_eq!(
            attachment("résumé.pdf"),
            "attachment; filename=\"r_sum_.pdf\"; filename*=UTF-8''r%C3%A9sum%C3%A9.pdf"
        );
        assert_eq!(
            attachment("年报 2024.xlsx"),
            "attachment; filename=\"__ 2024.xlsx\"; filename*=UTF-8''%E5%B9%B4%E6%8A%A5%202024.xlsx"
        );
    }
}
