//! Minimal `multipart/form-data` parsing.
//!
//! The service accepts exactly one shape of request — a single file
//! field — so a small strict parser beats pulling in a streaming
//! multipart stack. The whole body is already buffered by the upload
//! size ceiling before parsing starts.

/// One decoded form part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    /// Field name from `Content-Disposition`.
    pub name: String,
    /// Original client filename, if sent.
    pub filename: Option<String>,
    /// Declared part content type, if sent.
    pub content_type: Option<String>,
    /// Raw part payload.
    pub data: Vec<u8>,
}

/// Parse failure; the body did not follow RFC 7578 framing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed multipart body")]
pub struct MultipartError;

/// Extract the boundary parameter from a `Content-Type` header value.
#[must_use]
pub fn boundary(content_type: &str) -> Option<String> {
    let mut params = content_type.split(';');
    if !params
        .next()?
        .trim()
        .eq_ignore_ascii_case("multipart/form-data")
    {
        return None;
    }
    params.find_map(|param| {
        let value = param.trim().strip_prefix("boundary=")?;
        let value = value.trim_matches('"');
        (!value.is_empty()).then(|| value.to_owned())
    })
}

/// Split a buffered body into its parts.
pub fn parse(body: &[u8], boundary: &str) -> Result<Vec<Part>, MultipartError> {
    let delimiter = format!("--{boundary}");
    let delimiter = delimiter.as_bytes();
    let mut parts = Vec::new();
    let mut pos = find(body, delimiter, 0).ok_or(MultipartError)? + delimiter.len();
    loop {
        let rest = body.get(pos..).ok_or(MultipartError)?;
        if rest.starts_with(b"--") {
            break;
        }
        if !rest.starts_with(b"\r\n") {
            return Err(MultipartError);
        }
        let segment_start = pos + 2;
        let next = find(body, delimiter, segment_start).ok_or(MultipartError)?;
        let segment = body[segment_start..next]
            .strip_suffix(b"\r\n")
            .ok_or(MultipartError)?;
        parts.push(parse_part(segment)?);
        pos = next + delimiter.len();
    }
    Ok(parts)
}

fn parse_part(segment: &[u8]) -> Result<Part, MultipartError> {
    let split = find(segment, b"\r\n\r\n", 0).ok_or(MultipartError)?;
    let headers = std::str::from_utf8(&segment[..split]).map_err(|_| MultipartError)?;
    let data = segment[split + 4..].to_vec();
    let mut name = None;
    let mut filename = None;
    let mut content_type = None;
    for line in headers.split("\r\n") {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        if key.eq_ignore_ascii_case("content-disposition") {
            for param in value.split(';') {
                let param = param.trim();
                if let Some(v) = param.strip_prefix("name=") {
                    name = Some(v.trim_matches('"').to_owned());
                } else if let Some(v) = param.strip_prefix("filename=") {
                    filename = Some(v.trim_matches('"').to_owned());
                }
            }
        } else if key.eq_ignore_ascii_case("content-type") {
            content_type = Some(value.trim().to_owned());
        }
    }
    Ok(Part {
        name: name.ok_or(MultipartError)?,
        filename,
        content_type,
        data,
    })
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    let tail = haystack.get(from..)?;
    tail.windows(needle.len())
        .position(|window| window == needle)
        .map(|index| index + from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn body_of(boundary: &str, parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, content_type, data) in parts {
            body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"f.png\"\r\n"
                )
                .as_bytes(),
            );
            if let Some(ct) = content_type {
                body.extend_from_slice(format!("Content-Type: {ct}\r\n").as_bytes());
            }
            body.extend_from_slice(b"\r\n");
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
        body
    }

    #[test]
    fn boundary_is_extracted() {
        assert_eq!(
            boundary("multipart/form-data; boundary=xYz123").as_deref(),
            Some("xYz123")
        );
        assert_eq!(
            boundary("multipart/form-data; boundary=\"quoted\"").as_deref(),
            Some("quoted")
        );
        assert_eq!(boundary("application/json"), None);
        assert_eq!(boundary("multipart/form-data"), None);
    }

    #[test]
    fn single_part_round_trips() {
        let body = body_of("sep", &[("image", Some("image/png"), b"\x89PNG payload")]);
        let parts = parse(&body, "sep").unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].name, "image");
        assert_eq!(parts[0].filename.as_deref(), Some("f.png"));
        assert_eq!(parts[0].content_type.as_deref(), Some("image/png"));
        assert_eq!(parts[0].data, b"\x89PNG payload");
    }

    #[test]
    fn binary_payload_with_crlf_survives() {
        let payload = b"line1\r\nline2\r\n\r\nbinary\x00\xff";
        let body = body_of("sep", &[("image", Some("image/png"), payload)]);
        let parts = parse(&body, "sep").unwrap();
        assert_eq!(parts[0].data, payload);
    }

    #[test]
    fn multiple_parts_are_all_returned() {
        let body = body_of(
            "sep",
            &[
                ("mode", None, b"bw"),
                ("image", Some("image/png"), b"data"),
            ],
        );
        let parts = parse(&body, "sep").unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1].name, "image");
    }

    #[test]
    fn missing_final_delimiter_is_malformed() {
        let mut body = body_of("sep", &[("image", Some("image/png"), b"data")]);
        body.truncate(body.len() - 8);
        assert!(parse(&body, "sep").is_err());
    }

    #[test]
    fn part_without_name_is_malformed() {
        let body = b"--sep\r\nContent-Disposition: form-data\r\n\r\ndata\r\n--sep--\r\n";
        assert!(parse(body, "sep").is_err());
    }

    #[test]
    fn empty_body_is_malformed() {
        assert!(parse(b"", "sep").is_err());
    }
}
