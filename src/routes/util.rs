//! Shared query parsing utilities for event handlers.

/// Parse a URL-encoded `key=value&key2=value2` string into pairs.
pub fn parse_form_body(body: &str) -> Vec<(String, String)> {
    if body.is_empty() {
        return Vec::new();
    }
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next()?;
            let val = parts.next().unwrap_or("");
            Some((percent_decode(key), percent_decode(val)))
        })
        .collect()
}

/// Percent-decode a URL-encoded value. Decoded bytes are read as UTF-8;
/// malformed escapes are kept literally.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = bytes
                    .get(i + 1..i + 3)
                    .and_then(|h| core::str::from_utf8(h).ok())
                    .and_then(|h| u8::from_str_radix(h, 16).ok());
                match hex {
                    Some(val) => {
                        out.push(val);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Parse a query string into key-value pairs.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    let q = query.strip_prefix('?').unwrap_or(query);
    parse_form_body(q)
}

/// Helper to get a value by key from a list of key-value pairs.
pub fn get_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Element index parameter, e.g. `index=2`.
pub fn get_index(params: &[(String, String)], key: &str) -> Option<usize> {
    get_param(params, key).and_then(|v| v.trim().parse().ok())
}

/// Numeric parameter; non-finite values count as missing.
pub fn get_f64(params: &[(String, String)], key: &str) -> Option<f64> {
    get_param(params, key)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_form_body_works() {
        let pairs = parse_form_body("group=stat&index=2&extra");
        assert_eq!(pairs.len(), 3);
        assert_eq!(get_param(&pairs, "group"), Some("stat"));
        assert_eq!(get_param(&pairs, "extra"), Some(""));
    }

    #[test]
    fn parse_form_body_empty() {
        assert!(parse_form_body("").is_empty());
        assert!(parse_form_body("&&").is_empty());
    }

    #[test]
    fn percent_decode_plus_as_space() {
        assert_eq!(percent_decode("hello+world"), "hello world");
    }

    #[test]
    fn percent_decode_hex_and_utf8() {
        assert_eq!(percent_decode("hello%20world"), "hello world");
        assert_eq!(percent_decode("caf%C3%A9"), "café");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
    }

    #[test]
    fn parse_query_strips_prefix() {
        let pairs = parse_query("?key=Escape");
        assert_eq!(get_param(&pairs, "key"), Some("Escape"));
    }

    #[test]
    fn numeric_params() {
        let pairs = parse_query("index=3&top=120.5&bad=x&inf=inf");
        assert_eq!(get_index(&pairs, "index"), Some(3));
        assert_eq!(get_index(&pairs, "bad"), None);
        assert_eq!(get_f64(&pairs, "top"), Some(120.5));
        assert_eq!(get_f64(&pairs, "inf"), None);
        assert_eq!(get_f64(&pairs, "missing"), None);
    }
}
