//! URL 规范化模块
//!
//! 保证入库的 URL 带有显式协议前缀，并阻止危险协议

use url::Url;

/// URL 规范化错误
#[derive(Debug)]
pub enum UrlNormalizeError {
    EmptyUrl,
    InvalidProtocol(String),
    DangerousProtocol(String),
    InvalidFormat(String),
}

impl std::fmt::Display for UrlNormalizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL cannot be empty"),
            Self::InvalidProtocol(proto) => write!(
                f,
                "Invalid protocol: {}. Only http:// and https:// are allowed",
                proto
            ),
            Self::DangerousProtocol(proto) => {
                write!(f, "Dangerous protocol blocked: {}", proto)
            }
            Self::InvalidFormat(msg) => write!(f, "Invalid URL format: {}", msg),
        }
    }
}

impl std::error::Error for UrlNormalizeError {}

/// 危险协议列表
const DANGEROUS_PROTOCOLS: &[&str] = &[
    "javascript:",
    "data:",
    "file:",
    "vbscript:",
    "about:",
    "blob:",
];

/// Canonicalize an input URL so it always carries an explicit scheme.
///
/// Rules:
/// 1. 输入不为空
/// 2. 不是危险协议（javascript:, data:, file: 等）
/// 3. `http://` / `https://` inputs pass through unchanged
/// 4. Other schemes (ftp://, mailto:, ...) are rejected
/// 5. Scheme-less inputs get an `https://` prefix, then must parse as a
///    valid URL with a host
///
/// A real parse decides whether a scheme is present, so inputs like
/// `httpsomething.com` are prefixed correctly where a naive string-prefix
/// check would let them through.
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizeError> {
    let url = input.trim();

    if url.is_empty() {
        return Err(UrlNormalizeError::EmptyUrl);
    }

    let url_lower = url.to_lowercase();
    for proto in DANGEROUS_PROTOCOLS {
        if url_lower.starts_with(proto) {
            return Err(UrlNormalizeError::DangerousProtocol(proto.to_string()));
        }
    }

    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(url.to_string()),
        // 解析出了非 http(s) 协议：可能是真的外部协议（ftp://、mailto:），
        // 也可能是被当成伪协议的 "host:port"。只有后者才允许补前缀
        Ok(parsed) => {
            if looks_like_host_port(url) {
                prefix_scheme(url)
            } else {
                Err(UrlNormalizeError::InvalidProtocol(format!(
                    "{}:",
                    parsed.scheme()
                )))
            }
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => prefix_scheme(url),
        Err(e) => Err(UrlNormalizeError::InvalidFormat(e.to_string())),
    }
}

/// `localhost:8080` parses as scheme "localhost", path "8080". Treat the
/// input as scheme-less only when the colon is followed by a bare numeric
/// port, not by `//...` or anything else that marks real scheme syntax.
fn looks_like_host_port(url: &str) -> bool {
    match url.split_once(':') {
        Some((_, rest)) => {
            let port = rest.split('/').next().unwrap_or("");
            !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

fn prefix_scheme(url: &str) -> Result<String, UrlNormalizeError> {
    let candidate = format!("https://{}", url);
    let parsed =
        Url::parse(&candidate).map_err(|e| UrlNormalizeError::InvalidFormat(e.to_string()))?;

    if parsed.host_str().is_none() {
        return Err(UrlNormalizeError::InvalidFormat(format!(
            "no host in URL: {}",
            url
        )));
    }

    Ok(candidate)
}
