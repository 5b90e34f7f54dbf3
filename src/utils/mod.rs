use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

/// Parse repeated `--header "Name: value"` arguments into a header map.
pub fn parse_headers(args: &[String]) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    for arg in args {
        let (name, value) = arg
            .split_once(':')
            .with_context(|| format!("invalid header '{}': expected \"Name: value\"", arg))?;

        let name: HeaderName = name
            .trim()
            .parse()
            .with_context(|| format!("invalid header name '{}'", name.trim()))?;
        let value: HeaderValue = value
            .trim()
            .parse()
            .with_context(|| format!("invalid value for header '{}'", name))?;

        headers.append(name, value);
    }

    Ok(headers)
}

/// Validate a proxy URL before handing it to the HTTP client.
pub fn validate_proxy_url(proxy: &str) -> Result<String> {
    let parsed = Url::parse(proxy).with_context(|| format!("invalid proxy URL: {}", proxy))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("proxy URL must use HTTP or HTTPS protocol");
    }

    Ok(parsed.to_string())
}
