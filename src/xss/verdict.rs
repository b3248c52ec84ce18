use crate::browser::DialogEvent;
use crate::core::registry::ScannerKind;
use crate::reporting::model::ScanResult;

/// Cheap pre-check before the browser is involved
pub fn reflected(body: &str, canary: &str) -> bool {
    body.contains(canary)
}

pub fn dialog_details(dialog: &DialogEvent, canary: &str) -> String {
    if dialog.message.contains(canary) {
        format!("JavaScript alert() triggered with canary: {}", canary)
    } else {
        format!("JavaScript dialog triggered: {}", dialog.message)
    }
}

/// Only an observed dialog confirms.
pub fn confirm(
    url: &str,
    payload: &str,
    canary: &str,
    dialog: Option<&DialogEvent>,
    response_time: f64,
) -> Option<ScanResult> {
    let dialog = dialog?;
    Some(
        ScanResult::confirmed(ScannerKind::Xss, url, payload, dialog_details(dialog, canary))
            .with_response_time(response_time),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflection_alone_does_not_confirm() {
        assert!(reflected("<p>abc123</p>", "abc123"));
        assert!(confirm("u", "p", "abc123", None, 0.1).is_none());
    }

    #[test]
    fn test_dialog_with_canary() {
        let dialog = DialogEvent { message: "abc123".to_string() };
        let result = confirm("u", "p", "abc123", Some(&dialog), 0.1).unwrap();
        assert_eq!(result.details, "JavaScript alert() triggered with canary: abc123");
    }

    #[test]
    fn test_foreign_dialog() {
        let dialog = DialogEvent { message: "Are you sure?".to_string() };
        let result = confirm("u", "p", "abc123", Some(&dialog), 0.1).unwrap();
        assert_eq!(result.details, "JavaScript dialog triggered: Are you sure?");
    }
}
