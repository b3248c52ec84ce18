/// Content that can only appear when a specific file was included.
#[derive(Debug, Clone, Copy)]
pub struct FileSignature {
    pub key: &'static str,
    pub patterns: &'static [&'static str],
    pub os: &'static str,
    pub file: &'static str,
}

pub const PHP_SOURCE: &str = "php_source";

/// Number of distinct patterns that must be present
pub const MIN_MATCHES: usize = 2;

pub static SIGNATURES: &[FileSignature] = &[
    FileSignature {
        key: "etc_passwd",
        patterns: &[
            "root:x:0:0:",
            "root:*:0:0:",
            "daemon:x:1:1:",
            "bin:x:2:2:",
            "nobody:x:",
            "/bin/bash",
            "/bin/sh",
            "/sbin/nologin",
        ],
        os: "Linux",
        file: "/etc/passwd",
    },
    FileSignature {
        key: "etc_shadow",
        patterns: &["root:$", "root:!:", "root:*:", "daemon:*:"],
        os: "Linux",
        file: "/etc/shadow",
    },
    FileSignature {
        key: "win_ini",
        patterns: &[
            "[fonts]",
            "[extensions]",
            "[mci extensions]",
            "for 16-bit app support",
            "[Mail]",
            "[files]",
        ],
        os: "Windows",
        file: "C:\\Windows\\win.ini",
    },
    FileSignature {
        key: "win_hosts",
        patterns: &["127.0.0.1", "localhost", "# Copyright"],
        os: "Windows",
        file: "C:\\Windows\\System32\\drivers\\etc\\hosts",
    },
    FileSignature {
        key: PHP_SOURCE,
        patterns: &[
            "<?php",
            "<?=",
            "function ",
            "class ",
            "$_GET",
            "$_POST",
            "include(",
            "require(",
        ],
        os: "Any",
        file: "PHP Source Code",
    },
];

/// Base64 of `<?php`, `<?=` and `?>` as produced by `convert.base64-encode`
pub const PHP_BASE64_INDICATORS: &[&str] = &["PD9waHA", "PD89", "Pz4="];

pub fn lookup(key: &str) -> Option<&'static FileSignature> {
    SIGNATURES.iter().find(|s| s.key == key)
}

impl FileSignature {
    pub fn matches(&self, body: &str) -> usize {
        self.patterns.iter().filter(|p| body.contains(*p)).count()
    }
}

pub fn is_base64_php_source(body: &str) -> bool {
    PHP_BASE64_INDICATORS.iter().any(|i| body.contains(i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passwd_match_count() {
        let sig = lookup("etc_passwd").unwrap();
        assert_eq!(sig.matches("root:x:0:0:root:/root:/bin/bash"), 2);
        assert_eq!(sig.matches("nothing here"), 0);
    }

    #[test]
    fn test_base64_php_indicator() {
        assert!(is_base64_php_source("PD9waHAKZWNobyAx"));
        assert!(!is_base64_php_source("<?php echo 1;"));
    }
}
