//! Where a traversal payload goes in a target URL

use url::Url;

/// Candidate URLs for one payload: each query parameter's value replaced by
/// the raw payload, then the plain suffix append. Duplicates are dropped,
/// first occurrence wins.
///
/// The query is spliced into the raw target text, so the path, the fragment
/// and pre-encoded sequences stay exactly as the append candidate has them.
pub fn build(target: &str, payload: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();

    if Url::parse(target).is_ok() {
        if let Some((base, raw, fragment)) = split_query(target) {
            let params: Vec<&str> = raw.split('&').collect();
            for i in 0..params.len() {
                let key = params[i].split_once('=').map_or(params[i], |(k, _)| k);
                let replaced: Vec<String> = params
                    .iter()
                    .enumerate()
                    .map(|(j, p)| {
                        if j == i {
                            format!("{}={}", key, payload)
                        } else {
                            p.to_string()
                        }
                    })
                    .collect();

                push_unique(&mut out, format!("{}?{}{}", base, replaced.join("&"), fragment));
            }
        }
    }

    push_unique(&mut out, format!("{}{}", target, payload));
    out
}

/// `(before '?', query, '#fragment' or "")` for a non-empty query
fn split_query(target: &str) -> Option<(&str, &str, &str)> {
    let (base, rest) = target.split_once('?')?;
    if base.contains('#') {
        // the '?' belongs to the fragment
        return None;
    }
    let (raw, fragment) = match rest.find('#') {
        Some(at) => rest.split_at(at),
        None => (rest, ""),
    };
    if raw.is_empty() {
        None
    } else {
        Some((base, raw, fragment))
    }
}

fn push_unique(out: &mut Vec<String>, candidate: String) {
    if !out.contains(&candidate) {
        out.push(candidate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_each_param_then_appends() {
        let c = build("http://test/page?file=a.txt&lang=en", "../../../etc/passwd");
        assert_eq!(
            c,
            vec![
                "http://test/page?file=../../../etc/passwd&lang=en",
                "http://test/page?file=a.txt&lang=../../../etc/passwd",
                "http://test/page?file=a.txt&lang=en../../../etc/passwd",
            ]
        );
    }

    #[test]
    fn test_no_query_only_appends() {
        assert_eq!(
            build("http://test/view/", "/etc/passwd"),
            vec!["http://test/view//etc/passwd"]
        );
    }

    #[test]
    fn test_encoded_payload_untouched() {
        let c = build("http://test/?f=x", "..%2f..%2fetc%2fpasswd");
        assert_eq!(c[0], "http://test/?f=..%2f..%2fetc%2fpasswd");
    }

    #[test]
    fn test_replacement_keeps_raw_path_and_fragment() {
        let c = build("http://test/a/../b\\c?f=x#top", "../etc/passwd");
        assert_eq!(c[0], "http://test/a/../b\\c?f=../etc/passwd#top");
        assert_eq!(c[1], "http://test/a/../b\\c?f=x#top../etc/passwd");
    }

    #[test]
    fn test_unencoded_query_not_rewritten() {
        let c = build("http://test/?f=a b&g=<x>", "..%2fetc");
        assert_eq!(c[0], "http://test/?f=..%2fetc&g=<x>");
        assert_eq!(c[1], "http://test/?f=a b&g=..%2fetc");
    }

    #[test]
    fn test_question_mark_inside_fragment_is_not_a_query() {
        assert_eq!(build("http://test/#x?f=1", "y"), vec!["http://test/#x?f=1y"]);
    }

    #[test]
    fn test_duplicates_dropped() {
        // empty value: replacement and append produce the same URL
        let c = build("http://test/?f=", "x");
        assert_eq!(c, vec!["http://test/?f=x"]);
    }
}
