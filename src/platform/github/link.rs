/// Parse an RFC 8288 `Link` header into `(rel, url)` pairs.
///
/// GitHub sends e.g. `<https://api.github.com/...&page=2>; rel="next", <...>; rel="last"`.
/// Entries without a `rel` parameter are skipped.
pub fn parse_link_header(header: &str) -> Vec<(String, String)> {
    header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let target = parts.next()?.trim();
            let url = target.strip_prefix('<')?.strip_suffix('>')?;

            parts.find_map(|param| {
                let (key, value) = param.split_once('=')?;
                if key.trim() != "rel" {
                    return None;
                }
                let rel = value.trim().trim_matches('"');
                Some((rel.to_string(), url.to_string()))
            })
        })
        .collect()
}

/// The `rel="next"` target, if more pages exist.
pub fn next_link(header: &str) -> Option<String> {
    parse_link_header(header)
        .into_iter()
        .find(|(rel, _)| rel == "next")
        .map(|(_, url)| url)
}
