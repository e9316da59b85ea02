//! Free-text label normalization.
//!
//! draw.io stores node labels as HTML fragments inside XML attributes, so
//! extracted text arrives with markup tags and escaped entities. This
//! module reduces such a fragment to plain comparable text.

/// Strip tag-like spans and decode the entities draw.io emits, then
/// collapse all whitespace runs to single spaces and trim.
///
/// Tags are removed before entities are decoded, so an escaped `&lt;b&gt;`
/// survives as literal text rather than being re-interpreted as a tag.
pub fn normalize(raw: &str) -> String {
    let stripped = strip_tags(raw);
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replace every `<...>` span with a space. An unterminated `<` is kept
/// literally, matching how a lenient tag regex would behave.
fn strip_tags(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        match rest[start + 1..].find('>') {
            Some(end) => {
                out.push(' ');
                rest = &rest[start + 1 + end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_tags_and_entities() {
        assert_eq!(normalize("A <i>B</i> &amp; C"), "A B & C");
    }

    #[test]
    fn test_normalize_nbsp_inside_tags() {
        assert_eq!(
            normalize("  <b>Load&nbsp;Balancer</b>  "),
            "Load Balancer"
        );
    }

    #[test]
    fn test_normalize_escaped_angle_brackets_survive() {
        assert_eq!(normalize("p95 &lt; 200ms"), "p95 < 200ms");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  a \t b \n\n c  "), "a b c");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t "), "");
    }

    #[test]
    fn test_normalize_unterminated_tag_kept() {
        assert_eq!(normalize("queue <unfinished"), "queue <unfinished");
    }

    #[test]
    fn test_normalize_tag_only_input() {
        assert_eq!(normalize("<div><br/></div>"), "");
    }
}
