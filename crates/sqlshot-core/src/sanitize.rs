const FENCE_OPEN: &str = "```sql";
const FENCE_CLOSE: &str = "```";

/// Recovers raw SQL from an LLM reply. Models usually wrap code in a fenced
/// ```sql block but sometimes answer bare; both forms must come out as
/// trimmed SQL text.
///
/// An opening fence with no closing fence returns whatever follows the
/// marker, unterminated. Observed behavior, kept as-is.
pub fn sanitize_sql_response(text: &str) -> String {
    let mut rest = text;
    if let Some(start) = rest.find(FENCE_OPEN) {
        rest = &rest[start + FENCE_OPEN.len()..];
        if let Some(end) = rest.find(FENCE_CLOSE) {
            rest = &rest[..end];
        }
    }
    rest.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_fence_yields_inner_content() {
        let reply = "```sql\nSELECT * FROM customer;\n```";
        assert_eq!(sanitize_sql_response(reply), "SELECT * FROM customer;");
    }

    #[test]
    fn prose_around_the_fence_is_stripped() {
        let reply = "Here you go:\n```sql\nSELECT 1;\n```\nLet me know if that helps!";
        assert_eq!(sanitize_sql_response(reply), "SELECT 1;");
    }

    #[test]
    fn bare_response_passes_through_trimmed() {
        assert_eq!(
            sanitize_sql_response("  SELECT name FROM service;  \n"),
            "SELECT name FROM service;"
        );
    }

    #[test]
    fn unterminated_fence_returns_the_remainder() {
        let reply = "```sql\nSELECT 1; and then some trailing prose";
        assert_eq!(
            sanitize_sql_response(reply),
            "SELECT 1; and then some trailing prose"
        );
    }

    #[test]
    fn only_the_first_fence_is_used() {
        let reply = "```sql\nSELECT 1;\n``` second block ```sql\nSELECT 2;\n```";
        assert_eq!(sanitize_sql_response(reply), "SELECT 1;");
    }

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(sanitize_sql_response(""), "");
    }
}
