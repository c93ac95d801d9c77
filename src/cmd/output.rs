/*!
output.rs - rendering of results and transport errors.

stdout: the decoded response, compact on one line or 2-space indented
with `--pretty`. Non-ASCII is written as UTF-8 and response key order is
kept.

stderr: transport failures as a single `{"error": "<message>"}` line.
*/

use serde_json::Value;

pub fn render(value: &Value, pretty: bool) -> String {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.unwrap_or_else(|_| value.to_string())
}

pub fn render_error(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({"status": "ok", "tools": ["create_nodes", "query_nodes"], "name": "场景"})
    }

    #[test]
    fn compact_is_single_line() {
        let out = render(&sample(), false);
        assert!(!out.contains('\n'));
        assert_eq!(
            out,
            r#"{"status":"ok","tools":["create_nodes","query_nodes"],"name":"场景"}"#
        );
    }

    #[test]
    fn pretty_is_indented() {
        let out = render(&sample(), true);
        assert!(out.contains('\n'));
        assert!(out.starts_with("{\n  \"status\": \"ok\","));
        assert!(out.contains("    \"create_nodes\""));
    }

    #[test]
    fn same_value_either_way() {
        let compact: Value = serde_json::from_str(&render(&sample(), false)).unwrap();
        let pretty: Value = serde_json::from_str(&render(&sample(), true)).unwrap();
        assert_eq!(compact, pretty);
    }

    #[test]
    fn error_line() {
        let line = render_error("HTTP 404: not found");
        assert_eq!(line, r#"{"error":"HTTP 404: not found"}"#);
        assert!(!line.contains('\n'));
    }
}
