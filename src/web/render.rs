//! HTML rendering for the scan page.
//!
//! The page is the base form followed by one fragment per stored scan,
//! newest first. Everything user- or tool-supplied is escaped.

use crate::error::RenderError;
use crate::types::StoredScan;
use std::borrow::Cow;
use std::fmt::Write;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>scanweb</title>
<style>
body { font-family: sans-serif; max-width: 48rem; margin: 2rem auto; }
pre { background: #f4f4f4; padding: .5rem; }
.error { color: #a00; font-weight: bold; }
.when { color: #666; font-size: .9em; }
</style>
</head>
<body>
<h1>scanweb</h1>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// Render the base page plus the history fragments.
pub fn render_page(hostname: &str, history: &[StoredScan]) -> Result<String, RenderError> {
    let mut out = String::with_capacity(PAGE_HEAD.len() + 512 * (history.len() + 1));
    write_base(&mut out, hostname)?;
    for scan in history {
        write_fragment(&mut out, scan)?;
    }
    out.push_str(PAGE_TAIL);
    Ok(out)
}

/// Render the base page followed by a request-scoped error message.
pub fn render_error_page(hostname: &str, message: &str) -> Result<String, RenderError> {
    let mut out = String::with_capacity(PAGE_HEAD.len() + 512);
    write_base(&mut out, hostname)?;
    writeln!(
        out,
        r#"<p class="error">Scan of {} failed: {}</p>"#,
        escape(hostname),
        escape(message)
    )?;
    out.push_str(PAGE_TAIL);
    Ok(out)
}

fn write_base(out: &mut String, hostname: &str) -> Result<(), RenderError> {
    out.push_str(PAGE_HEAD);
    writeln!(
        out,
        r#"<form method="post" action="/">
<label for="hostname">Hostname</label>
<input id="hostname" name="hostname" type="text" value="{}" autofocus>
<button type="submit">Scan ports 1-1000</button>
</form>"#,
        escape(hostname)
    )?;
    Ok(())
}

fn write_fragment(out: &mut String, scan: &StoredScan) -> Result<(), RenderError> {
    let when = scan
        .scanned_at()
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| scan.timestamp.to_string());

    writeln!(
        out,
        r#"<section class="scan">
<h2>{} ({})</h2>
<p class="when">{}</p>
<pre>{}</pre>
</section>"#,
        escape(&scan.hostname),
        escape(&scan.address),
        when,
        escape(scan.ports.trim_end())
    )?;
    Ok(())
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(input: &str) -> Cow<'_, str> {
    if !input.contains(['<', '>', '&', '"', '\'']) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 16);
    for c in input.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SessionId;

    fn stored(id: i64, hostname: &str) -> StoredScan {
        StoredScan {
            id,
            session_id: SessionId::DEFAULT,
            hostname: hostname.into(),
            address: "2.0.0.0".into(),
            timestamp: 1_700_000_000 + id,
            ports: "Port 80/tcp open http\n".into(),
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain.example"), "plain.example");
        assert!(matches!(escape("plain"), Cow::Borrowed(_)));
        assert_eq!(
            escape(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn test_base_page_only() {
        let page = render_page("", &[]).unwrap();
        assert!(page.contains("<form"));
        assert!(!page.contains(r#"class="scan""#));
        assert!(page.ends_with(PAGE_TAIL));
    }

    #[test]
    fn test_fragments_keep_history_order() {
        let page = render_page("amazon.com", &[stored(2, "newer.test"), stored(1, "older.test")])
            .unwrap();
        let newer = page.find("newer.test").unwrap();
        let older = page.find("older.test").unwrap();
        assert!(page.find("<form").unwrap() < newer);
        assert!(newer < older);
        assert_eq!(page.matches(r#"class="scan""#).count(), 2);
        assert!(page.contains("<pre>Port 80/tcp open http</pre>"));
    }

    #[test]
    fn test_error_page_escapes_input() {
        let page = render_error_page("<script>", "boom").unwrap();
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
        assert!(page.contains(r#"class="error""#));
    }
}
