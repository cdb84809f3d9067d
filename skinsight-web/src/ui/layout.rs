//! Page shell shared by every page

use super::Advisory;

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// A button that posts to `/nav/{slug}`
pub fn nav_button(slug: &str, label: &str) -> String {
    format!(
        r#"<form method="post" action="/nav/{slug}" class="inline"><button type="submit">{label}</button></form>"#,
        slug = slug,
        label = escape_html(label),
    )
}

fn advisory_html(advisory: Option<&Advisory>) -> String {
    match advisory {
        Some(advisory) => format!(
            r#"<div class="advisory advisory-{}" role="status">{}</div>"#,
            advisory.kind(),
            escape_html(advisory.message())
        ),
        None => String::new(),
    }
}

/// Full HTML document around `body`
///
/// `sidebar` is rendered only when non-empty.
pub fn page_shell(title: &str, advisory: Option<&Advisory>, sidebar: &str, body: &str) -> String {
    let version = env!("CARGO_PKG_VERSION");
    let git_hash = env!("GIT_HASH");

    let sidebar = if sidebar.is_empty() {
        String::new()
    } else {
        format!(r#"<aside class="sidebar">{}</aside>"#, sidebar)
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Skinsight - {title}</title>
    <style>
        * {{
            box-sizing: border-box;
        }}
        body {{
            margin: 0;
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background: #eef2f5;
            color: #1f2933;
        }}
        .layout {{
            display: flex;
            min-height: 100vh;
        }}
        .sidebar {{
            width: 240px;
            padding: 24px 16px;
            background: #1f2933;
            color: #f5f7fa;
        }}
        main {{
            flex: 1;
            max-width: 960px;
            margin: 24px auto;
            padding: 2rem;
            background: rgba(255, 255, 255, 0.9);
            border-radius: 10px;
            box-shadow: 0 4px 8px rgba(0, 0, 0, 0.2);
        }}
        h1 {{
            color: #2563eb;
        }}
        form.inline {{
            display: inline-block;
            margin: 4px;
        }}
        button {{
            padding: 8px 16px;
            border: 1px solid #2563eb;
            border-radius: 6px;
            background: #fff;
            color: #2563eb;
            cursor: pointer;
        }}
        label {{
            display: block;
            margin-top: 12px;
        }}
        input {{
            width: 100%;
            padding: 6px;
        }}
        .advisory {{
            padding: 10px 14px;
            margin-bottom: 16px;
            border-radius: 6px;
        }}
        .advisory-success {{
            background: #d1fae5;
            color: #065f46;
        }}
        .advisory-warning {{
            background: #fef3c7;
            color: #92400e;
        }}
        .advisory-error {{
            background: #fee2e2;
            color: #991b1b;
        }}
        .columns {{
            display: flex;
            gap: 24px;
        }}
        .columns > div {{
            flex: 1;
        }}
        .preview {{
            max-width: 100%;
        }}
        footer {{
            margin-top: 32px;
            font-size: 12px;
            color: #888;
            font-family: 'Courier New', monospace;
        }}
    </style>
</head>
<body>
<div class="layout">
{sidebar}
<main>
{advisory}
{body}
<footer>skinsight v{version} [{git_hash}]</footer>
</main>
</div>
</body>
</html>
"#,
        title = escape_html(title),
        sidebar = sidebar,
        advisory = advisory_html(advisory),
        body = body,
        version = version,
        git_hash = git_hash,
    )
}
