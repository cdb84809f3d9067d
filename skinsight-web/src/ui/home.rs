//! Home page

use super::layout::{escape_html, nav_button};

/// Account controls: Log In / Sign Up, or a greeting and Log Out
pub fn sidebar(identity: Option<&str>) -> String {
    match identity {
        None => format!(
            "<h2>Navigation</h2>\n{}\n{}",
            nav_button("log-in", "Log In"),
            nav_button("sign-up", "Sign Up"),
        ),
        Some(name) => format!(
            r#"<h2>Navigation</h2>
<h3>Welcome, {}</h3>
<form method="post" action="/log-out" class="inline"><button type="submit">Log Out</button></form>"#,
            escape_html(name)
        ),
    }
}

pub fn body() -> String {
    format!(
        r#"<h1>Skin Disease Detection System</h1>
<p>Upload a photo of a skin lesion to see the three most likely conditions, or read about the conditions the classifier knows.</p>
<div class="columns">
    <div>{}</div>
    <div>{}</div>
</div>"#,
        nav_button("check-disease", "Check Disease"),
        nav_button("know-about-diseases", "Know About Diseases"),
    )
}
