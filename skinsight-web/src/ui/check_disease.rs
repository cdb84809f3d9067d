//! Check Disease page
//!
//! Two steps: upload (the page then shows a preview and a Predict button),
//! then predict (the page shows the ranked result).

use std::fmt::Write;

use super::layout::{escape_html, nav_button};
use crate::classify::{ClassificationResult, ALLOWED_EXTENSIONS};

pub fn body(preview: Option<&str>, result: Option<&ClassificationResult>) -> String {
    let accept = ALLOWED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(",");

    let mut html = format!(
        r#"<h1>Skin Disease Detection System</h1>
{home}
<form method="post" action="/check-disease/upload" enctype="multipart/form-data">
    <label for="image">Choose an image file</label>
    <input id="image" name="image" type="file" accept="{accept}" required>
    <p><button type="submit">Upload</button></p>
</form>
"#,
        home = nav_button("home", "Home"),
        accept = accept,
    );

    if preview.is_none() && result.is_none() {
        return html;
    }

    html.push_str("<div class=\"columns\">\n");

    if let Some(uri) = preview {
        // Predict is offered until the upload has been consumed
        let predict = if result.is_none() {
            r#"<form method="post" action="/check-disease/predict"><button type="submit">Predict</button></form>"#
        } else {
            ""
        };
        let _ = write!(
            html,
            r#"<div>
    <h3>Uploaded Image</h3>
    <img class="preview" src="{}" alt="Uploaded Image">
    {}
</div>
"#,
            escape_html(uri),
            predict
        );
    }

    if let Some(result) = result {
        html.push_str("<div>\n    <h3>Top Predictions</h3>\n    <ul>\n");
        for ranked in &result.ranked_labels {
            let _ = writeln!(
                html,
                "        <li><em>{}</em>: {:.2}%</li>",
                escape_html(ranked.label.name()),
                ranked.percent()
            );
        }
        let top = result.top();
        let _ = write!(
            html,
            r#"    </ul>
</div>
<div>
    <h3>Final Classification</h3>
    <p>Predicted Class: <strong>{}</strong> with {:.2}%</p>
    <p>{}</p>
</div>
"#,
            escape_html(top.label.name()),
            top.percent(),
            nav_button(
                &format!("know-about-diseases?disease={}", top.label.slug()),
                "Learn about this condition"
            ),
        );
    }

    html.push_str("</div>\n");
    html
}
