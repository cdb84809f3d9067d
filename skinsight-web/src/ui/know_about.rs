//! Know About Diseases page

use std::fmt::Write;

use super::layout::{escape_html, nav_button};
use crate::diseases::{DiseaseInfo, DISEASES};

/// Disease picker
pub fn sidebar(selected: &DiseaseInfo) -> String {
    let mut html = String::from("<h2>Choose a Disease</h2>\n<ul>\n");
    for entry in &DISEASES {
        let name = escape_html(entry.label.name());
        if entry.label == selected.label {
            let _ = writeln!(html, "    <li><strong>{}</strong></li>", name);
        } else {
            let _ = writeln!(
                html,
                r#"    <li><a href="/?disease={}">{}</a></li>"#,
                entry.label.slug(),
                name
            );
        }
    }
    html.push_str("</ul>");
    html
}

fn bullet_list(items: &[&str]) -> String {
    let mut html = String::from("<ul>\n");
    for item in items {
        let _ = writeln!(html, "    <li>{}</li>", escape_html(item));
    }
    html.push_str("</ul>");
    html
}

pub fn body(selected: &DiseaseInfo) -> String {
    format!(
        r#"<h1>Know About Diseases</h1>
{home}
<h2>{name}</h2>
<h3>Description</h3>
<p>{description}</p>
<h3>Symptoms</h3>
{symptoms}
<h3>Causes</h3>
{causes}
<h3>Solutions</h3>
{solutions}"#,
        home = nav_button("home", "Home"),
        name = escape_html(selected.label.name()),
        description = escape_html(selected.description),
        symptoms = bullet_list(selected.symptoms),
        causes = bullet_list(selected.causes),
        solutions = bullet_list(selected.solutions),
    )
}
