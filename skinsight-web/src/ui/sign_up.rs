//! Sign Up page

use super::layout::{escape_html, nav_button};
use super::Prefill;

pub fn body(prefill: &Prefill) -> String {
    format!(
        r#"<h1>Sign Up</h1>
<form method="post" action="/sign-up">
    <label for="name">Name</label>
    <input id="name" name="name" type="text" value="{name}" required>
    <label for="email">Email</label>
    <input id="email" name="email" type="email" value="{email}" required>
    <label for="password">Password</label>
    <input id="password" name="password" type="password" required>
    <label for="confirm_password">Confirm Password</label>
    <input id="confirm_password" name="confirm_password" type="password" required>
    <p><button type="submit">Sign Up</button></p>
</form>
<p>Already have an account?</p>
{log_in}
{home}"#,
        name = escape_html(&prefill.name),
        email = escape_html(&prefill.email),
        log_in = nav_button("log-in", "Log In"),
        home = nav_button("home", "Home"),
    )
}
