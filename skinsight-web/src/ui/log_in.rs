//! Log In page

use super::layout::{escape_html, nav_button};
use super::Prefill;

pub fn body(prefill: &Prefill) -> String {
    format!(
        r#"<h1>Log In</h1>
<form method="post" action="/log-in">
    <label for="email">Email</label>
    <input id="email" name="email" type="email" value="{email}" required>
    <label for="password">Password</label>
    <input id="password" name="password" type="password" required>
    <p><button type="submit">Log In</button></p>
</form>
<p>Don't have an account?</p>
{sign_up}
{home}"#,
        email = escape_html(&prefill.email),
        sign_up = nav_button("sign-up", "Sign Up"),
        home = nav_button("home", "Home"),
    )
}
