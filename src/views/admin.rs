use std::fmt::Write;

use time::{macros::format_description, OffsetDateTime, UtcOffset};

use super::{escape, layout, Notice, Screen};
use crate::applications::repo_types::Application;

pub fn format_timestamp(at: OffsetDateTime) -> String {
    let fmt = format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");
    let utc = at.to_offset(UtcOffset::UTC);
    utc.format(&fmt).unwrap_or_else(|_| utc.to_string())
}

/// Login form. Credential inputs are always rendered empty.
pub fn render_login(notice: Option<&Notice>) -> String {
    let body = r#"<section class="card narrow"><h2>Admin Access</h2>
<form method="post" action="/admin/login">
<div class="field"><label for="username">Username:</label><input id="username" name="username" autocomplete="username" required></div>
<div class="field"><label for="password">Password:</label><input id="password" name="password" type="password" autocomplete="current-password" required></div>
<button type="submit">Login</button>
</form></section>"#;
    layout(Screen::AdminLogin, "Admin Access", notice, body)
}

fn render_card(out: &mut String, app: &Application) {
    let _ = write!(
        out,
        r#"<article class="card" id="app-{id}">
<h3><span>{name}</span><time datetime="{iso}">{when}</time></h3>
<dl>
<div><dt>Discord:</dt><dd>{discord_username} ({discord_id})</dd></div>
<div><dt>Age:</dt><dd>{age}</dd></div>
<div><dt>Size:</dt><dd>{size}</dd></div>
<div><dt>Race:</dt><dd>{race}</dd></div>
<div><dt>Hair Type:</dt><dd>{hair_type}</dd></div>
<div><dt>Height:</dt><dd>{height}</dd></div>
<div><dt>Weight:</dt><dd>{weight}</dd></div>
</dl>
<div class="why"><strong>Why:</strong><p>{why}</p></div>
</article>
"#,
        id = app.id,
        name = escape(&app.name),
        iso = app
            .created_at
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_default(),
        when = format_timestamp(app.created_at),
        discord_username = escape(&app.discord_username),
        discord_id = escape(&app.discord_id),
        age = app.age,
        size = escape(&app.size),
        race = escape(&app.race),
        hair_type = escape(&app.hair_type),
        height = escape(&app.height),
        weight = escape(&app.weight),
        why = escape(&app.why_esex),
    );
}

/// Application list in the order given.
pub fn render_panel(apps: &[Application], notice: Option<&Notice>) -> String {
    let mut body = String::from(
        r#"<section class="panel"><div class="panel-head"><h2>Applications</h2><a class="button" href="/admin">Refresh</a></div>"#,
    );
    if apps.is_empty() {
        body.push_str(r#"<div class="card"><p>No applications found.</p></div>"#);
    } else {
        for app in apps {
            render_card(&mut body, app);
        }
    }
    body.push_str("</section>");
    layout(Screen::AdminPanel, "Applications", notice, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use uuid::Uuid;

    fn app(name: &str, at: OffsetDateTime) -> Application {
        Application {
            id: Uuid::new_v4(),
            discord_username: "user".into(),
            discord_id: "99".into(),
            name: name.into(),
            age: 30,
            size: "4-inches".into(),
            race: "white".into(),
            hair_type: "twist".into(),
            why_esex: "<i>hello</i>".into(),
            height: "170cm".into(),
            weight: "70kg".into(),
            created_at: at,
        }
    }

    #[test]
    fn timestamp_is_rendered_in_utc() {
        let at = datetime!(2024-03-05 14:07:09 +02:00);
        assert_eq!(format_timestamp(at), "2024-03-05 12:07:09 UTC");
    }

    #[test]
    fn empty_panel_says_so() {
        assert!(render_panel(&[], None).contains("No applications found."));
    }

    #[test]
    fn panel_escapes_and_keeps_order() {
        let apps = vec![
            app("newest", datetime!(2024-01-03 00:00 UTC)),
            app("oldest", datetime!(2024-01-01 00:00 UTC)),
        ];
        let html = render_panel(&apps, None);
        assert!(html.contains("&lt;i&gt;hello&lt;/i&gt;"));
        assert!(html.find("newest").unwrap() < html.find("oldest").unwrap());
    }

    #[test]
    fn login_has_empty_inputs() {
        let html = render_login(None);
        assert!(html.contains(r#"name="username""#));
        assert!(!html.contains("value="));
    }
}
