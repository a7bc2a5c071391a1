//! Server-rendered HTML for the two screens.

pub mod admin;
pub mod form;

use std::fmt::Write;

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// Banner shown at the top of a page after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn success(title: &str, description: &str) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn failure(title: &str, description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Failure,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Notices reached through a `?notice=` redirect.
    pub fn from_key(key: &str) -> Option<Self> {
        let notice = match key {
            "submitted" => Notice::success(
                "Application Submitted!",
                "Your application has been submitted successfully. \
                 You'll receive a DM on Discord if accepted.",
            ),
            "logged_in" => Notice::success("Login Successful", "Welcome to the admin portal."),
            "logged_out" => Notice::success("Logged Out", "Your admin session has ended."),
            _ => return None,
        };
        Some(notice)
    }

    fn render(&self) -> String {
        let class = match self.kind {
            NoticeKind::Success => "notice notice-success",
            NoticeKind::Failure => "notice notice-failure",
        };
        format!(
            r#"<div class="{class}" role="status"><strong>{}</strong><p>{}</p></div>"#,
            escape(&self.title),
            escape(&self.description)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Apply,
    AdminLogin,
    AdminPanel,
}

fn nav(screen: Screen) -> String {
    let mut out = String::from(r#"<nav><a class="nav-link" href="/">Apply</a>"#);
    match screen {
        Screen::AdminPanel => out.push_str(
            r#"<form method="post" action="/admin/logout" class="inline"><button type="submit" class="nav-link">Logout</button></form>"#,
        ),
        _ => out.push_str(r#"<a class="nav-link" href="/admin">Admin</a>"#),
    }
    out.push_str("</nav>");
    out
}

/// Wraps a page body in the shared document shell.
pub fn layout(screen: Screen, title: &str, notice: Option<&Notice>, body: &str) -> String {
    let subtitle = match screen {
        Screen::AdminPanel => "ADMIN PORTAL",
        _ => "APPLICATION PORTAL",
    };
    let mut page = String::new();
    let _ = write!(
        page,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/static/style.css">
</head>
<body>
<header><div><h1 class="brand">ESEX</h1><p class="subtitle">{subtitle}</p></div>{nav}</header>
<main>
{notice}
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        nav = nav(screen),
        notice = notice.map(Notice::render).unwrap_or_default(),
    );
    page
}
