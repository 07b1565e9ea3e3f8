//! Server-rendered pages.
//!
//! Every page is a body fragment wrapped in the shared header, navigation
//! and footer. All text goes through the request's `TranslationContext` and
//! is HTML-escaped on output.

mod admissions;
mod contact;
mod curriculum;
mod faculty;
mod home;
mod layout;

use crate::config::Config;
use crate::i18n::TranslationContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Curriculum,
    Faculty,
    Admissions,
    Contact,
    NotFound,
}

impl Page {
    /// Pages listed in the navigation menu, in menu order.
    pub const NAVIGATION: [Page; 5] = [
        Page::Home,
        Page::Curriculum,
        Page::Faculty,
        Page::Admissions,
        Page::Contact,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Curriculum => "/curriculum",
            Page::Faculty => "/faculty",
            Page::Admissions => "/admissions",
            Page::Contact => "/contact",
            Page::NotFound => "/404",
        }
    }

    /// Key of the page name in the navigation menu and `<title>`.
    fn title_key(&self) -> &'static str {
        match self {
            Page::Home => "nav.home",
            Page::Curriculum => "nav.curriculum",
            Page::Faculty => "nav.faculty",
            Page::Admissions => "nav.admissions",
            Page::Contact => "nav.contact",
            Page::NotFound => "not_found.title",
        }
    }
}

/// Render a full HTML document for `page`.
pub fn render(page: Page, ctx: &TranslationContext, config: &Config) -> String {
    let main = match page {
        Page::Home => home::render(ctx),
        Page::Curriculum => curriculum::render(ctx),
        Page::Faculty => faculty::render(ctx),
        Page::Admissions => admissions::render(ctx, config),
        Page::Contact => contact::render(ctx, config),
        Page::NotFound => not_found(ctx),
    };

    layout::document(page, ctx, config, &main)
}

fn not_found(ctx: &TranslationContext) -> String {
    format!(
        r#"<main>
    <section class="page-header">
        <div class="container">
            <h1>{title}</h1>
            <p>{message}</p>
            <a href="/" class="btn btn-primary">{back}</a>
        </div>
    </section>
</main>"#,
        title = escape_html(&ctx.text("not_found.title")),
        message = escape_html(&ctx.text("not_found.message")),
        back = escape_html(&ctx.text("not_found.back_home")),
    )
}

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// `<li>` items for a list of strings.
fn list_items(items: &[String], indent: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}<li>{}</li>", indent, escape_html(item)))
        .collect::<Vec<_>>()
        .join("\n")
}
