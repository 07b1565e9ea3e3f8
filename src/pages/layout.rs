use super::{escape_html, Page};
use crate::config::Config;
use crate::i18n::{Language, TranslationContext};
use chrono::Datelike;

/// Wrap a `<main>` fragment in the shared page chrome.
pub(super) fn document(
    page: Page,
    ctx: &TranslationContext,
    config: &Config,
    main: &str,
) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        header(page, ctx, config),
        navigation(page, ctx),
        main,
        footer(ctx, config)
    )
}

fn header(page: Page, ctx: &TranslationContext, config: &Config) -> String {
    let site_name = escape_html(&ctx.text("site.name"));
    let title = if page == Page::Home {
        site_name.clone()
    } else {
        format!("{} - {}", escape_html(&ctx.text(page.title_key())), site_name)
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="description" content="{site_name} - {description}">
    <meta name="author" content="{site_name}">
    <link rel="canonical" href="{site_url}{path}">
    <title>{title}</title>
    <link rel="stylesheet" href="/assets/css/style.css">
    <script src="/assets/js/main.js" defer></script>
    <script src="/assets/js/language-switcher.js" defer></script>
</head>
<body>
    <header>
        <div class="header-container">
            <div class="logo-section">
                <img src="/assets/images/logo.svg" alt="{logo_alt}" class="site-logo">
                <h1 class="site-title">{site_name}</h1>
            </div>
        </div>
    </header>"#,
        lang = ctx.language().code(),
        site_name = site_name,
        description = escape_html(&ctx.text("site.meta_description")),
        site_url = escape_html(config.site_url.trim_end_matches('/')),
        path = page.path(),
        title = title,
        logo_alt = escape_html(&ctx.text("site.logo_alt")),
    )
}

fn navigation(current: Page, ctx: &TranslationContext) -> String {
    let items = Page::NAVIGATION
        .iter()
        .map(|page| {
            let active = *page == current;
            format!(
                r#"            <li class="nav-item">
                <a href="{href}" class="nav-link{class}"{aria}>{label}</a>
            </li>"#,
                href = page.path(),
                class = if active { " active" } else { "" },
                aria = if active { r#" aria-current="page""# } else { "" },
                label = escape_html(&ctx.text(page.title_key())),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<nav class="main-navigation">
    <div class="nav-container">
        <button class="mobile-menu-toggle" aria-label="{toggle}" aria-expanded="false">
            <span class="hamburger-icon"><span></span><span></span><span></span></span>
        </button>
        <ul class="nav-menu">
{items}
        </ul>
{switcher}
    </div>
</nav>"#,
        toggle = escape_html(&ctx.text("nav.toggle_menu")),
        items = items,
        switcher = language_switcher(ctx),
    )
}

/// One button per enabled language; the current one is marked active.
fn language_switcher(ctx: &TranslationContext) -> String {
    let current = ctx.language();
    let buttons = Language::all()
        .into_iter()
        .map(|language| {
            let active = language == current;
            format!(
                r#"            <button type="button" class="lang-btn{class}" data-lang="{code}" title="{name}" aria-pressed="{pressed}">{label}</button>"#,
                class = if active { " active" } else { "" },
                code = language.code(),
                name = escape_html(language.native_name()),
                pressed = active,
                label = language.code().to_uppercase(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"        <div class="language-switcher" role="group" aria-label="{label}" data-error-message="{error}">
{buttons}
        </div>"#,
        label = escape_html(&ctx.text("language.label")),
        error = escape_html(&ctx.text("language.switch_error")),
        buttons = buttons,
    )
}

fn footer(ctx: &TranslationContext, config: &Config) -> String {
    let email = escape_html(&config.contact_email);
    let social = ["linkedin", "github", "instagram"]
        .iter()
        .map(|network| {
            let name = escape_html(&ctx.text(&format!("social.{}", network)));
            format!(
                r#"                        <a href="{url}" class="social-link" aria-label="{name}" target="_blank" rel="noopener noreferrer">{name}</a>"#,
                url = escape_html(&ctx.text(&format!("social.{}_url", network))),
                name = name,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"    <footer>
        <div class="footer-container">
            <div class="footer-content">
                <div class="footer-section">
                    <h3>{contact_title}</h3>
                    <p><a href="mailto:{email}" class="footer-link">{email}</a></p>
                </div>
                <div class="footer-section">
                    <h3>{follow_us}</h3>
                    <div class="social-links">
{social}
                    </div>
                </div>
            </div>
            <div class="footer-bottom">
                <p class="copyright">&copy; {year} {site_name}. {rights}</p>
            </div>
        </div>
    </footer>
</body>
</html>
"#,
        contact_title = escape_html(&ctx.text("contact.title")),
        email = email,
        follow_us = escape_html(&ctx.text("social.follow_us")),
        social = social,
        year = chrono::Local::now().year(),
        site_name = escape_html(&ctx.text("site.name")),
        rights = escape_html(&ctx.text("footer.copyright")),
    )
}
