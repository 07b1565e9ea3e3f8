use super::escape_html;
use crate::i18n::TranslationContext;

const HIGHLIGHTS: [&str; 6] = [
    "industry_curriculum",
    "hands_on_projects",
    "expert_faculty",
    "career_support",
    "flexible_learning",
    "industry_certifications",
];

pub(super) fn render(ctx: &TranslationContext) -> String {
    let highlights = HIGHLIGHTS
        .iter()
        .map(|name| {
            format!(
                r#"                <div class="highlight-card">
                    <h3>{title}</h3>
                    <p>{desc}</p>
                </div>"#,
                title = escape_html(&ctx.text(&format!("highlights.{}", name))),
                desc = escape_html(&ctx.text(&format!("highlights.{}_desc", name))),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<main>
    <section class="hero">
        <div class="container">
            <h1>{welcome} {site_name}</h1>
            <p class="hero-subtitle">{subtitle}</p>
            <p class="course-title">{course_title}</p>
            <p>{course_description}</p>
            <ul class="course-facts">
                <li><strong>{duration_label}:</strong> {duration}</li>
                <li><strong>{mode_label}:</strong> {mode}</li>
            </ul>
        </div>
    </section>
    <section class="overview">
        <div class="container">
            <h2>{overview}</h2>
            <p>{overview_text}</p>
        </div>
    </section>
    <section class="highlights">
        <div class="container">
            <h2>{highlights_title}</h2>
            <div class="highlights-grid">
{highlights}
            </div>
        </div>
    </section>
    <section class="cta">
        <div class="container">
            <h2>{cta_title}</h2>
            <p>{cta_description}</p>
            <a href="/curriculum" class="btn btn-primary">{view_curriculum}</a>
            <a href="/admissions" class="btn btn-secondary">{admissions}</a>
        </div>
    </section>
</main>"#,
        welcome = escape_html(&ctx.text("site.welcome")),
        site_name = escape_html(&ctx.text("site.name")),
        subtitle = escape_html(&ctx.text("site.hero_subtitle")),
        course_title = escape_html(&ctx.text("course.title")),
        course_description = escape_html(&ctx.text("course.description")),
        duration_label = escape_html(&ctx.text("course.duration_label")),
        duration = escape_html(&ctx.text("course.duration")),
        mode_label = escape_html(&ctx.text("course.mode_label")),
        mode = escape_html(&ctx.text("course.mode")),
        overview = escape_html(&ctx.text("course.overview")),
        overview_text = escape_html(&ctx.text("course.overview_text")),
        highlights_title = escape_html(&ctx.text("highlights.title")),
        highlights = highlights,
        cta_title = escape_html(&ctx.text("cta.title")),
        cta_description = escape_html(&ctx.text("cta.description")),
        view_curriculum = escape_html(&ctx.text("cta.view_curriculum")),
        admissions = escape_html(&ctx.text("nav.admissions")),
    )
}
