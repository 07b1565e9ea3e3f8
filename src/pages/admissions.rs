use super::{escape_html, list_items};
use crate::config::Config;
use crate::i18n::{TranslationContext, Value};

pub(super) fn render(ctx: &TranslationContext, config: &Config) -> String {
    let requirement = |title_key: &str, list_key: &str| {
        format!(
            r#"            <div class="requirement-block">
                <h3>{title}</h3>
                <ul>
{items}
                </ul>
            </div>"#,
            title = escape_html(&ctx.text(title_key)),
            items = list_items(&ctx.list(list_key), "                    "),
        )
    };

    let requirements = [
        requirement("admissions.education_title", "admissions.education"),
        requirement("admissions.prerequisites_title", "admissions.prerequisites"),
        requirement("admissions.additional_title", "admissions.additional"),
    ]
    .join("\n");

    let steps = ctx
        .lookup("admissions.steps")
        .and_then(Value::as_list)
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(i, step)| {
            format!(
                r#"                <li class="process-step">
                    <span class="step-number">{number}</span>
                    <h3>{title}</h3>
                    <p>{description}</p>
                </li>"#,
                number = i + 1,
                title = escape_html(step.field("title").unwrap_or_default()),
                description = escape_html(step.field("description").unwrap_or_default()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let email = escape_html(&config.contact_email);

    format!(
        r#"<main>
    <section class="page-header">
        <div class="container">
            <h1>{title}</h1>
            <p>{subtitle}</p>
        </div>
    </section>
    <section class="requirements">
        <div class="container">
            <h2>{requirements_title}</h2>
{requirements}
        </div>
    </section>
    <section class="process">
        <div class="container">
            <h2>{process_title}</h2>
            <p>{process_intro}</p>
            <ol class="process-steps">
{steps}
            </ol>
        </div>
    </section>
    <section class="inquiries">
        <div class="container">
            <h2>{inquiries_title}</h2>
            <p>{inquiries_text}</p>
            <p><strong>{office_hours_label}:</strong> {office_hours}</p>
            <p><strong>{response_time_label}:</strong> {response_time}</p>
            <a href="mailto:{email}" class="btn btn-primary">{contact_admissions}</a>
        </div>
    </section>
</main>"#,
        title = escape_html(&ctx.text("admissions.title")),
        subtitle = escape_html(&ctx.text("admissions.subtitle")),
        requirements_title = escape_html(&ctx.text("admissions.requirements_title")),
        requirements = requirements,
        process_title = escape_html(&ctx.text("admissions.process_title")),
        process_intro = escape_html(&ctx.text("admissions.process_intro")),
        steps = steps,
        inquiries_title = escape_html(&ctx.text("admissions.inquiries_title")),
        inquiries_text = escape_html(&ctx.text("admissions.inquiries_text")),
        office_hours_label = escape_html(&ctx.text("admissions.office_hours_label")),
        office_hours = escape_html(&ctx.text("admissions.office_hours")),
        response_time_label = escape_html(&ctx.text("admissions.response_time_label")),
        response_time = escape_html(&ctx.text("admissions.response_time")),
        email = email,
        contact_admissions = escape_html(&ctx.text("admissions.contact_admissions")),
    )
}
