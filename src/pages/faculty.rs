use super::{escape_html, list_items};
use crate::i18n::{TranslationContext, Value};

pub(super) fn render(ctx: &TranslationContext) -> String {
    let credentials_title = escape_html(&ctx.text("faculty.credentials_title"));
    let specialization = escape_html(&ctx.text("faculty.specialization"));

    let members = ctx
        .lookup("faculty.members")
        .and_then(Value::as_list)
        .unwrap_or_default()
        .iter()
        .map(|member| member_card(member, &credentials_title, &specialization))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<main>
    <section class="page-header">
        <div class="container">
            <h1>{title}</h1>
        </div>
    </section>
    <section class="faculty">
        <div class="container faculty-grid">
{members}
        </div>
    </section>
</main>"#,
        title = escape_html(&ctx.text("faculty.title")),
        members = members,
    )
}

/// One faculty record. Missing fields render empty.
fn member_card(member: &Value, credentials_title: &str, specialization: &str) -> String {
    let field = |name: &str| escape_html(member.field(name).unwrap_or_default());
    let credentials: Vec<String> = member
        .as_map()
        .and_then(|m| m.get("credentials"))
        .and_then(Value::as_list)
        .unwrap_or_default()
        .iter()
        .filter_map(|c| c.as_str().map(str::to_string))
        .collect();

    format!(
        r#"            <article class="faculty-card">
                <img src="{image}" alt="{image_alt}" class="faculty-photo" loading="lazy">
                <h2>{name}</h2>
                <p class="faculty-position">{position}</p>
                <h3>{credentials_title}</h3>
                <ul class="credentials-list">
{credentials}
                </ul>
                <h3>{specialization}</h3>
                <p>{specialization_text}</p>
            </article>"#,
        image = field("image"),
        image_alt = field("image_alt"),
        name = field("name"),
        position = field("position"),
        credentials_title = credentials_title,
        credentials = list_items(&credentials, "                    "),
        specialization = specialization,
        specialization_text = field("specialization_text"),
    )
}
