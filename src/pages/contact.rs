use super::escape_html;
use crate::config::Config;
use crate::i18n::TranslationContext;

pub(super) fn render(ctx: &TranslationContext, config: &Config) -> String {
    let subjects = ctx
        .list("contact.subjects")
        .iter()
        .map(|subject| {
            let subject = escape_html(subject);
            format!(
                r#"                        <option value="{0}">{0}</option>"#,
                subject
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let email = escape_html(&config.contact_email);
    let phone = escape_html(&ctx.text("contact.phone"));

    format!(
        r#"<main>
    <section class="page-header">
        <div class="container">
            <h1>{title}</h1>
            <p>{description}</p>
        </div>
    </section>
    <section class="contact">
        <div class="container contact-grid">
            <div class="contact-info">
                <h2>{info_title}</h2>
                <p><strong>{email_label}:</strong> <a href="mailto:{email}">{email}</a></p>
                <p><strong>{phone_label}:</strong> <a href="tel:{phone_href}">{phone}</a></p>
            </div>
            <div class="contact-form">
                <h2>{send_message}</h2>
                <form onsubmit="return false;">
                    <label for="name">{name}</label>
                    <input type="text" id="name" name="name">
                    <label for="email">{email_label}</label>
                    <input type="email" id="email" name="email">
                    <label for="subject">{subject}</label>
                    <select id="subject" name="subject">
                        <option value="">{subject_placeholder}</option>
{subjects}
                    </select>
                    <label for="message">{message}</label>
                    <textarea id="message" name="message" rows="5"></textarea>
                    <button type="submit" class="btn btn-primary">{submit}</button>
                    <p class="form-note">{form_note}</p>
                </form>
            </div>
        </div>
    </section>
</main>"#,
        title = escape_html(&ctx.text("contact.title")),
        description = escape_html(&ctx.text("contact.description")),
        info_title = escape_html(&ctx.text("contact.info_title")),
        email_label = escape_html(&ctx.text("contact.email_label")),
        email = email,
        phone_label = escape_html(&ctx.text("contact.phone_label")),
        phone_href = phone.replace(' ', ""),
        phone = phone,
        send_message = escape_html(&ctx.text("contact.send_message")),
        name = escape_html(&ctx.text("contact.name")),
        subject = escape_html(&ctx.text("contact.subject")),
        subject_placeholder = escape_html(&ctx.text("contact.subject_placeholder")),
        subjects = subjects,
        message = escape_html(&ctx.text("contact.message")),
        submit = escape_html(&ctx.text("contact.submit")),
        form_note = escape_html(&ctx.text("contact.form_note")),
    )
}
