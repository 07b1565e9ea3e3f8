use super::{escape_html, list_items};
use crate::i18n::TranslationContext;

/// Curriculum modules in teaching order. Each has a `<name>` title key and a
/// `<name>_topics` list key under `curriculum`.
const MODULES: [&str; 6] = [
    "cloud_fundamentals",
    "cloud_architecture",
    "devops_cicd",
    "cloud_platforms",
    "cloud_security",
    "capstone_project",
];

pub(super) fn render(ctx: &TranslationContext) -> String {
    let module_label = escape_html(&ctx.text("curriculum.module"));
    let topics_label = escape_html(&ctx.text("curriculum.topics"));

    let modules = MODULES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let topics = ctx.list(&format!("curriculum.{}_topics", name));
            format!(
                r#"            <article class="module-card">
                <span class="module-number">{module_label} {number}</span>
                <h3>{title}</h3>
                <h4>{topics_label}</h4>
                <ul class="topic-list">
{topics}
                </ul>
            </article>"#,
                module_label = module_label,
                number = i + 1,
                title = escape_html(&ctx.text(&format!("curriculum.{}", name))),
                topics_label = topics_label,
                topics = list_items(&topics, "                    "),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<main>
    <section class="page-header">
        <div class="container">
            <h1>{title}</h1>
            <p>{description}</p>
        </div>
    </section>
    <section class="modules">
        <div class="container">
            <h2>{modules_title}</h2>
{modules}
        </div>
    </section>
</main>"#,
        title = escape_html(&ctx.text("curriculum.title")),
        description = escape_html(&ctx.text("curriculum.description")),
        modules_title = escape_html(&ctx.text("curriculum.modules")),
        modules = modules,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Dictionary, DictionaryLoader, Language};
    use std::sync::Arc;

    #[test]
    fn test_topics_render_in_order() {
        let dictionary = Dictionary::from_json(
            r#"{ "curriculum": { "cloud_fundamentals_topics": ["First", "Second & Third"] } }"#,
        )
        .expect("Should parse");
        let ctx = TranslationContext::with_dictionary(
            Language::ENGLISH,
            Arc::new(DictionaryLoader::new("/nonexistent")),
            dictionary,
        );

        let html = render(&ctx);
        let first = html.find("<li>First</li>").expect("first topic");
        let second = html.find("<li>Second &amp; Third</li>").expect("second topic");
        assert!(first < second);
        assert!(html.contains("curriculum.module 6"));
    }
}
