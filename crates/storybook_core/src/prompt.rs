//! Prompt construction for the book generator.

const DEFAULT_PROMPT: &str = "اكتب كتاب للأطفال بالعربية، 5 فصول، كل فصل فقرة قصيرة مع عنوان.\nاجعل الأسلوب ممتع وبسيط.";

/// Subject used when a story request names none.
pub const DEFAULT_STORY_SUBJECT: &str = "مغامرة صغيرة";

/// Builds the generation prompt, pinning the book's title when one is given.
pub fn build_prompt(title: Option<&str>) -> String {
    match title {
        Some(title) => format!(
            "اكتب كتاب للأطفال بعنوان '{}'، 5 فصول، كل فصل فقرة قصيرة مع عنوان.",
            title
        ),
        None => DEFAULT_PROMPT.to_string(),
    }
}

/// Wraps a caller-supplied subject into a short five-chapter story request.
pub fn build_story_prompt(subject: &str) -> String {
    let subject = match subject.trim() {
        "" => DEFAULT_STORY_SUBJECT,
        s => s,
    };
    format!(
        "اكتب كتاب أطفال قصير بالعربية مكون من 5 فصول بعنوان: {}. اجعل اللغة بسيطة ومناسبة للأطفال.",
        subject
    )
}
