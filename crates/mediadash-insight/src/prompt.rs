use crate::context::AnalysisCategory;

/// Wraps a rendered context in the analyst prompt for `category`.
#[must_use]
pub fn build_prompt(category: AnalysisCategory, context: &str) -> String {
    format!(
        "You are a professional media analyst experienced in digital campaigns for Gen Z brands.\n\
         \n\
         Give 3 key, actionable insights from the {category}:\n\
         \n\
         Data:\n{context}\n\
         \n\
         Focus on:\n\
         1. Significant patterns and trends identified\n\
         2. Strategic implications for Gen Z brands\n\
         3. Concrete actions to optimise the campaign\n\
         \n\
         Format the answer as clear, easy-to-read bullet points.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_category_and_embeds_data() {
        let prompt = build_prompt(AnalysisCategory::Geographic, "location  engagements\nJakarta  10");
        assert!(prompt.contains("from the Geographic Analysis:"));
        assert!(prompt.contains("Data:\nlocation  engagements\nJakarta  10\n"));
        assert!(prompt.ends_with("bullet points.\n"));
    }
}
