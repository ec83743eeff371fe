//! Prompt templates, one per field kind.

use crate::types::fields::FieldKind;

/// What to ask the model for.
#[derive(Debug, Clone)]
pub struct PromptRequest {
    /// Problem slug.
    pub question_id: String,

    /// Which text to generate.
    pub field: FieldKind,

    /// Programming language for solutions, dry runs and code analysis.
    pub language: String,

    /// The user's code, used by the mistakes analysis.
    pub code: Option<String>,
}

impl PromptRequest {
    /// Creates a request for `field` of `question_id`.
    pub fn new(question_id: impl Into<String>, field: FieldKind) -> Self {
        Self {
            question_id: question_id.into(),
            field,
            language: "C++".to_string(),
            code: None,
        }
    }

    /// Sets the programming language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the user's code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Builds the prompt sent to the model.
pub fn build_prompt(request: &PromptRequest) -> String {
    let problem = &request.question_id;
    let language = &request.language;

    match request.field {
        FieldKind::Explanation => format!(
            "Explain the LeetCode problem \"{}\" in simple terms. Describe what the input and \
             output are, walk through the examples, and point out the constraints that matter. \
             Do not give away the solution.\n\nFormat the answer in Markdown.",
            problem
        ),
        FieldKind::Solution => format!(
            "Given LeetCode question \"{}\", give a detailed solution in the programming \
             language \"{}\". Explain every part of the code, state its time and space \
             complexity, and explain where the same pattern can be used again.",
            problem, language
        ),
        FieldKind::Hints => {
            let mut prompt = format!(
                "Provide helpful hints for solving the LeetCode problem \"{}\".\n\n",
                problem
            );
            prompt.push_str("Format your response in Markdown with these sections:\n\n");
            prompt.push_str("## Hint 1\nA general hint that guides toward the solution.\n\n");
            prompt.push_str("## Hint 2\nA more specific hint that narrows down the approach.\n\n");
            prompt.push_str("## Hint 3\nThe key concept or algorithm needed.\n\n");
            prompt.push_str("Do not include the full solution.");
            prompt
        }
        FieldKind::DryRun => format!(
            "For the LeetCode problem \"{}\", write an optimal solution in \"{}\" and dry run \
             it step by step on the first example. Show the value of every variable after each \
             step and finish with the time complexity.",
            problem, language
        ),
        FieldKind::Mistakes => {
            let mut prompt = format!(
                "Given the LeetCode problem \"{}\" and the following {} code:\n\n",
                problem, language
            );
            prompt.push_str("```");
            prompt.push_str(&language.to_lowercase());
            prompt.push('\n');
            prompt.push_str(request.code.as_deref().unwrap_or_default());
            prompt.push_str("\n```\n\n");
            prompt.push_str(
                "Analyze this code for potential issues, bugs, edge cases, and optimizations. \
                 Cover:\n\
                 1. Correctness issues\n\
                 2. Edge cases not handled\n\
                 3. Time/Space complexity analysis\n\
                 4. Optimization opportunities\n\
                 5. Code quality improvements\n\
                 6. Alternative approaches if applicable\n\n\
                 Be specific and provide examples where relevant.",
            );
            prompt
        }
    }
}
