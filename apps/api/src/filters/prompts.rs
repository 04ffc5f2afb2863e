// Prompt constants for filter extraction.

/// System prompt for filter extraction: plain labelled lines, not JSON.
pub const FILTER_EXTRACTION_SYSTEM: &str = "You are a hiring manager choosing pre-employment \
    assessments for an open role. You read job descriptions and extract the criteria \
    needed to search an assessment catalog.";

/// Filter extraction prompt template.
/// Replace: {plain_text_instruction}, {job_families}, {job_levels}, {industries},
///          {languages}, {query}
pub const FILTER_EXTRACTION_PROMPT_TEMPLATE: &str = r#"Understand the context of the job description below, then extract the criteria needed to pick assessments for it.

JOB DESCRIPTION:
"{query}"

{plain_text_instruction}

Keywords: 2-3 specific technical or domain skills that can be directly assessed, separated by commas. Each keyword is a single word (e.g. Python, Java, Sales, Nursing, Banking). Never use soft skills or generic terms such as "Communication", "Teamwork", "Development", "Tools", "Prospecting" or "Closing". Prefer the specific skill ("Java", not "Programming").

Job Family: ONLY SELECT ONE FROM: {job_families}

Job Level: ONLY SELECT ONE FROM: {job_levels}
New graduates are Entry-Level, not Graduate.

Industry: ONLY SELECT ONE FROM: {industries}

Language: ONLY SELECT ONE FROM: {languages}

Duration: expected test duration in minutes, based on the complexity of the role

Notes: other relevant details such as remote work or specialised skills, as one line of text

Use ONLY the exact option values listed for Job Family, Job Level, Industry and Language."#;
