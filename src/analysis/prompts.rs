//! Prompt for literary analysis.

/// System instruction defining the analysis schema.
pub const ANALYSIS_SYSTEM_PROMPT: &str = r#"Analyze the following book text and return a structured JSON object containing the following details:
Brief Summary: A very short overview of the book (max 3-4 sentences).
Theme(s): The main themes explored in the book.
Main Characters: If the book contains a story, list the primary characters with a short description.
Main Places: If the book is a story, list significant locations mentioned in the book.
Target Audience: The intended or most suitable readers for the book.
Writing Style: A brief description of the author's writing style (e.g., formal, poetic, philosophical, etc.).
Key Insights: Any notable ideas, arguments, or philosophical insights from the book.
Sentiment Analysis: A general sentiment of the book (e.g., uplifting, dark, neutral, etc.).
Return the response strictly in the following JSON format:

{
"summary": "A very short overview of the book.",
"themes": ["Theme 1", "Theme 2", "Theme 3"],
"main_characters": [
    {
    "name": "Character Name",
    "description": "Short description of the character."
    }
],
"main_places": ["Place 1", "Place 2"],
"target_audience": "Intended readers of the book.",
"writing_style": "Description of the author's writing style.",
"key_insights": ["Key insight 1", "Key insight 2"],
"sentiment_analysis": "Overall sentiment of the book."
}"#;
