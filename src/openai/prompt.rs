//! Static prompt templates for the song suggestion request.

use crate::types::SuggestionBasis;

pub const MAIN_LIST_PROMPT: &str = "Assume there is a list of songs. The list has a topic. Each song in the list is fitting to that topic. More songs that are similar are needed.";
pub const EXISTING_SONGS_PROMPT: &str = "These songs have already been added to the list:";
pub const KEYWORDS_PROMPT: &str = "The category fits these keywords:";
pub const RETURN_PROMPT: &str = r#"Do not offer any explanation. Do not add any commentary. Format the song names in a JSON array of this format: ["Song Title Artist Name","Song Title Artist Name",...]. Only return this JSON array, filled with the song and artist names. Do not return anything else. Do not include special characters, dashes, colons or similar in the song and artist names. Do not format response as code."#;

pub fn number_of_suggestions_prompt(count: u32) -> String {
    format!(
        "Generate a list of {} songs that fit the same category.",
        count
    )
}

/// Builds the full prompt for `basis`.
///
/// Seed titles are joined with `,`; keywords are embedded verbatim.
pub fn build_prompt(basis: &SuggestionBasis, count: u32) -> String {
    let context = match basis {
        SuggestionBasis::Songs(titles) => {
            format!("{} {}", EXISTING_SONGS_PROMPT, titles.join(","))
        }
        SuggestionBasis::Keywords(keywords) => format!("{} {}", KEYWORDS_PROMPT, keywords),
    };

    format!(
        "{} {}. {} {}",
        MAIN_LIST_PROMPT,
        context,
        number_of_suggestions_prompt(count),
        RETURN_PROMPT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn song_prompt_joins_titles() {
        let basis = SuggestionBasis::Songs(vec![
            "Circles Post Malone".to_string(),
            "Humble Kendrick Lamar".to_string(),
        ]);
        let prompt = build_prompt(&basis, 10);

        assert!(prompt.starts_with(MAIN_LIST_PROMPT));
        assert!(prompt.contains(
            "These songs have already been added to the list: Circles Post Malone,Humble Kendrick Lamar."
        ));
        assert!(prompt.contains("Generate a list of 10 songs that fit the same category."));
        assert!(prompt.ends_with(RETURN_PROMPT));
    }

    #[test]
    fn keyword_prompt_embeds_keywords() {
        let basis = SuggestionBasis::Keywords("The video game The Witcher 3".to_string());
        let prompt = build_prompt(&basis, 3);

        assert!(prompt.contains("The category fits these keywords: The video game The Witcher 3."));
        assert!(prompt.contains("Generate a list of 3 songs"));
        assert!(!prompt.contains(EXISTING_SONGS_PROMPT));
    }
}
