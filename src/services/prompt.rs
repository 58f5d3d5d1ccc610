/// Number of new titles the model is asked for
pub const REQUESTED_RECOMMENDATIONS: usize = 6;

/// Builds the suggestion prompt for a validated list of liked titles
///
/// The output-format instruction keeps the reply parseable line by line, but
/// the extractor does not rely on it being honored.
pub fn build_prompt(liked_titles: &[String]) -> String {
    format!(
        "I like the following movies and TV shows: {}. \
         Recommend exactly {} other movies or TV shows I would enjoy. \
         Respond with only the titles, one title per line. \
         Do not number the titles, do not use bullets, and do not add any other text.",
        liked_titles.join(", "),
        REQUESTED_RECOMMENDATIONS,
    )
}
