/// Normalize free text for search comparison
///
/// Lower-cases the input, replaces every character outside `[a-z0-9]` with a
/// space, collapses whitespace runs and trims. The output is always ASCII, so
/// byte offsets and character offsets coincide.
pub fn normalize(text: &str) -> String {
    let replaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                ' '
            }
        })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(normalize("Felicity: Hack-Night!"), "felicity hack night");
    }

    #[test]
    fn test_collapses_and_trims_whitespace() {
        assert_eq!(normalize("  Robotics \t\n Club  "), "robotics club");
    }

    #[test]
    fn test_empty_and_symbol_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("!!! ---"), "");
    }

    #[test]
    fn test_non_ascii_letters_become_separators() {
        assert_eq!(normalize("Café Crème 2024"), "caf cr me 2024");
    }

    #[test]
    fn test_output_alphabet() {
        let samples = ["Ünïcödé / Mixed_CASE 42", "a\u{00a0}b", "\t\r\n", "x  y   z"];
        for sample in samples {
            let out = normalize(sample);
            assert!(out.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' '));
            assert!(!out.contains("  "));
            assert_eq!(out, out.trim());
        }
    }
}
