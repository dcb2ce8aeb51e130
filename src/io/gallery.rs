// src/io/gallery.rs
//
// Community pictures of built nuclei are named
// `{A}{Symbol}_{excitation}-{name1};{name2}.png`, with `_` standing for a
// space inside a name.

use std::path::Path;

fn stem(file: &str) -> &str {
    Path::new(file)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file)
}

/// First picture of the given nuclide and excitation index.
pub fn find_built_image<'a>(
    files: &'a [String],
    mass_number: u32,
    symbol: &str,
    excitation: usize,
) -> Option<&'a str> {
    let prefix = format!("{}{}_{}-", mass_number, symbol, excitation);
    files
        .iter()
        .map(String::as_str)
        .find(|f| stem(f).starts_with(&prefix))
}

/// "A", "A and B", "A, B, and C".
pub fn oxford_comma(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [one] => one.clone(),
        [a, b] => format!("{} and {}", a, b),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}

/// Builders credited in a picture's file name.
pub fn collaborator_names(file: &str) -> String {
    let names = stem(file).rsplit('-').next().unwrap_or("");
    let list: Vec<String> = names
        .split(';')
        .map(|n| n.replace('_', " ").trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();
    oxford_comma(&list)
}

pub fn excitation_index(file: &str) -> Option<usize> {
    let (state, _) = stem(file).split_once('-')?;
    state.rsplit('_').next()?.parse().ok()
}

fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Human wording of the excitation a picture shows.
pub fn excitation_label(file: &str) -> Option<String> {
    match excitation_index(file)? {
        0 => Some("ground state".to_string()),
        n => Some(format!("{} excited state", ordinal(n))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery() -> Vec<String> {
        vec![
            "12C_1-Ada_Lovelace.png".to_string(),
            "12C_0-Marie_Curie;Lise_Meitner.png".to_string(),
            "112C_0-Someone.png".to_string(),
            "4He_0-Ernest_Rutherford;Hans_Geiger;Ernest_Marsden.png".to_string(),
        ]
    }

    #[test]
    fn test_find_by_prefix() {
        let files = gallery();
        assert_eq!(find_built_image(&files, 12, "C", 0), Some("12C_0-Marie_Curie;Lise_Meitner.png"));
        assert_eq!(find_built_image(&files, 12, "C", 1), Some("12C_1-Ada_Lovelace.png"));
        assert_eq!(find_built_image(&files, 12, "C", 2), None);
        assert_eq!(find_built_image(&files, 2, "C", 0), None);
    }

    #[test]
    fn test_collaborator_names() {
        let files = gallery();
        assert_eq!(collaborator_names(&files[0]), "Ada Lovelace");
        assert_eq!(collaborator_names(&files[1]), "Marie Curie and Lise Meitner");
        assert_eq!(
            collaborator_names(&files[3]),
            "Ernest Rutherford, Hans Geiger, and Ernest Marsden"
        );
    }

    #[test]
    fn test_excitation_label() {
        assert_eq!(excitation_label("12C_0-A.png").as_deref(), Some("ground state"));
        assert_eq!(excitation_label("12C_1-A.png").as_deref(), Some("1st excited state"));
        assert_eq!(excitation_label("12C_2-A.png").as_deref(), Some("2nd excited state"));
        assert_eq!(excitation_label("12C_3-A.png").as_deref(), Some("3rd excited state"));
        assert_eq!(excitation_label("12C_11-A.png").as_deref(), Some("11th excited state"));
        assert_eq!(excitation_label("no_convention.png"), None);
    }
}
