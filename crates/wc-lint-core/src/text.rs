//! Identifier text helpers: edit distance and case conversion.

use std::str::FromStr;

/// Largest edit distance still treated as a likely typo, exclusive.
pub const TYPO_DISTANCE: usize = 3;

/// Levenshtein edit distance between two strings, counted in characters.
///
/// Insertions, deletions and substitutions all cost 1.
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let mut a: Vec<char> = a.chars().collect();
    let mut b: Vec<char> = b.chars().collect();

    // Shared prefix and suffix never change the distance.
    let prefix = a.iter().zip(&b).take_while(|(x, y)| x == y).count();
    a.drain(..prefix);
    b.drain(..prefix);
    let suffix = a
        .iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    a.truncate(a.len() - suffix);
    b.truncate(b.len() - suffix);

    // Keep the row over the shorter string.
    if a.len() < b.len() {
        std::mem::swap(&mut a, &mut b);
    }
    if b.is_empty() {
        return a.len();
    }

    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(ca != cb);
            row[j + 1] = (diagonal + cost).min(above + 1).min(row[j] + 1);
            diagonal = above;
        }
    }
    row[b.len()]
}

/// Closest reserved name `name` is likely a misspelling of.
///
/// A candidate qualifies when its distance is strictly between 0 and
/// [`TYPO_DISTANCE`]. The lowest distance wins; ties go to the earliest
/// candidate.
#[must_use]
pub fn likely_typo_of<'c>(name: &str, candidates: &[&'c str]) -> Option<&'c str> {
    candidates
        .iter()
        .map(|c| (*c, levenshtein(c, name)))
        .filter(|(_, d)| *d != 0 && *d < TYPO_DISTANCE)
        .min_by_key(|(_, d)| *d)
        .map(|(c, _)| c)
}

/// Casing applied to a class name when deriving file or tag names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Case {
    /// Leave the name as is.
    None,
    /// `my-element`
    Kebab,
    /// `my_element`
    Snake,
    /// `MyElement`
    Pascal,
    /// `myElement`
    Camel,
}

impl Case {
    /// Applies this casing to a spaceless identifier.
    #[must_use]
    pub fn apply(self, s: &str) -> String {
        match self {
            Self::None => s.to_string(),
            Self::Kebab => to_kebab_case(s),
            Self::Snake => to_snake_case(s),
            Self::Pascal => to_pascal_case(s),
            Self::Camel => to_camel_case(s),
        }
    }
}

impl FromStr for Case {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "kebab" => Ok(Self::Kebab),
            "snake" => Ok(Self::Snake),
            "pascal" => Ok(Self::Pascal),
            "camel" => Ok(Self::Camel),
            other => Err(format!(
                "unknown transform `{other}` (expected none, kebab, snake, pascal or camel)"
            )),
        }
    }
}

fn split_words(s: &str, sep: char) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in chars.iter().enumerate() {
        let starts_word = c.is_ascii_uppercase()
            && chars.get(i + 1).map_or(true, char::is_ascii_lowercase);
        if starts_word && i > 0 {
            out.push(sep);
        }
        out.push(*c);
    }
    out.to_lowercase()
}

/// Converts a spaceless string to kebab-case.
#[must_use]
pub fn to_kebab_case(s: &str) -> String {
    split_words(s, '-')
}

/// Converts a spaceless string to `snake_case`.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    split_words(s, '_')
}

/// Converts a spaceless string to `PascalCase` by upper-casing the first
/// character.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Converts a spaceless string to `camelCase` by lower-casing the first
/// character.
#[must_use]
pub fn to_camel_case(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("connectedCallback", "conectedCallback"), 1);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
    }

    #[test]
    fn levenshtein_properties() {
        let words = [
            "",
            "a",
            "connectedCallback",
            "disconnectedCallback",
            "adoptedCallback",
            "attributeChangedCallback",
            "observedAttributes",
            "connectedCalback",
            "ünïcödé",
        ];
        for a in words {
            assert_eq!(levenshtein(a, a), 0);
            for b in words {
                let ab = levenshtein(a, b);
                assert_eq!(ab, levenshtein(b, a), "{a} / {b}");
                assert_eq!(ab == 0, a == b);
                for c in words {
                    assert!(ab <= levenshtein(a, c) + levenshtein(c, b));
                }
            }
        }
    }

    #[test]
    fn likely_typo_picks_closest_then_first() {
        let hooks = ["connectedCallback", "disconnectedCallback"];
        assert_eq!(
            likely_typo_of("conectedCallback", &hooks),
            Some("connectedCallback")
        );
        assert_eq!(likely_typo_of("connectedCallback", &hooks), None);
        assert_eq!(likely_typo_of("render", &hooks), None);
        // Equidistant candidates resolve to list order.
        assert_eq!(likely_typo_of("ab", &["aa", "bb"]), Some("aa"));
    }

    #[test]
    fn kebab_and_snake_case() {
        assert_eq!(to_kebab_case("foobar"), "foobar");
        assert_eq!(to_kebab_case("fooBar"), "foo-bar");
        assert_eq!(to_kebab_case("FooBar"), "foo-bar");
        assert_eq!(to_kebab_case("AfooBfooC"), "afoo-bfoo-c");
        assert_eq!(to_snake_case("FooBar"), "foo_bar");
        assert_eq!(to_snake_case("AfooBfooC"), "afoo_bfoo_c");
    }

    #[test]
    fn pascal_and_camel_case() {
        assert_eq!(to_pascal_case("fooBar"), "FooBar");
        assert_eq!(to_pascal_case(""), "");
        assert_eq!(to_camel_case("FooBar"), "fooBar");
        assert_eq!(to_camel_case("AfooBfooC"), "afooBfooC");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn case_from_str() {
        assert_eq!("kebab".parse::<Case>(), Ok(Case::Kebab));
        assert_eq!(Case::Snake.apply("fooBar"), "foo_bar");
        assert!("shouting".parse::<Case>().is_err());
    }
}
