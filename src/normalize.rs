use unicode_normalization::UnicodeNormalization;

/// NFKC-normalises `text` and folds dash and curly-apostrophe variants to ASCII
/// so the date and experience patterns only ever see `-` and `'`.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    text.nfkc()
        .map(|c| match c {
            // hyphen, figure dash, en dash, em dash, minus sign
            '\u{2010}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2212}' => '-',
            '\u{2018}' | '\u{2019}' => '\'',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_dashes_and_apostrophes() {
        assert_eq!(normalize("Jan 2020 – Dec 2020"), "Jan 2020 - Dec 2020");
        assert_eq!(normalize("Jan 2020 — Dec 2020"), "Jan 2020 - Dec 2020");
        assert_eq!(normalize("5 − 3"), "5 - 3");
        assert_eq!(normalize("O’Reilly"), "O'Reilly");
    }

    #[test]
    fn applies_compatibility_composition() {
        // full-width digits and ligatures collapse to ASCII
        assert_eq!(normalize("２０２０"), "2020");
        assert_eq!(normalize("ﬁle"), "file");
        assert_eq!(normalize("e\u{0301}"), "\u{00e9}");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn is_idempotent() {
        let samples = [
            "Aug 2021 – Present",
            "Senior dev — 6+ years’ experience",
            "０８/２０２１ − ０６/２０２４",
            "plain ascii",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }
}
