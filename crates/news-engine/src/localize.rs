pub const MAX_HEADLINE_CHARS: usize = 120;

/// Finance terms rewritten into Korean. A term always precedes any term it contains.
const EN_TO_KO: &[(&str, &str)] = &[
    ("federal reserve", "연준"),
    ("fed", "연준"),
    ("rates", "금리"),
    ("rate", "금리"),
    ("hike", "인상"),
    ("cut", "인하"),
    ("inflation", "물가"),
    ("cpi", "소비자물가"),
    ("ppi", "생산자물가"),
    ("payrolls", "비농업고용"),
    ("jobs", "고용"),
    ("recession", "경기침체"),
    ("soft landing", "연착륙"),
    ("oil", "유가"),
    ("brent", "브렌트유"),
    ("wti", "WTI"),
    ("chips", "칩"),
    ("chip", "칩"),
    ("semiconductor", "반도체"),
    ("gpu", "GPU"),
    ("ceasefire", "휴전"),
    ("sanctions", "제재"),
    ("sanction", "제재"),
    ("geopolitics", "지정학"),
    ("earnings", "실적"),
    ("guidance", "가이던스"),
    ("outlook", "전망"),
    ("bond", "채권"),
    ("yields", "금리"),
    ("yield", "금리"),
    ("dollar", "달러"),
    ("currency", "환율"),
    ("china", "중국"),
    ("taiwan", "대만"),
    ("ukraine", "우크라이나"),
    ("israel", "이스라엘"),
    ("gaza", "가자지구"),
    ("ai", "AI"),
];

/// Best-effort headline localization by ordered term substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Localizer {
    terms: Vec<(String, String)>,
    max_chars: Option<usize>,
}

impl Localizer {
    pub fn korean() -> Self {
        Self::with_terms(
            EN_TO_KO.iter().map(|(en, ko)| (en.to_string(), ko.to_string())),
            Some(MAX_HEADLINE_CHARS),
        )
    }

    /// Leaves headlines untouched
    pub fn disabled() -> Self {
        Self {
            terms: Vec::new(),
            max_chars: None,
        }
    }

    /// Terms are matched lowercase; replacements apply in the given order
    pub fn with_terms(
        terms: impl IntoIterator<Item = (String, String)>,
        max_chars: Option<usize>,
    ) -> Self {
        Self {
            terms: terms
                .into_iter()
                .map(|(term, replacement)| (term.to_lowercase(), replacement))
                .collect(),
            max_chars,
        }
    }

    /// For each term found (case-insensitively) in the original title, its lowercase,
    /// titlecase and uppercase spellings are replaced. Over-long results are cut with "…".
    pub fn headline(&self, title: &str) -> String {
        let lowered = title.to_lowercase();
        let mut text = title.to_string();

        for (term, replacement) in &self.terms {
            if !lowered.contains(term.as_str()) {
                continue;
            }
            for variant in [term.clone(), title_case(term), term.to_uppercase()] {
                text = text.replace(&variant, replacement);
            }
        }

        match self.max_chars {
            Some(max) if text.chars().count() > max => {
                let mut cut: String = text.chars().take(max).collect();
                cut.push('…');
                cut
            }
            _ => text,
        }
    }
}

impl Default for Localizer {
    fn default() -> Self {
        Self::korean()
    }
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("soft landing"), "Soft Landing");
        assert_eq!(title_case("wti"), "Wti");
    }

    #[test]
    fn test_headline_substitutes_each_case_variant() {
        let ko = Localizer::korean();
        assert_eq!(
            ko.headline("Fed signals rate cut amid recession fears"),
            "연준 signals 금리 인하 amid 경기침체 fears"
        );
        assert_eq!(ko.headline("OIL prices slide"), "유가 prices slide");
    }

    #[test]
    fn test_phrase_before_prefix() {
        let ko = Localizer::korean();
        assert_eq!(ko.headline("Federal Reserve holds"), "연준 holds");
        assert_eq!(ko.headline("Soft Landing hopes"), "연착륙 hopes");
    }

    #[test]
    fn test_country_names_are_not_split_by_short_terms() {
        let ko = Localizer::korean();
        assert_eq!(ko.headline("Ukraine ceasefire"), "우크라이나 휴전");
        assert_eq!(ko.headline("Taiwan chip curbs"), "대만 칩 curbs");
        assert_eq!(ko.headline("AI capex surges"), "AI capex surges");
    }

    #[test]
    fn test_no_term_is_shadowed_by_an_earlier_one() {
        for (i, (later, _)) in EN_TO_KO.iter().enumerate() {
            for (earlier, _) in &EN_TO_KO[..i] {
                assert!(
                    !later.contains(earlier),
                    "{} is listed after {} and can never match",
                    later,
                    earlier
                );
            }
        }
    }

    #[test]
    fn test_mixed_case_spelling_is_not_rewritten() {
        // only lower, Title and UPPER spellings are replaced
        assert_eq!(Localizer::korean().headline("iNflation"), "iNflation");
    }

    #[test]
    fn test_unknown_terms_pass_through() {
        assert_eq!(
            Localizer::korean().headline("Quarterly dividends announced"),
            "Quarterly dividends announced"
        );
    }

    #[test]
    fn test_truncates_by_characters() {
        let title = "가".repeat(130);
        let out = Localizer::korean().headline(&title);
        assert_eq!(out.chars().count(), 121);
        assert!(out.ends_with('…'));

        let exact = "나".repeat(120);
        assert_eq!(Localizer::korean().headline(&exact), exact);
    }

    #[test]
    fn test_disabled_is_identity() {
        let title = format!("Fed {}", "x".repeat(200));
        assert_eq!(Localizer::disabled().headline(&title), title);
    }

    #[test]
    fn test_custom_terms() {
        let localizer = Localizer::with_terms(
            vec![("Tariff".to_string(), "관세".to_string())],
            Some(10),
        );
        assert_eq!(localizer.headline("TARIFF talk"), "관세 talk");
        assert_eq!(localizer.headline("tariff talks resume"), "관세 talks r…");
    }
}
