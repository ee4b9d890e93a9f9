use quickcheck::{quickcheck, Arbitrary, Gen};

use subset_regex::{MatchKind, Regex, SearchConfig};

/// A well formed pattern over a small alphabet, so that generated texts
/// actually contain matches.
#[derive(Clone, Debug)]
struct Pattern(String);

/// A text over the same alphabet as `Pattern`, plus spaces.
#[derive(Clone, Debug)]
struct Text(String);

impl Arbitrary for Pattern {
    fn arbitrary(g: &mut Gen) -> Pattern {
        Pattern(expr(g, 3))
    }
}

impl Arbitrary for Text {
    fn arbitrary(g: &mut Gen) -> Text {
        let len = usize::arbitrary(g) % 24;
        let text = (0..len).map(|_| *g.choose(&['a', 'b', 'c', ' ']).unwrap()).collect();
        Text(text)
    }
}

fn expr(g: &mut Gen, depth: u32) -> String {
    let choice = if depth == 0 { 0 } else { *g.choose(&[0, 0, 1, 2, 3, 4, 5]).unwrap() };
    match choice {
        0 => g.choose(&["a", "b", "c"]).unwrap().to_string(),
        1 => {
            let (left, right) = (expr(g, depth - 1), expr(g, depth - 1));
            format!("{}{}", left, right)
        }
        2 => {
            let (left, right) = (expr(g, depth - 1), expr(g, depth - 1));
            format!("({}|{})", left, right)
        }
        3 => format!("({})*", expr(g, depth - 1)),
        4 => format!("({})+", expr(g, depth - 1)),
        _ => format!("({})", expr(g, depth - 1)),
    }
}

fn spans(re: &Regex, haystack: &str, opts: &SearchConfig) -> Vec<(usize, usize)> {
    re.find_all_with(haystack, opts).iter().map(|m| (m.start(), m.end())).collect()
}

quickcheck! {
    fn matches_never_overlap(pattern: Pattern, text: Text) -> bool {
        let re = Regex::new(&pattern.0).unwrap();
        let found = spans(&re, &text.0, &SearchConfig::new());
        found.iter().all(|&(start, end)| start < end)
            && found.windows(2).all(|w| w[1].0 >= w[0].1)
    }

    fn every_match_is_accepted_alone(pattern: Pattern, text: Text) -> bool {
        let re = Regex::new(&pattern.0).unwrap();
        re.find_all(&text.0).iter().all(|m| re.is_match_exact(m.as_str()))
    }

    fn nfa_and_dfa_agree(pattern: Pattern, text: Text) -> bool {
        let re = Regex::new(&pattern.0).unwrap();
        let dfa = spans(&re, &text.0, &SearchConfig::new().match_kind(MatchKind::Dfa));
        let nfa = spans(&re, &text.0, &SearchConfig::new().match_kind(MatchKind::Nfa));
        dfa == nfa
    }

    fn compiling_twice_is_equivalent(pattern: Pattern, text: Text) -> bool {
        let first = Regex::new(&pattern.0).unwrap();
        let second = Regex::new(&pattern.0).unwrap();
        spans(&first, &text.0, &SearchConfig::new())
            == spans(&second, &text.0, &SearchConfig::new())
            && first.is_match_exact(&text.0) == second.is_match_exact(&text.0)
    }

    fn whole_word_only_removes(pattern: Pattern, text: Text) -> bool {
        let re = Regex::new(&pattern.0).unwrap();
        let all = spans(&re, &text.0, &SearchConfig::new());
        let words = spans(&re, &text.0, &SearchConfig::new().whole_word(true));
        words.iter().all(|w| all.contains(w))
    }

    fn case_folding_ignores_text_case(pattern: Pattern, text: Text) -> bool {
        let re = Regex::builder().case_insensitive(true).build(&pattern.0).unwrap();
        let lower = spans(&re, &text.0, &SearchConfig::new());
        let upper = spans(&re, &text.0.to_uppercase(), &SearchConfig::new());
        lower == upper
    }

    fn literal_finds_itself(text: Text) -> bool {
        let literal = text.0.replace(' ', "");
        if literal.is_empty() {
            return true;
        }
        let re = Regex::new(&literal).unwrap();
        spans(&re, &literal, &SearchConfig::new()) == vec![(0, literal.len())]
    }
}
