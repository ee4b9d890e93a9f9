use subset_regex::{Config, Engine, MatchKind, SearchConfig};

fn found(engine: &Engine, haystack: &str, opts: &SearchConfig) -> Vec<(usize, String)> {
    engine.search(haystack, opts).iter().map(|m| (m.start(), m.as_str().to_string())).collect()
}

#[test]
fn compile_then_search() -> anyhow::Result<()> {
    crate::init_logging();
    let mut engine = Engine::new();
    engine.compile("(a|b)*a", Config::new())?;
    let got = found(&engine, "a very blue boat and a big baboon", &SearchConfig::new());
    let expected: Vec<(usize, String)> = vec![
        (0, "a".to_string()),
        (14, "a".to_string()),
        (17, "a".to_string()),
        (21, "a".to_string()),
        (27, "ba".to_string()),
    ];
    assert_eq!(expected, got);
    Ok(())
}

#[test]
fn failed_compile_leaves_nothing_to_search() -> anyhow::Result<()> {
    let mut engine = Engine::new();
    engine.compile("a", Config::new())?;
    assert!(engine.compile("(a|b", Config::new()).is_err());
    assert!(engine.regex().is_none());
    assert!(found(&engine, "a", &SearchConfig::new()).is_empty());

    engine.compile("a", Config::new())?;
    assert_eq!(1, found(&engine, "a", &SearchConfig::new()).len());
    Ok(())
}

#[test]
fn per_search_options() -> anyhow::Result<()> {
    let mut engine = Engine::new();
    engine.compile("ab+", Config::new().whole_word(true))?;
    let haystack = "ab abbb xabb";
    assert_eq!(2, found(&engine, haystack, &SearchConfig::new()).len());
    let opts = SearchConfig::new().whole_word(false).match_kind(MatchKind::Nfa);
    assert_eq!(3, found(&engine, haystack, &opts).len());
    Ok(())
}

#[test]
fn size_limit_is_reported() {
    let mut engine = Engine::new();
    let config = Config::new().dfa_size_limit(Some(8));
    let err = engine.compile("(a|b)*a(a|b)(a|b)(a|b)(a|b)", config).unwrap_err();
    assert_eq!(&subset_regex::ErrorKind::TooBig(8), err.kind());
    assert!(engine.regex().is_none());
}
