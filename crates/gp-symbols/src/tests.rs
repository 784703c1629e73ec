use crate::*;
use std::collections::HashSet;
use std::sync::Arc;

fn codec() -> SymbolCodec {
    SymbolCodec::builtin().unwrap()
}

fn tiny_dictionary() -> Arc<SymbolDictionary> {
    Arc::new(
        SymbolDictionary::from_entries(vec![
            SymbolEntry::new("→", "leads to", Category::Relation, "causes"),
            SymbolEntry::new("⇝", "eventually leads to", Category::Relation, "slow cause"),
            SymbolEntry::new("¬", "not", Category::Logic, "negation"),
        ])
        .unwrap(),
    )
}

// ========== Dictionary ==========

#[test]
fn test_builtin_symbols_unique() {
    let dict = SymbolDictionary::builtin().unwrap();
    let symbols: HashSet<&str> = dict.all_entries().iter().map(|e| e.symbol.as_str()).collect();
    assert_eq!(symbols.len(), dict.len());
}

#[test]
fn test_builtin_entries_well_formed() {
    let dict = SymbolDictionary::builtin().unwrap();
    for e in dict.all_entries() {
        assert!(!e.concept.is_empty());
        assert!(e.concept.chars().count() > e.symbol.chars().count(), "{} is not shorter", e.symbol);
        assert_eq!(e.concept, e.concept.to_lowercase());
        assert!(!e.symbol.chars().any(char::is_alphabetic), "{} contains a letter", e.symbol);
    }
}

#[test]
fn test_duplicate_symbol_rejected() {
    let err = SymbolDictionary::from_entries(vec![
        SymbolEntry::new("∴", "therefore", Category::Logic, ""),
        SymbolEntry::new("∴", "hence", Category::Logic, ""),
    ])
    .unwrap_err();
    assert!(matches!(err, SymbolError::DuplicateSymbol(ref s) if s == "∴"));
}

#[test]
fn test_duplicate_concept_rejected_case_insensitive() {
    let err = SymbolDictionary::from_entries(vec![
        SymbolEntry::new("∴", "therefore", Category::Logic, ""),
        SymbolEntry::new("⸫", "Therefore", Category::Logic, ""),
    ])
    .unwrap_err();
    assert!(matches!(err, SymbolError::DuplicateConcept(_)));
}

#[test]
fn test_empty_fields_rejected() {
    let err = SymbolDictionary::from_entries(vec![SymbolEntry::new("", "x y", Category::Logic, "")]).unwrap_err();
    assert!(matches!(err, SymbolError::EmptyField { field: "symbol", index: 0 }));
    let err = SymbolDictionary::from_entries(vec![
        SymbolEntry::new("∴", "therefore", Category::Logic, ""),
        SymbolEntry::new("∵", "   ", Category::Logic, ""),
    ])
    .unwrap_err();
    assert!(matches!(err, SymbolError::EmptyField { field: "concept", index: 1 }));
}

#[test]
fn test_word_like_symbol_rejected() {
    for symbol in ["x", "→a", "7", "_"] {
        let err = SymbolDictionary::from_entries(vec![
            SymbolEntry::new("∴", "therefore", Category::Logic, ""),
            SymbolEntry::new(symbol, "unknown", Category::Status, ""),
        ])
        .unwrap_err();
        assert!(matches!(err, SymbolError::MalformedEntry { index: 1, .. }), "{symbol}");
    }
}

#[test]
fn test_concept_edges_must_be_word_chars() {
    for concept in ["C++", "-flag", "(group)"] {
        let err = SymbolDictionary::from_entries(vec![SymbolEntry::new("⊕", concept, Category::Technical, "")])
            .unwrap_err();
        assert!(matches!(err, SymbolError::MalformedEntry { index: 0, .. }), "{concept}");
        assert!(err.to_string().contains(concept));
    }
    assert!(SymbolDictionary::from_entries(vec![SymbolEntry::new("⊕", "c++ compiler", Category::Technical, "")]).is_ok());
}

#[test]
fn test_fraction_symbols_accepted() {
    let dict = SymbolDictionary::from_entries(vec![SymbolEntry::new("½", "one half", Category::Quantity, "")]).unwrap();
    let c = SymbolCodec::new(Arc::new(dict)).unwrap();
    assert_eq!(c.decode("the next box"), "the next box");
}

#[test]
fn test_symbol_error_into_prompt_error() {
    let err: gp_core::PromptError = SymbolError::DuplicateSymbol("∴".into()).into();
    assert!(matches!(err, gp_core::PromptError::Dictionary(ref m) if m.contains("∴")));
}

#[test]
fn test_lookup_by_symbol() {
    let dict = SymbolDictionary::shared();
    assert_eq!(dict.lookup_by_symbol("∴").unwrap().concept, "therefore");
    assert!(dict.lookup_by_symbol("@").is_none());
}

#[test]
fn test_lookup_by_concept_case_and_spacing() {
    let dict = SymbolDictionary::shared();
    assert_eq!(dict.lookup_by_concept("LEADS   to").unwrap().symbol, "→");
    assert_eq!(dict.lookup_by_concept(" Therefore ").unwrap().symbol, "∴");
    assert!(dict.lookup_by_concept("banana").is_none());
}

#[test]
fn test_entries_by_category_ordered() {
    let dict = SymbolDictionary::shared();
    let logic = dict.entries_by_category(Category::Logic);
    assert!(!logic.is_empty());
    assert_eq!(logic[0].symbol, "∴");
    assert!(logic.iter().all(|e| e.category == Category::Logic));
}

#[test]
fn test_every_category_populated() {
    let dict = SymbolDictionary::shared();
    for category in Category::ALL {
        assert!(!dict.entries_by_category(category).is_empty(), "{category} empty");
    }
}

#[test]
fn test_shared_is_same_instance() {
    assert!(Arc::ptr_eq(&SymbolDictionary::shared(), &SymbolDictionary::shared()));
}

#[test]
fn test_concepts_by_length_longest_first() {
    let dict = SymbolDictionary::shared();
    let sorted = dict.concepts_by_length();
    for pair in sorted.windows(2) {
        assert!(pair[0].concept.chars().count() >= pair[1].concept.chars().count());
    }
}

#[test]
fn test_category_serializes_lowercase() {
    assert_eq!(serde_json::to_value(Category::Technical).unwrap(), "technical");
    assert_eq!(Category::Time.to_string(), "time");
}

// ========== Encode ==========

#[test]
fn test_compress_basic() {
    let enc = codec().compress("x leads to y");
    assert_eq!(enc.symbolic_text, "x → y");
    assert_eq!(enc.used_symbols.len(), 1);
    assert_eq!(enc.used_symbols[0].concept, "leads to");
}

#[test]
fn test_compress_case_insensitive() {
    let enc = codec().compress("Therefore, it works.");
    assert_eq!(enc.symbolic_text, "∴, it works.");
}

#[test]
fn test_compress_word_boundaries() {
    let enc = codec().compress("android notation");
    assert_eq!(enc.symbolic_text, "android notation");
    assert!(enc.used_symbols.is_empty());
}

#[test]
fn test_compress_longest_match_wins() {
    let enc = codec().compress("a is not equal to b");
    assert_eq!(enc.symbolic_text, "a ≠ b");
    let enc = codec().compress("x is less than or equal to y");
    assert_eq!(enc.symbolic_text, "x is ≤ y");
}

#[test]
fn test_compress_longest_match_custom_dictionary() {
    let c = SymbolCodec::new(tiny_dictionary()).unwrap();
    let enc = c.compress("this eventually leads to that, which leads to more");
    assert_eq!(enc.symbolic_text, "this ⇝ that, which → more");
}

#[test]
fn test_compress_multiline_phrase() {
    let enc = codec().compress("x leads\n  to y");
    assert_eq!(enc.symbolic_text, "x → y");
}

#[test]
fn test_compress_counts_repeats_in_first_use_order() {
    let enc = codec().compress("not this, therefore not that");
    assert_eq!(enc.used_symbols[0].symbol, "¬");
    assert_eq!(enc.used_symbols[0].count, 2);
    assert_eq!(enc.used_symbols[1].symbol, "∴");
    assert_eq!(enc.used_symbols[1].count, 1);
}

#[test]
fn test_compress_empty_and_no_match() {
    assert_eq!(codec().compress("").symbolic_text, "");
    assert_eq!(codec().compress("hello world").symbolic_text, "hello world");
}

#[test]
fn test_compress_empty_dictionary() {
    let c = SymbolCodec::new(Arc::new(SymbolDictionary::from_entries(vec![]).unwrap())).unwrap();
    assert_eq!(c.compress("therefore").symbolic_text, "therefore");
    assert_eq!(c.decode("∴"), "∴");
}

#[test]
fn test_compress_never_grows() {
    let c = codec();
    let text = "Because the input is approximately one half of the output, we must verify and retry.";
    let enc = c.compress(text);
    assert!(enc.symbolic_text.chars().count() < text.chars().count());
}

#[test]
fn test_encoded_serializes_camel_case() {
    let json = serde_json::to_value(codec().compress("therefore")).unwrap();
    assert_eq!(json["symbolicText"], "∴");
    assert_eq!(json["usedSymbols"][0]["symbol"], "∴");
}

// ========== Decode ==========

#[test]
fn test_roundtrip_every_entry() {
    let c = codec();
    for e in c.dictionary().all_entries() {
        let enc = c.compress(&e.concept);
        assert_eq!(enc.symbolic_text, e.symbol, "concept {:?}", e.concept);
        assert_eq!(c.decode(&enc.symbolic_text), e.concept);
    }
}

#[test]
fn test_roundtrip_uppercase_concept_normalizes_case() {
    let c = codec();
    assert_eq!(c.decode(&c.compress("THEREFORE").symbolic_text), "therefore");
}

#[test]
fn test_decode_sentence() {
    let c = codec();
    assert_eq!(c.decode("x → y"), "x leads to y");
    assert_eq!(c.decode("∴, it works."), "therefore, it works.");
}

#[test]
fn test_decode_inserts_word_spacing() {
    let c = codec();
    assert_eq!(c.decode("x→y"), "x leads to y");
    assert_eq!(c.decode("∴∵"), "therefore because");
    assert_eq!(c.decode("(¬)"), "(not)");
}

#[test]
fn test_decode_unknown_symbols_pass_through() {
    let c = codec();
    assert_eq!(c.decode("☃ and ✈"), "☃ and ✈");
    assert_eq!(c.decode("plain text"), "plain text");
}

#[test]
fn test_symbol_details_positions() {
    let c = codec();
    let details = c.symbol_details("a → b ∴ c");
    assert_eq!(details.len(), 2);
    assert_eq!(details[0].symbol, "→");
    assert_eq!(details[0].position, 2);
    assert_eq!(details[1].concept, "therefore");
    assert_eq!(details[1].position, 6);
}

#[test]
fn test_symbol_details_after_wide_glyph() {
    let c = codec();
    let details = c.symbol_details("🌐 ∴");
    assert_eq!(details[0].position, 0);
    assert_eq!(details[1].position, 2);
}

#[test]
fn test_analyze_categories_and_coverage() {
    let c = codec();
    let a = c.analyze_symbols("∴ → ¬x");
    assert_eq!(a.total_symbols, 3);
    assert_eq!(a.categories[&Category::Logic], 2);
    assert_eq!(a.categories[&Category::Relation], 1);
    assert!((a.coverage_percent - 3.0 / 6.0 * 100.0).abs() < 1e-9);
    assert_eq!(a.unrecognized, 0);
}

#[test]
fn test_analyze_quick_fox_coverage() {
    let c = codec();
    let symbolic = c.compress("the quick fox").symbolic_text;
    let a = c.analyze_symbols(&symbolic);
    let symbol_chars: usize = c
        .symbol_details(&symbolic)
        .iter()
        .map(|d| d.symbol.chars().count())
        .sum();
    let expected = symbol_chars as f64 / symbolic.chars().count() as f64 * 100.0;
    assert!((a.coverage_percent - expected).abs() < 1e-9);
}

#[test]
fn test_analyze_unrecognized_and_empty() {
    let c = codec();
    let a = c.analyze_symbols("☃ “quoted” ∴");
    assert_eq!(a.unrecognized, 1);
    assert_eq!(a.total_symbols, 1);
    let empty = c.analyze_symbols("");
    assert_eq!(empty.total_symbols, 0);
    assert_eq!(empty.coverage_percent, 0.0);
}

#[test]
fn test_decoding_hint_only_present_symbols() {
    let c = codec();
    let hint = c.decoding_hint("x → y ∴ z → w");
    assert_eq!(hint, "[Legend: →=leads to; ∴=therefore]");
    assert!(!hint.contains('¬'));
    assert_eq!(c.decoding_hint("nothing here"), "");
}

#[test]
fn test_decode_report() {
    let c = codec();
    let report = c.decode_report("¬ done ∴ retry");
    assert_eq!(report.decoded, "not done therefore retry");
    assert_eq!(report.symbols_found.len(), 2);
    assert_eq!(report.analysis.total_symbols, 2);
    assert!(report.decoding_hint.starts_with("[Legend: ¬=not"));
    let json = serde_json::to_value(&report).unwrap();
    assert!(json["analysis"]["coveragePercent"].is_number());
    assert_eq!(json["analysis"]["categories"]["logic"], 2);
}

#[test]
fn test_codec_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SymbolCodec>();
    assert_send_sync::<SymbolDictionary>();
}
