use ngram_classifier::{
    DictionaryHashModel, EntropyPruning, FeatureSettingBuilder, PruningStrategy, TermCountPruning,
    TextClassifier,
};

fn main() {
    let setting = FeatureSettingBuilder::word_ngrams(1, 2)
        .term_length(1, 40)
        .build()
        .expect("valid feature setting");
    let classifier = TextClassifier::new(setting);

    let mut model: DictionaryHashModel = classifier.train(vec![
        ("rust compiles to fast native code", "tech"),
        ("the borrow checker prevents data races", "tech"),
        ("the chef reduced the sauce slowly", "cooking"),
        ("whisk the eggs with sugar", "cooking"),
    ]);

    println!(
        "before pruning: {} terms, {} entries",
        model.num_uniq_terms(),
        model.num_entries()
    );

    // drop singleton terms and terms spread evenly over the categories
    let count = TermCountPruning::new(2);
    let entropy = EntropyPruning::new(2, 1.0);
    let removed = model.prune(&|e: &ngram_classifier::CategoryEntries| {
        count.remove(e) || entropy.remove(e)
    });

    println!(
        "after pruning: removed {}, {} terms, {} entries",
        removed,
        model.num_uniq_terms(),
        model.num_entries()
    );

    // the pruned model still serializes and reloads
    let mut blob = Vec::new();
    model.save_to(&mut blob).expect("serialize model");
    let reloaded = DictionaryHashModel::load_from(blob.as_slice()).expect("deserialize model");
    assert!(model == reloaded);
    println!("round trip ok, {} bytes", blob.len());
}
