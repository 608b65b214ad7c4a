use criterion::{criterion_group, criterion_main, Criterion};
use ngram_classifier::classifier::store::{HashStore, TrieStore};
use ngram_classifier::{DictionaryModel, FeatureSettingBuilder, TermCountPruning, TextClassifier};

/// Deterministic synthetic corpus; no external data needed.
fn build_corpus() -> Vec<(String, &'static str)> {
    let vocab_a = ["goal", "match", "team", "striker", "league", "season"];
    let vocab_b = ["budget", "senate", "minister", "treaty", "election", "law"];
    let mut documents = Vec::new();
    for i in 0..500 {
        let (vocab, category) = if i % 2 == 0 {
            (&vocab_a, "sports")
        } else {
            (&vocab_b, "politics")
        };
        let text: Vec<&str> = (0..12).map(|j| vocab[(i + j * 7) % vocab.len()]).collect();
        documents.push((text.join(" "), category));
    }
    documents
}

fn classifier() -> TextClassifier {
    let setting = FeatureSettingBuilder::char_ngrams(3, 5)
        .max_terms(400)
        .build()
        .expect("valid feature setting");
    TextClassifier::new(setting)
}

fn train_and_classify_benchmark(c: &mut Criterion) {
    let documents = build_corpus();
    let classifier = classifier();

    c.bench_function("train_trie", |b| {
        b.iter(|| {
            classifier.train::<TrieStore, _, _, _>(
                documents.iter().map(|(text, category)| (text, *category)),
            )
        });
    });

    c.bench_function("train_hash", |b| {
        b.iter(|| {
            classifier.train::<HashStore, _, _, _>(
                documents.iter().map(|(text, category)| (text, *category)),
            )
        });
    });

    let model: DictionaryModel<TrieStore> =
        classifier.train(documents.iter().map(|(text, category)| (text, *category)));

    c.bench_function("classify", |b| {
        b.iter(|| classifier.classify("the striker scored in the league match", &model));
    });

    c.bench_function("prune", |b| {
        b.iter(|| {
            let mut pruned = model.clone();
            pruned.prune(&TermCountPruning::new(3))
        });
    });
}

criterion_group!(benches, train_and_classify_benchmark);
criterion_main!(benches);
