use ngram_classifier::{DictionaryTrieModel, FeatureSettingBuilder, TextClassifier};

fn main() {
    // build the feature pipeline
    let setting = FeatureSettingBuilder::char_ngrams(3, 6)
        .max_terms(400)
        .build()
        .expect("valid feature setting");

    // train a model over a tiny labeled corpus
    let classifier = TextClassifier::new(setting);
    let model: DictionaryTrieModel = classifier.train(vec![
        ("the striker scored a brilliant goal", "sports"),
        ("the team celebrated the championship", "sports"),
        ("parliament passed the controversial bill", "politics"),
        ("the minister announced new regulations", "politics"),
    ]);

    // classify an unseen document
    let ranking = classifier.classify("the defender scored in the final", &model);

    // print result
    println!("Ranking: \n{:#?}", ranking);
    println!("predicted: {:?}", ranking.most_likely());
    println!(
        "model: {} terms, {} categories, {} documents",
        model.num_uniq_terms(),
        model.num_categories(),
        model.num_documents()
    );
}
