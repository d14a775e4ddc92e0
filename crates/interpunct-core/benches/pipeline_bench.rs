use criterion::{black_box, criterion_group, criterion_main, Criterion};
use interpunct_core::{LabelVocabulary, MetricEvaluator, SequenceAligner, TagExtractor};

fn bench_pipeline(c: &mut Criterion) {
    let extractor = TagExtractor::new();
    let aligner = SequenceAligner::new();

    let lines = vec![
        "utt_0001 so <comma> what did you think of it <question_mark>",
        "utt_0002 well i mean it was fine <dots> i suppose <full_stop>",
        "utt_0003 right <comma> okay <comma> let us move on then <full_stop>",
        "utt_0004 and the weather today will be mostly dry <full_stop>",
        "utt_0005 thank you very much <exclamation_mark>",
    ];

    let examples: Vec<_> = lines
        .iter()
        .map(|line| extractor.extract(line, 1).unwrap())
        .collect();
    let vocab = LabelVocabulary::fit(examples.iter().map(|e| &e.labels)).unwrap();
    let encoded: Vec<Vec<u32>> = examples
        .iter()
        .map(|e| vocab.encode(&e.labels).unwrap())
        .collect();

    c.bench_function("extract_single", |b| {
        b.iter(|| extractor.extract(black_box(lines[0]), 1).unwrap());
    });

    c.bench_function("extract_and_align_batch_5", |b| {
        b.iter(|| {
            for line in &lines {
                let example = extractor.extract(black_box(line), 1).unwrap();
                let codes = vocab.encode(&example.labels).unwrap();
                let _ = aligner.align(&codes, 256).unwrap();
            }
        });
    });

    let width = vocab.num_labels();
    let gold = aligner.align_batch(&encoded, 64).unwrap();
    let preds: Vec<Vec<Vec<f32>>> = gold
        .iter()
        .map(|row| {
            row.iter()
                .map(|&code| {
                    (0..width)
                        .map(|k| if k == code as usize { 0.9 } else { 0.01 })
                        .collect()
                })
                .collect()
        })
        .collect();
    let evaluator = MetricEvaluator::new(&vocab);

    c.bench_function("evaluate_batch_5x64", |b| {
        b.iter(|| evaluator.evaluate(black_box(&gold), black_box(&preds)).unwrap());
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
