//! # Dataset Preparation
//!
//! Reads the train, test and optional LM corpora, fits the label vocabulary,
//! encodes every split and writes the results to an output directory.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use interpunct_core::LabelVocabulary;
use tracing::info;

use crate::artifacts::{write_vocabulary, LM_FILE, TEST_FILE, TRAIN_FILE, VOCAB_FILE};
use crate::config::{LmSchedule, PrepareConfig};
use crate::corpus::{read_corpus, Corpus};
use crate::dataset::LabeledDataset;
use crate::encoding::{HfSubwordEncoder, SubwordEncoder};
use crate::error::{Result, TrainerError};

/// Encoded splits sharing one vocabulary.
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub vocabulary: LabelVocabulary,
    pub train: LabeledDataset,
    pub test: LabeledDataset,
    /// Present only for [`LmSchedule::Separate`].
    pub lm: Option<LabeledDataset>,
}

/// Build all splits from already loaded corpora.
///
/// The vocabulary is fit over train and LM labels. Test labels must already
/// be in it.
pub fn prepare_corpora(
    mut train: Corpus,
    test: Corpus,
    lm: Option<Corpus>,
    config: &PrepareConfig,
    encoder: &dyn SubwordEncoder,
) -> Result<PreparedData> {
    let vocabulary = LabelVocabulary::fit_with(
        train.labels().chain(lm.iter().flat_map(Corpus::labels)),
        &config.sentinels,
    )?;
    info!(labels = vocabulary.num_labels(), "fit label vocabulary");

    let lm = match (lm, config.lm_schedule) {
        (Some(lm), LmSchedule::Merge) => {
            info!(examples = lm.len(), "merging LM corpus into train");
            train.extend(lm);
            None
        }
        (lm, _) => lm,
    };

    let train = LabeledDataset::build(train.examples(), &vocabulary, encoder)?;
    let test = LabeledDataset::build(test.examples(), &vocabulary, encoder)?;

    if train.length() != test.length() {
        return Err(TrainerError::PadLengthMismatch {
            train: train.length(),
            test: test.length(),
        });
    }

    let lm = lm
        .map(|lm| LabeledDataset::build(lm.examples(), &vocabulary, encoder))
        .transpose()?;

    info!(
        train = train.len(),
        test = test.len(),
        lm = lm.as_ref().map(LabeledDataset::len).unwrap_or(0),
        length = train.length(),
        "prepared datasets"
    );

    Ok(PreparedData {
        vocabulary,
        train,
        test,
        lm,
    })
}

/// Read the corpora named in `config` and build all splits.
pub fn prepare(config: &PrepareConfig, encoder: &dyn SubwordEncoder) -> Result<PreparedData> {
    let train = read_corpus(&config.train_set, config.start_index, config.max_lines)?;
    let test = read_corpus(&config.test_set, config.start_index, config.max_lines)?;
    // LM lines carry no leading id field.
    let lm = config
        .lm_set
        .as_ref()
        .map(|path| read_corpus(path, 0, Some(config.lm_length)))
        .transpose()?;

    prepare_corpora(train, test, lm, config, encoder)
}

/// Write the vocabulary and every split into `dir`.
pub fn write_prepared<P: AsRef<Path>>(data: &PreparedData, dir: P) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    write_vocabulary(dir.join(VOCAB_FILE), &data.vocabulary)?;
    data.train
        .write_jsonl(BufWriter::new(File::create(dir.join(TRAIN_FILE))?))?;
    data.test
        .write_jsonl(BufWriter::new(File::create(dir.join(TEST_FILE))?))?;
    if let Some(lm) = &data.lm {
        lm.write_jsonl(BufWriter::new(File::create(dir.join(LM_FILE))?))?;
    }

    info!(dir = %dir.display(), "wrote prepared data");
    Ok(())
}

/// Load the tokenizer, prepare all splits and write them to
/// `config.output_dir`.
pub fn run_prepare(config: &PrepareConfig) -> Result<PreparedData> {
    config.validate()?;

    let encoder =
        HfSubwordEncoder::from_file(&config.tokenizer, config.pad_length, config.max_length)?;
    let data = prepare(config, &encoder)?;
    write_prepared(&data, &config.output_dir)?;

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::read_vocabulary;
    use crate::dataset::DatasetRecord;
    use crate::encoding::WordEncoder;
    use interpunct_core::{InterpunctError, SentinelLabels};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn lines(lines: &[&str]) -> Corpus {
        Corpus::from_lines(lines.iter().copied(), 0, None).unwrap()
    }

    #[test]
    fn test_merge_appends_lm_to_train() {
        let train = lines(&["hello <comma> world"]);
        let test = lines(&["fine <comma>"]);
        let lm = lines(&["so what <question_mark>"]);

        let config = PrepareConfig::default();
        let data =
            prepare_corpora(train, test, Some(lm), &config, &WordEncoder { pad_length: 4 })
                .unwrap();

        assert_eq!(data.train.len(), 2);
        assert!(data.lm.is_none());
        assert!(data.vocabulary.code_of("<question_mark>").is_some());
        assert_eq!(data.train.length(), data.test.length());
    }

    #[test]
    fn test_separate_keeps_lm_split() {
        let train = lines(&["hello <comma> world"]);
        let test = lines(&["fine <comma>"]);
        let lm = lines(&["so what <question_mark>"]);

        let config =
            PrepareConfig::default().with_lm_schedule(LmSchedule::Separate { epochs: 1 });
        let data =
            prepare_corpora(train, test, Some(lm), &config, &WordEncoder { pad_length: 4 })
                .unwrap();

        assert_eq!(data.train.len(), 1);
        assert_eq!(data.lm.as_ref().map(LabeledDataset::len), Some(1));
        // LM labels still land in the shared vocabulary.
        assert!(data.vocabulary.code_of("<question_mark>").is_some());
    }

    #[test]
    fn test_pad_length_mismatch() {
        let train = lines(&["a b c d e f g <comma>"]);
        let test = lines(&["a <comma>"]);

        let err = prepare_corpora(
            train,
            test,
            None,
            &PrepareConfig::default(),
            &WordEncoder { pad_length: 4 },
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "train length with padding is 12 while test length is 4"
        );
    }

    #[test]
    fn test_test_label_outside_vocabulary() {
        let train = lines(&["hello <comma>"]);
        let test = lines(&["hello <exclamation_mark>"]);

        let err = prepare_corpora(
            train,
            test,
            None,
            &PrepareConfig::default(),
            &WordEncoder { pad_length: 4 },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TrainerError::Core(InterpunctError::UnknownLabel(_))
        ));
    }

    #[test]
    fn test_prepare_and_write_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, body: &str| {
            let path = dir.path().join(name);
            let mut file = File::create(&path).unwrap();
            file.write_all(body.as_bytes()).unwrap();
            path
        };

        let train = write(
            "train.txt",
            "u1 hello <comma> world\nu2 yes <full_stop>\nu3 skipped <comma>\n",
        );
        let test = write("dev.txt", "u4 ok <full_stop>\n");
        let lm = write("lm.txt", "so <comma> what\nnever read <full_stop>\n");
        let out = dir.path().join("prepared");

        let config = PrepareConfig::new()
            .with_train_set(&train)
            .with_test_set(&test)
            .with_lm_set(&lm, 1)
            .with_lm_schedule(LmSchedule::Separate { epochs: 1 })
            .with_max_lines(Some(2))
            .with_output_dir(&out);

        let data = prepare(&config, &WordEncoder { pad_length: 4 }).unwrap();
        assert_eq!(data.train.len(), 2);
        assert_eq!(data.test.len(), 1);
        assert_eq!(data.lm.as_ref().map(LabeledDataset::len), Some(1));

        write_prepared(&data, &out).unwrap();

        let vocab = read_vocabulary(out.join(VOCAB_FILE), &SentinelLabels::default()).unwrap();
        assert_eq!(vocab, data.vocabulary);

        let train_jsonl = fs::read_to_string(out.join(TRAIN_FILE)).unwrap();
        let records: Vec<DatasetRecord> = train_jsonl
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].labels, data.train.labels()[0]);

        assert!(out.join(TEST_FILE).exists());
        assert!(out.join(LM_FILE).exists());
    }

    #[test]
    fn test_run_prepare_rejects_invalid_config() {
        let config = PrepareConfig::default().with_pad_length(0);
        assert!(matches!(
            run_prepare(&config),
            Err(TrainerError::InvalidConfig(_))
        ));
    }
}
