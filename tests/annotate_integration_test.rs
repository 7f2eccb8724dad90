use pinyin_annotate::domain::ports::Pipeline;
use pinyin_annotate::utils::validation::Validate;
use pinyin_annotate::{
    AnnotateConfig, AnnotateEngine, AnnotatePipeline, LocalStorage, PinyinStyle,
};
use std::fs;

fn annotate_config(input: &str) -> AnnotateConfig {
    AnnotateConfig {
        input_file: input.to_string(),
        output: None,
        style: PinyinStyle::Tone,
        gap: 1,
        preview: false,
    }
}

#[tokio::test]
async fn test_end_to_end_annotation() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("lesson.txt");
    let input_text = "你好世界\n\nplain english line\n中文 mixed 行\n";
    fs::write(&input_path, input_text).unwrap();

    let config = annotate_config(input_path.to_str().unwrap());
    let pipeline = AnnotatePipeline::new(LocalStorage::new(), config);
    let engine = AnnotateEngine::new(pipeline);

    let output_path = engine.run().await.unwrap();
    assert_eq!(
        output_path,
        dir.path().join("lesson_pinyin.txt").to_str().unwrap()
    );

    let output = fs::read_to_string(&output_path).unwrap();
    let output_lines: Vec<&str> = output.split('\n').collect();

    // 原始行依序全部保留
    let originals: Vec<&str> = input_text.split('\n').collect();
    let mut remaining = output_lines.iter();
    for original in &originals {
        assert!(
            remaining.any(|line| line == original),
            "original line '{}' missing from output",
            original
        );
    }

    // 含漢字的行上一行是拼音列
    let hello_idx = output_lines
        .iter()
        .position(|l| *l == "你好世界")
        .unwrap();
    assert!(hello_idx > 0);
    let row = output_lines[hello_idx - 1];
    assert!(row.contains("nǐ"));
    assert!(row.contains("hǎo"));
    assert!(row.contains("shì"));
    assert!(row.contains("jiè"));

    // 純英文行和空行上方沒有拼音列
    let plain_idx = output_lines
        .iter()
        .position(|l| *l == "plain english line")
        .unwrap();
    assert_eq!(output_lines[plain_idx - 1], "");
}

#[tokio::test]
async fn test_explicit_output_and_plain_style() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("in.txt");
    let output_path = dir.path().join("nested/out.txt");
    fs::write(&input_path, "中国").unwrap();

    let config = AnnotateConfig {
        input_file: input_path.to_str().unwrap().to_string(),
        output: Some(output_path.to_str().unwrap().to_string()),
        style: PinyinStyle::Plain,
        gap: 1,
        preview: false,
    };
    let pipeline = AnnotatePipeline::new(LocalStorage::new(), config);

    let text = pipeline.extract().await.unwrap();
    let result = pipeline.transform(text).await.unwrap();
    let written_to = pipeline.load(result).await.unwrap();

    assert_eq!(written_to, output_path.to_str().unwrap());
    let output = fs::read_to_string(&output_path).unwrap();
    assert!(output.starts_with("zhong"));
    assert!(output.contains("guo"));
    assert!(output.ends_with("中国"));
}

#[tokio::test]
async fn test_missing_input_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("nope.txt");

    let config = annotate_config(input_path.to_str().unwrap());
    let pipeline = AnnotatePipeline::new(LocalStorage::new(), config);
    let engine = AnnotateEngine::new(pipeline);

    assert!(engine.run().await.is_err());
}

#[tokio::test]
async fn test_non_utf8_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("binary.txt");
    fs::write(&input_path, [0xff, 0xfe, 0x00, 0x01]).unwrap();

    let config = annotate_config(input_path.to_str().unwrap());
    let pipeline = AnnotatePipeline::new(LocalStorage::new(), config);

    assert!(pipeline.extract().await.is_err());
}

#[tokio::test]
async fn test_running_twice_overwrites_output() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("again.txt");
    fs::write(&input_path, "好").unwrap();

    let config = annotate_config(input_path.to_str().unwrap());
    let pipeline = AnnotatePipeline::new(LocalStorage::new(), config.clone());
    let first = AnnotateEngine::new(pipeline).run().await.unwrap();

    let pipeline = AnnotatePipeline::new(LocalStorage::new(), config);
    let second = AnnotateEngine::new(pipeline).run().await.unwrap();

    assert_eq!(first, second);
    let output = fs::read_to_string(&second).unwrap();
    assert_eq!(output.matches("hǎo").count(), 1);
}

#[test]
fn test_config_validation_rules() {
    assert!(annotate_config("lesson.txt").validate().is_ok());
    assert!(annotate_config("").validate().is_err());
    assert!(annotate_config("lesson.zip").validate().is_err());

    let bad_gap = AnnotateConfig {
        gap: 0,
        ..annotate_config("lesson.txt")
    };
    assert!(bad_gap.validate().is_err());
}
