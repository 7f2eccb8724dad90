use serde::{Deserialize, Serialize};

/// 拼音音節的呈現風格
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum PinyinStyle {
    /// 帶聲調符號，例如 zhōng
    #[default]
    Tone,
    /// 不帶聲調，例如 zhong
    Plain,
    /// 聲調數字置於音節尾，例如 zhong1
    ToneNum,
    /// 只取聲母首字母，例如 z
    FirstLetter,
}

/// 單行標註結果：原始行保持原樣，漢字行才會有拼音列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedLine {
    pub pinyin_row: Option<String>,
    pub original: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnnotateResult {
    pub annotated_text: String,
    pub total_lines: usize,
    pub annotated_lines: usize,
    pub hanzi_count: usize,
}
