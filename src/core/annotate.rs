use crate::domain::model::{AnnotateResult, AnnotatedLine, PinyinStyle};
use pinyin::ToPinyin;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// 與原始轉換器相同，只標註基本漢字區段 U+4E00..=U+9FFF
pub fn is_hanzi(ch: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&ch)
}

/// 查單一漢字的拼音，非漢字或字典查不到時回傳 None
pub fn syllable(ch: char, style: PinyinStyle) -> Option<&'static str> {
    if !is_hanzi(ch) {
        return None;
    }
    let py = ch.to_pinyin()?;
    Some(match style {
        PinyinStyle::Tone => py.with_tone(),
        PinyinStyle::Plain => py.plain(),
        PinyinStyle::ToneNum => py.with_tone_num_end(),
        PinyinStyle::FirstLetter => py.first_letter(),
    })
}

/// 對單行文字產生標註。原始行永遠原樣保留，含漢字的行才會得到拼音列。
///
/// 拼音列逐字組出：漢字填入音節並墊到至少「音節寬 + gap」與字寬兩者較大者；
/// 空白字元照抄（保留 tab）；其他字元以等寬空格帶過。
pub fn annotate_line(line: &str, style: PinyinStyle, gap: usize) -> AnnotatedLine {
    if !line.chars().any(is_hanzi) {
        return AnnotatedLine {
            pinyin_row: None,
            original: line.to_string(),
        };
    }

    let mut row = String::new();
    for ch in line.chars() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        match syllable(ch, style) {
            Some(py) => {
                let cell = std::cmp::max(char_width, UnicodeWidthStr::width(py) + gap);
                row.push_str(py);
                for _ in UnicodeWidthStr::width(py)..cell {
                    row.push(' ');
                }
            }
            None if ch.is_whitespace() => row.push(ch),
            None => {
                for _ in 0..char_width {
                    row.push(' ');
                }
            }
        }
    }

    AnnotatedLine {
        pinyin_row: Some(row.trim_end().to_string()),
        original: line.to_string(),
    }
}

/// 整份文字的標註。行結構完全保留，含漢字的行上方插入一列拼音。
pub fn annotate_text(text: &str, style: PinyinStyle, gap: usize) -> AnnotateResult {
    let mut out_lines = Vec::new();
    let mut total_lines = 0;
    let mut annotated_lines = 0;
    let mut hanzi_count = 0;

    for line in text.split('\n') {
        total_lines += 1;
        hanzi_count += line.chars().filter(|c| is_hanzi(*c)).count();

        let annotated = annotate_line(line, style, gap);
        if let Some(row) = annotated.pinyin_row {
            out_lines.push(row);
            annotated_lines += 1;
        }
        out_lines.push(annotated.original);
    }

    // 結尾換行會在 split 時多出一個空段，不計入行數
    if text.ends_with('\n') && total_lines > 0 {
        total_lines -= 1;
    }

    AnnotateResult {
        annotated_text: out_lines.join("\n"),
        total_lines,
        annotated_lines,
        hanzi_count,
    }
}
