//! Chinese to Japanese kanji conversion.
//!
//! Two stages, mirroring OpenCC's configurations. The first stage brings the
//! input to OpenCC standard traditional characters, the second maps those
//! (kyūjitai) to Japanese shinjitai:
//!
//! | Region        | Stage 1 | Stage 2 |
//! |---------------|---------|---------|
//! | `Simplified`  | `s2t`   | `t2jp`  |
//! | `Taiwan`      | `tw2t`  | `t2jp`  |
//! | `HongKong`    | `hk2t`  | `t2jp`  |
//! | `Traditional` | `hk2t`  | none    |
//!
//! Each character is converted on its own; there is no phrase-level
//! disambiguation.

use std::collections::HashMap;
use std::path::Path;

use kotoba_config::HanRegion;
use kotoba_core::convert::HanConverter;
use kotoba_core::error::ConvertError;

#[rustfmt::skip]
const SIMPLIFIED_TO_TRADITIONAL: &[(char, char)] = &[
    ('学', '學'), ('车', '車'), ('东', '東'), ('国', '國'), ('语', '語'), ('说', '說'),
    ('书', '書'), ('马', '馬'), ('门', '門'), ('电', '電'), ('话', '話'), ('时', '時'),
    ('间', '間'), ('长', '長'), ('问', '問'), ('题', '題'), ('气', '氣'), ('铁', '鐵'),
    ('钱', '錢'), ('银', '銀'), ('发', '發'), ('图', '圖'), ('馆', '館'), ('饭', '飯'),
    ('饮', '飲'), ('鱼', '魚'), ('鸟', '鳥'), ('龙', '龍'), ('风', '風'), ('飞', '飛'),
    ('买', '買'), ('卖', '賣'), ('读', '讀'), ('写', '寫'), ('习', '習'), ('认', '認'),
    ('识', '識'), ('爱', '愛'), ('乐', '樂'), ('园', '園'), ('业', '業'), ('经', '經'),
    ('济', '濟'), ('会', '會'), ('员', '員'), ('见', '見'), ('觉', '覺'), ('记', '記'),
    ('让', '讓'), ('机', '機'), ('样', '樣'), ('变', '變'), ('对', '對'), ('实', '實'),
    ('验', '驗'), ('检', '檢'), ('测', '測'), ('亚', '亞'), ('欧', '歐'), ('广', '廣'),
    ('边', '邊'), ('远', '遠'), ('进', '進'), ('过', '過'), ('还', '還'), ('这', '這'),
    ('们', '們'), ('来', '來'), ('为', '為'), ('汉', '漢'), ('历', '歷'), ('战', '戰'),
    ('举', '舉'), ('号', '號'), ('楼', '樓'), ('医', '醫'), ('药', '藥'), ('体', '體'),
    ('头', '頭'), ('脑', '腦'), ('听', '聽'), ('视', '視'), ('剧', '劇'), ('灯', '燈'),
    ('恋', '戀'), ('梦', '夢'), ('压', '壓'), ('泽', '澤'), ('单', '單'), ('宝', '寶'),
    ('岛', '島'), ('将', '將'), ('带', '帶'), ('团', '團'), ('黄', '黃'), ('红', '紅'),
    ('绿', '綠'), ('蓝', '藍'), ('颜', '顏'), ('观', '觀'), ('欢', '歡'), ('难', '難'),
    ('鸡', '雞'), ('猫', '貓'), ('线', '線'), ('网', '網'), ('纸', '紙'), ('笔', '筆'),
    ('钟', '鐘'), ('晓', '曉'), ('烧', '燒'), ('热', '熱'), ('确', '確'), ('应', '應'),
    ('处', '處'), ('转', '轉'), ('运', '運'), ('动', '動'), ('劳', '勞'), ('务', '務'),
    ('区', '區'), ('县', '縣'), ('际', '際'), ('关', '關'), ('开', '開'), ('闭', '閉'),
    ('双', '雙'), ('亲', '親'), ('现', '現'), ('质', '質'), ('贝', '貝'), ('财', '財'),
    ('贵', '貴'), ('价', '價'), ('总', '總'), ('点', '點'), ('从', '從'), ('众', '眾'),
    ('虫', '蟲'), ('当', '當'), ('尽', '盡'), ('荣', '榮'), ('营', '營'), ('与', '與'),
    ('两', '兩'), ('丽', '麗'), ('乡', '鄉'), ('礼', '禮'), ('节', '節'), ('艺', '藝'),
    ('术', '術'), ('装', '裝'), ('筑', '築'), ('饺', '餃'), ('词', '詞'), ('练', '練'),
    ('级', '級'), ('课', '課'), ('试', '試'),
];

/// Taiwan variants → OpenCC standard traditional
#[rustfmt::skip]
const TAIWAN_TO_TRADITIONAL: &[(char, char)] = &[
    ('裡', '裏'), ('為', '爲'), ('偽', '僞'), ('衛', '衞'),
];

/// Hong Kong variants → OpenCC standard traditional
#[rustfmt::skip]
const HONG_KONG_TO_TRADITIONAL: &[(char, char)] = &[
    ('綫', '線'), ('着', '著'), ('為', '爲'), ('偽', '僞'),
];

#[rustfmt::skip]
const TRADITIONAL_TO_JAPANESE: &[(char, char)] = &[
    ('學', '学'), ('國', '国'), ('會', '会'), ('來', '来'), ('氣', '気'), ('鐵', '鉄'),
    ('錢', '銭'), ('發', '発'), ('圖', '図'), ('讀', '読'), ('賣', '売'), ('樂', '楽'),
    ('實', '実'), ('驗', '験'), ('檢', '検'), ('亞', '亜'), ('歐', '欧'), ('廣', '広'),
    ('邊', '辺'), ('歷', '歴'), ('戰', '戦'), ('舉', '挙'), ('號', '号'), ('樓', '楼'),
    ('醫', '医'), ('藥', '薬'), ('體', '体'), ('腦', '脳'), ('聽', '聴'), ('燈', '灯'),
    ('戀', '恋'), ('壓', '圧'), ('澤', '沢'), ('單', '単'), ('寶', '宝'), ('將', '将'),
    ('帶', '帯'), ('團', '団'), ('黃', '黄'), ('綠', '緑'), ('顏', '顔'), ('觀', '観'),
    ('歡', '歓'), ('雞', '鶏'), ('貓', '猫'), ('曉', '暁'), ('燒', '焼'), ('應', '応'),
    ('處', '処'), ('轉', '転'), ('勞', '労'), ('區', '区'), ('縣', '県'), ('關', '関'),
    ('雙', '双'), ('總', '総'), ('點', '点'), ('從', '従'), ('眾', '衆'), ('蟲', '虫'),
    ('當', '当'), ('盡', '尽'), ('榮', '栄'), ('營', '営'), ('與', '与'), ('兩', '両'),
    ('鄉', '郷'), ('禮', '礼'), ('藝', '芸'), ('說', '説'), ('龍', '竜'), ('寫', '写'),
    ('經', '経'), ('濟', '済'), ('覺', '覚'), ('讓', '譲'), ('樣', '様'), ('變', '変'),
    ('對', '対'), ('價', '価'), ('裝', '装'), ('爲', '為'), ('僞', '偽'), ('衞', '衛'),
];

type CharTable = HashMap<char, String>;

fn builtin_table(pairs: &[(char, char)]) -> CharTable {
    pairs
        .iter()
        .filter(|(from, to)| from != to)
        .map(|&(from, to)| (from, to.to_string()))
        .collect()
}

/// Parse an OpenCC dictionary text file (`key<TAB>candidate candidate...`).
/// Phrase entries are skipped, the first candidate wins.
pub fn parse_opencc_table(text: &str) -> Result<CharTable, ConvertError> {
    let mut table = CharTable::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, candidates)) = line.split_once('\t') else {
            return Err(ConvertError::Table(format!(
                "line {}: expected tab-separated entry",
                line_no + 1
            )));
        };

        let mut key_chars = key.chars();
        let (Some(from), None) = (key_chars.next(), key_chars.next()) else {
            continue;
        };

        if let Some(first) = candidates.split_whitespace().next() {
            table.insert(from, first.to_string());
        }
    }

    Ok(table)
}

fn load_table(path: &Path) -> Result<CharTable, ConvertError> {
    tracing::info!("Loading OpenCC table from {}", path.display());
    let text = std::fs::read_to_string(path)?;
    parse_opencc_table(&text)
}

pub struct OpenccConverter {
    region: HanRegion,
    /// Stage 1 for `region`: s2t, tw2t or hk2t
    to_traditional: CharTable,
    traditional_to_japanese: CharTable,
}

impl OpenccConverter {
    pub fn builtin(region: HanRegion) -> Self {
        let to_traditional = match region {
            HanRegion::Simplified => SIMPLIFIED_TO_TRADITIONAL,
            HanRegion::Taiwan => TAIWAN_TO_TRADITIONAL,
            HanRegion::HongKong | HanRegion::Traditional => HONG_KONG_TO_TRADITIONAL,
        };

        Self {
            region,
            to_traditional: builtin_table(to_traditional),
            traditional_to_japanese: builtin_table(TRADITIONAL_TO_JAPANESE),
        }
    }

    /// Built-in tables extended (and overridden) by OpenCC files.
    /// `to_traditional` replaces entries of the region's first stage.
    pub fn with_tables(
        region: HanRegion,
        to_traditional: Option<&Path>,
        traditional_to_japanese: Option<&Path>,
    ) -> Result<Self, ConvertError> {
        let mut converter = Self::builtin(region);

        if let Some(path) = to_traditional {
            converter.to_traditional.extend(load_table(path)?);
        }
        if let Some(path) = traditional_to_japanese {
            converter.traditional_to_japanese.extend(load_table(path)?);
        }

        Ok(converter)
    }

    pub fn region(&self) -> HanRegion {
        self.region
    }

    fn first_stage(&self, c: char) -> String {
        self.to_traditional
            .get(&c)
            .cloned()
            .unwrap_or_else(|| c.to_string())
    }

    fn second_stage(&self, text: &str) -> String {
        if self.region == HanRegion::Traditional {
            return text.to_string();
        }

        text.chars()
            .map(|c| {
                self.traditional_to_japanese
                    .get(&c)
                    .cloned()
                    .unwrap_or_else(|| c.to_string())
            })
            .collect()
    }
}

impl HanConverter for OpenccConverter {
    fn convert_char(&self, c: char) -> Result<String, ConvertError> {
        Ok(self.second_stage(&self.first_stage(c)))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn simplified_goes_through_both_stages() {
        let conv = OpenccConverter::builtin(HanRegion::Simplified);
        assert_eq!(conv.convert("学").unwrap(), "学");
        assert_eq!(conv.convert("铁").unwrap(), "鉄");
        assert_eq!(conv.convert("图书馆").unwrap(), "図書館");
        assert_eq!(conv.convert("说").unwrap(), "説");
    }

    #[test]
    fn japanese_and_kana_pass_through() {
        let conv = OpenccConverter::builtin(HanRegion::Simplified);
        assert_eq!(conv.convert("学校").unwrap(), "学校");
        assert_eq!(conv.convert("食べる").unwrap(), "食べる");
        assert_eq!(conv.convert("たべる").unwrap(), "たべる");
    }

    #[test]
    fn traditional_region_only_normalizes_variants() {
        let conv = OpenccConverter::builtin(HanRegion::Traditional);
        assert_eq!(conv.convert("國語").unwrap(), "國語");
        assert_eq!(conv.convert("綫").unwrap(), "線");
        assert_eq!(conv.convert("為").unwrap(), "爲");
    }

    #[test]
    fn taiwan_and_hong_kong_run_both_stages() {
        let taiwan = OpenccConverter::builtin(HanRegion::Taiwan);
        assert_eq!(taiwan.convert("國語").unwrap(), "国語");
        assert_eq!(taiwan.convert("為").unwrap(), "為");
        assert_eq!(taiwan.convert("裡").unwrap(), "裏");
        // simplified input is not this region's first stage
        assert_eq!(taiwan.convert("铁").unwrap(), "铁");

        let hong_kong = OpenccConverter::builtin(HanRegion::HongKong);
        assert_eq!(hong_kong.convert("學").unwrap(), "学");
        assert_eq!(hong_kong.convert("綫").unwrap(), "線");
        assert_eq!(hong_kong.convert("偽").unwrap(), "偽");
    }

    #[test]
    fn opencc_file_extends_tables() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# comment").unwrap();
        writeln!(file, "乌\t烏 乌").unwrap();
        writeln!(file, "乌龙\t烏龍").unwrap();

        let conv =
            OpenccConverter::with_tables(HanRegion::Simplified, Some(file.path()), None).unwrap();
        assert_eq!(conv.convert("乌").unwrap(), "烏");
    }

    #[test]
    fn malformed_opencc_line_is_rejected() {
        assert!(matches!(
            parse_opencc_table("乌 烏"),
            Err(ConvertError::Table(_))
        ));
    }
}
